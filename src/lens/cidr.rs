//! Address range to CIDR conversion
//!
//! Registry `inetnum` objects describe allocations as inclusive ranges
//! (`"192.0.2.0 - 192.0.2.255"`). This module turns such a range into the
//! minimal list of CIDR blocks covering it.

use anyhow::{anyhow, Result};
use ipnet::{IpNet, Ipv4Subnets, Ipv6Subnets};
use std::net::IpAddr;
use tracing::warn;

/// Convert an inclusive range text into CIDR strings
///
/// Blocks are returned in ascending address order. When the text is not a
/// valid range the original text is returned unchanged as the only element
/// and a warning is logged.
///
/// # Examples
///
/// ```
/// use ripeq::lens::cidr::to_cidr;
///
/// assert_eq!(to_cidr("192.0.2.0 - 192.0.2.3"), vec!["192.0.2.0/30"]);
/// assert_eq!(to_cidr("not a range"), vec!["not a range"]);
/// ```
pub fn to_cidr(range: &str) -> Vec<String> {
    match range_to_nets(range) {
        Ok(nets) => nets.iter().map(|net| net.to_string()).collect(),
        Err(e) => {
            warn!("Error converting inetnum '{}' to CIDR: {}", range, e);
            vec![range.to_string()]
        }
    }
}

/// Parse an inclusive range text and compute its covering CIDR blocks
pub fn range_to_nets(range: &str) -> Result<Vec<IpNet>> {
    let (start, end) = parse_range(range)?;

    if start > end {
        return Err(anyhow!("range end {} is lower than start {}", end, start));
    }

    match (start, end) {
        (IpAddr::V4(start), IpAddr::V4(end)) => {
            Ok(Ipv4Subnets::new(start, end, 0).map(IpNet::V4).collect())
        }
        (IpAddr::V6(start), IpAddr::V6(end)) => {
            Ok(Ipv6Subnets::new(start, end, 0).map(IpNet::V6).collect())
        }
        _ => Err(anyhow!(
            "range endpoints {} and {} belong to different address families",
            start,
            end
        )),
    }
}

/// Split `"<start> - <end>"` into its two endpoints
///
/// A dangling trailing hyphen (`"192.0.2.0 - 192.0.2.3 -"`) is tolerated.
fn parse_range(range: &str) -> Result<(IpAddr, IpAddr)> {
    let mut cleaned = range.trim();
    if let Some(stripped) = cleaned.strip_suffix('-') {
        cleaned = stripped.trim_end();
    }

    let parts: Vec<&str> = cleaned.split('-').map(str::trim).collect();
    let [start, end] = parts.as_slice() else {
        return Err(anyhow!("expected '<start> - <end>'"));
    };

    let start = start
        .parse::<IpAddr>()
        .map_err(|e| anyhow!("invalid start address '{}': {}", start, e))?;
    let end = end
        .parse::<IpAddr>()
        .map_err(|e| anyhow!("invalid end address '{}': {}", end, e))?;

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4_span(net: &IpNet) -> (u32, u32) {
        match net {
            IpNet::V4(n) => (u32::from(n.network()), u32::from(n.broadcast())),
            IpNet::V6(_) => panic!("unexpected v6 block"),
        }
    }

    #[test]
    fn test_aligned_block() {
        assert_eq!(to_cidr("192.0.2.0 - 192.0.2.3"), vec!["192.0.2.0/30"]);
        assert_eq!(to_cidr("10.0.0.0 - 10.255.255.255"), vec!["10.0.0.0/8"]);
    }

    #[test]
    fn test_unaligned_range() {
        assert_eq!(
            to_cidr("192.0.2.1 - 192.0.2.6"),
            vec![
                "192.0.2.1/32",
                "192.0.2.2/31",
                "192.0.2.4/31",
                "192.0.2.6/32"
            ]
        );
    }

    #[test]
    fn test_single_address() {
        assert_eq!(to_cidr("198.51.100.7 - 198.51.100.7"), vec!["198.51.100.7/32"]);
    }

    #[test]
    fn test_whitespace_and_trailing_hyphen() {
        assert_eq!(to_cidr("  192.0.2.0   -  192.0.2.255  "), vec!["192.0.2.0/24"]);
        assert_eq!(to_cidr("192.0.2.0 - 192.0.2.255 -"), vec!["192.0.2.0/24"]);
        assert_eq!(to_cidr("192.0.2.0 - 192.0.2.255 - "), vec!["192.0.2.0/24"]);
    }

    #[test]
    fn test_ipv6_range() {
        assert_eq!(
            to_cidr("2001:db8:: - 2001:db8::ffff"),
            vec!["2001:db8::/112"]
        );
    }

    #[test]
    fn test_malformed_returns_input() {
        for input in [
            "",
            "192.0.2.0",
            "192.0.2.0/24",
            "192.0.2.300 - 192.0.2.255",
            "192.0.2.10 - 192.0.2.1",
            "192.0.2.0 - 2001:db8::1",
            "1.1.1.1 - 1.1.1.2 - 1.1.1.3",
        ] {
            assert_eq!(to_cidr(input), vec![input.to_string()], "input {input:?}");
        }
    }

    #[test]
    fn test_blocks_cover_range_exactly() {
        let cases = [
            ("0.0.0.0", "255.255.255.255"),
            ("10.0.0.1", "10.0.3.254"),
            ("172.16.5.17", "172.16.9.200"),
            ("192.0.2.128", "192.0.2.128"),
        ];

        for (start, end) in cases {
            let nets = range_to_nets(&format!("{start} - {end}")).unwrap();
            let start: u32 = start.parse::<std::net::Ipv4Addr>().unwrap().into();
            let end: u32 = end.parse::<std::net::Ipv4Addr>().unwrap().into();

            // contiguous, ascending, non-overlapping and exactly covering
            let mut next = start as u64;
            for net in &nets {
                let (lo, hi) = v4_span(net);
                assert_eq!(lo as u64, next);
                next = hi as u64 + 1;
            }
            assert_eq!(next, end as u64 + 1);

            // minimal: no two neighbours could be merged into one aligned block
            for pair in nets.windows(2) {
                if let (IpNet::V4(a), IpNet::V4(b)) = (&pair[0], &pair[1]) {
                    if a.prefix_len() == b.prefix_len() && a.prefix_len() > 0 {
                        assert_ne!(a.supernet(), b.supernet());
                    }
                }
            }
        }
    }
}
