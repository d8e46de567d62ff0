#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! ripeq - RIPE database full-text search exporter
//!
//! ripeq queries the RIPE database full-text search API, walks through every
//! result page, keeps a caller-selected set of fields, optionally converts
//! `inetnum` ranges to CIDR blocks, removes duplicate rows and renders the
//! result as a table, grepable text, a list, JSON or XML.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | `cli` (default) | Command-line binary | `clap`, `indicatif`, `tracing-subscriber` |
//!
//! The library itself builds without any feature:
//!
//! ```toml
//! ripeq = { version = "0.1", default-features = false }
//! ```
//!
//! # Architecture
//!
//! - **[`config`]**: Configuration management
//! - **[`lens`]**: The search pipeline
//!   - `search`: paginated fetching of registry results
//!   - `registry`: transport seam, XML/JSON decoding and field extraction
//!   - `rows`: header resolution, CIDR conversion and deduplication
//!   - `cidr`: range to CIDR conversion
//!   - `render`: table, grepable, list, JSON and XML output
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ripeq::lens::rows::{build_rows, RowOptions};
//! use ripeq::lens::search::{SearchArgs, SearchLens};
//!
//! let fields = Some(vec!["netname".to_string(), "inetnum".to_string()]);
//! let lens = SearchLens::new(&ripeq::RipeqConfig::new(&None)?);
//! let records = lens.search(&SearchArgs::new("Example GmbH").with_fields(fields.clone()))?;
//!
//! let rows = build_rows(&records, &RowOptions::new(fields).with_cidr(true).with_unique(true));
//! for row in &rows.rows {
//!     println!("{}", row.join(","));
//! }
//! ```

pub mod config;
pub mod lens;

// =============================================================================
// Configuration
// =============================================================================

pub use config::RipeqConfig;

// =============================================================================
// Lens Module - commonly used types
// =============================================================================

pub use lens::cidr::to_cidr;
pub use lens::registry::{Record, RegistryClient, UreqClient};
pub use lens::render::{render, render_records, write_output, OutputSink, RenderOptions};
pub use lens::rows::{build_rows, RowOptions, RowSet};
pub use lens::search::{SearchArgs, SearchLens, SearchProgress, SearchProgressCallback};
pub use lens::utils::{OutputFormat, PlainStyle};
