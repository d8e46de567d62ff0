use clap::Parser;
use ripeq::RipeqConfig;
use tracing::Level;

mod commands;

use commands::search::SearchCmdArgs;

const EXAMPLES: &str = "\
Examples:
  Basic Usage (List Format - Default):
    ripeq --query <search string> --filter inetnum

  Basic Usage (List Format with CIDR Conversion):
    ripeq --query <search string> --filter inetnum --cidr

  Output as a Table:
    ripeq --query <search string> --filter inetnum,netname --table

  Output as a Table with CIDR Conversion:
    ripeq --query <search string> --filter inetnum,netname --table --cidr

  Output in Grepable Format with Default Separator (Comma):
    ripeq --query <search string> --filter inetnum --grepable

  Output in Grepable Format with Custom Separator (`;`):
    ripeq --query <search string> --filter inetnum --grepable --separator \";\"

  Output to File in Plain Text:
    ripeq --query <search string> --filter netname,inetnum --output targets.txt --output-type plain

  Output to File in JSON:
    ripeq --query <search string> --filter netname,inetnum --cidr --output targets.json --output-type json

  Output to File in XML:
    ripeq --query <search string> --filter netname,inetnum --cidr --output targets.xml --output-type xml

  Remove Duplicates from Output:
    ripeq --query <search string> --filter netname,inetnum --cidr --unique";

#[derive(Parser)]
#[clap(author, version, about = "RIPE API Subnet Query Tool", long_about = None)]
#[clap(after_long_help = EXAMPLES)]
struct Cli {
    /// configuration file path, by default $HOME/.ripeq/ripeq.toml is used if present
    #[clap(long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    #[clap(flatten)]
    search: SearchCmdArgs,
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // warnings are always shown so skipped pages and bad ranges stay visible
    let level = if cli.debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    eprintln!("Ripe API Query Tool - v{}", env!("CARGO_PKG_VERSION"));

    let config = match RipeqConfig::new(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    };
    tracing::debug!("configuration:\n{}", config.summary());

    commands::search::run(&config, cli.search);
}
