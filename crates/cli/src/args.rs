use std::path::PathBuf;

use clap::Parser;

use quickbasket_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "quickbasket")]
#[command(about = "QuickBasket grocery store: browse, fill a cart, check out")]
pub struct Cli {
    /// JSON file holding products and sales; created on first write.
    #[arg(long, env = "QUICKBASKET_DATA", default_value = "data.json")]
    pub data_file: PathBuf,

    /// Keep everything in memory; nothing is written to disk.
    #[arg(long, default_value_t = false)]
    pub in_memory: bool,

    /// Do not load the sample catalog into a fresh store.
    #[arg(long, default_value_t = false)]
    pub no_seed: bool,

    /// Log output format (`pretty` or `json`); logs go to stderr.
    #[arg(long, default_value = "pretty")]
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["quickbasket"]).unwrap();
        assert!(!cli.in_memory);
        assert!(!cli.no_seed);
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "quickbasket",
            "--data-file",
            "/tmp/shop.json",
            "--no-seed",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.data_file, PathBuf::from("/tmp/shop.json"));
        assert!(cli.no_seed);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(Cli::try_parse_from(["quickbasket", "--log-format", "xml"]).is_err());
    }
}
