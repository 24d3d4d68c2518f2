use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "fullscreen-overlay",
    version = fullscreen_overlay_core::version(),
    about = "Replay a page scenario through the full-screen overlay lifecycle",
)]
pub struct Args {
    /// Scenario file describing the page, its overlays and the steps to run
    #[arg(value_name = "SCENARIO")]
    pub scenario: PathBuf,

    /// Specify custom configuration file path
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Specify custom configuration file path"
    )]
    pub config_path: Option<PathBuf>,

    /// Validate configuration and scenario, then exit without running or writing files
    #[arg(
        long = "dry-run",
        help = "Validate configuration and scenario, then exit without running or writing files"
    )]
    pub dry_run: bool,

    /// Use default configuration and ignore config files
    #[arg(
        long = "defaults",
        help = "Use default configuration and ignore config files"
    )]
    pub use_defaults: bool,

    /// Print the full report as JSON instead of rendered pages
    #[arg(long = "json")]
    pub json: bool,

    /// Only log info and above
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log everything, including trace output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "fullscreen-overlay",
            "page.yaml",
            "-c",
            "custom.yaml",
            "--dry-run",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.scenario, PathBuf::from("page.yaml"));
        assert_eq!(args.config_path, Some(PathBuf::from("custom.yaml")));
        assert!(args.dry_run);
        assert!(args.verbose);
        assert!(!args.use_defaults);
    }

    #[test]
    fn test_scenario_required() {
        assert!(Args::try_parse_from(["fullscreen-overlay"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["fullscreen-overlay", "page.yaml", "-q", "-v"]).is_err());
    }
}
