use fullscreen_overlay_core::scenario::{ScenarioReport, ScenarioStep};
use fullscreen_overlay_core::{Config, ConfigError, Scenario, ScenarioError, ScenarioRunner};
use log::{error, info};
use std::fmt;
use std::process::ExitCode;

mod cli;
mod logger;

use cli::Args;

#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Scenario(ScenarioError),
    Output(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "{}", e),
            CliError::Scenario(e) => write!(f, "{}", e),
            CliError::Output(e) => write!(f, "Failed to write report: {}", e),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::Output(error)
    }
}

impl From<ScenarioError> for CliError {
    fn from(error: ScenarioError) -> Self {
        CliError::Scenario(error)
    }
}

fn main() -> ExitCode {
    let args = cli::parse_args();

    if let Err(e) = logger::init_logger(args.quiet, args.verbose) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = if args.use_defaults {
        info!("Using default configuration");
        Config::default()
    } else if args.dry_run {
        // Validation only, so a missing config file is not created
        Config::load_existing(args.config_path.as_deref())?
    } else {
        Config::load(args.config_path.as_deref(), true)?
    };
    if let Some(path) = &config.config_path {
        info!("Loaded config from {}", path.display());
    }
    Config::set_config(config);

    let scenario = Scenario::load(&args.scenario)?;

    if args.dry_run {
        info!(
            "Scenario is valid: {} overlay target(s), {} step(s)",
            scenario.overlays.len(),
            scenario.steps.len()
        );
        return Ok(());
    }

    let report = ScenarioRunner::new().run(&scenario)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &ScenarioReport) {
    println!("Attached overlays: {:?}", report.attached);

    for (index, step) in report.steps.iter().enumerate() {
        let dispatched: Vec<String> = step
            .dispatched
            .iter()
            .map(|action| format!("{:?} {}", action.action, action.overlay))
            .collect();
        println!(
            "{}. {} -> [{}] open={:?} scroll_locked={}",
            index + 1,
            step.step,
            dispatched.join(", "),
            step.open,
            step.scroll_locked
        );

        if matches!(step.step, ScenarioStep::Render) {
            println!("{}", step.rendered);
        }
    }

    println!(
        "Final: open={:?} visible={:?} scroll_locked={}",
        report.open, report.visible, report.scroll_locked
    );
    println!("{}", report.rendered);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_dry_run_leaves_config_uncreated() {
        let dir = tempfile::tempdir().unwrap();
        let scenario = dir.path().join("scenario.yaml");
        fs::write(&scenario, "steps:\n  - action: render\n").unwrap();
        let config_path = dir.path().join("config.yaml");

        let args = Args {
            scenario,
            config_path: Some(config_path.clone()),
            dry_run: true,
            ..Args::default()
        };
        run(&args).unwrap();

        assert!(!config_path.exists());
    }
}
