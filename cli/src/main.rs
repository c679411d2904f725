use anyhow::{Context, Result};
use clap::Parser;
use retention_roi_core_rs::{CalculatorInputs, PlanKey, ProjectionConfig, RoiEngine};
use std::path::Path;
use tracing_subscriber::EnvFilter;

mod cli;
mod output;

use cli::{Cli, Commands, InputArgs, OutputFormat};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProjectionConfig::default(),
    };
    let engine = RoiEngine::new(config).context("Failed to build projection engine")?;

    match cli.command {
        Commands::Project {
            inputs,
            plan,
            format,
        } => {
            let result = engine.project(&read_inputs(&inputs), PlanKey::from(plan));
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Text => print!("{}", output::render_projection(&result)),
            }
        }
        Commands::Compare { inputs, format } => {
            let inputs = read_inputs(&inputs);
            let results = engine.compare_plans(&inputs);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
                OutputFormat::Text => print!(
                    "{}",
                    output::render_comparison(&results, engine.cheapest_plan(&inputs))
                ),
            }
        }
        Commands::Plans { format } => match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(engine.catalog())?),
            OutputFormat::Text => print!(
                "{}",
                output::render_catalog(engine.catalog(), engine.config().messaging.exchange_rate)
            ),
        },
        Commands::Config => {
            let report = serde_json::json!({
                "config_hash": engine.config_hash(),
                "config": engine.config(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

// Logs go to stderr so JSON on stdout stays parseable
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: &Path) -> Result<ProjectionConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

fn read_inputs(args: &InputArgs) -> CalculatorInputs {
    CalculatorInputs::from_raw(
        &args.monthly_customers,
        &args.average_order_value,
        &args.returning_customers,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cli::PlanArg;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["retention-roi"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    fn project_args(args: &[&str]) -> (CalculatorInputs, PlanArg) {
        let mut argv = vec!["project"];
        argv.extend_from_slice(args);
        match parse(&argv).command {
            Commands::Project { inputs, plan, .. } => (read_inputs(&inputs), plan),
            other => panic!("expected project command, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_inputs_normalize_to_zero() {
        let (inputs, _) = project_args(&["--customers", "-5", "--aov", "100", "--returning", "0"]);
        assert_eq!(inputs.monthly_customers, 0);
        assert_eq!(inputs.average_order_value, 100.0);

        let (inputs, _) = project_args(&["--customers", "100", "--aov", "-2500", "--returning", "-3"]);
        assert_eq!(inputs.monthly_customers, 100);
        assert_eq!(inputs.average_order_value, 0.0);
        assert_eq!(inputs.returning_customers, 0);
    }

    #[test]
    fn test_form_text_inputs() {
        let (inputs, _) = project_args(&["--customers", "12abc", "--aov", "19.99", "--returning", "none"]);
        assert_eq!(inputs.monthly_customers, 12);
        assert_eq!(inputs.average_order_value, 19.99);
        assert_eq!(inputs.returning_customers, 0);
    }

    #[test]
    fn test_compare_accepts_negative_inputs() {
        match parse(&["compare", "--customers", "-1", "--aov", "-1"]).command {
            Commands::Compare { inputs, .. } => {
                let inputs = read_inputs(&inputs);
                assert_eq!(inputs.monthly_customers, 0);
                assert_eq!(inputs.average_order_value, 0.0);
            }
            other => panic!("expected compare command, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_choices() {
        let (_, plan) = project_args(&[]);
        assert_eq!(PlanKey::from(plan), PlanKey::Basic);

        let (_, plan) = project_args(&["--plan", "Standard"]);
        assert_eq!(PlanKey::from(plan), PlanKey::Standard);

        let (_, plan) = project_args(&["-p", "pro"]);
        assert_eq!(PlanKey::from(plan), PlanKey::Pro);

        assert!(Cli::try_parse_from(["retention-roi", "project", "--plan", "enterprise"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["plans", "-vv", "--config", "roi.json"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some(Path::new("roi.json")));
    }
}
