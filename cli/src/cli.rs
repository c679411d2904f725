use clap::{Args, Parser, Subcommand, ValueEnum};
use retention_roi_core_rs::PlanKey;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "retention-roi")]
#[command(about = "Retention ROI projection for follow-up messaging plans", long_about = None)]
#[command(version)]
pub struct Cli {
    /// JSON config file overriding the built-in constants
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Project ROI for one plan
    Project {
        #[command(flatten)]
        inputs: InputArgs,

        /// Plan to cost
        #[arg(short, long, value_enum, ignore_case = true, default_value = "basic")]
        plan: PlanArg,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Project ROI for every plan side by side
    Compare {
        #[command(flatten)]
        inputs: InputArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the plan catalog
    Plans {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the effective config and its fingerprint as JSON
    Config,
}

/// Pricing tier accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlanArg {
    Basic,
    Standard,
    Pro,
}

impl From<PlanArg> for PlanKey {
    fn from(plan: PlanArg) -> Self {
        match plan {
            PlanArg::Basic => PlanKey::Basic,
            PlanArg::Standard => PlanKey::Standard,
            PlanArg::Pro => PlanKey::Pro,
        }
    }
}

/// Raw calculator inputs, read the same way the pricing form reads them
///
/// Values are kept as text so that anything the form would accept,
/// including negatives and stray characters, normalizes to a number
/// instead of failing to parse.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Customers transacting per month
    #[arg(
        long = "customers",
        visible_alias = "monthly-customers",
        default_value = "0",
        allow_hyphen_values = true
    )]
    pub monthly_customers: String,

    /// Average order value, local currency
    #[arg(
        long = "aov",
        visible_alias = "average-order-value",
        default_value = "0",
        allow_hyphen_values = true
    )]
    pub average_order_value: String,

    /// Repeat buyers among monthly customers
    #[arg(
        long = "returning",
        visible_alias = "returning-customers",
        default_value = "0",
        allow_hyphen_values = true
    )]
    pub returning_customers: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
