use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "lead-audit",
    version,
    about = "Audit leads tagged as wrong numbers and find the recoverable ones"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Settings file (toml, yaml or json); LEAD_AUDIT__* variables override it"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the supported countries and their numbering rules
    Countries,
    /// Classify a single phone number against a country's static rule
    Classify {
        #[arg(long, help = "Country name or code, e.g. Colombia or CO")]
        country: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        notes: String,
        #[arg(long, default_value_t = 0)]
        attempts: u32,
    },
    /// Audit a lead table and write the report
    Audit {
        #[arg(long, help = "Country name or code, e.g. Colombia or CO")]
        country: String,
        #[arg(long, help = "JSON table export of the leads")]
        input: PathBuf,
        #[arg(long, default_value_t = false, help = "Skip the live numbering-plan lookup")]
        no_lookup: bool,
        #[arg(long, default_value_t = false, help = "Skip the generated narrative")]
        no_narrative: bool,
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}
