//! `lead-audit` binary

mod cli;
mod commands;
mod logging;

use clap::Parser;
use lead_audit_config::load_settings;

use crate::cli::{Cli, Commands};
use crate::commands::AuditArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    logging::init(&settings.logging);

    tracing::debug!(
        lookup = settings.lookup.enabled,
        narrative = settings.narrative.enabled,
        "Settings loaded"
    );

    match cli.command {
        Commands::Countries => commands::countries(cli.json)?,
        Commands::Classify {
            country,
            phone,
            notes,
            attempts,
        } => commands::classify(&settings, cli.json, &country, &phone, &notes, attempts)?,
        Commands::Audit {
            country,
            input,
            no_lookup,
            no_narrative,
            output_dir,
        } => {
            commands::audit(
                settings,
                cli.json,
                AuditArgs {
                    country,
                    input,
                    no_lookup,
                    no_narrative,
                    output_dir,
                },
            )
            .await?
        }
    }

    Ok(())
}
