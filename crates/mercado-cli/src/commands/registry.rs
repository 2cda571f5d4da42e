use serde::Serialize;
use tracing::info;

use crate::cli::RegistryCommand;
use crate::error::CliError;

use super::{CommandResult, Context};

#[derive(Debug, Serialize)]
struct SeedReport {
    seeded: usize,
    db_path: String,
}

pub fn run(context: &Context, command: &RegistryCommand) -> Result<CommandResult, CliError> {
    match command {
        RegistryCommand::Seed => {
            let store = context.open_store()?;
            let seeded = store.seed_default_catalog()?;
            let db_path = store.db_path().display().to_string();
            info!(count = seeded, path = %db_path, "registry seeded");
            CommandResult::ok(
                format!("Seeded {seeded} symbols"),
                &SeedReport { seeded, db_path },
            )
        }
    }
}
