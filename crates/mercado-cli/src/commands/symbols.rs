use mercado_core::{Sector, SymbolRejection};
use serde::Serialize;

use crate::cli::SymbolsCommand;
use crate::error::CliError;

use super::{CommandResult, Context};

#[derive(Debug, Serialize)]
struct ValidationReport {
    valid: Vec<String>,
    invalid: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SectorMembers {
    sector: Sector,
    symbols: Vec<String>,
}

pub async fn run(context: &Context, command: &SymbolsCommand) -> Result<CommandResult, CliError> {
    let cache = context.symbol_cache();

    match command {
        SymbolsCommand::List => {
            let entries = cache.complete_symbols().await;
            CommandResult::ok(format!("{} active symbols", entries.len()), &entries)
        }
        SymbolsCommand::Validate(args) => {
            let mut report = ValidationReport {
                valid: Vec::new(),
                invalid: Vec::new(),
            };
            for input in &args.symbols {
                match context.validated_symbol(&cache, input).await {
                    Ok(symbol) => report.valid.push(symbol.as_str().to_owned()),
                    Err(_) => report.invalid.push(input.clone()),
                }
            }

            if !report.invalid.is_empty() {
                return Err(SymbolRejection::new(report.invalid).into());
            }
            CommandResult::ok("All symbols are valid", &report)
        }
        SymbolsCommand::Sectors => {
            let sectors = cache.sectors().await;
            CommandResult::ok(format!("{} sectors", sectors.len()), &sectors)
        }
        SymbolsCommand::Sector(args) => {
            let sector = args.name.parse::<Sector>()?;
            let members = SectorMembers {
                sector,
                symbols: cache.symbols_in_sector(sector).await,
            };
            CommandResult::ok(
                format!("{} symbols in {sector}", members.symbols.len()),
                &members,
            )
        }
    }
}
