use crate::cli::SymbolArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

pub async fn run(context: &Context, args: &SymbolArgs) -> Result<CommandResult, CliError> {
    let cache = context.symbol_cache();
    let symbol = context.validated_symbol(&cache, &args.symbol).await?;
    let outcome = context.fetcher().technical_analysis(&symbol).await;
    CommandResult::from_outcome(&outcome, format!("Technical analysis for {symbol}"))
}
