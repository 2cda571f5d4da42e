use mercado_core::HistoryWindow;

use crate::cli::{HistoryArgs, WindowArgs};
use crate::error::CliError;

use super::{CommandResult, Context};

pub async fn history(context: &Context, args: &HistoryArgs) -> Result<CommandResult, CliError> {
    let window = HistoryWindow::new(args.window.days)?;
    let cache = context.symbol_cache();
    let symbol = context.validated_symbol(&cache, &args.symbol).await?;

    let outcome = context.fetcher().get_history(&symbol, window).await;
    CommandResult::from_outcome(
        &outcome,
        format!("{} daily bars for {symbol}", outcome.data().period.days),
    )
}

pub async fn index_history(
    context: &Context,
    args: &WindowArgs,
) -> Result<CommandResult, CliError> {
    let window = HistoryWindow::new(args.days)?;
    let outcome = context.fetcher().get_index_history(window).await;
    CommandResult::from_outcome(
        &outcome,
        format!("{} daily bars for the Merval index", outcome.data().period.days),
    )
}
