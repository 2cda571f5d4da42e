use mercado_core::{QuoteBatchRequest, Symbol, SymbolRejection};

use crate::cli::{StocksArgs, SymbolArgs};
use crate::error::CliError;

use super::{CommandResult, Context};

pub async fn quote(context: &Context, args: &SymbolArgs) -> Result<CommandResult, CliError> {
    let cache = context.symbol_cache();
    let symbol = context.validated_symbol(&cache, &args.symbol).await?;
    let outcome = context.fetcher().get_quote(&symbol).await;
    CommandResult::from_outcome(&outcome, format!("Quote for {symbol}"))
}

pub async fn index(context: &Context) -> Result<CommandResult, CliError> {
    let outcome = context.fetcher().get_index_quote().await;
    CommandResult::from_outcome(&outcome, "Merval index quote")
}

/// Every ticker is validated before any quote is fetched; the rejection
/// names all unknown tickers at once.
pub async fn stocks(context: &Context, args: &StocksArgs) -> Result<CommandResult, CliError> {
    let symbols = args
        .symbols
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let request = QuoteBatchRequest::new(symbols)?;

    let codes = request
        .symbols()
        .iter()
        .map(|symbol| context.fetcher().normalize_symbol(symbol.as_str()).code)
        .collect::<Vec<_>>();
    if let Err(rejection) = context.symbol_cache().validate_symbols(codes.as_slice()).await {
        let rejected = args
            .symbols
            .iter()
            .zip(&codes)
            .filter(|(_, code)| rejection.symbols().contains(*code))
            .map(|(raw, _)| raw.clone())
            .collect();
        return Err(SymbolRejection::new(rejected).into());
    }

    let batch = context.fetcher().get_multiple(&request).await;
    let message = format!("{} of {} quotes available", batch.successful, batch.total);
    if batch.successful == 0 {
        CommandResult::failed(message, &batch)
    } else {
        CommandResult::ok(message, &batch)
    }
}
