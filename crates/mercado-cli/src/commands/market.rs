use time::OffsetDateTime;

use crate::error::CliError;

use super::{CommandResult, Context};

pub fn status(context: &Context) -> Result<CommandResult, CliError> {
    let status = context.fetcher().market_status(OffsetDateTime::now_utc());
    CommandResult::ok(status.message.clone(), &status)
}

pub async fn summary(context: &Context) -> Result<CommandResult, CliError> {
    let outcome = context.fetcher().market_summary().await;
    CommandResult::from_outcome(&outcome, "Market summary")
}
