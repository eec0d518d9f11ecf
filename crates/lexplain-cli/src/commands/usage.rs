//! Usage command implementation.

use crate::cli::UsageArgs;
use crate::context::AppContext;
use crate::error::Result;
use crate::output::Formatter;
use lexplain_domain::traits::{DocumentStore, UsageStats};

/// Execute the usage command.
pub async fn execute_usage(
    args: UsageArgs,
    ctx: &AppContext,
    formatter: &Formatter,
) -> Result<()> {
    let Some(user_id) = ctx.user_id() else {
        println!(
            "{}",
            formatter.info("No user configured. Usage is only tracked for a configured user.")
        );
        return Ok(());
    };

    let stats = usage_stats(&ctx.open_store()?, user_id, args.days)?;
    println!("{}", formatter.format_usage(&stats, args.days)?);
    Ok(())
}

/// Usage of `user_id` over the last `days` days.
pub fn usage_stats<S>(store: &S, user_id: &str, days: u64) -> Result<UsageStats>
where
    S: DocumentStore,
    crate::error::CliError: From<S::Error>,
{
    let events = store.usage_in_last_days(user_id, days)?;
    Ok(UsageStats::from_events(&events))
}
