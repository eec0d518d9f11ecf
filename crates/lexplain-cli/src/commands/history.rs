//! History command implementation.

use crate::cli::HistoryArgs;
use crate::context::AppContext;
use crate::error::Result;
use crate::output::Formatter;
use lexplain_domain::traits::DocumentStore;

/// Execute the history command.
pub async fn execute_history(
    args: HistoryArgs,
    ctx: &AppContext,
    formatter: &Formatter,
) -> Result<()> {
    let Some(user_id) = ctx.user_id() else {
        println!(
            "{}",
            formatter.info("No user configured. Use 'lexplain config set-user <ID>' to keep history.")
        );
        return Ok(());
    };

    let store = ctx.open_store()?;
    let output = if args.verifications {
        formatter.format_verifications(&store.verification_history(user_id, args.limit)?)?
    } else {
        formatter.format_history(&store.fetch_history(user_id, args.limit)?)?
    };
    println!("{}", output);
    Ok(())
}
