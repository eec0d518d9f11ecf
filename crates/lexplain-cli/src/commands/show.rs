//! Show command implementation.

use crate::cli::ShowArgs;
use crate::context::AppContext;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lexplain_domain::traits::DocumentStore;
use lexplain_domain::{DocumentId, StoredDocument};

/// Execute the show command.
pub async fn execute_show(args: ShowArgs, ctx: &AppContext, formatter: &Formatter) -> Result<()> {
    let store = ctx.open_store()?;

    if args.id.starts_with("AUTH-") {
        let summary = store
            .get_verification(&args.id)?
            .ok_or_else(|| CliError::NotFound(format!("verification {}", args.id)))?;
        println!("{}", formatter.format_verification(&summary)?);
    } else {
        let document = find_document(&store, ctx.user_id(), &args.id)?;
        println!("{}", formatter.format_document(&document)?);
    }
    Ok(())
}

/// Look up a stored simplification owned by `user_id`.
///
/// Documents of other users are reported as not found.
pub fn find_document<S>(store: &S, user_id: Option<&str>, id: &str) -> Result<StoredDocument>
where
    S: DocumentStore,
    CliError: From<S::Error>,
{
    let id = DocumentId::from_string(id).map_err(CliError::InvalidInput)?;
    let not_found = || CliError::NotFound(format!("document {}", id));

    let user_id = user_id.ok_or_else(not_found)?;
    store.get_owned_document(user_id, id)?.ok_or_else(not_found)
}
