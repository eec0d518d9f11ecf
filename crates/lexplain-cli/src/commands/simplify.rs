//! Simplify command implementation.

use crate::cli::SimplifyArgs;
use crate::context::AppContext;
use crate::error::Result;
use crate::input::{read_document, DocumentInput};
use crate::output::{Formatter, StderrProgress};
use lexplain_domain::traits::LlmProvider;
use lexplain_simplifier::{
    ProgressSink, SimplificationRequest, SimplificationResponse, Simplifier,
};

/// Execute the simplify command.
pub async fn execute_simplify(
    args: SimplifyArgs,
    ctx: &AppContext,
    formatter: &Formatter,
) -> Result<()> {
    let input = read_document(args.file.as_deref(), args.stdin)?;
    let llm = ctx.llm()?;
    let endpoint = llm.endpoint_url();

    let response = simplify_document(
        llm,
        &endpoint,
        &args,
        input,
        ctx,
        &StderrProgress::new(formatter),
    )
    .await?;

    println!("{}", formatter.format_simplification(&response)?);
    if response.document_id.is_none() && !args.no_save && ctx.user_id().is_some() {
        eprintln!("{}", formatter.warning("Result could not be saved to history"));
    }
    Ok(())
}

/// Run one simplification against `llm` with the store from `ctx`.
pub async fn simplify_document<L>(
    llm: L,
    endpoint: &str,
    args: &SimplifyArgs,
    input: DocumentInput,
    ctx: &AppContext,
    progress: &dyn ProgressSink,
) -> Result<SimplificationResponse>
where
    L: LlmProvider + Send + Sync + 'static,
{
    let mut config = ctx.simplifier.clone();
    if let Some(size) = args.chunk_size {
        config.max_chunk_size = size;
    }

    let simplifier = Simplifier::new(llm, ctx.open_store()?, config)?
        .with_identity(ctx.identity(!args.no_save))
        .with_endpoint(endpoint);

    let mut request =
        SimplificationRequest::new(input.text).with_document_type(args.document_type.into());
    if let Some(complexity) = args.complexity {
        request = request.with_complexity(complexity.into());
    }
    if let Some((name, size)) = input.file {
        request = request.with_file(name, size);
    }

    Ok(simplifier.simplify_with_progress(request, progress).await?)
}
