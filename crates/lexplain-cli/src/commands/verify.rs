//! Verify command implementation.

use crate::cli::VerifyArgs;
use crate::context::AppContext;
use crate::error::Result;
use crate::input::{read_document, DocumentInput};
use crate::output::{Formatter, StderrProgress};
use lexplain_domain::traits::LlmProvider;
use lexplain_simplifier::ProgressSink;
use lexplain_verifier::{
    certificate, AnalysisMode, AuthenticityAnalysis, VerificationRequest, Verifier,
};

/// Execute the verify command.
pub async fn execute_verify(
    args: VerifyArgs,
    ctx: &AppContext,
    formatter: &Formatter,
) -> Result<()> {
    let input = read_document(args.file.as_deref(), args.stdin)?;
    let llm = ctx.llm()?;
    let endpoint = llm.endpoint_url();

    let analysis = verify_document(
        llm,
        &endpoint,
        &args,
        input,
        ctx,
        &StderrProgress::new(formatter),
    )
    .await?;

    if args.certificate {
        println!("{}", certificate(&analysis));
    } else {
        println!("{}", formatter.format_analysis(&analysis)?);
    }
    if let AnalysisMode::Fallback { reason } = &analysis.mode {
        eprintln!(
            "{}",
            formatter.warning(&format!("Model answer unusable ({}); basic analysis shown", reason))
        );
    }
    Ok(())
}

/// Run one authenticity analysis against `llm` with the store from `ctx`.
pub async fn verify_document<L>(
    llm: L,
    endpoint: &str,
    args: &VerifyArgs,
    input: DocumentInput,
    ctx: &AppContext,
    progress: &dyn ProgressSink,
) -> Result<AuthenticityAnalysis>
where
    L: LlmProvider + Send + Sync + 'static,
{
    let verifier = Verifier::new(llm, ctx.open_store()?, ctx.verifier.clone())?
        .with_identity(ctx.identity(!args.no_save))
        .with_endpoint(endpoint);

    let mut request =
        VerificationRequest::new(input.text).with_document_type(args.document_type.into());
    if let Some((name, size)) = input.file {
        request = request.with_file(name, size);
    }

    Ok(verifier.verify_with_progress(request, progress).await?)
}
