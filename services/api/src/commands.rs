use clap::Args;
use fund_evaluator::config::AppConfig;
use fund_evaluator::error::AppError;
use fund_evaluator::workflows::funding::{
    BatchImport, BatchImporter, CounterfactualOrdering, EvaluationConfig, EvaluationEngine,
    EvaluationRequest, EvaluationResponse,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding one evaluation request (camelCase keys)
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Counterfactual ordering: fixed or deficit (defaults to FUND_COUNTERFACTUAL_ORDER)
    #[arg(long, value_parser = crate::infra::parse_ordering)]
    pub(crate) ordering: Option<CounterfactualOrdering>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export whose headers are the request field names
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Counterfactual ordering: fixed or deficit (defaults to FUND_COUNTERFACTUAL_ORDER)
    #[arg(long, value_parser = crate::infra::parse_ordering)]
    pub(crate) ordering: Option<CounterfactualOrdering>,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs { input, ordering } = args;

    let engine = engine_for(ordering)?;
    let raw = std::fs::read_to_string(input)?;
    let request: EvaluationRequest = serde_json::from_str(&raw)?;
    let response = evaluate_one(&engine, &request)?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let BatchArgs { csv, ordering } = args;

    let engine = engine_for(ordering)?;
    let import = BatchImporter::from_path(csv)?;
    for line in batch_report(&engine, &import) {
        println!("{line}");
    }

    Ok(())
}

fn engine_for(ordering: Option<CounterfactualOrdering>) -> Result<EvaluationEngine, AppError> {
    let ordering = match ordering {
        Some(ordering) => ordering,
        None => AppConfig::load()?.evaluation.counterfactual_ordering,
    };
    Ok(EvaluationEngine::new(
        EvaluationConfig::default().with_ordering(ordering),
    ))
}

pub(crate) fn evaluate_one(
    engine: &EvaluationEngine,
    request: &EvaluationRequest,
) -> Result<EvaluationResponse, AppError> {
    request.validate()?;
    Ok(EvaluationResponse::from(engine.evaluate_request(request)))
}

pub(crate) fn batch_report(engine: &EvaluationEngine, import: &BatchImport) -> Vec<String> {
    let mut lines = Vec::with_capacity(import.requests.len() + import.rejected.len() + 1);

    for entry in &import.requests {
        let result = engine.evaluate_request(&entry.request);
        lines.push(format!(
            "line {}: {} | {}/10 | {} | {} risk",
            entry.line,
            result.company_name.trim(),
            result.overall_score,
            result.decision.label(),
            result.risk_level.label()
        ));
    }
    for rejected in &import.rejected {
        lines.push(format!("line {}: skipped ({})", rejected.line, rejected.reason));
    }

    lines.push(format!(
        "{} evaluated, {} skipped",
        import.requests.len(),
        import.rejected.len()
    ));
    lines
}
