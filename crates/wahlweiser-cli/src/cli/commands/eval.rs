use std::io::Write;

use serde_json::json;
use wahlweiser_core::{Session, SubmitOutcome};

use super::super::args::{EvalArgs, OutputFormat};
use crate::exit_codes::{EVAL_FAILED, SUCCESS};
use crate::render;

pub async fn run(args: EvalArgs, mut session: Session) -> anyhow::Result<i32> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let failed = evaluate_all(&args, &mut session, &mut out).await?;
    Ok(if failed > 0 { EVAL_FAILED } else { SUCCESS })
}

/// Score every statement in order. Returns the number of failures.
pub(crate) async fn evaluate_all<W: Write>(
    args: &EvalArgs,
    session: &mut Session,
    out: &mut W,
) -> anyhow::Result<usize> {
    let mut failed = 0;
    let mut results = Vec::with_capacity(args.statements.len());

    for raw in &args.statements {
        if args.format == OutputFormat::Text {
            eprintln!("{}", render::THINKING);
        }
        let outcome = session.submit(raw).await;
        if let SubmitOutcome::Failed { .. } = outcome {
            failed += 1;
        }
        match args.format {
            OutputFormat::Text => write_text(out, &outcome)?,
            OutputFormat::Json => results.push(outcome_json(&outcome)),
        }
    }

    match args.format {
        OutputFormat::Text => {
            let mean = session.mean();
            writeln!(out, "{}", render::AGGREGATE_HEADING)?;
            write!(out, "{}", render::bar_chart(&mean, render::BAR_WIDTH))?;
            if !session.ledger().is_empty() {
                writeln!(out, "{}", render::leader_line(&mean))?;
            }
        }
        OutputFormat::Json => {
            let doc = json!({
                "results": results,
                "ledger": session.ledger(),
                "mean": session.mean(),
                "failed": failed,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
        }
    }
    Ok(failed)
}

fn write_text<W: Write>(out: &mut W, outcome: &SubmitOutcome) -> std::io::Result<()> {
    match outcome {
        SubmitOutcome::Ignored => Ok(()),
        SubmitOutcome::Recorded(entry) => {
            writeln!(out, "{}", render::statement_heading(&entry.statement))?;
            write!(out, "{}", render::bar_chart(&entry.scores, render::BAR_WIDTH))?;
            writeln!(out)
        }
        SubmitOutcome::Failed { statement, error } => {
            writeln!(out, "{}", render::statement_heading(statement))?;
            write!(out, "{}", render::failure(error))?;
            writeln!(out)
        }
    }
}

fn outcome_json(outcome: &SubmitOutcome) -> serde_json::Value {
    match outcome {
        SubmitOutcome::Ignored => json!({ "status": "ignored" }),
        SubmitOutcome::Recorded(entry) => json!({
            "status": "recorded",
            "statement": entry.statement,
            "scores": entry.scores,
        }),
        SubmitOutcome::Failed { statement, error } => json!({
            "status": "failed",
            "statement": statement,
            "error": {
                "kind": error.kind().as_str(),
                "message": error.to_string(),
                "raw": error.raw(),
            },
        }),
    }
}
