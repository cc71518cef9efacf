//! One user's interactive session: an evaluator plus the ledger it feeds.

use tracing::{debug, info};

use crate::errors::EvalError;
use crate::evaluator::Evaluator;
use crate::ledger::{LedgerEntry, SessionLedger};
use crate::party::ScoreMap;

/// Result of submitting one line of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank input; nothing was sent.
    Ignored,
    /// Scored and recorded.
    Recorded(LedgerEntry),
    /// Scoring failed; the ledger is untouched.
    Failed {
        statement: String,
        error: EvalError,
    },
}

/// Session-scoped state.
///
/// Created empty, mutated only by successful submissions, cleared by
/// [`Session::reset`], dropped with the session. `submit` takes `&mut self`,
/// so a second evaluation cannot start while one is pending.
#[derive(Debug)]
pub struct Session {
    evaluator: Evaluator,
    ledger: SessionLedger,
    submissions: u64,
}

impl Session {
    pub fn new(evaluator: Evaluator) -> Self {
        Self {
            evaluator,
            ledger: SessionLedger::new(),
            submissions: 0,
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn ledger(&self) -> &SessionLedger {
        &self.ledger
    }

    pub fn mean(&self) -> ScoreMap {
        self.ledger.mean()
    }

    /// Number of statements sent to the evaluator since the last reset.
    pub fn submissions(&self) -> u64 {
        self.submissions
    }

    /// Trim, evaluate, and record on success.
    pub async fn submit(&mut self, raw: &str) -> SubmitOutcome {
        let statement = raw.trim();
        if statement.is_empty() {
            debug!("ignoring blank input");
            return SubmitOutcome::Ignored;
        }

        self.submissions += 1;
        match self.evaluator.evaluate(statement).await {
            Ok(scores) => {
                let inserted = self.ledger.record(statement, scores);
                debug!(inserted, entries = self.ledger.len(), "ledger updated");
                SubmitOutcome::Recorded(LedgerEntry {
                    statement: statement.to_string(),
                    scores,
                })
            }
            Err(error) => SubmitOutcome::Failed {
                statement: statement.to_string(),
                error,
            },
        }
    }

    pub fn reset(&mut self) {
        info!(entries = self.ledger.len(), "session reset");
        self.ledger.reset();
        self.submissions = 0;
    }
}
