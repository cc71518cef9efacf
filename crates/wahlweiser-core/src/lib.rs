//! Core of WahlWeiser: score a political statement against six German
//! parties with a language model, and keep a per-session ledger of results.
//!
//! # Quick Start
//!
//! ```no_run
//! use wahlweiser_core::{EvaluatorConfig, Evaluator, Session, SubmitOutcome};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = EvaluatorConfig::from_env();
//! let client = config.build_client(&[])?;
//! let mut session = Session::new(Evaluator::from_config(client, &config));
//!
//! if let SubmitOutcome::Recorded(entry) = session.submit("Steuern senken").await {
//!     println!("{} -> {:?}", entry.statement, entry.scores);
//! }
//! println!("aggregate: {:?}", session.mean());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod evaluator;
pub mod ledger;
pub mod party;
pub mod prompt;
pub mod providers;
pub mod session;

pub use config::{EvaluatorConfig, ProviderKind};
pub use errors::{ConfigError, EvalError, EvalErrorKind, ProviderError};
pub use evaluator::{parse_scores, Evaluator};
pub use ledger::{LedgerEntry, SessionLedger};
pub use party::{PartyCode, ScoreMap, NEUTRAL_SCORE, SCORE_MAX, SCORE_MIN};
pub use session::{Session, SubmitOutcome};
