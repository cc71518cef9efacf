pub mod chat;
pub mod dispatch;
pub mod eval;

pub use dispatch::dispatch;

use wahlweiser_core::{ConfigError, Evaluator, Session};

use super::args::ProviderArgs;

/// Fresh session wired to the configured provider.
pub fn build_session(args: &ProviderArgs) -> Result<Session, ConfigError> {
    let config = args.to_config()?;
    let client = config.build_client(&args.fake_replies)?;
    tracing::info!(
        provider = %config.provider,
        model = %config.model,
        timeout_secs = config.timeout_secs,
        "session started"
    );
    Ok(Session::new(Evaluator::from_config(client, &config)))
}
