use clap::{Args, Parser, Subcommand, ValueEnum};
use wahlweiser_core::config::{BASE_URL_ENV, MODEL_ENV, TIMEOUT_ENV};
use wahlweiser_core::{ConfigError, EvaluatorConfig, ProviderKind};

#[derive(Parser, Debug)]
#[command(
    name = "wahlweiser",
    version,
    about = "Welche Partei passt zu dir? Score political statements against six German parties with a language model."
)]
pub struct Cli {
    #[command(flatten)]
    pub provider: ProviderArgs,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Defaults to `chat`.
    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive session: type statements, get charts
    Chat(ChatArgs),
    /// Score the given statements in one session and print the aggregate
    Eval(EvalArgs),
    /// List the parties statements are scored against
    Parties,
    /// What this tool is and where statements are sent
    About,
}

#[derive(Args, Debug, Clone)]
pub struct ProviderArgs {
    /// Language-model provider: openai or fake (offline, scripted replies)
    #[arg(long, global = true, env = "WAHLWEISER_PROVIDER", default_value = "openai")]
    pub provider: String,

    #[arg(long, global = true, env = MODEL_ENV)]
    pub model: Option<String>,

    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    /// Upper bound for a single evaluation, in seconds
    #[arg(long, global = true, env = TIMEOUT_ENV, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Canned reply for the fake provider; repeat for several statements
    #[arg(long = "fake-reply", global = true, hide = true)]
    pub fake_replies: Vec<String>,
}

impl ProviderArgs {
    pub fn to_config(&self) -> Result<EvaluatorConfig, ConfigError> {
        let provider: ProviderKind = self.provider.parse()?;
        let mut config = EvaluatorConfig::default()
            .with_provider(provider)
            .with_timeout_secs(self.timeout_secs);
        if let Some(model) = &self.model {
            config = config.with_model(model);
        }
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url);
        }
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            config = config.with_api_key(key);
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ChatArgs {
    /// Skip the title and introduction
    #[arg(long)]
    pub no_intro: bool,
}

#[derive(Args, Debug, Clone)]
pub struct EvalArgs {
    /// Statements to score, in order
    #[arg(required = true, value_name = "STATEMENT")]
    pub statements: Vec<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
