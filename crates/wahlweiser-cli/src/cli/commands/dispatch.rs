use super::super::args::*;
use crate::exit_codes::{CONFIG_ERROR, SUCCESS};
use crate::render;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let cmd = cli.cmd.unwrap_or(Command::Chat(ChatArgs::default()));

    match cmd {
        Command::Parties => {
            print!("{}", render::parties());
            return Ok(SUCCESS);
        }
        Command::About => {
            let model = cli
                .provider
                .model
                .clone()
                .unwrap_or_else(|| wahlweiser_core::providers::llm::openai::DEFAULT_MODEL.to_string());
            print!("{}", render::about(&model));
            return Ok(SUCCESS);
        }
        Command::Chat(_) | Command::Eval(_) => {}
    }

    let session = match super::build_session(&cli.provider) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("config error: {}", e);
            return Ok(CONFIG_ERROR);
        }
    };

    match cmd {
        Command::Chat(args) => super::chat::run(args, session).await,
        Command::Eval(args) => super::eval::run(args, session).await,
        Command::Parties | Command::About => Ok(SUCCESS),
    }
}
