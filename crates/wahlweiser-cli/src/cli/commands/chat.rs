use std::io::{IsTerminal, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use wahlweiser_core::{Session, SubmitOutcome};

use super::super::args::ChatArgs;
use crate::exit_codes::SUCCESS;
use crate::render;

const HELP: &str = "Befehle:
  /reset     Löscht alle bisherigen Aussagen und Bewertungen.
  /history   Zeigt alle bewerteten Aussagen.
  /mean      Zeigt die Gesamtbewertung.
  /parties   Zeigt die Parteien.
  /about     Über WahlWeiser.
  /help      Diese Hilfe.
  /quit      Beendet die Sitzung.
Alles andere wird als Aussage bewertet.
";

#[derive(Debug, PartialEq, Eq)]
enum ChatCommand<'a> {
    Statement(&'a str),
    Reset,
    History,
    Mean,
    Parties,
    About,
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> ChatCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let Some(cmd) = line.strip_prefix('/') else {
            return Self::Statement(line);
        };
        match cmd.trim().to_lowercase().as_str() {
            "reset" => Self::Reset,
            "history" => Self::History,
            "mean" => Self::Mean,
            "parties" => Self::Parties,
            "about" => Self::About,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => Self::Unknown(line),
        }
    }
}

pub async fn run(args: ChatArgs, mut session: Session) -> anyhow::Result<i32> {
    let interactive = std::io::stdin().is_terminal();
    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    run_loop(&args, &mut session, input, &mut out, interactive).await?;
    Ok(SUCCESS)
}

/// Reads one statement or command per line until EOF or `/quit`.
///
/// Input is read only between evaluations, so a line typed while the model
/// is busy waits its turn instead of starting a second evaluation.
pub(crate) async fn run_loop<R, W>(
    args: &ChatArgs,
    session: &mut Session,
    mut input: R,
    out: &mut W,
    interactive: bool,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    if !args.no_intro {
        writeln!(out, "{}\n\n{}", render::TITLE, render::INTRO)?;
        writeln!(out, "Tippe /help für alle Befehle.\n")?;
    }

    let mut buf = Vec::new();
    loop {
        if interactive {
            write!(out, "> ")?;
            out.flush()?;
        }
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = decode_line(&buf);

        match ChatCommand::parse(&line) {
            ChatCommand::Statement(text) => {
                if text.is_empty() {
                    continue;
                }
                eprintln!("{}", render::THINKING);
                let outcome = session.submit(text).await;
                write_outcome(out, &outcome)?;
                if !matches!(outcome, SubmitOutcome::Ignored) {
                    write_mean(out, session)?;
                }
            }
            ChatCommand::Reset => {
                session.reset();
                writeln!(out, "Alle Aussagen wurden gelöscht.\n")?;
            }
            ChatCommand::History => {
                if session.ledger().is_empty() {
                    writeln!(out, "Noch keine Aussagen bewertet.\n")?;
                }
                for entry in session.ledger() {
                    writeln!(out, "{}", render::statement_heading(&entry.statement))?;
                    write!(out, "{}", render::bar_chart(&entry.scores, render::BAR_WIDTH))?;
                    writeln!(out)?;
                }
            }
            ChatCommand::Mean => write_mean(out, session)?,
            ChatCommand::Parties => writeln!(out, "{}", render::parties())?,
            ChatCommand::About => writeln!(out, "{}", render::about(session.evaluator().model()))?,
            ChatCommand::Help => writeln!(out, "{}", HELP)?,
            ChatCommand::Quit => break,
            ChatCommand::Unknown(cmd) => {
                writeln!(out, "Unbekannter Befehl: {} (/help zeigt alle Befehle)\n", cmd)?;
            }
        }
        out.flush()?;
    }

    tracing::debug!(
        entries = session.ledger().len(),
        submissions = session.submissions(),
        "chat finished"
    );
    Ok(())
}

/// Input that is not UTF-8 (e.g. a Latin-1 terminal) is decoded lossily
/// rather than ending the session.
fn decode_line(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(line) => line.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "input line is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

fn write_outcome<W: Write>(out: &mut W, outcome: &SubmitOutcome) -> std::io::Result<()> {
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

fn write_mean<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    writeln!(
        out,
        "{} ({} Aussagen)",
        render::AGGREGATE_HEADING,
        session.ledger().len()
    )?;
    let mean = session.mean();
    write!(out, "{}", render::bar_chart(&mean, render::BAR_WIDTH))?;
    if !session.ledger().is_empty() {
        writeln!(out, "{}", render::leader_line(&mean))?;
    }
    writeln!(out)
}
