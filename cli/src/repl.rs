//! Interactive loop: read a line, run one turn, print the reply, repeat.
//!
//! Exits on EOF (Ctrl+D) or `quit`/`exit`/`/quit`. A failed turn prints `error: ...` to stderr
//! and the session carries on without it.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use cli::{profile_view, turn_json, Session, TurnBackend};

/// How replies are printed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintOptions {
    pub json: bool,
    pub show_profile: bool,
}

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplInput {
    Empty,
    Quit,
    Reset,
    Profile,
    Message(String),
}

pub fn parse_input(line: &str) -> ReplInput {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "" => ReplInput::Empty,
        "quit" | "exit" | "/quit" => ReplInput::Quit,
        "/reset" => ReplInput::Reset,
        "/profile" => ReplInput::Profile,
        _ => ReplInput::Message(trimmed.to_string()),
    }
}

/// Runs one turn and prints it to `out`. Errors are returned to the caller.
pub async fn run_one_turn(
    backend: &dyn TurnBackend,
    session: &mut Session,
    message: &str,
    print: PrintOptions,
    out: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = session.send(backend, message).await?;
    if print.json {
        writeln!(out, "{}", serde_json::to_string(&turn_json(&outcome))?)?;
    } else {
        writeln!(out, "{}", outcome.reply)?;
        if print.show_profile {
            writeln!(out)?;
            write!(out, "{}", profile_view(&outcome.profile))?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Reads lines from `input` until EOF or a quit command.
///
/// Replies go to `out`. In JSON mode `out` carries only JSON lines (turns and `/profile`);
/// the prompt and notices go to `err`.
pub async fn run_repl_loop<R>(
    backend: &dyn TurnBackend,
    session: &mut Session,
    print: PrintOptions,
    input: R,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    {
        let chatter: &mut dyn Write = if print.json { &mut *err } else { &mut *out };
        writeln!(chatter, "Where would you like to go? (/profile, /reset, quit)")?;
    }

    loop {
        {
            let chatter: &mut dyn Write = if print.json { &mut *err } else { &mut *out };
            write!(chatter, "> ")?;
            chatter.flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_input(&line) {
            ReplInput::Empty => continue,
            ReplInput::Quit => break,
            ReplInput::Reset => {
                session.reset();
                let chatter: &mut dyn Write = if print.json { &mut *err } else { &mut *out };
                writeln!(chatter, "Conversation cleared.")?;
            }
            ReplInput::Profile => {
                if print.json {
                    let profile = serde_json::json!({ "profile": session.profile() });
                    writeln!(out, "{}", serde_json::to_string(&profile)?)?;
                } else {
                    write!(out, "{}", profile_view(session.profile()))?;
                }
            }
            ReplInput::Message(text) => {
                if let Err(e) = run_one_turn(backend, session, &text, print, &mut *out).await {
                    writeln!(err, "error: {}", e)?;
                }
            }
        }
    }

    let chatter: &mut dyn Write = if print.json { &mut *err } else { &mut *out };
    writeln!(chatter, "Bye.")?;
    chatter.flush()?;
    Ok(())
}
