//! Voyage CLI binary: chat with the travel planner from the terminal.
//!
//! Subcommands: `chat` (default: one turn with a message, otherwise interactive), `check`
//! (connectivity smoke test).

mod logging;
mod repl;

use clap::{Parser, Subcommand};
use cli::{run_check, Session};
use repl::{run_one_turn, run_repl_loop, PrintOptions};
use tokio::io::BufReader;
use voyage::{ChatOpenAI, Settings, TravelAgent};

#[derive(Parser, Debug)]
#[command(name = "voyage")]
#[command(about = "Voyage: plan a trip by chatting (flights, hotels, day-by-day itinerary)")]
struct Args {
    #[command(subcommand)]
    cmd: Option<Command>,

    /// User message for a single turn (or pass as positional arguments)
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Positional args: user message when -m/--message is not used
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,

    /// Verbose: log node enter/exit and routing to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print the trip profile extracted in each turn after the reply
    #[arg(long)]
    show_profile: bool,

    /// Print each turn as JSON: { reply, route, stages, profile }
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Chat with the planner (default)
    Chat,
    /// Send one "Ping" to the model endpoint and report the result
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let applied = config::load_and_apply("voyage", None).unwrap_or_default();

    let args = Args::parse();
    logging::init(args.verbose)?;
    if !applied.is_empty() {
        tracing::debug!(keys = ?applied, "environment loaded from config files");
    }

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(settings = ?settings, "settings");

    if let Some(Command::Check) = args.cmd {
        let llm = ChatOpenAI::from_settings(&settings);
        let outcome = run_check(&llm, llm.model()).await;
        if outcome.is_ok() {
            println!("{}", outcome);
            return Ok(());
        }
        eprintln!("{}", outcome);
        std::process::exit(1);
    }

    let message = args.message.or_else(|| {
        if args.rest.is_empty() {
            None
        } else {
            Some(args.rest.join(" "))
        }
    });

    let agent = TravelAgent::from_settings(&settings)?;
    let mut session = Session::new();
    let print = PrintOptions {
        json: args.json,
        show_profile: args.show_profile,
    };

    let mut stdout = std::io::stdout();
    match message {
        Some(msg) if !msg.trim().is_empty() => {
            if let Err(e) = run_one_turn(&agent, &mut session, msg.trim(), print, &mut stdout).await {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        _ => {
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stderr = std::io::stderr();
            run_repl_loop(&agent, &mut session, print, stdin, &mut stdout, &mut stderr).await?
        }
    }
    Ok(())
}
