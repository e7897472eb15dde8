//! graph-shell: an interactive shell over a dispatchable command graph.
//!
//! Demonstrates the full engine: a demo command set is compiled into
//! canonical graphs, then input lines are dispatched, completion candidates
//! served, and help topics printed. A YAML session config controls the
//! sender name and permissions the shell dispatches as.

mod commands;
mod session;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use command_graph_core::StaticSender;
use command_graph_dispatch::tokenize;
use command_graph_registry::CommandRegistry;
use tracing_subscriber::EnvFilter;

use crate::session::SessionConfig;

#[derive(Debug, Parser)]
#[command(name = "graph-shell")]
#[command(about = "Interactive shell over a dispatchable command graph")]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// YAML session config (sender name and permissions).
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read lines from stdin and dispatch them.
    Repl,
    /// Dispatch a single line and exit.
    Exec {
        /// The input line, e.g. "math add 1 2".
        line: String,
    },
    /// Print the help topic for a command name or alias.
    Help {
        /// Command name.
        name: String,
    },
    /// Print completion candidates for a partial input line.
    Suggest {
        /// Partial input line; a trailing space completes the next token.
        line: String,
        /// Emit candidates as a JSON array.
        #[arg(long)]
        json: bool,
    },
    /// List registered commands with their summaries.
    List,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let result = run(cli);

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    let sender = config.sender();
    let registry = commands::demo_registry().map_err(|err| err.to_string())?;

    match cli.command {
        Command::Repl => run_repl(&registry, &sender),
        Command::Exec { line } => registry
            .execute_line(&line, &sender)
            .map_err(|err| err.to_string()),
        Command::Help { name } => run_help(&registry, &name, &sender),
        Command::Suggest { line, json } => run_suggest(&registry, &line, json, &sender),
        Command::List => run_list(&registry),
    }
}

fn run_help(
    registry: &CommandRegistry<StaticSender>,
    name: &str,
    sender: &StaticSender,
) -> Result<(), String> {
    match registry.help_topic(name) {
        Some(topic) => {
            println!("{}", topic.full_text(sender));
            Ok(())
        }
        None => Err(format!("no help topic for '{name}'")),
    }
}

fn run_suggest(
    registry: &CommandRegistry<StaticSender>,
    line: &str,
    json: bool,
    sender: &StaticSender,
) -> Result<(), String> {
    let candidates = complete(registry, line, sender);
    if json {
        let encoded = serde_json::to_string(&candidates).map_err(|err| err.to_string())?;
        println!("{encoded}");
    } else {
        for candidate in &candidates {
            println!("{candidate}");
        }
    }
    Ok(())
}

/// Completion over a raw line: the first token completes against command
/// names, later tokens against the command's own graph.
fn complete(
    registry: &CommandRegistry<StaticSender>,
    line: &str,
    sender: &StaticSender,
) -> Vec<String> {
    let line = line.strip_prefix('/').unwrap_or(line);
    let mut tokens = tokenize(line);
    if tokens.is_empty() || line.ends_with(char::is_whitespace) {
        tokens.push(String::new());
    }
    if tokens.len() == 1 {
        let partial = &tokens[0];
        let mut names: Vec<String> = registry
            .names()
            .filter(|name| name.starts_with(partial.as_str()))
            .map(str::to_string)
            .collect();
        names.sort_unstable();
        return names;
    }
    let rest = tokens.split_off(1);
    registry.suggest(&tokens[0], &rest, sender)
}

fn run_list(registry: &CommandRegistry<StaticSender>) -> Result<(), String> {
    let mut names: Vec<&str> = registry.names().collect();
    names.sort_unstable();
    for name in names {
        let short = registry
            .help_topic(name)
            .map(|topic| topic.short_text())
            .unwrap_or_default();
        println!("{name:<12} {short}");
    }
    Ok(())
}

fn run_repl(
    registry: &CommandRegistry<StaticSender>,
    sender: &StaticSender,
) -> Result<(), String> {
    println!("graph-shell — type a command, ':help <name>', ':suggest <line>', or ':quit'");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush().map_err(|err| err.to_string())?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|err| err.to_string())?;
        if read == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Some(meta) = input.strip_prefix(':') {
            if handle_meta(registry, meta, sender) {
                break;
            }
            continue;
        }

        if let Err(err) = registry.execute_line(input, sender) {
            eprintln!("{err}");
        }
    }
    Ok(())
}

/// Handles a `:meta` line; returns `true` when the shell should exit.
fn handle_meta(
    registry: &CommandRegistry<StaticSender>,
    meta: &str,
    sender: &StaticSender,
) -> bool {
    let (verb, rest) = match meta.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim_start()),
        None => (meta, ""),
    };
    match verb {
        "quit" | "q" => return true,
        "help" if !rest.is_empty() => {
            if let Err(err) = run_help(registry, rest.trim(), sender) {
                eprintln!("{err}");
            }
        }
        "suggest" => {
            for candidate in complete(registry, rest, sender) {
                println!("{candidate}");
            }
        }
        "list" => {
            let _ = run_list(registry);
        }
        _ => eprintln!("unknown meta command ':{verb}'"),
    }
    false
}
