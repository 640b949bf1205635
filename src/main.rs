use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use deskcalc::calculator::copy_to_clipboard;
use deskcalc::calculator::format::number_to_string;
use deskcalc::converter::ConvertError;
use deskcalc::{App, CalcConfig, Screen, converter};

#[derive(Parser, Debug)]
#[command(name = "deskcalc", version, about = "A desk calculator for the terminal")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of calculations kept in history
    #[arg(long)]
    history_size: Option<usize>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Press a line of keys, e.g. "12+7=", and print the display
    Eval {
        keys: String,
        /// Print the display as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert a value between units
    #[command(allow_negative_numbers = true)]
    Convert {
        value: f64,
        from: String,
        to: String,
        /// length, weight or temperature
        #[arg(default_value = "length")]
        category: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = CalcConfig::load(cli.config.as_deref())?;
    if let Some(size) = cli.history_size {
        config.history.max_items = size;
    }

    match cli.command {
        Some(Commands::Eval { keys, json }) => {
            let mut app = App::new(&config);
            let screen = app.press_keys(&keys)?;
            if json {
                println!("{}", serde_json::to_string(&screen)?);
            } else {
                println!("{}", screen.result);
            }
        }
        Some(Commands::Convert {
            value,
            from,
            to,
            category,
        }) => {
            let result = converter::convert(value, &from, &to, &category)?;
            println!("{} {}", number_to_string(result), to);
        }
        None => {
            let mut app = App::new(&config);
            run_interactive(&mut app)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

/// Commands typed after a `:` in the interactive session.
#[derive(Debug, PartialEq)]
enum MetaCommand {
    History { json: bool },
    Load(usize),
    Forget(isize),
    ClearHistory,
    Copy,
    Convert {
        value: f64,
        from: String,
        to: String,
        category: String,
    },
    Units(Option<String>),
    Help,
    Quit,
}

impl MetaCommand {
    fn parse(input: &str) -> Result<Self> {
        let mut words = input.split_whitespace();
        let Some(name) = words.next() else {
            bail!("Empty command, try :help");
        };
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("history", []) => Self::History { json: false },
            ("history", ["--json"]) => Self::History { json: true },
            ("load", [index]) => Self::Load(index.parse().context("Expected a history index")?),
            ("forget", [index]) => {
                Self::Forget(index.parse().context("Expected a history index")?)
            }
            ("clear-history", []) => Self::ClearHistory,
            ("copy", []) => Self::Copy,
            ("convert", [value, from, to, category]) => Self::Convert {
                value: value.parse().context("Expected a number to convert")?,
                from: from.to_string(),
                to: to.to_string(),
                category: category.to_string(),
            },
            ("units", []) => Self::Units(None),
            ("units", [category]) => Self::Units(Some(category.to_string())),
            ("help", []) => Self::Help,
            ("quit" | "q", []) => Self::Quit,
            _ => bail!("Unknown command :{}, try :help", input.trim()),
        };

        Ok(command)
    }
}

fn run_interactive(app: &mut App) -> Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    print_screen(&mut out, &app.screen())?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix(':') {
            match MetaCommand::parse(command) {
                Ok(MetaCommand::Quit) => break,
                Ok(command) => run_command(app, command, &mut out)?,
                Err(err) => writeln!(out, "{:#}", err)?,
            }
            continue;
        }

        match app.press_keys(line) {
            Ok(screen) => print_screen(&mut out, &screen)?,
            Err(err) => writeln!(out, "{}", err)?,
        }
    }

    Ok(())
}

fn run_command(app: &mut App, command: MetaCommand, out: &mut impl Write) -> Result<()> {
    match command {
        MetaCommand::History { json: true } => {
            writeln!(out, "{}", serde_json::to_string_pretty(&app.history().get_all())?)?;
        }
        MetaCommand::History { json: false } => {
            if app.history().is_empty() {
                writeln!(out, "No history yet")?;
            }
            // Newest first, numbered by position in the log.
            for (index, entry) in app.history().get_all().iter().enumerate().rev() {
                writeln!(out, "{:>3}  {} = {}", index, entry.expression, entry.result)?;
            }
        }
        MetaCommand::Load(index) => {
            if app.load_history(index) {
                print_screen(out, &app.screen())?;
            } else {
                writeln!(out, "No history entry {}", index)?;
            }
        }
        MetaCommand::Forget(index) => app.history_mut().delete(index),
        MetaCommand::ClearHistory => app.history_mut().clear(),
        MetaCommand::Copy => {
            let screen = app.screen();
            if let Err(err) = copy_to_clipboard(screen.text_for_clipboard()) {
                writeln!(out, "{:#}", err)?;
            }
        }
        MetaCommand::Convert {
            value,
            from,
            to,
            category,
        } => match converter::convert(value, &from, &to, &category) {
            Ok(result) => writeln!(
                out,
                "{} {} = {} {}",
                number_to_string(value),
                converter::unit_name(&from),
                number_to_string(result),
                converter::unit_name(&to)
            )?,
            Err(err) => writeln!(out, "{}", err)?,
        },
        MetaCommand::Units(None) => {
            for category in converter::categories() {
                writeln!(out, "{}: {}", category, converter::units(category).join(" "))?;
            }
        }
        MetaCommand::Units(Some(category)) => {
            let units = converter::units(&category);
            if units.is_empty() {
                writeln!(out, "{}", ConvertError::InvalidCategory(category))?;
            }
            for unit in units {
                writeln!(out, "{:<4}{}", unit, converter::unit_name(unit))?;
            }
        }
        MetaCommand::Help => writeln!(out, "{}", HELP)?,
        MetaCommand::Quit => {}
    }

    Ok(())
}

fn print_screen(out: &mut impl Write, screen: &Screen) -> Result<()> {
    let marker = if screen.memory { "M" } else { " " };
    writeln!(out, "  {:>24}", screen.expression)?;
    writeln!(out, "{} {:>24}", marker, screen.result)?;
    Ok(())
}

const HELP: &str = "\
Keys: 0-9 . + - * / × ÷ % = ^ ( ) π e AC DEL
      sin cos tan ln log sqrt square cube exp pow10 factorial
      MC MR M+ M-
Commands: :history [--json]  :load N  :forget N  :clear-history
          :copy  :convert VALUE FROM TO CATEGORY  :units [CATEGORY]
          :help  :quit";
