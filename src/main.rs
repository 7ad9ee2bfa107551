mod calc;
mod cmd;
mod data;
mod device;
mod error;
mod input;
mod locale;
mod logging;
mod ui;
mod widgets;

use calc::Direction;
use clap::{Args, Parser, Subcommand};
use cmd::StartArgs;
use logging::{DEFAULT_LOG_LEVEL, LOG_FILE_NAME, LogSink};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "schednav", about = "scheduler date navigator")]
struct Cli {
    /// Path to the data directory containing config and state files (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Debug)]
struct StartOpts {
    /// Start date (YYYY-MM-DD); defaults to the saved session, then today
    #[arg(long)]
    date: Option<String>,
    /// View step: day, week, workWeek, month or agenda
    #[arg(long)]
    step: Option<String>,
}

impl From<StartOpts> for StartArgs {
    fn from(opts: StartOpts) -> Self {
        StartArgs {
            date: opts.date,
            step: opts.step,
        }
    }
}

#[derive(Args, Clone, Debug)]
struct StepOpts {
    #[command(flatten)]
    start: StartOpts,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// Store the resulting date and step in state.json
    #[arg(long)]
    save: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config.yaml
    Init,
    /// Print the navigator caption
    Caption(StartOpts),
    /// Step forward once and print the reported date
    Next(StepOpts),
    /// Step back once and print the reported date
    Prev(StepOpts),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve data_dir to an absolute path so file I/O works regardless of
    // future directory changes within the process.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };

    // Auto-init when the data directory is missing or empty and the user did not
    // explicitly invoke the `init` subcommand.
    let is_init_command = matches!(cli.command, Some(Commands::Init));
    if !is_init_command && dir_needs_init(&data_dir) {
        eprintln!(
            "Data directory '{}' is missing or empty, running init...",
            data_dir.display()
        );
        cmd::init::run(&data_dir)?;
    }

    // the interactive view owns the terminal, so its logs go to a file
    let sink = match cli.command {
        None => LogSink::File(data_dir.join(LOG_FILE_NAME)),
        Some(_) => LogSink::Stderr,
    };
    logging::init_logging(&sink, DEFAULT_LOG_LEVEL)?;

    match cli.command {
        None => cmd::root::run(&data_dir),
        Some(Commands::Init) => cmd::init::run(&data_dir),
        Some(Commands::Caption(opts)) => cmd::caption::run(&data_dir, &opts.into()),
        Some(Commands::Next(opts)) => run_step(&data_dir, opts, Direction::Next),
        Some(Commands::Prev(opts)) => run_step(&data_dir, opts, Direction::Previous),
    }
}

fn run_step(data_dir: &std::path::Path, opts: StepOpts, direction: Direction) -> anyhow::Result<()> {
    cmd::step::run(data_dir, &opts.start.into(), direction, opts.json, opts.save)
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &std::path::Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dir_needs_init_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does_not_exist");
        assert!(dir_needs_init(&missing));
    }

    #[test]
    fn test_dir_needs_init_empty_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(dir_needs_init(tmp.path()));
    }

    #[test]
    fn test_dir_needs_init_nonempty_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.yaml"), "{}").unwrap();
        assert!(!dir_needs_init(tmp.path()));
    }

    #[test]
    fn test_cli_parses_step_subcommand() {
        let cli = Cli::try_parse_from([
            "schednav", "--data-dir", "/tmp/x", "next", "--step", "week", "--date", "2020-06-17",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Next(opts)) => {
                assert!(opts.json);
                assert!(!opts.save);
                let args: StartArgs = opts.start.into();
                assert_eq!(args.step.as_deref(), Some("week"));
                assert_eq!(args.date.as_deref(), Some("2020-06-17"));
            }
            _ => panic!("expected next subcommand"),
        }
    }

    #[test]
    fn test_cli_defaults_to_interactive() {
        let cli = Cli::try_parse_from(["schednav"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir, PathBuf::from("./config"));
    }
}
