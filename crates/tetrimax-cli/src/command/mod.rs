use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, prelude::*};

use self::{bench::BenchArg, play::PlayArg, scenarios::ScenariosArg};

mod bench;
mod play;
mod scenarios;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Let an agent play one game and print the result
    Play(#[clap(flatten)] PlayArg),
    /// Run several games and report average lines cleared
    Bench(#[clap(flatten)] BenchArg),
    /// Check an agent against hand-built positions
    Scenarios(#[clap(flatten)] ScenariosArg),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(LevelFilter::from_level(level))
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);
    match args.mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Bench(arg) => bench::run(&arg)?,
        Mode::Scenarios(arg) => scenarios::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;
    use crate::agent::AgentKind;

    #[test]
    fn test_cli_definition_is_valid() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_bench_args() {
        let args = CommandArgs::try_parse_from([
            "tetrimax",
            "-vv",
            "bench",
            "--agent",
            "beam-pruned-expectimax",
            "--runs",
            "3",
            "--max-pieces",
            "50",
            "--beam-width",
            "2",
        ])
        .unwrap();
        assert_eq!(args.verbose, 2);
        let Mode::Bench(bench) = args.mode else {
            panic!("expected bench");
        };
        assert_eq!(bench.agent.agent, AgentKind::BeamPrunedExpectimax);
    }

    #[test]
    fn test_zero_beam_width_rejected() {
        let result = CommandArgs::try_parse_from(["tetrimax", "play", "--beam-width", "0"]);
        assert!(result.is_err());
    }
}
