use std::path::PathBuf;

use tetrimax_engine::PieceGenerator;

use crate::{
    agent::AgentArg,
    session::{RunEnd, Session},
    summary::RunSummary,
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BenchArg {
    #[clap(flatten)]
    pub(crate) agent: AgentArg,
    /// Number of games to play
    #[arg(long, default_value_t = 5)]
    runs: usize,
    /// Pieces per game
    #[arg(long, default_value_t = 50)]
    max_pieces: usize,
    /// Seed of the first game; game `i` uses `seed + i`
    #[arg(long)]
    seed: Option<u64>,
    /// Output file for the JSON report (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, serde::Serialize)]
struct BenchReport {
    agent: &'static str,
    max_pieces: usize,
    runs: Vec<RunRecord>,
    summary: RunSummary,
}

#[derive(Debug, serde::Serialize)]
struct RunRecord {
    seed: u64,
    lines: usize,
    pieces: usize,
    elapsed_secs: f64,
    end: RunEnd,
}

pub(crate) fn run(arg: &BenchArg) -> anyhow::Result<()> {
    let BenchArg {
        agent,
        runs,
        max_pieces,
        seed,
        output,
    } = arg;

    let agent = agent.build()?;
    let base_seed = seed.unwrap_or_else(rand::random);

    eprintln!(
        "Running {} ({runs} runs, {max_pieces} pieces each)",
        agent.name()
    );

    let mut results = Vec::with_capacity(*runs);
    let mut records = Vec::with_capacity(*runs);
    for i in 0..*runs {
        let seed = base_seed.wrapping_add(i as u64);
        let result = Session::new(agent.as_ref(), PieceGenerator::with_seed(seed))
            .with_max_pieces(Some(*max_pieces))
            .run();
        eprintln!(
            "Run {}: lines={} | pieces={} | time={:.3}s",
            i + 1,
            result.lines,
            result.pieces,
            result.elapsed.as_secs_f64()
        );
        records.push(RunRecord {
            seed,
            lines: result.lines,
            pieces: result.pieces,
            elapsed_secs: result.elapsed.as_secs_f64(),
            end: result.end,
        });
        results.push(result);
    }

    let summary = RunSummary::from_results(&results);
    eprintln!();
    eprintln!("{summary}");

    let report = BenchReport {
        agent: agent.name(),
        max_pieces: *max_pieces,
        runs: records,
        summary,
    };
    util::save_json(&report, output.as_deref())?;
    Ok(())
}
