use tetrimax_engine::PieceGenerator;

use crate::{agent::AgentArg, session::Session};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    pub(crate) agent: AgentArg,
    /// Stop after this many pieces (plays until top-out when omitted)
    #[arg(long)]
    max_pieces: Option<usize>,
    /// Seed for the piece sequence
    #[arg(long)]
    seed: Option<u64>,
    /// Print the board after every placement
    #[arg(long)]
    show_board: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        agent,
        max_pieces,
        seed,
        show_board,
    } = arg;

    let agent = agent.build()?;
    let seed = seed.unwrap_or_else(rand::random);
    eprintln!("Starting headless game ({}, seed {seed})", agent.name());

    let result = Session::new(agent.as_ref(), PieceGenerator::with_seed(seed))
        .with_max_pieces(*max_pieces)
        .with_show_board(*show_board)
        .run();

    println!("GAME OVER ({:?})", result.end);
    println!("Total Pieces: {}", result.pieces);
    println!("Total Lines:  {}", result.lines);
    println!("Time Elapsed: {:.2}s", result.elapsed.as_secs_f64());
    Ok(())
}
