use std::{num::NonZeroUsize, path::PathBuf};

use anyhow::Context as _;
use tetrimax_evaluator::{EvaluatorWeights, LinearEvaluator};
use tetrimax_search::{
    Agent, BeamChanceAgent, BeamChanceConfig, BeamExpectimaxAgent, BeamExpectimaxConfig,
    ExpectimaxAgent, ExpectimaxConfig,
};

use crate::util;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum AgentKind {
    /// Exhaustive expectimax (slow beyond depth 2)
    Expectimax,
    /// Expectimax keeping the best placements at every decision
    BeamPrunedExpectimax,
    /// Beam search over the known queue plus one chance layer
    #[default]
    BeamSearchChance,
}

/// Options shared by every command that runs an agent.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AgentArg {
    /// Search algorithm to use
    #[arg(long, value_enum, default_value_t)]
    pub(crate) agent: AgentKind,
    /// Evaluator weights file (JSON); built-in weights are used when omitted
    #[arg(long)]
    weights: Option<PathBuf>,
    /// Pieces placed along each searched path (expectimax agents)
    #[arg(long)]
    depth: Option<u32>,
    /// Candidates kept per layer (beam agents)
    #[arg(long)]
    beam_width: Option<NonZeroUsize>,
}

impl AgentArg {
    fn load_evaluator(&self) -> anyhow::Result<LinearEvaluator> {
        let Some(path) = &self.weights else {
            return Ok(LinearEvaluator::default());
        };
        let weights: EvaluatorWeights = util::read_json_file("weights", path)?;
        LinearEvaluator::new(weights)
            .with_context(|| format!("Invalid weights in {}", path.display()))
    }

    pub(crate) fn build(&self) -> anyhow::Result<Box<dyn Agent>> {
        let evaluator = Box::new(self.load_evaluator()?);
        let agent: Box<dyn Agent> = match self.agent {
            AgentKind::Expectimax => {
                let mut config = ExpectimaxConfig::default();
                if let Some(depth) = self.depth {
                    config.depth = depth;
                }
                Box::new(ExpectimaxAgent::new(evaluator, config))
            }
            AgentKind::BeamPrunedExpectimax => {
                let mut config = BeamExpectimaxConfig::default();
                if let Some(depth) = self.depth {
                    config.depth = depth;
                }
                if let Some(beam_width) = self.beam_width {
                    config.beam_width = beam_width;
                }
                Box::new(BeamExpectimaxAgent::new(evaluator, config))
            }
            AgentKind::BeamSearchChance => {
                let mut config = BeamChanceConfig::default();
                if let Some(beam_width) = self.beam_width {
                    config.beam_width = beam_width;
                }
                Box::new(BeamChanceAgent::new(evaluator, config))
            }
        };
        Ok(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_each_agent() {
        let cases = [
            (AgentKind::Expectimax, "expectimax"),
            (AgentKind::BeamPrunedExpectimax, "beam-pruned-expectimax"),
            (AgentKind::BeamSearchChance, "beam-search-chance"),
        ];
        for (agent, name) in cases {
            let arg = AgentArg {
                agent,
                depth: Some(1),
                ..AgentArg::default()
            };
            assert_eq!(arg.build().unwrap().name(), name);
        }
    }

    #[test]
    fn test_missing_weights_file_is_reported() {
        let arg = AgentArg {
            weights: Some(PathBuf::from("/nonexistent/weights.json")),
            ..AgentArg::default()
        };
        let err = arg.build().unwrap_err();
        assert!(format!("{err:#}").contains("weights"));
    }
}
