use std::fmt;

use crate::session::RunResult;

/// Averages over a batch of runs.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub(crate) struct RunSummary {
    pub(crate) runs: usize,
    pub(crate) average_lines: f64,
    /// Mean of the per-run lines/pieces ratios; runs without pieces count as 0.
    pub(crate) average_lines_per_piece: f64,
}

impl RunSummary {
    #[expect(clippy::cast_precision_loss)]
    pub(crate) fn from_results(results: &[RunResult]) -> Self {
        let runs = results.len();
        if runs == 0 {
            return Self {
                runs,
                average_lines: 0.0,
                average_lines_per_piece: 0.0,
            };
        }
        let total_lines: usize = results.iter().map(|r| r.lines).sum();
        let total_ratio: f64 = results.iter().map(RunResult::lines_per_piece).sum();
        Self {
            runs,
            average_lines: total_lines as f64 / runs as f64,
            average_lines_per_piece: total_ratio / runs as f64,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----- SUMMARY ({} runs) -----", self.runs)?;
        writeln!(f, "Avg Lines Cleared:      {:.2}", self.average_lines)?;
        write!(f, "Avg Lines/Piece Ratio:  {:.4}", self.average_lines_per_piece)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::session::RunEnd;

    fn result(lines: usize, pieces: usize) -> RunResult {
        RunResult {
            lines,
            pieces,
            elapsed: Duration::ZERO,
            end: RunEnd::PieceLimit,
        }
    }

    #[test]
    fn test_averages() {
        let summary = RunSummary::from_results(&[result(4, 10), result(2, 20)]);
        assert_eq!(summary.runs, 2);
        assert!((summary.average_lines - 3.0).abs() < 1e-9);
        // (0.4 + 0.1) / 2
        assert!((summary.average_lines_per_piece - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_zero_piece_run_counts_as_zero_ratio() {
        let summary = RunSummary::from_results(&[result(0, 0), result(5, 10)]);
        assert!((summary.average_lines_per_piece - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_empty_batch() {
        let summary = RunSummary::from_results(&[]);
        assert_eq!(summary.runs, 0);
        assert!(summary.average_lines.abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        let text = RunSummary::from_results(&[result(3, 12)]).to_string();
        assert!(text.contains("Avg Lines Cleared:      3.00"));
        assert!(text.contains("Avg Lines/Piece Ratio:  0.2500"));
    }
}
