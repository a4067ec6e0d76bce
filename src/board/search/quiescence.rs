use super::super::error::SearchError;
use super::super::{Board, Color};
use super::{improves, NodeResult, SearchEngine, SearchProgress};

impl SearchEngine {
    /// Captures-only extension below the depth budget.
    ///
    /// The static value is a floor for the side to move (it may decline every
    /// capture). When it already clears the window by the configured margin
    /// no capture is generated at all.
    pub(super) fn quiescence(
        &mut self,
        board: &mut Board,
        ply: u32,
        mut alpha: i32,
        mut beta: i32,
        progress: &dyn SearchProgress,
    ) -> Result<NodeResult, SearchError> {
        if progress.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        self.stats.nodes += 1;

        let status = board.current_move().status();
        let stand_pat = self.evaluator.evaluate(board, status, ply);
        if status.is_terminal() {
            return Ok(NodeResult::leaf(stand_pat));
        }

        let maximizing = board.to_move() == Color::White;
        let margin = self.params.delta_margin;
        if (maximizing && stand_pat > beta.saturating_add(margin))
            || (!maximizing && stand_pat < alpha.saturating_sub(margin))
        {
            return Ok(NodeResult::leaf(stand_pat));
        }

        let captures = board.valid_captures()?;
        let mut best = NodeResult::leaf(stand_pat);
        for mv in &captures {
            let child = board.temporarily_move(mv, |b| self.quiescence(b, ply + 1, alpha, beta, progress))?;
            if improves(maximizing, child.value, best.value) {
                let mut line = Vec::with_capacity(child.line.len() + 1);
                line.push(*mv);
                line.extend(child.line);
                best = NodeResult {
                    value: child.value,
                    line,
                };
            }
            if maximizing {
                alpha = alpha.max(child.value);
            } else {
                beta = beta.min(child.value);
            }
            if beta <= alpha {
                break;
            }
        }
        Ok(best)
    }
}
