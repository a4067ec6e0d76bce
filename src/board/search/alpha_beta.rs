use std::cmp::Reverse;

use crate::tt::NodeKey;

use super::super::error::SearchError;
use super::super::{Board, Color, MAX_PLY};
use super::progress::ProgressSpan;
use super::{improves, NodeResult, SearchEngine, SearchProgress};

impl SearchEngine {
    /// Value of the current position of `board`, `ply` plies below the root.
    pub(super) fn alpha_beta(
        &mut self,
        board: &mut Board,
        ply: u32,
        alpha: i32,
        beta: i32,
        progress: &dyn SearchProgress,
        span: Option<ProgressSpan>,
    ) -> Result<NodeResult, SearchError> {
        if progress.is_cancelled() {
            return Err(SearchError::Cancelled);
        }
        self.stats.nodes += 1;

        let status = board.current_move().status();
        if status.is_terminal() {
            let value = self.evaluator.evaluate(board, status, ply);
            board.set_node_value(board.current(), value);
            return Ok(NodeResult::leaf(value));
        }

        let budget = self.depth as i64 + i64::from(progress.depth_adjustment());
        let node = NodeKey {
            key: board.position_key(),
            alpha,
            beta,
            ply,
            depth: u32::try_from(budget - i64::from(ply)).unwrap_or(0),
        };
        if self.params.use_transpositions {
            if let Some(hit) = self.tt.probe(&node) {
                self.stats.tt_hits += 1;
                let result = NodeResult {
                    value: hit.value,
                    line: hit.line.clone(),
                };
                board.set_node_value(board.current(), result.value);
                return Ok(result);
            }
        }

        let result = if i64::from(ply) >= budget || ply as usize >= MAX_PLY - 1 {
            if self.params.quiescence {
                self.quiescence(board, ply, alpha, beta, progress)?
            } else {
                NodeResult::leaf(self.evaluator.evaluate(board, status, ply))
            }
        } else {
            self.expand(board, ply, alpha, beta, progress, span)?
        };

        board.set_node_value(board.current(), result.value);
        if self.params.use_transpositions {
            self.tt.store(node, result.value, &result.line);
        }
        Ok(result)
    }

    /// Search every legal reply of an interior node.
    fn expand(
        &mut self,
        board: &mut Board,
        ply: u32,
        mut alpha: i32,
        mut beta: i32,
        progress: &dyn SearchProgress,
        span: Option<ProgressSpan>,
    ) -> Result<NodeResult, SearchError> {
        let mut moves = board.valid_moves()?;
        if moves.is_empty() {
            let status = board.current_move().status();
            return Ok(NodeResult::leaf(self.evaluator.evaluate(board, status, ply)));
        }

        let evaluator = self.evaluator;
        let ordered = moves.as_mut_slice();
        ordered.sort_by_cached_key(|mv| Reverse(evaluator.move_order_value(board, mv)));
        if self.params.use_killers {
            self.killers.promote(ply as usize, ordered);
        }

        let maximizing = board.to_move() == Color::White;
        let nested = span.filter(|_| ply < self.params.progress_depth);
        let count = moves.len();
        let mut best: Option<NodeResult> = None;

        for (index, mv) in moves.iter().enumerate() {
            let child_span = nested.map(|s| s.child(index, count));
            let child = board.temporarily_move(mv, |b| {
                self.alpha_beta(b, ply + 1, alpha, beta, progress, child_span)
            })?;

            if best.as_ref().map_or(true, |b| improves(maximizing, child.value, b.value)) {
                let mut line = Vec::with_capacity(child.line.len() + 1);
                line.push(*mv);
                line.extend(child.line);
                best = Some(NodeResult {
                    value: child.value,
                    line,
                });
            }
            if maximizing {
                alpha = alpha.max(child.value);
            } else {
                beta = beta.min(child.value);
            }
            if let Some(s) = nested {
                progress.report_progress(s.percent_after(index + 1, count));
            }
            if beta <= alpha {
                self.stats.cutoffs += 1;
                if self.params.use_killers {
                    self.killers.record(ply as usize, *mv);
                }
                break;
            }
        }
        Ok(best.unwrap_or_default())
    }
}
