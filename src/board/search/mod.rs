//! Search module implementing minimax with alpha-beta pruning.
//!
//! Features:
//! - Root pre-pass ordering with a cheap positional score
//! - Alpha-beta search, White maximizing and Black minimizing
//! - Quiescence search over captures with a stand-pat margin
//! - Killer moves per ply
//! - Transposition table keyed by position, window and ply
//! - Nested progress reporting and cooperative cancellation

mod alpha_beta;
mod constants;
mod killers;
mod params;
mod progress;
mod quiescence;

use crate::tt::TranspositionTable;

use super::error::SearchError;
use super::eval::Evaluator;
use super::notation::format_line;
use super::{Board, Color, Move};

pub use constants::SCORE_INFINITY;
pub use killers::KillerTable;
pub use params::SearchParams;
pub use progress::{NoProgress, SearchMonitor, SearchProgress};

use progress::ProgressSpan;

/// Result of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The chosen move, with its status.
    pub best: Move,
    /// Value of the chosen move from White's point of view.
    pub value: i32,
    /// Principal line, starting with `best`.
    pub line: Vec<Move>,
    pub nodes: u64,
    pub tt_hits: u64,
}

/// Statistics tracked during search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub tt_hits: u64,
    pub cutoffs: u64,
}

/// Value of a searched node and the line that produced it (moves after the
/// node's own move).
#[derive(Clone, Debug, Default)]
struct NodeResult {
    value: i32,
    line: Vec<Move>,
}

impl NodeResult {
    fn leaf(value: i32) -> Self {
        NodeResult {
            value,
            line: Vec::new(),
        }
    }
}

/// Whether `value` is better than `best` for the side choosing.
#[inline]
fn improves(maximizing: bool, value: i32, best: i32) -> bool {
    if maximizing {
        value > best
    } else {
        value < best
    }
}

/// A root move with its pre-pass score and searched value.
#[derive(Clone, Debug)]
struct RootEntry {
    mv: Move,
    prepass: i32,
    value: i32,
    line: Vec<Move>,
}

/// Minimax search engine owning its caches.
pub struct SearchEngine {
    params: SearchParams,
    tt: TranspositionTable,
    killers: KillerTable,
    evaluator: Evaluator,
    stats: SearchStats,
    depth: u32,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(SearchParams::default())
    }
}

impl SearchEngine {
    #[must_use]
    pub fn new(params: SearchParams) -> Self {
        SearchEngine {
            tt: TranspositionTable::new(params.tt_mb),
            killers: KillerTable::new(),
            evaluator: Evaluator::new(),
            stats: SearchStats::default(),
            depth: params.depth,
            params,
        }
    }

    #[must_use]
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Counters of the last search.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[must_use]
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Forget every cached result.
    pub fn clear(&mut self) {
        self.tt.clear();
        self.killers.clear();
    }

    /// Choose a move for `player` searching `depth` plies.
    ///
    /// The board is returned to the position it had on entry, also when the
    /// search fails.
    pub fn next_move(
        &mut self,
        board: &mut Board,
        player: Color,
        depth: u32,
        progress: &dyn SearchProgress,
    ) -> Result<SearchOutcome, SearchError> {
        if board.to_move() != player {
            return Err(SearchError::NotToMove { player });
        }
        self.stats = SearchStats::default();
        self.killers.clear();
        self.tt.new_search();
        self.depth = depth.max(1);

        let moves = board.valid_moves()?;
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        let maximizing = player == Color::White;

        let mut entries = Vec::with_capacity(moves.len());
        for mv in &moves {
            let prepass = if self.params.root_prepass {
                let evaluator = self.evaluator;
                board.temporarily_move(mv, |b| Ok::<_, SearchError>(evaluator.positional(b)))?
            } else {
                0
            };
            entries.push(RootEntry {
                mv: *mv,
                prepass,
                value: 0,
                line: Vec::new(),
            });
        }
        sort_for(maximizing, &mut entries, |e| e.prepass);

        let mut alpha = -SCORE_INFINITY;
        let mut beta = SCORE_INFINITY;
        let mut best_value = None;
        let count = entries.len();
        for (index, entry) in entries.iter_mut().enumerate() {
            if progress.is_cancelled() {
                return Err(SearchError::Cancelled);
            }
            let span = ProgressSpan::WHOLE.child(index, count);
            let result = board.temporarily_move(&entry.mv, |b| {
                self.alpha_beta(b, 1, alpha, beta, progress, Some(span))
            })?;
            entry.value = result.value;
            entry.line = std::iter::once(entry.mv).chain(result.line).collect();
            log::trace!("root {} -> {}", entry.mv, entry.value);

            if best_value.map_or(true, |best| improves(maximizing, entry.value, best)) {
                best_value = Some(entry.value);
                progress.report_best_line(&entry.line);
            }
            if maximizing {
                alpha = alpha.max(entry.value);
            } else {
                beta = beta.min(entry.value);
            }
            progress.report_progress(ProgressSpan::WHOLE.percent_after(index + 1, count));
        }

        for entry in &mut entries {
            entry.value += entry.prepass;
        }
        sort_for(maximizing, &mut entries, |e| e.value);

        let Some(best) = entries.into_iter().next() else {
            return Err(SearchError::NoLegalMoves);
        };
        let root = board.current();
        board.set_node_value(root, best.value);
        progress.report_best_line(&best.line);
        log::debug!(
            "best {} value {} nodes {} tt hits {} line {}",
            best.mv,
            best.value,
            self.stats.nodes,
            self.stats.tt_hits,
            format_line(&best.line)
        );

        Ok(SearchOutcome {
            best: best.mv,
            value: best.value,
            line: best.line,
            nodes: self.stats.nodes,
            tt_hits: self.stats.tt_hits,
        })
    }

    /// Search with the configured default depth.
    pub fn search(&mut self, board: &mut Board, progress: &dyn SearchProgress) -> Result<SearchOutcome, SearchError> {
        let player = board.to_move();
        let depth = self.params.depth;
        self.next_move(board, player, depth, progress)
    }
}

/// Stable sort, best first for the side choosing.
fn sort_for(maximizing: bool, entries: &mut [RootEntry], key: impl Fn(&RootEntry) -> i32) {
    if maximizing {
        entries.sort_by(|a, b| key(b).cmp(&key(a)));
    } else {
        entries.sort_by(|a, b| key(a).cmp(&key(b)));
    }
}
