//! Opening book wrapped around any move selector.
//!
//! A book is a set of lines played from the standard starting position. When
//! the game so far is a strict prefix of one or more lines, one of their next
//! moves is returned without searching.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::board::{
    Board, BoardError, Color, Move, NotationError, SearchEngine, SearchError, SearchOutcome,
    SearchProgress,
};

/// Anything that picks a move for a position.
pub trait MoveSelector {
    fn select_move(
        &mut self,
        board: &mut Board,
        player: Color,
        depth: u32,
        progress: &dyn SearchProgress,
    ) -> Result<SearchOutcome, SearchError>;
}

impl MoveSelector for SearchEngine {
    fn select_move(
        &mut self,
        board: &mut Board,
        player: Color,
        depth: u32,
        progress: &dyn SearchProgress,
    ) -> Result<SearchOutcome, SearchError> {
        self.next_move(board, player, depth, progress)
    }
}

/// A handful of main lines.
pub const DEFAULT_LINES: &[&[&str]] = &[
    &["e2-e4", "e7-e5", "Ng1-f3", "Nb8-c6", "Bf1-b5", "a7-a6"],
    &["e2-e4", "e7-e5", "Ng1-f3", "Nb8-c6", "Bf1-c4", "Bf8-c5"],
    &["e2-e4", "c7-c5", "Ng1-f3", "d7-d6", "d2-d4", "c5xd4"],
    &["e2-e4", "e7-e6", "d2-d4", "d7-d5"],
    &["d2-d4", "d7-d5", "c2-c4", "e7-e6", "Nb1-c3", "Ng8-f6"],
    &["d2-d4", "Ng8-f6", "c2-c4", "e7-e6", "Ng1-f3"],
    &["c2-c4", "e7-e5", "Nb1-c3", "Ng8-f6"],
    &["Ng1-f3", "d7-d5", "d2-d4", "Ng8-f6"],
];

/// Seed of the generator that picks between book alternatives.
pub const DEFAULT_BOOK_SEED: u64 = 0x0b00_c0de;

pub struct OpeningBook<S> {
    lines: Vec<Vec<Move>>,
    start_key: u64,
    rng: StdRng,
    inner: S,
}

impl<S: MoveSelector> OpeningBook<S> {
    /// Book of [`DEFAULT_LINES`] in front of `inner`.
    pub fn new(inner: S) -> Result<Self, NotationError> {
        Self::with_lines(inner, DEFAULT_LINES, DEFAULT_BOOK_SEED)
    }

    /// Book of custom lines, each written move by move from the start.
    pub fn with_lines(inner: S, lines: &[&[&str]], seed: u64) -> Result<Self, NotationError> {
        let start = Board::new();
        let mut book = Vec::with_capacity(lines.len());
        for line in lines {
            let mut board = start.clone();
            board.play_line(line)?;
            book.push(board.history());
        }
        Ok(OpeningBook {
            lines: book,
            start_key: start.root_key(),
            rng: StdRng::seed_from_u64(seed),
            inner,
        })
    }

    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Next book moves after the game in `board`, if it is still in book.
    #[must_use]
    pub fn candidates(&self, board: &Board) -> Vec<Move> {
        if board.root_key() != self.start_key || board.game_ply() as usize != board.history().len() {
            return Vec::new();
        }
        let played = board.history();
        let mut next: Vec<Move> = Vec::new();
        for line in &self.lines {
            if line.len() > played.len() && line[..played.len()] == played[..] {
                let mv = line[played.len()];
                if !next.contains(&mv) {
                    next.push(mv);
                }
            }
        }
        next
    }
}

impl<S: MoveSelector> MoveSelector for OpeningBook<S> {
    fn select_move(
        &mut self,
        board: &mut Board,
        player: Color,
        depth: u32,
        progress: &dyn SearchProgress,
    ) -> Result<SearchOutcome, SearchError> {
        if board.to_move() != player {
            return Err(SearchError::NotToMove { player });
        }
        let candidates = self.candidates(board);
        if let Some(choice) = candidates.choose(&mut self.rng) {
            match board.find_move(choice) {
                Ok(best) => {
                    log::debug!("book move {best}");
                    progress.report_best_line(&[best]);
                    progress.report_progress(100);
                    return Ok(SearchOutcome {
                        best,
                        value: 0,
                        line: vec![best],
                        nodes: 0,
                        tt_hits: 0,
                    });
                }
                Err(BoardError::MoveNotFound { .. }) => {
                    log::debug!("book move {choice} is not legal here");
                }
                Err(err) => return Err(err.into()),
            }
        }
        self.inner.select_move(board, player, depth, progress)
    }
}
