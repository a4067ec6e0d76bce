//! Legal move filtering and status rating.

use super::error::BoardError;
use super::tree::NodeId;
use super::{Board, Color, Move, MoveList, MoveStatus};

/// Occurrences of a position that make it a draw.
pub const REPETITION_DRAW_COUNT: u32 = 3;

impl Board {
    /// Whether the king of `color` is attacked. A board without that king is
    /// never in check.
    #[must_use]
    pub fn king_attacked(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.any_piece_attacks(color.opponent(), king))
    }

    /// Whether the side to move is in check.
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.king_attacked(self.to_move())
    }

    /// Legal moves for the side to move, each carrying its status.
    pub fn valid_moves(&mut self) -> Result<MoveList, BoardError> {
        self.legal_moves(false, true)
    }

    /// Legal captures for the side to move, each carrying its status.
    pub fn valid_captures(&mut self) -> Result<MoveList, BoardError> {
        self.legal_moves(true, true)
    }

    fn legal_moves(&mut self, captures_only: bool, rate: bool) -> Result<MoveList, BoardError> {
        let mover = self.to_move();
        let mut candidates = self.pseudo_moves_for(mover);
        if captures_only {
            candidates.retain(Move::is_capture);
        }
        let mut legal = MoveList::new();
        for candidate in &candidates {
            let status = self.temporarily_move(candidate, |board| {
                if board.king_attacked(mover) {
                    return Ok(None);
                }
                if rate {
                    board.rate_position(mover).map(Some)
                } else {
                    Ok(Some(MoveStatus::Normal))
                }
            })?;
            if let Some(status) = status {
                let mut mv = *candidate;
                mv.set_status(status);
                legal.push(mv);
            }
        }
        Ok(legal)
    }

    /// Status of the current position, reached by a move of `mover`.
    fn rate_position(&mut self, mover: Color) -> Result<MoveStatus, BoardError> {
        if self.repetitions() >= REPETITION_DRAW_COUNT {
            return Ok(MoveStatus::DrawByRepetition);
        }
        let Some(king) = self.king_square(mover.opponent()) else {
            return Ok(MoveStatus::Normal);
        };
        let check = self.any_piece_attacks(mover, king);
        let status = match (check, self.has_legal_move()?) {
            (true, true) => MoveStatus::Check,
            (false, true) => MoveStatus::Normal,
            (true, false) => MoveStatus::CheckMate,
            (false, false) => MoveStatus::StaleMate,
        };
        Ok(status)
    }

    /// Whether the side to move has any legal move. Stops at the first one.
    pub fn has_legal_move(&mut self) -> Result<bool, BoardError> {
        let mover = self.to_move();
        let candidates = self.pseudo_moves_for(mover);
        for candidate in &candidates {
            let safe = self.temporarily_move(candidate, |board| Ok::<_, BoardError>(!board.king_attacked(mover)))?;
            if safe {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The legal move with the same mutations as `mv`, status included.
    pub fn find_move(&mut self, mv: &Move) -> Result<Move, BoardError> {
        self.valid_moves()?
            .iter()
            .find(|&legal| legal == mv)
            .copied()
            .ok_or(BoardError::MoveNotFound { mv: *mv })
    }

    /// Play a legal move permanently and return its node.
    pub fn play(&mut self, mv: &Move) -> Result<NodeId, BoardError> {
        let legal = self.find_move(mv)?;
        let mark = self.tree.len();
        let id = self.push_child(legal);
        if let Err(err) = self.process(id) {
            self.tree.truncate(mark);
            return Err(err);
        }
        Ok(id)
    }

    /// Count leaf nodes of the legal move tree to `depth` plies.
    pub fn perft(&mut self, depth: u32) -> Result<u64, BoardError> {
        if depth == 0 {
            return Ok(1);
        }
        let moves = self.legal_moves(false, false)?;
        if depth == 1 {
            return Ok(moves.len() as u64);
        }
        let mut nodes = 0;
        for mv in &moves {
            nodes += self.temporarily_move(mv, |board| board.perft(depth - 1))?;
        }
        Ok(nodes)
    }

    /// Perft split by root move, for locating generator bugs.
    pub fn perft_divide(&mut self, depth: u32) -> Result<Vec<(Move, u64)>, BoardError> {
        let moves = self.legal_moves(false, false)?;
        let mut split = Vec::with_capacity(moves.len());
        for mv in &moves {
            let nodes = self.temporarily_move(mv, |board| board.perft(depth.saturating_sub(1)))?;
            split.push((*mv, nodes));
        }
        Ok(split)
    }
}
