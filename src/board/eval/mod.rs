//! Static evaluation.
//!
//! Every term is accumulated per color into a [`Score`]; the final value is
//! `white - black`, so White maximizes and Black minimizes.

pub mod tables;

use super::{Board, Color, Move, MoveStatus, Piece, PlayerPiece, Square};
use tables::*;

/// Stage of the game; selects which terms apply and with which weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Opening,
    MiddleGame,
    EndGameWithPawns,
    EndGameWithPieces,
}

impl GamePhase {
    /// Classify the current position of `board`.
    #[must_use]
    pub fn of(board: &Board) -> GamePhase {
        if board.game_ply() < OPENING_PLIES {
            return GamePhase::Opening;
        }
        let white = board.material(Color::White);
        let black = board.material(Color::Black);
        if white > MIDDLE_GAME_MATERIAL || black > MIDDLE_GAME_MATERIAL {
            return GamePhase::MiddleGame;
        }
        let only_pawns = Color::BOTH.iter().all(|&color| {
            board.pieces(color).iter().all(|&sq| {
                board
                    .piece_at(sq)
                    .is_some_and(|p| matches!(p.piece, Piece::Pawn | Piece::King))
            })
        });
        if only_pawns {
            GamePhase::EndGameWithPawns
        } else {
            GamePhase::EndGameWithPieces
        }
    }

    const fn index(self) -> usize {
        match self {
            GamePhase::Opening => 0,
            GamePhase::MiddleGame => 1,
            GamePhase::EndGameWithPawns => 2,
            GamePhase::EndGameWithPieces => 3,
        }
    }

    #[must_use]
    pub const fn is_endgame(self) -> bool {
        matches!(self, GamePhase::EndGameWithPawns | GamePhase::EndGameWithPieces)
    }

    const fn centre_table(self) -> &'static [[i32; 8]; 8] {
        match self {
            GamePhase::Opening => &CENTRE_OPENING,
            GamePhase::MiddleGame => &CENTRE_MIDDLE,
            GamePhase::EndGameWithPawns | GamePhase::EndGameWithPieces => &CENTRE_END,
        }
    }
}

/// Per-color accumulator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub white: i32,
    pub black: i32,
}

impl Score {
    #[inline]
    pub fn add(&mut self, color: Color, value: i32) {
        match color {
            Color::White => self.white += value,
            Color::Black => self.black += value,
        }
    }

    /// Value from White's point of view.
    #[inline]
    #[must_use]
    pub const fn net(&self) -> i32 {
        self.white - self.black
    }
}

#[inline]
fn table_at(table: &[[i32; 8]; 8], sq: Square) -> i32 {
    table[sq.file()][sq.rank()]
}

/// Composite, phase-dependent position scorer.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evaluator;

impl Evaluator {
    #[must_use]
    pub fn new() -> Self {
        Evaluator
    }

    /// Score the current position of `board`, reached by a move with
    /// `status`, `ply` plies below the search root.
    #[must_use]
    pub fn evaluate(&self, board: &Board, status: MoveStatus, ply: u32) -> i32 {
        match status {
            MoveStatus::CheckMate => {
                let winner = board.to_move().opponent();
                let ply = i32::try_from(ply).unwrap_or(i32::MAX / MATE_PLY_PENALTY);
                return winner.sign() * (MATE_VALUE - ply * MATE_PLY_PENALTY).max(1);
            }
            MoveStatus::StaleMate | MoveStatus::DrawByRepetition => return 0,
            MoveStatus::Normal | MoveStatus::Check => {}
        }

        let phase = GamePhase::of(board);
        let mut score = Score::default();
        self.material(board, &mut score);
        self.centre_control(board, phase, &mut score);
        self.king_safety(board, phase, &mut score);
        self.pawn_structure(board, phase, &mut score);
        if phase.is_endgame() {
            self.passed_pawns(board, phase, &mut score);
        } else {
            let (white, black) = board.mobility_counts();
            score.add(Color::White, white * MOBILITY_WEIGHT);
            score.add(Color::Black, black * MOBILITY_WEIGHT);
        }
        if status == MoveStatus::Check {
            score.add(board.to_move().opponent(), CHECK_BONUS);
        }
        score.net()
    }

    /// Cheap positional score used to pre-order root moves.
    #[must_use]
    pub fn positional(&self, board: &Board) -> i32 {
        let phase = GamePhase::of(board);
        let mut score = Score::default();
        self.centre_control(board, phase, &mut score);
        self.pawn_structure(board, phase, &mut score);
        score.net()
    }

    /// Ordering heuristic for `mv` from the mover's point of view; higher
    /// values are searched first.
    #[must_use]
    pub fn move_order_value(&self, _board: &Board, mv: &Move) -> i32 {
        let mut value = match mv.status() {
            MoveStatus::CheckMate => MATE_ORDER_BONUS,
            MoveStatus::Check => CHECK_ORDER_BONUS,
            _ => 0,
        };
        if let Some((victim, sq)) = mv.captured() {
            let attacker = match mv.moved_piece() {
                Some(p) if p.piece == Piece::King => KING_ORDER_VALUE,
                Some(p) => p.piece.value(),
                None => 0,
            };
            value += victim.piece.value() * 10 - attacker;
            value += table_at(&CENTRE_END, sq) * CENTRE_CAPTURE_WEIGHT;
        }
        if let Some(piece) = mv.promotion() {
            value += piece.value() * 10;
        }
        value
    }

    fn material(&self, board: &Board, score: &mut Score) {
        let white = board.material(Color::White);
        let black = board.material(Color::Black);
        score.add(Color::White, white);
        score.add(Color::Black, black);

        let lead = white - black;
        if lead != 0 {
            let traded = (2 * STARTING_MATERIAL - white - black).max(0);
            let bonus = lead.abs() * traded / TRADE_DOWN_DIVISOR;
            let leader = if lead > 0 { Color::White } else { Color::Black };
            score.add(leader, bonus);
        }
    }

    fn centre_control(&self, board: &Board, phase: GamePhase, score: &mut Score) {
        let table = phase.centre_table();
        let weights = &CENTRE_WEIGHTS[phase.index()];
        for color in Color::BOTH {
            for &sq in board.pieces(color) {
                if let Some(piece) = board.piece_at(sq) {
                    score.add(color, table_at(table, sq) * weights[piece.piece.index()]);
                }
            }
        }
    }

    fn king_safety(&self, board: &Board, phase: GamePhase, score: &mut Score) {
        if phase.is_endgame() {
            self.endgame_kings(board, score);
            return;
        }
        for color in Color::BOTH {
            if let Some(enemy_king) = board.king_square(color.opponent()) {
                for &sq in board.pieces(color) {
                    let near = board
                        .piece_at(sq)
                        .is_some_and(|p| !matches!(p.piece, Piece::Pawn | Piece::King));
                    if near {
                        score.add(color, KING_PRESSURE.get(sq.distance(enemy_king)).copied().unwrap_or(0));
                    }
                }
            }
            if let Some(king) = board.king_square(color) {
                if color.relative_rank(king.rank()) <= 1 {
                    let pawn = PlayerPiece::new(color, Piece::Pawn);
                    let shield = [-1, 0, 1]
                        .iter()
                        .filter_map(|&df| king.offset(df, color.pawn_direction()))
                        .filter(|&sq| board.piece_at(sq) == Some(pawn))
                        .count() as i32;
                    score.add(color, shield * PAWN_SHIELD_BONUS);
                }
            }
        }
    }

    fn endgame_kings(&self, board: &Board, score: &mut Score) {
        let (Some(white_king), Some(black_king)) =
            (board.king_square(Color::White), board.king_square(Color::Black))
        else {
            return;
        };
        score.add(Color::White, table_at(&CENTRE_END, white_king) * KING_CENTRE_WEIGHT);
        score.add(Color::Black, table_at(&CENTRE_END, black_king) * KING_CENTRE_WEIGHT);

        let lead = board.material(Color::White) - board.material(Color::Black);
        if lead != 0 {
            let leader = if lead > 0 { Color::White } else { Color::Black };
            let closeness = 14 - white_king.manhattan(black_king) as i32;
            score.add(leader, closeness * KING_PROXIMITY_WEIGHT);
        }
    }

    fn pawn_structure(&self, board: &Board, phase: GamePhase, score: &mut Score) {
        for color in Color::BOTH {
            let pawn = PlayerPiece::new(color, Piece::Pawn);
            let mut files = [0i32; 8];
            for &sq in board.pieces(color) {
                if board.piece_at(sq) == Some(pawn) {
                    files[sq.file()] += 1;
                    let wing = matches!(sq.file(), 0 | 1 | 6 | 7);
                    if phase == GamePhase::Opening && wing && sq.rank() != color.pawn_start_rank() {
                        score.add(color, -WING_PAWN_PENALTY);
                    }
                }
            }
            let doubled: i32 = files.iter().map(|&n| (n - 1).max(0)).sum();
            score.add(color, -doubled * DOUBLED_PAWN_PENALTY);

            if !phase.is_endgame() && board.has_castled(color) {
                score.add(color, CASTLED_BONUS);
            }
        }
    }

    fn passed_pawns(&self, board: &Board, phase: GamePhase, score: &mut Score) {
        for color in Color::BOTH {
            let pawn = PlayerPiece::new(color, Piece::Pawn);
            let rook = PlayerPiece::new(color, Piece::Rook);
            for &sq in board.pieces(color) {
                if board.piece_at(sq) != Some(pawn) || !is_passed(board, sq, color) {
                    continue;
                }
                let advance = color.relative_rank(sq.rank());
                score.add(color, PASSED_PAWN_ADVANCE[advance]);

                if phase == GamePhase::EndGameWithPawns && outruns_king(board, sq, color) {
                    score.add(color, UNSTOPPABLE_PAWN_BONUS);
                }

                let rook_behind = board.pieces(color).iter().any(|&other| {
                    board.piece_at(other) == Some(rook)
                        && other.file() == sq.file()
                        && color.relative_rank(other.rank()) < advance
                });
                if rook_behind {
                    score.add(color, ROOK_BEHIND_PASSER);
                }
            }
        }
    }
}

/// No enemy pawn ahead on the same or an adjacent file.
fn is_passed(board: &Board, sq: Square, color: Color) -> bool {
    let enemy_pawn = PlayerPiece::new(color.opponent(), Piece::Pawn);
    let advance = color.relative_rank(sq.rank());
    !board.pieces(color.opponent()).iter().any(|&other| {
        board.piece_at(other) == Some(enemy_pawn)
            && other.file().abs_diff(sq.file()) <= 1
            && color.relative_rank(other.rank()) > advance
    })
}

/// Square rule: the defending king cannot reach the promotion square in time.
fn outruns_king(board: &Board, sq: Square, color: Color) -> bool {
    let Some(enemy_king) = board.king_square(color.opponent()) else {
        return true;
    };
    let promotion = Square::at(sq.file(), color.pawn_promotion_rank());
    let mut pawn_moves = promotion.distance(sq);
    if sq.rank() == color.pawn_start_rank() {
        pawn_moves -= 1;
    }
    let mut king_moves = enemy_king.distance(promotion);
    if board.to_move() != color {
        king_moves = king_moves.saturating_sub(1);
    }
    king_moves > pawn_moves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_is_balanced() {
        let board = Board::new();
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate(&board, MoveStatus::Normal, 0), 0);
        assert_eq!(GamePhase::of(&board), GamePhase::Opening);
    }

    #[test]
    fn test_faster_mate_scores_higher() {
        let board = Board::from_fen("7k/6Q1/5K2/8/8/8/8/8 b").unwrap();
        let eval = Evaluator::new();
        let quick = eval.evaluate(&board, MoveStatus::CheckMate, 1);
        let slow = eval.evaluate(&board, MoveStatus::CheckMate, 3);
        assert!(quick > slow);
        assert!(slow > 0);
    }

    #[test]
    fn test_draws_score_zero() {
        let board = Board::from_fen("7k/8/8/8/8/8/8/QQ5K b").unwrap();
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate(&board, MoveStatus::StaleMate, 2), 0);
        assert_eq!(eval.evaluate(&board, MoveStatus::DrawByRepetition, 2), 0);
    }

    #[test]
    fn test_pawn_ending_phase() {
        let board = Board::from_fen("4k3/p7/8/8/8/8/7P/4K3 w - - 0 40").unwrap();
        assert_eq!(GamePhase::of(&board), GamePhase::EndGameWithPawns);
    }

    #[test]
    fn test_unstoppable_pawn() {
        let board = Board::from_fen("k7/8/8/8/8/8/7P/K7 w - - 0 40").unwrap();
        let h2: Square = "h2".parse().unwrap();
        assert!(outruns_king(&board, h2, Color::White));
        let caught = Board::from_fen("6k1/8/8/8/8/8/7P/K7 w - - 0 40").unwrap();
        assert!(!outruns_king(&caught, h2, Color::White));
    }

    #[test]
    fn test_capture_ordering_prefers_bigger_victim() {
        let board = Board::new();
        let eval = Evaluator::new();
        let sq = |s: &str| s.parse::<Square>().unwrap();
        let pawn = PlayerPiece::new(Color::White, Piece::Pawn);
        let takes_queen = Move::capture(pawn, sq("d4"), sq("e5"), PlayerPiece::new(Color::Black, Piece::Queen), sq("e5"));
        let takes_pawn = Move::capture(pawn, sq("d4"), sq("e5"), PlayerPiece::new(Color::Black, Piece::Pawn), sq("e5"));
        assert!(eval.move_order_value(&board, &takes_queen) > eval.move_order_value(&board, &takes_pawn));
    }
}
