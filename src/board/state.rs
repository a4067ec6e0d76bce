use std::sync::Arc;

use crate::zobrist::{position_key, ZobristTable};

use super::history::RepetitionTable;
use super::tree::{MoveTree, NodeId};
use super::{Color, Move, Piece, PlayerPiece, Square};

/// Marker for "square not in any piece list".
const NO_SLOT: u8 = u8::MAX;

/// Mutable position state plus the move tree that produced it.
///
/// The occupancy array, the per-color square lists and the hash accumulator
/// are only changed together, one mutation at a time.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) squares: [Option<PlayerPiece>; 64],
    pub(crate) piece_lists: [Vec<Square>; 2],
    // position of each square inside its color's piece list
    pub(crate) list_slot: [u8; 64],
    pub(crate) hash: u64,
    // list slot of every removal currently applied, innermost last
    pub(crate) removed_slots: Vec<u8>,
    // position key of the setup position
    pub(crate) root_key: u64,
    pub(crate) repetitions: RepetitionTable,
    pub(crate) tree: MoveTree,
    pub(crate) current: NodeId,
    pub(crate) root_to_move: Color,
    pub(crate) root_ply: u32,
    // squares treated as already lifted before the setup position
    pub(crate) setup_moved: u64,
    pub(crate) zobrist: Arc<ZobristTable>,
}

impl Board {
    /// The standard starting position with White to move.
    #[must_use]
    pub fn new() -> Self {
        super::BoardBuilder::starting_position().build()
    }

    /// The standard starting position hashed with a shared key table.
    #[must_use]
    pub fn with_zobrist(zobrist: Arc<ZobristTable>) -> Self {
        super::BoardBuilder::starting_position().zobrist(zobrist).build()
    }

    /// An empty board sharing the given key table.
    #[must_use]
    pub fn empty_with(zobrist: Arc<ZobristTable>, to_move: Color, ply: u32) -> Self {
        let mut board = Board {
            squares: [None; 64],
            piece_lists: [Vec::with_capacity(16), Vec::with_capacity(16)],
            list_slot: [NO_SLOT; 64],
            hash: 0,
            removed_slots: Vec::new(),
            root_key: 0,
            repetitions: RepetitionTable::new(),
            tree: MoveTree::new(),
            current: NodeId::ROOT,
            root_to_move: to_move,
            root_ply: ply,
            setup_moved: 0,
            zobrist,
        };
        board.reset_repetitions();
        board
    }

    /// Record the setup position as seen once.
    pub(crate) fn reset_repetitions(&mut self) {
        self.repetitions = RepetitionTable::new();
        let key = self.position_key();
        self.repetitions.set(key, 1);
        self.root_key = key;
    }

    /// Place a piece on an empty square (setup only, keeps the triple in sync).
    pub(crate) fn put(&mut self, sq: Square, piece: PlayerPiece) {
        debug_assert!(self.squares[sq.index()].is_none());
        self.squares[sq.index()] = Some(piece);
        let list = &mut self.piece_lists[piece.color.index()];
        self.list_slot[sq.index()] = list.len() as u8;
        list.push(sq);
        self.hash ^= self.zobrist.key(piece, sq);
    }

    /// Lift a known piece from its square, swap-removing it from its list.
    /// Returns the slot it occupied.
    pub(crate) fn take(&mut self, sq: Square, piece: PlayerPiece) -> u8 {
        debug_assert_eq!(self.squares[sq.index()], Some(piece));
        self.squares[sq.index()] = None;
        let slot = self.list_slot[sq.index()];
        let list = &mut self.piece_lists[piece.color.index()];
        list.swap_remove(usize::from(slot));
        if let Some(&moved) = list.get(usize::from(slot)) {
            self.list_slot[moved.index()] = slot;
        }
        self.list_slot[sq.index()] = NO_SLOT;
        self.hash ^= self.zobrist.key(piece, sq);
        slot
    }

    /// Inverse of [`Board::take`]: put `piece` back into `slot`, sending the
    /// square that was swapped in there back to the end of the list.
    pub(crate) fn put_back(&mut self, sq: Square, piece: PlayerPiece, slot: u8) {
        debug_assert!(self.squares[sq.index()].is_none());
        self.squares[sq.index()] = Some(piece);
        let list = &mut self.piece_lists[piece.color.index()];
        let slot = usize::from(slot).min(list.len());
        if let Some(&displaced) = list.get(slot) {
            self.list_slot[displaced.index()] = list.len() as u8;
            list.push(displaced);
            list[slot] = sq;
        } else {
            list.push(sq);
        }
        self.list_slot[sq.index()] = slot as u8;
        self.hash ^= self.zobrist.key(piece, sq);
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<PlayerPiece> {
        self.squares[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// Squares occupied by `color`, in no particular order.
    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color) -> &[Square] {
        &self.piece_lists[color.index()]
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = PlayerPiece::new(color, Piece::King);
        self.pieces(color)
            .iter()
            .copied()
            .find(|&sq| self.squares[sq.index()] == Some(king))
    }

    /// Non-king material of one side.
    #[must_use]
    pub fn material(&self, color: Color) -> i32 {
        self.pieces(color)
            .iter()
            .filter_map(|&sq| self.squares[sq.index()])
            .map(|p| p.piece.value())
            .sum()
    }

    /// Count of `piece` owned by `color`.
    #[must_use]
    pub fn count(&self, color: Color, piece: Piece) -> usize {
        let target = PlayerPiece::new(color, piece);
        self.pieces(color)
            .iter()
            .filter(|&&sq| self.squares[sq.index()] == Some(target))
            .count()
    }

    /// Piece-layout hash (side to move not included).
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Layout hash with the side to move folded into the high bit.
    #[inline]
    #[must_use]
    pub fn position_key(&self) -> u64 {
        position_key(self.hash, self.to_move())
    }

    /// Position key of the setup position (tree root).
    #[inline]
    #[must_use]
    pub fn root_key(&self) -> u64 {
        self.root_key
    }

    #[inline]
    #[must_use]
    pub fn zobrist(&self) -> &Arc<ZobristTable> {
        &self.zobrist
    }

    #[inline]
    #[must_use]
    pub fn to_move(&self) -> Color {
        if self.tree.node(self.current).depth % 2 == 0 {
            self.root_to_move
        } else {
            self.root_to_move.opponent()
        }
    }

    /// Plies played since the start of the game.
    #[inline]
    #[must_use]
    pub fn game_ply(&self) -> u32 {
        self.root_ply + self.tree.node(self.current).depth
    }

    /// How often the current position occurred on the current line.
    #[inline]
    #[must_use]
    pub fn repetitions(&self) -> u32 {
        self.repetitions.get(self.position_key())
    }

    #[inline]
    #[must_use]
    pub fn current(&self) -> NodeId {
        self.current
    }

    /// The move that led to the current position (empty at the root).
    #[inline]
    #[must_use]
    pub fn current_move(&self) -> &Move {
        &self.tree.node(self.current).mv
    }

    #[inline]
    #[must_use]
    pub fn tree(&self) -> &MoveTree {
        &self.tree
    }

    /// Moves from the setup position to the current one.
    #[must_use]
    pub fn history(&self) -> Vec<Move> {
        let mut line: Vec<Move> = self
            .tree
            .ancestors(self.current)
            .map(|id| self.tree.node(id).mv)
            .collect();
        line.reverse();
        line
    }

    /// Whether any move on the current line lifted a piece from `sq`, or the
    /// setup marked that square as moved.
    #[must_use]
    pub fn has_moved_from(&self, sq: Square) -> bool {
        if self.setup_moved & (1 << sq.index()) != 0 {
            return true;
        }
        self.tree.ancestors(self.current).any(|id| {
            self.tree
                .node(id)
                .mv
                .mutations()
                .iter()
                .any(|m| !m.is_add() && m.square == sq)
        })
    }

    /// Whether `color` castled on the current line.
    #[must_use]
    pub fn has_castled(&self, color: Color) -> bool {
        self.tree.ancestors(self.current).any(|id| {
            let mv = &self.tree.node(id).mv;
            mv.is_castling() && mv.mover() == Some(color)
        })
    }

    #[must_use]
    pub fn node_value(&self, id: NodeId) -> Option<i32> {
        self.tree.check(id).ok().map(|()| self.tree.node(id).value)
    }

    pub fn set_node_value(&mut self, id: NodeId, value: i32) {
        if self.tree.check(id).is_ok() {
            self.tree.node_mut(id).value = value;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl PartialEq for Board {
    /// Same pieces on the same squares with the same side to move.
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares && self.to_move() == other.to_move()
    }
}
