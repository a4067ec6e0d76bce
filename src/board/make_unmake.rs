//! Make/unmake of mutations and moves, and navigation of the move tree.

use std::ops::{Deref, DerefMut};

use super::error::BoardError;
use super::tree::NodeId;
use super::{Board, BoardMutation, Move, MutationKind};

impl Board {
    /// Apply one mutation, refusing anything that contradicts the board.
    pub(crate) fn make_one(&mut self, m: BoardMutation) -> Result<(), BoardError> {
        let found = self.piece_at(m.square);
        match m.kind {
            MutationKind::Add if found.is_none() => {
                self.put(m.square, m.piece);
                Ok(())
            }
            MutationKind::Remove if found == Some(m.piece) => {
                let slot = self.take(m.square, m.piece);
                self.removed_slots.push(slot);
                Ok(())
            }
            _ => Err(BoardError::InvalidState { mutation: m, found }),
        }
    }

    /// Exact inverse of [`Board::make_one`], piece-list order included.
    ///
    /// Mutations unwind last-in first-out: an undone add is the last square of
    /// its list, and an undone removal goes back to the slot recorded when it
    /// was made.
    pub(crate) fn unmake_one(&mut self, m: BoardMutation) -> Result<(), BoardError> {
        let found = self.piece_at(m.square);
        let invalid = BoardError::InvalidState {
            mutation: m.inverse(),
            found,
        };
        match m.kind {
            MutationKind::Add
                if found == Some(m.piece) && self.pieces(m.piece.color).last() == Some(&m.square) =>
            {
                self.take(m.square, m.piece);
                Ok(())
            }
            MutationKind::Remove if found.is_none() => {
                let slot = self.removed_slots.pop().ok_or(invalid)?;
                self.put_back(m.square, m.piece, slot);
                Ok(())
            }
            _ => Err(invalid),
        }
    }

    /// Apply every mutation of `mv` in order; on failure the applied prefix
    /// is reverted before the error is returned.
    fn apply_mutations(&mut self, mv: &Move) -> Result<(), BoardError> {
        let mutations = mv.mutations();
        for (i, &m) in mutations.iter().enumerate() {
            if let Err(err) = self.make_one(m) {
                for &done in mutations[..i].iter().rev() {
                    self.unmake_one(done)?;
                }
                return Err(err);
            }
        }
        Ok(())
    }

    fn revert_mutations(&mut self, mv: &Move) -> Result<(), BoardError> {
        let mutations = mv.mutations();
        for (i, &m) in mutations.iter().enumerate().rev() {
            if let Err(err) = self.unmake_one(m) {
                for &done in &mutations[i + 1..] {
                    self.make_one(done)?;
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Step from the current node to its child `id`.
    fn step_down(&mut self, id: NodeId) -> Result<(), BoardError> {
        let mv = self.tree.node(id).mv;
        self.apply_mutations(&mv)?;
        self.current = id;
        let key = self.position_key();
        self.repetitions.increment(key);
        Ok(())
    }

    /// Step from the current node back to its parent.
    fn step_up(&mut self) -> Result<(), BoardError> {
        let node = self.tree.node(self.current);
        let (mv, parent) = (node.mv, node.parent);
        let Some(parent) = parent else {
            return Ok(());
        };
        let key = self.position_key();
        self.revert_mutations(&mv)?;
        self.repetitions.decrement(key);
        self.current = parent;
        Ok(())
    }

    /// Move the board to `target`, wherever it sits in the tree.
    ///
    /// Both nodes walk upward (deeper side first) until they meet; every move
    /// above the current node is unmade and every move down to the target is
    /// made. The board never gets copied.
    pub fn process(&mut self, target: NodeId) -> Result<(), BoardError> {
        self.tree.check(target)?;
        if target == self.current {
            return Ok(());
        }
        if self.tree.parent(target) == Some(self.current) {
            return self.step_down(target);
        }
        if self.tree.parent(self.current) == Some(target) {
            return self.step_up();
        }

        let mut forward = Vec::new();
        let mut down = target;
        while self.tree.depth(self.current) > self.tree.depth(down) {
            self.step_up()?;
        }
        while self.tree.depth(down) > self.tree.depth(self.current) {
            forward.push(down);
            down = self.tree.parent(down).unwrap_or(NodeId::ROOT);
        }
        while self.current != down {
            self.step_up()?;
            forward.push(down);
            down = self.tree.parent(down).unwrap_or(NodeId::ROOT);
        }
        for &id in forward.iter().rev() {
            self.step_down(id)?;
        }
        Ok(())
    }

    /// Append `mv` under the current node without playing it.
    pub(crate) fn push_child(&mut self, mv: Move) -> NodeId {
        self.tree.push(self.current, mv)
    }

    /// Play `mv` from the current node, returning a guard that goes back to
    /// this node (and forgets every node created meanwhile) when dropped.
    pub fn enter(&mut self, mv: &Move) -> Result<MoveGuard<'_>, BoardError> {
        let parent = self.current;
        let mark = self.tree.len();
        let id = self.push_child(*mv);
        if let Err(err) = self.step_down(id) {
            self.tree.truncate(mark);
            return Err(err);
        }
        Ok(MoveGuard {
            board: self,
            parent,
            node: id,
            mark,
            armed: true,
        })
    }

    /// Make `mv`, run `f` on the resulting position, then unmake `mv`.
    ///
    /// The unmake runs on every exit path of `f`, including an error.
    pub fn temporarily_move<T, E, F>(&mut self, mv: &Move, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Board) -> Result<T, E>,
        E: From<BoardError>,
    {
        let mut guard = self.enter(mv)?;
        let result = f(&mut *guard);
        guard.leave()?;
        result
    }

    fn restore(&mut self, parent: NodeId, mark: usize) -> Result<(), BoardError> {
        let outcome = self.process(parent);
        if outcome.is_ok() {
            self.tree.truncate(mark);
        }
        outcome
    }
}

/// Scoped position: the board one move below where it was entered.
pub struct MoveGuard<'a> {
    board: &'a mut Board,
    parent: NodeId,
    node: NodeId,
    mark: usize,
    armed: bool,
}

impl MoveGuard<'_> {
    /// Tree node of the entered move.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Return to the parent position, reporting a corrupted board.
    pub fn leave(mut self) -> Result<(), BoardError> {
        self.armed = false;
        self.board.restore(self.parent, self.mark)
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(err) = self.board.restore(self.parent, self.mark) {
                log::warn!("failed to restore position after scoped move: {err}");
            }
        }
    }
}
