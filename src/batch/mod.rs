//! Batched game states and the parallel driver over them.
//!
//! A batch is one flat `i32` buffer holding `N` packed states back to back.
//! Every operation treats element `i` in isolation, so elements are handed
//! to rayon workers with no synchronization between them.

pub mod driver;

pub use driver::BatchEngine;

use crate::core::config::STATE_LEN;
use crate::core::GameState;
use crate::error::EngineError;

/// Number of packed states in `buf`.
pub(crate) fn batch_len(buf: &[i32]) -> Result<usize, EngineError> {
    if buf.len() % STATE_LEN != 0 {
        return Err(EngineError::BufferLength { len: buf.len() });
    }
    Ok(buf.len() / STATE_LEN)
}

/// Owned buffer of packed game states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateBatch {
    data: Vec<i32>,
}

impl StateBatch {
    /// `n` copies of the canonical start state.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            data: GameState::new().pack().repeat(n),
        }
    }

    /// Wrap an existing buffer. Its length must be a multiple of `STATE_LEN`.
    pub fn from_vec(data: Vec<i32>) -> Result<Self, EngineError> {
        batch_len(&data)?;
        Ok(Self { data })
    }

    /// Number of states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() / STATE_LEN
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [i32] {
        &mut self.data
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<i32> {
        self.data
    }

    /// Packed form of element `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[must_use]
    pub fn packed(&self, index: usize) -> &[i32] {
        &self.data[index * STATE_LEN..(index + 1) * STATE_LEN]
    }

    /// Decode element `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn state(&self, index: usize) -> Result<GameState, EngineError> {
        GameState::unpack(self.packed(index)).map_err(|e| e.at(index))
    }

    /// Overwrite element `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn set_state(&mut self, index: usize, state: &GameState) {
        state.pack_into(&mut self.data[index * STATE_LEN..(index + 1) * STATE_LEN]);
    }

    /// Iterate over packed elements.
    pub fn iter(&self) -> impl Iterator<Item = &[i32]> {
        self.data.chunks_exact(STATE_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, Move};
    use crate::rules::apply_move;

    #[test]
    fn test_new_batch_is_start_states() {
        let batch = StateBatch::new(3);

        assert_eq!(batch.len(), 3);
        assert_eq!(batch.as_slice().len(), 3 * STATE_LEN);
        for packed in batch.iter() {
            assert_eq!(packed, GameState::new().pack().as_slice());
        }
    }

    #[test]
    fn test_empty_batch() {
        let batch = StateBatch::new(0);
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }

    #[test]
    fn test_from_vec_checks_length() {
        assert!(StateBatch::from_vec(vec![0; STATE_LEN * 2]).is_ok());
        assert_eq!(
            StateBatch::from_vec(vec![0; STATE_LEN + 1]),
            Err(EngineError::BufferLength { len: STATE_LEN + 1 })
        );
    }

    #[test]
    fn test_set_state_touches_one_element() {
        let mut batch = StateBatch::new(3);
        let mut state = GameState::new();
        apply_move(&mut state, Move::piece(6, Direction::SW));

        batch.set_state(1, &state);

        assert_eq!(batch.state(1).unwrap(), state);
        assert_eq!(batch.state(0).unwrap(), GameState::new());
        assert_eq!(batch.state(2).unwrap(), GameState::new());
    }

    #[test]
    fn test_state_error_names_element() {
        let mut data = StateBatch::new(2).into_vec();
        data[STATE_LEN + crate::core::config::WINNER_OFFSET] = 5;
        let batch = StateBatch::from_vec(data).unwrap();

        let err = batch.state(1).unwrap_err();
        assert!(matches!(err, EngineError::Element { element: 1, .. }));
    }
}
