//! Parallel batch driver.
//!
//! `BatchEngine` runs the three batched entry points over flat state buffers:
//!
//! - `initialize(n)`: `n` start states
//! - `compute_masks(states)`: one 61-slot 0/1 row per state, read-only
//! - `apply_moves(states, moves)`: one move per state, in place
//!
//! Buffer shapes and move indices are checked before any element is touched,
//! so a rejected call leaves the batch unchanged. Rule violations inside a
//! move application panic (see `rules::apply`) unless strict mode catches
//! them up front.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::{batch_len, StateBatch};
use crate::core::config::{BatchConfig, N_MOVES, STATE_LEN};
use crate::core::{GameState, Move, Player};
use crate::error::EngineError;
use crate::rules::{RulesEngine, StandardRules};

/// Batched rules driver.
pub struct BatchEngine<R: RulesEngine = StandardRules> {
    rules: R,
    config: BatchConfig,
    pool: Option<ThreadPool>,
}

impl BatchEngine<StandardRules> {
    /// Driver for the standard rules.
    pub fn new(config: BatchConfig) -> Result<Self, EngineError> {
        Self::with_rules(StandardRules, config)
    }
}

impl Default for BatchEngine<StandardRules> {
    fn default() -> Self {
        // The global pool needs no construction, so this cannot fail.
        Self {
            rules: StandardRules,
            config: BatchConfig::default(),
            pool: None,
        }
    }
}

impl<R: RulesEngine> BatchEngine<R> {
    /// Driver for an arbitrary rule set.
    ///
    /// Builds a dedicated worker pool when `config.num_threads` is set.
    pub fn with_rules(rules: R, config: BatchConfig) -> Result<Self, EngineError> {
        let pool = match config.num_threads {
            Some(threads) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| EngineError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };
        Ok(Self { rules, config, pool })
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Run `op` on the dedicated pool if there is one.
    fn install<T: Send>(&self, op: impl FnOnce() -> T + Send) -> T {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    // === Entry points ===

    /// `n` canonical start states.
    #[must_use]
    pub fn initialize(&self, n: usize) -> StateBatch {
        StateBatch::new(n)
    }

    /// Action masks for every state, `N_MOVES` values per state.
    pub fn compute_masks(&self, states: &[i32]) -> Result<Vec<i32>, EngineError> {
        let n = batch_len(states)?;
        let mut masks = vec![0; n * N_MOVES];
        self.compute_masks_into(states, &mut masks)?;
        Ok(masks)
    }

    /// Action masks written into a caller-provided buffer.
    pub fn compute_masks_into(&self, states: &[i32], masks: &mut [i32]) -> Result<(), EngineError> {
        let n = batch_len(states)?;
        if masks.len() != n * N_MOVES {
            return Err(EngineError::MaskLength {
                len: masks.len(),
                expected: n * N_MOVES,
            });
        }

        let min_len = self.config.min_chunk;
        self.install(|| {
            states
                .par_chunks(STATE_LEN)
                .zip(masks.par_chunks_mut(N_MOVES))
                .enumerate()
                .with_min_len(min_len)
                .try_for_each(|(i, (packed, row))| {
                    let state = GameState::unpack(packed).map_err(|e| e.at(i))?;
                    self.rules.action_mask(&state).write_to(row);
                    Ok(())
                })
        })
    }

    /// Apply `moves[i]` to state `i`, in place.
    ///
    /// Every state is decoded (and in strict mode checked against its mask)
    /// before any is written, so an `Err` leaves `states` untouched.
    ///
    /// # Panics
    /// Outside strict mode, panics if a move breaks the rules in a way the
    /// applicator cannot carry out (see `rules::apply_move`). Unlike the `Err`
    /// path, other elements of the batch may already be updated when it does.
    pub fn apply_moves(&self, states: &mut [i32], moves: &[i32]) -> Result<(), EngineError> {
        let n = batch_len(states)?;
        if moves.len() != n {
            return Err(EngineError::BatchMismatch {
                states: n,
                moves: moves.len(),
            });
        }
        let decoded = moves
            .iter()
            .enumerate()
            .map(|(i, &code)| Move::try_from_code(code).map_err(|e| e.at(i)))
            .collect::<Result<Vec<_>, _>>()?;

        let min_len = self.config.min_chunk;
        let strict = self.config.strict;
        self.install(|| {
            let mut games = states
                .par_chunks(STATE_LEN)
                .zip(decoded.par_iter())
                .enumerate()
                .with_min_len(min_len)
                .map(|(i, (packed, &mv))| {
                    let state = GameState::unpack(packed).map_err(|e| e.at(i))?;
                    if strict {
                        self.verify(&state, mv).map_err(|e| e.at(i))?;
                    }
                    Ok(state)
                })
                .collect::<Result<Vec<_>, EngineError>>()?;

            games
                .par_iter_mut()
                .zip(states.par_chunks_mut(STATE_LEN))
                .zip(decoded.par_iter())
                .with_min_len(min_len)
                .for_each(|((state, out), &mv)| {
                    self.rules.apply_move(state, mv);
                    state.pack_into(out);
                });
            Ok(())
        })
    }

    /// Apply moves to an owned batch.
    pub fn apply_to(&self, batch: &mut StateBatch, moves: &[i32]) -> Result<(), EngineError> {
        self.apply_moves(batch.as_mut_slice(), moves)
    }

    /// Winner of every state.
    pub fn winners(&self, states: &[i32]) -> Result<Vec<Option<Player>>, EngineError> {
        batch_len(states)?;
        let min_len = self.config.min_chunk;
        self.install(|| {
            states
                .par_chunks(STATE_LEN)
                .enumerate()
                .with_min_len(min_len)
                .map(|(i, packed)| {
                    GameState::unpack(packed)
                        .map(|state| self.rules.winner(&state))
                        .map_err(|e| e.at(i))
                })
                .collect()
        })
    }

    /// Strict-mode check: consistent occupancy and a masked move.
    fn verify(&self, state: &GameState, mv: Move) -> Result<(), EngineError> {
        state.check_invariants()?;
        if !self.rules.is_legal(state, mv) {
            return Err(EngineError::IllegalMove {
                element: 0,
                index: mv.index(),
            });
        }
        Ok(())
    }
}
