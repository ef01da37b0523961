//! Batched numpy entry points.
//!
//! Arrays are `int32`, C-contiguous, shaped `(n, TOTAL_STATE)` for states,
//! `(n, N_MOVES)` for masks and `(n,)` for moves and winners. The GIL is
//! released while the engine runs.

use numpy::{PyArray1, PyArray2, PyArrayMethods, PyReadonlyArray1, PyReadonlyArray2, PyReadwriteArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::batch::BatchEngine;
use crate::core::config::{BatchConfig, N_MOVES, STATE_LEN};
use crate::core::Player;
use crate::error::EngineError;

impl From<EngineError> for PyErr {
    fn from(err: EngineError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn to_2d<'py>(py: Python<'py>, data: Vec<i32>, rows: usize, cols: usize) -> PyResult<Bound<'py, PyArray2<i32>>> {
    PyArray1::from_vec_bound(py, data)
        .reshape([rows, cols])
        .map_err(|e| PyValueError::new_err(format!("{}", e)))
}

fn initialize<'py>(engine: &BatchEngine, py: Python<'py>, n: usize) -> PyResult<Bound<'py, PyArray2<i32>>> {
    to_2d(py, engine.initialize(n).into_vec(), n, STATE_LEN)
}

fn action_masks<'py>(
    engine: &BatchEngine,
    py: Python<'py>,
    states: PyReadonlyArray2<'py, i32>,
) -> PyResult<Bound<'py, PyArray2<i32>>> {
    let data = states.as_slice()?;
    let n = data.len() / STATE_LEN;
    let masks = py.allow_threads(|| engine.compute_masks(data))?;
    to_2d(py, masks, n, N_MOVES)
}

fn apply_moves(
    engine: &BatchEngine,
    py: Python<'_>,
    mut states: PyReadwriteArray2<'_, i32>,
    moves: PyReadonlyArray1<'_, i32>,
) -> PyResult<i32> {
    let moves = moves.as_slice()?;
    let data = states.as_slice_mut()?;
    py.allow_threads(|| engine.apply_moves(data, moves))?;
    Ok(0)
}

fn winners<'py>(
    engine: &BatchEngine,
    py: Python<'py>,
    states: PyReadonlyArray2<'py, i32>,
) -> PyResult<Bound<'py, PyArray1<i32>>> {
    let data = states.as_slice()?;
    let winners = py.allow_threads(|| engine.winners(data))?;
    let codes = winners.into_iter().map(|w| w.map_or(0, Player::code)).collect();
    Ok(PyArray1::from_vec_bound(py, codes))
}

// ============================================================================
// Module-level functions (global rayon pool, non-strict)
// ============================================================================

/// `n` start states as an `(n, TOTAL_STATE)` array.
#[pyfunction]
pub fn initialize_state_batched(py: Python<'_>, n: usize) -> PyResult<Bound<'_, PyArray2<i32>>> {
    initialize(&BatchEngine::default(), py, n)
}

/// Legal-move masks as an `(n, N_MOVES)` 0/1 array.
#[pyfunction]
pub fn get_action_mask_batched<'py>(
    py: Python<'py>,
    states: PyReadonlyArray2<'py, i32>,
) -> PyResult<Bound<'py, PyArray2<i32>>> {
    action_masks(&BatchEngine::default(), py, states)
}

/// Apply one move per state in place. Returns 0.
#[pyfunction]
pub fn update_state_batched(
    py: Python<'_>,
    states: PyReadwriteArray2<'_, i32>,
    moves: PyReadonlyArray1<'_, i32>,
) -> PyResult<i32> {
    apply_moves(&BatchEngine::default(), py, states, moves)
}

/// Winner code per state: 0 none, 1 or 2.
#[pyfunction]
pub fn get_winner_batched<'py>(
    py: Python<'py>,
    states: PyReadonlyArray2<'py, i32>,
) -> PyResult<Bound<'py, PyArray1<i32>>> {
    winners(&BatchEngine::default(), py, states)
}

// ============================================================================
// Configurable engine
// ============================================================================

/// Python wrapper for BatchEngine.
#[pyclass(name = "BatchEngine")]
pub struct PyBatchEngine(BatchEngine);

#[pymethods]
impl PyBatchEngine {
    /// Create a batch engine.
    ///
    /// # Arguments
    /// - num_threads: Dedicated worker count; None uses the global pool (default: None)
    /// - min_chunk: Minimum states per parallel task (default: 64)
    /// - strict: Check every move against its mask before applying (default: False)
    #[new]
    #[pyo3(signature = (num_threads = None, min_chunk = 64, strict = false))]
    fn new(num_threads: Option<usize>, min_chunk: usize, strict: bool) -> PyResult<Self> {
        let mut config = BatchConfig::default().with_min_chunk(min_chunk).with_strict(strict);
        config.num_threads = num_threads;
        Ok(Self(BatchEngine::new(config)?))
    }

    fn initialize<'py>(&self, py: Python<'py>, n: usize) -> PyResult<Bound<'py, PyArray2<i32>>> {
        initialize(&self.0, py, n)
    }

    fn action_masks<'py>(
        &self,
        py: Python<'py>,
        states: PyReadonlyArray2<'py, i32>,
    ) -> PyResult<Bound<'py, PyArray2<i32>>> {
        action_masks(&self.0, py, states)
    }

    fn apply_moves(
        &self,
        py: Python<'_>,
        states: PyReadwriteArray2<'_, i32>,
        moves: PyReadonlyArray1<'_, i32>,
    ) -> PyResult<i32> {
        apply_moves(&self.0, py, states, moves)
    }

    fn winners<'py>(&self, py: Python<'py>, states: PyReadonlyArray2<'py, i32>) -> PyResult<Bound<'py, PyArray1<i32>>> {
        winners(&self.0, py, states)
    }

    #[getter]
    fn num_threads(&self) -> Option<usize> {
        self.0.config().num_threads
    }

    #[getter]
    fn min_chunk(&self) -> usize {
        self.0.config().min_chunk
    }

    #[getter]
    fn strict(&self) -> bool {
        self.0.config().strict
    }

    fn __repr__(&self) -> String {
        let config = self.0.config();
        format!(
            "BatchEngine(num_threads={:?}, min_chunk={}, strict={})",
            config.num_threads, config.min_chunk, config.strict
        )
    }
}
