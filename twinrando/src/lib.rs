//! Seed generation engine for the dual-game randomizer: assumed fill,
//! playthrough simulation, plando, validation, hints, and batch statistics.

pub mod fill;
pub mod hints;
pub mod plando;
pub mod playthrough;
pub mod randomize;
pub mod spoiler_log;
pub mod stats;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use twinrando_game::{LocationId, WorldId};

/// A location addressed across the whole session: (owning world, location).
pub type LocationRef = (WorldId, LocationId);

/// The two failure kinds a generation attempt distinguishes. Configuration
/// errors name the offending entries and are surfaced to the user without a
/// retry; unsatisfiable attempts may be retried with a fresh seed by the
/// outer loop.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("unsatisfiable generation: {0}")]
    Unsatisfiable(String),
    #[error("generation cancelled")]
    Cancelled,
}

/// Cooperative cancellation flag, checked between fill iterations and
/// orchestration stages. Cloning shares the underlying flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
