//! Identifier sources backing every operation id.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

/// Failure raised by an [`IdentifierSource`].
#[derive(Debug, Clone, Error)]
#[error("identifier source failed: {0}")]
pub struct SourceError(pub String);

/// Produces a fresh opaque identifier on every call.
///
/// Two calls are not guaranteed distinct, but collisions must be negligible
/// for interactive use.
pub trait IdentifierSource: Send + Sync {
    fn generate(&self) -> Result<String, SourceError>;
}

/// Uniform `f64` in `[0, 1)` rendered as a decimal string, e.g. `"0.7264..."`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSource;

impl IdentifierSource for RandomSource {
    fn generate(&self) -> Result<String, SourceError> {
        let value: f64 = rand::rng().random();
        Ok(value.to_string())
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl IdentifierSource for UuidSource {
    fn generate(&self) -> Result<String, SourceError> {
        Ok(Uuid::new_v4().to_string())
    }
}

/// Monotonic counter rendered as `op-<n>`, starting at `op-1`.
///
/// Deterministic, which makes it the source of choice in tests.
#[derive(Debug, Default)]
pub struct CounterSource {
    next: AtomicU64,
}

impl CounterSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identifiers handed out so far.
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl IdentifierSource for CounterSource {
    fn generate(&self) -> Result<String, SourceError> {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("op-{n}"))
    }
}
