//! Process-local store implementations backed by `DashMap`.
//!
//! Used by the `memory` provider for local development and by the test
//! suites. Contents are lost when the process exits.

pub mod alert;
pub mod diagnostic;
pub mod user;

use std::sync::atomic::{AtomicU64, Ordering};

pub use alert::MemoryAlertStore;
pub use diagnostic::MemoryDiagnosticTestStore;
pub use user::MemoryUserStore;

/// Monotonic insertion counter used to break `created_at` ties so that
/// newest-first ordering is stable.
#[derive(Debug, Default)]
pub(crate) struct Sequence(AtomicU64);

impl Sequence {
    pub(crate) fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

/// Slice one page out of an already-sorted vector.
pub(crate) fn paginate<T>(items: Vec<T>, offset: u64, limit: u64) -> Vec<T> {
    items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect()
}
