//! Index lifecycle state machine.
//!
//! ```text
//! Empty → Building → Ready → (Destroying → Empty | Building)
//! ```
//!
//! One exclusive lock serialises builds and destroys. A readers-writer
//! gate lets many queries run against a `Ready` index while a build or
//! destroy waits for in-flight queries to drain. Queries arriving while
//! the slot is not `Ready` are rejected, never queued.

use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::error::{DocRagError, Result};
use crate::core::storage::VectorIndex;
use crate::core::types::IndexStatus;

#[derive(Debug)]
struct Slot {
    status: IndexStatus,
    index: Option<Arc<VectorIndex>>,
}

/// Single-slot owner of the active index
#[derive(Debug)]
pub struct IndexLifecycle {
    exclusive: Mutex<()>,
    slot: Mutex<Slot>,
    gate: RwLock<()>,
}

impl Default for IndexLifecycle {
    fn default() -> Self {
        Self::new(None)
    }
}

impl IndexLifecycle {
    /// Start `Ready` with a loaded index, or `Empty`
    pub fn new(index: Option<VectorIndex>) -> Self {
        let slot = match index {
            Some(index) => Slot {
                status: IndexStatus::Ready,
                index: Some(Arc::new(index)),
            },
            None => Slot {
                status: IndexStatus::Empty,
                index: None,
            },
        };

        Self {
            exclusive: Mutex::new(()),
            slot: Mutex::new(slot),
            gate: RwLock::new(()),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set(&self, status: IndexStatus, index: Option<Arc<VectorIndex>>) {
        let mut slot = self.slot();
        tracing::info!("Index state: {} -> {}", slot.status, status);
        slot.status = status;
        slot.index = index;
    }

    pub fn status(&self) -> IndexStatus {
        self.slot().status
    }

    /// Snapshot of the active index, if `Ready`
    pub fn current(&self) -> Option<Arc<VectorIndex>> {
        let slot = self.slot();
        match slot.status {
            IndexStatus::Ready => slot.index.clone(),
            _ => None,
        }
    }

    /// Enter the read side for one query.
    ///
    /// # Errors
    ///
    /// - [`DocRagError::IndexBuilding`] while a build runs
    /// - [`DocRagError::IndexNotReady`] when empty or being destroyed
    pub fn read(&self) -> Result<ReadGuard<'_>> {
        let slot = self.slot();
        let index = match (slot.status, &slot.index) {
            (IndexStatus::Ready, Some(index)) => Arc::clone(index),
            (IndexStatus::Building, _) => {
                return Err(DocRagError::IndexBuilding(
                    "a document is being ingested, try again shortly".to_string(),
                ))
            }
            (IndexStatus::Destroying, _) => {
                return Err(DocRagError::IndexNotReady(
                    "the collection is being deleted".to_string(),
                ))
            }
            _ => {
                return Err(DocRagError::IndexNotReady(
                    "no document has been ingested".to_string(),
                ))
            }
        };

        // Taken under the slot lock: a writer flips the status before
        // waiting on the gate, so this never blocks.
        let gate = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        drop(slot);

        Ok(ReadGuard { index, _gate: gate })
    }

    /// Start a build; waits for any other build or destroy and for
    /// in-flight queries. The slot is `Building` until the guard is
    /// committed or dropped.
    pub fn begin_build(&self) -> BuildGuard<'_> {
        let exclusive = self.exclusive.lock().unwrap_or_else(PoisonError::into_inner);
        self.set(IndexStatus::Building, None);
        let gate = self.gate.write().unwrap_or_else(PoisonError::into_inner);

        BuildGuard {
            lifecycle: self,
            committed: false,
            _gate: gate,
            _exclusive: exclusive,
        }
    }

    /// Start a destroy; the slot is `Empty` when the guard drops
    pub fn begin_destroy(&self) -> DestroyGuard<'_> {
        let exclusive = self.exclusive.lock().unwrap_or_else(PoisonError::into_inner);
        self.set(IndexStatus::Destroying, None);
        let gate = self.gate.write().unwrap_or_else(PoisonError::into_inner);

        DestroyGuard {
            lifecycle: self,
            _gate: gate,
            _exclusive: exclusive,
        }
    }
}

/// Shared access to the `Ready` index for one query
pub struct ReadGuard<'a> {
    index: Arc<VectorIndex>,
    _gate: RwLockReadGuard<'a, ()>,
}

impl Deref for ReadGuard<'_> {
    type Target = VectorIndex;

    fn deref(&self) -> &VectorIndex {
        &self.index
    }
}

/// Exclusive build in progress
pub struct BuildGuard<'a> {
    lifecycle: &'a IndexLifecycle,
    committed: bool,
    _gate: RwLockWriteGuard<'a, ()>,
    _exclusive: MutexGuard<'a, ()>,
}

impl BuildGuard<'_> {
    /// Publish the built index and move to `Ready`
    pub fn commit(mut self, index: VectorIndex) -> Arc<VectorIndex> {
        let index = Arc::new(index);
        self.lifecycle
            .set(IndexStatus::Ready, Some(Arc::clone(&index)));
        self.committed = true;
        index
    }
}

impl Drop for BuildGuard<'_> {
    fn drop(&mut self) {
        // Error or panic mid-build: never leave a half-built Ready
        if !self.committed {
            self.lifecycle.set(IndexStatus::Empty, None);
        }
    }
}

/// Exclusive destroy in progress
pub struct DestroyGuard<'a> {
    lifecycle: &'a IndexLifecycle,
    _gate: RwLockWriteGuard<'a, ()>,
    _exclusive: MutexGuard<'a, ()>,
}

impl Drop for DestroyGuard<'_> {
    fn drop(&mut self) {
        self.lifecycle.set(IndexStatus::Empty, None);
    }
}
