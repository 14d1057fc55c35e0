//! Thread-shared balances.
//!
//! [`Ledger`] itself is a plain value. Callers settling from several threads
//! share a [`SharedLedger`], which serializes every update behind a mutex.

use std::sync::Arc;

use gwt_core::types::{BalanceDelta, Ledger};
use parking_lot::Mutex;

#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new(initial: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    pub fn apply(&self, delta: &BalanceDelta) {
        self.inner.lock().apply(delta);
    }

    /// Copy of the current balances.
    pub fn snapshot(&self) -> Ledger {
        *self.inner.lock()
    }
}
