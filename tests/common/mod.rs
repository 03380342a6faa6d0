//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use loggingkit::Subscription;

/// Serializes tests that install into the process-wide logging system.
static GLOBAL_FACADE: Mutex<()> = Mutex::new(());

pub fn global_lock() -> MutexGuard<'static, ()> {
    GLOBAL_FACADE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Unique path in the temp directory; the file is not created.
pub fn temp_log_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("loggingkit-{}-{}.log", name, uuid::Uuid::new_v4()))
}

/// Everything queued on `subscription` right now.
pub fn drain<S>(subscription: &mut Subscription<S>) -> Vec<S> {
    std::iter::from_fn(|| subscription.try_next()).collect()
}
