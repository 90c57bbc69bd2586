//! # semanticid-testing
//!
//! Deterministic id providers and fixtures for tests that create or parse
//! semantic IDs.
//!
//! - [`FixedProvider`] always generates the same id
//! - [`SequenceProvider`] generates `prefix000001`, `prefix000002`, ...
//! - [`FailingProvider`] fails every call
//! - [`CountingProvider`] wraps another provider and counts `generate` calls
//! - [`ConfigGuard`] serializes tests that touch the process-wide
//!   configuration and restores the defaults afterwards

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use semanticid::{config, IdProvider, ProviderError};

/// Generates one fixed id and accepts only that id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedProvider {
    id: String,
}

impl FixedProvider {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl IdProvider for FixedProvider {
    fn generate(&self) -> Result<String, ProviderError> {
        Ok(self.id.clone())
    }

    fn validate(&self, id: &str) -> Result<(), ProviderError> {
        if id == self.id {
            Ok(())
        } else {
            Err(ProviderError::new(format!(
                "expected '{}', got '{id}'",
                self.id
            )))
        }
    }
}

/// Generates `{prefix}{n:06}` with `n` counting up from 1.
#[derive(Debug)]
pub struct SequenceProvider {
    prefix: String,
    next: AtomicU64,
}

impl SequenceProvider {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdProvider for SequenceProvider {
    fn generate(&self) -> Result<String, ProviderError> {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        Ok(format!("{}{n:06}", self.prefix))
    }

    fn validate(&self, id: &str) -> Result<(), ProviderError> {
        let digits = id
            .strip_prefix(self.prefix.as_str())
            .ok_or_else(|| ProviderError::new(format!("missing prefix '{}'", self.prefix)))?;

        if digits.len() >= 6 && digits.bytes().all(|b| b.is_ascii_digit()) {
            Ok(())
        } else {
            Err(ProviderError::new(format!("invalid sequence number '{digits}'")))
        }
    }
}

/// Fails every call with the given message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailingProvider {
    message: String,
}

impl FailingProvider {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IdProvider for FailingProvider {
    fn generate(&self) -> Result<String, ProviderError> {
        Err(ProviderError::new(self.message.clone()))
    }

    fn validate(&self, _id: &str) -> Result<(), ProviderError> {
        Err(ProviderError::new(self.message.clone()))
    }
}

/// Wraps a provider and counts how often `generate` was called.
///
/// Clones share the counter, so a clone can be handed to a config while the
/// test keeps the original.
#[derive(Debug)]
pub struct CountingProvider<P> {
    inner: Arc<P>,
    generated: Arc<AtomicUsize>,
}

impl<P: IdProvider> CountingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner: Arc::new(inner),
            generated: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `generate` calls so far.
    pub fn generated(&self) -> usize {
        self.generated.load(Ordering::SeqCst)
    }
}

impl<P> Clone for CountingProvider<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            generated: Arc::clone(&self.generated),
        }
    }
}

impl<P: IdProvider> IdProvider for CountingProvider<P> {
    fn generate(&self) -> Result<String, ProviderError> {
        self.generated.fetch_add(1, Ordering::SeqCst);
        self.inner.generate()
    }

    fn validate(&self, id: &str) -> Result<(), ProviderError> {
        self.inner.validate(id)
    }
}

static CONFIG_LOCK: Mutex<()> = Mutex::new(());

/// Exclusive access to the process-wide configuration for one test.
///
/// Resets the configuration when acquired and again when dropped.
pub struct ConfigGuard {
    _lock: MutexGuard<'static, ()>,
}

impl ConfigGuard {
    pub fn acquire() -> Self {
        // Poisoned by an earlier failing test; the reset clears its state.
        let lock = CONFIG_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        config::reset();
        Self { _lock: lock }
    }
}

impl Drop for ConfigGuard {
    fn drop(&mut self) {
        config::reset();
    }
}
