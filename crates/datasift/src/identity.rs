//! Dataset identity generation.
//!
//! Every analysis assigns a fresh identifier. The source of identifiers is a
//! capability handed to the analyzer, so tests and replays can use a
//! deterministic sequence instead of random UUIDs.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Produces a new unique identifier on every call.
pub trait IdGenerator: Debug + Send + Sync {
    fn next_id(&self) -> String;
}

/// Random version-4 UUIDs. The default generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// `<prefix>-1`, `<prefix>-2`, ... in call order.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new("dataset")
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}

static_assertions::assert_impl_all!(UuidGenerator: Send, Sync);
static_assertions::assert_impl_all!(SequentialIdGenerator: Send, Sync);
