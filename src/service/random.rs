//! Injectable source of randomness.

use std::{ops::Deref, sync::Arc};

use rand::Rng;

/// Picks indices into a collection.
///
/// The welcome handler draws through this trait so that tests can pin the
/// chosen greeting.
pub trait GenericRandom: Send + Sync + 'static {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick_index(&self, len: usize) -> usize;
}

/// Random source for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct RandomClient {
    inner: Arc<dyn GenericRandom>,
}

impl Deref for RandomClient {
    type Target = dyn GenericRandom;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl RandomClient {
    pub fn new(inner: Arc<dyn GenericRandom>) -> Self {
        Self { inner }
    }

    /// Uniform selection backed by the thread-local generator.
    pub fn thread() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

struct ThreadRandom;

impl GenericRandom for ThreadRandom {
    fn pick_index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}
