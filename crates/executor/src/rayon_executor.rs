//! Rayon-based parallel executor.

use fonty_traits::Executor;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::sync::Arc;

/// A parallel executor backed by rayon.
///
/// `new()` uses rayon's global pool; `with_threads()` builds a dedicated pool
/// so the download worker count from the config is honoured.
#[derive(Debug, Clone)]
pub struct RayonExecutor {
    pool: Option<Arc<ThreadPool>>,
    num_threads: usize,
}

impl RayonExecutor {
    pub fn new() -> Self {
        Self {
            pool: None,
            num_threads: rayon::current_num_threads(),
        }
    }

    pub fn with_threads(num_threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("fonty-worker-{}", i))
            .build()?;
        Ok(Self {
            num_threads: pool.current_num_threads(),
            pool: Some(Arc::new(pool)),
        })
    }
}

impl Default for RayonExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for RayonExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        match &self.pool {
            Some(pool) => pool.install(|| items.into_par_iter().map(f).collect()),
            None => items.into_par_iter().map(f).collect(),
        }
    }

    fn parallelism(&self) -> usize {
        self.num_threads
    }

    fn name(&self) -> &'static str {
        "RayonExecutor"
    }
}
