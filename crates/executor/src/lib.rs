//! Worker pools for fonty's bulk jobs.
//!
//! `fonty install` downloads and parses every selected font file, and
//! `fonty webfont` converts every input font. Both hand their per-file work to
//! an [`ExecutorImpl`], sized from the `downloadWorkers` setting:
//!
//! - one worker runs the jobs in order on the calling thread
//! - more workers get a dedicated, named rayon pool (feature: `rayon`)
//!
//! Results always come back in input order, so reports list fonts in the
//! order they were requested.

#[cfg(feature = "rayon")]
mod rayon_executor;

#[cfg(feature = "rayon")]
pub use rayon_executor::RayonExecutor;

pub use fonty_traits::{Executor, SyncExecutor};

/// The executor a command context owns.
///
/// `Executor` has generic methods, so commands hold this enum rather than a
/// `Box<dyn Executor>`.
#[derive(Clone, Debug)]
pub enum ExecutorImpl {
    Sequential(SyncExecutor),

    #[cfg(feature = "rayon")]
    Pool(RayonExecutor),
}

impl ExecutorImpl {
    /// Picks an executor for `workers` concurrent jobs; 1 or fewer runs sequentially.
    ///
    /// A pool that cannot be started is not fatal: the jobs then run sequentially.
    pub fn with_workers(workers: usize) -> Self {
        #[cfg(feature = "rayon")]
        {
            if workers > 1 {
                match RayonExecutor::with_threads(workers) {
                    Ok(pool) => return ExecutorImpl::Pool(pool),
                    Err(err) => log::warn!("Falling back to sequential execution: {}", err),
                }
            }
        }
        #[cfg(not(feature = "rayon"))]
        {
            if workers > 1 {
                log::debug!("Built without rayon, ignoring {} workers", workers);
            }
        }
        ExecutorImpl::Sequential(SyncExecutor::new())
    }

    pub fn is_parallel(&self) -> bool {
        self.parallelism() > 1
    }
}

impl Executor for ExecutorImpl {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        match self {
            ExecutorImpl::Sequential(exec) => exec.execute_all(items, f),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Pool(exec) => exec.execute_all(items, f),
        }
    }

    fn parallelism(&self) -> usize {
        match self {
            ExecutorImpl::Sequential(exec) => exec.parallelism(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Pool(exec) => exec.parallelism(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ExecutorImpl::Sequential(exec) => exec.name(),
            #[cfg(feature = "rayon")]
            ExecutorImpl::Pool(exec) => exec.name(),
        }
    }
}

/// Rayon's global pool when available.
impl Default for ExecutorImpl {
    fn default() -> Self {
        #[cfg(feature = "rayon")]
        {
            ExecutorImpl::Pool(RayonExecutor::new())
        }
        #[cfg(not(feature = "rayon"))]
        {
            ExecutorImpl::Sequential(SyncExecutor::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_worker_is_sequential() {
        for workers in [0, 1] {
            let exec = ExecutorImpl::with_workers(workers);
            assert_eq!(exec.name(), "SyncExecutor");
            assert_eq!(exec.parallelism(), 1);
            assert!(!exec.is_parallel());
        }
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_worker_count_sizes_the_pool() {
        let exec = ExecutorImpl::with_workers(3);
        assert!(matches!(exec, ExecutorImpl::Pool(_)));
        assert_eq!(exec.parallelism(), 3);
        assert!(exec.is_parallel());
    }

    #[test]
    fn test_results_come_back_in_request_order() {
        let exec = ExecutorImpl::with_workers(4);
        let urls: Vec<String> = (0..32).map(|i| format!("https://fonts.example.com/{}.ttf", i)).collect();
        let names = exec.execute_all(urls, |url: String| {
            url.rsplit('/').next().unwrap_or_default().to_string()
        });
        assert_eq!(names.len(), 32);
        assert_eq!(names[0], "0.ttf");
        assert_eq!(names[31], "31.ttf");
    }
}
