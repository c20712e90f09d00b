//! Executor trait for running batches of independent work.
//!
//! Font downloads and name-table parsing are independent per file, so the
//! commands hand them to an executor instead of picking a threading model.

use std::fmt::Debug;

/// Runs a batch of work items, potentially in parallel.
///
/// Results always come back in input order.
pub trait Executor: Send + Sync + Debug {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static;

    /// 1 for sequential executors, the worker count otherwise.
    fn parallelism(&self) -> usize;

    fn name(&self) -> &'static str;
}

/// Processes items one after another on the calling thread.
#[derive(Debug, Clone, Default)]
pub struct SyncExecutor;

impl SyncExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl Executor for SyncExecutor {
    fn execute_all<T, R, F>(&self, items: Vec<T>, f: F) -> Vec<R>
    where
        T: Send + 'static,
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + Clone + 'static,
    {
        items.into_iter().map(f).collect()
    }

    fn parallelism(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "SyncExecutor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_executor_keeps_order() {
        let executor = SyncExecutor::new();
        let results = executor.execute_all(vec!["a.ttf", "b.otf", "c.woff"], |name| name.len());
        assert_eq!(results, vec![5, 5, 6]);
    }

    #[test]
    fn test_sync_executor_collects_failures() {
        let executor = SyncExecutor::new();
        let results: Vec<Result<u32, String>> = executor.execute_all(vec![1, 0, 3], |x| {
            if x == 0 { Err("empty file".to_string()) } else { Ok(x) }
        });
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_sync_executor_empty_input() {
        let executor = SyncExecutor::new();
        let results = executor.execute_all(Vec::<u8>::new(), |x| x);
        assert!(results.is_empty());
        assert_eq!(executor.parallelism(), 1);
        assert_eq!(executor.name(), "SyncExecutor");
    }
}
