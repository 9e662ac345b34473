//! Sequential or thread-pool execution of per-sentence work
//!
//! The executor is handed to whatever needs to map over sentences instead of
//! living in a global, so tests and library callers choose their own
//! parallelism.

use anyhow::Result;
use rayon::prelude::*;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Executor {
    #[default]
    Sequential,
    Parallel { workers: usize },
}

impl Executor {
    /// One worker runs inline; anything more gets a dedicated rayon pool.
    pub fn from_workers(workers: usize) -> Self {
        if workers <= 1 {
            Executor::Sequential
        } else {
            Executor::Parallel { workers }
        }
    }

    pub fn workers(&self) -> usize {
        match self {
            Executor::Sequential => 1,
            Executor::Parallel { workers } => *workers,
        }
    }

    /// Apply `f` to every item, keeping input order.
    pub fn map<T, R, F>(&self, items: &[T], f: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        match self {
            Executor::Sequential => Ok(items.iter().map(f).collect()),
            Executor::Parallel { workers } => {
                debug!("Mapping {} items on {} workers", items.len(), workers);
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(*workers)
                    .build()?;
                Ok(pool.install(|| items.par_iter().map(f).collect()))
            }
        }
    }

    /// Like `map` for fallible work; the first error in input order wins.
    pub fn try_map<T, R, E, F>(&self, items: &[T], f: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        E: Send + Into<anyhow::Error>,
        F: Fn(&T) -> std::result::Result<R, E> + Sync + Send,
    {
        self.map(items, f)?
            .into_iter()
            .map(|r| r.map_err(Into::into))
            .collect()
    }
}
