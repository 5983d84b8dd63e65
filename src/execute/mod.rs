// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Execution contexts deciding how a writer receives its lines.
//!
//! A [`ExecutionContext::Locked`] context delivers on the calling thread under a reentrant
//! lock; [`ExecutionContext::Queued`] hands the delivery to a background worker and returns
//! immediately.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::AtomicUsize;
//! use std::sync::atomic::Ordering;
//!
//! use logfan::execute::ExecutionContext;
//!
//! let counter = Arc::new(AtomicUsize::new(0));
//! let queued = ExecutionContext::queued("logfan-doc");
//! for _ in 0..3 {
//!     let counter = counter.clone();
//!     queued.execute(move || {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     })
//!     .unwrap();
//! }
//! queued.flush().unwrap();
//! assert_eq!(counter.load(Ordering::SeqCst), 3);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::ReentrantMutex;

use crate::Error;

pub use self::queue::Queue;

mod queue;

/// A unit of delivery work.
pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

/// Decides where and when a delivery job runs.
///
/// Cloning a context shares it: clones of a locked context share the lock, clones of a queued
/// context feed the same worker in FIFO order.
#[derive(Clone)]
pub enum ExecutionContext {
    /// Run the job on the calling thread while holding a reentrant lock.
    Locked(Arc<ReentrantMutex<()>>),
    /// Submit the job to a background worker and return immediately.
    Queued(Queue),
}

impl ExecutionContext {
    /// Create a locked context with a fresh lock.
    pub fn locked() -> Self {
        ExecutionContext::Locked(Arc::new(ReentrantMutex::new(())))
    }

    /// Create a queued context backed by a new worker thread named `label`.
    ///
    /// Callers running on the worker see `label` as their queue label.
    pub fn queued(label: impl Into<String>) -> Self {
        ExecutionContext::Queued(Queue::new(label))
    }

    /// Run `job` according to this context.
    ///
    /// A locked context returns after the job completes and releases the lock even if the job
    /// panics. A queued context returns once the job is enqueued.
    ///
    /// # Errors
    ///
    /// Return an error if the worker of a queued context is gone.
    pub fn execute<F>(&self, job: F) -> Result<(), Error>
    where
        F: FnOnce() + Send + 'static,
    {
        match self {
            ExecutionContext::Locked(lock) => {
                let _guard = lock.lock();
                job();
                Ok(())
            }
            ExecutionContext::Queued(queue) => queue.submit(Box::new(job)),
        }
    }

    /// Wait until every job submitted so far has run.
    ///
    /// A no-op for locked contexts, whose jobs have run by the time `execute` returns.
    pub fn flush(&self) -> Result<(), Error> {
        match self {
            ExecutionContext::Locked(_) => Ok(()),
            ExecutionContext::Queued(queue) => queue.flush(),
        }
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::locked()
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionContext::Locked(_) => f.write_str("Locked"),
            ExecutionContext::Queued(queue) => f.debug_tuple("Queued").field(queue).finish(),
        }
    }
}
