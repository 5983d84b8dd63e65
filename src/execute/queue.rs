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

use std::any::Any;
use std::fmt;
use std::panic;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;

use crossbeam_channel::Receiver;
use crossbeam_channel::Sender;

use crate::Error;
use crate::execute::Job;
use crate::record::set_queue_label;

enum Task {
    Run(Job),
    Flush(Sender<()>),
}

/// A background worker running delivery jobs one at a time, in submission order.
///
/// The worker lives as long as any clone of the queue. Dropping the last clone waits for
/// pending jobs to finish.
#[derive(Clone)]
pub struct Queue {
    label: Arc<str>,
    state: Arc<QueueState>,
}

impl Queue {
    pub(crate) fn new(label: impl Into<String>) -> Self {
        let label: Arc<str> = Arc::from(label.into());
        let (sender, receiver) = crossbeam_channel::unbounded();

        let worker = Worker {
            label: label.clone(),
            receiver,
        };
        let handle = thread::Builder::new()
            .name(label.to_string())
            .spawn(move || worker.run())
            .expect("failed to spawn queued execution context thread");

        Queue {
            label,
            state: Arc::new(QueueState(Some(State { sender, handle }))),
        }
    }

    /// The label of this queue, also the name of its worker thread.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn submit(&self, job: Job) -> Result<(), Error> {
        self.state
            .sender()
            .send(Task::Run(job))
            .map_err(|_| self.error("failed to submit job to queued execution context"))
    }

    pub(crate) fn flush(&self) -> Result<(), Error> {
        // jobs may flush their own queue; everything before them has already run
        if self.state.is_worker_thread() {
            return Ok(());
        }

        let (done, wait) = crossbeam_channel::bounded(1);
        self.state
            .sender()
            .send(Task::Flush(done))
            .map_err(|_| self.error("failed to submit flush to queued execution context"))?;
        wait.recv()
            .map_err(|_| self.error("queued execution context stopped before flushing"))
    }

    fn error(&self, message: &'static str) -> Error {
        Error::new(message).with_context("queue", &self.label)
    }
}

impl fmt::Debug for Queue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue").field("label", &self.label).finish()
    }
}

struct QueueState(Option<State>);

struct State {
    sender: Sender<Task>,
    handle: JoinHandle<()>,
}

impl QueueState {
    fn state(&self) -> &State {
        // SAFETY: state is always Some before dropped.
        self.0.as_ref().unwrap()
    }

    fn sender(&self) -> &Sender<Task> {
        &self.state().sender
    }

    fn is_worker_thread(&self) -> bool {
        self.state().handle.thread().id() == thread::current().id()
    }
}

impl Drop for QueueState {
    fn drop(&mut self) {
        // SAFETY: state is always Some before dropped.
        let State { sender, handle } = self.0.take().unwrap();

        // drop our sender, the worker breaks its loop after draining pending jobs
        drop(sender);

        // the last handle can be released by a job running on the worker itself
        if handle.thread().id() == thread::current().id() {
            return;
        }
        if handle.join().is_err() {
            eprintln!("failed to join queued execution context thread");
        }
    }
}

struct Worker {
    label: Arc<str>,
    receiver: Receiver<Task>,
}

impl Worker {
    fn run(self) {
        let Self { label, receiver } = self;
        set_queue_label(&label);

        while let Ok(task) = receiver.recv() {
            match task {
                Task::Run(job) => {
                    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
                        let reason = panic_message(payload.as_ref());
                        eprintln!("delivery job on queue {label} panicked: {reason}");
                    }
                }
                Task::Flush(done) => {
                    let _ = done.send(());
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}
