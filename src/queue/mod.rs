//! Post-upload job queue for files-manager.
//!
//! Producers hold a [`Dispatcher`] and hand off [`Job`]s without waiting on
//! them. A single [`Worker`] drains the matching [`JobReceiver`] and runs
//! each job through a [`JobHandler`].

mod thumbnail;
mod worker;

pub use thumbnail::{render_thumbnails, THUMBNAIL_WIDTHS};
pub use worker::{JobHandler, PostUploadHandler, Worker};

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};
use uuid::Uuid;

/// A unit of background work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// Render size variants of an uploaded image.
    Thumbnail {
        /// Owner of the file.
        user_id: Uuid,
        /// The image entry.
        file_id: Uuid,
    },
    /// Greet a newly registered user.
    Welcome {
        /// The new user.
        user_id: Uuid,
    },
}

impl Job {
    /// Name of the queue this job belongs to.
    pub fn queue_name(&self) -> &'static str {
        match self {
            Job::Thumbnail { .. } => "fileQueue",
            Job::Welcome { .. } => "userQueue",
        }
    }
}

/// Sending half of the job queue.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<Job>,
}

impl Dispatcher {
    /// Hand off a job without waiting for it to run.
    ///
    /// Enqueue is best-effort: a full or closed queue is logged and the job
    /// is dropped. Returns whether the job was accepted.
    pub fn enqueue(&self, job: Job) -> bool {
        let queue = job.queue_name();
        match self.tx.try_send(job) {
            Ok(()) => {
                debug!(queue, "job enqueued");
                true
            }
            Err(TrySendError::Full(job)) => {
                warn!(queue, ?job, "job queue full, dropping job");
                false
            }
            Err(TrySendError::Closed(job)) => {
                warn!(queue, ?job, "job queue closed, dropping job");
                false
            }
        }
    }
}

/// Receiving half of the job queue.
#[derive(Debug)]
pub struct JobReceiver {
    rx: mpsc::Receiver<Job>,
}

impl JobReceiver {
    /// Wait for the next job. Returns `None` once every dispatcher is gone.
    pub async fn recv(&mut self) -> Option<Job> {
        self.rx.recv().await
    }

    /// Take a job if one is waiting.
    pub fn try_recv(&mut self) -> Option<Job> {
        self.rx.try_recv().ok()
    }
}

/// Create a bounded job queue holding up to `capacity` pending jobs.
pub fn channel(capacity: usize) -> (Dispatcher, JobReceiver) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (Dispatcher { tx }, JobReceiver { rx })
}
