//! Background worker consuming the job queue.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::thumbnail::render_thumbnails;
use super::{Job, JobReceiver};
use crate::db::{FileStore, UserStore};
use crate::file::ContentStore;
use crate::{FilesError, Result};

/// Executes jobs taken off the queue.
#[async_trait]
pub trait JobHandler: Send + Sync + 'static {
    /// Run one job to completion.
    async fn handle(&self, job: &Job) -> Result<()>;
}

/// Drains a [`JobReceiver`], running jobs concurrently up to a limit.
pub struct Worker<H: JobHandler> {
    handler: Arc<H>,
    semaphore: Arc<Semaphore>,
    max_concurrent: u32,
}

impl<H: JobHandler> Worker<H> {
    /// Creates a worker running at most `max_concurrent` jobs at a time.
    pub fn new(handler: H, max_concurrent: usize) -> Self {
        let max_concurrent = u32::try_from(max_concurrent.max(1)).unwrap_or(u32::MAX);
        Self {
            handler: Arc::new(handler),
            semaphore: Arc::new(Semaphore::new(max_concurrent as usize)),
            max_concurrent,
        }
    }

    /// Spawns the worker as a background task.
    pub fn spawn(self, receiver: JobReceiver) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(receiver).await })
    }

    /// Processes jobs until every dispatcher has been dropped, then waits
    /// for in-flight jobs to finish.
    pub async fn run(self, mut receiver: JobReceiver) {
        info!(max_concurrent = self.max_concurrent, "Starting job worker");

        while let Some(job) = receiver.recv().await {
            let permit = match self.semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    error!("Semaphore closed, stopping worker");
                    return;
                }
            };

            let handler = Arc::clone(&self.handler);
            tokio::spawn(async move {
                let _permit = permit;
                let queue = job.queue_name();

                match handler.handle(&job).await {
                    Ok(()) => info!(queue, ?job, "Job completed"),
                    Err(err) => error!(queue, ?job, error = %err, "Job failed"),
                }
            });
        }

        // Every permit back means every spawned job has finished.
        let _ = self.semaphore.acquire_many(self.max_concurrent).await;
        info!("Job queue closed, worker stopped");
    }
}

/// Runs the thumbnail and welcome jobs.
#[derive(Clone)]
pub struct PostUploadHandler {
    users: Arc<dyn UserStore>,
    files: Arc<dyn FileStore>,
    content: ContentStore,
}

impl PostUploadHandler {
    /// Create a handler over the given stores.
    pub fn new(
        users: Arc<dyn UserStore>,
        files: Arc<dyn FileStore>,
        content: ContentStore,
    ) -> Self {
        Self {
            users,
            files,
            content,
        }
    }

    async fn thumbnail(&self, user_id: uuid::Uuid, file_id: uuid::Uuid) -> Result<()> {
        let entry = self
            .files
            .find_owned(file_id, user_id)
            .await?
            .ok_or_else(|| FilesError::Job("File not found".to_string()))?;
        let location = entry
            .local_path
            .ok_or_else(|| FilesError::Job("File has no content".to_string()))?;

        let source = self.content.read(&location).await?;
        let renditions = tokio::task::spawn_blocking(move || render_thumbnails(&source))
            .await
            .map_err(|e| FilesError::Job(format!("thumbnail task failed: {e}")))??;

        for (width, bytes) in renditions {
            let target = ContentStore::variant_location(&location, width);
            self.content.write_at(&target, &bytes).await?;
        }

        info!(file_id = %file_id, "Thumbnails generated");
        Ok(())
    }

    async fn welcome(&self, user_id: uuid::Uuid) -> Result<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| FilesError::Job("User not found".to_string()))?;

        info!(user_id = %user.id, "Welcome {}!", user.email);
        Ok(())
    }
}

#[async_trait]
impl JobHandler for PostUploadHandler {
    async fn handle(&self, job: &Job) -> Result<()> {
        match *job {
            Job::Thumbnail { user_id, file_id } => self.thumbnail(user_id, file_id).await,
            Job::Welcome { user_id } => self.welcome(user_id).await,
        }
    }
}
