#[cfg(test)]
#[path = "file_pipeline_test.rs"]
mod tests;

use std::collections::HashMap;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Event;
use crate::domain::models::FileRecord;
use crate::domain::models::FileStatus;

/// Simulates upload and processing for attached files. Each file gets its own
/// task walking the status lifecycle on fixed delays, reporting every stage
/// back to the UI through the event channel. Handles are retained per file id
/// so a removed file's task is aborted instead of firing into the void.
pub struct FilePipeline {
    upload_delay: time::Duration,
    processing_delay: time::Duration,
    tasks: HashMap<String, JoinHandle<Result<()>>>,
}

impl FilePipeline {
    pub fn new(upload_delay: time::Duration, processing_delay: time::Duration) -> FilePipeline {
        return FilePipeline {
            upload_delay,
            processing_delay,
            tasks: HashMap::new(),
        };
    }

    pub fn from_config() -> Result<FilePipeline> {
        let upload_ms = Config::get(ConfigKey::FileUploadDelay).parse::<u64>()?;
        let processing_ms = Config::get(ConfigKey::FileProcessingDelay).parse::<u64>()?;

        return Ok(FilePipeline::new(
            time::Duration::from_millis(upload_ms),
            time::Duration::from_millis(processing_ms),
        ));
    }

    pub fn process(&mut self, files: &[FileRecord], tx: &mpsc::UnboundedSender<Event>) {
        for file in files {
            tracing::debug!(id = %file.id, name = %file.name, "starting simulated pipeline");
            let handle = self.spawn_stages(file.clone(), tx.clone());
            self.tasks.insert(file.id.clone(), handle);
        }
    }

    pub fn cancel(&mut self, id: &str) {
        if let Some(task) = self.tasks.remove(id) {
            task.abort();
            tracing::debug!(id, "cancelled pipeline task");
        }
    }

    pub fn cancel_all(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }

    fn spawn_stages(
        &self,
        file: FileRecord,
        tx: mpsc::UnboundedSender<Event>,
    ) -> JoinHandle<Result<()>> {
        let upload_delay = self.upload_delay;
        let processing_delay = self.processing_delay;

        return tokio::spawn(async move {
            time::sleep(upload_delay).await;

            if !file.is_accepted() {
                tracing::warn!(id = %file.id, name = %file.name, "file type is not supported");
                tx.send(Event::FileStatusChanged(file.id.clone(), FileStatus::Error))?;
                tx.send(Event::FileFailed {
                    id: file.id.clone(),
                    name: file.name.clone(),
                })?;
                return Ok(());
            }

            tx.send(Event::FileStatusChanged(
                file.id.clone(),
                FileStatus::Processing,
            ))?;

            time::sleep(processing_delay).await;
            tx.send(Event::FileStatusChanged(
                file.id.clone(),
                FileStatus::Complete,
            ))?;
            tx.send(Event::FileProcessed {
                id: file.id.clone(),
                name: file.name.clone(),
            })?;
            tracing::debug!(id = %file.id, "file processed");

            return Ok(());
        });
    }
}
