use crate::models::{CategoryFilter, Recipe, RecipeFormData};
use crate::repository::FetchTicket;
use crate::store::{RecipeStore, StoreResult};
use anyhow::{Context, Result};
use flume::{Receiver, Sender};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::debug;

/// Completed remote call, handed back to the UI thread
#[derive(Debug)]
pub enum RemoteMessage {
    Fetched {
        ticket: FetchTicket,
        result: StoreResult<Vec<Recipe>>,
    },
    Created(StoreResult<Recipe>),
    Updated {
        id: String,
        result: StoreResult<Recipe>,
    },
    Deleted {
        id: String,
        result: StoreResult<()>,
    },
}

/// Runs store calls on a background runtime so the event loop never blocks.
/// Results come back over a channel and are drained once per tick.
#[derive(Debug)]
pub struct RemoteWorker {
    runtime: Runtime,
    sender: Sender<RemoteMessage>,
    receiver: Receiver<RemoteMessage>,
}

impl RemoteWorker {
    pub fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("recipebox-remote")
            .enable_all()
            .build()
            .context("Failed to start remote runtime")?;
        let (sender, receiver) = flume::unbounded();

        Ok(Self {
            runtime,
            sender,
            receiver,
        })
    }

    pub fn fetch(&self, store: Arc<dyn RecipeStore>, ticket: FetchTicket, category: CategoryFilter) {
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let result = store.list(category.category()).await;
            let _ = sender.send(RemoteMessage::Fetched { ticket, result });
        });
    }

    pub fn create(&self, store: Arc<dyn RecipeStore>, data: RecipeFormData) {
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let result = store.insert(&data).await;
            let _ = sender.send(RemoteMessage::Created(result));
        });
    }

    pub fn update(&self, store: Arc<dyn RecipeStore>, id: String, data: RecipeFormData) {
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let result = store.update(&id, &data).await;
            let _ = sender.send(RemoteMessage::Updated { id, result });
        });
    }

    pub fn delete(&self, store: Arc<dyn RecipeStore>, id: String) {
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let result = store.delete(&id).await;
            let _ = sender.send(RemoteMessage::Deleted { id, result });
        });
    }

    /// Everything that has completed since the last call, without blocking
    pub fn drain(&self) -> Vec<RemoteMessage> {
        let messages: Vec<RemoteMessage> = self.receiver.try_iter().collect();
        if !messages.is_empty() {
            debug!(count = messages.len(), "remote results received");
        }
        messages
    }

    /// Waits for the next completion; used where the caller has nothing else to do
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<RemoteMessage> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use crate::store::MemoryStore;
    use std::time::Duration;

    #[test]
    fn completions_arrive_over_the_channel() {
        let worker = RemoteWorker::new().unwrap();
        let store: Arc<dyn RecipeStore> = Arc::new(MemoryStore::with_samples());

        worker.create(
            Arc::clone(&store),
            RecipeFormData {
                title: "Granola".into(),
                category: Category::Snack,
                ..RecipeFormData::default()
            },
        );

        match worker.recv_timeout(Duration::from_secs(5)) {
            Some(RemoteMessage::Created(Ok(recipe))) => assert_eq!(recipe.title, "Granola"),
            other => panic!("unexpected message: {:?}", other),
        }

        worker.delete(store, "missing".into());
        match worker.recv_timeout(Duration::from_secs(5)) {
            Some(RemoteMessage::Deleted { id, result }) => {
                assert_eq!(id, "missing");
                assert!(result.is_err());
            }
            other => panic!("unexpected message: {:?}", other),
        }
        assert!(worker.drain().is_empty());
    }
}
