// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! One-shot song loading.
//!
//! The fetch runs on the tokio runtime while the UI keeps drawing its
//! loading screen. The result comes back as a [`Message`] through a
//! channel owned by the UI. Once the [`LoadTask`] is dropped the task is
//! aborted and any late result is discarded.

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};
use tokio::task::JoinHandle;

use crate::quiz::Message;
use crate::repository::SongRepository;

/// Handle to the running fetch and the receiving end of its result
pub struct LoadTask {
    receiver: UnboundedReceiver<Message>,
    handle: JoinHandle<()>,
    delivered: bool,
}

/// Start fetching songs from `repository` on `runtime`
pub fn spawn_load<R: SongRepository>(runtime: &Handle, repository: R) -> LoadTask {
    let (sender, receiver) = mpsc::unbounded_channel();

    let handle = runtime.spawn(async move {
        tracing::info!("Loading songs");
        let songs = repository.fetch_all_songs().await;

        if sender.send(Message::SongsLoaded(songs)).is_err() {
            tracing::debug!("Quiz closed before songs arrived, dropping result");
        }
    });

    LoadTask {
        receiver,
        handle,
        delivered: false,
    }
}

impl LoadTask {
    /// Take the loaded message if it has arrived
    pub fn poll_message(&mut self) -> Option<Message> {
        if self.delivered {
            return None;
        }

        match self.receiver.try_recv() {
            Ok(message) => {
                self.delivered = true;
                Some(message)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // The task ended without sending, e.g. it panicked.
                tracing::error!("Song loader stopped without a result");
                self.delivered = true;
                None
            }
        }
    }

    /// Wait for the loaded message
    pub async fn recv(&mut self) -> Option<Message> {
        if self.delivered {
            return None;
        }
        self.delivered = true;
        self.receiver.recv().await
    }

    /// Whether the result has been taken or the loader is gone
    pub fn is_finished(&self) -> bool {
        self.delivered
    }
}

impl Drop for LoadTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
