use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

use crate::id::RecordId;

/// Events emitted by a collection after a change has been committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    Reloaded {
        collection: String,
        count: usize,
    },
    Added {
        collection: String,
        id: RecordId,
    },
    Updated {
        collection: String,
        id: RecordId,
    },
    Removed {
        collection: String,
        ids: Vec<RecordId>,
    },
}

impl StoreEvent {
    /// Name of the collection the event belongs to
    pub fn collection(&self) -> &str {
        match self {
            StoreEvent::Reloaded { collection, .. }
            | StoreEvent::Added { collection, .. }
            | StoreEvent::Updated { collection, .. }
            | StoreEvent::Removed { collection, .. } => collection,
        }
    }
}

/// Fan-out of events to every live subscriber.
#[derive(Debug, Default)]
pub(crate) struct Subscribers {
    senders: Vec<Sender<StoreEvent>>,
}

impl Subscribers {
    pub(crate) fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    /// Send to every subscriber, dropping those whose receiver is gone.
    pub(crate) fn emit(&mut self, event: StoreEvent) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
