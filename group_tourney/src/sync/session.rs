//! Per-session outbound path.
//!
//! Snapshots and replies travel separately. Snapshots go through a
//! [`watch`] slot that only ever holds the newest one, so a slow session
//! skips intermediate states but can never be left on an old one. Replies
//! (`adminStatus`, `errorMsg`) go through a bounded mpsc queue.

use super::messages::ServerEvent;
use crate::state::Snapshot;
use std::sync::Arc;
use tokio::sync::{
    mpsc::{self, error::TryRecvError, error::TrySendError},
    watch,
};

/// Create the two halves of a session's outbound path.
///
/// `reply_capacity` bounds the reply queue; snapshots never queue.
pub fn session_channel(reply_capacity: usize) -> (SessionSender, SessionReceiver) {
    let (state_tx, state_rx) = watch::channel(None);
    let (reply_tx, reply_rx) = mpsc::channel(reply_capacity.max(1));

    (
        SessionSender {
            state: state_tx,
            replies: reply_tx,
        },
        SessionReceiver {
            state: state_rx,
            replies: reply_rx,
        },
    )
}

/// Actor side of a session
#[derive(Debug)]
pub struct SessionSender {
    state: watch::Sender<Option<Arc<Snapshot>>>,
    replies: mpsc::Sender<ServerEvent>,
}

impl SessionSender {
    /// Replace the session's pending snapshot.
    ///
    /// Returns `false` once the receiving half is gone.
    pub fn publish(&self, snapshot: Arc<Snapshot>) -> bool {
        self.state.send(Some(snapshot)).is_ok()
    }

    /// Queue a reply without waiting.
    pub fn reply(&self, event: ServerEvent) -> Result<(), TrySendError<ServerEvent>> {
        self.replies.try_send(event)
    }

    /// Extra producer for replies raised outside the actor, such as rate
    /// limit notices.
    pub fn notices(&self) -> mpsc::Sender<ServerEvent> {
        self.replies.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }
}

/// Connection side of a session
#[derive(Debug)]
pub struct SessionReceiver {
    state: watch::Receiver<Option<Arc<Snapshot>>>,
    replies: mpsc::Receiver<ServerEvent>,
}

impl SessionReceiver {
    /// Next outbound event. Pending replies go first.
    ///
    /// Returns `None` once the actor has dropped the session.
    pub async fn recv(&mut self) -> Option<ServerEvent> {
        loop {
            tokio::select! {
                biased;
                Some(event) = self.replies.recv() => return Some(event),
                Ok(()) = self.state.changed() => {
                    if let Some(snapshot) = self.take_snapshot() {
                        return Some(ServerEvent::State(snapshot));
                    }
                }
                else => return None,
            }
        }
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Result<ServerEvent, TryRecvError> {
        let replies_closed = match self.replies.try_recv() {
            Ok(event) => return Ok(event),
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => true,
        };

        match self.state.has_changed() {
            Ok(true) => match self.take_snapshot() {
                Some(snapshot) => Ok(ServerEvent::State(snapshot)),
                None => Err(TryRecvError::Empty),
            },
            Ok(false) if !replies_closed => Err(TryRecvError::Empty),
            _ => Err(TryRecvError::Disconnected),
        }
    }

    fn take_snapshot(&mut self) -> Option<Arc<Snapshot>> {
        Option::clone(&self.state.borrow_and_update())
    }
}
