//! Recent message tracking.
//!
//! Discord delete events only carry IDs, so the state of each message is captured
//! when it arrives (and refreshed when it is edited). On deletion the stored
//! snapshot is handed over to the ghost ping check and forgotten.
//!
//! Serenity dispatches every gateway event on its own task, so a delete can be
//! processed before the create for the same message has been recorded. A delete
//! for an unknown message therefore leaves a tombstone; when the late create
//! shows up, [`MessageTracker::record`] hands its snapshot straight back as
//! already deleted instead of storing it.

use crate::core::ghost_ping::{DeletedMessageSnapshot, MentionSet};
use lru::LruCache;
use std::{num::NonZeroUsize, sync::Mutex};

/// Deletes of unseen messages remembered while waiting for a late create
pub const MAX_TOMBSTONES: usize = 256;

#[derive(Debug)]
struct TrackerState {
    messages: LruCache<u64, DeletedMessageSnapshot>,
    tombstones: LruCache<u64, ()>,
}

/// Bounded store of the latest known state of recent messages, keyed by message ID.
///
/// The least recently seen message is evicted once capacity is reached.
#[derive(Debug)]
pub struct MessageTracker {
    state: Mutex<TrackerState>,
}

impl MessageTracker {
    /// Creates a tracker holding at most `capacity` messages (minimum 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        let tombstones = NonZeroUsize::new(MAX_TOMBSTONES).unwrap_or(NonZeroUsize::MIN);
        Self {
            state: Mutex::new(TrackerState {
                messages: LruCache::new(capacity),
                tombstones: LruCache::new(tombstones),
            }),
        }
    }

    /// Remembers a newly posted message.
    ///
    /// Returns the snapshot back if its deletion was already seen; the caller
    /// should treat it as deleted.
    pub fn record(&self, snapshot: DeletedMessageSnapshot) -> Option<DeletedMessageSnapshot> {
        let mut state = self.lock();
        if state.tombstones.pop(&snapshot.message_id).is_some() {
            return Some(snapshot);
        }
        state.messages.put(snapshot.message_id, snapshot);
        None
    }

    /// Applies the fields Discord delivered with an edit.
    ///
    /// Fields the edit did not carry keep their previous value. Returns false when
    /// the message is not tracked.
    pub fn apply_edit(
        &self,
        message_id: u64,
        content: Option<String>,
        mentions: Option<MentionSet>,
    ) -> bool {
        let mut state = self.lock();
        let Some(snapshot) = state.messages.get_mut(&message_id) else {
            return false;
        };

        if let Some(content) = content {
            snapshot.content = content;
        }
        if let Some(mentions) = mentions {
            snapshot.mentions = mentions;
        }
        true
    }

    /// Removes and returns the last known state of a deleted message.
    ///
    /// An unknown message is marked deleted so a late [`record`](Self::record)
    /// reports it.
    pub fn take(&self, message_id: u64) -> Option<DeletedMessageSnapshot> {
        let mut state = self.lock();
        let snapshot = state.messages.pop(&message_id);
        if snapshot.is_none() {
            state.tombstones.put(message_id, ());
        }
        snapshot
    }

    /// Number of messages currently tracked.
    pub fn len(&self) -> usize {
        self.lock().messages.len()
    }

    /// Whether nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave a half-written entry behind,
    // so a poisoned lock is still usable.
    fn lock(&self) -> std::sync::MutexGuard<'_, TrackerState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
