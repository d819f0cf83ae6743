//! Single-slot frame cell with atomic replacement.
//!
//! Each channel owns one cell; a write swaps the stored `Arc<Frame>` in one
//! step, so readers can never see a partially written buffer. The cell is a
//! `tokio::sync::watch` sender used as a last-value store - the bounded
//! single-slot channel shape the callback delivery model calls for.

use std::sync::Arc;

use contracts::Frame;
use tokio::sync::watch;

pub(crate) struct FrameSlot {
    cell: watch::Sender<Option<Arc<Frame>>>,
}

impl FrameSlot {
    pub(crate) fn new() -> Self {
        let (cell, _rx) = watch::channel(None);
        Self { cell }
    }

    /// Replace the stored frame. Never blocks; succeeds with or without
    /// readers attached.
    #[inline]
    pub(crate) fn store(&self, frame: Frame) {
        self.cell.send_replace(Some(Arc::new(frame)));
    }

    /// Clone out the current frame, if any. Never blocks.
    #[inline]
    pub(crate) fn load(&self) -> Option<Arc<Frame>> {
        self.cell.borrow().clone()
    }

    /// Empty the slot.
    #[inline]
    pub(crate) fn clear(&self) {
        self.cell.send_replace(None);
    }
}
