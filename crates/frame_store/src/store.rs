//! FrameStore - channel-indexed slot map.

use std::fmt;
use std::sync::Arc;

use contracts::{Channel, Frame};
use tracing::trace;

use crate::slot::FrameSlot;

/// Mapping from `Channel` to at most one live `Frame`.
///
/// All slots are pre-allocated because the channel set is closed; no lock
/// spans more than one channel and no structural mutation happens at runtime.
/// Writers are the per-channel sensor callbacks, the reader is the render
/// thread; both sides are non-blocking.
pub struct FrameStore {
    slots: [FrameSlot; Channel::COUNT],
}

impl FrameStore {
    /// Create a store with every slot empty.
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| FrameSlot::new()),
        }
    }

    /// Replace the frame in the channel's slot.
    ///
    /// Atomic with respect to concurrent reads: a reader gets the previous
    /// complete frame or this one, never a mix. Last write wins.
    #[inline]
    pub fn write(&self, frame: Frame) {
        trace!(channel = %frame.channel, timestamp = frame.timestamp, "frame stored");
        self.slots[frame.channel.index()].store(frame);
    }

    /// Latest frame for the channel, or `None` before the first arrival.
    /// Never blocks.
    #[inline]
    pub fn read(&self, channel: Channel) -> Option<Arc<Frame>> {
        self.slots[channel.index()].load()
    }

    /// Timestamp of the channel's current frame, if any.
    pub fn latest_timestamp(&self, channel: Channel) -> Option<f64> {
        self.read(channel).map(|f| f.timestamp)
    }

    /// Channels that currently hold a frame.
    pub fn populated_channels(&self) -> Vec<Channel> {
        Channel::ALL
            .iter()
            .copied()
            .filter(|c| self.read(*c).is_some())
            .collect()
    }

    /// Empty every slot. The store stays valid afterwards; this is the
    /// sensor-detach path.
    pub fn clear(&self) {
        for slot in &self.slots {
            slot.clear();
        }
    }
}

impl Default for FrameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrameStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameStore")
            .field("populated", &self.populated_channels())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    fn solid(channel: Channel, fill: u8, timestamp: f64) -> Frame {
        Frame::solid(channel, 64, 64, [fill, fill, fill], timestamp)
    }

    #[test]
    fn read_before_any_write_is_none() {
        let store = FrameStore::new();
        for channel in Channel::ALL {
            assert!(store.read(channel).is_none());
        }
        assert!(store.populated_channels().is_empty());
    }

    #[test]
    fn last_write_wins() {
        let store = FrameStore::new();
        store.write(solid(Channel::Front, 0x11, 1.0));
        store.write(solid(Channel::Front, 0x22, 2.0));

        let frame = store.read(Channel::Front).unwrap();
        assert_eq!(frame.timestamp, 2.0);
        assert!(frame.pixels.iter().all(|&b| b == 0x22));
    }

    #[test]
    fn channels_are_independent() {
        let store = FrameStore::new();
        store.write(solid(Channel::Front, 0x11, 1.0));
        store.write(solid(Channel::Lidar, 0x22, 1.5));

        assert!(store.read(Channel::Back).is_none());
        assert_eq!(store.read(Channel::Front).unwrap().timestamp, 1.0);
        assert_eq!(store.read(Channel::Lidar).unwrap().timestamp, 1.5);
        assert_eq!(
            store.populated_channels(),
            vec![Channel::Front, Channel::Lidar]
        );
    }

    #[test]
    fn clear_empties_all_slots() {
        let store = FrameStore::new();
        store.write(solid(Channel::Front, 0x11, 1.0));
        store.clear();
        assert!(store.read(Channel::Front).is_none());
    }

    /// Concurrent writer and reader on one channel: every observed frame must
    /// be internally uniform, i.e. no read ever yields a mix of two writes.
    #[test]
    fn concurrent_reads_never_tear() {
        let store = Arc::new(FrameStore::new());
        let stop = Arc::new(AtomicBool::new(false));

        let writer_store = Arc::clone(&store);
        let writer_stop = Arc::clone(&stop);
        let writer = thread::spawn(move || {
            let mut fill = 0u8;
            while !writer_stop.load(Ordering::Relaxed) {
                fill = fill.wrapping_add(1);
                writer_store.write(solid(Channel::Front, fill, fill as f64));
            }
        });

        let mut observed = 0u64;
        while observed < 10_000 {
            if let Some(frame) = store.read(Channel::Front) {
                let first = frame.pixels[0];
                assert!(
                    frame.pixels.iter().all(|&b| b == first),
                    "torn frame observed"
                );
                observed += 1;
            }
        }

        stop.store(true, Ordering::Relaxed);
        writer.join().unwrap();
    }
}
