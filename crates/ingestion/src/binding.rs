//! Channel binding
//!
//! Connects one `SensorSource` to the shared `FrameStore`: the registered
//! callback projects each payload and replaces the channel's slot. This is
//! the bridge between the sensor collaborator and the view core.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use contracts::{BevConfig, Channel, SensorDataCallback, SensorSource};
use frame_store::FrameStore;
use tracing::{debug, trace, warn};

use crate::metrics::IngestMetrics;
use crate::project;

/// One sensor-to-store attachment.
///
/// The binding owns the source; the source never references the binding, so
/// dropping the binding (or calling `stop`) is always enough to detach. Frame
/// data itself is plain owned value data flowing one way into the store.
pub struct ChannelBinding {
    channel: Channel,
    source: Box<dyn SensorSource>,
    bev: BevConfig,
    listening: Arc<AtomicBool>,
}

impl ChannelBinding {
    /// Create a new binding for the source's channel.
    pub fn new(source: Box<dyn SensorSource>, bev: BevConfig) -> Self {
        Self {
            channel: source.channel(),
            source,
            bev,
            listening: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Channel this binding feeds.
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Start listening; payloads are projected and written into `store`.
    ///
    /// A payload the projector rejects is dropped with a warning - the
    /// channel's previous frame stays in the store and nothing propagates
    /// back across the callback boundary.
    pub fn start(&self, store: Arc<FrameStore>, metrics: Arc<IngestMetrics>) {
        if self.listening.swap(true, Ordering::SeqCst) {
            return;
        }

        let channel = self.channel;
        let bev = self.bev;
        let listening = self.listening.clone();

        debug!(channel = %channel, "starting channel binding");

        let callback: SensorDataCallback = Arc::new(move |payload| {
            if !listening.load(Ordering::Relaxed) {
                return;
            }

            metrics.record_received();
            trace!(channel = %payload.channel, timestamp = payload.timestamp, "payload received");

            match project::project(&payload, &bev) {
                Ok(frame) => {
                    store.write(frame);
                    metrics.record_projected();
                }
                Err(e) => {
                    metrics.record_format_error();
                    warn!(channel = %channel, error = %e, "payload rejected, previous frame kept");
                }
            }
        });

        self.source.listen(callback);
    }

    /// Stop listening and forward the stop to the source.
    pub fn stop(&self) {
        if self.listening.swap(false, Ordering::SeqCst) {
            debug!(channel = %self.channel, "stopping channel binding");
            self.source.stop();
        }
    }

    /// Whether this binding is accepting payloads.
    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Relaxed)
    }

    /// Whether the underlying source still reports listening; used by the
    /// pipeline to detect teardown failures.
    pub(crate) fn source_listening(&self) -> bool {
        self.source.is_listening()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use contracts::{ImageData, PayloadData, PixelFormat, RawPayload};
    use std::sync::Mutex;

    /// Source that delivers whatever payloads the test hands it.
    struct ScriptedSource {
        channel: Channel,
        callback: Mutex<Option<SensorDataCallback>>,
        listening: AtomicBool,
    }

    impl ScriptedSource {
        fn new(channel: Channel) -> Self {
            Self {
                channel,
                callback: Mutex::new(None),
                listening: AtomicBool::new(false),
            }
        }
    }

    impl SensorSource for ScriptedSource {
        fn channel(&self) -> Channel {
            self.channel
        }

        fn listen(&self, callback: SensorDataCallback) {
            if self.listening.swap(true, Ordering::SeqCst) {
                return;
            }
            *self.callback.lock().unwrap() = Some(callback);
        }

        fn stop(&self) {
            self.listening.store(false, Ordering::SeqCst);
        }

        fn is_listening(&self) -> bool {
            self.listening.load(Ordering::Relaxed)
        }
    }

    fn image_payload(channel: Channel, fill: u8, len: usize, timestamp: f64) -> RawPayload {
        RawPayload {
            channel,
            timestamp,
            frame_id: None,
            data: PayloadData::Image(ImageData {
                width: 2,
                height: 2,
                format: PixelFormat::Bgra8,
                data: Bytes::from(vec![fill; len]),
            }),
        }
    }

    #[test]
    fn bad_payload_keeps_previous_frame() {
        let source = Arc::new(ScriptedSource::new(Channel::Front));
        let deliver = Arc::clone(&source);

        struct Fwd(Arc<ScriptedSource>);
        impl SensorSource for Fwd {
            fn channel(&self) -> Channel {
                self.0.channel()
            }
            fn listen(&self, callback: SensorDataCallback) {
                self.0.listen(callback)
            }
            fn stop(&self) {
                self.0.stop()
            }
            fn is_listening(&self) -> bool {
                self.0.is_listening()
            }
        }

        let binding = ChannelBinding::new(Box::new(Fwd(source)), BevConfig::default());
        let store = Arc::new(FrameStore::new());
        let metrics = Arc::new(IngestMetrics::new());

        binding.start(Arc::clone(&store), Arc::clone(&metrics));
        let callback = deliver.callback.lock().unwrap().clone().unwrap();

        // Good payload lands.
        callback(image_payload(Channel::Front, 0x40, 16, 1.0));
        assert_eq!(store.read(Channel::Front).unwrap().timestamp, 1.0);

        // Undersized payload is rejected; the first frame survives.
        callback(image_payload(Channel::Front, 0x50, 3, 2.0));
        let frame = store.read(Channel::Front).unwrap();
        assert_eq!(frame.timestamp, 1.0);

        let snap = metrics.snapshot();
        assert_eq!(snap.payloads_received, 2);
        assert_eq!(snap.frames_projected, 1);
        assert_eq!(snap.format_errors, 1);

        binding.stop();
        assert!(!binding.is_listening());
    }
}
