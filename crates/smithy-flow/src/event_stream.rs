// SPDX-License-Identifier: Apache-2.0
//! Wires a live byte-chunk publisher into a frame publisher: each
//! incoming buffer is fed to the stateful
//! [`smithy_eventstream::FrameDecoder`] and flattened into zero or more
//! decoded frames, preserving order and only pulling the next buffer
//! once the subscriber has asked for more.

use std::sync::Mutex;

use smithy_eventstream::{Frame, FrameDecoder, FramingError};

use crate::error::FlowError;
use crate::flat_map::FlatMapProcessor;
use crate::publisher::Publisher;

/// Build a [`Publisher`] of decoded [`Frame`]s over a publisher of raw
/// byte chunks (e.g. transport read buffers).
#[must_use]
pub fn decode_event_stream(upstream: Box<dyn Publisher<Vec<u8>>>) -> FlatMapProcessor<Vec<u8>, Frame> {
    let decoder = Mutex::new(FrameDecoder::new());
    FlatMapProcessor::new(upstream, move |chunk: Vec<u8>| {
        decoder
            .lock()
            .unwrap()
            .feed(&chunk)
            .map_err(|error: FramingError| FlowError::Upstream(error.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publisher::ChannelPublisher;
    use crate::subscriber::Subscriber;
    use crate::subscription::Subscription;
    use smithy_eventstream::header::{Header, HeaderValue};
    use std::sync::{Arc, Mutex as StdMutex};
    use tokio::sync::mpsc;

    #[derive(Default)]
    struct RecordingSubscriber {
        frames: StdMutex<Vec<Frame>>,
        completed: StdMutex<bool>,
    }

    impl Subscriber<Frame> for RecordingSubscriber {
        fn on_subscribe(&self, subscription: Arc<dyn Subscription>) {
            subscription.request(10);
        }
        fn on_next(&self, item: Frame) {
            self.frames.lock().unwrap().push(item);
        }
        fn on_error(&self, _error: FlowError) {}
        fn on_complete(&self) {
            *self.completed.lock().unwrap() = true;
        }
    }

    #[tokio::test]
    async fn two_frames_in_one_chunk_decode_in_order() {
        let frame_a = Frame::new(vec![Header::new("seq", HeaderValue::Int32(1))], b"a".to_vec());
        let frame_b = Frame::new(vec![Header::new("seq", HeaderValue::Int32(2))], b"b".to_vec());
        let mut bytes = frame_a.encode().unwrap();
        bytes.extend(frame_b.encode().unwrap());

        let (tx, rx) = mpsc::channel(4);
        tx.send(Ok(bytes)).await.unwrap();
        drop(tx);

        let upstream = Box::new(ChannelPublisher::new(rx));
        let processor = decode_event_stream(upstream);
        let subscriber = Arc::new(RecordingSubscriber::default());
        Box::new(processor).subscribe(subscriber.clone());

        for _ in 0..16 {
            tokio::task::yield_now().await;
        }

        let frames = subscriber.frames.lock().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], frame_a);
        assert_eq!(frames[1], frame_b);
        assert!(*subscriber.completed.lock().unwrap());
    }
}
