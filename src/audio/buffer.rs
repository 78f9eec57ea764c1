use parking_lot::Mutex;
use ringbuf::{traits::*, HeapRb};
use std::sync::Arc;

/// Thread-safe ring buffer carrying microphone samples from the capture
/// callback to the recognition worker
///
/// Oldest samples are dropped on overflow so a stalled worker never builds
/// up unbounded latency.
pub struct SampleBuffer {
    inner: Arc<Mutex<HeapRb<f32>>>,
}

impl SampleBuffer {
    /// Create a new buffer with the specified capacity in samples
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HeapRb::new(capacity))),
        }
    }

    /// Write samples, dropping the oldest ones when full
    pub fn write(&self, samples: &[f32]) -> usize {
        let mut buffer = self.inner.lock();
        let mut written = 0;

        for &sample in samples {
            if buffer.try_push(sample).is_ok() {
                written += 1;
            } else {
                let _ = buffer.try_pop();
                let _ = buffer.try_push(sample);
                written += 1;
            }
        }

        written
    }

    /// Take everything currently buffered
    pub fn drain(&self) -> Vec<f32> {
        let mut buffer = self.inner.lock();
        let mut samples = Vec::with_capacity(buffer.occupied_len());

        while let Some(sample) = buffer.try_pop() {
            samples.push(sample);
        }

        samples
    }

    /// Get the number of samples available to read
    pub fn len(&self) -> usize {
        self.inner.lock().occupied_len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Clear the buffer
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Get the capacity of the buffer
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity().get()
    }
}

impl Clone for SampleBuffer {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
