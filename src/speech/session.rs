//! Microphone-to-transcript recognition session
//!
//! Pipeline: cpal capture into a shared ring buffer, streaming resample to
//! 16 kHz, Silero VAD segmentation, Whisper passes. While speech is under
//! way the live utterance is re-transcribed on an interval and emitted as a
//! non-final event at a stable result index; sustained silence (or an
//! explicit stop) finalizes the utterance and advances the index.

use crate::audio::{MicrophoneInput, SampleBuffer, SpeechDetector, StreamResampler, TARGET_RATE};
use crate::config::SpeechSettings;
use crate::speech::engine::WhisperEngine;
use crate::speech::event::{RecognitionEvent, RecognitionResult};
use crate::speech::RecognitionSession;
use crate::{HolovoxError, Result};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Capture buffer capacity, several seconds at typical device rates
const BUFFER_CAPACITY: usize = 48_000 * 5;

/// Worker wake interval between command checks
const TICK: Duration = Duration::from_millis(50);

/// Marker Whisper emits for non-speech audio
const BLANK_MARKER: &str = "[BLANK_AUDIO]";

/// Commands sent to the recognition worker
enum WorkerCommand {
    /// Finalize whatever utterance is in flight
    Flush,

    /// Exit the worker loop
    Shutdown,
}

/// Recognition session backed by the microphone and a Whisper worker
///
/// Construction probes both capabilities up front: it fails when no input
/// device exists or the model file is missing, and the caller then treats
/// speech recognition as unavailable.
pub struct WhisperSession {
    mic: MicrophoneInput,
    buffer: SampleBuffer,
    command_tx: Sender<WorkerCommand>,
    event_rx: Receiver<RecognitionEvent>,
}

impl WhisperSession {
    pub fn new(settings: SpeechSettings) -> Result<Self> {
        let mic = MicrophoneInput::new()?;

        if !settings.model_path.exists() {
            return Err(HolovoxError::ModelLoadError(format!(
                "Model file not found: {:?}",
                settings.model_path
            )));
        }

        let buffer = SampleBuffer::new(BUFFER_CAPACITY);
        let (command_tx, command_rx) = bounded(8);
        let (event_tx, event_rx) = bounded(64);

        let worker_buffer = buffer.clone();
        let input_rate = mic.sample_rate();

        thread::spawn(move || {
            match RecognitionWorker::new(settings, input_rate, worker_buffer, event_tx) {
                Ok(mut worker) => worker.run(command_rx),
                Err(e) => error!("Recognition worker failed to start: {}", e),
            }
        });

        info!("Recognition session ready ({} Hz input)", input_rate);

        Ok(Self {
            mic,
            buffer,
            command_tx,
            event_rx,
        })
    }
}

impl RecognitionSession for WhisperSession {
    fn start(&mut self) -> Result<()> {
        self.mic.start_capture(self.buffer.clone())
    }

    fn stop(&mut self) -> Result<()> {
        self.mic.stop_capture()?;
        self.command_tx
            .send(WorkerCommand::Flush)
            .map_err(|e| HolovoxError::ChannelError(format!("Recognition worker gone: {}", e)))
    }

    fn poll_event(&mut self) -> Option<RecognitionEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl Drop for WhisperSession {
    fn drop(&mut self) {
        let _ = self.command_tx.send(WorkerCommand::Shutdown);
    }
}

/// Worker-side pipeline state
struct RecognitionWorker {
    settings: SpeechSettings,
    buffer: SampleBuffer,
    event_tx: Sender<RecognitionEvent>,
    resampler: StreamResampler,
    vad: SpeechDetector,
    engine: WhisperEngine,

    /// 16 kHz samples of the utterance under way
    utterance: Vec<f32>,
    in_speech: bool,
    silence_duration: f32,
    last_interim: Instant,

    /// Latest hypothesis for the unfinalized utterance
    pending_text: String,

    /// Finalized texts of completed utterances, oldest first
    committed: Vec<String>,
}

impl RecognitionWorker {
    fn new(
        settings: SpeechSettings,
        input_rate: u32,
        buffer: SampleBuffer,
        event_tx: Sender<RecognitionEvent>,
    ) -> Result<Self> {
        let resampler = StreamResampler::new(input_rate, TARGET_RATE)?;
        let vad = SpeechDetector::new(TARGET_RATE, settings.vad_threshold)?;
        let engine = WhisperEngine::new(settings.clone())?;

        Ok(Self {
            settings,
            buffer,
            event_tx,
            resampler,
            vad,
            engine,
            utterance: Vec::new(),
            in_speech: false,
            silence_duration: 0.0,
            last_interim: Instant::now(),
            pending_text: String::new(),
            committed: Vec::new(),
        })
    }

    fn run(&mut self, command_rx: Receiver<WorkerCommand>) {
        info!("Recognition worker started");

        loop {
            match command_rx.recv_timeout(TICK) {
                Ok(WorkerCommand::Flush) => self.flush(),
                Ok(WorkerCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => self.process_captured(),
            }
        }

        info!("Recognition worker stopped");
    }

    /// Drain captured audio and advance the segmentation state machine
    fn process_captured(&mut self) {
        let raw = self.buffer.drain();
        if raw.is_empty() {
            return;
        }

        let chunk = match self.resampler.push(&raw) {
            Ok(chunk) => chunk,
            Err(e) => {
                warn!("Resampling failed: {}", e);
                return;
            }
        };
        if chunk.is_empty() {
            return;
        }

        let chunk_duration = chunk.len() as f32 / TARGET_RATE as f32;
        let is_speech = self.vad.is_speech(&chunk);

        if is_speech {
            if !self.in_speech {
                self.in_speech = true;
                self.utterance.clear();
                self.silence_duration = 0.0;
                self.last_interim = Instant::now();
                debug!("Speech started");
            }

            self.utterance.extend_from_slice(&chunk);
            self.silence_duration = 0.0;

            let utterance_duration = self.utterance.len() as f32 / TARGET_RATE as f32;
            if utterance_duration >= self.settings.max_segment_duration {
                debug!("Maximum segment duration reached, finalizing");
                self.finalize_utterance();
                return;
            }

            if self.last_interim.elapsed()
                >= Duration::from_millis(self.settings.interim_interval_ms)
            {
                self.emit_interim();
            }
        } else if self.in_speech {
            // Trailing silence stays in the utterance so Whisper sees the
            // natural end of the phrase
            self.utterance.extend_from_slice(&chunk);
            self.silence_duration += chunk_duration;

            if self.silence_duration >= self.settings.silence_threshold {
                let utterance_duration = self.utterance.len() as f32 / TARGET_RATE as f32;

                if utterance_duration >= self.settings.min_segment_duration {
                    debug!("Silence threshold reached, finalizing");
                    self.finalize_utterance();
                } else {
                    debug!("Segment too short ({:.2}s), discarding", utterance_duration);
                    self.reset_utterance();
                }
            }
        }
    }

    /// Finalize on an explicit stop: fold in whatever audio is still
    /// buffered, then close out the utterance
    fn flush(&mut self) {
        let raw = self.buffer.drain();
        if !raw.is_empty() {
            if let Ok(chunk) = self.resampler.push(&raw) {
                if self.in_speech {
                    self.utterance.extend_from_slice(&chunk);
                }
            }
        }

        match self.resampler.flush() {
            Ok(tail) => {
                if self.in_speech {
                    self.utterance.extend_from_slice(&tail);
                }
            }
            Err(e) => warn!("Resampler flush failed: {}", e),
        }

        self.finalize_utterance();
    }

    /// Re-transcribe the live utterance and emit a non-final event
    fn emit_interim(&mut self) {
        self.last_interim = Instant::now();

        match self.engine.transcribe(&self.utterance) {
            Ok(text) => {
                let text = clean_transcript(&text);
                if !text.is_empty() && text != self.pending_text {
                    self.pending_text = text;
                    self.emit_event(false);
                }
            }
            Err(e) => warn!("Interim transcription failed: {}", e),
        }
    }

    /// Run a final pass over the utterance, emit a final event, and
    /// advance the result index for the next utterance
    fn finalize_utterance(&mut self) {
        if !self.in_speech || self.utterance.is_empty() {
            self.reset_utterance();
            return;
        }

        match self.engine.transcribe(&self.utterance) {
            Ok(text) => {
                let text = clean_transcript(&text);
                if !text.is_empty() {
                    self.pending_text = text;
                }
            }
            Err(e) => warn!("Final transcription failed: {}", e),
        }

        // A failed or empty final pass falls back to the last interim
        // hypothesis rather than dropping the utterance
        if !self.pending_text.is_empty() {
            self.emit_event(true);
            self.committed.push(std::mem::take(&mut self.pending_text));
        }

        self.reset_utterance();
    }

    fn reset_utterance(&mut self) {
        self.utterance.clear();
        self.in_speech = false;
        self.silence_duration = 0.0;
        self.pending_text.clear();
    }

    fn emit_event(&mut self, is_final: bool) {
        match build_event(&self.committed, &self.pending_text, is_final) {
            Ok(event) => {
                if self.event_tx.try_send(event).is_err() {
                    debug!("Event channel full, dropping recognition event");
                }
            }
            Err(e) => debug!("Dropping malformed recognition event: {}", e),
        }
    }
}

/// Assemble a validated event from the committed utterances plus the
/// current hypothesis, indexed at the current hypothesis
fn build_event(committed: &[String], pending: &str, is_final: bool) -> Result<RecognitionEvent> {
    let mut results: Vec<RecognitionResult> = committed
        .iter()
        .map(|text| RecognitionResult::single(text.clone(), true))
        .collect();
    results.push(RecognitionResult::single(pending, is_final));

    let result_index = results.len() - 1;
    RecognitionEvent::validated(result_index, results)
}

/// Strip the blank-audio marker and collapse whitespace
fn clean_transcript(text: &str) -> String {
    text.replace(BLANK_MARKER, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
