use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::artifact::AudioArtifact;
use super::backend::{AudioChunk, CaptureConfig, CaptureError, InputStream, MediaBackend};

/// One start-to-stop lifecycle of microphone recording
///
/// Owns at most one active stream and its bound recorder. The chunk sequence
/// is cleared at the start of each recording and becomes immutable once the
/// session stops. No module-level state: each session is an explicit value
/// holding its own media backend handle.
pub struct CaptureSession {
    session_id: String,
    backend: Arc<dyn MediaBackend>,
    config: CaptureConfig,
    active: Option<ActiveCapture>,
}

struct ActiveCapture {
    stream: Box<dyn InputStream>,
    chunks: Arc<Mutex<Vec<AudioChunk>>>,
    collector: JoinHandle<()>,
}

impl CaptureSession {
    pub fn new(backend: Arc<dyn MediaBackend>, config: CaptureConfig) -> Self {
        Self {
            session_id: format!("capture-{}", Uuid::new_v4()),
            backend,
            config,
            active: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_capturing(&self) -> bool {
        self.active.is_some()
    }

    /// Start recording
    ///
    /// Checks feature support before any permission request, then awaits the
    /// host's grant. Permission and device failures propagate to the caller
    /// untouched, with no partial state mutation: chunk collection only
    /// begins after the request resolves.
    pub async fn start(&mut self) -> Result<(), CaptureError> {
        if !self.backend.is_capture_supported() {
            return Err(CaptureError::UnsupportedEnvironment);
        }

        if self.active.is_some() {
            warn!("Capture already active: {}", self.session_id);
            return Err(CaptureError::AlreadyCapturing);
        }

        // Sole suspension point: resolves when the host grants or denies.
        let mut stream = self.backend.request_input(&self.config).await?;

        let mut chunk_rx = stream.record()?;

        // Fresh chunk sequence for this recording; fragments from any prior
        // session never leak in.
        let chunks = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&chunks);

        // Append-only, non-blocking collector driven by the recorder's own
        // emission schedule.
        let collector = tokio::spawn(async move {
            while let Some(chunk) = chunk_rx.recv().await {
                sink.lock().await.push(chunk);
            }
        });

        info!(
            "Capture started: {} (backend: {})",
            self.session_id,
            self.backend.name()
        );

        self.active = Some(ActiveCapture {
            stream,
            chunks,
            collector,
        });

        Ok(())
    }

    /// Stop recording and finalize the artifact
    ///
    /// Fails with `NotRecording` when no session is active, leaving state
    /// unchanged. If the stream was torn down externally mid-session, the
    /// fragments received before teardown are still returned as a partial
    /// artifact and the session transitions to idle.
    pub async fn stop(&mut self) -> Result<AudioArtifact, CaptureError> {
        let mut active = self.active.take().ok_or(CaptureError::NotRecording)?;

        if active.stream.is_live() {
            if let Err(e) = active.stream.finish().await {
                // No stop occurred; the session stays capturing.
                self.active = Some(active);
                return Err(e);
            }
        } else {
            warn!(
                "Capture stream ended externally, returning partial artifact: {}",
                self.session_id
            );
        }

        // The chunk channel closes after the recorder's final fragment; wait
        // for the collector to drain it.
        if let Err(e) = active.collector.await {
            error!("Chunk collector task panicked: {}", e);
        }

        let collected = {
            let mut guard = active.chunks.lock().await;
            std::mem::take(&mut *guard)
        };

        // Release device tracks so the host capture indicator clears.
        active.stream.release();

        let artifact =
            AudioArtifact::from_chunks(collected, self.config.sample_rate, self.config.channels);

        info!(
            "Capture stopped: {} ({} chunks, {:.1}s)",
            self.session_id,
            artifact.chunk_count,
            artifact.duration_seconds()
        );

        Ok(artifact)
    }
}
