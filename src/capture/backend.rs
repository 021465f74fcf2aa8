use thiserror::Error;
use tokio::sync::mpsc;

/// Errors surfaced by the capture lifecycle
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The host exposes no device-media-access capability at all.
    /// Terminal: retrying cannot help.
    #[error("media capture is not supported in this environment")]
    UnsupportedEnvironment,

    /// The host's permission negotiation rejected the microphone request
    #[error("microphone permission denied")]
    PermissionDenied,

    /// Permission was granted but no usable input device exists
    #[error("audio input device unavailable: {0}")]
    DeviceUnavailable(String),

    /// A capture session is already active; the stream is a sole-owned resource
    #[error("a capture session is already active")]
    AlreadyCapturing,

    /// `stop` was called with no active session
    #[error("no active recording to stop")]
    NotRecording,

    /// The underlying recorder failed to start or finalize
    #[error("recorder error: {0}")]
    Recorder(String),
}

/// One raw audio data fragment emitted by the recorder while capturing
#[derive(Debug, Clone)]
pub struct AudioChunk {
    /// Raw audio samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    /// Timestamp in milliseconds since recording started
    pub timestamp_ms: u64,
}

/// Configuration for a capture session
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,
    /// How often the recorder emits data fragments
    pub chunk_duration_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            channels: 1,
            chunk_duration_ms: 100,
        }
    }
}

/// Device-media-access seam
///
/// Models the host's microphone capability so a `CaptureSession` can be
/// driven by anything that grants audio input streams: a platform capture
/// layer in production, a scripted backend in tests.
#[async_trait::async_trait]
pub trait MediaBackend: Send + Sync {
    /// Feature detection: whether this host exposes microphone capture at all.
    ///
    /// `CaptureSession::start` checks this before issuing any permission
    /// request and fails with `UnsupportedEnvironment` when it is false.
    fn is_capture_supported(&self) -> bool;

    /// Request exclusive access to an audio input device.
    ///
    /// Suspends until the host grants or denies the permission prompt. There
    /// is no internal timeout; callers needing a deadline must impose one.
    async fn request_input(
        &self,
        config: &CaptureConfig,
    ) -> Result<Box<dyn InputStream>, CaptureError>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// A live, exclusively-owned audio input stream with its bound recorder
#[async_trait::async_trait]
pub trait InputStream: Send {
    /// Begin recording. Data fragments arrive on the returned channel in
    /// emission order; the channel closes after the recorder's final fragment.
    fn record(&mut self) -> Result<mpsc::Receiver<AudioChunk>, CaptureError>;

    /// Ask the recorder to finalize, flushing any pending fragment.
    async fn finish(&mut self) -> Result<(), CaptureError>;

    /// Stop all underlying device tracks so the host capture indicator clears.
    fn release(&mut self);

    /// Whether the stream is still live (false once torn down externally,
    /// e.g. the user revoked permission mid-session).
    fn is_live(&self) -> bool;
}
