pub mod artifact;
pub mod backend;
pub mod session;

pub use artifact::AudioArtifact;
pub use backend::{AudioChunk, CaptureConfig, CaptureError, InputStream, MediaBackend};
pub use session::CaptureSession;
