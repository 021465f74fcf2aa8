use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::info;

use super::backend::AudioChunk;

/// The finalized, immutable recording produced by stopping a capture session
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    /// Concatenated samples of every fragment, in emission order
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// How many fragments were concatenated
    pub chunk_count: usize,
    /// When the artifact was finalized
    pub finalized_at: DateTime<Utc>,
}

impl AudioArtifact {
    /// Concatenate the chunk sequence of a finished session into one artifact
    pub fn from_chunks(chunks: Vec<AudioChunk>, sample_rate: u32, channels: u16) -> Self {
        let chunk_count = chunks.len();
        let total: usize = chunks.iter().map(|c| c.samples.len()).sum();

        let mut samples = Vec::with_capacity(total);
        for chunk in chunks {
            samples.extend_from_slice(&chunk.samples);
        }

        Self {
            samples,
            sample_rate,
            channels,
            chunk_count,
            finalized_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }

    /// Save the artifact as a 16-bit PCM WAV file
    pub fn save_wav(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let spec = hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(path, spec)
            .with_context(|| format!("Failed to create WAV file: {:?}", path))?;

        for &sample in &self.samples {
            writer
                .write_sample(sample)
                .context("Failed to write sample to WAV")?;
        }

        writer.finalize().context("Failed to finalize WAV file")?;

        info!(
            "Artifact saved: {} ({:.1}s, {} chunks)",
            path.display(),
            self.duration_seconds(),
            self.chunk_count
        );

        Ok(())
    }
}
