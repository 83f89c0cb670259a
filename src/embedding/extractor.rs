use std::path::Path;
use std::sync::Mutex;

use ndarray::{Array, IxDyn};
use ort::session::Session;
use ort::value::Value;
use tracing::{debug, info};

use crate::audio::PcmAudio;
use crate::embedding::types::Embedding;
use crate::error::VoiceAuthError;

/// CAM++ embeddings are 192-dimensional.
pub const EMBEDDING_DIM: usize = 192;

/// Minimum audio duration accepted by the embedder: below this the
/// underlying model produces unreliable vectors.
const MIN_DURATION_SECONDS: f32 = 0.1;

/// Extracts a fixed-dimension speaker embedding from audio.
pub trait SpeakerEmbedderModel: Send + Sync {
    fn embed(&self, audio: &PcmAudio) -> Result<Embedding, VoiceAuthError>;
}

/// 3D-Speaker CAM++ embedding model.
pub struct CamPlusPlusEmbedder {
    session: Mutex<Session>,
}

impl CamPlusPlusEmbedder {
    pub fn load(model_path: &Path) -> Result<Self, VoiceAuthError> {
        info!(path = %model_path.display(), "loading speaker embedding model");
        let session = Session::builder()
            .and_then(|b| b.commit_from_file(model_path))
            .map_err(|e| VoiceAuthError::ModelLoadError(format!("embedding model: {e}")))?;
        Ok(Self { session: Mutex::new(session) })
    }
}

impl SpeakerEmbedderModel for CamPlusPlusEmbedder {
    fn embed(&self, audio: &PcmAudio) -> Result<Embedding, VoiceAuthError> {
        if audio.is_empty() {
            return Err(VoiceAuthError::EmbeddingExtraction("audio is empty".to_string()));
        }
        let min_samples = (audio.sample_rate as f32 * MIN_DURATION_SECONDS) as usize;
        if audio.samples.len() < min_samples {
            return Err(VoiceAuthError::EmbeddingExtraction(format!(
                "audio shorter than {MIN_DURATION_SECONDS}s minimum"
            )));
        }

        let samples = audio.samples_f32();
        let input = Array::from_shape_vec(IxDyn(&[1, samples.len()]), samples)
            .map_err(|e| VoiceAuthError::EmbeddingExtraction(format!("embedder input shape: {e}")))?;
        let input_value = Value::from_array(input)
            .map_err(|e| VoiceAuthError::EmbeddingExtraction(format!("embedder tensor: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| VoiceAuthError::EmbeddingExtraction("embedder session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs!["x" => input_value])
            .map_err(|e| VoiceAuthError::EmbeddingExtraction(format!("embedder inference: {e}")))?;

        let (_, values) = outputs["embedding"]
            .try_extract_raw_tensor::<f32>()
            .map_err(|e| VoiceAuthError::EmbeddingExtraction(format!("embedder output: {e}")))?;

        if values.len() != EMBEDDING_DIM {
            return Err(VoiceAuthError::EmbeddingExtraction(format!(
                "expected {EMBEDDING_DIM}-dim embedding, got {}",
                values.len()
            )));
        }

        debug!(dim = values.len(), "extracted speaker embedding");
        Ok(Embedding::new(values.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_samples_is_derived_from_sample_rate() {
        let min_samples = (16_000_f32 * MIN_DURATION_SECONDS) as usize;
        assert_eq!(min_samples, 1_600);
    }
}
