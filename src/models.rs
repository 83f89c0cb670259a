//! Model directory resolution and eager loading of the three ONNX-backed
//! collaborators.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::asr::{OfflineRecognizer, SpeechRecognizer};
use crate::embedding::{CamPlusPlusEmbedder, SpeakerEmbedderModel};
use crate::error::VoiceAuthError;
use crate::vad::{SileroVad, VadConfig, VoiceActivityDetector};

const ENV_VAR: &str = "VOICE_AUTH_ENGINE_MODELS_DIR";
const CACHE_DIR_NAME: &str = "voice-auth-engine";

/// Resolves where model files live, in priority order:
///
/// 1. the `VOICE_AUTH_ENGINE_MODELS_DIR` environment variable, if set;
/// 2. a project-local `./models` directory, if it exists and is non-empty;
/// 3. the OS cache directory (`voice-auth-engine/models` under
///    [`dirs::cache_dir`]).
///
/// This is called once by the embedding application at startup — nothing
/// in the pipeline itself re-resolves a models directory per call.
pub fn resolve_models_dir() -> PathBuf {
    if let Ok(dir) = env::var(ENV_VAR) {
        info!(dir, "resolved models directory from environment variable");
        return PathBuf::from(dir);
    }

    let local = PathBuf::from("models");
    if is_non_empty_dir(&local) {
        info!(dir = %local.display(), "resolved models directory from project-local path");
        return local;
    }

    let cache_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CACHE_DIR_NAME)
        .join("models");
    info!(dir = %cache_dir.display(), "resolved models directory from OS cache directory");
    cache_dir
}

fn is_non_empty_dir(path: &Path) -> bool {
    match std::fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_some(),
        Err(_) => false,
    }
}

/// Owned handles to the three model-backed collaborators, constructed once
/// and shared (via [`Arc`]) across every [`Enroller`](crate::Enroller) and
/// [`Verifier`](crate::Verifier) minted by [`PassphraseAuth`](crate::PassphraseAuth).
pub struct Models {
    pub vad: Arc<dyn VoiceActivityDetector>,
    pub asr: Arc<dyn SpeechRecognizer>,
    pub embedder: Arc<dyn SpeakerEmbedderModel>,
}

impl Models {
    /// Eagerly opens all three ONNX sessions / token tables. Fails fast on
    /// the first load error rather than deferring it to first use.
    pub fn load(models_dir: &Path) -> Result<Self, VoiceAuthError> {
        if !models_dir.is_dir() {
            warn!(dir = %models_dir.display(), "models directory does not exist");
        }

        let vad = SileroVad::load(&models_dir.join("silero_vad.onnx"), VadConfig::default())?;
        let asr = OfflineRecognizer::load(&models_dir.join("sense_voice"))?;
        let embedder = CamPlusPlusEmbedder::load(&models_dir.join("campplus.onnx"))?;

        Ok(Self {
            vad: Arc::new(vad),
            asr: Arc::new(asr),
            embedder: Arc::new(embedder),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directory_is_not_non_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_non_empty_dir(dir.path()));
    }

    #[test]
    fn directory_with_a_file_is_non_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker"), b"x").unwrap();
        assert!(is_non_empty_dir(dir.path()));
    }

    #[test]
    fn missing_directory_is_not_non_empty() {
        assert!(!is_non_empty_dir(Path::new("/nonexistent/path/for/sure")));
    }
}
