//! The public entry point: configures shared collaborators and policy once,
//! then mints [`Enroller`]s and [`Verifier`]s that share them cheaply.

use std::sync::Arc;

use tracing::debug;

use crate::asr::SpeechRecognizer;
use crate::audio::{AudioDecoder, AudioInput};
use crate::embedding::{Embedding, SpeakerEmbedderModel};
use crate::enroller::Enroller;
use crate::error::VoiceAuthError;
use crate::models::Models;
use crate::phoneme::{Phoneme, PhonemeExtractor};
use crate::policy::PolicyConfig;
use crate::validators::check_unique_phonemes;
use crate::vad::VoiceActivityDetector;
use crate::verifier::Verifier;

/// The four model-driven stages threaded through every [`Enroller`] and
/// [`Verifier`], plus the one Japanese-text-analysis collaborator the
/// phonetic policy needs. Held behind `Arc` so minting a session is a
/// handful of reference-count bumps, never a model reload.
#[derive(Clone)]
pub(crate) struct FeaturePipeline {
    pub decoder: Arc<dyn AudioDecoder>,
    pub vad: Arc<dyn VoiceActivityDetector>,
    pub asr: Arc<dyn SpeechRecognizer>,
    pub phoneme_extractor: Arc<dyn PhonemeExtractor>,
    pub embedder: Arc<dyn SpeakerEmbedderModel>,
    pub policy: PolicyConfig,
}

impl FeaturePipeline {
    /// Runs the shared load → VAD → validate → [transcribe → phonemize] →
    /// embed pipeline common to both enrollment and verification.
    ///
    /// The bracketed phoneme stage runs whenever either phonetic check is
    /// configured — the unique-phoneme floor, the edit-distance threshold,
    /// or both. With neither set, this pipeline performs pure speaker
    /// verification with no passphrase content check at all.
    pub(crate) fn extract_passphrase(
        &self,
        input: AudioInput,
    ) -> Result<(Embedding, Option<Phoneme>), VoiceAuthError> {
        let audio = self.decoder.load(input)?;
        let segments = self.vad.detect_speech(&audio)?;
        let speech = segments.extract_speech(&audio);
        crate::audio::validate_audio(&speech, self.policy.min_speech_seconds)?;

        let phoneme = if self.policy.phonetic_policy_active() {
            let transcript = self.asr.transcribe(&speech)?;
            let phoneme = self.phoneme_extractor.extract(&transcript)?;
            if let Some(min_required) = self.policy.min_unique_phonemes {
                check_unique_phonemes(&phoneme, min_required)?;
            }
            Some(phoneme)
        } else {
            None
        };

        let embedding = self.embedder.embed(&speech)?;
        debug!("extracted passphrase features from sample");
        Ok((embedding, phoneme))
    }
}

/// Configures acceptance policy and model collaborators once, then mints
/// [`Enroller`] and [`Verifier`] sessions that each carry their own copy of
/// the policy and a cheap clone of the shared collaborator handles.
pub struct PassphraseAuth {
    pipeline: FeaturePipeline,
}

impl PassphraseAuth {
    pub fn new(models: &Models, decoder: Arc<dyn AudioDecoder>, phoneme_extractor: Arc<dyn PhonemeExtractor>, policy: PolicyConfig) -> Self {
        Self {
            pipeline: FeaturePipeline {
                decoder,
                vad: models.vad.clone(),
                asr: models.asr.clone(),
                phoneme_extractor,
                embedder: models.embedder.clone(),
                policy,
            },
        }
    }

    pub fn create_enroller(&self) -> Enroller {
        Enroller::new(self.pipeline.clone())
    }

    pub fn create_verifier(
        &self,
        artifact: crate::enroller::EnrollmentArtifact,
    ) -> Verifier {
        Verifier::new(self.pipeline.clone(), artifact)
    }
}
