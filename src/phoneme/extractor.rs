use jpreprocess::{JPreprocess, JPreprocessConfig, SystemDictionaryConfig};
use tracing::debug;

use crate::error::VoiceAuthError;
use crate::phoneme::types::Phoneme;

/// Symbols `jpreprocess`'s full-context labels emit that carry no speaker
/// information: silence padding at utterance boundaries (`sil`), short
/// pauses (`pau`), and the geminate-consonant marker (`cl`). These are
/// dropped so the remaining sequence matches what a G2P call that emits
/// bare phonemes (no boundary padding) would produce.
const FILTERED_PHONEMES: [&str; 3] = ["sil", "pau", "cl"];

/// Converts Japanese text into a phoneme sequence.
pub trait PhonemeExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Result<Phoneme, VoiceAuthError>;
}

/// `jpreprocess`-backed extractor, the Rust-native counterpart of
/// `pyopenjtalk.g2p`.
pub struct JPreprocessExtractor {
    engine: JPreprocess,
}

impl JPreprocessExtractor {
    /// Builds an extractor over the bundled NAIST-JDic dictionary.
    pub fn new() -> Result<Self, VoiceAuthError> {
        let config = JPreprocessConfig {
            dictionary: SystemDictionaryConfig::Bundled(jpreprocess::kind::JPreprocessDictionaryKind::NaistJdic),
            user_dictionary: None,
        };
        let engine = JPreprocess::from_config(config)
            .map_err(|e| VoiceAuthError::ModelLoadError(format!("jpreprocess dictionary load failed: {e}")))?;
        Ok(Self { engine })
    }

    /// Pulls the middle phoneme symbol out of one HTS-style full-context
    /// label (`...^...-PHONEME+...=...`). Labels jpreprocess can't parse in
    /// this shape are skipped rather than treated as a hard error — a
    /// handful of malformed labels should not sink the whole transcript.
    fn phoneme_from_label(label: &str) -> Option<&str> {
        let after_dash = label.split('-').nth(1)?;
        after_dash.split('+').next()
    }
}

impl PhonemeExtractor for JPreprocessExtractor {
    fn extract(&self, text: &str) -> Result<Phoneme, VoiceAuthError> {
        if text.trim().is_empty() {
            return Err(VoiceAuthError::EmptyPassphrase);
        }

        let labels = self
            .engine
            .extract_fullcontext(text)
            .map_err(|e| VoiceAuthError::RecognitionError(format!("phoneme extraction failed: {e}")))?;

        let values: Vec<String> = labels
            .iter()
            .filter_map(|label| Self::phoneme_from_label(label))
            .filter(|p| !FILTERED_PHONEMES.contains(p))
            .map(|p| p.to_string())
            .collect();

        debug!(phoneme_count = values.len(), "extracted phoneme sequence");
        Ok(Phoneme::new(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phoneme_from_label_extracts_middle_symbol() {
        assert_eq!(
            JPreprocessExtractor::phoneme_from_label("xx^xx-sil+k=i/A:..."),
            Some("sil")
        );
        assert_eq!(
            JPreprocessExtractor::phoneme_from_label("sil^k-o+N=n/A:..."),
            Some("o")
        );
    }

    #[test]
    fn phoneme_from_label_rejects_unparseable_input() {
        assert_eq!(JPreprocessExtractor::phoneme_from_label("no-dash-structure"), Some("dash"));
        assert_eq!(JPreprocessExtractor::phoneme_from_label("nostructureatall"), None);
    }
}
