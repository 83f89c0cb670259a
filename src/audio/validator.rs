use std::path::Path;

use crate::audio::pcm::PcmAudio;
use crate::error::VoiceAuthError;

pub const SUPPORTED_EXTENSIONS: [&str; 7] = ["wav", "mp3", "ogg", "webm", "aac", "flac", "m4a"];

pub const DEFAULT_MIN_SPEECH_SECONDS: f32 = 0.5;

/// Rejects audio that is empty or shorter than `min_seconds`.
///
/// The comparison is strict: a clip exactly at `min_seconds` passes.
pub fn validate_audio(audio: &PcmAudio, min_seconds: f32) -> Result<(), VoiceAuthError> {
    if audio.is_empty() {
        return Err(VoiceAuthError::EmptyAudio);
    }
    let actual = audio.duration_seconds();
    if actual < min_seconds {
        return Err(VoiceAuthError::InsufficientDuration { actual, min: min_seconds });
    }
    Ok(())
}

/// Rejects a path whose extension isn't in [`SUPPORTED_EXTENSIONS`].
///
/// A missing extension is treated the same as an unsupported one.
pub fn validate_extension(path: &Path) -> Result<(), VoiceAuthError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(VoiceAuthError::UnsupportedFormat(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn rejects_empty_audio() {
        let audio = PcmAudio::new(vec![], 16_000);
        assert!(matches!(validate_audio(&audio, DEFAULT_MIN_SPEECH_SECONDS), Err(VoiceAuthError::EmptyAudio)));
    }

    #[test]
    fn rejects_audio_shorter_than_minimum() {
        let audio = PcmAudio::new(vec![0; 4_000], 16_000);
        let err = validate_audio(&audio, 1.0).unwrap_err();
        assert!(matches!(err, VoiceAuthError::InsufficientDuration { .. }));
    }

    #[test]
    fn accepts_audio_exactly_at_minimum() {
        let audio = PcmAudio::new(vec![0; 8_000], 16_000);
        assert!(validate_audio(&audio, 0.5).is_ok());
    }

    #[test]
    fn accepts_supported_extensions_case_insensitively() {
        assert!(validate_extension(&PathBuf::from("clip.WAV")).is_ok());
        assert!(validate_extension(&PathBuf::from("clip.m4a")).is_ok());
    }

    #[test]
    fn rejects_unsupported_extension() {
        let err = validate_extension(&PathBuf::from("clip.txt")).unwrap_err();
        assert!(matches!(err, VoiceAuthError::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_missing_extension() {
        assert!(validate_extension(&PathBuf::from("clip")).is_err());
    }
}
