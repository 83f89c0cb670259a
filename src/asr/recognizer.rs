use std::fs;
use std::path::Path;
use std::sync::Mutex;

use ndarray::{Array, IxDyn};
use ort::session::Session;
use ort::value::Value;
use tracing::{debug, info};

use crate::audio::PcmAudio;
use crate::error::VoiceAuthError;

const SPECIAL_TOKEN_MARKERS: [&str; 2] = ["<blk>", "<unk>"];

/// Transcribes speech audio into text.
pub trait SpeechRecognizer: Send + Sync {
    fn transcribe(&self, audio: &PcmAudio) -> Result<String, VoiceAuthError>;
}

/// A single-pass ONNX recognizer decoded with CTC greedy search, the
/// Rust-native counterpart of sherpa-onnx's `OfflineRecognizer.from_sense_voice`.
///
/// Expects `model.int8.onnx` and `tokens.txt` inside the given model
/// directory.
pub struct OfflineRecognizer {
    session: Mutex<Session>,
    tokens: Vec<String>,
    blank_id: usize,
}

impl OfflineRecognizer {
    pub fn load(model_dir: &Path) -> Result<Self, VoiceAuthError> {
        let model_path = model_dir.join("model.int8.onnx");
        let tokens_path = model_dir.join("tokens.txt");

        info!(path = %model_path.display(), "loading offline ASR model");
        let session = Session::builder()
            .and_then(|b| b.commit_from_file(&model_path))
            .map_err(|e| VoiceAuthError::ModelLoadError(format!("asr model: {e}")))?;

        let tokens = load_tokens(&tokens_path)?;
        let blank_id = tokens
            .iter()
            .position(|t| t == "<blk>")
            .unwrap_or(0);

        Ok(Self { session: Mutex::new(session), tokens, blank_id })
    }
}

impl SpeechRecognizer for OfflineRecognizer {
    fn transcribe(&self, audio: &PcmAudio) -> Result<String, VoiceAuthError> {
        if audio.is_empty() {
            return Err(VoiceAuthError::RecognitionError("empty audio".to_string()));
        }

        let samples = audio.samples_f32();
        let input = Array::from_shape_vec(IxDyn(&[1, samples.len()]), samples)
            .map_err(|e| VoiceAuthError::RecognitionError(format!("asr input shape: {e}")))?;
        let input_value = Value::from_array(input)
            .map_err(|e| VoiceAuthError::RecognitionError(format!("asr tensor: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| VoiceAuthError::RecognitionError("asr session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs!["x" => input_value])
            .map_err(|e| VoiceAuthError::RecognitionError(format!("asr inference: {e}")))?;

        let (shape, logits) = outputs["logits"]
            .try_extract_raw_tensor::<f32>()
            .map_err(|e| VoiceAuthError::RecognitionError(format!("asr output: {e}")))?;

        let vocab_size = *shape.last().ok_or_else(|| {
            VoiceAuthError::RecognitionError("asr output has no vocabulary dimension".to_string())
        })? as usize;
        if vocab_size == 0 {
            return Err(VoiceAuthError::RecognitionError("asr vocabulary dimension is zero".to_string()));
        }

        let text = self.greedy_decode(logits, vocab_size);
        debug!(char_count = text.chars().count(), "transcribed passphrase audio");
        Ok(text)
    }
}

impl OfflineRecognizer {
    fn greedy_decode(&self, logits: &[f32], vocab_size: usize) -> String {
        let mut text = String::new();
        let mut prev_id: Option<usize> = None;

        for frame in logits.chunks_exact(vocab_size) {
            let (id, _) = frame
                .iter()
                .enumerate()
                .fold((0usize, f32::MIN), |best, (i, &v)| if v > best.1 { (i, v) } else { best });

            if id == self.blank_id {
                prev_id = None;
                continue;
            }
            if prev_id == Some(id) {
                continue;
            }
            prev_id = Some(id);

            if let Some(token) = self.tokens.get(id) {
                if !SPECIAL_TOKEN_MARKERS.contains(&token.as_str()) {
                    text.push_str(&token.replace('▁', ""));
                }
            }
        }
        text
    }
}

fn load_tokens(path: &Path) -> Result<Vec<String>, VoiceAuthError> {
    let content = fs::read_to_string(path)
        .map_err(|e| VoiceAuthError::ModelLoadError(format!("tokens table: {}: {e}", path.display())))?;

    let mut tokens: Vec<(usize, String)> = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.rsplitn(2, char::is_whitespace);
        let id_str = parts.next().unwrap_or("");
        let symbol = parts.next().unwrap_or(line).to_string();
        let id: usize = id_str
            .parse()
            .map_err(|_| VoiceAuthError::ModelLoadError(format!("malformed tokens line: {line}")))?;
        tokens.push((id, symbol));
    }
    tokens.sort_by_key(|(id, _)| *id);

    let max_id = tokens.iter().map(|(id, _)| *id).max().unwrap_or(0);
    let mut table = vec![String::new(); max_id + 1];
    for (id, symbol) in tokens {
        table[id] = symbol;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_tokens_parses_symbol_id_pairs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "<blk> 0").unwrap();
        writeln!(file, "a 1").unwrap();
        writeln!(file, "i 2").unwrap();
        let tokens = load_tokens(file.path()).unwrap();
        assert_eq!(tokens, vec!["<blk>".to_string(), "a".to_string(), "i".to_string()]);
    }
}
