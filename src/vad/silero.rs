use std::path::Path;
use std::sync::Mutex;

use ndarray::{Array, ArrayD, IxDyn};
use ort::session::Session;
use ort::value::Value;
use tracing::{debug, info};

use crate::audio::PcmAudio;
use crate::error::VoiceAuthError;
use crate::vad::types::{SpeechSegment, SpeechSegments, VadConfig};

/// Silero operates on fixed 32ms frames at 16kHz.
const FRAME_SAMPLES: usize = 512;
const SAMPLE_RATE: i64 = 16_000;

/// Detects speech-bearing regions of a clip.
pub trait VoiceActivityDetector: Send + Sync {
    fn detect_speech(&self, audio: &PcmAudio) -> Result<SpeechSegments, VoiceAuthError>;
}

/// Silero VAD, run frame-by-frame with its recurrent state carried between
/// calls to `session.run`.
pub struct SileroVad {
    session: Mutex<Session>,
    config: VadConfig,
}

impl SileroVad {
    pub fn load(model_path: &Path, config: VadConfig) -> Result<Self, VoiceAuthError> {
        info!(path = %model_path.display(), "loading Silero VAD model");
        let session = Session::builder()
            .and_then(|b| b.commit_from_file(model_path))
            .map_err(|e| VoiceAuthError::ModelLoadError(format!("silero vad: {e}")))?;
        Ok(Self { session: Mutex::new(session), config })
    }

    fn run_frame(session: &mut Session, frame: &[f32], state: &mut ArrayD<f32>) -> Result<f32, VoiceAuthError> {
        let input = Array::from_shape_vec(IxDyn(&[1, frame.len()]), frame.to_vec())
            .map_err(|e| VoiceAuthError::ModelLoadError(format!("silero input shape: {e}")))?;
        let sr = Array::from_elem(IxDyn(&[]), SAMPLE_RATE);

        let input_value = Value::from_array(input)
            .map_err(|e| VoiceAuthError::ModelLoadError(format!("silero tensor: {e}")))?;
        let sr_value = Value::from_array(sr)
            .map_err(|e| VoiceAuthError::ModelLoadError(format!("silero tensor: {e}")))?;
        let state_value = Value::from_array(state.clone())
            .map_err(|e| VoiceAuthError::ModelLoadError(format!("silero tensor: {e}")))?;

        let outputs = session
            .run(ort::inputs![
                "input" => input_value,
                "sr" => sr_value,
                "state" => state_value,
            ])
            .map_err(|e| VoiceAuthError::ModelLoadError(format!("silero inference: {e}")))?;

        let (_, prob_data) = outputs["output"]
            .try_extract_raw_tensor::<f32>()
            .map_err(|e| VoiceAuthError::ModelLoadError(format!("silero output: {e}")))?;
        let prob = *prob_data.first().unwrap_or(&0.0);

        let (new_state_shape, new_state_data) = outputs["stateN"]
            .try_extract_raw_tensor::<f32>()
            .map_err(|e| VoiceAuthError::ModelLoadError(format!("silero state: {e}")))?;
        *state = ArrayD::from_shape_vec(IxDyn(new_state_shape), new_state_data.to_vec())
            .map_err(|e| VoiceAuthError::ModelLoadError(format!("silero state shape: {e}")))?;

        Ok(prob)
    }
}

impl VoiceActivityDetector for SileroVad {
    fn detect_speech(&self, audio: &PcmAudio) -> Result<SpeechSegments, VoiceAuthError> {
        let samples = audio.samples_f32();
        let mut session = self
            .session
            .lock()
            .map_err(|_| VoiceAuthError::ModelLoadError("silero session lock poisoned".to_string()))?;
        let mut state = ArrayD::<f32>::zeros(IxDyn(&[2, 1, 128]));

        let min_speech_frames =
            (self.config.min_speech_duration * SAMPLE_RATE as f32 / FRAME_SAMPLES as f32).ceil() as usize;
        let min_silence_frames =
            (self.config.min_silence_duration * SAMPLE_RATE as f32 / FRAME_SAMPLES as f32).ceil() as usize;

        let mut segments = Vec::new();
        let mut in_speech = false;
        let mut speech_start_frame = 0usize;
        let mut silence_run = 0usize;
        let mut frame_count = 0usize;

        for (frame_idx, chunk) in samples.chunks(FRAME_SAMPLES).enumerate() {
            frame_count = frame_idx + 1;
            let mut frame = chunk.to_vec();
            frame.resize(FRAME_SAMPLES, 0.0);

            let prob = Self::run_frame(&mut session, &frame, &mut state)?;
            let is_speech = prob >= self.config.threshold;

            if is_speech {
                if !in_speech {
                    in_speech = true;
                    speech_start_frame = frame_idx;
                }
                silence_run = 0;
            } else if in_speech {
                silence_run += 1;
                if silence_run >= min_silence_frames.max(1) {
                    let end_frame = frame_idx + 1 - silence_run;
                    push_segment_if_long_enough(&mut segments, speech_start_frame, end_frame, min_speech_frames, audio.samples.len());
                    in_speech = false;
                    silence_run = 0;
                }
            }
        }

        if in_speech {
            push_segment_if_long_enough(&mut segments, speech_start_frame, frame_count, min_speech_frames, audio.samples.len());
        }

        debug!(segment_count = segments.len(), "silero vad detection complete");
        Ok(SpeechSegments::new(segments))
    }
}

fn push_segment_if_long_enough(
    segments: &mut Vec<SpeechSegment>,
    start_frame: usize,
    end_frame: usize,
    min_speech_frames: usize,
    total_samples: usize,
) {
    if end_frame <= start_frame || end_frame - start_frame < min_speech_frames.max(1) {
        return;
    }
    let start = start_frame * FRAME_SAMPLES;
    let end = (end_frame * FRAME_SAMPLES).min(total_samples);
    if end <= start {
        return;
    }
    segments.push(SpeechSegment {
        start,
        end,
        start_sec: start as f32 / SAMPLE_RATE as f32,
        end_sec: end as f32 / SAMPLE_RATE as f32,
    });
}
