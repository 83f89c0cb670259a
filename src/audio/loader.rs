use std::io::Cursor;
use std::path::{Path, PathBuf};

use rubato::{Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction};
use symphonia::core::audio::{SampleBuffer, SignalSpec};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

use crate::audio::pcm::{PcmAudio, TARGET_SAMPLE_RATE};
use crate::audio::validator::validate_extension;
use crate::error::VoiceAuthError;

/// Where the raw, not-yet-decoded audio comes from.
///
/// Extension checking (`SUPPORTED_EXTENSIONS`) only applies to [`Path`]
/// inputs — a byte buffer carries no extension to check, so the container
/// probe is the only gate for in-memory audio.
pub enum AudioInput {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

/// Decodes arbitrary container/codec input into canonical [`PcmAudio`].
pub trait AudioDecoder: Send + Sync {
    fn load(&self, input: AudioInput) -> Result<PcmAudio, VoiceAuthError>;
}

/// `symphonia`-backed decoder with `rubato` sinc resampling to
/// [`TARGET_SAMPLE_RATE`] mono.
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    pub fn new() -> Self {
        Self
    }

    fn read_bytes(input: AudioInput) -> Result<(Vec<u8>, Option<String>), VoiceAuthError> {
        match input {
            AudioInput::Bytes(bytes) => Ok((bytes, None)),
            AudioInput::Path(path) => {
                validate_extension(&path)?;
                let ext = extension_of(&path);
                let bytes = std::fs::read(&path).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        VoiceAuthError::NotFound(path.display().to_string())
                    } else {
                        VoiceAuthError::DecodeError(format!("{}: {e}", path.display()))
                    }
                })?;
                Ok((bytes, ext))
            }
        }
    }

    fn decode_to_mono_f32(bytes: Vec<u8>, extension_hint: Option<&str>) -> Result<(Vec<f32>, u32), VoiceAuthError> {
        let source = MediaSourceStream::new(Box::new(Cursor::new(bytes)), MediaSourceStreamOptions::default());

        let mut hint = Hint::new();
        if let Some(ext) = extension_hint {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                source,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| VoiceAuthError::DecodeError(format!("container probe failed: {e}")))?;

        let mut format = probed.format;
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
            .ok_or_else(|| VoiceAuthError::DecodeError("no decodable audio track found".to_string()))?;
        let track_id = track.id;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| VoiceAuthError::DecodeError(format!("no decoder for codec: {e}")))?;

        let mut pcm: Vec<f32> = Vec::new();
        let mut spec: Option<SignalSpec> = None;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(symphonia::core::errors::Error::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break
                }
                Err(e) => return Err(VoiceAuthError::DecodeError(format!("packet read failed: {e}"))),
            };
            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let this_spec = *decoded.spec();
                    spec.get_or_insert(this_spec);
                    let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, this_spec);
                    sample_buf.copy_interleaved_ref(decoded);
                    mix_down_to_mono(sample_buf.samples(), this_spec.channels.count(), &mut pcm);
                }
                Err(symphonia::core::errors::Error::DecodeError(e)) => {
                    warn!(error = %e, "skipping undecodable packet");
                    continue;
                }
                Err(e) => return Err(VoiceAuthError::DecodeError(format!("decode failed: {e}"))),
            }
        }

        let spec = spec.ok_or_else(|| VoiceAuthError::DecodeError("stream produced no audio frames".to_string()))?;
        Ok((pcm, spec.rate))
    }
}

impl Default for SymphoniaDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioDecoder for SymphoniaDecoder {
    fn load(&self, input: AudioInput) -> Result<PcmAudio, VoiceAuthError> {
        let (bytes, extension_hint) = Self::read_bytes(input)?;
        if bytes.is_empty() {
            return Err(VoiceAuthError::EmptyAudio);
        }

        let (mono, source_rate) = Self::decode_to_mono_f32(bytes, extension_hint.as_deref())?;
        if mono.is_empty() {
            return Err(VoiceAuthError::EmptyAudio);
        }

        let resampled = if source_rate == TARGET_SAMPLE_RATE {
            mono
        } else {
            resample_to_target(&mono, source_rate)?
        };

        let samples: Vec<i16> = resampled
            .iter()
            .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
            .collect();

        debug!(sample_count = samples.len(), source_rate, "decoded audio clip");
        Ok(PcmAudio::new(samples, TARGET_SAMPLE_RATE))
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension().and_then(|e| e.to_str()).map(|e| e.to_lowercase())
}

fn mix_down_to_mono(interleaved: &[f32], channels: usize, out: &mut Vec<f32>) {
    if channels <= 1 {
        out.extend_from_slice(interleaved);
        return;
    }
    out.extend(interleaved.chunks_exact(channels).map(|frame| {
        frame.iter().sum::<f32>() / channels as f32
    }));
}

fn resample_to_target(samples: &[f32], source_rate: u32) -> Result<Vec<f32>, VoiceAuthError> {
    let ratio = TARGET_SAMPLE_RATE as f64 / source_rate as f64;
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };
    // Single `process` call over the whole clip, not a streaming chunk loop —
    // drops the sinc filter's warm-up latency tail at the start of the
    // output. Fine for this loader's single-shot use; would need a proper
    // `process_partial`/flush drain if this ever fed a live capture stream.
    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, samples.len(), 1)
        .map_err(|e| VoiceAuthError::DecodeError(format!("resampler init failed: {e}")))?;

    let output = resampler
        .process(&[samples.to_vec()], None)
        .map_err(|e| VoiceAuthError::DecodeError(format!("resampling failed: {e}")))?;

    Ok(output.into_iter().next().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_down_averages_interleaved_channels() {
        let mut out = Vec::new();
        mix_down_to_mono(&[1.0, -1.0, 0.5, 0.5], 2, &mut out);
        assert_eq!(out, vec![0.0, 0.5]);
    }

    #[test]
    fn mix_down_passes_through_mono() {
        let mut out = Vec::new();
        mix_down_to_mono(&[0.1, 0.2, 0.3], 1, &mut out);
        assert_eq!(out, vec![0.1, 0.2, 0.3]);
    }
}
