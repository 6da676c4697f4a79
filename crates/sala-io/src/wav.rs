//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (e.g., 16, 24, 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Interleaved samples scaled to [-1, 1].
fn read_interleaved<P: AsRef<Path>>(path: P) -> Result<(Vec<f64>, WavSpec)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let hound_spec = reader.spec();
    let spec = WavSpec::from(hound_spec);

    let samples: Vec<f64> = match hound_spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = f64::from(1u32 << (spec.bits_per_sample - 1));
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        frames = samples.len() / usize::from(spec.channels.max(1)),
        "loaded wav"
    );

    Ok((samples, spec))
}

/// Read a WAV file and return samples as f64 along with the spec.
///
/// Multi-channel files are mixed down to mono by averaging channels.
///
/// # Example
/// ```ignore
/// let (samples, spec) = read_wav("room.wav")?;
/// println!("Loaded {} samples at {} Hz", samples.len(), spec.sample_rate);
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f64>, WavSpec)> {
    let (samples, spec) = read_interleaved(path)?;
    let channels = usize::from(spec.channels);

    let mono_samples = if channels > 1 {
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f64>() / channels as f64)
            .collect()
    } else {
        samples
    };

    Ok((mono_samples, spec))
}

/// Read a WAV file keeping every channel as its own response.
///
/// Returns one `Vec` per channel, each `num_frames` long.
pub fn read_wav_channels<P: AsRef<Path>>(path: P) -> Result<(Vec<Vec<f64>>, WavSpec)> {
    let (samples, spec) = read_interleaved(path)?;
    let channels = usize::from(spec.channels);

    let mut out = vec![Vec::with_capacity(samples.len() / channels.max(1)); channels];
    for frame in samples.chunks(channels) {
        for (channel, &sample) in out.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    Ok((out, spec))
}

/// Write mono samples to a WAV file.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f64], spec: WavSpec) -> Result<()> {
    let mono = WavSpec {
        channels: 1,
        ..spec
    };
    write_wav_channels(path, &[samples.to_vec()], mono)
}

/// Write equal-length channels to an interleaved WAV file.
///
/// The channel count of `spec` is replaced by `channels.len()`.
pub fn write_wav_channels<P: AsRef<Path>>(
    path: P,
    channels: &[Vec<f64>],
    spec: WavSpec,
) -> Result<()> {
    let frames = channels.first().map_or(0, Vec::len);
    if let Some((channel, ch)) = channels.iter().enumerate().find(|(_, ch)| ch.len() != frames) {
        return Err(Error::ChannelLengthMismatch {
            expected: frames,
            channel,
            actual: ch.len(),
        });
    }

    let spec = WavSpec {
        channels: channels.len() as u16,
        ..spec
    };
    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))?;

    let max_val = f64::from(1u32 << (spec.bits_per_sample - 1));
    for frame in 0..frames {
        for channel in channels {
            let sample = channel[frame];
            if spec.bits_per_sample == 32 {
                writer.write_sample(sample as f32)?;
            } else {
                let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn float_round_trip_is_exact_for_f32_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mono.wav");
        let samples = vec![0.0, 0.5, -0.25, 1.0];
        write_wav(&path, &samples, WavSpec::default()).unwrap();

        let (loaded, spec) = read_wav(&path).unwrap();
        assert_eq!(loaded, samples);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 48000);
    }

    #[test]
    fn sixteen_bit_is_scaled() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pcm16.wav");
        let spec = WavSpec {
            bits_per_sample: 16,
            sample_rate: 8000,
            ..WavSpec::default()
        };
        write_wav(&path, &[0.5, -0.5], spec).unwrap();

        let (loaded, spec) = read_wav(&path).unwrap();
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(loaded, vec![0.5, -0.5]);
    }

    #[test]
    fn channels_are_deinterleaved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("multi.wav");
        let channels = vec![vec![1.0, 0.5], vec![0.0, -0.5], vec![0.25, 0.25]];
        write_wav_channels(&path, &channels, WavSpec::default()).unwrap();

        let (loaded, spec) = read_wav_channels(&path).unwrap();
        assert_eq!(spec.channels, 3);
        assert_eq!(loaded, channels);

        let (mono, _) = read_wav(&path).unwrap();
        assert_eq!(mono, vec![1.25 / 3.0, 0.25 / 3.0]);
    }

    #[test]
    fn mismatched_channel_lengths_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.wav");
        let err = write_wav_channels(&path, &[vec![0.0; 4], vec![0.0; 3]], WavSpec::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::ChannelLengthMismatch {
                expected: 4,
                channel: 1,
                actual: 3
            }
        ));
    }
}
