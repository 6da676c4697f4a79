//! Integration tests for sala-io.
//!
//! Round-trips synthetic impulse responses through WAV files on disk.

use sala_io::{Error, WavSpec, read_wav, read_wav_channels, write_wav, write_wav_channels};
use tempfile::TempDir;

fn decay(len: usize, per_sample: f64) -> Vec<f64> {
    (0..len).map(|i| per_sample.powi(i as i32)).collect()
}

#[test]
fn mono_response_keeps_sample_rate_and_length() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ir.wav");
    let ir = decay(4800, 0.999);
    let spec = WavSpec {
        sample_rate: 44100,
        ..WavSpec::default()
    };
    write_wav(&path, &ir, spec).unwrap();

    let (loaded, loaded_spec) = read_wav(&path).unwrap();
    assert_eq!(loaded_spec.sample_rate, 44100);
    assert_eq!(loaded.len(), ir.len());
    for (a, b) in loaded.iter().zip(&ir) {
        assert!((a - b).abs() < 1e-7);
    }
}

#[test]
fn twenty_four_bit_is_close() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ir24.wav");
    let ir = decay(1000, 0.99);
    let spec = WavSpec {
        bits_per_sample: 24,
        ..WavSpec::default()
    };
    write_wav(&path, &ir, spec).unwrap();

    let (loaded, _) = read_wav(&path).unwrap();
    for (a, b) in loaded.iter().zip(&ir) {
        assert!((a - b).abs() < 1e-6, "{a} vs {b}");
    }
}

#[test]
fn stereo_file_gives_two_measurement_channels() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stereo.wav");
    let left = decay(256, 0.98);
    let right: Vec<f64> = left.iter().map(|x| -0.5 * x).collect();
    write_wav_channels(&path, &[left.clone(), right.clone()], WavSpec::default()).unwrap();

    let (channels, spec) = read_wav_channels(&path).unwrap();
    assert_eq!(spec.channels, 2);
    assert_eq!(channels.len(), 2);
    assert_eq!(channels[0].len(), 256);
    assert!((channels[1][0] + 0.5).abs() < 1e-7);

    let (mono, _) = read_wav(&path).unwrap();
    assert!((mono[0] - 0.25).abs() < 1e-7);
}

#[test]
fn file_system_errors_are_wav_errors() {
    let dir = TempDir::new().unwrap();
    let err = read_wav(dir.path().join("absent.wav")).unwrap_err();
    // file system failures arrive through hound
    assert!(matches!(err, Error::Wav(hound::Error::IoError(_))), "got: {err}");

    let err = write_wav(dir.path().join("no/such/dir/out.wav"), &[0.0], WavSpec::default())
        .unwrap_err();
    assert!(matches!(err, Error::Wav(hound::Error::IoError(_))), "got: {err}");
}
