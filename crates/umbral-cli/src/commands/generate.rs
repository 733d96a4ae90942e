//! Test signal generation command.
//!
//! Produces mono WAV files for exercising the crusher: tones, noise,
//! impulses, silence, and a level staircase that sweeps the detector
//! across its range.

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use umbral_core::db_to_linear;
use umbral_io::{WavSpec, write_wav};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a sine tone
    Tone {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,
    },

    /// Generate white noise
    Noise {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,
    },

    /// Generate an impulse
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Length in samples
        #[arg(long, default_value = "48000")]
        length: usize,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Impulse amplitude
        #[arg(long, default_value = "1.0")]
        amplitude: f32,
    },

    /// Generate silence
    Silence {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Duration in seconds
        #[arg(long, default_value = "1.0")]
        duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,
    },

    /// Generate a sine tone stepping up in level, for threshold sweeps
    Staircase {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Starting level in dBFS
        #[arg(long, default_value = "-48.0")]
        start_db: f32,

        /// Level increment per step in dB
        #[arg(long, default_value = "6.0")]
        step_db: f32,

        /// Number of steps
        #[arg(long, default_value = "8")]
        steps: usize,

        /// Duration of each step in seconds
        #[arg(long, default_value = "0.5")]
        step_duration: f32,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    match args.command {
        GenerateCommand::Tone {
            output,
            freq,
            duration,
            sample_rate,
            amplitude,
        } => {
            println!("Generating sine tone...");
            println!("  {} Hz for {:.2}s", freq, duration);

            let num_samples = (duration * sample_rate as f32) as usize;
            let samples: Vec<f32> = (0..num_samples)
                .map(|i| {
                    let t = i as f32 / sample_rate as f32;
                    (2.0 * std::f32::consts::PI * freq * t).sin() * amplitude
                })
                .collect();

            write_mono(&output, &samples, sample_rate)?;
        }

        GenerateCommand::Noise {
            output,
            duration,
            sample_rate,
            amplitude,
        } => {
            println!("Generating white noise...");
            println!("  {:.2}s at {} Hz", duration, sample_rate);

            let num_samples = (duration * sample_rate as f32) as usize;
            let samples: Vec<f32> = (0..num_samples)
                .map(|_| (rand_f32() * 2.0 - 1.0) * amplitude)
                .collect();

            write_mono(&output, &samples, sample_rate)?;
        }

        GenerateCommand::Impulse {
            output,
            length,
            sample_rate,
            amplitude,
        } => {
            println!("Generating impulse...");

            let mut samples = vec![0.0; length];
            if !samples.is_empty() {
                samples[0] = amplitude;
            }

            write_mono(&output, &samples, sample_rate)?;
        }

        GenerateCommand::Silence {
            output,
            duration,
            sample_rate,
        } => {
            println!("Generating silence...");
            println!("  {:.2}s at {} Hz", duration, sample_rate);

            let num_samples = (duration * sample_rate as f32) as usize;
            let samples = vec![0.0; num_samples];

            write_mono(&output, &samples, sample_rate)?;
        }

        GenerateCommand::Staircase {
            output,
            freq,
            start_db,
            step_db,
            steps,
            step_duration,
            sample_rate,
        } => {
            println!("Generating level staircase...");
            println!(
                "  {} steps of {:.2}s, {:.1} dB to {:.1} dB",
                steps,
                step_duration,
                start_db,
                start_db + step_db * steps.saturating_sub(1) as f32
            );

            let step_samples = (step_duration * sample_rate as f32) as usize;
            let mut samples = Vec::with_capacity(step_samples * steps);
            for step in 0..steps {
                let level = db_to_linear(start_db + step_db * step as f32).min(1.0);
                for i in 0..step_samples {
                    let t = i as f32 / sample_rate as f32;
                    samples.push((2.0 * std::f32::consts::PI * freq * t).sin() * level);
                }
            }

            write_mono(&output, &samples, sample_rate)?;
        }
    }

    Ok(())
}

fn write_mono(output: &Path, samples: &[f32], sample_rate: u32) -> anyhow::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
    };
    write_wav(output, samples, spec)?;
    println!("Wrote {} samples to {}", samples.len(), output.display());
    Ok(())
}

/// Simple PRNG for noise generation (xorshift32)
fn rand_f32() -> f32 {
    use std::cell::Cell;
    thread_local! {
        static STATE: Cell<u32> = const { Cell::new(0x12345678) };
    }

    STATE.with(|state| {
        let mut x = state.get();
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        state.set(x);
        (x as f32) / (u32::MAX as f32)
    })
}
