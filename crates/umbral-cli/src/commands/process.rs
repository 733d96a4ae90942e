//! File-based crusher processing command.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

use umbral_config::{Preset, factory_preset};
use umbral_core::{ParameterInfo, linear_to_db};
use umbral_dsp::{CrusherMeters, ThresholdCrusher};
use umbral_io::{StereoSamples, WavSpec, read_wav_stereo, write_wav_stereo};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset: a factory preset name or a path to a TOML file
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter override (e.g., "threshold_db=-24"), repeatable
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, f32)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

fn parse_key_val(s: &str) -> Result<(String, f32), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid parameter format: '{}' (expected key=value)",
            s
        ));
    }
    let value: f32 = parts[1]
        .trim()
        .parse()
        .map_err(|_| format!("Invalid numeric value in '{}'", s))?;
    Ok((parts[0].trim().to_string(), value))
}

/// Resolve a preset argument: existing file path first, factory name second.
fn resolve_preset(spec: &str) -> anyhow::Result<Preset> {
    let path = PathBuf::from(spec);
    if path.exists() {
        return Ok(Preset::load(&path)?);
    }
    Ok(factory_preset(spec)?)
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav_stereo(&args.input)?;
    let sample_rate = spec.sample_rate as f32;

    println!(
        "  {} frames, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        samples.len() as f32 / sample_rate
    );

    let mut crusher = ThresholdCrusher::new(sample_rate);

    if let Some(preset_spec) = &args.preset {
        let preset = resolve_preset(preset_spec)?;
        println!("Loading preset: {}", preset.name);
        preset.apply_to(&mut crusher);
    }

    for (key, value) in &args.param {
        let index = crusher
            .param_index_by_string_id(key)
            .ok_or_else(|| anyhow::anyhow!("Unknown parameter: '{}'", key))?;
        crusher.set_param(index, *value);
        tracing::debug!(param = %key, value, "override applied");
    }

    println!(
        "Processing: threshold {:.1} dB, bits {}..{}, hold x{}, clip {}...",
        crusher.threshold_db(),
        crusher.min_bit_depth(),
        crusher.max_bit_depth(),
        crusher.downsample_max(),
        if crusher.clip_enabled() { "on" } else { "off" }
    );

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("##-"),
    );

    let meters = CrusherMeters::new();
    let mut output = StereoSamples::silence(samples.len());
    let block_size = args.block_size.max(1);
    let mut max_crush: f32 = 0.0;

    let mut offset = 0;
    while offset < samples.len() {
        let end = (offset + block_size).min(samples.len());
        crusher.process_block_stereo_metered(
            &samples.left[offset..end],
            &samples.right[offset..end],
            &mut output.left[offset..end],
            &mut output.right[offset..end],
            &meters,
        );
        max_crush = max_crush.max(meters.crush_level());
        pb.set_position(end as u64);
        offset = end;
    }

    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input peak:  {:.1} dB",
        linear_to_db(samples.peak().max(1.0e-10))
    );
    println!(
        "  Output peak: {:.1} dB",
        linear_to_db(output.peak().max(1.0e-10))
    );
    println!("  Max crush:   {:.0}%", max_crush * 100.0);

    let out_spec = WavSpec {
        channels: 2,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_stereo(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}
