//! Parameter listing command.

use clap::Args;

use umbral_core::ParameterInfo;
use umbral_dsp::ThresholdCrusher;

#[derive(Args)]
pub struct ParamsArgs {
    /// Show current values for a fresh engine instead of defaults only
    #[arg(long)]
    values: bool,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let crusher = ThresholdCrusher::new(48000.0);

    println!("Crusher Parameters:");
    println!();
    println!(
        "  {:16}  {:14}  {:>10}  {:>18}",
        "ID", "Name", "Default", "Range"
    );
    println!(
        "  {:16}  {:14}  {:>10}  {:>18}",
        "--", "----", "-------", "-----"
    );

    for i in 0..crusher.param_count() {
        let Some(desc) = crusher.param_info(i) else {
            continue;
        };
        let shown = if args.values {
            crusher.get_param(i)
        } else {
            desc.default
        };
        println!(
            "  {:16}  {:14}  {:>9.1}{:<4}  {:>8.1} to {:>6.1}",
            desc.string_id,
            desc.name,
            shown,
            desc.unit.suffix(),
            desc.min,
            desc.max
        );
    }

    println!();
    println!("Override with: umbral process in.wav out.wav --param threshold_db=-24");
    Ok(())
}
