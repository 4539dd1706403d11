//! Walks through the library: optionally reads a dump, builds and edits a
//! patch, writes it out as a single dump and reads it back.
//!
//! Usage: `esq1_demo [INPUT.syx] [OUTPUT.syx]`

use std::path::PathBuf;

use clap::Parser;
use esq1::{simple_patch, sysex, Bounded, LfoWave, ModSource, Randomize, Waveform};
use rand::{rngs::SmallRng, SeedableRng};

#[derive(Parser)]
#[command(name = "esq1_demo")]
#[command(version, about = "Build an ESQ-1 patch and round-trip it through a SysEx dump")]
struct Args {
    /// Dump to read and list before building the example patch
    input: Option<PathBuf>,

    /// Where to write the single patch dump
    #[arg(default_value = "saved.syx")]
    output: PathBuf,
}

fn run(input: Option<PathBuf>, output: PathBuf) -> Result<(), esq1::Error> {
    if let Some(input) = input {
        let patches = sysex::load(&input)?;
        log::info!("{} contains {} patch(es)", input.display(), patches.len());
        for (i, patch) in patches.iter().enumerate() {
            log::info!("  {:2}: \"{}\"", i + 1, patch.name);
        }
    }

    let mut rng = SmallRng::from_entropy();

    // only six characters survive, upper-cased
    let mut patch = simple_patch();
    patch.name = "Example".into();
    patch.oscillators[0].waveform = Waveform::Square;

    patch.lfos[1].randomize(&mut rng);

    patch.oscillators[1] = patch.oscillators[0];
    let osc = &mut patch.oscillators[1];
    osc.waveform = Waveform::Formant5;
    osc.set_octave(1)?;
    osc.fine_tune.set(4)?;
    osc.frequency_modulation_sources[0] = ModSource::Lfo2;
    osc.frequency_modulation_amounts[0].set(4)?;

    patch.envelopes[0].levels[1].set(42)?;
    patch.envelopes[0].times[0].set(52)?;
    patch.envelopes[3].times[0].set(29)?;

    let lfo = &mut patch.lfos[0];
    lfo.frequency.randomize(&mut rng);
    lfo.humanize = true;
    lfo.levels[0].set(32)?;
    lfo.waveform = LfoWave::Saw;

    let misc = &mut patch.miscellaneous;
    misc.frequency.set(119)?;
    misc.resonance.set(14)?;
    misc.filter_modulation_sources[0] = ModSource::Lfo1;
    misc.filter_modulation_amount[0].set(-15)?;
    misc.pan.reset();

    let bytes = sysex::encode_for_channel(&[patch], wmidi::Channel::Ch1)?;
    std::fs::write(&output, &bytes)?;
    log::info!("wrote {} bytes to {}", bytes.len(), output.display());

    let read = sysex::load(&output)?;
    log::info!("read back patch \"{}\"", read[0].name);

    match serde_json::to_string_pretty(&read[0]) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("could not serialize patch: {}", e),
    }
    Ok(())
}

fn main() {
    colog::init();
    let args = Args::parse();
    if let Err(e) = run(args.input, args.output) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
