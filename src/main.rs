use clap::{Parser, ValueEnum};
use std::io;
use triplen::model::{Mode, PhaseLeg, PhasorSelection, Preset, SequenceFilter};
use triplen::output;
use triplen::state::EngineState;
use triplen::stats::Stats;

/// Harmonic waveform, distortion and phasor calculator
#[derive(Parser)]
#[command(name = "triplen", version)]
struct Cli {
    /// JSON configuration to load (f0, kMax, harmonics, mode)
    #[arg(long)]
    config: Option<String>,

    /// Load a preset harmonic set after the configuration
    #[arg(long, value_enum)]
    preset: Option<PresetArg>,

    /// Fundamental frequency in Hz
    #[arg(long)]
    f0: Option<f64>,

    /// Highest harmonic order
    #[arg(long)]
    k_max: Option<u32>,

    /// Circuit mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Time offset in seconds at which to evaluate (the instant itself for
    /// `--output point`)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    time: f64,

    /// Harmonics feeding the phasor output
    #[arg(long, value_enum, default_value_t = PhasorArg::Fundamental)]
    phasor: PhasorArg,

    /// Harmonic order used with `--phasor rank`
    #[arg(long, default_value_t = 1)]
    rank: u32,

    /// Fundamental source angle of phase b in degrees
    #[arg(long, allow_negative_numbers = true)]
    phase_b: Option<f64>,

    /// Fundamental source angle of phase c in degrees
    #[arg(long, allow_negative_numbers = true)]
    phase_c: Option<f64>,

    /// Spectrum filter for `--output spectrum`
    #[arg(long, value_enum, default_value_t = FilterArg::All)]
    filter: FilterArg,

    /// What to print
    #[arg(long, value_enum, default_value_t = OutputArg::Metrics)]
    output: OutputArg,

    /// Print performance stats to stderr
    #[arg(long)]
    stats: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Pure,
    Square,
    Rectifier6,
    Triplen,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Single,
    ThreePhase,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PhasorArg {
    Fundamental,
    Rank,
    Resultant,
    SequenceDirect,
    SequenceInverse,
    SequenceHomopolar,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    All,
    Triplen,
    Positive,
    Negative,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputArg {
    Signal,
    Metrics,
    Phasors,
    Components,
    Point,
    Spectrum,
    Config,
}

impl From<PresetArg> for Preset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::Pure => Preset::Pure,
            PresetArg::Square => Preset::Square,
            PresetArg::Rectifier6 => Preset::Rectifier6,
            PresetArg::Triplen => Preset::Triplen,
        }
    }
}

impl From<ModeArg> for Mode {
    fn from(m: ModeArg) -> Self {
        match m {
            ModeArg::Single => Mode::Single,
            ModeArg::ThreePhase => Mode::ThreePhase,
        }
    }
}

impl From<FilterArg> for SequenceFilter {
    fn from(f: FilterArg) -> Self {
        match f {
            FilterArg::All => SequenceFilter::All,
            FilterArg::Triplen => SequenceFilter::Triplen,
            FilterArg::Positive => SequenceFilter::Positive,
            FilterArg::Negative => SequenceFilter::Negative,
        }
    }
}

fn phasor_selection(arg: PhasorArg, rank: u32) -> PhasorSelection {
    match arg {
        PhasorArg::Fundamental => PhasorSelection::Fundamental,
        PhasorArg::Rank => PhasorSelection::Rank(rank),
        PhasorArg::Resultant => PhasorSelection::Resultant,
        PhasorArg::SequenceDirect => PhasorSelection::SequenceDirect,
        PhasorArg::SequenceInverse => PhasorSelection::SequenceInverse,
        PhasorArg::SequenceHomopolar => PhasorSelection::SequenceHomopolar,
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut stats = if cli.stats { Some(Stats::new()) } else { None };

    let mut state = EngineState::default();

    if let Some(path) = &cli.config {
        let json = std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading {}: {}", path, e);
            std::process::exit(1);
        });
        state = state.import_config(&json).unwrap_or_else(|e| {
            eprintln!("Config error: {}", e);
            std::process::exit(1);
        });
    }

    if let Some(k_max) = cli.k_max {
        // Harmonic count is clamped by the host; the engine does not check it.
        state = state.with_k_max(k_max.max(1));
    }
    if let Some(preset) = cli.preset {
        state = state.with_preset(preset.into());
    }
    if let Some(f0) = cli.f0 {
        state = state.with_f0(f0);
    }
    if let Some(mode) = cli.mode {
        state = state.with_mode(mode.into());
    }
    if let Some(deg) = cli.phase_b {
        state = state.with_fundamental_phase(PhaseLeg::B, deg);
    }
    if let Some(deg) = cli.phase_c {
        state = state.with_fundamental_phase(PhaseLeg::C, deg);
    }
    state = state
        .with_phasor_selection(phasor_selection(cli.phasor, cli.rank))
        .with_sequence_filter(cli.filter.into());

    // Flags and a loaded config both land here unchecked.
    state.validate().unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    if let Some(ref mut s) = stats {
        s.harmonics_total = state.harmonics.len();
        s.harmonics_enabled = state.harmonics.enabled_count();
    }

    let mut stdout = io::stdout();

    let written = match cli.output {
        OutputArg::Signal | OutputArg::Metrics => {
            let signal = match stats.as_mut() {
                Some(s) => s.time("synthesize", || state.signal(cli.time)),
                None => state.signal(cli.time),
            };
            if let Some(ref mut s) = stats {
                s.samples = signal.len();
            }
            if cli.output == OutputArg::Signal {
                output::write_signal_csv(&signal, &mut stdout)
            } else {
                let metrics = match stats.as_mut() {
                    Some(s) => s.time("metrics", || state.metrics(&signal)),
                    None => state.metrics(&signal),
                };
                output::write_metrics_csv(&metrics, &mut stdout)
            }
        }
        OutputArg::Phasors => {
            let phasors = match stats.as_mut() {
                Some(s) => s.time("phasors", || state.phasors(cli.time)),
                None => state.phasors(cli.time),
            };
            output::write_phasors_csv(&phasors, &mut stdout)
        }
        OutputArg::Components => {
            let components = match stats.as_mut() {
                Some(s) => s.time("components", || state.components(cli.time)),
                None => state.components(cli.time),
            };
            if let Some(ref mut s) = stats {
                s.samples = components.t.len();
            }
            output::write_components_csv(&components, &mut stdout)
        }
        OutputArg::Point => output::write_point_csv(&state.point(cli.time), &mut stdout),
        OutputArg::Spectrum => output::write_spectrum_csv(&state.spectrum(), &mut stdout),
        OutputArg::Config => state.export_config().and_then(|json| {
            use std::io::Write;
            writeln!(stdout, "{}", json)?;
            Ok(())
        }),
    };

    written.unwrap_or_else(|e| {
        eprintln!("Output error: {}", e);
        std::process::exit(1);
    });

    if let Some(ref stats) = stats {
        stats.display();
    }
}
