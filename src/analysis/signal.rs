//! Time-domain synthesis.
//!
//! For each enabled harmonic of order k, amplitude A and phase φ:
//!
//! ```text
//! θ(t) = k·ω0·(t + offset) + φ
//! ia  += A·sin(θ)
//! ib  += A·sin(θ + shift_b(k))      (three-phase only)
//! ic  += A·sin(θ + shift_c(k))
//! in   = ia + ib + ic               (after superposition)
//! ```
//!
//! The window is always [`super::PERIODS`] fundamental periods at
//! [`SAMPLES_PER_PERIOD`] samples per period, whatever the highest order.

use super::{
    omega0, phase_shifts, ComponentData, ComponentSignal, PointBreakdown, SignalData,
    SAMPLES_PER_PERIOD, TOTAL_SAMPLES,
};
use crate::model::{FundamentalPhaseOffsets, Harmonic, Mode};

/// Synthesize one window of phase (and neutral) currents.
///
/// `f0` must be > 0. It is not checked here; a non-positive value yields a
/// meaningless time axis (infinite or negative instants).
pub fn synthesize(
    harmonics: &[Harmonic],
    f0: f64,
    mode: Mode,
    time_offset: f64,
    offsets: Option<&FundamentalPhaseOffsets>,
) -> SignalData {
    let _span = tracing::debug_span!(
        "synthesize",
        n_harmonics = harmonics.len(),
        ?mode,
        samples = TOTAL_SAMPLES
    )
    .entered();

    let t = sample_times(f0);
    let w0 = omega0(f0);
    let three_phase = mode == Mode::ThreePhase;

    let mut ia = vec![0.0; TOTAL_SAMPLES];
    let (mut ib, mut ic) = if three_phase {
        (vec![0.0; TOTAL_SAMPLES], vec![0.0; TOTAL_SAMPLES])
    } else {
        (Vec::new(), Vec::new())
    };

    for h in harmonics.iter().filter(|h| h.enabled) {
        let k = h.order as f64;
        let amp = h.amplitude;
        let (shift_b, shift_c) = phase_shifts(h.order, offsets);

        for (i, &ti) in t.iter().enumerate() {
            let angle = k * w0 * (ti + time_offset) + h.phase;
            ia[i] += amp * angle.sin();
            if three_phase {
                ib[i] += amp * (angle + shift_b).sin();
                ic[i] += amp * (angle + shift_c).sin();
            }
        }
    }

    let in_ = if three_phase {
        ia.iter()
            .zip(&ib)
            .zip(&ic)
            .map(|((a, b), c)| a + b + c)
            .collect()
    } else {
        Vec::new()
    };

    SignalData { t, ia, ib, ic, in_ }
}

/// Phase-a waveform of every enabled harmonic over the window that
/// [`synthesize`] uses, plus their sum.
pub fn components(harmonics: &[Harmonic], f0: f64, time_offset: f64) -> ComponentData {
    let _span = tracing::debug_span!("components", n_harmonics = harmonics.len()).entered();

    let t = sample_times(f0);
    let w0 = omega0(f0);
    let mut sum = vec![0.0; TOTAL_SAMPLES];

    let components = harmonics
        .iter()
        .filter(|h| h.enabled)
        .map(|h| {
            let k = h.order as f64;
            let samples: Vec<f64> = t
                .iter()
                .map(|&ti| h.amplitude * (k * w0 * (ti + time_offset) + h.phase).sin())
                .collect();
            for (acc, v) in sum.iter_mut().zip(&samples) {
                *acc += v;
            }
            ComponentSignal {
                order: h.order,
                samples,
            }
        })
        .collect();

    ComponentData { t, components, sum }
}

/// Per-harmonic phase-a values at the instant `t`, and their sum.
pub fn point(harmonics: &[Harmonic], f0: f64, t: f64) -> PointBreakdown {
    let w0 = omega0(f0);
    let values: Vec<(u32, f64)> = harmonics
        .iter()
        .filter(|h| h.enabled)
        .map(|h| (h.order, h.amplitude * (h.order as f64 * w0 * t + h.phase).sin()))
        .collect();
    let sum = values.iter().fold(0.0_f64, |acc, (_, v)| acc + v);
    PointBreakdown { t, values, sum }
}

/// Sample instants covering [`super::PERIODS`] periods of `f0`, starting at 0.
pub fn sample_times(f0: f64) -> Vec<f64> {
    let period = 1.0 / f0;
    (0..TOTAL_SAMPLES)
        .map(|i| (i as f64 / SAMPLES_PER_PERIOD as f64) * period)
        .collect()
}
