//! RMS, peak and THD.
//!
//! RMS and peak are measured on the sampled window. THD is derived
//! analytically from the harmonic amplitudes: every component is an ideal
//! sinusoid over an integer number of periods, so the components are
//! orthogonal and the sampled spectrum would return the same amplitudes.
//!
//! ```text
//! THD(a,b,c) = 100 · sqrt(Σ_{k>1} A_k²) / A_1
//! THD(n)     = 100 · sqrt(Σ_{k≡0 mod 3} (3·A_k)²) / A_1
//! ```
//!
//! The neutral figure keeps the fundamental as its reference even though the
//! fundamental cancels in a balanced neutral.

use super::{Metrics, PhaseMetrics, SignalData};
use crate::model::{Harmonic, Mode};

/// Root mean square over every sample. Zero for an empty slice.
pub fn rms(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    let sum_sq = signal.iter().fold(0.0_f64, |acc, v| acc + v * v);
    (sum_sq / signal.len() as f64).sqrt()
}

/// Largest absolute sample. Zero for an empty slice.
pub fn peak(signal: &[f64]) -> f64 {
    signal.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
}

/// Amplitude of the enabled fundamental, or 0 when it is absent or disabled.
pub fn fundamental_amplitude(harmonics: &[Harmonic]) -> f64 {
    harmonics
        .iter()
        .find(|h| h.enabled && h.order == 1)
        .map_or(0.0, |h| h.amplitude)
}

/// Line-current THD in percent. 0 when there is no fundamental to divide by.
pub fn thd_line(harmonics: &[Harmonic]) -> f64 {
    let sum_sq = harmonics
        .iter()
        .filter(|h| h.enabled && h.order > 1)
        .fold(0.0_f64, |acc, h| acc + h.amplitude * h.amplitude);
    ratio_percent(sum_sq.sqrt(), fundamental_amplitude(harmonics))
}

/// Neutral THD in percent: triplens add three-fold in the neutral, referred
/// to the fundamental amplitude. 0 when there is no fundamental.
pub fn thd_neutral(harmonics: &[Harmonic]) -> f64 {
    let sum_sq = harmonics
        .iter()
        .filter(|h| h.enabled && h.is_triplen())
        .fold(0.0_f64, |acc, h| {
            let a = 3.0 * h.amplitude;
            acc + a * a
        });
    ratio_percent(sum_sq.sqrt(), fundamental_amplitude(harmonics))
}

fn ratio_percent(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        100.0 * num / den
    } else {
        0.0
    }
}

/// Per-conductor metrics for a harmonic set and the window synthesized from it.
///
/// Phases b and c report phase a's THD: the rotation changes phases, not
/// amplitude ratios. In single-phase mode b, c and n carry zero RMS and peak,
/// and the neutral THD is zero.
pub fn compute(harmonics: &[Harmonic], signal: &SignalData, mode: Mode) -> Metrics {
    let _span = tracing::debug_span!("metrics", n_harmonics = harmonics.len(), ?mode).entered();

    let thd = thd_line(harmonics);
    let a = PhaseMetrics {
        thd,
        rms: rms(&signal.ia),
        peak: peak(&signal.ia),
    };

    match mode {
        Mode::Single => {
            let idle = PhaseMetrics {
                thd,
                ..PhaseMetrics::default()
            };
            Metrics {
                a,
                b: idle,
                c: idle,
                n: PhaseMetrics::default(),
            }
        }
        Mode::ThreePhase => Metrics {
            a,
            b: PhaseMetrics {
                thd,
                rms: rms(&signal.ib),
                peak: peak(&signal.ib),
            },
            c: PhaseMetrics {
                thd,
                rms: rms(&signal.ic),
                peak: peak(&signal.ic),
            },
            n: PhaseMetrics {
                thd: thd_neutral(harmonics),
                rms: rms(&signal.in_),
                peak: peak(&signal.in_),
            },
        },
    }
}
