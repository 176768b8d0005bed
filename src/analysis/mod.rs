//! Harmonic engine: waveform synthesis, metrics, phasors and symmetrical
//! components.
//!
//! All entry points are pure functions. Outputs are freshly allocated value
//! objects holding no reference back into their inputs.

pub mod classify;
pub mod metrics;
pub mod phasor;
pub mod sequence;
pub mod signal;

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::model::FundamentalPhaseOffsets;

/// Fundamental periods covered by one synthesized window.
pub const PERIODS: usize = 3;
/// Samples per fundamental period.
pub const SAMPLES_PER_PERIOD: usize = 500;
/// Total samples in a window.
pub const TOTAL_SAMPLES: usize = PERIODS * SAMPLES_PER_PERIOD;

/// Sampled currents over one window.
///
/// `ib`, `ic` and `in_` are empty in single-phase mode; otherwise every
/// array has the length of `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalData {
    /// Sample instants (s), starting at 0.
    pub t: Vec<f64>,
    pub ia: Vec<f64>,
    pub ib: Vec<f64>,
    pub ic: Vec<f64>,
    /// Neutral current, `ia + ib + ic`.
    pub in_: Vec<f64>,
}

impl SignalData {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn is_three_phase(&self) -> bool {
        !self.ib.is_empty()
    }
}

/// Phase-a waveform of one harmonic on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSignal {
    pub order: u32,
    pub samples: Vec<f64>,
}

/// Phase-a current split into its enabled harmonics over one window.
///
/// `components` follow set order; `sum` is their superposition and equals
/// the `ia` of [`SignalData`] for the same inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentData {
    pub t: Vec<f64>,
    pub components: Vec<ComponentSignal>,
    pub sum: Vec<f64>,
}

/// Instantaneous phase-a contribution of each enabled harmonic at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct PointBreakdown {
    pub t: f64,
    /// `(order, value)` in set order.
    pub values: Vec<(u32, f64)>,
    pub sum: f64,
}

/// Summary values for one conductor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhaseMetrics {
    /// Total harmonic distortion, percent.
    pub thd: f64,
    pub rms: f64,
    pub peak: f64,
}

/// Summary values for phases a, b, c and neutral.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Metrics {
    pub a: PhaseMetrics,
    pub b: PhaseMetrics,
    pub c: PhaseMetrics,
    pub n: PhaseMetrics,
}

/// Steady-state complex representation of a sinusoidal quantity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Phasor {
    pub magnitude: f64,
    /// Radians, `atan2(im, re)`.
    pub angle: f64,
}

impl Phasor {
    pub fn angle_degrees(&self) -> f64 {
        self.angle.to_degrees()
    }
}

impl From<Complex64> for Phasor {
    fn from(z: Complex64) -> Self {
        Self {
            magnitude: z.norm(),
            angle: z.arg(),
        }
    }
}

/// Direct, inverse and homopolar sequence phasors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SequencePhasors {
    pub direct: Phasor,
    pub inverse: Phasor,
    pub homopolar: Phasor,
}

/// Phasors of the four conductors, plus symmetrical components when the
/// resultant selection was requested.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhasorData {
    pub ia: Phasor,
    pub ib: Phasor,
    pub ic: Phasor,
    pub in_: Phasor,
    pub sequences: Option<SequencePhasors>,
}

/// Angle added to phase a's instantaneous angle to obtain phases b and c
/// for a harmonic of order `order`.
///
/// Triplen orders are in phase on all three legs (3 × 120° = 360°). The
/// fundamental takes the source offsets when given. Everything else follows
/// the rotating frame scaled by order: b at −120°·k, c at +120°·k.
pub(crate) fn phase_shifts(order: u32, offsets: Option<&FundamentalPhaseOffsets>) -> (f64, f64) {
    if order % 3 == 0 {
        return (0.0, 0.0);
    }
    match offsets {
        Some(o) if order == 1 => (o.phase_b.to_radians(), o.phase_c.to_radians()),
        _ => {
            let step = (2.0 * PI / 3.0) * order as f64;
            (-step, step)
        }
    }
}

/// Angular frequency of the fundamental.
pub(crate) fn omega0(f0: f64) -> f64 {
    2.0 * PI * f0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn triplen_orders_unshifted() {
        for k in [3, 6, 9, 21] {
            assert_eq!(phase_shifts(k, None), (0.0, 0.0));
            assert_eq!(phase_shifts(k, Some(&FundamentalPhaseOffsets::default())), (0.0, 0.0));
        }
    }

    #[test]
    fn fundamental_override_in_degrees() {
        let offsets = FundamentalPhaseOffsets {
            phase_b: -90.0,
            phase_c: 150.0,
        };
        let (b, c) = phase_shifts(1, Some(&offsets));
        assert_abs_diff_eq!(b, -PI / 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(c, 5.0 * PI / 6.0, epsilon = 1e-15);
    }

    #[test]
    fn override_only_touches_fundamental() {
        let offsets = FundamentalPhaseOffsets {
            phase_b: 10.0,
            phase_c: 20.0,
        };
        let (b, c) = phase_shifts(5, Some(&offsets));
        assert_abs_diff_eq!(b, -10.0 * PI / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c, 10.0 * PI / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn rotating_frame_scales_with_order() {
        let (b, c) = phase_shifts(2, None);
        assert_abs_diff_eq!(b, -4.0 * PI / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c, 4.0 * PI / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn phasor_from_complex() {
        let p = Phasor::from(Complex64::new(0.0, 2.0));
        assert_abs_diff_eq!(p.magnitude, 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(p.angle_degrees(), 90.0, epsilon = 1e-12);
        let zero = Phasor::from(Complex64::new(0.0, 0.0));
        assert_eq!(zero.magnitude, 0.0);
        assert_eq!(zero.angle, 0.0);
    }
}
