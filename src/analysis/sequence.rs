//! Symmetrical-component decomposition.
//!
//! Each enabled harmonic is assigned to direct, inverse or homopolar by
//! k mod 3 and its phase-a phasor is summed into that class. No per-phase
//! shift rule applies here: the classes are phase-invariant by construction.

use num_complex::Complex64;

use super::classify::SequenceKind;
use super::{omega0, SequencePhasors};
use crate::model::{FundamentalPhaseOffsets, Harmonic};

/// Direct, inverse and homopolar phasors of the full enabled set at
/// `time_offset`.
///
/// Takes the same source offsets as the phasor engine; they do not affect
/// the result.
pub fn decompose(
    harmonics: &[Harmonic],
    time_offset: f64,
    f0: f64,
    _offsets: Option<&FundamentalPhaseOffsets>,
) -> SequencePhasors {
    let _span = tracing::debug_span!("sequences", n_harmonics = harmonics.len()).entered();

    let w0 = omega0(f0);
    let mut direct = Complex64::new(0.0, 0.0);
    let mut inverse = Complex64::new(0.0, 0.0);
    let mut homopolar = Complex64::new(0.0, 0.0);

    for h in harmonics.iter().filter(|h| h.enabled) {
        let angle = h.order as f64 * w0 * time_offset + h.phase;
        let z = Complex64::from_polar(h.amplitude, angle);
        match SequenceKind::of(h.order) {
            SequenceKind::Direct => direct += z,
            SequenceKind::Inverse => inverse += z,
            SequenceKind::Homopolar => homopolar += z,
        }
    }

    SequencePhasors {
        direct: direct.into(),
        inverse: inverse.into(),
        homopolar: homopolar.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn lone_second_harmonic_is_inverse() {
        let seq = decompose(&[Harmonic::new(2, 40.0, 0.0)], 0.0, 50.0, None);
        assert_abs_diff_eq!(seq.inverse.magnitude, 40.0, epsilon = 1e-12);
        assert_eq!(seq.direct.magnitude, 0.0);
        assert_eq!(seq.homopolar.magnitude, 0.0);
    }

    #[test]
    fn classes_accumulate_as_complex_sums() {
        // k=1 at 0 rad and k=4 at π cancel in the direct class.
        let h = [
            Harmonic::new(1, 10.0, 0.0),
            Harmonic::new(4, 10.0, PI),
            Harmonic::new(3, 5.0, PI / 2.0),
            Harmonic::new(6, 5.0, PI / 2.0),
        ];
        let seq = decompose(&h, 0.0, 50.0, None);
        assert_abs_diff_eq!(seq.direct.magnitude, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(seq.homopolar.magnitude, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(seq.homopolar.angle, PI / 2.0, epsilon = 1e-12);
        assert_eq!(seq.inverse.magnitude, 0.0);
    }

    #[test]
    fn angle_advances_with_order_and_time() {
        let f0 = 50.0;
        // A twelfth of a period advances k=2 by 60°.
        let t = 1.0 / (12.0 * f0);
        let seq = decompose(&[Harmonic::new(2, 1.0, 0.0)], t, f0, None);
        assert_abs_diff_eq!(seq.inverse.angle_degrees(), 60.0, epsilon = 1e-9);
    }

    #[test]
    fn offsets_do_not_affect_sequences() {
        let h = [Harmonic::new(1, 100.0, 0.3), Harmonic::new(5, 20.0, 0.0)];
        let offsets = FundamentalPhaseOffsets {
            phase_b: -100.0,
            phase_c: 140.0,
        };
        assert_eq!(
            decompose(&h, 0.01, 50.0, None),
            decompose(&h, 0.01, 50.0, Some(&offsets))
        );
    }

    #[test]
    fn disabled_harmonics_skipped() {
        let mut h = Harmonic::new(2, 40.0, 0.0);
        h.enabled = false;
        let seq = decompose(&[h], 0.0, 50.0, None);
        assert_eq!(seq, SequencePhasors::default());
    }
}
