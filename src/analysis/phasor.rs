//! Per-phase steady-state phasors at a fixed instant.
//!
//! Uses the same per-phase angle rule as the synthesizer, evaluated once at
//! `time_offset` instead of swept over a window. The neutral phasor is the
//! complex sum of the three phase accumulators.

use num_complex::Complex64;

use super::sequence::decompose;
use super::{omega0, phase_shifts, PhasorData};
use crate::model::{FundamentalPhaseOffsets, Harmonic, PhasorSelection};

impl PhasorSelection {
    /// Whether an enabled harmonic of `order` takes part in this selection.
    pub fn includes(&self, order: u32) -> bool {
        match self {
            PhasorSelection::Fundamental => order == 1,
            PhasorSelection::Rank(rank) => order == *rank,
            PhasorSelection::Resultant => true,
            PhasorSelection::SequenceDirect => order % 3 == 1,
            PhasorSelection::SequenceInverse => order % 3 == 2,
            PhasorSelection::SequenceHomopolar => order % 3 == 0,
        }
    }
}

/// Phasors of phases a, b, c and neutral for the harmonics picked by
/// `selection`.
///
/// Only [`PhasorSelection::Resultant`] fills `sequences`, computed from the
/// whole enabled set.
pub fn compute(
    harmonics: &[Harmonic],
    selection: PhasorSelection,
    time_offset: f64,
    f0: f64,
    offsets: Option<&FundamentalPhaseOffsets>,
) -> PhasorData {
    let _span =
        tracing::debug_span!("phasors", n_harmonics = harmonics.len(), ?selection).entered();

    let w0 = omega0(f0);
    let mut ia = Complex64::new(0.0, 0.0);
    let mut ib = Complex64::new(0.0, 0.0);
    let mut ic = Complex64::new(0.0, 0.0);

    for h in harmonics
        .iter()
        .filter(|h| h.enabled && selection.includes(h.order))
    {
        let angle = h.order as f64 * w0 * time_offset + h.phase;
        let (shift_b, shift_c) = phase_shifts(h.order, offsets);
        ia += Complex64::from_polar(h.amplitude, angle);
        ib += Complex64::from_polar(h.amplitude, angle + shift_b);
        ic += Complex64::from_polar(h.amplitude, angle + shift_c);
    }

    let sequences = match selection {
        PhasorSelection::Resultant => Some(decompose(harmonics, time_offset, f0, offsets)),
        _ => None,
    };

    PhasorData {
        ia: ia.into(),
        ib: ib.into(),
        ic: ic.into(),
        in_: (ia + ib + ic).into(),
        sequences,
    }
}
