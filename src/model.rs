//! Harmonic data model.
//!
//! A `HarmonicSet` is the only input that varies between engine calls. The
//! engine reads it by slice; it never mutates it.

use std::f64::consts::PI;

use crate::error::{Result, TriplenError};

/// Amplitude given to the fundamental in a freshly created set.
pub const DEFAULT_FUNDAMENTAL_AMPLITUDE: f64 = 100.0;

/// One frequency component of a periodic current.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Harmonic {
    /// Harmonic order k (multiple of the fundamental), >= 1.
    pub order: u32,
    /// Peak amplitude, >= 0.
    pub amplitude: f64,
    /// Phase in radians. Any real value is accepted for computation.
    pub phase: f64,
    /// Disabled harmonics keep their amplitude/phase but contribute nothing.
    pub enabled: bool,
}

impl Harmonic {
    /// An enabled harmonic.
    pub fn new(order: u32, amplitude: f64, phase: f64) -> Self {
        Self {
            order,
            amplitude,
            phase,
            enabled: true,
        }
    }

    /// A disabled harmonic with zero amplitude and phase.
    pub fn disabled(order: u32) -> Self {
        Self {
            order,
            amplitude: 0.0,
            phase: 0.0,
            enabled: false,
        }
    }

    pub fn is_triplen(&self) -> bool {
        self.order % 3 == 0
    }
}

/// Ordered harmonics with unique orders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HarmonicSet {
    harmonics: Vec<Harmonic>,
}

impl HarmonicSet {
    /// Build a set, rejecting duplicate or zero orders and negative or
    /// non-finite amplitudes. Order of `harmonics` is preserved.
    pub fn new(harmonics: Vec<Harmonic>) -> Result<Self> {
        for (i, h) in harmonics.iter().enumerate() {
            if h.order == 0 {
                return Err(TriplenError::Config(format!(
                    "harmonic #{i}: order must be >= 1"
                )));
            }
            if !h.amplitude.is_finite() || h.amplitude < 0.0 {
                return Err(TriplenError::Config(format!(
                    "harmonic k={}: amplitude must be finite and non-negative, got {}",
                    h.order, h.amplitude
                )));
            }
            if !h.phase.is_finite() {
                return Err(TriplenError::Config(format!(
                    "harmonic k={}: phase must be finite",
                    h.order
                )));
            }
            if harmonics[..i].iter().any(|prev| prev.order == h.order) {
                return Err(TriplenError::Config(format!(
                    "duplicate harmonic order k={}",
                    h.order
                )));
            }
        }
        Ok(Self { harmonics })
    }

    /// Orders `1..=k_max`, only the fundamental enabled at
    /// [`DEFAULT_FUNDAMENTAL_AMPLITUDE`]. `k_max == 0` gives an empty set.
    pub fn with_default_fundamental(k_max: u32) -> Self {
        let harmonics = (1..=k_max)
            .map(|k| {
                if k == 1 {
                    Harmonic::new(1, DEFAULT_FUNDAMENTAL_AMPLITUDE, 0.0)
                } else {
                    Harmonic::disabled(k)
                }
            })
            .collect();
        Self { harmonics }
    }

    pub fn as_slice(&self) -> &[Harmonic] {
        &self.harmonics
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Harmonic> {
        self.harmonics.iter()
    }

    pub fn len(&self) -> usize {
        self.harmonics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.harmonics.is_empty()
    }

    pub fn get(&self, order: u32) -> Option<&Harmonic> {
        self.harmonics.iter().find(|h| h.order == order)
    }

    pub(crate) fn get_mut(&mut self, order: u32) -> Option<&mut Harmonic> {
        self.harmonics.iter_mut().find(|h| h.order == order)
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Harmonic> {
        self.harmonics.iter_mut()
    }

    pub fn enabled_count(&self) -> usize {
        self.harmonics.iter().filter(|h| h.enabled).count()
    }
}

impl<'a> IntoIterator for &'a HarmonicSet {
    type Item = &'a Harmonic;
    type IntoIter = std::slice::Iter<'a, Harmonic>;

    fn into_iter(self) -> Self::IntoIter {
        self.harmonics.iter()
    }
}

/// Circuit topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Phase a only.
    Single,
    /// Phases a, b, c plus neutral.
    #[default]
    ThreePhase,
}

/// Source phase angles of phases b and c, in degrees, applied to the
/// fundamental only. Models an unbalanced source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FundamentalPhaseOffsets {
    pub phase_b: f64,
    pub phase_c: f64,
}

impl Default for FundamentalPhaseOffsets {
    /// Balanced: b lags by 120°, c leads by 120°.
    fn default() -> Self {
        Self {
            phase_b: -120.0,
            phase_c: 120.0,
        }
    }
}

/// Phase leg whose fundamental angle can be overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseLeg {
    B,
    C,
}

/// Which harmonics feed the phasor diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhasorSelection {
    /// k == 1.
    #[default]
    Fundamental,
    /// A single order.
    Rank(u32),
    /// All enabled harmonics; also yields the symmetrical components.
    Resultant,
    /// k mod 3 == 1.
    SequenceDirect,
    /// k mod 3 == 2.
    SequenceInverse,
    /// k mod 3 == 0.
    SequenceHomopolar,
}

/// Spectrum display filter over the mod-6 classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceFilter {
    #[default]
    All,
    Triplen,
    Positive,
    Negative,
}

/// Canned harmonic configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Fundamental only.
    Pure,
    /// Odd harmonics at 100/k.
    Square,
    /// Six-pulse rectifier line current: k = 6n ± 1 up to 23, at 100/k.
    Rectifier6,
    /// Fundamental with 3rd and 9th.
    Triplen,
}

/// Map an angle in radians to (-π, π] for display.
pub fn normalize_phase(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn default_set_enables_only_fundamental() {
        let set = HarmonicSet::with_default_fundamental(25);
        assert_eq!(set.len(), 25);
        assert_eq!(set.enabled_count(), 1);
        let h1 = set.get(1).unwrap();
        assert!(h1.enabled);
        assert_abs_diff_eq!(h1.amplitude, 100.0);
        assert!(set.iter().skip(1).all(|h| !h.enabled && h.amplitude == 0.0));
        let orders: Vec<u32> = set.iter().map(|h| h.order).collect();
        assert_eq!(orders, (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn zero_k_max_gives_empty_set() {
        assert!(HarmonicSet::with_default_fundamental(0).is_empty());
    }

    #[test]
    fn duplicate_order_rejected() {
        let err = HarmonicSet::new(vec![Harmonic::new(3, 1.0, 0.0), Harmonic::new(3, 2.0, 0.0)])
            .unwrap_err()
            .to_string();
        assert!(err.contains("duplicate"), "got: {err}");
    }

    #[test]
    fn negative_amplitude_rejected() {
        assert!(HarmonicSet::new(vec![Harmonic::new(1, -1.0, 0.0)]).is_err());
    }

    #[test]
    fn zero_order_rejected() {
        assert!(HarmonicSet::new(vec![Harmonic::new(0, 1.0, 0.0)]).is_err());
    }

    #[test]
    fn non_contiguous_orders_accepted() {
        let set =
            HarmonicSet::new(vec![Harmonic::new(5, 1.0, 0.0), Harmonic::new(1, 2.0, 0.0)]).unwrap();
        assert_eq!(set.as_slice()[0].order, 5);
        assert_eq!(set.get(1).unwrap().amplitude, 2.0);
    }

    #[test]
    fn normalize_phase_range() {
        assert_abs_diff_eq!(normalize_phase(0.0), 0.0);
        assert_abs_diff_eq!(normalize_phase(PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_phase(-PI), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_phase(3.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_phase(-5.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_phase(7.0), 7.0 - 2.0 * PI, epsilon = 1e-12);
    }

    #[test]
    fn default_offsets_are_balanced() {
        let offsets = FundamentalPhaseOffsets::default();
        assert_eq!(offsets.phase_b, -120.0);
        assert_eq!(offsets.phase_c, 120.0);
    }
}
