//! Harmonic order classification.
//!
//! Two schemes live side by side and are deliberately kept apart:
//!
//! - [`SequenceKind`] (k mod 3) drives the symmetrical-component split and the
//!   sequence phasor selections.
//! - [`SpectrumClass`] (k mod 6, triplens first) drives spectrum display and
//!   [`SequenceFilter`].
//!
//! They agree on triplens but not elsewhere: k = 4 is `Direct` yet `None`.

use crate::model::SequenceFilter;

/// Symmetrical-component class of a harmonic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    /// k mod 3 == 1 (1, 4, 7, 10, ...).
    Direct,
    /// k mod 3 == 2 (2, 5, 8, 11, ...).
    Inverse,
    /// k mod 3 == 0 (3, 6, 9, ...).
    Homopolar,
}

impl SequenceKind {
    pub fn of(order: u32) -> Self {
        match order % 3 {
            0 => SequenceKind::Homopolar,
            1 => SequenceKind::Direct,
            _ => SequenceKind::Inverse,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SequenceKind::Direct => "direct",
            SequenceKind::Inverse => "inverse",
            SequenceKind::Homopolar => "homopolar",
        }
    }
}

/// Spectrum display class of a harmonic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectrumClass {
    /// k mod 3 == 0.
    Triplen,
    /// k mod 6 == 1.
    Positive,
    /// k mod 6 == 5.
    Negative,
    /// Even non-triplen orders (k mod 6 in {2, 4}).
    None,
}

impl SpectrumClass {
    pub fn of(order: u32) -> Self {
        if order % 3 == 0 {
            SpectrumClass::Triplen
        } else if order % 6 == 1 {
            SpectrumClass::Positive
        } else if order % 6 == 5 {
            SpectrumClass::Negative
        } else {
            SpectrumClass::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpectrumClass::Triplen => "triplen",
            SpectrumClass::Positive => "positive",
            SpectrumClass::Negative => "negative",
            SpectrumClass::None => "none",
        }
    }
}

impl SequenceFilter {
    /// Whether a harmonic of `order` is shown under this filter.
    pub fn matches(&self, order: u32) -> bool {
        let class = SpectrumClass::of(order);
        match self {
            SequenceFilter::All => true,
            SequenceFilter::Triplen => class == SpectrumClass::Triplen,
            SequenceFilter::Positive => class == SpectrumClass::Positive,
            SequenceFilter::Negative => class == SpectrumClass::Negative,
        }
    }
}
