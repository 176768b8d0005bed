//! Host-owned engine state.
//!
//! `EngineState` is a plain value. Every update takes `&self` and returns a
//! new state, so a failed update (a rejected import, say) leaves the caller's
//! value exactly as it was. The "tick" helpers at the bottom feed the current
//! state to the pure engine functions.

use crate::analysis::{
    metrics, phasor, signal, ComponentData, Metrics, PhasorData, PointBreakdown, SignalData,
};
use crate::config::{self, EngineConfig};
use crate::error::{Result, TriplenError};
use crate::model::{
    FundamentalPhaseOffsets, Harmonic, HarmonicSet, Mode, PhaseLeg, PhasorSelection, Preset,
    SequenceFilter,
};

pub const DEFAULT_F0: f64 = 50.0;
pub const DEFAULT_K_MAX: u32 = 25;

const RECTIFIER6_ORDERS: [u32; 8] = [1, 5, 7, 11, 13, 17, 19, 23];

/// Partial edit of one harmonic. `None` fields are left alone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HarmonicPatch {
    pub amplitude: Option<f64>,
    pub phase: Option<f64>,
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineState {
    /// Fundamental frequency (Hz). Must be > 0 before any tick.
    pub f0: f64,
    pub k_max: u32,
    pub harmonics: HarmonicSet,
    pub mode: Mode,
    pub sequence_filter: SequenceFilter,
    pub phasor_selection: PhasorSelection,
    pub fundamental_phases: FundamentalPhaseOffsets,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            f0: DEFAULT_F0,
            k_max: DEFAULT_K_MAX,
            harmonics: HarmonicSet::with_default_fundamental(DEFAULT_K_MAX),
            mode: Mode::ThreePhase,
            sequence_filter: SequenceFilter::All,
            phasor_selection: PhasorSelection::Fundamental,
            fundamental_phases: FundamentalPhaseOffsets::default(),
        }
    }
}

impl EngineState {
    pub fn with_f0(&self, f0: f64) -> Self {
        Self {
            f0,
            ..self.clone()
        }
    }

    pub fn with_mode(&self, mode: Mode) -> Self {
        Self {
            mode,
            ..self.clone()
        }
    }

    pub fn with_sequence_filter(&self, sequence_filter: SequenceFilter) -> Self {
        Self {
            sequence_filter,
            ..self.clone()
        }
    }

    pub fn with_phasor_selection(&self, phasor_selection: PhasorSelection) -> Self {
        Self {
            phasor_selection,
            ..self.clone()
        }
    }

    /// Resize to orders `1..=k_max`.
    ///
    /// Settings are carried over by position: the i-th harmonic of the new
    /// set takes amplitude, phase and enabled flag from the i-th of the old.
    pub fn with_k_max(&self, k_max: u32) -> Self {
        tracing::debug!(from = self.k_max, to = k_max, "resizing harmonic set");
        let mut harmonics = HarmonicSet::with_default_fundamental(k_max);
        for (new, old) in harmonics.iter_mut().zip(self.harmonics.iter()) {
            new.amplitude = old.amplitude;
            new.phase = old.phase;
            new.enabled = old.enabled;
        }
        Self {
            k_max,
            harmonics,
            ..self.clone()
        }
    }

    /// Patch the harmonic of order `order`. Unknown orders leave the state
    /// unchanged. A negative amplitude is clamped to zero; a non-finite
    /// amplitude or phase is ignored.
    pub fn with_harmonic(&self, order: u32, patch: HarmonicPatch) -> Self {
        let mut next = self.clone();
        if let Some(h) = next.harmonics.get_mut(order) {
            if let Some(amplitude) = patch.amplitude.filter(|a| a.is_finite()) {
                h.amplitude = amplitude.max(0.0);
            }
            if let Some(phase) = patch.phase.filter(|p| p.is_finite()) {
                h.phase = phase;
            }
            if let Some(enabled) = patch.enabled {
                h.enabled = enabled;
            }
        }
        next
    }

    /// Override the fundamental source angle (degrees) of phase b or c.
    pub fn with_fundamental_phase(&self, leg: PhaseLeg, degrees: f64) -> Self {
        let mut fundamental_phases = self.fundamental_phases;
        match leg {
            PhaseLeg::B => fundamental_phases.phase_b = degrees,
            PhaseLeg::C => fundamental_phases.phase_c = degrees,
        }
        Self {
            fundamental_phases,
            ..self.clone()
        }
    }

    /// Clear every harmonic, then apply `preset` to the orders present.
    pub fn with_preset(&self, preset: Preset) -> Self {
        tracing::debug!(?preset, "loading preset");
        let mut harmonics = self.harmonics.clone();
        for h in harmonics.iter_mut() {
            *h = Harmonic::disabled(h.order);
        }
        let set = |harmonics: &mut HarmonicSet, order: u32, amplitude: f64| {
            if let Some(h) = harmonics.get_mut(order) {
                *h = Harmonic::new(order, amplitude, 0.0);
            }
        };
        match preset {
            Preset::Pure => set(&mut harmonics, 1, 100.0),
            Preset::Square => {
                let odd: Vec<u32> = harmonics
                    .iter()
                    .map(|h| h.order)
                    .filter(|k| k % 2 == 1)
                    .collect();
                for k in odd {
                    set(&mut harmonics, k, 100.0 / k as f64);
                }
            }
            Preset::Rectifier6 => {
                for k in RECTIFIER6_ORDERS {
                    set(&mut harmonics, k, 100.0 / k as f64);
                }
            }
            Preset::Triplen => {
                set(&mut harmonics, 1, 100.0);
                set(&mut harmonics, 3, 60.0);
                set(&mut harmonics, 9, 20.0);
            }
        }
        Self {
            harmonics,
            ..self.clone()
        }
    }

    /// Replace f0, k_max, harmonics and mode from a JSON document.
    ///
    /// On failure the error is logged and returned; `self` is untouched.
    pub fn import_config(&self, json: &str) -> Result<Self> {
        match config::import(json) {
            Ok(cfg) => Ok(Self {
                f0: cfg.f0,
                k_max: cfg.k_max,
                harmonics: cfg.harmonics,
                mode: cfg.mode,
                ..self.clone()
            }),
            Err(e) => {
                tracing::warn!(error = %e, "rejected configuration import");
                Err(e)
            }
        }
    }

    pub fn export_config(&self) -> Result<String> {
        config::export(&self.to_config())
    }

    pub fn to_config(&self) -> EngineConfig {
        EngineConfig {
            f0: self.f0,
            k_max: self.k_max,
            harmonics: self.harmonics.clone(),
            mode: self.mode,
        }
    }

    /// Check the scalars the engine takes on trust: `f0` must be finite and
    /// positive, and the set must span at least one order. Hosts call this
    /// before the first tick, since a loaded configuration carries both as
    /// given.
    pub fn validate(&self) -> Result<()> {
        if !self.f0.is_finite() || self.f0 <= 0.0 {
            return Err(TriplenError::Config(format!(
                "fundamental frequency must be > 0, got {}",
                self.f0
            )));
        }
        if self.k_max == 0 || self.harmonics.is_empty() {
            return Err(TriplenError::Config(
                "harmonic set must contain at least one order".to_string(),
            ));
        }
        Ok(())
    }

    /// Synthesized window at `time_offset`.
    pub fn signal(&self, time_offset: f64) -> SignalData {
        signal::synthesize(
            self.harmonics.as_slice(),
            self.f0,
            self.mode,
            time_offset,
            Some(&self.fundamental_phases),
        )
    }

    pub fn metrics(&self, signal: &SignalData) -> Metrics {
        metrics::compute(self.harmonics.as_slice(), signal, self.mode)
    }

    /// Phasors for the current selection at `time_offset`.
    pub fn phasors(&self, time_offset: f64) -> PhasorData {
        phasor::compute(
            self.harmonics.as_slice(),
            self.phasor_selection,
            time_offset,
            self.f0,
            Some(&self.fundamental_phases),
        )
    }

    /// Phase-a waveform of each enabled harmonic at `time_offset`.
    pub fn components(&self, time_offset: f64) -> ComponentData {
        signal::components(self.harmonics.as_slice(), self.f0, time_offset)
    }

    /// Per-harmonic phase-a values at the instant `t`.
    pub fn point(&self, t: f64) -> PointBreakdown {
        signal::point(self.harmonics.as_slice(), self.f0, t)
    }

    /// Harmonics shown under the current spectrum filter, in set order.
    pub fn spectrum(&self) -> Vec<Harmonic> {
        self.harmonics
            .iter()
            .filter(|h| self.sequence_filter.matches(h.order))
            .copied()
            .collect()
    }
}
