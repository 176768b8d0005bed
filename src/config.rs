//! JSON configuration import/export.
//!
//! # Format
//!
//! ```json
//! {
//!   "f0": 50.0,
//!   "kMax": 25,
//!   "harmonics": [
//!     { "k": 1, "amp": 100.0, "phase": 0.0, "enabled": true }
//!   ],
//!   "mode": "three_phase"
//! }
//! ```
//!
//! Export writes fields in this order and harmonics in set order, so an
//! export followed by an import reproduces the set exactly. `f0` and `kMax`
//! are carried as given; range checks are the host's job.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Harmonic, HarmonicSet, Mode};

/// Engine-relevant part of a saved session.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub f0: f64,
    pub k_max: u32,
    pub harmonics: HarmonicSet,
    pub mode: Mode,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    f0: f64,
    k_max: u32,
    harmonics: Vec<HarmonicEntry>,
    mode: ModeEntry,
}

#[derive(Debug, Serialize, Deserialize)]
struct HarmonicEntry {
    k: u32,
    amp: f64,
    phase: f64,
    enabled: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ModeEntry {
    Single,
    ThreePhase,
}

impl From<ModeEntry> for Mode {
    fn from(m: ModeEntry) -> Self {
        match m {
            ModeEntry::Single => Mode::Single,
            ModeEntry::ThreePhase => Mode::ThreePhase,
        }
    }
}

impl From<Mode> for ModeEntry {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Single => ModeEntry::Single,
            Mode::ThreePhase => ModeEntry::ThreePhase,
        }
    }
}

/// Parse and validate a configuration document.
///
/// Fails on malformed JSON, missing or mistyped fields, unknown modes,
/// duplicate or zero harmonic orders, and negative or non-finite amplitudes.
pub fn import(json: &str) -> Result<EngineConfig> {
    let file: ConfigFile = serde_json::from_str(json)?;
    let harmonics = HarmonicSet::new(
        file.harmonics
            .into_iter()
            .map(|h| Harmonic {
                order: h.k,
                amplitude: h.amp,
                phase: h.phase,
                enabled: h.enabled,
            })
            .collect(),
    )?;
    Ok(EngineConfig {
        f0: file.f0,
        k_max: file.k_max,
        harmonics,
        mode: file.mode.into(),
    })
}

/// Serialize a configuration as pretty-printed JSON.
pub fn export(config: &EngineConfig) -> Result<String> {
    let file = ConfigFile {
        f0: config.f0,
        k_max: config.k_max,
        harmonics: config
            .harmonics
            .iter()
            .map(|h| HarmonicEntry {
                k: h.order,
                amp: h.amplitude,
                phase: h.phase,
                enabled: h.enabled,
            })
            .collect(),
        mode: config.mode.into(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TriplenError;

    fn sample() -> EngineConfig {
        EngineConfig {
            f0: 60.0,
            k_max: 7,
            harmonics: HarmonicSet::new(vec![
                Harmonic::new(1, 100.0, 0.0),
                Harmonic::new(5, 100.0 / 5.0, -0.3),
                Harmonic {
                    order: 3,
                    amplitude: 33.333333333333336,
                    phase: 1.0e-7,
                    enabled: false,
                },
            ])
            .unwrap(),
            mode: Mode::Single,
        }
    }

    #[test]
    fn export_uses_wire_names() {
        let json = export(&sample()).unwrap();
        assert!(json.contains("\"kMax\": 7"), "{json}");
        assert!(json.contains("\"mode\": \"single\""), "{json}");
        assert!(json.contains("\"amp\": 20.0"), "{json}");
        let f0 = json.find("\"f0\"").unwrap();
        let k_max = json.find("\"kMax\"").unwrap();
        let harmonics = json.find("\"harmonics\"").unwrap();
        let mode = json.find("\"mode\"").unwrap();
        assert!(f0 < k_max && k_max < harmonics && harmonics < mode);
    }

    #[test]
    fn round_trip_is_exact() {
        let cfg = sample();
        let back = import(&export(&cfg).unwrap()).unwrap();
        assert_eq!(back, cfg);
        let orders: Vec<u32> = back.harmonics.iter().map(|h| h.order).collect();
        assert_eq!(orders, vec![1, 5, 3]);
    }

    #[test]
    fn three_phase_mode_string() {
        let json = r#"{"f0":50,"kMax":1,"harmonics":[{"k":1,"amp":100,"phase":0,"enabled":true}],"mode":"three_phase"}"#;
        let cfg = import(json).unwrap();
        assert_eq!(cfg.mode, Mode::ThreePhase);
        assert_eq!(cfg.f0, 50.0);
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = import("{ not json").unwrap_err();
        assert!(matches!(err, TriplenError::Json(_)));
    }

    #[test]
    fn missing_field_rejected() {
        let json = r#"{"f0":50,"harmonics":[],"mode":"single"}"#;
        assert!(matches!(import(json), Err(TriplenError::Json(_))));
    }

    #[test]
    fn unknown_mode_rejected() {
        let json = r#"{"f0":50,"kMax":0,"harmonics":[],"mode":"two_phase"}"#;
        assert!(matches!(import(json), Err(TriplenError::Json(_))));
    }

    #[test]
    fn mistyped_harmonic_rejected() {
        let json = r#"{"f0":50,"kMax":1,"harmonics":[{"k":"one","amp":1,"phase":0,"enabled":true}],"mode":"single"}"#;
        assert!(import(json).is_err());
    }

    #[test]
    fn duplicate_orders_rejected() {
        let json = r#"{"f0":50,"kMax":2,"harmonics":[
            {"k":1,"amp":1,"phase":0,"enabled":true},
            {"k":1,"amp":2,"phase":0,"enabled":true}],"mode":"single"}"#;
        assert!(matches!(import(json), Err(TriplenError::Config(_))));
    }

    #[test]
    fn negative_amplitude_rejected() {
        let json = r#"{"f0":50,"kMax":1,"harmonics":[{"k":1,"amp":-5,"phase":0,"enabled":true}],"mode":"single"}"#;
        assert!(matches!(import(json), Err(TriplenError::Config(_))));
    }
}
