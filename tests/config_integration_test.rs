//! Configuration import/export and state update tests.

use triplen::config;
use triplen::error::TriplenError;
use triplen::model::{Mode, Preset};
use triplen::state::{EngineState, HarmonicPatch};

#[test]
fn test_export_import_round_trip() {
    let state = EngineState::default()
        .with_f0(60.0)
        .with_k_max(13)
        .with_preset(Preset::Square)
        .with_harmonic(
            5,
            HarmonicPatch {
                phase: Some(-2.356194490192345),
                enabled: Some(false),
                ..Default::default()
            },
        )
        .with_mode(Mode::Single);

    let json = state.export_config().expect("export failed");
    let back = EngineState::default()
        .import_config(&json)
        .expect("import failed");

    assert_eq!(back.f0, 60.0);
    assert_eq!(back.k_max, 13);
    assert_eq!(back.mode, Mode::Single);
    assert_eq!(back.harmonics, state.harmonics);
    assert_eq!(back.export_config().unwrap(), json);
}

#[test]
fn test_round_trip_preserves_non_default_order() {
    let json = r#"{
  "f0": 50.0,
  "kMax": 9,
  "harmonics": [
    { "k": 9, "amp": 20.0, "phase": 0.1, "enabled": true },
    { "k": 1, "amp": 100.0, "phase": 0.0, "enabled": true },
    { "k": 3, "amp": 60.0, "phase": -0.1, "enabled": false }
  ],
  "mode": "three_phase"
}"#;
    let cfg = config::import(json).expect("import failed");
    let orders: Vec<u32> = cfg.harmonics.iter().map(|h| h.order).collect();
    assert_eq!(orders, vec![9, 1, 3]);

    let again = config::import(&config::export(&cfg).unwrap()).unwrap();
    assert_eq!(again, cfg);
}

#[test]
fn test_malformed_import_leaves_state_unchanged() {
    let state = EngineState::default().with_preset(Preset::Triplen);
    let before = state.clone();

    for bad in [
        "",
        "[]",
        "{\"f0\": 50, \"kMax\": 3}",
        "{\"f0\": \"fifty\", \"kMax\": 3, \"harmonics\": [], \"mode\": \"single\"}",
        "{\"f0\": 50, \"kMax\": 3, \"harmonics\": [{\"k\": 1}], \"mode\": \"single\"}",
    ] {
        let err = state.import_config(bad).unwrap_err();
        assert!(matches!(err, TriplenError::Json(_)), "input {bad:?} gave {err}");
    }
    assert_eq!(state, before);
}

#[test]
fn test_invalid_harmonic_set_rejected() {
    let json = r#"{"f0":50,"kMax":2,"harmonics":[
        {"k":2,"amp":1,"phase":0,"enabled":true},
        {"k":2,"amp":1,"phase":0,"enabled":false}],"mode":"single"}"#;
    let err = EngineState::default().import_config(json).unwrap_err();
    assert!(err.to_string().contains("duplicate"), "got: {err}");
}

#[test]
fn test_out_of_range_scalars_carried_as_given() {
    // f0 and kMax are the host's to clamp.
    let json = r#"{"f0":0,"kMax":0,"harmonics":[],"mode":"single"}"#;
    let cfg = config::import(json).unwrap();
    assert_eq!(cfg.f0, 0.0);
    assert_eq!(cfg.k_max, 0);
    assert!(cfg.harmonics.is_empty());
}

#[test]
fn test_loaded_state_checked_before_tick() {
    let zero_f0 = r#"{"f0":0,"kMax":1,"harmonics":[
        {"k":1,"amp":100,"phase":0,"enabled":true}],"mode":"three_phase"}"#;
    let state = EngineState::default().import_config(zero_f0).unwrap();
    let err = state.validate().unwrap_err();
    assert!(matches!(err, TriplenError::Config(_)));
    assert!(err.to_string().contains("frequency"), "got: {err}");

    let negative = zero_f0.replace("\"f0\":0", "\"f0\":-60");
    let state = EngineState::default().import_config(&negative).unwrap();
    assert!(state.validate().is_err());

    let fixed = state.with_f0(60.0);
    assert!(fixed.validate().is_ok());
    let signal = fixed.signal(0.0);
    assert!(signal.t.iter().chain(&signal.ia).all(|v| v.is_finite()));
}
