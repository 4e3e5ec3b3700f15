//! Testes integrados: fontes de aquisição alimentando o motor

use crate::*;
use air_core::prelude::*;
use air_engine::{Engine, Preset};

fn panel_for(preset: Preset) -> SimulatedPanel {
    let mut panel =
        SimulatedPanel::with_config(PanelConfig::for_parameters(preset.parameters())).unwrap();
    panel.calibrate().unwrap();
    panel
}

#[test]
fn test_panel_satisfies_every_preset() {
    for preset in Preset::ALL {
        let engine = Engine::from_preset(preset);
        let mut panel = panel_for(preset);

        assert!(engine.check_source(&panel.parameters()).is_ok(), "{preset}");
        let evaluation = engine.evaluate(&panel.sample().unwrap()).unwrap();
        // Knobs em zero e clima 25 °C / 50 %: tudo calmo
        assert_eq!(evaluation.actuators, ActuatorState::off(), "{preset}");
    }
}

#[test]
fn test_knob_at_full_scale_is_hazard() {
    let engine = Engine::from_preset(Preset::Full);
    let mut panel = panel_for(Preset::Full);
    panel.set_knob(ParameterId::Pm25, ADC_MAX).unwrap();

    let evaluation = engine.evaluate(&panel.sample().unwrap()).unwrap();
    assert_eq!(
        evaluation.classification.band(ParameterId::Pm25),
        Some(SeverityBand::Hazard)
    );
    assert_eq!(evaluation.actuators, ActuatorState::new(true, true, false));
}

#[test]
fn test_climate_fault_is_classified_with_fallback() {
    let engine = Engine::from_preset(Preset::Full);
    let config = PanelConfig::default().with_climate_fault_every(1);
    let mut panel = SimulatedPanel::with_config(config).unwrap();
    panel.calibrate().unwrap();
    panel.set_climate(40.0, 90.0);

    let reading = panel.sample().unwrap();
    assert_eq!(reading.get(ParameterId::Temperature), Some(DEFAULT_TEMPERATURE));
    assert_eq!(reading.get(ParameterId::Humidity), Some(DEFAULT_HUMIDITY));

    let evaluation = engine.evaluate(&reading).unwrap();
    assert_eq!(
        evaluation.classification.band(ParameterId::Temperature),
        Some(SeverityBand::Safe)
    );
    assert!(!evaluation.actuators.vent);
}

#[test]
fn test_sweep_eventually_trips_every_actuator() {
    let engine = Engine::from_preset(Preset::Full);
    let mut panel =
        SimulatedPanel::with_config(PanelConfig::default().with_sweep(true)).unwrap();
    panel.calibrate().unwrap();

    let mut seen = ActuatorState::off();
    for _ in 0..200 {
        let state = engine.evaluate(&panel.sample().unwrap()).unwrap().actuators;
        seen.alarm |= state.alarm;
        seen.fan |= state.fan;
        seen.vent |= state.vent;
    }
    assert_eq!(seen, ActuatorState::new(true, true, true));
}

#[test]
fn test_replay_drives_engine() {
    let engine = Engine::from_preset(Preset::Basic);
    let mut source = ScriptedSource::from_json_lines(
        Preset::Basic.parameters(),
        r#"
{"values": {"pm25": {"direct": 10.0}, "co": {"direct": 10.0}}}
{"values": {"pm25": {"direct": 80.0}, "co": {"direct": 10.0}}}
{"values": {"pm25": {"direct": 10.0}, "co": {"direct": 250.0}}}
"#,
    )
    .unwrap();

    let states: Vec<_> = (0..3)
        .map(|_| engine.evaluate(&source.sample().unwrap()).unwrap().actuators)
        .collect();

    assert_eq!(
        states,
        vec![
            ActuatorState::off(),
            ActuatorState::new(false, true, false),
            ActuatorState::new(true, false, true),
        ]
    );
    assert_eq!(source.sample().unwrap_err(), SensorError::Exhausted);
}

#[test]
fn test_sensor_error_conversion() {
    let err: SensorError = EnvironmentError::Replay {
        line: 4,
        message: "bad".into(),
    }
    .into();
    assert!(matches!(err, SensorError::ReadFailed(msg) if msg.contains("line 4")));
}
