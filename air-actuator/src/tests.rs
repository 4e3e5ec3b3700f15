//! Testes integrados do banco de atuadores

use crate::*;
use crate::ActuatorError;
use air_core::prelude::*;
use air_core::traits::ActuatorError as CoreActuatorError;

// ═══════════════════════════════════════════════════════════════════════════════
// SAÍDA COM FALHA PROGRAMADA
// ═══════════════════════════════════════════════════════════════════════════════

/// Saída que aceita `ok_writes` escritas e depois falha
#[derive(Debug)]
struct FlakyOutput {
    name: &'static str,
    on: bool,
    ok_writes: usize,
    writes: usize,
}

impl FlakyOutput {
    fn new(name: &'static str, ok_writes: usize) -> Self {
        Self {
            name,
            on: false,
            ok_writes,
            writes: 0,
        }
    }
}

impl AirComponent for FlakyOutput {
    fn name(&self) -> &str {
        self.name
    }
}

impl Actuator for FlakyOutput {
    type Command = bool;

    fn send(&mut self, cmd: bool) -> Result<(), CoreActuatorError> {
        self.writes += 1;
        if self.writes > self.ok_writes {
            return Err(CoreActuatorError::CommandFailed("stuck driver".into()));
        }
        self.on = cmd;
        Ok(())
    }

    fn status(&self) -> ActuatorStatus {
        ActuatorStatus::Ready
    }
}

fn outputs(bank: &ActuatorBank<FlakyOutput>) -> ActuatorState {
    ActuatorState::new(
        bank.get(ActuatorKind::Alarm).on,
        bank.get(ActuatorKind::Fan).on,
        bank.get(ActuatorKind::Vent).on,
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// ATOMICIDADE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_failed_write_rolls_back_previous_outputs() {
    let mut bank = ActuatorBank::new(
        FlakyOutput::new("alarm", usize::MAX),
        FlakyOutput::new("fan", usize::MAX),
        FlakyOutput::new("vent", 1),
    );

    bank.apply(&ActuatorState::new(false, true, false)).unwrap();

    let err = bank.apply(&ActuatorState::new(true, false, true)).unwrap_err();
    assert_eq!(
        err,
        ActuatorError::RolledBack {
            kind: ActuatorKind::Vent,
            restored: 2,
            reason: "Command failed: stuck driver".into(),
        }
    );

    // Saídas físicas e snapshot continuam no estado anterior
    assert_eq!(outputs(&bank), ActuatorState::new(false, true, false));
    assert_eq!(bank.snapshot(), ActuatorState::new(false, true, false));
    assert_eq!(bank.applied(), 1);
}

#[test]
fn test_failed_rollback_reports_driven_state() {
    let mut bank = ActuatorBank::new(
        FlakyOutput::new("alarm", 2),
        FlakyOutput::new("fan", usize::MAX),
        FlakyOutput::new("vent", 1),
    );

    bank.apply(&ActuatorState::new(false, true, false)).unwrap();

    // Alarm liga, vent falha e o alarm não aceita voltar
    let err = bank.apply(&ActuatorState::new(true, false, true)).unwrap_err();
    assert_eq!(
        err,
        ActuatorError::RollbackFailed {
            kind: ActuatorKind::Vent,
            stuck: vec![ActuatorKind::Alarm],
            driven: ActuatorState::new(true, true, false),
            reason: "Command failed: stuck driver".into(),
        }
    );

    assert_eq!(outputs(&bank), ActuatorState::new(true, true, false));
    assert_eq!(bank.snapshot(), outputs(&bank));
    assert_eq!(bank.applied(), 1);
}

#[test]
fn test_changes_after_failed_rollback_follow_outputs() {
    let mut bank = ActuatorBank::new(
        FlakyOutput::new("alarm", 2),
        FlakyOutput::new("fan", usize::MAX),
        FlakyOutput::new("vent", 1),
    );
    bank.apply(&ActuatorState::new(false, true, false)).unwrap();
    bank.apply(&ActuatorState::new(true, false, true)).unwrap_err();

    // Alarm esgotou as escritas; o snapshot segue o que ficou
    let err = bank.apply(&ActuatorState::off()).unwrap_err();
    assert!(matches!(
        err,
        ActuatorError::RolledBack {
            kind: ActuatorKind::Alarm,
            restored: 0,
            ..
        }
    ));
    assert_eq!(bank.snapshot(), ActuatorState::new(true, true, false));
    assert_eq!(bank.snapshot(), outputs(&bank));
}

#[test]
fn test_first_output_failure_touches_nothing() {
    let mut bank = ActuatorBank::new(
        FlakyOutput::new("alarm", 0),
        FlakyOutput::new("fan", usize::MAX),
        FlakyOutput::new("vent", usize::MAX),
    );

    let err = bank.apply(&ActuatorState::new(true, true, true)).unwrap_err();
    assert!(matches!(
        err,
        ActuatorError::RolledBack {
            kind: ActuatorKind::Alarm,
            restored: 0,
            ..
        }
    ));
    assert_eq!(outputs(&bank), ActuatorState::off());
}

#[test]
fn test_every_state_applies_exactly() {
    let mut bank = ActuatorBank::leds();

    for bits in 0..8u8 {
        let state = ActuatorState::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0);
        bank.apply(&state).unwrap();

        assert_eq!(bank.snapshot(), state);
        for kind in ActuatorKind::ALL {
            assert_eq!(bank.get(kind).is_on(), state.get(kind), "{kind}");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRAITS DO CORE
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_led_lifecycle_through_traits() {
    let mut led = LedActuator::new(ActuatorKind::Alarm);

    assert_eq!(led.status(), ActuatorStatus::Ready);
    assert!(led.is_ready());
    assert!(led.version().contains("2026"));

    led.send(true).unwrap();
    assert!(led.is_on());

    led.emergency_stop().unwrap();
    assert_eq!(led.status(), ActuatorStatus::Off);

    led.reset().unwrap();
    assert_eq!(led.status(), ActuatorStatus::Ready);
    assert!(!led.is_on());
}

#[test]
fn test_led_state_serializes() {
    let mut led = LedActuator::new(ActuatorKind::Fan);
    led.set(true).unwrap();

    let json = serde_json::to_string(&led.state()).unwrap();
    assert!(json.contains("\"on\":true"));
    assert!(json.contains("\"status\":\"Ready\""));
}
