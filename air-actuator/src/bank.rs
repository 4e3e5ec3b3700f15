//! Banco de saídas: aplica um `ActuatorState` inteiro ou nada
//!
//! A aplicação acontece em duas fases:
//!
//! 1. todas as saídas precisam estar `Ready`; qualquer outro status recusa
//!    o estado antes de qualquer escrita;
//! 2. as três saídas são escritas em ordem (alarm, fan, vent). Se uma
//!    escrita falha, as já escritas voltam ao valor anterior.
//!
//! Se até a restauração falha, o snapshot passa a refletir o que ficou nas
//! saídas e o erro é `RollbackFailed`; o snapshot nunca diverge do hardware.

use air_core::prelude::*;
use air_core::traits::ActuatorError as CoreActuatorError;

use crate::error::{ActuatorError, ActuatorResult};
use crate::led::LedActuator;

/// Três saídas booleanas comandadas juntas
#[derive(Debug, Clone)]
pub struct ActuatorBank<A = LedActuator>
where
    A: Actuator<Command = bool>,
{
    alarm: A,
    fan: A,
    vent: A,
    current: ActuatorState,
    applied: u64,
}

impl ActuatorBank<LedActuator> {
    /// LEDs de fábrica (alarm 4, fan 5, vent 2)
    pub fn leds() -> Self {
        Self::new(
            LedActuator::new(ActuatorKind::Alarm),
            LedActuator::new(ActuatorKind::Fan),
            LedActuator::new(ActuatorKind::Vent),
        )
    }
}

impl Default for ActuatorBank<LedActuator> {
    fn default() -> Self {
        Self::leds()
    }
}

impl<A> ActuatorBank<A>
where
    A: Actuator<Command = bool>,
{
    /// Banco com as saídas dadas; o estado inicial considerado é tudo desligado
    pub fn new(alarm: A, fan: A, vent: A) -> Self {
        Self {
            alarm,
            fan,
            vent,
            current: ActuatorState::off(),
            applied: 0,
        }
    }

    pub fn get(&self, kind: ActuatorKind) -> &A {
        match kind {
            ActuatorKind::Alarm => &self.alarm,
            ActuatorKind::Fan => &self.fan,
            ActuatorKind::Vent => &self.vent,
        }
    }

    pub fn get_mut(&mut self, kind: ActuatorKind) -> &mut A {
        match kind {
            ActuatorKind::Alarm => &mut self.alarm,
            ActuatorKind::Fan => &mut self.fan,
            ActuatorKind::Vent => &mut self.vent,
        }
    }

    /// Estado efetivamente comandado nas saídas
    pub fn snapshot(&self) -> ActuatorState {
        self.current
    }

    /// Estados aplicados com sucesso
    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// Primeira saída que não está pronta
    pub fn check_ready(&self) -> ActuatorResult<()> {
        for kind in ActuatorKind::ALL {
            let status = self.get(kind).status();
            if status != ActuatorStatus::Ready {
                return Err(ActuatorError::Rejected {
                    kind,
                    reason: format!("{} is {:?}", self.get(kind).name(), status),
                });
            }
        }
        Ok(())
    }

    /// Aplica o estado inteiro; devolve as saídas que mudaram
    pub fn apply(&mut self, next: &ActuatorState) -> ActuatorResult<Vec<ActuatorKind>> {
        self.check_ready()?;

        let previous = self.current;
        let mut written = Vec::with_capacity(ActuatorKind::ALL.len());

        for kind in ActuatorKind::ALL {
            if let Err(err) = self.get_mut(kind).send(next.get(kind)) {
                let stuck = self.rollback(&written, &previous);
                if stuck.is_empty() {
                    return Err(ActuatorError::RolledBack {
                        kind,
                        restored: written.len(),
                        reason: err.to_string(),
                    });
                }

                // Saídas que não voltaram continuam com o valor novo
                let driven = stuck
                    .iter()
                    .fold(previous, |state, k| state.with(*k, next.get(*k)));
                self.current = driven;
                return Err(ActuatorError::RollbackFailed {
                    kind,
                    stuck,
                    driven,
                    reason: err.to_string(),
                });
            }
            written.push(kind);
        }

        self.current = *next;
        self.applied += 1;
        Ok(previous.changes(next))
    }

    /// Restaura as saídas já escritas; devolve as que não voltaram
    fn rollback(&mut self, written: &[ActuatorKind], previous: &ActuatorState) -> Vec<ActuatorKind> {
        written
            .iter()
            .copied()
            .filter(|kind| self.get_mut(*kind).send(previous.get(*kind)).is_err())
            .collect()
    }

    /// Parada de emergência de todas as saídas
    pub fn emergency_stop(&mut self) -> Result<(), CoreActuatorError> {
        let mut first_err = None;
        for kind in ActuatorKind::ALL {
            if let Err(err) = self.get_mut(kind).emergency_stop() {
                first_err.get_or_insert(err);
            }
        }
        self.current = ActuatorState::off();
        first_err.map_or(Ok(()), Err)
    }

    /// Reseta todas as saídas e volta a tudo desligado
    pub fn reset(&mut self) -> Result<(), CoreActuatorError> {
        for kind in ActuatorKind::ALL {
            self.get_mut(kind).reset()?;
        }
        self.current = ActuatorState::off();
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.check_ready().is_ok()
    }
}
