//! Resultado de uma passada do motor

use serde::{Deserialize, Serialize};

use crate::actuation::ActuatorState;
use crate::classification::Classification;
use crate::severity::SeverityBand;

/// Classificação e estado de atuadores produzidos juntos por um ciclo.
///
/// Só existe completo: o motor constrói ambos antes de devolver o valor, e
/// os consumidores (atuação, apresentação) recebem o par inteiro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub classification: Classification,
    pub actuators: ActuatorState,
}

impl Evaluation {
    pub fn new(classification: Classification, actuators: ActuatorState) -> Self {
        Self {
            classification,
            actuators,
        }
    }

    /// Pior faixa da classificação
    pub fn worst(&self) -> SeverityBand {
        self.classification.worst()
    }
}
