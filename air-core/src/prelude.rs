//! # Prelude: Re-exportações Convenientes
//!
//! ```
//! use air_core::prelude::*;
//! ```

// Modelo de dados
pub use crate::actuation::{ActuatorKind, ActuatorState};
pub use crate::classification::Classification;
pub use crate::evaluation::Evaluation;
pub use crate::parameter::{ParameterId, ThresholdKind};
pub use crate::reading::{Reading, ReadingBuilder};
pub use crate::severity::SeverityBand;

// Erros
pub use crate::error::{CoreError, CoreResult};

// Colaboradores
pub use crate::traits::{
    Actuator,
    ActuatorError,
    ActuatorStatus,
    AirComponent,
    ComponentError,
    ComponentResult,
    Presenter,
    PresenterError,
    Sensor,
    SensorError,
};
