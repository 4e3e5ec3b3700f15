//! # 🌫️ air-core: Modelo de Dados do Monitor de Ar
//!
//! Tipos compartilhados por todos os crates `air-*` e os contratos dos
//! colaboradores externos (aquisição, atuação, apresentação).
//!
//! ## Fluxo de um ciclo
//!
//! ```text
//! Sensor ──► Reading ──► classify ──► Classification ──► decide ──► ActuatorState
//!   (I/O)    (valores)    (engine)      (faixas)          (engine)    (alarm/fan/vent)
//! ```
//!
//! Nada persiste entre ciclos: [`Reading`], [`Classification`] e
//! [`ActuatorState`] são valores novos a cada amostragem.
//!
//! ## Exemplo
//!
//! ```
//! use air_core::prelude::*;
//!
//! let reading = Reading::builder()
//!     .value(ParameterId::Pm25, 200.0)
//!     .value(ParameterId::Co, 10.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(reading.get(ParameterId::Pm25), Some(200.0));
//! assert!(SeverityBand::Hazard > SeverityBand::Moderate);
//! ```
//!
//! ## Módulos
//!
//! - [`parameter`] - Identificadores, unidades e tipo de limite
//! - [`severity`] - Faixas `SAFE < MODERATE < HAZARD`
//! - [`reading`] - Snapshot validado de valores
//! - [`classification`] - Faixa por parâmetro
//! - [`actuation`] - Estado das saídas
//! - [`evaluation`] - Par classificação + atuadores
//! - [`traits`] - Contratos de colaboradores
//! - [`error`] - Tratamento de erros

pub mod actuation;
pub mod classification;
pub mod error;
pub mod evaluation;
pub mod parameter;
pub mod prelude;
pub mod reading;
pub mod severity;
pub mod traits;

pub use actuation::{ActuatorKind, ActuatorState};
pub use classification::Classification;
pub use error::{CoreError, CoreResult};
pub use evaluation::Evaluation;
pub use parameter::{ParameterId, ThresholdKind};
pub use reading::{Reading, ReadingBuilder};
pub use severity::SeverityBand;
