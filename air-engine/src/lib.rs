//! # 🧮 air-engine: Classificação e Decisão
//!
//! O núcleo do monitor: mapeia leituras numéricas para faixas de severidade
//! e faixas para comandos de atuadores.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Engine                            │
//! │  ┌────────────────┐   ┌────────────┐   ┌──────────────┐  │
//! │  │ ThresholdTable │──►│ Classifier │──►│   RuleSet    │  │
//! │  │ ceiling/comfort│   │ por param. │   │ alarm/fan/vent│ │
//! │  └────────────────┘   └────────────┘   └──────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//!        Reading ──────────► Classification ──────► ActuatorState
//! ```
//!
//! ## Regras padrão
//!
//! - **alarm**: qualquer parâmetro em `HAZARD`
//! - **fan**: PM2.5 (e PM10, se configurado) `!= SAFE`
//! - **vent**: CO/CO2 `!= SAFE`, ou umidade `HAZARD`, ou temperatura `HAZARD`
//!
//! Umidade e temperatura `MODERATE` não ligam a ventilação; CO `MODERATE`
//! liga. A assimetria é intencional.
//!
//! ## Exemplo
//!
//! ```
//! use air_core::prelude::*;
//! use air_engine::{Engine, Preset};
//!
//! let engine = Engine::from_preset(Preset::Full);
//! assert_eq!(engine.parameters().len(), 8);
//! ```
//!
//! ## Módulos
//!
//! - [`threshold`] - Limites e tabela de limites
//! - [`classifier`] - Leitura → classificação
//! - [`rules`] - Classificação → atuadores
//! - [`config`] - Configuração TOML
//! - [`presets`] - Variantes de 8, 6 e 2 parâmetros
//! - [`engine`] - Motor validado
//! - [`error`] - Tratamento de erros

pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod presets;
pub mod rules;
pub mod threshold;

pub use classifier::{classify, classify_value};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use presets::{factory_threshold, Preset};
pub use rules::{decide, RuleCondition, RuleSet, Trigger};
pub use threshold::{Threshold, ThresholdTable};
