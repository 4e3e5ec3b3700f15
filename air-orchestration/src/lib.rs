//! # 🎼 air-orchestration: Driver do Ciclo
//!
//! Amarra fonte, motor, saídas e apresentadores num loop periódico.
//!
//! ## Componentes
//!
//! - [`Monitor`]: executa `acquire → evaluate → apply → present` por ciclo
//! - [`Scheduler`]: período entre ciclos (`fixed_delay`, `fixed_rate`,
//!   `best_effort`), padrão de 1 s
//! - [`MonitorConfig`]: arquivo TOML com `[monitor]`, `[fallbacks]`,
//!   `[thresholds]` e `[rules]`
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use std::sync::atomic::AtomicBool;
//!
//! use air_actuator::ActuatorBank;
//! use air_engine::Preset;
//! use air_environment::{PanelConfig, SimulatedPanel};
//! use air_orchestration::{Monitor, MonitorConfig, RunConfig, StopReason};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MonitorConfig::from_preset(Preset::Basic);
//! let panel = SimulatedPanel::with_config(PanelConfig::for_parameters(&config.parameters()))?;
//! let mut monitor = Monitor::new("doc", panel, config.engine()?, ActuatorBank::leds())?;
//!
//! let run = RunConfig::cycles(2).with_scheduler(air_orchestration::SchedulerConfig::with_period_ms(1));
//! let summary = monitor.run(&run, &AtomicBool::new(false))?;
//! assert_eq!(summary.stop_reason, StopReason::MaxCycles);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod monitor;
pub mod scheduler;

pub use config::{MonitorConfig, MonitorSection, RuleOverrides};
pub use error::{OrchestrationError, OrchestrationResult};
pub use monitor::{
    CycleOutcome, CycleReport, Monitor, MonitorStats, RunConfig, RunSummary, StopReason,
    format_duration,
};
pub use scheduler::{
    DEFAULT_PERIOD_MS, MAX_PERIOD_MS, MIN_PERIOD_MS, Scheduler, SchedulerConfig, SchedulerMode,
    SchedulerStats, TickInfo,
};
