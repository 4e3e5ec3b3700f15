//! # 🔄 monitor: Ciclo do Monitor
//!
//! Um ciclo é sempre a mesma sequência, sem estado entre ciclos além das
//! saídas físicas:
//!
//! ```text
//! acquire ──► evaluate ──► apply ──► present
//! (Sensor)    (Engine)     (Bank)    (Presenters)
//! ```
//!
//! Falha de aquisição pula o ciclo sem tocar nas saídas. Falha na aplicação
//! mantém o estado anterior inteiro e o ciclo não chega aos apresentadores.
//! Nenhuma das duas interrompe o loop;
//! só a exaustão da fonte, o limite de ciclos ou a flag de parada o fazem.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use air_actuator::{ActuatorBank, LedActuator};
use air_core::prelude::*;
use air_engine::Engine;

use crate::error::OrchestrationResult;
use crate::scheduler::{Scheduler, SchedulerConfig, SchedulerStats};

// ═══════════════════════════════════════════════════════════════════════════════
// RELATÓRIOS
// ═══════════════════════════════════════════════════════════════════════════════

/// Resultado de um ciclo
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CycleOutcome {
    /// Leitura avaliada e estado aplicado
    Completed {
        reading: Reading,
        evaluation: Evaluation,
        changed: Vec<ActuatorKind>,
    },
    /// Aquisição ou classificação falhou; saídas intocadas
    Skipped { reason: String },
    /// Avaliação feita, mas o banco recusou o estado; `CycleReport::actuators` diz o que ficou nas saídas
    ActuationFailed {
        reading: Reading,
        evaluation: Evaluation,
        reason: String,
    },
    /// A fonte não tem mais leituras
    Exhausted,
}

impl CycleOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, CycleOutcome::Completed { .. })
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        match self {
            CycleOutcome::Completed { evaluation, .. }
            | CycleOutcome::ActuationFailed { evaluation, .. } => Some(evaluation),
            _ => None,
        }
    }

    pub fn reading(&self) -> Option<&Reading> {
        match self {
            CycleOutcome::Completed { reading, .. }
            | CycleOutcome::ActuationFailed { reading, .. } => Some(reading),
            _ => None,
        }
    }
}

/// Relatório de um ciclo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    /// Número do ciclo (a partir de 1)
    pub cycle: u64,
    #[serde(flatten)]
    pub outcome: CycleOutcome,
    /// Estado das saídas ao fim do ciclo
    pub actuators: ActuatorState,
    pub elapsed: Duration,
}

/// Motivo de parada do loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Atingiu máximo de ciclos
    MaxCycles,
    /// Flag de parada sinalizada
    Interrupted,
    /// Fonte sem mais leituras
    SourceExhausted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StopReason::MaxCycles => "max cycles reached",
            StopReason::Interrupted => "interrupted",
            StopReason::SourceExhausted => "source exhausted",
        })
    }
}

/// Configuração de uma execução
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Máximo de ciclos (0 = infinito)
    pub max_cycles: u64,
    pub scheduler: SchedulerConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_cycles: 0,
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl RunConfig {
    pub fn cycles(max_cycles: u64) -> Self {
        Self {
            max_cycles,
            ..Self::default()
        }
    }

    pub fn with_scheduler(mut self, scheduler: SchedulerConfig) -> Self {
        self.scheduler = scheduler;
        self
    }
}

/// Contadores acumulados do monitor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonitorStats {
    pub cycles: u64,
    pub completed: u64,
    pub skipped: u64,
    pub actuation_failures: u64,
    /// Mudanças individuais de saída
    pub actuator_changes: u64,
}

/// Resultado de uma execução
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub stop_reason: StopReason,
    pub stats: MonitorStats,
    pub final_state: ActuatorState,
    pub scheduler: SchedulerStats,
}

// ═══════════════════════════════════════════════════════════════════════════════
// MONITOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Driver do ciclo: fonte + motor + banco + apresentadores
pub struct Monitor<S, A = LedActuator>
where
    S: Sensor,
    A: Actuator<Command = bool>,
{
    name: String,
    source: S,
    engine: Engine,
    bank: ActuatorBank<A>,
    presenters: Vec<Box<dyn Presenter>>,
    stats: MonitorStats,
}

impl<S, A> fmt::Debug for Monitor<S, A>
where
    S: Sensor,
    A: Actuator<Command = bool>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Monitor")
            .field("name", &self.name)
            .field("source", &self.source.name())
            .field("parameters", &self.engine.parameters())
            .field("presenters", &self.presenters.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<S, A> Monitor<S, A>
where
    S: Sensor,
    A: Actuator<Command = bool>,
{
    /// Monta o monitor, verificando na partida fonte, motor e saídas
    pub fn new(
        name: impl Into<String>,
        mut source: S,
        engine: Engine,
        bank: ActuatorBank<A>,
    ) -> OrchestrationResult<Self> {
        engine.check_source(&source.parameters())?;

        if !source.is_ready() {
            source.calibrate().map_err(ComponentError::from)?;
        }

        bank.check_ready()?;

        let name = name.into();
        info!(
            monitor = %name,
            source = source.name(),
            parameters = engine.parameters().len(),
            "monitor ready"
        );

        Ok(Self {
            name,
            source,
            engine,
            bank,
            presenters: Vec::new(),
            stats: MonitorStats::default(),
        })
    }

    /// Adiciona um apresentador (chamado em ordem de inserção)
    pub fn with_presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenters.push(presenter);
        self
    }

    pub fn add_presenter(&mut self, presenter: Box<dyn Presenter>) {
        self.presenters.push(presenter);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn bank(&self) -> &ActuatorBank<A> {
        &self.bank
    }

    pub fn bank_mut(&mut self) -> &mut ActuatorBank<A> {
        &mut self.bank
    }

    pub fn stats(&self) -> MonitorStats {
        self.stats
    }

    /// Executa um ciclo completo
    pub fn tick(&mut self) -> CycleReport {
        let started = Instant::now();
        self.stats.cycles += 1;
        let cycle = self.stats.cycles;

        let outcome = self.run_cycle(cycle);

        CycleReport {
            cycle,
            outcome,
            actuators: self.bank.snapshot(),
            elapsed: started.elapsed(),
        }
    }

    fn run_cycle(&mut self, cycle: u64) -> CycleOutcome {
        let reading = match self.source.sample() {
            Ok(reading) => reading,
            Err(SensorError::Exhausted) => {
                debug!(cycle, "source exhausted");
                return CycleOutcome::Exhausted;
            }
            Err(err) => return self.skip(cycle, format!("acquisition failed: {}", err)),
        };

        let evaluation = match self.engine.evaluate(&reading) {
            Ok(evaluation) => evaluation,
            Err(err) => return self.skip(cycle, format!("evaluation failed: {}", err)),
        };

        debug!(
            cycle,
            sequence = reading.sequence(),
            worst = %evaluation.worst(),
            actuators = %evaluation.actuators,
            "cycle evaluated"
        );

        let outcome = match self.bank.apply(&evaluation.actuators) {
            Ok(changed) => {
                if !changed.is_empty() {
                    self.stats.actuator_changes += changed.len() as u64;
                    info!(cycle, actuators = %evaluation.actuators, ?changed, "actuators changed");
                }
                self.stats.completed += 1;
                CycleOutcome::Completed {
                    reading,
                    evaluation,
                    changed,
                }
            }
            Err(err) => {
                self.stats.actuation_failures += 1;
                error!(cycle, error = %err, kept = %self.bank.snapshot(), "actuation failed");
                CycleOutcome::ActuationFailed {
                    reading,
                    evaluation,
                    reason: err.to_string(),
                }
            }
        };

        // Só o estado que chegou às saídas é apresentado
        if let CycleOutcome::Completed {
            reading,
            evaluation,
            ..
        } = &outcome
        {
            for presenter in &mut self.presenters {
                if let Err(err) = presenter.present(cycle, reading, evaluation) {
                    warn!(cycle, error = %err, "presenter failed");
                }
            }
        }

        outcome
    }

    fn skip(&mut self, cycle: u64, reason: String) -> CycleOutcome {
        self.stats.skipped += 1;
        warn!(cycle, %reason, kept = %self.bank.snapshot(), "cycle skipped");
        CycleOutcome::Skipped { reason }
    }

    /// Loop até `max_cycles`, exaustão da fonte ou `stop`
    pub fn run(&mut self, config: &RunConfig, stop: &AtomicBool) -> OrchestrationResult<RunSummary> {
        self.run_with(config, stop, |_| {})
    }

    /// Como [`Monitor::run`], chamando `on_cycle` após cada ciclo
    pub fn run_with<F>(
        &mut self,
        config: &RunConfig,
        stop: &AtomicBool,
        mut on_cycle: F,
    ) -> OrchestrationResult<RunSummary>
    where
        F: FnMut(&CycleReport),
    {
        let mut scheduler = Scheduler::new(config.scheduler.clone())?;
        let mut cycles = 0u64;

        info!(
            monitor = %self.name,
            period_ms = config.scheduler.period_ms,
            max_cycles = config.max_cycles,
            "monitor loop started"
        );

        let stop_reason = loop {
            if stop.load(Ordering::Relaxed) {
                break StopReason::Interrupted;
            }

            if config.max_cycles > 0 && cycles >= config.max_cycles {
                break StopReason::MaxCycles;
            }

            if scheduler.wait_or_stop(stop).is_none() {
                break StopReason::Interrupted;
            }

            let report = self.tick();
            scheduler.record_execution_time(report.elapsed);
            on_cycle(&report);

            if matches!(report.outcome, CycleOutcome::Exhausted) {
                break StopReason::SourceExhausted;
            }
            cycles += 1;
        };

        info!(monitor = %self.name, %stop_reason, cycles, "monitor loop stopped");

        Ok(RunSummary {
            stop_reason,
            stats: self.stats,
            final_state: self.bank.snapshot(),
            scheduler: scheduler.stats(),
        })
    }
}

/// Duração legível para logs e resumos
pub fn format_duration(duration: Duration) -> String {
    if duration < Duration::from_millis(1) {
        format!("{}µs", duration.as_micros())
    } else {
        format!("{:.1}ms", duration.as_secs_f64() * 1000.0)
    }
}
