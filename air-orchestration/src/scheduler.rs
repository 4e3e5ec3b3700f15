//! Scheduler para o período de amostragem do monitor

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::error::{OrchestrationError, OrchestrationResult};

/// Período padrão entre ciclos (1 s, como o firmware)
pub const DEFAULT_PERIOD_MS: u64 = 1000;
/// Menor período aceito
pub const MIN_PERIOD_MS: u64 = 1;
/// Maior período aceito
pub const MAX_PERIOD_MS: u64 = 60_000;

/// Fatia máxima de sono antes de reverificar a flag de parada
const STOP_POLL: Duration = Duration::from_millis(50);

/// Configuração do scheduler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Intervalo entre ciclos em milissegundos
    pub period_ms: u64,
    /// Modo de execução
    pub mode: SchedulerMode,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_PERIOD_MS,
            mode: SchedulerMode::FixedDelay,
        }
    }
}

impl SchedulerConfig {
    pub fn with_period_ms(period_ms: u64) -> Self {
        Self {
            period_ms,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> OrchestrationResult<()> {
        if !(MIN_PERIOD_MS..=MAX_PERIOD_MS).contains(&self.period_ms) {
            return Err(OrchestrationError::InvalidConfiguration(format!(
                "period_ms must be between {} and {} (got {})",
                MIN_PERIOD_MS, MAX_PERIOD_MS, self.period_ms
            )));
        }
        Ok(())
    }
}

/// Modo de execução do scheduler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulerMode {
    /// Taxa fixa: mantém o intervalo entre inícios de ciclo, contando atrasos
    FixedRate,
    /// Delay fixo: espera o período inteiro a partir do fim da última execução
    #[default]
    FixedDelay,
    /// Best effort: executa o mais rápido possível
    BestEffort,
}

/// Scheduler do ciclo
#[derive(Debug)]
pub struct Scheduler {
    config: SchedulerConfig,
    last_tick: Option<Instant>,
    /// Fim da última execução registrada
    last_finish: Option<Instant>,
    tick_count: u64,
    missed_ticks: u64,
    total_execution_time: Duration,
    min_execution_time: Option<Duration>,
    max_execution_time: Option<Duration>,
}

impl Scheduler {
    /// Cria scheduler validando o período
    pub fn new(config: SchedulerConfig) -> OrchestrationResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            last_tick: None,
            last_finish: None,
            tick_count: 0,
            missed_ticks: 0,
            total_execution_time: Duration::ZERO,
            min_execution_time: None,
            max_execution_time: None,
        })
    }

    /// Scheduler em delay fixo com o período dado
    pub fn with_period_ms(period_ms: u64) -> OrchestrationResult<Self> {
        Self::new(SchedulerConfig::with_period_ms(period_ms))
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Intervalo alvo entre ticks
    pub fn target_interval(&self) -> Duration {
        Duration::from_millis(self.config.period_ms)
    }

    /// Aguarda até o próximo tick
    pub fn wait_for_next_tick(&mut self) -> TickInfo {
        let never = AtomicBool::new(false);
        // Sem flag de parada a espera nunca é interrompida
        self.wait_or_stop(&never).unwrap_or_else(|| self.mark_tick(Instant::now(), true))
    }

    /// Aguarda o próximo tick; `None` se `stop` for sinalizado durante a espera
    pub fn wait_or_stop(&mut self, stop: &AtomicBool) -> Option<TickInfo> {
        let now = Instant::now();
        let target = self.target_interval();

        let Some(last) = self.last_tick else {
            return Some(self.mark_tick(now, true));
        };

        match self.config.mode {
            SchedulerMode::FixedRate => {
                let elapsed = now.duration_since(last);
                let mut on_time = true;

                if elapsed < target {
                    if !sleep_unless_stopped(target - elapsed, stop) {
                        return None;
                    }
                } else if elapsed >= target * 2 {
                    // Períodos inteiros perdidos
                    let missed = (elapsed.as_secs_f64() / target.as_secs_f64()) as u64 - 1;
                    self.missed_ticks += missed;
                    on_time = false;
                }

                Some(self.mark_tick(now, on_time))
            }
            SchedulerMode::FixedDelay => {
                // Sem execução registrada neste tick, conta do início dele
                let since = match self.last_finish {
                    Some(finish) if finish >= last => finish,
                    _ => last,
                };
                let elapsed = now.duration_since(since);
                if elapsed < target && !sleep_unless_stopped(target - elapsed, stop) {
                    return None;
                }
                Some(self.mark_tick(now, true))
            }
            SchedulerMode::BestEffort => Some(self.mark_tick(now, true)),
        }
    }

    fn mark_tick(&mut self, wait_started: Instant, on_time: bool) -> TickInfo {
        let tick = Instant::now();
        self.last_tick = Some(tick);
        self.tick_count += 1;

        TickInfo {
            tick_number: self.tick_count,
            waited: tick.duration_since(wait_started),
            on_time,
        }
    }

    /// Registra tempo de execução de um tick
    ///
    /// Marca também o fim da execução, base da espera em `FixedDelay`.
    pub fn record_execution_time(&mut self, duration: Duration) {
        self.last_finish = Some(Instant::now());
        self.total_execution_time += duration;

        if self.min_execution_time.is_none_or(|min| duration < min) {
            self.min_execution_time = Some(duration);
        }

        if self.max_execution_time.is_none_or(|max| duration > max) {
            self.max_execution_time = Some(duration);
        }
    }

    /// Estatísticas do scheduler
    pub fn stats(&self) -> SchedulerStats {
        let avg_execution_time = if self.tick_count > 0 {
            self.total_execution_time
                .div_f64(self.tick_count as f64)
        } else {
            Duration::ZERO
        };

        SchedulerStats {
            tick_count: self.tick_count,
            missed_ticks: self.missed_ticks,
            period_ms: self.config.period_ms,
            avg_execution_time,
            min_execution_time: self.min_execution_time.unwrap_or(Duration::ZERO),
            max_execution_time: self.max_execution_time.unwrap_or(Duration::ZERO),
        }
    }

    /// Reseta estatísticas
    pub fn reset(&mut self) {
        self.last_tick = None;
        self.last_finish = None;
        self.tick_count = 0;
        self.missed_ticks = 0;
        self.total_execution_time = Duration::ZERO;
        self.min_execution_time = None;
        self.max_execution_time = None;
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn missed_ticks(&self) -> u64 {
        self.missed_ticks
    }

    /// Mantendo o período? (menos de 1% de ticks perdidos)
    pub fn is_on_time(&self) -> bool {
        if self.tick_count == 0 {
            return true;
        }

        let miss_rate = self.missed_ticks as f64 / self.tick_count as f64;
        miss_rate < 0.01
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            config: SchedulerConfig::default(),
            last_tick: None,
            last_finish: None,
            tick_count: 0,
            missed_ticks: 0,
            total_execution_time: Duration::ZERO,
            min_execution_time: None,
            max_execution_time: None,
        }
    }
}

/// Dorme em fatias; `false` se a flag foi sinalizada antes do fim
fn sleep_unless_stopped(duration: Duration, stop: &AtomicBool) -> bool {
    let deadline = Instant::now() + duration;
    loop {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        std::thread::sleep((deadline - now).min(STOP_POLL));
    }
}

/// Informações sobre um tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickInfo {
    /// Número do tick (a partir de 1)
    pub tick_number: u64,
    /// Tempo gasto esperando o tick
    pub waited: Duration,
    /// Se o tick ocorreu no tempo esperado
    pub on_time: bool,
}

/// Estatísticas do scheduler
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchedulerStats {
    pub tick_count: u64,
    pub missed_ticks: u64,
    pub period_ms: u64,
    pub avg_execution_time: Duration,
    pub min_execution_time: Duration,
    pub max_execution_time: Duration,
}
