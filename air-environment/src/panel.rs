//! Painel simulado: potenciômetros + sonda climática implementando `Sensor`
//!
//! Reproduz a bancada de demonstração do monitor: cada poluente é um
//! potenciômetro num pino do ADC e temperatura/umidade vêm de um DHT22.
//! Os knobs podem ser fixados à mão ([`SimulatedPanel::set_knob`]) ou
//! varridos por uma forma de onda determinística (modo sweep).

use std::collections::BTreeMap;
use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use air_core::prelude::*;

use crate::analog::AnalogChannel;
use crate::conditioning::SignalConditioner;
use crate::error::{EnvironmentError, EnvironmentResult};
use crate::fallback::{DEFAULT_HUMIDITY, DEFAULT_TEMPERATURE, FallbackTable};
use crate::raw::{RawSample, RawValue};

/// Parâmetros da bancada completa, na ordem dos pinos do firmware
pub const FIRMWARE_PARAMETERS: [ParameterId; 8] = [
    ParameterId::Pm25,
    ParameterId::Co,
    ParameterId::Pm10,
    ParameterId::No2,
    ParameterId::O3,
    ParameterId::So2,
    ParameterId::Temperature,
    ParameterId::Humidity,
];

/// Configuração do painel simulado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Parâmetros expostos pela fonte
    pub parameters: Vec<ParameterId>,
    /// Taxa de amostragem nominal em Hz
    pub sample_rate: f32,
    /// Varre os knobs e o clima em vez de usar valores fixos
    pub sweep: bool,
    /// A cada N amostras o DHT22 devolve NaN (0 = nunca)
    pub climate_fault_every: u64,
    /// Substituições para leituras inválidas
    pub fallbacks: FallbackTable,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            parameters: FIRMWARE_PARAMETERS.to_vec(),
            sample_rate: 1.0,
            sweep: false,
            climate_fault_every: 0,
            fallbacks: FallbackTable::default(),
        }
    }
}

impl PanelConfig {
    /// Painel restrito a um subconjunto de parâmetros
    pub fn for_parameters(parameters: &[ParameterId]) -> Self {
        Self {
            parameters: parameters.to_vec(),
            ..Self::default()
        }
    }

    pub fn with_sweep(mut self, sweep: bool) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn with_climate_fault_every(mut self, every: u64) -> Self {
        self.climate_fault_every = every;
        self
    }

    pub fn with_fallbacks(mut self, fallbacks: FallbackTable) -> Self {
        self.fallbacks = fallbacks;
        self
    }
}

/// Bancada simulada (potenciômetros + DHT22)
#[derive(Debug, Clone)]
pub struct SimulatedPanel {
    config: PanelConfig,
    conditioner: SignalConditioner,
    knobs: BTreeMap<ParameterId, u16>,
    temperature: f32,
    humidity: f32,
    ready: bool,
    sample_count: u64,
}

impl SimulatedPanel {
    /// Painel de 8 parâmetros com configuração padrão
    pub fn new() -> EnvironmentResult<Self> {
        Self::with_config(PanelConfig::default())
    }

    /// Cria painel validando a configuração
    pub fn with_config(config: PanelConfig) -> EnvironmentResult<Self> {
        if config.parameters.is_empty() {
            return Err(EnvironmentError::InvalidConfig(
                "Panel must expose at least one parameter".into(),
            ));
        }

        if config.sample_rate < 0.0 {
            return Err(EnvironmentError::InvalidConfig(
                "Sample rate must be non-negative".into(),
            ));
        }

        let mut channels = Vec::new();
        for &parameter in &config.parameters {
            if is_climate(parameter) {
                continue;
            }
            let channel = AnalogChannel::factory(parameter).ok_or_else(|| {
                EnvironmentError::InvalidConfig(format!("no analog channel for {}", parameter))
            })?;
            channels.push(channel);
        }

        let conditioner = SignalConditioner::new(channels, config.fallbacks.clone());
        conditioner.validate()?;

        let knobs = config
            .parameters
            .iter()
            .filter(|p| !is_climate(**p))
            .map(|p| (*p, 0))
            .collect();

        Ok(Self {
            config,
            conditioner,
            knobs,
            temperature: DEFAULT_TEMPERATURE,
            humidity: DEFAULT_HUMIDITY,
            ready: false,
            sample_count: 0,
        })
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Amostras produzidas desde a criação
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    pub fn knob(&self, parameter: ParameterId) -> Option<u16> {
        self.knobs.get(&parameter).copied()
    }

    /// Posiciona um potenciômetro (contagem do ADC)
    pub fn set_knob(&mut self, parameter: ParameterId, count: u16) -> EnvironmentResult<()> {
        let channel = self.conditioner.channel(parameter).ok_or_else(|| {
            EnvironmentError::InvalidConfig(format!("{} has no knob on this panel", parameter))
        })?;

        if count > channel.adc_max {
            return Err(EnvironmentError::OutOfRange(format!(
                "{} knob count {} exceeds {}",
                parameter, count, channel.adc_max
            )));
        }

        self.knobs.insert(parameter, count);
        Ok(())
    }

    /// Posiciona o knob na menor contagem que produz pelo menos `value`
    pub fn set_level(&mut self, parameter: ParameterId, value: f32) -> EnvironmentResult<u16> {
        let count = self
            .conditioner
            .channel(parameter)
            .map(|c| c.count_for(value))
            .ok_or_else(|| {
                EnvironmentError::InvalidConfig(format!("{} has no knob on this panel", parameter))
            })?;
        self.set_knob(parameter, count)?;
        Ok(count)
    }

    /// Valores fixos da sonda climática (fora do modo sweep)
    pub fn set_climate(&mut self, temperature: f32, humidity: f32) {
        self.temperature = temperature;
        self.humidity = humidity;
    }

    /// Forma de onda do knob no modo sweep (0..=adc_max, fase por canal)
    fn sweep_count(&self, index: usize, adc_max: u16) -> u16 {
        let phase = self.sample_count as f32 * 0.1 + index as f32 * PI / 4.0;
        let unit = (phase.sin() + 1.0) / 2.0;
        (unit * f32::from(adc_max)).round() as u16
    }

    fn climate_fault(&self) -> bool {
        let every = self.config.climate_fault_every;
        every > 0 && (self.sample_count + 1) % every == 0
    }

    fn climate(&self) -> (f32, f32) {
        if !self.config.sweep {
            return (self.temperature, self.humidity);
        }
        // 17-33 °C e 25-75 %: cruza as duas bordas de conforto
        let cycle = self.sample_count as f32 * 0.05;
        (25.0 + 8.0 * cycle.sin(), 50.0 + 25.0 * (cycle * 1.3).cos())
    }
}

fn is_climate(parameter: ParameterId) -> bool {
    matches!(parameter, ParameterId::Temperature | ParameterId::Humidity)
}

// ═══════════════════════════════════════════════════════════════════════════════
// IMPLEMENTAÇÃO DOS TRAITS DO CORE
// ═══════════════════════════════════════════════════════════════════════════════

impl AirComponent for SimulatedPanel {
    fn name(&self) -> &str {
        "SimulatedPanel"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

impl Sensor for SimulatedPanel {
    type RawData = RawSample;

    fn read(&mut self) -> Result<Self::RawData, SensorError> {
        if !self.ready {
            return Err(SensorError::NotInitialized);
        }

        let mut sample = RawSample::new(self.sample_count);

        for (index, parameter) in self.config.parameters.iter().enumerate() {
            if is_climate(*parameter) {
                continue;
            }
            let count = match (self.config.sweep, self.conditioner.channel(*parameter)) {
                (true, Some(channel)) => self.sweep_count(index, channel.adc_max),
                _ => self.knobs.get(parameter).copied().unwrap_or(0),
            };
            sample.values.insert(*parameter, RawValue::Analog(count));
        }

        let (temperature, humidity) = if self.climate_fault() {
            (f32::NAN, f32::NAN)
        } else {
            self.climate()
        };
        for (parameter, value) in [
            (ParameterId::Temperature, temperature),
            (ParameterId::Humidity, humidity),
        ] {
            if self.config.parameters.contains(&parameter) {
                sample.values.insert(parameter, RawValue::Direct(value));
            }
        }

        self.sample_count += 1;
        Ok(sample)
    }

    fn to_reading(&self, raw: &Self::RawData) -> Result<Reading, SensorError> {
        self.conditioner
            .condition(raw, &self.config.parameters)
            .map(|conditioned| conditioned.reading)
            .map_err(SensorError::from)
    }

    fn parameters(&self) -> Vec<ParameterId> {
        self.config.parameters.clone()
    }

    fn sample_rate(&self) -> f32 {
        self.config.sample_rate
    }

    fn calibrate(&mut self) -> Result<(), SensorError> {
        // Nada a ajustar no simulador além de liberar as leituras
        self.ready = true;
        Ok(())
    }
}
