//! Fonte roteirizada: reproduz uma lista fixa de amostras brutas
//!
//! Usada nos testes e pelo `airguard run --replay`. O arquivo de replay tem
//! uma [`RawSample`] JSON por linha; linhas vazias e começadas por `#` são
//! ignoradas.
//!
//! ```text
//! # PM2.5 no máximo, CO em repouso
//! {"values": {"pm25": {"analog": 4095}, "co": {"analog": 0}}}
//! {"values": {"pm25": {"direct": 80.0}, "co": {"direct": 250.0}}}
//! ```

use std::path::Path;

use air_core::prelude::*;

use crate::conditioning::SignalConditioner;
use crate::error::{EnvironmentError, EnvironmentResult};
use crate::fallback::FallbackTable;
use crate::raw::RawSample;

/// Reprodução de amostras gravadas
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    parameters: Vec<ParameterId>,
    samples: Vec<RawSample>,
    conditioner: SignalConditioner,
    position: usize,
    emitted: u64,
    repeat: bool,
}

impl ScriptedSource {
    pub fn new(parameters: &[ParameterId], samples: Vec<RawSample>) -> Self {
        Self {
            parameters: parameters.to_vec(),
            samples,
            conditioner: SignalConditioner::factory(parameters),
            position: 0,
            emitted: 0,
            repeat: false,
        }
    }

    /// Parse de JSON lines
    pub fn from_json_lines(parameters: &[ParameterId], content: &str) -> EnvironmentResult<Self> {
        let mut samples = Vec::new();

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let sample: RawSample =
                serde_json::from_str(line).map_err(|e| EnvironmentError::Replay {
                    line: index + 1,
                    message: e.to_string(),
                })?;
            samples.push(sample);
        }

        if samples.is_empty() {
            return Err(EnvironmentError::InvalidConfig(
                "Replay contains no samples".into(),
            ));
        }

        Ok(Self::new(parameters, samples))
    }

    /// Carrega de arquivo
    pub fn from_file(parameters: &[ParameterId], path: &Path) -> EnvironmentResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EnvironmentError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_lines(parameters, &content)
    }

    /// Recomeça do início ao chegar ao fim
    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_fallbacks(mut self, fallbacks: FallbackTable) -> Self {
        self.conditioner = self.conditioner.with_fallbacks(fallbacks);
        self
    }

    /// Amostras ainda não reproduzidas (sem contar repetições)
    pub fn remaining(&self) -> usize {
        self.samples.len().saturating_sub(self.position)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl AirComponent for ScriptedSource {
    fn name(&self) -> &str {
        "ScriptedSource"
    }

    fn is_ready(&self) -> bool {
        (self.repeat && !self.samples.is_empty()) || self.remaining() > 0
    }
}

impl Sensor for ScriptedSource {
    type RawData = RawSample;

    fn read(&mut self) -> Result<Self::RawData, SensorError> {
        if self.position >= self.samples.len() {
            if !self.repeat || self.samples.is_empty() {
                return Err(SensorError::Exhausted);
            }
            self.position = 0;
        }

        let mut sample = self.samples[self.position].clone();
        sample.sequence = self.emitted;
        self.position += 1;
        self.emitted += 1;
        Ok(sample)
    }

    fn to_reading(&self, raw: &Self::RawData) -> Result<Reading, SensorError> {
        self.conditioner
            .condition(raw, &self.parameters)
            .map(|conditioned| conditioned.reading)
            .map_err(SensorError::from)
    }

    fn parameters(&self) -> Vec<ParameterId> {
        self.parameters.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASIC: [ParameterId; 2] = [ParameterId::Pm25, ParameterId::Co];

    const SCRIPT: &str = r#"
# comentário
{"values": {"pm25": {"analog": 4095}, "co": {"analog": 0}}}

{"values": {"pm25": {"direct": 80.0}, "co": {"direct": 250.0}}}
"#;

    #[test]
    fn test_replay_in_order() {
        let mut source = ScriptedSource::from_json_lines(&BASIC, SCRIPT).unwrap();
        assert_eq!(source.len(), 2);

        let first = source.sample().unwrap();
        assert_eq!(first.get(ParameterId::Pm25), Some(300.0));
        assert_eq!(first.sequence(), 0);

        let second = source.sample().unwrap();
        assert_eq!(second.get(ParameterId::Co), Some(250.0));
        assert_eq!(second.sequence(), 1);

        assert_eq!(source.sample().unwrap_err(), SensorError::Exhausted);
        assert!(!source.is_ready());
    }

    #[test]
    fn test_repeat() {
        let mut source = ScriptedSource::from_json_lines(&BASIC, SCRIPT)
            .unwrap()
            .with_repeat(true);
        for _ in 0..5 {
            assert!(source.sample().is_ok());
        }
        assert_eq!(source.sample().unwrap().sequence(), 5);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = ScriptedSource::from_json_lines(&BASIC, "\n{\"values\": 3}").unwrap_err();
        assert!(matches!(err, EnvironmentError::Replay { line: 2, .. }));
    }

    #[test]
    fn test_empty_script_rejected() {
        assert!(ScriptedSource::from_json_lines(&BASIC, "# nada\n").is_err());
    }

    #[test]
    fn test_missing_parameter_fails_read() {
        let mut source = ScriptedSource::new(
            &BASIC,
            vec![RawSample::new(0).analog(ParameterId::Pm25, 10)],
        );
        assert!(matches!(source.sample(), Err(SensorError::ReadFailed(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.jsonl");
        std::fs::write(&path, SCRIPT).unwrap();

        let source = ScriptedSource::from_file(&BASIC, &path).unwrap();
        assert_eq!(source.remaining(), 2);

        assert!(ScriptedSource::from_file(&BASIC, &dir.path().join("nope.jsonl")).is_err());
    }
}
