//! Classificador: leitura → faixa por parâmetro

use air_core::prelude::*;

use crate::error::{EngineError, EngineResult};
use crate::threshold::ThresholdTable;

/// Classifica cada parâmetro configurado na tabela.
///
/// Cada parâmetro é classificado de forma independente. Parâmetros presentes
/// na leitura mas ausentes da tabela são ignorados. Um parâmetro configurado
/// sem valor na leitura é violação de pré-condição da fonte de aquisição e
/// resulta em [`EngineError::MissingReading`].
///
/// ```
/// use air_core::prelude::*;
/// use air_engine::{classify, Threshold, ThresholdTable};
///
/// let table = ThresholdTable::new()
///     .with(ParameterId::Pm25, Threshold::ceiling(75.0, 150.0));
/// let reading = Reading::new([(ParameterId::Pm25, 75.0)]).unwrap();
///
/// let classification = classify(&reading, &table).unwrap();
/// assert_eq!(classification.band(ParameterId::Pm25), Some(SeverityBand::Moderate));
/// ```
pub fn classify(reading: &Reading, table: &ThresholdTable) -> EngineResult<Classification> {
    table
        .iter()
        .map(|(parameter, threshold)| {
            let value = reading
                .get(parameter)
                .ok_or(EngineError::MissingReading(parameter))?;
            Ok((parameter, threshold.classify(value)))
        })
        .collect()
}

/// Classifica um único valor; `None` se o parâmetro não está configurado
pub fn classify_value(
    parameter: ParameterId,
    value: f32,
    table: &ThresholdTable,
) -> Option<SeverityBand> {
    table.get(parameter).map(|threshold| threshold.classify(value))
}
