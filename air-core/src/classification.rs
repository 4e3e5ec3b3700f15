//! Classificação: faixa de severidade por parâmetro

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::parameter::ParameterId;
use crate::severity::SeverityBand;

/// Mapeamento imutável parâmetro → faixa, derivado de uma leitura.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    bands: BTreeMap<ParameterId, SeverityBand>,
}

impl Classification {
    pub fn new<I>(bands: I) -> Self
    where
        I: IntoIterator<Item = (ParameterId, SeverityBand)>,
    {
        Self {
            bands: bands.into_iter().collect(),
        }
    }

    /// Faixa de um parâmetro
    pub fn band(&self, parameter: ParameterId) -> Option<SeverityBand> {
        self.bands.get(&parameter).copied()
    }

    pub fn contains(&self, parameter: ParameterId) -> bool {
        self.bands.contains_key(&parameter)
    }

    /// Algum parâmetro com faixa `>= min`?
    pub fn any_at_least(&self, min: SeverityBand) -> bool {
        self.bands.values().any(|band| band.at_least(min))
    }

    /// Pior faixa presente (`Safe` se vazia)
    pub fn worst(&self) -> SeverityBand {
        self.bands.values().copied().max().unwrap_or_default()
    }

    /// Parâmetros em uma faixa específica
    pub fn in_band(&self, band: SeverityBand) -> impl Iterator<Item = ParameterId> + '_ {
        self.bands
            .iter()
            .filter(move |(_, b)| **b == band)
            .map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParameterId, SeverityBand)> + '_ {
        self.bands.iter().map(|(id, band)| (*id, *band))
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

impl FromIterator<(ParameterId, SeverityBand)> for Classification {
    fn from_iter<T: IntoIterator<Item = (ParameterId, SeverityBand)>>(iter: T) -> Self {
        Self::new(iter)
    }
}
