//! Extrema reducer over normalized sample sets.

use serde_json::Value;

/// Minimum and maximum of a sample set, each paired with the index of
/// the observation that produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extrema {
    pub min: Option<(f64, usize)>,
    pub max: Option<(f64, usize)>,
}

/// Reduce samples to their extrema.
///
/// Ties resolve to the first observation reaching the extreme value in
/// input order, so repeated runs on the same input attribute the same
/// timestamp. Empty input yields `None` for both bounds.
pub fn reduce(samples: &[(f64, usize)]) -> Extrema {
    let mut extrema = Extrema::default();
    for &(value, idx) in samples {
        match extrema.min {
            Some((best, _)) if value >= best => {}
            _ => extrema.min = Some((value, idx)),
        }
        match extrema.max {
            Some((best, _)) if value <= best => {}
            _ => extrema.max = Some((value, idx)),
        }
    }
    extrema
}

/// Station-local timestamp of an observation, when present.
pub fn observation_time(observations: &[Value], idx: usize) -> Option<String> {
    observations
        .get(idx)?
        .get("obsTimeLocal")?
        .as_str()
        .map(str::to_string)
}
