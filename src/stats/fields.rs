//! Observation normalizer: the field-spelling table and sample
//! extraction.
//!
//! Different firmware revisions of the station (and different variants
//! of the upstream API) spell the intra-period extremum fields in
//! different ways. Rather than chained per-metric lookups, each metric
//! declares an ordered accessor list per bound and one generic extractor
//! consumes it; a new spelling is a one-line table edit.

use serde_json::Value;

/// Where an accessor looks on the observation object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Top level of the observation
    Root,
    /// Nested `metric` record
    Metric,
}

/// One candidate field spelling for a (metric, bound) pair.
#[derive(Debug, Clone, Copy)]
pub struct Accessor {
    pub scope: Scope,
    pub field: &'static str,
}

const fn root(field: &'static str) -> Accessor {
    Accessor {
        scope: Scope::Root,
        field,
    }
}

const fn metric(field: &'static str) -> Accessor {
    Accessor {
        scope: Scope::Metric,
        field,
    }
}

/// The metrics the statistics object reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKey {
    Temp,
    Pressure,
    WindSpeed,
    WindGust,
    DewPoint,
    HeatIndex,
    WindChill,
    Humidity,
    PrecipTotal,
}

/// Field-spelling table for one metric.
///
/// Accessors are listed in precedence order: camelCase spellings first,
/// then snake_case, then the `min`/`max`-prefixed variants. For a given
/// observation the first populated spelling wins and later ones are
/// ignored, so one observation contributes at most one sample per
/// (metric, bound). Humidity lists its root-level accessors before the
/// `metric` ones for every bound: the root always wins.
pub struct MetricSpec {
    pub key: MetricKey,
    /// Output field stem, e.g. `temp` yields `tempMin`/`tempMax`
    pub name: &'static str,
    pub low: &'static [Accessor],
    pub high: &'static [Accessor],
    /// Plain (non-extremum) value, used by the fallback tiers
    pub plain: &'static [Accessor],
    /// precipTotal is an accumulating total; only its high bound is
    /// meaningful and no `Min` field is ever emitted for it
    pub has_min: bool,
}

pub static METRICS: &[MetricSpec] = &[
    MetricSpec {
        key: MetricKey::Temp,
        name: "temp",
        low: &[
            metric("tempLow"),
            metric("temperatureLow"),
            metric("temp_low"),
            metric("temperature_low"),
            metric("minTemp"),
            metric("min_temp"),
            metric("temp_min"),
        ],
        high: &[
            metric("tempHigh"),
            metric("temperatureHigh"),
            metric("temp_high"),
            metric("temperature_high"),
            metric("maxTemp"),
            metric("max_temp"),
            metric("temp_max"),
        ],
        plain: &[metric("temp")],
        has_min: true,
    },
    MetricSpec {
        key: MetricKey::Pressure,
        name: "pressure",
        low: &[
            metric("pressureLow"),
            metric("pressure_low"),
            metric("minPressure"),
            metric("min_pressure"),
        ],
        high: &[
            metric("pressureHigh"),
            metric("pressure_high"),
            metric("maxPressure"),
            metric("max_pressure"),
        ],
        plain: &[metric("pressure")],
        has_min: true,
    },
    MetricSpec {
        key: MetricKey::WindSpeed,
        name: "windspeed",
        low: &[
            metric("windspeedLow"),
            metric("windSpeedLow"),
            metric("windspeed_low"),
            metric("windSpeed_low"),
            metric("minWindspeed"),
            metric("minWindSpeed"),
            metric("min_windspeed"),
            metric("min_windSpeed"),
        ],
        high: &[
            metric("windspeedHigh"),
            metric("windSpeedHigh"),
            metric("windspeed_high"),
            metric("windSpeed_high"),
            metric("maxWindspeed"),
            metric("maxWindSpeed"),
            metric("max_windspeed"),
            metric("max_windSpeed"),
        ],
        plain: &[metric("windSpeed")],
        has_min: true,
    },
    MetricSpec {
        key: MetricKey::WindGust,
        name: "windgust",
        low: &[
            metric("windgustLow"),
            metric("windGustLow"),
            metric("windgust_low"),
            metric("windGust_low"),
            metric("minWindgust"),
            metric("minWindGust"),
            metric("min_windgust"),
            metric("min_windGust"),
        ],
        high: &[
            metric("windgustHigh"),
            metric("windGustHigh"),
            metric("windgust_high"),
            metric("windGust_high"),
            metric("maxWindgust"),
            metric("maxWindGust"),
            metric("max_windgust"),
            metric("max_windGust"),
        ],
        plain: &[metric("windGust")],
        has_min: true,
    },
    MetricSpec {
        key: MetricKey::DewPoint,
        name: "dewpt",
        low: &[
            metric("dewptLow"),
            metric("dewPointLow"),
            metric("dewpt_low"),
            metric("dewPoint_low"),
            metric("minDewpt"),
            metric("minDewPoint"),
            metric("min_dewpt"),
            metric("min_dewPoint"),
        ],
        high: &[
            metric("dewptHigh"),
            metric("dewPointHigh"),
            metric("dewpt_high"),
            metric("dewPoint_high"),
            metric("maxDewpt"),
            metric("maxDewPoint"),
            metric("max_dewpt"),
            metric("max_dewPoint"),
        ],
        plain: &[metric("dewpt")],
        has_min: true,
    },
    MetricSpec {
        key: MetricKey::HeatIndex,
        name: "heatindex",
        low: &[
            metric("heatIndexLow"),
            metric("heatIndex_low"),
            metric("heat_index_low"),
            metric("minHeatIndex"),
            metric("min_heatIndex"),
            metric("min_heat_index"),
        ],
        high: &[
            metric("heatIndexHigh"),
            metric("heatIndex_high"),
            metric("heat_index_high"),
            metric("maxHeatIndex"),
            metric("max_heatIndex"),
            metric("max_heat_index"),
        ],
        plain: &[metric("heatIndex")],
        has_min: true,
    },
    MetricSpec {
        key: MetricKey::WindChill,
        name: "windchill",
        low: &[
            metric("windChillLow"),
            metric("windChill_low"),
            metric("wind_chill_low"),
            metric("minWindChill"),
            metric("min_windChill"),
            metric("min_wind_chill"),
        ],
        high: &[
            metric("windChillHigh"),
            metric("windChill_high"),
            metric("wind_chill_high"),
            metric("maxWindChill"),
            metric("max_windChill"),
            metric("max_wind_chill"),
        ],
        plain: &[metric("windChill")],
        has_min: true,
    },
    // Humidity may live at the observation root or under `metric`; the
    // root takes precedence for the same bound.
    MetricSpec {
        key: MetricKey::Humidity,
        name: "humidity",
        low: &[
            root("humidityLow"),
            root("humidity_low"),
            root("minHumidity"),
            root("min_humidity"),
            metric("humidityLow"),
            metric("humidity_low"),
            metric("minHumidity"),
            metric("min_humidity"),
        ],
        high: &[
            root("humidityHigh"),
            root("humidity_high"),
            root("maxHumidity"),
            root("max_humidity"),
            metric("humidityHigh"),
            metric("humidity_high"),
            metric("maxHumidity"),
            metric("max_humidity"),
        ],
        plain: &[root("humidity"), metric("humidity")],
        has_min: true,
    },
    MetricSpec {
        key: MetricKey::PrecipTotal,
        name: "precipTotal",
        low: &[],
        high: &[
            metric("precipTotalHigh"),
            metric("precipTotal_high"),
            metric("precip_total_high"),
            metric("maxPrecipTotal"),
            metric("max_precipTotal"),
            metric("max_precip_total"),
        ],
        plain: &[metric("precipTotal")],
        has_min: false,
    },
];

/// Shared "usable number" predicate: a JSON number that is finite.
/// Strings, nulls, absent fields and non-finite values never contribute.
fn usable_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

fn lookup(observation: &Value, accessor: Accessor) -> Option<f64> {
    let holder = match accessor.scope {
        Scope::Root => observation,
        Scope::Metric => observation.get("metric")?,
    };
    holder.get(accessor.field).and_then(usable_number)
}

/// One sample from a single observation: the first populated spelling
/// in the accessor list, or nothing.
pub fn sample(observation: &Value, accessors: &[Accessor]) -> Option<f64> {
    accessors.iter().find_map(|&a| lookup(observation, a))
}

/// Collect one sample per observation for the given accessor list,
/// tagged with the observation's position for timestamp attribution.
/// Observations with no populated spelling are skipped; an empty result
/// means "no data for this metric/bound".
pub fn collect_samples(observations: &[Value], accessors: &[Accessor]) -> Vec<(f64, usize)> {
    observations
        .iter()
        .enumerate()
        .filter_map(|(idx, obs)| sample(obs, accessors).map(|v| (v, idx)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(key: MetricKey) -> &'static MetricSpec {
        METRICS
            .iter()
            .find(|s| s.key == key)
            .expect("metric in table")
    }

    #[test]
    fn test_rejects_unusable_values() {
        let obs = json!({
            "metric": {
                "tempLow": "12.5",
                "temp_low": null,
                "minTemp": 11.0,
            }
        });
        // String and null spellings are skipped; the prefixed variant wins
        assert_eq!(sample(&obs, spec(MetricKey::Temp).low), Some(11.0));
    }

    #[test]
    fn test_first_spelling_wins() {
        let obs = json!({
            "metric": { "tempLow": 10.0, "temp_low": 5.0, "min_temp": 1.0 }
        });
        assert_eq!(sample(&obs, spec(MetricKey::Temp).low), Some(10.0));
    }

    #[test]
    fn test_missing_metric_record() {
        let obs = json!({ "obsTimeLocal": "09:00" });
        assert_eq!(sample(&obs, spec(MetricKey::Temp).low), None);
        assert_eq!(sample(&obs, spec(MetricKey::Temp).plain), None);
    }

    #[test]
    fn test_humidity_root_precedence() {
        let obs = json!({
            "humidityLow": 40.0,
            "metric": { "humidityLow": 20.0 }
        });
        assert_eq!(sample(&obs, spec(MetricKey::Humidity).low), Some(40.0));
    }

    #[test]
    fn test_humidity_plain_prefers_root() {
        let obs = json!({
            "humidity": 65.0,
            "metric": { "humidity": 60.0 }
        });
        assert_eq!(sample(&obs, spec(MetricKey::Humidity).plain), Some(65.0));

        let nested_only = json!({ "metric": { "humidity": 60.0 } });
        assert_eq!(
            sample(&nested_only, spec(MetricKey::Humidity).plain),
            Some(60.0)
        );
    }

    #[test]
    fn test_one_sample_per_observation() {
        let observations = vec![
            json!({ "metric": { "tempLow": 18.0, "temp_low": 17.0 } }),
            json!({ "metric": {} }),
            json!({ "metric": { "min_temp": 19.0 } }),
        ];
        let samples = collect_samples(&observations, spec(MetricKey::Temp).low);
        assert_eq!(samples, vec![(18.0, 0), (19.0, 2)]);
    }

    #[test]
    fn test_precip_total_has_no_low_accessors() {
        let spec = spec(MetricKey::PrecipTotal);
        assert!(spec.low.is_empty());
        assert!(!spec.has_min);
    }
}
