//! Tiered fallback producing the final statistics object.
//!
//! For each metric and each bound, three tiers are tried in order until
//! one yields data: the dedicated high/low extremum fields, then the
//! plain per-observation values, then the single current-conditions
//! reading. The two bounds of a metric resolve independently, so `Min`
//! and `Max` may come from different tiers.

use serde_json::{Map, Value, json};

use super::fields::{self, METRICS};
use super::reduce;

/// Compute the full statistics object for the unified endpoint.
///
/// The result carries, for every metric, `{key}Min`, `{key}Max`,
/// `{key}MinTime` and `{key}MaxTime` (max only for `precipTotal`), each
/// a finite number / timestamp string or a definite `null`. Callers
/// never need to distinguish a missing key from no data.
#[must_use]
pub fn compute_stats(observations: &[Value], current: Option<&Value>) -> Map<String, Value> {
    let mut stats = Map::new();

    let current_time = current
        .and_then(|obs| obs.get("obsTimeLocal"))
        .and_then(Value::as_str)
        .map(str::to_string);

    for spec in METRICS {
        let plain = fields::collect_samples(observations, spec.plain);
        let plain_extrema = reduce::reduce(&plain);
        let current_value = current
            .and_then(|obs| fields::sample(obs, spec.plain))
            .map(|v| (v, current_time.clone()));

        if spec.has_min {
            let lows = fields::collect_samples(observations, spec.low);
            let (value, time) = resolve_bound(
                observations,
                reduce::reduce(&lows).min,
                plain_extrema.min,
                current_value.clone(),
            );
            stats.insert(format!("{}Min", spec.name), value);
            stats.insert(format!("{}MinTime", spec.name), time);
        }

        let highs = fields::collect_samples(observations, spec.high);
        let (value, time) = resolve_bound(
            observations,
            reduce::reduce(&highs).max,
            plain_extrema.max,
            current_value,
        );
        stats.insert(format!("{}Max", spec.name), value);
        stats.insert(format!("{}MaxTime", spec.name), time);
    }

    stats
}

/// Resolve one (metric, bound) pair through the fallback tiers.
fn resolve_bound(
    observations: &[Value],
    from_extrema: Option<(f64, usize)>,
    from_plain: Option<(f64, usize)>,
    from_current: Option<(f64, Option<String>)>,
) -> (Value, Value) {
    if let Some((value, idx)) = from_extrema.or(from_plain) {
        let time = reduce::observation_time(observations, idx);
        (json!(value), json!(time))
    } else if let Some((value, time)) = from_current {
        (json!(value), json!(time))
    } else {
        (Value::Null, Value::Null)
    }
}

/// Simpler min/max block for the plain stats endpoint: per-observation
/// plain values only, no fallback tiers, no timestamps. Metrics without
/// data report a definite `null`.
#[must_use]
pub fn plain_minmax(observations: &[Value]) -> Map<String, Value> {
    let mut minmax = Map::new();
    for spec in METRICS {
        let samples = fields::collect_samples(observations, spec.plain);
        let extrema = reduce::reduce(&samples);
        if spec.has_min {
            minmax.insert(format!("{}Min", spec.name), bound_value(extrema.min));
        }
        minmax.insert(format!("{}Max", spec.name), bound_value(extrema.max));
    }
    minmax
}

fn bound_value(sample: Option<(f64, usize)>) -> Value {
    sample.map_or(Value::Null, |(value, _)| json!(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn get_f64(stats: &Map<String, Value>, key: &str) -> Option<f64> {
        stats.get(key).and_then(Value::as_f64)
    }

    fn get_str<'a>(stats: &'a Map<String, Value>, key: &'a str) -> Option<&'a str> {
        stats.get(key).and_then(Value::as_str)
    }

    #[test]
    fn test_high_low_extrema_with_timestamps() {
        let observations = vec![
            json!({
                "obsTimeLocal": "09:00",
                "metric": { "temp": 20.0, "tempHigh": 25.0, "tempLow": 18.0 }
            }),
            json!({
                "obsTimeLocal": "10:00",
                "metric": { "temp": 22.0, "tempHigh": 24.0, "tempLow": 19.0 }
            }),
        ];

        let stats = compute_stats(&observations, None);
        assert_eq!(get_f64(&stats, "tempMin"), Some(18.0));
        assert_eq!(get_str(&stats, "tempMinTime"), Some("09:00"));
        assert_eq!(get_f64(&stats, "tempMax"), Some(25.0));
        assert_eq!(get_str(&stats, "tempMaxTime"), Some("09:00"));
    }

    #[test]
    fn test_plain_value_tier_used_verbatim() {
        // No high/low fields anywhere: the plain values' extrema apply
        let observations = vec![
            json!({ "obsTimeLocal": "08:00", "metric": { "temp": 14.0 } }),
            json!({ "obsTimeLocal": "12:00", "metric": { "temp": 21.5 } }),
            json!({ "obsTimeLocal": "16:00", "metric": { "temp": 17.0 } }),
        ];

        let stats = compute_stats(&observations, None);
        assert_eq!(get_f64(&stats, "tempMin"), Some(14.0));
        assert_eq!(get_str(&stats, "tempMinTime"), Some("08:00"));
        assert_eq!(get_f64(&stats, "tempMax"), Some(21.5));
        assert_eq!(get_str(&stats, "tempMaxTime"), Some("12:00"));
    }

    #[test]
    fn test_bounds_resolve_from_different_tiers() {
        // Only a low extremum is reported; the max falls back to the
        // plain values while the min uses the dedicated field.
        let observations = vec![
            json!({ "obsTimeLocal": "07:00", "metric": { "temp": 16.0, "tempLow": 12.0 } }),
            json!({ "obsTimeLocal": "13:00", "metric": { "temp": 23.0 } }),
        ];

        let stats = compute_stats(&observations, None);
        assert_eq!(get_f64(&stats, "tempMin"), Some(12.0));
        assert_eq!(get_f64(&stats, "tempMax"), Some(23.0));
        assert_eq!(get_str(&stats, "tempMaxTime"), Some("13:00"));
    }

    #[test]
    fn test_current_reading_tier() {
        // Zero daily observations: the current-conditions humidity is
        // used as both bounds.
        let current = json!({
            "obsTimeLocal": "11:30",
            "humidity": 65.0,
            "metric": { "temp": 19.0 }
        });

        let stats = compute_stats(&[], Some(&current));
        assert_eq!(get_f64(&stats, "humidityMin"), Some(65.0));
        assert_eq!(get_f64(&stats, "humidityMax"), Some(65.0));
        assert_eq!(get_str(&stats, "humidityMinTime"), Some("11:30"));
        assert_eq!(get_f64(&stats, "tempMin"), Some(19.0));
        assert_eq!(get_f64(&stats, "tempMax"), Some(19.0));
    }

    #[test]
    fn test_every_field_is_number_or_null() {
        // Nothing anywhere: every output field must exist and be null,
        // never absent or non-numeric.
        let stats = compute_stats(&[], None);

        for spec in METRICS {
            let keys: Vec<String> = if spec.has_min {
                vec![
                    format!("{}Min", spec.name),
                    format!("{}Max", spec.name),
                    format!("{}MinTime", spec.name),
                    format!("{}MaxTime", spec.name),
                ]
            } else {
                vec![format!("{}Max", spec.name), format!("{}MaxTime", spec.name)]
            };
            for key in keys {
                let value = stats.get(&key).expect("field must be present");
                assert!(value.is_null(), "{key} should be null, got {value}");
            }
        }
        assert!(!stats.contains_key("precipTotalMin"));
        assert!(!stats.contains_key("precipTotalMinTime"));
    }

    #[test]
    fn test_humidity_root_wins_over_nested() {
        let observations = vec![json!({
            "obsTimeLocal": "09:00",
            "humidityLow": 40.0,
            "metric": { "humidityLow": 20.0, "humidityHigh": 80.0 }
        })];

        let stats = compute_stats(&observations, None);
        assert_eq!(get_f64(&stats, "humidityMin"), Some(40.0));
        assert_eq!(get_f64(&stats, "humidityMax"), Some(80.0));
    }

    #[test]
    fn test_precip_total_max_only_fallback() {
        let observations = vec![
            json!({ "obsTimeLocal": "10:00", "metric": { "precipTotal": 2.0 } }),
            json!({ "obsTimeLocal": "18:00", "metric": { "precipTotal": 6.5 } }),
        ];

        let stats = compute_stats(&observations, None);
        assert_eq!(get_f64(&stats, "precipTotalMax"), Some(6.5));
        assert_eq!(get_str(&stats, "precipTotalMaxTime"), Some("18:00"));
        assert!(!stats.contains_key("precipTotalMin"));
    }

    #[test]
    fn test_alternate_spellings_reconciled_across_observations() {
        let observations = vec![
            json!({ "obsTimeLocal": "06:00", "metric": { "temp_low": 9.0 } }),
            json!({ "obsTimeLocal": "07:00", "metric": { "minTemp": 8.0 } }),
            json!({ "obsTimeLocal": "08:00", "metric": { "tempLow": 10.0 } }),
        ];

        let stats = compute_stats(&observations, None);
        assert_eq!(get_f64(&stats, "tempMin"), Some(8.0));
        assert_eq!(get_str(&stats, "tempMinTime"), Some("07:00"));
    }

    #[test]
    fn test_plain_minmax_block() {
        let observations = vec![
            json!({ "humidity": 55.0, "metric": { "temp": 20.0, "pressure": 1012.0 } }),
            json!({ "humidity": 60.0, "metric": { "temp": 22.0, "pressure": 1009.5 } }),
        ];

        let minmax = plain_minmax(&observations);
        assert_eq!(get_f64(&minmax, "tempMin"), Some(20.0));
        assert_eq!(get_f64(&minmax, "tempMax"), Some(22.0));
        assert_eq!(get_f64(&minmax, "pressureMin"), Some(1009.5));
        assert_eq!(get_f64(&minmax, "humidityMax"), Some(60.0));
        // No wind data: definite nulls, no timestamps anywhere
        assert!(minmax.get("windspeedMin").is_some_and(Value::is_null));
        assert!(!minmax.contains_key("tempMinTime"));
    }
}
