//! Display derivation for the dashboard frontend.
//!
//! Pure mapping from current conditions to an icon name, a background
//! class and an Italian description. The function is total: every input
//! combination, including all-absent, yields a result. The frontend
//! does nothing beyond rendering what this module derives.

use chrono::{Local, Timelike};

/// Icon names matching the frontend's favicon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Rain,
    Cloudy,
    Storm,
    Foggy,
    Snow,
    Sunny,
    Night,
    Hot,
    NightHot,
}

impl Icon {
    /// File-name stem of the icon asset.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Icon::Rain => "rain",
            Icon::Cloudy => "cloudy",
            Icon::Storm => "storm",
            Icon::Foggy => "foggy",
            Icon::Snow => "snow",
            Icon::Sunny => "sunny",
            Icon::Night => "night",
            Icon::Hot => "hot",
            Icon::NightHot => "night-hot",
        }
    }
}

/// Everything the frontend needs to render the current conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayInfo {
    pub icon: Icon,
    pub background_class: &'static str,
    pub description: String,
}

/// Condition classes recognized in the station's free-form condition
/// string (English and Italian spellings).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConditionClass {
    Rain,
    Cloud,
    Storm,
    Fog,
    Snow,
    Clear,
}

/// Whether the local wall clock says it is daytime: hour in `[6, 20)`.
/// Deliberately not timezone- or station-location-aware.
#[must_use]
pub fn is_daytime() -> bool {
    let hour = Local::now().hour();
    (6..20).contains(&hour)
}

/// Derive icon, background class and description from the current
/// reading. Any or all inputs may be absent.
#[must_use]
pub fn derive(
    condition: Option<&str>,
    pressure: Option<f64>,
    temp: Option<f64>,
    _humidity: Option<f64>,
    is_day: bool,
) -> DisplayInfo {
    let class = condition.and_then(classify);
    DisplayInfo {
        icon: icon_for(class, condition.is_some(), pressure, temp, is_day),
        background_class: background_for(class, pressure, temp, is_day),
        description: description_for(class, condition, pressure, temp, is_day),
    }
}

/// Case-insensitive substring match against the keyword table. Checked
/// in a fixed order so mixed strings like "Thunderstorm with rain"
/// classify consistently.
fn classify(condition: &str) -> Option<ConditionClass> {
    let lower = condition.to_lowercase();
    let has = |needle: &str| lower.contains(needle);

    if has("rain") || has("pioggia") {
        Some(ConditionClass::Rain)
    } else if has("cloud") || has("nuvoloso") {
        Some(ConditionClass::Cloud)
    } else if has("storm") || has("thunder") || has("temporale") {
        Some(ConditionClass::Storm)
    } else if has("fog") || has("mist") || has("nebbia") {
        Some(ConditionClass::Fog)
    } else if has("snow") || has("neve") {
        Some(ConditionClass::Snow)
    } else if has("clear") || has("sunny") || has("sereno") {
        Some(ConditionClass::Clear)
    } else {
        None
    }
}

fn icon_for(
    class: Option<ConditionClass>,
    has_condition: bool,
    pressure: Option<f64>,
    temp: Option<f64>,
    is_day: bool,
) -> Icon {
    if let Some(class) = class {
        return match class {
            ConditionClass::Rain => Icon::Rain,
            ConditionClass::Cloud => Icon::Cloudy,
            ConditionClass::Storm => Icon::Storm,
            ConditionClass::Fog => Icon::Foggy,
            ConditionClass::Snow => Icon::Snow,
            ConditionClass::Clear => {
                if is_day {
                    Icon::Sunny
                } else {
                    Icon::Night
                }
            }
        };
    }

    // Unrecognized condition strings keep the default sun
    if has_condition {
        return Icon::Sunny;
    }

    if pressure.is_some_and(|p| p < 1000.0) {
        return Icon::Storm;
    }
    if temp.is_some_and(|t| t > 30.0) {
        return if is_day { Icon::Hot } else { Icon::NightHot };
    }
    if is_day { Icon::Sunny } else { Icon::Night }
}

fn background_for(
    class: Option<ConditionClass>,
    pressure: Option<f64>,
    temp: Option<f64>,
    is_day: bool,
) -> &'static str {
    match class {
        Some(ConditionClass::Rain) => {
            if is_day {
                "weather-bg-rain"
            } else {
                "weather-bg-rain-night"
            }
        }
        Some(ConditionClass::Cloud) => {
            if is_day {
                "weather-bg-cloudy"
            } else {
                "weather-bg-cloudy-night"
            }
        }
        Some(ConditionClass::Storm) => {
            if is_day {
                "weather-bg-storm"
            } else {
                "weather-bg-storm-night"
            }
        }
        Some(ConditionClass::Fog) => {
            if is_day {
                "weather-bg-foggy"
            } else {
                "weather-bg-foggy-night"
            }
        }
        // Snow and clear skies have no dedicated background; fall
        // through to the pressure/temperature grading.
        _ => {
            if pressure.is_some_and(|p| p < 1000.0) {
                if is_day {
                    "weather-bg-storm"
                } else {
                    "weather-bg-storm-night"
                }
            } else if !is_day {
                "weather-bg-night"
            } else {
                match temp {
                    Some(t) if t > 30.0 => "weather-bg-hot",
                    Some(t) if t > 20.0 => "weather-bg-sunny",
                    Some(t) if t > 10.0 => "weather-bg-mild",
                    Some(_) => "weather-bg-cool",
                    None => "weather-bg-mild",
                }
            }
        }
    }
}

fn description_for(
    class: Option<ConditionClass>,
    condition: Option<&str>,
    pressure: Option<f64>,
    temp: Option<f64>,
    is_day: bool,
) -> String {
    let Some(condition) = condition else {
        return synthetic_description(pressure, temp, is_day);
    };

    let lower = condition.to_lowercase();
    let has = |needle: &str| lower.contains(needle);
    let day_night = |day: &str, night: &str| {
        if is_day {
            day.to_string()
        } else {
            night.to_string()
        }
    };

    match class {
        Some(ConditionClass::Rain) => {
            if has("light") || has("leggera") {
                day_night("Pioggia leggera", "Pioggia leggera notturna")
            } else if has("heavy") || has("forte") {
                day_night("Pioggia intensa", "Pioggia intensa notturna")
            } else {
                day_night("Precipitazioni in corso", "Precipitazioni notturne in corso")
            }
        }
        Some(ConditionClass::Cloud) => {
            if has("partly") || has("parzialmente") {
                day_night(
                    "Parzialmente nuvoloso",
                    "Parzialmente nuvoloso, cielo notturno",
                )
            } else if has("mostly") || has("prevalentemente") {
                day_night(
                    "Prevalentemente nuvoloso",
                    "Prevalentemente nuvoloso, cielo notturno",
                )
            } else {
                day_night("Cielo nuvoloso", "Cielo notturno nuvoloso")
            }
        }
        Some(ConditionClass::Storm) => day_night("Condizioni temporalesche", "Temporale notturno"),
        Some(ConditionClass::Fog) => day_night("Nebbia o foschia", "Nebbia notturna"),
        Some(ConditionClass::Snow) => {
            day_night("Nevicata in corso", "Nevicata notturna in corso")
        }
        Some(ConditionClass::Clear) => match temp {
            Some(t) if t > 30.0 => day_night("Cielo sereno, caldo intenso", "Cielo sereno, notte calda"),
            Some(t) if t > 25.0 => day_night("Cielo sereno e soleggiato", "Cielo sereno, notte tiepida"),
            Some(t) if t > 15.0 => day_night(
                "Cielo sereno, temperatura gradevole",
                "Cielo sereno, notte gradevole",
            ),
            _ => day_night(
                "Cielo sereno, temperatura fresca",
                "Cielo sereno, notte fresca",
            ),
        },
        // No translation available: pass the station's wording through
        None => condition.to_string(),
    }
}

/// Description when the station reports no condition string at all:
/// synthesized from pressure, then temperature thresholds.
fn synthetic_description(pressure: Option<f64>, temp: Option<f64>, is_day: bool) -> String {
    let time_of_day = if is_day { "" } else { " notturno" };

    if pressure.is_some_and(|p| p < 1000.0) {
        return format!("Bassa pressione atmosferica{time_of_day}, possibili perturbazioni in arrivo");
    }
    if pressure.is_some_and(|p| p > 1020.0) {
        return format!("Alta pressione{time_of_day}, condizioni stabili");
    }

    let day_night = |day: &str, night: &str| {
        if is_day {
            day.to_string()
        } else {
            night.to_string()
        }
    };

    match temp {
        Some(t) if t > 30.0 => day_night("Cielo sereno, caldo intenso", "Cielo sereno, notte calda"),
        Some(t) if t > 25.0 => day_night(
            "Cielo sereno, temperatura elevata",
            "Cielo sereno, notte tiepida",
        ),
        Some(t) if t > 20.0 => day_night(
            "Cielo sereno, temperatura gradevole",
            "Cielo sereno, notte gradevole",
        ),
        Some(t) if t > 10.0 => day_night("Cielo sereno, temperatura mite", "Cielo sereno, notte fresca"),
        Some(t) if t > 0.0 => day_night(
            "Cielo sereno, temperatura fresca",
            "Cielo sereno, notte fredda",
        ),
        Some(_) => day_night(
            "Cielo sereno, temperatura sotto lo zero",
            "Cielo sereno, notte gelida",
        ),
        // Nothing to go on at all: clear and mild
        None => day_night("Cielo sereno, temperatura mite", "Cielo sereno, notte fresca"),
    }
}
