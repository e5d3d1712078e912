//! Display formatting helpers shared by every consumer.
//!
//! All numeric rendering goes through [`fmt_number`]: at most one decimal
//! place, with a redundant trailing `.0` stripped, and `-` for absent/NaN.

use chrono::{DateTime, Utc};

use crate::model::TemperatureUnit;

/// Format an optional number to at most one decimal place.
///
/// `None` and NaN render as `"-"`; `60.0` renders as `"60"`, `32.5` stays
/// `"32.5"`.
pub fn fmt_number(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => {
            let rendered = format!("{v:.1}");
            rendered
                .strip_suffix(".0")
                .map_or(rendered.clone(), str::to_owned)
        }
        _ => "-".to_owned(),
    }
}

/// Format a canonical-Celsius temperature in the requested display unit.
///
/// Celsius values display unconverted; Fahrenheit applies `C * 9/5 + 32`.
pub fn fmt_temperature(celsius: Option<f64>, unit: TemperatureUnit) -> String {
    let Some(c) = celsius.filter(|v| !v.is_nan()) else {
        return "--".to_owned();
    };
    match unit {
        TemperatureUnit::Celsius => format!("{} C", fmt_number(Some(c))),
        TemperatureUnit::Fahrenheit => {
            format!("{} F", fmt_number(Some(c * 9.0 / 5.0 + 32.0)))
        }
    }
}

pub fn fmt_wind(kmh: Option<f64>) -> String {
    match kmh.filter(|v| !v.is_nan()) {
        Some(v) => format!("{} km/h", fmt_number(Some(v))),
        None => "--".to_owned(),
    }
}

pub fn fmt_percent(value: Option<f64>) -> String {
    match value.filter(|v| !v.is_nan()) {
        Some(v) => format!("{}%", fmt_number(Some(v))),
        None => "--".to_owned(),
    }
}

/// Local-ish rendering of an optional timestamp; absent reads as unknown.
pub fn fmt_time(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(t) => t.format("%Y-%m-%d %H:%M UTC").to_string(),
        None => "Unknown time".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_drop_redundant_trailing_zero() {
        assert_eq!(fmt_number(Some(60.0)), "60");
        assert_eq!(fmt_number(Some(32.5)), "32.5");
        assert_eq!(fmt_number(Some(16.11)), "16.1");
        assert_eq!(fmt_number(None), "-");
        assert_eq!(fmt_number(Some(f64::NAN)), "-");
    }

    #[test]
    fn celsius_to_fahrenheit_display() {
        // 16.11 C is 61.0 F; the redundant .0 is stripped.
        assert_eq!(
            fmt_temperature(Some(16.11), TemperatureUnit::Fahrenheit),
            "61 F"
        );
        assert_eq!(
            fmt_temperature(Some(16.11), TemperatureUnit::Celsius),
            "16.1 C"
        );
        assert_eq!(fmt_temperature(None, TemperatureUnit::Fahrenheit), "--");
    }

    #[test]
    fn wind_and_percent_wrappers() {
        assert_eq!(fmt_wind(Some(25.0)), "25 km/h");
        assert_eq!(fmt_wind(None), "--");
        assert_eq!(fmt_percent(Some(40.0)), "40%");
        assert_eq!(fmt_percent(None), "--");
    }
}
