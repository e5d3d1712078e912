//! Weather snapshot handler.

use squall_core::{fmt, Console, TemperatureUnit, WeatherSnapshot};

use crate::cli::{GlobalOpts, WeatherArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    console: &Console,
    args: WeatherArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    util::require_session(console).await?;

    let unit = TemperatureUnit::parse(&args.unit).ok_or_else(|| CliError::Validation {
        field: "unit".into(),
        reason: format!("expected 'F' or 'C', got '{}'", args.unit),
    })?;

    let snapshot = match (args.latitude, args.longitude) {
        (Some(lat), Some(lon)) => console.weather_at(lat, lon).await?,
        (None, None) => console
            .dashboard()
            .weather
            .ok_or_else(|| CliError::ApiError {
                message: "No weather snapshot available".into(),
                status: None,
            })?,
        _ => {
            return Err(CliError::Validation {
                field: "coordinates".into(),
                reason: "provide both --latitude and --longitude, or neither".into(),
            })
        }
    };

    let out = global.output.render_detail(
        &snapshot,
        |w: &WeatherSnapshot| {
            let mut lines = Vec::new();
            if let Some(ref location) = w.location {
                lines.push(format!("Location:       {location}"));
            }
            if let Some(ref headline) = w.headline {
                lines.push(format!("Conditions:     {headline}"));
            }
            lines.push(format!(
                "Temperature:    {}",
                fmt::fmt_temperature(w.temperature_c, unit)
            ));
            lines.push(format!("Wind:           {}", fmt::fmt_wind(w.wind_speed_kmh)));
            lines.push(format!(
                "Rain chance:    {}",
                fmt::fmt_percent(w.precipitation_probability)
            ));
            lines.push(format!("Humidity:       {}", fmt::fmt_percent(w.humidity)));
            lines.push(format!("Observed:       {}", fmt::fmt_time(w.observed_at)));
            lines.join("\n")
        },
        |w| w.id.clone(),
    );
    output::emit(&out, global.quiet);
    Ok(())
}
