use serde::{Deserialize, Serialize};

/// Coarse weather categories derived from WMO condition codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Fog,
    LightRain,
    Showers,
    /// Fallback for every code outside the table
    Cloudy,
}

/// Icon glyph shown next to the temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherIcon {
    Sun,
    CloudSun,
    Smog,
    CloudRain,
    CloudShowersHeavy,
    Cloud,
}

impl WeatherIcon {
    /// Font Awesome class of the glyph
    pub fn css_class(&self) -> &'static str {
        match self {
            WeatherIcon::Sun => "fa-sun",
            WeatherIcon::CloudSun => "fa-cloud-sun",
            WeatherIcon::Smog => "fa-smog",
            WeatherIcon::CloudRain => "fa-cloud-rain",
            WeatherIcon::CloudShowersHeavy => "fa-cloud-showers-heavy",
            WeatherIcon::Cloud => "fa-cloud",
        }
    }
}

impl WeatherCondition {
    /// Maps a condition code through the fixed range table; first match wins.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => WeatherCondition::Clear,
            1..=3 => WeatherCondition::PartlyCloudy,
            45..=48 => WeatherCondition::Fog,
            51..=67 => WeatherCondition::LightRain,
            80..=99 => WeatherCondition::Showers,
            _ => WeatherCondition::Cloudy,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear sky",
            WeatherCondition::PartlyCloudy => "Partly cloudy",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::LightRain => "Light rain",
            WeatherCondition::Showers => "Rain / storm",
            WeatherCondition::Cloudy => "Cloudy",
        }
    }

    pub fn icon(&self) -> WeatherIcon {
        match self {
            WeatherCondition::Clear => WeatherIcon::Sun,
            WeatherCondition::PartlyCloudy => WeatherIcon::CloudSun,
            WeatherCondition::Fog => WeatherIcon::Smog,
            WeatherCondition::LightRain => WeatherIcon::CloudRain,
            WeatherCondition::Showers => WeatherIcon::CloudShowersHeavy,
            WeatherCondition::Cloudy => WeatherIcon::Cloud,
        }
    }
}

/// Rounds half-up to a whole degree and appends `°C`.
///
/// Half-up means -2.5 becomes -2, the same as a browser's `Math.round`.
/// A reading that is not a finite number shows as `--°C`.
pub fn format_temperature(celsius: f64) -> String {
    if !celsius.is_finite() {
        return "--°C".to_string();
    }
    let floor = celsius.floor();
    // comparing the fraction avoids `x + 0.5` rounding up just below one half
    let rounded = if celsius - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    format!("{}°C", rounded as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_ranges_map_to_their_category() {
        assert_eq!(WeatherCondition::from_code(0), WeatherCondition::Clear);
        for code in 1..=3 {
            assert_eq!(WeatherCondition::from_code(code), WeatherCondition::PartlyCloudy);
        }
        for code in 45..=48 {
            assert_eq!(WeatherCondition::from_code(code), WeatherCondition::Fog);
        }
        for code in 51..=67 {
            assert_eq!(WeatherCondition::from_code(code), WeatherCondition::LightRain);
        }
        for code in 80..=99 {
            assert_eq!(WeatherCondition::from_code(code), WeatherCondition::Showers);
        }
    }

    #[test]
    fn unmapped_codes_fall_back_to_cloudy() {
        for code in [-1, -80, 4, 44, 49, 50, 68, 71, 79, 100, i64::MAX, i64::MIN] {
            assert_eq!(
                WeatherCondition::from_code(code),
                WeatherCondition::Cloudy,
                "code {code}"
            );
        }
        assert_eq!(WeatherCondition::Cloudy.icon().css_class(), "fa-cloud");
    }

    #[test]
    fn temperature_rounds_half_up() {
        assert_eq!(format_temperature(21.4), "21°C");
        assert_eq!(format_temperature(21.5), "22°C");
        assert_eq!(format_temperature(-0.4), "0°C");
        assert_eq!(format_temperature(-2.5), "-2°C");
        assert_eq!(format_temperature(-2.6), "-3°C");
    }

    #[test]
    fn temperature_just_below_half_rounds_down() {
        let below_half = 0.49999999999999994_f64;
        assert_eq!(format_temperature(below_half), "0°C");
        assert_eq!(format_temperature(20.0 + 0.49999999999999), "20°C");
    }

    #[test]
    fn non_finite_temperature_has_placeholder() {
        assert_eq!(format_temperature(f64::NAN), "--°C");
        assert_eq!(format_temperature(f64::INFINITY), "--°C");
    }
}
