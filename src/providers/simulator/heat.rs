//! Heat safety rules for Dubai.

use crate::model::{CoolestWalkingTime, HydrationAdvice, HydrationLevel};

const BASE_RECOMMENDATIONS: [&str; 5] = [
    "Drink plenty of water",
    "Wear light-colored clothing",
    "Use SPF 50+ sunscreen",
    "Wear a hat and sunglasses",
    "Take breaks in shade",
];

/// Safest outdoor window for the given local hour (0-23).
pub fn coolest_walking_time(hour: u32) -> CoolestWalkingTime {
    let mut recommendations: Vec<String> =
        BASE_RECOMMENDATIONS.iter().map(|r| r.to_string()).collect();

    let (time_window, temperature) = if (17..=20).contains(&hour) {
        recommendations.insert(2, "Peak UV hours have passed".to_string());
        ("17:00 - 20:00", "32-38°C")
    } else if hour > 20 {
        recommendations.push("Evening walks are ideal".to_string());
        ("20:00 - 22:00", "28-32°C")
    } else {
        ("06:00 - 09:00", "25-32°C")
    };

    CoolestWalkingTime {
        time_window: time_window.to_string(),
        temperature: temperature.to_string(),
        recommendations,
    }
}

/// Apparent temperature (°C) from air temperature (°C) and relative humidity (%),
/// using the Rothfusz regression.
pub fn feels_like(temperature: f64, humidity: f64) -> f64 {
    let t = temperature * 9.0 / 5.0 + 32.0;
    let rh = humidity;

    let hi_f = -42.379 + 2.049_015_23 * t + 10.143_331_27 * rh
        - 0.224_755_41 * t * rh
        - 0.006_837_83 * t * t
        - 0.054_817_17 * rh * rh
        + 0.001_228_74 * t * t * rh
        + 0.000_852_82 * t * rh * rh
        - 0.000_001_99 * t * t * rh * rh;

    (hi_f - 32.0) * 5.0 / 9.0
}

pub fn hydration_advice(temperature: f64) -> HydrationAdvice {
    let (level, water_per_hour, message) = if temperature > 48.0 {
        (
            HydrationLevel::Critical,
            500,
            "Extreme heat: Drink 500ml of water every hour. Seek air conditioning.",
        )
    } else if temperature > 43.0 {
        (
            HydrationLevel::High,
            400,
            "Hot conditions: Drink 400ml of water every hour. Take frequent breaks.",
        )
    } else if temperature > 38.0 {
        (
            HydrationLevel::Moderate,
            300,
            "Warm conditions: Drink 300ml of water every hour. Stay in shade when possible.",
        )
    } else {
        (
            HydrationLevel::Low,
            200,
            "Normal conditions: Drink water regularly throughout the day.",
        )
    };

    HydrationAdvice {
        level,
        water_per_hour,
        message: message.to_string(),
    }
}
