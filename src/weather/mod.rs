//! Weather classification
//!
//! Maps a raw weather observation onto a snack-affinity category. The
//! mapping is a priority chain: temperature extremes are checked before
//! condition descriptors, so a 95°F rain shower still calls for something
//! cold.

use serde::{Deserialize, Serialize};

use crate::models::{WeatherCondition, WeatherObservation};
use crate::{Result, WeatherBitesError};

pub mod open_meteo;

pub use open_meteo::WeatherClient;

/// Temperature at or above which the heat rule wins, in °F
pub const HOT_TEMPERATURE_F: f32 = 85.0;
/// Temperature at or below which the cold rule wins, in °F
pub const FREEZING_TEMPERATURE_F: f32 = 32.0;

/// Snack-affinity category derived from a weather observation
///
/// Always a function of an observation; never persisted independently.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SnackCategory {
    RefreshingCold,
    WarmComfort,
    CrunchyNeutral,
    HeartyWarm,
    LightSnack,
}

impl SnackCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SnackCategory::RefreshingCold => "refreshing-cold",
            SnackCategory::WarmComfort => "warm-comfort",
            SnackCategory::CrunchyNeutral => "crunchy-neutral",
            SnackCategory::HeartyWarm => "hearty-warm",
            SnackCategory::LightSnack => "light-snack",
        }
    }
}

/// Classify a weather observation into a snack-affinity category
///
/// The chain is total over valid observations: every observation carrying a
/// temperature or a recognized condition lands in exactly one category.
/// First match wins:
///
/// 1. ≥ 85°F or extreme-heat → refreshing-cold
/// 2. ≤ 32°F, snow, or extreme-cold → warm-comfort
/// 3. rain → hearty-warm
/// 4. overcast → crunchy-neutral
/// 5. otherwise → light-snack
pub fn classify(observation: &WeatherObservation) -> Result<SnackCategory> {
    if observation.temperature_f.is_none() && observation.condition.is_none() {
        return Err(WeatherBitesError::invalid_observation(
            "observation carries neither a temperature nor a recognized condition",
        ));
    }

    let temperature = observation.temperature_f;
    let condition = observation.condition;

    if temperature.is_some_and(|t| t >= HOT_TEMPERATURE_F)
        || condition == Some(WeatherCondition::ExtremeHeat)
    {
        return Ok(SnackCategory::RefreshingCold);
    }

    if temperature.is_some_and(|t| t <= FREEZING_TEMPERATURE_F)
        || matches!(
            condition,
            Some(WeatherCondition::Snow | WeatherCondition::ExtremeCold)
        )
    {
        return Ok(SnackCategory::WarmComfort);
    }

    match condition {
        Some(WeatherCondition::Rain) => Ok(SnackCategory::HeartyWarm),
        Some(WeatherCondition::Overcast) => Ok(SnackCategory::CrunchyNeutral),
        _ => Ok(SnackCategory::LightSnack),
    }
}
