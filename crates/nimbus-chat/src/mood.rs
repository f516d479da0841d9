//! Mood mapping: weather categories and conversational outcomes map to
//! the discrete state the presentation layer animates.

use nimbus_weather::ConditionCategory;
use serde::{Deserialize, Serialize};

/// Discrete animation/emotion state. One current value per session,
/// overwritten every turn; no history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MoodState {
    #[default]
    Idle,
    Happy,
    Confused,
    Error,
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
    Foggy,
}

impl MoodState {
    /// Name of the animation asset the presentation layer should play
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Happy => "happy",
            Self::Confused => "confused",
            Self::Error => "error",
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rain",
            Self::Stormy => "storm",
            Self::Snowy => "snowy",
            Self::Foggy => "foggy",
        }
    }
}

/// Non-weather outcomes of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Greeting,
    FaqAnswered,
    HelpShown,
    Unrecognized,
    InvalidCity,
    CityNotFound,
    ProviderUnreachable,
}

/// Map a weather category to the mood it should display.
pub fn mood_for_condition(category: ConditionCategory) -> MoodState {
    match category {
        ConditionCategory::Clear => MoodState::Sunny,
        ConditionCategory::Clouds => MoodState::Cloudy,
        ConditionCategory::Rain => MoodState::Rainy,
        ConditionCategory::Thunderstorm => MoodState::Stormy,
        ConditionCategory::Snow => MoodState::Snowy,
        ConditionCategory::Fog => MoodState::Foggy,
        ConditionCategory::Other => MoodState::Confused,
    }
}

/// Map a conversational outcome to the mood it should display.
///
/// User-correctable failures (bad input, unknown city) read as
/// confusion; only systemic provider failures read as an error.
pub fn mood_for_outcome(outcome: TurnOutcome) -> MoodState {
    match outcome {
        TurnOutcome::Greeting | TurnOutcome::FaqAnswered => MoodState::Happy,
        TurnOutcome::HelpShown => MoodState::Idle,
        TurnOutcome::Unrecognized | TurnOutcome::InvalidCity | TurnOutcome::CityNotFound => {
            MoodState::Confused
        }
        TurnOutcome::ProviderUnreachable => MoodState::Error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_moods() {
        assert_eq!(mood_for_condition(ConditionCategory::Clear), MoodState::Sunny);
        assert_eq!(mood_for_condition(ConditionCategory::Clouds), MoodState::Cloudy);
        assert_eq!(mood_for_condition(ConditionCategory::Rain), MoodState::Rainy);
        assert_eq!(
            mood_for_condition(ConditionCategory::Thunderstorm),
            MoodState::Stormy
        );
        assert_eq!(mood_for_condition(ConditionCategory::Snow), MoodState::Snowy);
        assert_eq!(mood_for_condition(ConditionCategory::Fog), MoodState::Foggy);
        assert_eq!(mood_for_condition(ConditionCategory::Other), MoodState::Confused);
    }

    #[test]
    fn test_mixed_label_resolves_per_category_order() {
        // "cloud" is checked before "rain" in the category table, so a
        // label carrying both reads as cloudy
        let category = ConditionCategory::from_label("light rain and cloud");
        assert_eq!(mood_for_condition(category), MoodState::Cloudy);
    }

    #[test]
    fn test_outcome_moods() {
        assert_eq!(mood_for_outcome(TurnOutcome::Greeting), MoodState::Happy);
        assert_eq!(mood_for_outcome(TurnOutcome::FaqAnswered), MoodState::Happy);
        assert_eq!(mood_for_outcome(TurnOutcome::HelpShown), MoodState::Idle);
        assert_eq!(mood_for_outcome(TurnOutcome::Unrecognized), MoodState::Confused);
        assert_eq!(mood_for_outcome(TurnOutcome::InvalidCity), MoodState::Confused);
        assert_eq!(mood_for_outcome(TurnOutcome::CityNotFound), MoodState::Confused);
        assert_eq!(
            mood_for_outcome(TurnOutcome::ProviderUnreachable),
            MoodState::Error
        );
    }

    #[test]
    fn test_animation_names() {
        assert_eq!(MoodState::Idle.animation_name(), "idle");
        assert_eq!(MoodState::Rainy.animation_name(), "rain");
        assert_eq!(MoodState::Stormy.animation_name(), "storm");
    }
}
