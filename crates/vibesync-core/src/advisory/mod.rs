//! Advisory (LLM) suggestion service.
//!
//! Best-effort only: every call has a fixed safe default and failures are
//! absorbed inside the client -- nothing here ever propagates into
//! session or flow state, and nothing is retried automatically.

mod client;

pub use client::AdvisoryClient;

use serde::{Deserialize, Serialize};

/// UI theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Calm,
}

impl Theme {
    pub fn parse(s: &str) -> Option<Theme> {
        match s.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "calm" => Some(Theme::Calm),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Calm => "calm",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::parse(s).ok_or_else(|| format!("unknown theme '{s}' (light, dark, calm)"))
    }
}

/// Self-reported mood, fed into the suggestion prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    #[default]
    Neutral,
    Tired,
}

impl Mood {
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Tired => "tired",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "neutral" => Ok(Mood::Neutral),
            "tired" => Ok(Mood::Tired),
            other => Err(format!("unknown mood '{other}' (happy, neutral, tired)")),
        }
    }
}

/// Suggested ambiance: a music style and a UI theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodSuggestion {
    pub music: String,
    pub theme: Theme,
}

impl MoodSuggestion {
    /// The fixed safe default substituted on any advisory failure.
    pub fn fallback() -> Self {
        Self {
            music: "Lofi Beats".into(),
            theme: Theme::Calm,
        }
    }
}

/// End-of-day reflection output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reflection {
    pub summary: String,
    pub mantra: String,
}

impl Reflection {
    /// The fixed safe default substituted on any advisory failure.
    pub fn fallback() -> Self {
        Self {
            summary: "You made it through the day, and that's enough.".into(),
            mantra: "Rest is also a part of progress.".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!(Theme::parse("Light"), Some(Theme::Light));
        assert_eq!(Theme::parse(" dark "), Some(Theme::Dark));
        assert_eq!(Theme::parse("neon"), None);
    }

    #[test]
    fn theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Calm).unwrap(), "\"calm\"");
        let back: Theme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(back, Theme::Dark);
    }

    #[test]
    fn mood_round_trips_through_display() {
        for mood in [Mood::Happy, Mood::Neutral, Mood::Tired] {
            assert_eq!(mood.to_string().parse::<Mood>().unwrap(), mood);
        }
    }

    #[test]
    fn fallbacks_are_the_documented_defaults() {
        let suggestion = MoodSuggestion::fallback();
        assert_eq!(suggestion.music, "Lofi Beats");
        assert_eq!(suggestion.theme, Theme::Calm);
        assert!(!Reflection::fallback().mantra.is_empty());
    }
}
