//! HTTP client for the advisory suggestion service.
//!
//! Talks to a Gemini-style `generateContent` endpoint requesting a JSON
//! response. The public methods are infallible: any transport, status or
//! parse failure collapses to the fixed fallback for that call.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{Mood, MoodSuggestion, Reflection, Theme};
use crate::error::AdvisoryError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Advisory service client.
pub struct AdvisoryClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct RawSuggestion {
    #[serde(default)]
    music: Option<String>,
    #[serde(default)]
    theme: Option<String>,
}

#[derive(Deserialize)]
struct RawReflection {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    mantra: Option<String>,
}

impl AdvisoryClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model: model.into(),
        }
    }

    /// Override the endpoint base URL (tests point this at a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Suggest a music style and theme from recent activity.
    ///
    /// Never fails: any error yields [`MoodSuggestion::fallback`].
    pub async fn suggest_mood(
        &self,
        completed_tasks: usize,
        total_tasks: usize,
        hour_of_day: u32,
        mood: Mood,
    ) -> MoodSuggestion {
        match self
            .request_suggestion(completed_tasks, total_tasks, hour_of_day, mood)
            .await
        {
            Ok(suggestion) => suggestion,
            Err(_) => MoodSuggestion::fallback(),
        }
    }

    /// Turn a free-text reflection into a summary and mantra.
    ///
    /// Never fails: any error yields [`Reflection::fallback`].
    pub async fn reflect(&self, free_text: &str) -> Reflection {
        match self.request_reflection(free_text).await {
            Ok(reflection) => reflection,
            Err(_) => Reflection::fallback(),
        }
    }

    async fn request_suggestion(
        &self,
        completed_tasks: usize,
        total_tasks: usize,
        hour_of_day: u32,
        mood: Mood,
    ) -> Result<MoodSuggestion, AdvisoryError> {
        let time_of_day = match hour_of_day {
            0..=11 => "morning",
            12..=17 => "afternoon",
            _ => "night",
        };
        let productivity = if total_tasks > 0 {
            completed_tasks as f64 / total_tasks as f64
        } else {
            0.0
        };
        let productivity_desc = if productivity > 0.7 {
            "very productive"
        } else if productivity > 0.4 {
            "making good progress"
        } else {
            "just starting"
        };

        let prompt = format!(
            "Analyze the user's focus session context and suggest an appropriate ambiance.\n\
             Context:\n\
             - User's current mood: {mood}\n\
             - Time of day: {time_of_day}\n\
             - Productivity level: {productivity_desc} ({completed_tasks}/{total_tasks} tasks done)\n\
             \n\
             Choose one music style from: 'Lofi Beats', 'Calm River', 'Rain Room', 'Coffee Shop'.\n\
             Choose one UI theme from: 'light', 'dark', 'calm'.\n\
             \n\
             - If it's morning and productivity is low, suggest something to help start, like 'Coffee Shop' and 'light' theme.\n\
             - If it's night or the user is tired, suggest something relaxing like 'Lofi Beats' or 'Rain Room' and a 'dark' or 'calm' theme.\n\
             - If productivity is high, suggest something to maintain flow, like 'Lofi Beats' or 'Calm River'.\n\
             - If the user is happy, suggest something uplifting but not distracting.\n\
             Respond as JSON with string fields \"music\" and \"theme\"."
        );

        let text = self.generate(&prompt).await?;
        let raw: RawSuggestion = serde_json::from_str(&text)
            .map_err(|e| AdvisoryError::MalformedResponse(e.to_string()))?;

        Ok(MoodSuggestion {
            music: raw
                .music
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Lofi Beats".into()),
            theme: raw
                .theme
                .as_deref()
                .and_then(Theme::parse)
                .unwrap_or(Theme::Calm),
        })
    }

    async fn request_reflection(&self, free_text: &str) -> Result<Reflection, AdvisoryError> {
        let prompt = format!(
            "Based on the user's daily reflection, generate a gentle, non-judgmental, \
             one-sentence summary and a short, encouraging mantra for tomorrow.\n\
             The tone should be personal, gentle, and emotional. Avoid harsh productivity language.\n\
             User's reflection: \"{free_text}\"\n\
             Respond as JSON with string fields \"summary\" and \"mantra\"."
        );

        let text = self.generate(&prompt).await?;
        let raw: RawReflection = serde_json::from_str(&text)
            .map_err(|e| AdvisoryError::MalformedResponse(e.to_string()))?;

        Ok(Reflection {
            summary: raw
                .summary
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "You showed up for yourself today.".into()),
            mantra: raw
                .mantra
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Tomorrow is a new opportunity for gentle focus.".into()),
        })
    }

    /// One generateContent round trip, returning the first candidate's
    /// text.
    async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError> {
        let api_key = self.api_key.as_deref().ok_or(AdvisoryError::MissingApiKey)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        });

        let resp = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AdvisoryError::Status(status.as_u16()));
        }

        let body: GenerateResponse = resp.json().await?;
        let text = body
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.trim().to_string())
            .ok_or_else(|| AdvisoryError::MalformedResponse("no candidates".into()))?;
        Ok(text)
    }
}
