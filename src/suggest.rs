//! Binder-brand suggestions via the Gemini text-completion API
//!
//! Strictly non-essential: a missing API key short-circuits into an
//! instructive message instead of an error, and callers treat the whole
//! feature as fire-and-forget.

use serde::{Deserialize, Serialize};

use crate::error::{OrganizerError, Result};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL_NAME: &str = "gemini-2.5-flash";

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Client for the suggestion service
pub struct SuggestionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl SuggestionClient {
    /// Read the API key from the environment; an unset key is fine and just
    /// disables the feature
    pub fn from_env() -> Self {
        Self::with_base_url(GEMINI_BASE_URL, std::env::var(API_KEY_ENV).ok())
    }

    pub(crate) fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        SuggestionClient {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Ask for 3-5 binder brand recommendations fitting the collection.
    ///
    /// Without an API key no request is made and the returned text tells the
    /// user how to enable the feature.
    pub async fn suggest_binder_brands(
        &self,
        pocket_size: u32,
        total_cards: u32,
        pages_needed: u32,
    ) -> Result<String> {
        let Some(api_key) = &self.api_key else {
            log::debug!("No {} set, skipping suggestion call", API_KEY_ENV);
            return Ok(format!(
                "Set the {API_KEY_ENV} environment variable to get binder brand recommendations."
            ));
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, MODEL_NAME, api_key
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(pocket_size, total_cards, pages_needed),
                }],
            }],
        };

        log::debug!("Requesting binder suggestions for {total_cards} cards");

        let response = self.http.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(OrganizerError::HttpStatus(response.status()));
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| OrganizerError::Suggestion("empty completion response".to_string()))
    }
}

fn build_prompt(pocket_size: u32, total_cards: u32, pages_needed: u32) -> String {
    format!(
        "As a Pokemon TCG collector expert, suggest 3-5 of the best {pocket_size}-pocket \
binder brands for storing {total_cards} cards (approximately {pages_needed} pages needed).

Include popular TCG binder brands like:
- Ultra Pro
- Ultimate Guard
- Dragon Shield
- Vault X
- 1up Trading
- TopDeck
- BCW
- DEX Protection

For each suggestion, provide:
1. Brand & model name
2. Approximate capacity (pages/slots)
3. Price range ($)
4. Key feature (zipper, side-loading, D-ring, etc.)
5. Where to buy (Amazon, local game store, etc.)

Format as a clean list. Be specific about models that fit {pocket_size}-pocket pages \
and can hold at least {total_cards} cards."
    )
}
