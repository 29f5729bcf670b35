use crate::constants::DEFAULT_TONE;
use crate::types::{Keywords, ValidationError};

/// Inputs for one content generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    pub keywords: Keywords,
    pub city: String,
    pub state: String,
    pub tone: Option<String>,
    pub company_name: Option<String>,
}

impl GenerationParams {
    /// City and state are required; surrounding whitespace is dropped.
    pub fn new(
        keywords: Keywords,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let city = city.into().trim().to_string();
        let state = state.into().trim().to_string();

        if city.is_empty() {
            return Err(ValidationError::EmptyField("city"));
        }
        if state.is_empty() {
            return Err(ValidationError::EmptyField("state"));
        }

        Ok(Self {
            keywords,
            city,
            state,
            tone: None,
            company_name: None,
        })
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = non_blank(tone.into());
        self
    }

    pub fn with_company_name(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = non_blank(company_name.into());
        self
    }

    pub fn tone_or_default(&self) -> &str {
        self.tone.as_deref().unwrap_or(DEFAULT_TONE)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Keywords {
        Keywords::collect(["plumbing"]).unwrap()
    }

    #[test]
    fn city_and_state_are_required() {
        assert_eq!(
            GenerationParams::new(keywords(), " ", "Texas").unwrap_err(),
            ValidationError::EmptyField("city")
        );
        assert_eq!(
            GenerationParams::new(keywords(), "Austin", "").unwrap_err(),
            ValidationError::EmptyField("state")
        );
    }

    #[test]
    fn blank_optionals_stay_unset() {
        let params = GenerationParams::new(keywords(), " Austin ", "Texas")
            .unwrap()
            .with_tone("  ")
            .with_company_name("");
        assert_eq!(params.city, "Austin");
        assert_eq!(params.tone, None);
        assert_eq!(params.tone_or_default(), "professional");
        assert_eq!(params.company_name, None);
    }

    #[test]
    fn explicit_tone_wins() {
        let params = GenerationParams::new(keywords(), "Austin", "Texas")
            .unwrap()
            .with_tone("friendly");
        assert_eq!(params.tone_or_default(), "friendly");
    }
}
