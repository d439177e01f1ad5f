use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4.1-nano";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Connection settings for an OpenAI-compatible chat completions endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
}

impl GeneratorConfig {
    /// Read `QUIZ_AI_*` variables. `None` when no API key is set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key/value source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let api_key = lookup("QUIZ_AI_API_KEY")?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = lookup("QUIZ_AI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let model = lookup("QUIZ_AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into());
        let temperature = lookup("QUIZ_AI_TEMPERATURE")
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);
        Some(Self {
            base_url,
            api_key: api_key.trim().to_string(),
            model,
            temperature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_or_blank_key_disables_generation() {
        assert_eq!(GeneratorConfig::from_lookup(lookup(&[])), None);
        assert_eq!(
            GeneratorConfig::from_lookup(lookup(&[("QUIZ_AI_API_KEY", "  ")])),
            None
        );
    }

    #[test]
    fn applies_defaults_and_ignores_bad_temperature() {
        let config = GeneratorConfig::from_lookup(lookup(&[
            ("QUIZ_AI_API_KEY", "sk-test"),
            ("QUIZ_AI_TEMPERATURE", "warm"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!((config.temperature - DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
    }

    #[test]
    fn reads_overrides() {
        let config = GeneratorConfig::from_lookup(lookup(&[
            ("QUIZ_AI_API_KEY", "sk-test"),
            ("QUIZ_AI_BASE_URL", "http://localhost:8080/v1"),
            ("QUIZ_AI_MODEL", "local-model"),
            ("QUIZ_AI_TEMPERATURE", "0.2"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.model, "local-model");
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
    }
}
