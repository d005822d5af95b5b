//! Explicit configuration for the playground. There are no ambient globals: the
//! backend credentials, model choice and output directory all live here and are
//! handed to each component at construction time.

use std::path::PathBuf;
use url::Url;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Directory demonstration records are written to when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

/// Reasoning paths for self-consistency when the caller does not choose.
pub const DEFAULT_NUM_SAMPLES: usize = 3;

/// Configuration shared by all playground components.
#[derive(Debug, Clone)]
pub struct PlaygroundConfig {
    /// API key for the completion backend. `None` defers to the backend's own
    /// environment lookup (`OPENAI_API_KEY` for the stock backend).
    pub api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API, for proxies and local servers.
    pub api_base: Option<Url>,

    /// Model identifier sent with every completion request.
    pub model: String,

    /// Where demonstration records are persisted.
    pub output_dir: PathBuf,

    /// Default number of self-consistency reasoning paths.
    pub default_num_samples: usize,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: None,
            model: DEFAULT_MODEL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            default_num_samples: DEFAULT_NUM_SAMPLES,
        }
    }
}

impl PlaygroundConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = Some(api_base);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_default_num_samples(mut self, num_samples: usize) -> Self {
        self.default_num_samples = num_samples;
        self
    }
}

#[cfg(test)]
mod test_config {
    use url::Url;
    use super::PlaygroundConfig;

    #[test]
    fn test_builder_chain() {
        let config = PlaygroundConfig::default()
            .with_api_key("sk-test")
            .with_api_base(Url::parse("http://localhost:8080/v1").unwrap())
            .with_model("gpt-4")
            .with_output_dir("demo_records")
            .with_default_num_samples(5);
        assert_eq!(Some("sk-test".to_string()), config.api_key);
        assert_eq!("gpt-4", config.model);
        assert_eq!("demo_records", config.output_dir.to_str().unwrap());
        assert_eq!(5, config.default_num_samples);
        assert_eq!("http://localhost:8080/v1", config.api_base.unwrap().as_str());
    }

    #[test]
    fn test_defaults() {
        let config = PlaygroundConfig::default();
        assert_eq!("gpt-3.5-turbo", config.model);
        assert_eq!("outputs", config.output_dir.to_str().unwrap());
        assert_eq!(3, config.default_num_samples);
        assert!(config.api_key.is_none());
    }
}
