use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    DirectoryNotFound,

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub llm: LLMConfig,
    pub prompt: PromptConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    pub provider: String,
    pub model: String,
    pub api_key_env: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub temperature: f32,
}

impl Default for LLMConfig {
    fn default() -> Self {
        LLMConfig {
            provider: "gemini".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            temperature: 0.3,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PromptConfig {
    pub max_diff_length: usize,
    pub max_log_length: usize,
    pub log_items: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        PromptConfig {
            max_diff_length: 3000,
            max_log_length: 3000,
            log_items: 5,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = std::env::var("HOME").map_err(|_| ConfigError::DirectoryNotFound)?;
        Ok(PathBuf::from(home).join(".config").join("gitscribe"))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, falling back to defaults when the file
    /// does not exist.
    ///
    /// Every option has a default except the credential, which is resolved
    /// separately through `get_api_key`.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&contents)?;

        // Validate config
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<(), ConfigError> {
        // Validate before saving
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self)?;

        fs::write(&path, contents)?;

        // Set permissions to 600 (owner read/write only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        // Validate provider
        if self.llm.provider != "gemini" {
            return Err(ConfigError::InvalidValue(format!(
                "Unsupported LLM provider: {}. Only 'gemini' is supported in v1",
                self.llm.provider
            )));
        }

        // Validate model
        if !self.llm.model.starts_with("gemini-") {
            return Err(ConfigError::InvalidValue(format!(
                "Invalid model name: {}. Must be a Gemini model",
                self.llm.model
            )));
        }

        // Validate sampling temperature
        if !(0.0..=1.0).contains(&self.llm.temperature) {
            return Err(ConfigError::InvalidValue(format!(
                "temperature must be in [0, 1], got {}",
                self.llm.temperature
            )));
        }

        // Validate prompt caps
        if self.prompt.max_diff_length == 0 {
            return Err(ConfigError::InvalidValue(
                "max_diff_length must be greater than 0".to_string(),
            ));
        }

        if self.prompt.max_log_length == 0 {
            return Err(ConfigError::InvalidValue(
                "max_log_length must be greater than 0".to_string(),
            ));
        }

        if self.prompt.log_items == 0 {
            return Err(ConfigError::InvalidValue(
                "log_items must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get API key from environment variable or config
    pub fn get_api_key(&self) -> Option<String> {
        // First try environment variable
        if let Ok(key) = std::env::var(&self.llm.api_key_env) {
            if !key.is_empty() {
                return Some(key);
            }
        }

        // Fall back to config file if present
        self.llm.api_key.clone()
    }

    /// Check if API key is available
    pub fn has_api_key(&self) -> bool {
        self.get_api_key().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.provider, "gemini");
        assert!(config.llm.model.starts_with("gemini-"));
        assert_eq!(config.llm.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.llm.temperature, 0.3);
        assert_eq!(config.prompt.max_diff_length, 3000);
        assert_eq!(config.prompt.max_log_length, 3000);
        assert_eq!(config.prompt.log_items, 5);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_provider() {
        let mut config = Config::default();
        config.llm.provider = "openai".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_invalid_model() {
        let mut config = Config::default();
        config.llm.model = "gpt-4".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_temperature_out_of_range() {
        let mut config = Config::default();
        config.llm.temperature = 1.5;
        assert!(config.validate().is_err());

        config.llm.temperature = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_caps() {
        let mut config = Config::default();
        config.prompt.max_diff_length = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.prompt.log_items = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_from_env() {
        unsafe {
            std::env::set_var("GITSCRIBE_TEST_API_KEY", "test-key-123");
        }
        let mut config = Config::default();
        config.llm.api_key_env = "GITSCRIBE_TEST_API_KEY".to_string();

        assert_eq!(config.get_api_key(), Some("test-key-123".to_string()));
        assert!(config.has_api_key());

        unsafe {
            std::env::remove_var("GITSCRIBE_TEST_API_KEY");
        }
    }

    #[test]
    fn test_api_key_from_config() {
        let mut config = Config::default();
        config.llm.api_key_env = "NONEXISTENT_VAR".to_string();
        config.llm.api_key = Some("config-key-456".to_string());

        assert_eq!(config.get_api_key(), Some("config-key-456".to_string()));
        assert!(config.has_api_key());
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(config.llm.provider, parsed.llm.provider);
        assert_eq!(config.llm.model, parsed.llm.model);
        assert_eq!(config.prompt.max_diff_length, parsed.prompt.max_diff_length);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: Config = toml::from_str("[prompt]\nlog_items = 10\n").unwrap();

        assert_eq!(parsed.prompt.log_items, 10);
        assert_eq!(parsed.prompt.max_diff_length, 3000);
        assert_eq!(parsed.llm.model, "gemini-2.0-flash");
    }
}
