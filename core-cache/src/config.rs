//! Cache configuration

/// Configuration for the download coordinator.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Whether caching is enabled at all. When disabled, download requests
    /// are dropped without side effects.
    pub enabled: bool,

    /// Cache sub-directory name, joined onto the platform cache root
    /// (default: "media-cache")
    pub cache_directory: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_directory: "media-cache".to_string(),
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable caching.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set cache directory name.
    pub fn with_cache_directory(mut self, dir: impl Into<String>) -> Self {
        self.cache_directory = dir.into();
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.cache_directory.is_empty() {
            return Err("cache_directory cannot be empty".to_string());
        }

        if self.cache_directory.chars().any(std::path::is_separator) {
            return Err("cache_directory must be a single path component".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert!(config.enabled);
        assert_eq!(config.cache_directory, "media-cache");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::new()
            .with_enabled(false)
            .with_cache_directory("shorts-cache");

        assert!(!config.enabled);
        assert_eq!(config.cache_directory, "shorts-cache");
    }

    #[test]
    fn test_config_validation() {
        assert!(CacheConfig::default().validate().is_ok());

        let empty_dir = CacheConfig::default().with_cache_directory("");
        assert!(empty_dir.validate().is_err());

        let nested_dir = CacheConfig::default().with_cache_directory("a/b");
        assert!(nested_dir.validate().is_err());
    }
}
