//! Config Loading Tests
//!
//! File-based loading and atomic saving of `ClientConfig`.

#[cfg(test)]
mod config_tests {
    use anyhow::Result;
    use coursedesk_core::config::{ClientConfig, ConfigError};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_then_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("config.json");

        let config = ClientConfig {
            timeout_secs: 10,
            ..ClientConfig::default().with_base_url("https://courses.example.com/api")
        };
        config.save_to(&path).await?;

        assert!(path.exists());
        assert!(!temp_dir.path().join("nested").join("config.json.tmp").exists());

        let loaded = ClientConfig::load(Some(&path)).await?;
        assert_eq!(loaded.timeout_secs, 10);
        // The environment may override the URL; everything else round-trips
        assert_eq!(loaded.user_agent, config.user_agent);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_explicit_path_is_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("absent.json");

        let err = ClientConfig::load(Some(&path)).await.unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_file_is_parse_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.json");
        tokio::fs::write(&path, "{ not json").await?;

        let err = ClientConfig::load(Some(&path)).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_values_are_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.json");
        tokio::fs::write(&path, r#"{"timeoutSecs": 0}"#).await?;

        let err = ClientConfig::load(Some(&path)).await.unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        Ok(())
    }
}
