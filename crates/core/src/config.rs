use crate::error::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Settings file read by the renderer when no override is given.
pub const DEFAULT_SETTINGS_PATH: &str = "settings.txt";

/// On-screen height of the region canvas, in pixels.
pub const DEFAULT_DISPLAY_HEIGHT: f32 = 160.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub settings_path: PathBuf,
    pub display_height: f32,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();

        let mut builder = Self::builder();

        if let Ok(path) = env::var("LAUNCHER_SETTINGS_PATH") {
            builder = builder.with_settings_path(path);
        }

        if let Ok(raw) = env::var("LAUNCHER_DISPLAY_HEIGHT") {
            let height = raw.trim().parse::<f32>().map_err(|_| {
                AppError::config(format!("LAUNCHER_DISPLAY_HEIGHT must be a number, got {:?}", raw))
            })?;
            builder = builder.with_display_height(height);
        }

        builder.build()
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Starts a builder from this configuration, for applying overrides.
    pub fn to_builder(&self) -> ConfigBuilder {
        ConfigBuilder {
            settings_path: Some(self.settings_path.clone()),
            display_height: Some(self.display_height),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    settings_path: Option<PathBuf>,
    display_height: Option<f32>,
}

impl ConfigBuilder {
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    pub fn with_display_height(mut self, height: f32) -> Self {
        self.display_height = Some(height);
        self
    }

    pub fn build(self) -> Result<Config> {
        let settings_path = self
            .settings_path
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
        if settings_path.as_os_str().is_empty() {
            return Err(AppError::config("settings path must not be empty"));
        }

        let display_height = self.display_height.unwrap_or(DEFAULT_DISPLAY_HEIGHT);
        if !display_height.is_finite() || display_height <= 0.0 {
            return Err(AppError::config(format!(
                "display height must be positive, got {}",
                display_height
            )));
        }

        Ok(Config {
            settings_path,
            display_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = Config::builder().build().unwrap();
        assert_eq!(config.settings_path, PathBuf::from("settings.txt"));
        assert_eq!(config.display_height, DEFAULT_DISPLAY_HEIGHT);
    }

    #[test]
    fn test_builder_overrides() {
        let config = Config::builder()
            .with_settings_path("/tmp/render.txt")
            .with_display_height(240.0)
            .build()
            .unwrap();
        assert_eq!(config.settings_path, PathBuf::from("/tmp/render.txt"));
        assert_eq!(config.display_height, 240.0);

        let overridden = config.to_builder().with_display_height(90.0).build().unwrap();
        assert_eq!(overridden.settings_path, PathBuf::from("/tmp/render.txt"));
        assert_eq!(overridden.display_height, 90.0);
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        assert!(matches!(
            Config::builder().with_display_height(0.0).build(),
            Err(AppError::Config(_))
        ));
        assert!(Config::builder().with_display_height(-3.0).build().is_err());
        assert!(Config::builder().with_settings_path("").build().is_err());
    }
}
