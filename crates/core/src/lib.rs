//! Render Launcher Core Library
//!
//! This library provides the core functionality for the render launcher:
//! an interactive settings window that picks a region of the output image
//! and hands a settings snapshot to an offline path tracer.
//!
//! # Overview
//!
//! The launcher never renders anything itself. It edits a
//! [`SettingsSnapshot`], writes it to disk in the renderer's line-based
//! format, and exits so the renderer can read the same file. The library
//! handles:
//!
//! - **Region Selection**: Drag-to-select on a scaled canvas via [`region`]
//! - **Coordinate Mapping**: Screen/canvas transforms via [`geometry`]
//! - **Settings Model**: Renderer tunables and launch gate via [`settings`]
//! - **File Format**: Ordered text serialization via [`codec`]
//! - **User Interface**: The launcher window via [`ui`]
//!
//! # Quick Start
//!
//! ```ignore
//! use render_launcher_core::Launcher;
//!
//! let launcher = Launcher::new()?;
//! let snapshot = launcher.load_or_default()?;
//! launcher.run_interactive(snapshot)?;
//! ```
//!
//! # Module Structure
//!
//! - [`codec`]: Settings file reading and writing
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`geometry`]: Canvas geometry and coordinate transforms
//! - [`region`]: Region selection state machine
//! - [`settings`]: Settings snapshot and launch validation
//! - [`ui`]: User interface components

pub mod codec;
pub mod config;
pub mod error;
pub mod geometry;
pub mod region;
pub mod settings;
pub mod ui;

// Re-export primary types for convenience
pub use codec::{FormatVersion, SettingsCodec};
pub use config::Config;
pub use error::{AppError, Result};
pub use geometry::{CanvasGeometry, RegionOfInterest, ScreenPoint, ScreenRect};
pub use region::{RegionSelector, SelectionState};
pub use settings::{OutputMode, RegionMode, SettingsSnapshot};
pub use ui::LaunchOutcome;

use tracing::info;

/// Main entry point for the launcher.
///
/// Ties the configuration to the codec and the window.
pub struct Launcher {
    config: Config,
    codec: SettingsCodec,
    /// Format the prior settings file is read in.
    input: SettingsCodec,
}

impl Launcher {
    /// Creates a launcher with configuration from the environment
    /// (including `.env` files).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if an environment value is invalid.
    pub fn new() -> Result<Self> {
        Ok(Self::with_config(Config::load()?))
    }

    /// Creates an instance with custom configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            codec: SettingsCodec::new(),
            input: SettingsCodec::new(),
        }
    }

    /// Reads the prior settings file in `version` instead of the extended
    /// format. Snapshots are still written in the extended format.
    pub fn with_input_version(mut self, version: FormatVersion) -> Self {
        self.input = SettingsCodec::with_version(version);
        self
    }

    /// Loads the snapshot at the configured settings path, or defaults if
    /// no file exists there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(&self) -> Result<SettingsSnapshot> {
        let path = &self.config.settings_path;
        if !path.exists() {
            info!(path = %path.display(), "No prior settings, using defaults");
            return Ok(SettingsSnapshot::default());
        }
        self.input.read_with(path)
    }

    /// Writes `snapshot` to the configured settings path.
    pub fn write_snapshot(&self, snapshot: &SettingsSnapshot) -> Result<()> {
        self.codec.write_to(snapshot, &self.config.settings_path)
    }

    /// Opens the launcher window on `snapshot` and blocks until it closes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Ui`] if the window cannot be created.
    pub fn run_interactive(&self, snapshot: SettingsSnapshot) -> Result<LaunchOutcome> {
        ui::run_launcher_ui(snapshot, self.config.clone())
    }

    /// Returns a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a mutable reference to the configuration.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}

/// Initializes the library by loading environment variables.
///
/// Call this once at application startup before using any other functions.
pub fn init() {
    let _ = dotenvy::dotenv();
}
