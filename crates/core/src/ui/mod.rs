//! Launcher window for editing and launching a render.
//!
//! This module provides the settings form, the region canvas and the
//! launch gate. All decisions live in the core types; the window only
//! forwards input and draws.
//!
//! # Architecture
//!
//! The UI is split into focused submodules:
//! - [`state`]: Window state and launch outcome types
//! - [`preferences`]: Recently used scenes, persisted between sessions
//! - [`rendering`]: Drawing utilities for the region canvas
//! - [`selection`]: Pointer input forwarding to the [`RegionSelector`](crate::region::RegionSelector)
//! - [`launcher`]: Main application logic
//!
//! # Usage
//!
//! ```ignore
//! use render_launcher_core::{ui, Config, SettingsSnapshot};
//!
//! let config = Config::load()?;
//! match ui::run_launcher_ui(SettingsSnapshot::default(), config)? {
//!     ui::LaunchOutcome::Launched { path, .. } => println!("wrote {}", path.display()),
//!     ui::LaunchOutcome::Cancelled => {}
//! }
//! ```

mod launcher;
mod preferences;
mod rendering;
mod selection;
mod state;

// Public API exports
pub use launcher::LauncherApp;
pub use preferences::{Preferences, MAX_RECENT_SCENES};
pub use state::{LaunchOutcome, UiState};

use crate::config::Config;
use crate::error::Result;
use crate::settings::SettingsSnapshot;

/// Opens the launcher window and blocks until it is closed.
///
/// # Arguments
/// * `snapshot` - Initial settings, either defaults or a prior snapshot
/// * `config` - Where to write the snapshot and how large to draw the canvas
///
/// # Returns
/// - `Ok(LaunchOutcome::Launched { .. })` - The snapshot was written
/// - `Ok(LaunchOutcome::Cancelled)` - The window closed without launching
/// - `Err(e)` - The window could not be created or run
pub fn run_launcher_ui(snapshot: SettingsSnapshot, config: Config) -> Result<LaunchOutcome> {
    launcher::run(snapshot, config)
}
