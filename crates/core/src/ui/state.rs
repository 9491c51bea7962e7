//! UI state types and launch outcome.

use crate::settings::SettingsSnapshot;
use std::path::PathBuf;

/// How the launcher window was closed.
#[derive(Clone, Debug, PartialEq)]
pub enum LaunchOutcome {
    /// The snapshot was written to `path`; the renderer may start.
    Launched {
        path: PathBuf,
        snapshot: SettingsSnapshot,
    },
    /// The window closed without launching. Nothing was written.
    Cancelled,
}

/// Current state of the launcher window.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum UiState {
    /// Editing settings.
    #[default]
    Editing,
    /// The last launch attempt failed; the message is shown until the next attempt.
    Error(String),
}
