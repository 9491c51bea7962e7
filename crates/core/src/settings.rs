//! The renderer settings snapshot.
//!
//! [`SettingsSnapshot`] aggregates everything the external renderer reads at
//! startup: sampling tunables, lens parameters, output size, the region to
//! render, the output mode and the file paths. It is mutated live by the
//! launcher window and written out once through [`crate::codec`].

use crate::geometry::RegionOfInterest;
use std::path::Path;
use tracing::debug;

/// Scene file extensions the renderer can load.
pub const SCENE_FILE_EXTENSIONS: &[&str] = &["dae"];

/// Wire value of `region_x` meaning "no custom region".
pub const FULL_WINDOW_SENTINEL_X: i32 = -1;

/// Path tracer sampling tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub aa_samples_per_pixel: u32,
    pub max_ray_depth: u32,
    pub samples_per_area_light: u32,
    pub ns_diff: u32,
    pub ns_glossy: u32,
    pub ns_refraction: u32,
    pub num_threads: u32,
    pub adaptive_max_tolerance: f32,
    pub adaptive_samples_per_patch: u32,
    pub use_hemisphere_sampling: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let num_threads = std::thread::available_parallelism()
            .map(|n| n.get() as u32)
            .unwrap_or(1);

        Self {
            aa_samples_per_pixel: 1,
            max_ray_depth: 1,
            samples_per_area_light: 1,
            ns_diff: 1,
            ns_glossy: 1,
            ns_refraction: 1,
            num_threads,
            adaptive_max_tolerance: 0.05,
            adaptive_samples_per_patch: 32,
            use_hemisphere_sampling: false,
        }
    }
}

/// Thin-lens camera parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LensSettings {
    pub lens_radius: f64,
    pub focal_distance: f64,
}

impl Default for LensSettings {
    fn default() -> Self {
        Self {
            lens_radius: 0.0,
            focal_distance: 4.7,
        }
    }
}

/// Output image size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

/// Which part of the output image the renderer should process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionMode {
    #[default]
    FullWindow,
    CustomRegion(RegionOfInterest),
}

/// Where the renderer sends its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Realtime,
    WriteToFile,
}

/// Region values as they appear on the wire, sentinel included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireRegion {
    pub x: i32,
    pub y: u32,
    pub dx: u32,
    pub dy: u32,
}

/// A condition that keeps the launch button disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchBlocker {
    SceneFileMissing,
    UnrecognizedSceneExtension,
    OutputFileEmpty,
}

impl LaunchBlocker {
    pub fn message(&self) -> &'static str {
        match self {
            Self::SceneFileMissing => "Scene file does not exist. Please provide a valid scene file.",
            Self::UnrecognizedSceneExtension => "Scene file must be a .dae file.",
            Self::OutputFileEmpty => {
                "Output file empty. Please specify output file name when rendering to file."
            }
        }
    }
}

/// Advisory conditions shown to the user that do not block launching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchWarning {
    CustomRegionRequiresFile,
    OutputWillBeOverwritten(String),
}

impl LaunchWarning {
    pub fn message(&self) -> String {
        match self {
            Self::CustomRegionRequiresFile => {
                "Custom region rendering requires writing to file.".to_string()
            }
            Self::OutputWillBeOverwritten(name) => {
                format!("{} already exists, will be overwritten.", name)
            }
        }
    }
}

/// A complete renderer configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SettingsSnapshot {
    pub render: RenderSettings,
    pub lens: LensSettings,
    pub window: WindowSize,
    pub region: RegionMode,
    pub output: OutputMode,
    pub output_file_name: String,
    /// Free-text camera description passed through to the renderer.
    pub cam_settings: String,
    pub scene_file_path: String,
}

impl SettingsSnapshot {
    /// Switches to rendering a custom region.
    ///
    /// Coming from full-window mode the region starts as the whole canvas.
    pub fn select_custom_region(&mut self) {
        if self.region == RegionMode::FullWindow {
            self.region = RegionMode::CustomRegion(RegionOfInterest::full(
                self.window.width,
                self.window.height,
            ));
            debug!("Switched to custom region rendering");
        }
    }

    pub fn select_full_window(&mut self) {
        self.region = RegionMode::FullWindow;
    }

    /// Stores a region picked by the selector, switching to custom mode.
    pub fn set_region(&mut self, region: RegionOfInterest) {
        self.region = RegionMode::CustomRegion(region);
    }

    /// The custom region, or `None` in full-window mode.
    pub fn custom_region(&self) -> Option<RegionOfInterest> {
        match self.region {
            RegionMode::CustomRegion(roi) => Some(roi),
            RegionMode::FullWindow => None,
        }
    }

    /// The region values written for the renderer.
    ///
    /// Full-window mode is encoded as `(-1, 0, width, height)`.
    pub fn effective_region(&self) -> WireRegion {
        match self.region {
            RegionMode::FullWindow => WireRegion {
                x: FULL_WINDOW_SENTINEL_X,
                y: 0,
                dx: self.window.width,
                dy: self.window.height,
            },
            RegionMode::CustomRegion(roi) => WireRegion {
                x: i32::try_from(roi.x).unwrap_or(i32::MAX),
                y: roi.y,
                dx: roi.dx,
                dy: roi.dy,
            },
        }
    }

    /// Every unmet launch condition, in display order.
    pub fn launch_blockers(&self) -> Vec<LaunchBlocker> {
        let mut blockers = Vec::new();
        let scene = Path::new(&self.scene_file_path);

        if self.scene_file_path.is_empty() || !scene.exists() {
            blockers.push(LaunchBlocker::SceneFileMissing);
        } else if !has_scene_extension(scene) {
            blockers.push(LaunchBlocker::UnrecognizedSceneExtension);
        }

        if self.output == OutputMode::WriteToFile && self.output_file_name.is_empty() {
            blockers.push(LaunchBlocker::OutputFileEmpty);
        }

        blockers
    }

    pub fn can_launch(&self) -> bool {
        self.launch_blockers().is_empty()
    }

    /// Advisory warnings for the current settings.
    pub fn launch_warnings(&self) -> Vec<LaunchWarning> {
        let mut warnings = Vec::new();

        if matches!(self.region, RegionMode::CustomRegion(_)) && self.output == OutputMode::Realtime {
            warnings.push(LaunchWarning::CustomRegionRequiresFile);
        }

        if self.output == OutputMode::WriteToFile
            && !self.output_file_name.is_empty()
            && Path::new(&self.output_file_name).exists()
        {
            warnings.push(LaunchWarning::OutputWillBeOverwritten(self.output_file_name.clone()));
        }

        warnings
    }
}

fn has_scene_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SCENE_FILE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("render-launcher-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, "scene").unwrap();
        path
    }

    #[test]
    fn test_select_custom_region_defaults_to_full_canvas() {
        let mut settings = SettingsSnapshot::default();
        settings.window = WindowSize { width: 1024, height: 768 };
        settings.select_custom_region();
        assert_eq!(settings.custom_region(), Some(RegionOfInterest::full(1024, 768)));
    }

    #[test]
    fn test_select_custom_region_keeps_existing_region() {
        let mut settings = SettingsSnapshot::default();
        settings.set_region(RegionOfInterest::new(10, 20, 30, 40));
        settings.select_custom_region();
        assert_eq!(settings.custom_region(), Some(RegionOfInterest::new(10, 20, 30, 40)));
    }

    #[test]
    fn test_effective_region_full_window_uses_sentinel() {
        let mut settings = SettingsSnapshot::default();
        settings.set_region(RegionOfInterest::new(10, 20, 30, 40));
        settings.select_full_window();
        assert_eq!(
            settings.effective_region(),
            WireRegion { x: -1, y: 0, dx: 800, dy: 600 }
        );
    }

    #[test]
    fn test_effective_region_custom() {
        let mut settings = SettingsSnapshot::default();
        settings.set_region(RegionOfInterest::new(100, 400, 200, 150));
        assert_eq!(
            settings.effective_region(),
            WireRegion { x: 100, y: 400, dx: 200, dy: 150 }
        );
    }

    #[test]
    fn test_missing_scene_blocks_launch() {
        let settings = SettingsSnapshot::default();
        assert_eq!(settings.launch_blockers(), vec![LaunchBlocker::SceneFileMissing]);
        assert!(!settings.can_launch());
    }

    #[test]
    fn test_scene_extension_is_checked() {
        let mut settings = SettingsSnapshot::default();
        settings.scene_file_path = scratch_file("scene.obj").to_string_lossy().into_owned();
        assert_eq!(settings.launch_blockers(), vec![LaunchBlocker::UnrecognizedSceneExtension]);

        settings.scene_file_path = scratch_file("scene.DAE").to_string_lossy().into_owned();
        assert!(settings.can_launch());
    }

    #[test]
    fn test_write_to_file_requires_output_name() {
        let mut settings = SettingsSnapshot::default();
        settings.scene_file_path = scratch_file("cube.dae").to_string_lossy().into_owned();
        settings.output = OutputMode::WriteToFile;
        assert_eq!(settings.launch_blockers(), vec![LaunchBlocker::OutputFileEmpty]);

        settings.output_file_name = "out.png".to_string();
        assert!(settings.can_launch());

        settings.output_file_name.clear();
        settings.output = OutputMode::Realtime;
        assert!(settings.can_launch());
    }

    #[test]
    fn test_launch_warnings() {
        let mut settings = SettingsSnapshot::default();
        settings.select_custom_region();
        assert_eq!(settings.launch_warnings(), vec![LaunchWarning::CustomRegionRequiresFile]);

        let existing = scratch_file("existing.png").to_string_lossy().into_owned();
        settings.output = OutputMode::WriteToFile;
        settings.output_file_name = existing.clone();
        assert_eq!(
            settings.launch_warnings(),
            vec![LaunchWarning::OutputWillBeOverwritten(existing)]
        );
    }
}
