//! Line-based settings file format shared with the renderer.
//!
//! A snapshot is written as one value per line in a fixed order:
//!
//! ```text
//! aa_samples_per_pixel        u32
//! max_ray_depth               u32
//! samples_per_area_light      u32
//! ns_diff                     u32
//! ns_glossy                   u32
//! ns_refraction               u32
//! num_threads                 u32
//! adaptive_max_tolerance      f32
//! adaptive_samples_per_patch  u32
//! use_hemisphere_sampling     0/1
//! lens_radius                 f64
//! focal_distance              f64
//! write_to_file               0/1
//! render_custom_region        0/1   (extended format only)
//! window_width                u32
//! window_height               u32
//! region_x                    i32   (-1 in full-window mode)
//! region_y                    u32
//! region_dx                   u32
//! region_dy                   u32
//! output_file_name            text
//! cam_settings                text
//! scene_file_path             text
//! ```
//!
//! Numbers use Rust's locale-independent `Display` form, which parses back
//! to the same value. Text fields must not contain `\n` or `\r`; both end a
//! line, and [`SettingsCodec::write_to`] refuses to write them.
//!
//! The legacy format lacks `render_custom_region`; its region mode is
//! inferred from the `region_x` sentinel. Nothing in the file says which
//! layout it uses, so the reader never guesses: [`SettingsCodec::decode`]
//! accepts only the extended format, and legacy files are read through a
//! codec built with [`FormatVersion::Legacy`].

use crate::error::{AppError, Result};
use crate::geometry::RegionOfInterest;
use crate::settings::{
    LensSettings, OutputMode, RegionMode, RenderSettings, SettingsSnapshot, WindowSize,
};
use std::fmt::Display;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Number of lines in the extended format.
pub const EXTENDED_LINE_COUNT: usize = 23;

/// Number of lines in the legacy format.
pub const LEGACY_LINE_COUNT: usize = 22;

/// Settings file layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatVersion {
    /// No `render_custom_region` line.
    Legacy,
    /// Includes `render_custom_region` after `write_to_file`.
    #[default]
    Extended,
}

impl FormatVersion {
    /// Number of lines a complete file of this layout has.
    pub fn line_count(&self) -> usize {
        match self {
            Self::Legacy => LEGACY_LINE_COUNT,
            Self::Extended => EXTENDED_LINE_COUNT,
        }
    }
}

/// Reads and writes [`SettingsSnapshot`]s in the renderer's text format.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsCodec {
    version: FormatVersion,
}

impl SettingsCodec {
    /// A codec reading and writing the extended format.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(version: FormatVersion) -> Self {
        Self { version }
    }

    pub fn version(&self) -> FormatVersion {
        self.version
    }

    /// Renders `settings` as text, every field on its own line.
    pub fn encode(&self, settings: &SettingsSnapshot) -> String {
        let mut out = String::new();
        let render = &settings.render;

        push_line(&mut out, render.aa_samples_per_pixel);
        push_line(&mut out, render.max_ray_depth);
        push_line(&mut out, render.samples_per_area_light);
        push_line(&mut out, render.ns_diff);
        push_line(&mut out, render.ns_glossy);
        push_line(&mut out, render.ns_refraction);
        push_line(&mut out, render.num_threads);
        push_line(&mut out, render.adaptive_max_tolerance);
        push_line(&mut out, render.adaptive_samples_per_patch);
        push_line(&mut out, flag(render.use_hemisphere_sampling));
        push_line(&mut out, settings.lens.lens_radius);
        push_line(&mut out, settings.lens.focal_distance);

        push_line(&mut out, flag(settings.output == OutputMode::WriteToFile));
        if self.version == FormatVersion::Extended {
            push_line(&mut out, flag(matches!(settings.region, RegionMode::CustomRegion(_))));
        }
        push_line(&mut out, settings.window.width);
        push_line(&mut out, settings.window.height);

        let region = settings.effective_region();
        push_line(&mut out, region.x);
        push_line(&mut out, region.y);
        push_line(&mut out, region.dx);
        push_line(&mut out, region.dy);

        push_line(&mut out, &settings.output_file_name);
        push_line(&mut out, &settings.cam_settings);
        push_line(&mut out, &settings.scene_file_path);

        out
    }

    /// Parses a settings file in the extended format.
    ///
    /// # Errors
    ///
    /// Fails on the first missing or malformed field, or on extra
    /// non-blank lines after the last field.
    pub fn decode(text: &str) -> Result<SettingsSnapshot> {
        Self::new().decode_with(text)
    }

    /// Parses a settings file in this codec's format version.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode).
    pub fn decode_with(&self, text: &str) -> Result<SettingsSnapshot> {
        let version = self.version;
        debug!(?version, "Decoding settings");
        let mut reader = FieldReader::new(text);

        let render = RenderSettings {
            aa_samples_per_pixel: reader.parse("aa_samples_per_pixel", UNSIGNED)?,
            max_ray_depth: reader.parse("max_ray_depth", UNSIGNED)?,
            samples_per_area_light: reader.parse("samples_per_area_light", UNSIGNED)?,
            ns_diff: reader.parse("ns_diff", UNSIGNED)?,
            ns_glossy: reader.parse("ns_glossy", UNSIGNED)?,
            ns_refraction: reader.parse("ns_refraction", UNSIGNED)?,
            num_threads: reader.parse("num_threads", UNSIGNED)?,
            adaptive_max_tolerance: reader.parse("adaptive_max_tolerance", FLOAT)?,
            adaptive_samples_per_patch: reader.parse("adaptive_samples_per_patch", UNSIGNED)?,
            use_hemisphere_sampling: reader.flag("use_hemisphere_sampling")?,
        };
        let lens = LensSettings {
            lens_radius: reader.parse("lens_radius", FLOAT)?,
            focal_distance: reader.parse("focal_distance", FLOAT)?,
        };

        let output = if reader.flag("write_to_file")? {
            OutputMode::WriteToFile
        } else {
            OutputMode::Realtime
        };
        let custom_flag = match version {
            FormatVersion::Extended => Some(reader.flag("render_custom_region")?),
            FormatVersion::Legacy => None,
        };
        let window = WindowSize {
            width: reader.parse("window_width", UNSIGNED)?,
            height: reader.parse("window_height", UNSIGNED)?,
        };

        let x: i32 = reader.parse("region_x", INTEGER)?;
        let x_line = reader.line;
        let y = reader.parse("region_y", UNSIGNED)?;
        let dx = reader.parse("region_dx", UNSIGNED)?;
        let dy = reader.parse("region_dy", UNSIGNED)?;

        let region = if custom_flag.unwrap_or(x >= 0) {
            let x = u32::try_from(x).map_err(|_| AppError::MalformedField {
                field: "region_x",
                expected: "non-negative integer for a custom region",
                raw: x.to_string(),
                line: x_line,
            })?;
            RegionMode::CustomRegion(RegionOfInterest::new(x, y, dx, dy))
        } else {
            RegionMode::FullWindow
        };

        let output_file_name = reader.text("output_file_name")?;
        let cam_settings = reader.text("cam_settings")?;
        let scene_file_path = reader.text("scene_file_path")?;
        reader.finish()?;

        Ok(SettingsSnapshot {
            render,
            lens,
            window,
            region,
            output,
            output_file_name,
            cam_settings,
            scene_file_path,
        })
    }

    /// Writes `settings` to `path`, replacing any existing file.
    ///
    /// The data is synced to disk before returning so the renderer sees a
    /// complete file.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidText`] if a text field contains a line
    /// break (nothing is written), [`AppError::OpenFile`] if the file cannot
    /// be created, or [`AppError::Io`] if writing fails.
    pub fn write_to(&self, settings: &SettingsSnapshot, path: impl AsRef<Path>) -> Result<()> {
        check_text_fields(settings)?;
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|e| AppError::open_file(path, e))?;
        file.write_all(self.encode(settings).as_bytes())?;
        file.flush()?;
        file.sync_all()?;

        info!(path = %path.display(), version = ?self.version, "Wrote settings snapshot");
        Ok(())
    }

    /// Reads and decodes the extended-format settings file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::OpenFile`] if the file cannot be read, or the
    /// first field error reported by [`decode`](Self::decode).
    pub fn read_from(path: impl AsRef<Path>) -> Result<SettingsSnapshot> {
        Self::new().read_with(path)
    }

    /// Reads and decodes the file at `path` in this codec's format version.
    pub fn read_with(&self, path: impl AsRef<Path>) -> Result<SettingsSnapshot> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| AppError::open_file(path, e))?;
        let settings = self.decode_with(&text)?;

        info!(path = %path.display(), version = ?self.version, "Read settings snapshot");
        Ok(settings)
    }
}

/// Rejects text fields that would split into several lines.
fn check_text_fields(settings: &SettingsSnapshot) -> Result<()> {
    for (field, value) in [
        ("output_file_name", &settings.output_file_name),
        ("cam_settings", &settings.cam_settings),
        ("scene_file_path", &settings.scene_file_path),
    ] {
        if value.contains(['\n', '\r']) {
            return Err(AppError::InvalidText { field });
        }
    }
    Ok(())
}

const UNSIGNED: &str = "unsigned integer";
const INTEGER: &str = "integer";
const FLOAT: &str = "decimal number";

fn push_line(out: &mut String, value: impl Display) {
    out.push_str(&value.to_string());
    out.push('\n');
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

/// Hands out lines one field at a time, tracking 1-based line numbers.
struct FieldReader<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> FieldReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    fn raw(&mut self, field: &'static str) -> Result<&'a str> {
        self.line += 1;
        self.lines.next().ok_or(AppError::MissingField {
            field,
            line: self.line,
        })
    }

    fn text(&mut self, field: &'static str) -> Result<String> {
        self.raw(field).map(str::to_string)
    }

    fn parse<T: FromStr>(&mut self, field: &'static str, expected: &'static str) -> Result<T> {
        let raw = self.raw(field)?;
        raw.trim().parse().map_err(|_| AppError::MalformedField {
            field,
            expected,
            raw: raw.to_string(),
            line: self.line,
        })
    }

    fn flag(&mut self, field: &'static str) -> Result<bool> {
        let raw = self.raw(field)?;
        match raw.trim() {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(AppError::MalformedField {
                field,
                expected: "0 or 1",
                raw: raw.to_string(),
                line: self.line,
            }),
        }
    }

    fn finish(mut self) -> Result<()> {
        for extra in self.lines.by_ref() {
            self.line += 1;
            if !extra.trim().is_empty() {
                return Err(AppError::TrailingData { line: self.line });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> SettingsSnapshot {
        SettingsSnapshot {
            render: RenderSettings {
                aa_samples_per_pixel: 64,
                max_ray_depth: 5,
                samples_per_area_light: 4,
                ns_diff: 1,
                ns_glossy: 2,
                ns_refraction: 3,
                num_threads: 8,
                adaptive_max_tolerance: 0.05,
                adaptive_samples_per_patch: 32,
                use_hemisphere_sampling: true,
            },
            lens: LensSettings {
                lens_radius: 0.0625,
                focal_distance: 4.7,
            },
            window: WindowSize {
                width: 800,
                height: 600,
            },
            region: RegionMode::CustomRegion(RegionOfInterest::new(100, 400, 200, 150)),
            output: OutputMode::WriteToFile,
            output_file_name: "renders/spheres out.png".to_string(),
            cam_settings: "cam 0 0 5 look 0 0 0 fov 45".to_string(),
            scene_file_path: "dae/sky/CBspheres_lambertian.dae".to_string(),
        }
    }

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("render-launcher-codec-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_encode_field_order() {
        let text = SettingsCodec::new().encode(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "64", "5", "4", "1", "2", "3", "8", "0.05", "32", "1", "0.0625", "4.7", "1", "1",
                "800", "600", "100", "400", "200", "150",
                "renders/spheres out.png",
                "cam 0 0 5 look 0 0 0 fov 45",
                "dae/sky/CBspheres_lambertian.dae",
            ]
        );
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_full_window_writes_sentinel_region() {
        let mut settings = sample();
        settings.select_full_window();
        let text = SettingsCodec::new().encode(&settings);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(&lines[13..20], &["0", "800", "600", "-1", "0", "800", "600"]);
    }

    #[test]
    fn test_round_trip() {
        let codec = SettingsCodec::new();
        let mut settings = sample();
        assert_eq!(SettingsCodec::decode(&codec.encode(&settings)).unwrap(), settings);

        settings.select_full_window();
        settings.output = OutputMode::Realtime;
        settings.render.adaptive_max_tolerance = 1.0 / 3.0;
        settings.lens.focal_distance = 0.1 + 0.2;
        assert_eq!(SettingsCodec::decode(&codec.encode(&settings)).unwrap(), settings);
    }

    #[test]
    fn test_round_trip_with_empty_text_fields() {
        let mut settings = SettingsSnapshot::default();
        settings.output_file_name.clear();
        settings.scene_file_path.clear();
        let text = SettingsCodec::new().encode(&settings);
        assert_eq!(text.lines().count(), EXTENDED_LINE_COUNT);
        assert_eq!(SettingsCodec::decode(&text).unwrap(), settings);
    }

    #[test]
    fn test_legacy_codec_reads_legacy_files() {
        let legacy = SettingsCodec::with_version(FormatVersion::Legacy);
        let settings = sample();
        let text = legacy.encode(&settings);
        assert_eq!(text.lines().count(), FormatVersion::Legacy.line_count());
        assert_eq!(legacy.decode_with(&text).unwrap(), settings);

        let mut full = sample();
        full.select_full_window();
        let decoded = legacy.decode_with(&legacy.encode(&full)).unwrap();
        assert_eq!(decoded.region, RegionMode::FullWindow);
    }

    #[test]
    fn test_legacy_file_with_trailing_blank_line() {
        let legacy = SettingsCodec::with_version(FormatVersion::Legacy);
        let mut text = legacy.encode(&sample());
        text.push('\n');
        assert_eq!(legacy.decode_with(&text).unwrap(), sample());
    }

    #[test]
    fn test_legacy_file_is_not_accepted_as_extended() {
        let text = SettingsCodec::with_version(FormatVersion::Legacy).encode(&sample());
        match SettingsCodec::decode(&text) {
            Err(AppError::MalformedField { field, line, .. }) => {
                assert_eq!(field, "render_custom_region");
                assert_eq!(line, 14);
            }
            other => panic!("expected malformed field, got {:?}", other),
        }
    }

    #[test]
    fn test_extended_file_missing_last_line_fails() {
        let text = SettingsCodec::new().encode(&sample());
        let cut: String = text
            .lines()
            .take(LEGACY_LINE_COUNT)
            .map(|l| format!("{}\n", l))
            .collect();
        match SettingsCodec::decode(&cut) {
            Err(AppError::MissingField { field, line }) => {
                assert_eq!(field, "scene_file_path");
                assert_eq!(line, 23);
            }
            other => panic!("expected missing field, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_file_reports_first_missing_field() {
        let text = SettingsCodec::new().encode(&sample());
        let truncated: String = text.lines().take(10).map(|l| format!("{}\n", l)).collect();
        match SettingsCodec::decode(&truncated) {
            Err(AppError::MissingField { field, line }) => {
                assert_eq!(field, "lens_radius");
                assert_eq!(line, 11);
            }
            other => panic!("expected missing field, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_number_is_reported() {
        let text = SettingsCodec::new().encode(&sample()).replacen("\n5\n", "\nfive\n", 1);
        match SettingsCodec::decode(&text) {
            Err(AppError::MalformedField { field, raw, line, .. }) => {
                assert_eq!(field, "max_ray_depth");
                assert_eq!(raw, "five");
                assert_eq!(line, 2);
            }
            other => panic!("expected malformed field, got {:?}", other),
        }
    }

    #[test]
    fn test_bool_must_be_zero_or_one() {
        let mut lines: Vec<String> = SettingsCodec::new().encode(&sample()).lines().map(String::from).collect();
        lines[9] = "true".to_string();
        let err = SettingsCodec::decode(&lines.join("\n")).unwrap_err();
        assert!(matches!(err, AppError::MalformedField { field: "use_hemisphere_sampling", .. }));
    }

    #[test]
    fn test_custom_region_with_sentinel_is_rejected() {
        let mut lines: Vec<String> = SettingsCodec::new().encode(&sample()).lines().map(String::from).collect();
        lines[16] = "-1".to_string();
        let err = SettingsCodec::decode(&lines.join("\n")).unwrap_err();
        assert!(matches!(err, AppError::MalformedField { field: "region_x", line: 17, .. }));
    }

    #[test]
    fn test_trailing_data_is_rejected() {
        let mut text = SettingsCodec::new().encode(&sample());
        text.push_str("\n\n");
        assert!(SettingsCodec::decode(&text).is_ok());

        text.push_str("extra\n");
        assert!(matches!(
            SettingsCodec::decode(&text),
            Err(AppError::TrailingData { line: 26 })
        ));
    }

    #[test]
    fn test_numeric_fields_tolerate_surrounding_whitespace() {
        let text = SettingsCodec::new().encode(&sample()).replacen("64\n", " 64 \r\n", 1);
        assert_eq!(SettingsCodec::decode(&text).unwrap().render.aa_samples_per_pixel, 64);
    }

    #[test]
    fn test_write_then_read_file() {
        let path = scratch_path("settings.txt");
        let settings = sample();
        SettingsCodec::new().write_to(&settings, &path).unwrap();
        assert_eq!(SettingsCodec::read_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_write_rejects_line_breaks_in_text_fields() {
        let path = scratch_path("line-break.txt");
        let _ = fs::remove_file(&path);

        let mut settings = sample();
        settings.scene_file_path = "a.dae\r".to_string();
        let err = SettingsCodec::new().write_to(&settings, &path).unwrap_err();
        assert!(matches!(err, AppError::InvalidText { field: "scene_file_path" }));
        assert!(!path.exists());

        let mut settings = sample();
        settings.cam_settings = "cam\nfov 45".to_string();
        let err = SettingsCodec::new().write_to(&settings, &path).unwrap_err();
        assert!(matches!(err, AppError::InvalidText { field: "cam_settings" }));
    }

    #[test]
    fn test_legacy_read_with_from_file() {
        let path = scratch_path("legacy.txt");
        let legacy = SettingsCodec::with_version(FormatVersion::Legacy);
        legacy.write_to(&sample(), &path).unwrap();
        assert_eq!(legacy.read_with(&path).unwrap(), sample());
        assert!(SettingsCodec::read_from(&path).is_err());
    }

    #[test]
    fn test_write_to_unopenable_path_fails() {
        let path = scratch_path("missing-dir").join("nested").join("settings.txt");
        let err = SettingsCodec::new().write_to(&sample(), &path).unwrap_err();
        assert!(matches!(err, AppError::OpenFile { .. }));
    }

    #[test]
    fn test_read_missing_file_fails() {
        let err = SettingsCodec::read_from(scratch_path("does-not-exist.txt")).unwrap_err();
        assert!(matches!(err, AppError::OpenFile { .. }));
    }
}
