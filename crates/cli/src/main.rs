use anyhow::{Context, Result};
use clap::Parser;
use render_launcher_core::{
    config::Config, init, FormatVersion, LaunchOutcome, Launcher, OutputMode, RegionMode,
    SettingsSnapshot,
};
use std::path::PathBuf;
use std::process::{Command, ExitCode};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file shared with the renderer (overrides LAUNCHER_SETTINGS_PATH)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// On-screen height of the region canvas in pixels
    #[arg(long)]
    display_height: Option<f32>,

    /// Start from defaults instead of the existing settings file
    #[arg(long, default_value_t = false)]
    fresh: bool,

    /// Read the existing settings file in the 22-line legacy format
    #[arg(long, conflicts_with = "fresh")]
    legacy_input: bool,

    /// Print the current settings and exit without opening the window
    #[arg(long)]
    print: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Renderer to run after launching, e.g. `--renderer pathtracer -f settings.txt`.
    /// Everything after the program name is passed to it, so give this last.
    #[arg(
        long,
        num_args = 1..,
        allow_hyphen_values = true,
        value_name = "PROGRAM"
    )]
    renderer: Vec<String>,
}

fn main() -> Result<ExitCode> {
    // Setup
    init();
    let args = Args::parse();
    init_logging(args.verbose);

    // Load config and apply CLI overrides
    let mut builder = Config::load()
        .context("Failed to load configuration")?
        .to_builder();
    if let Some(path) = &args.settings {
        builder = builder.with_settings_path(path);
    }
    if let Some(height) = args.display_height {
        builder = builder.with_display_height(height);
    }
    let config = builder.build().context("Invalid configuration")?;
    debug!(?config, "Configuration loaded");

    let mut launcher = Launcher::with_config(config);
    if args.legacy_input {
        launcher = launcher.with_input_version(FormatVersion::Legacy);
    }
    let snapshot = if args.fresh {
        SettingsSnapshot::default()
    } else {
        launcher.load_or_default().with_context(|| {
            format!(
                "Failed to read {}. Use --fresh to start from defaults",
                launcher.config().settings_path.display()
            )
        })?
    };

    // Handle --print
    if args.print {
        print_snapshot(&snapshot);
        return Ok(ExitCode::SUCCESS);
    }

    match launcher.run_interactive(snapshot)? {
        LaunchOutcome::Launched { path, .. } => {
            if args.renderer.is_empty() {
                println!("{}", path.display());
                return Ok(ExitCode::SUCCESS);
            }
            run_renderer(&args.renderer)
        }
        LaunchOutcome::Cancelled => {
            println!("Launch cancelled");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Hands control to the renderer and forwards its exit status.
fn run_renderer(command: &[String]) -> Result<ExitCode> {
    let (program, renderer_args) = command
        .split_first()
        .context("Renderer command is empty")?;

    info!(%program, "Starting renderer");
    let status = Command::new(program)
        .args(renderer_args)
        .status()
        .with_context(|| format!("Failed to start renderer `{}`", program))?;

    let code = status.code().unwrap_or(1);
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

/// Helper to print a snapshot for inspection
fn print_snapshot(snapshot: &SettingsSnapshot) {
    let render = &snapshot.render;
    println!("Samples per pixel:      {}", render.aa_samples_per_pixel);
    println!("Max ray depth:          {}", render.max_ray_depth);
    println!("Samples per area light: {}", render.samples_per_area_light);
    println!(
        "Diffuse/glossy/refr:    {}/{}/{}",
        render.ns_diff, render.ns_glossy, render.ns_refraction
    );
    println!("Threads:                {}", render.num_threads);
    println!(
        "Adaptive sampling:      tolerance {}, {} samples per patch",
        render.adaptive_max_tolerance, render.adaptive_samples_per_patch
    );
    println!("Hemisphere sampling:    {}", render.use_hemisphere_sampling);
    println!(
        "Lens:                   radius {}, focal distance {}",
        snapshot.lens.lens_radius, snapshot.lens.focal_distance
    );
    println!(
        "Window:                 {}x{}",
        snapshot.window.width, snapshot.window.height
    );
    match snapshot.region {
        RegionMode::FullWindow => println!("Region:                 full window"),
        RegionMode::CustomRegion(r) => println!(
            "Region:                 x {}, y {}, dx {}, dy {}",
            r.x, r.y, r.dx, r.dy
        ),
    }
    match snapshot.output {
        OutputMode::Realtime => println!("Output:                 realtime"),
        OutputMode::WriteToFile => println!("Output:                 {}", snapshot.output_file_name),
    }
    println!("Camera:                 {}", snapshot.cam_settings);
    println!("Scene:                  {}", snapshot.scene_file_path);
}
