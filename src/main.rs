use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint::{
    render::canvas::ImageFormat,
    scene::{
        World,
        io::yaml::{self, CameraOverrides, SceneConfig},
    },
};
use log::LevelFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Whitted ray tracer
/// Renders scenes of spheres and planes described in yaml files
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// The scene file to render
    scene_file: PathBuf,

    /// The format of the output image
    #[clap(short = 'f', long, default_value = "png")]
    image_format: ImageFormat,

    /// The output path of the rendered image.
    /// By default it's `./<scene_filename>.<image_format>`
    #[clap(short, long)]
    output_path: Option<PathBuf>,

    #[clap(long, help = format!("Width (in pixels) of the output image.
Overrides the one in the scene file. If not specified anywhere, defaults to {}", SceneConfig::DEFAULT_WIDTH))]
    width: Option<usize>,

    #[clap(long, help = format!("Height (in pixels) of the output image.
Overrides the one in the scene file. If not specified anywhere, defaults to {}", SceneConfig::DEFAULT_HEIGHT))]
    height: Option<usize>,

    /// Field of view of the camera in radians.
    /// Overrides the one in the scene file
    /// If not specified anywhere, defaults to π/3
    #[clap(long)]
    fov: Option<f64>,

    #[clap(short, long, help = format!("Maximum number of times a ray can bounce off reflective or transparent surfaces.
Overrides the one in the scene file. If not specified anywhere, defaults to {}", World::DEFAULT_MAX_BOUNCES))]
    max_bounces: Option<usize>,

    /// Logging level. When not given, `RUST_LOG` is used, falling back to `info`
    #[clap(long)]
    log_level: Option<LogLevel>,

    /// Show a progress bar while rendering
    #[clap(long)]
    progress: bool,
}

fn init_logger(level: Option<LogLevel>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level.into());
    }
    builder.init();
}

fn main() -> Result<(), String> {
    let args = Args::parse();
    init_logger(args.log_level);

    if args.width == Some(0) || args.height == Some(0) {
        return Err("Image dimensions must be positive".to_string());
    }

    let scene_source = std::fs::read_to_string(&args.scene_file)
        .map_err(|e| format!("Failed to read scene file: {}", e))?;
    let config =
        yaml::parse_str(&scene_source).map_err(|e| format!("Failed to parse scene: {}", e))?;

    let camera = config.camera(&CameraOverrides {
        width: args.width,
        height: args.height,
        field_of_view: args.fov,
        max_bounces: args.max_bounces,
    });

    let canvas = if args.progress {
        camera.render_with_progress(&config.world)
    } else {
        camera.render(&config.world)
    };

    let output_path = match args.output_path {
        Some(path) => path,
        None => {
            // reading the scene would have failed if it was not a file
            let mut path = PathBuf::from(
                args.scene_file
                    .file_name()
                    .ok_or_else(|| "Scene path has no file name".to_string())?,
            );
            path.set_extension(args.image_format.to_string());
            path
        }
    };
    canvas
        .save_to_file(&output_path, args.image_format)
        .map_err(|e| format!("Failed to save image: {}", e))?;
    log::info!("image saved to {:?}", output_path);
    Ok(())
}
