use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use wave_gradient::{
    expand, extract_with, format_palette, parse_palette, BandSampling, BorderSpec, ExtractMethod,
    GrainSpec, Jitter, Orientation, Renderer, Rgb, Warp, WaveParameters, WaveProfile,
};

use bandwave::api;
use bandwave::assets::{AssetCategory, AssetLoader};
use bandwave::rendering::encode_png;
use bandwave::server;

#[derive(Parser)]
#[command(name = "bandwave")]
#[command(about = "Wave-distorted band gradients from color palettes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Bands displaced by a sine wave
    Wave,
    /// Straight bands
    Chunky,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a gradient PNG from a palette file
    Gradient(GradientArgs),
    /// Extract a palette from an image
    Extract {
        /// Source image (PNG, JPEG, GIF, WebP or BMP)
        #[arg(short, long)]
        image: PathBuf,

        /// Number of colors to extract
        #[arg(short, long)]
        num_colors: usize,

        /// Axis to read along: vertical reads top to bottom
        #[arg(long, default_value = "vertical")]
        orientation: Orientation,

        /// sample, band-average or quantize
        #[arg(long, default_value = "sample")]
        method: ExtractMethod,

        /// Palette file to write (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Expand a palette to more colors by interpolation
    Expand {
        /// Palette file (one #RRGGBB per line)
        #[arg(short, long)]
        palette_file: PathBuf,

        /// Target number of colors
        #[arg(short, long)]
        num_colors: usize,

        /// Palette file to write (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Start the HTTP server
    Serve,
    /// List available palettes
    Palettes,
    /// Extract embedded assets to filesystem for customization
    Init {
        /// Extract built-in palettes
        #[arg(long)]
        palettes: bool,

        /// Extract config.yaml
        #[arg(long)]
        config: bool,

        /// Extract all assets
        #[arg(long)]
        all: bool,

        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

#[derive(clap::Args)]
struct GradientArgs {
    /// wave or chunky (straight bands)
    #[arg(long, value_enum, default_value_t = Mode::Wave)]
    mode: Mode,

    /// Palette file (one #RRGGBB per line)
    #[arg(short, long)]
    palette_file: PathBuf,

    /// Number of bands
    #[arg(short, long, default_value_t = 50)]
    steps: usize,

    #[arg(long, default_value_t = 2000)]
    width: u32,

    #[arg(long, default_value_t = 3000)]
    height: u32,

    /// Border width in pixels
    #[arg(long, default_value_t = 0)]
    border: u32,

    #[arg(long, default_value = "#FFFFFF")]
    border_color: Rgb,

    /// Peak wave offset as a fraction of the band size
    #[arg(long, default_value_t = 0.08)]
    wave_amplitude: f64,

    /// Wave cycles across the image
    #[arg(long, default_value_t = 2.5)]
    wave_frequency: f64,

    /// Amplitude envelope (uniform, bell, valley, fade-out-left, ...)
    #[arg(long, default_value = "uniform")]
    wave_profile: WaveProfile,

    /// Mirror the wave
    #[arg(long)]
    flip: bool,

    /// Organic displacement as a fraction of the band size
    #[arg(long)]
    jitter: Option<f64>,

    /// Gaussian grain intensity (0.0 - 1.0)
    #[arg(long, conflicts_with_all = ["grain_centered", "grain_gradient", "white_grain"])]
    grain: Option<f64>,

    /// Grain block size in pixels
    #[arg(long, default_value_t = 1)]
    grain_scale: u32,

    /// Grain strongest in the center: intensity and block size
    #[arg(
        long,
        num_args = 2,
        value_names = ["INTENSITY", "SIZE"],
        conflicts_with_all = ["grain_gradient", "white_grain"]
    )]
    grain_centered: Option<Vec<f64>>,

    /// Grain ramping from MIN to MAX along --grain-direction
    #[arg(
        long,
        num_args = 2,
        value_names = ["MAX", "MIN"],
        conflicts_with = "white_grain"
    )]
    grain_gradient: Option<Vec<f64>>,

    /// vertical ramps top to bottom, horizontal left to right
    #[arg(long, default_value = "vertical")]
    grain_direction: Orientation,

    /// Sparse white speckles instead of Gaussian grain
    #[arg(long)]
    white_grain: bool,

    /// Same grain on all channels
    #[arg(long)]
    grain_mono: bool,

    /// Rolling distortion: amplitude and frequency
    #[arg(
        long,
        num_args = 2,
        value_names = ["AMPLITUDE", "FREQUENCY"],
        conflicts_with_all = ["wave_pooling", "wave_rippling", "wave_swirling"]
    )]
    wave_rolling: Option<Vec<f64>>,

    /// Pooling distortion: strength and vertical center (0.0 - 1.0)
    #[arg(
        long,
        num_args = 2,
        value_names = ["STRENGTH", "CENTER_Y"],
        conflicts_with_all = ["wave_rippling", "wave_swirling"]
    )]
    wave_pooling: Option<Vec<f64>>,

    /// Rippling distortion: amplitude and frequency
    #[arg(
        long,
        num_args = 2,
        value_names = ["AMPLITUDE", "FREQUENCY"],
        conflicts_with = "wave_swirling"
    )]
    wave_rippling: Option<Vec<f64>>,

    /// Swirling distortion: strength and center (0.0 - 1.0)
    #[arg(long, num_args = 3, value_names = ["STRENGTH", "CENTER_X", "CENTER_Y"])]
    wave_swirling: Option<Vec<f64>>,

    /// Seed for grain and jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Band color sampling: nearest or average
    #[arg(long, default_value = "nearest")]
    sampling: BandSampling,

    /// horizontal or vertical bands
    #[arg(long, default_value = "horizontal")]
    orientation: Orientation,

    /// Re-compress the PNG with oxipng
    #[arg(long)]
    optimize: bool,

    /// Output PNG file path
    #[arg(short, long)]
    output: PathBuf,
}

impl GradientArgs {
    fn wave(&self) -> WaveParameters {
        if self.mode == Mode::Chunky {
            return WaveParameters::flat(self.orientation);
        }
        let wave = WaveParameters::new(self.wave_amplitude, self.wave_frequency, self.orientation)
            .profile(self.wave_profile)
            .flip(self.flip);
        match self.jitter {
            Some(amount) => wave.jitter(Jitter::new(amount, self.seed.unwrap_or_default())),
            None => wave,
        }
    }

    fn grain(&self) -> Option<GrainSpec> {
        let grain = if let Some(centered) = &self.grain_centered {
            let intensity = centered.first().copied().unwrap_or_default();
            let size = centered.get(1).copied().unwrap_or(1.0);
            GrainSpec::centered(intensity, intensity / 6.0).scale(size.round().max(1.0) as u32)
        } else if let Some(ramp) = &self.grain_gradient {
            let (max, min) = pair(ramp);
            GrainSpec::linear(max, min, self.grain_direction).scale(self.grain_scale)
        } else if self.white_grain {
            GrainSpec::speckle(0.01, 0.2, 0.3)
        } else {
            GrainSpec::new(self.grain?).scale(self.grain_scale)
        };
        let grain = grain.monochrome(self.grain_mono);
        Some(match self.seed {
            Some(seed) => grain.seed(seed),
            None => grain,
        })
    }

    fn warp(&self) -> Option<Warp> {
        if let Some(v) = &self.wave_rolling {
            let (amplitude, frequency) = pair(v);
            Some(Warp::Rolling {
                amplitude,
                frequency,
            })
        } else if let Some(v) = &self.wave_pooling {
            let (strength, center_y) = pair(v);
            Some(Warp::Pooling { strength, center_y })
        } else if let Some(v) = &self.wave_rippling {
            let (amplitude, frequency) = pair(v);
            Some(Warp::Rippling {
                amplitude,
                frequency,
            })
        } else {
            self.wave_swirling.as_ref().map(|v| Warp::Swirling {
                strength: v.first().copied().unwrap_or_default(),
                center_x: v.get(1).copied().unwrap_or(0.5),
                center_y: v.get(2).copied().unwrap_or(0.5),
            })
        }
    }
}

/// First two values of a fixed-arity float option.
fn pair(values: &[f64]) -> (f64, f64) {
    (
        values.first().copied().unwrap_or_default(),
        values.get(1).copied().unwrap_or_default(),
    )
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bandwave API",
        description = "Wave-distorted band gradients from color palettes",
        version = "0.3.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_generate,
        api::handle_generate_random,
        api::handle_gallery,
        api::handle_generated_image,
        api::handle_palettes,
        api::handle_wave_types,
    ),
    components(schemas(
        api::GenerateRequest,
        api::GenerateResponse,
        api::WaveTypesResponse,
        api::OptionInfo,
        bandwave::services::GenerationParameters,
        bandwave::services::GalleryItem,
        bandwave::services::PaletteInfo,
        bandwave::models::GrainEffect,
    )),
    tags(
        (name = "Generate", description = "Gradient generation"),
        (name = "Gallery", description = "Generated images"),
        (name = "Palettes", description = "Palettes and wave types")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Gradient(args)) => run_gradient_command(&args),
        Some(Commands::Extract {
            image,
            num_colors,
            orientation,
            method,
            output,
        }) => run_extract_command(&image, num_colors, orientation, method, output.as_deref()),
        Some(Commands::Expand {
            palette_file,
            num_colors,
            output,
        }) => run_expand_command(&palette_file, num_colors, output.as_deref()),
        Some(Commands::Palettes) => run_palettes_command(),
        Some(Commands::Init {
            palettes,
            config,
            all,
            force,
            list,
        }) => run_init_command(palettes, config, all, force, list),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bandwave=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn read_palette_file(path: &Path) -> anyhow::Result<wave_gradient::Palette> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read palette file {}", path.display()))?;
    parse_palette(&content).with_context(|| format!("Invalid palette file {}", path.display()))
}

fn write_palette(palette: &wave_gradient::Palette, output: Option<&Path>) -> anyhow::Result<()> {
    let text = format_palette(palette);
    match output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {} colors to {}", palette.len(), path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

/// Render a gradient directly to a PNG file (no server needed)
fn run_gradient_command(args: &GradientArgs) -> anyhow::Result<()> {
    init_cli_tracing();

    let palette = read_palette_file(&args.palette_file)?;
    tracing::debug!(colors = palette.len(), steps = args.steps, "Loaded palette");

    let mut renderer = Renderer::new(palette)
        .size(args.width, args.height)
        .steps(args.steps)
        .wave(args.wave())
        .sampling(args.sampling);
    if args.border > 0 {
        renderer = renderer.border(BorderSpec::new(args.border, args.border_color));
    }
    if let Some(grain) = args.grain() {
        renderer = renderer.grain(grain);
    }
    if let Some(warp) = args.warp() {
        tracing::debug!(%warp, "Applying warp");
        renderer = renderer.warp(warp);
    }

    let canvas = renderer.render().context("Render failed")?;
    let png_bytes = encode_png(&canvas, args.optimize)?;

    std::fs::write(&args.output, &png_bytes)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!(
        "Rendered {} ({}x{}, {} bytes)",
        args.output.display(),
        canvas.width(),
        canvas.height(),
        png_bytes.len()
    );

    Ok(())
}

/// Extract a palette from an image file
fn run_extract_command(
    image: &Path,
    num_colors: usize,
    orientation: Orientation,
    method: ExtractMethod,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let bytes =
        std::fs::read(image).with_context(|| format!("Failed to read {}", image.display()))?;
    let decoded = wave_gradient::decode_image(&bytes)
        .with_context(|| format!("Failed to decode {}", image.display()))?;
    let palette = extract_with(&decoded, num_colors, orientation, method)
        .context("Palette extraction failed")?;

    tracing::debug!(
        method = method.as_str(),
        orientation = %orientation,
        colors = palette.len(),
        "Extracted palette"
    );
    write_palette(&palette, output)
}

/// Expand a palette file by interpolation
fn run_expand_command(
    palette_file: &Path,
    num_colors: usize,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let palette = read_palette_file(palette_file)?;
    let expanded = expand(&palette, num_colors).context("Palette expansion failed")?;
    write_palette(&expanded, output)
}

/// List available palettes with their sizes
fn run_palettes_command() -> anyhow::Result<()> {
    init_cli_tracing();

    let loader = AssetLoader::from_env();
    let names = loader.list_palettes();
    if names.is_empty() {
        println!("No palettes found.");
        return Ok(());
    }

    for name in names {
        match loader
            .read_palette_string(&name)
            .map_err(anyhow::Error::from)
            .and_then(|content| parse_palette(&content).map_err(anyhow::Error::from))
        {
            Ok(palette) => println!("  {name:<28} {:>3} colors", palette.len()),
            Err(e) => println!("  {name:<28} (unreadable: {e})"),
        }
    }
    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(
    palettes: bool,
    config: bool,
    all: bool,
    force: bool,
    list: bool,
) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        println!("Palettes:");
        for f in AssetLoader::list_embedded(AssetCategory::Palettes) {
            println!("  {f}");
        }
        println!("\nConfig:");
        for f in AssetLoader::list_embedded(AssetCategory::Config) {
            println!("  {f}");
        }
        return Ok(());
    }

    let mut categories = Vec::new();
    if all || palettes {
        categories.push(AssetCategory::Palettes);
    }
    if all || config {
        categories.push(AssetCategory::Config);
    }

    if categories.is_empty() {
        eprintln!("No categories specified. Use --all, --palettes, or --config");
        eprintln!("\nRun 'bandwave init --list' to see embedded assets.");
        std::process::exit(1);
    }

    let loader = AssetLoader::from_env();
    let report = loader.init(&categories, force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let palettes_dir = std::env::var("PALETTES_DIR").ok();
    let gallery_dir = std::env::var("GALLERY_DIR").ok();

    println!("Bandwave v{VERSION}");
    println!("Wave-distorted band gradients from color palettes\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR    = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:8080 (default)")
    );
    println!(
        "  CONFIG_FILE  = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  PALETTES_DIR = {}",
        palettes_dir.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  GALLERY_DIR  = {}",
        gallery_dir.as_deref().unwrap_or("./generated (default)")
    );

    println!("\nAsset Sources:");

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("  Config:   {config_source}");

    let loader = AssetLoader::new(palettes_dir.clone().map(PathBuf::from), None);
    let palette_count = loader.list_palettes().len();
    let embedded_count = AssetLoader::list_embedded(AssetCategory::Palettes).len();
    match palettes_dir {
        Some(ref path) if Path::new(path).exists() => println!(
            "  Palettes: {path} ({palette_count} available, {embedded_count} embedded)"
        ),
        _ => println!("  Palettes: embedded ({embedded_count} available)"),
    }

    println!("\nCommands:");
    println!("  bandwave gradient  Render a gradient PNG from a palette file");
    println!("  bandwave extract   Extract a palette from an image");
    println!("  bandwave expand    Expand a palette by interpolation");
    println!("  bandwave serve     Start the HTTP server");
    println!("  bandwave palettes  List available palettes");
    println!("  bandwave init      Extract embedded assets");
    println!("\nRun 'bandwave --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bandwave=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let gallery_dir = std::env::var("GALLERY_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./generated"));

    let asset_loader = Arc::new(AssetLoader::from_env());

    tracing::info!(
        palettes = ?asset_loader.palettes_dir().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        config = ?asset_loader.config_file().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        gallery = %gallery_dir.display(),
        "Asset sources configured"
    );

    // Seed if configured paths are empty
    match asset_loader.seed_if_configured() {
        Ok(report) if !report.is_empty() => {
            tracing::info!(
                palettes = report.palettes_seeded.len(),
                config = report.config_seeded,
                "Seeded empty directories with embedded assets"
            );
        }
        Err(e) => {
            tracing::warn!(%e, "Failed to seed assets");
        }
        _ => {}
    }

    let state = server::create_app_state(asset_loader, gallery_dir.clone())?;
    tracing::info!(
        width = state.config.render.width,
        height = state.config.render.height,
        palettes = state.palettes.names().len(),
        "Render defaults loaded"
    );

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "Bandwave server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
