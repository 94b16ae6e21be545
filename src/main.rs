use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use titlecard::models::{GenerationConfig, TitleSource};
use titlecard::rendering::{Encoder, FontResolver, ImageFormat, TitleDigest};
use titlecard::services::{DirectoryStorage, InMemoryStorage, TitleImagePipeline};

#[derive(Parser)]
#[command(name = "titlecard")]
#[command(about = "Titlecard - generated cover images for articles that have none")]
struct Cli {
    /// YAML configuration file (falls back to $CONFIG_FILE)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one title image to a file
    Render {
        /// Title text to draw
        #[arg(short, long)]
        title: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Image format: "png" or "webp" (default: from config)
        #[arg(short, long)]
        format: Option<ImageFormat>,

        /// WEBP quality 1-100 (default: from config)
        #[arg(short, long)]
        quality: Option<u8>,
    },
    /// Print an inline WEBP data URI for a title
    Preview {
        /// Title text to draw
        #[arg(short, long)]
        title: String,
    },
    /// Generate the cover and heading images for an article
    Article {
        /// Article title
        #[arg(short, long)]
        title: String,

        /// HTML file with the article body
        #[arg(long)]
        content: Option<PathBuf>,

        /// Directory the images are written to
        #[arg(long)]
        out_dir: PathBuf,

        /// URL prefix under which `out_dir` is served
        #[arg(long)]
        public_url: Option<String>,

        /// Generate heading images even if the config disables them
        #[arg(long)]
        draw_sub: bool,
    },
    /// List system font candidates and the font that would be used
    Fonts,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));

    match cli.command {
        None => {
            run_status_command(config_path.as_deref());
            Ok(())
        }
        Some(command) => {
            init_logging();
            let config = match &config_path {
                Some(path) => GenerationConfig::load(path),
                None => GenerationConfig::default(),
            };

            match command {
                Commands::Render {
                    title,
                    output,
                    format,
                    quality,
                } => run_render_command(config, &title, &output, format, quality),
                Commands::Preview { title } => run_preview_command(config, &title),
                Commands::Article {
                    title,
                    content,
                    out_dir,
                    public_url,
                    draw_sub,
                } => run_article_command(
                    config,
                    title,
                    content.as_deref(),
                    out_dir,
                    public_url,
                    draw_sub,
                ),
                Commands::Fonts => run_fonts_command(&config),
            }
        }
    }
}

/// Logs go to stderr so stdout stays clean for data URIs and JSON
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "titlecard=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run_render_command(
    mut config: GenerationConfig,
    title: &str,
    output: &Path,
    format: Option<ImageFormat>,
    quality: Option<u8>,
) -> anyhow::Result<()> {
    // Explicit flag, then the output extension, then config
    let from_extension = output
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse::<ImageFormat>().ok());
    config.format = format.or(from_extension).unwrap_or(config.format);
    if let Some(quality) = quality {
        config.quality = quality;
    }

    let pipeline = TitleImagePipeline::new(config, Arc::new(InMemoryStorage::new()))?;
    if pipeline.font().is_none() {
        tracing::warn!("No font available, rendering background only");
    }

    let image = pipeline.render_image(title)?;
    let config = pipeline.config();
    let encoded = Encoder::new(config.optimize_png).encode(
        &image,
        config.format,
        config.quality,
        TitleDigest::of(title).hex(),
    )?;

    std::fs::write(output, &encoded.bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Rendered {} ({}x{}, {} bytes)",
        output.display(),
        image.width(),
        image.height(),
        encoded.bytes.len()
    );
    Ok(())
}

fn run_preview_command(config: GenerationConfig, title: &str) -> anyhow::Result<()> {
    let pipeline = TitleImagePipeline::new(config, Arc::new(InMemoryStorage::new()))?;
    if let Some(uri) = pipeline.preview(title)? {
        println!("{uri}");
    }
    Ok(())
}

fn run_article_command(
    mut config: GenerationConfig,
    title: String,
    content: Option<&Path>,
    out_dir: PathBuf,
    public_url: Option<String>,
    draw_sub: bool,
) -> anyhow::Result<()> {
    config.draw_sub |= draw_sub;

    let mut source = TitleSource::new(title);
    if let Some(path) = content {
        let html = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        source = source.with_content(html);
    }

    let public_url = public_url.unwrap_or_else(|| out_dir.display().to_string());
    let storage = Arc::new(DirectoryStorage::new(out_dir, public_url));
    let pipeline = TitleImagePipeline::new(config, storage)?;

    let update = pipeline.generate(&source)?;
    println!("{}", serde_json::to_string_pretty(&update)?);
    Ok(())
}

fn run_fonts_command(config: &GenerationConfig) -> anyhow::Result<()> {
    let resolver = FontResolver::new(config.font_file());

    println!("Font candidates ({}):", resolver.candidates().len());
    for candidate in resolver.candidates() {
        if candidate.index == 0 {
            println!("  {}", candidate.path.display());
        } else {
            println!("  {} (face {})", candidate.path.display(), candidate.index);
        }
    }

    match resolver.resolve_with_strategy() {
        Some((font, strategy)) => {
            println!(
                "\nSelected: {} [{}] via {strategy}",
                font.source().display(),
                font.family().unwrap_or("unknown family")
            );
            Ok(())
        }
        None => anyhow::bail!("No usable font found"),
    }
}

fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Titlecard v{VERSION}");
    println!("Generated cover images for articles that have none\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        std::env::var("CONFIG_FILE").as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        std::env::var("RUST_LOG")
            .as_deref()
            .unwrap_or("titlecard=info (default)")
    );

    let config = match config_path {
        Some(path) if path.exists() => {
            println!("\nConfig: {}", path.display());
            GenerationConfig::load(path)
        }
        Some(path) => {
            println!("\nConfig: {} (file not found, using defaults)", path.display());
            GenerationConfig::default()
        }
        None => {
            println!("\nConfig: defaults");
            GenerationConfig::default()
        }
    };

    println!("  Size:       {}x{}", config.width, config.height);
    println!("  Format:     {} (quality {})", config.format, config.quality);
    println!("  Font color: {}", config.font_color);
    println!("  Font floor: {}px", config.font_size);
    println!(
        "  Background: {}",
        config
            .background_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| format!("procedural (noise {})", on_off(config.noise)))
    );
    println!(
        "  Font:       {}",
        config
            .font_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "system".to_string())
    );
    println!("  Sub-images: {}", on_off(config.draw_sub));

    if let Err(e) = config.validate() {
        println!("\n  Warning: {e}");
    }

    println!("\nUsage:");
    println!("  titlecard render --title <TEXT> --output <FILE>   Render one image");
    println!("  titlecard preview --title <TEXT>                  Print a data URI");
    println!("  titlecard article --title <TEXT> --out-dir <DIR>  Cover + heading images");
    println!("  titlecard fonts                                   Show font selection");
    println!("  titlecard --help                                  Show all options");
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
