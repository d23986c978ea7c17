//! # sitegen
//!
//! Generates Next.js pages, animation code and whole project trees from the
//! JSON the site builder exports.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use sitegen_animation::AnimationBackend;
use sitegen_codegen::{PageGenerator, PageOptions, ProjectGenerator, SiteConfig};
use sitegen_core::{Animation, PageConfig, Timeline};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "sitegen", version)]
struct Cli {
    /// Give up on source formatting after this many milliseconds.
    #[arg(long, global = true, env = "SITEGEN_FORMAT_TIMEOUT_MS")]
    format_timeout_ms: Option<u64>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a single page module.
    Page(PageArgs),
    /// Compile one animation and print its implementation.
    Animation(AnimationArgs),
    /// Generate a full project directory.
    Project(ProjectArgs),
}

#[derive(Parser, Debug)]
struct PageArgs {
    /// Page config JSON.
    page: PathBuf,

    /// JSON array of animations for elements on the page.
    #[arg(long)]
    animations: Option<PathBuf>,

    /// Animation backend: css, framerMotion or gsap.
    #[arg(long, env = "SITEGEN_BACKEND", default_value = "css")]
    backend: String,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct AnimationArgs {
    /// Animation JSON.
    animation: PathBuf,

    /// Animation backend: css, framerMotion or gsap.
    #[arg(long, env = "SITEGEN_BACKEND", default_value = "framerMotion")]
    backend: String,
}

#[derive(Parser, Debug)]
struct ProjectArgs {
    /// Site config JSON.
    site: PathBuf,

    /// Output directory.
    #[arg(long, env = "SITEGEN_OUT_DIR")]
    out: PathBuf,
}

/// Initialize tracing on stderr.
///
/// `RUST_LOG` controls levels (default: info).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let timeout = cli.format_timeout_ms.map(Duration::from_millis);
    match cli.cmd {
        Command::Page(args) => cmd_page(args, timeout).await,
        Command::Animation(args) => cmd_animation(args),
        Command::Project(args) => cmd_project(args, timeout).await,
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

fn page_generator(timeout: Option<Duration>) -> anyhow::Result<PageGenerator> {
    let generator = PageGenerator::new()?;
    Ok(match timeout {
        Some(timeout) => generator.with_format_timeout(timeout),
        None => generator,
    })
}

async fn cmd_page(args: PageArgs, timeout: Option<Duration>) -> anyhow::Result<()> {
    let page: PageConfig = read_json(&args.page)?;
    page.validate()
        .with_context(|| format!("invalid page {}", args.page.display()))?;

    let animations = match args.animations {
        Some(ref path) => Timeline::from_animations(read_json(path)?).into_animations(),
        None => Vec::new(),
    };
    let options = PageOptions::default()
        .with_animations(animations)
        .with_backend(AnimationBackend::from_name(&args.backend));

    let source = page_generator(timeout)?.generate_page(&page, &options).await?;
    match args.out {
        Some(path) => {
            std::fs::write(&path, &source).with_context(|| format!("write {}", path.display()))?;
            tracing::info!(page = %page.slug, path = %path.display(), "wrote page");
        }
        None => print!("{}", source),
    }
    Ok(())
}

fn cmd_animation(args: AnimationArgs) -> anyhow::Result<()> {
    let animation: Animation = read_json(&args.animation)?;
    let compiled = sitegen_animation::compile_named(&animation, &args.backend)?;
    tracing::info!(animation = %animation.id, backend = %compiled.backend(), "compiled animation");
    println!("{}", compiled.implementation());
    Ok(())
}

async fn cmd_project(args: ProjectArgs, timeout: Option<Duration>) -> anyhow::Result<()> {
    let site: SiteConfig = read_json(&args.site)?;
    let generator = ProjectGenerator::with_page_generator(page_generator(timeout)?);
    let project = generator.generate(&site).await?;
    project
        .write_to(&args.out)
        .with_context(|| format!("write project to {}", args.out.display()))?;
    tracing::info!(
        site = %site.slug,
        files = project.files.len(),
        out = %args.out.display(),
        "generated project"
    );
    Ok(())
}
