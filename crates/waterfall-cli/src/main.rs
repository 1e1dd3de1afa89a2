use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use waterfall::scene::svg::to_markup;
use waterfall::{HostData, Item, Rendered, Viewport, adapt, build_scene, cumulate, parse_document};

#[derive(Parser)]
#[command(name = "waterfall")]
#[command(about = "Offline preview of the waterfall chart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cumulative items as JSON
    Items {
        /// Host payload or bare array of rows (JSON)
        file: PathBuf,
    },
    /// Print the scene as JSON
    Scene {
        /// Host payload or bare array of rows (JSON)
        file: PathBuf,
        #[command(flatten)]
        size: SizeArgs,
    },
    /// Render the chart as an SVG document
    Svg {
        /// Host payload or bare array of rows (JSON)
        file: PathBuf,
        #[command(flatten)]
        size: SizeArgs,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Clone, Copy)]
struct SizeArgs {
    /// Container width, 0 falls back to the default size
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Container height, 0 falls back to the default size
    #[arg(long, default_value_t = 400.0)]
    height: f64,
}

impl SizeArgs {
    fn viewport(self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Items { file } => {
            let data = load(&file)?;
            println!("{}", serde_json::to_string_pretty(&items(&data))?);
        }
        Commands::Scene { file, size } => {
            let data = load(&file)?;
            let rendered = render(&data, size.viewport());
            println!("{}", serde_json::to_string_pretty(&rendered.scene)?);
        }
        Commands::Svg { file, size, output } => {
            let data = load(&file)?;
            let rendered = render(&data, size.viewport());
            if rendered.scene.is_placeholder() {
                log::warn!("{}: no rows, writing the placeholder instead of a chart", file.display());
            }
            let markup = to_markup(&rendered.scene);
            match output {
                Some(path) => fs::write(&path, markup)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{markup}"),
            }
        }
    }

    Ok(())
}

fn load(path: &Path) -> Result<HostData> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_document(&json).with_context(|| format!("failed to parse {}", path.display()))
}

fn items(data: &HostData) -> Vec<Item> {
    cumulate(adapt(data.default_table()).pairs())
}

fn render(data: &HostData, viewport: Viewport) -> Rendered {
    let rendered = build_scene(&adapt(data.default_table()), viewport);
    log::info!(
        "{} items, domain {:?}, {} diagnostics",
        rendered.report.item_count,
        rendered.report.domain,
        rendered.report.diagnostics.len()
    );
    rendered
}
