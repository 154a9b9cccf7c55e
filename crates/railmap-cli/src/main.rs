//! `railmap`: render the railway AI metro map (or print its DOT, layout or SVG).

use clap::{Args, Parser, Subcommand};
use railmap::render::{LayoutOptions, NativeEngine, layout_json};
use railmap::{
    EngineKind, GraphvizEngine, RailmapConfig, RenderEngine, RenderOptions, railway_ai_map, to_dot,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Railmap(#[from] railmap::Error),
    #[error(transparent)]
    Render(#[from] railmap::RenderError),
    #[error(transparent)]
    Layout(#[from] railmap_render::Error),
    #[error("failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Parser)]
#[command(name = "railmap", version, about = "Metro-map architecture diagram renderer")]
struct Cli {
    /// JSON run configuration; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the map to `<out-dir>/<name>.png` (the default)
    Render(RenderArgs),

    /// Print the Graphviz DOT source
    Dot,

    /// Print the computed layout as JSON
    Layout {
        #[arg(long)]
        pretty: bool,
    },

    /// Print the SVG drawn by the native engine
    Svg,
}

#[derive(Args, Default)]
struct RenderArgs {
    /// Output directory (created if missing)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Output file stem; `.png` is appended
    #[arg(long)]
    name: Option<String>,

    /// Render engine: native, graphviz
    #[arg(long)]
    engine: Option<String>,

    /// Graphviz program used by the graphviz engine
    #[arg(long)]
    graphviz_program: Option<PathBuf>,

    /// Raster scale factor (native engine)
    #[arg(long)]
    scale: Option<f32>,

    /// Background color, or `transparent` (native engine)
    #[arg(long)]
    background: Option<String>,

    /// Do not write the DOT source next to the image
    #[arg(long)]
    no_source: bool,
}

impl RenderArgs {
    fn apply(self, config: &mut RailmapConfig) -> Result<(), CliError> {
        if let Some(dir) = self.out_dir {
            config.output_dir = dir;
        }
        if let Some(name) = self.name {
            config.file_stem = name;
        }
        if let Some(engine) = self.engine {
            config.engine = engine.parse::<EngineKind>()?;
        }
        if let Some(program) = self.graphviz_program {
            config.graphviz_program = program;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(background) = self.background {
            config.background = match background.trim() {
                "" | "none" => None,
                other => Some(other.to_string()),
            };
        }
        if self.no_source {
            config.write_source = false;
        }
        config.validate()?;
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => RailmapConfig::from_path(path)?,
        None => RailmapConfig::default(),
    };
    let builder = railway_ai_map()?;

    match cli.command.unwrap_or(Commands::Render(RenderArgs::default())) {
        Commands::Render(args) => {
            args.apply(&mut config)?;
            std::fs::create_dir_all(&config.output_dir).map_err(|source| {
                CliError::CreateDir {
                    path: config.output_dir.clone(),
                    source,
                }
            })?;

            let engine: Box<dyn RenderEngine> = match config.engine {
                EngineKind::Native => Box::new(NativeEngine::from_config(&config)),
                EngineKind::Graphviz => {
                    Box::new(GraphvizEngine::with_program(config.graphviz_program.clone()))
                }
            };
            tracing::debug!(engine = engine.name(), "selected render engine");

            let target = builder.render_with(
                engine.as_ref(),
                config.output_path(),
                &RenderOptions {
                    write_source: config.write_source,
                },
            )?;
            println!("{}", target.display());
        }
        Commands::Dot => print!("{}", to_dot(builder.graph())),
        Commands::Layout { pretty } => {
            println!(
                "{}",
                layout_json(builder.graph(), &LayoutOptions::default(), pretty)?
            );
        }
        Commands::Svg => {
            print!(
                "{}",
                NativeEngine::from_config(&config).render_svg(builder.graph())?
            );
        }
    }
    Ok(())
}
