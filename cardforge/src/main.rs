use anyhow::{bail, Context};
use cardforge_rs::editor::CardEditor;
use cardforge_rs::export::{export_filename, export_png};
use cardforge_rs::input::RACE_PRESETS;
use cardforge_rs::loader::resolve_source;
use cardforge_rs::{CardFields, CardSurface, FrameStyle, RenderConfig};
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// cardforge: render trading-card images from JSON card descriptions
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a card description to PNG
    Render {
        /// Path to the card JSON file. Reads stdin when omitted or "-"
        #[arg(short, long)]
        input: Option<String>,

        /// Path of the PNG to write, or "-" for stdout
        #[arg(short, long, conflicts_with = "output_dir")]
        output: Option<String>,

        /// Directory to write the PNG into, named after the card title
        #[arg(long)]
        output_dir: Option<String>,

        /// Illustration image (PNG, JPEG, GIF or WebP)
        #[arg(long)]
        illustration: Option<String>,

        /// Path to a JSON render configuration
        #[arg(short, long)]
        config: Option<String>,

        /// Device pixels per card unit, overrides the config file
        #[arg(short, long)]
        scale: Option<f32>,

        /// Frame style, overrides the card file
        #[arg(long)]
        style: Option<String>,

        /// Additional directory to load fonts from. Repeatable
        #[arg(long)]
        font_dir: Vec<String>,
    },

    /// Print the default card description as JSON
    Template,

    /// List frame styles and race presets
    Styles,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Render {
            input,
            output,
            output_dir,
            illustration,
            config,
            scale,
            style,
            font_dir,
        } => {
            let mut config = match config {
                Some(path) => RenderConfig::from_path(&expand(&path))
                    .with_context(|| format!("Failed to load config from {path}"))?,
                None => RenderConfig::default(),
            };
            if let Some(scale) = scale {
                config.scale = scale;
            }
            config.font_dirs.extend(font_dir.iter().map(|dir| expand(dir)));
            config.validate()?;

            let mut fields = read_fields(input.as_deref())?;
            if let Some(style) = style {
                fields.frame_style = style.parse::<FrameStyle>()?;
            }
            let upload = match illustration {
                Some(path) => {
                    let bytes = std::fs::read(expand(&path))
                        .with_context(|| format!("Failed to read illustration {path}"))?;
                    Some(Arc::<[u8]>::from(bytes))
                }
                None => None,
            };

            let png = render_card(&config, fields.clone(), upload).await?;
            let target = output_target(output, output_dir, &fields.title);
            write_output(&target, &png)?;
        }
        Commands::Template => {
            let json = serde_json::to_string_pretty(&CardFields::default())?;
            println!("{json}");
        }
        Commands::Styles => {
            println!("Frame styles:");
            for style in FrameStyle::ALL {
                println!("  {style}");
            }
            println!("Race presets:");
            for race in RACE_PRESETS {
                println!("  {race}");
            }
        }
    }
    Ok(())
}

async fn render_card(
    config: &RenderConfig,
    fields: CardFields,
    upload: Option<Arc<[u8]>>,
) -> anyhow::Result<Vec<u8>> {
    let surface = CardSurface::new(config).context("Failed to create card surface")?;
    let mut editor = CardEditor::new(Some(surface), config.placeholder_tile_size);

    let source = resolve_source(upload, fields.use_upload);
    editor.set_fields(fields);
    let outcome = editor.loader().load(source).await;
    editor.apply_load(outcome);
    editor.flush();

    let Some(surface) = editor.surface() else {
        bail!("Card surface is unavailable");
    };
    Ok(export_png(surface)?)
}

fn read_fields(input: Option<&str>) -> anyhow::Result<CardFields> {
    let json = match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read card from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(expand(path))
            .with_context(|| format!("Failed to read card file {path}"))?,
    };
    CardFields::from_json(&json).context("Failed to parse card JSON")
}

enum OutputTarget {
    Stdout,
    File(PathBuf),
}

fn output_target(output: Option<String>, output_dir: Option<String>, title: &str) -> OutputTarget {
    match (output, output_dir) {
        (Some(path), _) if path == "-" => OutputTarget::Stdout,
        (Some(path), _) => OutputTarget::File(expand(&path)),
        (None, Some(dir)) => OutputTarget::File(expand(&dir).join(export_filename(title))),
        (None, None) => OutputTarget::File(PathBuf::from(export_filename(title))),
    }
}

fn write_output(target: &OutputTarget, png: &[u8]) -> anyhow::Result<()> {
    match target {
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(png)?;
            stdout.flush()?;
        }
        OutputTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(path, png)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn expand(path: &str) -> PathBuf {
    Path::new(shellexpand::tilde(path).as_ref()).to_path_buf()
}
