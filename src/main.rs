use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use pixgrid::script::{self, ScriptCommand};
use pixgrid::{Config, EditorListener, EditorState, Grid, InputMode};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pixgrid")]
#[command(version, about = "Indexed-color pixel grid editor driven by command scripts")]
struct Cli {
    /// Script file to run (reads stdin when omitted or "-")
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Config file to load instead of ~/.config/pixgrid/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Grid width in cells (overrides config)
    #[arg(long, value_name = "CELLS")]
    width: Option<usize>,

    /// Grid height in cells (overrides config)
    #[arg(long, value_name = "CELLS")]
    height: Option<usize>,

    /// Initial input mode (pixel, line, rectangle, rectangle-outline, ellipse, ellipse-outline)
    #[arg(long, short = 'm', value_name = "MODE")]
    mode: Option<InputMode>,

    /// Write the visible surface to a PNG file after the script ran
    #[arg(long, value_name = "PNG")]
    snapshot: Option<PathBuf>,

    /// Omit the outline path from the output
    #[arg(long)]
    no_outline: bool,
}

/// Logs committed outlines at info level.
struct LogListener;

impl EditorListener for LogListener {
    fn outline_changed(&mut self, grid: &Grid, outline: &str) {
        info!(
            "Outline updated for {}x{} grid ({} bytes)",
            grid.width(),
            grid.height(),
            outline.len()
        );
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(width) = cli.width {
        config.canvas.width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.height = height;
    }
    if let Some(mode) = cli.mode {
        config.editor.input_mode = mode;
    }
    config.validate_and_clamp();
    Ok(config)
}

fn read_script(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read script from stdin")?;
            Ok(source)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let source = read_script(cli.script.as_ref())?;
    let commands: Vec<ScriptCommand> = script::parse_script(&source)?;

    let mut editor = EditorState::from_config(&config)?;
    editor.add_listener(LogListener);
    info!(
        "Running {} command(s) on a {}x{} grid",
        commands.len(),
        editor.width(),
        editor.height()
    );

    for command in &commands {
        script::apply(&mut editor, command)
            .with_context(|| format!("Command {:?} failed", command))?;
    }
    editor.pointer_cancel();
    editor.flush_history();

    print!("{}", script::render_rows(&editor));
    if !cli.no_outline {
        println!("outline: {}", editor.outline());
    }

    if let Some(path) = &cli.snapshot {
        editor
            .visible()
            .save_png(path)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        info!("Saved snapshot to {}", path.display());
    }

    Ok(())
}
