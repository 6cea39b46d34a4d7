//! Command-line interface implementation
//!
//! Every command loads the session from the state directory, applies one
//! action, reports the outcome and saves the session back.

mod edit;
mod export;
mod show;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::debug;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, LightmojiConfig};
use crate::logging;
use crate::patterns::Pattern;
use crate::storage::{self, FileStore};
use crate::studio::{Action, Outcome, Studio, Tool};

pub use edit::{FrameAction, LayerAction};

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// lightmoji - layered pixel-art animations for a 60x26 light panel
#[derive(Parser)]
#[command(name = "lmj")]
#[command(about = "lightmoji - paint layered pixel-art animations and export them as GIFs")]
#[command(version)]
pub struct Cli {
    /// Path to lightmoji.toml (default: discovered from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the saved session (overrides [storage] dir)
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// On/off switch argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start a new project, discarding the saved one
    New {
        /// Play exported GIFs once instead of looping
        #[arg(long)]
        no_loop: bool,
    },
    /// Print a summary of the project
    Info {
        /// Print the saved JSON record instead
        #[arg(long)]
        json: bool,
    },
    /// Preview a frame as emoji art
    Show {
        /// Frame to show (default: current frame)
        #[arg(long)]
        frame: Option<usize>,
    },
    /// Export the animation as a timestamped GIF
    Export {
        /// Output directory (overrides [export] dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Edit layers of the current frame
    Layer {
        #[command(subcommand)]
        action: LayerAction,
    },
    /// Edit frames
    Frame {
        #[command(subcommand)]
        action: FrameAction,
    },
    /// Paint a pixel on the active layer
    #[command(allow_negative_numbers = true)]
    Paint {
        x: i32,
        y: i32,
        /// Select this color first (#rrggbb)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Erase a pixel on the active layer
    #[command(allow_negative_numbers = true)]
    Erase { x: i32, y: i32 },
    /// Flood-fill the region under a pixel on the active layer
    #[command(allow_negative_numbers = true)]
    Fill {
        x: i32,
        y: i32,
        /// Select this color first (#rrggbb)
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Apply the selected tool at a pixel
    #[command(allow_negative_numbers = true)]
    Use { x: i32, y: i32 },
    /// Show or set the drawing color
    Color {
        /// New color as #rrggbb
        hex: Option<String>,
    },
    /// Select the drawing tool
    Tool {
        #[arg(value_enum)]
        tool: Tool,
    },
    /// Toggle the grid overlay
    Grid,
    /// Turn looping on or off
    Loop {
        #[arg(value_enum)]
        mode: Switch,
    },
    /// Stamp a built-in pattern onto the active layer
    Stamp {
        #[arg(value_enum)]
        pattern: Pattern,
    },
}

/// Loaded configuration plus the store the session lives in.
pub(crate) struct Session {
    pub config: LightmojiConfig,
    pub store: FileStore,
}

impl Session {
    fn open(cli: &Cli, overrides: CliOverrides) -> Result<Self, ExitCode> {
        let mut config = match load_config(cli.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return Err(ExitCode::from(EXIT_ERROR));
            }
        };
        merge_cli_overrides(&mut config, &overrides);
        debug!(state_dir = %config.storage.dir.display(), "Opened session");
        let store = FileStore::new(config.storage.dir.clone());
        Ok(Self { config, store })
    }

    pub fn load(&self) -> Studio {
        storage::load(&self.store)
    }

    pub fn save(&mut self, studio: &Studio) -> Result<(), ExitCode> {
        storage::save(&mut self.store, studio).map_err(|e| {
            eprintln!("Error: Failed to save project: {}", e);
            ExitCode::from(EXIT_ERROR)
        })
    }

    /// A new project with the configured defaults applied.
    pub fn fresh_studio(&self) -> Studio {
        let mut studio = Studio::new();
        studio.apply(Action::SetColor(self.config.default_color()));
        studio.apply(Action::SetLoop(self.config.export.loop_playback));
        studio.apply(Action::SetDuration(self.config.defaults.frame_duration));
        studio
    }

    /// Apply actions in order, stopping at the first rejection, then save.
    /// Rejections are printed as warnings and exit with an error code; the
    /// session is still saved so earlier actions are kept.
    pub fn run_actions(&mut self, studio: &mut Studio, actions: Vec<Action>) -> ExitCode {
        let mut status = EXIT_SUCCESS;
        for action in actions {
            match studio.apply(action) {
                Outcome::Changed => {}
                Outcome::Unchanged => println!("Nothing changed"),
                Outcome::Warning(message) => {
                    eprintln!("Warning: {}", message);
                    status = EXIT_ERROR;
                    break;
                }
            }
        }
        if let Err(code) = self.save(studio) {
            return code;
        }
        ExitCode::from(status)
    }
}

/// Parse a `#rrggbb` argument, reporting bad input as invalid arguments.
pub(crate) fn parse_color_arg(hex: &str) -> Result<crate::color::Color, ExitCode> {
    crate::color::parse_hex(hex).map_err(|e| {
        eprintln!("Error: Invalid color '{}': {}", hex, e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

/// Run the CLI and return the exit code
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let overrides = CliOverrides {
        storage_dir: cli.state_dir.clone(),
        export_dir: match &cli.command {
            Commands::Export { out } => out.clone(),
            _ => None,
        },
        loop_playback: match &cli.command {
            Commands::New { no_loop: true } => Some(false),
            _ => None,
        },
    };

    let mut session = match Session::open(&cli, overrides) {
        Ok(session) => session,
        Err(code) => return code,
    };

    match cli.command {
        Commands::New { .. } => {
            let studio = session.fresh_studio();
            match session.save(&studio) {
                Ok(()) => {
                    println!("Started a new project in {}", session.store.dir().display());
                    ExitCode::from(EXIT_SUCCESS)
                }
                Err(code) => code,
            }
        }
        Commands::Info { json } => show::run_info(&session, json),
        Commands::Show { frame } => show::run_show(&session, frame),
        Commands::Export { .. } => export::run_export(&session),
        Commands::Layer { action } => edit::run_layer(&mut session, action),
        Commands::Frame { action } => edit::run_frame(&mut session, action),
        Commands::Paint { x, y, color } => edit::run_pixel(&mut session, Action::Draw { x, y }, color),
        Commands::Erase { x, y } => edit::run_pixel(&mut session, Action::Erase { x, y }, None),
        Commands::Fill { x, y, color } => edit::run_pixel(&mut session, Action::Fill { x, y }, color),
        Commands::Use { x, y } => edit::run_pixel(&mut session, Action::UseTool { x, y }, None),
        Commands::Color { hex } => edit::run_color(&mut session, hex.as_deref()),
        Commands::Tool { tool } => edit::run_simple(&mut session, Action::SetTool(tool)),
        Commands::Grid => edit::run_simple(&mut session, Action::ToggleGrid),
        Commands::Loop { mode } => edit::run_simple(&mut session, Action::SetLoop(mode == Switch::On)),
        Commands::Stamp { pattern } => edit::run_simple(&mut session, Action::Stamp(pattern)),
    }
}
