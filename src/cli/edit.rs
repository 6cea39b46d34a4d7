//! Editing commands: layers, frames, pixels and editor settings

use clap::Subcommand;
use std::process::ExitCode;

use crate::id::LayerId;
use crate::models::{LayerMove, ShiftDirection};
use crate::studio::{Action, Studio};

use super::{parse_color_arg, Session, EXIT_SUCCESS};

#[derive(Subcommand)]
pub enum LayerAction {
    /// Add an empty layer on top and select it
    Add,
    /// Delete a layer
    Delete {
        /// Layer id or stack index (default: active layer)
        #[arg(short, long)]
        layer: Option<String>,
    },
    /// Duplicate a layer and select the copy
    Duplicate {
        #[arg(short, long)]
        layer: Option<String>,
    },
    /// Toggle a layer's visibility
    Toggle {
        #[arg(short, long)]
        layer: Option<String>,
    },
    /// Move a layer's projection without touching its pixels
    #[command(allow_negative_numbers = true)]
    Shift {
        #[arg(value_enum)]
        direction: ShiftDirection,
        /// Number of cells to move
        #[arg(default_value = "1")]
        amount: i32,
        #[arg(short, long)]
        layer: Option<String>,
    },
    /// Reset a layer's offset to (0, 0)
    Reset {
        #[arg(short, long)]
        layer: Option<String>,
    },
    /// Move a layer one step toward the top of the stack
    Up {
        #[arg(short, long)]
        layer: Option<String>,
    },
    /// Move a layer one step toward the bottom of the stack
    Down {
        #[arg(short, long)]
        layer: Option<String>,
    },
    /// Rename a layer
    Rename {
        name: String,
        #[arg(short, long)]
        layer: Option<String>,
    },
    /// Make a layer the target of pixel edits
    Select {
        /// Layer id or stack index
        layer: String,
    },
}

#[derive(Subcommand)]
pub enum FrameAction {
    /// Append an empty frame and switch to it
    Add,
    /// Delete a frame
    Delete {
        /// Frame index (default: current frame)
        index: Option<usize>,
    },
    /// Duplicate the current frame and switch to the copy
    Duplicate,
    /// Empty every layer of the current frame
    Clear,
    /// Switch to a frame
    Select { index: usize },
    /// Set the current frame's duration in milliseconds
    Duration { ms: u32 },
}

/// Resolve a layer argument against the current frame.
///
/// A number is a stack index (0 is the bottom layer); anything else is taken
/// as a layer id. No argument means the active layer.
fn resolve_layer(studio: &Studio, layer: Option<&str>) -> LayerId {
    let Some(arg) = layer else {
        return studio.active_layer_id().clone();
    };
    match arg.parse::<usize>() {
        Ok(index) => match studio.current_frame().layers().get(index) {
            Some(layer) => layer.id.clone(),
            None => LayerId::from(arg),
        },
        Err(_) => LayerId::from(arg),
    }
}

fn layer_action(studio: &Studio, action: LayerAction) -> Action {
    match action {
        LayerAction::Add => Action::AddLayer,
        LayerAction::Delete { layer } => Action::DeleteLayer(resolve_layer(studio, layer.as_deref())),
        LayerAction::Duplicate { layer } => {
            Action::DuplicateLayer(resolve_layer(studio, layer.as_deref()))
        }
        LayerAction::Toggle { layer } => {
            Action::ToggleVisibility(resolve_layer(studio, layer.as_deref()))
        }
        LayerAction::Shift { direction, amount, layer } => Action::ShiftLayer {
            id: resolve_layer(studio, layer.as_deref()),
            direction,
            amount,
        },
        LayerAction::Reset { layer } => Action::ResetOffset(resolve_layer(studio, layer.as_deref())),
        LayerAction::Up { layer } => Action::MoveLayer {
            id: resolve_layer(studio, layer.as_deref()),
            step: LayerMove::Raise,
        },
        LayerAction::Down { layer } => Action::MoveLayer {
            id: resolve_layer(studio, layer.as_deref()),
            step: LayerMove::Lower,
        },
        LayerAction::Rename { name, layer } => Action::RenameLayer {
            id: resolve_layer(studio, layer.as_deref()),
            name,
        },
        LayerAction::Select { layer } => Action::SelectLayer(resolve_layer(studio, Some(&layer))),
    }
}

/// Execute a `layer` subcommand
pub fn run_layer(session: &mut Session, action: LayerAction) -> ExitCode {
    let mut studio = session.load();
    let action = layer_action(&studio, action);
    let code = session.run_actions(&mut studio, vec![action]);
    let active = studio.active_layer();
    println!("Active layer: {} ({})", active.name, active.id);
    code
}

/// Execute a `frame` subcommand
pub fn run_frame(session: &mut Session, action: FrameAction) -> ExitCode {
    let mut studio = session.load();
    let duration = session.config.defaults.frame_duration;
    let actions = match action {
        FrameAction::Add => vec![Action::AddFrame, Action::SetDuration(duration)],
        FrameAction::Delete { index } => {
            vec![Action::DeleteFrame(index.unwrap_or(studio.animation().current_index()))]
        }
        FrameAction::Duplicate => vec![Action::DuplicateFrame],
        FrameAction::Clear => vec![Action::ClearFrame],
        FrameAction::Select { index } => vec![Action::SelectFrame(index)],
        FrameAction::Duration { ms } => vec![Action::SetDuration(ms)],
    };
    let code = session.run_actions(&mut studio, actions);
    println!("{}", frame_status(&studio));
    code
}

/// One-line position report, counting frames from 1.
fn frame_status(studio: &Studio) -> String {
    let animation = studio.animation();
    format!(
        "Frame {} of {} ({}ms)",
        animation.current_index() + 1,
        animation.frame_count(),
        studio.current_frame().duration()
    )
}

/// Execute a pixel command, optionally selecting a color first
pub fn run_pixel(session: &mut Session, action: Action, color: Option<String>) -> ExitCode {
    let mut actions = Vec::with_capacity(2);
    if let Some(hex) = color {
        match parse_color_arg(&hex) {
            Ok(color) => actions.push(Action::SetColor(color)),
            Err(code) => return code,
        }
    }
    actions.push(action);

    let mut studio = session.load();
    session.run_actions(&mut studio, actions)
}

/// Execute the `color` command: print the current color, or set a new one
pub fn run_color(session: &mut Session, hex: Option<&str>) -> ExitCode {
    let mut studio = session.load();
    let Some(hex) = hex else {
        println!("{}", studio.selected_color);
        return ExitCode::from(EXIT_SUCCESS);
    };
    match parse_color_arg(hex) {
        Ok(color) => session.run_actions(&mut studio, vec![Action::SetColor(color)]),
        Err(code) => code,
    }
}

/// Execute a single settings or stamp action
pub fn run_simple(session: &mut Session, action: Action) -> ExitCode {
    let mut studio = session.load();
    session.run_actions(&mut studio, vec![action])
}
