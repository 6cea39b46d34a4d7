//! Read-only commands: `show` and `info`

use std::process::ExitCode;

use crate::composition::composite_frame;
use crate::emoji::render_emoji_art;
use crate::storage;
use crate::studio::Studio;

use super::{Session, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Execute the show command - print a frame's composite as emoji art
pub fn run_show(session: &Session, frame: Option<usize>) -> ExitCode {
    let studio = session.load();
    let animation = studio.animation();
    let index = frame.unwrap_or(animation.current_index());
    let Some(frame) = animation.frame(index) else {
        eprintln!(
            "Error: Frame {} out of range ({} frame(s))",
            index,
            animation.frame_count()
        );
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    print!("{}", render_emoji_art(&composite_frame(frame)));
    ExitCode::from(EXIT_SUCCESS)
}

/// Human-readable project summary.
pub(crate) fn summary(studio: &Studio) -> String {
    let animation = studio.animation();
    let frame = studio.current_frame();
    let mut out = String::new();

    out.push_str(&format!(
        "Frames: {} (current {}), loop {}, total {}ms\n",
        animation.frame_count(),
        animation.current_index(),
        on_off(animation.loop_playback),
        animation.total_duration()
    ));
    out.push_str(&format!("Frame {} ({}), {}ms\n", animation.current_index(), frame.id, frame.duration()));
    for (index, layer) in frame.layers().iter().enumerate().rev() {
        let marker = if &layer.id == studio.active_layer_id() { '*' } else { ' ' };
        out.push_str(&format!(
            "  {} {} {} \"{}\" {} offset ({}, {}) {} px\n",
            marker,
            index,
            layer.id,
            layer.name,
            if layer.visible { "visible" } else { "hidden" },
            layer.offset_x,
            layer.offset_y,
            layer.pixels.painted().count()
        ));
    }
    out.push_str(&format!(
        "Color: {}  Tool: {}  Grid: {}\n",
        studio.selected_color,
        studio.selected_tool,
        on_off(studio.show_grid)
    ));
    out
}

/// Execute the info command
pub fn run_info(session: &Session, json: bool) -> ExitCode {
    let studio = session.load();
    if !json {
        print!("{}", summary(&studio));
        return ExitCode::from(EXIT_SUCCESS);
    }
    match storage::to_json(&studio) {
        Ok(record) => {
            println!("{}", record);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
