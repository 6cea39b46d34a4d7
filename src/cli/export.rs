//! Export command implementation

use std::process::ExitCode;

use crate::export::export_to_dir;
use crate::gif::GifFrameEncoder;

use super::{Session, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the export command: write the animation as a timestamped GIF
pub fn run_export(session: &Session) -> ExitCode {
    let studio = session.load();
    let mut encoder = GifFrameEncoder::new();
    match export_to_dir(studio.animation(), &mut encoder, &session.config.export.dir) {
        Ok(path) => {
            println!("Exported {}", path.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
