//! CLI integration tests for the `lmj` binary.
//!
//! Each test runs the binary against its own temporary project directory
//! with an isolated XDG config home.

use std::path::Path;
use std::process::{Command, Output};

use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use tempfile::TempDir;

/// Run lmj in `dir` and return the raw output.
fn lmj(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lmj"))
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute lmj")
}

/// Run lmj and return (stdout, stderr, exit code).
fn run(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = lmj(dir, args);
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

fn assert_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run(dir, args);
    assert_eq!(code, 0, "lmj {:?} failed: {}", args, stderr);
    stdout
}

#[test]
fn test_new_edit_export_produces_gif() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    assert_ok(dir, &["new"]);
    assert_ok(dir, &["paint", "0", "0", "--color", "#ff0000"]);
    assert_ok(dir, &["layer", "add"]);
    assert_ok(dir, &["stamp", "heart"]);
    assert_ok(dir, &["frame", "duplicate"]);
    assert_ok(dir, &["layer", "shift", "right", "3"]);
    assert_ok(dir, &["frame", "duration", "300"]);

    let stdout = assert_ok(dir, &["export", "--out", "gifs"]);
    assert!(stdout.starts_with("Exported "));

    let exports: Vec<_> = std::fs::read_dir(dir.join("gifs")).unwrap().collect();
    assert_eq!(exports.len(), 1);
    let path = exports[0].as_ref().unwrap().path();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("lightmoji-") && name.ends_with(".gif"), "{}", name);

    let bytes = std::fs::read(&path).unwrap();
    let frames = GifDecoder::new(std::io::Cursor::new(bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].buffer().dimensions(), (60, 26));
    let (numer, denom) = frames[1].delay().numer_denom_ms();
    assert_eq!(numer / denom, 300);
}

#[test]
fn test_frame_commands_report_one_based_position() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    assert_ok(dir, &["new"]);
    let stdout = assert_ok(dir, &["frame", "add"]);
    assert!(stdout.contains("Frame 2 of 2"), "{}", stdout);
    let stdout = assert_ok(dir, &["frame", "select", "0"]);
    assert!(stdout.contains("Frame 1 of 2"), "{}", stdout);
}

#[test]
fn test_state_persists_between_runs() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    assert_ok(dir, &["layer", "add"]);
    assert_ok(dir, &["layer", "rename", "Ink"]);
    assert_ok(dir, &["tool", "fill"]);
    assert_ok(dir, &["loop", "off"]);

    let info = assert_ok(dir, &["info"]);
    assert!(info.contains("loop off"), "{}", info);
    assert!(info.contains("\"Ink\""), "{}", info);
    assert!(info.contains("Tool: fill"), "{}", info);

    let json = assert_ok(dir, &["info", "--json"]);
    assert!(json.contains("\"currentFrameIndex\":0"));
    assert!(json.contains("\"loop\":false"));
    assert!(dir.join(".lightmoji/lightmoji-studio-state.json").exists());
}

#[test]
fn test_deleting_last_layer_warns() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    let (_, stderr, code) = run(dir, &["layer", "delete"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Warning"), "{}", stderr);

    let info = assert_ok(dir, &["info"]);
    assert!(info.contains("\"Background\""));
}

#[test]
fn test_invalid_color_is_invalid_args() {
    let temp = TempDir::new().unwrap();
    let (_, stderr, code) = run(temp.path(), &["color", "#12345"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Invalid color"), "{}", stderr);

    assert_ok(temp.path(), &["color", "00FF00"]);
    assert_eq!(assert_ok(temp.path(), &["color"]).trim(), "#00ff00");
}

#[test]
fn test_show_prints_emoji_rows() {
    let temp = TempDir::new().unwrap();
    assert_ok(temp.path(), &["stamp", "text"]);
    let stdout = assert_ok(temp.path(), &["show"]);
    assert_eq!(stdout.lines().count(), 26);
    assert!(stdout.contains("🟪"));

    let (_, _, code) = run(temp.path(), &["show", "--frame", "5"]);
    assert_eq!(code, 2);
}

#[test]
fn test_config_defaults_apply_to_new_project() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    std::fs::write(
        dir.join("lightmoji.toml"),
        "[storage]\ndir = \"state\"\n\n[defaults]\nframe_duration = 120\ncolor = \"#00ff00\"\n",
    )
    .unwrap();

    assert_ok(dir, &["new"]);
    assert_ok(dir, &["frame", "add"]);
    let json = assert_ok(dir, &["info", "--json"]);
    assert!(json.contains("\"duration\":120"));
    assert!(!json.contains("\"duration\":200"));
    assert!(json.contains("\"selectedColor\":{\"r\":0,\"g\":255,\"b\":0}"));
    assert!(dir.join("state/lightmoji-studio-state.json").exists());
}

#[test]
fn test_invalid_config_fails() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("lightmoji.toml"), "[defaults]\ncolor = \"nope\"\n").unwrap();
    let (_, stderr, code) = run(temp.path(), &["info"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("defaults.color"), "{}", stderr);
}

#[test]
fn test_corrupt_state_starts_fresh() {
    let temp = TempDir::new().unwrap();
    let state = temp.path().join(".lightmoji");
    std::fs::create_dir_all(&state).unwrap();
    std::fs::write(state.join("lightmoji-studio-state.json"), "{\"frames\": 12").unwrap();

    let info = assert_ok(temp.path(), &["info"]);
    assert!(info.starts_with("Frames: 1"));
}
