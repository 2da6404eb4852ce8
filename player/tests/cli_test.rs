//! Exit codes of the command-line player

use std::io::Write;
use std::process::Command;

fn player() -> Command {
    Command::new(env!("CARGO_BIN_EXE_csrt-player"))
}

#[test]
fn missing_file_exits_with_one() {
    let output = player().arg("/definitely/not/here/clip.mp4").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("ERROR: failed to open /definitely/not/here/clip.mp4"),
        "stdout was: {}",
        stdout
    );
    assert!(!stdout.contains("Press any key"));
}

#[test]
fn no_argument_fails_at_open() {
    let output = player().output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("ERROR: failed to open"));
}

#[test]
fn invalid_track_list_exits_with_one() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"[{{"name": "car", "x": 2.0, "y": 0.5, "w": 0.1, "h": 0.1}}]"#).unwrap();

    let output = player()
        .arg("clip.mp4")
        .arg("--tracks")
        .arg(file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("ERROR: configuration error"));
}

#[test]
fn unknown_flag_exits_with_one() {
    let output = player().arg("--no-such-flag").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}
