#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// Creates a `Command` for the `habitlog` binary with a clean environment whose
/// data directory is `data_dir`.
pub fn base_habitlog_command(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("habitlog").expect("habitlog binary not built");
    configure_habitlog_command(&mut cmd, data_dir);
    cmd
}

/// Applies the standard non-interactive environment to an existing `Command`.
pub fn configure_habitlog_command(cmd: &mut Command, data_dir: &Path) {
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    if let Ok(tmpdir) = std::env::var("TMPDIR") {
        cmd.env("TMPDIR", tmpdir);
    }
    cmd.env("HABITLOG_DIR", data_dir);
    cmd.env("RUST_LOG", "warn");
}
