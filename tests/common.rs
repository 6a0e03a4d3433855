#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// triplogger command bound to an isolated configuration directory.
pub fn tlg(config_dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("triplogger");
    cmd.env("TRIPLOGGER_CONFIG_DIR", config_dir);
    cmd.env_remove("TRIPLOGGER_LOG");
    cmd
}

pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Path of `name` inside `dir`, as the String the APIs take.
pub fn path_in(dir: &Path, name: &str) -> String {
    dir.join(name).to_string_lossy().to_string()
}

pub fn read_lines(path: &str) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read data file")
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn today() -> String {
    triplogger::utils::date::format_date(triplogger::utils::date::today())
}
