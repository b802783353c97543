use anyhow::{Context, Result};
use askama::Template;
use std::{
    fs,
    path::{Path, PathBuf},
};
use strum::Display;

use crate::extract::strip_trailing_newline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InputKind {
    #[strum(serialize = "test.txt")]
    Test,
    #[strum(serialize = "input.txt")]
    Problem,
}

#[derive(Debug, Template)]
#[template(path = "solve.rs.j2", escape = "none")]
pub struct SolutionTemplate<'a> {
    pub day_name: &'a str,
    pub year: u32,
}

/// `day07_camel_cards` style directory and file stem.
pub fn day_name(day: u32, title: &str) -> String {
    format!("day{:02}_{}", day, title.to_lowercase().replace(' ', "_"))
}

pub fn create_target_directory(root: &Path, year: u32, day_name: &str) -> Result<PathBuf> {
    let dir = root.join(year.to_string()).join(day_name);
    fs::create_dir_all(&dir).with_context(|| format!("make directory {}", dir.display()))?;
    Ok(dir)
}

pub fn write_readme(dir: &Path, description: &str) -> Result<PathBuf> {
    let path = dir.join("Readme.md");
    fs::write(&path, description).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

pub fn write_solution(dir: &Path, day_name: &str, year: u32) -> Result<PathBuf> {
    let content = SolutionTemplate { day_name, year }
        .render()
        .context("fill solution template")?;
    let path = dir.join(format!("{day_name}.rs"));
    fs::write(&path, content).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

/// Test input comes straight from the page and loses its trailing newline
/// here; problem input is already normalized during extraction.
pub fn write_input(dir: &Path, kind: InputKind, data: &str) -> Result<PathBuf> {
    let data = match kind {
        InputKind::Test => strip_trailing_newline(data),
        InputKind::Problem => data,
    };
    let path = dir.join(kind.to_string());
    fs::write(&path, data).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
