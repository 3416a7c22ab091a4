/*!
Connection and display configuration.

Precedence for every setting: command-line flag, then process environment,
then `./.env`, then `<config dir>/obsctl/config.env`, then the built-in default.
The env files only fill variables the environment does not already define, so
clap's `env` fallback picks them up unchanged.
*/

use anyhow::{Context, Result, anyhow};
use clap::Args;
use clap::builder::BoolishValueParser;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cmd::format::{Palette, Style};

/* ---- Flag groups ---- */

#[derive(Args, Debug, Clone)]
pub struct ObsConfig {
    /// Host to connect to
    #[arg(short = 'H', long, env = "OBS_HOST", default_value = "localhost", global = true)]
    pub host: String,

    /// Port to connect to
    #[arg(short = 'P', long, env = "OBS_PORT", default_value_t = 4455, global = true)]
    pub port: u16,

    /// Password for authentication
    #[arg(short = 'p', long, env = "OBS_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Request timeout in seconds
    #[arg(
        short = 'T',
        long = "timeout",
        env = "OBS_TIMEOUT",
        default_value_t = 5,
        value_name = "SECONDS",
        global = true
    )]
    pub timeout_secs: u64,
}

impl ObsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Args, Debug, Clone)]
pub struct StyleConfig {
    /// Colour palette for tables and highlights
    #[arg(short = 's', long, env = "OBSCTL_STYLE", value_enum, global = true)]
    pub style: Option<Palette>,

    /// Disable table borders
    #[arg(
        short = 'b',
        long,
        env = "OBSCTL_STYLE_NO_BORDER",
        action = clap::ArgAction::SetTrue,
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub no_border: bool,

    /// Disable colour output (also honoured via NO_COLOR)
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl StyleConfig {
    /// `no_color_env` is whether `NO_COLOR` is set to a non-empty value.
    pub fn to_style(&self, no_color_env: bool) -> Style {
        Style::new(self.style, !self.no_border, !(self.no_color || no_color_env))
    }
}

pub fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

/* ---- Env files ---- */

/// Env files in precedence order.
pub fn env_files() -> Vec<PathBuf> {
    let mut files = vec![PathBuf::from(".env")];
    if let Some(dir) = dirs::config_dir() {
        files.push(dir.join("obsctl").join("config.env"));
    }
    files
}

/// Export variables from the env files that are not already set.
/// Missing files are skipped. Must run before clap parses arguments.
pub fn load_env_files() -> Result<()> {
    for path in env_files() {
        let Some(pairs) = read_env_file(&path)? else {
            continue;
        };
        for (key, value) in pairs {
            if std::env::var_os(&key).is_none() {
                // SAFETY: called from main before any other thread exists.
                unsafe { std::env::set_var(&key, &value) };
            }
        }
    }
    Ok(())
}

fn read_env_file(path: &Path) -> Result<Option<Vec<(String, String)>>> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_env(&text)
            .with_context(|| format!("invalid env file {}", path.display()))
            .map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("failed to read {}", path.display())),
    }
}

/// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped, an
/// `export ` prefix is allowed, values are unquoted shell-style.
pub fn parse_env(text: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| anyhow!("line {}: expected KEY=VALUE", idx + 1))?;
        let key = key.trim();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(anyhow!("line {}: invalid key '{key}'", idx + 1));
        }
        let value = value.trim();
        let value = if value.is_empty() {
            String::new()
        } else {
            shell_words::split(value)
                .with_context(|| format!("line {}: bad quoting", idx + 1))?
                .join(" ")
        };
        pairs.push((key.to_string(), value));
    }
    Ok(pairs)
}
