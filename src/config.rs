use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Paths {
    pub drafts_dir: PathBuf,
    pub template_file: PathBuf,
    pub site_dir: PathBuf,
    pub scratch_dir: Option<PathBuf>,
}

#[derive(Deserialize)]
pub struct Site {
    pub url: String,
}

#[derive(Deserialize)]
pub struct Feed {
    pub title: String,
    pub description: String,
    pub author_email: String,
}

#[derive(Deserialize)]
pub struct Log {
    pub level: LogLevel,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Copy, Clone)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize)]
pub struct Config {
    pub paths: Paths,
    pub site: Site,
    pub feed: Feed,
    pub log: Option<Log>,
}

// Relative paths in the file are taken relative to the file itself, so the
// generator can run from any working directory
fn resolve_path(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    let mut cfg: Config = match toml::from_str::<Config>(cfg_content.as_str()) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    let base_dir = cfg_path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();
    cfg.paths = Paths {
        drafts_dir: resolve_path(&base_dir, cfg.paths.drafts_dir),
        template_file: resolve_path(&base_dir, cfg.paths.template_file),
        site_dir: resolve_path(&base_dir, cfg.paths.site_dir),
        scratch_dir: cfg.paths.scratch_dir.map(|p| resolve_path(&base_dir, p)),
    };

    Ok(cfg)
}
