//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod process;

use std::path::Path;

use indicatif::ProgressBar;

use certex_core::{CertexConfig, ProgressSink};

/// Load configuration from an explicit path, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CertexConfig> {
    if let Some(path) = config_path {
        return Ok(CertexConfig::from_file(Path::new(path))?);
    }

    if let Some(default_path) = config::default_config_path() {
        if default_path.exists() {
            return Ok(CertexConfig::from_file(&default_path)?);
        }
    }

    Ok(CertexConfig::default())
}

/// Progress sink that drives an indicatif bar.
pub struct BarSink {
    bar: ProgressBar,
}

impl BarSink {
    pub fn new(bar: ProgressBar) -> Self {
        Self { bar }
    }
}

impl ProgressSink for BarSink {
    fn update(&self, percent: u8, status: &str) {
        self.bar.set_position(percent as u64);
        self.bar.set_message(status.to_string());
    }
}
