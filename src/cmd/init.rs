use crate::data::{ConfigFile, Persistable};
use anyhow::Result;
use std::path::Path;

pub fn run(dir: &Path) -> Result<()> {
    run_in_dir(dir)?;
    println!("Data files initialized successfully.");
    Ok(())
}

/// Writes the default config.yaml into `dir`. Exposed for unit testing.
pub(crate) fn run_in_dir(dir: &Path) -> Result<()> {
    ConfigFile::default().save_to(dir)
}
