use super::StartArgs;
use crate::data::ConfigFile;
use crate::widgets::{NavigatorEvent, NavigatorOptions};
use anyhow::Result;
use std::io::Write;
use std::path::Path;

pub fn run(dir: &Path, args: &StartArgs) -> Result<()> {
    let (config, options) = super::load(dir, args)?;
    write_caption(&config, options, &mut std::io::stdout())
}

pub(crate) fn write_caption<W: Write>(
    config: &ConfigFile,
    options: NavigatorOptions,
    out: &mut W,
) -> Result<()> {
    let navigator = config.navigator_builder(options).build(|_: NavigatorEvent| {});
    writeln!(out, "{}", navigator.caption_text())?;
    Ok(())
}
