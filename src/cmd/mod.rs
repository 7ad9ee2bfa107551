pub mod caption;
pub mod init;
pub mod root;
pub mod step;

use crate::calc::ViewStep;
use crate::calc::date_utils::parse_date;
use crate::data::{ConfigFile, Persistable, SessionState};
use crate::widgets::NavigatorOptions;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::path::Path;
use tracing::warn;

/// Date and step given on the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StartArgs {
    pub date: Option<String>,
    pub step: Option<String>,
}

/// Loads config.yaml and state.json from `dir` and resolves the starting options.
pub(crate) fn load(dir: &Path, args: &StartArgs) -> Result<(ConfigFile, NavigatorOptions)> {
    let config = ConfigFile::load_from(dir)?;
    let session = SessionState::load_from(dir)?;
    let today = Local::now().date_naive();
    let options = resolve_options(&config, &session, args, today)?;
    Ok((config, options))
}

/// Explicit arguments win over the saved session, which wins over today and
/// the configured step. A bad saved step is skipped, a bad argument is an error.
pub(crate) fn resolve_options(
    config: &ConfigFile,
    session: &SessionState,
    args: &StartArgs,
    today: NaiveDate,
) -> Result<NavigatorOptions> {
    let date = match args.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => session.date.unwrap_or(today),
    };
    let mut settings = config.navigator.clone();
    if let Some(step) = &args.step {
        settings.step = step.clone();
    } else if let Some(saved) = session.step.as_deref() {
        if saved.parse::<ViewStep>().is_ok() {
            settings.step = saved.to_string();
        } else {
            warn!(step = saved, "ignoring unknown step in saved session");
        }
    }
    settings.to_options(date, &config.device)
}
