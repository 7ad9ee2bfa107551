use super::StartArgs;
use crate::calc::Direction;
use crate::data::{ConfigFile, Persistable, SessionState};
use crate::widgets::{ChannelObserver, NavigatorEvent, NavigatorOption, NavigatorOptions, OptionObserver};
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::sync::mpsc;

/// Where one step landed.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub date: NaiveDate,
    pub step: String,
    pub caption: String,
}

pub fn run(dir: &Path, args: &StartArgs, direction: Direction, json: bool, save: bool) -> Result<()> {
    let (config, options) = super::load(dir, args)?;
    let report = step_once(&config, options, direction)?;
    if save {
        SessionState {
            date: Some(report.date),
            step: Some(report.step.clone()),
        }
        .save_to(dir)?;
    }
    write_report(&report, json, &mut std::io::stdout())
}

/// Clicks prev or next once and applies the reported date, as an owner would.
pub(crate) fn step_once(
    config: &ConfigFile,
    options: NavigatorOptions,
    direction: Direction,
) -> Result<StepReport> {
    let (tx, rx) = mpsc::channel();
    let start = options.date;
    let mut navigator = config.navigator_builder(options).build(ChannelObserver(tx));
    let (clicked, button) = match direction {
        Direction::Previous => (navigator.click_prev(), "previous"),
        Direction::Next => (navigator.click_next(), "next"),
    };
    if !clicked {
        bail!("the {button} button is disabled at {start}");
    }
    let NavigatorEvent::CurrentDateUpdated(date) =
        rx.try_recv().context("navigator reported no date")?;
    navigator.option_changed(NavigatorOption::Date(date));
    Ok(StepReport {
        date,
        step: navigator.options().step.name().to_string(),
        caption: navigator.caption_text().to_string(),
    })
}

pub(crate) fn write_report<W: Write>(report: &StepReport, json: bool, out: &mut W) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(report)?)?;
    } else {
        writeln!(out, "{}  {}", report.date.format("%Y-%m-%d"), report.caption)?;
    }
    Ok(())
}
