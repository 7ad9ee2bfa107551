use crate::calc::FixedAgendaDuration;
use crate::calc::ViewStep;
use crate::calc::date_utils::normalize_date;
use crate::data::persistence::Persistable;
use crate::device::DeviceDescriptor;
use crate::locale::EnglishLocale;
use crate::widgets::{Navigator, NavigatorBuilder, NavigatorOption, NavigatorOptions};
use anyhow::{Result, bail};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_step() -> String {
    "day".to_string()
}

fn default_visible() -> bool {
    true
}

/// Navigator defaults from the `navigator` section of config.yaml.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NavigatorSettings {
    #[serde(default = "default_step")]
    pub step: String,
    #[serde(default)]
    pub min: Option<NaiveDate>,
    #[serde(default)]
    pub max: Option<NaiveDate>,
    #[serde(default)]
    pub first_day_of_week: Option<u32>,
    #[serde(default)]
    pub agenda_duration: Option<i64>,
    /// Overrides the device rule when set.
    #[serde(default)]
    pub use_short_date_format: Option<bool>,
    #[serde(default)]
    pub tab_index: Option<i32>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        NavigatorSettings {
            step: default_step(),
            min: None,
            max: None,
            first_day_of_week: None,
            agenda_duration: None,
            use_short_date_format: None,
            tab_index: None,
            visible: default_visible(),
            disabled: false,
        }
    }
}

impl NavigatorSettings {
    fn validate(&self) -> Result<ViewStep> {
        let step = self.step.parse()?;
        if let Some(day) = self.first_day_of_week {
            if day > 6 {
                bail!("first_day_of_week must be between 0 and 6, got {day}");
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                bail!("min date {min} is after max date {max}");
            }
        }
        Ok(step)
    }

    /// Resolves the configured values and the device rules into widget options.
    /// An unknown step name is reported as a configuration error. `date` is
    /// clamped into the configured bounds.
    pub fn to_options(&self, date: NaiveDate, device: &DeviceDescriptor) -> Result<NavigatorOptions> {
        let step = self.validate()?;
        let defaults = NavigatorOptions::for_device(date, device);
        Ok(NavigatorOptions {
            date: normalize_date(date, self.min, self.max),
            step,
            min: self.min,
            max: self.max,
            first_day_of_week: self.first_day_of_week,
            use_short_date_format: self
                .use_short_date_format
                .unwrap_or(defaults.use_short_date_format),
            tab_index: self.tab_index,
            visible: self.visible,
            disabled: self.disabled,
            ..defaults
        })
    }

    /// Option changes that bring a running navigator in line with these
    /// settings. Date and step belong to the session and are left out, as are
    /// the agenda duration and locale which are fixed at build time.
    pub fn option_changes(&self, device: &DeviceDescriptor) -> Result<Vec<NavigatorOption>> {
        self.validate()?;
        Ok(vec![
            NavigatorOption::Min(self.min),
            NavigatorOption::Max(self.max),
            NavigatorOption::FirstDayOfWeek(self.first_day_of_week),
            NavigatorOption::UseShortDateFormat(
                self.use_short_date_format
                    .unwrap_or_else(|| device.use_short_date_format()),
            ),
            NavigatorOption::FocusStateEnabled(device.focus_state_enabled()),
            NavigatorOption::TabIndex(self.tab_index),
            NavigatorOption::Visible(self.visible),
            NavigatorOption::Disabled(self.disabled),
        ])
    }
}

/// The whole config.yaml.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub navigator: NavigatorSettings,
    #[serde(default)]
    pub device: DeviceDescriptor,
    #[serde(default)]
    pub locale: EnglishLocale,
}

impl ConfigFile {
    /// Navigator builder wired with the configured locale, agenda duration
    /// and device.
    pub fn navigator_builder(&self, options: NavigatorOptions) -> NavigatorBuilder {
        Navigator::builder(options)
            .locale(self.locale.clone())
            .agenda_duration(FixedAgendaDuration(self.navigator.agenda_duration))
            .device(&self.device)
    }
}

impl Persistable for ConfigFile {
    fn filename() -> &'static str {
        "config.yaml"
    }
    fn is_json() -> bool {
        false
    }
}
