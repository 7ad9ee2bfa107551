pub mod caption;
pub mod date_utils;
pub mod stepper;

pub use caption::{CaptionOptions, format_caption};
pub use stepper::{
    AgendaDurationProvider, Direction, FixedAgendaDuration, StepConfig, ViewStep, compute_next,
};
