use super::StartArgs;
use crate::data::Persistable;
use crate::ui::navigator_view::{App, run_app};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;
use std::path::Path;
use tracing::info;

pub fn run(dir: &Path) -> Result<()> {
    let (config, options) = super::load(dir, &StartArgs::default())?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::DisableMouseCapture,
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    info!(date = %options.date, step = %options.step, "navigator started");
    let mut app = App::new(options, &config, today).with_config_dir(dir);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;

    app.session().save_to(dir)?;
    info!("session saved");

    result
}
