//! dialog-overlay - demo host for the alert/confirm overlay
//!
//! Draws a plain page and opens dialogs on top of it. Logs go to
//! `~/.dialog-overlay/dialog-overlay.log`; set `DIALOG_OVERLAY_LOG` to change
//! the filter.

mod app;
mod tui;

use crate::app::App;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use dialog_overlay::{Action, Component, Settings};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let settings = Settings::load();
    info!(?settings, "starting");

    let mut tui = Tui::new()?.with_tick_rate(settings.tick_rate());
    tui.enter()?;

    let mut app = App::new(settings);
    app.init()?;

    let result = run_app(&mut tui, &mut app);

    tui.exit()?;

    if let Err(err) = result {
        error!("{:?}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    let dir = Settings::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    std::fs::create_dir_all(&dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("dialog-overlay.log"))?;

    let env_filter =
        EnvFilter::try_from_env("DIALOG_OVERLAY_LOG").unwrap_or_else(|_| "dialog_overlay=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                error!("draw error: {}", e);
            }
        })?;

        let action = match tui.next_event()? {
            Some(Event::Key(key)) => app.handle_key_event(key)?,
            Some(Event::Mouse(mouse)) => app.handle_mouse_event(mouse)?,
            Some(Event::Resize(w, h)) => Some(Action::Resize(w, h)),
            Some(_) => None,
            None => Some(Action::Tick),
        };

        // An action may produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            current_action = app.update(a)?;
        }
    }

    Ok(())
}
