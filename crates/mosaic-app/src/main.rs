// Mosaic: tiled panes, directional focus, switchable workspaces.
// Headless front end: reads line commands from stdin and drives a Desk.
// The session is written back on exit.

mod console;
mod pane;

use std::io::{self, BufRead, Write};

use mosaic_core::Key;
use mosaic_focus::FocusChange;
use mosaic_input::{Command, Hotkey, Scope};
use mosaic_workspace::settings::{self, MosaicSettings};
use mosaic_workspace::{session, Desk};

use console::Line;

// ──────────────────────────────────────────────
// Startup
// ──────────────────────────────────────────────

fn build_desk(settings: &MosaicSettings) -> Desk {
    let registry = pane::registry();
    let mut desk = match session::load_session() {
        Some(saved) if !saved.is_empty() => {
            let (desk, report) = Desk::from_session(registry, settings, saved);
            if !report.skipped.is_empty() {
                log::warn!("Session panes not restored: {}", report.skipped.join(", "));
            }
            desk
        }
        _ => {
            let mut desk = Desk::new(registry, settings);
            for kind in &settings.seed_panes {
                desk.open_pane(kind);
            }
            desk
        }
    };
    bind_pane_keys(&mut desk);
    desk.subscribe(|change: &FocusChange| {
        log::debug!("focus {:?} -> {:?}", change.previous, change.current);
    });
    desk
}

/// Pane-local bindings for the demo panes. They shadow workspace bindings
/// for the same keys while such a pane has focus.
fn bind_pane_keys(desk: &mut Desk) {
    let tasks = Scope::Pane("tasks".to_string());
    let keymap = desk.keymap_mut();
    for (key, name) in [('n', "next"), ('p', "prev"), (' ', "toggle")] {
        keymap.bind(tasks.clone(), Hotkey::plain(Key::Char(key)), Command::Pane(name.to_string()));
    }
}

fn main() {
    env_logger::init();

    let settings = settings::load_settings();
    let mut desk = build_desk(&settings);

    if let Err(e) = repl(&mut desk) {
        log::error!("Input loop failed: {}", e);
    }

    session::save_session(&desk.checkpoint());
}

fn repl(desk: &mut Desk) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    write!(out, "{}", console::status(desk))?;

    for line in stdin.lock().lines() {
        let line = line?;
        match console::parse(&line) {
            Ok(Line::Quit) => break,
            Ok(Line::Blank) => {}
            Ok(parsed) => {
                let show = !matches!(parsed, Line::Show | Line::Help);
                if let Some(message) = console::run(desk, parsed) {
                    writeln!(out, "{message}")?;
                }
                if show {
                    write!(out, "{}", console::status(desk))?;
                }
            }
            Err(message) => writeln!(out, "error: {message}")?,
        }
        out.flush()?;
    }
    Ok(())
}
