// Line commands: a headless way to drive the desk from stdin.

use std::fmt::Write as _;

use mosaic_core::{Key, Modifiers, PaneId, Selection};
use mosaic_input::{Action, Hotkey};
use mosaic_workspace::Desk;

pub const HELP: &str = "\
commands:
  open <type>          open a pane (notes, tasks, clock)
  close [id]           close a pane (default: focused)
  focus <id>           focus a pane
  key <chord>          press a key, e.g. key h, key alt+left, key ctrl+2
  type <text>          type characters into the focused pane
  click <x> <y>        click at a window point
  cursor <n>           set the focused control's cursor
  select <a> <b>       set the focused control's selection
  scroll <y>           set the focused control's scroll offset
  ws <n>               switch to workspace n (1-based)
  hide <id> | unhide <id>
  pin                  cycle the layout pin
  context [name]       set or clear the workspace context
  show                 print the desk
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Blank,
    Open(String),
    Close(Option<PaneId>),
    Focus(PaneId),
    Key(Key, Modifiers),
    Type(String),
    Click(f32, f32),
    Cursor(usize),
    Select(usize, usize),
    Scroll(f32),
    /// Zero-based workspace index.
    Switch(usize),
    Visible(PaneId, bool),
    Pin,
    Context(Option<String>),
    Show,
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<Line, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let parsed = match word {
        "" => Line::Blank,
        "open" => Line::Open(one(&args, "pane type")?.to_string()),
        "close" => Line::Close(args.first().map(|a| number(a)).transpose()?),
        "focus" => Line::Focus(number(one(&args, "pane id")?)?),
        "key" => {
            let chord = one(&args, "key chord")?;
            let hotkey = Hotkey::parse(chord).ok_or_else(|| format!("unknown key {chord:?}"))?;
            Line::Key(hotkey.key, hotkey.modifiers())
        }
        "type" if !rest.is_empty() => Line::Type(rest.to_string()),
        "type" => return Err("type needs text".to_string()),
        "click" => match args.as_slice() {
            [x, y] => Line::Click(float(x)?, float(y)?),
            _ => return Err("click needs x and y".to_string()),
        },
        "cursor" => Line::Cursor(number(one(&args, "offset")?)?),
        "select" => match args.as_slice() {
            [a, b] => Line::Select(number(a)?, number(b)?),
            _ => return Err("select needs start and end".to_string()),
        },
        "scroll" => Line::Scroll(float(one(&args, "offset")?)?),
        "ws" => {
            let n: usize = number(one(&args, "workspace number")?)?;
            let index = n.checked_sub(1).ok_or("workspaces are numbered from 1")?;
            Line::Switch(index)
        }
        "hide" => Line::Visible(number(one(&args, "pane id")?)?, false),
        "unhide" => Line::Visible(number(one(&args, "pane id")?)?, true),
        "pin" => Line::Pin,
        "context" => Line::Context((!rest.is_empty()).then(|| rest.to_string())),
        "show" => Line::Show,
        "help" | "?" => Line::Help,
        "quit" | "exit" => Line::Quit,
        other => return Err(format!("unknown command {other:?}")),
    };
    Ok(parsed)
}

fn one<'a>(args: &[&'a str], what: &str) -> Result<&'a str, String> {
    args.first().copied().ok_or_else(|| format!("missing {what}"))
}

fn number<T: std::str::FromStr>(arg: &str) -> Result<T, String> {
    arg.parse().map_err(|_| format!("not a number: {arg:?}"))
}

fn float(arg: &str) -> Result<f32, String> {
    number(arg)
}

/// Apply one parsed line. Returns a message for the user, if any.
pub fn run(desk: &mut Desk, line: Line) -> Option<String> {
    match line {
        Line::Blank | Line::Quit => None,
        Line::Open(kind) => match desk.open_pane(&kind) {
            Some(id) => Some(format!("opened {kind} pane {id}")),
            None => Some(format!("no pane type {kind:?}")),
        },
        Line::Close(id) => {
            let Some(id) = id.or(desk.focused()) else {
                return Some("nothing to close".to_string());
            };
            (!desk.close_pane(id)).then(|| format!("no pane {id}"))
        }
        Line::Focus(id) => {
            let outcome = desk.focus_pane(id);
            outcome.focused_pane().is_none().then(|| format!("no pane {id}"))
        }
        Line::Key(key, modifiers) => {
            press(desk, key, modifiers);
            None
        }
        Line::Type(text) => {
            for c in text.chars() {
                press(desk, Key::Char(c), Modifiers::default());
            }
            None
        }
        Line::Click(x, y) => {
            desk.focus_at(mosaic_core::Vec2::new(x, y));
            None
        }
        Line::Cursor(n) => edit_focused(desk, |s| s.cursor = Some(n)),
        Line::Select(a, b) => edit_focused(desk, |s| s.selection = Some(Selection::new(a, b))),
        Line::Scroll(y) => edit_focused(desk, |s| s.scroll = Some(y)),
        Line::Switch(index) => match desk.switch_to(index) {
            Some(report) if !report.skipped.is_empty() => {
                Some(format!("skipped unknown panes: {}", report.skipped.join(", ")))
            }
            Some(_) => None,
            None => Some(format!("no workspace {}", index + 1)),
        },
        Line::Visible(id, visible) => (!desk.set_pane_visible(id, visible)).then(|| format!("no pane {id}")),
        Line::Pin => {
            let pin = desk.cycle_layout_pin();
            Some(format!("layout pin: {}", pin.map_or("auto".to_string(), |p| format!("{p:?}"))))
        }
        Line::Context(context) => {
            desk.set_context_ref(context);
            None
        }
        Line::Show => Some(status(desk)),
        Line::Help => Some(HELP.to_string()),
    }
}

/// A key press through the router. Characters that reach a text control
/// advance its cursor, standing in for inserted text.
fn press(desk: &mut Desk, key: Key, modifiers: Modifiers) {
    let event = mosaic_core::InputEvent::KeyPress { key, modifiers };
    if let Action::RouteToPane(_) = desk.handle_event(event) {
        if let (Key::Char(_), Some(control)) = (key, desk.focused_control()) {
            if desk.controls().is_typing() {
                desk.update_control(control, |s| s.cursor = Some(s.cursor.unwrap_or(0) + 1));
            }
        }
    }
}

fn edit_focused(desk: &mut Desk, f: impl FnOnce(&mut mosaic_core::ControlState)) -> Option<String> {
    match desk.focused_control() {
        Some(control) => {
            desk.update_control(control, f);
            None
        }
        None => Some("no focused control".to_string()),
    }
}

/// One line per pane: id, type, grid cell, and the keyboard-focused control.
pub fn status(desk: &Desk) -> String {
    let mut out = String::new();
    let engine = desk.engine();
    let _ = writeln!(
        out,
        "workspace {}/{}  mode {:?}  pin {}  context {}",
        desk.current_workspace() + 1,
        desk.store().len(),
        engine.mode(),
        engine.pin().map_or("auto".to_string(), |p| format!("{p:?}")),
        desk.context_ref().unwrap_or("-"),
    );

    for pane in engine.panes() {
        let cell = match engine.position(pane.id) {
            Some(pos) => format!("r{}c{} {}x{}", pos.row, pos.column, pos.row_span, pos.col_span),
            None => "hidden".to_string(),
        };
        let marker = if desk.focused() == Some(pane.id) { '*' } else { ' ' };
        let _ = write!(out, "{marker} [{}] {:<6} {}", pane.id, pane.kind, cell);

        if let Some(control) = desk.focused_control() {
            if let Some(c) = desk.controls().get(control).filter(|c| c.pane == pane.id) {
                let _ = write!(out, "  {:?}", c.kind);
                if let Some(cursor) = c.state.cursor {
                    let _ = write!(out, " cursor={cursor}");
                }
                if let Some(sel) = c.state.selection {
                    let _ = write!(out, " selection={}..{}", sel.start, sel.end);
                }
                if let Some(scroll) = c.state.scroll {
                    let _ = write!(out, " scroll={scroll}");
                }
            }
        }
        out.push('\n');
    }
    if engine.is_empty() {
        out.push_str("  (no panes)\n");
    }
    out
}
