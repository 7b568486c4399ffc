//! The blocking input-reader thread.
//!
//! One dedicated thread blocks on terminal input and converts every
//! crossterm event into an owned [`Event`] appended through an
//! [`EventSender`]. Raw input is always addressed to the root widget;
//! the owning thread re-targets it during dispatch (keys to the focused
//! widget, mouse by hit-test), so this thread never touches the tree.
//!
//! Shutdown is cooperative: the read blocks with a poll timeout, so the
//! exit flag is observed within one interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event as ct;

use weft_core::{Area, Point};
use weft_widgets::{Event, EventSender, KeyCode, KeyEvent, Modifiers, MouseButton, WheelDirection, WidgetId};

/// How long a poll blocks before re-checking the exit flag.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Converts a crossterm key code. Unmappable codes produce `None`.
fn convert_key_code(code: ct::KeyCode) -> Option<KeyCode> {
    Some(match code {
        ct::KeyCode::Backspace => KeyCode::Backspace,
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Left => KeyCode::Left,
        ct::KeyCode::Right => KeyCode::Right,
        ct::KeyCode::Up => KeyCode::Up,
        ct::KeyCode::Down => KeyCode::Down,
        ct::KeyCode::Home => KeyCode::Home,
        ct::KeyCode::End => KeyCode::End,
        ct::KeyCode::PageUp => KeyCode::PageUp,
        ct::KeyCode::PageDown => KeyCode::PageDown,
        ct::KeyCode::Tab => KeyCode::Tab,
        ct::KeyCode::BackTab => KeyCode::BackTab,
        ct::KeyCode::Delete => KeyCode::Delete,
        ct::KeyCode::Insert => KeyCode::Insert,
        ct::KeyCode::Esc => KeyCode::Esc,
        ct::KeyCode::F(n) => KeyCode::F(n),
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        _ => return None,
    })
}

fn convert_modifiers(modifiers: ct::KeyModifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.contains(ct::KeyModifiers::SHIFT),
        ctrl: modifiers.contains(ct::KeyModifiers::CONTROL),
        alt: modifiers.contains(ct::KeyModifiers::ALT),
    }
}

fn convert_button(button: ct::MouseButton) -> MouseButton {
    match button {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Right => MouseButton::Right,
        ct::MouseButton::Middle => MouseButton::Middle,
    }
}

/// Converts one crossterm event into a root-targeted toolkit event.
///
/// Returns `None` for events the toolkit does not model (focus reports,
/// paste, key repeats folded into presses are kept).
pub fn convert(event: ct::Event, root: WidgetId) -> Option<Event> {
    match event {
        ct::Event::Key(key) => {
            let code = convert_key_code(key.code)?;
            let key_event = KeyEvent::new(code, convert_modifiers(key.modifiers));
            match key.kind {
                ct::KeyEventKind::Press | ct::KeyEventKind::Repeat => Some(Event::KeyPress {
                    widget: root,
                    key: key_event,
                }),
                ct::KeyEventKind::Release => Some(Event::KeyRelease {
                    widget: root,
                    key: key_event,
                }),
            }
        }
        ct::Event::Mouse(mouse) => {
            let position = Point::new(mouse.column as i32, mouse.row as i32);
            let modifiers = convert_modifiers(mouse.modifiers);
            match mouse.kind {
                ct::MouseEventKind::Down(button) => Some(Event::MousePress {
                    widget: root,
                    button: convert_button(button),
                    position,
                    modifiers,
                }),
                ct::MouseEventKind::Up(button) => Some(Event::MouseRelease {
                    widget: root,
                    button: convert_button(button),
                    position,
                    modifiers,
                }),
                ct::MouseEventKind::Drag(_) | ct::MouseEventKind::Moved => {
                    Some(Event::MouseMove {
                        widget: root,
                        position,
                        modifiers,
                    })
                }
                ct::MouseEventKind::ScrollUp => Some(Event::MouseWheel {
                    widget: root,
                    direction: WheelDirection::Up,
                    position,
                    modifiers,
                }),
                ct::MouseEventKind::ScrollDown => Some(Event::MouseWheel {
                    widget: root,
                    direction: WheelDirection::Down,
                    position,
                    modifiers,
                }),
                ct::MouseEventKind::ScrollLeft => Some(Event::MouseWheel {
                    widget: root,
                    direction: WheelDirection::Left,
                    position,
                    modifiers,
                }),
                ct::MouseEventKind::ScrollRight => Some(Event::MouseWheel {
                    widget: root,
                    direction: WheelDirection::Right,
                    position,
                    modifiers,
                }),
            }
        }
        // The new size reaches the root; the application fills in the old
        // one from the tree.
        ct::Event::Resize(width, height) => Some(Event::Resize {
            widget: root,
            old: Area::ZERO,
            new: Area::new(width, height),
        }),
        _ => None,
    }
}

/// The background thread reading terminal input.
pub struct InputReader {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputReader {
    /// Spawns the reader thread, delivering events addressed to `root`.
    pub fn spawn(sender: EventSender, root: WidgetId) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = std::thread::spawn(move || {
            tracing::debug!("input reader started");
            while flag.load(Ordering::Acquire) && !sender.is_closed() {
                match ct::poll(POLL_INTERVAL) {
                    Ok(true) => match ct::read() {
                        Ok(raw) => {
                            if let Some(event) = convert(raw, root) {
                                sender.send(event);
                            }
                        }
                        Err(err) => {
                            tracing::debug!(%err, "input read failed, stopping reader");
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(err) => {
                        tracing::debug!(%err, "input poll failed, stopping reader");
                        break;
                    }
                }
            }
            tracing::debug!("input reader stopped");
        });

        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Stops the thread and joins it. Idempotent; returns within one
    /// poll interval.
    pub fn shutdown(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_widgets::{NullWidget, WidgetTree};

    fn root() -> WidgetId {
        let mut tree = WidgetTree::new();
        tree.insert_root(Box::new(NullWidget))
    }

    #[test]
    fn test_convert_key_press() {
        let raw = ct::Event::Key(ct::KeyEvent::new(
            ct::KeyCode::Char('a'),
            ct::KeyModifiers::CONTROL,
        ));
        let root = root();

        let event = convert(raw, root).unwrap();
        match event {
            Event::KeyPress { widget, key } => {
                assert_eq!(widget, root);
                assert_eq!(key.code, KeyCode::Char('a'));
                assert!(key.modifiers.ctrl);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_convert_mouse_press_and_wheel() {
        let root = root();
        let press = ct::Event::Mouse(ct::MouseEvent {
            kind: ct::MouseEventKind::Down(ct::MouseButton::Left),
            column: 7,
            row: 3,
            modifiers: ct::KeyModifiers::NONE,
        });
        match convert(press, root).unwrap() {
            Event::MousePress { button, position, .. } => {
                assert_eq!(button, MouseButton::Left);
                assert_eq!(position, Point::new(7, 3));
            }
            other => panic!("unexpected event: {other:?}"),
        }

        let wheel = ct::Event::Mouse(ct::MouseEvent {
            kind: ct::MouseEventKind::ScrollDown,
            column: 1,
            row: 1,
            modifiers: ct::KeyModifiers::NONE,
        });
        assert!(matches!(
            convert(wheel, root).unwrap(),
            Event::MouseWheel {
                direction: WheelDirection::Down,
                ..
            }
        ));
    }

    #[test]
    fn test_convert_resize() {
        let root = root();
        match convert(ct::Event::Resize(100, 40), root).unwrap() {
            Event::Resize { widget, new, .. } => {
                assert_eq!(widget, root);
                assert_eq!(new, Area::new(100, 40));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_unmodeled_events_are_dropped() {
        let root = root();
        assert!(convert(ct::Event::FocusGained, root).is_none());
    }
}
