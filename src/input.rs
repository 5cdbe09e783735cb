//! Key bindings and the blocking key reader thread.

use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use crate::driver::Signal;
use crate::game::Input;

/// Maps a key press to a signal. Releases, repeats and unbound keys map to `None`.
pub fn key_to_signal(key: KeyEvent) -> Option<Signal> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let input = match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Some(Signal::Quit),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Input::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Input::Right,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Input::Down,
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Input::Rotate,
        KeyCode::Char('r') | KeyCode::Char('R') => Input::Restart,
        _ => return None,
    };
    Some(Signal::Input(input))
}

/// Reads terminal events on a background thread and forwards bound keys.
/// A read error is reported as `Signal::Quit`.
pub fn spawn_key_reader(tx: Sender<Signal>) -> JoinHandle<()> {
    thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(key)) => {
                if let Some(signal) = key_to_signal(key) {
                    if tx.send(signal).is_err() {
                        break;
                    }
                }
            }
            Ok(_) => {}
            Err(_) => {
                let _ = tx.send(Signal::Quit);
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn game_keys_map_to_inputs() {
        assert_eq!(key_to_signal(press(KeyCode::Char('a'))), Some(Signal::Input(Input::Left)));
        assert_eq!(key_to_signal(press(KeyCode::Char('d'))), Some(Signal::Input(Input::Right)));
        assert_eq!(key_to_signal(press(KeyCode::Char('s'))), Some(Signal::Input(Input::Down)));
        assert_eq!(key_to_signal(press(KeyCode::Char('w'))), Some(Signal::Input(Input::Rotate)));
        assert_eq!(key_to_signal(press(KeyCode::Char('r'))), Some(Signal::Input(Input::Restart)));
        assert_eq!(key_to_signal(press(KeyCode::Up)), Some(Signal::Input(Input::Rotate)));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(key_to_signal(press(KeyCode::Esc)), Some(Signal::Quit));
        assert_eq!(key_to_signal(press(KeyCode::Char('Q'))), Some(Signal::Quit));
    }

    #[test]
    fn unbound_and_released_keys_are_filtered() {
        assert_eq!(key_to_signal(press(KeyCode::Char('x'))), None);
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(key_to_signal(release), None);
    }
}
