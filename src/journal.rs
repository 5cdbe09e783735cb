//! Transition journal: one JSON object per line, appended after every fold.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::game::{GameEvent, GameState, Input, Phase};
use crate::piece::TetrominoType;

#[derive(Debug, Clone, Serialize)]
pub struct TransitionRecord {
    pub step: u64,
    pub input: Input,
    pub event: GameEvent,
    pub random: f64,
    pub x: i32,
    pub y: i32,
    pub score: u32,
    pub high_score: u32,
    pub phase: Phase,
    pub current: TetrominoType,
    pub next: TetrominoType,
}

impl TransitionRecord {
    pub fn new(step: u64, input: Input, event: GameEvent, random: f64, state: &GameState) -> Self {
        Self {
            step,
            input,
            event,
            random,
            x: state.x,
            y: state.y,
            score: state.score,
            high_score: state.high_score,
            phase: state.phase,
            current: state.current_kind(),
            next: state.next_kind(),
        }
    }
}

pub struct Journal {
    out: Box<dyn Write + Send>,
}

impl Journal {
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self { out: Box::new(out) }
    }

    /// Opens `path` for appending, creating it if needed.
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening journal {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }

    pub fn record(&mut self, record: &TransitionRecord) -> Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn records_are_json_lines() {
        let buf = SharedBuf::default();
        let mut journal = Journal::new(buf.clone());

        let state = GameState::new();
        let (next, event) = state.step_with_event(Input::Down, 3.0);
        journal.record(&TransitionRecord::new(1, Input::Down, event, 3.0, &next)).unwrap();
        let (landed, event) = next.step_with_event(Input::Restart, 0.0);
        journal.record(&TransitionRecord::new(2, Input::Restart, event, 0.0, &landed)).unwrap();

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["input"], "down");
        assert_eq!(lines[0]["event"]["kind"], "moved");
        assert_eq!(lines[0]["y"], 0);
        assert_eq!(lines[0]["phase"], "playing");
        assert_eq!(lines[1]["event"]["kind"], "restarted");
        assert_eq!(lines[1]["current"], "O");
    }

    #[test]
    fn landed_event_carries_line_count() {
        let value = serde_json::to_value(GameEvent::Landed { lines: 2 }).unwrap();
        assert_eq!(value["kind"], "landed");
        assert_eq!(value["lines"], 2);
    }
}
