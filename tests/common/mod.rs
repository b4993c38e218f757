//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::NamedTempFile;
use twenty48::{BoardSize, Console, DbError, GameError, NewResultRecord, ResultRecord, ResultRepository, ResultStore};

/// Console fed from scripted answers that records everything written.
///
/// When the scripted keys run out, `cycle` is replayed forever; without a
/// cycle, reads report the input as closed, or as interrupted once
/// `interrupt_when_done` is set.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    pub lines: VecDeque<Result<String, GameError>>,
    pub keys: VecDeque<KeyEvent>,
    pub cycle: Vec<KeyEvent>,
    cycle_pos: usize,
    pub interrupt_when_done: bool,
    pub output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| Ok(l.to_string())).collect(),
            ..Self::default()
        }
    }

    pub fn with_keys(mut self, keys: &[KeyCode]) -> Self {
        self.keys = keys.iter().map(|&code| press(code)).collect();
        self
    }

    pub fn with_cycle(mut self, keys: &[KeyCode]) -> Self {
        self.cycle = keys.iter().map(|&code| press(code)).collect();
        self
    }

    pub fn interrupted(mut self) -> Self {
        self.interrupt_when_done = true;
        self
    }

    fn exhausted(&self) -> GameError {
        if self.interrupt_when_done {
            GameError::Interrupted
        } else {
            GameError::InputClosed
        }
    }

    /// Index of the first output line equal to `needle`.
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.output.iter().position(|line| line == needle)
    }

    /// True if any output line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }
}

#[async_trait::async_trait]
impl Console for ScriptedConsole {
    async fn send(&mut self, line: &str) -> Result<(), GameError> {
        self.output.push(line.to_string());
        Ok(())
    }

    async fn read_line(&mut self) -> Result<String, GameError> {
        match self.lines.pop_front() {
            Some(line) => line,
            None => Err(self.exhausted()),
        }
    }

    async fn read_key(&mut self) -> Result<KeyEvent, GameError> {
        if let Some(key) = self.keys.pop_front() {
            return Ok(key);
        }
        if self.cycle.is_empty() {
            return Err(self.exhausted());
        }
        let key = self.cycle[self.cycle_pos % self.cycle.len()];
        self.cycle_pos += 1;
        Ok(key)
    }
}

/// Result store whose every call fails.
#[derive(Debug, Default)]
pub struct FailingStore;

impl ResultStore for FailingStore {
    fn record(&self, _result: &NewResultRecord) -> Result<ResultRecord, DbError> {
        Err(DbError::new("disk full"))
    }

    fn top_three(&self, _size: BoardSize) -> Result<Vec<ResultRecord>, DbError> {
        Err(DbError::new("disk full"))
    }
}

pub fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Temporary database with the schema applied. Keep the file handle alive.
pub fn setup_test_db() -> (NamedTempFile, ResultRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = ResultRepository::open(db_path).expect("Failed to open repository");
    (db_file, repo)
}
