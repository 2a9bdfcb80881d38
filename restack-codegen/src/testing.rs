//! Test utilities for renderers.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::path::Path;

use eyre::Result;

use crate::{Backend, Line};

/// One call made on a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StartFile { package: String, header: Vec<String> },
    Import(String),
    Comment(String),
    Line(Line),
    Blank,
    OpenBlock(Line),
    ContinueBlock(Line),
    CloseBlock,
    Indent,
    Dedent,
}

/// Backend that records calls instead of producing text.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    pub events: Vec<Event>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks opened and not yet closed.
    pub fn open_blocks(&self) -> isize {
        self.events.iter().fold(0, |depth, event| match event {
            Event::OpenBlock(_) => depth + 1,
            Event::CloseBlock => depth - 1,
            _ => depth,
        })
    }

    pub fn imports(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Import(path) => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Backend for RecordingBackend {
    fn start_file(&mut self, package: &str, header: &[String]) {
        self.events.push(Event::StartFile {
            package: package.to_string(),
            header: header.to_vec(),
        });
    }

    fn import(&mut self, path: &str) {
        self.events.push(Event::Import(path.to_string()));
    }

    fn comment(&mut self, text: &str) {
        self.events.push(Event::Comment(text.to_string()));
    }

    fn line(&mut self, line: Line) {
        self.events.push(Event::Line(line));
    }

    fn blank(&mut self) {
        self.events.push(Event::Blank);
    }

    fn open_block(&mut self, header: Line) {
        self.events.push(Event::OpenBlock(header));
    }

    fn continue_block(&mut self, header: Line) {
        self.events.push(Event::ContinueBlock(header));
    }

    fn close_block(&mut self) {
        self.events.push(Event::CloseBlock);
    }

    fn indent(&mut self) {
        self.events.push(Event::Indent);
    }

    fn dedent(&mut self) {
        self.events.push(Event::Dedent);
    }
}

/// Assert that two strings are equal, with a line diff on failure.
pub fn assert_content_eq(expected: &str, actual: &str) {
    if expected != actual {
        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut diff = String::new();
        let max_lines = expected_lines.len().max(actual_lines.len());

        for i in 0..max_lines {
            let exp = expected_lines.get(i).copied().unwrap_or("<missing>");
            let act = actual_lines.get(i).copied().unwrap_or("<missing>");

            if exp != act {
                diff.push_str(&format!("Line {}:\n", i + 1));
                diff.push_str(&format!("  expected: {exp:?}\n"));
                diff.push_str(&format!("  actual:   {act:?}\n"));
            }
        }

        panic!("Content mismatch:\n{diff}");
    }
}

/// Run `generate` against a fresh temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn generate_to_temp<F>(generate: F) -> Result<tempfile::TempDir>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let temp_dir = tempfile::TempDir::new()?;
    generate(temp_dir.path())?;
    Ok(temp_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_tracks_block_depth() {
        let mut backend = RecordingBackend::new();
        backend.open_block(Line::new().keyword("if"));
        backend.continue_block(Line::new().keyword("else"));
        assert_eq!(backend.open_blocks(), 1);
        backend.close_block();
        assert_eq!(backend.open_blocks(), 0);
    }

    #[test]
    #[should_panic(expected = "Line 2")]
    fn test_assert_content_eq_reports_line() {
        assert_content_eq("a\nb\n", "a\nc\n");
    }
}
