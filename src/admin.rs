//! Raw JSON editor for the question bank.
//!
//! Only well-formedness is checked before saving; the shape of the
//! questions is left to whoever loads the bank.

use crate::bank::{LOCAL_BANK_KEY, SAMPLE_BANK};
use crate::db::local_storage;
use crate::error::{BankError, ExportError};
use crate::file_io::{write_json_pretty, BANK_EXPORT_FILE};
use crate::logger;
use crate::models::AppState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct AdminEditor {
    pub buffer: String,
    pub cursor_position: usize,
    pub scroll_y: u16,
    pub scroll_x: u16,
    pub status: Option<String>,
    export_dir: PathBuf,
}

impl AdminEditor {
    pub fn new(buffer: String, export_dir: PathBuf) -> Self {
        let cursor_position = buffer.len();
        Self {
            buffer,
            cursor_position,
            scroll_y: 0,
            scroll_x: 0,
            status: None,
            export_dir,
        }
    }

    pub fn open(conn: Option<&Connection>, default_bank: &Path, export_dir: PathBuf) -> Self {
        let mut editor = Self::new(initial_content(conn, default_bank), export_dir);
        editor.cursor_position = 0;
        editor
    }

    pub fn load_sample(&mut self) {
        self.buffer = SAMPLE_BANK.to_string();
        self.cursor_position = 0;
        self.scroll_y = 0;
        self.scroll_x = 0;
        self.status = Some("Sample questions loaded".to_string());
    }

    pub fn save_local(&mut self, conn: Option<&Connection>) -> Result<(), BankError> {
        let result = self.try_save_local(conn);
        self.status = Some(match &result {
            Ok(()) => format!("Saved to local storage as {}", LOCAL_BANK_KEY),
            Err(e) => e.to_string(),
        });
        result
    }

    fn try_save_local(&self, conn: Option<&Connection>) -> Result<(), BankError> {
        let parsed: serde_json::Value = serde_json::from_str(&self.buffer)?;
        let conn = conn.ok_or(BankError::StorageUnavailable)?;
        local_storage::set_item(conn, LOCAL_BANK_KEY, &serde_json::to_string(&parsed)?)?;
        logger::log("Question bank saved to local storage");
        Ok(())
    }

    pub fn download(&mut self) -> Result<PathBuf, ExportError> {
        let result = serde_json::from_str::<serde_json::Value>(&self.buffer)
            .map_err(ExportError::InvalidJson)
            .and_then(|parsed| write_json_pretty(&self.export_dir, BANK_EXPORT_FILE, &parsed));
        self.status = Some(match &result {
            Ok(path) => {
                logger::log(&format!("Question bank downloaded to {}", path.display()));
                format!("Saved {}", path.display())
            }
            Err(e) => e.to_string(),
        });
        result
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    pub fn insert_str(&mut self, s: &str) {
        self.buffer.insert_str(self.cursor_position, s);
        self.cursor_position += s.len();
    }

    pub fn backspace(&mut self) {
        if let Some(c) = self.buffer[..self.cursor_position].chars().next_back() {
            self.cursor_position -= c.len_utf8();
            self.buffer.remove(self.cursor_position);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_position < self.buffer.len() {
            self.buffer.remove(self.cursor_position);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(c) = self.buffer[..self.cursor_position].chars().next_back() {
            self.cursor_position -= c.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.buffer[self.cursor_position..].chars().next() {
            self.cursor_position += c.len_utf8();
        }
    }

    fn line_start(&self, pos: usize) -> usize {
        self.buffer[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
    }

    fn line_end(&self, pos: usize) -> usize {
        self.buffer[pos..]
            .find('\n')
            .map(|i| pos + i)
            .unwrap_or(self.buffer.len())
    }

    /// Byte offset of column `col` (in chars) on the line starting at `start`,
    /// clamped to the end of that line.
    fn offset_in_line(&self, start: usize, col: usize) -> usize {
        let end = self.line_end(start);
        self.buffer[start..end]
            .char_indices()
            .nth(col)
            .map(|(i, _)| start + i)
            .unwrap_or(end)
    }

    pub fn move_home(&mut self) {
        self.cursor_position = self.line_start(self.cursor_position);
    }

    pub fn move_end(&mut self) {
        self.cursor_position = self.line_end(self.cursor_position);
    }

    pub fn move_up(&mut self) {
        let start = self.line_start(self.cursor_position);
        if start == 0 {
            return;
        }
        let col = self.buffer[start..self.cursor_position].chars().count();
        let prev_start = self.line_start(start - 1);
        self.cursor_position = self.offset_in_line(prev_start, col);
    }

    pub fn move_down(&mut self) {
        let end = self.line_end(self.cursor_position);
        if end == self.buffer.len() {
            return;
        }
        let start = self.line_start(self.cursor_position);
        let col = self.buffer[start..self.cursor_position].chars().count();
        self.cursor_position = self.offset_in_line(end + 1, col);
    }
}

/// Locally saved bank first, then the bank file, then the built-in sample.
pub fn initial_content(conn: Option<&Connection>, default_bank: &Path) -> String {
    if let Some(conn) = conn
        && let Ok(Some(raw)) = local_storage::get_item(conn, LOCAL_BANK_KEY)
    {
        return serde_json::from_str::<serde_json::Value>(&raw)
            .ok()
            .and_then(|value| serde_json::to_string_pretty(&value).ok())
            .unwrap_or(raw);
    }

    fs::read_to_string(default_bank).unwrap_or_else(|_| SAMPLE_BANK.to_string())
}

pub fn handle_admin_input(
    editor: &mut AdminEditor,
    key: KeyEvent,
    app_state: &mut AppState,
    conn: Option<&Connection>,
) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('l') => editor.load_sample(),
            KeyCode::Char('s') => {
                if let Err(e) = editor.save_local(conn) {
                    logger::log(&format!("Admin save failed: {}", e));
                }
            }
            KeyCode::Char('d') => {
                if let Err(e) = editor.download() {
                    logger::log(&format!("Admin download failed: {}", e));
                }
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => *app_state = AppState::Menu,
        KeyCode::Enter => editor.insert_char('\n'),
        KeyCode::Tab => editor.insert_str("  "),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => editor.move_left(),
        KeyCode::Right => editor.move_right(),
        KeyCode::Up => editor.move_up(),
        KeyCode::Down => editor.move_down(),
        KeyCode::Home => editor.move_home(),
        KeyCode::End => editor.move_end(),
        KeyCode::Char(c) => editor.insert_char(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::load_local_bank;
    use crate::db::open_db;

    fn editor(text: &str) -> (AdminEditor, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let editor = AdminEditor::new(text.to_string(), temp_dir.path().to_path_buf());
        (editor, temp_dir)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_initial_content_prefers_local_storage() {
        let temp_dir = tempfile::tempdir().unwrap();
        let conn = open_db(&temp_dir.path().join("test.db")).unwrap();
        let bank_path = temp_dir.path().join("questions.json");
        fs::write(&bank_path, "[1]").unwrap();

        assert_eq!(initial_content(Some(&conn), &bank_path), "[1]");

        local_storage::set_item(&conn, LOCAL_BANK_KEY, "[2]").unwrap();
        assert_eq!(initial_content(Some(&conn), &bank_path), "[\n  2\n]");
    }

    #[test]
    fn test_initial_content_falls_back_to_sample() {
        let content = initial_content(None, Path::new("missing/questions.json"));
        assert_eq!(content, SAMPLE_BANK);
    }

    #[test]
    fn test_save_local_valid_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let conn = open_db(&temp_dir.path().join("test.db")).unwrap();
        let (mut editor, _dir) = editor(SAMPLE_BANK);

        editor.save_local(Some(&conn)).unwrap();
        assert_eq!(
            editor.status.as_deref(),
            Some("Saved to local storage as quiz.questions")
        );
        assert_eq!(load_local_bank(&conn).unwrap().unwrap().len(), 2);
    }

    #[test]
    fn test_save_local_rejects_invalid_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let conn = open_db(&temp_dir.path().join("test.db")).unwrap();
        let (mut editor, _dir) = editor("[{");

        assert!(editor.save_local(Some(&conn)).is_err());
        assert!(editor.status.as_deref().unwrap().starts_with("Invalid JSON: "));
        assert_eq!(local_storage::get_item(&conn, LOCAL_BANK_KEY).unwrap(), None);
    }

    #[test]
    fn test_save_local_accepts_any_well_formed_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let conn = open_db(&temp_dir.path().join("test.db")).unwrap();
        let (mut editor, _dir) = editor("{\"not\": \"a bank\"}");

        assert!(editor.save_local(Some(&conn)).is_ok());
        assert_eq!(
            local_storage::get_item(&conn, LOCAL_BANK_KEY).unwrap(),
            Some("{\"not\":\"a bank\"}".to_string())
        );
    }

    #[test]
    fn test_download_pretty_prints() {
        let (mut editor, dir) = editor("[1,2]");
        let path = editor.download().unwrap();
        assert_eq!(path, dir.path().join("questions.json"));
        assert_eq!(fs::read_to_string(path).unwrap(), "[\n  1,\n  2\n]");
    }

    #[test]
    fn test_download_invalid_json() {
        let (mut editor, dir) = editor("nope");
        assert!(matches!(editor.download(), Err(ExportError::InvalidJson(_))));
        assert!(!dir.path().join("questions.json").exists());
        assert!(editor.status.as_deref().unwrap().starts_with("Invalid JSON: "));
    }

    #[test]
    fn test_typing_and_backspace() {
        let (mut editor, _dir) = editor("");
        let mut state = AppState::Admin;
        for c in "[é]".chars() {
            handle_admin_input(&mut editor, KeyEvent::new(KeyCode::Char(c), KeyModifiers::empty()), &mut state, None);
        }
        assert_eq!(editor.buffer, "[é]");
        assert_eq!(editor.cursor_position, editor.buffer.len());

        editor.move_left();
        editor.backspace();
        assert_eq!(editor.buffer, "[]");
        assert_eq!(editor.cursor_position, 1);

        editor.delete();
        assert_eq!(editor.buffer, "[");
        editor.backspace();
        editor.backspace();
        assert_eq!(editor.buffer, "");
        assert_eq!(editor.cursor_position, 0);
    }

    #[test]
    fn test_vertical_movement_clamps_column() {
        let (mut editor, _dir) = editor("abcdef\nxy\nlonger line");
        editor.cursor_position = 5;
        editor.move_down();
        assert_eq!(editor.cursor_position, 9);
        editor.move_down();
        assert_eq!(editor.cursor_position, 12);
        editor.move_up();
        assert_eq!(editor.cursor_position, 9);
        editor.move_up();
        assert_eq!(editor.cursor_position, 2);
        editor.move_up();
        assert_eq!(editor.cursor_position, 2);

        editor.move_end();
        assert_eq!(editor.cursor_position, 6);
        editor.move_home();
        assert_eq!(editor.cursor_position, 0);
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let temp_dir = tempfile::tempdir().unwrap();
        let conn = open_db(&temp_dir.path().join("test.db")).unwrap();
        let (mut editor, dir) = editor("");
        let mut state = AppState::Admin;

        handle_admin_input(&mut editor, ctrl('l'), &mut state, Some(&conn));
        assert_eq!(editor.buffer, SAMPLE_BANK);

        handle_admin_input(&mut editor, ctrl('s'), &mut state, Some(&conn));
        assert!(local_storage::get_item(&conn, LOCAL_BANK_KEY).unwrap().is_some());

        handle_admin_input(&mut editor, ctrl('d'), &mut state, Some(&conn));
        assert!(dir.path().join("questions.json").exists());

        handle_admin_input(&mut editor, KeyEvent::new(KeyCode::Esc, KeyModifiers::empty()), &mut state, None);
        assert_eq!(state, AppState::Menu);
    }

    #[test]
    fn test_ctrl_shortcuts_report_invalid_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let conn = open_db(&temp_dir.path().join("test.db")).unwrap();
        let (mut editor, dir) = editor("[{");
        let mut state = AppState::Admin;

        handle_admin_input(&mut editor, ctrl('s'), &mut state, Some(&conn));
        assert!(editor.status.as_deref().unwrap().starts_with("Invalid JSON"));
        assert!(local_storage::get_item(&conn, LOCAL_BANK_KEY).unwrap().is_none());

        editor.status = None;
        handle_admin_input(&mut editor, ctrl('d'), &mut state, Some(&conn));
        assert!(editor.status.as_deref().unwrap().starts_with("Invalid JSON"));
        assert!(!dir.path().join("questions.json").exists());
        assert_eq!(state, AppState::Admin);
    }
}
