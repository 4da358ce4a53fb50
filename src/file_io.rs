use crate::error::ExportError;
use crate::models::{HistoryEntry, Question};
use crate::quiz::QuizManager;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const SESSION_EXPORT_FILE: &str = "quiz-session.json";
pub const BANK_EXPORT_FILE: &str = "questions.json";

#[derive(Debug, Serialize)]
pub struct SessionExport<'a> {
    pub timestamp: String,
    pub score: u32,
    pub length: usize,
    pub history: &'a [HistoryEntry],
}

impl<'a> SessionExport<'a> {
    pub fn from_manager(manager: &'a QuizManager, at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            score: manager.score(),
            length: manager.len(),
            history: manager.history(),
        }
    }
}

pub fn write_json_pretty<T: Serialize + ?Sized>(
    dir: &Path,
    file_name: &str,
    value: &T,
) -> Result<PathBuf, ExportError> {
    let body = serde_json::to_string_pretty(value)?;
    let path = dir.join(file_name);

    fs::create_dir_all(dir).map_err(|source| ExportError::Write {
        path: dir.display().to_string(),
        source,
    })?;
    fs::write(&path, body).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;

    Ok(path)
}

pub fn write_session_export(dir: &Path, manager: &QuizManager) -> Result<PathBuf, ExportError> {
    let export = SessionExport::from_manager(manager, Utc::now());
    write_json_pretty(dir, SESSION_EXPORT_FILE, &export)
}

pub fn write_question_bank(dir: &Path, questions: &[Question]) -> Result<PathBuf, ExportError> {
    write_json_pretty(dir, BANK_EXPORT_FILE, questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Settings, Unanswered};
    use chrono::TimeZone;

    fn two_questions() -> Vec<Question> {
        vec![
            Question {
                question: "A?".to_string(),
                answers: vec!["x".to_string(), "y".to_string()],
                correct: 1,
                difficulty: None,
                score: None,
            },
            Question {
                question: "B?".to_string(),
                answers: vec!["x".to_string(), "y".to_string()],
                correct: 0,
                difficulty: Some("hard".to_string()),
                score: Some(3),
            },
        ]
    }

    #[test]
    fn test_session_export_shape() {
        let mut manager = QuizManager::new(two_questions(), Settings::default());
        manager.answer(1);
        manager.next();
        manager.record_unanswered(Unanswered::Skipped);

        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let export = SessionExport::from_manager(&manager, at);
        let value = serde_json::to_value(&export).unwrap();

        assert_eq!(value["timestamp"], "2024-05-01T12:30:00.000Z");
        assert_eq!(value["score"], 1);
        assert_eq!(value["length"], 2);
        assert_eq!(
            value["history"],
            serde_json::json!([
                {"index": 0, "chosen": 1, "correct": 1},
                {"index": 1, "chosen": null, "skipped": true}
            ])
        );
    }

    #[test]
    fn test_write_session_export() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut manager = QuizManager::new(two_questions(), Settings::default());
        manager.answer(0);

        let path = write_session_export(temp_dir.path(), &manager).unwrap();
        assert!(path.ends_with(SESSION_EXPORT_FILE));

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["score"], 0);
        assert_eq!(written["history"][0]["chosen"], 0);
        assert!(written["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_write_question_bank_round_trips() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_question_bank(temp_dir.path(), &two_questions()).unwrap();
        let loaded = crate::bank::load_bank(&path).unwrap();
        assert_eq!(loaded, two_questions());
    }

    #[test]
    fn test_write_creates_missing_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("exports").join("today");
        let path = write_json_pretty(&nested, "x.json", &serde_json::json!([])).unwrap();
        assert!(path.exists());
    }
}
