use crate::db::local_storage;
use crate::error::BankError;
use crate::logger;
use crate::models::Question;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

pub const LOCAL_BANK_KEY: &str = "quiz.questions";
pub const DEFAULT_BANK_FILE: &str = "questions.json";

pub const SAMPLE_BANK: &str = r#"[
  {
    "question": "Which sentence is grammatically correct?",
    "answers": ["He go to school.", "He goes to school.", "He going to school.", "He gone to school."],
    "correct": 1,
    "difficulty": "easy"
  },
  {
    "question": "Choose the past form of 'teach'.",
    "answers": ["teached", "taught", "teach", "took"],
    "correct": 1,
    "difficulty": "medium"
  }
]"#;

#[derive(Debug, Clone, PartialEq)]
pub enum BankSource {
    File(PathBuf),
    Local,
}

impl BankSource {
    pub fn name(&self) -> String {
        match self {
            BankSource::File(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
            BankSource::Local => "Saved bank (local storage)".to_string(),
        }
    }

    pub fn load(&self, conn: Option<&Connection>) -> Result<Vec<Question>, BankError> {
        let questions = match self {
            BankSource::File(path) => load_bank(path)?,
            BankSource::Local => {
                let conn = conn.ok_or(BankError::StorageUnavailable)?;
                load_local_bank(conn)?.ok_or(BankError::Empty)?
            }
        };
        logger::log(&format!(
            "Loaded {} questions from {}",
            questions.len(),
            self.name()
        ));
        Ok(questions)
    }
}

pub fn get_bank_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

/// File banks from `dir`, followed by the locally stored bank when one exists.
pub fn list_sources(dir: &Path, conn: Option<&Connection>) -> Vec<BankSource> {
    let mut sources: Vec<BankSource> = get_bank_files(dir)
        .into_iter()
        .map(BankSource::File)
        .collect();

    if let Some(conn) = conn
        && let Ok(Some(_)) = local_storage::get_item(conn, LOCAL_BANK_KEY)
    {
        sources.push(BankSource::Local);
    }

    sources
}

pub fn load_bank(path: &Path) -> Result<Vec<Question>, BankError> {
    let content = fs::read_to_string(path).map_err(|source| BankError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_bank(&content)
}

pub fn parse_bank(content: &str) -> Result<Vec<Question>, BankError> {
    Ok(serde_json::from_str(content)?)
}

pub fn load_local_bank(conn: &Connection) -> Result<Option<Vec<Question>>, BankError> {
    match local_storage::get_item(conn, LOCAL_BANK_KEY)? {
        Some(raw) => Ok(Some(parse_bank(&raw)?)),
        None => Ok(None),
    }
}
