pub mod admin;
pub mod bank;
pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod file_io;
pub mod logger;
pub mod models;
pub mod quiz;
pub mod timer;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use admin::{handle_admin_input, AdminEditor};
pub use bank::{list_sources, load_bank, parse_bank, BankSource};
pub use config::AppConfig;
pub use controller::{handle_quiz_input, Flow, QuizController};
pub use error::{BankError, ExportError};
pub use models::{AppState, HistoryEntry, Outcome, Question, Settings};
pub use quiz::QuizManager;
pub use timer::TimerEvent;
pub use ui::{draw_admin, draw_menu, draw_quit_confirmation, draw_quiz, draw_results};
