use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub answers: Vec<String>,
    pub correct: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl Question {
    /// Points awarded for a correct answer. Missing or zero weights count as 1.
    pub fn weight(&self) -> u32 {
        self.score.filter(|s| *s > 0).unwrap_or(1)
    }

    pub fn difficulty_label(&self) -> &str {
        self.difficulty.as_deref().unwrap_or("medium")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub per_question_time: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub is_correct: bool,
    pub correct_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unanswered {
    Skipped,
    TimedOut,
}

/// One line of the answer log. `chosen == None` means the question was
/// skipped or ran out of time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub index: usize,
    pub chosen: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<usize>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub skipped: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub timedout: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl HistoryEntry {
    pub fn answered(index: usize, chosen: usize, correct: usize) -> Self {
        Self {
            index,
            chosen: Some(chosen),
            correct: Some(correct),
            skipped: false,
            timedout: false,
        }
    }

    pub fn unanswered(index: usize, reason: Unanswered) -> Self {
        Self {
            index,
            chosen: None,
            correct: None,
            skipped: reason == Unanswered::Skipped,
            timedout: reason == Unanswered::TimedOut,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Wrong,
    TimeUp,
}

impl Feedback {
    pub fn message(&self) -> &'static str {
        match self {
            Feedback::Correct => "Correct!",
            Feedback::Wrong => "Wrong answer",
            Feedback::TimeUp => "Time up — moving to next question",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Quiz,
    QuizQuitConfirm,
    Results,
    Admin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_defaults_from_json() {
        let q: Question =
            serde_json::from_str(r#"{"question":"A?","answers":["x","y"],"correct":1}"#).unwrap();
        assert_eq!(q.weight(), 1);
        assert_eq!(q.difficulty_label(), "medium");
        assert!(q.difficulty.is_none());
    }

    #[test]
    fn test_question_weight_zero_falls_back_to_one() {
        let q = Question {
            question: "Q".to_string(),
            answers: vec!["a".to_string(), "b".to_string()],
            correct: 0,
            difficulty: Some("hard".to_string()),
            score: Some(0),
        };
        assert_eq!(q.weight(), 1);
        assert_eq!(q.difficulty_label(), "hard");
    }

    #[test]
    fn test_settings_camel_case() {
        let s: Settings = serde_json::from_str(r#"{"shuffle":true,"perQuestionTime":30}"#).unwrap();
        assert!(s.shuffle);
        assert_eq!(s.per_question_time, 30);
    }

    #[test]
    fn test_history_entry_serialization() {
        let answered = serde_json::to_value(HistoryEntry::answered(0, 2, 1)).unwrap();
        assert_eq!(answered, serde_json::json!({"index": 0, "chosen": 2, "correct": 1}));

        let skipped = serde_json::to_value(HistoryEntry::unanswered(3, Unanswered::Skipped)).unwrap();
        assert_eq!(
            skipped,
            serde_json::json!({"index": 3, "chosen": null, "skipped": true})
        );

        let timed = serde_json::to_value(HistoryEntry::unanswered(4, Unanswered::TimedOut)).unwrap();
        assert_eq!(
            timed,
            serde_json::json!({"index": 4, "chosen": null, "timedout": true})
        );
    }
}
