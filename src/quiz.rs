use crate::models::{HistoryEntry, Outcome, Question, Settings, Unanswered};
use rand::seq::SliceRandom;
use rand::Rng;

/// Question progression and scoring for one quiz run.
///
/// The manager only records what it is told. It does not stop the same
/// question from being answered twice; callers that want one answer per
/// question (the `QuizController` does) have to enforce that themselves.
#[derive(Debug, Clone)]
pub struct QuizManager {
    questions: Vec<Question>,
    settings: Settings,
    index: usize,
    score: u32,
    correct_count: usize,
    wrong_count: usize,
    history: Vec<HistoryEntry>,
}

impl QuizManager {
    pub fn new(questions: Vec<Question>, settings: Settings) -> Self {
        Self::with_rng(questions, settings, &mut rand::thread_rng())
    }

    /// Builds the manager, shuffling once with `rng` when `settings.shuffle` is set.
    pub fn with_rng<R: Rng + ?Sized>(
        mut questions: Vec<Question>,
        settings: Settings,
        rng: &mut R,
    ) -> Self {
        if settings.shuffle {
            questions.shuffle(rng);
        }

        Self {
            questions,
            settings,
            index: 0,
            score: 0,
            correct_count: 0,
            wrong_count: 0,
            history: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn wrong_count(&self) -> usize {
        self.wrong_count
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// The question at the current position.
    ///
    /// # Panics
    ///
    /// Panics when the quiz holds no questions. Check `is_empty()` first.
    pub fn current(&self) -> &Question {
        &self.questions[self.index]
    }

    pub fn answer(&mut self, choice_index: usize) -> Outcome {
        let question = &self.questions[self.index];
        let correct = question.correct;
        let is_correct = choice_index == correct;

        if is_correct {
            self.score = self.score.saturating_add(question.weight());
            self.correct_count += 1;
        } else {
            self.wrong_count += 1;
        }

        self.history
            .push(HistoryEntry::answered(self.index, choice_index, correct));

        Outcome {
            is_correct,
            correct_index: correct,
        }
    }

    /// Logs a question that got no answer. Score and counters are untouched.
    pub fn record_unanswered(&mut self, reason: Unanswered) {
        self.history
            .push(HistoryEntry::unanswered(self.index, reason));
    }

    /// Latest recorded choice for the question at `index`, if it was answered.
    pub fn answered_choice(&self, index: usize) -> Option<usize> {
        self.history
            .iter()
            .rev()
            .find(|entry| entry.index == index && entry.chosen.is_some())
            .and_then(|entry| entry.chosen)
    }

    pub fn can_next(&self) -> bool {
        self.index < self.questions.len().saturating_sub(1)
    }

    pub fn next(&mut self) -> &Question {
        if self.can_next() {
            self.index += 1;
        }
        self.current()
    }

    pub fn prev(&mut self) -> &Question {
        if self.index > 0 {
            self.index -= 1;
        }
        self.current()
    }

    /// 1-based completion percentage of the current position.
    pub fn progress(&self) -> u16 {
        if self.questions.is_empty() {
            return 0;
        }
        (((self.index + 1) as f64 / self.questions.len() as f64) * 100.0).round() as u16
    }
}
