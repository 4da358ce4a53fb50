use crate::bank::BankSource;
use crate::file_io::{write_question_bank, write_session_export};
use crate::logger;
use crate::models::{AppState, Feedback, Outcome, Question, Unanswered};
use crate::quiz::QuizManager;
use crate::timer::{start_countdown, Countdown, TimerEvent, TimerHandle, EXPIRY_GRACE, TICK};
use crossbeam_channel::Sender;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

// Shared by all controllers so a new quiz never matches events left over from an old one
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Finished,
}

/// One quiz run: the state machine plus everything the screen needs around it.
///
/// Created when a quiz starts and dropped when it ends. Dropping it cancels
/// the running countdown.
#[derive(Debug)]
pub struct QuizController {
    pub manager: QuizManager,
    pub deck_name: String,
    pub source: BankSource,
    pub selected: Option<usize>,
    pub last_outcome: Option<Outcome>,
    pub feedback: Option<Feedback>,
    pub time_left: Option<u32>,
    pub timed_out: bool,
    pub status: Option<String>,
    bank: Vec<Question>,
    export_dir: PathBuf,
    generation: u64,
    timer: Option<TimerHandle>,
    events: Sender<TimerEvent>,
    tick: Duration,
    grace: Duration,
}

impl QuizController {
    /// Wraps `manager` and shows its first question. `bank` is the question
    /// list in its original order, used when exporting the bank.
    pub fn new(
        manager: QuizManager,
        bank: Vec<Question>,
        source: BankSource,
        export_dir: PathBuf,
        events: Sender<TimerEvent>,
    ) -> Self {
        Self::with_timing(manager, bank, source, export_dir, events, TICK, EXPIRY_GRACE)
    }

    pub fn with_timing(
        manager: QuizManager,
        bank: Vec<Question>,
        source: BankSource,
        export_dir: PathBuf,
        events: Sender<TimerEvent>,
        tick: Duration,
        grace: Duration,
    ) -> Self {
        let deck_name = source.name();
        let mut controller = Self {
            manager,
            deck_name,
            source,
            selected: None,
            last_outcome: None,
            feedback: None,
            time_left: None,
            timed_out: false,
            status: None,
            bank,
            export_dir,
            generation: 0,
            timer: None,
            events,
            tick,
            grace,
        };
        logger::log(&format!(
            "Quiz started: {} ({} questions)",
            controller.deck_name,
            controller.manager.len()
        ));
        controller.enter_question();
        controller
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn bank(&self) -> &[Question] {
        &self.bank
    }

    /// Resets per-question state after the position changed. An already
    /// answered question comes back locked with its recorded choice.
    fn enter_question(&mut self) {
        self.stop_timer();
        self.generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        self.feedback = None;
        self.time_left = None;
        self.timed_out = false;

        let index = self.manager.index();
        self.selected = self.manager.answered_choice(index);
        self.last_outcome = self.selected.map(|chosen| {
            let correct_index = self.manager.current().correct;
            Outcome {
                is_correct: chosen == correct_index,
                correct_index,
            }
        });

        if self.selected.is_none() {
            self.start_timer(self.manager.settings().per_question_time);
        }
    }

    fn start_timer(&mut self, seconds: u32) {
        self.stop_timer();
        if seconds == 0 {
            return;
        }

        let countdown = Countdown {
            seconds,
            tick: self.tick,
            grace: self.grace,
        };
        self.time_left = Some(seconds);
        self.timer = start_countdown(countdown, self.generation, self.events.clone());
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.cancel();
        }
    }

    /// Stops the countdown and drops any events it already queued. The
    /// remaining time is kept for `resume`.
    pub fn pause(&mut self) {
        self.stop_timer();
        self.generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
    }

    /// Restarts the countdown from the time left at `pause`. A question that
    /// timed out before the pause advances right away.
    pub fn resume(&mut self) -> Flow {
        if self.timed_out {
            return self.go_next();
        }
        match self.time_left {
            Some(0) if self.selected.is_none() => {
                self.expire();
                self.go_next()
            }
            Some(remaining) if self.selected.is_none() => {
                self.start_timer(remaining);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }

    /// Answers the current question once. Further choices, choices after a
    /// timeout and choices past the last option are ignored.
    pub fn choose(&mut self, choice: usize) -> Option<Outcome> {
        if self.selected.is_some() || self.timed_out {
            return None;
        }
        if choice >= self.manager.current().answers.len() {
            return None;
        }

        self.stop_timer();
        let outcome = self.manager.answer(choice);
        self.selected = Some(choice);
        self.last_outcome = Some(outcome);
        self.feedback = Some(if outcome.is_correct {
            Feedback::Correct
        } else {
            Feedback::Wrong
        });
        logger::log(&format!(
            "Question {} answered with {} (correct: {})",
            self.manager.index() + 1,
            choice + 1,
            outcome.is_correct
        ));
        Some(outcome)
    }

    pub fn go_next(&mut self) -> Flow {
        if self.manager.can_next() {
            self.manager.next();
            self.enter_question();
            Flow::Continue
        } else {
            self.finish();
            Flow::Finished
        }
    }

    pub fn go_prev(&mut self) {
        if self.manager.index() == 0 {
            return;
        }
        self.manager.prev();
        self.enter_question();
    }

    pub fn skip(&mut self) -> Flow {
        if self.selected.is_none() && !self.timed_out {
            self.manager.record_unanswered(Unanswered::Skipped);
            logger::log(&format!("Question {} skipped", self.manager.index() + 1));
        }
        self.go_next()
    }

    pub fn on_timer_event(&mut self, event: TimerEvent) -> Flow {
        if event.generation() != self.generation {
            return Flow::Continue;
        }

        match event {
            TimerEvent::Tick { remaining, .. } => {
                self.time_left = Some(remaining);
                Flow::Continue
            }
            TimerEvent::Expired { .. } => {
                self.expire();
                Flow::Continue
            }
            TimerEvent::Advance { .. } => self.go_next(),
        }
    }

    fn expire(&mut self) {
        self.time_left = Some(0);
        self.timed_out = true;
        self.feedback = Some(Feedback::TimeUp);
        self.manager.record_unanswered(Unanswered::TimedOut);
        logger::log(&format!("Question {} timed out", self.manager.index() + 1));
    }

    pub fn finish(&mut self) {
        self.stop_timer();
        logger::log(&format!(
            "Quiz finished: score {} / {}",
            self.manager.score(),
            self.manager.len()
        ));
    }

    /// Final score as a percentage of the question count.
    pub fn result_percent(&self) -> u32 {
        if self.manager.is_empty() {
            return 0;
        }
        ((self.manager.score() as f64 / self.manager.len() as f64) * 100.0).round() as u32
    }

    pub fn export_session(&mut self) {
        self.status = Some(match write_session_export(&self.export_dir, &self.manager) {
            Ok(path) => {
                logger::log(&format!("Session exported to {}", path.display()));
                format!("Session saved to {}", path.display())
            }
            Err(e) => {
                logger::log(&format!("Session export failed: {}", e));
                format!("Export failed: {}", e)
            }
        });
    }

    pub fn download_bank(&mut self) {
        self.status = Some(match write_question_bank(&self.export_dir, &self.bank) {
            Ok(path) => {
                logger::log(&format!("Question bank written to {}", path.display()));
                format!("Questions saved to {}", path.display())
            }
            Err(e) => {
                logger::log(&format!("Question bank export failed: {}", e));
                format!("Download failed: {}", e)
            }
        });
    }
}

pub fn handle_quiz_input(controller: &mut QuizController, key: KeyEvent, app_state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            controller.pause();
            *app_state = AppState::QuizQuitConfirm;
        }
        KeyCode::Char(c @ '1'..='9') => {
            let choice = c as usize - '1' as usize;
            controller.choose(choice);
        }
        KeyCode::Enter | KeyCode::Char('n') => {
            if controller.is_answered() && controller.go_next() == Flow::Finished {
                *app_state = AppState::Results;
            }
        }
        KeyCode::Left | KeyCode::Char('p') => {
            controller.go_prev();
        }
        KeyCode::Char('s') => {
            if controller.skip() == Flow::Finished {
                *app_state = AppState::Results;
            }
        }
        KeyCode::Char('d') => {
            controller.download_bank();
        }
        _ => {}
    }
}
