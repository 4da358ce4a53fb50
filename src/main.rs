use crossbeam_channel::{unbounded, Receiver, Sender};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use quiz_runner::{
    db, draw_admin, draw_menu, draw_quit_confirmation, draw_quiz, draw_results,
    handle_admin_input, handle_quiz_input, list_sources, logger, AdminEditor, AppConfig, AppState,
    BankSource, Flow, QuizController, QuizManager, TimerEvent,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rusqlite::Connection;
use std::io;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

struct MenuState {
    sources: Vec<BankSource>,
    selected: usize,
    status: Option<String>,
}

impl MenuState {
    fn refresh(&mut self, config: &AppConfig, conn: Option<&Connection>) {
        self.sources = list_sources(&config.bank_dir, conn);
        self.selected = self.selected.min(self.sources.len().saturating_sub(1));
    }
}

fn start_quiz(
    source: &BankSource,
    config: &AppConfig,
    conn: Option<&Connection>,
    events: &Sender<TimerEvent>,
) -> Result<QuizController, String> {
    let bank = source.load(conn).map_err(|e| e.to_string())?;
    if bank.is_empty() {
        return Err("Question bank is empty".to_string());
    }

    let manager = QuizManager::new(bank.clone(), config.settings);
    Ok(QuizController::new(
        manager,
        bank,
        source.clone(),
        config.export_dir.clone(),
        events.clone(),
    ))
}

/// Applies pending countdown events. Returns true when the quiz ran out of questions.
fn drain_timer_events(controller: &mut QuizController, events: &Receiver<TimerEvent>) -> bool {
    while let Ok(event) = events.try_recv() {
        if controller.on_timer_event(event) == Flow::Finished {
            return true;
        }
    }
    false
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

fn main() -> io::Result<()> {
    let config = AppConfig::from_env();
    logger::init(&config.log_file);
    logger::log("=== Application Started ===");

    let conn = match db::init_db() {
        Ok(conn) => Some(conn),
        Err(e) => {
            logger::log(&format!("Local storage unavailable: {}", e));
            None
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &config, conn.as_ref());

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    logger::log("=== Application Exited ===");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &AppConfig,
    conn: Option<&Connection>,
) -> io::Result<()> {
    let (timer_tx, timer_rx) = unbounded::<TimerEvent>();

    let mut app_state = AppState::Menu;
    let mut menu = MenuState {
        sources: Vec::new(),
        selected: 0,
        status: None,
    };
    menu.refresh(config, conn);
    let mut quiz: Option<QuizController> = None;
    let mut editor: Option<AdminEditor> = None;

    loop {
        if app_state == AppState::Quiz
            && let Some(controller) = quiz.as_mut()
            && drain_timer_events(controller, &timer_rx)
        {
            app_state = AppState::Results;
        }

        terminal.draw(|f| match app_state {
            AppState::Menu => draw_menu(
                f,
                &menu.sources,
                menu.selected,
                &config.settings,
                menu.status.as_deref(),
            ),
            AppState::Quiz => {
                if let Some(controller) = &quiz {
                    draw_quiz(f, controller);
                }
            }
            AppState::QuizQuitConfirm => {
                if let Some(controller) = &quiz {
                    draw_quiz(f, controller);
                    draw_quit_confirmation(f, controller);
                }
            }
            AppState::Results => {
                if let Some(controller) = &quiz {
                    draw_results(f, controller);
                }
            }
            AppState::Admin => {
                if let Some(editor) = editor.as_mut() {
                    draw_admin(f, editor);
                }
            }
        })?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if is_ctrl_c(&key) {
            break;
        }

        match app_state {
            AppState::Menu => match key.code {
                KeyCode::Up => {
                    menu.selected = menu.selected.saturating_sub(1);
                }
                KeyCode::Down => {
                    if menu.selected < menu.sources.len().saturating_sub(1) {
                        menu.selected += 1;
                    }
                }
                KeyCode::Enter => {
                    if let Some(source) = menu.sources.get(menu.selected) {
                        match start_quiz(source, config, conn, &timer_tx) {
                            Ok(controller) => {
                                menu.status = None;
                                quiz = Some(controller);
                                app_state = AppState::Quiz;
                            }
                            Err(e) => {
                                logger::log(&format!("Failed to start quiz: {}", e));
                                menu.status = Some(e);
                            }
                        }
                    }
                }
                KeyCode::Char('a') => {
                    editor = Some(AdminEditor::open(
                        conn,
                        &config.default_bank_path(),
                        config.export_dir.clone(),
                    ));
                    app_state = AppState::Admin;
                }
                KeyCode::Char('q') | KeyCode::Esc => break,
                _ => {}
            },
            AppState::Quiz => {
                if let Some(controller) = quiz.as_mut() {
                    handle_quiz_input(controller, key, &mut app_state);
                }
            }
            AppState::QuizQuitConfirm => match key.code {
                KeyCode::Char('y') => {
                    logger::log("Quiz abandoned");
                    quiz = None;
                    app_state = AppState::Menu;
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    app_state = match quiz.as_mut().map(QuizController::resume) {
                        Some(Flow::Finished) => AppState::Results,
                        _ => AppState::Quiz,
                    };
                }
                _ => {}
            },
            AppState::Results => match key.code {
                KeyCode::Char('e') => {
                    if let Some(controller) = quiz.as_mut() {
                        controller.export_session();
                    }
                }
                KeyCode::Char('r') => {
                    if let Some(source) = quiz.as_ref().map(|c| c.source.clone()) {
                        // Drop the finished run before the new one starts its countdown
                        quiz = None;
                        match start_quiz(&source, config, conn, &timer_tx) {
                            Ok(controller) => {
                                quiz = Some(controller);
                                app_state = AppState::Quiz;
                            }
                            Err(e) => {
                                menu.status = Some(e);
                                app_state = AppState::Menu;
                            }
                        }
                    }
                }
                KeyCode::Char('m') => {
                    quiz = None;
                    app_state = AppState::Menu;
                }
                KeyCode::Char('q') => break,
                _ => {}
            },
            AppState::Admin => {
                if let Some(editor) = editor.as_mut() {
                    handle_admin_input(editor, key, &mut app_state, conn);
                }
                if app_state == AppState::Menu {
                    editor = None;
                    menu.refresh(config, conn);
                }
            }
        }
    }

    Ok(())
}
