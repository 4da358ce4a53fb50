use crate::controller::QuizController;
use crate::models::Feedback;
use crate::timer::format_time;
use crate::ui::layout::calculate_quiz_chunks;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
    Frame,
};

fn key_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Style of one answer line. Once the question is answered or timed out
/// the correct option turns green and a wrong pick turns red.
fn answer_style(controller: &QuizController, index: usize) -> Style {
    let revealed = controller.is_answered() || controller.timed_out;
    let correct = controller.manager.current().correct;

    if revealed && index == correct {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else if controller.selected == Some(index) {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if revealed {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    }
}

pub fn draw_quiz(f: &mut Frame, controller: &QuizController) {
    let layout = calculate_quiz_chunks(f.area());
    let manager = &controller.manager;
    let question = manager.current();

    let header_text = format!(
        "Question {} / {} - {}",
        manager.index() + 1,
        manager.len(),
        controller.deck_name
    );
    let header = Paragraph::new(header_text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, layout.header_area);

    let progress = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .percent(manager.progress());
    f.render_widget(progress, layout.progress_area);

    let mut question_text = Text::default();
    question_text.push_line(Line::from(Span::styled(
        format!("Difficulty: {}", question.difficulty_label()),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    )));
    question_text.push_line(Line::from(""));
    question_text.push_line(Line::from(question.question.as_str()));
    let question_widget = Paragraph::new(question_text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question_widget, layout.question_area);

    let mut answers_text = Text::default();
    for (i, answer) in question.answers.iter().enumerate() {
        let marker = if controller.selected == Some(i) { ">" } else { " " };
        answers_text.push_line(Line::from(Span::styled(
            format!("{} {}. {}", marker, i + 1, answer),
            answer_style(controller, i),
        )));
    }
    if let Some(feedback) = controller.feedback {
        let color = match feedback {
            Feedback::Correct => Color::Green,
            Feedback::Wrong => Color::Red,
            Feedback::TimeUp => Color::Yellow,
        };
        answers_text.push_line(Line::from(""));
        answers_text.push_line(Line::from(Span::styled(
            feedback.message(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }
    if let Some(status) = &controller.status {
        answers_text.push_line(Line::from(""));
        answers_text.push_line(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let answers = Paragraph::new(answers_text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Answers"));
    f.render_widget(answers, layout.answer_area);

    let stats_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(layout.stats_area);

    let counters = Paragraph::new(Line::from(vec![
        Span::from(format!("Score: {}  ", manager.score())),
        Span::styled(
            format!("Correct: {}  ", manager.correct_count()),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("Wrong: {}", manager.wrong_count()),
            Style::default().fg(Color::Red),
        ),
    ]))
    .alignment(Alignment::Left)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(counters, stats_chunks[0]);

    let timer_style = match controller.time_left {
        Some(s) if s <= 10 => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::White),
    };
    let timer = Paragraph::new(format_time(controller.time_left))
        .style(timer_style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Time"));
    f.render_widget(timer, stats_chunks[1]);

    let help_text = vec![
        Line::from(vec![
            Span::styled("1-9", key_style()),
            Span::from(" Answer  "),
            Span::styled("Enter/n", key_style()),
            Span::from(" Next  "),
            Span::styled("←/p", key_style()),
            Span::from(" Previous  "),
            Span::styled("s", key_style()),
            Span::from(" Skip"),
        ]),
        Line::from(vec![
            Span::styled("d", key_style()),
            Span::from(" Download Questions  "),
            Span::styled("Esc", key_style()),
            Span::from(" Quit to Menu  "),
            Span::styled("Ctrl+C", key_style()),
            Span::from(" Exit App"),
        ]),
    ];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

/// Centered `percent_x` by `height` rectangle inside `area`.
fn popup_area(area: Rect, percent_x: u16, height: u16) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(rows[1])[1]
}

/// Leave-quiz dialog drawn over the paused quiz screen.
pub fn draw_quit_confirmation(f: &mut Frame, controller: &QuizController) {
    let manager = &controller.manager;
    let area = popup_area(f.area(), 60, 7);

    let answered = manager.correct_count() + manager.wrong_count();
    let body = vec![
        Line::from(format!(
            "{} of {} answered, score {}. This run will not be kept.",
            answered,
            manager.len(),
            manager.score()
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", key_style()),
            Span::from(" Leave quiz  "),
            Span::styled("n/Esc", key_style()),
            Span::from(" Keep going (timer resumes)"),
        ]),
    ];

    let dialog = Paragraph::new(body)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title("Leave quiz?"),
        );
    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}
