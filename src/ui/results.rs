use crate::controller::QuizController;
use crate::models::HistoryEntry;
use crate::quiz::QuizManager;
use crate::ui::layout::calculate_results_chunks;
use crate::utils::truncate_string;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn answer_text(manager: &QuizManager, question: usize, answer: Option<usize>) -> String {
    answer
        .and_then(|a| manager.questions().get(question)?.answers.get(a).cloned())
        .unwrap_or_else(|| "-".to_string())
}

/// Second line of a breakdown entry. Unanswered entries carry no correct
/// index, so the answer key is read from the question itself.
pub fn breakdown_detail(manager: &QuizManager, entry: &HistoryEntry) -> String {
    let chosen = match entry.chosen {
        Some(_) => answer_text(manager, entry.index, entry.chosen),
        None if entry.timedout => "timed out".to_string(),
        None => "skipped".to_string(),
    };
    let correct = entry
        .correct
        .or_else(|| manager.questions().get(entry.index).map(|q| q.correct));
    format!(
        "Chosen: {} — Correct: {}",
        chosen,
        answer_text(manager, entry.index, correct)
    )
}

pub fn draw_results(f: &mut Frame, controller: &QuizController) {
    let layout = calculate_results_chunks(f.area());
    let manager = &controller.manager;

    let title = Paragraph::new(format!("Results - {}", controller.deck_name))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let score_text = vec![
        Line::from(Span::styled(
            format!(
                "Score: {}  ({}%)",
                manager.score(),
                controller.result_percent()
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("Correct: {}  ", manager.correct_count()),
                Style::default().fg(Color::Green),
            ),
            Span::styled(
                format!("Wrong: {}", manager.wrong_count()),
                Style::default().fg(Color::Red),
            ),
        ]),
    ];
    let score = Paragraph::new(score_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(score, layout.score_area);

    let mut breakdown = Text::default();
    if manager.history().is_empty() {
        breakdown.push_line(Line::from(Span::styled(
            "No questions were answered",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    for entry in manager.history() {
        let prompt = manager
            .questions()
            .get(entry.index)
            .map(|q| q.question.as_str())
            .unwrap_or("");
        let detail_style = match (entry.chosen, entry.correct) {
            (Some(chosen), Some(correct)) if chosen == correct => Style::default().fg(Color::Green),
            (Some(_), _) => Style::default().fg(Color::Red),
            _ => Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        };
        breakdown.push_line(Line::from(format!(
            "{}. {}",
            entry.index + 1,
            truncate_string(prompt, 70)
        )));
        breakdown.push_line(Line::from(Span::styled(
            format!("   {}", breakdown_detail(manager, entry)),
            detail_style,
        )));
    }
    if let Some(status) = &controller.status {
        breakdown.push_line(Line::from(""));
        breakdown.push_line(Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(Color::Yellow),
        )));
    }
    let breakdown = Paragraph::new(breakdown)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Breakdown"));
    f.render_widget(breakdown, layout.breakdown_area);

    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let help_text = vec![Line::from(vec![
        Span::styled("e", key),
        Span::from(" Export Session  "),
        Span::styled("r", key),
        Span::from(" Restart  "),
        Span::styled("m", key),
        Span::from(" Main Menu  "),
        Span::styled("q", key),
        Span::from(" Quit"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
