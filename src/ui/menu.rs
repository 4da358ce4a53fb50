use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::bank::BankSource;
use crate::models::Settings;

fn settings_lines(settings: &Settings) -> Vec<Line<'static>> {
    let timer = if settings.per_question_time == 0 {
        "Timer: off".to_string()
    } else {
        format!("Timer: {}s per question", settings.per_question_time)
    };
    vec![
        Line::from(format!(
            "Shuffle: {}",
            if settings.shuffle { "on" } else { "off" }
        )),
        Line::from(timer),
    ]
}

pub fn draw_menu(
    f: &mut Frame,
    sources: &[BankSource],
    selected_index: usize,
    settings: &Settings,
    status: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(f.area());

    let title = Paragraph::new("Quiz Runner v0.1.0")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = if sources.is_empty() {
        vec![ListItem::new("No question banks found").style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )]
    } else {
        sources
            .iter()
            .enumerate()
            .map(|(i, source)| {
                let style = if i == selected_index {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(source.name()).style(style)
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Question Banks")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, chunks[1]);

    if let Some(status) = status {
        let status = Paragraph::new(status)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(status, chunks[2]);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[3]);

    let settings_panel = Paragraph::new(settings_lines(settings))
        .style(Style::default().fg(Color::Green))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL).title("Settings"));
    f.render_widget(settings_panel, bottom[0]);

    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(vec![
            Span::styled("↑/↓", key),
            Span::from(" Navigate  "),
            Span::styled("Enter", key),
            Span::from(" Start Quiz  "),
            Span::styled("a", key),
            Span::from(" Edit Questions"),
        ]),
        Line::from(vec![
            Span::styled("q/Esc/Ctrl+C", key),
            Span::from(" Quit"),
        ]),
    ];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, bottom[1]);
}
