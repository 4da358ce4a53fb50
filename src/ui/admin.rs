use crate::admin::AdminEditor;
use crate::bank::LOCAL_BANK_KEY;
use crate::utils::{cursor_line_col, scroll_to_show};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_admin(f: &mut Frame, editor: &mut AdminEditor) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let title = Paragraph::new(format!("Question Bank Editor ({})", LOCAL_BANK_KEY))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    // No wrapping: long lines scroll horizontally so columns map 1:1 to the buffer.
    let editor_area = chunks[1];
    let visible_height = editor_area.height.saturating_sub(2) as usize;
    let visible_width = editor_area.width.saturating_sub(2) as usize;
    let (cursor_line, cursor_col) = cursor_line_col(&editor.buffer, editor.cursor_position);

    editor.scroll_y = scroll_to_show(editor.scroll_y as usize, cursor_line, visible_height) as u16;
    editor.scroll_x = scroll_to_show(editor.scroll_x as usize, cursor_col, visible_width) as u16;

    let text = Paragraph::new(editor.buffer.as_str())
        .scroll((editor.scroll_y, editor.scroll_x))
        .block(Block::default().borders(Borders::ALL).title("questions.json"));
    f.render_widget(text, editor_area);

    let cursor_x = editor_area.x + 1 + (cursor_col as u16).saturating_sub(editor.scroll_x);
    let cursor_y = editor_area.y + 1 + (cursor_line as u16).saturating_sub(editor.scroll_y);
    f.set_cursor_position((cursor_x, cursor_y));

    if let Some(status) = &editor.status {
        let color = if status.starts_with("Saved") || status.starts_with("Sample") {
            Color::Green
        } else {
            Color::Red
        };
        let status = Paragraph::new(status.as_str())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center);
        f.render_widget(status, chunks[2]);
    }

    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let help_text = vec![Line::from(vec![
        Span::styled("Ctrl+L", key),
        Span::from(" Load Sample  "),
        Span::styled("Ctrl+S", key),
        Span::from(" Save  "),
        Span::styled("Ctrl+D", key),
        Span::from(" Download  "),
        Span::styled("Esc", key),
        Span::from(" Back to Menu"),
    ])];
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[3]);
}
