use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shortens `s` to at most `max_width` terminal columns, ending with "..."
/// when anything was cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push_str("...");
    out
}

/// Line number and display column of the byte offset `cursor` in `text`.
/// Lines are split on explicit newlines only.
pub fn cursor_line_col(text: &str, cursor: usize) -> (usize, usize) {
    let cursor = cursor.min(text.len());
    let before = &text[..floor_char_boundary(text, cursor)];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    (line, before[line_start..].width())
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// New scroll offset that keeps `target` inside a window of `visible` rows
/// (or columns), moving as little as possible from `current`.
pub fn scroll_to_show(current: usize, target: usize, visible: usize) -> usize {
    if visible == 0 {
        return target;
    }
    if target < current {
        target
    } else if target >= current + visible {
        target + 1 - visible
    } else {
        current
    }
}
