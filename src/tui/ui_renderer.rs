use super::app_logic::TuiApp;
use super::app_state::AppMode;
use crate::session::Panel;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

fn draw_help_block(f: &mut Frame, app: &TuiApp, area: Rect) {
    let help_text_lines_content = if app.mode == AppMode::EditingRoot {
        vec![
            Line::from("Type a directory path | Enter: Load | Esc: Cancel"),
            Line::from("Left/Right/Home/End: Move cursor | Backspace: Delete"),
        ]
    } else {
        vec![
            Line::from("Arrows/jk: Nav | Space/Enter: Check | Tab/o: Fold | y: Confirm | q/Esc: Quit"),
            Line::from("a: Select All | d: Deselect All | *: Expand All | -: Collapse All | e: Root | r: Rescan"),
        ]
    };
    let help_paragraph = Paragraph::new(help_text_lines_content).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Folder Structure"),
    );
    f.render_widget(help_paragraph, area);
}

fn draw_root_input_block(f: &mut Frame, app: &TuiApp, area: Rect) {
    let title = if app.mode == AppMode::EditingRoot {
        "Folder path (Enter to load, Esc to cancel)"
    } else {
        "Folder path (e to edit)"
    };
    let inner_width = area.width.saturating_sub(2);
    let cursor = u16::try_from(app.root_cursor_pos).unwrap_or(u16::MAX);
    let offset = input_scroll_offset(cursor, inner_width);
    let input_paragraph = Paragraph::new(app.root_input.as_str())
        .scroll((0, offset))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input_paragraph, area);
    if app.mode == AppMode::EditingRoot && inner_width > 0 {
        f.set_cursor_position((area.x + 1 + (cursor - offset), area.y + 1));
    }
}

/// Horizontal scroll that keeps the cursor column inside a box `width`
/// columns wide.
fn input_scroll_offset(cursor: u16, width: u16) -> u16 {
    if width == 0 {
        return cursor;
    }
    cursor.saturating_sub(width - 1)
}

fn draw_tree_block(f: &mut Frame, app: &mut TuiApp, area: Rect) {
    app.list_viewport_height = area.height.saturating_sub(2) as usize;
    app.ensure_cursor_is_visible_in_viewport();

    let rows = app.visible_rows();
    let list_items: Vec<ListItem> = match app.session.workspace() {
        Some(ws) => rows
            .iter()
            .skip(app.scroll_offset)
            .take(app.list_viewport_height)
            .map(|row| {
                let node = ws.tree.node(row.node);
                let checkbox = if ws.selection.is_checked(&node.path) {
                    "[x] "
                } else {
                    "[ ] "
                };
                let fold = if node.is_dir() {
                    if app.expanded.contains(&node.path) {
                        "[-] "
                    } else {
                        "[+] "
                    }
                } else {
                    "    "
                };
                let suffix = if node.is_dir() { "/" } else { "" };
                ListItem::new(format!(
                    "{}{}{}{}{}",
                    "  ".repeat(row.depth),
                    fold,
                    checkbox,
                    node.name,
                    suffix
                ))
            })
            .collect(),
        None => Vec::new(),
    };

    let list_title = match app.session.workspace() {
        Some(ws) => format!(
            "1. Select/Deselect Files ({}/{} checked)",
            ws.selection.len(),
            ws.tree.len()
        ),
        None => "1. Select/Deselect Files".to_string(),
    };

    let list_widget = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(list_title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state_for_view = ListState::default();
    if !rows.is_empty() && app.current_row >= app.scroll_offset {
        list_state_for_view.select(Some(app.current_row - app.scroll_offset));
    }
    f.render_stateful_widget(list_widget, area, &mut list_state_for_view);
}

fn draw_result_block(f: &mut Frame, app: &TuiApp, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("2. Result");
    let paragraph = match app.session.panel() {
        Panel::Idle => Paragraph::new("Enter a folder path to begin."),
        Panel::Error(message) => {
            Paragraph::new(message).style(Style::default().fg(Color::Red))
        }
        Panel::Warning(message) => {
            Paragraph::new(message).style(Style::default().fg(Color::Yellow))
        }
        Panel::Diagram(text) => Paragraph::new(text),
    };
    f.render_widget(paragraph.block(block).wrap(Wrap { trim: false }), area);
}

pub(super) fn ui_frame(frame: &mut Frame, app: &mut TuiApp) {
    let help_lines = 2;
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(help_lines + 2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[2]);

    draw_help_block(frame, app, main_chunks[0]);
    draw_root_input_block(frame, app, main_chunks[1]);
    draw_tree_block(frame, app, columns[0]);
    draw_result_block(frame, app, columns[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_not_scrolled() {
        assert_eq!(input_scroll_offset(0, 20), 0);
        assert_eq!(input_scroll_offset(19, 20), 0);
    }

    #[test]
    fn cursor_past_the_box_scrolls_text_left() {
        assert_eq!(input_scroll_offset(20, 20), 1);
        assert_eq!(input_scroll_offset(55, 20), 36);
        // Cursor column relative to the box stays on its last cell.
        assert_eq!(55 - input_scroll_offset(55, 20), 19);
    }

    #[test]
    fn zero_width_box_scrolls_everything() {
        assert_eq!(input_scroll_offset(7, 0), 7);
    }
}
