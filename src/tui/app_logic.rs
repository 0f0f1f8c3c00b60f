use super::app_state::{AppMode, VisibleRow};
use crate::scanner::ScanOptions;
use crate::session::{Action, Session};
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::HashSet;
use std::path::PathBuf;

pub struct TuiApp {
    pub(super) session: Session,
    pub(super) options: ScanOptions,
    pub(super) expanded: HashSet<PathBuf>,
    /// Rows currently shown; rebuilt when the tree or the expanded set changes.
    rows: Vec<VisibleRow>,
    pub(super) current_row: usize,
    pub(super) scroll_offset: usize,
    pub(super) list_viewport_height: usize,
    pub(super) mode: AppMode,
    pub(super) root_input: String,
    pub(super) root_cursor_pos: usize, // in chars
    pub(super) quit: bool,
    pub(super) confirmed: bool,
}

impl TuiApp {
    pub fn new(session: Session, options: ScanOptions, root_input: String) -> Self {
        let root_cursor_pos = root_input.chars().count();
        let mut app = TuiApp {
            session,
            options,
            expanded: HashSet::new(),
            rows: Vec::new(),
            current_row: 0,
            scroll_offset: 0,
            list_viewport_height: 0, // Set by ui_renderer on each frame
            mode: AppMode::Browsing,
            root_input,
            root_cursor_pos,
            quit: false,
            confirmed: false,
        };
        app.expand_all_directories();
        app.sync_root_input();
        app
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    // --- State transitions ---

    pub(super) fn dispatch(&mut self, action: Action) {
        let previous_root = self.session.workspace().map(|ws| ws.root.clone());
        let session = std::mem::take(&mut self.session);
        self.session = session.apply(action, &self.options);

        let current_root = self.session.workspace().map(|ws| ws.root.clone());
        if current_root != previous_root {
            self.current_row = 0;
            self.scroll_offset = 0;
            self.expanded.clear();
            self.expand_all_directories();
        } else {
            self.refresh_rows();
        }
        self.sync_root_input();
    }

    fn sync_root_input(&mut self) {
        if let Some(ws) = self.session.workspace() {
            self.root_input = ws.root.display().to_string();
            self.root_cursor_pos = self.root_input.chars().count();
        }
    }

    // --- Tree view ---

    pub(super) fn visible_rows(&self) -> &[VisibleRow] {
        &self.rows
    }

    fn refresh_rows(&mut self) {
        self.rows = self.build_rows();
        self.clamp_cursor();
    }

    fn build_rows(&self) -> Vec<VisibleRow> {
        let Some(ws) = self.session.workspace() else {
            return Vec::new();
        };
        let mut rows = Vec::with_capacity(ws.tree.len());
        let mut stack: Vec<VisibleRow> = ws
            .tree
            .roots()
            .iter()
            .rev()
            .map(|&node| VisibleRow { node, depth: 0 })
            .collect();
        while let Some(row) = stack.pop() {
            rows.push(row);
            let node = ws.tree.node(row.node);
            if let Some(children) = &node.children {
                if self.expanded.contains(&node.path) {
                    stack.extend(children.iter().rev().map(|&child| VisibleRow {
                        node: child,
                        depth: row.depth + 1,
                    }));
                }
            }
        }
        rows
    }

    fn current_path(&self) -> Option<(PathBuf, bool)> {
        let ws = self.session.workspace()?;
        let row = self.rows.get(self.current_row)?;
        let node = ws.tree.node(row.node);
        Some((node.path.clone(), node.is_dir()))
    }

    pub(super) fn move_cursor(&mut self, delta: i32) {
        let count = self.rows.len();
        if count == 0 {
            return;
        }
        self.current_row = (self.current_row as i32 + delta).rem_euclid(count as i32) as usize;
        self.ensure_cursor_is_visible_in_viewport();
    }

    fn clamp_cursor(&mut self) {
        let count = self.rows.len();
        self.current_row = self.current_row.min(count.saturating_sub(1));
        self.ensure_cursor_is_visible_in_viewport();
    }

    pub(super) fn ensure_cursor_is_visible_in_viewport(&mut self) {
        let count = self.rows.len();
        let height = self.list_viewport_height;
        if count == 0 || height == 0 {
            self.scroll_offset = 0;
            return;
        }
        if self.current_row < self.scroll_offset {
            self.scroll_offset = self.current_row;
        } else if self.current_row >= self.scroll_offset + height {
            self.scroll_offset = self.current_row + 1 - height;
        }
        self.scroll_offset = self.scroll_offset.min(count.saturating_sub(height));
    }

    /// Click the checkbox under the cursor; the widget reports the whole
    /// resulting checked set.
    pub(super) fn toggle_current_item(&mut self) {
        let Some((path, _)) = self.current_path() else {
            return;
        };
        let Some(ws) = self.session.workspace() else {
            return;
        };
        let next = ws.selection.toggled(&path);
        self.dispatch(Action::UserToggle(next));
    }

    pub(super) fn toggle_current_expansion(&mut self) {
        if let Some((path, true)) = self.current_path() {
            if !self.expanded.remove(&path) {
                self.expanded.insert(path);
            }
            self.refresh_rows();
        }
    }

    pub(super) fn expand_all_directories(&mut self) {
        if let Some(ws) = self.session.workspace() {
            self.expanded.extend(
                ws.tree
                    .flat_paths()
                    .filter(|p| ws.tree.is_dir(p) == Some(true))
                    .map(|p| p.to_path_buf()),
            );
        }
        self.refresh_rows();
    }

    pub(super) fn collapse_all_directories(&mut self) {
        // Keep the cursor on the top-level ancestor of whatever it was on.
        let top_level = self.session.workspace().and_then(|ws| {
            let mut id = self.rows.get(self.current_row)?.node;
            while let Some(parent) = ws.tree.node(id).parent {
                id = parent;
            }
            ws.tree.roots().iter().position(|&r| r == id)
        });
        self.expanded.clear();
        self.current_row = top_level.unwrap_or(0);
        self.refresh_rows();
    }

    // --- Event handling sub-methods ---

    pub(super) fn handle_browsing_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('y') => {
                self.confirmed = true;
                self.quit = true;
            }
            KeyCode::Char('e') | KeyCode::Char(':') => self.mode = AppMode::EditingRoot,
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_current_item(),
            KeyCode::Char('o') | KeyCode::Tab => self.toggle_current_expansion(),
            KeyCode::Char('*') => self.expand_all_directories(),
            KeyCode::Char('-') => self.collapse_all_directories(),
            KeyCode::Char('a') => self.dispatch(Action::SelectAll),
            KeyCode::Char('d') => self.dispatch(Action::DeselectAll),
            KeyCode::Char('r') => self.dispatch(Action::Rescan),
            _ => {}
        }
    }

    fn root_byte_index(&self) -> usize {
        self.root_input
            .char_indices()
            .nth(self.root_cursor_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.root_input.len())
    }

    pub(super) fn handle_root_input(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Enter => {
                self.mode = AppMode::Browsing;
                let input = PathBuf::from(self.root_input.trim());
                self.dispatch(Action::LoadRoot(input));
            }
            KeyCode::Esc => {
                self.mode = AppMode::Browsing;
                self.sync_root_input();
            }
            KeyCode::Char(c) => {
                let at = self.root_byte_index();
                self.root_input.insert(at, c);
                self.root_cursor_pos += 1;
            }
            KeyCode::Backspace => {
                if self.root_cursor_pos > 0 {
                    self.root_cursor_pos -= 1;
                    let at = self.root_byte_index();
                    self.root_input.remove(at);
                }
            }
            KeyCode::Left => {
                self.root_cursor_pos = self.root_cursor_pos.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.root_cursor_pos < self.root_input.chars().count() {
                    self.root_cursor_pos += 1;
                }
            }
            KeyCode::Home => self.root_cursor_pos = 0,
            KeyCode::End => self.root_cursor_pos = self.root_input.chars().count(),
            _ => {}
        }
    }
}
