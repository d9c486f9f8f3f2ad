use std::mem;

use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use log::warn;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::cursor::{
    add_record, delete_current, next_record, prev_record, MessageKind, RecordCursor, RecordView,
};
use crate::db::count_records;
use crate::models::CropRecord;

use super::forms::{ConfirmDelete, CropField, CropForm};
use super::helpers::{centered_rect, key_hint, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Title shown above the form.
const APP_TITLE: &str = "Farm Management System";

/// Fine-grained modes layered over the form.
enum Mode {
    Normal,
    ConfirmDelete(ConfirmDelete),
}

/// Holds the footer message text plus its severity.
#[derive(Debug)]
pub(crate) struct StatusMessage {
    pub(crate) text: String,
    pub(crate) kind: StatusKind,
}

/// Severity levels shown in the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

impl From<MessageKind> for StatusKind {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Info => StatusKind::Info,
            MessageKind::Warning => StatusKind::Warning,
            MessageKind::Error => StatusKind::Error,
        }
    }
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// The part of the app the record actions draw into: the form and the footer
/// message. Kept apart from `App` so the actions can borrow it alongside the
/// connection and cursor.
#[derive(Default)]
pub(crate) struct RecordScreen {
    pub(crate) form: CropForm,
    pub(crate) status: Option<StatusMessage>,
}

impl RecordScreen {
    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }
}

impl RecordView for RecordScreen {
    fn display_record(&mut self, record: &CropRecord) {
        self.form.load(record);
        self.status = None;
    }

    fn clear_fields(&mut self) {
        self.form.clear();
    }

    fn show_message(&mut self, kind: MessageKind, text: &str) {
        self.set_status(text, kind.into());
    }
}

/// Central application state shared across the TUI.
pub struct App {
    conn: Connection,
    cursor: RecordCursor,
    screen: RecordScreen,
    mode: Mode,
    record_count: i64,
}

impl App {
    /// Take ownership of the open connection. It is closed when the app is
    /// dropped.
    pub fn new(conn: Connection) -> Result<Self> {
        let record_count = count_records(&conn).context("failed to count crop records")?;
        Ok(Self {
            conn,
            cursor: RecordCursor::new(),
            screen: RecordScreen::default(),
            mode: Mode::Normal,
            record_count,
        })
    }

    /// Handle a plain key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    /// Handle a key pressed together with Ctrl. Returns `true` when the app
    /// should exit.
    pub fn handle_ctrl(&mut self, ch: char) -> Result<bool> {
        if matches!(ch, 'c' | 'q') {
            return Ok(true);
        }
        if !matches!(self.mode, Mode::Normal) {
            return Ok(false);
        }

        match ch {
            'n' => self.show_next(),
            'p' => self.show_previous(),
            'd' => self.mode = self.request_delete(),
            'l' => self.clear_form(),
            _ => {}
        }
        Ok(false)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Esc => *exit = true,
            KeyCode::Tab | KeyCode::Down => self.screen.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.screen.form.focus_previous(),
            KeyCode::Backspace => self.screen.form.backspace(),
            KeyCode::Enter => self.save_form(),
            KeyCode::PageDown => self.show_next(),
            KeyCode::PageUp => self.show_previous(),
            KeyCode::Char(ch) => {
                self.screen.form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.screen
                    .set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                delete_current(&self.conn, &mut self.cursor, &mut self.screen);
                self.refresh_count();
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    /// Store the form as a new record. The form keeps its contents and the
    /// cursor does not move.
    fn save_form(&mut self) {
        let fields = self.screen.form.to_new_record();
        if add_record(&self.conn, &mut self.screen, &fields).is_some() {
            self.refresh_count();
        }
    }

    fn show_next(&mut self) {
        next_record(&self.conn, &mut self.cursor, &mut self.screen);
    }

    fn show_previous(&mut self) {
        prev_record(&self.conn, &mut self.cursor, &mut self.screen);
    }

    /// Open the confirmation modal, or let the delete action warn when no
    /// record is selected.
    fn request_delete(&mut self) -> Mode {
        match self.cursor.current() {
            Some(id) => Mode::ConfirmDelete(ConfirmDelete::from_form(id, &self.screen.form)),
            None => {
                delete_current(&self.conn, &mut self.cursor, &mut self.screen);
                Mode::Normal
            }
        }
    }

    fn clear_form(&mut self) {
        self.screen.clear_fields();
        self.cursor.forget();
        self.screen.set_status("Form cleared.", StatusKind::Info);
    }

    fn refresh_count(&mut self) {
        match count_records(&self.conn).context("failed to count crop records") {
            Ok(count) => self.record_count = count,
            Err(err) => {
                warn!("{err:#}");
                self.screen.set_status(surface_error(&err), StatusKind::Error);
            }
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        self.draw_form(frame, content_area);

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        if let Mode::ConfirmDelete(confirm) = &self.mode {
            self.draw_confirm_delete(frame, area, confirm);
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let form = &self.screen.form;
        let block = Block::default().title(APP_TITLE).borders(Borders::ALL);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let header = match form.record_id {
            Some(id) => Line::from(vec![
                Span::styled(
                    format!("Record #{id}"),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "  (Enter stores the form as a new record)",
                    Style::default().fg(Color::Gray),
                ),
            ]),
            None => Line::from(Span::styled(
                "New record",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        };

        let width = usize::from(inner.width);
        let mut lines = vec![header, Line::from("")];
        lines.extend(CropField::ALL.iter().map(|field| form.build_line(*field, width)));

        // One row per field: long values scroll inside their row instead of
        // wrapping onto the next field.
        frame.render_widget(Paragraph::new(lines), inner);

        if matches!(self.mode, Mode::Normal) {
            let row = CropField::ALL
                .iter()
                .position(|field| *field == form.active)
                .unwrap_or(0);
            let (_, column) = form.visible_value(form.active, width);
            let cursor_x = inner.x.saturating_add(clamp_u16(column));
            let cursor_y = inner.y.saturating_add(2).saturating_add(clamp_u16(row));
            if cursor_y < inner.bottom() && cursor_x < inner.right() {
                frame.set_cursor_position((cursor_x, cursor_y));
            }
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.screen.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match &self.mode {
            Mode::ConfirmDelete(_) => {
                let mut spans = Vec::new();
                spans.extend(key_hint("[y]", " Delete   "));
                spans.extend(key_hint("[n/Esc]", " Keep"));
                Line::from(spans)
            }
            Mode::Normal => {
                let mut spans = Vec::new();
                spans.extend(key_hint("[Enter]", " Add   "));
                spans.extend(key_hint("[PgDn/^N]", " Next   "));
                spans.extend(key_hint("[PgUp/^P]", " Previous   "));
                spans.extend(key_hint("[^D]", " Delete   "));
                spans.extend(key_hint("[^L]", " Clear   "));
                spans.extend(key_hint("[Tab]", " Field   "));
                spans.extend(key_hint("[Esc]", " Quit   "));
                spans.push(Span::styled(
                    format!("{} stored", self.record_count),
                    Style::default().fg(Color::Gray),
                ));
                Line::from(spans)
            }
        }
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Deletion")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let name = confirm.crop_name.trim();
        let question = if name.is_empty() {
            format!("Delete record #{}?", confirm.id)
        } else {
            format!("Delete record #{} ({name})?", confirm.id)
        };

        let lines = vec![
            Line::from(question),
            Line::from("The record is removed permanently."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    #[cfg(test)]
    pub(crate) fn form(&self) -> &CropForm {
        &self.screen.form
    }

    #[cfg(test)]
    pub(crate) fn status(&self) -> Option<&StatusMessage> {
        self.screen.status.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn current_record(&self) -> Option<crate::models::RecordId> {
        self.cursor.current()
    }

    #[cfg(test)]
    fn confirming_delete(&self) -> bool {
        matches!(self.mode, Mode::ConfirmDelete(_))
    }
}
