use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::event::events::{Event, NoticeKind};
use crate::session::Role;
use crate::ui::{
    components::form::TextField,
    context::AppContext,
    state::AppState,
    traits::{Action, View},
};
use crate::util::colors;

const FIELD_ROLE: usize = 0;
const FIELD_EMAIL: usize = 1;
const FIELD_PASSWORD: usize = 2;

pub struct Login {
    role: Role,
    email: TextField,
    password: TextField,
    focus: usize,
    editing: bool,
}

impl Default for Login {
    fn default() -> Self {
        Self {
            role: Role::User,
            email: TextField::new("Email"),
            password: TextField::masked("Password"),
            focus: FIELD_EMAIL,
            editing: true,
        }
    }
}

impl Login {
    fn submit(&mut self, ctx: &AppContext) {
        if self.email.value.is_empty() || self.password.value.is_empty() {
            let _ = ctx.event_tx.send(Event::Notice(
                "Please enter email and password".into(),
                NoticeKind::Error,
            ));
            return;
        }
        let _ = ctx.event_tx.send(Event::LoginSubmitted {
            role: self.role,
            email: self.email.value.trim().to_string(),
            password: self.password.value.clone(),
        });
        // credentials don't linger in the form after submit
        self.email.value.clear();
        self.password.value.clear();
        self.focus = FIELD_EMAIL;
    }

    fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            FIELD_EMAIL => Some(&mut self.email),
            FIELD_PASSWORD => Some(&mut self.password),
            _ => None,
        }
    }
}

#[async_trait]
impl View for Login {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, _ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let role_style = |selected: bool| {
            if selected {
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors::NEUTRAL)
            }
        };
        let role_line = Line::from(vec![
            Span::raw(" Login as: "),
            Span::styled("User", role_style(self.role == Role::User)),
            Span::raw("  "),
            Span::styled("Admin", role_style(self.role == Role::Admin)),
            if self.focus == FIELD_ROLE {
                Span::styled("  (←/→ to switch)", Style::default().fg(colors::ACCENT))
            } else {
                Span::raw("")
            },
        ]);
        f.render_widget(Paragraph::new(role_line), chunks[0]);

        self.email.render(f, chunks[2], self.focus == FIELD_EMAIL);
        self.password
            .render(f, chunks[3], self.focus == FIELD_PASSWORD);

        let hint = Paragraph::new(Line::from(Span::styled(
            " Enter: login   Tab: next field   Esc: done editing",
            Style::default().fg(colors::NEUTRAL),
        )));
        f.render_widget(hint, chunks[4]);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        if !self.editing {
            if key.code == KeyCode::Char('i') || key.code == KeyCode::Enter {
                self.editing = true;
                return Some(Action::None);
            }
            return None;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
            KeyCode::Esc => {
                self.editing = false;
                Some(Action::None)
            }
            KeyCode::Enter => {
                self.submit(ctx);
                Some(Action::None)
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % 3;
                Some(Action::None)
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + 2) % 3;
                Some(Action::None)
            }
            KeyCode::Left | KeyCode::Right if self.focus == FIELD_ROLE => {
                self.role = match self.role {
                    Role::Admin => Role::User,
                    _ => Role::Admin,
                };
                Some(Action::None)
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.focused_field() {
                    field.push(c);
                }
                Some(Action::None)
            }
            KeyCode::Backspace => {
                if let Some(field) = self.focused_field() {
                    field.pop();
                }
                Some(Action::None)
            }
            _ => Some(Action::None),
        }
    }
}
