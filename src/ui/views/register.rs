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
use crate::http::model::Registration;
use crate::session::Role;
use crate::ui::{
    components::form::TextField,
    context::AppContext,
    state::AppState,
    traits::{Action, View},
};
use crate::util::colors;

pub struct Register {
    role: Role,
    fields: Vec<TextField>,
    /// 0 is the role selector; text fields start at 1.
    focus: usize,
    editing: bool,
}

impl Default for Register {
    fn default() -> Self {
        Self {
            role: Role::User,
            fields: vec![
                TextField::new("Username"),
                TextField::new("Email"),
                TextField::new("Phone number"),
                TextField::masked("Password"),
            ],
            focus: 1,
            editing: true,
        }
    }
}

impl Register {
    fn submit(&mut self, ctx: &AppContext) {
        if self.fields.iter().any(|f| f.value.trim().is_empty()) {
            let _ = ctx.event_tx.send(Event::Notice(
                "Please fill in all fields".into(),
                NoticeKind::Error,
            ));
            return;
        }
        let registration = Registration {
            username: self.fields[0].value.trim().to_string(),
            email: self.fields[1].value.trim().to_string(),
            phone_number: self.fields[2].value.trim().to_string(),
            password: self.fields[3].value.clone(),
        };
        let _ = ctx.event_tx.send(Event::RegisterSubmitted {
            role: self.role,
            registration,
        });
        for field in &mut self.fields {
            field.value.clear();
        }
        self.focus = 1;
    }
}

#[async_trait]
impl View for Register {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, _ctx: &AppContext) {
        let mut constraints = vec![Constraint::Length(1), Constraint::Length(1)];
        constraints.extend(std::iter::repeat_n(Constraint::Length(3), self.fields.len()));
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
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
            Span::raw(" Register as: "),
            Span::styled("User", role_style(self.role == Role::User)),
            Span::raw("  "),
            Span::styled("Admin", role_style(self.role == Role::Admin)),
        ]);
        f.render_widget(Paragraph::new(role_line), chunks[0]);

        for (i, field) in self.fields.iter().enumerate() {
            field.render(f, chunks[i + 2], self.focus == i + 1);
        }

        let hint = Paragraph::new(Line::from(Span::styled(
            " Enter: register   Tab: next field   Esc: done editing",
            Style::default().fg(colors::NEUTRAL),
        )));
        f.render_widget(hint, chunks[2 + self.fields.len()]);
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

        let slots = self.fields.len() + 1;
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
                self.focus = (self.focus + 1) % slots;
                Some(Action::None)
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + slots - 1) % slots;
                Some(Action::None)
            }
            KeyCode::Left | KeyCode::Right if self.focus == 0 => {
                self.role = match self.role {
                    Role::Admin => Role::User,
                    _ => Role::Admin,
                };
                Some(Action::None)
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.fields.get_mut(self.focus.wrapping_sub(1)) {
                    field.push(c);
                }
                Some(Action::None)
            }
            KeyCode::Backspace => {
                if let Some(field) = self.fields.get_mut(self.focus.wrapping_sub(1)) {
                    field.pop();
                }
                Some(Action::None)
            }
            _ => Some(Action::None),
        }
    }
}
