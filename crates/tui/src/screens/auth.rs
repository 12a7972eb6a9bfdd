//! Sign-in and registration forms.

use beiramar_protocol::user::validate_registration;
use beiramar_protocol::{Language, Message, ProtocolError};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use tracing::debug;

use super::{Action, Ctx, cycle, hit};
use crate::event::InputMode;
use crate::state::Route;
use crate::widgets::button::render_button;
use crate::widgets::text_field::{TextInput, render_text_field};

const CARD_WIDTH: u16 = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Email,
    Password,
    Submit,
    Register,
}

impl LoginField {
    const ORDER: [Self; 4] = [Self::Email, Self::Password, Self::Submit, Self::Register];
}

/// The sign-in form.
#[derive(Debug)]
pub struct LoginForm {
    focus: LoginField,
    email: TextInput,
    password: TextInput,
    busy: bool,
    error: Option<&'static str>,
    areas: Vec<(Rect, LoginField)>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    /// An empty form, focus on the email.
    #[must_use]
    pub fn new() -> Self {
        Self {
            focus: LoginField::Email,
            email: TextInput::new(),
            password: TextInput::new().masked(),
            busy: false,
            error: None,
            areas: Vec::new(),
        }
    }

    /// Returns `true` while a sign-in is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Translation key of the error shown, if any.
    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Ends a failed sign-in with an error message.
    pub fn fail(&mut self, key: &'static str) {
        self.busy = false;
        self.error = Some(key);
    }

    /// How keys should be read.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        match self.focus {
            LoginField::Email | LoginField::Password => InputMode::Text,
            LoginField::Submit | LoginField::Register => InputMode::Normal,
        }
    }

    /// Handles a keyboard message.
    pub fn update(&mut self, msg: &Message) -> Option<Action> {
        if self.busy {
            return None;
        }
        match (self.focus, msg) {
            (_, Message::Escape) => return Some(Action::Navigate(Route::Home)),
            (_, Message::NextField | Message::NavigateDown) => {
                self.focus = cycle(&LoginField::ORDER, self.focus, true);
            }
            (_, Message::PrevField | Message::NavigateUp) => {
                self.focus = cycle(&LoginField::ORDER, self.focus, false);
            }
            (LoginField::Email, Message::Select) => self.focus = LoginField::Password,
            (LoginField::Email, msg) => {
                self.email.edit(msg);
            }
            (LoginField::Password | LoginField::Submit, Message::Select) => return self.submit(),
            (LoginField::Password, msg) => {
                self.password.edit(msg);
            }
            (LoginField::Register, Message::Select) => {
                return Some(Action::Navigate(Route::Register));
            }
            _ => {}
        }
        None
    }

    /// Handles a click.
    pub fn click(&mut self, column: u16, row: u16) -> Option<Action> {
        if self.busy {
            return None;
        }
        let field = hit(&self.areas, column, row)?;
        self.focus = field;
        match field {
            LoginField::Submit => self.submit(),
            LoginField::Register => Some(Action::Navigate(Route::Register)),
            LoginField::Email | LoginField::Password => None,
        }
    }

    /// Draws the form.
    pub fn render(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        self.areas.clear();
        let lang = ctx.lang;
        let inner = render_card(lang.t("auth", "login_title"), 17, area, buf);
        let [email, password, error, button, link, demo] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .areas(inner);

        render_text_field(
            &self.email,
            lang.t("auth", "email"),
            "you@example.com",
            self.focus == LoginField::Email,
            email,
            buf,
        );
        render_text_field(
            &self.password,
            lang.t("auth", "password"),
            "",
            self.focus == LoginField::Password,
            password,
            buf,
        );
        render_error(lang, self.error, error, buf);

        let label = if self.busy {
            lang.t("auth", "signing_in")
        } else {
            lang.t("auth", "sign_in")
        };
        render_button(
            label,
            self.focus == LoginField::Submit,
            !self.busy,
            button,
            buf,
        );
        let link = render_link(
            lang.t("nav", "register"),
            self.focus == LoginField::Register,
            link,
            buf,
        );
        Paragraph::new(lang.t("auth", "demo"))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(demo, buf);

        self.areas.extend([
            (email, LoginField::Email),
            (password, LoginField::Password),
            (button, LoginField::Submit),
            (link, LoginField::Register),
        ]);
    }

    fn submit(&mut self) -> Option<Action> {
        let email = self.email.value().trim();
        if email.is_empty() || self.password.value().is_empty() {
            self.error = Some("error_required");
            return None;
        }
        debug!(%email, "sign-in submitted");
        self.busy = true;
        self.error = None;
        Some(Action::Login {
            email: email.to_string(),
            password: self.password.value().to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegisterField {
    Name,
    Email,
    Password,
    Confirm,
    Submit,
    Login,
}

impl RegisterField {
    const ORDER: [Self; 6] = [
        Self::Name,
        Self::Email,
        Self::Password,
        Self::Confirm,
        Self::Submit,
        Self::Login,
    ];
}

/// The registration form.
#[derive(Debug)]
pub struct RegisterForm {
    focus: RegisterField,
    name: TextInput,
    email: TextInput,
    password: TextInput,
    confirm: TextInput,
    busy: bool,
    error: Option<&'static str>,
    areas: Vec<(Rect, RegisterField)>,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterForm {
    /// An empty form, focus on the name.
    #[must_use]
    pub fn new() -> Self {
        Self {
            focus: RegisterField::Name,
            name: TextInput::new(),
            email: TextInput::new(),
            password: TextInput::new().masked(),
            confirm: TextInput::new().masked(),
            busy: false,
            error: None,
            areas: Vec::new(),
        }
    }

    /// Returns `true` while a registration is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Translation key of the error shown, if any.
    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Ends a failed registration with an error message.
    pub fn fail(&mut self, key: &'static str) {
        self.busy = false;
        self.error = Some(key);
    }

    /// How keys should be read.
    #[must_use]
    pub fn input_mode(&self) -> InputMode {
        match self.focus {
            RegisterField::Submit | RegisterField::Login => InputMode::Normal,
            _ => InputMode::Text,
        }
    }

    /// Handles a keyboard message.
    pub fn update(&mut self, msg: &Message) -> Option<Action> {
        if self.busy {
            return None;
        }
        match (self.focus, msg) {
            (_, Message::Escape) => return Some(Action::Navigate(Route::Home)),
            (_, Message::NextField | Message::NavigateDown) => {
                self.focus = cycle(&RegisterField::ORDER, self.focus, true);
            }
            (_, Message::PrevField | Message::NavigateUp) => {
                self.focus = cycle(&RegisterField::ORDER, self.focus, false);
            }
            (RegisterField::Confirm | RegisterField::Submit, Message::Select) => {
                return self.submit();
            }
            (RegisterField::Login, Message::Select) => return Some(Action::Navigate(Route::Login)),
            (_, Message::Select) => self.focus = cycle(&RegisterField::ORDER, self.focus, true),
            (field, msg) => {
                if let Some(input) = self.input_mut(field) {
                    input.edit(msg);
                }
            }
        }
        None
    }

    /// Handles a click.
    pub fn click(&mut self, column: u16, row: u16) -> Option<Action> {
        if self.busy {
            return None;
        }
        let field = hit(&self.areas, column, row)?;
        self.focus = field;
        match field {
            RegisterField::Submit => self.submit(),
            RegisterField::Login => Some(Action::Navigate(Route::Login)),
            _ => None,
        }
    }

    /// Draws the form.
    pub fn render(&mut self, ctx: &Ctx<'_>, area: Rect, buf: &mut Buffer) {
        self.areas.clear();
        let lang = ctx.lang;
        let inner = render_card(lang.t("auth", "register_title"), 22, area, buf);
        let [name, email, password, confirm, error, button, link] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(inner);

        let fields = [
            (RegisterField::Name, "full_name", name),
            (RegisterField::Email, "email", email),
            (RegisterField::Password, "password", password),
            (RegisterField::Confirm, "confirm_password", confirm),
        ];
        for (field, key, rect) in fields {
            if let Some(input) = self.input(field) {
                render_text_field(
                    input,
                    lang.t("auth", key),
                    "",
                    self.focus == field,
                    rect,
                    buf,
                );
            }
            self.areas.push((rect, field));
        }
        render_error(lang, self.error, error, buf);

        let label = if self.busy {
            lang.t("auth", "creating")
        } else {
            lang.t("auth", "create")
        };
        render_button(
            label,
            self.focus == RegisterField::Submit,
            !self.busy,
            button,
            buf,
        );
        let link = render_link(
            lang.t("nav", "login"),
            self.focus == RegisterField::Login,
            link,
            buf,
        );
        self.areas
            .extend([(button, RegisterField::Submit), (link, RegisterField::Login)]);
    }

    fn input(&self, field: RegisterField) -> Option<&TextInput> {
        match field {
            RegisterField::Name => Some(&self.name),
            RegisterField::Email => Some(&self.email),
            RegisterField::Password => Some(&self.password),
            RegisterField::Confirm => Some(&self.confirm),
            RegisterField::Submit | RegisterField::Login => None,
        }
    }

    fn input_mut(&mut self, field: RegisterField) -> Option<&mut TextInput> {
        match field {
            RegisterField::Name => Some(&mut self.name),
            RegisterField::Email => Some(&mut self.email),
            RegisterField::Password => Some(&mut self.password),
            RegisterField::Confirm => Some(&mut self.confirm),
            RegisterField::Submit | RegisterField::Login => None,
        }
    }

    fn submit(&mut self) -> Option<Action> {
        let name = self.name.value().trim();
        let email = self.email.value().trim();
        if name.is_empty() || email.is_empty() || self.password.value().is_empty() {
            self.error = Some("error_required");
            return None;
        }
        if let Err(err) = validate_registration(self.password.value(), self.confirm.value()) {
            debug!(%err, "registration rejected");
            self.error = Some(match err {
                ProtocolError::PasswordMismatch => "error_match",
                _ => "error_length",
            });
            return None;
        }
        self.busy = true;
        self.error = None;
        Some(Action::Register {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.value().to_string(),
        })
    }
}

/// Draws a centered card and returns its inner area.
fn render_card(title: &str, height: u16, area: Rect, buf: &mut Buffer) -> Rect {
    let [column] = Layout::horizontal([Constraint::Length(CARD_WIDTH)])
        .flex(Flex::Center)
        .areas(area);
    let [card] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);
    let inner = block.inner(card);
    block.render(card, buf);
    inner
}

fn render_error(lang: Language, error: Option<&'static str>, area: Rect, buf: &mut Buffer) {
    if let Some(key) = error {
        Paragraph::new(lang.t("auth", key))
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

/// Draws a centered link and returns the area it occupies.
fn render_link(label: &str, focused: bool, area: Rect, buf: &mut Buffer) -> Rect {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED)
    };
    let width = u16::try_from(label.chars().count() + 2).unwrap_or(area.width);
    let [link] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [link] = Layout::vertical([Constraint::Length(1)]).areas(link);
    Line::from(Span::styled(format!(" {label} "), style)).render(link, buf);
    link
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::PointerListeners;
    use crate::test_utils::buffer_to_string;
    use beiramar_protocol::CalendarDate;

    const VIEWPORT: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 26,
    };

    fn render_with(lang: Language, f: impl FnOnce(&Ctx<'_>, &mut Buffer)) -> String {
        let listeners = PointerListeners::default();
        let ctx = Ctx {
            lang,
            user: None,
            listeners: &listeners,
            viewport: VIEWPORT,
            today: CalendarDate::from_ymd(2025, 6, 10).unwrap(),
        };
        let mut buf = Buffer::empty(VIEWPORT);
        f(&ctx, &mut buf);
        buffer_to_string(&buf)
    }

    fn type_text(form: &mut LoginForm, text: &str) {
        for ch in text.chars() {
            form.update(&Message::Input { ch });
        }
    }

    #[test]
    fn login_submits_trimmed_email() {
        let mut form = LoginForm::new();
        type_text(&mut form, " rita@example.com ");
        form.update(&Message::Select);
        assert_eq!(form.input_mode(), InputMode::Text);
        type_text(&mut form, "secret1");

        assert_eq!(
            form.update(&Message::Select),
            Some(Action::Login {
                email: "rita@example.com".to_string(),
                password: "secret1".to_string(),
            })
        );
        assert!(form.is_busy());
        assert_eq!(form.update(&Message::Select), None);
    }

    #[test]
    fn login_requires_both_fields() {
        let mut form = LoginForm::new();
        form.focus = LoginField::Submit;
        assert_eq!(form.update(&Message::Select), None);
        assert_eq!(form.error(), Some("error_required"));
        assert!(!form.is_busy());
    }

    #[test]
    fn failure_reenables_form() {
        let mut form = LoginForm::new();
        type_text(&mut form, "a@b.c");
        form.update(&Message::NextField);
        type_text(&mut form, "nope");
        form.update(&Message::Select);

        form.fail("error_invalid");
        assert!(!form.is_busy());
        let text = render_with(Language::En, |ctx, buf| form.render(ctx, VIEWPORT, buf));
        assert!(text.contains("Invalid email or password."));
    }

    #[test]
    fn login_masks_password() {
        let mut form = LoginForm::new();
        form.update(&Message::NextField);
        for ch in "hunter2".chars() {
            form.update(&Message::Input { ch });
        }
        let text = render_with(Language::En, |ctx, buf| form.render(ctx, VIEWPORT, buf));
        assert!(!text.contains("hunter2"));
        assert!(text.contains("•••••••"));
        assert!(text.contains("admin@beiramar.com / admin123"));
    }

    #[test]
    fn login_link_opens_registration() {
        let mut form = LoginForm::new();
        render_with(Language::En, |ctx, buf| form.render(ctx, VIEWPORT, buf));
        let (link, _) = form
            .areas
            .iter()
            .find(|(_, field)| *field == LoginField::Register)
            .copied()
            .unwrap();
        assert_eq!(
            form.click(link.x, link.y),
            Some(Action::Navigate(Route::Register))
        );
    }

    fn filled_register(password: &str, confirm: &str) -> RegisterForm {
        let mut form = RegisterForm::new();
        for (index, text) in ["Rita", "rita@example.com", password, confirm]
            .into_iter()
            .enumerate()
        {
            form.focus = RegisterField::ORDER[index];
            for ch in text.chars() {
                form.update(&Message::Input { ch });
            }
        }
        form.focus = RegisterField::Submit;
        form
    }

    #[test]
    fn registration_checks_confirmation_first() {
        let mut form = filled_register("abc", "abd");
        assert_eq!(form.update(&Message::Select), None);
        assert_eq!(form.error(), Some("error_match"));
    }

    #[test]
    fn registration_checks_length() {
        let mut form = filled_register("abc", "abc");
        assert_eq!(form.update(&Message::Select), None);
        assert_eq!(form.error(), Some("error_length"));
    }

    #[test]
    fn registration_submits_valid_form() {
        let mut form = filled_register("secret1", "secret1");
        assert_eq!(
            form.update(&Message::Select),
            Some(Action::Register {
                name: "Rita".to_string(),
                email: "rita@example.com".to_string(),
                password: "secret1".to_string(),
            })
        );
        assert!(form.is_busy());

        let text = render_with(Language::Pt, |ctx, buf| form.render(ctx, VIEWPORT, buf));
        assert!(text.contains("A criar conta..."));
    }

    #[test]
    fn enter_moves_through_register_fields() {
        let mut form = RegisterForm::new();
        form.update(&Message::Select);
        form.update(&Message::Select);
        assert_eq!(form.focus, RegisterField::Password);
        assert_eq!(form.input_mode(), InputMode::Text);
    }
}
