//! Calculator shell state
//!
//! Everything the window shows lives in [`Shell`]: the current page, the
//! expression buffer, the sidebar and the session history. UI input is turned
//! into [`Action`]s and applied through [`Shell::dispatch`], so the state can
//! be driven the same way from buttons, the keyboard and tests.

use crate::expr::{self, format_number};
use crate::history::History;
use saccore::Sidebar;

/// Shown in the display when an expression cannot be evaluated.
pub const ERROR_MESSAGE: &str = "nice try! that is not a valid expression";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Calculator,
    History,
    Settings,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Calculator, Page::History, Page::Settings];

    pub fn label(self) -> &'static str {
        match self {
            Page::Calculator => "calculator",
            Page::History => "history",
            Page::Settings => "settings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Character inserted into the expression.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Digit(u8),
    Operator(Operator),
    Decimal,
    OpenParen,
    CloseParen,
    Clear,
    Backspace,
    Evaluate,
    SwitchPage(Page),
    ToggleSidebar,
    ClearHistory,
}

/// The text being composed. After a failed evaluation it holds
/// [`ERROR_MESSAGE`] until the next edit.
#[derive(Debug, Clone, Default)]
pub struct ExpressionBuffer {
    text: String,
    showing_error: bool,
}

impl ExpressionBuffer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_error(&self) -> bool {
        self.showing_error
    }

    pub fn push(&mut self, c: char) {
        self.reset_error();
        self.text.push(c);
    }

    pub fn backspace(&mut self) {
        if self.showing_error {
            self.clear();
        } else {
            self.text.pop();
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.showing_error = false;
    }

    fn set_result(&mut self, result: String) {
        self.text = result;
        self.showing_error = false;
    }

    fn set_error(&mut self) {
        self.text = ERROR_MESSAGE.to_string();
        self.showing_error = true;
    }

    fn reset_error(&mut self) {
        if self.showing_error {
            self.clear();
        }
    }
}

pub struct Shell {
    page: Page,
    buffer: ExpressionBuffer,
    sidebar: Sidebar,
    history: History,
    status: String,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new(Sidebar::default())
    }
}

impl Shell {
    pub fn new(sidebar: Sidebar) -> Self {
        Self {
            page: Page::Calculator,
            buffer: ExpressionBuffer::default(),
            sidebar,
            history: History::default(),
            status: String::from("ready"),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn buffer(&self) -> &ExpressionBuffer {
        &self.buffer
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Advance the sidebar animation. Returns true while it is still moving.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.sidebar.update(dt)
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatch");
        match action {
            Action::Digit(d) => {
                if let Some(c) = char::from_digit(u32::from(d), 10) {
                    self.buffer.push(c);
                }
            }
            Action::Operator(op) => self.buffer.push(op.symbol()),
            Action::Decimal => self.buffer.push('.'),
            Action::OpenParen => self.buffer.push('('),
            Action::CloseParen => self.buffer.push(')'),
            Action::Clear => self.buffer.clear(),
            Action::Backspace => self.buffer.backspace(),
            Action::Evaluate => self.evaluate(),
            Action::SwitchPage(page) => {
                if self.page != page {
                    tracing::debug!("switching to {} page", page.label());
                    self.page = page;
                }
            }
            Action::ToggleSidebar => self.sidebar.toggle(),
            Action::ClearHistory => {
                self.history.clear();
                self.status = String::from("history cleared");
            }
        }
    }

    fn evaluate(&mut self) {
        if self.buffer.is_error() || self.buffer.text().trim().is_empty() {
            return;
        }

        let expression = self.buffer.text().to_string();
        match expr::evaluate(&expression) {
            Ok(value) => {
                let result = format_number(value);
                self.status = format!("{expression} = {result}");
                self.history.push(expression, result.clone());
                self.buffer.set_result(result);
            }
            Err(e) => {
                tracing::debug!("could not evaluate {expression:?}: {e}");
                self.status = format!("invalid expression: {e}");
                self.buffer.set_error();
            }
        }
    }
}
