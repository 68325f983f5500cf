//! Keypad layout and keyboard mapping

use crate::shell::{Action, Operator};
use egui::{Event, Key};

/// Key labels, row by row.
pub const KEYPAD: [[&str; 4]; 5] = [
    ["7", "8", "9", "+"],
    ["4", "5", "6", "-"],
    ["1", "2", "3", "x"],
    ["0", "C", "=", "/"],
    [".", "(", ")", "<--"],
];

/// Action for a keypad label.
pub fn button_action(label: &str) -> Option<Action> {
    match label {
        "C" => Some(Action::Clear),
        "<--" => Some(Action::Backspace),
        "=" => Some(Action::Evaluate),
        _ => {
            let mut chars = label.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => char_action(c),
                _ => None,
            }
        }
    }
}

/// Action for a typed character. `x` is accepted as multiplication.
pub fn char_action(c: char) -> Option<Action> {
    let action = match c {
        '0'..='9' => Action::Digit(c as u8 - b'0'),
        '+' => Action::Operator(Operator::Add),
        '-' => Action::Operator(Operator::Subtract),
        '*' | 'x' | 'X' => Action::Operator(Operator::Multiply),
        '/' => Action::Operator(Operator::Divide),
        '.' => Action::Decimal,
        '(' => Action::OpenParen,
        ')' => Action::CloseParen,
        '=' => Action::Evaluate,
        _ => return None,
    };
    Some(action)
}

/// Action for a non-text key.
pub fn key_action(key: Key) -> Option<Action> {
    match key {
        Key::Enter => Some(Action::Evaluate),
        Key::Backspace => Some(Action::Backspace),
        Key::Escape | Key::Delete => Some(Action::Clear),
        _ => None,
    }
}

/// Translate this frame's input events into actions, in order.
pub fn actions_from_events(events: &[Event]) -> Vec<Action> {
    let mut actions = Vec::new();
    for event in events {
        match event {
            Event::Text(text) => actions.extend(text.chars().filter_map(char_action)),
            Event::Key { key, pressed: true, .. } => actions.extend(key_action(*key)),
            _ => {}
        }
    }
    actions
}
