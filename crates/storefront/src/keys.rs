//! Keybinding definitions for the terminal UI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    Confirm,
    Cancel,
    ToggleCart,
    PromptQuantity,
    ViewProduct,
    IncrementLine,
    DecrementLine,
    RemoveLine,
    ClearCart,
    Checkout,
    NextFilter,
    PrevFilter,
    NextSort,
    PrevSort,
    JumpFilter(usize),
    ToggleNav,
    ToggleTheme,
    OpenHelp,
    OpenLogin,
    OpenSignup,
    OpenNewsletter,
}

#[must_use]
pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char('c') => Some(Action::ToggleCart),
        KeyCode::Char('a') => Some(Action::PromptQuantity),
        KeyCode::Char('v') => Some(Action::ViewProduct),
        KeyCode::Char('+' | '=') => Some(Action::IncrementLine),
        KeyCode::Char('-') => Some(Action::DecrementLine),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::RemoveLine),
        KeyCode::Char('x') => Some(Action::ClearCart),
        KeyCode::Char('o') => Some(Action::Checkout),
        KeyCode::Char('f') => Some(Action::NextFilter),
        KeyCode::Char('F') => Some(Action::PrevFilter),
        KeyCode::Char('s') => Some(Action::NextSort),
        KeyCode::Char('S') => Some(Action::PrevSort),
        KeyCode::Char('n') => Some(Action::ToggleNav),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('l') => Some(Action::OpenLogin),
        KeyCode::Char('g') => Some(Action::OpenSignup),
        KeyCode::Char('w') => Some(Action::OpenNewsletter),
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let idx = match c {
                '1' => 0,
                '2' => 1,
                '3' => 2,
                '4' => 3,
                _ => return None,
            };
            Some(Action::JumpFilter(idx))
        }
        _ => None,
    }
}
