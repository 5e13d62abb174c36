use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::grid::Dir;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move(Dir),
    /// Finish carving immediately.
    Skip,
    Restart,
    Quit,
}

/// Maps a key press to a logical action. Releases and unbound keys yield
/// `None`; held keys repeat.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {}
        KeyEventKind::Release => return None,
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    let action = match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Action::Move(Dir::Up),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Action::Move(Dir::Right),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Action::Move(Dir::Down),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Action::Move(Dir::Left),
        KeyCode::Char(' ') | KeyCode::Enter => Action::Skip,
        KeyCode::Char('r') => Action::Restart,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}
