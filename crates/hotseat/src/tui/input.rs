//! Keyboard and mouse input mapping.

use super::board::square_at;
use crate::command::SessionCommand;
use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use hotseat_core::Square;
use ratatui::layout::Rect;

/// What an input event asks the UI to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Forward a command to the session.
    Command(SessionCommand),
    /// Move the keyboard cursor.
    Cursor(Square),
    /// Leave the program.
    Quit,
    /// Nothing to do.
    None,
}

/// Moves the cursor one square for an arrow key, staying on the board.
pub fn move_cursor(cursor: Square, key: KeyCode) -> Square {
    let step = match key {
        KeyCode::Right => cursor.offset(1, 0),
        KeyCode::Left => cursor.offset(-1, 0),
        KeyCode::Up => cursor.offset(0, 1),
        KeyCode::Down => cursor.offset(0, -1),
        _ => None,
    };
    step.unwrap_or(cursor)
}

/// Maps a terminal event to an action.
///
/// `board` is the squares area of the last drawn frame, used to resolve
/// mouse clicks.
pub fn map_event(event: &Event, cursor: Square, board: Rect) -> InputAction {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => InputAction::Quit,
            KeyCode::Char('p') => InputAction::Command(SessionCommand::TogglePause),
            KeyCode::Char('n') => InputAction::Command(SessionCommand::NewGame),
            KeyCode::Char('r') => InputAction::Command(SessionCommand::Restart),
            KeyCode::Char('x') => InputAction::Command(SessionCommand::Resign),
            KeyCode::Enter | KeyCode::Char(' ') => {
                InputAction::Command(SessionCommand::Click(cursor))
            }
            code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
                InputAction::Cursor(move_cursor(cursor, code))
            }
            _ => InputAction::None,
        },
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            match square_at(board, mouse.column, mouse.row) {
                Some(square) => InputAction::Command(SessionCommand::Click(square)),
                None => InputAction::None,
            }
        }
        _ => InputAction::None,
    }
}
