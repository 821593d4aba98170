use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

/// Everything the terminal front end can ask the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a run, or pause the current one
    ToggleRun,
    Step,
    Reset,
    Invert,
    Faster,
    Slower,
    MoreRows,
    FewerRows,

    /// Start typing a number
    BeginNumber,
    NumberChar(char),
    NumberErase,
    NumberSubmit,
    NumberCancel,

    /// Take the number off display
    ClearNumber,

    /// Left click on terminal cell `(column, row)`
    Click { column: u16, row: u16 },

    /// The terminal now has `cols x rows` cells
    TermResize { cols: u16, rows: u16 },

    Exit,
}

/// Converts a crossterm event into a [`Command`].
///
/// `typing` is whether a number is being entered, in which case printable keys go to the
/// number instead of being bindings.
pub fn convert_event(event: CtEvent, typing: bool) -> Option<Command> {
    match event {
        CtEvent::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            if typing {
                convert_typing_key(key_event)
            } else {
                convert_key(key_event)
            }
        }
        CtEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Some(Command::Click { column, row }),
        CtEvent::Resize(cols, rows) => Some(Command::TermResize { cols, rows }),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Command> {
    if is_interrupt(&key_event) {
        return Some(Command::Exit);
    }

    let command = match key_event.code {
        KeyCode::Char('q') => Command::Exit,
        KeyCode::Char(' ') => Command::ToggleRun,
        KeyCode::Char('s') => Command::Step,
        KeyCode::Char('r') => Command::Reset,
        KeyCode::Char('i') => Command::Invert,
        KeyCode::Char('+' | '=') => Command::Faster,
        KeyCode::Char('-') => Command::Slower,
        KeyCode::Char(']') => Command::MoreRows,
        KeyCode::Char('[') => Command::FewerRows,
        KeyCode::Char('n') => Command::BeginNumber,
        KeyCode::Esc => Command::ClearNumber,
        _ => return None,
    };

    Some(command)
}

fn convert_typing_key(key_event: KeyEvent) -> Option<Command> {
    if is_interrupt(&key_event) {
        return Some(Command::Exit);
    }

    match key_event.code {
        KeyCode::Char(c) => Some(Command::NumberChar(c)),
        KeyCode::Backspace => Some(Command::NumberErase),
        KeyCode::Enter => Some(Command::NumberSubmit),
        KeyCode::Esc => Some(Command::NumberCancel),
        _ => None,
    }
}

fn is_interrupt(key_event: &KeyEvent) -> bool {
    matches!(
        key_event,
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}
