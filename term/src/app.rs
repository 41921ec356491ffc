use std::io::{Write, stdout};

use clap::ValueEnum;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use mineterm_core::Game;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::error::AppError;
use crate::ui;

/// How the player picks the cell to reveal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Mode {
    /// Arrow keys move a cursor, space reveals, `f` flags
    Cursor,
    /// Type `row,col` and press enter
    Text,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Move(isize, isize),
    Reveal,
    ToggleFlag,
    ToggleHelp,
    Type(char),
    Backspace,
    Submit,
    Quit,
}

/// Maps a key press to what it does in the given mode.
pub(crate) fn action_for(key: KeyEvent, mode: Mode, finished: bool) -> Option<Action> {
    use Action::*;

    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Quit);
    }
    if finished {
        return matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q'))
            .then_some(Quit);
    }

    match (mode, key.code) {
        (_, KeyCode::Esc) => Some(Quit),
        (_, KeyCode::Char('?')) => Some(ToggleHelp),
        (Mode::Cursor, KeyCode::Char('q')) => Some(Quit),
        (Mode::Cursor, KeyCode::Up | KeyCode::Char('k')) => Some(Move(-1, 0)),
        (Mode::Cursor, KeyCode::Down | KeyCode::Char('j')) => Some(Move(1, 0)),
        (Mode::Cursor, KeyCode::Left | KeyCode::Char('h')) => Some(Move(0, -1)),
        (Mode::Cursor, KeyCode::Right | KeyCode::Char('l')) => Some(Move(0, 1)),
        (Mode::Cursor, KeyCode::Char(' ') | KeyCode::Enter) => Some(Reveal),
        (Mode::Cursor, KeyCode::Char('f')) => Some(ToggleFlag),
        (Mode::Text, KeyCode::Enter) => Some(Submit),
        (Mode::Text, KeyCode::Backspace) => Some(Backspace),
        (Mode::Text, KeyCode::Char(c)) => Some(Type(c)),
        _ => None,
    }
}

/// Front end state around one [`Game`].
#[derive(Debug)]
pub(crate) struct App {
    pub(crate) game: Game,
    pub(crate) mode: Mode,
    pub(crate) input: String,
    pub(crate) show_help: bool,
    pub(crate) should_quit: bool,
}

impl App {
    pub(crate) fn new(game: Game, mode: Mode) -> Self {
        Self {
            game,
            mode,
            input: String::new(),
            show_help: false,
            should_quit: false,
        }
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = action_for(key, self.mode, self.game.is_finished()) {
            self.apply(action);
        }
    }

    // Rejected moves only update the game's status message, which is drawn on the next frame.
    pub(crate) fn apply(&mut self, action: Action) {
        log::trace!("Action: {:?}", action);
        match action {
            Action::Move(d_row, d_col) => {
                let _ = self.game.move_cursor(d_row, d_col);
            }
            Action::Reveal => {
                let _ = self.game.reveal_at_cursor();
            }
            Action::ToggleFlag => {
                let _ = self.game.toggle_flag();
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Type(c) => self.input.push(c),
            Action::Backspace => {
                self.input.pop();
            }
            Action::Submit => {
                let line = std::mem::take(&mut self.input);
                let _ = self.game.handle_input(&line);
            }
            Action::Quit => self.should_quit = true,
        }
    }
}

/// Raw mode and the alternate screen, left again when dropped.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn enter(out: W) -> std::io::Result<Self> {
        enable_raw_mode()?;
        // from here on every exit path restores the terminal
        let mut guard = Self { out };
        execute!(guard.out, EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            log::warn!("Failed to leave raw mode: {e}");
        }
        if let Err(e) = execute!(self.out, LeaveAlternateScreen, Show) {
            log::warn!("Failed to leave the alternate screen: {e}");
        }
    }
}

/// Runs the game in the alternate screen until the player quits.
pub(crate) fn run(game: Game, mode: Mode) -> Result<(), AppError> {
    let guard = TerminalGuard::enter(stdout())?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(game, mode);
    let result = event_loop(&mut terminal, &mut app);
    drop(terminal);
    drop(guard);

    log::info!(
        "Session ended: {:?} after {} moves",
        app.game.state(),
        app.game.moves()
    );
    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), AppError> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mineterm_core::{Board, CellView, GameState, Label, MoveError};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(mode: Mode) -> App {
        let board = Board::from_mine_coords(3, &[(2, 2)]).unwrap();
        App::new(Game::new(board), mode)
    }

    #[test]
    fn cursor_keys_map_to_moves() {
        let cases = [
            (KeyCode::Up, Action::Move(-1, 0)),
            (KeyCode::Char('j'), Action::Move(1, 0)),
            (KeyCode::Left, Action::Move(0, -1)),
            (KeyCode::Char('l'), Action::Move(0, 1)),
            (KeyCode::Char(' '), Action::Reveal),
            (KeyCode::Enter, Action::Reveal),
            (KeyCode::Char('f'), Action::ToggleFlag),
            (KeyCode::Char('?'), Action::ToggleHelp),
            (KeyCode::Char('q'), Action::Quit),
        ];
        for (code, action) in cases {
            assert_eq!(action_for(key(code), Mode::Cursor, false), Some(action));
        }
    }

    #[test]
    fn text_mode_types_characters() {
        assert_eq!(
            action_for(key(KeyCode::Char('q')), Mode::Text, false),
            Some(Action::Type('q'))
        );
        assert_eq!(
            action_for(key(KeyCode::Enter), Mode::Text, false),
            Some(Action::Submit)
        );
        assert_eq!(
            action_for(key(KeyCode::Esc), Mode::Text, false),
            Some(Action::Quit)
        );
    }

    #[test]
    fn finished_game_only_quits() {
        assert_eq!(action_for(key(KeyCode::Char('f')), Mode::Cursor, true), None);
        assert_eq!(
            action_for(key(KeyCode::Enter), Mode::Cursor, true),
            Some(Action::Quit)
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(action_for(ctrl_c, Mode::Text, false), Some(Action::Quit));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut release = key(KeyCode::Char('f'));
        release.kind = KeyEventKind::Release;
        assert_eq!(action_for(release, Mode::Cursor, false), None);
    }

    #[test]
    fn cursor_session_flags_and_reveals() {
        let mut app = app(Mode::Cursor);

        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.game.cell_at((0, 0)), CellView::Flagged);
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.game.message().contains("Cannot reveal flagged cell"));

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.game.cursor(), (1, 1));
        assert_eq!(
            app.game.cell_at((1, 1)),
            CellView::Revealed(Label::Count(1))
        );
    }

    #[test]
    fn text_session_submits_typed_line() {
        let mut app = app(Mode::Text);

        for c in "3,0".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.game.message(), MoveError::OutOfBounds { max: 2 }.to_string());
        assert!(app.input.is_empty());

        for c in "2,2x".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.input, "2,2");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.game.state(), GameState::Lost);

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn dropping_guard_leaves_alternate_screen() {
        let mut out = Vec::new();
        drop(TerminalGuard { out: &mut out });

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"));
        assert!(written.contains("\x1b[?25h"));
    }

    #[test]
    fn help_toggles() {
        let mut app = app(Mode::Cursor);
        app.apply(Action::ToggleHelp);
        assert!(app.show_help);
        app.apply(Action::ToggleHelp);
        assert!(!app.show_help);
    }
}
