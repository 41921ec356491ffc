use mineterm_core::{CellView, Coord, Coord2, GameState, Label};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::app::{App, Mode};

pub(crate) const HIDDEN: &str = "#";
pub(crate) const FLAG: &str = "F";
pub(crate) const WRONG_FLAG: &str = "X";

const DIGITS: [&str; 9] = [" ", "1", "2", "3", "4", "5", "6", "7", "8"];

pub(crate) fn label_glyph(label: Label) -> &'static str {
    match label {
        Label::Mine => "*",
        Label::Empty => DIGITS[0],
        Label::Count(count) => DIGITS.get(usize::from(count)).copied().unwrap_or("?"),
    }
}

fn label_style(label: Label) -> Style {
    let color = match label {
        Label::Mine => Color::LightRed,
        Label::Empty => Color::Reset,
        Label::Count(1) => Color::LightBlue,
        Label::Count(2) => Color::Green,
        Label::Count(3) => Color::Red,
        Label::Count(4) => Color::Blue,
        Label::Count(5) => Color::Yellow,
        Label::Count(6) => Color::Cyan,
        Label::Count(7) => Color::Magenta,
        Label::Count(_) => Color::Gray,
    };
    Style::new().fg(color).add_modifier(Modifier::BOLD)
}

/// Glyph and style of one cell. Once the game is over the whole board is shown and wrong flags
/// are marked.
pub(crate) fn cell_glyph(view: CellView, label: Label, finished: bool) -> (&'static str, Style) {
    match view {
        CellView::Revealed(label) => (label_glyph(label), label_style(label)),
        CellView::Flagged if finished && !label.is_mine() => {
            (WRONG_FLAG, Style::new().fg(Color::Red).add_modifier(Modifier::BOLD))
        }
        CellView::Flagged => (FLAG, Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        CellView::Hidden if finished => (
            label_glyph(label),
            label_style(label).add_modifier(Modifier::DIM),
        ),
        CellView::Hidden => (HIDDEN, Style::new().fg(Color::DarkGray)),
    }
}

fn digits(value: Coord) -> usize {
    match value {
        0..=9 => 1,
        10..=99 => 2,
        _ => 3,
    }
}

fn board_lines(app: &App) -> Vec<Line<'static>> {
    let game = &app.game;
    let size = game.size();
    let width = digits(size.saturating_sub(1));
    let finished = game.is_finished();
    let show_cursor = app.mode == Mode::Cursor && !finished;

    let mut header = format!("{:width$}  ", "");
    for col in 0..size {
        header.push_str(&format!("{col:>width$} "));
    }
    let rule = format!("{:width$} -{}", "", "-".repeat(usize::from(size) * (width + 1)));

    let mut lines = vec![
        Line::styled(header, Style::new().fg(Color::DarkGray)),
        Line::styled(rule, Style::new().fg(Color::DarkGray)),
    ];

    for row in 0..size {
        let mut spans = vec![Span::styled(
            format!("{row:>width$}| "),
            Style::new().fg(Color::DarkGray),
        )];
        for col in 0..size {
            let coords: Coord2 = (row, col);
            let (glyph, mut style) =
                cell_glyph(game.cell_at(coords), game.board()[coords], finished);
            if game.triggered_mine() == Some(coords) {
                style = style.bg(Color::Red).fg(Color::White);
            }
            if show_cursor && game.cursor() == coords {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!("{glyph:>width$}"), style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }
    lines
}

fn status_lines(app: &App) -> Vec<Line<'static>> {
    let game = &app.game;
    let message_style = match game.state() {
        GameState::InProgress => Style::new(),
        GameState::Won => Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
        GameState::Lost => Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
    };
    let mut lines = vec![Line::styled(game.message().to_string(), message_style)];

    if game.is_finished() {
        lines.push(Line::raw("Press Enter or q to quit."));
    } else if app.mode == Mode::Text {
        lines.push(Line::from(vec![
            Span::styled("> ", Style::new().fg(Color::Cyan)),
            Span::raw(app.input.clone()),
            Span::styled("_", Style::new().add_modifier(Modifier::SLOW_BLINK)),
        ]));
    }
    lines
}

pub(crate) fn help_lines(mode: Mode) -> Vec<Line<'static>> {
    let keys: &[(&str, &str)] = match mode {
        Mode::Cursor => &[
            ("arrows / hjkl", "move the cursor"),
            ("space / enter", "reveal the selected cell"),
            ("f", "flag or unflag the selected cell"),
            ("?", "toggle this help"),
            ("q / esc", "quit"),
        ],
        Mode::Text => &[
            ("row,col enter", "reveal a cell, e.g. 0,1"),
            ("backspace", "erase the last character"),
            ("?", "toggle this help"),
            ("esc", "quit"),
        ],
    };

    let mut lines = vec![
        Line::raw("Reveal every cell that is not a mine."),
        Line::raw("Numbers count the mines around a cell."),
        Line::raw(""),
    ];
    lines.extend(keys.iter().map(|&(key, what)| {
        Line::from(vec![
            Span::styled(format!("{key:>14}  "), Style::new().fg(Color::Cyan)),
            Span::raw(what),
        ])
    }));
    lines
}

fn footer_text(app: &App) -> &'static str {
    match (app.game.is_finished(), app.mode) {
        (true, _) => "enter/q: quit",
        (false, Mode::Cursor) => "arrows: move  space: reveal  f: flag  ?: help  q: quit",
        (false, Mode::Text) => "row,col + enter: reveal  ?: help  esc: quit",
    }
}

/// Rectangle of at most `width` x `height` centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub(crate) fn draw(f: &mut Frame, app: &App) {
    let game = &app.game;
    let [header, board, status, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(f.area());

    let title = format!(
        "Minesweeper {size}x{size} ({} mines)   Mines left: {}   Moves: {}",
        game.total_mines(),
        game.mines_left(),
        game.moves(),
        size = game.size(),
    );
    f.render_widget(
        Paragraph::new(title).style(Style::new().add_modifier(Modifier::BOLD)),
        header,
    );
    f.render_widget(Paragraph::new(board_lines(app)), board);
    f.render_widget(Paragraph::new(status_lines(app)).wrap(Wrap { trim: true }), status);
    f.render_widget(
        Paragraph::new(footer_text(app)).style(Style::new().fg(Color::DarkGray)),
        footer,
    );

    if app.show_help {
        let lines = help_lines(app.mode);
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
        let popup = centered(f.area(), 52, height);
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new(lines).block(Block::bordered().title(" Help ")),
            popup,
        );
    }
}
