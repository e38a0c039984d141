//! Stateless rendering of a session snapshot.

use crate::view::SnapshotView;
use hotseat_core::{Piece, PieceKind, Side, Square};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Terminal columns per board square.
pub const CELL_WIDTH: u16 = 3;

const RANK_LABEL_WIDTH: u16 = 2;
const BOARD_WIDTH: u16 = 8 * CELL_WIDTH;
const BOARD_HEIGHT: u16 = 8;

/// Draws one frame. Returns the squares area for mouse hit-testing.
pub fn draw(frame: &mut Frame, view: &SnapshotView, cursor: Square) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(BOARD_HEIGHT + 1),
            Constraint::Length(3), // Status
            Constraint::Length(1), // Keys
        ])
        .split(frame.area());

    let title = Paragraph::new("Hotseat Chess")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let squares = squares_area(chunks[1]);
    draw_board(frame, squares, view, cursor);

    let tally = format!(
        "White {} - Black {} - Draws {}",
        view.tally.white_wins(),
        view.tally.black_wins(),
        view.tally.draws()
    );
    let status = Paragraph::new(vec![
        Line::from(Span::styled(view.status_line(), status_style(view))),
        Line::from(tally),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new("click/arrows+enter move  p pause  n new  r restart  x resign  q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);

    squares
}

fn status_style(view: &SnapshotView) -> Style {
    if view.flags.is_over() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if view.flags.is_paused() {
        Style::default().fg(Color::Yellow)
    } else if view.clock.remaining_seconds() <= 5 {
        Style::default().fg(Color::LightRed)
    } else {
        Style::default().fg(Color::Green)
    }
}

fn draw_board(frame: &mut Frame, squares: Rect, view: &SnapshotView, cursor: Square) {
    let selected = view.selection.selected_square();
    let targets = view.selection.legal_targets();

    let mut lines: Vec<Line> = (0..8u8)
        .rev()
        .map(|rank| {
            let mut spans = vec![Span::raw(format!("{} ", rank + 1))];
            spans.extend((0..8u8).filter_map(|file| Square::from_coords(file, rank)).map(
                |square| {
                    let is_target = targets.is_some_and(|t| t.contains(&square));
                    cell(view, square, cursor, selected == Some(square), is_target)
                },
            ));
            Line::from(spans)
        })
        .collect();

    let files: String = ('a'..='h').map(|f| format!(" {} ", f)).collect();
    lines.push(Line::from(format!("  {}", files)).style(Style::default().fg(Color::DarkGray)));

    let area = Rect::new(
        squares.x.saturating_sub(RANK_LABEL_WIDTH),
        squares.y,
        squares.width + RANK_LABEL_WIDTH,
        squares.height + 1,
    )
    .intersection(frame.area());
    frame.render_widget(Paragraph::new(lines), area);
}

fn cell(
    view: &SnapshotView,
    square: Square,
    cursor: Square,
    selected: bool,
    target: bool,
) -> Span<'static> {
    let glyph = view
        .symbol_at(square)
        .and_then(piece_from_symbol)
        .map_or(if target { '·' } else { ' ' }, Piece::glyph);

    let light = (square.file() + square.rank()) % 2 == 1;
    let background = if selected {
        Color::Yellow
    } else if target {
        Color::LightGreen
    } else if light {
        Color::Gray
    } else {
        Color::DarkGray
    };

    let mut style = Style::default().bg(background).fg(Color::Black);
    if square == cursor {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    Span::styled(format!(" {} ", glyph), style)
}

/// Recovers a piece from its board letter.
pub fn piece_from_symbol(symbol: char) -> Option<Piece> {
    let kind = match symbol.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };
    let side = if symbol.is_ascii_uppercase() {
        Side::White
    } else {
        Side::Black
    };
    Some(Piece::new(side, kind))
}

/// Squares area of the board, centered in `area` with room for labels.
pub fn squares_area(area: Rect) -> Rect {
    let total = center_rect(area, BOARD_WIDTH + RANK_LABEL_WIDTH, BOARD_HEIGHT + 1);
    Rect::new(
        total.x + RANK_LABEL_WIDTH,
        total.y,
        BOARD_WIDTH.min(total.width.saturating_sub(RANK_LABEL_WIDTH)),
        BOARD_HEIGHT.min(total.height),
    )
}

/// Square under a terminal cell of the squares area, rank 8 on top.
pub fn square_at(squares: Rect, column: u16, row: u16) -> Option<Square> {
    if column < squares.x || row < squares.y {
        return None;
    }
    let file = (column - squares.x) / CELL_WIDTH;
    let from_top = row - squares.y;
    if file >= 8 || from_top >= 8 {
        return None;
    }
    Square::from_coords(file as u8, 7 - from_top as u8)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::SnapshotView;
    use hotseat_core::{ChessRules, GameSession};
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_symbols_round_trip_through_pieces() {
        for symbol in "PNBRQKpnbrqk".chars() {
            let piece = piece_from_symbol(symbol).unwrap();
            assert_eq!(piece.symbol(), symbol);
        }
        assert_eq!(piece_from_symbol('.'), None);
    }

    #[test]
    fn test_square_at_corners() {
        let squares = Rect::new(4, 2, BOARD_WIDTH, BOARD_HEIGHT);
        assert_eq!(square_at(squares, 4, 2), "a8".parse().ok());
        assert_eq!(square_at(squares, 4 + 4 * CELL_WIDTH, 2 + 6), "e2".parse().ok());
        assert_eq!(square_at(squares, 4 + BOARD_WIDTH, 2), None);
        assert_eq!(square_at(squares, 3, 2), None);
        assert_eq!(square_at(squares, 4, 2 + BOARD_HEIGHT), None);
    }

    #[test]
    fn test_draw_renders_board_and_status() {
        let mut session = GameSession::new(ChessRules::new(), 30);
        session.handle_square_click("e2".parse().unwrap()).unwrap();
        let view = SnapshotView::capture(&session);

        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        let mut squares = Rect::default();
        terminal
            .draw(|f| squares = draw(f, &view, "e2".parse().unwrap()))
            .unwrap();

        assert_eq!(squares.width, BOARD_WIDTH);
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("White to move - 30s"));
        assert!(text.contains('♔'));
    }
}
