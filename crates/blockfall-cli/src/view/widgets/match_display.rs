use blockfall_engine::{MatchSnapshot, Phase};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::view::widgets::{BoardDisplay, NextPieceDisplay, StatsDisplay, color, style};

/// Full match view: stats on the left, the board in the middle and the
/// next piece on the right, with an overlay while paused or after game over.
#[derive(Debug)]
pub struct MatchDisplay<'a> {
    snapshot: &'a MatchSnapshot,
    show_preview: bool,
}

impl<'a> MatchDisplay<'a> {
    pub fn new(snapshot: &'a MatchSnapshot) -> Self {
        Self {
            snapshot,
            show_preview: true,
        }
    }

    pub fn show_preview(self, show_preview: bool) -> Self {
        Self {
            show_preview,
            ..self
        }
    }

    /// Rows needed to draw the tallest column.
    pub fn height(&self) -> u16 {
        let (stats, board, next_piece) = self.panels();
        stats.height().max(board.height()).max(next_piece.height())
    }

    fn border_style(&self) -> Color {
        match self.snapshot.phase {
            Phase::Playing => color::WHITE,
            Phase::Paused => color::YELLOW,
            Phase::GameOver => color::RED,
        }
    }

    fn panels(&self) -> (StatsDisplay<'a>, BoardDisplay<'a>, NextPieceDisplay<'a>) {
        let border_style = self.border_style();
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::symmetric(1, 0))
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let stats = StatsDisplay::new(self.snapshot).block(panel("STATS"));
        let board = BoardDisplay::new(self.snapshot)
            .show_preview(self.show_preview)
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let next_piece = NextPieceDisplay::new(&self.snapshot.next).block(panel("NEXT"));
        (stats, board, next_piece)
    }
}

impl Widget for MatchDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &MatchDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let (stats, board, next_piece) = self.panels();

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
            Constraint::Length(next_piece.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] = Layout::vertical([Constraint::Length(board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_piece.height())]).areas(right_column);

        let board_width = board.width();
        stats.render(stats_area, buf);
        board.render(board_area, buf);
        next_piece.render(next_area, buf);

        let popup = match self.snapshot.phase {
            Phase::Playing => None,
            Phase::Paused => Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW))),
            Phase::GameOver => Some(("GAME OVER", Style::new().fg(color::WHITE).bg(color::RED))),
        };

        if let Some((text, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
