use blockfall_engine::NextPieceSnapshot;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::view::widgets::{BlockDisplay, CellContent};

/// Shows the queued piece in its spawn orientation, centered in a 4×2 box.
#[derive(Debug)]
pub struct NextPieceDisplay<'a> {
    piece: &'a NextPieceSnapshot,
    block: Option<BlockWidget<'a>>,
}

impl<'a> NextPieceDisplay<'a> {
    pub fn new(piece: &'a NextPieceSnapshot) -> Self {
        Self { piece, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for NextPieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &NextPieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let shape = &self.piece.shape;
        let piece_width = shape.first().map_or(0, Vec::len);
        let piece_height = shape.len();
        let piece_area = area.centered(
            Constraint::Length(super::cells_to_u16(piece_width) * BlockDisplay::width()),
            Constraint::Length(super::cells_to_u16(piece_height) * BlockDisplay::height()),
        );

        let col_constraints = (0..piece_width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..piece_height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let empty_block = BlockDisplay::from_content(CellContent::Empty, false);
        let occupied_block = BlockDisplay::from_content(CellContent::Piece(self.piece.kind), false);
        for (grid_row, shape_row) in grid_rows.zip(shape) {
            for (grid_cell, &occupied) in grid_row.into_iter().zip(shape_row) {
                let block = if occupied {
                    &occupied_block
                } else {
                    &empty_block
                };
                Widget::render(block, grid_cell, buf);
            }
        }
    }
}
