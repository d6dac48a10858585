use std::iter;

use blockfall_engine::MatchSnapshot;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::{BlockDisplay, CellContent};

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    snapshot: &'a MatchSnapshot,
    show_preview: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(snapshot: &'a MatchSnapshot) -> Self {
        Self {
            snapshot,
            show_preview: false,
            block: None,
        }
    }

    pub fn show_preview(self, show_preview: bool) -> Self {
        Self {
            show_preview,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        super::cells_to_u16(self.snapshot.width) * BlockDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        super::cells_to_u16(self.snapshot.height) * BlockDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

/// Lays the active piece (and optionally its drop preview) over the settled
/// blocks. Piece cells above the board are left out.
fn compose_cells(snapshot: &MatchSnapshot, show_preview: bool) -> Vec<Vec<CellContent>> {
    let mut cells: Vec<Vec<CellContent>> = snapshot
        .cells
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| cell.map_or(CellContent::Empty, CellContent::Piece))
                .collect()
        })
        .collect();

    let mut paint = |positions: &[(i32, i32)], content: CellContent| {
        for &(col, row) in positions {
            let (Ok(col), Ok(row)) = (usize::try_from(col), usize::try_from(row)) else {
                continue;
            };
            if let Some(cell) = cells.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = content;
            }
        }
    };

    let kind = snapshot.active.kind;
    if show_preview && snapshot.phase.is_playing() {
        paint(&snapshot.drop_preview, CellContent::Ghost(kind));
    }
    paint(&snapshot.active.cells, CellContent::Piece(kind));
    cells
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let cells = compose_cells(self.snapshot, self.show_preview);

        let col_constraints =
            (0..self.snapshot.width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..self.snapshot.height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, &cells) {
            for (grid_cell, content) in iter::zip(grid_row, row) {
                BlockDisplay::from_content(*content, true).render(grid_cell, buf);
            }
        }
    }
}
