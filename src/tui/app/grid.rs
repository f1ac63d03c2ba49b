//! Grid layout state for the favorites screen

use ratatui::layout::Rect;

use super::traits::SelectableList;

/// Rows each cover card takes, borders included
pub const CARD_HEIGHT: u16 = 5;

/// How many cards of `cover_width` fit across `width` (at least one)
pub fn columns_for_width(width: u16, cover_width: u16) -> usize {
    usize::from(width / cover_width.max(1)).max(1)
}

/// Selection, column count and scroll position of the cover grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridState {
    selected: usize,
    len: usize,
    columns: usize,
    /// First visible row
    offset_row: usize,
    /// Where the grid was last drawn, for mouse hit-testing
    area: Rect,
}

impl GridState {
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
            ..Self::default()
        }
    }

    /// Track a new item count, keeping the selection in range
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset_row = 0;
        } else {
            self.selected = self.selected.min(len - 1);
        }
    }

    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    pub fn rows(&self) -> usize {
        self.len.div_ceil(self.columns.max(1))
    }

    pub fn offset_row(&self) -> usize {
        self.offset_row
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Record the drawn area and scroll so the selection stays visible
    pub fn layout(&mut self, area: Rect) {
        self.area = area;
        let visible = usize::from(area.height / CARD_HEIGHT).max(1);
        let row = self.selected / self.columns.max(1);
        if row < self.offset_row {
            self.offset_row = row;
        } else if row >= self.offset_row + visible {
            self.offset_row = row + 1 - visible;
        }
    }

    /// Index of the card under terminal cell (`x`, `y`), if any
    pub fn index_at(&self, x: u16, y: u16) -> Option<usize> {
        let area = self.area;
        if area.width == 0 || x < area.x || y < area.y {
            return None;
        }
        if x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }
        let card_width = (area.width / self.columns.max(1) as u16).max(1);
        let col = usize::from((x - area.x) / card_width);
        if col >= self.columns {
            return None;
        }
        let row = usize::from((y - area.y) / CARD_HEIGHT) + self.offset_row;
        let index = row * self.columns + col;
        (index < self.len).then_some(index)
    }
}

impl SelectableList for GridState {
    fn len(&self) -> usize {
        self.len
    }

    fn selected_index(&self) -> usize {
        self.selected
    }

    fn set_selected_index(&mut self, idx: usize) {
        self.selected = if self.len == 0 {
            0
        } else {
            idx.min(self.len - 1)
        };
    }

    fn columns(&self) -> usize {
        self.columns
    }
}
