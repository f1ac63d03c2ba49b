//! Navigation behavior shared by list-like widgets

/// Navigable collection with a single selection
///
/// Linear moves (`select_next`/`select_prev`) step one item. Row moves step
/// by `columns()`, so the same trait drives a one-column list and a grid.
pub trait SelectableList {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn selected_index(&self) -> usize;

    /// Sets the selected index (implementors clamp to the valid range)
    fn set_selected_index(&mut self, idx: usize);

    /// Items per row
    fn columns(&self) -> usize {
        1
    }

    /// True when the selection is on the last item
    fn at_end(&self) -> bool {
        self.is_empty() || self.selected_index() + 1 >= self.len()
    }

    fn select_next(&mut self) {
        if !self.is_empty() {
            let new_idx = (self.selected_index() + 1).min(self.len() - 1);
            self.set_selected_index(new_idx);
        }
    }

    fn select_prev(&mut self) {
        let new_idx = self.selected_index().saturating_sub(1);
        self.set_selected_index(new_idx);
    }

    fn select_first(&mut self) {
        self.set_selected_index(0);
    }

    fn select_last(&mut self) {
        if !self.is_empty() {
            self.set_selected_index(self.len() - 1);
        }
    }

    /// Move one row down. A partial last row is reached by landing on its
    /// final item. Returns false if the selection was already on the last row.
    fn select_row_down(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let cols = self.columns().max(1);
        let last = self.len() - 1;
        let current = self.selected_index();
        if current / cols >= last / cols {
            return false;
        }
        self.set_selected_index((current + cols).min(last));
        true
    }

    fn select_row_up(&mut self) {
        let cols = self.columns().max(1);
        let current = self.selected_index();
        if current >= cols {
            self.set_selected_index(current - cols);
        }
    }
}
