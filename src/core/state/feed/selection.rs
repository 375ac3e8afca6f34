//! Keyboard selection over the rendered rows

/// Selected row within the rows currently rendered by a feed
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected_index: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// Select `index`, or clear the selection if it is out of bounds
    pub fn select(&mut self, index: usize, len: usize) {
        self.selected_index = (index < len).then_some(index);
    }

    pub fn deselect(&mut self) {
        self.selected_index = None;
    }

    /// Move up one row; selects the first row when nothing is selected
    pub fn scroll_up(&mut self, len: usize) {
        self.selected_index = match self.selected_index {
            Some(index) => Some(index.saturating_sub(1)),
            None if len > 0 => Some(0),
            None => None,
        };
    }

    /// Move down one row, stopping at the last one
    /// Returns: true if the selection moved
    pub fn scroll_down(&mut self, len: usize) -> bool {
        let previous = self.selected_index;
        self.selected_index = match previous {
            Some(index) if index + 1 < len => Some(index + 1),
            Some(index) => Some(index),
            None if len > 0 => Some(0),
            None => None,
        };
        self.selected_index != previous
    }

    pub fn select_first(&mut self, len: usize) {
        if len > 0 {
            self.selected_index = Some(0);
        }
    }

    /// Returns: true if the selection moved
    pub fn select_last(&mut self, len: usize) -> bool {
        let previous = self.selected_index;
        if len > 0 {
            self.selected_index = Some(len - 1);
        }
        self.selected_index != previous
    }

    /// Keep the selection inside a row list that may have shrunk
    pub fn clamp(&mut self, len: usize) {
        if let Some(index) = self.selected_index {
            self.selected_index = (len > 0).then(|| index.min(len - 1));
        }
    }

    /// Whether the selection sits within `threshold` rows of the tail
    pub fn is_near_end(&self, len: usize, threshold: usize) -> bool {
        match self.selected_index {
            Some(index) if len > 0 => index + threshold >= len - 1,
            _ => false,
        }
    }
}
