use log::debug;

/// The slice of the note list that fits on screen. Scrolls so the selected
/// row keeps `buffer` rows of context above and below it.
pub struct Viewport {
    window: (usize, usize),
    buffer: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        let height = height.max(1);
        Viewport {
            window: (0, height - 1),
            buffer: 2,
        }
    }

    /// Inclusive (first, last) row indices.
    pub fn window(&self) -> (usize, usize) {
        self.window
    }

    pub fn height(&self) -> usize {
        self.window.1 - self.window.0 + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.window.0 && index <= self.window.1
    }

    pub fn resize(&mut self, height: usize) {
        let height = height.max(1);
        self.window = (self.window.0, self.window.0 + height - 1);
    }

    pub fn follow(&mut self, selected: usize, list_len: usize) {
        let height = self.height();
        let mut start = self.window.0;

        if selected + self.buffer >= start + height {
            start = (selected + self.buffer + 1).saturating_sub(height);
        }
        if selected < start + self.buffer {
            start = selected.saturating_sub(self.buffer);
        }
        start = start.min(list_len.saturating_sub(height));
        // with a window no taller than the buffer the rules above can disagree
        start = start.min(selected).max((selected + 1).saturating_sub(height));

        if start != self.window.0 {
            debug!(
                "scrolling window to {}..{} for row {}",
                start,
                start + height - 1,
                selected
            );
        }
        self.window = (start, start + height - 1);
    }
}
