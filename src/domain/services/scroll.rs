#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;

use ratatui::widgets::ScrollbarState;

const PAGE_JUMP: u16 = 10;

/// Viewport offset into a rendered list of lines. The chat transcript drives
/// it line by line; the related-content panel drives it through `reveal` so
/// the selected card is always on screen.
#[derive(Default)]
pub struct Scroll {
    list_length: u16,
    viewport_length: u16,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Scroll {
    fn max_position(&self) -> u16 {
        return self.list_length.saturating_sub(self.viewport_length);
    }

    pub fn up(&mut self) {
        self.position = self.position.saturating_sub(1);
        self.scrollbar_state.prev();
    }

    pub fn up_page(&mut self) {
        for _ in 0..PAGE_JUMP {
            self.up();
        }
    }

    pub fn down(&mut self) {
        self.position = self.position.saturating_add(1).min(self.max_position());
        self.scrollbar_state.next();
    }

    pub fn down_page(&mut self) {
        for _ in 0..PAGE_JUMP {
            self.down();
        }
    }

    pub fn last(&mut self) {
        self.position = self.max_position();
        self.scrollbar_state.last();
    }

    /// Shifts the viewport the minimum amount needed to bring the line span
    /// `first..=last` fully into view. Spans taller than the viewport pin to
    /// their first line.
    pub fn reveal(&mut self, first: u16, last: u16) {
        if first < self.position {
            self.position = first;
        } else if self.viewport_length > 0 {
            let bottom = self.position + self.viewport_length - 1;
            if last > bottom {
                self.position = last - self.viewport_length + 1;
            }
        }
        if last.saturating_sub(first) >= self.viewport_length {
            self.position = first;
        }

        self.position = self.position.min(self.max_position());
        self.scrollbar_state = self.scrollbar_state.position(self.position);
    }

    /// True while scrollable content extends below the viewport, driving the
    /// "more content below" affordance.
    pub fn has_more_below(&self) -> bool {
        return self.position < self.max_position();
    }

    pub fn set_state(&mut self, list_length: u16, viewport_length: u16) {
        self.list_length = list_length;
        self.viewport_length = viewport_length;
        self.position = self.position.min(self.max_position());
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(list_length)
            .viewport_content_length(viewport_length);
    }
}
