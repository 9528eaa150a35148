/// Fraction of the viewport height, measured from the top, that a slide's
/// top edge has to cross before the slide stops being current.
pub const DEFAULT_TRIGGER_RATIO: f64 = 0.7;

/// Maps a scroll offset to the index of the dominant slide.
///
/// Stateless; the deck compares the result with its current index.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SlideIndexTracker {
    trigger_ratio: f64,
}

impl Default for SlideIndexTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_RATIO)
    }
}

impl SlideIndexTracker {
    pub fn new(trigger_ratio: f64) -> Self {
        Self { trigger_ratio }
    }

    pub fn trigger_ratio(&self) -> f64 {
        self.trigger_ratio
    }

    /// `slide_top - scroll_offset + trigger_ratio * viewport_height`.
    pub fn trigger_line(&self, slide_top: f64, scroll_offset: f64, viewport_height: f64) -> f64 {
        slide_top - scroll_offset + self.trigger_ratio * viewport_height
    }

    /// First slide whose trigger line is still `>= 0`.
    ///
    /// Returns `slide_tops.len()` when every slide has scrolled past; callers
    /// must treat that as "no change". `slide_tops` are absolute document
    /// offsets in document order.
    pub fn index_for_scroll(
        &self,
        scroll_offset: f64,
        viewport_height: f64,
        slide_tops: &[f64],
    ) -> usize {
        slide_tops
            .iter()
            .position(|&top| self.trigger_line(top, scroll_offset, viewport_height) >= 0.0)
            .unwrap_or(slide_tops.len())
    }
}

#[cfg(test)]
mod tests {
    use super::SlideIndexTracker;

    const TOPS: [f64; 3] = [0.0, 1000.0, 2000.0];

    #[test]
    fn picks_first_slide_below_trigger() {
        let t = SlideIndexTracker::default();
        assert_eq!(t.index_for_scroll(0.0, 1000.0, &TOPS), 0);
        assert_eq!(t.index_for_scroll(700.0, 1000.0, &TOPS), 0);
        assert_eq!(t.index_for_scroll(701.0, 1000.0, &TOPS), 1);
        assert_eq!(t.index_for_scroll(2700.0, 1000.0, &TOPS), 2);
    }

    #[test]
    fn past_the_end_is_one_past_last_index() {
        let t = SlideIndexTracker::default();
        assert_eq!(t.index_for_scroll(5000.0, 1000.0, &TOPS), 3);
        assert_eq!(t.index_for_scroll(0.0, 1000.0, &[]), 0);
    }

    #[test]
    fn index_never_decreases_while_scrolling_down() {
        let t = SlideIndexTracker::default();
        let tops = [120.0, 900.0, 900.0, 2400.0, 4100.0];
        let mut last = 0;
        let mut scroll = 0.0;
        while scroll <= 6000.0 {
            let idx = t.index_for_scroll(scroll, 850.0, &tops);
            assert!(idx >= last, "index went from {last} to {idx} at {scroll}");
            last = idx;
            scroll += 7.5;
        }
        assert_eq!(last, tops.len());
    }

    #[test]
    fn ratio_is_configurable() {
        let top_edge = SlideIndexTracker::new(0.0);
        assert_eq!(top_edge.index_for_scroll(1.0, 1000.0, &TOPS), 1);
        let bottom_edge = SlideIndexTracker::new(1.0);
        assert_eq!(bottom_edge.index_for_scroll(1000.0, 1000.0, &TOPS), 0);
    }
}
