use foundation::ids::SlideId;

#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub id: SlideId,
    /// Open a permanent tooltip on every feature once the viewport arrives.
    pub permanent_tooltips: bool,
    /// Only the orchestrator writes this.
    pub hidden: bool,
}

impl Slide {
    pub fn new(id: impl Into<SlideId>) -> Self {
        Self {
            id: id.into(),
            permanent_tooltips: false,
            hidden: false,
        }
    }

    pub fn with_permanent_tooltips(mut self, on: bool) -> Self {
        self.permanent_tooltips = on;
        self
    }
}

/// Vertical slide positions as reported by the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideLayout {
    /// Offset of the element containing the slides.
    pub container_offset: f64,
    /// Each slide's offset inside the container, in slide order.
    pub slide_offsets: Vec<f64>,
}

impl SlideLayout {
    pub fn new(container_offset: f64, slide_offsets: Vec<f64>) -> Self {
        Self {
            container_offset,
            slide_offsets,
        }
    }

    pub fn absolute_tops(&self) -> Vec<f64> {
        self.slide_offsets
            .iter()
            .map(|o| self.container_offset + o)
            .collect()
    }
}

/// Presentational side of slide visibility (the page markup).
pub trait SlideSurface {
    fn set_hidden(&mut self, index: usize, slide_id: &SlideId, hidden: bool);
}

/// Surface for headless use; visibility lives only on [`Slide::hidden`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl SlideSurface for NullSurface {
    fn set_hidden(&mut self, _index: usize, _slide_id: &SlideId, _hidden: bool) {}
}

#[cfg(test)]
mod tests {
    use super::SlideLayout;

    #[test]
    fn absolute_tops_include_container_offset() {
        let layout = SlideLayout::new(64.0, vec![0.0, 900.0]);
        assert_eq!(layout.absolute_tops(), vec![64.0, 964.0]);
    }
}
