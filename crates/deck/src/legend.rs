use foundation::handles::ControlId;
use foundation::ids::SlideId;
use layers::MapWidget;
use tracing::debug;

/// Shows the legend control only while the title slide is current.
#[derive(Debug, Clone)]
pub struct LegendController {
    title_slide_id: SlideId,
    shown: bool,
}

impl LegendController {
    pub fn new(title_slide_id: SlideId) -> Self {
        Self {
            title_slide_id,
            shown: false,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Returns `true` if the widget was told to add or remove the legend.
    pub fn sync<W: MapWidget + ?Sized>(&mut self, widget: &mut W, slide_id: &SlideId) -> bool {
        let want = *slide_id == self.title_slide_id;
        if want == self.shown {
            return false;
        }
        if want {
            widget.add_control(ControlId::Legend);
        } else {
            widget.remove_control(ControlId::Legend);
        }
        self.shown = want;
        debug!(shown = want, slide = %slide_id, "legend toggled");
        true
    }
}
