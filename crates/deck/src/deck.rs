//! The slide deck orchestrator.
//!
//! Every slide change runs the same sequence: hide the other slides, resolve
//! the entering slide's dataset, redraw the overlay, fly the viewport, arm the
//! tooltip reveal and sync the legend.
//!
//! A change is split into [`SlideDeck::begin_transition`] and
//! [`SlideDeck::complete_transition`] so the dataset can be awaited without
//! holding the deck. Each transition carries a [`Generation`]; a resolved
//! dataset is applied only if no newer transition started meanwhile, so the
//! overlay and the pending arrival always belong to the last requested slide.

use std::rc::Rc;

use formats::FeatureCollection;
use foundation::ids::SlideId;
use layers::{MapWidget, OverlayLayer, OverlayRenderer, SlideRenderOptions};
use runtime::{Arrival, ArrivalState, Generation, GenerationCounter};
use streaming::{FeatureCollectionSource, FetchError, preload_all};
use tracing::{debug, info, warn};

use crate::config::DeckConfig;
use crate::error::DeckError;
use crate::legend::LegendController;
use crate::slide::{Slide, SlideLayout, SlideSurface};
use crate::tracker::SlideIndexTracker;
use crate::viewport::ViewportController;

/// Index after `current`, wrapping to the first slide.
pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

/// Index before `current`, wrapping to the last slide.
pub fn previous_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        (current - 1).min(len - 1)
    }
}

/// A started slide change waiting for its dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    generation: Generation,
    index: usize,
    slide_id: SlideId,
}

impl Transition {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slide_id(&self) -> &SlideId {
        &self.slide_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The overlay now shows this slide.
    Applied { index: usize, features: usize },
    /// A newer transition started before this one resolved; nothing changed.
    Stale,
}

#[derive(Debug)]
struct PendingReveal {
    generation: Generation,
    arrival: Arrival,
}

pub struct SlideDeck<S, W, D> {
    config: DeckConfig,
    slides: Vec<Slide>,
    layout: SlideLayout,
    current: usize,
    displayed: Option<usize>,
    tracker: SlideIndexTracker,
    viewport: ViewportController,
    legend: LegendController,
    renderer: OverlayRenderer,
    options: SlideRenderOptions,
    generations: GenerationCounter,
    pending_reveal: Option<PendingReveal>,
    source: Rc<S>,
    widget: W,
    surface: D,
}

impl<S, W, D> SlideDeck<S, W, D>
where
    S: FeatureCollectionSource,
    W: MapWidget,
    D: SlideSurface,
{
    pub fn new(
        config: DeckConfig,
        mut slides: Vec<Slide>,
        source: Rc<S>,
        widget: W,
        surface: D,
    ) -> Result<Self, DeckError> {
        config.validate()?;
        if slides.is_empty() {
            return Err(DeckError::EmptyDeck);
        }
        for slide in &mut slides {
            if config.permanent_tooltip_slides.contains(&slide.id) {
                slide.permanent_tooltips = true;
            }
        }
        Ok(Self {
            tracker: SlideIndexTracker::new(config.trigger_ratio),
            legend: LegendController::new(config.title_slide_id.clone()),
            config,
            slides,
            layout: SlideLayout::default(),
            current: 0,
            displayed: None,
            viewport: ViewportController::new(),
            renderer: OverlayRenderer::new(),
            options: SlideRenderOptions::new(),
            generations: GenerationCounter::new(),
            pending_reveal: None,
            source,
            widget,
            surface,
        })
    }

    pub fn with_render_options(mut self, options: SlideRenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_layout(mut self, layout: SlideLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Replaces the slide positions, e.g. after a resize.
    pub fn set_layout(&mut self, layout: SlideLayout) {
        self.layout = layout;
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.current]
    }

    /// Index of the slide whose dataset is on the map. Lags behind
    /// [`Self::current_index`] while a dataset loads or after a failed load.
    pub fn displayed_index(&self) -> Option<usize> {
        self.displayed
    }

    pub fn overlay(&self) -> Option<&OverlayLayer> {
        self.renderer.current()
    }

    pub fn legend_shown(&self) -> bool {
        self.legend.is_shown()
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn source(&self) -> Rc<S> {
        Rc::clone(&self.source)
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn surface(&self) -> &D {
        &self.surface
    }

    pub fn slide_ids(&self) -> Vec<SlideId> {
        self.slides.iter().map(|s| s.id.clone()).collect()
    }

    /// Warms the source for every slide when enabled in the config.
    pub async fn preload(&self) -> usize {
        if !self.config.preload {
            return 0;
        }
        preload_all(&*self.source, &self.slide_ids()).await
    }

    /// Index the scroll position asks for, if it differs from the current one.
    ///
    /// Out-of-range tracker results (scrolled past the last slide) are
    /// treated as no change.
    pub fn scroll_target(&self, scroll_offset: f64, viewport_height: f64) -> Option<usize> {
        let tops = self.layout.absolute_tops();
        let idx = self
            .tracker
            .index_for_scroll(scroll_offset, viewport_height, &tops);
        (idx < self.slides.len() && idx != self.current).then_some(idx)
    }

    /// Enters `index`: updates the current index and slide visibility and
    /// starts a new generation. The caller resolves the dataset and hands it
    /// to [`Self::complete_transition`].
    pub fn begin_transition(&mut self, index: usize) -> Result<Transition, DeckError> {
        if index >= self.slides.len() {
            return Err(DeckError::IndexOutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        self.current = index;
        for (i, slide) in self.slides.iter_mut().enumerate() {
            let hidden = i != index;
            slide.hidden = hidden;
            self.surface.set_hidden(i, &slide.id, hidden);
        }

        // A reveal armed for the previous slide must not fire any more.
        if let Some(mut stale) = self.pending_reveal.take() {
            stale.arrival.cancel();
        }

        let generation = self.generations.advance();
        let slide_id = self.slides[index].id.clone();
        debug!(index, slide = %slide_id, generation = generation.0, "transition started");
        Ok(Transition {
            generation,
            index,
            slide_id,
        })
    }

    /// Applies a resolved dataset if `transition` is still the latest one.
    ///
    /// On fetch failure nothing is drawn, the previous overlay stays and the
    /// current index keeps pointing at the entering slide.
    pub fn complete_transition(
        &mut self,
        transition: Transition,
        dataset: Result<Rc<FeatureCollection>, FetchError>,
    ) -> Result<TransitionOutcome, DeckError> {
        if !self.generations.is_current(transition.generation) {
            debug!(
                slide = %transition.slide_id,
                generation = transition.generation.0,
                "discarding stale transition"
            );
            return Ok(TransitionOutcome::Stale);
        }

        let dataset = match dataset {
            Ok(fc) => fc,
            Err(source) => {
                warn!(slide = %transition.slide_id, error = %source, "dataset unavailable");
                return Err(DeckError::Fetch {
                    slide_id: transition.slide_id,
                    source,
                });
            }
        };

        let index = transition.index;
        let options = self.options.for_slide(&transition.slide_id);
        let layer = self.renderer.render(&mut self.widget, &dataset, options);
        let features = layer.len();
        let arrival = self.viewport.fly_to(&mut self.widget, &dataset, layer);

        if self.slides[index].permanent_tooltips {
            match arrival {
                Some(arrival) => {
                    self.pending_reveal = Some(PendingReveal {
                        generation: transition.generation,
                        arrival,
                    });
                }
                // No flight means no arrival will ever be reported.
                None => {
                    let revealed = layer.reveal_tooltips(&mut self.widget);
                    debug!(revealed, "permanent tooltips opened without a flight");
                }
            }
        }

        self.legend.sync(&mut self.widget, &transition.slide_id);
        self.displayed = Some(index);
        info!(index, slide = %transition.slide_id, features, "slide shown");
        Ok(TransitionOutcome::Applied { index, features })
    }

    /// Runs a whole transition to `index`.
    pub async fn go_to(&mut self, index: usize) -> Result<TransitionOutcome, DeckError> {
        let transition = self.begin_transition(index)?;
        let source = Rc::clone(&self.source);
        let dataset = source.resolve(transition.slide_id()).await;
        self.complete_transition(transition, dataset)
    }

    /// Enters the current (initially first) slide.
    pub async fn start(&mut self) -> Result<TransitionOutcome, DeckError> {
        self.go_to(self.current).await
    }

    pub async fn go_next(&mut self) -> Result<TransitionOutcome, DeckError> {
        self.go_to(next_index(self.current, self.slides.len())).await
    }

    pub async fn go_previous(&mut self) -> Result<TransitionOutcome, DeckError> {
        self.go_to(previous_index(self.current, self.slides.len()))
            .await
    }

    /// Transitions if the scroll position selects a different slide.
    pub async fn on_scroll(
        &mut self,
        scroll_offset: f64,
        viewport_height: f64,
    ) -> Result<Option<TransitionOutcome>, DeckError> {
        match self.scroll_target(scroll_offset, viewport_height) {
            Some(index) => self.go_to(index).await.map(Some),
            None => Ok(None),
        }
    }

    /// Hook for the widget's "transition finished" event.
    ///
    /// Returns the number of tooltips revealed.
    pub fn on_viewport_arrived(&mut self) -> usize {
        self.viewport.notify_arrived();

        let Some(mut pending) = self.pending_reveal.take() else {
            return 0;
        };
        match pending.arrival.try_arrived() {
            ArrivalState::Arrived if self.generations.is_current(pending.generation) => {}
            ArrivalState::Pending => {
                self.pending_reveal = Some(pending);
                return 0;
            }
            _ => return 0,
        }

        let Some(layer) = self.renderer.current() else {
            return 0;
        };
        let revealed = layer.reveal_tooltips(&mut self.widget);
        debug!(revealed, "permanent tooltips opened");
        revealed
    }
}

impl<S, W, D> std::fmt::Debug for SlideDeck<S, W, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideDeck")
            .field("slides", &self.slides.len())
            .field("current", &self.current)
            .field("displayed", &self.displayed)
            .field("generation", &self.generations.current())
            .field("legend_shown", &self.legend.is_shown())
            .finish()
    }
}
