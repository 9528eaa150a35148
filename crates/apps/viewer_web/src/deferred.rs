use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

pub type DeferredJob = Box<dyn FnOnce()>;

/// Runs `f` on the shared value now, or hands it to `defer` when the value
/// is already borrowed further up the stack (a JS callback re-entering the
/// wasm glue). Returns `f`'s result only when it ran immediately.
pub fn run_or_defer<T, R, F>(
    cell: &Rc<RefCell<T>>,
    f: F,
    defer: impl FnOnce(DeferredJob),
) -> Option<R>
where
    T: 'static,
    F: FnOnce(&mut T) -> R + 'static,
{
    if let Ok(mut inner) = cell.try_borrow_mut() {
        return Some(f(&mut inner));
    }
    debug!("state busy, deferring call");
    let cell = Rc::clone(cell);
    defer(Box::new(move || {
        let Ok(mut inner) = cell.try_borrow_mut() else {
            warn!("deferred call dropped, state still borrowed");
            return;
        };
        f(&mut inner);
    }));
    None
}

#[cfg(test)]
mod tests {
    use super::{DeferredJob, run_or_defer};
    use std::cell::RefCell;
    use std::rc::Rc;

    use deck::{DeckConfig, NullSurface, Slide, SlideDeck};
    use formats::{Feature, FeatureCollection, GeoPoint, Geometry};
    use layers::testing::RecordingWidget;
    use pollster::block_on;
    use pretty_assertions::assert_eq;
    use streaming::{FeatureCollectionSource, StaticSource};

    #[test]
    fn runs_immediately_when_free() {
        let cell = Rc::new(RefCell::new(1));
        let mut queued: Vec<DeferredJob> = Vec::new();
        let out = run_or_defer(
            &cell,
            |n| {
                *n += 1;
                *n
            },
            |job| queued.push(job),
        );
        assert_eq!(out, Some(2));
        assert!(queued.is_empty());
    }

    #[test]
    fn arrival_reported_mid_transition_still_reveals() {
        let points = FeatureCollection::new(
            (0..2)
                .map(|i| {
                    Feature::new(Geometry::Point(GeoPoint::new(i as f64, 0.0)))
                        .with_property("label", format!("pt-{i}"))
                })
                .collect(),
        );
        let source = Rc::new(StaticSource::new().with_dataset("title-slide", points));
        let config = DeckConfig {
            permanent_tooltip_slides: vec!["title-slide".into()],
            ..DeckConfig::default()
        };
        let deck = SlideDeck::new(
            config,
            vec![Slide::new("title-slide")],
            Rc::clone(&source),
            RecordingWidget::new(),
            NullSurface,
        )
        .unwrap();
        let deck = Rc::new(RefCell::new(deck));

        let mut queued: Vec<DeferredJob> = Vec::new();
        {
            let mut busy = deck.borrow_mut();
            let transition = busy.begin_transition(0).unwrap();
            let dataset = block_on(source.resolve(transition.slide_id()));
            busy.complete_transition(transition, dataset).unwrap();

            // The map reports arrival while the deck is still borrowed.
            let now = run_or_defer(
                &deck,
                |d| d.on_viewport_arrived(),
                |job| queued.push(job),
            );
            assert_eq!(now, None);
            assert!(busy.widget().features().all(|f| !f.tooltip_open));
        }

        assert_eq!(queued.len(), 1);
        for job in queued {
            job();
        }
        let deck = deck.borrow();
        assert_eq!(deck.widget().total_features(), 2);
        assert!(deck.widget().features().all(|f| f.tooltip_open));
    }

    #[test]
    fn deferred_job_is_dropped_if_still_busy() {
        let cell = Rc::new(RefCell::new(0));
        let mut queued: Vec<DeferredJob> = Vec::new();
        let guard = cell.borrow_mut();
        assert_eq!(run_or_defer(&cell, |n| *n += 1, |job| queued.push(job)), None);
        for job in queued {
            job();
        }
        drop(guard);
        assert_eq!(*cell.borrow(), 0);
    }
}
