use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

/// The transition an [`Arrival`] was waiting for was replaced before it finished.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Superseded;

impl std::fmt::Display for Superseded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "viewport transition was superseded")
    }
}

impl std::error::Error for Superseded {}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArrivalState {
    Pending,
    Arrived,
    Superseded,
}

/// Single-resolution handle for "the viewport transition finished".
///
/// Resolves at most once. Can be polled synchronously with
/// [`Arrival::try_arrived`] from an event loop, or awaited as a future.
#[derive(Debug)]
pub struct Arrival {
    rx: oneshot::Receiver<()>,
    state: ArrivalState,
}

impl Arrival {
    pub fn try_arrived(&mut self) -> ArrivalState {
        if self.state == ArrivalState::Pending {
            self.state = match self.rx.try_recv() {
                Ok(Some(())) => ArrivalState::Arrived,
                Ok(None) => ArrivalState::Pending,
                Err(oneshot::Canceled) => ArrivalState::Superseded,
            };
        }
        self.state
    }

    /// Stops listening; a later arrival is ignored.
    pub fn cancel(&mut self) {
        self.rx.close();
        if self.state == ArrivalState::Pending {
            self.state = ArrivalState::Superseded;
        }
    }
}

impl Future for Arrival {
    type Output = Result<(), Superseded>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.state {
            ArrivalState::Arrived => return Poll::Ready(Ok(())),
            ArrivalState::Superseded => return Poll::Ready(Err(Superseded)),
            ArrivalState::Pending => {}
        }
        let res = match Pin::new(&mut self.rx).poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(res) => res,
        };
        self.state = if res.is_ok() {
            ArrivalState::Arrived
        } else {
            ArrivalState::Superseded
        };
        Poll::Ready(res.map_err(|_| Superseded))
    }
}

/// Sender side: holds at most one pending arrival.
///
/// Arming a new arrival drops the previous sender, so the earlier handle
/// resolves as [`ArrivalState::Superseded`] and can never fire.
#[derive(Debug, Default)]
pub struct ArrivalSlot {
    pending: Option<oneshot::Sender<()>>,
}

impl ArrivalSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self) -> Arrival {
        let (tx, rx) = oneshot::channel();
        self.pending = Some(tx);
        Arrival {
            rx,
            state: ArrivalState::Pending,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves the pending arrival, if any.
    ///
    /// Returns `true` if a listener was still waiting.
    pub fn fire(&mut self) -> bool {
        match self.pending.take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    /// Drops the pending arrival without firing it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{ArrivalSlot, ArrivalState, Superseded};

    #[test]
    fn fires_exactly_once() {
        let mut slot = ArrivalSlot::new();
        let mut arrival = slot.arm();
        assert_eq!(arrival.try_arrived(), ArrivalState::Pending);
        assert!(slot.fire());
        assert!(!slot.fire());
        assert_eq!(arrival.try_arrived(), ArrivalState::Arrived);
        assert_eq!(arrival.try_arrived(), ArrivalState::Arrived);
    }

    #[test]
    fn re_arming_supersedes_previous() {
        let mut slot = ArrivalSlot::new();
        let mut first = slot.arm();
        let mut second = slot.arm();
        slot.fire();
        assert_eq!(first.try_arrived(), ArrivalState::Superseded);
        assert_eq!(second.try_arrived(), ArrivalState::Arrived);
    }

    #[test]
    fn cancelled_listener_is_not_reported_as_waiting() {
        let mut slot = ArrivalSlot::new();
        let mut arrival = slot.arm();
        arrival.cancel();
        assert!(!slot.fire());
        assert_eq!(arrival.try_arrived(), ArrivalState::Superseded);
    }

    #[test]
    fn can_be_awaited() {
        let mut slot = ArrivalSlot::new();
        let arrival = slot.arm();
        slot.fire();
        assert_eq!(pollster::block_on(arrival), Ok(()));

        let stale = slot.arm();
        slot.arm();
        assert_eq!(pollster::block_on(stale), Err(Superseded));
    }
}
