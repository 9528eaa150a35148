/// Identifies one slide transition.
///
/// Generations are handed out in strictly increasing order so an async step
/// can tell whether the transition it belongs to is still the latest one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

/// Monotonic source of [`Generation`]s.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new transition; every earlier generation becomes stale.
    pub fn advance(&mut self) -> Generation {
        self.current += 1;
        Generation(self.current)
    }

    pub fn current(&self) -> Generation {
        Generation(self.current)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::{Generation, GenerationCounter};

    #[test]
    fn advance_invalidates_earlier_generations() {
        let mut c = GenerationCounter::new();
        assert_eq!(c.current(), Generation(0));
        let a = c.advance();
        assert!(c.is_current(a));
        let b = c.advance();
        assert!(b > a);
        assert!(!c.is_current(a));
        assert!(c.is_current(b));
    }
}
