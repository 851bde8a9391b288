/// Generation-tagged visual transitions
///
/// Fades and preloads finish on a timer or a background task. Every new
/// request bumps the generation, so a completion that arrives for an older
/// request is recognised as stale and dropped.

/// A single in-flight transition slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    generation: u64,
    pending: bool,
}

impl Transition {
    /// Start a new transition, invalidating any earlier one.
    /// Returns the generation the completion must carry.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.pending = true;
        self.generation
    }

    /// Is `generation` the transition still in flight?
    pub fn is_current(&self, generation: u64) -> bool {
        self.pending && self.generation == generation
    }

    /// Complete the transition if `generation` is current.
    /// Returns false for stale or already finished generations.
    pub fn finish(&mut self, generation: u64) -> bool {
        if self.is_current(generation) {
            self.pending = false;
            true
        } else {
            false
        }
    }

    /// Drop whatever is in flight
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Generation still in flight, if any
    pub fn in_flight(&self) -> Option<u64> {
        self.pending.then_some(self.generation)
    }
}
