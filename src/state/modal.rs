/// Modal viewer state machine
///
/// The modal navigates over the visible set only. Indices here are
/// positions in that set, not in the season.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open { index: usize },
}

/// Two-state viewer: `Closed` or `Open(index)`.
///
/// Every operation takes the current visible-set length `len` so the
/// index invariant `index < len` can be checked on the spot.
#[derive(Debug, Clone, Default)]
pub struct ModalViewer {
    state: ModalState,
}

impl ModalViewer {
    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    /// Visible-set index being shown, if open
    pub fn index(&self) -> Option<usize> {
        match self.state {
            ModalState::Open { index } => Some(index),
            ModalState::Closed => None,
        }
    }

    /// Open on `index`. Rejected (state unchanged) if `index` is not in
    /// the visible set. Opening while already open moves to the new item.
    pub fn open(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            return false;
        }
        self.state = ModalState::Open { index };
        true
    }

    /// Step forward, wrapping at the end. Returns the new index.
    pub fn next(&mut self, len: usize) -> Option<usize> {
        self.step(len, |index| (index + 1) % len)
    }

    /// Step back, wrapping at the start. Returns the new index.
    pub fn prev(&mut self, len: usize) -> Option<usize> {
        self.step(len, |index| (index + len - 1) % len)
    }

    fn step(&mut self, len: usize, advance: impl Fn(usize) -> usize) -> Option<usize> {
        let ModalState::Open { index } = self.state else {
            return None;
        };
        if len == 0 {
            self.state = ModalState::Closed;
            return None;
        }
        let next = advance(index.min(len - 1));
        self.state = ModalState::Open { index: next };
        Some(next)
    }

    /// Close the viewer. Returns false if it was already closed.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = ModalState::Closed;
        was_open
    }
}
