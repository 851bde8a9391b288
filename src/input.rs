//! Input routing for the modal viewer.
//!
//! Keyboard, pointer and touch inputs are translated into viewer commands
//! through one routing table. Each route names the capability it needs;
//! today every route needs an open modal, so with the modal closed every
//! input is a no-op.

/// Raw inputs the router understands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    ArrowLeft,
    ArrowRight,
    Escape,
    /// The modal's close (×) control
    CloseClicked,
    /// A click on the dimmed area around the modal content
    BackdropClicked,
    PrevClicked,
    NextClicked,
    /// Finger down, horizontal position in logical pixels
    TouchStarted { x: f32 },
    /// Finger up, horizontal position in logical pixels
    TouchEnded { x: f32 },
}

/// Viewer commands produced by routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Prev,
    Next,
    Close,
}

/// State a route requires before it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    ModalOpen,
}

/// Discriminant of `Input`, used as the routing key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputKind {
    ArrowLeft,
    ArrowRight,
    Escape,
    CloseClicked,
    BackdropClicked,
    PrevClicked,
    NextClicked,
    TouchStarted,
    TouchEnded,
}

impl From<Input> for InputKind {
    fn from(input: Input) -> Self {
        match input {
            Input::ArrowLeft => InputKind::ArrowLeft,
            Input::ArrowRight => InputKind::ArrowRight,
            Input::Escape => InputKind::Escape,
            Input::CloseClicked => InputKind::CloseClicked,
            Input::BackdropClicked => InputKind::BackdropClicked,
            Input::PrevClicked => InputKind::PrevClicked,
            Input::NextClicked => InputKind::NextClicked,
            Input::TouchStarted { .. } => InputKind::TouchStarted,
            Input::TouchEnded { .. } => InputKind::TouchEnded,
        }
    }
}

/// What a route does once its gate passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Command(Command),
    /// Remember where a swipe started
    SwipeStart,
    /// Resolve a swipe against its start
    SwipeEnd,
}

const ROUTES: &[(InputKind, Gate, Action)] = &[
    (InputKind::ArrowLeft, Gate::ModalOpen, Action::Command(Command::Prev)),
    (InputKind::ArrowRight, Gate::ModalOpen, Action::Command(Command::Next)),
    (InputKind::Escape, Gate::ModalOpen, Action::Command(Command::Close)),
    (InputKind::CloseClicked, Gate::ModalOpen, Action::Command(Command::Close)),
    (InputKind::BackdropClicked, Gate::ModalOpen, Action::Command(Command::Close)),
    (InputKind::PrevClicked, Gate::ModalOpen, Action::Command(Command::Prev)),
    (InputKind::NextClicked, Gate::ModalOpen, Action::Command(Command::Next)),
    (InputKind::TouchStarted, Gate::ModalOpen, Action::SwipeStart),
    (InputKind::TouchEnded, Gate::ModalOpen, Action::SwipeEnd),
];

/// Routes inputs to commands. Holds the only input state there is: the
/// start of a swipe in progress.
#[derive(Debug, Clone)]
pub struct InputRouter {
    swipe_threshold: f32,
    swipe_start: Option<f32>,
}

impl InputRouter {
    pub fn new(swipe_threshold: f32) -> Self {
        Self {
            swipe_threshold,
            swipe_start: None,
        }
    }

    /// Route `input` given whether the modal is open.
    pub fn route(&mut self, input: Input, modal_open: bool) -> Option<Command> {
        let kind = InputKind::from(input);
        let (_, gate, action) = ROUTES.iter().find(|(k, _, _)| *k == kind)?;

        let allowed = match gate {
            Gate::ModalOpen => modal_open,
        };
        if !allowed {
            self.swipe_start = None;
            return None;
        }

        match (action, input) {
            (Action::Command(command), _) => Some(*command),
            (Action::SwipeStart, Input::TouchStarted { x }) => {
                self.swipe_start = Some(x);
                None
            }
            (Action::SwipeEnd, Input::TouchEnded { x }) => {
                let start = self.swipe_start.take()?;
                self.resolve_swipe(start, x)
            }
            _ => None,
        }
    }

    /// Swipe left (finger moves towards smaller x) shows the next image,
    /// swipe right the previous one. Travel must exceed the threshold.
    fn resolve_swipe(&self, start: f32, end: f32) -> Option<Command> {
        if end < start - self.swipe_threshold {
            Some(Command::Next)
        } else if end > start + self.swipe_threshold {
            Some(Command::Prev)
        } else {
            None
        }
    }
}
