//! Frame loop state machine.
//!
//! Tracks `Idle → Rendering → Idle` transitions and the terminal `Closed`
//! state, and owns the clear color, which locks once the first frame begins.

mod state;

pub use state::{FrameError, FrameLoop, FrameState};
