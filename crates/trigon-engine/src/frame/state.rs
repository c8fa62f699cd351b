use std::fmt;

use crate::paint::Color;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameState {
    /// Window open, no frame in flight.
    Idle,
    /// Clear/bind/draw/present executing.
    Rendering,
    /// Window closed; no further frames.
    Closed,
}

/// Invalid frame-loop transition or late configuration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameError {
    /// `begin` while a frame is already in flight.
    FrameInFlight,
    /// `end` without a matching `begin`.
    NoFrameInFlight,
    /// Any transition after the window closed.
    Closed,
    /// Clear color changed after rendering began.
    ClearColorLocked,
    /// Clear color with a NaN or infinite channel.
    NonFiniteColor,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameInFlight => f.write_str("a frame is already being rendered"),
            Self::NoFrameInFlight => f.write_str("no frame is being rendered"),
            Self::Closed => f.write_str("frame loop is closed"),
            Self::ClearColorLocked => {
                f.write_str("background color is fixed once rendering has begun")
            }
            Self::NonFiniteColor => f.write_str("background color channels must be finite"),
        }
    }
}

impl std::error::Error for FrameError {}

/// Per-window frame sequencing.
///
/// Nothing persists between frames except the counter; the clear color is
/// configurable only until the first [`FrameLoop::begin`].
#[derive(Debug, Clone)]
pub struct FrameLoop {
    state: FrameState,
    clear_color: Color,
    frames_rendered: u64,
    started: bool,
}

impl FrameLoop {
    pub fn new(clear_color: Color) -> Self {
        Self {
            state: FrameState::Idle,
            clear_color,
            frames_rendered: 0,
            started: false,
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// True once the first frame has begun.
    pub fn has_started(&self) -> bool {
        self.started
    }

    /// Sets the clear color. Fails, leaving the color unchanged, once
    /// rendering has begun or when a channel is not finite.
    pub fn set_clear_color(&mut self, color: Color) -> Result<(), FrameError> {
        if self.has_started() {
            return Err(FrameError::ClearColorLocked);
        }
        if !color.is_finite() {
            return Err(FrameError::NonFiniteColor);
        }
        self.clear_color = color;
        Ok(())
    }

    /// `Idle → Rendering`. Returns the clear color for this frame.
    pub fn begin(&mut self) -> Result<Color, FrameError> {
        match self.state {
            FrameState::Idle => {
                if !self.started {
                    self.started = true;
                    log::debug!("first frame, clear color {:?}", self.clear_color);
                }
                self.state = FrameState::Rendering;
                Ok(self.clear_color)
            }
            FrameState::Rendering => Err(FrameError::FrameInFlight),
            FrameState::Closed => Err(FrameError::Closed),
        }
    }

    /// `Rendering → Idle`. `presented` is false when the frame was skipped.
    pub fn end(&mut self, presented: bool) -> Result<(), FrameError> {
        match self.state {
            FrameState::Rendering => {
                self.state = FrameState::Idle;
                if presented {
                    self.frames_rendered += 1;
                    if self.frames_rendered == 1 {
                        log::info!("first frame presented");
                    }
                }
                Ok(())
            }
            FrameState::Idle => Err(FrameError::NoFrameInFlight),
            FrameState::Closed => Err(FrameError::Closed),
        }
    }

    /// Enters the terminal state. Idempotent.
    pub fn close(&mut self) {
        if self.state != FrameState::Closed {
            log::debug!("frame loop closed after {} frames", self.frames_rendered);
        }
        self.state = FrameState::Closed;
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(Color::BACKGROUND)
    }
}
