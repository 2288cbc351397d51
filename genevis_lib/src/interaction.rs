//! Interaction driven render quality
//!
//! While the user drags, the window asks for a high update rate and the mapper
//! samples coarsely. Releasing drops the rate so the next frame is full quality.

use log::debug;

use crate::render::{
    PlaneSet, PlaneSource, RayCastMapper, WindowState, DEFAULT_INTERACTIVE_UPDATE_RATE,
    DEFAULT_STILL_UPDATE_RATE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Interacting,
}

/// Events reaching the controller
pub enum InteractionEvent<'w> {
    StartInteraction,
    EndInteraction,
    /// The active widget changed its clip planes
    ClipVolumeRender(&'w dyn PlaneSource),
    MouseMove,
    KeyPress(char),
    Timer,
}

impl std::fmt::Debug for InteractionEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InteractionEvent::StartInteraction => write!(f, "StartInteraction"),
            InteractionEvent::EndInteraction => write!(f, "EndInteraction"),
            InteractionEvent::ClipVolumeRender(_) => write!(f, "ClipVolumeRender"),
            InteractionEvent::MouseMove => write!(f, "MouseMove"),
            InteractionEvent::KeyPress(c) => write!(f, "KeyPress({c:?})"),
            InteractionEvent::Timer => write!(f, "Timer"),
        }
    }
}

/// What a handler may change
pub struct InteractionContext<'a> {
    pub window: &'a mut WindowState,
    pub mapper: &'a mut RayCastMapper,
}

/// Two-state controller of update rate and clip planes
#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    interactive_rate: f32,
    still_rate: f32,
    planes: PlaneSet,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::with_rates(DEFAULT_INTERACTIVE_UPDATE_RATE, DEFAULT_STILL_UPDATE_RATE)
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rates(interactive_rate: f32, still_rate: f32) -> Self {
        Self {
            state: InteractionState::Idle,
            interactive_rate,
            still_rate,
            planes: PlaneSet::new(),
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn interactive_rate(&self) -> f32 {
        self.interactive_rate
    }

    pub fn still_rate(&self) -> f32 {
        self.still_rate
    }

    /// Apply `event`, returns true when a new frame should be rendered
    pub fn handle(&mut self, event: &InteractionEvent, ctx: &mut InteractionContext) -> bool {
        match event {
            InteractionEvent::StartInteraction => {
                self.state = InteractionState::Interacting;
                ctx.window.desired_update_rate = self.interactive_rate;
                false
            }
            InteractionEvent::EndInteraction => {
                self.state = InteractionState::Idle;
                ctx.window.desired_update_rate = self.still_rate;
                true
            }
            InteractionEvent::ClipVolumeRender(source) => {
                source.get_planes(&mut self.planes);
                ctx.mapper.set_clip_planes(&self.planes);
                debug!("Clip planes: {}", self.planes.len());
                true
            }
            InteractionEvent::MouseMove
            | InteractionEvent::KeyPress(_)
            | InteractionEvent::Timer => false,
        }
    }
}
