use crate::{color::RGB, error::RenderError};

use super::FrameBuffer;

/// Window parameters the pipeline and the interaction controller share
#[derive(Debug, Clone, PartialEq)]
pub struct WindowState {
    /// `(width, height)` in pixels
    pub size: (usize, usize),
    pub background: RGB,
    /// Frames per second the renderer should sustain
    pub desired_update_rate: f32,
    pub title: String,
}

/// Display surface of the pipeline
pub trait RenderWindow {
    /// Acquire the surface, called once before the first frame
    fn open(&mut self, state: &WindowState) -> Result<(), RenderError>;

    /// Show a finished frame composited over `background`
    fn present(&mut self, frame: &FrameBuffer, background: &RGB) -> Result<(), RenderError>;

    /// False once the user closed the window
    fn is_open(&self) -> bool;
}

/// Offscreen window, keeps the last presented frame
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    state: Option<WindowState>,
    open_calls: usize,
    presented: usize,
    last_frame: Option<Vec<u32>>,
    unavailable: bool,
}

impl HeadlessWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Window that refuses to open
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// How many times the window was opened
    pub fn open_calls(&self) -> usize {
        self.open_calls
    }

    pub fn presented(&self) -> usize {
        self.presented
    }

    /// State the window was opened with
    pub fn state(&self) -> Option<&WindowState> {
        self.state.as_ref()
    }

    /// Last frame as `0RGB` words
    pub fn last_frame(&self) -> Option<&[u32]> {
        self.last_frame.as_deref()
    }
}

impl RenderWindow for HeadlessWindow {
    fn open(&mut self, state: &WindowState) -> Result<(), RenderError> {
        if self.unavailable {
            return Err(RenderError::Window("no display available".into()));
        }
        self.open_calls += 1;
        self.state = Some(state.clone());
        Ok(())
    }

    fn present(&mut self, frame: &FrameBuffer, background: &RGB) -> Result<(), RenderError> {
        if self.state.is_none() {
            return Err(RenderError::Window("presenting to a window that is not open".into()));
        }
        self.presented += 1;
        self.last_frame = Some(frame.to_0rgb(background));
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.state.is_some()
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    fn state() -> WindowState {
        WindowState {
            size: (4, 4),
            background: vector![0.0, 0.0, 0.0],
            desired_update_rate: 0.001,
            title: "test".into(),
        }
    }

    #[test]
    fn open_then_present() {
        let mut window = HeadlessWindow::new();
        let frame = FrameBuffer::new(4, 4);

        assert!(window.present(&frame, &state().background).is_err());

        window.open(&state()).unwrap();
        window.present(&frame, &state().background).unwrap();

        assert!(window.is_open());
        assert_eq!(window.open_calls(), 1);
        assert_eq!(window.presented(), 1);
        assert_eq!(window.last_frame().map(|f| f.len()), Some(16));
    }

    #[test]
    fn unavailable() {
        let mut window = HeadlessWindow::unavailable();
        assert!(matches!(window.open(&state()), Err(RenderError::Window(_))));
        assert!(!window.is_open());
    }
}
