use std::time::Duration;

use genevis_lib::{
    color::RGB,
    render::{Face, FrameBuffer, RenderWindow, WindowState},
    RenderError,
};
use log::info;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use super::{defaults, ClipCommand, InputFrame};

/// Keys moving the clip box faces
const CLIP_KEYS: [(Key, usize, Face); 6] = [
    (Key::Left, 0, Face::Lower),
    (Key::Right, 0, Face::Upper),
    (Key::Down, 1, Face::Lower),
    (Key::Up, 1, Face::Upper),
    (Key::PageDown, 2, Face::Lower),
    (Key::PageUp, 2, Face::Upper),
];

/// On-screen window, created on first render
#[derive(Default)]
pub struct MinifbWindow {
    window: Option<Window>,
}

impl MinifbWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll input since the last call
    pub fn input(&self) -> InputFrame {
        let window = match &self.window {
            Some(w) => w,
            None => return InputFrame::default(),
        };

        let mut clip: Vec<ClipCommand> = CLIP_KEYS
            .iter()
            .filter(|(key, _, _)| window.is_key_pressed(*key, KeyRepeat::Yes))
            .map(|&(_, axis, face)| ClipCommand::Push { axis, face })
            .collect();
        if window.is_key_pressed(Key::R, KeyRepeat::No) {
            clip.push(ClipCommand::Reset);
        }

        InputFrame {
            quit: window.is_key_down(Key::Escape),
            left_down: window.get_mouse_down(MouseButton::Left),
            mouse: window.get_mouse_pos(MouseMode::Discard),
            scroll: window.get_scroll_wheel().map(|(_, y)| y).unwrap_or(0.0),
            clip,
        }
    }

    /// Pump window events when no frame was presented
    pub fn idle(&mut self) {
        if let Some(window) = &mut self.window {
            window.update();
        }
    }
}

impl RenderWindow for MinifbWindow {
    fn open(&mut self, state: &WindowState) -> Result<(), RenderError> {
        let (width, height) = state.size;
        let mut window = Window::new(
            &format!("{} - ESC to exit", state.title),
            width,
            height,
            WindowOptions::default(),
        )
        .map_err(|e| RenderError::Window(e.to_string()))?;

        window.limit_update_rate(Some(Duration::from_millis(defaults::POLL_INTERVAL_MS)));
        info!("Window {}x{} opened", width, height);

        self.window = Some(window);
        Ok(())
    }

    fn present(&mut self, frame: &FrameBuffer, background: &RGB) -> Result<(), RenderError> {
        let window = self
            .window
            .as_mut()
            .ok_or_else(|| RenderError::Window("window not opened".into()))?;
        let (width, height) = frame.resolution();
        window
            .update_with_buffer(&frame.to_0rgb(background), width, height)
            .map_err(|e| RenderError::Window(e.to_string()))
    }

    fn is_open(&self) -> bool {
        self.window.as_ref().map_or(false, Window::is_open)
    }
}
