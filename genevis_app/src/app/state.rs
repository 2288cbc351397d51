use genevis_lib::{
    render::{BoxWidget, Face, RenderPipeline, RenderReport, RenderWindow},
    InteractionController, InteractionEvent, RenderError,
};
use log::debug;

use super::defaults;

/// Change of the clip box requested by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipCommand {
    /// Move one face inwards
    Push { axis: usize, face: Face },
    /// Undo every push
    Reset,
}

/// Input gathered from the window since the last poll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub quit: bool,
    pub left_down: bool,
    /// Cursor position in pixels
    pub mouse: Option<(f32, f32)>,
    /// Wheel steps, positive is away from the user
    pub scroll: f32,
    pub clip: Vec<ClipCommand>,
}

/// State of the app
///
/// Turns input into camera moves and interaction events, requests frames
pub struct AppState<W>
where
    W: RenderWindow,
{
    pipeline: RenderPipeline<W>,
    controller: InteractionController,
    widget: BoxWidget,
    drag_from: Option<(f32, f32)>,
    render_requested: bool,
    quit: bool,
}

impl<W> AppState<W>
where
    W: RenderWindow,
{
    /// `pipeline` must have a volume imported, the clip box is placed on it
    pub fn new(
        pipeline: RenderPipeline<W>,
        controller: InteractionController,
    ) -> Result<Self, RenderError> {
        let bounds = pipeline
            .image()
            .map(|import| import.image().bound_box())
            .ok_or(RenderError::PipelineIncomplete("volume"))?;

        Ok(Self {
            pipeline,
            controller,
            widget: BoxWidget::new(bounds),
            drag_from: None,
            render_requested: true,
            quit: false,
        })
    }

    pub fn pipeline(&self) -> &RenderPipeline<W> {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut RenderPipeline<W> {
        &mut self.pipeline
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn widget(&self) -> &BoxWidget {
        &self.widget
    }

    pub fn is_running(&self) -> bool {
        !self.quit && self.pipeline.is_running()
    }

    pub fn render_requested(&self) -> bool {
        self.render_requested
    }

    fn dispatch(
        pipeline: &mut RenderPipeline<W>,
        controller: &mut InteractionController,
        event: &InteractionEvent,
    ) -> Result<bool, RenderError> {
        let mut ctx = pipeline.interaction_context()?;
        Ok(controller.handle(event, &mut ctx))
    }

    /// React to one poll of input
    pub fn apply(&mut self, input: &InputFrame) -> Result<(), RenderError> {
        if input.quit {
            self.quit = true;
            return Ok(());
        }

        self.apply_drag(input)?;

        if input.scroll != 0.0 {
            let factor = defaults::ZOOM_STEP.powf(input.scroll.signum());
            self.pipeline.camera_mut().zoom(factor);
            self.render_requested = true;
        }

        if !input.clip.is_empty() {
            for command in &input.clip {
                match *command {
                    ClipCommand::Push { axis, face } => {
                        self.widget.push_face(axis, face, defaults::CLIP_STEP)
                    }
                    ClipCommand::Reset => self.widget.reset(),
                }
            }
            debug!("Clip box {:?}", self.widget.bounds());
            let event = InteractionEvent::ClipVolumeRender(&self.widget);
            self.render_requested |=
                Self::dispatch(&mut self.pipeline, &mut self.controller, &event)?;
        }

        Ok(())
    }

    fn apply_drag(&mut self, input: &InputFrame) -> Result<(), RenderError> {
        let event = match (input.left_down, self.drag_from, input.mouse) {
            (true, None, Some(pos)) => {
                self.drag_from = Some(pos);
                InteractionEvent::StartInteraction
            }
            (true, Some(from), Some(pos)) if pos != from => {
                let k = defaults::ORBIT_DEGREES_PER_PIXEL;
                self.pipeline
                    .camera_mut()
                    .orbit(-(pos.0 - from.0) * k, -(pos.1 - from.1) * k);
                self.drag_from = Some(pos);
                self.render_requested = true;
                InteractionEvent::MouseMove
            }
            (false, Some(_), _) => {
                self.drag_from = None;
                InteractionEvent::EndInteraction
            }
            _ => return Ok(()),
        };

        self.render_requested |= Self::dispatch(&mut self.pipeline, &mut self.controller, &event)?;
        Ok(())
    }

    /// Render if anything asked for a frame since the last one
    pub fn render_if_requested(&mut self) -> Result<Option<RenderReport>, RenderError> {
        if !self.render_requested {
            return Ok(None);
        }
        self.render_requested = false;
        self.pipeline.render().map(Some)
    }
}
