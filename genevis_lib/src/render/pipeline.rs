use log::{debug, info};

use crate::{
    error::RenderError, interaction::InteractionContext, transfer::VolumeProperty,
    volumetric::CompositeVolume,
};

use super::{
    Extent, FrameBuffer, ImageImport, PerspectiveCamera, RayCastMapper, RenderReport,
    RenderSettings, RenderWindow, WindowState,
};

/// Mapper and property of the displayed volume
#[derive(Debug, Clone, Default)]
pub struct RenderableVolume {
    mapper: Option<RayCastMapper>,
    property: Option<VolumeProperty>,
}

impl RenderableVolume {
    pub fn mapper(&self) -> Option<&RayCastMapper> {
        self.mapper.as_ref()
    }

    pub fn mapper_mut(&mut self) -> Option<&mut RayCastMapper> {
        self.mapper.as_mut()
    }

    pub fn property(&self) -> Option<&VolumeProperty> {
        self.property.as_ref()
    }
}

/// Import, mapper, property, camera and window of one rendering session.
///
/// Rendering is synchronous. The window is opened by the first [`render`](Self::render)
/// and released when the pipeline is dropped.
pub struct RenderPipeline<W>
where
    W: RenderWindow,
{
    import: Option<ImageImport>,
    volume: RenderableVolume,
    camera: PerspectiveCamera,
    window: W,
    window_state: WindowState,
    window_opened: bool,
    frame: Option<FrameBuffer>,
}

impl<W> RenderPipeline<W>
where
    W: RenderWindow,
{
    pub fn new(window: W, settings: &RenderSettings) -> Self {
        Self {
            import: None,
            volume: RenderableVolume::default(),
            camera: PerspectiveCamera::default(),
            window,
            window_state: settings.window_state(),
            window_opened: false,
            frame: None,
        }
    }

    /// Import composite buffer, `extent` must describe its shape.
    /// The camera is reset to look at the whole volume.
    pub fn import_volume(
        &mut self,
        volume: &CompositeVolume,
        extent: Extent,
    ) -> Result<(), RenderError> {
        let import = ImageImport::from_composite(volume, extent)?;
        self.camera.reset_to_box(&import.image().bound_box());
        info!("Imported volume, extent {:?}", extent.bounds);
        self.import = Some(import);
        Ok(())
    }

    pub fn attach_mapper(&mut self, mapper: RayCastMapper) {
        debug!(
            "Mapper: {:?}, sample distance {}, adaptive {}",
            mapper.blend_mode(),
            mapper.sample_distance(),
            mapper.adaptive_sampling()
        );
        self.volume.mapper = Some(mapper);
    }

    pub fn attach_property(&mut self, property: VolumeProperty) {
        let names: Vec<_> = property.profiles().iter().map(|p| p.name()).collect();
        debug!("Property with profiles {:?}", names);
        self.volume.property = Some(property);
    }

    /// Draw one frame and present it.
    ///
    /// The first call opens the window.
    pub fn render(&mut self) -> Result<RenderReport, RenderError> {
        let import = self
            .import
            .as_ref()
            .ok_or(RenderError::PipelineIncomplete("volume"))?;
        let mapper = self
            .volume
            .mapper
            .as_mut()
            .ok_or(RenderError::PipelineIncomplete("mapper"))?;
        let property = self
            .volume
            .property
            .as_ref()
            .ok_or(RenderError::PipelineIncomplete("property"))?;

        if !self.window_opened {
            self.window.open(&self.window_state)?;
            self.window_opened = true;
            info!(
                "Window opened, {}x{}",
                self.window_state.size.0, self.window_state.size.1
            );
        }

        let (width, height) = self.window_state.size;
        if self.frame.as_ref().map(FrameBuffer::resolution) != Some((width, height)) {
            self.frame = Some(FrameBuffer::new(width, height));
        }
        let frame = self
            .frame
            .get_or_insert_with(|| FrameBuffer::new(width, height));
        self.camera.change_aspect_from_resolution(width, height);

        let report = mapper.render(
            import.image(),
            property,
            &self.camera,
            frame,
            self.window_state.desired_update_rate,
        );

        self.window.present(frame, &self.window_state.background)?;

        debug!(
            "Frame {:?}: step {}, {} rays, {:?}",
            report.quality, report.sample_distance, report.rays, report.elapsed
        );
        Ok(report)
    }

    /// Mutable view handed to interaction handlers
    pub fn interaction_context(&mut self) -> Result<InteractionContext<'_>, RenderError> {
        let mapper = self
            .volume
            .mapper
            .as_mut()
            .ok_or(RenderError::PipelineIncomplete("mapper"))?;
        Ok(InteractionContext {
            window: &mut self.window_state,
            mapper,
        })
    }

    pub fn image(&self) -> Option<&ImageImport> {
        self.import.as_ref()
    }

    pub fn volume(&self) -> &RenderableVolume {
        &self.volume
    }

    pub fn volume_mut(&mut self) -> &mut RenderableVolume {
        &mut self.volume
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PerspectiveCamera {
        &mut self.camera
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn window_state(&self) -> &WindowState {
        &self.window_state
    }

    /// True until the user closes the window
    pub fn is_running(&self) -> bool {
        !self.window_opened || self.window.is_open()
    }

    /// Last rendered frame
    pub fn frame(&self) -> Option<&FrameBuffer> {
        self.frame.as_ref()
    }
}
