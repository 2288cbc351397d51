use std::{
    str::FromStr,
    time::{Duration, Instant},
};

use nalgebra::Vector3;

use crate::{
    color::{self, RGBA},
    common::Ray,
    transfer::{VolumeProperty, BACKGROUND_LIMIT},
};

use super::{ClippingState, FrameBuffer, ImageData, PerspectiveCamera, PlaneSet};

/// Desired update rates above this are interactive
pub const STILL_RATE_THRESHOLD: f32 = 1.0;

/// Composite rays stop once this opaque
pub const RAY_TERMINATION_OPACITY: f32 = 0.99;

/// Bounds of the adaptive sample distance, in multiples of the base distance
pub const ADAPTIVE_SCALE: (f32, f32) = (1.0, 8.0);

/// How samples along a ray are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Brightest sample wins
    #[default]
    MaximumIntensity,
    /// Front-to-back alpha compositing
    Composite,
}

impl FromStr for BlendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mip" | "max" => Ok(BlendMode::MaximumIntensity),
            "composite" => Ok(BlendMode::Composite),
            _ => Err(format!("unknown blend mode '{s}'")),
        }
    }
}

/// Quality of rendered image
/// The difference is the sampling step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderQuality {
    /// Shorter step
    Quality,
    /// Longer step, used while interacting
    Fast,
}

/// Outcome of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderReport {
    pub sample_distance: f32,
    pub quality: RenderQuality,
    pub elapsed: Duration,
    /// Pixels a ray was cast for
    pub rays: usize,
}

/// Ray-casting volume mapper
#[derive(Debug, Clone)]
pub struct RayCastMapper {
    blend_mode: BlendMode,
    sample_distance: f32,
    interactive_sample_distance: f32,
    adaptive_sampling: bool,
    clipping: ClippingState,
    last_frame_time: Option<Duration>,
}

impl RayCastMapper {
    /// Interactive distance defaults to four times `sample_distance`
    pub fn new(blend_mode: BlendMode, sample_distance: f32, adaptive_sampling: bool) -> Self {
        let sample_distance = sample_distance.max(f32::EPSILON);
        Self {
            blend_mode,
            sample_distance,
            interactive_sample_distance: 4.0 * sample_distance,
            adaptive_sampling,
            clipping: ClippingState::new(),
            last_frame_time: None,
        }
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub fn sample_distance(&self) -> f32 {
        self.sample_distance
    }

    pub fn interactive_sample_distance(&self) -> f32 {
        self.interactive_sample_distance
    }

    pub fn set_interactive_factor(&mut self, factor: f32) {
        self.interactive_sample_distance = self.sample_distance * factor.max(1.0);
    }

    pub fn adaptive_sampling(&self) -> bool {
        self.adaptive_sampling
    }

    pub fn clipping(&self) -> &ClippingState {
        &self.clipping
    }

    /// Replace clip planes
    pub fn set_clip_planes(&mut self, planes: &PlaneSet) {
        self.clipping.set_planes(planes);
    }

    pub fn last_frame_time(&self) -> Option<Duration> {
        self.last_frame_time
    }

    pub fn quality_for(&self, desired_update_rate: f32) -> RenderQuality {
        if desired_update_rate > STILL_RATE_THRESHOLD {
            RenderQuality::Fast
        } else {
            RenderQuality::Quality
        }
    }

    /// Step along rays for a window asking for `desired_update_rate` frames per second
    pub fn effective_sample_distance(&self, desired_update_rate: f32) -> f32 {
        let base = match self.quality_for(desired_update_rate) {
            RenderQuality::Fast => self.interactive_sample_distance,
            RenderQuality::Quality => self.sample_distance,
        };

        match (self.adaptive_sampling, self.last_frame_time) {
            (true, Some(frame_time)) => {
                let scale = (frame_time.as_secs_f32() * desired_update_rate)
                    .clamp(ADAPTIVE_SCALE.0, ADAPTIVE_SCALE.1);
                base * scale
            }
            _ => base,
        }
    }

    /// Render `image` into `frame`, pixels outside the projected volume stay transparent
    pub fn render(
        &mut self,
        image: &ImageData,
        property: &VolumeProperty,
        camera: &PerspectiveCamera,
        frame: &mut FrameBuffer,
        desired_update_rate: f32,
    ) -> RenderReport {
        let start = Instant::now();
        let quality = self.quality_for(desired_update_rate);
        let step = self.effective_sample_distance(desired_update_rate);

        frame.clear();
        let (width, height) = frame.resolution();
        let (step_x, step_y) = (1.0 / width as f32, 1.0 / height as f32);

        let tile = camera.project_box(image.bound_box());
        let (x_range, y_range) = tile.get_pixel_range((width, height));
        let rays = x_range.len() * y_range.len();

        for y in y_range {
            let y_norm = (y as f32 + 0.5) * step_y;
            for x in x_range.clone() {
                let ray = camera.get_ray(((x as f32 + 0.5) * step_x, y_norm));
                frame.set(x, y, self.cast_ray(image, property, &ray, step));
            }
        }

        let elapsed = start.elapsed();
        self.last_frame_time = Some(elapsed);

        RenderReport {
            sample_distance: step,
            quality,
            elapsed,
            rays,
        }
    }

    /// Premultiplied color collected along `ray`, sampled every `step` units
    pub fn cast_ray(&self, image: &ImageData, property: &VolumeProperty, ray: &Ray, step: f32) -> RGBA {
        let (t_near, t_far) = match image.bound_box().intersect(ray) {
            Some(t) => t,
            None => return color::zero(),
        };
        let (t_near, t_far) = match self.clipping.clip_segment(ray, t_near.max(0.0), t_far) {
            Some(t) => t,
            None => return color::zero(),
        };

        let n_steps = ((t_far - t_near) / step) as usize + 1;
        let begin = ray.point_from_t(t_near);
        let delta = ray.direction * step;
        // headlight
        let light = -ray.direction;

        let interpolation = property.interpolation();
        let needs_gradient = property.uses_gradient();
        let gradient_at = |pos| {
            if needs_gradient {
                image.gradient(&pos, interpolation)
            } else {
                Vector3::zeros()
            }
        };

        match self.blend_mode {
            BlendMode::MaximumIntensity => {
                let mut max = (f32::NEG_INFINITY, begin);
                let mut pos = begin;
                for _ in 0..n_steps {
                    let sample = image.sample(&pos, interpolation);
                    if sample > max.0 {
                        max = (sample, pos);
                    }
                    pos += delta;
                }

                let (sample, pos) = max;
                if sample < BACKGROUND_LIMIT {
                    return color::zero();
                }
                let rgba = property.classify(sample, &gradient_at(pos), &light);
                color::with_opacity(rgba.xyz() * rgba.w, rgba.w)
            }
            BlendMode::Composite => {
                let mut accum = color::zero();
                let mut pos = begin;
                for _ in 0..n_steps {
                    let sample = image.sample(&pos, interpolation);
                    if sample >= BACKGROUND_LIMIT {
                        let rgba = property.classify(sample, &gradient_at(pos), &light);
                        if rgba.w > 0.0 {
                            // opacity is defined per unit length
                            let alpha = 1.0 - (1.0 - rgba.w).powf(step);
                            let src = color::with_opacity(rgba.xyz() * alpha, alpha);
                            accum += (1.0 - accum.w) * src;

                            if accum.w > RAY_TERMINATION_OPACITY {
                                break;
                            }
                        }
                    }
                    pos += delta;
                }
                accum
            }
        }
    }
}
