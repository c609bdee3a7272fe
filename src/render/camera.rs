use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    math::{matrix::Matrix, point::Point, tuple::Tuple},
    scene::World,
};

use super::{canvas::Canvas, ray::Ray};

// camera looks toward -z direction from point zero
// this makes +x to be on the left
#[derive(PartialEq, Debug, Clone)]
pub struct Camera {
    target_width: usize,
    target_height: usize,
    field_of_view: f64,
    inverse_transformation: Matrix,
    max_bounces: usize,

    pixel_size: f64,
    half_width: f64,
    half_height: f64,
}

impl Camera {
    pub fn new(target_width: usize, target_height: usize, field_of_view: f64) -> Self {
        Self::with_transformation(
            target_width,
            target_height,
            field_of_view,
            Matrix::identity(),
        )
    }

    /// Panics if `transformation` is singular.
    pub fn with_transformation(
        target_width: usize,
        target_height: usize,
        field_of_view: f64,
        transformation: Matrix,
    ) -> Self {
        let half_view = (field_of_view / 2.).tan();
        assert!(target_width > 0 && target_height > 0);
        let h_v_aspect = target_width as f64 / target_height as f64;

        let (half_width, half_height) = match h_v_aspect >= 1. {
            true => (half_view, half_view / h_v_aspect),
            false => (half_view * h_v_aspect, half_view),
        };

        let pixel_size = 2. * half_width / target_width as f64;

        Self {
            target_width,
            target_height,
            field_of_view,
            inverse_transformation: Self::inverse_of(&transformation),
            max_bounces: World::DEFAULT_MAX_BOUNCES,

            pixel_size,
            half_width,
            half_height,
        }
    }

    fn inverse_of(transformation: &Matrix) -> Matrix {
        transformation
            .inverse()
            .expect("camera transformation matrix must be inversible")
    }

    /// Panics if `transformation` is singular.
    pub fn set_transformation(&mut self, transformation: Matrix) {
        self.inverse_transformation = Self::inverse_of(&transformation);
    }

    pub fn set_max_bounces(&mut self, max_bounces: usize) {
        self.max_bounces = max_bounces;
    }

    pub fn max_bounces(&self) -> usize {
        self.max_bounces
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn target_width(&self) -> usize {
        self.target_width
    }

    pub fn target_height(&self) -> usize {
        self.target_height
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn inverse_transformation(&self) -> &Matrix {
        &self.inverse_transformation
    }

    /// Ray from the camera through the center of pixel (x, y).
    pub fn ray_for_pixel(&self, x: usize, y: usize) -> Ray {
        let x_offset_to_center = (x as f64 + 0.5) * self.pixel_size;
        let y_offset_to_center = (y as f64 + 0.5) * self.pixel_size;

        let scene_x = self.half_width - x_offset_to_center;
        let scene_y = self.half_height - y_offset_to_center;

        let pixel = self.inverse_transformation * Point::new(scene_x, scene_y, -1.);
        let origin = self.inverse_transformation * Point::zero();
        let direction = pixel - origin;

        Ray::new(origin, direction.normalize())
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.target_width, self.target_height)
    }

    pub fn render(&self, world: &World) -> Canvas {
        self.render_impl(world, None)
    }

    /// Same as `render`, advancing a progress bar for every shaded row.
    pub fn render_with_progress(&self, world: &World) -> Canvas {
        let pb = ProgressBar::new(self.target_height as u64);
        let pb = match ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {wide_bar:.cyan/blue} rows: {human_pos}/{human_len} {percent}% ({eta})",
        ) {
            Ok(style) => pb.with_style(style),
            Err(e) => {
                log::warn!("falling back to default progress style: {e}");
                pb
            }
        };

        self.render_impl(world, Some(pb))
    }

    fn render_impl(&self, world: &World, progressbar: Option<ProgressBar>) -> Canvas {
        log::info!(
            "rendering {}x{} image, {} objects, max bounces: {}",
            self.target_width,
            self.target_height,
            world.object_count(),
            self.max_bounces
        );

        let mut canvas = self.canvas();
        let now = Instant::now();

        canvas.fill_with(
            |x, y| world.color_at(self.ray_for_pixel(x, y), self.max_bounces),
            progressbar,
        );

        log::info!("render time: {:?}", now.elapsed());
        canvas
    }
}
