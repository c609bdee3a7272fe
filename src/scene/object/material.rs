pub mod pattern;

use crate::{
    math::{color::Color, point::Point, vector::Vector},
    scene::light::PointLightSource,
};

use super::Object;
use pattern::Pattern;

pub const AIR_REFRACTIVE_INDEX: f64 = 1.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Surface color; `Pattern::Const` for a flat color.
    pub pattern: Pattern,
    pub ambient: f64,      // [0;1]
    pub diffuse: f64,      // [0;1]
    pub specular: f64,     // [0;1]
    pub shininess: f64,    // (0;+inf), typically 10 to 200
    pub reflectivity: f64, // [0;1]

    pub transparency: f64,     // [0;1]
    pub refractive_index: f64, // [1;+inf)
}

impl Default for Material {
    fn default() -> Self {
        Self {
            pattern: Pattern::Const(Color::white()),
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.,
            reflectivity: 0.,
            transparency: 0.,
            refractive_index: AIR_REFRACTIVE_INDEX,
        }
    }
}

impl Material {
    pub fn with_pattern(pattern: Pattern) -> Self {
        Self {
            pattern,
            ..Default::default()
        }
    }

    pub fn with_color(color: Color) -> Self {
        Self::with_pattern(Pattern::Const(color))
    }

    pub fn glass() -> Self {
        Self {
            pattern: Pattern::Const(Color::black()),
            ambient: 0.025,
            diffuse: 0.2,
            specular: 1.,
            shininess: 300.,
            reflectivity: 0.9,
            transparency: 0.9,
            refractive_index: 1.5,
        }
    }

    pub fn mirror() -> Self {
        Self {
            reflectivity: 0.98,
            transparency: 0.,
            ..Self::glass()
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn color_at_object(&self, object: &Object, point: Point) -> Color {
        self.pattern.color_on(object, point)
    }

    /// Phong reflection model. A point in shadow only receives the ambient term.
    /// The result is not clamped.
    pub fn lighting(
        &self,
        object: &Object,
        light: &PointLightSource,
        point: Point,
        eye_v: Vector,
        normal_v: Vector,
        in_shadow: bool,
    ) -> Color {
        // combine surface color with light's intensity
        let effective_color = self.color_at_object(object, point) * light.intensity();
        let ambient = effective_color * self.ambient;

        if in_shadow {
            return ambient;
        }

        let light_v = (light.position() - point).normalize();
        let light_dot_normal = light_v.dot(normal_v);

        // light is on the other side of the surface
        if light_dot_normal < 0. {
            return ambient;
        }
        let diffuse = effective_color * self.diffuse * light_dot_normal;

        let reflect_v = (-light_v).reflect(normal_v);
        let reflect_dot_eye = reflect_v.dot(eye_v);

        // light reflects away from the eye
        let specular = if reflect_dot_eye <= 0. {
            Color::black()
        } else {
            light.intensity() * self.specular * reflect_dot_eye.powf(self.shininess)
        };

        ambient + diffuse + specular
    }
}
