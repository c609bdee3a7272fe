pub mod io;
pub mod light;
pub mod object;

use light::{PointLightSource, schlick_reflectance};
use object::{Object, material::Material, material::pattern::Pattern, primitive::shape::Shape};

use crate::{
    math::{approx_eq::ApproxEq, color::Color, matrix::Matrix, point::Point, tuple::Tuple},
    render::{
        intersection::{IntersecComputations, IntersectionCollection, IntersectionCollector},
        ray::Ray,
    },
};

/// Objects and the single light illuminating them.
/// Intersections are brute-force tested against every object.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct World {
    objects: Vec<Object>,
    light: PointLightSource,
}

impl World {
    /// Depth of recursive calls for reflections and refractions.
    pub const DEFAULT_MAX_BOUNCES: usize = 5;

    pub fn new(objects: Vec<Object>, light: PointLightSource) -> Self {
        Self { objects, light }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [Object] {
        &mut self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn add_obj(&mut self, obj: Object) {
        self.objects.push(obj);
    }

    /// Value comparison, not identity.
    pub fn contains(&self, obj: &Object) -> bool {
        self.objects.iter().any(|o| o == obj)
    }

    pub fn light(&self) -> &PointLightSource {
        &self.light
    }

    pub fn set_light(&mut self, light: PointLightSource) {
        self.light = light;
    }

    pub fn intersect(&self, ray: Ray) -> IntersectionCollection<'_> {
        let mut collector = IntersectionCollector::new();
        for obj in &self.objects {
            obj.intersect(&ray, &mut collector);
        }
        IntersectionCollection::from_collector(ray, collector)
    }

    /// Color seen along `ray`. `remaining` bounds how many more times
    /// reflection and refraction may recurse.
    pub fn color_at(&self, ray: Ray, remaining: usize) -> Color {
        self.intersect(ray)
            .hit_computations()
            .map_or(Color::black(), |comps| self.shade_hit(&comps, remaining))
    }

    /// True when an object sits strictly between `point` and the light.
    pub fn is_shadowed(&self, point: Point) -> bool {
        let v = self.light.position() - point;
        let distance = v.magnitude();
        let ray = Ray::new(point, v.normalize());

        self.intersect(ray)
            .hit()
            .is_some_and(|hit| hit.time() < distance)
    }

    pub fn shade_hit(&self, comps: &IntersecComputations, remaining: usize) -> Color {
        let object = comps.object();
        let material = object.material();

        let surface = material.lighting(
            object,
            &self.light,
            comps.over_point(),
            comps.eye_v(),
            comps.normal_v(),
            self.is_shadowed(comps.over_point()),
        );
        let reflected = self.reflected_color(comps, remaining);
        let refracted = self.refracted_color(comps, remaining);

        if material.reflectivity > 0. && material.transparency > 0. {
            let reflectance = schlick_reflectance(comps);
            surface + reflected * reflectance + refracted * (1. - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    pub fn reflected_color(&self, comps: &IntersecComputations, remaining: usize) -> Color {
        let reflectivity = comps.object().material().reflectivity;
        if remaining < 1 || reflectivity.approx_eq(&0.) {
            return Color::black();
        }

        let reflected_ray = Ray::new(comps.over_point(), comps.reflect_v());
        self.color_at(reflected_ray, remaining - 1) * reflectivity
    }

    pub fn refracted_color(&self, comps: &IntersecComputations, remaining: usize) -> Color {
        let transparency = comps.object().material().transparency;
        if remaining < 1 || transparency.approx_eq(&0.) {
            return Color::black();
        }

        let refraction_ratio = comps.refractive_from() / comps.refractive_to();
        let cos_i = comps.eye_v().dot(comps.normal_v());
        let sin2_t = refraction_ratio.powi(2) * (1. - cos_i.powi(2));

        // total internal reflection
        if sin2_t > 1. {
            return Color::black();
        }

        let cos_t = (1. - sin2_t).sqrt();
        let direction =
            comps.normal_v() * (refraction_ratio * cos_i - cos_t) - comps.eye_v() * refraction_ratio;
        let refracted_ray = Ray::new(comps.under_point(), direction);

        self.color_at(refracted_ray, remaining - 1) * transparency
    }
}

impl World {
    /// Two concentric spheres lit from the upper left, used throughout the tests.
    pub fn default_testing() -> Self {
        let sphere1 = Object::with_shape_material(
            Shape::Sphere,
            Material {
                pattern: Pattern::Const(Color::new(0.8, 1.0, 0.6)),
                diffuse: 0.7,
                specular: 0.2,
                ..Default::default()
            },
        );
        let sphere2 = Object::with_transformation(Shape::Sphere, Matrix::scaling_uniform(0.5));

        Self::new(
            vec![sphere1, sphere2],
            PointLightSource::new(Point::new(-10., 10., -10.), Color::white()),
        )
    }
}
