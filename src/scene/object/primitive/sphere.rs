use crate::{
    math::{point::Point, vector::Vector},
    render::{intersection::IntersectionCollector, ray::Ray},
};

pub struct UnitSphere {}

impl UnitSphere {
    pub fn local_normal_at(object_point: Point) -> Vector {
        object_point - Point::zero()
    }

    /// Solves `a*t^2 + b*t + c = 0` for the ray against the unit sphere.
    /// A tangent ray reports the same time twice.
    pub fn local_intersect(object_ray: &Ray, collector: &mut IntersectionCollector) {
        let vector_sphere_to_ray = *object_ray.origin() - Point::zero();

        let a = object_ray.direction().dot(*object_ray.direction());
        let b = 2. * object_ray.direction().dot(vector_sphere_to_ray);
        let c = vector_sphere_to_ray.dot(vector_sphere_to_ray) - 1.;

        let discriminant = b * b - 4. * a * c;
        if discriminant < 0. || a == 0. {
            return;
        }

        let delta_sqrt = discriminant.sqrt();
        collector.add((-b - delta_sqrt) / (2. * a));
        collector.add((-b + delta_sqrt) / (2. * a));
    }
}
