use crate::{
    math::{approx_eq::ApproxEq, tuple::Tuple, vector::Vector},
    render::{intersection::IntersectionCollector, ray::Ray},
};

pub struct PlaneXZ {}

impl PlaneXZ {
    pub fn local_normal_at() -> Vector {
        Vector::new(0., 1., 0.)
    }

    pub fn local_intersect(object_ray: &Ray, collector: &mut IntersectionCollector) {
        // parallel or coplanar rays never hit
        if object_ray.direction().y().approx_eq(&0.) {
            return;
        }
        collector.add(-object_ray.origin().y() / object_ray.direction().y());
    }
}
