use std::fmt::Display;

use crate::{
    math::{point::Point, vector::Vector},
    render::{intersection::IntersectionCollector, ray::Ray},
};

use super::{plane::PlaneXZ, sphere::UnitSphere};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Unit sphere at point zero
    Sphere,
    /// Plane extending in x and z directions, at y = 0
    Plane,
}

impl Shape {
    pub fn local_normal_at(&self, object_point: Point) -> Vector {
        match self {
            Shape::Sphere => UnitSphere::local_normal_at(object_point),
            Shape::Plane => PlaneXZ::local_normal_at(),
        }
    }

    pub fn local_intersect(&self, object_ray: &Ray, collector: &mut IntersectionCollector) {
        match self {
            Shape::Sphere => UnitSphere::local_intersect(object_ray, collector),
            Shape::Plane => PlaneXZ::local_intersect(object_ray, collector),
        }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Sphere => write!(f, "sphere"),
            Shape::Plane => write!(f, "plane"),
        }
    }
}
