use crate::{
    math::{approx_eq, point::Point, vector::Vector},
    scene::object::{Object, material::AIR_REFRACTIVE_INDEX},
};

use super::ray::Ray;

#[derive(Clone, Copy, Debug)]
pub struct Intersection<'a> {
    time: f64,
    object: &'a Object,
}

impl<'a> Intersection<'a> {
    pub fn new(time: f64, object: &'a Object) -> Self {
        Self { time, object }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn object(&self) -> &'a Object {
        self.object
    }

    /// Computations for this intersection alone, as if the ray crossed no other surface.
    #[cfg(test)]
    pub fn computations(&self, ray: &Ray) -> IntersecComputations<'a> {
        let (from, to) = refractive_indices(std::slice::from_ref(self), 0);
        IntersecComputations::from_intersection(ray, *self, from, to)
    }
}

/// Gathers intersection times reported by shapes in local space and tags them
/// with the object currently being tested.
#[derive(Debug, Default)]
pub struct IntersectionCollector<'a> {
    next_object: Option<&'a Object>,
    vec: Vec<Intersection<'a>>,
}

impl<'a> IntersectionCollector<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_next_object(&mut self, object: &'a Object) {
        self.next_object = Some(object);
    }

    pub fn add(&mut self, time: f64) {
        debug_assert!(self.next_object.is_some());
        if let Some(object) = self.next_object {
            self.vec.push(Intersection::new(time, object));
        }
    }

    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.vec.len()
    }
}

/// All intersections of a single ray, kept in ascending `time` order.
/// Sorting is stable, so equal times keep the order they were collected in.
#[derive(Debug)]
pub struct IntersectionCollection<'a> {
    ray: Ray,
    vec: Vec<Intersection<'a>>,
}

impl<'a> IntersectionCollection<'a> {
    pub fn new(ray: Ray, mut vec: Vec<Intersection<'a>>) -> Self {
        vec.sort_by(|i1, i2| i1.time().total_cmp(&i2.time()));
        Self { ray, vec }
    }

    pub fn from_collector(ray: Ray, collector: IntersectionCollector<'a>) -> Self {
        Self::new(ray, collector.vec)
    }

    #[cfg(test)]
    pub fn from_times_and_obj(ray: Ray, times: Vec<f64>, object: &'a Object) -> Self {
        Self::new(
            ray,
            times
                .into_iter()
                .map(|time| Intersection::new(time, object))
                .collect(),
        )
    }

    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    pub fn vec(&self) -> &[Intersection<'a>] {
        &self.vec
    }

    pub fn count(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    #[cfg(test)]
    pub fn times_vec(&self) -> Vec<f64> {
        self.vec.iter().map(|i| i.time()).collect()
    }

    pub fn hit_id(&self) -> Option<usize> {
        self.vec.iter().position(|i| i.time() > 0.)
    }

    /// First intersection in front of the ray origin.
    pub fn hit(&self) -> Option<&Intersection<'a>> {
        self.hit_id().map(|id| &self.vec[id])
    }

    pub fn computations_at_id(&self, id: usize) -> Option<IntersecComputations<'a>> {
        let intersection = *self.vec.get(id)?;
        let (from, to) = refractive_indices(&self.vec, id);
        Some(IntersecComputations::from_intersection(
            &self.ray,
            intersection,
            from,
            to,
        ))
    }

    pub fn hit_computations(&self) -> Option<IntersecComputations<'a>> {
        self.computations_at_id(self.hit_id()?)
    }
}

/// Walks the intersections up to `hit_id`, tracking which objects the ray is
/// currently inside. Returns the refractive indices on both sides of the surface at `hit_id`.
fn refractive_indices(intersections: &[Intersection], hit_id: usize) -> (f64, f64) {
    let mut containers: Vec<&Object> = Vec::new();
    let top_index = |containers: &Vec<&Object>| {
        containers
            .last()
            .map_or(AIR_REFRACTIVE_INDEX, |obj| obj.material().refractive_index)
    };

    for (id, intersection) in intersections.iter().enumerate().take(hit_id + 1) {
        let refractive_from = top_index(&containers);

        match containers
            .iter()
            .position(|obj| obj.is_same(intersection.object()))
        {
            Some(pos) => {
                containers.remove(pos);
            }
            None => containers.push(intersection.object()),
        }

        if id == hit_id {
            return (refractive_from, top_index(&containers));
        }
    }
    (AIR_REFRACTIVE_INDEX, AIR_REFRACTIVE_INDEX)
}

/// Everything the shading step needs to know about a single hit.
#[derive(Debug, Clone)]
pub struct IntersecComputations<'a> {
    time: f64,
    object: &'a Object,
    point: Point,
    over_point: Point,
    under_point: Point,
    eye_v: Vector,
    normal_v: Vector,
    reflect_v: Vector,
    inside: bool,
    refractive_from: f64,
    refractive_to: f64,
}

impl<'a> IntersecComputations<'a> {
    pub fn from_intersection(
        ray: &Ray,
        intersection: Intersection<'a>,
        refractive_from: f64,
        refractive_to: f64,
    ) -> Self {
        let time = intersection.time();
        let object = intersection.object();

        let point = ray.position(time);
        let eye_v = -*ray.direction();
        let mut normal_v = object.normal_vector_at(point);

        let inside = normal_v.dot(eye_v) < 0.;
        if inside {
            normal_v = -normal_v;
        }

        let over_point = point + normal_v * approx_eq::EPSILON;
        let under_point = point - normal_v * approx_eq::EPSILON;
        let reflect_v = ray.direction().reflect(normal_v);

        Self {
            time,
            object,
            point,
            over_point,
            under_point,
            eye_v,
            normal_v,
            reflect_v,
            inside,
            refractive_from,
            refractive_to,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn object(&self) -> &'a Object {
        self.object
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn over_point(&self) -> Point {
        self.over_point
    }

    pub fn under_point(&self) -> Point {
        self.under_point
    }

    pub fn eye_v(&self) -> Vector {
        self.eye_v
    }

    pub fn normal_v(&self) -> Vector {
        self.normal_v
    }

    pub fn reflect_v(&self) -> Vector {
        self.reflect_v
    }

    pub fn inside(&self) -> bool {
        self.inside
    }

    /// Refractive index of the medium the ray travels through before the hit (n1).
    pub fn refractive_from(&self) -> f64 {
        self.refractive_from
    }

    /// Refractive index of the medium the ray enters at the hit (n2).
    pub fn refractive_to(&self) -> f64 {
        self.refractive_to
    }
}
