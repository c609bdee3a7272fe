pub mod material;
pub mod primitive;

use std::fmt::Display;

use crate::{
    math::{matrix::Matrix, point::Point, transform::Transform, vector::Vector},
    render::{
        intersection::{IntersectionCollection, IntersectionCollector},
        ray::Ray,
    },
};

use material::Material;
use primitive::shape::Shape;

/// A primitive placed in the world: shape, surface and world transformation.
/// The inverse transformation is cached, since every ray and normal query needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    shape: Shape,
    material: Material,
    transformation: Matrix,
    transformation_inverse: Matrix,
}

impl Transform for Object {
    fn transform(&mut self, matrix: &Matrix) {
        self.set_transformation(matrix * &self.transformation);
    }
}

impl Object {
    /// Panics if `transformation` is singular.
    pub fn new(shape: Shape, material: Material, transformation: Matrix) -> Self {
        Self {
            shape,
            material,
            transformation,
            transformation_inverse: Self::inverse_of(&transformation),
        }
    }

    pub fn with_shape(shape: Shape) -> Self {
        Self::new(shape, Material::default(), Matrix::identity())
    }

    pub fn with_shape_material(shape: Shape, material: Material) -> Self {
        Self::new(shape, material, Matrix::identity())
    }

    pub fn with_transformation(shape: Shape, transformation: Matrix) -> Self {
        Self::new(shape, Material::default(), transformation)
    }

    pub fn sphere() -> Self {
        Self::with_shape(Shape::Sphere)
    }

    pub fn plane() -> Self {
        Self::with_shape(Shape::Plane)
    }

    pub fn glass_sphere() -> Self {
        Self::with_shape_material(
            Shape::Sphere,
            Material {
                transparency: 1.,
                refractive_index: 1.5,
                ..Default::default()
            },
        )
    }

    fn inverse_of(transformation: &Matrix) -> Matrix {
        transformation
            .inverse()
            .expect("object transformation matrix must be inversible")
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub fn transformation(&self) -> &Matrix {
        &self.transformation
    }

    pub fn transformation_inverse(&self) -> &Matrix {
        &self.transformation_inverse
    }

    /// Panics if `transformation` is singular.
    pub fn set_transformation(&mut self, transformation: Matrix) {
        self.transformation_inverse = Self::inverse_of(&transformation);
        self.transformation = transformation;
    }

    /// Identity check. Two objects with equal fields are still different
    /// volumes when tracking which objects a ray is inside.
    pub fn is_same(&self, other: &Object) -> bool {
        std::ptr::eq(self, other)
    }

    /// Reports intersection times in the parameterization of `world_ray`.
    pub fn intersect<'a>(&'a self, world_ray: &Ray, collector: &mut IntersectionCollector<'a>) {
        let object_ray = world_ray.transform_new(&self.transformation_inverse);
        collector.set_next_object(self);
        self.shape.local_intersect(&object_ray, collector);
    }

    pub fn intersection_collection(&self, world_ray: Ray) -> IntersectionCollection<'_> {
        let mut collector = IntersectionCollector::new();
        self.intersect(&world_ray, &mut collector);
        IntersectionCollection::from_collector(world_ray, collector)
    }

    pub fn normal_vector_at(&self, world_point: Point) -> Vector {
        let object_point = &self.transformation_inverse * world_point;
        let object_normal = self.shape.local_normal_at(object_point);
        // multiplying a vector keeps w at zero
        self.transformation_inverse
            .mul_transposed(object_normal)
            .normalize()
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.shape)
    }
}
