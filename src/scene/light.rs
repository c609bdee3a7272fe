pub mod point_light;

pub use point_light::PointLightSource;

use crate::render::intersection::IntersecComputations;

/// Fresnel reflectance at a hit, by Schlick's approximation. Total internal
/// reflection gives 1.
pub fn schlick_reflectance(comps: &IntersecComputations) -> f64 {
    let (n1, n2) = (comps.refractive_from(), comps.refractive_to());
    let cos_incident = comps.eye_v().dot(comps.normal_v());

    let cos = if n1 > n2 {
        let sin2_transmitted = (n1 / n2).powi(2) * (1. - cos_incident * cos_incident);
        if sin2_transmitted > 1. {
            return 1.;
        }
        (1. - sin2_transmitted).sqrt()
    } else {
        cos_incident
    };

    let normal_reflectance = ((n1 - n2) / (n1 + n2)).powi(2);
    normal_reflectance + (1. - normal_reflectance) * (1. - cos).powi(5)
}
