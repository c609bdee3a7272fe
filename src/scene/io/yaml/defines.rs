use std::{
    collections::HashMap,
    f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, PI},
};

use saphyr::Yaml;

use super::YamlParseError;
use crate::{math::color::Color, scene::object::material::Material};

/// Name references nested deeper than this are treated as a cycle.
pub const MAX_REFERENCE_DEPTH: usize = 32;

/// Named values a scene refers to by writing the name in place of the value.
#[derive(Debug, Clone, Default)]
pub struct Defines {
    values: HashMap<String, Yaml>,
}

fn real(value: f64) -> Yaml {
    Yaml::Real(value.to_string())
}

fn color(color: Color) -> Yaml {
    Yaml::Array(vec![real(color.r()), real(color.g()), real(color.b())])
}

fn mapping<const N: usize>(entries: [(&str, Yaml); N]) -> Yaml {
    Yaml::Hash(
        entries
            .into_iter()
            .map(|(key, value)| (Yaml::String(key.to_string()), value))
            .collect(),
    )
}

fn material(material: &Material, surface: Color) -> Yaml {
    mapping([
        ("color", color(surface)),
        ("ambient", real(material.ambient)),
        ("diffuse", real(material.diffuse)),
        ("specular", real(material.specular)),
        ("shininess", real(material.shininess)),
        ("reflective", real(material.reflectivity)),
        ("transparency", real(material.transparency)),
        ("refractive-index", real(material.refractive_index)),
    ])
}

fn list_items(value: &Yaml) -> Vec<Yaml> {
    match value {
        Yaml::Array(items) => items.clone(),
        other => vec![other.clone()],
    }
}

/// Layers `overlay` on top of `base`. Mappings merge key by key, `transform`
/// entries become the base steps followed by the overlay steps, and any other
/// value is replaced by the overlay.
pub fn merge(base: &Yaml, overlay: &Yaml) -> Yaml {
    match (base, overlay) {
        (Yaml::Hash(base_hash), Yaml::Hash(overlay_hash)) => {
            let mut merged = base_hash.clone();
            for (key, value) in overlay_hash {
                let layered = match (key.as_str(), base_hash.get(key)) {
                    (Some("transform"), Some(inherited)) => {
                        Yaml::Array([list_items(inherited), list_items(value)].concat())
                    }
                    (_, Some(inherited)) => merge(inherited, value),
                    (_, None) => value.clone(),
                };
                merged.insert(key.clone(), layered);
            }
            Yaml::Hash(merged)
        }
        (_, Yaml::BadValue) => base.clone(),
        _ => overlay.clone(),
    }
}

impl Defines {
    /// Constants, colors and materials every scene can use without defining them.
    pub fn with_builtins() -> Self {
        let mut defines = Self::default();
        let constants = [
            ("PI", PI),
            ("FRAC_PI_2", FRAC_PI_2),
            ("FRAC_PI_3", FRAC_PI_3),
            ("FRAC_PI_4", FRAC_PI_4),
            ("FRAC_PI_6", FRAC_PI_6),
            ("FRAC_1_SQRT_2", FRAC_1_SQRT_2),
        ];
        for (name, value) in constants {
            defines.insert(name, real(value));
        }

        let colors = [
            ("WHITE", Color::white()),
            ("BLACK", Color::black()),
            ("RED", Color::red()),
            ("GREEN", Color::green()),
            ("BLUE", Color::blue()),
        ];
        for (name, value) in colors {
            defines.insert(name, color(value));
        }

        defines.insert("GLASS_MATERIAL", material(&Material::glass(), Color::black()));
        defines.insert("MIRROR_MATERIAL", material(&Material::mirror(), Color::black()));
        defines
    }

    pub fn insert(&mut self, name: &str, value: Yaml) {
        if self.values.insert(name.to_string(), value).is_some() {
            log::debug!("define `{name}` replaced");
        }
    }

    pub fn get(&self, name: &str) -> Result<&Yaml, YamlParseError> {
        self.values
            .get(name)
            .ok_or_else(|| YamlParseError::UnknownDefine(name.to_string()))
    }

    /// Follows names until a value that is not a name turns up.
    pub fn resolve<'a>(&'a self, value: &'a Yaml) -> Result<&'a Yaml, YamlParseError> {
        let mut current = value;
        for _ in 0..MAX_REFERENCE_DEPTH {
            match current {
                Yaml::String(name) => current = self.get(name)?,
                _ => return Ok(current),
            }
        }
        Err(YamlParseError::UnexpectedValue(format!(
            "define references nest deeper than {MAX_REFERENCE_DEPTH} levels"
        )))
    }

    /// Registers `value` under `name`, layered over the define named by `extend`.
    pub fn define(
        &mut self,
        name: &str,
        extend: Option<&str>,
        value: &Yaml,
    ) -> Result<(), YamlParseError> {
        let value = match extend {
            Some(base) => merge(self.get(base)?, value),
            None if value.is_badvalue() => {
                return Err(YamlParseError::MissingField(format!("value of define `{name}`")));
            }
            None => value.clone(),
        };
        self.insert(name, value);
        Ok(())
    }
}
