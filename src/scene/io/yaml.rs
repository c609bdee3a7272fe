mod defines;

use std::{f64::consts::FRAC_PI_3, fmt::Display};

use derive_builder::Builder;
use saphyr::Yaml;

use crate::{
    math::{
        color::Color,
        matrix::Matrix,
        point::Point,
        transform::Transformation,
        tuple::{Axis, Tuple},
        vector::Vector,
    },
    render::camera::Camera,
    scene::{
        World,
        light::PointLightSource,
        object::{
            Object,
            material::{Material, pattern::Pattern},
            primitive::shape::Shape,
        },
    },
};
use defines::{Defines, MAX_REFERENCE_DEPTH, merge};

#[derive(Debug, PartialEq, Builder)]
/// Everything a scene file describes. Camera values stay optional, so that
/// command line options can take their place.
pub struct SceneConfig {
    #[builder(setter(strip_option), default = "None")]
    pub width: Option<usize>,
    #[builder(setter(strip_option), default = "None")]
    pub height: Option<usize>,
    #[builder(setter(strip_option), default = "None")]
    pub field_of_view: Option<f64>,
    #[builder(setter(strip_option), default = "None")]
    pub view_transformation: Option<Matrix>,
    #[builder(setter(strip_option), default = "None")]
    pub max_bounces: Option<usize>,

    #[builder(field(ty = "World", build = "self.world.clone()"))]
    pub world: World,
}

/// Values given on the command line. Each one wins over the scene file.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub field_of_view: Option<f64>,
    pub max_bounces: Option<usize>,
}

fn choose<T: Display + Copy>(name: &str, cli: Option<T>, scene: Option<T>, fallback: T) -> T {
    if let (Some(cli), Some(scene)) = (cli, scene) {
        log::warn!("{name} from the scene file ({scene}) overridden by cli value {cli}");
    }
    cli.or(scene).unwrap_or(fallback)
}

impl SceneConfig {
    pub const DEFAULT_WIDTH: usize = 800;
    pub const DEFAULT_HEIGHT: usize = 800;
    pub const DEFAULT_FIELD_OF_VIEW: f64 = FRAC_PI_3;

    pub fn camera(&self, overrides: &CameraOverrides) -> Camera {
        let mut camera = Camera::with_transformation(
            choose("width", overrides.width, self.width, Self::DEFAULT_WIDTH),
            choose("height", overrides.height, self.height, Self::DEFAULT_HEIGHT),
            choose(
                "field of view",
                overrides.field_of_view,
                self.field_of_view,
                Self::DEFAULT_FIELD_OF_VIEW,
            ),
            self.view_transformation.unwrap_or_default(),
        );
        camera.set_max_bounces(choose(
            "max bounces",
            overrides.max_bounces,
            self.max_bounces,
            World::DEFAULT_MAX_BOUNCES,
        ));
        camera
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum YamlParseError {
    MissingField(String),
    InvalidField(String),
    UnexpectedValue(String),
    UnknownDefine(String),
    InvalidType(String),
    YamlSyntaxError(String),
    MultipleDocuments,
    SingularTransformation(String),
    UnsupportedFeature(String),
    InternalError(String),
}

impl YamlParseError {
    fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidField(message.into())
    }

    fn unsupported(feature: &str, context: &str) -> Self {
        Self::UnsupportedFeature(format!("`{feature}` is not supported for `{context}`"))
    }

    fn singular(owner: &str) -> Self {
        Self::SingularTransformation(format!("the transformation of `{owner}` is not invertible"))
    }
}

impl Display for YamlParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "missing field: {field}"),
            Self::InvalidField(reason) => write!(f, "invalid field: {reason}"),
            Self::UnexpectedValue(reason) => write!(f, "unexpected value: {reason}"),
            Self::UnknownDefine(name) => write!(f, "unknown define `{name}`"),
            Self::InvalidType(reason) => write!(f, "invalid type: {reason}"),
            Self::YamlSyntaxError(reason) => write!(f, "yaml syntax error: {reason}"),
            Self::MultipleDocuments => write!(f, "a scene file holds a single yaml document"),
            Self::SingularTransformation(reason) | Self::UnsupportedFeature(reason) => {
                f.write_str(reason)
            }
            Self::InternalError(reason) => write!(f, "internal error: {reason}"),
        }
    }
}

impl std::error::Error for YamlParseError {}

type YamlParseResult<T> = Result<T, YamlParseError>;

/// Kinds `add` understands without a define.
const BUILTIN_KINDS: [&str; 4] = ["camera", "light", "sphere", "plane"];

/// Object kinds a scene file may name that this renderer has no primitive for.
const UNSUPPORTED_OBJECTS: [&str; 8] = [
    "cube",
    "cylinder",
    "cone",
    "triangle",
    "smooth-triangle",
    "group",
    "obj",
    "csg",
];

fn field<'y>(body: &'y Yaml, key: &str) -> Option<&'y Yaml> {
    match &body[key] {
        Yaml::BadValue => None,
        value => Some(value),
    }
}

fn required<'y>(body: &'y Yaml, key: &str) -> YamlParseResult<&'y Yaml> {
    field(body, key).ok_or_else(|| YamlParseError::MissingField(key.to_string()))
}

/// Walks the entries of one scene document and accumulates the result.
struct SceneReader {
    defines: Defines,
    config: SceneConfigBuilder,
    light_seen: bool,
}

impl SceneReader {
    fn new() -> Self {
        Self {
            defines: Defines::with_builtins(),
            config: SceneConfigBuilder::default(),
            light_seen: false,
        }
    }

    fn number(&self, value: &Yaml) -> YamlParseResult<f64> {
        match value {
            Yaml::Integer(int) => Ok(*int as f64),
            Yaml::Real(real) => real
                .parse()
                .map_err(|_| YamlParseError::invalid(format!("`{real}` is not a number"))),
            Yaml::String(name) => match name.strip_prefix('-') {
                Some(positive) => self.number(&Yaml::String(positive.to_string())).map(|v| -v),
                None => self.number(self.defines.resolve(value)?),
            },
            other => Err(YamlParseError::invalid(format!(
                "expected a number, found {other:?}"
            ))),
        }
    }

    fn count(&self, value: &Yaml, key: &str) -> YamlParseResult<usize> {
        let number = self.number(value)?;
        if number < 0. || number.fract() != 0. {
            return Err(YamlParseError::invalid(format!(
                "`{key}` must be a whole non-negative number, found {number}"
            )));
        }
        Ok(number as usize)
    }

    fn pixels(&self, value: &Yaml, key: &str) -> YamlParseResult<usize> {
        match self.count(value, key)? {
            0 => Err(YamlParseError::invalid(format!("`{key}` must be positive"))),
            pixels => Ok(pixels),
        }
    }

    fn triple(&self, value: &Yaml) -> YamlParseResult<(f64, f64, f64)> {
        match self.defines.resolve(value)? {
            Yaml::Array(items) => match items.as_slice() {
                [x, y, z] => Ok((self.number(x)?, self.number(y)?, self.number(z)?)),
                _ => Err(YamlParseError::invalid(format!(
                    "expected three numbers, found {}",
                    items.len()
                ))),
            },
            other => Err(YamlParseError::invalid(format!(
                "expected three numbers, found {other:?}"
            ))),
        }
    }

    fn color(&self, value: &Yaml) -> YamlParseResult<Color> {
        let (r, g, b) = self.triple(value)?;
        Ok(Color::new(r, g, b))
    }

    fn point(&self, value: &Yaml) -> YamlParseResult<Point> {
        let (x, y, z) = self.triple(value)?;
        Ok(Point::new(x, y, z))
    }

    fn vector(&self, value: &Yaml) -> YamlParseResult<Vector> {
        let (x, y, z) = self.triple(value)?;
        Ok(Vector::new(x, y, z))
    }

    fn transformation(&self, step: &Yaml) -> YamlParseResult<Transformation> {
        let Yaml::Array(items) = step else {
            return Err(YamlParseError::invalid(format!(
                "expected a transformation step, found {step:?}"
            )));
        };
        let (kind, args) = items
            .split_first()
            .ok_or_else(|| YamlParseError::MissingField("transformation kind".to_string()))?;
        let kind = kind.as_str().ok_or_else(|| {
            YamlParseError::invalid(format!("transformation kind must be a name, found {kind:?}"))
        })?;
        let args = args
            .iter()
            .map(|arg| self.number(arg))
            .collect::<YamlParseResult<Vec<f64>>>()?;

        Ok(match (kind, args.as_slice()) {
            ("translate", &[x, y, z]) => Transformation::Translation(x, y, z),
            ("scale", &[x, y, z]) => Transformation::Scaling(x, y, z),
            ("scale-uniform", &[factor]) => Transformation::scaling_uniform(factor),
            ("rotate-x", &[radians]) => Transformation::Rotation(Axis::X, radians),
            ("rotate-y", &[radians]) => Transformation::Rotation(Axis::Y, radians),
            ("rotate-z", &[radians]) => Transformation::Rotation(Axis::Z, radians),
            ("shear", &[xy, xz, yx, yz, zx, zy]) => Transformation::Shearing(xy, xz, yx, yz, zx, zy),
            (local, _) if local.starts_with("local-") => {
                return Err(YamlParseError::unsupported(local, "transform"));
            }
            (kind, args) => {
                return Err(YamlParseError::invalid(format!(
                    "no transformation `{kind}` takes {} arguments",
                    args.len()
                )));
            }
        })
    }

    /// Flattens a transform list. Names inside the list splice in the steps
    /// they stand for.
    fn collect_steps(
        &self,
        value: &Yaml,
        depth: usize,
        steps: &mut Vec<Transformation>,
    ) -> YamlParseResult<()> {
        if depth > MAX_REFERENCE_DEPTH {
            return Err(YamlParseError::UnexpectedValue(
                "transform lists nest too deep".to_string(),
            ));
        }
        match self.defines.resolve(value)? {
            Yaml::BadValue => Ok(()),
            Yaml::Array(items) => items.iter().try_for_each(|item| match item {
                Yaml::String(_) => self.collect_steps(item, depth + 1, steps),
                step => {
                    steps.push(self.transformation(step)?);
                    Ok(())
                }
            }),
            other => Err(YamlParseError::invalid(format!(
                "expected a list of transformations, found {other:?}"
            ))),
        }
    }

    fn matrix(&self, value: &Yaml, owner: &str) -> YamlParseResult<Matrix> {
        let mut steps = Vec::new();
        self.collect_steps(value, 0, &mut steps)?;

        let matrix = Matrix::from(steps);
        match matrix.inverse() {
            Some(_) => Ok(matrix),
            None => Err(YamlParseError::singular(owner)),
        }
    }

    fn pattern(&self, value: &Yaml) -> YamlParseResult<Pattern> {
        let body = self.defines.resolve(value)?;
        let kind = required(body, "type")?;
        let kind = kind.as_str().ok_or_else(|| {
            YamlParseError::invalid(format!("pattern type must be a name, found {kind:?}"))
        })?;

        let colors = match self.defines.resolve(required(body, "colors")?)? {
            Yaml::Array(items) => items
                .iter()
                .map(|item| self.color(item))
                .collect::<YamlParseResult<Vec<Color>>>()?,
            other => {
                return Err(YamlParseError::invalid(format!(
                    "pattern colors must be a list, found {other:?}"
                )));
            }
        };
        let &[a, b] = colors.as_slice() else {
            return Err(YamlParseError::invalid(format!(
                "a pattern takes two colors, found {}",
                colors.len()
            )));
        };

        let transformation = match field(body, "transform") {
            Some(steps) => Some(self.matrix(steps, "pattern")?),
            None => None,
        };

        match kind {
            "stripe" | "stripes" => Ok(Pattern::stripe(a, b, transformation)),
            "gradient" => Ok(Pattern::gradient(a, b, transformation)),
            "ring" => Ok(Pattern::ring(a, b, transformation)),
            "checkers" => Ok(Pattern::checkers(a, b, transformation)),
            other => Err(YamlParseError::invalid(format!("unknown pattern type `{other}`"))),
        }
    }

    fn material(&self, value: &Yaml) -> YamlParseResult<Material> {
        let mut material = Material::default();
        let body = self.defines.resolve(value)?;
        let properties = match body {
            Yaml::BadValue => return Ok(material),
            Yaml::Hash(properties) => properties,
            other => {
                return Err(YamlParseError::invalid(format!(
                    "expected material properties, found {other:?}"
                )));
            }
        };

        match (field(body, "color"), field(body, "pattern")) {
            (Some(_), Some(_)) => {
                return Err(YamlParseError::invalid(
                    "a material takes either `color` or `pattern`",
                ));
            }
            (Some(color), None) => material.pattern = Pattern::Const(self.color(color)?),
            (None, Some(pattern)) => material.pattern = self.pattern(pattern)?,
            (None, None) => {}
        }

        for (key, value) in properties {
            let key = key.as_str().ok_or_else(|| {
                YamlParseError::invalid(format!("material property must be a name, found {key:?}"))
            })?;
            let slot = match key {
                "color" | "pattern" => continue,
                "ambient" => &mut material.ambient,
                "diffuse" => &mut material.diffuse,
                "specular" => &mut material.specular,
                "shininess" => &mut material.shininess,
                "reflective" | "reflectivity" => &mut material.reflectivity,
                "transparency" => &mut material.transparency,
                "refractive-index" => &mut material.refractive_index,
                unknown => {
                    log::warn!("ignoring unknown material property `{unknown}`");
                    continue;
                }
            };
            *slot = self.number(value)?;
        }
        Ok(material)
    }

    fn read_camera(&mut self, body: &Yaml) -> YamlParseResult<()> {
        if let Some(width) = field(body, "width") {
            let width = self.pixels(width, "width")?;
            self.config.width(width);
        }
        if let Some(height) = field(body, "height") {
            let height = self.pixels(height, "height")?;
            self.config.height(height);
        }
        if let Some(fov) = field(body, "field-of-view").or_else(|| field(body, "fov")) {
            let fov = self.number(fov)?;
            self.config.field_of_view(fov);
        }

        if ["from", "to", "up"].iter().all(|key| field(body, key).is_none()) {
            return Ok(());
        }
        let view = Matrix::view_transformation(
            self.point(required(body, "from")?)?,
            self.point(required(body, "to")?)?,
            self.vector(required(body, "up")?)?,
        );
        if view.inverse().is_none() {
            return Err(YamlParseError::singular("camera"));
        }
        self.config.view_transformation(view);
        Ok(())
    }

    fn read_light(&mut self, body: &Yaml) -> YamlParseResult<()> {
        if self.light_seen {
            return Err(YamlParseError::unsupported("multiple light sources", "scene"));
        }
        let light = PointLightSource::new(
            self.point(required(body, "at")?)?,
            self.color(required(body, "intensity")?)?,
        );
        log::debug!("light at {:?}", light.position());
        self.config.world.set_light(light);
        self.light_seen = true;
        Ok(())
    }

    fn read_object(&mut self, kind: &str, body: &Yaml) -> YamlParseResult<()> {
        let shape = match kind {
            "sphere" => Shape::Sphere,
            "plane" => Shape::Plane,
            other => return Err(YamlParseError::unsupported(other, "add")),
        };
        if field(body, "animate").is_some() {
            return Err(YamlParseError::unsupported("animate", kind));
        }

        let object = Object::new(
            shape,
            self.material(&body["material"])?,
            self.matrix(&body["transform"], kind)?,
        );
        log::debug!("adding {object}");
        self.config.world.add_obj(object);
        Ok(())
    }

    /// Replaces a defined kind by the kind its define adds, with `body`
    /// layered over the define.
    fn expand_template(&self, kind: &str, body: &Yaml) -> YamlParseResult<(String, Yaml)> {
        let mut kind = kind.to_string();
        let mut body = body.clone();
        for _ in 0..MAX_REFERENCE_DEPTH {
            if BUILTIN_KINDS.contains(&kind.as_str()) || UNSUPPORTED_OBJECTS.contains(&kind.as_str()) {
                return Ok((kind, body));
            }
            let template = self.defines.get(&kind)?;
            let inner = template["add"].as_str().ok_or_else(|| {
                YamlParseError::invalid(format!("define `{kind}` does not name what it adds"))
            })?;
            body = merge(template, &body);
            kind = inner.to_string();
        }
        Err(YamlParseError::UnexpectedValue(format!(
            "`add: {kind}` refers back to itself"
        )))
    }

    fn read_add(&mut self, kind: &str, body: &Yaml) -> YamlParseResult<()> {
        let (kind, body) = self.expand_template(kind, body)?;
        match kind.as_str() {
            "camera" => self.read_camera(&body),
            "light" => self.read_light(&body),
            object => self.read_object(object, &body),
        }
    }

    fn read_options(&mut self, body: &Yaml) -> YamlParseResult<()> {
        let Yaml::Hash(options) = body else {
            return Err(YamlParseError::invalid("options must be a mapping"));
        };
        for (key, value) in options {
            match key.as_str() {
                Some("options") => {}
                Some("max-bounces" | "reflective-depth") => {
                    let bounces = self.count(value, "max-bounces")?;
                    self.config.max_bounces(bounces);
                }
                Some(other) => log::warn!("ignoring unsupported option `{other}`"),
                None => {
                    return Err(YamlParseError::invalid(format!(
                        "option name must be a string, found {key:?}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn read_entry(&mut self, entry: &Yaml) -> YamlParseResult<()> {
        let Yaml::Hash(hash) = entry else {
            return Err(YamlParseError::UnexpectedValue(format!(
                "scene entries are mappings, found {entry:?}"
            )));
        };
        let name_of = |value: &Yaml, operation: &str| {
            value.as_str().map(str::to_string).ok_or_else(|| {
                YamlParseError::invalid(format!("`{operation}` takes a name, found {value:?}"))
            })
        };

        if let Some(kind) = field(entry, "add") {
            let kind = name_of(kind, "add")?;
            self.read_add(&kind, entry)
        } else if let Some(name) = field(entry, "define") {
            let name = name_of(name, "define")?;
            self.defines
                .define(&name, entry["extend"].as_str(), &entry["value"])
        } else if field(entry, "camera").is_some() {
            self.read_camera(entry)
        } else if field(entry, "options").is_some() {
            self.read_options(entry)
        } else {
            if let Some((operation, _)) = hash.front() {
                log::warn!("ignoring unknown operation {operation:?}");
            }
            Ok(())
        }
    }

    fn read_document(&mut self, document: &Yaml) -> YamlParseResult<()> {
        match document {
            Yaml::Null => Ok(()),
            Yaml::Array(entries) => entries.iter().try_for_each(|entry| self.read_entry(entry)),
            _ => Err(YamlParseError::InvalidType(
                "a scene must be a sequence of operations".to_string(),
            )),
        }
    }

    fn finish(self) -> YamlParseResult<SceneConfig> {
        if !self.light_seen {
            log::warn!("scene has no light, using the default one");
        }
        self.config
            .build()
            .map_err(|err| YamlParseError::InternalError(err.to_string()))
    }
}

fn load_document(source: &str) -> YamlParseResult<Yaml> {
    let mut documents = Yaml::load_from_str(source)
        .map_err(|err| YamlParseError::YamlSyntaxError(err.to_string()))?;
    if documents.len() > 1 {
        return Err(YamlParseError::MultipleDocuments);
    }
    Ok(documents.pop().unwrap_or(Yaml::Null))
}

/// Parses a whole scene description.
pub fn parse_str(source: &str) -> YamlParseResult<SceneConfig> {
    let document = load_document(source)?;
    let mut reader = SceneReader::new();
    reader.read_document(&document)?;

    let config = reader.finish()?;
    log::debug!(
        "parsed scene with {} objects, light at {:?}",
        config.world.object_count(),
        config.world.light().position()
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::{
        f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6, PI},
        path::PathBuf,
    };

    use super::*;
    use crate::{assert_approx_eq_low_prec, math::transform::Transform};

    const SAMPLE_SCENES_DIR: &str = "samples/scenes/";

    fn objects(source: &str) -> Vec<Object> {
        parse_str(source).unwrap().world.objects().to_vec()
    }

    fn only_object(source: &str) -> Object {
        let mut objects = objects(source);
        assert_eq!(objects.len(), 1, "{source}");
        objects.remove(0)
    }

    #[test]
    fn empty_and_comment_only_sources() {
        for source in ["", "# nothing here\n"] {
            let config = parse_str(source).unwrap();
            assert_eq!(config.world, World::empty());
            assert_eq!(config.width, None);
        }
    }

    #[test]
    fn defaults_fill_missing_camera_values() {
        let camera = parse_str("").unwrap().camera(&CameraOverrides::default());

        assert_eq!(
            camera,
            Camera::new(
                SceneConfig::DEFAULT_WIDTH,
                SceneConfig::DEFAULT_HEIGHT,
                SceneConfig::DEFAULT_FIELD_OF_VIEW
            )
        );
        assert_eq!(camera.max_bounces(), World::DEFAULT_MAX_BOUNCES);
    }

    #[test]
    fn command_line_wins_over_scene_values() {
        let config = parse_str(
            r#"
- camera:
  width: 100
  height: 50
  fov: 0.5
- options:
  max-bounces: 2
"#,
        )
        .unwrap();
        let camera = config.camera(&CameraOverrides {
            width: Some(20),
            field_of_view: Some(1.),
            max_bounces: Some(7),
            ..Default::default()
        });

        let mut expected = Camera::new(20, 50, 1.);
        expected.set_max_bounces(7);
        assert_eq!(camera, expected);
    }

    #[test]
    fn camera_with_view() {
        let config = parse_str(
            r#"
- add: camera
  width: 100
  height: 100
  field-of-view: 0.785
  from: [ -6, 6, -10 ]
  to: [ 6, 0, 6 ]
  up: [ -0.45, 1, 0 ]
"#,
        )
        .unwrap();
        let view = Matrix::view_transformation(
            Point::new(-6., 6., -10.),
            Point::new(6., 0., 6.),
            Vector::new(-0.45, 1., 0.),
        );

        assert_eq!(
            config.camera(&CameraOverrides::default()),
            Camera::with_transformation(100, 100, 0.785, view)
        );
    }

    #[test]
    fn camera_view_is_all_or_nothing() {
        let config = parse_str("- camera:\n  width: 30\n").unwrap();
        assert_eq!(config.view_transformation, None);

        assert!(matches!(
            parse_str("- camera:\n  from: [ 0, 0, -5 ]\n  to: [ 0, 0, 0 ]\n"),
            Err(YamlParseError::MissingField(key)) if key == "up"
        ));
    }

    #[test]
    fn camera_looking_at_itself_is_singular() {
        let source = "- add: camera\n  from: [0, 1, 0]\n  to: [0, 1, 0]\n  up: [0, 1, 0]\n";

        assert!(matches!(
            parse_str(source),
            Err(YamlParseError::SingularTransformation(_))
        ));
    }

    #[test]
    fn camera_size_must_be_positive_whole_number() {
        for source in [
            "- camera:\n  width: 0\n",
            "- camera:\n  height: 2.5\n",
            "- camera:\n  width: -4\n",
        ] {
            assert!(
                matches!(parse_str(source), Err(YamlParseError::InvalidField(_))),
                "{source}"
            );
        }
    }

    #[test]
    fn single_light() {
        let config = parse_str("- add: light\n  at: [ 50, 100, -50 ]\n  intensity: [ 1, 1, 1 ]\n")
            .unwrap();

        assert_eq!(
            config.world.light(),
            &PointLightSource::new(Point::new(50., 100., -50.), Color::white())
        );
    }

    #[test]
    fn second_light_is_unsupported() {
        let light = "- add: light\n  at: [ 0, 10, 0 ]\n  intensity: WHITE\n";

        assert!(matches!(
            parse_str(&light.repeat(2)),
            Err(YamlParseError::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn light_needs_a_position() {
        assert!(matches!(
            parse_str("- add: light\n  intensity: WHITE\n"),
            Err(YamlParseError::MissingField(key)) if key == "at"
        ));
    }

    #[test]
    fn options_and_their_alias() {
        let config = parse_str("- options:\n  max-bounces: 4\n  supersampling-level: 3\n").unwrap();
        assert_eq!(config.max_bounces, Some(4));

        let config = parse_str("- options:\n  reflective-depth: 9\n").unwrap();
        assert_eq!(config.camera(&CameraOverrides::default()).max_bounces(), 9);
    }

    #[test]
    fn bare_objects_use_defaults() {
        assert_eq!(objects("- add: sphere\n- add: plane\n"), vec![
            Object::sphere(),
            Object::plane()
        ]);
    }

    #[test]
    fn every_material_property() {
        let object = only_object(
            r#"
- add: sphere
  material:
    color: [ 0.373, 0.404, 0.550 ]
    diffuse: 0.2
    ambient: 0.0
    specular: 1.0
    shininess: 200
    reflective: 0.7
    transparency: 0.7
    refractive-index: 1.5
"#,
        );

        assert_eq!(object.material(), &Material {
            pattern: Pattern::Const(Color::new(0.373, 0.404, 0.550)),
            ambient: 0.,
            diffuse: 0.2,
            specular: 1.,
            shininess: 200.,
            reflectivity: 0.7,
            transparency: 0.7,
            refractive_index: 1.5,
        });
    }

    #[test]
    fn unknown_material_property_is_skipped() {
        let object = only_object("- add: plane\n  material:\n    glow: 3\n    diffuse: 0.5\n");

        assert_eq!(object.material().diffuse, 0.5);
    }

    #[test]
    fn color_and_pattern_are_exclusive() {
        let source = r#"
- add: sphere
  material:
    color: RED
    pattern:
      type: stripes
      colors: [ RED, BLUE ]
"#;
        assert!(matches!(parse_str(source), Err(YamlParseError::InvalidField(_))));
    }

    #[test]
    fn transform_steps_apply_in_list_order() {
        let object = only_object(
            r#"
- add: plane
  transform:
    - [ rotate-x, FRAC_PI_2 ]
    - [ translate, 0, 0, 500 ]
    - [ shear, 1, 0, 0, 0, 0, 0 ]
"#,
        );
        let expected = Matrix::rotation_x(FRAC_PI_2)
            .translate(0., 0., 500.)
            .shear(1., 0., 0., 0., 0., 0.)
            .transformed();

        assert_approx_eq_low_prec!(object.transformation(), &expected);
    }

    #[test]
    fn negated_numbers_and_constants() {
        let object = only_object(
            "- add: sphere\n  transform:\n    - [ translate, -1, -PI, -0.5 ]\n    - [ rotate-y, -FRAC_PI_6 ]\n",
        );
        let expected = Matrix::translation(-1., -PI, -0.5)
            .rotate_y(-FRAC_PI_6)
            .transformed();

        assert_approx_eq_low_prec!(object.transformation(), &expected);
    }

    #[test]
    fn malformed_transformations() {
        for source in [
            "- add: sphere\n  transform:\n    - [ translate, 1, 2 ]\n",
            "- add: sphere\n  transform:\n    - [ rotate-x ]\n",
            "- add: sphere\n  transform:\n    - [ shear, 1, 0, 0 ]\n",
            "- add: sphere\n  transform:\n    - [ wobble, 1 ]\n",
            "- add: sphere\n  transform: 4\n",
        ] {
            assert!(
                matches!(parse_str(source), Err(YamlParseError::InvalidField(_))),
                "{source}"
            );
        }
        assert!(matches!(
            parse_str("- add: sphere\n  transform:\n    - []\n"),
            Err(YamlParseError::MissingField(_))
        ));
    }

    #[test]
    fn singular_transformations_are_rejected() {
        let object = "- add: sphere\n  transform:\n    - [ scale, 0, 1, 1 ]\n";
        let pattern = r#"
- add: plane
  material:
    pattern:
      type: stripes
      colors: [ WHITE, BLACK ]
      transform:
        - [ scale-uniform, 0 ]
"#;
        for source in [object, pattern] {
            assert!(matches!(
                parse_str(source),
                Err(YamlParseError::SingularTransformation(_))
            ));
        }
    }

    #[test]
    fn tiny_uniform_scale_is_accepted() {
        let object = only_object("- add: sphere\n  transform:\n    - [ scale-uniform, 0.02 ]\n");

        assert_approx_eq_low_prec!(object.transformation(), &Matrix::scaling_uniform(0.02));
    }

    #[test]
    fn every_pattern_kind() {
        let source = ["stripes", "gradient", "ring", "checkers"]
            .iter()
            .map(|kind| {
                format!(
                    "- add: sphere\n  material:\n    pattern:\n      type: {kind}\n      colors: [ RED, GREEN ]\n      transform: small\n"
                )
            })
            .collect::<String>();
        let source = format!("- define: small\n  value:\n    - [ scale, 0.1, 0.1, 0.1 ]\n{source}");

        let (red, green) = (Color::red(), Color::green());
        let small = Some(Matrix::scaling_uniform(0.1));
        let patterns = objects(&source)
            .iter()
            .map(|object| object.material().pattern.clone())
            .collect::<Vec<_>>();

        assert_eq!(patterns, vec![
            Pattern::stripe(red, green, small),
            Pattern::gradient(red, green, small),
            Pattern::ring(red, green, small),
            Pattern::checkers(red, green, small),
        ]);
    }

    #[test]
    fn pattern_needs_two_colors_and_a_known_type() {
        for source in [
            "- add: plane\n  material:\n    pattern:\n      type: checkers\n      colors: [ RED ]\n",
            "- add: plane\n  material:\n    pattern:\n      type: marble\n      colors: [ RED, BLUE ]\n",
        ] {
            assert!(
                matches!(parse_str(source), Err(YamlParseError::InvalidField(_))),
                "{source}"
            );
        }
    }

    #[test]
    fn defined_materials_can_be_extended() {
        let source = r#"
- define: white-material
  value:
    color: [ 1, 1, 1 ]
    diffuse: 0.7
- define: blue-material
  extend: white-material
  value:
    color: BLUE
- add: sphere
  material: white-material
- add: plane
  material: blue-material
"#;
        let white = Material {
            diffuse: 0.7,
            ..Material::with_color(Color::white())
        };
        let blue = Material {
            pattern: Pattern::Const(Color::blue()),
            ..white.clone()
        };

        assert_eq!(objects(source), vec![
            Object::with_shape_material(Shape::Sphere, white),
            Object::with_shape_material(Shape::Plane, blue),
        ]);
    }

    #[test]
    fn defined_transforms_splice_into_lists() {
        let source = r#"
- define: standard-transform
  value:
    - [ translate, 1, -1, 1 ]
    - [ scale, 0.5, 0.5, 0.5 ]
- define: large-object
  value:
    - standard-transform
    - [ scale-uniform, 4 ]
- add: sphere
  transform:
    - standard-transform
- add: plane
  transform: large-object
"#;
        let standard = Matrix::translation(1., -1., 1.).scale_uniform(0.5).transformed();
        let large = Matrix::scaling_uniform(4.) * standard;

        assert_eq!(objects(source), vec![
            Object::with_transformation(Shape::Sphere, standard),
            Object::with_transformation(Shape::Plane, large),
        ]);
    }

    #[test]
    fn defined_object_templates_layer_the_entry_on_top() {
        let source = r#"
- define: raised-sphere
  value:
    add: sphere
    material:
      color: RED
      diffuse: 0.3
    transform:
      - [ translate, 0, 1, 0 ]
- define: big-raised-sphere
  value:
    add: raised-sphere
    transform:
      - [ scale-uniform, 2 ]
- add: big-raised-sphere
  material:
    diffuse: 0.6
  transform:
    - [ rotate-z, FRAC_PI_4 ]
"#;
        let object = only_object(source);
        let expected = Matrix::translation(0., 1., 0.)
            .scale_uniform(2.)
            .rotate_z(FRAC_PI_4)
            .transformed();

        assert_eq!(object.shape(), Shape::Sphere);
        assert_eq!(object.material(), &Material {
            diffuse: 0.6,
            ..Material::with_color(Color::red())
        });
        assert_approx_eq_low_prec!(object.transformation(), &expected);
    }

    #[test]
    fn self_referencing_template_is_an_error() {
        let source = "- define: loop\n  value:\n    add: loop\n- add: loop\n";

        assert!(matches!(
            parse_str(source),
            Err(YamlParseError::UnexpectedValue(_))
        ));
    }

    #[test]
    fn defined_colors_and_points() {
        let config = parse_str(
            r#"
- define: lamp-position
  value: [ -10, 10, -10 ]
- define: warm
  value: [ 1, 0.9, 0.8 ]
- add: light
  at: lamp-position
  intensity: warm
"#,
        )
        .unwrap();

        assert_eq!(
            config.world.light(),
            &PointLightSource::new(Point::new(-10., 10., -10.), Color::new(1., 0.9, 0.8))
        );
    }

    #[test]
    fn unknown_define_is_named() {
        let result = parse_str("- add: sphere\n  material:\n    color: NOT_DEFINED\n");

        assert_eq!(
            result,
            Err(YamlParseError::UnknownDefine("NOT_DEFINED".to_string()))
        );
    }

    #[test]
    fn builtin_materials() {
        let source = "- add: sphere\n  material: GLASS_MATERIAL\n- add: sphere\n  material: MIRROR_MATERIAL\n";
        let materials = objects(source)
            .iter()
            .map(|object| object.material().clone())
            .collect::<Vec<_>>();

        assert_eq!(materials, vec![Material::glass(), Material::mirror()]);
    }

    #[test]
    fn missing_features_are_unsupported() {
        let animated = "- add: sphere\n  animate:\n    - duration: 1\n";
        let local = "- add: sphere\n  transform:\n    - [ local-rotate-y, 1 ]\n";
        let mut sources = vec![animated.to_string(), local.to_string()];
        sources.extend(["cube", "cylinder", "group", "obj", "csg"].map(|kind| format!("- add: {kind}\n")));

        for source in sources {
            assert!(
                matches!(parse_str(&source), Err(YamlParseError::UnsupportedFeature(_))),
                "{source}"
            );
        }
    }

    #[test]
    fn document_shape_errors() {
        assert!(matches!(
            parse_str("- add: [sphere"),
            Err(YamlParseError::YamlSyntaxError(_))
        ));
        assert_eq!(
            parse_str("- add: sphere\n---\n- add: plane\n"),
            Err(YamlParseError::MultipleDocuments)
        );
        assert!(matches!(
            parse_str("add: sphere\n"),
            Err(YamlParseError::InvalidType(_))
        ));
        assert!(matches!(
            parse_str("- 42\n"),
            Err(YamlParseError::UnexpectedValue(_))
        ));
    }

    #[test]
    fn unknown_operations_are_skipped() {
        assert_eq!(objects("- paint: everything\n- add: sphere\n").len(), 1);
    }

    #[test]
    fn error_messages_name_the_problem() {
        let unsupported = parse_str("- add: cube\n").unwrap_err();
        assert!(unsupported.to_string().contains("cube"));

        let missing = parse_str("- add: light\n  at: [ 0, 0, 0 ]\n").unwrap_err();
        assert_eq!(missing.to_string(), "missing field: intensity");
    }

    fn sample_scenes() -> Vec<PathBuf> {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join(SAMPLE_SCENES_DIR)
            .read_dir()
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "yaml" || ext == "yml"))
            .collect()
    }

    #[test]
    fn parse_sample_scenes() {
        let scenes = sample_scenes();
        assert!(!scenes.is_empty(), "no sample scenes found");

        for scene in scenes {
            let source = std::fs::read_to_string(&scene).unwrap();
            let config = parse_str(&source)
                .unwrap_or_else(|err| panic!("failed to parse {scene:?}: {err}"));
            assert!(config.world.object_count() > 0, "{scene:?} is empty");
        }
    }
}
