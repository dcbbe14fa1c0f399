//! Minimal MTL parser: `newmtl`, `Kd` and `map_Kd`.
//!
//! Independent of the OBJ loader; the mesh never refers to materials.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{obj::scanner::parse_floats, texture::TextureData};

/// Diffuse colour used when a material has no `Kd`.
pub const DEFAULT_DIFFUSE: [f32; 3] = [1.0, 1.0, 1.0];

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// `None` for directives that appear before the first `newmtl`.
    pub name: Option<String>,
    pub diffuse: [f32; 3],
    /// Resolved against the MTL file's directory when loaded from a path.
    pub diffuse_map: Option<PathBuf>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: None,
            diffuse: DEFAULT_DIFFUSE,
            diffuse_map: None,
        }
    }
}

impl Material {
    /// Load the `map_Kd` texture, flipped for GL texture origin.
    ///
    /// A missing map is `None`; so is one that fails to load (logged).
    pub fn load_diffuse_texture(&self) -> Option<TextureData> {
        let path = self.diffuse_map.as_ref()?;
        match TextureData::load(path, true) {
            Ok(tex) => Some(tex),
            Err(err) => {
                log::warn!("Failed to load diffuse map {:?}: {:#}", path, err);
                None
            }
        }
    }
}

/// Materials in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialLibrary {
    pub materials: Vec<Material>,
}

impl MaterialLibrary {
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials
            .iter()
            .find(|m| m.name.as_deref() == Some(name))
    }

    /// First declared material, or the default one for an empty library.
    pub fn primary(&self) -> Material {
        self.materials.first().cloned().unwrap_or_default()
    }
}

/// Load an MTL file; `map_Kd` paths are made relative to its directory.
pub fn load_mtl_from_path(path: impl AsRef<Path>) -> Result<MaterialLibrary> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to open MTL file: {}", path.display()))?;
    let base = path.parent().unwrap_or(Path::new(""));
    let library = parse_mtl(&contents, base);
    log::info!(
        "Loaded {} material(s) from {}",
        library.materials.len(),
        path.display()
    );
    Ok(library)
}

/// Parse MTL text; `map_Kd` paths are kept as written.
pub fn load_mtl_from_str(contents: &str) -> MaterialLibrary {
    parse_mtl(contents, Path::new(""))
}

fn parse_mtl(contents: &str, base: &Path) -> MaterialLibrary {
    let mut materials: Vec<Material> = Vec::new();

    for (line_no, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (tag, rest) = trimmed
            .split_once(char::is_whitespace)
            .map(|(t, r)| (t, r.trim()))
            .unwrap_or((trimmed, ""));

        match tag {
            "newmtl" => materials.push(Material {
                name: Some(rest.to_owned()),
                ..Material::default()
            }),
            "Kd" => match parse_floats::<3>(rest.split_whitespace()) {
                Some(kd) => current(&mut materials).diffuse = kd,
                None => log::warn!("Malformed Kd on MTL line {}: '{}'", line_no + 1, trimmed),
            },
            // The path is the rest of the line; options such as `-bm` are not supported.
            "map_Kd" if !rest.is_empty() => {
                current(&mut materials).diffuse_map = Some(base.join(rest));
            }
            _ => {}
        }
    }

    MaterialLibrary { materials }
}

fn current(materials: &mut Vec<Material>) -> &mut Material {
    if materials.is_empty() {
        materials.push(Material::default());
    }
    let last = materials.len() - 1;
    &mut materials[last]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_materials() {
        let lib = load_mtl_from_str(
            "# two materials\n\
             newmtl red\n\
             Kd 1 0 0\n\
             newmtl textured\n\
             Kd 0.5 0.5 0.5\n\
             map_Kd textures/wood.png\n",
        );
        assert_eq!(lib.materials.len(), 2);
        assert_eq!(lib.get("red").map(|m| m.diffuse), Some([1.0, 0.0, 0.0]));
        let textured = lib.get("textured").expect("textured material");
        assert_eq!(
            textured.diffuse_map.as_deref(),
            Some(Path::new("textures/wood.png"))
        );
        assert_eq!(lib.primary().name.as_deref(), Some("red"));
    }

    #[test]
    fn directives_before_newmtl_go_to_unnamed_material() {
        let lib = load_mtl_from_str("Kd 0.2 0.3 0.4\n");
        assert_eq!(lib.materials.len(), 1);
        assert_eq!(lib.materials[0].name, None);
        assert_eq!(lib.materials[0].diffuse, [0.2, 0.3, 0.4]);
    }

    #[test]
    fn malformed_kd_keeps_default() {
        let lib = load_mtl_from_str("newmtl m\nKd 0.5 nope\n");
        assert_eq!(lib.materials[0].diffuse, DEFAULT_DIFFUSE);
        assert_eq!(MaterialLibrary::default().primary(), Material::default());
    }

    #[test]
    fn loads_library_and_texture_next_to_it() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/cube.mtl");
        let lib = load_mtl_from_path(&path).expect("load mtl");
        let crate_mat = lib.get("crate").expect("crate material");
        assert_eq!(crate_mat.diffuse, [0.8, 0.6, 0.4]);

        let tex = crate_mat.load_diffuse_texture().expect("diffuse map");
        assert_eq!((tex.width, tex.height), (4, 2));
    }

    #[test]
    fn unreadable_map_yields_none() {
        let mat = Material {
            diffuse_map: Some(PathBuf::from("no/such/map.png")),
            ..Material::default()
        };
        assert!(mat.load_diffuse_texture().is_none());
        assert!(Material::default().load_diffuse_texture().is_none());
    }

    #[test]
    fn missing_mtl_is_an_error() {
        assert!(load_mtl_from_path("no/such/file.mtl").is_err());
    }
}
