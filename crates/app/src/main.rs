//! Entry point for objmesh.
//! Loads an OBJ model (and optionally its MTL library) and reports what the
//! GPU upload step would receive.

use anyhow::{Context, Result, bail};
use asset::{LoadOptions, ObjLoader, material};

const USAGE: &str = "usage: objmesh <model.obj> [--mtl=PATH] [--max-face-vertices=N] \
                     [--max-line-len=N] [--strict]";

#[derive(Debug, PartialEq)]
struct Cli {
    model: String,
    mtl: Option<String>,
    options: LoadOptions,
    strict: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Cli> {
    let mut model: Option<String> = None;
    let mut mtl = None;
    let mut options = LoadOptions::default();
    let mut strict = false;

    for arg in args {
        if let Some(v) = arg.strip_prefix("--mtl=") {
            mtl = Some(v.to_owned());
        } else if let Some(v) = arg.strip_prefix("--max-face-vertices=") {
            let n = v
                .parse::<usize>()
                .with_context(|| format!("Invalid --max-face-vertices value '{}'", v))?;
            options = options.with_max_face_vertices(n);
        } else if let Some(v) = arg.strip_prefix("--max-line-len=") {
            let n = v
                .parse::<usize>()
                .with_context(|| format!("Invalid --max-line-len value '{}'", v))?;
            options = options.with_max_line_len(n);
        } else if arg == "--strict" {
            strict = true;
        } else if arg.starts_with("--") {
            log::warn!("Unknown option '{}', ignoring.", arg);
        } else if model.is_none() {
            model = Some(arg);
        } else {
            bail!("Unexpected extra argument '{}'\n{}", arg, USAGE);
        }
    }

    let Some(model) = model else {
        bail!("Missing model path\n{}", USAGE);
    };
    Ok(Cli {
        model,
        mtl,
        options,
        strict,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = parse_args(std::env::args().skip(1))?;
    log::info!(
        "Loading {} (max_face_vertices={}, max_line_len={})",
        cli.model,
        cli.options.max_face_vertices,
        cli.options.max_line_len
    );

    let load = ObjLoader::new(cli.options)
        .load_path(&cli.model)
        .with_context(|| format!("Failed to load model {}", cli.model))?;
    let mesh = &load.mesh;

    log::info!(
        "Mesh ready: {} vertices ({} bytes), {} indices ({} bytes), {} triangles",
        mesh.vertices.len(),
        mesh.vertex_bytes().len(),
        mesh.indices.len(),
        mesh.index_bytes().len(),
        mesh.triangle_count()
    );
    if let Some((min, max)) = mesh.bounds() {
        log::info!("Bounds: min={} max={} size={}", min, max, max - min);
    }

    if let Some(mtl_path) = &cli.mtl {
        let library = material::load_mtl_from_path(mtl_path)?;
        let mat = library.primary();
        log::info!(
            "Material {}: Kd={:?}, map_Kd={:?}",
            mat.name.as_deref().unwrap_or("<default>"),
            mat.diffuse,
            mat.diffuse_map
        );
        if let Some(tex) = mat.load_diffuse_texture() {
            log::info!("Diffuse map: {}x{} {:?}", tex.width, tex.height, tex.format);
        }
    }

    if !load.warnings.is_empty() {
        log::warn!("{} line(s) were skipped or truncated", load.warnings.len());
        if cli.strict {
            bail!(
                "{} warning(s) in strict mode; first: {}",
                load.warnings.len(),
                load.warnings[0]
            );
        }
    }

    log::info!("Done.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_model_and_options() {
        let cli = parse_args(args(&[
            "models/cube.obj",
            "--mtl=models/cube.mtl",
            "--max-face-vertices=16",
            "--max-line-len=4096",
            "--strict",
        ]))
        .expect("valid args");
        assert_eq!(cli.model, "models/cube.obj");
        assert_eq!(cli.mtl.as_deref(), Some("models/cube.mtl"));
        assert_eq!(
            cli.options,
            LoadOptions::default()
                .with_max_face_vertices(16)
                .with_max_line_len(4096)
        );
        assert!(cli.strict);
    }

    #[test]
    fn defaults_when_only_model_given() {
        let cli = parse_args(args(&["a.obj"])).expect("valid args");
        assert_eq!(cli.options, LoadOptions::default());
        assert_eq!(cli.mtl, None);
        assert!(!cli.strict);
    }

    #[test]
    fn rejects_missing_model_and_bad_numbers() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["a.obj", "--max-line-len=lots"])).is_err());
        assert!(parse_args(args(&["a.obj", "b.obj"])).is_err());
    }
}
