//! Streaming OBJ parser supporting positions, normals and texture coordinates.
//!
//! Only `v`, `vt`, `vn`, `f` and comments are interpreted. Faces are fanned
//! into triangles and every distinct `(v, vt, vn)` combination becomes one
//! output vertex.

pub mod attributes;
pub mod dedup;
pub mod index;
pub mod scanner;
pub mod triangulate;

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::{
    error::{ObjError, ObjResult, ObjWarning},
    mesh::MeshData,
};

use self::{
    attributes::AttributeStore,
    dedup::{SlotError, VertexDeduplicator},
    index::{parse_face_vertex, resolve_face_vertex},
    scanner::{LineKind, ScannedLine, parse_floats, scan_line},
    triangulate::{MAX_FACE_VERTICES, triangulate_fan},
};

/// Default cap on the byte length of a single line.
pub const MAX_LINE_LEN: usize = 1024;

/// Loader limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    /// Face-vertex tokens beyond this count are dropped (never below 3).
    pub max_face_vertices: usize,
    /// Lines longer than this many bytes are skipped.
    pub max_line_len: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_face_vertices: MAX_FACE_VERTICES,
            max_line_len: MAX_LINE_LEN,
        }
    }
}

impl LoadOptions {
    pub fn with_max_face_vertices(mut self, max: usize) -> Self {
        self.max_face_vertices = max.max(3);
        self
    }

    pub fn with_max_line_len(mut self, max: usize) -> Self {
        self.max_line_len = max;
        self
    }
}

/// Successful load: the mesh plus everything that was skipped along the way.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjLoad {
    pub mesh: MeshData,
    pub warnings: Vec<ObjWarning>,
}

/// Load an OBJ mesh from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> ObjResult<MeshData> {
    ObjLoader::default().load_path(path).map(|l| l.mesh)
}

/// Load an OBJ mesh from a [`BufRead`] implementation.
pub fn load_obj_from_reader<R: BufRead>(reader: R) -> ObjResult<MeshData> {
    ObjLoader::default().load_reader(reader).map(|l| l.mesh)
}

/// Convenience helper to parse an OBJ string literal.
pub fn load_obj_from_str(contents: &str) -> ObjResult<MeshData> {
    ObjLoader::default().load_str(contents).map(|l| l.mesh)
}

/// OBJ loader with explicit [`LoadOptions`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjLoader {
    options: LoadOptions,
}

impl ObjLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    pub fn load_path(&self, path: impl AsRef<Path>) -> ObjResult<ObjLoad> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ObjError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loading OBJ from {}", path.display());
        self.load_reader(BufReader::new(file))
    }

    pub fn load_str(&self, contents: &str) -> ObjResult<ObjLoad> {
        self.load_reader(io::Cursor::new(contents))
    }

    /// Parse the whole stream. Any partially built state is dropped on error.
    pub fn load_reader<R: BufRead>(&self, mut reader: R) -> ObjResult<ObjLoad> {
        let mut asm = Assembler::new(self.options);
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            line_no += 1;
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| ObjError::Read {
                    line: line_no,
                    source,
                })?;
            if read == 0 {
                break;
            }

            let content_len = buf.trim_ascii_end().len();
            if content_len > self.options.max_line_len {
                asm.warn(ObjWarning::LineTooLong {
                    line: line_no,
                    len: content_len,
                    max: self.options.max_line_len,
                });
                continue;
            }

            let line = String::from_utf8_lossy(&buf);
            asm.feed(line_no, scan_line(&line))?;
        }

        asm.finish()
    }
}

/// Per-load state. Lives for exactly one `load_reader` call.
struct Assembler {
    options: LoadOptions,
    attributes: AttributeStore,
    dedup: VertexDeduplicator,
    indices: Vec<u32>,
    face_slots: Vec<u32>,
    faces: usize,
    warnings: Vec<ObjWarning>,
}

impl Assembler {
    fn new(options: LoadOptions) -> Self {
        Self {
            options,
            attributes: AttributeStore::new(),
            dedup: VertexDeduplicator::new(),
            indices: Vec::new(),
            face_slots: Vec::with_capacity(options.max_face_vertices),
            faces: 0,
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, warning: ObjWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn feed(&mut self, line: usize, scanned: ScannedLine<'_>) -> ObjResult<()> {
        match scanned.kind {
            LineKind::Blank | LineKind::Comment => {}
            LineKind::Position => match parse_floats::<3>(scanned.fields()) {
                Some(p) => self.attributes.push_position(p),
                None => self.malformed(line, "v", 3),
            },
            LineKind::Texcoord => match parse_floats::<2>(scanned.fields()) {
                Some(uv) => self.attributes.push_texcoord(uv),
                None => self.malformed(line, "vt", 2),
            },
            LineKind::Normal => match parse_floats::<3>(scanned.fields()) {
                Some(n) => self.attributes.push_normal(n),
                None => self.malformed(line, "vn", 3),
            },
            LineKind::Face => self.face(line, scanned)?,
            // Material and grouping directives are not geometry.
            LineKind::Unknown(tag) => self.warn(ObjWarning::UnsupportedDirective {
                line,
                directive: tag.to_owned(),
            }),
        }
        Ok(())
    }

    fn malformed(&mut self, line: usize, tag: &'static str, expected: usize) {
        self.warn(ObjWarning::MalformedNumericLine {
            line,
            tag,
            expected,
        });
    }

    fn face(&mut self, line: usize, scanned: ScannedLine<'_>) -> ObjResult<()> {
        // Negative indices are relative to what has been declared up to here.
        let counts = self.attributes.counts();
        let max = self.options.max_face_vertices.max(3);
        self.face_slots.clear();

        let mut tokens = 0;
        for token in scanned.fields() {
            tokens += 1;
            if self.face_slots.len() == max {
                continue;
            }
            let key = resolve_face_vertex(parse_face_vertex(token), counts).map_err(|raw| {
                ObjError::PositionIndexOutOfRange {
                    line,
                    raw,
                    count: counts.positions,
                }
            })?;
            let slot = self
                .dedup
                .get_or_create(key, &self.attributes)
                .map_err(|e| match e {
                    SlotError::MissingPosition(_) => ObjError::PositionIndexOutOfRange {
                        line,
                        raw: key.position as i64 + 1,
                        count: counts.positions,
                    },
                    SlotError::TooManyVertices => ObjError::TooManyVertices,
                })?;
            self.face_slots.push(slot);
        }

        if tokens > max {
            self.warn(ObjWarning::FaceVertexOverflow {
                line,
                count: tokens,
                max,
            });
        }
        if triangulate_fan(&self.face_slots, &mut self.indices) == 0 {
            let vertices = self.face_slots.len();
            self.warn(ObjWarning::DegenerateFace { line, vertices });
        } else {
            self.faces += 1;
        }
        Ok(())
    }

    fn finish(self) -> ObjResult<ObjLoad> {
        let counts = self.attributes.counts();
        log::debug!(
            "OBJ records: {} positions, {} texcoords, {} normals, {} faces, {} warnings",
            counts.positions,
            counts.texcoords,
            counts.normals,
            self.faces,
            self.warnings.len()
        );

        if self.dedup.is_empty() || self.indices.is_empty() {
            return Err(ObjError::EmptyResult {
                vertices: self.dedup.len(),
                indices: self.indices.len(),
            });
        }

        let mesh = MeshData::new(self.dedup.into_vertices(), self.indices);
        log::debug!(
            "OBJ mesh: {} vertices, {} triangles",
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        Ok(ObjLoad {
            mesh,
            warnings: self.warnings,
        })
    }
}
