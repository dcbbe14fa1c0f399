//! Face-vertex tokens and OBJ index resolution.

use super::{attributes::AttributeCounts, dedup::AttributeKey};

/// Unresolved `v/t/n` reference as written in the file. `0` means absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawFaceVertex {
    pub position: i64,
    pub texcoord: i64,
    pub normal: i64,
}

/// Parse `v`, `v/t`, `v/t/n` or `v//n`.
///
/// Empty or non-integer components read as `0`, i.e. absent.
pub fn parse_face_vertex(token: &str) -> RawFaceVertex {
    let mut parts = token.splitn(3, '/').map(parse_component);
    RawFaceVertex {
        position: parts.next().unwrap_or(0),
        texcoord: parts.next().unwrap_or(0),
        normal: parts.next().unwrap_or(0),
    }
}

fn parse_component(s: &str) -> i64 {
    s.parse().unwrap_or(0)
}

/// Convert an OBJ index to a 0-based element index.
///
/// Positive indices are 1-based, negative ones count back from `count`,
/// zero is "no reference". Anything outside `[0, count)` is `None`.
pub fn resolve(raw: i64, count: usize) -> Option<usize> {
    let idx = if raw > 0 {
        usize::try_from(raw - 1).ok()?
    } else if raw < 0 {
        let back = usize::try_from(raw.unsigned_abs()).ok()?;
        count.checked_sub(back)?
    } else {
        return None;
    };
    (idx < count).then_some(idx)
}

/// Resolve all three components against the counts at the face line.
///
/// Returns `Err(raw_position)` when the position does not resolve; optional
/// components that do not resolve are dropped.
pub fn resolve_face_vertex(raw: RawFaceVertex, counts: AttributeCounts) -> Result<AttributeKey, i64> {
    let position = resolve(raw.position, counts.positions).ok_or(raw.position)?;
    Ok(AttributeKey {
        position,
        texcoord: resolve(raw.texcoord, counts.texcoords),
        normal: resolve(raw.normal, counts.normals),
    })
}
