//! Fan triangulation of polygon faces.

/// Default cap on vertices per face; extra face-vertex tokens are dropped.
pub const MAX_FACE_VERTICES: usize = 64;

/// Append the fan `(s[0], s[i], s[i + 1])` for `i in 1..len - 1` to `out`.
///
/// Returns the number of triangles written; faces with fewer than three
/// slots write nothing.
pub fn triangulate_fan(slots: &[u32], out: &mut Vec<u32>) -> usize {
    let Some((&first, rest)) = slots.split_first() else {
        return 0;
    };
    if rest.len() < 2 {
        return 0;
    }
    out.reserve(3 * (rest.len() - 1));
    for pair in rest.windows(2) {
        out.extend_from_slice(&[first, pair[0], pair[1]]);
    }
    rest.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_emitted_as_is() {
        let mut out = Vec::new();
        assert_eq!(triangulate_fan(&[4, 5, 6], &mut out), 1);
        assert_eq!(out, vec![4, 5, 6]);
    }

    #[test]
    fn pentagon_fans_from_first_vertex() {
        let mut out = Vec::new();
        assert_eq!(triangulate_fan(&[0, 1, 2, 3, 4], &mut out), 3);
        assert_eq!(out, vec![0, 1, 2, 0, 2, 3, 0, 3, 4]);
    }

    #[test]
    fn degenerate_faces_write_nothing() {
        let mut out = vec![9];
        assert_eq!(triangulate_fan(&[], &mut out), 0);
        assert_eq!(triangulate_fan(&[1], &mut out), 0);
        assert_eq!(triangulate_fan(&[1, 2], &mut out), 0);
        assert_eq!(out, vec![9]);
    }

    #[test]
    fn appends_after_existing_indices() {
        let mut out = Vec::new();
        triangulate_fan(&[0, 1, 2], &mut out);
        triangulate_fan(&[3, 4, 5, 6], &mut out);
        assert_eq!(out, vec![0, 1, 2, 3, 4, 5, 3, 5, 6]);
    }
}
