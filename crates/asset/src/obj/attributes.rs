//! Raw `v`/`vt`/`vn` records in file order.

/// Positions, texcoords and normals as declared so far.
#[derive(Clone, Debug, Default)]
pub struct AttributeStore {
    positions: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
}

/// Element counts at one point of the file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AttributeCounts {
    pub positions: usize,
    pub texcoords: usize,
    pub normals: usize,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_position(&mut self, p: [f32; 3]) {
        self.positions.push(p);
    }

    pub fn push_texcoord(&mut self, uv: [f32; 2]) {
        self.texcoords.push(uv);
    }

    pub fn push_normal(&mut self, n: [f32; 3]) {
        self.normals.push(n);
    }

    /// Current counts; negative face indices are relative to these.
    #[inline]
    pub fn counts(&self) -> AttributeCounts {
        AttributeCounts {
            positions: self.positions.len(),
            texcoords: self.texcoords.len(),
            normals: self.normals.len(),
        }
    }

    #[inline]
    pub fn position(&self, index: usize) -> Option<[f32; 3]> {
        self.positions.get(index).copied()
    }

    #[inline]
    pub fn texcoord(&self, index: usize) -> Option<[f32; 2]> {
        self.texcoords.get(index).copied()
    }

    #[inline]
    pub fn normal(&self, index: usize) -> Option<[f32; 3]> {
        self.normals.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_track_each_sequence() {
        let mut store = AttributeStore::new();
        store.push_position([0.0, 0.0, 0.0]);
        store.push_position([1.0, 0.0, 0.0]);
        store.push_texcoord([0.5, 0.5]);
        assert_eq!(
            store.counts(),
            AttributeCounts {
                positions: 2,
                texcoords: 1,
                normals: 0
            }
        );
        assert_eq!(store.position(1), Some([1.0, 0.0, 0.0]));
        assert_eq!(store.normal(0), None);
    }
}
