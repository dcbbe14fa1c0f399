//! Vertex deduplication: one output vertex per distinct `(v, vt, vn)` triple.
//!
//! [`KeySlotMap`] is an open-addressing table (linear probing, power-of-two
//! capacity) mapping an [`AttributeKey`] to the slot of its vertex in the
//! output buffer. Slots are plain indices into the vertex `Vec`, so growing
//! the map only moves entries between buckets and never renumbers a vertex.

use super::attributes::AttributeStore;
use crate::mesh::{DEFAULT_NORMAL, DEFAULT_UV, MeshVertex};

/// Resolved face-vertex reference; the deduplication identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttributeKey {
    pub position: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

impl AttributeKey {
    /// splitmix64 finalizer over the three packed components.
    fn hash(&self) -> u64 {
        let pack = |i: Option<usize>| i.map_or(0, |i| (i as u64).wrapping_add(1));
        let a = pack(Some(self.position));
        let b = pack(self.texcoord);
        let c = pack(self.normal);
        let mut x = (a << 42) ^ (b << 21) ^ c;
        x ^= x >> 33;
        x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
        x ^= x >> 33;
        x = x.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
        x ^= x >> 33;
        x
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    key: AttributeKey,
    slot: u32,
}

enum Probe {
    Found(u32),
    Vacant(usize),
}

const INITIAL_CAPACITY: usize = 1024;

/// Open-addressing `AttributeKey -> slot` map.
///
/// Capacity doubles before an insert would push the load factor past 0.7.
#[derive(Clone, Debug)]
pub struct KeySlotMap {
    entries: Vec<Option<Entry>>,
    len: usize,
}

impl Default for KeySlotMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySlotMap {
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// `capacity` is rounded up to a power of two (minimum 8).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(8).next_power_of_two();
        Self {
            entries: vec![None; capacity],
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: &AttributeKey) -> Option<u32> {
        match self.probe(key) {
            Probe::Found(slot) => Some(slot),
            Probe::Vacant(_) => None,
        }
    }

    /// Return the slot for `key`, calling `make` to allocate one if the key is new.
    ///
    /// The `bool` is `true` when `make` ran. If `make` fails, the map is left unchanged.
    pub fn get_or_insert_with<E>(
        &mut self,
        key: AttributeKey,
        make: impl FnOnce() -> Result<u32, E>,
    ) -> Result<(u32, bool), E> {
        let bucket = match self.probe(&key) {
            Probe::Found(slot) => return Ok((slot, false)),
            Probe::Vacant(i) => i,
        };

        let slot = make()?;
        let bucket = if (self.len + 1) * 10 > self.capacity() * 7 {
            self.grow();
            self.vacant_bucket(&key)
        } else {
            bucket
        };
        self.entries[bucket] = Some(Entry { key, slot });
        self.len += 1;
        Ok((slot, true))
    }

    fn probe(&self, key: &AttributeKey) -> Probe {
        let mask = self.capacity() - 1;
        let mut i = (key.hash() as usize) & mask;
        loop {
            match &self.entries[i] {
                None => return Probe::Vacant(i),
                Some(e) if e.key == *key => return Probe::Found(e.slot),
                Some(_) => i = (i + 1) & mask,
            }
        }
    }

    /// First free bucket on the probe path of a key known to be absent.
    fn vacant_bucket(&self, key: &AttributeKey) -> usize {
        let mask = self.capacity() - 1;
        let mut i = (key.hash() as usize) & mask;
        while self.entries[i].is_some() {
            i = (i + 1) & mask;
        }
        i
    }

    fn grow(&mut self) {
        let new_capacity = self.capacity() * 2;
        let old = std::mem::replace(&mut self.entries, vec![None; new_capacity]);
        log::debug!("Growing vertex key map to {} buckets ({} live)", new_capacity, self.len);
        for entry in old.into_iter().flatten() {
            let i = self.vacant_bucket(&entry.key);
            self.entries[i] = Some(entry);
        }
    }
}

/// Why a new vertex could not be materialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotError {
    /// Position index not present in the attribute store.
    MissingPosition(usize),
    /// Slot would not fit in a `u32` index.
    TooManyVertices,
}

/// Output vertex table plus the key map that indexes it.
#[derive(Debug, Default)]
pub struct VertexDeduplicator {
    map: KeySlotMap,
    vertices: Vec<MeshVertex>,
}

impl VertexDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot of the vertex for `key`, materializing it from `attributes` on first sight.
    ///
    /// Normal and texcoord fall back to their defaults when absent.
    pub fn get_or_create(
        &mut self,
        key: AttributeKey,
        attributes: &AttributeStore,
    ) -> Result<u32, SlotError> {
        let vertices = &mut self.vertices;
        let (slot, _) = self.map.get_or_insert_with(key, || {
            let position = attributes
                .position(key.position)
                .ok_or(SlotError::MissingPosition(key.position))?;
            let normal = key
                .normal
                .and_then(|i| attributes.normal(i))
                .unwrap_or(DEFAULT_NORMAL);
            let uv = key
                .texcoord
                .and_then(|i| attributes.texcoord(i))
                .unwrap_or(DEFAULT_UV);

            let slot = u32::try_from(vertices.len()).map_err(|_| SlotError::TooManyVertices)?;
            vertices.push(MeshVertex::new(position, normal, uv));
            Ok(slot)
        })?;
        Ok(slot)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<MeshVertex> {
        self.vertices
    }
}
