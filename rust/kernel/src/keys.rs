// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topology key types for arena-based storage.
//!
//! Each topological entity gets a unique, type-safe key for O(1) lookup in
//! the solid arena. Keys are created by `slotmap::SlotMap` and stay valid for
//! the lifetime of the solid (the arena is built once and never mutated
//! incrementally).

use slotmap::new_key_type;

new_key_type! {
    /// Key for a vertex (point in 3D space).
    pub struct VertexKey;

    /// Key for an edge (undirected curve segment between two vertices).
    pub struct EdgeKey;

    /// Key for a wire (ordered closed loop of oriented edges).
    pub struct WireKey;

    /// Key for a face (surface region bounded by wires).
    pub struct FaceKey;
}

/// An edge together with a traversal direction.
///
/// `reversed == false` means the edge is traversed in the direction of its
/// own curve parameterization; `reversed == true` means against it. Wires
/// are ordered sequences of oriented edges, and a seam edge appears twice in
/// one wire, once per direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrientedEdge {
    pub edge: EdgeKey,
    pub reversed: bool,
}

impl OrientedEdge {
    /// An oriented edge traversing `edge` along its curve direction.
    pub fn forward(edge: EdgeKey) -> Self {
        Self {
            edge,
            reversed: false,
        }
    }

    /// An oriented edge traversing `edge` against its curve direction.
    pub fn backward(edge: EdgeKey) -> Self {
        Self {
            edge,
            reversed: true,
        }
    }

    /// The same edge traversed in the opposite direction.
    pub fn opposite(self) -> Self {
        Self {
            edge: self.edge,
            reversed: !self.reversed,
        }
    }
}

/// A key that can reference any topological entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Vertex(VertexKey),
    Edge(EdgeKey),
    Wire(WireKey),
    Face(FaceKey),
}

impl EntityKey {
    /// Returns the entity type of this key.
    pub fn entity_type(&self) -> EntityType {
        match self {
            EntityKey::Vertex(_) => EntityType::Vertex,
            EntityKey::Edge(_) => EntityType::Edge,
            EntityKey::Wire(_) => EntityType::Wire,
            EntityKey::Face(_) => EntityType::Face,
        }
    }
}

/// Discriminant for topological entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityType {
    Vertex = 0,
    Edge = 1,
    Wire = 2,
    Face = 3,
}

impl EntityType {
    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Vertex => "Vertex",
            EntityType::Edge => "Edge",
            EntityType::Wire => "Wire",
            EntityType::Face => "Face",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<VertexKey> for EntityKey {
    fn from(k: VertexKey) -> Self {
        EntityKey::Vertex(k)
    }
}

impl From<EdgeKey> for EntityKey {
    fn from(k: EdgeKey) -> Self {
        EntityKey::Edge(k)
    }
}

impl From<WireKey> for EntityKey {
    fn from(k: WireKey) -> Self {
        EntityKey::Wire(k)
    }
}

impl From<FaceKey> for EntityKey {
    fn from(k: FaceKey) -> Self {
        EntityKey::Face(k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn entity_type_names() {
        assert_eq!(EntityType::Vertex.as_str(), "Vertex");
        assert_eq!(EntityType::Edge.as_str(), "Edge");
        assert_eq!(EntityType::Wire.as_str(), "Wire");
        assert_eq!(EntityType::Face.as_str(), "Face");
    }

    #[test]
    fn oriented_edge_opposite_flips_direction() {
        let mut edges: SlotMap<EdgeKey, ()> = SlotMap::with_key();
        let e = edges.insert(());

        let fwd = OrientedEdge::forward(e);
        assert!(!fwd.reversed);
        assert_eq!(fwd.opposite(), OrientedEdge::backward(e));
        assert_eq!(fwd.opposite().opposite(), fwd);
    }
}
