//! Node id to cell location map

use crate::error::{LayoutError, LayoutResult};
use ahash::AHashMap;
use gridwright_core::CellLocation;
use gridwright_formula::{NodeId, Resolver, Value};

/// Where every placed node lives.
///
/// Filled by the layout pass; each node may be assigned once per run.
#[derive(Debug, Clone, Default)]
pub struct ReferenceMap {
    locations: AHashMap<NodeId, CellLocation>,
}

impl ReferenceMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the location of a node
    pub fn assign(&mut self, value: &Value, location: CellLocation) -> LayoutResult<()> {
        if let Some(first) = self.locations.get(&value.id()) {
            return Err(LayoutError::AddressAlreadyAssigned {
                node: value.label(),
                first: first.to_string(),
                second: location.to_string(),
            });
        }
        log::trace!("{} -> {}", value.id(), location);
        self.locations.insert(value.id(), location);
        Ok(())
    }

    /// Location of a node, if it was placed
    pub fn get(&self, value: &Value) -> Option<&CellLocation> {
        self.locations.get(&value.id())
    }

    /// Number of placed nodes
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Check if no node was placed
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Iterate over all placements in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &CellLocation)> {
        self.locations.iter()
    }
}

impl Resolver for ReferenceMap {
    fn resolve(&self, id: NodeId) -> Option<&CellLocation> {
        self.locations.get(&id)
    }
}
