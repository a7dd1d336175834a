// Modules
pub mod coord_comp;
pub mod render_comp;

// Re-exports
pub use coord_comp::{CoordComponent, CoordEntry};
pub use render_comp::{CachedBuffer, RenderComponent};

// Imports
use crate::decoration::{Decoration, DecorationId, DecorationKind, DecorationParams, Partition, PartitionMap};
use crate::DecoratorError;
use itertools::Itertools;
use slotmap::{HopSlotMap, SecondaryMap};
use std::collections::HashMap;
use tracing::debug;

slotmap::new_key_type! {
    pub struct DecorationKey;
}

/// DecorationStore holds the decorations of one widget together with their caches.
///
/// The entities are the [DecorationKey]'s. Next to the primary decoration map, there are the following components:
///     * 'order': the keys of each partition, in insertion order. Drawing follows this order.
///     * 'coord_entries': the resolved coordinates of each decoration. See [CoordEntry].
///     * 'coord_components': per partition state whether the coordinate entries can be trusted.
///     * 'render_components': per partition state about the pre-rendered buffer.
///
/// The systems are implemented as methods on the store, split up by the components they are mostly concerned with.
#[derive(Debug)]
pub struct DecorationStore {
    /// The id of the widget the decorations belong to. Prefix of generated ids.
    owner_id: String,
    decorations: HopSlotMap<DecorationKey, Decoration>,
    ids: HashMap<DecorationId, DecorationKey>,
    order: PartitionMap<Vec<DecorationKey>>,
    /// Incrementing counter for generated ids.
    id_counter: u64,

    coord_entries: SecondaryMap<DecorationKey, CoordEntry>,
    coord_components: PartitionMap<CoordComponent>,
    render_components: PartitionMap<RenderComponent>,
    /// Incremented on every buffer rebuild.
    render_generation: u64,
}

impl DecorationStore {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            decorations: HopSlotMap::with_key(),
            ids: HashMap::new(),
            order: PartitionMap::default(),
            id_counter: 0,
            coord_entries: SecondaryMap::new(),
            coord_components: PartitionMap::default(),
            render_components: PartitionMap::default(),
            render_generation: 0,
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Appends a decoration to the partition and returns its id.
    ///
    /// Generates an id when none is given. Custom ids must not be taken already.
    pub fn insert(
        &mut self,
        partition: Partition,
        params: DecorationParams,
        custom_id: Option<DecorationId>,
    ) -> Result<DecorationId, DecoratorError> {
        let id = match custom_id {
            Some(id) if self.ids.contains_key(&id) => return Err(DecoratorError::DuplicateId(id)),
            Some(id) => id,
            None => self.generate_id(),
        };
        let kind = params.kind();

        let key = self
            .decorations
            .insert(Decoration::new(id.clone(), partition, params));
        self.ids.insert(id.clone(), key);
        self.order[partition].push(key);
        self.set_render_dirty(partition);

        debug!(id = %id, %kind, %partition, "added decoration");
        Ok(id)
    }

    /// Removes the decoration from whichever partition holds it.
    pub fn remove(&mut self, id: &str) -> Result<Decoration, DecoratorError> {
        let key = self
            .ids
            .remove(id)
            .ok_or_else(|| DecoratorError::NotFound(id.into()))?;
        let decoration = self
            .decorations
            .remove(key)
            .ok_or_else(|| DecoratorError::NotFound(id.into()))?;
        self.order[decoration.partition].retain(|k| *k != key);
        self.coord_entries.remove(key);
        self.set_render_dirty(decoration.partition);

        debug!(id = %decoration.id, partition = %decoration.partition, "removed decoration");
        Ok(decoration)
    }

    /// Removes all decorations of the partition, or of both partitions when `None`.
    ///
    /// The cleared partitions are left clean, without a render buffer.
    pub fn remove_all(&mut self, partition: Option<Partition>) {
        for &p in Partition::selected(partition) {
            for key in self.order[p].drain(..) {
                self.decorations.remove(key);
                self.coord_entries.remove(key);
            }
            self.coord_components[p].dirty = false;
            self.render_components[p] = RenderComponent::default();
        }
        self.ids.retain(|_, key| self.decorations.contains_key(*key));

        debug!(partition = ?partition, "removed all decorations");
    }

    /// Enables or disables the decoration. Disabled decorations are retained, but skipped when drawing.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) -> Result<(), DecoratorError> {
        let decoration = self.get_mut(id)?;
        decoration.enabled = enabled;
        let partition = decoration.partition;
        self.set_render_dirty(partition);
        Ok(())
    }

    pub fn is_enabled(&self, id: &str) -> Result<bool, DecoratorError> {
        Ok(self.get(id)?.enabled)
    }

    pub fn get(&self, id: &str) -> Result<&Decoration, DecoratorError> {
        self.key(id)
            .and_then(|key| self.decorations.get(key))
            .ok_or_else(|| DecoratorError::NotFound(id.into()))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Decoration, DecoratorError> {
        self.key(id)
            .and_then(|key| self.decorations.get_mut(key))
            .ok_or_else(|| DecoratorError::NotFound(id.into()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    pub fn partition_of(&self, id: &str) -> Result<Partition, DecoratorError> {
        Ok(self.get(id)?.partition)
    }

    pub fn kind_of(&self, id: &str) -> Result<DecorationKind, DecoratorError> {
        Ok(self.get(id)?.kind())
    }

    /// The number of decorations in the partition.
    pub fn count(&self, partition: Partition) -> usize {
        self.order[partition].len()
    }

    /// The number of decorations in both partitions.
    pub fn total_count(&self) -> usize {
        self.decorations.len()
    }

    /// The ids of the partition in insertion order.
    pub fn ids(&self, partition: Partition) -> Vec<DecorationId> {
        self.order[partition]
            .iter()
            .filter_map(|key| self.decorations.get(*key).map(|d| d.id.clone()))
            .collect_vec()
    }

    fn key(&self, id: &str) -> Option<DecorationKey> {
        self.ids.get(id).copied()
    }

    /// The next free id of the form `{owner_id}#{n}`.
    fn generate_id(&mut self) -> DecorationId {
        loop {
            let id = DecorationId::new(format!("{}#{}", self.owner_id, self.id_counter));
            self.id_counter += 1;
            if !self.ids.contains_key(&id) {
                return id;
            }
        }
    }
}
