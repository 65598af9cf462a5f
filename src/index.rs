//! Secondary indices from names to entities.
//!
//! A [tag](Tags) binds a unique name to exactly one entity.
//! A [group](Groups) binds a name to a set of entities.
//! Each entity has at most one tag and belongs to at most one group.
//! Both indices keep their forward and reverse maps consistent after every operation.

use std::collections::{BTreeSet, HashMap};

use crate::{Entity, Error};


/// A bijection between tag names and entities.
#[derive(Debug, Default)]
pub struct Tags {
    by_name:   HashMap<String, Entity>,
    by_entity: HashMap<Entity, String>,
}

impl Tags {
    /// Binds `tag` to `entity`.
    ///
    /// If `tag` was bound to another entity, that entity loses the tag.
    /// If `entity` had another tag, the old tag is released.
    /// Returns the entity that previously held `tag`, if it was a different one.
    pub fn insert(&mut self, entity: Entity, tag: &str) -> Option<Entity> {
        self.remove(entity);

        let previous = self.by_name.insert(tag.to_owned(), entity);
        if let Some(previous) = previous {
            self.by_entity.remove(&previous);
        }
        self.by_entity.insert(entity, tag.to_owned());
        previous
    }

    /// Binds `tag` to `entity` unless it is bound to a different entity.
    pub fn try_insert(&mut self, entity: Entity, tag: &str) -> Result<(), Error> {
        match self.by_name.get(tag) {
            Some(&holder) if holder != entity => {
                Err(Error::TagTaken { tag: tag.to_owned(), holder })
            }
            _ => {
                self.insert(entity, tag);
                Ok(())
            }
        }
    }

    /// Removes the tag of an entity, returning it if there was one.
    pub fn remove(&mut self, entity: Entity) -> Option<String> {
        let tag = self.by_entity.remove(&entity)?;
        self.by_name.remove(&tag);
        Some(tag)
    }

    /// The entity bound to `tag`.
    pub fn get(&self, tag: &str) -> Option<Entity> { self.by_name.get(tag).copied() }

    /// The tag of `entity`.
    pub fn tag_of(&self, entity: Entity) -> Option<&str> {
        self.by_entity.get(&entity).map(String::as_str)
    }

    /// Whether `entity` is bound to `tag`.
    pub fn has(&self, entity: Entity, tag: &str) -> bool { self.get(tag) == Some(entity) }

    /// The number of bound tags.
    pub fn len(&self) -> usize { self.by_name.len() }

    /// Whether no tags are bound.
    pub fn is_empty(&self) -> bool { self.by_name.is_empty() }
}

/// Named sets of entities.
#[derive(Debug, Default)]
pub struct Groups {
    by_name:   HashMap<String, BTreeSet<Entity>>,
    by_entity: HashMap<Entity, String>,
}

impl Groups {
    /// Adds `entity` to `group`, moving it out of its previous group if any.
    pub fn insert(&mut self, entity: Entity, group: &str) {
        if self.by_entity.get(&entity).map(String::as_str) == Some(group) {
            return;
        }

        self.remove(entity);
        self.by_name.entry(group.to_owned()).or_default().insert(entity);
        self.by_entity.insert(entity, group.to_owned());
    }

    /// Removes `entity` from its group, returning the group name if there was one.
    ///
    /// Groups left empty are dropped.
    pub fn remove(&mut self, entity: Entity) -> Option<String> {
        let group = self.by_entity.remove(&entity)?;
        if let Some(members) = self.by_name.get_mut(&group) {
            members.remove(&entity);
            if members.is_empty() {
                self.by_name.remove(&group);
            }
        }
        Some(group)
    }

    /// Whether `entity` belongs to `group`.
    pub fn contains(&self, entity: Entity, group: &str) -> bool {
        self.by_name.get(group).map_or(false, |members| members.contains(&entity))
    }

    /// The group of `entity`.
    pub fn group_of(&self, entity: Entity) -> Option<&str> {
        self.by_entity.get(&entity).map(String::as_str)
    }

    /// Iterates over the members of `group` in ascending ID order.
    ///
    /// Unknown groups have no members.
    pub fn members<'t>(&'t self, group: &str) -> impl Iterator<Item = Entity> + 't {
        self.by_name.get(group).into_iter().flatten().copied()
    }

    /// The number of non-empty groups.
    pub fn len(&self) -> usize { self.by_name.len() }

    /// Whether there are no non-empty groups.
    pub fn is_empty(&self) -> bool { self.by_name.is_empty() }
}
