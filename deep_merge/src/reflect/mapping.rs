//! Mapping implementations for `HashMap` and `BTreeMap`.
//!
//! Keys are rendered with [`Display`] for field paths and must be `Clone` so
//! a source key can be stored in the destination.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};

use super::{
    EntryMerge, MapEntry, Mapping, Mergeable, Shape, ShapeMut, TypeIdentity, overwrite_with_clone,
};
use crate::MergeResult;

fn entry<'a, K, V>(key: &'a K, value: &'a V) -> MapEntry<'a>
where
    K: Mergeable + Display,
    V: Mergeable,
{
    MapEntry {
        key,
        label: key.to_string(),
        value,
    }
}

impl<K, V, S> Mergeable for HashMap<K, V, S>
where
    K: Mergeable + Clone + Eq + Hash + Display,
    V: Mergeable + Clone + Default,
    S: BuildHasher + Clone + Default + 'static,
{
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(self)
    }

    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Mapping(self)
    }

    fn overwrite_from(&mut self, source: &dyn Mergeable) -> bool {
        overwrite_with_clone(self, source)
    }
}

impl<K, V, S> Mapping for HashMap<K, V, S>
where
    K: Mergeable + Clone + Eq + Hash + Display,
    V: Mergeable + Clone + Default,
    S: BuildHasher + Clone + Default + 'static,
{
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn key_type(&self) -> TypeIdentity {
        TypeIdentity::of::<K>()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = MapEntry<'_>> + '_> {
        Box::new(self.iter().map(|(key, value)| entry(key, value)))
    }

    fn reserve(&mut self, additional: usize) {
        Self::reserve(self, additional);
    }

    fn merge_entry(
        &mut self,
        key: &dyn Mergeable,
        merge: EntryMerge<'_>,
    ) -> Option<MergeResult<()>> {
        let typed_key = key.downcast_ref::<K>()?;
        if let Some(existing) = self.get_mut(typed_key) {
            return Some(merge(existing as &mut dyn Mergeable));
        }
        let mut fresh = V::default();
        Some(merge(&mut fresh as &mut dyn Mergeable).map(|()| {
            self.insert(typed_key.clone(), fresh);
        }))
    }
}

impl<K, V> Mergeable for BTreeMap<K, V>
where
    K: Mergeable + Clone + Ord + Display,
    V: Mergeable + Clone + Default,
{
    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(self)
    }

    fn shape_mut(&mut self) -> ShapeMut<'_> {
        ShapeMut::Mapping(self)
    }

    fn overwrite_from(&mut self, source: &dyn Mergeable) -> bool {
        overwrite_with_clone(self, source)
    }
}

impl<K, V> Mapping for BTreeMap<K, V>
where
    K: Mergeable + Clone + Ord + Display,
    V: Mergeable + Clone + Default,
{
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn key_type(&self) -> TypeIdentity {
        TypeIdentity::of::<K>()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = MapEntry<'_>> + '_> {
        Box::new(self.iter().map(|(key, value)| entry(key, value)))
    }

    // B-trees do not preallocate.
    fn reserve(&mut self, _additional: usize) {}

    fn merge_entry(
        &mut self,
        key: &dyn Mergeable,
        merge: EntryMerge<'_>,
    ) -> Option<MergeResult<()>> {
        let typed_key = key.downcast_ref::<K>()?;
        if let Some(existing) = self.get_mut(typed_key) {
            return Some(merge(existing as &mut dyn Mergeable));
        }
        let mut fresh = V::default();
        Some(merge(&mut fresh as &mut dyn Mergeable).map(|()| {
            self.insert(typed_key.clone(), fresh);
        }))
    }
}
