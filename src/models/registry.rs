//! Note registry
//!
//! Maps note positions to their attributes. Every UI path that changes a
//! note (click, palette, keyboard, label edit, delete) funnels through
//! `NoteRegistry::update_note`.

use super::note::{DefaultVisibility, NoteAttributes, NotePatch, NotePositionId, Visibility};
use std::collections::BTreeMap;

/// Position-keyed note attribute store
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NoteRegistry {
    entries: BTreeMap<NotePositionId, NoteAttributes>,
}

impl NoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &NotePositionId) -> Option<&NoteAttributes> {
        self.entries.get(id)
    }

    /// Attributes of `id`, or the untouched default when absent
    pub fn resolve(&self, id: &NotePositionId, default_visibility: DefaultVisibility) -> NoteAttributes {
        self.entries
            .get(id)
            .cloned()
            .unwrap_or_else(|| NoteAttributes::with_default(default_visibility))
    }

    /// Create-if-absent, then merge `patch` field by field
    ///
    /// Does not enforce single selection: callers promoting a note to
    /// `Selected` demote the previous selection first.
    pub fn update_note(
        &mut self,
        id: NotePositionId,
        patch: &NotePatch,
        default_visibility: DefaultVisibility,
    ) -> &NoteAttributes {
        let entry = self
            .entries
            .entry(id)
            .or_insert_with(|| NoteAttributes::with_default(default_visibility));
        patch.apply_to(entry);
        entry
    }

    /// Move every unmarked entry to `visibility`
    pub fn apply_default_visibility(&mut self, visibility: DefaultVisibility) {
        let target: Visibility = visibility.into();
        self.entries
            .values_mut()
            .filter(|attrs| !attrs.visibility.is_marked())
            .for_each(|attrs| attrs.visibility = target);
    }

    /// Ids of all entries currently selected (at most one when the protocol is followed)
    pub fn selected(&self) -> impl Iterator<Item = &NotePositionId> {
        self.entries
            .iter()
            .filter(|(_, attrs)| attrs.visibility == Visibility::Selected)
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NotePositionId, &NoteAttributes)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Insert decoded attributes verbatim (used when restoring shared state)
    pub(crate) fn insert(&mut self, id: NotePositionId, attrs: NoteAttributes) {
        self.entries.insert(id, attrs);
    }
}
