//! A read-only collection that mirrors another collection's length.
//!
//! [`MultipleCopiesCollection`] holds `len` copies of one shared item. It
//! never changes on its own: the owner forwards each change of the source
//! collection through [`MultipleCopiesCollection::mirror_collection_change`],
//! which updates the count and re-announces the same structural change with
//! the copied item as payload. When changes were missed entirely,
//! [`MultipleCopiesCollection::sync_to_count`] reconciles at the tail.
//!
//! # Failure Modes
//!
//! - **Multi-item source events**: the source is expected to change one
//!   element per event. Debug builds assert this; release builds mirror
//!   each item in turn.
//! - **Re-entrant access**: subscribers are called while the collection is
//!   mutably borrowed and cannot read it back through a shared cell.

use tracing::debug;
use weft_core::collection::{ChangeNotifier, CollectionChange, Subscription};

use crate::error::GridError;

/// `len` copies of one item, kept in step with a source collection.
#[derive(Debug)]
pub struct MultipleCopiesCollection<T: 'static> {
    copied_item: T,
    len: usize,
    notifier: ChangeNotifier<T>,
}

impl<T: Clone + PartialEq + 'static> MultipleCopiesCollection<T> {
    pub fn new(copied_item: T, len: usize) -> Self {
        Self {
            copied_item,
            len,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        (index < self.len).then_some(&self.copied_item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::repeat_n(&self.copied_item, self.len)
    }

    /// First index holding `item`: 0 if it is the copied item, else `None`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        (self.len > 0 && *item == self.copied_item).then_some(0)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }

    pub fn copied_item(&self) -> &T {
        &self.copied_item
    }

    /// Swap the shared item, announcing a replacement at every index.
    pub fn set_copied_item(&mut self, item: T) {
        if item == self.copied_item {
            return;
        }
        let old = std::mem::replace(&mut self.copied_item, item);
        for index in 0..self.len {
            self.notifier.notify(&CollectionChange::replaced(
                index,
                old.clone(),
                self.copied_item.clone(),
            ));
        }
    }

    /// Register a change callback. Dropping the guard unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&CollectionChange<T>) + 'static) -> Subscription {
        self.notifier.subscribe(callback)
    }

    fn check_index(&self, index: usize, len: usize) -> Result<(), GridError> {
        if index >= len {
            return Err(GridError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Apply one change of the source collection and re-announce it.
    ///
    /// `Reset` sets the length to zero; follow it with
    /// [`sync_to_count`](Self::sync_to_count) once the source's new length
    /// is known.
    pub fn mirror_collection_change<S>(&mut self, change: &CollectionChange<S>) -> Result<(), GridError> {
        debug_assert!(
            change.item_count() <= 1,
            "mirrored source changed {} items in one event",
            change.item_count()
        );
        match change {
            CollectionChange::Add { index, items } => {
                self.check_index(*index, self.len + 1)?;
                for offset in 0..items.len() {
                    self.len += 1;
                    self.notifier
                        .notify(&CollectionChange::added(index + offset, self.copied_item.clone()));
                }
            }
            CollectionChange::Remove { index, items } => {
                if items.is_empty() {
                    return Ok(());
                }
                self.check_index(index + items.len() - 1, self.len)?;
                for _ in 0..items.len() {
                    self.len -= 1;
                    self.notifier
                        .notify(&CollectionChange::removed(*index, self.copied_item.clone()));
                }
            }
            CollectionChange::Replace { index, new_items, .. } => {
                if new_items.is_empty() {
                    return Ok(());
                }
                self.check_index(index + new_items.len() - 1, self.len)?;
                for offset in 0..new_items.len() {
                    self.notifier.notify(&CollectionChange::replaced(
                        index + offset,
                        self.copied_item.clone(),
                        self.copied_item.clone(),
                    ));
                }
            }
            CollectionChange::Move {
                old_index,
                new_index,
                items,
            } => {
                if items.is_empty() {
                    return Ok(());
                }
                self.check_index(old_index + items.len() - 1, self.len)?;
                self.check_index(new_index + items.len() - 1, self.len)?;
                for offset in 0..items.len() {
                    self.notifier.notify(&CollectionChange::moved(
                        old_index + offset,
                        new_index + offset,
                        self.copied_item.clone(),
                    ));
                }
            }
            CollectionChange::Reset => {
                self.len = 0;
                self.notifier.notify(&CollectionChange::Reset);
            }
        }
        Ok(())
    }

    /// Converge on `count` by adding or removing copies at the tail.
    ///
    /// Emits one event per copy, never a `Reset`. A no-op when already at
    /// `count`.
    pub fn sync_to_count(&mut self, count: usize) {
        if count == self.len {
            return;
        }
        debug!(
            message = "mirror.sync_to_count",
            from = self.len,
            to = count
        );
        while self.len < count {
            let index = self.len;
            self.len += 1;
            self.notifier
                .notify(&CollectionChange::added(index, self.copied_item.clone()));
        }
        while self.len > count {
            self.len -= 1;
            self.notifier
                .notify(&CollectionChange::removed(self.len, self.copied_item.clone()));
        }
    }

    pub fn push(&mut self, _item: T) -> Result<(), GridError> {
        Err(GridError::ReadOnlyCollection)
    }

    pub fn insert(&mut self, _index: usize, _item: T) -> Result<(), GridError> {
        Err(GridError::ReadOnlyCollection)
    }

    pub fn remove_at(&mut self, _index: usize) -> Result<T, GridError> {
        Err(GridError::ReadOnlyCollection)
    }

    pub fn set(&mut self, _index: usize, _item: T) -> Result<T, GridError> {
        Err(GridError::ReadOnlyCollection)
    }

    pub fn clear(&mut self) -> Result<(), GridError> {
        Err(GridError::ReadOnlyCollection)
    }
}
