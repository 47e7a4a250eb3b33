#![forbid(unsafe_code)]

//! Structural change events for ordered collections.
//!
//! # Design
//!
//! [`CollectionChange`] is a closed sum type with one variant per action.
//! Each variant carries exactly what that action needs: an `Add` has no old
//! items, a `Reset` has nothing at all.
//!
//! [`ChangeNotifier`] fans a change out to subscribers. Subscribers are held
//! weakly; the strong reference lives in the [`Subscription`] guard returned
//! from [`ChangeNotifier::subscribe`], so dropping the guard unsubscribes.
//! Dead entries are pruned lazily on the next notification.
//!
//! # Failure Modes
//!
//! - **Re-entrant subscribe**: subscribing from inside a callback is allowed;
//!   the new subscriber first sees the next change, not the one in flight.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::trace;

/// Which structural action a [`CollectionChange`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeAction {
    Add,
    Remove,
    Replace,
    Move,
    Reset,
}

/// One structural change to an ordered collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionChange<T> {
    /// `items` were inserted starting at `index`.
    Add { index: usize, items: Vec<T> },
    /// `items` were removed starting at `index`.
    Remove { index: usize, items: Vec<T> },
    /// `old_items` starting at `index` were replaced by `new_items`.
    Replace {
        index: usize,
        old_items: Vec<T>,
        new_items: Vec<T>,
    },
    /// `items` moved from `old_index` to `new_index`.
    Move {
        old_index: usize,
        new_index: usize,
        items: Vec<T>,
    },
    /// The collection changed wholesale; observers must re-read it.
    Reset,
}

impl<T> CollectionChange<T> {
    /// Single-item insertion.
    pub fn added(index: usize, item: T) -> Self {
        Self::Add {
            index,
            items: vec![item],
        }
    }

    /// Single-item removal.
    pub fn removed(index: usize, item: T) -> Self {
        Self::Remove {
            index,
            items: vec![item],
        }
    }

    /// Single-item replacement.
    pub fn replaced(index: usize, old_item: T, new_item: T) -> Self {
        Self::Replace {
            index,
            old_items: vec![old_item],
            new_items: vec![new_item],
        }
    }

    /// Single-item move.
    pub fn moved(old_index: usize, new_index: usize, item: T) -> Self {
        Self::Move {
            old_index,
            new_index,
            items: vec![item],
        }
    }

    /// The action this change describes.
    pub fn action(&self) -> ChangeAction {
        match self {
            Self::Add { .. } => ChangeAction::Add,
            Self::Remove { .. } => ChangeAction::Remove,
            Self::Replace { .. } => ChangeAction::Replace,
            Self::Move { .. } => ChangeAction::Move,
            Self::Reset => ChangeAction::Reset,
        }
    }

    /// Number of items the change touches. Zero for `Reset`.
    pub fn item_count(&self) -> usize {
        match self {
            Self::Add { items, .. } | Self::Remove { items, .. } | Self::Move { items, .. } => {
                items.len()
            }
            Self::Replace { new_items, .. } => new_items.len(),
            Self::Reset => 0,
        }
    }

    /// Net change in collection length implied by this event.
    ///
    /// `None` for `Reset`, where the new length is unknown.
    pub fn len_delta(&self) -> Option<isize> {
        match self {
            Self::Add { items, .. } => Some(items.len() as isize),
            Self::Remove { items, .. } => Some(-(items.len() as isize)),
            Self::Replace {
                old_items,
                new_items,
                ..
            } => Some(new_items.len() as isize - old_items.len() as isize),
            Self::Move { .. } => Some(0),
            Self::Reset => None,
        }
    }

    /// Transform the payload while keeping the shape.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> CollectionChange<U> {
        match self {
            Self::Add { index, items } => CollectionChange::Add {
                index: *index,
                items: items.iter().map(&mut f).collect(),
            },
            Self::Remove { index, items } => CollectionChange::Remove {
                index: *index,
                items: items.iter().map(&mut f).collect(),
            },
            Self::Replace {
                index,
                old_items,
                new_items,
            } => CollectionChange::Replace {
                index: *index,
                old_items: old_items.iter().map(&mut f).collect(),
                new_items: new_items.iter().map(&mut f).collect(),
            },
            Self::Move {
                old_index,
                new_index,
                items,
            } => CollectionChange::Move {
                old_index: *old_index,
                new_index: *new_index,
                items: items.iter().map(&mut f).collect(),
            },
            Self::Reset => CollectionChange::Reset,
        }
    }
}

type CallbackRc<T> = Rc<dyn Fn(&CollectionChange<T>)>;
type CallbackWeak<T> = Weak<dyn Fn(&CollectionChange<T>)>;

/// Delivers [`CollectionChange`] events to subscribers in registration order.
pub struct ChangeNotifier<T> {
    subscribers: RefCell<Vec<CallbackWeak<T>>>,
}

impl<T> Default for ChangeNotifier<T> {
    fn default() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
        }
    }
}

impl<T> ChangeNotifier<T> {
    /// Number of registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl<T> std::fmt::Debug for ChangeNotifier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

impl<T: 'static> ChangeNotifier<T> {
    /// Create a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback. Dropping the returned guard unsubscribes it.
    pub fn subscribe(&self, callback: impl Fn(&CollectionChange<T>) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        let weak = Rc::downgrade(&strong);
        self.subscribers.borrow_mut().push(weak);
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Deliver `change` to every live subscriber and prune dead ones.
    pub fn notify(&self, change: &CollectionChange<T>) {
        let callbacks: Vec<CallbackRc<T>> = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers.retain(|w| w.strong_count() > 0);
            subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        if callbacks.is_empty() {
            return;
        }
        trace!(
            message = "collection.notify",
            action = ?change.action(),
            items = change.item_count(),
            subscribers = callbacks.len()
        );
        for cb in &callbacks {
            cb(change);
        }
    }
}

/// RAII guard for a subscriber callback.
///
/// Dropping the `Subscription` drops the only strong reference to the
/// callback, so the notifier's weak entry stops upgrading.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
