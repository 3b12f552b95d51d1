//! Success predicates and the default "result is present" rule.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

/// Decides whether a produced result is acceptable.
///
/// Returning `true` stops the retry loop. Any `FnMut(&T) -> bool` closure is a
/// predicate, as is [`IsPresent`], the default used by every executor until
/// [`until`](crate::Tryable::until) replaces it.
///
/// # Examples
///
/// ```rust
/// use tryable::{IsPresent, Predicate};
///
/// let mut ready = |s: &&str| *s == "ready";
/// assert!(ready.accept(&"ready"));
///
/// assert!(!IsPresent.accept(&None::<u32>));
/// assert!(IsPresent.accept(&Some(7)));
/// ```
pub trait Predicate<T: ?Sized> {
    /// Check a completed result.
    fn accept(&mut self, result: &T) -> bool;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: FnMut(&T) -> bool,
{
    fn accept(&mut self, result: &T) -> bool {
        self(result)
    }
}

/// The default predicate: accepts any result that is not its type's absence value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsPresent;

impl<T: Presence + ?Sized> Predicate<T> for IsPresent {
    fn accept(&mut self, result: &T) -> bool {
        result.is_present()
    }
}

/// Types with a distinguished "absent" value.
///
/// `None` and empty strings or collections are absent; everything else is
/// present. Implement this for your own types to use them with the default
/// predicate.
///
/// Empty is stricter than "not null": an empty `String` or `Vec` keeps the
/// loop going. To accept empty values and retry only on a missing one, return
/// an `Option` from the producer; `Some(String::new())` is present.
///
/// ```rust
/// use tryable::Presence;
///
/// struct Row { id: Option<u64> }
///
/// impl Presence for Row {
///     fn is_present(&self) -> bool {
///         self.id.is_some()
///     }
/// }
///
/// assert!(!Row { id: None }.is_present());
/// ```
pub trait Presence {
    /// `false` if this value is the type's absence value.
    fn is_present(&self) -> bool;
}

impl<T> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.is_some()
    }
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for Cow<'_, str> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for [T] {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for VecDeque<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V, S> Presence for HashMap<K, V, S> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T, S> Presence for HashSet<T, S> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> Presence for BTreeMap<K, V> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Presence for BTreeSet<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Presence + ?Sized> Presence for &T {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

impl<T: Presence + ?Sized> Presence for Box<T> {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

impl<T: Presence + ?Sized> Presence for Rc<T> {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}

impl<T: Presence + ?Sized> Presence for Arc<T> {
    fn is_present(&self) -> bool {
        (**self).is_present()
    }
}
