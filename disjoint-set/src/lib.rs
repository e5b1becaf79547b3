//! A disjoint-set (union-find) forest of elements carrying optional,
//! mergeable payload data.
//!
//! Each [`Element`] is a cheap, clonable handle (an [`Rc`]) into a node of
//! the forest. [`Element::find`] returns the representative of the set
//! containing an element, applying path compression as it walks. Unioning
//! two elements (the [`Element::union`] method) always attaches the
//! lower-rank root under the higher-rank one, breaking ties by making the
//! first argument's root the new parent and bumping its rank.
//!
//! This type is not thread-safe: it uses [`Rc`]/[`RefCell`], not
//! [`std::sync::Arc`]/[`std::sync::Mutex`]. Callers that need to share a
//! forest across threads must synchronise externally; the intended use
//! (a type-unification solver) owns the forest for the duration of solving
//! and discards it once solving completes.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

enum Node<T> {
    Root { rank: u32, data: Option<T> },
    Child(Rc<RefCell<Node<T>>>),
}

/// A handle into one node of a disjoint-set forest.
///
/// Cloning an `Element` is cheap and yields another handle to the *same*
/// node (not a new singleton set) — use [`Element::new_elem`] to create a
/// fresh set.
pub struct Element<T>(Rc<RefCell<Node<T>>>);

impl<T> Clone for Element<T> {
    fn clone(&self) -> Self { Element(Rc::clone(&self.0)) }
}

impl<T> fmt::Debug for Element<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Element({:p})", Rc::as_ptr(&self.0))
    }
}

/// Two handles are the same element iff they point at the same node. This
/// is stricter than [`Element::is_connected`], which compares
/// representatives.
impl<T> PartialEq for Element<T> {
    fn eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}
impl<T> Eq for Element<T> {}

impl<T> Element<T> {
    /// Creates a singleton set containing one new element with no attached
    /// data.
    #[must_use]
    pub fn new_elem() -> Self { Self::new_elem_with(None) }

    /// Creates a singleton set containing one new element, with `data`
    /// attached.
    #[must_use]
    pub fn new_elem_with(data: Option<T>) -> Self {
        Element(Rc::new(RefCell::new(Node::Root { rank: 0, data })))
    }

    /// Returns the representative of this element's set, compressing the
    /// path from `self` to the root so that future lookups are near
    /// constant time.
    #[must_use]
    pub fn find(&self) -> Element<T> {
        let mut visited = Vec::new();
        let mut cur = Rc::clone(&self.0);
        loop {
            let next = match &*cur.borrow() {
                Node::Root { .. } => None,
                Node::Child(parent) => Some(Rc::clone(parent)),
            };
            match next {
                None => break,
                Some(parent) => {
                    visited.push(Rc::clone(&cur));
                    cur = parent;
                }
            }
        }
        for node in visited {
            if !Rc::ptr_eq(&node, &cur) {
                *node.borrow_mut() = Node::Child(Rc::clone(&cur));
            }
        }
        Element(cur)
    }

    /// `self.find() == other.find()`.
    #[must_use]
    pub fn is_connected(&self, other: &Element<T>) -> bool {
        Rc::ptr_eq(&self.find().0, &other.find().0)
    }

    /// Merges the set containing `self` with the set containing `other`.
    /// A no-op if they already share a representative. Does not touch
    /// attached data; see [`Element::merge`] for that.
    pub fn union(&self, other: &Element<T>) {
        let ra = self.find();
        let rb = other.find();
        if Rc::ptr_eq(&ra.0, &rb.0) {
            return;
        }
        let rank_a = ra.rank();
        let rank_b = rb.rank();
        match rank_a.cmp(&rank_b) {
            Ordering::Less => *ra.0.borrow_mut() = Node::Child(Rc::clone(&rb.0)),
            Ordering::Greater => *rb.0.borrow_mut() = Node::Child(Rc::clone(&ra.0)),
            Ordering::Equal => {
                *rb.0.borrow_mut() = Node::Child(Rc::clone(&ra.0));
                if let Node::Root { rank, .. } = &mut *ra.0.borrow_mut() {
                    *rank += 1;
                }
            }
        }
    }

    fn rank(&self) -> u32 {
        match &*self.0.borrow() {
            Node::Root { rank, .. } => *rank,
            Node::Child(_) => unreachable!("rank() called on a non-representative element"),
        }
    }

    /// An opaque numeric identity for this element's *current*
    /// representative. Two elements with the same `repr_id` are, at the
    /// instant of the call, connected; the value can change across a later
    /// `union` call, so callers must not cache it past a union they did
    /// not themselves perform. Intended for internal bookkeeping (e.g. an
    /// alpha-equivalence check over a tree containing several elements),
    /// not as a user-facing key.
    #[must_use]
    pub fn repr_id(&self) -> usize {
        Rc::as_ptr(&self.find().0) as *const RefCell<Node<T>> as usize
    }
}

impl<T: Clone> Element<T> {
    /// The data attached to this element's representative, if any.
    #[must_use]
    pub fn data(&self) -> Option<T> {
        match &*self.find().0.borrow() {
            Node::Root { data, .. } => data.clone(),
            Node::Child(_) => unreachable!(),
        }
    }

    /// Overwrites the data attached to this element's representative.
    pub fn set_data(&self, data: Option<T>) {
        let rep = self.find();
        if let Node::Root { data: slot, .. } = &mut *rep.0.borrow_mut() {
            *slot = data;
        }
    }

    /// Merges `e` and `f`, computing the representative's new data as
    /// `reduce(e.data(), f.data())`. `e` and `f` need not already be
    /// representatives — this calls [`Element::find`] on each first, then
    /// delegates to [`Element::unsafe_merge`].
    ///
    /// This is nearly always the variant to call: it reads the
    /// previously-merged data off whichever representative currently
    /// holds it, rather than off whatever arbitrary element the caller
    /// happened to pass in.
    pub fn merge<E>(
        e: &Element<T>,
        f: &Element<T>,
        reduce: impl FnOnce(Option<T>, Option<T>) -> Result<T, E>,
    ) -> Result<(), E> {
        Self::unsafe_merge(&e.find(), &f.find(), reduce)
    }

    /// Computes `d = reduce(e.data(), f.data())`, unions `e` and `f`, and
    /// stores `d` on the resulting representative. If `reduce` fails, the
    /// union is not performed.
    ///
    /// Callers that have not already resolved `e` and `f` to their current
    /// representatives should use [`Element::merge`] instead: this method
    /// reads `e.data()`/`f.data()` (which itself calls `find`), but if `e`
    /// and `f` are not representatives at the time of the call there is a
    /// window, in concurrent use, where the reduce result is stale. The
    /// core makes no thread-safety claims, so in single-threaded use the
    /// two are equivalent; `merge` is offered because it is the safer
    /// default to reach for.
    pub fn unsafe_merge<E>(
        e: &Element<T>,
        f: &Element<T>,
        reduce: impl FnOnce(Option<T>, Option<T>) -> Result<T, E>,
    ) -> Result<(), E> {
        let d = reduce(e.data(), f.data())?;
        e.union(f);
        e.find().set_data(Some(d));
        Ok(())
    }
}
