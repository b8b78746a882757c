//! Named events and their reactions.
//!
//! A [`Dispatcher`] maps event names to ordered reaction lists. Triggering an
//! event runs every reaction in registration order and shapes the result by
//! arity: no reactions yields [`Dispatch::Empty`], exactly one yields the
//! bare value in [`Dispatch::One`], several yield the ordered collection in
//! [`Dispatch::Many`]. Callers that don't care about the arity can flatten
//! with [`Dispatch::into_vec`].

use std::collections::BTreeMap;
use std::fmt;

/// The shaped result of one trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<R> {
    /// Nothing was registered for the event.
    Empty,
    /// Exactly one reaction ran; its value is returned bare.
    One(R),
    /// Several reactions ran, results in registration order.
    Many(Vec<R>),
}

impl<R> Dispatch<R> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Number of reaction results carried.
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::One(_) => 1,
            Self::Many(results) => results.len(),
        }
    }

    /// Flatten to a plain vector, losing the arity distinction.
    pub fn into_vec(self) -> Vec<R> {
        match self {
            Self::Empty => Vec::new(),
            Self::One(result) => vec![result],
            Self::Many(results) => results,
        }
    }
}

/// Handle returned by [`Dispatcher::register`], used to deregister a single
/// reaction without disturbing the others bound to the same event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionId(u64);

struct Reaction<A, R> {
    id: ReactionId,
    run: Box<dyn FnMut(&A) -> R>,
}

/// Event-name to reaction-list registry, generic over the argument passed to
/// reactions and the value they return.
pub struct Dispatcher<A, R> {
    reactions: BTreeMap<String, Vec<Reaction<A, R>>>,
    next_id: u64,
}

impl<A, R> Default for Dispatcher<A, R> {
    fn default() -> Self {
        Self { reactions: BTreeMap::new(), next_id: 0 }
    }
}

impl<A, R> Dispatcher<A, R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a reaction to an event name, appending after any reactions
    /// already bound to it.
    pub fn register(
        &mut self,
        event: impl Into<String>,
        reaction: impl FnMut(&A) -> R + 'static,
    ) -> ReactionId {
        let id = ReactionId(self.next_id);
        self.next_id += 1;
        self.reactions
            .entry(event.into())
            .or_default()
            .push(Reaction { id, run: Box::new(reaction) });
        id
    }

    /// Remove one reaction. Returns false when the id is not bound to the
    /// event (already removed, or registered under another name).
    pub fn deregister(&mut self, event: &str, id: ReactionId) -> bool {
        let Some(list) = self.reactions.get_mut(event) else {
            return false;
        };
        let before = list.len();
        list.retain(|reaction| reaction.id != id);
        if list.is_empty() {
            self.reactions.remove(event);
        }
        before != self.reactions.get(event).map_or(0, Vec::len)
    }

    /// Remove every reaction bound to an event. Returns how many were bound.
    pub fn deregister_event(&mut self, event: &str) -> usize {
        self.reactions.remove(event).map_or(0, |list| list.len())
    }

    /// Run the event's reactions in registration order and shape the result
    /// by arity. Triggering an unknown event is not an error.
    pub fn trigger(&mut self, event: &str, argument: &A) -> Dispatch<R> {
        let Some(list) = self.reactions.get_mut(event) else {
            tracing::trace!(event, "trigger with no reactions");
            return Dispatch::Empty;
        };
        tracing::trace!(event, reactions = list.len(), "trigger");
        let mut results: Vec<R> = list
            .iter_mut()
            .map(|reaction| (reaction.run)(argument))
            .collect();
        match results.len() {
            0 => Dispatch::Empty,
            1 => Dispatch::One(results.remove(0)),
            _ => Dispatch::Many(results),
        }
    }

    /// Number of reactions bound to an event.
    pub fn bound(&self, event: &str) -> usize {
        self.reactions.get(event).map_or(0, Vec::len)
    }

    /// All event names with at least one reaction, in sorted order.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.reactions.keys().map(String::as_str)
    }
}

impl<A, R> fmt::Debug for Dispatcher<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (event, list) in &self.reactions {
            map.entry(event, &list.len());
        }
        map.finish()
    }
}
