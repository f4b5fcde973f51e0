//! Typed publish/subscribe hub.
//!
//! The bus is a direct synchronous dispatcher: `publish` calls every
//! handler subscribed to the event's kind before returning, and a handler
//! that publishes runs the nested dispatch to completion first. Nothing is
//! queued.
//!
//! Handlers receive the context they operate on explicitly (`&mut C`)
//! rather than reaching for global state.
//!
//! ## Ordering
//!
//! Higher priority first; equal priority in subscription order.
//!
//! ## Mutation during dispatch
//!
//! `publish` iterates a snapshot of the handler list taken when it starts.
//! A handler unsubscribed mid-dispatch still sees the event in flight; a
//! handler subscribed mid-dispatch only sees later events.
//!
//! ```
//! use rust_board::core::PlayerId;
//! use rust_board::events::{EventBus, EventKind, GameEvent};
//!
//! let mut bus: EventBus<Vec<String>> = EventBus::new();
//! bus.subscribe(EventKind::TurnEnded, |log, event| {
//!     log.push(format!("{:?}", event.player()));
//! });
//!
//! let mut log = Vec::new();
//! bus.publish(&mut log, &GameEvent::TurnEnded { player: PlayerId::new(1) });
//! assert_eq!(log, vec!["Some(PlayerId(1))"]);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::rc::Rc;

use super::event::{EventKind, GameEvent};

/// Shared handler callable.
pub type Handler<C> = Rc<dyn Fn(&mut C, &GameEvent)>;

/// Snapshot of handlers for one dispatch.
pub type HandlerSnapshot<C> = SmallVec<[Handler<C>; 8]>;

/// Identifies one subscription, for unsubscribing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

struct Subscription<C> {
    id: SubscriptionId,
    priority: i32,
    handler: Handler<C>,
}

impl<C> Clone for Subscription<C> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            priority: self.priority,
            handler: Rc::clone(&self.handler),
        }
    }
}

/// Publish/subscribe hub over context type `C`.
pub struct EventBus<C> {
    /// Subscriptions per kind, kept sorted by dispatch order.
    by_kind: FxHashMap<EventKind, Vec<Subscription<C>>>,

    /// Next subscription ID to allocate.
    next_id: u32,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self {
            by_kind: FxHashMap::default(),
            next_id: 0,
        }
    }
}

impl<C> Clone for EventBus<C> {
    fn clone(&self) -> Self {
        Self {
            by_kind: self.by_kind.clone(),
            next_id: self.next_id,
        }
    }
}

impl<C> std::fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: FxHashMap<_, _> = self.by_kind.iter().map(|(k, v)| (*k, v.len())).collect();
        f.debug_struct("EventBus")
            .field("handlers", &counts)
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl<C> EventBus<C> {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe at default priority (0).
    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl Fn(&mut C, &GameEvent) + 'static,
    ) -> SubscriptionId {
        self.subscribe_with_priority(kind, 0, handler)
    }

    /// Subscribe with an explicit priority. Higher runs first.
    pub fn subscribe_with_priority(
        &mut self,
        kind: EventKind,
        priority: i32,
        handler: impl Fn(&mut C, &GameEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let list = self.by_kind.entry(kind).or_default();
        // Insert after every subscription with priority >= ours
        let at = list.partition_point(|s| s.priority >= priority);
        list.insert(at, Subscription { id, priority, handler: Rc::new(handler) });
        id
    }

    /// Remove a subscription. Returns `false` if it was not subscribed to `kind`.
    pub fn unsubscribe(&mut self, kind: EventKind, id: SubscriptionId) -> bool {
        let Some(list) = self.by_kind.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|s| s.id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.by_kind.remove(&kind);
        }
        removed
    }

    /// Number of handlers subscribed to `kind`.
    #[must_use]
    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Handlers for `kind` in dispatch order, detached from the bus.
    #[must_use]
    pub fn snapshot(&self, kind: EventKind) -> HandlerSnapshot<C> {
        self.by_kind
            .get(&kind)
            .map(|list| list.iter().map(|s| Rc::clone(&s.handler)).collect())
            .unwrap_or_default()
    }

    /// Dispatch `event` to every handler for its kind.
    pub fn publish(&self, ctx: &mut C, event: &GameEvent) {
        for handler in self.snapshot(event.kind()) {
            handler(ctx, event);
        }
    }
}
