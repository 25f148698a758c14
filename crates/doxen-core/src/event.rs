//! Event model.
//!
//! Two moments in a document tree's lifecycle are observable:
//! - [`NodeEvent`]: a node is about to be displayed
//! - [`SignalEvent`]: an out-of-band signal arrived for a page

use crate::control::Control;
use crate::node::Node;
use crate::tree::DocTree;

/// Event delivered to a [`Listener`].
pub enum Event<'a> {
    /// Node rendering.
    Node(NodeEvent<'a>),
    /// Out-of-band signal.
    Signal(SignalEvent<'a>),
}

/// A node is being rendered. The listener may mutate it in place.
pub struct NodeEvent<'a> {
    /// Node being rendered.
    pub node: &'a mut Node,
    /// Rendering context.
    pub control: &'a dyn Control,
}

/// A named signal was requested.
pub struct SignalEvent<'a> {
    /// Signal identifier.
    pub signal: &'a str,
    /// Request context, also the response sink.
    pub control: &'a mut dyn Control,
    /// Whole document tree, read-only.
    pub tree: &'a DocTree,
}

impl<'a> Event<'a> {
    /// Create a node event.
    pub fn node(node: &'a mut Node, control: &'a dyn Control) -> Self {
        Self::Node(NodeEvent { node, control })
    }

    /// Create a signal event.
    pub fn signal(signal: &'a str, control: &'a mut dyn Control, tree: &'a DocTree) -> Self {
        Self::Signal(SignalEvent {
            signal,
            control,
            tree,
        })
    }
}

/// Component notified about tree events.
///
/// Listeners hold no per-event state, so independent events may be handled
/// concurrently.
pub trait Listener: Send + Sync {
    /// Handle an event.
    fn listen(&self, event: Event<'_>);
}
