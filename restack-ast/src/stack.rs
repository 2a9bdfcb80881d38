//! The builder stack.
//!
//! Holds the chain of open constructs from the root down to the one currently
//! being described, plus the sticky error of the build.

use log::{debug, trace};

use crate::{Error, Item, Node};

/// LIFO of open nodes with a sticky error.
#[derive(Debug, Default)]
pub struct Stack {
    nodes: Vec<Node>,
    error: Option<Error>,
}

impl Stack {
    /// Empty stack with no error recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `node` the current construct.
    pub fn push(&mut self, node: Node) {
        trace!("push {} at depth {}", node.describe(), self.nodes.len());
        self.nodes.push(node);
    }

    /// Current construct, if any.
    pub fn peek(&self) -> Option<&Node> {
        self.nodes.last()
    }

    /// Current construct, for in-place edits.
    pub fn peek_mut(&mut self) -> Option<&mut Node> {
        self.nodes.last_mut()
    }

    /// Remove the current construct without folding it anywhere.
    pub fn pop(&mut self) -> Option<Node> {
        let node = self.nodes.pop()?;
        trace!("pop {} at depth {}", node.describe(), self.nodes.len());
        Some(node)
    }

    /// Bottom of the stack.
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Number of open constructs, the root included.
    pub fn depth(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Offer a child or attribute to the current construct.
    ///
    /// A rejection is recorded as the build error and the construct is left
    /// as it was.
    pub fn offer(&mut self, item: impl Into<Item>) {
        let item = item.into();
        let result = match self.nodes.last_mut() {
            Some(top) => top.accept(item),
            None => Err(Error::empty_context(item.describe())),
        };
        if let Err(err) = result {
            self.set_error(err);
        }
    }

    /// Fold the current construct into the one below it.
    ///
    /// Does nothing while only the root is open.
    pub fn release(&mut self) {
        if self.nodes.len() <= 1 {
            return;
        }
        if let Some(node) = self.pop() {
            self.offer(node);
        }
    }

    /// Record a failure. Only the first one is kept.
    pub fn set_error(&mut self, err: Error) {
        if self.error.is_some() {
            debug!("ignoring follow-up failure: {err}");
            return;
        }
        debug!("build failed: {err}");
        self.error = Some(err);
    }

    /// The first failure recorded, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Move the recorded failure out, clearing it.
    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }

    /// Whether a failure has been recorded. Later offers still run but
    /// cannot replace it.
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}
