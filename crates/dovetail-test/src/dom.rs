//! A miniature host tree.
//!
//! Connectivity is computed, not stored: a node is connected when its parent
//! chain reaches the document root, so detaching a subtree detaches every
//! descendant with it.

use dovetail_core::{HostNode, NodeHandle};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Fake document with a connected root.
pub struct TestDom {
    root: Rc<TestNode>,
}

impl TestDom {
    /// Fresh document containing only the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Rc::new(TestNode {
                tag: "#document".to_string(),
                document: true,
                parent: RefCell::new(Weak::new()),
                children: RefCell::new(Vec::new()),
            }),
        }
    }

    /// The always-connected document root.
    #[must_use]
    pub fn root(&self) -> Rc<TestNode> {
        Rc::clone(&self.root)
    }

    /// Create a detached element.
    #[must_use]
    pub fn create_element(&self, tag: &str) -> Rc<TestNode> {
        Rc::new(TestNode {
            tag: tag.to_string(),
            document: false,
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
        })
    }

    /// Append `child` under `parent`, detaching it from any previous parent.
    pub fn append_child(&self, parent: &Rc<TestNode>, child: &Rc<TestNode>) {
        self.remove(child);
        *child.parent.borrow_mut() = Rc::downgrade(parent);
        parent.children.borrow_mut().push(Rc::clone(child));
    }

    /// Detach a node (and with it, its subtree) from its parent.
    pub fn remove(&self, node: &Rc<TestNode>) {
        if let Some(parent) = node.parent() {
            parent
                .children
                .borrow_mut()
                .retain(|child| !Rc::ptr_eq(child, node));
        }
        *node.parent.borrow_mut() = Weak::new();
    }
}

impl Default for TestDom {
    fn default() -> Self {
        Self::new()
    }
}

/// One node of the fake tree.
pub struct TestNode {
    tag: String,
    document: bool,
    parent: RefCell<Weak<TestNode>>,
    children: RefCell<Vec<Rc<TestNode>>>,
}

impl TestNode {
    /// Current parent, if attached to one.
    #[must_use]
    pub fn parent(&self) -> Option<Rc<TestNode>> {
        self.parent.borrow().upgrade()
    }

    /// Number of direct children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    /// Erased handle for handing the node to the bridge.
    #[must_use]
    pub fn handle(self: &Rc<Self>) -> NodeHandle {
        Rc::clone(self) as NodeHandle
    }
}

impl HostNode for TestNode {
    fn is_connected(&self) -> bool {
        if self.document {
            return true;
        }
        self.parent().is_some_and(|parent| parent.is_connected())
    }

    fn tag_name(&self) -> &str {
        &self.tag
    }
}

impl fmt::Debug for TestNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestNode")
            .field("tag", &self.tag)
            .field("connected", &self.is_connected())
            .field("children", &self.child_count())
            .finish()
    }
}
