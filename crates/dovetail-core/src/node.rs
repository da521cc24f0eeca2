//! Host tree contract.
//!
//! The bridge never owns or mutates the host document; the legacy rendering
//! engine does that. [`HostNode`] is the narrow view the bridge needs of it:
//! document attachment for connectivity checks, and the tag name for part
//! descriptors.

use std::rc::Rc;

/// Minimal view of one node in the host document tree.
pub trait HostNode {
    /// Whether the node is currently attached to the live document.
    fn is_connected(&self) -> bool;

    /// Tag name of the owning element.
    fn tag_name(&self) -> &str;
}

/// Shared handle to a host node.
pub type NodeHandle = Rc<dyn HostNode>;

/// Pointer identity comparison for host nodes.
///
/// Handles compare by allocation, not by structure: two distinct nodes with
/// the same tag are never equal.
#[must_use]
pub fn node_eq(a: &NodeHandle, b: &NodeHandle) -> bool {
    std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
}
