//! Legacy binding sites.
//!
//! The legacy runtime hands the bridge one object per dynamic template hole.
//! [`BindingSite`] is the contract it must satisfy: a staged-write surface
//! (`set_value` then `commit`) plus shape probes the classifier interrogates.
//! A site answers at most the probes that fit its shape and inherits `None`
//! for the rest.

use crate::node::NodeHandle;
use crate::value::Value;
use std::fmt;
use std::rc::Rc;

/// One dynamic hole in a legacy template instance.
pub trait BindingSite {
    /// Stage a value; the engine applies it on the next [`commit`](Self::commit).
    fn set_value(&self, value: Value);

    /// Apply the staged value.
    fn commit(&self);

    /// Anchor node, answered only by child (node-position) sites.
    fn child_anchor(&self) -> Option<NodeHandle> {
        None
    }

    /// Event metadata, answered only by event sites.
    fn event_binding(&self) -> Option<EventBinding> {
        None
    }

    /// Slot metadata, answered only by boolean-attribute sites.
    fn boolean_slot(&self) -> Option<AttributeSlot> {
        None
    }

    /// Slot metadata, answered by attribute and property sites.
    fn attribute_slot(&self) -> Option<AttributeSlot> {
        None
    }
}

/// Shared handle to a legacy binding site.
pub type SiteHandle = Rc<dyn BindingSite>;

/// Cache key derived from a site's allocation address.
///
/// Stable for the lifetime of the handle and unique among sites that are
/// alive at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SiteKey(usize);

impl SiteKey {
    /// Key for the given site handle.
    #[must_use]
    pub fn of(site: &SiteHandle) -> Self {
        Self(Rc::as_ptr(site).cast::<()>() as usize)
    }
}

/// Shape metadata of an event site.
#[derive(Clone)]
pub struct EventBinding {
    /// Element the listener is installed on.
    pub element: NodeHandle,
    /// Event name, e.g. `"click"`.
    pub event: String,
}

impl fmt::Debug for EventBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBinding")
            .field("element", &self.element.tag_name())
            .field("event", &self.event)
            .finish()
    }
}

/// Shape metadata of an attribute-flavored site.
#[derive(Clone)]
pub struct AttributeSlot {
    /// Element owning the attribute.
    pub element: NodeHandle,
    /// Attribute (or property) name.
    pub name: String,
    /// Literal string fragments surrounding the expressions; a sole
    /// expression has two empty fragments.
    pub strings: Rc<[String]>,
    /// Whether commits assign a property instead of setting an attribute.
    pub assigns_property: bool,
}

impl fmt::Debug for AttributeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSlot")
            .field("element", &self.element.tag_name())
            .field("name", &self.name)
            .field("strings", &self.strings)
            .field("assigns_property", &self.assigns_property)
            .finish()
    }
}
