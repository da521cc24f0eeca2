//! Classification and translation of legacy binding sites.
//!
//! [`classify`] answers "what shape is this site" by interrogating the probe
//! methods in a fixed order; [`translate`] goes one step further and wraps
//! the site in a [`BoundPart`], the modern view directives are written
//! against. Translation copies the shape metadata out of the site once, so a
//! part never re-probes.
//!
//! Probe order is child, event, boolean attribute, then attribute; a site
//! answering several probes resolves to the first. Attribute-flavored sites
//! split into property and attribute parts on their
//! [`assigns_property`](crate::AttributeSlot::assigns_property) flag.

use crate::error::BindError;
use crate::node::NodeHandle;
use crate::part::{AttributePartInfo, ChildPartInfo, PartInfo, PartKind};
use crate::site::{AttributeSlot, BindingSite, EventBinding, SiteHandle};
use crate::value::Value;
use std::fmt;
use std::rc::{Rc, Weak};

enum Probe {
    Child(NodeHandle),
    Event(EventBinding),
    Boolean(AttributeSlot),
    AttributeLike(AttributeSlot),
}

fn probe(site: &SiteHandle) -> Option<Probe> {
    if let Some(anchor) = site.child_anchor() {
        return Some(Probe::Child(anchor));
    }
    if let Some(binding) = site.event_binding() {
        return Some(Probe::Event(binding));
    }
    if let Some(slot) = site.boolean_slot() {
        return Some(Probe::Boolean(slot));
    }
    site.attribute_slot().map(Probe::AttributeLike)
}

/// Determine the part kind of a legacy binding site.
///
/// # Errors
///
/// Returns [`BindError::UnknownPartType`] when the site answers no probe.
pub fn classify(site: &SiteHandle) -> Result<PartKind, BindError> {
    let kind = match probe(site).ok_or(BindError::UnknownPartType)? {
        Probe::Child(_) => PartKind::Child,
        Probe::Event(_) => PartKind::Event,
        Probe::Boolean(_) => PartKind::BooleanAttribute,
        Probe::AttributeLike(slot) => {
            if slot.assigns_property {
                PartKind::Property
            } else {
                PartKind::Attribute
            }
        }
    };
    Ok(kind)
}

/// Translate a legacy binding site into its modern part view.
///
/// # Errors
///
/// Returns [`BindError::UnknownPartType`] when the site answers no probe.
pub fn translate(site: &SiteHandle) -> Result<BoundPart, BindError> {
    let part = match probe(site).ok_or(BindError::UnknownPartType)? {
        Probe::Child(anchor) => BoundPart::Child(ChildPart {
            site: Rc::downgrade(site),
            anchor,
        }),
        Probe::Event(binding) => BoundPart::Event(EventPart {
            site: Rc::downgrade(site),
            binding,
        }),
        Probe::Boolean(slot) => BoundPart::BooleanAttribute(BooleanAttributePart {
            site: Rc::downgrade(site),
            slot,
        }),
        Probe::AttributeLike(slot) if slot.assigns_property => BoundPart::Property(PropertyPart {
            site: Rc::downgrade(site),
            slot,
        }),
        Probe::AttributeLike(slot) => BoundPart::Attribute(AttributePart {
            site: Rc::downgrade(site),
            slot,
        }),
    };
    Ok(part)
}

/// Modern view of a translated binding site.
///
/// Every variant holds its site weakly, so a part never extends the site's
/// lifetime; the engine's own handle controls teardown. Writes through a
/// part whose site is gone are silently discarded. Shape metadata is copied
/// out at translation time, so the metadata accessors stay total regardless.
#[derive(Clone)]
pub enum BoundPart {
    /// Node-position binding.
    Child(ChildPart),
    /// Plain attribute binding.
    Attribute(AttributePart),
    /// Property assignment binding.
    Property(PropertyPart),
    /// Truthiness-toggled attribute binding.
    BooleanAttribute(BooleanAttributePart),
    /// Event listener binding.
    Event(EventPart),
}

impl BoundPart {
    /// Kind recorded at translation time; never re-probes the site.
    #[must_use]
    pub const fn kind(&self) -> PartKind {
        match self {
            Self::Child(_) => PartKind::Child,
            Self::Attribute(_) => PartKind::Attribute,
            Self::Property(_) => PartKind::Property,
            Self::BooleanAttribute(_) => PartKind::BooleanAttribute,
            Self::Event(_) => PartKind::Event,
        }
    }

    /// Constructor-time descriptor for directives bound at this part.
    #[must_use]
    pub fn info(&self) -> PartInfo {
        match self {
            Self::Child(_) => PartInfo::Child(ChildPartInfo),
            Self::Attribute(part) => PartInfo::Attribute(part.slot_info(PartKind::Attribute)),
            Self::Property(part) => PartInfo::Attribute(part.slot_info(PartKind::Property)),
            Self::BooleanAttribute(part) => {
                PartInfo::Attribute(part.slot_info(PartKind::BooleanAttribute))
            }
            Self::Event(part) => PartInfo::Attribute(part.event_info()),
        }
    }

    /// Host node the part is anchored to: the anchor for child parts, the
    /// owning element otherwise.
    #[must_use]
    pub fn host_node(&self) -> NodeHandle {
        match self {
            Self::Child(part) => Rc::clone(&part.anchor),
            Self::Attribute(part) => Rc::clone(&part.slot.element),
            Self::Property(part) => Rc::clone(&part.slot.element),
            Self::BooleanAttribute(part) => Rc::clone(&part.slot.element),
            Self::Event(part) => Rc::clone(&part.binding.element),
        }
    }

    /// The legacy site behind this part, if the engine still holds it.
    #[must_use]
    pub fn site(&self) -> Option<SiteHandle> {
        match self {
            Self::Child(part) => part.site(),
            Self::Attribute(part) => part.site(),
            Self::Property(part) => part.site(),
            Self::BooleanAttribute(part) => part.site(),
            Self::Event(part) => part.site(),
        }
    }

    /// Stage a value on the underlying site. Discarded if the site is gone.
    pub fn set_value(&self, value: Value) {
        if let Some(site) = self.site() {
            site.set_value(value);
        }
    }

    /// Commit the staged value on the underlying site. Discarded if the site
    /// is gone.
    pub fn commit(&self) {
        if let Some(site) = self.site() {
            site.commit();
        }
    }
}

impl fmt::Debug for BoundPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Child(part) => part.fmt(f),
            Self::Attribute(part) => part.fmt(f),
            Self::Property(part) => part.fmt(f),
            Self::BooleanAttribute(part) => part.fmt(f),
            Self::Event(part) => part.fmt(f),
        }
    }
}

/// Node-position part.
#[derive(Clone)]
pub struct ChildPart {
    site: Weak<dyn BindingSite>,
    anchor: NodeHandle,
}

impl ChildPart {
    /// Node the rendered content is anchored at.
    #[must_use]
    pub fn anchor(&self) -> &NodeHandle {
        &self.anchor
    }

    /// The legacy site behind this part, if the engine still holds it.
    #[must_use]
    pub fn site(&self) -> Option<SiteHandle> {
        self.site.upgrade()
    }
}

impl fmt::Debug for ChildPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildPart")
            .field("anchor", &self.anchor.tag_name())
            .finish()
    }
}

// Macro for the three attribute-flavored parts; they differ only in kind.
macro_rules! attribute_flavored_part {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            site: Weak<dyn BindingSite>,
            slot: AttributeSlot,
        }

        impl $name {
            /// Element owning the binding.
            #[must_use]
            pub fn element(&self) -> &NodeHandle {
                &self.slot.element
            }

            /// Bound attribute or property name.
            #[must_use]
            pub fn name(&self) -> &str {
                &self.slot.name
            }

            /// Tag name of the owning element.
            #[must_use]
            pub fn tag_name(&self) -> &str {
                self.slot.element.tag_name()
            }

            /// Literal fragments surrounding the expressions.
            #[must_use]
            pub fn strings(&self) -> &[String] {
                &self.slot.strings
            }

            /// The legacy site behind this part, if the engine still holds
            /// it.
            #[must_use]
            pub fn site(&self) -> Option<SiteHandle> {
                self.site.upgrade()
            }

            fn slot_info(&self, kind: PartKind) -> AttributePartInfo {
                AttributePartInfo {
                    kind,
                    name: self.slot.name.clone(),
                    tag_name: self.slot.element.tag_name().to_string(),
                    strings: self.slot.strings.to_vec(),
                }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("name", &self.slot.name)
                    .field("tag", &self.slot.element.tag_name())
                    .finish()
            }
        }
    };
}

attribute_flavored_part! {
    /// Plain attribute part.
    AttributePart
}

attribute_flavored_part! {
    /// Property assignment part.
    PropertyPart
}

attribute_flavored_part! {
    /// Truthiness-toggled attribute part.
    BooleanAttributePart
}

/// Event listener part.
#[derive(Clone)]
pub struct EventPart {
    site: Weak<dyn BindingSite>,
    binding: EventBinding,
}

impl EventPart {
    /// Element the listener is installed on.
    #[must_use]
    pub fn element(&self) -> &NodeHandle {
        &self.binding.element
    }

    /// Event name.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.binding.event
    }

    /// The legacy site behind this part, if the engine still holds it.
    #[must_use]
    pub fn site(&self) -> Option<SiteHandle> {
        self.site.upgrade()
    }

    // Event bindings are always the sole expression of their attribute, so
    // the descriptor carries two empty fragments.
    fn event_info(&self) -> AttributePartInfo {
        AttributePartInfo {
            kind: PartKind::Event,
            name: self.binding.event.clone(),
            tag_name: self.binding.element.tag_name().to_string(),
            strings: vec![String::new(), String::new()],
        }
    }
}

impl fmt::Debug for EventPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPart")
            .field("event", &self.binding.event)
            .field("tag", &self.binding.element.tag_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{node_eq, HostNode};
    use crate::site::BindingSite;
    use proptest::prelude::*;
    use std::cell::{Cell, RefCell};

    struct StubNode(&'static str);

    impl HostNode for StubNode {
        fn is_connected(&self) -> bool {
            true
        }

        fn tag_name(&self) -> &str {
            self.0
        }
    }

    #[derive(Default)]
    struct StubSite {
        anchor: Option<NodeHandle>,
        event: Option<EventBinding>,
        boolean: Option<AttributeSlot>,
        attribute: Option<AttributeSlot>,
        writes: RefCell<Vec<Value>>,
        commits: Cell<usize>,
    }

    impl BindingSite for StubSite {
        fn set_value(&self, value: Value) {
            self.writes.borrow_mut().push(value);
        }

        fn commit(&self) {
            self.commits.set(self.commits.get() + 1);
        }

        fn child_anchor(&self) -> Option<NodeHandle> {
            self.anchor.clone()
        }

        fn event_binding(&self) -> Option<EventBinding> {
            self.event.clone()
        }

        fn boolean_slot(&self) -> Option<AttributeSlot> {
            self.boolean.clone()
        }

        fn attribute_slot(&self) -> Option<AttributeSlot> {
            self.attribute.clone()
        }
    }

    fn node(tag: &'static str) -> NodeHandle {
        Rc::new(StubNode(tag))
    }

    fn slot(tag: &'static str, name: &str, assigns_property: bool) -> AttributeSlot {
        AttributeSlot {
            element: node(tag),
            name: name.to_string(),
            strings: Rc::from(vec![String::new(), String::new()]),
            assigns_property,
        }
    }

    fn child_site() -> SiteHandle {
        Rc::new(StubSite {
            anchor: Some(node("section")),
            ..StubSite::default()
        })
    }

    fn event_site() -> SiteHandle {
        Rc::new(StubSite {
            event: Some(EventBinding {
                element: node("button"),
                event: "click".to_string(),
            }),
            ..StubSite::default()
        })
    }

    fn boolean_site() -> SiteHandle {
        Rc::new(StubSite {
            boolean: Some(slot("input", "disabled", false)),
            ..StubSite::default()
        })
    }

    fn attribute_site(assigns_property: bool) -> SiteHandle {
        Rc::new(StubSite {
            attribute: Some(slot("input", "value", assigns_property)),
            ..StubSite::default()
        })
    }

    #[test]
    fn test_classify_each_shape() {
        assert_eq!(classify(&child_site()).unwrap(), PartKind::Child);
        assert_eq!(classify(&event_site()).unwrap(), PartKind::Event);
        assert_eq!(
            classify(&boolean_site()).unwrap(),
            PartKind::BooleanAttribute
        );
        assert_eq!(classify(&attribute_site(false)).unwrap(), PartKind::Attribute);
        assert_eq!(classify(&attribute_site(true)).unwrap(), PartKind::Property);
    }

    #[test]
    fn test_classify_unknown_shape() {
        let site: SiteHandle = Rc::new(StubSite::default());
        assert_eq!(classify(&site), Err(BindError::UnknownPartType));
        assert_eq!(
            translate(&site).unwrap_err(),
            BindError::UnknownPartType
        );
    }

    #[test]
    fn test_probe_order_prefers_child() {
        let site: SiteHandle = Rc::new(StubSite {
            anchor: Some(node("div")),
            event: Some(EventBinding {
                element: node("div"),
                event: "click".to_string(),
            }),
            attribute: Some(slot("div", "title", false)),
            ..StubSite::default()
        });
        assert_eq!(classify(&site).unwrap(), PartKind::Child);
    }

    #[test]
    fn test_probe_order_prefers_event_over_slots() {
        let site: SiteHandle = Rc::new(StubSite {
            event: Some(EventBinding {
                element: node("div"),
                event: "input".to_string(),
            }),
            boolean: Some(slot("div", "hidden", false)),
            attribute: Some(slot("div", "title", false)),
            ..StubSite::default()
        });
        assert_eq!(classify(&site).unwrap(), PartKind::Event);
    }

    #[test]
    fn test_probe_order_prefers_boolean_over_attribute() {
        let site: SiteHandle = Rc::new(StubSite {
            boolean: Some(slot("div", "hidden", false)),
            attribute: Some(slot("div", "title", false)),
            ..StubSite::default()
        });
        assert_eq!(classify(&site).unwrap(), PartKind::BooleanAttribute);
    }

    #[test]
    fn test_translation_copies_metadata() {
        let part = translate(&attribute_site(false)).unwrap();
        assert_eq!(part.kind(), PartKind::Attribute);
        let BoundPart::Attribute(attr) = &part else {
            panic!("expected an attribute part");
        };
        assert_eq!(attr.name(), "value");
        assert_eq!(attr.tag_name(), "input");
        assert_eq!(attr.strings().len(), 2);
    }

    #[test]
    fn test_event_descriptor_is_attribute_flavored() {
        let part = translate(&event_site()).unwrap();
        let info = part.info();
        assert_eq!(info.kind(), PartKind::Event);
        assert_eq!(info.name(), Some("click"));
        assert_eq!(info.tag_name(), Some("button"));
        assert_eq!(info.strings(), Some(&[String::new(), String::new()][..]));
    }

    #[test]
    fn test_child_descriptor_has_no_metadata() {
        let part = translate(&child_site()).unwrap();
        assert_eq!(part.info(), PartInfo::Child(ChildPartInfo));
        let BoundPart::Child(child) = &part else {
            panic!("expected a child part");
        };
        assert_eq!(child.anchor().tag_name(), "section");
    }

    #[test]
    fn test_part_writes_reach_the_original_site() {
        let stub = Rc::new(StubSite {
            attribute: Some(slot("input", "value", true)),
            ..StubSite::default()
        });
        let site: SiteHandle = Rc::clone(&stub) as SiteHandle;
        let part = translate(&site).unwrap();
        assert_eq!(part.kind(), PartKind::Property);
        part.set_value(Value::from("drafted"));
        part.commit();

        assert_eq!(stub.writes.borrow().as_slice(), &[Value::from("drafted")]);
        assert_eq!(stub.commits.get(), 1);
    }

    #[test]
    fn test_translating_twice_yields_equivalent_parts() {
        let site = boolean_site();
        let first = translate(&site).unwrap();
        let second = translate(&site).unwrap();
        assert_eq!(first.kind(), second.kind());
        assert_eq!(first.info(), second.info());
        assert!(node_eq(&first.host_node(), &second.host_node()));
        let (first_site, second_site) = (first.site().unwrap(), second.site().unwrap());
        assert!(Rc::ptr_eq(&first_site, &second_site));
    }

    #[test]
    fn test_writes_after_the_site_is_dropped_are_discarded() {
        let site = attribute_site(false);
        let part = translate(&site).unwrap();
        drop(site);

        assert!(part.site().is_none());
        part.set_value(Value::from("late"));
        part.commit();
        // Copied metadata outlives the site.
        assert_eq!(part.host_node().tag_name(), "input");
    }

    proptest! {
        #[test]
        fn prop_classify_agrees_with_translate(shape in 0u8..4, assigns in any::<bool>()) {
            let site = match shape {
                0 => child_site(),
                1 => event_site(),
                2 => boolean_site(),
                _ => attribute_site(assigns),
            };
            let kind = classify(&site).unwrap();
            let part = translate(&site).unwrap();
            prop_assert_eq!(kind, part.kind());
            prop_assert_eq!(kind, part.info().kind());
        }
    }
}
