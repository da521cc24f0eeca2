//! Part kinds and descriptors.
//!
//! A *part* is the modern view of a binding site. [`PartKind`] is the closed
//! set of shapes the bridge understands; [`PartInfo`] is the constructor-time
//! descriptor handed to directives, carrying the kind plus whatever static
//! metadata the template carries for attribute-flavored parts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five binding shapes of the part model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartKind {
    /// Interpolated attribute value.
    Attribute,
    /// Node position between element children.
    Child,
    /// Element property assignment.
    Property,
    /// Attribute toggled by truthiness.
    BooleanAttribute,
    /// Event listener installation.
    Event,
}

impl PartKind {
    /// True for the kinds that live on an element attribute surface:
    /// attribute, property, boolean attribute, and event.
    #[must_use]
    pub const fn is_attribute_like(self) -> bool {
        !matches!(self, Self::Child)
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Attribute => "attribute",
            Self::Child => "child",
            Self::Property => "property",
            Self::BooleanAttribute => "boolean-attribute",
            Self::Event => "event",
        };
        f.write_str(name)
    }
}

/// Descriptor of a child (node-position) part.
///
/// Child parts carry no static metadata beyond their kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildPartInfo;

/// Descriptor of an attribute-flavored part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributePartInfo {
    /// Which attribute-flavored kind this is.
    pub kind: PartKind,
    /// Attribute, property, or event name.
    pub name: String,
    /// Tag name of the owning element.
    pub tag_name: String,
    /// Literal fragments surrounding the expressions; a sole expression has
    /// two empty fragments.
    pub strings: Vec<String>,
}

/// Constructor-time descriptor handed to a directive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PartInfo {
    /// A node-position binding.
    Child(ChildPartInfo),
    /// An attribute-flavored binding.
    Attribute(AttributePartInfo),
}

impl PartInfo {
    /// Kind of the described part.
    #[must_use]
    pub const fn kind(&self) -> PartKind {
        match self {
            Self::Child(_) => PartKind::Child,
            Self::Attribute(info) => info.kind,
        }
    }

    /// Attribute, property, or event name, when the part has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Child(_) => None,
            Self::Attribute(info) => Some(&info.name),
        }
    }

    /// Tag name of the owning element, when the part has one.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::Child(_) => None,
            Self::Attribute(info) => Some(&info.tag_name),
        }
    }

    /// Literal string fragments, when the part has them.
    #[must_use]
    pub fn strings(&self) -> Option<&[String]> {
        match self {
            Self::Child(_) => None,
            Self::Attribute(info) => Some(&info.strings),
        }
    }
}
