//! Core model of the Dovetail binding bridge.
//!
//! A legacy template runtime exposes every dynamic hole as a *binding site*
//! ([`BindingSite`]): a staged-write surface with shape probes. This crate
//! turns those sites into the modern *part* model directives are written
//! against:
//!
//! - [`classify`] names the shape of a site ([`PartKind`])
//! - [`translate`] wraps a site in its modern view ([`BoundPart`])
//! - [`tag`] / [`is_directive`] let the engine tell executable directive
//!   values apart from literal data
//! - [`Value`] is the closed set of things template expressions produce
//!
//! Everything here is single-threaded by design, matching the cooperative
//! scheduling of the host runtime; per-thread state lives in thread-locals.

mod error;
mod node;
mod part;
mod registry;
mod site;
mod translate;
mod value;

pub use error::BindError;
pub use node::{node_eq, HostNode, NodeHandle};
pub use part::{AttributePartInfo, ChildPartInfo, PartInfo, PartKind};
pub use registry::{is_directive, tag, tagged_count};
pub use site::{AttributeSlot, BindingSite, EventBinding, SiteHandle, SiteKey};
pub use translate::{
    classify, translate, AttributePart, BooleanAttributePart, BoundPart, ChildPart, EventPart,
    PropertyPart,
};
pub use value::{DirectiveFn, Listener, OpaqueHandle, Value};
