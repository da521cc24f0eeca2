//! Test doubles for the Dovetail bridge: a fake host tree, recording binding
//! sites for every part shape, and a harness that plays the engine's
//! dispatch role.
//!
//! # Examples
//!
//! ```
//! use dovetail_core::Value;
//! use dovetail_test::RenderHarness;
//!
//! let harness = RenderHarness::new();
//! let mounted = harness.attribute_site("a", "href");
//! harness.render(&mounted.site, &Value::from("/home")).unwrap();
//! assert_eq!(mounted.log.applied(), Some(Value::from("/home")));
//! ```

mod dom;
mod harness;
mod site;

pub use dom::{TestDom, TestNode};
pub use harness::{MountedSite, RenderHarness};
pub use site::{AttributeSite, BooleanSite, ChildSite, EventSite, SiteLog, SiteOp, UnknownSite};
