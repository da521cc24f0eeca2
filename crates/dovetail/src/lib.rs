//! Dovetail: a directive compatibility bridge.
//!
//! Directives written against the modern binding-part model run unmodified
//! on a legacy template runtime. The bridge classifies each legacy binding
//! site once, translates it into its modern part view, keeps one directive
//! instance alive per site, and flushes computed values back through the
//! site's staged-write contract. Asynchronous directives get a push channel
//! whose writes are gated on host-node connectivity.
//!
//! Everything is single-threaded by design, matching the cooperative
//! scheduling of the host runtime; the instance cache and the directive tag
//! set are per-thread.
//!
//! # Examples
//!
//! ```
//! use dovetail::{directive, BindError, Directive, PartInfo, Value};
//! use dovetail_test::RenderHarness;
//!
//! struct Shout;
//!
//! impl Directive for Shout {
//!     fn bind(_info: &PartInfo) -> Result<Self, BindError> {
//!         Ok(Self)
//!     }
//!
//!     fn render(&mut self, args: &[Value]) -> Value {
//!         let text = args.first().and_then(Value::as_text).unwrap_or_default();
//!         Value::Text(text.to_uppercase())
//!     }
//! }
//!
//! let harness = RenderHarness::new();
//! let mounted = harness.attribute_site("div", "title");
//! harness.render(&mounted.site, &directive::<Shout>(vec![Value::from("hey")]))?;
//! assert_eq!(mounted.log.applied(), Some(Value::from("HEY")));
//! # Ok::<(), BindError>(())
//! ```

pub use dovetail_core::*;

pub mod async_directive;
pub mod cache;
pub mod directive;
pub mod factory;

pub use async_directive::{AsyncDirective, AsyncHandle};
pub use cache::CacheConfig;
pub use directive::Directive;
pub use factory::{async_directive, directive, mark_directive};
