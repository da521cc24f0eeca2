//! Stock directives.
//!
//! The directives templates reach for most: conditional attribute values,
//! class and style assembly with keep-previous deduplication, dependency
//! guarding, and deferred content.
//!
//! # Examples
//!
//! ```
//! use dovetail::Value;
//! use dovetail_directives::class_map;
//! use dovetail_test::RenderHarness;
//!
//! let harness = RenderHarness::new();
//! let mounted = harness.attribute_site("div", "class");
//! harness.render(
//!     &mounted.site,
//!     &class_map(&[("open", true), ("hidden", false)]),
//! )?;
//! assert_eq!(mounted.log.applied(), Some(Value::from("open")));
//! # Ok::<(), dovetail::BindError>(())
//! ```

use dovetail::{BindError, PartInfo, PartKind};

mod class_map;
mod guard;
mod if_defined;
mod style_map;
mod until;

pub use class_map::class_map;
pub use guard::guard;
pub use if_defined::if_defined;
pub use style_map::style_map;
pub use until::{until, Deferred};

/// Human-readable shape of a part, for error messages.
fn describe(info: &PartInfo) -> String {
    match info {
        PartInfo::Child(_) => "a child position".to_string(),
        PartInfo::Attribute(attr) => {
            format!("{} \"{}\" on <{}>", attr.kind, attr.name, attr.tag_name)
        }
    }
}

/// Accept only a sole-expression attribute binding with the given name.
fn require_sole_attribute(
    directive: &'static str,
    name: &str,
    info: &PartInfo,
) -> Result<(), BindError> {
    if let PartInfo::Attribute(attr) = info {
        if attr.kind == PartKind::Attribute
            && attr.name == name
            && attr.strings.len() == 2
            && attr.strings.iter().all(String::is_empty)
        {
            return Ok(());
        }
    }
    Err(BindError::WrongPart {
        directive,
        expected: format!("the sole expression of a \"{name}\" attribute"),
        found: describe(info),
    })
}
