//! The stateful directive contract.

use dovetail_core::{BindError, BoundPart, PartInfo, Value};

/// A directive with per-site state.
///
/// One instance lives per binding site, constructed on the first render
/// through [`bind`](Self::bind) and reused for every render after it. The
/// bridge drives [`update`](Self::update) each render and commits whatever
/// it returns through the site, so returning [`Value::NoChange`] is how an
/// instance declines to touch the applied value.
pub trait Directive: 'static {
    /// Construct the instance for a freshly translated site.
    ///
    /// Runs at most once per site, inside the bridge's bookkeeping, and must
    /// not trigger rendering. Reject unsuitable parts here with
    /// [`BindError::WrongPart`].
    ///
    /// # Errors
    ///
    /// Returns [`BindError::WrongPart`] when the directive cannot drive the
    /// described part.
    fn bind(info: &PartInfo) -> Result<Self, BindError>
    where
        Self: Sized;

    /// Compute the value to commit for this render.
    fn render(&mut self, args: &[Value]) -> Value;

    /// Per-render hook with access to the translated part. The default
    /// delegates to [`render`](Self::render); override it to inspect part
    /// metadata or write through the part directly.
    fn update(&mut self, part: &BoundPart, args: &[Value]) -> Value {
        let _ = part;
        self.render(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dovetail_core::{translate, BindingSite, NodeHandle, SiteHandle};
    use std::rc::Rc;

    struct Plain;

    impl Directive for Plain {
        fn bind(_info: &PartInfo) -> Result<Self, BindError> {
            Ok(Self)
        }

        fn render(&mut self, args: &[Value]) -> Value {
            args.first().cloned().unwrap_or(Value::Null)
        }
    }

    struct NullAnchor;

    impl dovetail_core::HostNode for NullAnchor {
        fn is_connected(&self) -> bool {
            true
        }

        fn tag_name(&self) -> &str {
            "div"
        }
    }

    struct BareChildSite;

    impl BindingSite for BareChildSite {
        fn set_value(&self, _value: Value) {}

        fn commit(&self) {}

        fn child_anchor(&self) -> Option<NodeHandle> {
            Some(Rc::new(NullAnchor))
        }
    }

    #[test]
    fn test_update_defaults_to_render() {
        let site: SiteHandle = Rc::new(BareChildSite);
        let part = translate(&site).unwrap();
        let mut directive = Plain::bind(&part.info()).unwrap();
        let args = [Value::from(9)];
        assert_eq!(directive.update(&part, &args), Value::Int(9));
        assert_eq!(directive.render(&args), Value::Int(9));
    }
}
