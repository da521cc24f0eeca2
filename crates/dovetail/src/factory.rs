//! Factory entry points.
//!
//! Three ways to turn directive logic into a template value:
//!
//! - [`mark_directive`] wraps a plain closure; it re-runs from scratch on
//!   every render and keeps no per-site state.
//! - [`directive`] wraps a [`Directive`] type; the bridge keeps one instance
//!   per binding site and commits each render's value through the site.
//! - [`async_directive`] additionally wires the instance's [`AsyncHandle`]
//!   so the per-render commit and any later pushes share one connectivity
//!   policy.

use crate::async_directive::AsyncDirective;
use crate::cache;
use crate::directive::Directive;
use dovetail_core::{tag, BindError, DirectiveFn, SiteHandle, Value};
use std::rc::Rc;

/// Tag a plain closure as a directive value.
pub fn mark_directive<F>(run: F) -> Value
where
    F: Fn(&SiteHandle) -> Result<(), BindError> + 'static,
{
    let fun = DirectiveFn::new(run);
    tag(&fun);
    Value::Directive(fun)
}

/// Wrap a stateful directive invocation into a template value.
///
/// The returned value, when rendered at a site, looks up (or constructs)
/// the site's `D` instance, runs [`Directive::update`] with `args`, and
/// commits the result through the site.
pub fn directive<D: Directive>(args: Vec<Value>) -> Value {
    mark_directive(move |site: &SiteHandle| {
        let (part, instance) = cache::fetch_or_insert::<D>(site)?;
        let value = instance.borrow_mut().update(&part, &args);
        site.set_value(value);
        site.commit();
        Ok(())
    })
}

/// Like [`directive`], for directives that keep pushing values after the
/// render. The per-render value is routed through the instance's
/// [`AsyncHandle`] instead of being committed directly.
pub fn async_directive<D: AsyncDirective>(args: Vec<Value>) -> Value {
    mark_directive(move |site: &SiteHandle| {
        let (part, instance) = cache::fetch_or_insert::<D>(site)?;
        let handle = instance.borrow().handle().clone();
        handle.attach(site, Rc::clone(&part));
        let value = instance.borrow_mut().update(&part, &args);
        handle.set_value(value);
        Ok(())
    })
}
