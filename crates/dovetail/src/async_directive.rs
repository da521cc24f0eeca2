//! Out-of-band value pushes for asynchronous directives.
//!
//! An async directive computes values after the render that installed it,
//! e.g. when a deferred result settles. [`AsyncHandle`] is its channel back
//! into the site, with one guard: the very first write always goes through
//! (the site has never rendered, so there is nothing stale to protect), and
//! every later write is dropped while the part's host node sits detached
//! from the document. Connectivity is sampled at each write; there is no
//! subscription to host tree changes. The handle holds its site weakly, so
//! an instance that outlives the engine's teardown pushes into nothing.

use crate::directive::Directive;
use dovetail_core::{BindingSite, BoundPart, SiteHandle, Value};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// A directive that keeps pushing values after its render returns.
///
/// The bridge routes the per-render commit through the handle's gate as
/// well, so render values and late pushes follow one policy.
pub trait AsyncDirective: Directive {
    /// The instance's push channel. The bridge attaches it to the site on
    /// first render.
    fn handle(&self) -> &AsyncHandle;

    /// Extension point for teardown notifications. The bridge itself never
    /// calls this; an embedding engine may.
    fn disconnected(&mut self) {}

    /// Extension point for reattachment notifications. The bridge itself
    /// never calls this; an embedding engine may.
    fn reconnected(&mut self) {}
}

#[derive(Default)]
struct HandleState {
    bound: Option<(Weak<dyn BindingSite>, Rc<BoundPart>)>,
    rendered: bool,
}

/// Shared push channel of one async directive instance.
///
/// Clones share state; the instance keeps one and moves clones into
/// whatever callbacks will push later.
#[derive(Clone, Default)]
pub struct AsyncHandle {
    inner: Rc<RefCell<HandleState>>,
}

impl AsyncHandle {
    /// Fresh, unattached handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the handle to its site and part. First call wins; later calls
    /// are ignored, so the bridge can attach on every render. The site is
    /// held weakly; the handle never extends its lifetime.
    pub fn attach(&self, site: &SiteHandle, part: Rc<BoundPart>) {
        let mut state = self.inner.borrow_mut();
        if state.bound.is_none() {
            state.bound = Some((Rc::downgrade(site), part));
        }
    }

    /// Push a value through the connectivity gate.
    ///
    /// Drops the value silently when the handle is unattached, when the
    /// engine has dropped the site, or when the site has rendered before
    /// and its host node is currently detached.
    pub fn set_value(&self, value: Value) {
        let target = {
            let mut state = self.inner.borrow_mut();
            match state.bound.clone() {
                None => {
                    debug!("value pushed before first render, dropping");
                    None
                }
                Some((site, part)) => match site.upgrade() {
                    None => {
                        trace!(kind = %part.kind(), "site dropped, discarding pushed value");
                        None
                    }
                    Some(site) => {
                        if state.rendered && !part.host_node().is_connected() {
                            trace!(
                                kind = %part.kind(),
                                "host node detached, dropping pushed value"
                            );
                            None
                        } else {
                            state.rendered = true;
                            Some(site)
                        }
                    }
                },
            }
        };
        // The gate decision is made; the legacy calls run with no borrow
        // held, so a commit may safely trigger further renders.
        if let Some(site) = target {
            site.set_value(value);
            site.commit();
        }
    }

    /// Sample the host node's connectivity. False while unattached.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner
            .borrow()
            .bound
            .as_ref()
            .is_some_and(|(_, part)| part.host_node().is_connected())
    }

    /// Whether any write has gone through yet.
    #[must_use]
    pub fn has_rendered(&self) -> bool {
        self.inner.borrow().rendered
    }
}

impl fmt::Debug for AsyncHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("AsyncHandle")
            .field("attached", &state.bound.is_some())
            .field("rendered", &state.rendered)
            .finish()
    }
}
