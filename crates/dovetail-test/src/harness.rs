//! Render harness.
//!
//! Plays the engine's role at a single binding site: fabricates sites bound
//! to a fake document, and dispatches values the way the engine does, i.e.
//! executes tagged directive functions and commits everything else as data.

use crate::dom::{TestDom, TestNode};
use crate::site::{AttributeSite, BooleanSite, ChildSite, EventSite, SiteLog};
use dovetail_core::{is_directive, BindError, SiteHandle, Value};
use std::rc::Rc;

/// A fabricated site together with its journal and host element.
pub struct MountedSite {
    /// The erased site handle the bridge sees.
    pub site: SiteHandle,
    /// Journal shared with the site.
    pub log: SiteLog,
    /// Element the site is bound to.
    pub node: Rc<TestNode>,
}

/// Engine stand-in owning a [`TestDom`].
pub struct RenderHarness {
    dom: TestDom,
}

impl RenderHarness {
    /// Harness over a fresh document.
    #[must_use]
    pub fn new() -> Self {
        Self { dom: TestDom::new() }
    }

    /// The underlying document.
    #[must_use]
    pub fn dom(&self) -> &TestDom {
        &self.dom
    }

    /// Dispatch one value at one site: tagged directives run, everything
    /// else is committed as data.
    ///
    /// # Errors
    ///
    /// Propagates the directive's failure, if it was one and it failed.
    pub fn render(&self, site: &SiteHandle, value: &Value) -> Result<(), BindError> {
        if is_directive(value) {
            if let Some(run) = value.as_directive() {
                return run.invoke(site);
            }
        }
        site.set_value(value.clone());
        site.commit();
        Ok(())
    }

    /// Attribute site on a fresh connected element.
    #[must_use]
    pub fn attribute_site(&self, tag: &str, name: &str) -> MountedSite {
        let node = self.mount(tag);
        let site = AttributeSite::new(node.handle(), name);
        let log = site.log();
        MountedSite {
            site: site.into_handle(),
            log,
            node,
        }
    }

    /// Property site on a fresh connected element.
    #[must_use]
    pub fn property_site(&self, tag: &str, name: &str) -> MountedSite {
        let node = self.mount(tag);
        let site = AttributeSite::new(node.handle(), name).assigning_property();
        let log = site.log();
        MountedSite {
            site: site.into_handle(),
            log,
            node,
        }
    }

    /// Boolean-attribute site on a fresh connected element.
    #[must_use]
    pub fn boolean_site(&self, tag: &str, name: &str) -> MountedSite {
        let node = self.mount(tag);
        let site = BooleanSite::new(node.handle(), name);
        let log = site.log();
        MountedSite {
            site: site.into_handle(),
            log,
            node,
        }
    }

    /// Event site on a fresh connected element.
    #[must_use]
    pub fn event_site(&self, tag: &str, event: &str) -> MountedSite {
        let node = self.mount(tag);
        let site = EventSite::new(node.handle(), event);
        let log = site.log();
        MountedSite {
            site: site.into_handle(),
            log,
            node,
        }
    }

    /// Child (node-position) site anchored at a fresh connected element.
    #[must_use]
    pub fn child_site(&self, tag: &str) -> MountedSite {
        let node = self.mount(tag);
        let site = ChildSite::new(node.handle());
        let log = site.log();
        MountedSite {
            site: site.into_handle(),
            log,
            node,
        }
    }

    /// Detach a mounted site's element from the document.
    pub fn detach(&self, mounted: &MountedSite) {
        self.dom.remove(&mounted.node);
    }

    /// Reattach a mounted site's element under the document root.
    pub fn reattach(&self, mounted: &MountedSite) {
        self.dom.append_child(&self.dom.root(), &mounted.node);
    }

    fn mount(&self, tag: &str) -> Rc<TestNode> {
        let node = self.dom.create_element(tag);
        self.dom.append_child(&self.dom.root(), &node);
        node
    }
}

impl Default for RenderHarness {
    fn default() -> Self {
        Self::new()
    }
}
