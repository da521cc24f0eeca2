//! Recording binding sites, one per part shape.
//!
//! Each site journals every `set_value`/`commit` call into a shared
//! [`SiteLog`] and models the engine's staged-write contract: `set_value`
//! stages, `commit` applies, and the keep-previous sentinel leaves the
//! applied value untouched.

use dovetail_core::{AttributeSlot, BindingSite, EventBinding, NodeHandle, SiteHandle, Value};
use std::cell::RefCell;
use std::rc::Rc;

/// One recorded call on a site.
#[derive(Debug, Clone, PartialEq)]
pub enum SiteOp {
    /// A value was staged.
    SetValue(Value),
    /// The staged value was applied.
    Commit,
}

#[derive(Debug, Default)]
struct LogInner {
    ops: Vec<SiteOp>,
    staged: Option<Value>,
    applied: Option<Value>,
    committed: Vec<Value>,
}

/// Shared journal of everything a site was asked to do.
#[derive(Debug, Clone, Default)]
pub struct SiteLog {
    inner: Rc<RefCell<LogInner>>,
}

impl SiteLog {
    /// Fresh, empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call in arrival order.
    #[must_use]
    pub fn ops(&self) -> Vec<SiteOp> {
        self.inner.borrow().ops.clone()
    }

    /// Number of `set_value` calls.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.inner
            .borrow()
            .ops
            .iter()
            .filter(|op| matches!(op, SiteOp::SetValue(_)))
            .count()
    }

    /// Number of `commit` calls.
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.inner
            .borrow()
            .ops
            .iter()
            .filter(|op| matches!(op, SiteOp::Commit))
            .count()
    }

    /// Value currently applied by the engine, if any.
    #[must_use]
    pub fn applied(&self) -> Option<Value> {
        self.inner.borrow().applied.clone()
    }

    /// Values applied at each commit, in order. Commits that applied nothing
    /// new (no staged value, or the keep-previous sentinel) record nothing.
    #[must_use]
    pub fn committed_values(&self) -> Vec<Value> {
        self.inner.borrow().committed.clone()
    }

    fn record_set(&self, value: Value) {
        let mut inner = self.inner.borrow_mut();
        inner.ops.push(SiteOp::SetValue(value.clone()));
        inner.staged = Some(value);
    }

    fn record_commit(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.ops.push(SiteOp::Commit);
        if let Some(value) = inner.staged.take() {
            if !value.is_no_change() {
                inner.applied = Some(value.clone());
                inner.committed.push(value);
            }
        }
    }
}

/// Node-position site.
pub struct ChildSite {
    anchor: NodeHandle,
    log: SiteLog,
}

impl ChildSite {
    #[must_use]
    pub fn new(anchor: NodeHandle) -> Self {
        Self {
            anchor,
            log: SiteLog::new(),
        }
    }

    #[must_use]
    pub fn log(&self) -> SiteLog {
        self.log.clone()
    }

    #[must_use]
    pub fn into_handle(self) -> SiteHandle {
        Rc::new(self)
    }
}

impl BindingSite for ChildSite {
    fn set_value(&self, value: Value) {
        self.log.record_set(value);
    }

    fn commit(&self) {
        self.log.record_commit();
    }

    fn child_anchor(&self) -> Option<NodeHandle> {
        Some(Rc::clone(&self.anchor))
    }
}

/// Event listener site.
pub struct EventSite {
    element: NodeHandle,
    event: String,
    log: SiteLog,
}

impl EventSite {
    #[must_use]
    pub fn new(element: NodeHandle, event: &str) -> Self {
        Self {
            element,
            event: event.to_string(),
            log: SiteLog::new(),
        }
    }

    #[must_use]
    pub fn log(&self) -> SiteLog {
        self.log.clone()
    }

    #[must_use]
    pub fn into_handle(self) -> SiteHandle {
        Rc::new(self)
    }
}

impl BindingSite for EventSite {
    fn set_value(&self, value: Value) {
        self.log.record_set(value);
    }

    fn commit(&self) {
        self.log.record_commit();
    }

    fn event_binding(&self) -> Option<EventBinding> {
        Some(EventBinding {
            element: Rc::clone(&self.element),
            event: self.event.clone(),
        })
    }
}

/// Truthiness-toggled attribute site.
pub struct BooleanSite {
    element: NodeHandle,
    name: String,
    strings: Rc<[String]>,
    log: SiteLog,
}

impl BooleanSite {
    #[must_use]
    pub fn new(element: NodeHandle, name: &str) -> Self {
        Self {
            element,
            name: name.to_string(),
            strings: sole_expression(),
            log: SiteLog::new(),
        }
    }

    #[must_use]
    pub fn log(&self) -> SiteLog {
        self.log.clone()
    }

    #[must_use]
    pub fn into_handle(self) -> SiteHandle {
        Rc::new(self)
    }
}

impl BindingSite for BooleanSite {
    fn set_value(&self, value: Value) {
        self.log.record_set(value);
    }

    fn commit(&self) {
        self.log.record_commit();
    }

    fn boolean_slot(&self) -> Option<AttributeSlot> {
        Some(AttributeSlot {
            element: Rc::clone(&self.element),
            name: self.name.clone(),
            strings: Rc::clone(&self.strings),
            assigns_property: false,
        })
    }
}

/// Attribute site; flips to a property site via [`assigning_property`].
///
/// [`assigning_property`]: AttributeSite::assigning_property
pub struct AttributeSite {
    element: NodeHandle,
    name: String,
    strings: Rc<[String]>,
    assigns_property: bool,
    log: SiteLog,
}

impl AttributeSite {
    /// Sole-expression attribute binding on `element`.
    #[must_use]
    pub fn new(element: NodeHandle, name: &str) -> Self {
        Self {
            element,
            name: name.to_string(),
            strings: sole_expression(),
            assigns_property: false,
            log: SiteLog::new(),
        }
    }

    /// Replace the literal fragments around the expressions.
    #[must_use]
    pub fn with_strings(mut self, strings: &[&str]) -> Self {
        self.strings = strings.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Commit to an element property instead of an attribute.
    #[must_use]
    pub fn assigning_property(mut self) -> Self {
        self.assigns_property = true;
        self
    }

    #[must_use]
    pub fn log(&self) -> SiteLog {
        self.log.clone()
    }

    #[must_use]
    pub fn into_handle(self) -> SiteHandle {
        Rc::new(self)
    }
}

impl BindingSite for AttributeSite {
    fn set_value(&self, value: Value) {
        self.log.record_set(value);
    }

    fn commit(&self) {
        self.log.record_commit();
    }

    fn attribute_slot(&self) -> Option<AttributeSlot> {
        Some(AttributeSlot {
            element: Rc::clone(&self.element),
            name: self.name.clone(),
            strings: Rc::clone(&self.strings),
            assigns_property: self.assigns_property,
        })
    }
}

/// A site that answers no shape probe, for exercising the unknown-shape path.
#[derive(Default)]
pub struct UnknownSite {
    log: SiteLog,
}

impl UnknownSite {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn log(&self) -> SiteLog {
        self.log.clone()
    }

    #[must_use]
    pub fn into_handle(self) -> SiteHandle {
        Rc::new(self)
    }
}

impl BindingSite for UnknownSite {
    fn set_value(&self, value: Value) {
        self.log.record_set(value);
    }

    fn commit(&self) {
        self.log.record_commit();
    }
}

fn sole_expression() -> Rc<[String]> {
    Rc::from(vec![String::new(), String::new()])
}
