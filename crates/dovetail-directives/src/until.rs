//! Placeholder rendering for eventually-available values.

use dovetail::{
    async_directive, AsyncDirective, AsyncHandle, BindError, Directive, OpaqueHandle, PartInfo,
    Value,
};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Waker = Box<dyn FnOnce(&Value)>;
type WatchHandle = Weak<RefCell<DeferredInner>>;

/// A value that settles once, later.
///
/// Stands in for whatever async machinery the application uses: the
/// application resolves it from its own event loop, and any [`until`]
/// renders watching it pick the value up.
///
/// # Examples
///
/// ```
/// use dovetail::Value;
/// use dovetail_directives::Deferred;
///
/// let deferred = Deferred::new();
/// assert!(!deferred.is_settled());
/// deferred.resolve(Value::from("ready"));
/// deferred.resolve(Value::from("too late"));
/// assert_eq!(deferred.settled(), Some(Value::from("ready")));
/// ```
#[derive(Clone, Default)]
pub struct Deferred {
    inner: Rc<RefCell<DeferredInner>>,
}

#[derive(Default)]
struct DeferredInner {
    settled: Option<Value>,
    wakers: Vec<Waker>,
}

impl Deferred {
    /// New unsettled deferred.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Settle with `value` and run pending wakers. First resolution wins;
    /// later calls are ignored.
    pub fn resolve(&self, value: Value) {
        let wakers = {
            let mut inner = self.inner.borrow_mut();
            if inner.settled.is_some() {
                return;
            }
            inner.settled = Some(value.clone());
            std::mem::take(&mut inner.wakers)
        };
        // Wakers run after the borrow ends so they may inspect the deferred.
        for waker in wakers {
            waker(&value);
        }
    }

    /// The settled value, if any.
    #[must_use]
    pub fn settled(&self) -> Option<Value> {
        self.inner.borrow().settled.clone()
    }

    /// True once [`Deferred::resolve`] has run.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.inner.borrow().settled.is_some()
    }

    /// Run `waker` with the settled value, now if already settled, otherwise
    /// at resolution time.
    pub fn on_resolve(&self, waker: impl FnOnce(&Value) + 'static) {
        let settled = self.inner.borrow().settled.clone();
        if let Some(value) = settled {
            waker(&value);
            return;
        }
        self.inner.borrow_mut().wakers.push(Box::new(waker));
    }

    // The weak handle doubles as the watch identity: it pins the allocation,
    // so the address cannot be reused by a later deferred.
    fn downgrade(&self) -> WatchHandle {
        Rc::downgrade(&self.inner)
    }
}

impl PartialEq for Deferred {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Deferred")
            .field("settled", &inner.settled)
            .field("wakers", &inner.wakers.len())
            .finish()
    }
}

/// Show `placeholder` until `deferred` settles, then push the settled value
/// into the part.
///
/// The push rides the async bridge, so it is dropped while the host node is
/// detached; a later re-render while attached commits the settled value
/// directly. Works on every part shape.
#[must_use]
pub fn until(deferred: &Deferred, placeholder: Value) -> Value {
    async_directive::<Until>(vec![
        Value::Opaque(OpaqueHandle::new(deferred.clone())),
        placeholder,
    ])
}

struct Until {
    handle: AsyncHandle,
    watched: Rc<RefCell<Option<WatchHandle>>>,
}

impl Directive for Until {
    fn bind(_info: &PartInfo) -> Result<Self, BindError> {
        Ok(Self {
            handle: AsyncHandle::new(),
            watched: Rc::new(RefCell::new(None)),
        })
    }

    fn render(&mut self, args: &[Value]) -> Value {
        let placeholder = args.get(1).cloned().unwrap_or(Value::Nothing);
        let Some(deferred) = args
            .first()
            .and_then(Value::as_opaque)
            .and_then(|handle| handle.downcast_ref::<Deferred>().cloned())
        else {
            return placeholder;
        };
        let key = deferred.downgrade();
        if let Some(value) = deferred.settled() {
            *self.watched.borrow_mut() = Some(key);
            return value;
        }
        let watching = self
            .watched
            .borrow()
            .as_ref()
            .is_some_and(|watched| watched.ptr_eq(&key));
        if !watching {
            *self.watched.borrow_mut() = Some(key.clone());
            let handle = self.handle.clone();
            let watched = Rc::clone(&self.watched);
            // A superseded deferred's waker must not clobber the current one.
            deferred.on_resolve(move |value| {
                let current = watched
                    .borrow()
                    .as_ref()
                    .is_some_and(|live| live.ptr_eq(&key));
                if current {
                    handle.set_value(value.clone());
                }
            });
        }
        placeholder
    }
}

impl AsyncDirective for Until {
    fn handle(&self) -> &AsyncHandle {
        &self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dovetail_test::RenderHarness;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    #[test]
    fn test_pending_deferred_commits_placeholder() {
        let harness = RenderHarness::new();
        let mounted = harness.child_site("section");
        let deferred = Deferred::new();
        harness
            .render(&mounted.site, &until(&deferred, Value::from("loading")))
            .unwrap();
        assert_eq!(mounted.log.applied(), Some(Value::from("loading")));
    }

    #[test]
    fn test_resolution_pushes_the_settled_value() {
        let harness = RenderHarness::new();
        let mounted = harness.child_site("section");
        let deferred = Deferred::new();
        harness
            .render(&mounted.site, &until(&deferred, Value::from("loading")))
            .unwrap();
        deferred.resolve(Value::from("ready"));
        assert_eq!(
            mounted.log.committed_values(),
            vec![Value::from("loading"), Value::from("ready")]
        );
    }

    #[test]
    fn test_settled_deferred_renders_the_value_directly() {
        let harness = RenderHarness::new();
        let mounted = harness.child_site("section");
        let deferred = Deferred::new();
        deferred.resolve(Value::from("ready"));
        harness
            .render(&mounted.site, &until(&deferred, Value::from("loading")))
            .unwrap();
        assert_eq!(mounted.log.committed_values(), vec![Value::from("ready")]);
    }

    #[test]
    fn test_waker_registered_once_per_deferred() {
        let harness = RenderHarness::new();
        let mounted = harness.child_site("section");
        let deferred = Deferred::new();
        for _ in 0..2 {
            harness
                .render(&mounted.site, &until(&deferred, Value::from("loading")))
                .unwrap();
        }
        deferred.resolve(Value::from("ready"));
        assert_eq!(
            mounted.log.committed_values(),
            vec![
                Value::from("loading"),
                Value::from("loading"),
                Value::from("ready")
            ]
        );
    }

    #[test]
    fn test_detached_resolution_is_dropped_until_rerender() {
        let harness = RenderHarness::new();
        let mounted = harness.child_site("section");
        let deferred = Deferred::new();
        let placeholder = Value::from("loading");
        harness
            .render(&mounted.site, &until(&deferred, placeholder.clone()))
            .unwrap();
        harness.detach(&mounted);
        deferred.resolve(Value::from("ready"));
        assert_eq!(mounted.log.committed_values(), vec![placeholder.clone()]);
        harness.reattach(&mounted);
        harness
            .render(&mounted.site, &until(&deferred, placeholder.clone()))
            .unwrap();
        assert_eq!(
            mounted.log.committed_values(),
            vec![placeholder, Value::from("ready")]
        );
    }

    #[test]
    fn test_replaced_deferred_resolution_is_ignored() {
        let harness = RenderHarness::new();
        let mounted = harness.child_site("section");
        let first = Deferred::new();
        let second = Deferred::new();
        harness
            .render(&mounted.site, &until(&first, Value::from("loading")))
            .unwrap();
        harness
            .render(&mounted.site, &until(&second, Value::from("loading")))
            .unwrap();
        first.resolve(Value::from("stale"));
        second.resolve(Value::from("fresh"));
        assert_eq!(
            mounted.log.committed_values(),
            vec![
                Value::from("loading"),
                Value::from("loading"),
                Value::from("fresh")
            ]
        );
    }

    #[test]
    fn test_deferred_rendered_after_a_drop_is_watched() {
        let harness = RenderHarness::new();
        let mounted = harness.child_site("section");
        let first = Deferred::new();
        harness
            .render(&mounted.site, &until(&first, Value::from("loading")))
            .unwrap();
        drop(first);

        // A dropped deferred's identity must never be mistaken for a fresh
        // one, even when the allocator recycles its address.
        let second = Deferred::new();
        harness
            .render(&mounted.site, &until(&second, Value::from("loading")))
            .unwrap();
        second.resolve(Value::from("ready"));
        assert_eq!(
            mounted.log.committed_values(),
            vec![
                Value::from("loading"),
                Value::from("loading"),
                Value::from("ready")
            ]
        );
    }

    #[test]
    fn test_on_resolve_after_settlement_runs_immediately() {
        let deferred = Deferred::new();
        deferred.resolve(Value::from(5));
        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        deferred.on_resolve(move |value| sink.set(value.as_int()));
        assert_eq!(seen.get(), Some(5));
    }

    #[test]
    fn test_resolve_is_first_wins() {
        let deferred = Deferred::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        deferred.on_resolve(move |_| counter.set(counter.get() + 1));
        deferred.resolve(Value::from(1));
        deferred.resolve(Value::from(2));
        assert_eq!(deferred.settled(), Some(Value::from(1)));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_works_on_attribute_parts() {
        let harness = RenderHarness::new();
        let mounted = harness.attribute_site("img", "src");
        let deferred = Deferred::new();
        harness
            .render(&mounted.site, &until(&deferred, Value::from("spinner.gif")))
            .unwrap();
        deferred.resolve(Value::from("photo.jpg"));
        assert_eq!(mounted.log.applied(), Some(Value::from("photo.jpg")));
    }
}
