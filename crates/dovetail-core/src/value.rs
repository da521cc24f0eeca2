//! Dynamic values a template expression can produce.
//!
//! [`Value`] is the closed set of things that flow into binding sites: plain
//! data, the render sentinels, event listeners, directive functions, and
//! opaque application objects. The bridge forwards the sentinels
//! ([`Value::Nothing`], [`Value::NoChange`]) blindly; interpreting them is
//! the rendering engine's business.
//!
//! # Examples
//!
//! ```
//! use dovetail_core::Value;
//!
//! let value = Value::from("hello");
//! assert_eq!(value.as_text(), Some("hello"));
//! assert_eq!(Value::from(3), Value::Int(3));
//! assert!(Value::Nothing.is_nothing());
//! ```

use crate::error::BindError;
use crate::site::SiteHandle;
use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};

/// A dynamic template value.
///
/// Data variants compare structurally. The closure-bearing variants
/// ([`Listener`], [`DirectiveFn`], [`OpaqueHandle`]) compare by pointer
/// identity, so clones of the same handle stay equal while independently
/// built twins do not.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value.
    Null,
    /// Render-nothing sentinel: committing it clears the binding.
    Nothing,
    /// Keep-previous sentinel: committing it leaves the applied value alone.
    NoChange,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Owned text.
    Text(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Event listener; invoked by the engine, never by the bridge.
    Listener(Listener),
    /// Directive function (see [`crate::is_directive`] for recognition).
    Directive(DirectiveFn),
    /// Opaque application object riding through the template untouched.
    Opaque(OpaqueHandle),
}

impl Value {
    /// True for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for the render-nothing sentinel.
    #[must_use]
    pub const fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    /// True for the keep-previous sentinel.
    #[must_use]
    pub const fn is_no_change(&self) -> bool {
        matches!(self, Self::NoChange)
    }

    /// Boolean payload, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer payload, if any.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Float payload, if any.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Text payload, if any.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// List payload, if any.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Listener payload, if any.
    #[must_use]
    pub const fn as_listener(&self) -> Option<&Listener> {
        match self {
            Self::Listener(listener) => Some(listener),
            _ => None,
        }
    }

    /// Directive function payload, if any. Presence of the variant says
    /// nothing about tagging; ask [`crate::is_directive`] for that.
    #[must_use]
    pub const fn as_directive(&self) -> Option<&DirectiveFn> {
        match self {
            Self::Directive(fun) => Some(fun),
            _ => None,
        }
    }

    /// Opaque payload, if any.
    #[must_use]
    pub const fn as_opaque(&self) -> Option<&OpaqueHandle> {
        match self {
            Self::Opaque(handle) => Some(handle),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

/// Event listener handle.
///
/// The bridge treats listeners as opaque data; only the engine invokes them
/// when the bound event fires.
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&Value)>);

impl Listener {
    /// Wrap a handler closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&Value) + 'static,
    {
        Self(Rc::new(handler))
    }

    /// Invoke the handler with an event payload.
    pub fn invoke(&self, event: &Value) {
        (self.0)(event);
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:#x})", self.addr())
    }
}

/// Signature of a bound directive body: invoked by the engine with the
/// legacy binding site the value landed on.
pub(crate) type DirectiveClosure = dyn Fn(&SiteHandle) -> Result<(), BindError>;

/// A directive function value.
///
/// Wraps the closure the engine will call when the value reaches a binding
/// site. Identity is the closure allocation: cloning preserves it, so a
/// tagged directive stays recognizable through clones.
#[derive(Clone)]
pub struct DirectiveFn(Rc<DirectiveClosure>);

impl DirectiveFn {
    /// Wrap a directive body.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&SiteHandle) -> Result<(), BindError> + 'static,
    {
        Self(Rc::new(run))
    }

    /// Run the directive against a binding site.
    ///
    /// # Errors
    ///
    /// Propagates whatever the directive body reports, typically
    /// [`BindError::UnknownPartType`] or [`BindError::WrongPart`].
    pub fn invoke(&self, site: &SiteHandle) -> Result<(), BindError> {
        (self.0)(site)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }

    pub(crate) fn downgrade(&self) -> Weak<DirectiveClosure> {
        Rc::downgrade(&self.0)
    }
}

impl PartialEq for DirectiveFn {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl fmt::Debug for DirectiveFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DirectiveFn({:#x})", self.addr())
    }
}

/// Shared handle to an arbitrary application object.
#[derive(Clone)]
pub struct OpaqueHandle(Rc<dyn Any>);

impl OpaqueHandle {
    /// Wrap a value.
    pub fn new<T: 'static>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Borrow the wrapped value if it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.downcast_ref()
    }

    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl PartialEq for OpaqueHandle {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl fmt::Debug for OpaqueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpaqueHandle({:#x})", self.addr())
    }
}
