//! Dependency-gated re-rendering.

use dovetail::{directive, BindError, Directive, PartInfo, Value};

/// Commit `value` only when `deps` differs from the previous render.
///
/// Comparison is structural, so a `deps` of `Value::List` re-renders
/// when any element changes. Works on every part shape.
#[must_use]
pub fn guard(deps: Value, value: Value) -> Value {
    directive::<Guard>(vec![deps, value])
}

struct Guard {
    previous: Option<Value>,
}

impl Directive for Guard {
    fn bind(_info: &PartInfo) -> Result<Self, BindError> {
        Ok(Self { previous: None })
    }

    fn render(&mut self, args: &[Value]) -> Value {
        let deps = args.first().cloned().unwrap_or(Value::Null);
        if self.previous.as_ref() == Some(&deps) {
            return Value::NoChange;
        }
        self.previous = Some(deps);
        args.get(1).cloned().unwrap_or(Value::Null)
    }
}
