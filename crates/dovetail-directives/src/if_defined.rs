//! Skip-absent attribute values.

use dovetail::{mark_directive, Value};

/// Commit `value` as-is, or the render-nothing sentinel when it is absent,
/// so the engine clears the attribute instead of writing a hole.
///
/// Stateless; runs in plain-function mode.
#[must_use]
pub fn if_defined(value: Value) -> Value {
    mark_directive(move |site| {
        let committed = if value.is_null() || value.is_nothing() {
            Value::Nothing
        } else {
            value.clone()
        };
        site.set_value(committed);
        site.commit();
        Ok(())
    })
}
