//! Inline style assembly.

use crate::require_sole_attribute;
use dovetail::{directive, BindError, Directive, PartInfo, Value};

/// Join `(property, value)` pairs into an inline style string, `"; "`
/// separated, with keep-previous deduplication across re-renders.
///
/// Binds only to the sole expression of a `style` attribute.
#[must_use]
pub fn style_map(styles: &[(&str, &str)]) -> Value {
    let pairs = styles
        .iter()
        .map(|(name, value)| Value::List(vec![Value::from(*name), Value::from(*value)]))
        .collect();
    directive::<StyleMap>(vec![Value::List(pairs)])
}

struct StyleMap {
    previous: Option<String>,
}

impl Directive for StyleMap {
    fn bind(info: &PartInfo) -> Result<Self, BindError> {
        require_sole_attribute("style_map", "style", info)?;
        Ok(Self { previous: None })
    }

    fn render(&mut self, args: &[Value]) -> Value {
        let rendered = decode(args)
            .into_iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        if self.previous.as_deref() == Some(rendered.as_str()) {
            return Value::NoChange;
        }
        self.previous = Some(rendered.clone());
        Value::Text(rendered)
    }
}

fn decode(args: &[Value]) -> Vec<(String, String)> {
    args.first()
        .and_then(Value::as_list)
        .map(|pairs| {
            pairs
                .iter()
                .filter_map(|pair| {
                    let items = pair.as_list()?;
                    let name = items.first()?.as_text()?;
                    let value = items.get(1)?.as_text()?;
                    Some((name.to_string(), value.to_string()))
                })
                .collect()
        })
        .unwrap_or_default()
}
