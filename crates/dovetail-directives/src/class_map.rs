//! Conditional class list assembly.

use crate::require_sole_attribute;
use dovetail::{directive, BindError, Directive, PartInfo, Value};

/// Join the enabled class names, in argument order, into one attribute
/// value. Re-renders that produce the same list return the keep-previous
/// sentinel, so the engine never rewrites an unchanged attribute.
///
/// Binds only to the sole expression of a `class` attribute.
#[must_use]
pub fn class_map(classes: &[(&str, bool)]) -> Value {
    let pairs = classes
        .iter()
        .map(|(name, on)| Value::List(vec![Value::from(*name), Value::from(*on)]))
        .collect();
    directive::<ClassMap>(vec![Value::List(pairs)])
}

struct ClassMap {
    previous: Option<String>,
}

impl Directive for ClassMap {
    fn bind(info: &PartInfo) -> Result<Self, BindError> {
        require_sole_attribute("class_map", "class", info)?;
        Ok(Self { previous: None })
    }

    fn render(&mut self, args: &[Value]) -> Value {
        let rendered = decode(args)
            .into_iter()
            .filter(|(_, on)| *on)
            .map(|(name, _)| name)
            .collect::<Vec<_>>()
            .join(" ");
        if self.previous.as_deref() == Some(rendered.as_str()) {
            return Value::NoChange;
        }
        self.previous = Some(rendered.clone());
        Value::Text(rendered)
    }
}

fn decode(args: &[Value]) -> Vec<(String, bool)> {
    args.first()
        .and_then(Value::as_list)
        .map(|pairs| {
            pairs
                .iter()
                .filter_map(|pair| {
                    let items = pair.as_list()?;
                    let name = items.first()?.as_text()?;
                    let on = items.get(1)?.as_bool()?;
                    Some((name.to_string(), on))
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dovetail::{cache, BindError};
    use dovetail_test::RenderHarness;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_joins_enabled_classes_in_order() {
        let harness = RenderHarness::new();
        let mounted = harness.attribute_site("div", "class");
        harness
            .render(
                &mounted.site,
                &class_map(&[("card", true), ("hidden", false), ("wide", true)]),
            )
            .unwrap();
        assert_eq!(mounted.log.applied(), Some(Value::from("card wide")));
    }

    #[test]
    fn test_unchanged_list_returns_no_change() {
        let harness = RenderHarness::new();
        let mounted = harness.attribute_site("div", "class");
        for _ in 0..2 {
            harness
                .render(&mounted.site, &class_map(&[("open", true)]))
                .unwrap();
        }
        // Two renders, one applied value: the second commit carried the
        // keep-previous sentinel.
        assert_eq!(mounted.log.set_count(), 2);
        assert_eq!(mounted.log.committed_values(), vec![Value::from("open")]);

        harness
            .render(&mounted.site, &class_map(&[("open", false)]))
            .unwrap();
        assert_eq!(
            mounted.log.committed_values(),
            vec![Value::from("open"), Value::from("")]
        );
    }

    #[test]
    fn test_rejects_non_class_attributes() {
        cache::clear();
        let harness = RenderHarness::new();
        let mounted = harness.attribute_site("div", "id");
        let err = harness
            .render(&mounted.site, &class_map(&[("open", true)]))
            .unwrap_err();
        assert!(matches!(
            err,
            BindError::WrongPart {
                directive: "class_map",
                ..
            }
        ));
        assert_eq!(mounted.log.set_count(), 0);
        assert_eq!(cache::len(), 0);
    }

    #[test]
    fn test_rejects_property_and_child_shapes() {
        let harness = RenderHarness::new();
        let property = harness.property_site("div", "class");
        assert!(harness
            .render(&property.site, &class_map(&[("open", true)]))
            .is_err());

        let child = harness.child_site("div");
        assert!(harness
            .render(&child.site, &class_map(&[("open", true)]))
            .is_err());
    }
}
