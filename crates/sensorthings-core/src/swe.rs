//! SWE Common data components.
//!
//! Components are JSON objects carrying a `type` discriminator. The core
//! entities do not declare them as fields; they arrive inside free-form
//! maps and are resolved on demand:
//!
//! - `Observation.parameters`, describing the conditions of a measurement
//! - the `properties` map of a `Datastream`, `Sensor` or `Thing`
//! - `taskingParameters` of a Tasking-extension `TaskingCapability`, which
//!   this crate does not model; callers pass the raw values through
//!
//! They are decoded through a [`TypeRegistry`] into [`SweComponent`] trait
//! objects. Decoding the surrounding entity never touches them, so an
//! unknown component type cannot break an otherwise valid payload.

use crate::registry::{RegistryError, TypeRegistry, DEFAULT_DISCRIMINATOR};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;

/// Fields shared by every SWE component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identifiable {
    /// Local identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-text description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// URI defining the component's meaning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// Whether the component may be omitted
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    /// Whether the value may be changed
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub updatable: bool,
}

/// A decoded SWE Common component.
pub trait SweComponent: Debug + Send + Sync {
    /// Discriminator written to the `type` property.
    fn type_name(&self) -> &'static str;

    /// Shared identifiable fields.
    fn identifiable(&self) -> &Identifiable;

    /// Current value, if any.
    fn value(&self) -> Option<Value>;

    /// JSON representation including the `type` discriminator.
    ///
    /// # Errors
    ///
    /// Returns error if the component cannot be serialized.
    fn to_json(&self) -> Result<Value, serde_json::Error>;
}

/// Unit reference of a [`Quantity`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitReference {
    /// UCUM code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Link to a unit definition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// A decimal measurement with a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quantity {
    /// Shared fields
    #[serde(flatten)]
    pub identifiable: Identifiable,
    /// Unit of measure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uom: Option<UnitReference>,
    /// Value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// An integer count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Count {
    /// Shared fields
    #[serde(flatten)]
    pub identifiable: Identifiable,
    /// Value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

/// A true/false flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Boolean {
    /// Shared fields
    #[serde(flatten)]
    pub identifiable: Identifiable,
    /// Value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<bool>,
}

/// Free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Text {
    /// Shared fields
    #[serde(flatten)]
    pub identifiable: Identifiable,
    /// Value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A term from a code space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    /// Shared fields
    #[serde(flatten)]
    pub identifiable: Identifiable,
    /// Dictionary the value is taken from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_space: Option<String>,
    /// Value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

fn with_discriminator<T: Serialize>(name: &str, component: &T) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(component)?;
    if let Value::Object(object) = &mut value {
        object.insert(DEFAULT_DISCRIMINATOR.to_string(), Value::String(name.to_string()));
    }
    Ok(value)
}

macro_rules! swe_component {
    ($ty:ident) => {
        impl SweComponent for $ty {
            fn type_name(&self) -> &'static str {
                stringify!($ty)
            }

            fn identifiable(&self) -> &Identifiable {
                &self.identifiable
            }

            fn value(&self) -> Option<Value> {
                self.value.clone().map(Value::from)
            }

            fn to_json(&self) -> Result<Value, serde_json::Error> {
                with_discriminator(self.type_name(), self)
            }
        }
    };
}

swe_component!(Quantity);
swe_component!(Count);
swe_component!(Boolean);
swe_component!(Text);
swe_component!(Category);

fn boxed<T>(value: Value) -> Result<Box<dyn SweComponent>, serde_json::Error>
where
    T: SweComponent + serde::de::DeserializeOwned + 'static,
{
    Ok(Box::new(serde_json::from_value::<T>(value)?))
}

/// Registry resolving every built-in component by its `type`.
///
/// # Errors
///
/// Returns error if registration or validation fails.
pub fn registry() -> Result<TypeRegistry<Box<dyn SweComponent>>, RegistryError> {
    let mut registry = TypeRegistry::default();
    registry.register("Quantity", boxed::<Quantity>)?;
    registry.register("Count", boxed::<Count>)?;
    registry.register("Boolean", boxed::<Boolean>)?;
    registry.register("Text", boxed::<Text>)?;
    registry.register("Category", boxed::<Category>)?;
    registry.validate()?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resolves_quantity_with_shared_fields() {
        let registry = registry().unwrap();
        let component = registry
            .resolve(json!({
                "type": "Quantity",
                "label": "Air temperature",
                "definition": "http://mmisw.org/ont/cf/parameter/air_temperature",
                "uom": {"code": "Cel"},
                "value": 21.5,
                "optional": true
            }))
            .unwrap();

        assert_eq!(component.type_name(), "Quantity");
        assert_eq!(
            component.identifiable().label.as_deref(),
            Some("Air temperature")
        );
        assert!(component.identifiable().optional);
        assert!(!component.identifiable().updatable);
        assert_eq!(component.value(), Some(json!(21.5)));
    }

    #[test]
    fn to_json_writes_discriminator() {
        let category = Category {
            identifiable: Identifiable {
                id: Some("weather".to_string()),
                ..Identifiable::default()
            },
            code_space: Some("http://x/codes".to_string()),
            value: Some("rain".to_string()),
        };

        assert_eq!(
            category.to_json().unwrap(),
            json!({
                "type": "Category",
                "id": "weather",
                "codeSpace": "http://x/codes",
                "value": "rain"
            })
        );
    }

    #[test]
    fn every_builtin_is_registered() {
        let registry = registry().unwrap();
        for name in ["Quantity", "Count", "Boolean", "Text", "Category"] {
            let component = registry.resolve(json!({"type": name})).unwrap();
            assert_eq!(component.type_name(), name);
            assert_eq!(component.value(), None);
        }
    }

    #[test]
    fn resolves_components_from_observation_parameters() {
        let observation = crate::codec::decode::<crate::model::Observation>(json!({
            "@iot.id": 1,
            "result": 3,
            "parameters": {
                "depth": {"type": "Quantity", "uom": {"code": "m"}, "value": 2.5},
                "method": {"type": "Category", "value": "grab sample"},
                "note": "plain value"
            }
        }))
        .unwrap()
        .entity;

        let registry = registry().unwrap();
        let parameters = observation.parameters.unwrap();

        let depth = registry.resolve(parameters["depth"].clone()).unwrap();
        assert_eq!(depth.type_name(), "Quantity");
        assert_eq!(depth.value(), Some(json!(2.5)));

        let method = registry.resolve(parameters["method"].clone()).unwrap();
        assert_eq!(method.value(), Some(json!("grab sample")));

        assert!(registry.resolve(parameters["note"].clone()).is_err());
    }

    #[test]
    fn unknown_component_is_rejected() {
        let registry = registry().unwrap();
        assert_eq!(
            registry.resolve(json!({"type": "Vector"})).unwrap_err(),
            RegistryError::UnknownType("Vector".to_string())
        );
    }

    #[test]
    fn wrongly_typed_value_is_a_factory_error() {
        let registry = registry().unwrap();
        let err = registry
            .resolve(json!({"type": "Count", "value": "many"}))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Factory { discriminator, .. } if discriminator == "Count"));
    }
}
