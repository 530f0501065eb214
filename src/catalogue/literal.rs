//! The literal instantiator: resolves one raw YAML/JSON
//! literal into a tagged [`ParameterValue`], given the [`ParameterType`]
//! it must conform to.

use crate::errors::LoadError;
use crate::model::{ParameterType, ParameterValue};
use serde_yaml::Value;

/// Resolve `raw` against `param_type`:
///
/// - a YAML integer becomes [`ParameterValue::IntLiteral`];
/// - the string `"unset"` becomes [`ParameterValue::Unset`];
/// - a string starting with an uppercase letter is looked up in the
///   enum's value list (linear scan) — missing is [`LoadError::BadEnumValue`];
/// - any other string becomes [`ParameterValue::Placeholder`].
///
/// The uppercase/lowercase distinction is the *only* rule separating an
/// enum literal from a placeholder identifier.
pub fn instantiate(param_type: &ParameterType, raw: &Value) -> Result<ParameterValue, LoadError> {
    if let Some(n) = raw.as_i64() {
        return Ok(ParameterValue::IntLiteral(n));
    }

    let s = raw.as_str().ok_or_else(|| LoadError::BadEnumValue {
        enum_name: param_type.name().to_string(),
        value: format!("{raw:?}"),
    })?;

    if s == "unset" {
        return Ok(ParameterValue::Unset);
    }

    let starts_uppercase = s.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    if !starts_uppercase {
        return Ok(ParameterValue::Placeholder(s.to_string()));
    }

    match param_type {
        ParameterType::Enum(enum_type) => match enum_type.index_of(s) {
            Some(idx) => Ok(ParameterValue::EnumLiteral(enum_type.name.clone(), idx)),
            None => Err(LoadError::BadEnumValue {
                enum_name: enum_type.name.clone(),
                value: s.to_string(),
            }),
        },
        ParameterType::Int => Err(LoadError::BadEnumValue {
            enum_name: "Int".to_string(),
            value: s.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EnumType;

    fn my_enum() -> ParameterType {
        ParameterType::Enum(EnumType::new("MyEnum", vec!["One".into(), "Two".into()]))
    }

    #[test]
    fn integer_literal() {
        let v: Value = serde_yaml::from_str("42").unwrap();
        assert_eq!(instantiate(&ParameterType::Int, &v).unwrap(), ParameterValue::IntLiteral(42));
    }

    #[test]
    fn unset_sentinel() {
        let v: Value = serde_yaml::from_str("\"unset\"").unwrap();
        assert_eq!(instantiate(&my_enum(), &v).unwrap(), ParameterValue::Unset);
    }

    #[test]
    fn enum_literal_found() {
        let v: Value = serde_yaml::from_str("\"Two\"").unwrap();
        assert_eq!(
            instantiate(&my_enum(), &v).unwrap(),
            ParameterValue::EnumLiteral("MyEnum".to_string(), 1)
        );
    }

    #[test]
    fn enum_literal_missing_is_an_error() {
        let v: Value = serde_yaml::from_str("\"Three\"").unwrap();
        assert!(instantiate(&my_enum(), &v).is_err());
    }

    #[test]
    fn lowercase_string_is_a_placeholder() {
        let v: Value = serde_yaml::from_str("\"n\"").unwrap();
        assert_eq!(
            instantiate(&ParameterType::Int, &v).unwrap(),
            ParameterValue::Placeholder("n".to_string())
        );
    }
}
