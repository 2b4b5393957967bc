//! Type conversions from DynamoDB AttributeValue to JSON.

use aws_sdk_dynamodb::types::AttributeValue;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Number, Value};

use crate::errors::StoreError;
use crate::scan_operations::Item;

/// Convert a scanned item to a JSON object.
///
/// Keys come out sorted, so the same item always renders the same way.
pub fn item_to_json(item: Item) -> Result<Value, StoreError> {
    let map = item
        .into_iter()
        .map(|(key, value)| Ok((key, attribute_value_to_json(value)?)))
        .collect::<Result<Map<String, Value>, StoreError>>()?;
    Ok(Value::Object(map))
}

/// Convert one AttributeValue to its natural JSON shape.
///
/// Binary values become base64 strings. Sets become arrays. A variant this
/// SDK version does not know is an error rather than a silent `null`.
pub fn attribute_value_to_json(value: AttributeValue) -> Result<Value, StoreError> {
    let json = match value {
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => number_to_json(n),
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(b) => Value::String(STANDARD.encode(b.as_ref())),
        AttributeValue::L(list) => Value::Array(
            list.into_iter()
                .map(attribute_value_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| Ok((k, attribute_value_to_json(v)?)))
                .collect::<Result<Map<String, Value>, StoreError>>()?,
        ),
        AttributeValue::Ss(ss) => Value::Array(ss.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(ns) => Value::Array(ns.into_iter().map(number_to_json).collect()),
        AttributeValue::Bs(bs) => Value::Array(
            bs.into_iter()
                .map(|b| Value::String(STANDARD.encode(b.as_ref())))
                .collect(),
        ),
        other => {
            return Err(StoreError::Conversion(format!(
                "unknown DynamoDB AttributeValue type: {:?}",
                other
            )));
        }
    };
    Ok(json)
}

/// DynamoDB numbers are decimal strings with up to 38 digits of precision.
/// Anything that does not fit i64 or a finite f64 stays a string.
fn number_to_json(n: String) -> Value {
    if !(n.contains('.') || n.contains('e') || n.contains('E')) {
        if let Ok(i) = n.parse::<i64>() {
            return Value::Number(i.into());
        }
    } else if let Some(num) = n.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(num);
    }
    Value::String(n)
}
