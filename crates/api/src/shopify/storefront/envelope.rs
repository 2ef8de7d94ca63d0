//! Response envelope normalization.
//!
//! Shopify answers `{ "data": { "products": .. }, "errors": [..] }`, while
//! some proxies and client libraries hand back the bare `{ "products": .. }`.
//! [`unwrap_data`] accepts either, including a `data` wrapper nested more
//! than once, and always yields the object that holds the resource field.

use serde_json::{Map, Value};

use crate::shopify::{GraphQLError, ShopifyError};

/// Maximum number of `data` wrappers peeled before giving up.
const MAX_DATA_DEPTH: usize = 4;

/// Locate the object holding `resource` in a raw GraphQL response.
///
/// # Errors
///
/// - [`ShopifyError::GraphQL`] if any level carries a non-empty `errors` list
/// - [`ShopifyError::MissingResource`] if no level holds `resource`
pub fn unwrap_data(resource: &str, raw: Value) -> Result<Value, ShopifyError> {
    let mut current = raw;

    for _ in 0..=MAX_DATA_DEPTH {
        let Value::Object(mut object) = current else {
            break;
        };

        check_errors(&mut object)?;

        if object.contains_key(resource) {
            return Ok(Value::Object(object));
        }

        match object.remove("data") {
            Some(inner @ Value::Object(_)) => current = inner,
            _ => break,
        }
    }

    Err(ShopifyError::MissingResource(resource.to_string()))
}

/// Fail on a non-empty `errors` list.
fn check_errors(object: &mut Map<String, Value>) -> Result<(), ShopifyError> {
    let Some(errors) = object.remove("errors") else {
        return Ok(());
    };

    let errors = match errors {
        Value::Null => return Ok(()),
        Value::Array(list) if list.is_empty() => return Ok(()),
        Value::Array(list) => list,
        other => vec![other],
    };

    Err(ShopifyError::GraphQL(
        errors.into_iter().map(convert_error).collect(),
    ))
}

fn convert_error(raw: Value) -> GraphQLError {
    match serde_json::from_value::<graphql_client::Error>(raw.clone()) {
        Ok(error) => GraphQLError::from(error),
        Err(_) => GraphQLError::message(match raw {
            Value::String(s) => s,
            other => other.to_string(),
        }),
    }
}
