use tracing::error;

use crate::error::Error;
use crate::schema::{InputSchema, JsonType, SchemaType};
use crate::types::ArgumentBag;

/// Check `arguments` against `schema`.
///
/// Required names are checked first, in declaration order. Declared
/// properties that are present are then type-checked in name order. Only the
/// top level is inspected; extra arguments pass through untouched.
///
/// # Errors
///
/// - [`Error::MissingRequiredField`] for the first absent required name.
/// - [`Error::InvalidSchemaDefinition`] when a present property's descriptor
///   has no string `type` tag.
/// - [`Error::TypeMismatch`] when a value does not match its tag, or the tag
///   is not a supported type.
pub fn validate(schema: &InputSchema, arguments: &ArgumentBag) -> Result<(), Error> {
    if let Some(missing) = schema
        .required
        .iter()
        .find(|name| !arguments.contains_key(name.as_str()))
    {
        return Err(Error::MissingRequiredField(missing.clone()));
    }

    for (name, descriptor) in &schema.properties {
        let Some(value) = arguments.get(name) else {
            continue;
        };

        let Some(tag) = descriptor.type_tag() else {
            error!(property = %name, "schema descriptor has no usable type tag");
            return Err(Error::InvalidSchemaDefinition(name.clone()));
        };

        let conforms = tag
            .parse::<SchemaType>()
            .is_ok_and(|kind| kind.matches(value));
        if !conforms {
            return Err(Error::TypeMismatch {
                field: name.clone(),
                expected: tag.to_string(),
                actual: JsonType::of(value),
            });
        }
    }

    Ok(())
}
