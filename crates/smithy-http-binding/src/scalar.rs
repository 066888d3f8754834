// SPDX-License-Identifier: Apache-2.0
//! Narrow scalar (de)serializers for headers, query parameters, labels,
//! and status codes: each is a tiny serializer/deserializer that
//! overloads precisely the scalar reads and writes it needs.

use chrono::SecondsFormat;
use smithy_schema::SchemaRef;
use smithy_serde::{DeserializationError, SerializationError, ShapeDeserializer, ShapeSerializer};
use smithy_types::Number;

fn number_to_string(value: &Number) -> String {
    match value {
        Number::Byte(v) => v.to_string(),
        Number::Short(v) => v.to_string(),
        Number::Integer(v) => v.to_string(),
        Number::Long(v) => v.to_string(),
        Number::Float(v) => v.to_string(),
        Number::Double(v) => v.to_string(),
        Number::BigInteger(v) => v.as_str().to_string(),
        Number::BigDecimal(v) => v.as_str().to_string(),
    }
}

/// Renders exactly one scalar (boolean, number, string, or timestamp)
/// to its string wire form, refusing every other [`ShapeSerializer`]
/// call via the trait's default bodies. Shared by header, query, and
/// label writers.
#[derive(Debug, Default)]
pub struct ScalarSerializer {
    rendered: Option<String>,
}

impl ScalarSerializer {
    /// Build an empty scalar serializer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the serializer, returning the rendered string if a
    /// `write_*` call was made.
    #[must_use]
    pub fn into_value(self) -> Option<String> {
        self.rendered
    }
}

impl ShapeSerializer for ScalarSerializer {
    type Error = SerializationError;

    fn write_boolean(&mut self, _schema: &dyn SchemaRef, value: bool) -> Result<(), Self::Error> {
        self.rendered = Some(value.to_string());
        Ok(())
    }

    fn write_number(&mut self, _schema: &dyn SchemaRef, value: Number) -> Result<(), Self::Error> {
        self.rendered = Some(number_to_string(&value));
        Ok(())
    }

    fn write_string(&mut self, _schema: &dyn SchemaRef, value: &str) -> Result<(), Self::Error> {
        self.rendered = Some(value.to_string());
        Ok(())
    }

    fn write_timestamp(&mut self, _schema: &dyn SchemaRef, value: smithy_types::DateTime) -> Result<(), Self::Error> {
        self.rendered = Some(value.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true));
        Ok(())
    }
}

/// Parses exactly one scalar out of a pre-read string (already pulled
/// from a header/query/label/status slot), refusing every other
/// [`ShapeDeserializer`] call via the trait's default bodies.
#[derive(Debug, Clone)]
pub struct ScalarDeserializer<'a> {
    raw: &'a str,
}

impl<'a> ScalarDeserializer<'a> {
    /// Wrap the raw string wire value to be parsed.
    #[must_use]
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }
}

impl ShapeDeserializer for ScalarDeserializer<'_> {
    type Error = DeserializationError;

    fn read_boolean(&mut self, _schema: &dyn SchemaRef) -> Result<bool, Self::Error> {
        self.raw.parse().map_err(|_| DeserializationError::Codec(format!("`{}` is not a boolean", self.raw)))
    }

    fn read_number(&mut self, _schema: &dyn SchemaRef) -> Result<Number, Self::Error> {
        self.raw
            .parse::<i64>()
            .map(Number::Long)
            .or_else(|_| self.raw.parse::<f64>().map(Number::Double))
            .map_err(|_| DeserializationError::Codec(format!("`{}` is not a number", self.raw)))
    }

    fn read_string(&mut self, _schema: &dyn SchemaRef) -> Result<String, Self::Error> {
        Ok(self.raw.to_string())
    }

    fn read_timestamp(&mut self, _schema: &dyn SchemaRef) -> Result<smithy_types::DateTime, Self::Error> {
        chrono::DateTime::parse_from_rfc3339(self.raw)
            .map(|dt| smithy_types::DateTime::from_chrono(dt.with_timezone(&chrono::Utc)))
            .map_err(|_| DeserializationError::Codec(format!("`{}` is not an RFC 3339 timestamp", self.raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smithy_schema::{SchemaBuilder, ShapeType};
    use smithy_types::ShapeId;

    fn string_schema() -> smithy_schema::Schema {
        SchemaBuilder::simple(ShapeId::new("ns#Str"), ShapeType::String)
    }

    #[test]
    fn scalar_serializer_renders_string_and_number() {
        let schema = string_schema();
        let mut ser = ScalarSerializer::new();
        ser.write_string(&schema, "hello").unwrap();
        assert_eq!(ser.into_value(), Some("hello".to_string()));

        let mut ser = ScalarSerializer::new();
        ser.write_number(&schema, Number::Integer(42)).unwrap();
        assert_eq!(ser.into_value(), Some("42".to_string()));
    }

    #[test]
    fn scalar_deserializer_parses_number_and_string() {
        let schema = string_schema();
        let mut de = ScalarDeserializer::new("42");
        assert_eq!(de.read_number(&schema).unwrap(), Number::Long(42));

        let mut de = ScalarDeserializer::new("hello");
        assert_eq!(de.read_string(&schema).unwrap(), "hello");
    }
}
