// SPDX-License-Identifier: Apache-2.0
//! A reference codec: [`JsonSerializer`]/[`JsonDeserializer`] over
//! [`serde_json::Value`], built entirely on top of [`ShapeSerializer`]/
//! [`ShapeDeserializer`] to exercise the kernel end to end.
//!
//! Field names come from the schema position's [`SchemaRef::member_name`]
//! when one is available (structure/union members); positions with no
//! member name (map entries, document map keys) instead rely on the
//! preceding [`ShapeSerializer::write_map_key`]/key argument to
//! [`ShapeDeserializer::read_map`]. BigInteger/BigDecimal values are
//! carried as JSON strings rather than numbers, since `serde_json`
//! without its `arbitrary_precision` feature cannot round-trip arbitrary
//! digit strings through `serde_json::Number`.

use serde_json::{Map, Number as JsonNumber, Value};
use smithy_schema::{MemberSchema, Schema, SchemaRef};
use smithy_types::{BigDecimal, BigInteger, Blob, DateTime, Document, Number};

use crate::{DeserializationError, SerializationError, ShapeDeserializer, ShapeSerializer};

enum Frame {
    Array(Vec<Value>),
    Object(Map<String, Value>),
}

/// Builds a [`serde_json::Value`] by driving [`ShapeSerializer`] calls.
#[derive(Default)]
pub struct JsonSerializer {
    stack: Vec<Frame>,
    pending_key: Option<String>,
    result: Option<Value>,
}

impl JsonSerializer {
    /// Start a fresh serializer with no value written yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the finished value. Returns `Value::Null` if nothing was
    /// ever written (matching `serde_json`'s own default).
    #[must_use]
    pub fn into_value(self) -> Value {
        self.result.unwrap_or(Value::Null)
    }

    fn push_value(&mut self, schema: &dyn SchemaRef, value: Value) -> Result<(), SerializationError> {
        match self.stack.last_mut() {
            None => self.result = Some(value),
            Some(Frame::Array(items)) => items.push(value),
            Some(Frame::Object(map)) => {
                let key = match schema.member_name() {
                    Some(name) => name.to_string(),
                    None => self.pending_key.take().ok_or_else(|| {
                        SerializationError::unsupported("write_map_key", schema.id().clone())
                    })?,
                };
                map.insert(key, value);
            }
        }
        Ok(())
    }
}

fn json_number(value: &Number) -> Value {
    match value {
        Number::Byte(v) => Value::Number((*v).into()),
        Number::Short(v) => Value::Number((*v).into()),
        Number::Integer(v) => Value::Number((*v).into()),
        Number::Long(v) => Value::Number((*v).into()),
        Number::Float(v) => JsonNumber::from_f64(f64::from(*v)).map_or(Value::Null, Value::Number),
        Number::Double(v) => JsonNumber::from_f64(*v).map_or(Value::Null, Value::Number),
        Number::BigInteger(v) => Value::String(v.as_str().to_string()),
        Number::BigDecimal(v) => Value::String(v.as_str().to_string()),
    }
}

impl ShapeSerializer for JsonSerializer {
    type Error = SerializationError;

    fn write_boolean(&mut self, schema: &dyn SchemaRef, value: bool) -> Result<(), Self::Error> {
        self.push_value(schema, Value::Bool(value))
    }

    fn write_number(&mut self, schema: &dyn SchemaRef, value: Number) -> Result<(), Self::Error> {
        self.push_value(schema, json_number(&value))
    }

    fn write_big_integer(&mut self, schema: &dyn SchemaRef, value: &BigInteger) -> Result<(), Self::Error> {
        self.push_value(schema, Value::String(value.as_str().to_string()))
    }

    fn write_big_decimal(&mut self, schema: &dyn SchemaRef, value: &BigDecimal) -> Result<(), Self::Error> {
        self.push_value(schema, Value::String(value.as_str().to_string()))
    }

    fn write_string(&mut self, schema: &dyn SchemaRef, value: &str) -> Result<(), Self::Error> {
        self.push_value(schema, Value::String(value.to_string()))
    }

    fn write_blob(&mut self, schema: &dyn SchemaRef, value: &Blob) -> Result<(), Self::Error> {
        self.push_value(schema, Value::String(base64::encode(value.as_bytes())))
    }

    fn write_timestamp(&mut self, schema: &dyn SchemaRef, value: DateTime) -> Result<(), Self::Error> {
        self.push_value(schema, JsonNumber::from_f64(value.epoch_millis() as f64 / 1000.0).map_or(Value::Null, Value::Number))
    }

    fn write_null(&mut self, schema: &dyn SchemaRef) -> Result<(), Self::Error> {
        self.push_value(schema, Value::Null)
    }

    fn write_document(&mut self, schema: &dyn SchemaRef, value: &Document) -> Result<(), Self::Error> {
        crate::serialize_document(schema, value, self)
    }

    fn write_struct(
        &mut self,
        schema: &dyn SchemaRef,
        emit_members: &mut dyn FnMut(&mut Self) -> Result<(), Self::Error>,
    ) -> Result<(), Self::Error> {
        self.stack.push(Frame::Object(Map::new()));
        emit_members(self)?;
        let Some(Frame::Object(map)) = self.stack.pop() else {
            unreachable!("write_struct always pushes an Object frame");
        };
        self.push_value(schema, Value::Object(map))
    }

    fn write_list(
        &mut self,
        schema: &dyn SchemaRef,
        size_hint: usize,
        emit_elements: &mut dyn FnMut(&mut Self) -> Result<(), Self::Error>,
    ) -> Result<(), Self::Error> {
        self.stack.push(Frame::Array(Vec::with_capacity(size_hint)));
        emit_elements(self)?;
        let Some(Frame::Array(items)) = self.stack.pop() else {
            unreachable!("write_list always pushes an Array frame");
        };
        self.push_value(schema, Value::Array(items))
    }

    fn write_map(
        &mut self,
        schema: &dyn SchemaRef,
        _size_hint: usize,
        emit_entries: &mut dyn FnMut(&mut Self) -> Result<(), Self::Error>,
    ) -> Result<(), Self::Error> {
        self.stack.push(Frame::Object(Map::new()));
        emit_entries(self)?;
        let Some(Frame::Object(map)) = self.stack.pop() else {
            unreachable!("write_map always pushes an Object frame");
        };
        self.push_value(schema, Value::Object(map))
    }

    fn write_map_key(&mut self, _schema: &dyn SchemaRef, key: &str) -> Result<(), Self::Error> {
        self.pending_key = Some(key.to_string());
        Ok(())
    }
}

/// Reads a [`serde_json::Value`] by answering [`ShapeDeserializer`] calls.
pub struct JsonDeserializer<'a> {
    value: &'a Value,
}

impl<'a> JsonDeserializer<'a> {
    /// Build a deserializer positioned at `value`.
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    fn at(&self, value: &'a Value) -> Self {
        Self { value }
    }

    fn as_document(value: &Value) -> Document {
        match value {
            Value::Null => Document::Null,
            Value::Bool(b) => Document::Boolean(*b),
            Value::Number(n) => Document::Number(if let Some(i) = n.as_i64() {
                Number::Long(i)
            } else {
                Number::Double(n.as_f64().unwrap_or(f64::NAN))
            }),
            Value::String(s) => Document::String(s.clone()),
            Value::Array(items) => Document::Array(items.iter().map(Self::as_document).collect()),
            Value::Object(map) => {
                Document::Map(map.iter().map(|(k, v)| (k.clone(), Self::as_document(v))).collect())
            }
        }
    }
}

impl ShapeDeserializer for JsonDeserializer<'_> {
    type Error = DeserializationError;

    fn read_boolean(&mut self, schema: &dyn SchemaRef) -> Result<bool, Self::Error> {
        self.value
            .as_bool()
            .ok_or_else(|| DeserializationError::unsupported("read_boolean", schema.id().clone()))
    }

    fn read_number(&mut self, schema: &dyn SchemaRef) -> Result<Number, Self::Error> {
        let n = self
            .value
            .as_f64()
            .ok_or_else(|| DeserializationError::unsupported("read_number", schema.id().clone()))?;
        if let Some(i) = self.value.as_i64() {
            Ok(Number::Long(i))
        } else {
            Ok(Number::Double(n))
        }
    }

    fn read_big_integer(&mut self, schema: &dyn SchemaRef) -> Result<BigInteger, Self::Error> {
        self.value
            .as_str()
            .map(BigInteger::new)
            .ok_or_else(|| DeserializationError::unsupported("read_big_integer", schema.id().clone()))
    }

    fn read_big_decimal(&mut self, schema: &dyn SchemaRef) -> Result<BigDecimal, Self::Error> {
        self.value
            .as_str()
            .map(BigDecimal::new)
            .ok_or_else(|| DeserializationError::unsupported("read_big_decimal", schema.id().clone()))
    }

    fn read_string(&mut self, schema: &dyn SchemaRef) -> Result<String, Self::Error> {
        self.value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DeserializationError::unsupported("read_string", schema.id().clone()))
    }

    fn read_blob(&mut self, schema: &dyn SchemaRef) -> Result<Blob, Self::Error> {
        let text = self
            .value
            .as_str()
            .ok_or_else(|| DeserializationError::unsupported("read_blob", schema.id().clone()))?;
        base64::decode(text)
            .map(Blob::new)
            .map_err(|_| DeserializationError::unsupported("read_blob", schema.id().clone()))
    }

    fn read_timestamp(&mut self, schema: &dyn SchemaRef) -> Result<DateTime, Self::Error> {
        let seconds = self
            .value
            .as_f64()
            .ok_or_else(|| DeserializationError::unsupported("read_timestamp", schema.id().clone()))?;
        Ok(DateTime::from_epoch_millis((seconds * 1000.0).round() as i64))
    }

    fn read_document(&mut self, _schema: &dyn SchemaRef) -> Result<Document, Self::Error> {
        Ok(Self::as_document(self.value))
    }

    fn is_null(&mut self) -> bool {
        self.value.is_null()
    }

    fn container_size(&mut self) -> Option<usize> {
        match self.value {
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    fn read_struct<T>(
        &mut self,
        schema: &Schema,
        mut state: T,
        read_member: &mut dyn FnMut(T, &MemberSchema, &mut Self) -> Result<T, Self::Error>,
        unknown_member: &mut dyn FnMut(T, &str, &mut Self) -> Result<T, Self::Error>,
    ) -> Result<T, Self::Error> {
        let Value::Object(map) = self.value else {
            return Err(DeserializationError::unsupported("read_struct", schema.id().clone()));
        };
        for (key, value) in map {
            let mut nested = self.at(value);
            state = match schema.member_by_name(key) {
                Some(member) => read_member(state, member, &mut nested)?,
                None => unknown_member(state, key, &mut nested)?,
            };
        }
        Ok(state)
    }

    fn read_list<T>(
        &mut self,
        schema: &dyn SchemaRef,
        mut state: T,
        read_element: &mut dyn FnMut(T, &mut Self) -> Result<T, Self::Error>,
    ) -> Result<T, Self::Error> {
        let Value::Array(items) = self.value else {
            return Err(DeserializationError::unsupported("read_list", schema.id().clone()));
        };
        for item in items {
            let mut nested = self.at(item);
            state = read_element(state, &mut nested)?;
        }
        Ok(state)
    }

    fn read_map<T>(
        &mut self,
        schema: &dyn SchemaRef,
        mut state: T,
        read_entry: &mut dyn FnMut(T, &str, &mut Self) -> Result<T, Self::Error>,
    ) -> Result<T, Self::Error> {
        let Value::Object(map) = self.value else {
            return Err(DeserializationError::unsupported("read_map", schema.id().clone()));
        };
        for (key, value) in map {
            let mut nested = self.at(value);
            state = read_entry(state, key, &mut nested)?;
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use smithy_schema::{SchemaBuilder, ShapeType, TraitMap};
    use smithy_types::ShapeId;

    use super::*;

    fn widget_schema() -> Schema {
        let string_target = Arc::new(SchemaBuilder::simple(ShapeId::new("smithy.api#String"), ShapeType::String));
        let integer_target = Arc::new(SchemaBuilder::simple(ShapeId::new("smithy.api#Integer"), ShapeType::Integer));
        SchemaBuilder::structure(ShapeId::new("ns#Widget"))
            .add_member("name", string_target, true, TraitMap::new())
            .add_member("count", integer_target, false, TraitMap::new())
            .build()
            .unwrap()
    }

    #[test]
    fn struct_round_trips_through_json() {
        let schema = widget_schema();

        let mut ser = JsonSerializer::new();
        ser.write_struct(&schema, &mut |s| {
            s.write_string(schema.member_by_name("name").unwrap(), "bolt")?;
            s.write_number(schema.member_by_name("count").unwrap(), Number::Integer(7))?;
            Ok(())
        })
        .unwrap();
        let value = ser.into_value();
        assert_eq!(value, serde_json::json!({"name": "bolt", "count": 7}));

        let mut de = JsonDeserializer::new(&value);
        let (name, count) = de
            .read_struct(
                &schema,
                (String::new(), 0i32),
                &mut |mut acc, member, d| {
                    match member.name() {
                        "name" => acc.0 = d.read_string(member)?,
                        "count" => acc.1 = d.read_number(member)?.as_exact_integer().unwrap_or(0) as i32,
                        _ => {}
                    }
                    Ok(acc)
                },
                &mut |acc, _key, _d| Ok(acc),
            )
            .unwrap();
        assert_eq!(name, "bolt");
        assert_eq!(count, 7);
    }

    #[test]
    fn list_round_trips_through_json() {
        let element = Arc::new(SchemaBuilder::simple(ShapeId::new("smithy.api#String"), ShapeType::String));
        let list_schema = SchemaBuilder::new(ShapeId::new("ns#Tags"), ShapeType::List)
            .add_member("member", element, false, TraitMap::new())
            .build()
            .unwrap();
        let member_schema = list_schema.member_by_name("member").unwrap();

        let items = ["a", "b", "c"];
        let mut ser = JsonSerializer::new();
        ser.write_list(&list_schema, items.len(), &mut |s| {
            for item in items {
                s.write_string(member_schema, item)?;
            }
            Ok(())
        })
        .unwrap();
        let value = ser.into_value();
        assert_eq!(value, serde_json::json!(["a", "b", "c"]));

        let mut de = JsonDeserializer::new(&value);
        let collected = de
            .read_list(&list_schema, Vec::new(), &mut |mut acc, d| {
                acc.push(d.read_string(&list_schema)?);
                Ok(acc)
            })
            .unwrap();
        assert_eq!(collected, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_field_reaches_unknown_member_hook() {
        let schema = widget_schema();
        let value = serde_json::json!({"name": "bolt", "extra": true});
        let mut de = JsonDeserializer::new(&value);
        let unknowns = de
            .read_struct(
                &schema,
                Vec::new(),
                &mut |acc, _member, _d| Ok(acc),
                &mut |mut acc, key, _d| {
                    acc.push(key.to_string());
                    Ok(acc)
                },
            )
            .unwrap();
        assert_eq!(unknowns, vec!["extra".to_string()]);
    }
}
