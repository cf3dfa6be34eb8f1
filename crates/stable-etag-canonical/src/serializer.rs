//! Strict conversion of `Serialize` types into [`Value`].
//!
//! Unlike `serde_json::to_value`, this never coerces: non-finite floats are
//! rejected instead of becoming `null`, map keys must be strings, and raw byte
//! buffers are refused.

use serde::ser::{self, Impossible, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt::Display;

use crate::canonicalizer::CanonicalizationError;

impl ser::Error for CanonicalizationError {
    fn custom<T: Display>(msg: T) -> Self {
        CanonicalizationError::Other(msg.to_string())
    }
}

/// Captures `value` as a [`Value`], failing on anything without a canonical form.
///
/// # Errors
///
/// - [`CanonicalizationError::UnrepresentableNumber`] for NaN, infinities, and
///   128-bit integers outside the 64-bit range.
/// - [`CanonicalizationError::InvalidKeyType`] for map keys that are not strings.
/// - [`CanonicalizationError::UnsupportedType`] for byte buffers.
/// - [`CanonicalizationError::Other`] for errors raised by the `Serialize` impl itself.
pub fn to_canonical_value<T>(value: &T) -> Result<Value, CanonicalizationError>
where
    T: Serialize + ?Sized,
{
    value.serialize(ValueSerializer)
}

struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = CanonicalizationError;

    type SerializeSeq = SeqBuilder;
    type SerializeTuple = SeqBuilder;
    type SerializeTupleStruct = SeqBuilder;
    type SerializeTupleVariant = VariantSeqBuilder;
    type SerializeMap = MapBuilder;
    type SerializeStruct = MapBuilder;
    type SerializeStructVariant = VariantMapBuilder;

    fn serialize_bool(self, v: bool) -> Result<Value, Self::Error> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, Self::Error> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, Self::Error> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, Self::Error> {
        if let Ok(v) = i64::try_from(v) {
            return self.serialize_i64(v);
        }
        if let Ok(v) = u64::try_from(v) {
            return self.serialize_u64(v);
        }
        Err(CanonicalizationError::unrepresentable(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, Self::Error> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, Self::Error> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, Self::Error> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, Self::Error> {
        Ok(Value::Number(v.into()))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, Self::Error> {
        match u64::try_from(v) {
            Ok(v) => self.serialize_u64(v),
            Err(_) => Err(CanonicalizationError::unrepresentable(v)),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value, Self::Error> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, Self::Error> {
        Number::from_f64(v)
            .map(Value::Number)
            .ok_or_else(|| CanonicalizationError::unrepresentable(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, Self::Error> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, Self::Error> {
        Ok(Value::String(v.to_owned()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Value, Self::Error> {
        Err(CanonicalizationError::unsupported("bytes"))
    }

    fn serialize_none(self) -> Result<Value, Self::Error> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, Self::Error> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, Self::Error> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, Self::Error> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        let inner = to_canonical_value(value).map_err(|e| e.within(variant.to_owned()))?;
        let mut map = Map::new();
        map.insert(variant.to_owned(), inner);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqBuilder, Self::Error> {
        Ok(SeqBuilder {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqBuilder, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SeqBuilder, Self::Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantSeqBuilder, Self::Error> {
        Ok(VariantSeqBuilder {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<MapBuilder, Self::Error> {
        Ok(MapBuilder {
            map: Map::new(),
            pending_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<MapBuilder, Self::Error> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<VariantMapBuilder, Self::Error> {
        Ok(VariantMapBuilder {
            variant,
            map: Map::new(),
        })
    }
}

struct SeqBuilder {
    items: Vec<Value>,
}

impl ser::SerializeSeq for SeqBuilder {
    type Ok = Value;
    type Error = CanonicalizationError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        let index = self.items.len();
        let item = to_canonical_value(value).map_err(|e| e.within(format!("[{}]", index)))?;
        self.items.push(item);
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        Ok(Value::Array(self.items))
    }
}

impl ser::SerializeTuple for SeqBuilder {
    type Ok = Value;
    type Error = CanonicalizationError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, Self::Error> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SeqBuilder {
    type Ok = Value;
    type Error = CanonicalizationError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, Self::Error> {
        ser::SerializeSeq::end(self)
    }
}

struct VariantSeqBuilder {
    variant: &'static str,
    items: Vec<Value>,
}

impl ser::SerializeTupleVariant for VariantSeqBuilder {
    type Ok = Value;
    type Error = CanonicalizationError;

    fn serialize_field<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        let index = self.items.len();
        let item = to_canonical_value(value).map_err(|e| {
            e.within(format!("[{}]", index))
                .within(self.variant.to_owned())
        })?;
        self.items.push(item);
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        let mut map = Map::new();
        map.insert(self.variant.to_owned(), Value::Array(self.items));
        Ok(Value::Object(map))
    }
}

struct MapBuilder {
    map: Map<String, Value>,
    pending_key: Option<String>,
}

impl ser::SerializeMap for MapBuilder {
    type Ok = Value;
    type Error = CanonicalizationError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        self.pending_key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        let key = self.pending_key.take().ok_or_else(|| {
            CanonicalizationError::Other("map value serialized before its key".into())
        })?;
        let value = to_canonical_value(value).map_err(|e| e.within(key.clone()))?;
        // Duplicate keys: the last value wins.
        self.map.insert(key, value);
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for MapBuilder {
    type Ok = Value;
    type Error = CanonicalizationError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        let value = to_canonical_value(value).map_err(|e| e.within(key.to_owned()))?;
        self.map.insert(key.to_owned(), value);
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        ser::SerializeMap::end(self)
    }
}

struct VariantMapBuilder {
    variant: &'static str,
    map: Map<String, Value>,
}

impl ser::SerializeStructVariant for VariantMapBuilder {
    type Ok = Value;
    type Error = CanonicalizationError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + ?Sized,
    {
        let value = to_canonical_value(value)
            .map_err(|e| e.within(key.to_owned()).within(self.variant.to_owned()))?;
        self.map.insert(key.to_owned(), value);
        Ok(())
    }

    fn end(self) -> Result<Value, Self::Error> {
        let mut outer = Map::new();
        outer.insert(self.variant.to_owned(), Value::Object(self.map));
        Ok(Value::Object(outer))
    }
}

/// Accepts only string-like map keys.
struct KeySerializer;

fn invalid_key(kind: &str) -> CanonicalizationError {
    CanonicalizationError::invalid_key(kind)
}

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = CanonicalizationError;

    type SerializeSeq = Impossible<String, CanonicalizationError>;
    type SerializeTuple = Impossible<String, CanonicalizationError>;
    type SerializeTupleStruct = Impossible<String, CanonicalizationError>;
    type SerializeTupleVariant = Impossible<String, CanonicalizationError>;
    type SerializeMap = Impossible<String, CanonicalizationError>;
    type SerializeStruct = Impossible<String, CanonicalizationError>;
    type SerializeStructVariant = Impossible<String, CanonicalizationError>;

    fn serialize_str(self, v: &str) -> Result<String, Self::Error> {
        Ok(v.to_owned())
    }

    fn serialize_char(self, v: char) -> Result<String, Self::Error> {
        Ok(v.to_string())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, Self::Error> {
        Ok(variant.to_owned())
    }

    fn serialize_newtype_struct<T>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<String, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_bool(self, _v: bool) -> Result<String, Self::Error> {
        Err(invalid_key("boolean"))
    }

    fn serialize_i8(self, _v: i8) -> Result<String, Self::Error> {
        Err(invalid_key("integer"))
    }

    fn serialize_i16(self, _v: i16) -> Result<String, Self::Error> {
        Err(invalid_key("integer"))
    }

    fn serialize_i32(self, _v: i32) -> Result<String, Self::Error> {
        Err(invalid_key("integer"))
    }

    fn serialize_i64(self, _v: i64) -> Result<String, Self::Error> {
        Err(invalid_key("integer"))
    }

    fn serialize_u8(self, _v: u8) -> Result<String, Self::Error> {
        Err(invalid_key("integer"))
    }

    fn serialize_u16(self, _v: u16) -> Result<String, Self::Error> {
        Err(invalid_key("integer"))
    }

    fn serialize_u32(self, _v: u32) -> Result<String, Self::Error> {
        Err(invalid_key("integer"))
    }

    fn serialize_u64(self, _v: u64) -> Result<String, Self::Error> {
        Err(invalid_key("integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<String, Self::Error> {
        Err(invalid_key("float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<String, Self::Error> {
        Err(invalid_key("float"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String, Self::Error> {
        Err(invalid_key("bytes"))
    }

    fn serialize_none(self) -> Result<String, Self::Error> {
        Err(invalid_key("null"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        Err(invalid_key("option"))
    }

    fn serialize_unit(self) -> Result<String, Self::Error> {
        Err(invalid_key("null"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String, Self::Error> {
        Err(invalid_key("unit struct"))
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String, Self::Error>
    where
        T: Serialize + ?Sized,
    {
        Err(invalid_key("enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Self::Error> {
        Err(invalid_key("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Self::Error> {
        Err(invalid_key("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Self::Error> {
        Err(invalid_key("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Self::Error> {
        Err(invalid_key("enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Self::Error> {
        Err(invalid_key("mapping"))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Self::Error> {
        Err(invalid_key("struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Self::Error> {
        Err(invalid_key("enum variant"))
    }
}
