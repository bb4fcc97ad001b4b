//! Value stringification
//!
//! Converts any [`Serialize`] value into the text shown in the console. The
//! top-level shape decides the strategy: scalars use their plain text form,
//! compound values are JSON encoded, and values that cannot be encoded are
//! described by their category and type name instead.

use crate::depth_limit::DepthLimited;
use serde::ser::{self, Impossible, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Nesting depth at which JSON encoding gives up
const MAX_DEPTH: usize = 128;

const UNDEFINED_NAME: &str = "logview::Undefined";

/// Marker for a value that is absent rather than null.
///
/// Renders as `undefined`; `()`, `None` and other unit values render as
/// `null`. Inside a compound value it encodes as JSON `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Undefined;

impl Serialize for Undefined {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_unit_struct(UNDEFINED_NAME)
    }
}

/// Convert a value into its display string.
///
/// Never fails: when JSON encoding is impossible the result is a diagnostic
/// string such as `object - Node`.
pub fn stringify<T: Serialize + ?Sized>(value: &T) -> String {
    match value.serialize(Classifier) {
        Ok(Shape::Text(text)) => text,
        Ok(Shape::Null) => "null".to_string(),
        Ok(Shape::Undefined) => "undefined".to_string(),
        Err(Exit::Compound(category)) => encode(value, category),
        Err(Exit::Failed(reason)) => {
            log::debug!(
                "stringify: {} failed to serialize: {}",
                std::any::type_name::<T>(),
                reason
            );
            describe::<T>(Category::Object)
        }
    }
}

fn encode<T: Serialize + ?Sized>(value: &T, category: Category) -> String {
    match to_json(value) {
        Ok(text) => text,
        Err(e) => {
            log::debug!(
                "stringify: JSON encoding of {} failed: {}",
                std::any::type_name::<T>(),
                e
            );
            describe::<T>(category)
        }
    }
}

/// JSON encoding that fails instead of recursing past [`MAX_DEPTH`]
fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut out = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::new(&mut out);
    value.serialize(DepthLimited::new(&mut serializer, MAX_DEPTH))?;
    String::from_utf8(out).map_err(ser::Error::custom)
}

/// Plain text of a float: `Infinity`/`-Infinity` for infinities and `0`
/// for negative zero, `Display` otherwise.
fn float_text(v: f64, display: String) -> String {
    if v.is_infinite() {
        let text = if v.is_sign_negative() { "-Infinity" } else { "Infinity" };
        text.to_string()
    } else if v == 0.0 {
        "0".to_string()
    } else {
        display
    }
}

fn describe<T: ?Sized>(category: Category) -> String {
    format!(
        "{} - {}",
        category,
        short_type_name(std::any::type_name::<T>())
    )
}

/// Strip module paths from a type name, keeping generic arguments.
///
/// `alloc::vec::Vec<my_crate::Point>` becomes `Vec<Point>`.
fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut path = String::new();

    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            path.push(c);
        } else {
            out.push_str(last_segment(&path));
            path.clear();
            out.push(c);
        }
    }
    out.push_str(last_segment(&path));
    out
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Broad category of a compound value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Object,
    Array,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Object => f.write_str("object"),
            Category::Array => f.write_str("array"),
        }
    }
}

/// Top-level shape of a scalar value
#[derive(Debug, PartialEq)]
enum Shape {
    Text(String),
    Null,
    Undefined,
}

/// Early exits of [`Classifier`]
#[derive(Debug, Error)]
enum Exit {
    /// The value is compound and needs structured encoding
    #[error("compound value ({0})")]
    Compound(Category),

    /// The value's `Serialize` impl reported an error
    #[error("{0}")]
    Failed(String),
}

impl ser::Error for Exit {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Exit::Failed(msg.to_string())
    }
}

/// Serializer that only looks at the outermost layer of a value.
///
/// Scalars are turned into their text right away; compound values bail out
/// with their category before any element is visited.
struct Classifier;

impl Serializer for Classifier {
    type Ok = Shape;
    type Error = Exit;

    type SerializeSeq = Impossible<Shape, Exit>;
    type SerializeTuple = Impossible<Shape, Exit>;
    type SerializeTupleStruct = Impossible<Shape, Exit>;
    type SerializeTupleVariant = Impossible<Shape, Exit>;
    type SerializeMap = Impossible<Shape, Exit>;
    type SerializeStruct = Impossible<Shape, Exit>;
    type SerializeStructVariant = Impossible<Shape, Exit>;

    fn serialize_bool(self, v: bool) -> Result<Shape, Exit> {
        Ok(Shape::Text(v.to_string()))
    }

    fn serialize_i8(self, v: i8) -> Result<Shape, Exit> {
        Ok(Shape::Text(v.to_string()))
    }

    fn serialize_i16(self, v: i16) -> Result<Shape, Exit> {
        Ok(Shape::Text(v.to_string()))
    }

    fn serialize_i32(self, v: i32) -> Result<Shape, Exit> {
        Ok(Shape::Text(v.to_string()))
    }

    fn serialize_i64(self, v: i64) -> Result<Shape, Exit> {
        Ok(Shape::Text(v.to_string()))
    }

    fn serialize_i128(self, v: i128) -> Result<Shape, Exit> {
        Ok(Shape::Text(v.to_string()))
    }

    fn serialize_u8(self, v: u8) -> Result<Shape, Exit> {
        Ok(Shape::Text(v.to_string()))
    }

    fn serialize_u16(self, v: u16) -> Result<Shape, Exit> {
        Ok(Shape::Text(v.to_string()))
    }

    fn serialize_u32(self, v: u32) -> Result<Shape, Exit> {
        Ok(Shape::Text(v.to_string()))
    }

    fn serialize_u64(self, v: u64) -> Result<Shape, Exit> {
        Ok(Shape::Text(v.to_string()))
    }

    fn serialize_u128(self, v: u128) -> Result<Shape, Exit> {
        Ok(Shape::Text(v.to_string()))
    }

    fn serialize_f32(self, v: f32) -> Result<Shape, Exit> {
        Ok(Shape::Text(float_text(f64::from(v), v.to_string())))
    }

    fn serialize_f64(self, v: f64) -> Result<Shape, Exit> {
        Ok(Shape::Text(float_text(v, v.to_string())))
    }

    fn serialize_char(self, v: char) -> Result<Shape, Exit> {
        Ok(Shape::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Shape, Exit> {
        Ok(Shape::Text(v.to_owned()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Shape, Exit> {
        Err(Exit::Compound(Category::Array))
    }

    fn serialize_none(self) -> Result<Shape, Exit> {
        Ok(Shape::Null)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<Shape, Exit> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Shape, Exit> {
        Ok(Shape::Null)
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Shape, Exit> {
        if name == UNDEFINED_NAME {
            Ok(Shape::Undefined)
        } else {
            Ok(Shape::Null)
        }
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Shape, Exit> {
        Ok(Shape::Text(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Shape, Exit> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Shape, Exit> {
        Err(Exit::Compound(Category::Object))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq, Exit> {
        Err(Exit::Compound(Category::Array))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple, Exit> {
        Err(Exit::Compound(Category::Array))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct, Exit> {
        Err(Exit::Compound(Category::Array))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant, Exit> {
        Err(Exit::Compound(Category::Object))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap, Exit> {
        Err(Exit::Compound(Category::Object))
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStruct, Exit> {
        Err(Exit::Compound(Category::Object))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant, Exit> {
        Err(Exit::Compound(Category::Object))
    }
}
