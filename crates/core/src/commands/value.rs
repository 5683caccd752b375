use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A value produced by an [`ArgumentType`](super::argument::ArgumentType).
#[derive(Clone)]
pub enum Value {
    String(String),
    Integer(i32),
    Float(f32),
    Boolean(bool),
    /// Host-defined values. Read them back with `BindingSet::custom_value`.
    Custom(Arc<dyn Any + Send + Sync>),
}

impl Value {
    pub fn custom<T: Any + Send + Sync>(value: T) -> Self {
        Value::Custom(Arc::new(value))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "String",
            Value::Integer(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Boolean(_) => "Boolean",
            Value::Custom(_) => "Custom",
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Custom(v) => v.downcast_ref(),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Integer(i) => f.debug_tuple("Integer").field(i).finish(),
            Value::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Conversion used by `BindingSet::typed_value`.
pub trait FromValue: Sized {
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    const EXPECTED: &'static str = "String";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_string().map(str::to_string)
    }
}

impl FromValue for i32 {
    const EXPECTED: &'static str = "Integer";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_integer()
    }
}

impl FromValue for f32 {
    const EXPECTED: &'static str = "Float";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_float()
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "Boolean";

    fn from_value(value: &Value) -> Option<Self> {
        value.as_boolean()
    }
}
