//! 参数值类型：`SqlValue` 是闭合的标量集合，`Arg` 在其上叠加可扩展的 `SqlValuer`。

use crate::valuer::{SqlValuer, ValuerError};
use std::borrow::Cow;
use std::fmt;

/// SQL 参数值。
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(Cow<'static, str>),
    Bytes(Vec<u8>),
    DateTime(time::OffsetDateTime),
}

impl SqlValue {
    /// 将 `Option<T>` 映射为 `SqlValue`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<SqlValue>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// 值的类型名，主要用于日志与错误信息。
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::I64(_) => "i64",
            Self::U64(_) => "u64",
            Self::F64(_) => "f64",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::DateTime(_) => "datetime",
        }
    }
}

macro_rules! sql_value_from {
    ($variant:ident as $target:ty: $($src:ty),+ $(,)?) => {
        $(
            impl From<$src> for SqlValue {
                fn from(v: $src) -> Self {
                    Self::$variant(v as $target)
                }
            }
        )+
    };
}

sql_value_from!(I64 as i64: i8, i16, i32, i64);
sql_value_from!(U64 as u64: u8, u16, u32, u64);
sql_value_from!(F64 as f64: f32, f64);

impl From<()> for SqlValue {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&'static str> for SqlValue {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<time::OffsetDateTime> for SqlValue {
    fn from(v: time::OffsetDateTime) -> Self {
        Self::DateTime(v)
    }
}

/// 参数切片中的单个元素。
///
/// 绝大多数参数是 [`SqlValue`]；需要在执行前才计算出实际值的类型可以实现
/// [`SqlValuer`] 并以 `Arg::Valuer` 传入，builder 不会解析它，只负责按位置传递。
#[derive(Clone)]
pub enum Arg {
    Value(SqlValue),
    Valuer(Box<dyn SqlValuer>),
}

impl Arg {
    pub fn null() -> Self {
        Self::Value(SqlValue::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Value(SqlValue::Null))
    }

    pub fn as_value(&self) -> Option<&SqlValue> {
        match self {
            Self::Value(v) => Some(v),
            Self::Valuer(_) => None,
        }
    }

    /// 得到最终交给驱动的值；`Valuer` 会在这里被调用。
    pub fn resolve(&self) -> Result<SqlValue, ValuerError> {
        match self {
            Self::Value(v) => Ok(v.clone()),
            Self::Valuer(v) => v.value(),
        }
    }
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Valuer(v) => f.debug_tuple("Valuer").field(v).finish(),
        }
    }
}

impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq<SqlValue> for Arg {
    fn eq(&self, other: &SqlValue) -> bool {
        self.as_value() == Some(other)
    }
}

macro_rules! arg_from {
    ($($src:ty),+ $(,)?) => {
        $(
            impl From<$src> for Arg {
                fn from(v: $src) -> Self {
                    Self::Value(v.into())
                }
            }

            impl From<Option<$src>> for Arg {
                fn from(v: Option<$src>) -> Self {
                    Self::Value(SqlValue::from_option(v))
                }
            }
        )+
    };
}

arg_from!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
    Vec<u8>,
    time::OffsetDateTime,
);

impl From<()> for Arg {
    fn from(_: ()) -> Self {
        Self::null()
    }
}

impl From<SqlValue> for Arg {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

impl From<Box<dyn SqlValuer>> for Arg {
    fn from(v: Box<dyn SqlValuer>) -> Self {
        Self::Valuer(v)
    }
}
