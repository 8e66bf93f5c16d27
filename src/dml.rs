//! DML 语句类型。

use std::fmt;
use std::str::FromStr;

/// 要生成的 DML 类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DmlType {
    Insert,
    Update,
    Delete,
}

impl DmlType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }

    /// UPDATE / DELETE 受空 WHERE 保护约束。
    pub fn needs_where(self) -> bool {
        matches!(self, Self::Update | Self::Delete)
    }

    /// 参数切片是否包含字段值。
    pub(crate) fn takes_fields(self) -> bool {
        self != Self::Delete
    }

    /// 参数切片是否包含 WHERE 参数。
    pub(crate) fn takes_where_args(self) -> bool {
        self != Self::Insert
    }
}

impl fmt::Display for DmlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("dml unknown statement type {0:?}")]
pub struct ParseDmlTypeError(pub String);

impl FromStr for DmlType {
    type Err = ParseDmlTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("insert") {
            Ok(Self::Insert)
        } else if t.eq_ignore_ascii_case("update") {
            Ok(Self::Update)
        } else if t.eq_ignore_ascii_case("delete") {
            Ok(Self::Delete)
        } else {
            Err(ParseDmlTypeError(s.to_string()))
        }
    }
}
