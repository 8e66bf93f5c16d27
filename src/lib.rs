//! halo-dml：按字段列表拼接 INSERT / UPDATE / DELETE 语句并收集位置参数。

pub mod builder;
pub mod dialect;
pub mod dml;
pub mod exec;
pub mod macros;
pub mod multi;
#[cfg(test)]
mod multi_tests;
pub mod processor;
mod string_builder;
pub mod value;
pub mod valuer;
pub mod where_clause;

pub use crate::builder::{BuildError, DmlBuilder, Field};
pub use crate::dialect::{
    DefaultDialectGuard, Dialect, ParseDialectError, default_dialect, set_default_dialect,
    set_default_dialect_scoped,
};
pub use crate::dml::{DmlType, ParseDmlTypeError};
pub use crate::exec::Execer;
pub use crate::multi::{MultiBuilder, RowData};
pub use crate::processor::{DefaultProcessor, NumericProcessor, ParamProcessor};
pub use crate::value::{Arg, SqlValue};
pub use crate::valuer::{SqlValuer, ValuerError};
pub use crate::where_clause::rewrite_placeholders;

/// 便捷命名空间：允许 `use halo_dml::sqldml::{...}` 形式导入。
pub mod sqldml {
    pub use crate::*;
}
