//! Execer：执行生成的 SQL 的外部能力。
//!
//! builder 只负责拼 SQL 与参数，真正的执行交给实现了 [`Execer`] 的连接或事务。
//! 执行器返回的错误原样透传，builder 不包装、不重试。

use crate::value::Arg;

/// 以位置参数执行一条 SQL。
///
/// 直连和事务都可以实现这个 trait，builder 对两者一视同仁。
pub trait Execer {
    /// 执行结果，例如受影响的行数。
    type Output;
    /// 驱动错误。
    type Error;

    fn exec(&self, sql: &str, args: &[Arg]) -> Result<Self::Output, Self::Error>;
}

impl<E: Execer + ?Sized> Execer for &E {
    type Output = E::Output;
    type Error = E::Error;

    fn exec(&self, sql: &str, args: &[Arg]) -> Result<Self::Output, Self::Error> {
        (**self).exec(sql, args)
    }
}

/// builder 的 `exec` / `exec_tx` 共用的下发逻辑。
pub(crate) fn run<E: Execer + ?Sized>(
    db: &E,
    scope: &'static str,
    table: &str,
    sql: &str,
    args: &[Arg],
) -> Result<E::Output, E::Error> {
    tracing::debug!(
        target: "halo_dml",
        scope,
        table,
        sql,
        args = args.len(),
        "executing dml"
    );
    let res = db.exec(sql, args);
    if res.is_err() {
        tracing::debug!(target: "halo_dml", scope, table, "dml execution failed");
    }
    res
}

#[cfg(feature = "rusqlite")]
mod sqlite {
    use super::Execer;
    use crate::value::{Arg, SqlValue};
    use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};

    impl ToSql for SqlValue {
        fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
            Ok(match self {
                SqlValue::Null => ToSqlOutput::Owned(Value::Null),
                SqlValue::Bool(v) => ToSqlOutput::Owned(Value::Integer(i64::from(*v))),
                SqlValue::I64(v) => ToSqlOutput::Owned(Value::Integer(*v)),
                SqlValue::U64(v) => {
                    let v = i64::try_from(*v)
                        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
                    ToSqlOutput::Owned(Value::Integer(v))
                }
                SqlValue::F64(v) => ToSqlOutput::Owned(Value::Real(*v)),
                SqlValue::String(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
                SqlValue::Bytes(v) => ToSqlOutput::Borrowed(ValueRef::Blob(v)),
                SqlValue::DateTime(v) => {
                    let s = v
                        .format(&time::format_description::well_known::Rfc3339)
                        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
                    ToSqlOutput::Owned(Value::Text(s))
                }
            })
        }
    }

    fn resolve_all(args: &[Arg]) -> rusqlite::Result<Vec<SqlValue>> {
        args.iter()
            .map(|a| {
                a.resolve()
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })
            .collect()
    }

    impl Execer for rusqlite::Connection {
        type Output = usize;
        type Error = rusqlite::Error;

        fn exec(&self, sql: &str, args: &[Arg]) -> rusqlite::Result<usize> {
            let values = resolve_all(args)?;
            self.execute(sql, rusqlite::params_from_iter(values.iter()))
        }
    }

    impl Execer for rusqlite::Transaction<'_> {
        type Output = usize;
        type Error = rusqlite::Error;

        fn exec(&self, sql: &str, args: &[Arg]) -> rusqlite::Result<usize> {
            let values = resolve_all(args)?;
            self.execute(sql, rusqlite::params_from_iter(values.iter()))
        }
    }
}
