//! 占位符方言，以及进程级默认方言配置。

use crate::processor::{DefaultProcessor, NumericProcessor, ParamProcessor};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard};

/// SQL 占位符风格。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// 使用 `?` 作为占位符（常见于 MySQL/SQLite）。
    #[default]
    QuestionMark,
    /// 使用 `$1, $2, ...` 作为占位符（常见于 PostgreSQL）。
    DollarNumbered,
    /// 使用 `@p1, @p2, ...`（SQL Server）。
    AtNumbered,
    /// 使用 `:1, :2, ...`（Oracle）。
    ColonNumbered,
}

static DEFAULT_DIALECT: AtomicU8 = AtomicU8::new(Dialect::QuestionMark as u8);
static DEFAULT_DIALECT_LOCK: Mutex<()> = Mutex::new(());

impl Dialect {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::DollarNumbered,
            2 => Self::AtNumbered,
            3 => Self::ColonNumbered,
            _ => Self::QuestionMark,
        }
    }

    /// 为该方言创建一个全新的处理器。
    pub fn processor(self) -> Box<dyn ParamProcessor> {
        match self {
            Self::QuestionMark => Box::new(DefaultProcessor::new()),
            Self::DollarNumbered => Box::new(NumericProcessor::new()),
            Self::AtNumbered => Box::new(NumericProcessor::with_prefix("@p")),
            Self::ColonNumbered => Box::new(NumericProcessor::with_prefix(":")),
        }
    }
}

/// 当前全局默认方言，`DmlBuilder::new` / `MultiBuilder::new` 使用它。
pub fn default_dialect() -> Dialect {
    Dialect::from_u8(DEFAULT_DIALECT.load(Ordering::Relaxed))
}

/// 设置全局默认方言，返回旧值。
pub fn set_default_dialect(dialect: Dialect) -> Dialect {
    let old = DEFAULT_DIALECT.swap(dialect as u8, Ordering::Relaxed);
    Dialect::from_u8(old)
}

/// 修改全局默认方言的 RAII guard（持有全局锁，避免并行测试互相干扰）。
pub struct DefaultDialectGuard {
    _lock: MutexGuard<'static, ()>,
    old: Dialect,
}

impl Drop for DefaultDialectGuard {
    fn drop(&mut self) {
        set_default_dialect(self.old);
    }
}

/// 在一个作用域内临时设置默认方言，退出作用域后自动恢复。
pub fn set_default_dialect_scoped(dialect: Dialect) -> DefaultDialectGuard {
    let lock = DEFAULT_DIALECT_LOCK
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let old = set_default_dialect(dialect);
    DefaultDialectGuard { _lock: lock, old }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::QuestionMark => "QuestionMark",
            Self::DollarNumbered => "DollarNumbered",
            Self::AtNumbered => "AtNumbered",
            Self::ColonNumbered => "ColonNumbered",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("dml unknown placeholder dialect {0:?}")]
pub struct ParseDialectError(pub String);

impl FromStr for Dialect {
    type Err = ParseDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "?" | "question" | "questionmark" | "mysql" | "sqlite" => Ok(Self::QuestionMark),
            "$" | "dollar" | "dollarnumbered" | "postgres" | "postgresql" => {
                Ok(Self::DollarNumbered)
            }
            "@p" | "at" | "atnumbered" | "sqlserver" | "mssql" => Ok(Self::AtNumbered),
            ":" | "colon" | "colonnumbered" | "oracle" => Ok(Self::ColonNumbered),
            _ => Err(ParseDialectError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Dialect, ParseDialectError, default_dialect, set_default_dialect_scoped};
    use pretty_assertions::assert_eq;

    fn render_three(d: Dialect) -> Vec<String> {
        let mut p = d.processor();
        p.begin_params();
        vec![p.next_param("a"), p.next_param("b"), p.next_param("")]
    }

    #[test]
    fn processor_per_dialect() {
        assert_eq!(render_three(Dialect::QuestionMark), ["?", "?", "?"]);
        assert_eq!(render_three(Dialect::DollarNumbered), ["$1", "$2", "$3"]);
        assert_eq!(render_three(Dialect::AtNumbered), ["@p1", "@p2", "@p3"]);
        assert_eq!(render_three(Dialect::ColonNumbered), [":1", ":2", ":3"]);
    }

    #[test]
    fn scoped_default_restores() {
        let before = {
            let _g = set_default_dialect_scoped(Dialect::QuestionMark);
            default_dialect()
        };
        assert_eq!(before, Dialect::QuestionMark);

        let _g = set_default_dialect_scoped(Dialect::DollarNumbered);
        assert_eq!(default_dialect(), Dialect::DollarNumbered);
    }

    #[test]
    fn parse_names() {
        assert_eq!("postgres".parse::<Dialect>(), Ok(Dialect::DollarNumbered));
        assert_eq!(" ? ".parse::<Dialect>(), Ok(Dialect::QuestionMark));
        assert_eq!("MSSQL".parse::<Dialect>(), Ok(Dialect::AtNumbered));
        assert_eq!(
            "nosql".parse::<Dialect>(),
            Err(ParseDialectError("nosql".to_string()))
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(Dialect::DollarNumbered.to_string(), "DollarNumbered");
        assert_eq!(Dialect::default().to_string(), "QuestionMark");
    }
}
