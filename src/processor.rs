//! 占位符处理器：决定生成 SQL 中每个参数位置写成 `?` 还是 `$1`/`@p1`/`:1`。
//!
//! 处理器在一次语句构建内是有状态的（编号计数器），builder 每次渲染开始时调用
//! [`ParamProcessor::begin_params`] 复位。同一个处理器实例被多个 builder 交错使用时，
//! 编号会互相串扰，调用方需要自行保证串行。

use dyn_clone::DynClone;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// 生成数据库可识别的参数占位符。
pub trait ParamProcessor: DynClone + fmt::Debug {
    /// 开始一条新语句的参数生成。
    fn begin_params(&mut self);

    /// 生成下一个占位符；`field_name` 在 WHERE 片段中为空串。
    fn next_param(&mut self, field_name: &str) -> String;
}

dyn_clone::clone_trait_object!(ParamProcessor);

impl ParamProcessor for Box<dyn ParamProcessor> {
    fn begin_params(&mut self) {
        (**self).begin_params()
    }

    fn next_param(&mut self, field_name: &str) -> String {
        (**self).next_param(field_name)
    }
}

/// 多个 builder 共用同一个处理器实例。
impl<P: ParamProcessor + ?Sized> ParamProcessor for Rc<RefCell<P>> {
    fn begin_params(&mut self) {
        self.borrow_mut().begin_params()
    }

    fn next_param(&mut self, field_name: &str) -> String {
        self.borrow_mut().next_param(field_name)
    }
}

/// 始终输出 `?`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultProcessor;

impl DefaultProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl ParamProcessor for DefaultProcessor {
    fn begin_params(&mut self) {}

    fn next_param(&mut self, _field_name: &str) -> String {
        "?".to_string()
    }
}

/// 输出 `前缀 + 序号`，序号从 1 开始，`begin_params` 时复位。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericProcessor {
    prefix: &'static str,
    ct: usize,
}

impl Default for NumericProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl NumericProcessor {
    /// PostgreSQL 风格：`$1, $2, ...`。
    pub fn new() -> Self {
        Self::with_prefix("$")
    }

    /// 自定义前缀，例如 SQL Server 的 `@p` 或 Oracle 的 `:`。
    pub fn with_prefix(prefix: &'static str) -> Self {
        Self { prefix, ct: 1 }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }
}

impl ParamProcessor for NumericProcessor {
    fn begin_params(&mut self) {
        self.ct = 1;
    }

    fn next_param(&mut self, _field_name: &str) -> String {
        let ret = format!("{}{}", self.prefix, self.ct);
        self.ct += 1;
        ret
    }
}

#[cfg(test)]
mod tests {
    use super::{DefaultProcessor, NumericProcessor, ParamProcessor};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn default_ignores_field_and_reset() {
        let mut p = DefaultProcessor::new();
        assert_eq!(p.next_param("id"), "?");
        p.begin_params();
        assert_eq!(p.next_param(""), "?");
    }

    #[test]
    fn numeric_counts_and_resets() {
        let mut p = NumericProcessor::new();
        p.begin_params();
        assert_eq!(p.next_param("a"), "$1");
        assert_eq!(p.next_param("b"), "$2");
        assert_eq!(p.next_param(""), "$3");
        p.begin_params();
        assert_eq!(p.next_param("a"), "$1");
    }

    #[test]
    fn numeric_starts_at_one_without_begin() {
        let mut p = NumericProcessor::new();
        assert_eq!(p.next_param("a"), "$1");
    }

    #[test]
    fn numeric_custom_prefix() {
        let mut p = NumericProcessor::with_prefix("@p");
        p.begin_params();
        assert_eq!(p.next_param("a"), "@p1");
        assert_eq!(p.next_param("b"), "@p2");
    }

    #[test]
    fn shared_processor_carries_counter() {
        let shared = Rc::new(RefCell::new(NumericProcessor::new()));
        let mut a = shared.clone();
        let mut b = shared.clone();
        a.begin_params();
        assert_eq!(a.next_param("x"), "$1");
        assert_eq!(b.next_param("y"), "$2");
    }

    #[test]
    fn boxed_trait_object_clones_state() {
        let mut p: Box<dyn ParamProcessor> = Box::new(NumericProcessor::new());
        p.begin_params();
        p.next_param("a");
        let mut q = p.clone();
        assert_eq!(q.next_param("b"), "$2");
        assert_eq!(p.next_param("b"), "$2");
    }
}
