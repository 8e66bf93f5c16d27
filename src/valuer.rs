//! SqlValuer：参数值的开放扩展点。
//!
//! builder 只按位置收集参数，不关心值的具体类型；需要延迟计算或自定义序列化的值
//! 实现这个 trait 即可，执行器在真正下发前调用 [`SqlValuer::value`]。

use crate::value::SqlValue;

/// Valuer 错误。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("dml valuer error: {0}")]
pub struct ValuerError(pub String);

impl ValuerError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// 在执行阶段才得到实际值的参数。
pub trait SqlValuer: dyn_clone::DynClone + std::fmt::Debug {
    fn value(&self) -> Result<SqlValue, ValuerError>;
}

dyn_clone::clone_trait_object!(SqlValuer);
