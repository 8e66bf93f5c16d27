//! DmlBuilder：按字段列表生成单行 INSERT / UPDATE / DELETE 及其位置参数。
//!
//! 字段与 WHERE 参数都按添加顺序保存，既不去重也不重排；同一份状态可以反复渲染，
//! 每次渲染都会先复位处理器，因此输出只取决于当前累积的状态。

use crate::dialect::{Dialect, default_dialect};
use crate::dml::DmlType;
use crate::exec::{self, Execer};
use crate::processor::ParamProcessor;
use crate::string_builder::StringBuilder;
use crate::value::Arg;
use crate::where_clause::write_where;
use std::cell::RefCell;

/// `try_output` 的显式失败原因。
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("dml refusing to build {0} without a WHERE clause")]
    EmptyWhere(DmlType),
    #[error("dml cannot build {0} without fields")]
    NoFields(DmlType),
}

/// 一个待写入的字段。
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    value: Arg,
}

impl Field {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Arg {
        &self.value
    }
}

#[derive(Debug, Clone)]
pub struct DmlBuilder {
    table: String,
    fields: Vec<Field>,
    where_: String,
    where_args: Vec<Arg>,
    allow_empty_where: bool,
    processor: RefCell<Box<dyn ParamProcessor>>,
}

impl DmlBuilder {
    /// 使用全局默认方言的处理器。
    pub fn new(table: impl Into<String>) -> Self {
        Self::with_dialect(table, default_dialect())
    }

    pub fn with_dialect(table: impl Into<String>, dialect: Dialect) -> Self {
        Self::from_boxed(table.into(), dialect.processor())
    }

    pub fn with_processor(
        table: impl Into<String>,
        processor: impl ParamProcessor + 'static,
    ) -> Self {
        Self::from_boxed(table.into(), Box::new(processor))
    }

    fn from_boxed(table: String, processor: Box<dyn ParamProcessor>) -> Self {
        Self {
            table,
            fields: Vec::new(),
            where_: String::new(),
            where_args: Vec::new(),
            allow_empty_where: false,
            processor: RefCell::new(processor),
        }
    }

    /// 是否允许 UPDATE / DELETE 不带 WHERE。默认不允许，此时输出空串。
    pub fn allow_empty_where(&mut self, allow: bool) -> &mut Self {
        self.allow_empty_where = allow;
        self
    }

    pub fn is_empty_where_allowed(&self) -> bool {
        self.allow_empty_where
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn where_fragment(&self) -> &str {
        &self.where_
    }

    pub fn where_args(&self) -> &[Arg] {
        &self.where_args
    }

    /// 追加一个字段。字段名原样使用，不校验、不去重。
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Arg>) -> &mut Self {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// 设置 WHERE 片段及其参数，整体替换之前的设置。
    ///
    /// 片段里始终用 `?` 标记参数位置，渲染时再按处理器改写。
    pub fn where_(
        &mut self,
        fragment: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<Arg>>,
    ) -> &mut Self {
        self.where_ = fragment.into();
        self.where_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// 同时返回 SQL 与参数。
    pub fn output_all(&self, kind: DmlType) -> (String, Vec<Arg>) {
        (self.output(kind), self.output_params(kind))
    }

    /// 生成 SQL，与 [`DmlBuilder::output_params`] 配合使用。
    ///
    /// 不允许空 WHERE 且未设置 WHERE 时，UPDATE / DELETE 返回空串。
    pub fn output(&self, kind: DmlType) -> String {
        if kind.needs_where() && !self.allow_empty_where && self.where_.is_empty() {
            tracing::warn!(
                target: "halo_dml",
                table = %self.table,
                kind = %kind,
                "empty WHERE not allowed, statement suppressed"
            );
            return String::new();
        }

        let mut guard = self.processor.borrow_mut();
        let processor: &mut dyn ParamProcessor = &mut **guard;
        match kind {
            DmlType::Insert => self.build_insert(processor),
            DmlType::Update => self.build_update(processor),
            DmlType::Delete => self.build_delete(processor),
        }
    }

    /// 与 `output` 相同，但把空 WHERE 与无字段报告为错误而不是返回空串。
    pub fn try_output(&self, kind: DmlType) -> Result<String, BuildError> {
        if kind.needs_where() && !self.allow_empty_where && self.where_.is_empty() {
            return Err(BuildError::EmptyWhere(kind));
        }
        if kind.takes_fields() && self.fields.is_empty() {
            return Err(BuildError::NoFields(kind));
        }
        Ok(self.output(kind))
    }

    /// 生成与 SQL 占位符一一对应的参数。
    ///
    /// - INSERT：字段值
    /// - UPDATE：字段值，然后是 WHERE 参数
    /// - DELETE：WHERE 参数
    pub fn output_params(&self, kind: DmlType) -> Vec<Arg> {
        let mut ret = Vec::new();
        if kind.takes_fields() {
            ret.extend(self.fields.iter().map(|f| f.value.clone()));
        }
        if kind.takes_where_args() {
            ret.extend(self.where_args.iter().cloned());
        }
        ret
    }

    /// 在连接上执行当前语句，错误原样返回。
    pub fn exec<E: Execer + ?Sized>(&self, db: &E, kind: DmlType) -> Result<E::Output, E::Error> {
        let (sql, args) = self.output_all(kind);
        exec::run(db, "exec", &self.table, &sql, &args)
    }

    /// 在事务上执行当前语句，行为与 `exec` 一致。
    pub fn exec_tx<E: Execer + ?Sized>(
        &self,
        tx: &E,
        kind: DmlType,
    ) -> Result<E::Output, E::Error> {
        let (sql, args) = self.output_all(kind);
        exec::run(tx, "exec_tx", &self.table, &sql, &args)
    }

    fn build_insert(&self, processor: &mut dyn ParamProcessor) -> String {
        let mut buf = StringBuilder::new();
        buf.write_str("INSERT INTO ");
        buf.write_str(&self.table);
        buf.write_str(" (");
        buf.write_joined(self.fields.iter().map(|f| f.name.as_str()), ", ");
        buf.write_str(") VALUES (");

        processor.begin_params();
        let placeholders: Vec<String> = self
            .fields
            .iter()
            .map(|f| processor.next_param(&f.name))
            .collect();
        buf.write_joined(&placeholders, ", ");
        buf.write_char(')');
        buf.into_string()
    }

    fn build_update(&self, processor: &mut dyn ParamProcessor) -> String {
        let mut buf = StringBuilder::new();
        buf.write_str("UPDATE ");
        buf.write_str(&self.table);
        buf.write_str(" SET ");

        processor.begin_params();
        for (i, f) in self.fields.iter().enumerate() {
            if i > 0 {
                buf.write_str(", ");
            }
            buf.write_str(&f.name);
            buf.write_char('=');
            buf.write_str(&processor.next_param(&f.name));
        }

        // WHERE 接着 SET 的编号继续，不复位。
        write_where(&mut buf, &self.where_, processor);
        buf.into_string()
    }

    fn build_delete(&self, processor: &mut dyn ParamProcessor) -> String {
        let mut buf = StringBuilder::new();
        buf.write_str("DELETE FROM ");
        buf.write_str(&self.table);
        processor.begin_params();
        write_where(&mut buf, &self.where_, processor);
        buf.into_string()
    }
}
