//! MultiBuilder：固定列集合的多行 INSERT。

use crate::dialect::{Dialect, default_dialect};
use crate::exec::{self, Execer};
use crate::processor::ParamProcessor;
use crate::string_builder::StringBuilder;
use crate::value::Arg;
use std::cell::RefCell;
use std::collections::HashMap;

/// 一行数据：字段名到值的映射。未设置的列在渲染时补 NULL。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowData {
    fields: HashMap<String, Arg>,
}

impl RowData {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置一列的值；同名重复设置以最后一次为准。
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Arg>) -> &mut Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct MultiBuilder {
    table: String,
    fields: Vec<String>,
    data: Vec<RowData>,
    processor: RefCell<Box<dyn ParamProcessor>>,
}

impl MultiBuilder {
    /// 使用全局默认方言的处理器。
    pub fn new<I, S>(table: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_dialect(table, default_dialect(), fields)
    }

    pub fn with_dialect<I, S>(table: impl Into<String>, dialect: Dialect, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_boxed(table.into(), dialect.processor(), fields)
    }

    pub fn with_processor<I, S>(
        table: impl Into<String>,
        processor: impl ParamProcessor + 'static,
        fields: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_boxed(table.into(), Box::new(processor), fields)
    }

    fn from_boxed<I, S>(table: String, processor: Box<dyn ParamProcessor>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table,
            fields: fields.into_iter().map(Into::into).collect(),
            data: Vec::new(),
            processor: RefCell::new(processor),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    pub fn rows(&self) -> &[RowData] {
        &self.data
    }

    /// 追加一行空数据并返回它，行立即生效。
    pub fn create_data(&mut self) -> &mut RowData {
        self.data.push(RowData::new());
        let last = self.data.len() - 1;
        &mut self.data[last]
    }

    /// 丢弃所有行，表名、列与处理器保持不变。
    pub fn clear_data(&mut self) {
        self.data = Vec::new();
    }

    /// 生成多行 INSERT 与扁平化的参数。
    ///
    /// 占位符编号跨行连续；每行按固定列顺序输出，行内缺失的列参数为 NULL。
    pub fn output(&self) -> (String, Vec<Arg>) {
        let mut buf = StringBuilder::new();
        let mut params = Vec::with_capacity(self.data.len() * self.fields.len());

        buf.write_str("INSERT INTO ");
        buf.write_str(&self.table);
        buf.write_str(" (");
        buf.write_joined(&self.fields, ", ");
        buf.write_str(") VALUES ");

        let mut guard = self.processor.borrow_mut();
        let processor: &mut dyn ParamProcessor = &mut **guard;
        processor.begin_params();
        for (i, row) in self.data.iter().enumerate() {
            if i > 0 {
                buf.write_str(", ");
            }
            buf.write_char('(');
            for (j, f) in self.fields.iter().enumerate() {
                if j > 0 {
                    buf.write_str(", ");
                }
                buf.write_str(&processor.next_param(f));
                params.push(row.get(f).cloned().unwrap_or_else(Arg::null));
            }
            buf.write_char(')');
        }

        (buf.into_string(), params)
    }

    /// 在连接上执行，错误原样返回。
    pub fn exec<E: Execer + ?Sized>(&self, db: &E) -> Result<E::Output, E::Error> {
        let (sql, args) = self.output();
        exec::run(db, "exec", &self.table, &sql, &args)
    }

    /// 在事务上执行。
    pub fn exec_tx<E: Execer + ?Sized>(&self, tx: &E) -> Result<E::Output, E::Error> {
        let (sql, args) = self.output();
        exec::run(tx, "exec_tx", &self.table, &sql, &args)
    }
}
