//! 宏集合：为 builder 提供 Go 式的可变参数调用封装。
//!
//! WHERE 参数往往类型各异，`dml_where!` 会把每个参数分别转换成 [`Arg`](crate::Arg)，
//! 不必手写 `vec![Arg::from(..), ..]`。

/// 依次调用 `add(name, value)`。
///
/// ```
/// use halo_dml::{DmlBuilder, DmlType, dml_fields};
///
/// let mut b = DmlBuilder::new("user");
/// dml_fields!(b, "id" => 1_i64, "name" => "Monte Marto");
/// assert_eq!(b.output(DmlType::Insert), "INSERT INTO user (id, name) VALUES (?, ?)");
/// ```
#[macro_export]
macro_rules! dml_fields {
    ($builder:expr $(, $name:expr => $value:expr)* $(,)?) => {{
        let b = &mut $builder;
        $(
            b.add($name, $value);
        )*
        b
    }};
}

/// 设置 WHERE 片段，参数可以是不同类型。
#[macro_export]
macro_rules! dml_where {
    ($builder:expr, $fragment:expr $(, $arg:expr)* $(,)?) => {
        $builder.where_(
            $fragment,
            ::std::vec::Vec::<$crate::Arg>::from([$($crate::Arg::from($arg)),*]),
        )
    };
}

/// 为 `MultiBuilder::create_data` 返回的行依次设置列值。
#[macro_export]
macro_rules! row_data {
    ($row:expr $(, $name:expr => $value:expr)* $(,)?) => {{
        let r = $row;
        $(
            r.add($name, $value);
        )*
        r
    }};
}
