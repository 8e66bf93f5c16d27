//! WHERE 片段渲染：把调用方写的 `?` 替换成处理器生成的占位符。
//!
//! 片段本身原样输出，只有位于单引号/双引号字符串字面量之外的 `?` 会被替换。
//! 引号只由同种引号闭合，字面量内部出现的另一种引号按普通字符处理；不识别反斜杠转义。

use crate::processor::ParamProcessor;
use crate::string_builder::StringBuilder;

/// 按出现顺序把 `fragment` 中字面量以外的 `?` 逐个替换为 `processor.next_param("")`。
pub fn rewrite_placeholders(fragment: &str, processor: &mut dyn ParamProcessor) -> String {
    let mut buf = StringBuilder::new();
    write_rewritten(&mut buf, fragment, processor);
    buf.into_string()
}

/// 写入 ` WHERE <片段>`；片段为空时什么都不写。
pub(crate) fn write_where(
    buf: &mut StringBuilder,
    fragment: &str,
    processor: &mut dyn ParamProcessor,
) {
    if fragment.is_empty() {
        return;
    }
    buf.write_str(" WHERE ");
    write_rewritten(buf, fragment, processor);
}

fn write_rewritten(buf: &mut StringBuilder, fragment: &str, processor: &mut dyn ParamProcessor) {
    let mut quote: Option<char> = None;
    for c in fragment.chars() {
        match c {
            '\'' | '"' => {
                if quote == Some(c) {
                    quote = None;
                } else if quote.is_none() {
                    quote = Some(c);
                }
                buf.write_char(c);
            }
            '?' if quote.is_none() => buf.write_str(&processor.next_param("")),
            _ => buf.write_char(c),
        }
    }
}
