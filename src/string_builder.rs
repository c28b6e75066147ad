//! 语句拼接用的小工具。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    /// 写入 `s`；如果不是首次写入，会先写入一个空格。
    pub(crate) fn write_leading(&mut self, s: &str) {
        if !self.buf.is_empty() {
            self.buf.push(' ');
        }
        self.buf.push_str(s);
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// 写入 `keyword body`；`body` 为空时什么都不写。
    pub(crate) fn write_clause(&mut self, keyword: &str, body: &str) {
        if body.is_empty() {
            return;
        }
        self.write_leading(keyword);
        self.buf.push(' ');
        self.buf.push_str(body);
    }

    /// 用 `sep` 连接非空项。
    pub(crate) fn write_joined(&mut self, items: &[String], sep: &str) {
        let mut first = true;
        for s in items.iter().filter(|s| !s.is_empty()) {
            if !first {
                self.buf.push_str(sep);
            }
            self.buf.push_str(s);
            first = false;
        }
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}
