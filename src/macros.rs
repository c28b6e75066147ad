//! 宏集合：为 [`Query`](crate::Query) 的列表参数提供可变参数调用。
//! 通过 `keys!` / `values!` 等宏，可以直接写不定长参数而无需手动创建 `Vec`。

#[doc(hidden)]
#[macro_export]
macro_rules! __collect_strings {
    () => {
        Vec::<String>::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut values = Vec::<String>::new();
        $(
            $crate::extend_into_strings($value, &mut values);
        )*
        values
    }};
}

/// 可以展开成若干字符串的输入：单个字符串、数组、切片或 `Vec`。
pub trait IntoStrings {
    fn extend_into_strings(self, dst: &mut Vec<String>);
}

impl IntoStrings for String {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self);
    }
}

impl IntoStrings for &str {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self.to_string());
    }
}

impl IntoStrings for &String {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self.clone());
    }
}

impl<const N: usize, T: Into<String>> IntoStrings for [T; N] {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

impl<T: Into<String>> IntoStrings for Vec<T> {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

impl<T: Into<String> + Clone> IntoStrings for &[T] {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.iter().cloned().map(Into::into));
    }
}

impl<T: Into<String> + Clone> IntoStrings for &Vec<T> {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        self.as_slice().extend_into_strings(dst);
    }
}

#[doc(hidden)]
pub fn extend_into_strings<T>(value: T, dst: &mut Vec<String>)
where
    T: IntoStrings,
{
    value.extend_into_strings(dst);
}

#[doc(hidden)]
pub fn collect_into_strings<T>(value: T) -> Vec<String>
where
    T: IntoStrings,
{
    let mut dst = Vec::new();
    value.extend_into_strings(&mut dst);
    dst
}

/// `Query::keys` 的可变参数形式：`keys!(q, "id", "name=>n")`。
#[macro_export]
macro_rules! keys {
    ($query:expr $(, $key:expr)* $(,)?) => {
        $query.keys($crate::__collect_strings!($($key),*))
    };
}
pub use crate::keys;

/// `Query::values` 的可变参数形式，允许一行里混合不同类型：`values!(q, 1, "x", None::<i64>)`。
#[macro_export]
macro_rules! values {
    ($query:expr $(, $value:expr)* $(,)?) => {
        $query.values(::std::vec![$($crate::SqlValue::from($value)),*])
    };
}
pub use crate::values;

#[macro_export]
macro_rules! group_by_cols {
    ($query:expr $(, $col:expr)* $(,)?) => {
        $query.group_by($crate::__collect_strings!($($col),*))
    };
}
pub use crate::group_by_cols;

#[macro_export]
macro_rules! using_cols {
    ($query:expr $(, $col:expr)* $(,)?) => {
        $query.using($crate::__collect_strings!($($col),*))
    };
}
pub use crate::using_cols;
