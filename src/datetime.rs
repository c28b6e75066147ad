//! 日期/时间的方言化格式。

use crate::dialect::Dialect;
use crate::error::{QueryError, Result};
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const ORACLE_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month repr:short]-[year repr:last_two]");
const ISO_8601: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
);
const DATETIME: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const DATETIME_OFFSET: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory]:[offset_minute]"
);

fn format(dt: &OffsetDateTime, items: &[BorrowedFormatItem<'_>]) -> Result<String> {
    dt.format(items)
        .map_err(|e| QueryError::InvalidValue(format!("cannot format date-time: {e}")))
}

/// 把日期转换成目标方言能直接接受的文本（Oracle 为 `DD-Mon-YY`，SQLite 为 ISO-8601）。
pub fn convert_date(dialect: Dialect, dt: OffsetDateTime) -> Result<String> {
    match dialect {
        Dialect::Oracle => format(&dt, ORACLE_DATE),
        Dialect::SQLite => format(&dt, ISO_8601),
        _ => format(&dt, DATE),
    }
}

/// 去掉 ISO 时间串前导的 `T`（`T10:20:30` -> `10:20:30`）。
pub fn convert_time(time: &str) -> &str {
    time.trim_start_matches('T')
}

/// 日期时间字面量的文本主体（尚未转义、未加引号）。
pub(crate) fn datetime_body(dialect: Dialect, dt: &OffsetDateTime) -> Result<String> {
    match dialect {
        Dialect::PostgreSQL => format(dt, DATETIME_OFFSET),
        Dialect::SQLite => format(dt, ISO_8601),
        _ => format(dt, DATETIME),
    }
}

#[cfg(test)]
mod tests {
    use super::{convert_date, convert_time, datetime_body};
    use crate::dialect::Dialect;
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    #[test]
    fn convert_date_per_dialect() {
        let dt = datetime!(2024-03-05 10:20:30 UTC);
        assert_eq!(convert_date(Dialect::MySQLi, dt).unwrap(), "2024-03-05");
        assert_eq!(convert_date(Dialect::DB2, dt).unwrap(), "2024-03-05");
        assert_eq!(convert_date(Dialect::Oracle, dt).unwrap(), "05-Mar-24");
        assert_eq!(
            convert_date(Dialect::SQLite, dt).unwrap(),
            "2024-03-05T10:20:30+00:00"
        );
    }

    #[test]
    fn convert_time_strips_leading_t() {
        assert_eq!(convert_time("T10:20:30"), "10:20:30");
        assert_eq!(convert_time("10:20:30"), "10:20:30");
    }

    #[test]
    fn datetime_body_with_offset_for_postgres() {
        let dt = datetime!(2024-03-05 10:20:30 +08:00);
        assert_eq!(
            datetime_body(Dialect::PostgreSQL, &dt).unwrap(),
            "2024-03-05 10:20:30 +08:00"
        );
        assert_eq!(
            datetime_body(Dialect::SQLServer, &dt).unwrap(),
            "2024-03-05 10:20:30"
        );
    }
}
