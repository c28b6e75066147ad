#[cfg(test)]
mod tests {
    use crate::compose::Composer;
    use crate::dialect::Dialect;
    use crate::error::ErrorKind;
    use crate::escape::escape_fn;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    #[test]
    fn key_plain_and_quoted() {
        assert_eq!(Composer::new(Dialect::PostgreSQL).key("id").unwrap(), "id");
        assert_eq!(Composer::new(Dialect::MySQLi).key(" id ").unwrap(), "`id`");
        assert_eq!(Composer::new(Dialect::MySQLPdo).key("*").unwrap(), "*");
    }

    #[test]
    fn key_function_and_alias_notation() {
        let c = Composer::new(Dialect::SQLite);
        assert_eq!(c.key("COUNT::id").unwrap(), "COUNT(id)");
        assert_eq!(c.key("id=>foo").unwrap(), "id AS foo");
        assert_eq!(c.key("CONCAT::a::b=>c").unwrap(), "CONCAT(a,b) AS c");
        assert_eq!(c.key("COUNT::*=>total").unwrap(), "COUNT(*) AS total");
    }

    #[test]
    fn key_function_quotes_arguments_for_mysql() {
        let c = Composer::new(Dialect::MySQLi);
        assert_eq!(c.key("COUNT::id=>n").unwrap(), "COUNT(`id`) AS n");
        assert_eq!(c.key("COUNT::*").unwrap(), "COUNT(*)");
    }

    #[test]
    fn key_rejects_malformed_notation() {
        let c = Composer::new(Dialect::PostgreSQL);
        for bad in ["", "   ", "a=>b=>c", "=>b", "a=>", "::a"] {
            let err = c.key(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidKey, "{bad:?}");
        }
    }

    #[test]
    fn value_scalars_per_dialect() {
        let my = Composer::new(Dialect::MySQLi);
        let lite = Composer::new(Dialect::SQLite);
        assert_eq!(my.value(&SqlValue::Null).unwrap(), "NULL");
        assert_eq!(my.value(&true.into()).unwrap(), "TRUE");
        assert_eq!(lite.value(&false.into()).unwrap(), "0");
        assert_eq!(lite.value(&42_i32.into()).unwrap(), "42");
        assert_eq!(lite.value(&1.5_f64.into()).unwrap(), "1.5");
        assert_eq!(my.value(&"it's".into()).unwrap(), "'it\\'s'");
        assert_eq!(lite.value(&"it's".into()).unwrap(), "'it''s'");
    }

    #[test]
    fn value_rejects_non_finite_float() {
        let err = Composer::new(Dialect::DB2)
            .value(&f64::NAN.into())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn value_uses_injected_escaper() {
        let c = Composer::with_escaper(Dialect::PostgreSQL, escape_fn(|s| s.replace('\'', "\\'")));
        assert_eq!(c.value(&"a'b".into()).unwrap(), "'a\\'b'");
    }

    #[test]
    fn value_datetime_per_dialect() {
        let dt = datetime!(2024-03-05 10:20:30 UTC);
        assert_eq!(
            Composer::new(Dialect::MySQLi).value(&dt.into()).unwrap(),
            "'2024-03-05 10:20:30'"
        );
        assert_eq!(
            Composer::new(Dialect::Oracle).value(&dt.into()).unwrap(),
            "TO_TIMESTAMP('2024-03-05 10:20:30', 'YYYY-MM-DD HH24:MI:SS')"
        );
        assert_eq!(
            Composer::new(Dialect::SQLite).value(&dt.into()).unwrap(),
            "'2024-03-05T10:20:30+00:00'"
        );
    }
}
