#[cfg(test)]
mod tests {
    use crate::builder::{Operation, Statement};
    use crate::dialect::Dialect;
    use crate::error::{ErrorKind, QueryError};
    use crate::insert::InsertBuilder;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn two_rows(dialect: Dialect, keys: &[&str]) -> InsertBuilder {
        let mut ib = InsertBuilder::new(dialect);
        ib.table("t")
            .keys(strings(keys))
            .row(strings(&["1", "'a'"]))
            .row(strings(&["2", "'b'"]));
        ib
    }

    #[test]
    fn single_row_is_plain_values_everywhere() {
        for dialect in Dialect::ALL {
            let mut ib = InsertBuilder::new(dialect);
            ib.table("t").keys(strings(&["x", "y"])).row(strings(&["1", "2"]));
            let sql = ib.build().unwrap();
            assert!(sql.starts_with("INSERT INTO "), "{sql}");
            assert!(sql.ends_with("(x,y) VALUES (1,2)"), "{sql}");
        }
    }

    #[test]
    fn wildcard_keys_are_omitted() {
        let mut ib = InsertBuilder::new(Dialect::PostgreSQL);
        ib.table("t").keys(strings(&["*"])).row(strings(&["1"]));
        assert_eq!(ib.build().unwrap(), "INSERT INTO *_DBPREFIX_*t VALUES (1)");
    }

    #[test]
    fn multi_values_where_supported() {
        assert_eq!(
            two_rows(Dialect::MySQLi, &["`k`", "`v`"]).build().unwrap(),
            "INSERT INTO `*_DBPREFIX_*t` (`k`,`v`) VALUES (1,'a'), (2,'b')"
        );
        assert_eq!(
            two_rows(Dialect::DB2, &["k", "v"]).build().unwrap(),
            "INSERT INTO *_DBPREFIX_*t (k,v) VALUES (1,'a'), (2,'b')"
        );
    }

    #[test]
    fn oracle_uses_select_from_dual() {
        assert_eq!(
            two_rows(Dialect::Oracle, &["k", "v"]).build().unwrap(),
            "INSERT INTO *_DBPREFIX_*t (k,v) SELECT 1,'a' FROM DUAL UNION ALL SELECT 2,'b' FROM DUAL"
        );
    }

    #[test]
    fn sqlite_uses_aliased_union() {
        assert_eq!(
            two_rows(Dialect::SQLite, &["k", "v"]).build().unwrap(),
            "INSERT INTO *_DBPREFIX_*t SELECT 1 AS k, 'a' AS v UNION SELECT 2, 'b'"
        );
    }

    #[test]
    fn sqlite_multi_row_requires_keys() {
        let err = two_rows(Dialect::SQLite, &[]).build().unwrap_err();
        assert_eq!(
            err,
            QueryError::MissingParameter {
                operation: Operation::Store,
                parameter: "keys",
            }
        );
        let err = two_rows(Dialect::SQLite, &["*"]).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingParameter);
    }

    #[test]
    fn width_mismatches_fail() {
        let mut ib = two_rows(Dialect::PostgreSQL, &["k", "v"]);
        ib.row(strings(&["3"]));
        assert_eq!(ib.build().unwrap_err().kind(), ErrorKind::MismatchedValues);

        let ib = two_rows(Dialect::PostgreSQL, &["k"]);
        assert_eq!(ib.build().unwrap_err().kind(), ErrorKind::MismatchedValues);
    }

    #[test]
    fn missing_table_or_values() {
        let mut ib = InsertBuilder::new(Dialect::MySQLi);
        ib.row(strings(&["1"]));
        assert_eq!(ib.build().unwrap_err().kind(), ErrorKind::MissingParameter);

        let mut ib = InsertBuilder::new(Dialect::MySQLi);
        ib.table("t");
        assert_eq!(
            ib.build().unwrap_err().to_string(),
            "builder missing parameter `values` for STORE"
        );
    }
}
