#[cfg(test)]
mod tests {
    use crate::builder::Statement;
    use crate::delete::DeleteBuilder;
    use crate::dialect::Dialect;
    use crate::error::ErrorKind;
    use crate::truncate::TruncateBuilder;
    use crate::update::UpdateBuilder;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn update_set_and_where() {
        let mut ub = UpdateBuilder::new(Dialect::PostgreSQL);
        ub.table("t")
            .keys(strings(&["a", "b"]))
            .rows(vec![strings(&["1", "'x'"])])
            .where_expr(Some("id = 3".to_string()));
        assert_eq!(
            ub.build().unwrap(),
            "UPDATE *_DBPREFIX_*t SET a=1,b='x' WHERE id = 3"
        );
    }

    #[test]
    fn update_rejects_two_rows_and_count_mismatch() {
        let mut ub = UpdateBuilder::new(Dialect::MySQLi);
        ub.table("t")
            .keys(strings(&["a"]))
            .rows(vec![strings(&["1"]), strings(&["2"])]);
        assert_eq!(ub.build().unwrap_err().kind(), ErrorKind::MismatchedValues);

        ub.rows(vec![strings(&["1", "2"])]);
        assert_eq!(ub.build().unwrap_err().kind(), ErrorKind::MismatchedValues);
    }

    #[test]
    fn update_requires_keys_and_values() {
        let mut ub = UpdateBuilder::new(Dialect::SQLite);
        ub.table("t").rows(vec![strings(&["1"])]);
        assert_eq!(
            ub.build().unwrap_err().to_string(),
            "builder missing parameter `keys` for UPDATE"
        );

        let mut ub = UpdateBuilder::new(Dialect::SQLite);
        ub.table("t").keys(strings(&["a"]));
        assert_eq!(
            ub.build().unwrap_err().to_string(),
            "builder missing parameter `values` for UPDATE"
        );
    }

    #[test]
    fn delete_with_and_without_where() {
        let mut db = DeleteBuilder::new(Dialect::MySQLPdo);
        db.table("t");
        assert_eq!(db.build().unwrap(), "DELETE FROM `*_DBPREFIX_*t`");
        db.where_expr(Some("`a` = 1".to_string()));
        assert_eq!(db.build().unwrap(), "DELETE FROM `*_DBPREFIX_*t` WHERE `a` = 1");

        let err = DeleteBuilder::new(Dialect::DB2).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingParameter);
    }

    #[test]
    fn truncate_per_dialect() {
        let cases = [
            (Dialect::MySQLi, "TRUNCATE TABLE `*_DBPREFIX_*t`"),
            (Dialect::Oracle, "TRUNCATE TABLE *_DBPREFIX_*t"),
            (Dialect::SQLServer, "TRUNCATE TABLE *_DBPREFIX_*t"),
            (Dialect::PostgreSQL, "TRUNCATE *_DBPREFIX_*t RESTART IDENTITY"),
            (
                Dialect::DB2,
                "TRUNCATE TABLE *_DBPREFIX_*t IGNORE DELETE TRIGGERS DROP STORAGE IMMEDIATE",
            ),
            (
                Dialect::SQLite,
                "DELETE FROM *_DBPREFIX_*t; DELETE FROM SQLITE_SEQUENCE WHERE name='*_DBPREFIX_*t'",
            ),
        ];
        for (dialect, want) in cases {
            let mut tb = TruncateBuilder::new(dialect);
            tb.table("t");
            assert_eq!(tb.build().unwrap(), want);
        }
        let err = TruncateBuilder::new(Dialect::SQLite).build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingParameter);
    }
}
