#[cfg(test)]
mod tests {
    use crate::builder::Statement;
    use crate::dialect::Dialect;
    use crate::error::ErrorKind;
    use crate::select::{Join, JoinType, SelectBuilder};
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn select(dialect: Dialect) -> SelectBuilder {
        let mut sb = SelectBuilder::new(dialect);
        sb.table("t").keys(strings(&["a", "b"]));
        sb
    }

    #[test]
    fn select_minimal_and_distinct() {
        let mut sb = select(Dialect::PostgreSQL);
        assert_eq!(sb.build().unwrap(), "SELECT a,b FROM *_DBPREFIX_*t");
        sb.distinct(true);
        assert_eq!(sb.build().unwrap(), "SELECT DISTINCT a,b FROM *_DBPREFIX_*t");
        assert_eq!(
            select(Dialect::MySQLi).build().unwrap(),
            "SELECT a,b FROM `*_DBPREFIX_*t`"
        );
    }

    #[test]
    fn select_requires_table_and_keys() {
        let mut sb = SelectBuilder::new(Dialect::SQLite);
        sb.keys(strings(&["a"]));
        assert_eq!(sb.build().unwrap_err().kind(), ErrorKind::MissingParameter);

        let mut sb = SelectBuilder::new(Dialect::SQLite);
        sb.table("t");
        let err = sb.build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "builder missing parameter `keys` for GET"
        );
    }

    #[test]
    fn select_all_clauses_in_order() {
        let mut sb = select(Dialect::PostgreSQL);
        sb.join(Join::new(JoinType::LeftOuter, "u", Some("x")).unwrap())
            .on(Some("t.id=x.tid".to_string()))
            .where_expr(Some("a = 1".to_string()))
            .group_by(strings(&["a", "b"]))
            .having(strings(&["COUNT(a) > 1", "SUM(b) < 9"]))
            .order_by(strings(&["a DESC", "b"]))
            .limit(10)
            .offset(20);
        assert_eq!(
            sb.build().unwrap(),
            "SELECT a,b FROM *_DBPREFIX_*t LEFT OUTER JOIN *_DBPREFIX_*u AS x ON t.id=x.tid \
             WHERE a = 1 GROUP BY a,b HAVING COUNT(a) > 1 AND SUM(b) < 9 ORDER BY a DESC, b \
             LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn using_wins_over_on_and_both_need_a_join() {
        let mut sb = select(Dialect::SQLite);
        sb.using(strings(&["id", "kind"]))
            .on(Some("t.id=u.id".to_string()));
        assert_eq!(sb.build().unwrap(), "SELECT a,b FROM *_DBPREFIX_*t");

        sb.join(Join::new(JoinType::Plain, "u", None).unwrap());
        assert_eq!(
            sb.build().unwrap(),
            "SELECT a,b FROM *_DBPREFIX_*t JOIN *_DBPREFIX_*u USING (id,kind)"
        );

        sb.using(Vec::new());
        assert_eq!(
            sb.build().unwrap(),
            "SELECT a,b FROM *_DBPREFIX_*t JOIN *_DBPREFIX_*u ON t.id=u.id"
        );
    }

    #[test]
    fn join_type_parsing() {
        assert_eq!("left  outer".parse::<JoinType>().unwrap(), JoinType::LeftOuter);
        assert_eq!("".parse::<JoinType>().unwrap(), JoinType::Plain);
        assert_eq!("natural".parse::<JoinType>().unwrap(), JoinType::Natural);
        let err = "SIDEWAYS".parse::<JoinType>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidClause);
        let err = Join::new(JoinType::Inner, " ", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidClause);
    }

    #[test]
    fn limit_offset_per_dialect() {
        let cases = [
            (Dialect::MySQLi, 0, " LIMIT 5"),
            (Dialect::MySQLPdo, 10, " LIMIT 10,5"),
            (Dialect::PostgreSQL, 10, " LIMIT 5 OFFSET 10"),
            (Dialect::SQLite, 0, " LIMIT 5"),
            (Dialect::Oracle, 0, " OFFSET 0 ROWS FETCH NEXT 5 ROWS ONLY"),
            (
                Dialect::SQLServer,
                10,
                " ORDER BY 1 OFFSET 10 ROWS FETCH NEXT 5 ROWS ONLY",
            ),
            (Dialect::DB2, 0, " FETCH FIRST 5 ROWS ONLY"),
            (Dialect::DB2, 10, " OFFSET 10 ROWS FETCH FIRST 5 ROWS ONLY"),
        ];
        for (dialect, offset, tail) in cases {
            let mut sb = SelectBuilder::new(dialect);
            sb.table("t").keys(strings(&["a"])).limit(5).offset(offset);
            let sql = sb.build().unwrap();
            assert!(sql.ends_with(tail), "{dialect}: {sql}");
        }
    }

    #[test]
    fn offset_without_limit_is_ignored() {
        let mut sb = select(Dialect::PostgreSQL);
        sb.offset(10);
        assert_eq!(sb.build().unwrap(), "SELECT a,b FROM *_DBPREFIX_*t");
    }

    #[test]
    fn sqlserver_keeps_explicit_order_by() {
        let mut sb = select(Dialect::SQLServer);
        sb.order_by(strings(&["a ASC"])).limit(3);
        assert_eq!(
            sb.build().unwrap(),
            "SELECT a,b FROM *_DBPREFIX_*t ORDER BY a ASC OFFSET 0 ROWS FETCH NEXT 3 ROWS ONLY"
        );
    }
}
