#[cfg(test)]
mod tests {
    use crate::Query;
    use crate::dialect::Dialect;
    use crate::macros::collect_into_strings;
    use pretty_assertions::assert_eq;

    #[test]
    fn into_strings_accepts_common_shapes() {
        let owned = vec!["a".to_string(), "b".to_string()];
        assert_eq!(collect_into_strings("a"), vec!["a"]);
        assert_eq!(collect_into_strings(["a", "b"]), vec!["a", "b"]);
        assert_eq!(collect_into_strings(&owned), vec!["a", "b"]);
        assert_eq!(collect_into_strings(&owned[..1]), vec!["a"]);
        assert_eq!(collect_into_strings(owned), vec!["a", "b"]);
    }

    #[test]
    fn variadic_macros_build_sql() {
        let mut q = Query::with_dialect(Dialect::SQLite);
        q.table("t").unwrap();
        crate::keys!(q, "id", "COUNT::*=>n").unwrap();
        crate::group_by_cols!(q, "id").unwrap();
        assert_eq!(
            q.get(0, 0).unwrap(),
            "SELECT id,COUNT(*) AS n FROM t GROUP BY id"
        );

        let mut q = Query::with_dialect(Dialect::PostgreSQL);
        q.table("t").unwrap();
        crate::keys!(q, ["a", "b", "c"]).unwrap();
        crate::values!(q, 1, "x", None::<i64>).unwrap();
        assert_eq!(
            q.store().unwrap(),
            "INSERT INTO t (a,b,c) VALUES (1,'x',NULL)"
        );
    }

    #[test]
    fn using_macro() {
        let mut q = Query::with_dialect(Dialect::PostgreSQL);
        q.table("t").unwrap().keys("*").unwrap();
        q.join("inner", "u", None).unwrap();
        crate::using_cols!(q, "id", "kind").unwrap();
        assert_eq!(
            q.get(0, 0).unwrap(),
            "SELECT * FROM t INNER JOIN u USING (id,kind)"
        );
    }
}
