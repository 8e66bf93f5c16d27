#[cfg(test)]
mod tests {
    use crate::processor::{DefaultProcessor, NumericProcessor};
    use crate::value::Arg;
    use crate::{Dialect, MultiBuilder, row_data, set_default_dialect_scoped};
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_fields_become_null() {
        let mut mb = MultiBuilder::with_processor(
            "user",
            NumericProcessor::new(),
            ["id", "name", "age", "city"],
        );
        mb.create_data()
            .add("id", 1_i64)
            .add("name", "ann")
            .add("age", 30_i64)
            .add("city", "Oslo");
        // 行内添加顺序与列顺序无关。
        mb.create_data().add("name", "bob").add("id", 2_i64);

        let (sql, args) = mb.output();
        assert_eq!(
            sql,
            "INSERT INTO user (id, name, age, city) VALUES ($1, $2, $3, $4), ($5, $6, $7, $8)"
        );
        assert_eq!(
            args,
            vec![
                Arg::from(1_i64),
                Arg::from("ann"),
                Arg::from(30_i64),
                Arg::from("Oslo"),
                Arg::from(2_i64),
                Arg::from("bob"),
                Arg::null(),
                Arg::null(),
            ]
        );
    }

    #[test]
    fn default_processor_rows() {
        let mut mb = MultiBuilder::with_processor("t", DefaultProcessor::new(), ["a", "b"]);
        row_data!(mb.create_data(), "a" => 1_i64, "b" => 2_i64);
        row_data!(mb.create_data(), "b" => 4_i64);
        row_data!(mb.create_data());

        let (sql, args) = mb.output();
        assert_eq!(sql, "INSERT INTO t (a, b) VALUES (?, ?), (?, ?), (?, ?)");
        assert_eq!(args.len(), 6);
        assert!(args[2].is_null());
        assert_eq!(args[3], Arg::from(4_i64));
        assert!(args[4].is_null() && args[5].is_null());
    }

    #[test]
    fn row_add_overwrites_same_name() {
        let mut mb = MultiBuilder::with_processor("t", DefaultProcessor::new(), ["a"]);
        let row = mb.create_data();
        row.add("a", 1_i64).add("a", 9_i64);
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("a"), Some(&Arg::from(9_i64)));

        let (_, args) = mb.output();
        assert_eq!(args, vec![Arg::from(9_i64)]);
    }

    #[test]
    fn values_outside_fixed_columns_are_ignored() {
        let mut mb = MultiBuilder::with_processor("t", DefaultProcessor::new(), ["a"]);
        row_data!(mb.create_data(), "a" => 1_i64, "zzz" => 2_i64);
        let (sql, args) = mb.output();
        assert_eq!(sql, "INSERT INTO t (a) VALUES (?)");
        assert_eq!(args, vec![Arg::from(1_i64)]);
    }

    #[test]
    fn clear_data_keeps_table_and_fields() {
        let mut mb = MultiBuilder::with_processor("t", NumericProcessor::new(), ["a", "b"]);
        assert!(!mb.has_data());
        row_data!(mb.create_data(), "a" => 1_i64);
        row_data!(mb.create_data(), "a" => 2_i64);
        assert!(mb.has_data());
        assert_eq!(mb.data_len(), 2);

        mb.clear_data();
        assert!(!mb.has_data());
        assert_eq!(mb.data_len(), 0);
        assert_eq!(mb.table(), "t");
        assert_eq!(mb.fields(), &["a".to_string(), "b".to_string()]);

        let (sql, args) = mb.output();
        assert_eq!(sql, "INSERT INTO t (a, b) VALUES ");
        assert!(args.is_empty());

        row_data!(mb.create_data(), "b" => 3_i64);
        assert_eq!(mb.output().0, "INSERT INTO t (a, b) VALUES ($1, $2)");
    }

    #[test]
    fn numbering_restarts_per_output() {
        let mut mb = MultiBuilder::with_processor("t", NumericProcessor::new(), ["a"]);
        row_data!(mb.create_data(), "a" => 1_i64);
        row_data!(mb.create_data(), "a" => 2_i64);
        let first = mb.output();
        let second = mb.output();
        assert_eq!(first.0, "INSERT INTO t (a) VALUES ($1), ($2)");
        assert_eq!(first, second);
    }

    #[test]
    fn new_follows_default_dialect() {
        let _g = set_default_dialect_scoped(Dialect::ColonNumbered);
        let mut mb = MultiBuilder::new("t", vec!["a".to_string(), "b".to_string()]);
        row_data!(mb.create_data(), "a" => 1_i64, "b" => ());
        assert_eq!(mb.output().0, "INSERT INTO t (a, b) VALUES (:1, :2)");
        assert_eq!(mb.rows().len(), 1);
        assert!(mb.rows()[0].get("b").is_some_and(Arg::is_null));
    }
}
