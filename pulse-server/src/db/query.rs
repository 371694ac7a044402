//! Generic SQL text builders.
//!
//! Every repository drives its plain CRUD through a [`TableDef`]: a static
//! description of one table that knows how to render parameterized SQL for
//! the usual verbs. Column names are compile-time constants, so the string
//! assembly here never touches request data; values always travel as `?`
//! placeholders.

/// Static description of a table: its name, identity column, and the
/// insertable (non-identity) columns in declaration order.
pub struct TableDef {
    pub name: &'static str,
    pub id_column: &'static str,
    pub columns: &'static [&'static str],
}

impl TableDef {
    /// `INSERT INTO t (a, b) VALUES (?, ?)`
    pub fn insert_sql(&self) -> String {
        let placeholders = vec!["?"; self.columns.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.name,
            self.columns.join(", "),
            placeholders
        )
    }

    fn select_list(&self) -> String {
        let mut cols = Vec::with_capacity(self.columns.len() + 1);
        cols.push(self.id_column);
        cols.extend_from_slice(self.columns);
        cols.join(", ")
    }

    /// `SELECT id, a, b FROM t ORDER BY id`, optionally with a `LIMIT ?`.
    pub fn select_all_sql(&self, with_limit: bool) -> String {
        let mut sql = format!(
            "SELECT {} FROM {} ORDER BY {}",
            self.select_list(),
            self.name,
            self.id_column
        );
        if with_limit {
            sql.push_str(" LIMIT ?");
        }
        sql
    }

    /// `SELECT id, a, b FROM t WHERE id = ?`
    pub fn select_by_id_sql(&self) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = ?",
            self.select_list(),
            self.name,
            self.id_column
        )
    }

    /// Partial update: `UPDATE t SET a = COALESCE(?, a) ... WHERE id = ?`.
    /// Binding NULL for a column keeps its stored value.
    pub fn update_sql(&self, set_columns: &[&str]) -> String {
        let assignments = set_columns
            .iter()
            .map(|col| format!("{col} = COALESCE(?, {col})"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE {} SET {} WHERE {} = ?",
            self.name, assignments, self.id_column
        )
    }

    /// `DELETE FROM t WHERE id = ?`
    pub fn delete_sql(&self) -> String {
        format!("DELETE FROM {} WHERE {} = ?", self.name, self.id_column)
    }

    /// `SELECT COUNT(*) FROM t WHERE col = ?`
    pub fn exists_sql(&self, column: &str) -> String {
        format!("SELECT COUNT(*) FROM {} WHERE {} = ?", self.name, column)
    }
}
