//! Create the schema and the `student`, `course`, and `student_courses` tables.
//! Every statement is `IF NOT EXISTS`, so this runs on each startup.

use crate::error::AppError;
use crate::store::quote_ident;
use sqlx::PgPool;

/// Apply DDL in dependency order: schema, then the two entity tables, then the join table.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    let schema_q = quote_ident(schema);
    for sql in ddl(&schema_q) {
        tracing::debug!(sql = %sql, "migration");
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!(schema = %schema, "tables ready");
    Ok(())
}

fn ddl(schema: &str) -> Vec<String> {
    vec![
        format!("CREATE SCHEMA IF NOT EXISTS {}", schema),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {}.student (
                id BIGSERIAL PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                birth_date DATE NOT NULL,
                gender TEXT NOT NULL,
                gsm_number TEXT
            )
            "#,
            schema
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {}.course (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                phase INTEGER NOT NULL
            )
            "#,
            schema
        ),
        format!("CREATE INDEX IF NOT EXISTS course_name_idx ON {}.course (name, id)", schema),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {s}.student_courses (
                student_id BIGINT NOT NULL REFERENCES {s}.student (id) ON DELETE CASCADE,
                course_id BIGINT NOT NULL REFERENCES {s}.course (id) ON DELETE CASCADE,
                seq BIGSERIAL,
                PRIMARY KEY (student_id, course_id)
            )
            "#,
            s = schema
        ),
        format!(
            "CREATE INDEX IF NOT EXISTS student_courses_course_idx ON {}.student_courses (course_id)",
            schema
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_table_comes_last_and_cascades() {
        let stmts = ddl("\"public\"");
        assert!(stmts[0].starts_with("CREATE SCHEMA IF NOT EXISTS \"public\""));
        let join = stmts.iter().position(|s| s.contains("student_courses (")).unwrap();
        let student = stmts.iter().position(|s| s.contains(".student (")).unwrap();
        let course = stmts.iter().position(|s| s.contains(".course (")).unwrap();
        assert!(join > student && join > course);
        assert!(stmts[join].contains("ON DELETE CASCADE"));
        assert!(stmts[join].contains("PRIMARY KEY (student_id, course_id)"));
    }
}
