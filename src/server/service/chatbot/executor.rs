//! Read-only execution of model-generated SQL.
//!
//! A statement runs only if, after comments are removed, it is a single statement
//! starting with `SELECT` or `WITH` and contains none of the blocked keywords as a
//! whole word outside string literals. It then runs with `query_only` set, inside a
//! transaction that is always rolled back.

use sea_orm::{
    ConnectionTrait, DatabaseConnection, FromQueryResult, JsonValue, Statement, TransactionTrait,
};

use crate::server::error::chatbot::ChatbotError;

const BLOCKED_KEYWORDS: [&str; 19] = [
    "DROP", "DELETE", "UPDATE", "INSERT", "ALTER", "CREATE", "TRUNCATE", "EXEC", "EXECUTE",
    "REPLACE", "ATTACH", "DETACH", "PRAGMA", "BEGIN", "COMMIT", "ROLLBACK", "SAVEPOINT",
    "RELEASE", "VACUUM",
];

/// Checks a statement and returns it with comments removed and whitespace collapsed.
pub fn sanitize(sql: &str) -> Result<String, ChatbotError> {
    let cleaned = collapse_whitespace(&strip_comments(sql));
    let upper = cleaned.to_uppercase();

    if !(upper.starts_with("SELECT") || upper.starts_with("WITH")) {
        let preview: String = cleaned.chars().take(50).collect();
        return Err(ChatbotError::UnsafeQuery(format!(
            "Only SELECT queries are allowed. Query starts with: {}",
            preview
        )));
    }

    let unquoted = blank_string_literals(&upper);
    if unquoted.trim_end_matches([';', ' ']).contains(';') {
        return Err(ChatbotError::UnsafeQuery(
            "Only a single statement is allowed".to_string(),
        ));
    }

    let blocked = unquoted
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .find(|word| BLOCKED_KEYWORDS.contains(word));
    if let Some(keyword) = blocked {
        return Err(ChatbotError::UnsafeQuery(format!(
            "Query contains a forbidden operation: {}",
            keyword
        )));
    }

    Ok(cleaned.trim_end_matches([';', ' ']).to_string())
}

/// Sanitizes and runs a statement, returning each row as a JSON object.
pub async fn execute(db: &DatabaseConnection, sql: &str) -> Result<Vec<JsonValue>, ChatbotError> {
    let sql = sanitize(sql)?;
    let query_failed = |e: sea_orm::DbErr| ChatbotError::QueryFailed(e.to_string());

    let txn = db.begin().await.map_err(query_failed)?;
    txn.execute_unprepared("PRAGMA query_only = ON")
        .await
        .map_err(query_failed)?;

    let rows = JsonValue::find_by_statement(Statement::from_string(
        txn.get_database_backend(),
        sql,
    ))
    .all(&txn)
    .await;

    // query_only is per connection, not per transaction.
    let reset = txn.execute_unprepared("PRAGMA query_only = OFF").await;
    txn.rollback().await.map_err(query_failed)?;
    reset.map_err(query_failed)?;

    rows.map_err(query_failed)
}

/// Removes `--` line comments and `/* */` block comments.
///
/// Comment markers inside string literals are left alone.
fn strip_comments(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('\'' | '"', _) => {
                quote = Some(c);
                out.push(c);
            }
            ('-', Some('-')) => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        break;
                    }
                }
                out.push(' ');
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}

fn collapse_whitespace(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replaces the contents of single- and double-quoted literals with nothing.
fn blank_string_literals(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut quote: Option<char> = None;

    for c in sql.chars() {
        match quote {
            Some(q) if c == q => {
                quote = None;
                out.push(c);
            }
            Some(_) => {}
            None => {
                if c == '\'' || c == '"' {
                    quote = Some(c);
                }
                out.push(c);
            }
        }
    }

    out
}
