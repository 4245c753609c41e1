//! Shared repository utilities.
//!
//! Column names always come from `'static` whitelists; every user-supplied value
//! goes through `push_bind`.

use sqlx::{Postgres, QueryBuilder};

/// Appends WHERE or AND to the query builder depending on whether a clause has already been added.
pub fn push_clause(builder: &mut QueryBuilder<'_, Postgres>, has_clause: &mut bool) {
    if *has_clause {
        builder.push(" AND ");
    } else {
        builder.push(" WHERE ");
        *has_clause = true;
    }
}

/// Appends `column = $n` equality predicates joined with AND.
pub fn push_equality_filters(
    builder: &mut QueryBuilder<'_, Postgres>,
    has_clause: &mut bool,
    filters: &[(&'static str, &str)],
) {
    for (column, value) in filters {
        push_clause(builder, has_clause);
        builder.push(*column);
        builder.push(" = ");
        builder.push_bind(value.to_string());
    }
}

/// Appends `column = $n` assignments separated by commas, for an UPDATE ... SET.
pub fn push_assignments(
    builder: &mut QueryBuilder<'_, Postgres>,
    assignments: &[(&'static str, &str)],
) {
    let mut separated = builder.separated(", ");
    for (column, value) in assignments {
        separated.push(format!("{} = ", column));
        separated.push_bind_unseparated(value.to_string());
    }
}
