use formflow_api::ApiError;
use serde::de::DeserializeOwned;
use sqlx::types::Json;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

/// Retrieves a JSONB column and decodes it into `T`.
pub fn get_json<T: DeserializeOwned>(
    row: &PgRow,
    col_name: &str,
) -> Result<T, Box<dyn Error + Send + Sync>> {
    let Json(value): Json<T> = row.try_get(col_name).map_err(|e| {
        format!("Value for column '{col_name}' is not valid JSON for its model: {e}")
    })?;
    Ok(value)
}

/// Maps a unique-constraint violation to `ApiError::Conflict`, leaving every
/// other error untouched.
pub fn map_unique_violation(err: sqlx::Error, message: &str) -> Box<dyn Error + Send + Sync> {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Box::new(ApiError::Conflict(message.to_string()))
        }
        _ => Box::new(err),
    }
}

/// Reorders rows fetched with `id = ANY($1)` to match the requested ids.
pub fn order_by_ids<T>(
    ids: &[uuid::Uuid],
    items: Vec<T>,
    id_of: impl Fn(&T) -> uuid::Uuid,
) -> Vec<Option<T>> {
    let mut item_map: std::collections::HashMap<uuid::Uuid, T> =
        items.into_iter().map(|item| (id_of(&item), item)).collect();
    ids.iter().map(|id| item_map.remove(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_order_by_ids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let missing = Uuid::new_v4();

        let ordered = order_by_ids(&[b, missing, a], vec![a, b], |id| *id);
        assert_eq!(ordered, vec![Some(b), None, Some(a)]);
    }

    #[test]
    fn test_map_unique_violation_passes_other_errors() {
        let err = map_unique_violation(sqlx::Error::RowNotFound, "already validated");
        assert!(err.downcast_ref::<ApiError>().is_none());
    }
}
