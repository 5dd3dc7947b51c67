use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// The `Vegetables` table only carries a primary key and a single NOT NULL
/// column, so the interesting cases are missing rows, NOT NULL violations and
/// dropped connections; everything else becomes a generic `Database` error.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info, operation)
            }
            DieselError::NotFound => AppError::NotFound {
                entity: "resource".to_string(),
                field: "id".to_string(),
                value: "unknown".to_string(),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync>,
        operation: &str,
    ) -> AppError {
        let message = info.message().to_string();

        match kind {
            DatabaseErrorKind::NotNullViolation => match info.column_name() {
                Some(column) => AppError::Validation {
                    field: column.to_string(),
                    reason: "Field is required".to_string(),
                },
                None => AppError::Database {
                    operation: operation.to_string(),
                    source: anyhow::Error::msg(format!(
                        "Not null constraint violation: {}",
                        message
                    )),
                },
            },
            DatabaseErrorKind::ClosedConnection => AppError::ConnectionPool {
                source: anyhow::Error::msg(format!("Connection closed: {}", message)),
            },
            DatabaseErrorKind::UniqueViolation => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!(
                    "Unique constraint violation: {}",
                    message
                )),
            },
            _ => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_not_found() {
        let err = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "select");
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn test_rollback_transaction_maps_to_database() {
        let err = DatabaseErrorConverter::convert_diesel_error(
            DieselError::RollbackTransaction,
            "update vegetable",
        );
        match err {
            AppError::Database { operation, .. } => assert_eq!(operation, "update vegetable"),
            other => panic!("Expected Database error, got {:?}", other),
        }
    }

    #[test]
    fn test_unique_violation_maps_to_database() {
        let err = DatabaseErrorConverter::convert_diesel_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new("duplicate key value violates unique constraint \"PK_Vegetables\"".to_string()),
            ),
            "insert vegetable",
        );
        assert!(matches!(err, AppError::Database { .. }));
    }

    #[test]
    fn test_closed_connection_maps_to_pool_error() {
        let err = DatabaseErrorConverter::convert_diesel_error(
            DieselError::DatabaseError(
                DatabaseErrorKind::ClosedConnection,
                Box::new("server closed the connection".to_string()),
            ),
            "select",
        );
        assert!(matches!(err, AppError::ConnectionPool { .. }));
    }
}
