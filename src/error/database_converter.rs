use crate::error::{AppError, ConstraintParser, ConstraintViolation};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Converts diesel errors into `AppError` variants.
///
/// Constraint violations become client errors with the offending field, everything else
/// is reported as a database failure for the given operation.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
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
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let violation = || {
            ConstraintParser::parse(
                message,
                info.details(),
                info.table_name(),
                info.constraint_name(),
            )
        };

        let converted = match kind {
            DatabaseErrorKind::UniqueViolation => violation().map(|v| AppError::Duplicate {
                entity: v.table.clone(),
                field: v.field(),
                value: v.value(),
            }),
            DatabaseErrorKind::ForeignKeyViolation => {
                let still_referenced = info
                    .details()
                    .is_some_and(|d| d.contains("is still referenced"));
                violation().map(|v| Self::foreign_key_error(v, still_referenced))
            }
            DatabaseErrorKind::NotNullViolation => violation().map(|v| AppError::Validation {
                field: v.field(),
                reason: "is required".to_string(),
            }),
            DatabaseErrorKind::CheckViolation => violation().map(|v| AppError::Validation {
                field: v.field(),
                reason: format!("violates a check constraint on {}", v.table),
            }),
            _ => None,
        };

        converted.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::msg(format!("{kind:?}: {message}")),
        })
    }

    fn foreign_key_error(violation: ConstraintViolation, still_referenced: bool) -> AppError {
        if still_referenced {
            return AppError::Validation {
                field: violation.field(),
                reason: format!(
                    "row {} is still referenced from {}",
                    violation.value(),
                    violation.table
                ),
            };
        }
        AppError::Validation {
            field: violation.field(),
            reason: format!("references a missing row with value '{}'", violation.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        details: Option<String>,
        table_name: Option<String>,
        constraint_name: Option<String>,
    }

    impl MockDatabaseErrorInfo {
        fn boxed(
            message: &str,
            details: Option<&str>,
            table_name: Option<&str>,
            constraint_name: Option<&str>,
        ) -> Box<dyn DatabaseErrorInformation + Send + Sync> {
            Box::new(Self {
                message: message.to_string(),
                details: details.map(str::to_string),
                table_name: table_name.map(str::to_string),
                constraint_name: constraint_name.map(str::to_string),
            })
        }
    }

    impl DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            self.details.as_deref()
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            self.table_name.as_deref()
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_convert_not_found_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find");
        assert!(matches!(result, AppError::NotFound { .. }));
    }

    #[test]
    fn test_convert_unique_violation() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            MockDatabaseErrorInfo::boxed(
                "duplicate key value violates unique constraint \"role_tasks_role_id_task_id_key\"",
                Some("Key (role_id, task_id)=(1, 9) already exists."),
                Some("role_tasks"),
                Some("role_tasks_role_id_task_id_key"),
            ),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert role_tasks") {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "role_tasks");
                assert_eq!(field, "role_id,task_id");
                assert_eq!(value, "1,9");
            }
            other => panic!("Expected Duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_missing_reference() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            MockDatabaseErrorInfo::boxed(
                "insert or update on table \"item_attribute_values\" violates foreign key constraint \"item_attribute_values_attribute_value_id_fkey\"",
                Some("Key (attribute_value_id)=(99) is not present in table \"attribute_values\"."),
                Some("item_attribute_values"),
                Some("item_attribute_values_attribute_value_id_fkey"),
            ),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "attribute_value_id");
                assert!(reason.contains("'99'"));
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_restricted_delete() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            MockDatabaseErrorInfo::boxed(
                "update or delete on table \"attribute_values\" violates foreign key constraint \"item_attribute_values_attribute_value_id_fkey\" on table \"item_attribute_values\"",
                Some("Key (id)=(1) is still referenced from table \"item_attribute_values\"."),
                Some("item_attribute_values"),
                None,
            ),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "delete") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "id");
                assert!(reason.contains("still referenced"));
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_not_null_violation() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::NotNullViolation,
            MockDatabaseErrorInfo::boxed(
                "null value in column \"code\" of relation \"permissions\" violates not-null constraint",
                None,
                None,
                None,
            ),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "code");
                assert_eq!(reason, "is required");
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_violation_becomes_database_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            MockDatabaseErrorInfo::boxed("opaque failure", None, None, None),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert permissions") {
            AppError::Database { operation, .. } => assert_eq!(operation, "insert permissions"),
            other => panic!("Expected Database error, got {other:?}"),
        }
    }

    #[test]
    fn test_other_errors_become_database_errors() {
        let error = DieselError::RollbackTransaction;
        match DatabaseErrorConverter::convert_diesel_error(error, "transaction") {
            AppError::Database { operation, .. } => assert_eq!(operation, "transaction"),
            other => panic!("Expected Database error, got {other:?}"),
        }
    }
}
