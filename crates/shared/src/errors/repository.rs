use sqlx::Error as SqlxError;
use sqlx::error::ErrorKind;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        if matches!(err, SqlxError::RowNotFound) {
            return RepositoryError::NotFound;
        }

        let classified = match &err {
            SqlxError::Database(db_err) => Some((db_err.kind(), db_err.message().to_string())),
            _ => None,
        };

        match classified {
            Some((ErrorKind::UniqueViolation, message)) => RepositoryError::AlreadyExists(message),
            Some((ErrorKind::ForeignKeyViolation, message)) => RepositoryError::ForeignKey(message),
            Some((ErrorKind::NotNullViolation | ErrorKind::CheckViolation, message)) => {
                RepositoryError::Constraint(message)
            }
            _ => RepositoryError::Sqlx(err),
        }
    }
}

impl From<ValidationErrors> for RepositoryError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();

        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| match error.code.as_ref() {
                        "email" => "Invalid email format".to_string(),
                        "length" => "Invalid length".to_string(),
                        "range" => "Value out of range".to_string(),
                        _ => format!("Invalid {field}"),
                    });
                messages.push(format!("{field}: {message}"));
            }
        }

        RepositoryError::Validation(messages)
    }
}
