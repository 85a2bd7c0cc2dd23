use axum::http::StatusCode;
use thiserror::Error;

/// Rejected input to a metric-recording operation. The display string is the
/// advisory message shown to the user; state is never touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid exercise duration (at least 1 minute)")]
    ExerciseMinutes,

    #[error("Please enter an exercise name")]
    ExerciseLabel,

    #[error("Please enter a valid sleep goal (4-12 hours)")]
    SleepGoal,

    #[error("Please enter a valid number of sleep hours")]
    SleepHours,

    #[error("Please enter a valid number of steps (1-50,000)")]
    Steps,

    #[error("Please enter valid height (50-300 cm) and weight (20-500 kg)")]
    BodyMeasurements,

    #[error("Please choose a mood between 1 and 5")]
    Mood,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
