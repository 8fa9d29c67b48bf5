use serde::Serialize;
use thiserror::Error;

use crate::{IntoResponse, Json, Response, Status};

/// Why a recipe request was rejected.
#[derive(Debug, Error, PartialEq)]
pub enum RecipeError {
    /// The body is missing a field, has the wrong shape, or fails a rule.
    #[error("{0}")]
    Validation(String),

    /// No live recipe has the given id.
    #[error("recipe `{0}` not found")]
    NotFound(String),
}

impl RecipeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Validation(_) => Status::BadRequest,
            Self::NotFound(_) => Status::NotFound,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for RecipeError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
