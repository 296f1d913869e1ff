// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

pub use lessonbook_core::error::ErrorReport;
pub use lessonbook_core::error::Fallible;
pub use lessonbook_core::error::fail;

/// Everything that can go wrong with a single request to the server.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request URL could not be built.
    InvalidUrl(String),
    /// The server answered with a non-2xx status.
    Status { code: u16, body: String },
    /// The response body does not have the expected shape.
    Decode(String),
    /// Anything else: no network, connection reset, ...
    Transport(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Whether the server rejected our credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Status { code: 401, .. })
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::InvalidUrl(msg) => write!(f, "invalid URL: {msg}"),
            ApiError::Status { code, body } if body.trim().is_empty() => {
                write!(f, "server returned HTTP {code}")
            }
            ApiError::Status { code, body } => {
                write!(f, "server returned HTTP {code}: {}", body.trim())
            }
            ApiError::Decode(msg) => write!(f, "unexpected response from server: {msg}"),
            ApiError::Transport(msg) => write!(f, "request failed: {msg}"),
        }
    }
}

impl Error for ApiError {}

impl From<ApiError> for ErrorReport {
    fn from(value: ApiError) -> Self {
        ErrorReport::new(value.to_string())
    }
}

/// A form field that failed client-side validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Required(&'static str),
    NotANumber(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Required(field) => write!(f, "{field} is required."),
            ValidationError::NotANumber(field) => write!(f, "{field} must be a number."),
        }
    }
}

impl Error for ValidationError {}

impl From<ValidationError> for ErrorReport {
    fn from(value: ValidationError) -> Self {
        ErrorReport::new(value.to_string())
    }
}
