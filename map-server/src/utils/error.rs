//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构。
//!
//! # 错误分类
//!
//! | 分类 | HTTP 状态 | 说明 |
//! |------|----------|------|
//! | NotFound | 404 | 资源不存在 (调用方决定 create-or-fail) |
//! | BadRequest | 400 | 请求格式错误，未做任何处理 |
//! | Validation | 400 | 快照校验失败，带违规元素 |
//! | Conflict | 409 | 座位已被其他会话锁定 |
//! | Database | 500 | 持久化错误，不在核心内重试 |
//! | Internal | 500 | 内部错误 |
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Map for room sala-1"))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::ValidationError;
use tracing::error;

use crate::locks::LockError;
use crate::store::StoreError;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationError),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// 错误响应体: `{success: false, error, details?}`
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),

            // 校验错误带上违规元素，编辑器据此高亮
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid snapshot: {}", err),
                serde_json::to_value(err).ok(),
            ),

            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone(), None),

            // 内部错误记录日志但不暴露详细信息
            AppError::Database(msg) => {
                error!(target: "store", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                    None,
                )
            }

            AppError::Internal(err) => {
                error!(target: "internal", error = ?err, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            success: false,
            error: message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}

// ========== Conversions ==========

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(room) => AppError::not_found(format!("Map for room {}", room)),
            StoreError::InvalidSnapshot(v) => AppError::Validation(v),
            other => AppError::database(other.to_string()),
        }
    }
}

impl From<LockError> for AppError {
    fn from(err: LockError) -> Self {
        match err {
            LockError::AlreadyLocked { .. } => AppError::conflict(err.to_string()),
        }
    }
}
