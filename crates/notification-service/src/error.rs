//! 通知服务错误类型定义
//!
//! 包含通知子系统特有的错误类型及其 HTTP 映射

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;

/// 单个字段的验证错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn fmt_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// 把 Rust 字段名转成线上的 camelCase 形式（created_by -> createdBy）
///
/// validator 报告的是结构体字段名，而响应体各处都是 camelCase，
/// 字段错误键必须与请求体字段一致，客户端才能按键定位表单项。
fn to_camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// 通知服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    // 验证错误
    #[error("参数验证失败: {}", fmt_field_errors(.0))]
    Validation(Vec<FieldError>),

    // 资源不存在
    #[error("用户不存在: {0}")]
    UserNotFound(i64),
    #[error("投递记录不存在: userId={user_id} notificationId={notification_id}")]
    DeliveryRecordNotFound { user_id: i64, notification_id: i64 },

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("内部错误: {0}")]
    Internal(String),
}

impl NotifyError {
    /// 单字段验证错误的便捷构造
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,

            Self::UserNotFound(_) | Self::DeliveryRecordNotFound { .. } => StatusCode::NOT_FOUND,

            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::DeliveryRecordNotFound { .. } => "DELIVERY_RECORD_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for NotifyError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        // 验证错误在 data 中附带结构化的字段错误列表
        let data = match &self {
            Self::Validation(fields) => {
                serde_json::to_value(fields).unwrap_or(serde_json::Value::Null)
            }
            _ => serde_json::Value::Null,
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": data
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换，保留字段级错误信息，字段名统一为 camelCase
impl From<validator::ValidationErrors> for NotifyError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter()
                    .map(|e| {
                        let message = e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string());
                        FieldError::new(to_camel_case(&field), message)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        Self::Validation(fields)
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, NotifyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    /// 构造所有错误变体及其期望的 (StatusCode, error_code) 映射。
    /// 使用表驱动方式避免逐个变体写重复断言，新增变体时只需在一处维护。
    fn all_error_variants() -> Vec<(NotifyError, StatusCode, &'static str)> {
        vec![
            (
                NotifyError::Validation(vec![FieldError::new("title", "标题不能为空")]),
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
            ),
            (
                NotifyError::UserNotFound(42),
                StatusCode::NOT_FOUND,
                "USER_NOT_FOUND",
            ),
            (
                NotifyError::DeliveryRecordNotFound {
                    user_id: 1,
                    notification_id: 2,
                },
                StatusCode::NOT_FOUND,
                "DELIVERY_RECORD_NOT_FOUND",
            ),
            (
                NotifyError::Internal("unexpected state".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ]
    }

    #[test]
    fn test_all_variants_status_code() {
        for (error, expected_status, label) in all_error_variants() {
            assert_eq!(
                error.status_code(),
                expected_status,
                "状态码不匹配: variant={label}"
            );
        }
    }

    #[test]
    fn test_all_variants_error_code() {
        for (error, _status, expected_code) in all_error_variants() {
            assert_eq!(
                error.error_code(),
                expected_code,
                "错误码不匹配: expected={expected_code}"
            );
        }
    }

    #[test]
    fn test_display_contains_context() {
        assert!(NotifyError::UserNotFound(42).to_string().contains("42"));
        assert!(NotifyError::DeliveryRecordNotFound {
            user_id: 7,
            notification_id: 11,
        }
        .to_string()
        .contains("7"));

        let validation =
            NotifyError::Validation(vec![FieldError::new("recipient", "接收者不能为空")]);
        let msg = validation.to_string();
        assert!(msg.contains("recipient"));
        assert!(msg.contains("接收者不能为空"));
    }

    /// IntoResponse 是错误到 HTTP 响应的最终出口，必须验证
    /// 状态码正确且响应体结构完整（success/code/message/data 四字段）。
    #[tokio::test]
    async fn test_into_response_body_structure() {
        for (error, expected_status, expected_code) in all_error_variants() {
            let label = format!("{:?}", error);
            let response = error.into_response();

            assert_eq!(response.status(), expected_status, "响应状态码不匹配: {label}");

            let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("读取响应体失败");
            let body: serde_json::Value =
                serde_json::from_slice(&body_bytes).expect("响应体不是合法 JSON");

            assert_eq!(body["success"], json!(false), "success 字段应为 false: {label}");
            assert_eq!(body["code"], json!(expected_code), "code 字段不匹配: {label}");
            assert!(
                !body["message"].as_str().unwrap_or("").is_empty(),
                "message 不应为空: {label}"
            );
            assert!(body.get("data").is_some(), "缺少 data 字段: {label}");
        }
    }

    /// 验证错误的响应体在 data 中携带结构化字段错误列表，
    /// 客户端依赖它做逐字段的表单提示。
    #[tokio::test]
    async fn test_validation_response_carries_field_errors() {
        let error = NotifyError::Validation(vec![
            FieldError::new("title", "标题不能为空"),
            FieldError::new("message", "内容不能为空"),
        ]);

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

        let fields = body["data"].as_array().expect("data 应为字段错误数组");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["field"], "title");
        assert_eq!(fields[1]["field"], "message");
    }

    /// 系统级错误的响应消息不应泄露内部细节，只返回通用提示
    #[tokio::test]
    async fn test_database_error_hides_internal_details() {
        let error = NotifyError::Internal("stack overflow at module X".into());
        let response = error.into_response();

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        let message = body["message"].as_str().unwrap();

        assert!(!message.contains("stack overflow"));
        assert!(message.contains("服务内部错误"));
    }

    /// validator 转换必须把字段级错误信息带入 NotifyError，
    /// 否则用户无法知道哪个字段校验失败。
    #[test]
    fn test_from_validation_errors() {
        use validator::{ValidationError, ValidationErrors};

        let mut errors = ValidationErrors::new();
        let mut field_error = ValidationError::new("length");
        field_error.message = Some("标题不能为空".into());
        errors.add("title", field_error);

        let notify_error: NotifyError = errors.into();
        match &notify_error {
            NotifyError::Validation(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "title");
                assert_eq!(fields[0].message, "标题不能为空");
            }
            other => panic!("期望 Validation 变体，实际: {:?}", other),
        }

        assert_eq!(notify_error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(notify_error.error_code(), "VALIDATION_ERROR");
    }

    /// validator 报告的是结构体字段名（snake_case），转换后必须与
    /// 请求体的 camelCase 字段一致，客户端按键定位表单项。
    #[test]
    fn test_from_validation_errors_uses_camel_case_field_names() {
        use validator::{ValidationError, ValidationErrors};

        let mut errors = ValidationErrors::new();
        let mut field_error = ValidationError::new("length");
        field_error.message = Some("创建人不能为空".into());
        errors.add("created_by", field_error);

        let notify_error: NotifyError = errors.into();
        match &notify_error {
            NotifyError::Validation(fields) => {
                assert_eq!(fields[0].field, "createdBy");
            }
            other => panic!("期望 Validation 变体，实际: {:?}", other),
        }
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("created_by"), "createdBy");
        assert_eq!(to_camel_case("device_token"), "deviceToken");
        assert_eq!(to_camel_case("user_id"), "userId");
        // 无下划线的字段原样返回
        assert_eq!(to_camel_case("title"), "title");
    }

    /// sqlx::Error 通过 #[from] 自动派生 From，验证转换后类型和状态码正确
    #[test]
    fn test_from_sqlx_error() {
        let sqlx_err = sqlx::Error::RowNotFound;
        let notify_err = NotifyError::from(sqlx_err);
        assert!(matches!(notify_err, NotifyError::Database(_)));
        assert_eq!(notify_err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(notify_err.error_code(), "DATABASE_ERROR");
    }
}
