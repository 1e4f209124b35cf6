//! 请求体 DTO 定义

use serde::Deserialize;
use validator::Validate;

/// 发送通知请求
///
/// recipient 是用户 id 的十进制文本或广播值 "All"（不区分大小写），
/// 其语义校验在服务层完成，这里只做形态校验。
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    #[validate(length(min = 1, message = "接收者不能为空"))]
    pub recipient: String,

    #[validate(length(min = 1, max = 200, message = "标题长度必须在 1-200 字符之间"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "内容长度必须在 1-2000 字符之间"))]
    pub message: String,

    #[validate(length(min = 1, max = 100, message = "创建人不能为空"))]
    pub created_by: String,

    #[validate(length(min = 1, max = 100, message = "更新人不能为空"))]
    pub updated_by: String,
}

/// 标记已读请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    #[validate(range(min = 1, message = "用户 id 必须为正数"))]
    pub user_id: i64,

    #[validate(range(min = 1, message = "通知 id 必须为正数"))]
    pub notification_id: i64,
}

/// 更新推送 token 请求
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePushTokenRequest {
    #[validate(range(min = 1, message = "用户 id 必须为正数"))]
    pub user_id: i64,

    #[validate(length(min = 1, message = "设备 token 不能为空"))]
    pub device_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_notification_request_valid() {
        let request = SendNotificationRequest {
            recipient: "All".to_string(),
            title: "例会提醒".to_string(),
            message: "周五晚七点".to_string(),
            created_by: "admin".to_string(),
            updated_by: "admin".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_send_notification_request_empty_fields() {
        let request = SendNotificationRequest {
            recipient: String::new(),
            title: String::new(),
            message: "m".to_string(),
            created_by: "admin".to_string(),
            updated_by: "admin".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("recipient"));
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_send_notification_request_title_too_long() {
        let request = SendNotificationRequest {
            recipient: "1".to_string(),
            title: "长".repeat(201),
            message: "m".to_string(),
            created_by: "admin".to_string(),
            updated_by: "admin".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_send_notification_request_camel_case_deserialization() {
        let json = r#"{
            "recipient": "7",
            "title": "t",
            "message": "m",
            "createdBy": "admin",
            "updatedBy": "admin"
        }"#;
        let request: SendNotificationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.created_by, "admin");
    }

    #[test]
    fn test_mark_read_request_rejects_non_positive_ids() {
        let request = MarkReadRequest {
            user_id: 0,
            notification_id: -3,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("user_id"));
        assert!(errors.field_errors().contains_key("notification_id"));
    }

    #[test]
    fn test_update_push_token_request() {
        let json = r#"{"userId": 7, "deviceToken": "ExponentPushToken[abc]"}"#;
        let request: UpdatePushTokenRequest = serde_json::from_str(json).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.user_id, 7);
    }
}
