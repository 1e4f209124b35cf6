//! 通知相关的请求处理器
//!
//! handler 只做请求形态校验与 DTO 组装，业务规则全部在服务层。

use axum::extract::{Path, State};
use axum::Json;
use validator::Validate;

use crate::dto::{
    ApiResponse, MarkReadRequest, NotificationDto, SendNotificationRequest,
    UpdatePushTokenRequest, UserNotificationDto,
};
use crate::error::Result;
use crate::state::AppState;

/// 发送通知（定向或广播）
///
/// POST /api/notifications
pub async fn send_notification(
    State(state): State<AppState>,
    Json(req): Json<SendNotificationRequest>,
) -> Result<Json<ApiResponse<NotificationDto>>> {
    req.validate()?;

    let outcome = state
        .fanout
        .send_notification(
            &req.recipient,
            req.title.trim(),
            req.message.trim(),
            &req.created_by,
            &req.updated_by,
        )
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        outcome.into(),
        "通知已发送",
    )))
}

/// 列出用户可见的通知
///
/// GET /api/notifications/{userId}
pub async fn list_user_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<UserNotificationDto>>>> {
    let rows = state.query.list_for_user(user_id).await?;
    let items = rows.into_iter().map(UserNotificationDto::from).collect();

    Ok(Json(ApiResponse::success(items)))
}

/// 标记一条通知为已读
///
/// PATCH /api/notifications/status
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Json(req): Json<MarkReadRequest>,
) -> Result<Json<ApiResponse<()>>> {
    req.validate()?;

    state.query.mark_read(req.user_id, req.notification_id).await?;

    Ok(Json(ApiResponse::<()>::success_with_message(
        (),
        "通知已标记为已读",
    )))
}

/// 更新用户的设备推送 token
///
/// POST /api/notifications/update-push-token
pub async fn update_push_token(
    State(state): State<AppState>,
    Json(req): Json<UpdatePushTokenRequest>,
) -> Result<Json<ApiResponse<()>>> {
    req.validate()?;

    state
        .query
        .update_push_token(req.user_id, &req.device_token)
        .await?;

    Ok(Json(ApiResponse::<()>::success_with_message(
        (),
        "设备推送 token 已更新",
    )))
}
