//! 数据传输对象定义
//!
//! - `request`: 请求体 DTO（带 validator 验证规则）
//! - `response`: 响应体 DTO（统一 ApiResponse 包装，camelCase）

pub mod request;
pub mod response;

pub use request::{MarkReadRequest, SendNotificationRequest, UpdatePushTokenRequest};
pub use response::{ApiResponse, NotificationDto, UserNotificationDto};
