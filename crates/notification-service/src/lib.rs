//! 俱乐部通知服务
//!
//! 提供通知的创建、多设备推送扇出、已读状态维护与查询的 REST API。
//!
//! ## 核心功能
//!
//! - **通知扇出**：单用户定向或全员广播，落库后并发推送到各设备
//! - **投递追踪**：每个接收者一条已读状态记录，支持标记已读
//! - **通知查询**：按用户合并定向通知与注册之后的广播通知
//! - **推送 token 管理**：维护用户的 Expo 推送 token
//!
//! ## 模块结构
//!
//! - `dto`: 请求和响应的数据传输对象
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `push`: 推送渠道适配器（Expo）
//! - `repository`: 数据库仓储层
//! - `service`: 业务服务层（扇出编排、接收者解析、查询）
//! - `handlers`: HTTP 请求处理器
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据验证：validator
//! - 序列化：serde (camelCase)

pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod push;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

// 重新导出核心类型
pub use dto::{ApiResponse, SendNotificationRequest};
pub use error::{FieldError, NotifyError, Result};
pub use models::{DeliveryStats, PushReceipt, PushTarget, RecipientSpec};
pub use push::{ExpoPushClient, PushSender};
pub use repository::{
    NotificationRepository, NotificationRepositoryTrait, UserRepository, UserRepositoryTrait,
};
pub use service::{FanoutService, NotificationQueryService, RecipientResolver};
