//! 业务服务层
//!
//! - `recipient`: 接收者解析（单用户 / 全员广播）
//! - `fanout`: 扇出编排（落库 + 并发推送 + 结果聚合）
//! - `query`: 用户视角的通知查询与已读维护

mod fanout;
mod query;
mod recipient;

pub use fanout::{FanoutOutcome, FanoutService};
pub use query::NotificationQueryService;
pub use recipient::{RecipientResolver, ResolvedRecipients};
