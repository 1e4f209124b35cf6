//! 数据库仓储层
//!
//! 服务层依赖仓储 trait 而非具体实现，便于 mock 测试。

mod notification_repo;
mod traits;
mod user_repo;

pub use notification_repo::NotificationRepository;
pub use traits::{NotificationRepositoryTrait, UserRecord, UserRepositoryTrait};
pub use user_repo::UserRepository;

#[cfg(test)]
pub use traits::{MockNotificationRepositoryTrait, MockUserRepositoryTrait};
