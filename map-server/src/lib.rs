//! Sala Map Server - 场厅座位地图边缘服务
//!
//! # 架构概述
//!
//! 本模块是地图服务的主入口，提供以下核心功能：
//!
//! - **持久化** (`store`): 嵌入式 redb 快照存储，按整体快照读写
//! - **座位锁定** (`locks`): 带过期时间的临时座位锁
//! - **HTTP API** (`api`): 地图、区域、座位锁、健康检查接口
//!
//! # 模块结构
//!
//! ```text
//! map-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── store/         # 地图快照持久化
//! ├── locks/         # 座位锁服务
//! └── utils/         # 错误、日志等工具
//! ```

pub mod api;
pub mod core;
pub mod locks;
pub mod store;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use locks::{LockError, LockGrant, SeatLockService};
pub use store::{MapStore, MemoryMapStore, RedbMapStore, SaveAck, StoreError};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
///
/// Call once from `main` before anything logs.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____         __
  / ___/ ____ _ / /____ _
  \__ \ / __ `// // __ `/
 ___/ // /_/ // // /_/ /
/____/ \__,_//_/ \__,_/
    __  ___
   /  |/  /____ _ ____
  / /|_/ // __ `// __ \
 / /  / // /_/ // /_/ /
/_/  /_/ \__,_// .___/
              /_/
"#
    );
}
