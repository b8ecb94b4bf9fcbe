use std::sync::Arc;

use chrono::Duration;

use crate::core::Config;
use crate::locks::SeatLockService;
use crate::store::{MapStore, RedbMapStore};

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是服务的核心数据结构，使用 Arc 实现浅拷贝，
/// 每个请求处理器持有一份廉价克隆。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | store | Arc<dyn MapStore> | 地图快照持久化 |
/// | locks | Arc<SeatLockService> | 座位锁服务 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 地图快照存储 (生产环境为 redb，测试可注入内存实现)
    pub store: Arc<dyn MapStore>,
    /// 座位锁服务
    pub locks: Arc<SeatLockService>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替；测试用它注入
    /// 内存存储。
    pub fn new(config: Config, store: Arc<dyn MapStore>) -> Self {
        let ttl = Duration::seconds(config.seat_hold_ttl_secs as i64);
        Self {
            config,
            store,
            locks: Arc::new(SeatLockService::new(ttl)),
        }
    }

    /// 初始化服务器状态：打开工作目录下的 redb 数据库
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;
        let store = RedbMapStore::open(config.db_path())?;
        tracing::info!(path = %config.db_path().display(), "Map store opened");
        Ok(Self::new(config.clone(), Arc::new(store)))
    }

    /// 启动后台任务 (过期锁清理)
    pub fn start_background_tasks(&self) {
        self.locks
            .clone()
            .spawn_sweeper(self.config.lock_sweep_interval_secs);
    }
}
