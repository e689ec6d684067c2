use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::storage::{KeyValueStore, Repository};

/// 应用程序上下文
///
/// [`AppState`] 持有仓储对象，所有请求共享同一份内容缓存。
#[derive(Clone)]
pub struct AppState {
    repo: Arc<Repository>,
}

impl AppState {
    /// 创建一个新的 [`AppState`] 实例
    pub fn new(store: Arc<dyn KeyValueStore>, sample_data: bool) -> Self {
        Self {
            repo: Arc::new(Repository::new(store).with_sample_data(sample_data)),
        }
    }

    /// 获取仓储对象
    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// 本地时区的今天
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
