//! 对象缓存层
//!
//! 通过插件注册表选择后端（moka 内存缓存 / redis），
//! 统一以 JSON 字符串存取。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    // 后端暂时不可用等情况：键可能存在但取不到值，调用方按未命中处理
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 取出并反序列化对象，反序列化失败视为未命中并移除脏数据
pub async fn get_json<T: DeserializeOwned>(
    cache: &dyn ObjectCache,
    key: &str,
) -> CacheResult<T> {
    match cache.get_raw(key).await {
        CacheResult::Found(raw) => match serde_json::from_str(&raw) {
            Ok(value) => CacheResult::Found(value),
            Err(e) => {
                warn!("Failed to deserialize cached object for key '{}': {}", key, e);
                cache.remove(key).await;
                CacheResult::NotFound
            }
        },
        CacheResult::NotFound => CacheResult::NotFound,
        CacheResult::ExistsButNoValue => CacheResult::ExistsButNoValue,
    }
}

/// 序列化并写入对象，ttl 为 0 时使用后端默认 TTL
pub async fn insert_json<T: Serialize>(
    cache: &dyn ObjectCache,
    key: String,
    value: &T,
    ttl: u64,
) {
    match serde_json::to_string(value) {
        Ok(raw) => cache.insert_raw(key, raw, ttl).await,
        Err(e) => {
            warn!("Failed to serialize object for cache key '{}': {}", key, e);
        }
    }
}

/// 注册缓存插件的宏：在程序加载期把构造函数写入注册表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ident) => {
        paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $plugin:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = $plugin::new()
                                .map_err($crate::errors::AttendSystemError::cache_connection)?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
