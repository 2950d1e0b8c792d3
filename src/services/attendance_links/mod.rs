pub mod create;
pub mod delete;
pub mod list;
pub mod resolve;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::attendance_links::requests::{
    CreateLinkRequest, LinkQueryParams, ResolveLinkQuery,
};
use crate::storage::Storage;

/// 令牌到链接的缓存键
pub(crate) fn link_token_cache_key(token: &str) -> String {
    format!("attendance:link:token:{token}")
}

pub struct AttendanceLinkService {
    storage: Option<Arc<dyn Storage>>,
}

impl AttendanceLinkService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Arc<dyn ObjectCache> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .expect("Object cache not found in app data")
            .get_ref()
            .clone()
    }

    // 创建签到链接
    pub async fn create_link(
        &self,
        request: &HttpRequest,
        link_data: CreateLinkRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_link(self, request, link_data).await
    }

    // 列出活跃的签到链接
    pub async fn list_links(
        &self,
        request: &HttpRequest,
        query: LinkQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_links(self, request, query).await
    }

    // 删除签到链接
    pub async fn delete_link(&self, request: &HttpRequest, link_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_link(self, request, link_id).await
    }

    // 解析签到链接（学生打开签到页时调用）
    pub async fn resolve_link(
        &self,
        request: &HttpRequest,
        query: ResolveLinkQuery,
    ) -> ActixResult<HttpResponse> {
        resolve::resolve_link(self, request, query).await
    }
}
