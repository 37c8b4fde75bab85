use pressroom_dal::{Batch, ListingParams};
use serde::{Deserialize, Serialize};

use crate::state::AppConfig;

/// Offset paging query, 1-indexed. Out-of-range values fall back to defaults
/// instead of rejecting the request, matching the original wire behavior.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    page: Option<i64>,
    limit: Option<i64>,
}

impl Paging {
    pub fn normalize(&self, config: &AppConfig) -> (u32, u32) {
        let page = match self.page {
            Some(page) if page >= 1 => page.min(u32::MAX as i64) as u32,
            _ => 1,
        };
        let limit = match self.limit {
            Some(limit) if limit >= 1 => limit.min(config.max_page_size as i64) as u32,
            _ => config.default_page_size,
        };
        (page, limit)
    }

    pub fn into_listing_params(self, config: &AppConfig) -> ListingParams {
        let (page, limit) = self.normalize(config);
        ListingParams::new((page as i64 - 1) * limit as i64, limit as i64)
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Page<T>
where
    T: Serialize,
{
    pub fn from_batch(batch: Batch<T>, page: u32, limit: u32) -> Self {
        let total_pages = batch.total.div_ceil(limit as u64);
        Page {
            data: batch.rows,
            meta: PageMeta {
                page,
                limit,
                total: batch.total,
                total_pages,
            },
        }
    }
}
