//! Collector API access.
//!
//! The browse pages never talk to the upstream collector directly; they go
//! through [`OrderPlanApi`] so services can be exercised against a stub.

mod client;
mod errors;

pub use client::HttpOrderPlanClient;
pub use errors::{ApiError, ApiResult};

use async_trait::async_trait;

use crate::domain::bid_notice::BidNotice;
use crate::domain::order_plan::OrderPlanPage;
use crate::domain::types::{NoticeNo, PageSize};

/// Query for one page of the order plan list.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchQuery {
    /// 1-based page number.
    pub page: u32,
    pub size: PageSize,
    /// Keep only rows whose similarity score is at least this value.
    pub min_similarity: Option<f64>,
}

impl SearchQuery {
    /// Query for the first page under the given filter.
    #[must_use]
    pub fn first_page(size: PageSize, min_similarity: Option<f64>) -> Self {
        Self {
            page: 1,
            size,
            min_similarity,
        }
    }
}

/// Read access to the collector's order plan dataset.
#[async_trait]
pub trait OrderPlanApi: Send + Sync {
    /// Fetches one page of order plans matching the query.
    async fn list_order_plans(&self, query: &SearchQuery) -> ApiResult<OrderPlanPage>;

    /// Fetches a single bid notice by its bare notice number.
    async fn fetch_bid_notice(&self, notice_no: &NoticeNo) -> ApiResult<BidNotice>;
}
