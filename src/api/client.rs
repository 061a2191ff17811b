use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::api::errors::{ApiError, ApiResult};
use crate::api::{OrderPlanApi, SearchQuery};
use crate::domain::bid_notice::BidNotice;
use crate::domain::order_plan::OrderPlanPage;
use crate::domain::types::NoticeNo;

/// HTTP client for the collector API.
#[derive(Debug, Clone)]
pub struct HttpOrderPlanClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpOrderPlanClient {
    /// Builds a client against the given base URL. Every request is bounded
    /// by `timeout`; a stalled upstream surfaces as a transport error instead
    /// of hanging the page.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }
}

/// Reads the body as text first so shape errors carry the serde message
/// rather than an opaque transport failure.
async fn decode_json<T: DeserializeOwned>(resp: reqwest::Response, url: &str) -> ApiResult<T> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

#[async_trait]
impl OrderPlanApi for HttpOrderPlanClient {
    async fn list_order_plans(&self, query: &SearchQuery) -> ApiResult<OrderPlanPage> {
        let url = format!("{}/order-plans", self.base_url);

        let mut params = vec![
            ("page", query.page.to_string()),
            ("size", query.size.get().to_string()),
        ];
        if let Some(min_similarity) = query.min_similarity {
            params.push(("min_similarity", min_similarity.to_string()));
        }

        let resp = self.http.get(&url).query(&params).send().await?;

        match resp.status().as_u16() {
            200 => decode_json(resp, &url).await,
            status => {
                if status >= 500 {
                    log::error!("서버 오류가 발생했습니다: status {status} from {url}");
                }
                Err(ApiError::Status { status, url })
            }
        }
    }

    async fn fetch_bid_notice(&self, notice_no: &NoticeNo) -> ApiResult<BidNotice> {
        let url = format!("{}/bid-notices/{}", self.base_url, notice_no);

        let resp = self.http.get(&url).send().await?;

        match resp.status().as_u16() {
            200 => decode_json(resp, &url).await,
            404 => Err(ApiError::NotFound(notice_no.to_string())),
            status => {
                if status >= 500 {
                    log::error!("서버 오류가 발생했습니다: status {status} from {url}");
                }
                Err(ApiError::Status { status, url })
            }
        }
    }
}
