//! Services coordinating the order plan browse workflows.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use crate::api::{ApiError, OrderPlanApi};
use crate::browse::Browser;
use crate::domain::bid_notice::BidNotice;
use crate::domain::types::{NoticeNo, PageSize};
use crate::dto::bid_notice::BidNoticeModalData;
use crate::dto::order_plans::IndexPageData;
use crate::export;
use crate::forms::order_plans::SearchForm;
use crate::services::{ServiceError, ServiceResult};

type SharedFetch = Shared<BoxFuture<'static, Result<BidNotice, Arc<ApiError>>>>;

/// Deduplicating bid notice fetcher.
///
/// Two clicks on the same derived notice key before the first response lands
/// share a single upstream request; the entry is dropped once it resolves, so
/// a later click fetches fresh data again.
pub struct NoticeFetcher {
    api: Arc<dyn OrderPlanApi>,
    in_flight: Mutex<HashMap<NoticeNo, SharedFetch>>,
}

impl NoticeFetcher {
    #[must_use]
    pub fn new(api: Arc<dyn OrderPlanApi>) -> Self {
        Self {
            api,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    async fn fetch(&self, notice_no: &NoticeNo) -> Result<BidNotice, Arc<ApiError>> {
        let fut = {
            let mut in_flight = self
                .in_flight
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            match in_flight.get(notice_no) {
                Some(existing) => existing.clone(),
                None => {
                    let api = Arc::clone(&self.api);
                    let key = notice_no.clone();
                    let fut = async move { api.fetch_bid_notice(&key).await.map_err(Arc::new) }
                        .boxed()
                        .shared();
                    in_flight.insert(notice_no.clone(), fut.clone());
                    fut
                }
            }
        };

        let result = fut.await;

        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(notice_no);

        result
    }
}

/// Snapshot of the controller state shaped for the index template.
pub async fn load_index_page(browser: &Browser) -> IndexPageData {
    IndexPageData::from(browser.snapshot().await)
}

/// Runs a fresh search with the filter collected by the form.
///
/// The failure is reported to the caller, but the controller has already
/// recorded the banner; routes only need to log and re-render.
pub async fn run_search(browser: &Browser, form: &SearchForm) -> ServiceResult<()> {
    browser.search(form.min_similarity()).await.map_err(|err| {
        log::error!("Order plan search failed: {err}");
        ServiceError::from(err)
    })
}

/// Loads another page of the stored search.
pub async fn change_page(browser: &Browser, page: u32) -> ServiceResult<()> {
    browser.change_page(page).await.map_err(|err| {
        log::error!("Order plan page change failed: {err}");
        ServiceError::from(err)
    })
}

/// Switches the rows-per-page step and reloads the stored search.
pub async fn change_page_size(browser: &Browser, size: PageSize) -> ServiceResult<()> {
    browser.change_page_size(size).await.map_err(|err| {
        log::error!("Order plan page size change failed: {err}");
        ServiceError::from(err)
    })
}

/// Resolves the bid notice behind a table row for the detail modal.
///
/// Rows whose embedded notice cache already holds the record are served
/// without touching the collector; everything else goes through the
/// deduplicating fetcher.
pub async fn load_notice_modal(
    browser: &Browser,
    fetcher: &NoticeFetcher,
    notice_no: &NoticeNo,
) -> ServiceResult<BidNoticeModalData> {
    let snapshot = browser.snapshot().await;
    if let Some(cached) = snapshot
        .items
        .iter()
        .find_map(|item| item.cached_notice(notice_no))
    {
        return Ok(BidNoticeModalData::from(cached));
    }

    let notice = fetcher.fetch(notice_no).await.map_err(|err| {
        log::error!("Bid notice fetch failed for {notice_no}: {err}");
        ServiceError::from(err)
    })?;

    Ok(BidNoticeModalData::from(&notice))
}

/// Builds the spreadsheet for the currently displayed page.
///
/// Returns the download filename alongside the workbook bytes. Refused with
/// [`ServiceError::EmptyExport`] when no rows are loaded.
pub async fn export_current_page(
    browser: &Browser,
    today: NaiveDate,
) -> ServiceResult<(String, Vec<u8>)> {
    let snapshot = browser.snapshot().await;
    if snapshot.items.is_empty() {
        return Err(ServiceError::EmptyExport);
    }

    let bytes = export::workbook_bytes(&snapshot.items)?;
    Ok((export::export_filename(today), bytes))
}
