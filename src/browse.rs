//! Page controller for the order plan browser.
//!
//! [`Browser`] owns the single state bundle the pages render from: the
//! current result set, the stored search filter, pagination and the error
//! banner. Every mutation goes through one of three transitions (search,
//! page change, page size change), each of which issues exactly one upstream
//! request.
//!
//! Overlapping requests are resolved by a monotonic sequence number: every
//! issued request gets the next number, and a response is applied only if no
//! newer response has been applied before it. A response that lost the race
//! is discarded wholesale, so the displayed state always belongs to the
//! newest resolved request rather than to whichever response happened to
//! arrive last.
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::{ApiResult, OrderPlanApi, SearchQuery};
use crate::domain::order_plan::OrderPlanItem;
use crate::domain::types::PageSize;

/// Which browse transition failed. Each carries its own user-facing banner
/// text; the underlying cause is logged, never shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowseErrorKind {
    Search,
    PageChange,
    PageSizeChange,
}

impl BrowseErrorKind {
    /// Localized banner message for the failed transition.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            BrowseErrorKind::Search => "조회 중 오류가 발생했습니다.",
            BrowseErrorKind::PageChange => "페이지 로딩 중 오류가 발생했습니다.",
            BrowseErrorKind::PageSizeChange => "데이터 로딩 중 오류가 발생했습니다.",
        }
    }
}

/// The mutable state bundle behind the browser lock.
#[derive(Debug)]
struct BrowseState {
    items: Vec<OrderPlanItem>,
    total: u32,
    page: u32,
    size: PageSize,
    /// Filter of the last successful search; reused by page and size changes.
    min_similarity: Option<f64>,
    has_searched: bool,
    error: Option<BrowseErrorKind>,
    issued_seq: u64,
    applied_seq: u64,
    done_seq: u64,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            size: PageSize::default(),
            min_similarity: None,
            has_searched: false,
            error: None,
            issued_seq: 0,
            applied_seq: 0,
            done_seq: 0,
        }
    }
}

impl BrowseState {
    /// Assigns the next request sequence number. Issuing a transition always
    /// clears the previous error banner.
    fn issue(&mut self) -> u64 {
        self.issued_seq += 1;
        self.error = None;
        self.issued_seq
    }

    fn complete(&mut self, seq: u64) {
        if seq > self.done_seq {
            self.done_seq = seq;
        }
    }

    /// True when this response is newer than anything applied so far, in
    /// which case it becomes the newest applied response.
    fn try_apply(&mut self, seq: u64) -> bool {
        if seq > self.applied_seq {
            self.applied_seq = seq;
            true
        } else {
            false
        }
    }

    fn loading(&self) -> bool {
        self.issued_seq > self.done_seq
    }

    fn snapshot(&self) -> BrowseSnapshot {
        BrowseSnapshot {
            items: self.items.clone(),
            total: self.total,
            page: self.page,
            size: self.size,
            min_similarity: self.min_similarity,
            has_searched: self.has_searched,
            loading: self.loading(),
            error: self.error,
        }
    }
}

/// Immutable view of the controller state, taken under the lock and rendered
/// without it.
#[derive(Clone, Debug)]
pub struct BrowseSnapshot {
    pub items: Vec<OrderPlanItem>,
    pub total: u32,
    pub page: u32,
    pub size: PageSize,
    pub min_similarity: Option<f64>,
    pub has_searched: bool,
    pub loading: bool,
    pub error: Option<BrowseErrorKind>,
}

/// Shared page controller. The lock is held only to read or mutate the state
/// bundle; upstream requests run outside it.
pub struct Browser {
    api: Arc<dyn OrderPlanApi>,
    state: RwLock<BrowseState>,
}

impl Browser {
    #[must_use]
    pub fn new(api: Arc<dyn OrderPlanApi>) -> Self {
        Self {
            api,
            state: RwLock::new(BrowseState::default()),
        }
    }

    pub async fn snapshot(&self) -> BrowseSnapshot {
        self.state.read().await.snapshot()
    }

    /// Runs a fresh search with the given filter.
    ///
    /// On success the result set and total are replaced, the page resets to
    /// one and the filter becomes the stored search. On failure the result
    /// set is cleared under a search error banner and the previously stored
    /// search, if any, stays in effect.
    pub async fn search(&self, min_similarity: Option<f64>) -> ApiResult<()> {
        let (seq, query) = {
            let mut state = self.state.write().await;
            let seq = state.issue();
            (seq, SearchQuery::first_page(state.size, min_similarity))
        };

        let result = self.api.list_order_plans(&query).await;

        let mut state = self.state.write().await;
        state.complete(seq);
        match result {
            Ok(data) => {
                if state.try_apply(seq) {
                    state.items = data.items;
                    state.total = data.total;
                    state.page = 1;
                    state.min_similarity = min_similarity;
                    state.has_searched = true;
                } else {
                    log::debug!("discarding stale search response (seq {seq})");
                }
                Ok(())
            }
            Err(err) => {
                if state.try_apply(seq) {
                    state.items = Vec::new();
                    state.total = 0;
                    state.page = 1;
                    state.error = Some(BrowseErrorKind::Search);
                }
                Err(err)
            }
        }
    }

    /// Loads another page of the stored search. A no-op until a search has
    /// succeeded. On success only the rows and the page number move; the
    /// total is not re-counted. On failure the previous rows and page stay
    /// visible under a page error banner.
    pub async fn change_page(&self, page: u32) -> ApiResult<()> {
        let page = page.max(1);

        let (seq, query) = {
            let mut state = self.state.write().await;
            if !state.has_searched {
                return Ok(());
            }
            let seq = state.issue();
            let query = SearchQuery {
                page,
                size: state.size,
                min_similarity: state.min_similarity,
            };
            (seq, query)
        };

        let result = self.api.list_order_plans(&query).await;

        let mut state = self.state.write().await;
        state.complete(seq);
        match result {
            Ok(data) => {
                if state.try_apply(seq) {
                    state.items = data.items;
                    state.page = page;
                } else {
                    log::debug!("discarding stale page response (seq {seq})");
                }
                Ok(())
            }
            Err(err) => {
                if state.try_apply(seq) {
                    state.error = Some(BrowseErrorKind::PageChange);
                }
                Err(err)
            }
        }
    }

    /// Switches the rows-per-page step. The new size is stored immediately,
    /// before any network outcome. Without a stored search that is all;
    /// otherwise the stored search is re-run from page one at the new size,
    /// and a failure keeps the previous rows under a size error banner.
    pub async fn change_page_size(&self, size: PageSize) -> ApiResult<()> {
        let (seq, query) = {
            let mut state = self.state.write().await;
            state.size = size;
            if !state.has_searched {
                return Ok(());
            }
            let seq = state.issue();
            (seq, SearchQuery::first_page(size, state.min_similarity))
        };

        let result = self.api.list_order_plans(&query).await;

        let mut state = self.state.write().await;
        state.complete(seq);
        match result {
            Ok(data) => {
                if state.try_apply(seq) {
                    state.items = data.items;
                    state.total = data.total;
                    state.page = 1;
                } else {
                    log::debug!("discarding stale size-change response (seq {seq})");
                }
                Ok(())
            }
            Err(err) => {
                if state.try_apply(seq) {
                    state.error = Some(BrowseErrorKind::PageSizeChange);
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use mockall::mock;
    use tokio::sync::{mpsc, oneshot};

    use super::*;
    use crate::api::ApiError;
    use crate::domain::bid_notice::BidNotice;
    use crate::domain::order_plan::OrderPlanPage;
    use crate::domain::types::NoticeNo;

    mock! {
        pub Api {}

        #[async_trait]
        impl OrderPlanApi for Api {
            async fn list_order_plans(&self, query: &SearchQuery) -> ApiResult<OrderPlanPage>;
            async fn fetch_bid_notice(&self, notice_no: &NoticeNo) -> ApiResult<BidNotice>;
        }
    }

    fn row(name: &str) -> OrderPlanItem {
        OrderPlanItem {
            order_plan_unty_no: format!("id-{name}"),
            biz_nm: name.to_string(),
            ..Default::default()
        }
    }

    fn page_with(names: &[&str], total: u32) -> OrderPlanPage {
        OrderPlanPage {
            items: names.iter().map(|n| row(n)).collect(),
            count: names.len() as u32,
            page: 1,
            size: 10,
            total,
        }
    }

    fn size(value: u32) -> PageSize {
        PageSize::new(value).unwrap()
    }

    fn status_error() -> ApiError {
        ApiError::Status {
            status: 500,
            url: "http://test/order-plans".to_string(),
        }
    }

    #[tokio::test]
    async fn starts_idle_and_empty() {
        let browser = Browser::new(Arc::new(MockApi::new()));

        let snap = browser.snapshot().await;
        assert!(snap.items.is_empty());
        assert_eq!(snap.total, 0);
        assert_eq!(snap.page, 1);
        assert_eq!(snap.size.get(), 10);
        assert!(!snap.has_searched);
        assert!(!snap.loading);
        assert!(snap.error.is_none());
    }

    #[tokio::test]
    async fn search_success_stores_filter_and_resets_page() {
        let mut api = MockApi::new();
        api.expect_list_order_plans()
            .withf(|q| q.page == 1 && q.size.get() == 10 && q.min_similarity == Some(0.8))
            .returning(|_| Ok(page_with(&["전산망 구축"], 25)));
        let browser = Browser::new(Arc::new(api));

        browser.search(Some(0.8)).await.expect("search should succeed");

        let snap = browser.snapshot().await;
        assert_eq!(snap.items.len(), 1);
        assert_eq!(snap.total, 25);
        assert_eq!(snap.page, 1);
        assert_eq!(snap.min_similarity, Some(0.8));
        assert!(snap.has_searched);
        assert!(snap.error.is_none());
        assert!(!snap.loading);
    }

    #[tokio::test]
    async fn search_failure_clears_results_and_keeps_old_filter() {
        let mut api = MockApi::new();
        api.expect_list_order_plans()
            .withf(|q| q.min_similarity == Some(0.5))
            .returning(|_| Ok(page_with(&["기존 결과"], 10)));
        api.expect_list_order_plans()
            .withf(|q| q.min_similarity == Some(0.9))
            .returning(|_| Err(status_error()));
        let browser = Browser::new(Arc::new(api));

        browser.search(Some(0.5)).await.expect("first search");
        let err = browser.search(Some(0.9)).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));

        let snap = browser.snapshot().await;
        assert!(snap.items.is_empty());
        assert_eq!(snap.total, 0);
        assert_eq!(snap.page, 1);
        assert_eq!(snap.error, Some(BrowseErrorKind::Search));
        // the failed filter is not stored; page changes keep using 0.5
        assert_eq!(snap.min_similarity, Some(0.5));
        assert!(snap.has_searched);
    }

    #[tokio::test]
    async fn page_change_requires_a_prior_search() {
        let mut api = MockApi::new();
        api.expect_list_order_plans().times(0);
        let browser = Browser::new(Arc::new(api));

        browser.change_page(3).await.expect("should be a no-op");

        let snap = browser.snapshot().await;
        assert_eq!(snap.page, 1);
        assert!(!snap.has_searched);
    }

    #[tokio::test]
    async fn page_change_success_moves_rows_but_not_total() {
        let mut api = MockApi::new();
        api.expect_list_order_plans()
            .withf(|q| q.page == 1)
            .returning(|_| Ok(page_with(&["1페이지"], 25)));
        api.expect_list_order_plans()
            .withf(|q| q.page == 2)
            .returning(|_| Ok(page_with(&["2페이지"], 25)));
        let browser = Browser::new(Arc::new(api));

        browser.search(None).await.expect("seed search");
        browser.change_page(2).await.expect("page change");

        let snap = browser.snapshot().await;
        assert_eq!(snap.items[0].biz_nm, "2페이지");
        assert_eq!(snap.page, 2);
        assert_eq!(snap.total, 25);
    }

    #[tokio::test]
    async fn page_change_failure_keeps_rows_and_page() {
        let mut api = MockApi::new();
        api.expect_list_order_plans()
            .withf(|q| q.page == 1)
            .returning(|_| Ok(page_with(&["1페이지"], 25)));
        api.expect_list_order_plans()
            .withf(|q| q.page == 2)
            .returning(|_| Err(status_error()));
        let browser = Browser::new(Arc::new(api));

        browser.search(None).await.expect("seed search");
        browser.change_page(2).await.unwrap_err();

        let snap = browser.snapshot().await;
        assert_eq!(snap.items[0].biz_nm, "1페이지");
        assert_eq!(snap.page, 1);
        assert_eq!(snap.error, Some(BrowseErrorKind::PageChange));
    }

    #[tokio::test]
    async fn size_change_is_stored_even_without_a_search() {
        let mut api = MockApi::new();
        api.expect_list_order_plans().times(0);
        let browser = Browser::new(Arc::new(api));

        browser
            .change_page_size(size(50))
            .await
            .expect("should store the size without fetching");

        let snap = browser.snapshot().await;
        assert_eq!(snap.size.get(), 50);
        assert!(!snap.has_searched);
    }

    #[tokio::test]
    async fn size_change_reruns_the_stored_search_from_page_one() {
        let mut api = MockApi::new();
        api.expect_list_order_plans()
            .withf(|q| q.size.get() == 10)
            .returning(|_| Ok(page_with(&["작게"], 25)));
        api.expect_list_order_plans()
            .withf(|q| q.page == 1 && q.size.get() == 20 && q.min_similarity == Some(0.7))
            .returning(|_| Ok(page_with(&["크게"], 23)));
        let browser = Browser::new(Arc::new(api));

        browser.search(Some(0.7)).await.expect("seed search");
        browser.change_page(2).await.ok();
        browser.change_page_size(size(20)).await.expect("size change");

        let snap = browser.snapshot().await;
        assert_eq!(snap.items[0].biz_nm, "크게");
        assert_eq!(snap.total, 23);
        assert_eq!(snap.page, 1);
        assert_eq!(snap.size.get(), 20);
    }

    #[tokio::test]
    async fn size_change_failure_keeps_rows_but_stores_the_size() {
        let mut api = MockApi::new();
        api.expect_list_order_plans()
            .withf(|q| q.size.get() == 10)
            .returning(|_| Ok(page_with(&["기존"], 25)));
        api.expect_list_order_plans()
            .withf(|q| q.size.get() == 100)
            .returning(|_| Err(status_error()));
        let browser = Browser::new(Arc::new(api));

        browser.search(None).await.expect("seed search");
        browser.change_page_size(size(100)).await.unwrap_err();

        let snap = browser.snapshot().await;
        assert_eq!(snap.items[0].biz_nm, "기존");
        assert_eq!(snap.size.get(), 100);
        assert_eq!(snap.error, Some(BrowseErrorKind::PageSizeChange));
    }

    /// Stub that parks each call on a channel so tests decide resolution
    /// order, and reports when a call has been issued.
    struct ParkedApi {
        started: mpsc::UnboundedSender<()>,
        responses: Mutex<VecDeque<oneshot::Receiver<ApiResult<OrderPlanPage>>>>,
    }

    #[async_trait]
    impl OrderPlanApi for ParkedApi {
        async fn list_order_plans(&self, _query: &SearchQuery) -> ApiResult<OrderPlanPage> {
            let rx = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected list call");
            self.started.send(()).unwrap();
            rx.await.expect("test resolver dropped")
        }

        async fn fetch_bid_notice(&self, _notice_no: &NoticeNo) -> ApiResult<BidNotice> {
            unreachable!("not used by these tests")
        }
    }

    #[tokio::test]
    async fn a_response_that_lost_the_race_is_discarded() {
        let (started_tx, mut started_rx) = mpsc::unbounded_channel();
        let (slow_tx, slow_rx) = oneshot::channel();
        let (fast_tx, fast_rx) = oneshot::channel();

        let api = Arc::new(ParkedApi {
            started: started_tx,
            responses: Mutex::new(VecDeque::from([slow_rx, fast_rx])),
        });
        let browser = Arc::new(Browser::new(api));

        let slow = tokio::spawn({
            let browser = Arc::clone(&browser);
            async move { browser.search(Some(0.3)).await }
        });
        started_rx.recv().await.expect("slow request issued");

        let fast = tokio::spawn({
            let browser = Arc::clone(&browser);
            async move { browser.search(Some(0.6)).await }
        });
        started_rx.recv().await.expect("fast request issued");

        assert!(browser.snapshot().await.loading);

        // The newer request resolves first and wins.
        fast_tx.send(Ok(page_with(&["최신"], 7))).unwrap();
        fast.await.unwrap().expect("fast search should succeed");

        let mid = browser.snapshot().await;
        assert_eq!(mid.items[0].biz_nm, "최신");
        assert!(!mid.loading);

        // The older request then fails; both its data and its error are stale.
        slow_tx.send(Err(status_error())).unwrap();
        slow.await.unwrap().unwrap_err();

        let snap = browser.snapshot().await;
        assert_eq!(snap.items[0].biz_nm, "최신");
        assert_eq!(snap.total, 7);
        assert_eq!(snap.min_similarity, Some(0.6));
        assert!(snap.error.is_none());
        assert!(!snap.loading);
    }
}
