//! DTOs shaped for the order plan browse page.

use serde::Serialize;

use crate::browse::{BrowseErrorKind, BrowseSnapshot};
use crate::domain::order_plan::OrderPlanItem;
use crate::domain::types::PageSize;
use crate::format;
use crate::pagination::Paginated;

/// One table row with every cell preformatted for display.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OrderPlanRow {
    pub order_plan_unty_no: String,
    pub biz_nm: String,
    pub order_instt_nm: String,
    pub cntrct_mthd_nm: String,
    pub sum_order_amt: String,
    pub order_year_month: String,
    pub notice_dt: String,
    pub dept_nm: String,
    pub ofcl_nm: String,
    pub tel_no: String,
    pub similarity: String,
    /// Derived notice lookup key. `None` renders the 공고 예정 marker
    /// instead of a detail button.
    pub notice_no: Option<String>,
}

impl From<&OrderPlanItem> for OrderPlanRow {
    fn from(item: &OrderPlanItem) -> Self {
        Self {
            order_plan_unty_no: item.order_plan_unty_no.clone(),
            biz_nm: item.biz_nm.clone(),
            order_instt_nm: format::text_or_dash(item.order_instt_nm.as_deref()),
            cntrct_mthd_nm: format::text_or_dash(item.cntrct_mthd_nm.as_deref()),
            sum_order_amt: format::format_amount(item.sum_order_amt),
            order_year_month: format::format_year_month(
                item.order_year.as_deref(),
                item.order_mnth.as_deref(),
            ),
            notice_dt: format::format_timestamp(item.notice_dt.as_deref()),
            dept_nm: format::text_or_dash(item.dept_nm.as_deref()),
            ofcl_nm: format::text_or_dash(item.ofcl_nm.as_deref()),
            tel_no: format::text_or_dash(item.tel_no.as_deref()),
            similarity: format::format_similarity(item.similarity_score),
            notice_no: item.notice_no().map(|n| n.into_inner()),
        }
    }
}

/// Data required to render the browse index template.
pub struct IndexPageData {
    pub rows: Paginated<OrderPlanRow>,
    pub size: u32,
    pub size_steps: [u32; 4],
    /// Grouped total for the result header, e.g. `1,234`.
    pub total_display: String,
    /// Stored similarity filter echoed back into the search form.
    pub min_similarity: String,
    pub loading: bool,
    pub error_message: Option<&'static str>,
}

impl From<BrowseSnapshot> for IndexPageData {
    fn from(snap: BrowseSnapshot) -> Self {
        let rows: Vec<OrderPlanRow> = snap.items.iter().map(OrderPlanRow::from).collect();

        Self {
            rows: Paginated::new(rows, snap.page, snap.total, snap.size),
            size: snap.size.get(),
            size_steps: PageSize::STEPS,
            total_display: format::group_digits(i64::from(snap.total)),
            min_similarity: snap
                .min_similarity
                .map(|v| v.to_string())
                .unwrap_or_default(),
            loading: snap.loading,
            error_message: snap.error.map(BrowseErrorKind::message),
        }
    }
}
