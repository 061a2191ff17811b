use serde::{Deserialize, Serialize};

use crate::domain::bid_notice::BidNotice;
use crate::domain::types::NoticeNo;

/// One row of the university order plan dataset, as served by the collector
/// API. Field names mirror the upstream 나라장터 keys one to one, so the
/// struct doubles as the wire shape.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderPlanItem {
    pub id: Option<i64>,
    /// 발주계획통합번호, the dataset-wide identifier of the plan.
    pub order_plan_unty_no: String,
    /// 사업명
    pub biz_nm: String,
    pub bsns_div_cd: Option<String>,
    pub bsns_div_nm: Option<String>,
    pub bsns_ty_cd: Option<String>,
    pub bsns_ty_nm: Option<String>,
    pub order_year: Option<String>,
    pub order_mnth: Option<String>,
    pub order_instt_cd: Option<String>,
    pub order_instt_nm: Option<String>,
    pub jrsdctn_div_cd: Option<String>,
    pub jrsdctn_div_nm: Option<String>,
    /// KRW amounts arrive as integral won.
    pub sum_order_amt: Option<i64>,
    pub sum_order_dol_amt: Option<f64>,
    pub order_contrct_amt: Option<i64>,
    pub order_govsply_mtrcst: Option<i64>,
    pub order_etc_amt: Option<i64>,
    pub prcrmnt_methd: Option<String>,
    pub cntrct_mthd_nm: Option<String>,
    pub dept_nm: Option<String>,
    pub ofcl_nm: Option<String>,
    pub tel_no: Option<String>,
    pub ntce_ntice_yn: Option<String>,
    pub notice_dt: Option<String>,
    /// Notice number concatenated with the three character notice order.
    pub bid_ntce_no_list: Option<String>,
    pub rmrk_cntnts: Option<String>,
    pub chg_dt: Option<String>,
    pub similarity_score: Option<f64>,
    /// Notices already collected alongside the plan, if any.
    pub bid_notices: Option<Vec<BidNotice>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl OrderPlanItem {
    /// Lookup key of the announced bid notice, when one exists.
    #[must_use]
    pub fn notice_no(&self) -> Option<NoticeNo> {
        self.bid_ntce_no_list
            .as_deref()
            .and_then(NoticeNo::from_list_field)
    }

    /// First embedded notice, when the collector already delivered one with
    /// the row and the row's derived key matches. Rows carrying a non-empty
    /// embedded list never need a lookup.
    #[must_use]
    pub fn cached_notice(&self, key: &NoticeNo) -> Option<&BidNotice> {
        if self.notice_no()? != *key {
            return None;
        }
        self.bid_notices.as_deref()?.first()
    }
}

/// Page envelope returned by the list endpoint.
///
/// Every field is mandatory; a response missing one of them is treated as
/// malformed rather than patched over.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderPlanPage {
    pub items: Vec<OrderPlanItem>,
    /// Number of rows in this page.
    pub count: u32,
    pub page: u32,
    pub size: u32,
    /// Number of rows matching the query across all pages.
    pub total: u32,
}
