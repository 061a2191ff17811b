use serde::{Deserialize, Serialize};

/// A 나라장터 bid notice, as served by the collector API.
///
/// Only the notice number is guaranteed; upstream records are sparse and the
/// detail view has to cope with any subset of the rest.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct BidNotice {
    pub id: Option<i64>,
    /// 입찰공고번호
    pub bid_ntce_no: String,
    /// 입찰공고차수
    pub bid_ntce_ord: Option<String>,
    pub order_plan_unty_no: Option<String>,
    pub bid_ntce_nm: Option<String>,
    pub bid_ntce_dt: Option<String>,
    pub ref_no: Option<String>,
    pub asign_bdgt_amt: Option<i64>,
    pub presmpt_prce: Option<i64>,
    pub vat: Option<i64>,
    pub bid_begin_dt: Option<String>,
    pub bid_close_dt: Option<String>,
    pub openg_dt: Option<String>,
    pub dminstt_nm: Option<String>,
    pub ntce_instt_nm: Option<String>,
    pub ntce_instt_ofcl_nm: Option<String>,
    pub ntce_instt_ofcl_tel_no: Option<String>,
    pub ntce_instt_ofcl_email_adrs: Option<String>,
    pub ntce_kind_nm: Option<String>,
    pub rgst_dt: Option<String>,
    pub chg_dt: Option<String>,
    pub cntrct_cnclms_mthd_nm: Option<String>,
    pub bid_mthd_nm: Option<String>,
    pub srvce_div_nm: Option<String>,
    pub sucsfbid_mthd_nm: Option<String>,
    /// Lowest award rate; upstream serves it preformatted as a string.
    pub sucsfbid_lwlt_rate: Option<String>,
    pub bid_ntce_dtl_url: Option<String>,
    pub openg_plce: Option<String>,
    pub info_biz_yn: Option<String>,
    pub indstryty_lmt_yn: Option<String>,
    pub ntce_spec_doc_url1: Option<String>,
    pub ntce_spec_doc_url2: Option<String>,
    pub ntce_spec_doc_url3: Option<String>,
    pub ntce_spec_doc_url4: Option<String>,
    pub ntce_spec_doc_url5: Option<String>,
    pub ntce_spec_file_nm1: Option<String>,
    pub ntce_spec_file_nm2: Option<String>,
    pub ntce_spec_file_nm3: Option<String>,
    pub ntce_spec_file_nm4: Option<String>,
    pub ntce_spec_file_nm5: Option<String>,
    pub fetched_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl BidNotice {
    /// Attachment (file name, download URL) pairs, keeping only slots where
    /// both halves are present.
    #[must_use]
    pub fn attachments(&self) -> Vec<(&str, &str)> {
        let slots = [
            (&self.ntce_spec_file_nm1, &self.ntce_spec_doc_url1),
            (&self.ntce_spec_file_nm2, &self.ntce_spec_doc_url2),
            (&self.ntce_spec_file_nm3, &self.ntce_spec_doc_url3),
            (&self.ntce_spec_file_nm4, &self.ntce_spec_doc_url4),
            (&self.ntce_spec_file_nm5, &self.ntce_spec_doc_url5),
        ];

        slots
            .into_iter()
            .filter_map(|(name, url)| Some((name.as_deref()?, url.as_deref()?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_minimal_notice() {
        let notice: BidNotice = serde_json::from_str(r#"{"bid_ntce_no": "20240815476-00"}"#)
            .expect("the notice number alone should suffice");

        assert_eq!(notice.bid_ntce_no, "20240815476-00");
        assert!(notice.asign_bdgt_amt.is_none());
    }

    #[test]
    fn rejects_a_notice_without_its_number() {
        assert!(serde_json::from_str::<BidNotice>(r#"{"bid_ntce_nm": "공고"}"#).is_err());
    }

    #[test]
    fn attachments_skip_half_filled_slots() {
        let notice = BidNotice {
            bid_ntce_no: "1".to_string(),
            ntce_spec_doc_url1: Some("https://example.com/a.hwp".to_string()),
            ntce_spec_file_nm1: Some("과업지시서.hwp".to_string()),
            ntce_spec_doc_url2: Some("https://example.com/b.hwp".to_string()),
            ntce_spec_file_nm3: Some("규격서.hwp".to_string()),
            ..Default::default()
        };

        assert_eq!(
            notice.attachments(),
            vec![("과업지시서.hwp", "https://example.com/a.hwp")]
        );
    }
}
