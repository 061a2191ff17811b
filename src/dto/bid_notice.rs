//! DTOs shaped for the bid notice detail modal.

use serde::Serialize;

use crate::domain::bid_notice::BidNotice;
use crate::format;

/// One label/value line inside a modal section.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldDisplay {
    pub label: &'static str,
    pub value: String,
    pub highlight: bool,
    /// Spans the full section width instead of one grid cell.
    pub wide: bool,
}

impl FieldDisplay {
    fn new(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            highlight: false,
            wide: false,
        }
    }

    fn highlighted(label: &'static str, value: String) -> Self {
        Self {
            highlight: true,
            ..Self::new(label, value)
        }
    }

    fn wide(label: &'static str, value: String) -> Self {
        Self {
            wide: true,
            ..Self::new(label, value)
        }
    }
}

/// A titled group of fields laid out on a column grid.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ModalSection {
    pub title: &'static str,
    pub columns: u8,
    pub fields: Vec<FieldDisplay>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttachmentDisplay {
    pub name: String,
    pub url: String,
}

/// Data displayed inside the bid notice modal.
#[derive(Debug, Clone, Serialize)]
pub struct BidNoticeModalData {
    pub title: String,
    pub subtitle: String,
    pub sections: Vec<ModalSection>,
    pub attachments: Vec<AttachmentDisplay>,
    pub detail_url: Option<String>,
}

impl From<&BidNotice> for BidNoticeModalData {
    fn from(notice: &BidNotice) -> Self {
        let title = match notice.bid_ntce_nm.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => "입찰공고 상세".to_string(),
        };
        let kind = match notice.ntce_kind_nm.as_deref() {
            Some(kind) if !kind.is_empty() => kind,
            _ => "등록공고",
        };
        let subtitle = format!("{} · {}", notice.bid_ntce_no, kind);

        let text = |value: &Option<String>| format::text_or_dash(value.as_deref());
        let when = |value: &Option<String>| format::format_timestamp(value.as_deref());

        let sections = vec![
            ModalSection {
                title: "기본 정보",
                columns: 2,
                fields: vec![
                    FieldDisplay::new("입찰공고번호", notice.bid_ntce_no.clone()),
                    FieldDisplay::new("입찰공고차수", text(&notice.bid_ntce_ord)),
                    FieldDisplay::wide("참조번호", text(&notice.ref_no)),
                    FieldDisplay::new("공고일시", when(&notice.bid_ntce_dt)),
                    FieldDisplay::new("등록일시", when(&notice.rgst_dt)),
                ],
            },
            ModalSection {
                title: "금액 정보",
                columns: 3,
                fields: vec![
                    FieldDisplay::highlighted(
                        "배정예산금액",
                        format::format_amount(notice.asign_bdgt_amt),
                    ),
                    FieldDisplay::new("추정가격", format::format_amount(notice.presmpt_prce)),
                    FieldDisplay::new("부가세", format::format_amount(notice.vat)),
                ],
            },
            ModalSection {
                title: "일정 정보",
                columns: 2,
                fields: vec![
                    FieldDisplay::new("입찰 개시", when(&notice.bid_begin_dt)),
                    FieldDisplay::highlighted("입찰 마감", when(&notice.bid_close_dt)),
                    FieldDisplay::new("개찰 일시", when(&notice.openg_dt)),
                    FieldDisplay::new("개찰 장소", text(&notice.openg_plce)),
                ],
            },
            ModalSection {
                title: "기관 및 담당자 정보",
                columns: 2,
                fields: vec![
                    FieldDisplay::new("수요기관", text(&notice.dminstt_nm)),
                    FieldDisplay::new("공고기관", text(&notice.ntce_instt_nm)),
                    FieldDisplay::new("담당자", text(&notice.ntce_instt_ofcl_nm)),
                    FieldDisplay::new("연락처", text(&notice.ntce_instt_ofcl_tel_no)),
                    FieldDisplay::wide("이메일", text(&notice.ntce_instt_ofcl_email_adrs)),
                ],
            },
            ModalSection {
                title: "입찰 및 계약 정보",
                columns: 2,
                fields: vec![
                    FieldDisplay::new("계약체결방법", text(&notice.cntrct_cnclms_mthd_nm)),
                    FieldDisplay::new("입찰방식", text(&notice.bid_mthd_nm)),
                    FieldDisplay::new("용역구분", text(&notice.srvce_div_nm)),
                    FieldDisplay::new("낙찰방법", text(&notice.sucsfbid_mthd_nm)),
                    FieldDisplay::new(
                        "낙찰하한율",
                        match notice.sucsfbid_lwlt_rate.as_deref() {
                            Some(rate) if !rate.is_empty() => format!("{rate}%"),
                            _ => "-".to_string(),
                        },
                    ),
                    FieldDisplay::new(
                        "정보화사업",
                        if notice.info_biz_yn.as_deref() == Some("Y") {
                            "예".to_string()
                        } else {
                            "아니오".to_string()
                        },
                    ),
                ],
            },
        ];

        let attachments = notice
            .attachments()
            .into_iter()
            .map(|(name, url)| AttachmentDisplay {
                name: name.to_string(),
                url: url.to_string(),
            })
            .collect();

        let detail_url = notice
            .bid_ntce_dtl_url
            .clone()
            .filter(|url| !url.is_empty());

        Self {
            title,
            subtitle,
            sections,
            attachments,
            detail_url,
        }
    }
}
