//! Spreadsheet export of the currently displayed page.
//!
//! The export is a pure transform of rows already held by the page
//! controller; it never calls the collector. Column set, labels, order and
//! widths are fixed.
use chrono::NaiveDate;
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::domain::order_plan::OrderPlanItem;

/// Sheet name and filename prefix.
const SHEET_NAME: &str = "발주계획";

/// Column label paired with its display width, in output order.
const COLUMNS: [(&str, f64); 22] = [
    ("발주계획통합번호", 20.0),
    ("발주기관명", 20.0),
    ("사업명", 40.0),
    ("사업구분", 12.0),
    ("사업유형", 12.0),
    ("발주년도", 10.0),
    ("발주월", 8.0),
    ("소관구분", 12.0),
    ("조달방법", 12.0),
    ("계약방법", 12.0),
    ("발주금액합계", 15.0),
    ("발주계약금액", 15.0),
    ("발주관급자재비", 15.0),
    ("발주기타금액", 15.0),
    ("부서명", 15.0),
    ("담당자", 10.0),
    ("전화번호", 15.0),
    ("공고여부", 10.0),
    ("공고일시", 20.0),
    ("입찰공고번호목록", 20.0),
    ("유사도점수", 10.0),
    ("비고", 30.0),
];

#[derive(Clone, Debug, PartialEq)]
enum CellValue {
    Text(String),
    Number(f64),
}

/// Maps one order plan row onto the fixed column set. Absent amounts export
/// as 0, absent text as an empty string, and an absent similarity score as an
/// empty cell rather than a misleading zero.
fn spreadsheet_row(item: &OrderPlanItem) -> Vec<CellValue> {
    fn text(value: &Option<String>) -> CellValue {
        CellValue::Text(value.clone().unwrap_or_default())
    }
    fn amount(value: Option<i64>) -> CellValue {
        CellValue::Number(value.unwrap_or(0) as f64)
    }

    vec![
        CellValue::Text(item.order_plan_unty_no.clone()),
        text(&item.order_instt_nm),
        CellValue::Text(item.biz_nm.clone()),
        text(&item.bsns_div_nm),
        text(&item.bsns_ty_nm),
        text(&item.order_year),
        text(&item.order_mnth),
        text(&item.jrsdctn_div_nm),
        text(&item.prcrmnt_methd),
        text(&item.cntrct_mthd_nm),
        amount(item.sum_order_amt),
        amount(item.order_contrct_amt),
        amount(item.order_govsply_mtrcst),
        amount(item.order_etc_amt),
        text(&item.dept_nm),
        text(&item.ofcl_nm),
        text(&item.tel_no),
        text(&item.ntce_ntice_yn),
        text(&item.notice_dt),
        text(&item.bid_ntce_no_list),
        match item.similarity_score {
            Some(score) => CellValue::Number(score),
            None => CellValue::Text(String::new()),
        },
        text(&item.rmrk_cntnts),
    ]
}

/// Builds the single-sheet workbook for the given rows and returns it as
/// bytes ready to be served.
pub fn workbook_bytes(items: &[OrderPlanItem]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, (label, width)) in COLUMNS.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string(0, col, *label)?;
        worksheet.set_column_width(col, *width)?;
    }

    for (row_idx, item) in items.iter().enumerate() {
        let row = row_idx as u32 + 1;
        for (col, cell) in spreadsheet_row(item).into_iter().enumerate() {
            let col = col as u16;
            match cell {
                CellValue::Text(value) => worksheet.write_string(row, col, value)?,
                CellValue::Number(value) => worksheet.write_number(row, col, value)?,
            };
        }
    }

    workbook.save_to_buffer()
}

/// Download filename for the given date, e.g. `발주계획_20240815.xlsx`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("{}_{}.xlsx", SHEET_NAME, date.format("%Y%m%d"))
}
