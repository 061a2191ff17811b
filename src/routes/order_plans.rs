use actix_web::http::header::{
    Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::browse::Browser;
use crate::domain::types::{NoticeNo, PageSize};
use crate::forms::order_plans::{PageForm, PageSizeForm, SearchForm};
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::order_plans as order_plan_service;
use crate::services::order_plans::NoticeFetcher;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[get("/")]
pub async fn show_index(
    browser: web::Data<Browser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = order_plan_service::load_index_page(&browser).await;

    let mut context = base_context(&flash_messages, "order_plans");
    context.insert("rows", &data.rows);
    context.insert("size", &data.size);
    context.insert("size_steps", &data.size_steps);
    context.insert("total_display", &data.total_display);
    context.insert("min_similarity", &data.min_similarity);
    context.insert("loading", &data.loading);
    context.insert("error_message", &data.error_message);

    render_template(&tera, "order_plans/index.html", &context)
}

#[post("/search")]
pub async fn search_order_plans(
    browser: web::Data<Browser>,
    web::Form(form): web::Form<SearchForm>,
) -> impl Responder {
    // A failure is already recorded as the controller's error banner; the
    // index render picks it up after the redirect.
    let _ = order_plan_service::run_search(&browser, &form).await;
    redirect("/")
}

#[post("/page")]
pub async fn change_page(
    browser: web::Data<Browser>,
    web::Form(form): web::Form<PageForm>,
) -> impl Responder {
    let _ = order_plan_service::change_page(&browser, form.page).await;
    redirect("/")
}

#[post("/page-size")]
pub async fn change_page_size(
    browser: web::Data<Browser>,
    web::Form(form): web::Form<PageSizeForm>,
) -> impl Responder {
    match PageSize::try_from(form) {
        Ok(size) => {
            let _ = order_plan_service::change_page_size(&browser, size).await;
        }
        Err(err) => {
            log::error!("Rejected page size form: {err}");
            FlashMessage::error("지원하지 않는 페이지 크기입니다.").send();
        }
    }
    redirect("/")
}

#[get("/bid-notices/{notice_no}/modal")]
pub async fn bid_notice_modal(
    notice_no: web::Path<String>,
    browser: web::Data<Browser>,
    fetcher: web::Data<NoticeFetcher>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let notice_no = match NoticeNo::new(notice_no.into_inner()) {
        Ok(notice_no) => notice_no,
        Err(err) => {
            log::error!("Rejected bid notice key: {err}");
            return HttpResponse::BadRequest().finish();
        }
    };

    match order_plan_service::load_notice_modal(&browser, &fetcher, &notice_no).await {
        Ok(data) => {
            let mut context = Context::new();
            context.insert("notice", &data);
            render_template(&tera, "bid_notices/modal_body.html", &context)
        }
        Err(err) if err.is_not_found() => HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load bid notice modal: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/export")]
pub async fn export_order_plans(browser: web::Data<Browser>) -> impl Responder {
    let today = chrono::Utc::now().date_naive();

    match order_plan_service::export_current_page(&browser, today).await {
        Ok((filename, bytes)) => {
            let disposition = ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::FilenameExt(ExtendedValue {
                    charset: Charset::Ext("UTF-8".to_string()),
                    language_tag: None,
                    value: filename.into_bytes(),
                })],
            };
            HttpResponse::Ok()
                .content_type(XLSX_MIME)
                .insert_header(disposition)
                .body(bytes)
        }
        Err(ServiceError::EmptyExport) => {
            FlashMessage::error("내보낼 데이터가 없습니다.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to build the export workbook: {err}");
            FlashMessage::error("엑셀 파일 생성 중 오류가 발생했습니다.").send();
            redirect("/")
        }
    }
}
