use std::sync::Arc;
use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use serde_json::json;
use tera::Tera;
use wiremock::MockServer;

use narashop_web::api::{HttpOrderPlanClient, OrderPlanApi};
use narashop_web::browse::Browser;
use narashop_web::routes::order_plans::{
    bid_notice_modal, change_page, change_page_size, export_order_plans, search_order_plans,
    show_index,
};
use narashop_web::services::order_plans::NoticeFetcher;

/// Builds the browse application against a mocked collector.
pub async fn test_app(
    server: &MockServer,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody + use<>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let api: Arc<dyn OrderPlanApi> = Arc::new(
        HttpOrderPlanClient::new(server.uri(), Duration::from_secs(5))
            .expect("api client should build"),
    );
    let browser = web::Data::new(Browser::new(Arc::clone(&api)));
    let fetcher = web::Data::new(NoticeFetcher::new(api));

    let tera = Tera::new("templates/**/*.html").expect("templates should parse");

    let secret_key = Key::from(&[7u8; 64]);
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    App::new()
        .wrap(message_framework)
        .service(show_index)
        .service(search_order_plans)
        .service(change_page)
        .service(change_page_size)
        .service(bid_notice_modal)
        .service(export_order_plans)
        .app_data(web::Data::new(tera))
        .app_data(browser)
        .app_data(fetcher)
}

/// One order plan row for a list response body.
pub fn order_plan(no: &str, name: &str, notice_list: Option<&str>) -> serde_json::Value {
    json!({
        "order_plan_unty_no": no,
        "biz_nm": name,
        "order_instt_nm": "한국대학교",
        "sum_order_amt": 1_500_000_000_i64,
        "similarity_score": 0.85,
        "bid_ntce_no_list": notice_list,
    })
}

/// List endpoint envelope around the given rows.
pub fn page_body(items: Vec<serde_json::Value>, total: u32, page: u32, size: u32) -> serde_json::Value {
    let count = items.len();
    json!({
        "items": items,
        "count": count,
        "page": page,
        "size": size,
        "total": total,
    })
}

/// A bid notice detail body.
pub fn notice_body(no: &str, name: &str) -> serde_json::Value {
    json!({
        "bid_ntce_no": no,
        "bid_ntce_nm": name,
        "ntce_kind_nm": "등록공고",
        "asign_bdgt_amt": 500_000_000_i64,
        "bid_close_dt": "2024-09-01T18:00:00",
    })
}
