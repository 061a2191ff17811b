use std::sync::Arc;
use std::time::Duration;

use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::api::{HttpOrderPlanClient, OrderPlanApi};
use crate::browse::Browser;
use crate::models::config::ServerConfig;
use crate::routes::order_plans::{
    bid_notice_modal, change_page, change_page_size, export_order_plans, search_order_plans,
    show_index,
};
use crate::services::order_plans::NoticeFetcher;

pub mod api;
pub mod browse;
pub mod domain;
pub mod dto;
pub mod export;
pub mod format;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod routes;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let api_client = HttpOrderPlanClient::new(
        server_config.api_base_url.as_str(),
        Duration::from_secs(server_config.api_timeout_secs),
    )
    .map_err(|e| std::io::Error::other(format!("Failed to build the API client: {e}")))?;
    let api_client: Arc<dyn OrderPlanApi> = Arc::new(api_client);

    let browser = web::Data::new(Browser::new(Arc::clone(&api_client)));
    let fetcher = web::Data::new(NoticeFetcher::new(api_client));

    // Key and store for flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());
    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_index)
            .service(search_order_plans)
            .service(change_page)
            .service(change_page_size)
            .service(bid_notice_modal)
            .service(export_order_plans)
            .app_data(web::Data::new(tera.clone()))
            .app_data(browser.clone())
            .app_data(fetcher.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
