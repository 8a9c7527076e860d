use actix_web::web;
use crate::web::handlers;

// Image data URLs routinely exceed actix's 256 KiB default.
const MAX_PAYLOAD_BYTES: usize = 16 * 1024 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
    .service(
        web::scope("/api")
            .route("/predict", web::post().to(handlers::predict))
            .route("/predict/chat", web::post().to(handlers::chat))
    )
    .route("/chat", web::post().to(handlers::chat))
    .route("/predict", web::post().to(handlers::predict))
    .route("/health", web::get().to(handlers::health_check));
}
