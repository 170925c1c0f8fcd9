use actix_web::{web, App, HttpServer};
use log::info;
use tokoscrape::app_state::AppState;
use tokoscrape::config::Config;
use tokoscrape::metrics::MetricsTracker;
use tokoscrape::api;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    log4rs::init_file("log4rs.yml", Default::default()).unwrap();

    let cfg = Config::load();

    let http_client = cfg
        .http
        .create_http_client()
        .expect("failed to create shipping HTTP client");

    let metrics = MetricsTracker::new();

    info!("scraper service starting:");
    info!("  navigation timeout: {}s", cfg.browser.navigation_timeout_secs);
    info!("  review wait: {}s", cfg.browser.deferred_section_timeout_secs);
    info!("  carrier base URL: {}", cfg.shipping.base_url);
    info!("  origin code: {}", cfg.shipping.origin_code);
    if let Some(ref path) = cfg.browser.chrome_path {
        info!("  chrome binary: {}", path);
    }

    let data = web::Data::new(AppState {
        http_client,
        metrics,
        config: cfg,
    });

    // Try to bind to an available port starting at 8080
    let mut last_err: Option<std::io::Error> = None;
    for port in 8080..=8090 {
        let data_clone = data.clone();
        let addr = format!("127.0.0.1:{}", port);
        match HttpServer::new(move || {
            App::new()
                .app_data(data_clone.clone())
                .configure(api::configure)
        })
        .bind(&addr)
        {
            Ok(server) => {
                info!("Listening on {}", addr);
                return server.run().await;
            }
            Err(e) => {
                last_err = Some(e);
                continue;
            }
        }
    }
    Err(last_err.unwrap_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "No available ports 8080-8090",
        )
    }))
}
