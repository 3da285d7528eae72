use actix_cors::Cors;
use actix_identity::IdentityMiddleware;
use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie, dev::Server, http, web::Data, App, HttpServer};
use actix_web::{error::ErrorBadRequest, web::JsonConfig, web::QueryConfig};
use actix_web_opentelemetry::RequestTracing;
use anyhow::{anyhow, Error};
use serde_json::json;
use std::net::TcpListener;

use crate::config::Settings;
use crate::controllers::{
    auth::auth_routes, crops::crop_routes, health::health, irrigation::irrigation_routes,
};
use crate::irrigation::Irrigator;
use crate::repository::Repo;

pub struct Application {
    port: u16,
    pub irrigator: Irrigator,
    pub repo: Repo,
    server: Server,
}

impl Application {
    pub fn build(settings: Settings, repo: Repo) -> Result<Application, Error> {
        let (port, tcp_listener) = web_server_config(&settings)?;

        let irrigator = Irrigator::new(repo, settings.irrigation.clone());
        let irrigator_data = Data::new(irrigator.clone());
        let repo_data = Data::new(repo);
        let settings_data = Data::new(settings.clone());
        // Cookies only need to outlive the process.
        let session_key = cookie::Key::generate();

        let server = HttpServer::new(move || {
            let mut cors = if settings.server.allow_localhost_cors {
                Cors::default().allowed_origin_fn(|origin, _req_head| match origin.to_str() {
                    Ok(str) => str.contains("localhost"),
                    Err(_) => false,
                })
            } else {
                Cors::default()
            };

            cors = cors
                .allowed_methods(vec!["DELETE", "GET", "OPTIONS", "PATCH", "POST"])
                .allowed_headers(vec![
                    http::header::ACCEPT,
                    http::header::ACCEPT_LANGUAGE,
                    http::header::AUTHORIZATION,
                    http::header::CONTENT_TYPE,
                ])
                .supports_credentials()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .wrap(RequestTracing::new())
                // Session tools
                .wrap(IdentityMiddleware::default())
                .wrap(SessionMiddleware::new(
                    CookieSessionStore::default(),
                    session_key.clone(),
                ))
                // HTTP API Routes
                .service(health)
                .configure(auth_routes)
                .configure(crop_routes)
                .configure(irrigation_routes)
                // Application configuration
                .app_data(json_cfg())
                .app_data(query_cfg())
                .app_data(settings_data.clone())
                .app_data(repo_data.clone())
                .app_data(irrigator_data.clone())
        })
        .listen(tcp_listener)
        .map_err(|e| anyhow!("Could not listen on port {}: {}", port, e))?
        .run();

        Ok(Application {
            port,
            irrigator,
            repo,
            server,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

fn json_cfg() -> JsonConfig {
    JsonConfig::default().error_handler(|err, _req| {
        ErrorBadRequest(json!({
            "message": err.to_string()
        }))
    })
}

fn query_cfg() -> QueryConfig {
    QueryConfig::default().error_handler(|err, _req| {
        ErrorBadRequest(json!({
            "message": err.to_string()
        }))
    })
}

/// Binds the listener up front so a configured port of 0 resolves to a real one.
fn web_server_config(settings: &Settings) -> Result<(u16, TcpListener), Error> {
    let address = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&address)
        .map_err(|e| anyhow!("Could not bind server address {}: {}", address, e))?;

    let port = listener
        .local_addr()
        .map_err(|e| anyhow!("Could not get server address: {}", e))?
        .port();

    Ok((port, listener))
}
