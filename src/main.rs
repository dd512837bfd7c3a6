#[macro_use]
extern crate rocket;

use rocket::fs::FileServer;
use rocket::response::content::RawJson;
use std::sync::Arc;

mod auth;
mod boot;
mod config;
mod gallery;
mod images;
mod merge;
mod render;
mod repo;
mod router;

mod models;
mod routes;


use config::AppConfig;
use repo::{ContentRepo, GitHubRepo};

#[catch(404)]
fn not_found() -> RawJson<&'static str> {
    RawJson(r#"{"error":"Not found"}"#)
}

#[catch(500)]
fn server_error() -> RawJson<&'static str> {
    RawJson(r#"{"error":"Internal server error"}"#)
}

#[launch]
fn rocket() -> _ {
    env_logger::init();

    let config = AppConfig::load();

    // Boot check — verify/create directories, validate content files
    boot::run(&config);

    let repo: Arc<dyn ContentRepo> = Arc::new(GitHubRepo::from_config(&config));

    rocket::build()
        .manage(config.clone())
        .manage(repo)
        .mount("/static", FileServer::from(config.static_dir.clone()))
        .mount("/images", FileServer::from(config.images_dir.clone()))
        .mount("/", routes::public::routes())
        .mount("/api", routes::api::routes())
        .register("/", catchers![not_found, server_error])
}
