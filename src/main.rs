use actix_cors::Cors;
use actix_web::{
    http::{header, uri::Uri},
    middleware::{Condition, Logger as ActixLogger},
    web, App, HttpServer,
};
use chrono::Local;
use colored::*;
use dotenvy::dotenv;
use env_logger::{Builder, Env};
use justvaluestore::{configure, ValueStore};
use log::{debug, error, info, warn};
use std::{
    env as stdenv,
    fs::File,
    io::{BufRead, BufReader, Error as IOError, ErrorKind, Write},
    path::Path,
    process::{exit, id as process_id},
};

mod logger;
use crate::logger::*;
mod cors;
use crate::cors::*;
mod env;
use crate::env::*;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const NAME: &str = env!("CARGO_PKG_NAME");

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    setup_logger();
    load_env_file();

    let config = ServerConfig::from_env();
    let target_server = config.bind_addr();
    info!("{} {} starting with PID: {}", NAME, VERSION, process_id());
    debug!("Config: {:?}", config);

    let cors_origins = load_cors_origins(&config.cors_file);
    let store = web::Data::new(ValueStore::new());
    let max_payload_bytes = config.max_payload_bytes;

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Condition::new(
                !cors_origins.is_empty(),
                build_cors(&cors_origins),
            ))
            .wrap(ActixLogger::default())
            .app_data(store.clone())
            .app_data(web::PayloadConfig::new(max_payload_bytes))
            .configure(configure)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    let server = match server.bind(target_server.as_str()) {
        Ok(server) => server,
        Err(e) if e.kind() == ErrorKind::AddrInUse => {
            error!("Address {} is already in use: {}", target_server, e);
            exit(52);
        }
        Err(e) => {
            error!("Failed to bind {}: {}", target_server, e);
            exit(1);
        }
    };

    info!("Listening on http://{}", target_server);
    let execution = server.run().await;
    info!("Server stopped, PID: {}", process_id());

    if let Err(e) = execution {
        error!("Server failed: {:?}", e);
        return Err(e);
    }
    Ok(())
}
