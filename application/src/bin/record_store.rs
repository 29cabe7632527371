//! Mock record store, serving `User` records from memory.

use application::{api, config, logging, Args, Config};
use service::{infra::Memory, Service};
use tracing as log;

#[tokio::main]
async fn main() {
    logging::init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args { config, seed } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        record_store: config::RecordStore {
            server,
            seed: configured_seed,
        },
        log,
        ..
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    logging::set_level(log.level.into());

    let memory = match seed.or(configured_seed) {
        Some(path) => Memory::load(&path).await.map_err(|e| {
            log::error!("failed to seed from `{}`: {e}", path.display());
        })?,
        None => {
            log::warn!("no seed file provided, starting empty");
            Memory::default()
        }
    };
    let cors = server.cors.layer().map_err(|e| {
        log::error!("failed to configure CORS: {e}");
    })?;

    let app = api::router(Service::new(memory), cors);

    application::serve(&server, app).await.map_err(|e| {
        log::error!(
            "webserver on `{}:{}` failed: {e}",
            server.host,
            server.port,
        );
    })
}
