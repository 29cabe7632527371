use application::{api, logging, Args, Config};
use service::{infra::Rest, Service};
use tracing as log;

#[tokio::main]
async fn main() {
    logging::init();

    _ = start().await;
}

async fn start() -> Result<(), ()> {
    let Args { config, .. } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config {
        server, store, log, ..
    } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    logging::set_level(log.level.into());

    let rest = Rest::new(&store.into()).map_err(|e| {
        log::error!("failed to initialize `Rest` client: {e}");
    })?;
    let cors = server.cors.layer().map_err(|e| {
        log::error!("failed to configure CORS: {e}");
    })?;

    let app = api::router(Service::new(rest), cors);

    application::serve(&server, app).await.map_err(|e| {
        log::error!(
            "webserver on `{}:{}` failed: {e}",
            server.host,
            server.port,
        );
    })
}
