use agenda_domain::config::ApiConfig;
use agenda_kernel::config::load_config;
use agenda_logger::Logger;
use agenda_server::Server;
use anyhow::Context;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(None::<&str>).context("Critical: Configuration is malformed")?;

    let _log = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .filter(&cfg.logging.filter)
        .directory(cfg.logging.directory.as_ref())
        .json(cfg.logging.json)
        .init()?;

    Server::new(cfg).await?.run().await
}
