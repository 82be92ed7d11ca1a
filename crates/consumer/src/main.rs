use anyhow::Context;

use eventrelay_infra::ConsumerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    eventrelay_observability::init();

    let config = ConsumerConfig::from_env().context("invalid consumer configuration")?;

    eventrelay_consumer::app::run(config).await
}
