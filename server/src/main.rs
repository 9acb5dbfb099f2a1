use {
    self::{config::Config, controller::Controller},
    tracing_subscriber::fmt::format::FmtSpan,
};

mod config;
mod controller;
mod error;
mod lms;
#[cfg(test)]
mod mock_backend;
mod routes;
mod store;

fn set_global_tracing_subscriber(config: &Config) {
    tracing_subscriber::fmt()
        .with_max_level(config.log_level.inner)
        .with_span_events(FmtSpan::CLOSE)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::read()?;

    set_global_tracing_subscriber(&config);

    tracing::info!(
        "Starting app with config: {}",
        serde_json::to_string(&config)?
    );

    let (controller, sender) = Controller::new(&config)?;
    let controller_task = controller.spawn();
    let bind_url = format!("0.0.0.0:{}", config.port);

    let app = routes::router(sender);
    let listener = tokio::net::TcpListener::bind(&bind_url).await?;
    tracing::info!("Dashboard listening on {bind_url}");
    axum::serve(listener, app).await?;
    controller_task.await?;
    Ok(())
}
