mod model;
mod server;

use std::net::SocketAddr;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    router,
    scheduler::booking_completion,
    service::admin::code::AdminCodeService,
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;
    let address: SocketAddr =
        config
            .bind_address
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidEnvVar {
                name: "BIND_ADDRESS".to_string(),
                reason: e.to_string(),
            })?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let chatbot = startup::setup_model_client(&config, http_client);

    let admin_code_service = AdminCodeService::new();
    startup::check_for_admin(&db, &admin_code_service).await?;

    let state = AppState::new(db, admin_code_service, chatbot);

    booking_completion::start_scheduler(state.db.clone(), state.booking_locks.clone()).await?;

    let app = router::router()?.with_state(state).layer(session);

    let listener = tokio::net::TcpListener::bind(address).await?;
    tracing::info!("Listening on {}", address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
