use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};

use idp_api::{create_app, AppState, CookieSettings};
use idp_core::repositories::{
    AuditSink, InMemoryLoginStateStore, LoginStateStore, TracingAuditSink,
};
use idp_core::services::{AuthDependencies, AuthService, AuthServiceConfig, KeyMaterial};
use idp_core::SystemClock;
use idp_infra::cache::RedisLoginStateStore;
use idp_infra::database::{
    DatabasePool, PostgresAuditSink, PostgresTokenRepository, PostgresUserRepository,
};
use idp_infra::GoogleOAuthProvider;
use idp_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting identity provider");

    let config = AppConfig::from_env();
    let keys = KeyMaterial::load(&config.auth.jwt.private_key_path).with_context(|| {
        format!(
            "loading signing key from {}",
            config.auth.jwt.private_key_path
        )
    })?;
    info!("Signing key loaded (kid {})", keys.key_id());

    let database = DatabasePool::new(config.database.clone())
        .await
        .context("connecting to PostgreSQL")?;
    if config.database.run_migrations {
        database.migrate().await.context("running migrations")?;
    }
    let pool = database.get_pool().clone();

    let login_states: Arc<dyn LoginStateStore> = match &config.cache.url {
        Some(_) => Arc::new(
            RedisLoginStateStore::connect(&config.cache)
                .await
                .context("connecting to Redis")?,
        ),
        None => {
            warn!("REDIS_URL not set; login state is kept in memory and lost on restart");
            Arc::new(InMemoryLoginStateStore::new())
        }
    };

    let provider = GoogleOAuthProvider::new(config.google.clone(), config.timeouts.oauth())
        .context("building Google OAuth client")?;

    let audit_sink: Arc<dyn AuditSink> = if config.auth.audit_log_table {
        Arc::new(PostgresAuditSink::new(pool.clone()))
    } else {
        info!("Audit events go to the log only");
        Arc::new(TracingAuditSink)
    };

    let deps = AuthDependencies {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        tokens: Arc::new(PostgresTokenRepository::new(pool)),
        login_states,
        provider: Arc::new(provider),
        audit_sink,
        keys: Arc::new(keys),
        clock: Arc::new(SystemClock),
    };
    let auth = Arc::new(AuthService::new(deps, AuthServiceConfig::from_app_config(&config)));

    let default_redirect = config
        .cors
        .allowed_origins
        .first()
        .cloned()
        .context("ALLOWED_ORIGINS must name at least one origin")?;
    let state = web::Data::new(AppState::new(
        auth,
        CookieSettings::from_config(&config),
        default_redirect,
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors = config.cors.clone();
    HttpServer::new(move || create_app(state.clone(), &cors))
        .bind(&bind_address)
        .with_context(|| format!("binding {}", bind_address))?
        .run()
        .await?;

    database.close().await;
    Ok(())
}
