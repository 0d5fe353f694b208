use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkout_attestor::adapters::http::{api_router, AppState, SessionCookieConfig};
use checkout_attestor::adapters::paypal::{PayPalConfig as PayPalClientConfig, PayPalPaymentAdapter};
use checkout_attestor::adapters::session::{InMemorySessionStore, RedisSessionStore};
use checkout_attestor::adapters::signing::Secp256k1AttestationSigner;
use checkout_attestor::config::{AppConfig, ServerConfig, SessionBackend};
use checkout_attestor::ports::SessionStore;

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.server);
    config.validate().context("validating configuration")?;

    let paypal = PayPalClientConfig::new(
        config.paypal.client_id.clone(),
        config.paypal.client_secret.clone(),
    )
    .with_base_url(config.paypal.api_base_url.clone())
    .with_timeout(config.paypal.timeout());
    let payment_provider = Arc::new(PayPalPaymentAdapter::new(paypal)?);
    tracing::info!(
        api_base_url = %config.paypal.api_base_url,
        sandbox = config.paypal.is_sandbox(),
        "PayPal client ready"
    );

    let session_store = build_session_store(&config).await?;

    let signer = Secp256k1AttestationSigner::from_config(config.signing.private_key.as_ref());
    if signer.is_ready() {
        tracing::info!(
            address = signer.address().as_deref().unwrap_or_default(),
            "Attestation signer ready"
        );
    } else {
        tracing::warn!(
            reason = signer.load_error().unwrap_or("unknown"),
            "Attestation signing key unavailable; signing requests will fail"
        );
    }

    let state = AppState::new(
        payment_provider,
        session_store,
        Arc::new(signer),
        SessionCookieConfig {
            name: config.session.cookie_name.clone(),
            secure: config.session.cookie_secure,
        },
    );

    let app = with_middleware(api_router(state), &config.server)?;

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr()?).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn build_session_store(config: &AppConfig) -> Result<Arc<dyn SessionStore>> {
    let ttl_secs = config.session.ttl_secs;
    match (config.session.backend, config.redis.as_ref()) {
        (SessionBackend::Redis, Some(redis_config)) => {
            let client = redis::Client::open(redis_config.url.as_str())?;
            let conn = tokio::time::timeout(
                redis_config.connect_timeout(),
                client.get_multiplexed_tokio_connection(),
            )
            .await
            .context("connecting to Redis timed out")??;
            tracing::info!("Using Redis session store");
            Ok(Arc::new(RedisSessionStore::new(conn, ttl_secs)))
        }
        (SessionBackend::Redis, None) => anyhow::bail!("Redis session backend requires REDIS__URL"),
        (SessionBackend::Memory, _) => {
            let store = InMemorySessionStore::new(ttl_secs);
            store.spawn_purge_task(config.session.purge_interval());
            tracing::info!(
                purge_interval_secs = config.session.purge_interval_secs,
                "Using in-memory session store"
            );
            Ok(Arc::new(store))
        }
    }
}

fn with_middleware(router: Router, server: &ServerConfig) -> Result<Router> {
    let router = router
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http());

    let origins = server
        .cors_origins_list()
        .iter()
        .map(|origin| HeaderValue::from_str(origin))
        .collect::<Result<Vec<_>, _>>()
        .context("parsing CORS origins")?;
    if origins.is_empty() {
        return Ok(router);
    }

    // The session cookie has to travel cross-origin, so origins are explicit.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);
    Ok(router.layer(cors))
}

fn init_tracing(server: &ServerConfig) {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| server.log_level.clone());
    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(env_filter));

    let result = if server.environment.json_logs() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };
    if result.is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
