use igapi::api::{HttpTransport, IgClient, Session, csrf_token_from_cookies};
use igapi::db::{SettingKey, SettingsStorage, SettingsStore, StorageOptions};
use mimalloc::MiMalloc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &igapi::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        api_url = %cfg.api_url,
        database_url = %cfg.database_url,
        settings_table = %cfg.settings_table,
        proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        loglevel = %cfg.loglevel
    );

    let Some(username) = cfg.username.as_deref() else {
        warn!("IGAPI_USERNAME is not set; nothing to do");
        return Ok(());
    };

    let storage = SettingsStorage::open(username, StorageOptions::from_config(cfg)).await?;
    info!(
        username,
        id = ?storage.row_id(),
        logged_in = storage.maybe_logged_in(),
        "opened settings"
    );

    // Optional argument: a username to check for availability.
    let Some(candidate) = std::env::args().nth(1) else {
        return Ok(());
    };

    let csrf_token = cfg.csrf_token.clone().or_else(|| {
        storage
            .value(SettingKey::Cookies)
            .and_then(csrf_token_from_cookies)
            .map(str::to_string)
    });
    let Some(csrf_token) = csrf_token else {
        warn!("no csrftoken in IGAPI_CSRF_TOKEN or the stored cookies; log in first");
        return Ok(());
    };

    let session = match Session::from_settings(&storage, csrf_token) {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "no stored session; log in first");
            return Ok(());
        }
    };

    let mut transport = HttpTransport::new(cfg)?;
    if let Some(token) = storage.value(SettingKey::Token) {
        transport = transport.with_auth_token(token);
    }
    let client = IgClient::new(transport, session);

    match client.account().check_username(&candidate).await {
        Ok(resp) => info!(candidate = %candidate, response = ?resp, "username check"),
        Err(e) => warn!(candidate = %candidate, error = %e, "username check failed"),
    }
    Ok(())
}
