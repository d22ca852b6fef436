use std::time::Duration;

use anyhow::Result;
use chrono::{Duration as ChronoDuration, Utc};
use futures::join;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use solarview_core::app_state::{build_app_state, AppState};
use solarview_core::core::config::Config;
use solarview_core::domain::export::service::csv_export_service;
use solarview_core::domain::plant::dto::plant_search::PlantSearch;
use solarview_core::domain::plant::service::plant_service::filter_plants;
use solarview_core::domain::table::table_query::TableQuery;
use solarview_core::domain::table::table_snapshot::TableSnapshot;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    init_tracing(&config);

    info!(api_base = %config.api_base, "solarview-core starting");
    let state = build_app_state(&config);

    // --- Step 1: open a session when credentials are configured ---
    if let Some((account, password)) = config.credentials() {
        state.auth_service.sign_in(account, password).await?;
        if let Err(err) = state.auth_service.refresh_profile().await {
            warn!(%err, "Profile refresh failed; continuing with the bare session");
        }
        if let Some(user) = state.auth_service.current_user().await {
            info!(
                user_id = %user.user_id,
                auth = user.auth.as_deref().unwrap_or("-"),
                "Session open"
            );
        }
    } else {
        warn!("No credentials configured; fetches will surface the missing credential");
    }

    // --- Step 2: run one report, or keep polling in watch mode ---
    let mut query = initial_query(&config);
    match config.watch_interval_secs {
        Some(secs) => watch_loop(&state, &config, &mut query, secs).await?,
        None => {
            refresh_cycle(&state, &config, &query).await;
            survey_tables(&state, &query).await;

            let view = state.alarm_service.snapshot().await;
            export_page(&config, &view.page.items)?;
        }
    }

    // --- Step 3: drop the session ---
    if state.auth_service.current_user().await.is_some() {
        state.auth_service.sign_out().await;
    }

    Ok(())
}

/// Console logging, plus a daily-rolled file when a log dir is configured.
fn init_tracing(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer();

    match &config.log_dir {
        Some(dir) => {
            let log_file = tracing_appender::rolling::daily(dir, "solarview.log");
            let file_layer = fmt::layer().with_writer(log_file).with_ansi(false);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .with(file_layer)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console_layer)
                .init();
        }
    }
}

fn initial_query(config: &Config) -> TableQuery {
    let today = Utc::now().date_naive();
    let mut query = TableQuery::new(
        config.plant_id,
        today - ChronoDuration::days(config.lookback_days),
        today,
    );
    query.page_size = config.page_size;
    query
}

/// One dashboard refresh: alarm page plus derived options, then the
/// KPI strip.
async fn refresh_cycle(state: &AppState, config: &Config, query: &TableQuery) {
    let token = state.session.token().await;
    let view = state.alarm_service.refresh(token.as_deref(), query).await;
    log_table("alarms", &view);

    if view.error.is_none() {
        match state.alarm_service.rows().await {
            Ok(rows) => {
                if let Some(last) = rows.items.last() {
                    info!(
                        device = %last.device_name,
                        message = %last.alarm_message,
                        at = %last.reg_date,
                        "Latest alarm"
                    );
                }
            }
            Err(err) => warn!(%err, "Alarm rows did not decode"),
        }
    }

    let options = state.alarm_service.device_id_options().await;
    if !options.is_empty() {
        info!(count = options.len(), "Device id options collected");
    }

    if let Some(token) = token.as_deref() {
        match state
            .dashboard_service
            .fetch_kpi(token, config.plant_id)
            .await
        {
            Ok(kpi) => info!(
                today_gen_kwh = kpi.today_gen_kwh,
                current_power_kw = kpi.current_power_kw,
                "Dashboard KPI"
            ),
            Err(err) => warn!(%err, "Dashboard KPI fetch failed"),
        }
    }
}

/// One-shot sweep over the management tables: history, devices, users
/// and the plant directory, one summary line each.
async fn survey_tables(state: &AppState, query: &TableQuery) {
    let token = state.session.token().await;

    let (history, devices, users) = join!(
        state.history_service.refresh(token.as_deref(), query),
        state.device_service.refresh(token.as_deref(), query),
        state.user_service.refresh(token.as_deref(), query),
    );
    log_table("history", &history);
    log_table("devices", &devices);
    log_table("users", &users);

    let inverter_ids = state.history_service.inverter_id_options().await;
    if !inverter_ids.is_empty() {
        info!(count = inverter_ids.len(), "Inverter id options collected");
    }

    if history.error.is_none() {
        match state.history_service.rows().await {
            Ok(rows) => {
                if let Some(last) = rows.items.last() {
                    info!(
                        inv_id = last.inv_id,
                        out_power = last.out_power,
                        at = %last.recv_time,
                        "Latest reading"
                    );
                }
            }
            Err(err) => warn!(%err, "History rows did not decode"),
        }
    }

    if devices.error.is_none() {
        match state.device_service.rows().await {
            Ok(rows) => {
                let active = rows.items.iter().filter(|r| r.use_yn == "Y").count();
                info!(active, listed = rows.items.len(), "Inverter registrations");
            }
            Err(err) => warn!(%err, "Device rows did not decode"),
        }
    }

    if users.error.is_none() {
        match state.user_service.rows().await {
            Ok(rows) => info!(accounts = rows.items.len(), "Admin accounts"),
            Err(err) => warn!(%err, "User rows did not decode"),
        }
    }

    if let Some(token) = token.as_deref() {
        match state.plant_service.fetch_plants(token).await {
            Ok(plants) => {
                let total = plants.len();
                let active = filter_plants(
                    plants,
                    &PlantSearch {
                        keyword: None,
                        use_yn: Some("Y".into()),
                    },
                )
                .len();
                info!(active, total, "Plant directory");
            }
            Err(err) => warn!(%err, "Plant fetch failed"),
        }
    }
}

fn log_table(table: &str, view: &TableSnapshot) {
    match &view.error {
        Some(err) => error!(table, %err, "Table refresh ended in an error state"),
        None => info!(
            table,
            rows = view.page.items.len(),
            total = view.page.total_elements,
            pages = view.page.total_pages,
            "Table loaded"
        ),
    }
}

/// Write the currently displayed page under the export dir.
fn export_page(config: &Config, rows: &[serde_json::Value]) -> Result<()> {
    let filename = format!("alarms_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));
    if let Some(path) = csv_export_service::export_rows(&config.export_dir, &filename, rows)? {
        info!(path = %path.display(), "Alarm page exported");
    }
    Ok(())
}

/// Re-poll on a fixed interval until Ctrl+C, keeping the date window
/// anchored on today.
async fn watch_loop(
    state: &AppState,
    config: &Config,
    query: &mut TableQuery,
    secs: u64,
) -> Result<()> {
    let mut tick = tokio::time::interval(Duration::from_secs(secs.max(1)));
    info!(secs, "Watch mode: polling until Ctrl+C");

    loop {
        tokio::select! {
            _ = tick.tick() => {
                let today = Utc::now().date_naive();
                if query.date_to != today {
                    query.set_date_to(today);
                    query.set_date_from(today - ChronoDuration::days(config.lookback_days));
                }
                refresh_cycle(state, config, query).await;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                state.alarm_service.invalidate();
                state.history_service.invalidate();
                state.device_service.invalidate();
                state.user_service.invalidate();
                break;
            }
        }
    }

    Ok(())
}
