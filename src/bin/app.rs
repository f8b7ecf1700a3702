use std::collections::HashSet;
use std::net::{Ipv4Addr, SocketAddr};

use adapter::database::connect_database_with;
use anyhow::{Context, Result};
use api::route::v1;
use axum::Router;
use chrono::{DateTime, Duration as ChronoDuration, Local};
use kernel::model::{availability::reconcile, id::HoardingId};
use registry::AppRegistry;
use shared::config::AppConfig;
use shared::env::{which, Environment};
use shared::error::AppResult;
use tokio::net::TcpListener;
use tokio::time::sleep;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    bootstrap().await
}

fn init_logger() -> Result<()> {
    let log_level = match which() {
        Environment::Development => "debug",
        Environment::Production => "info",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    let subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(false);

    tracing_subscriber::registry()
        .with(subscriber)
        .with(env_filter)
        .try_init()?;

    Ok(())
}

async fn bootstrap() -> Result<()> {
    let app_config = AppConfig::new()?;
    let run_hour = app_config.reconciler.run_hour;
    let pool = connect_database_with(&app_config.database);

    let registry = AppRegistry::new(pool);

    // 空き状況の夜間再計算をバックグラウンドで動かす
    tokio::spawn(availability_loop(registry.clone(), run_hour));

    let app = Router::new()
        .merge(v1::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .with_state(registry);

    let addr = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), 8080);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .context("Unexpected error happened in server")
        .inspect_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,error.message = %e, "Unexpected error"
            )
        })
}

// 毎日 run_hour 時（サーバーのローカルタイムゾーン）に全看板の空き状況を計算し直す。
// キャンペーンの登録・延長時には該当する看板だけ即時反映しているため、
// このバッチは取りこぼしの補正と日付の進行による掲出開始・終了の反映を担う
async fn availability_loop(registry: AppRegistry, run_hour: u32) {
    loop {
        let wait = duration_until_next_run(Local::now(), run_hour);
        tracing::info!(
            wait_secs = wait.as_secs(),
            "next availability reconciliation scheduled"
        );
        sleep(wait).await;

        if let Err(e) = reconcile_all(&registry).await {
            // 読み取りに失敗した晩は書き込みを行わずに見送り、翌晩の実行に任せる
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "nightly availability reconciliation failed"
            );
        }
    }
}

fn duration_until_next_run(now: DateTime<Local>, run_hour: u32) -> std::time::Duration {
    let now_naive = now.naive_local();
    let mut next = now
        .date_naive()
        .and_hms_opt(run_hour, 0, 0)
        .expect("run_hour must be in 0..24");
    if next <= now_naive {
        next += ChronoDuration::days(1);
    }
    (next - now_naive).to_std().unwrap_or_default()
}

async fn reconcile_all(registry: &AppRegistry) -> AppResult<()> {
    // 予約一覧と看板一覧はどちらかの読み取りに失敗したら実行ごと中断する。
    // 不完全な予約一覧を元に書き込むより一晩スキップする方が安全なため
    let reservations = registry
        .campaign_repository()
        .list_all_reservations()
        .await?;
    let hoarding_ids: HashSet<HoardingId> = registry
        .hoarding_repository()
        .list_ids()
        .await?
        .into_iter()
        .collect();

    let today = Local::now().date_naive();
    let statuses = reconcile(&reservations, today, &hoarding_ids);
    let total = statuses.len();

    // 書き込みは 1 件失敗しても残りの看板の反映を続ける
    let mut failed = 0;
    for status in &statuses {
        if let Err(e) = registry.hoarding_repository().apply_status(status).await {
            tracing::warn!(
                hoarding_id = %status.hoarding_id,
                error.message = %e,
                "failed to apply hoarding status"
            );
            failed += 1;
        }
    }

    if failed > 0 {
        tracing::warn!(
            failed,
            total,
            %today,
            "availability reconciliation finished with failures"
        );
    } else {
        tracing::info!(total, %today, "availability reconciliation finished");
    }

    Ok(())
}
