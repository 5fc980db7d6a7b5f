use crate::events::AppEvent;
use crate::sys::server::FrameSnapshot;
use async_channel::Sender;
use orbitline_core::TICK_PERIOD_MS;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::time::MissedTickBehavior;

/// Spawns the daemon's background services on a dedicated runtime thread:
/// the rotation ticker, the control socket, and the config watcher. The
/// engine itself owns no timer; this ticker is its injected clock.
pub fn start_background_services(
    tx: Sender<AppEvent>,
    snapshot: FrameSnapshot,
    socket_path: PathBuf,
) {
    thread::spawn(move || {
        let rt = Runtime::new().expect("Failed to create Tokio runtime");

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    run_ticker(tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(tx, snapshot, socket_path).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}

async fn run_ticker(tx: Sender<AppEvent>) {
    let mut interval = tokio::time::interval(Duration::from_millis(TICK_PERIOD_MS));
    // a stalled consumer should not be repaid with a burst of ticks
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if tx.send(AppEvent::Tick).await.is_err() {
            break;
        }
    }
}
