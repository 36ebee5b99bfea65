use std::sync::Arc;

use crate::api::ApiClient;
use crate::controller::{View, ViewController};
use crate::error::Result;
use crate::settings::Settings;

pub mod api;
pub mod clock;
pub mod controller;
pub mod error;
pub mod settings;
pub mod subscription;
pub mod views;

pub use error::Error;

/// Runs the kiosk headless: loads the main view, then logs every clock and
/// alarm status change until Ctrl-C.
pub async fn run(settings: &Arc<Settings>) -> Result<()> {
    let api = ApiClient::new(&settings.client)?;
    tracing::info!("Using backend at {}", api.base_url());

    let mut controller = ViewController::new(api, settings.client.clone());
    controller.start();

    if let Err(e) = controller.show(View::Main).await {
        tracing::warn!("Could not load alarms: {}", e);
    }
    for row in controller.alarms().rows() {
        tracing::info!("{} {} [{}]", row.time, row.info, if row.enabled { "on" } else { "off" });
    }

    let mut clock = controller.subscribe_clock();
    let mut status = controller.subscribe_status();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = clock.changed() => {
                if changed.is_err() {
                    break;
                }
                let shown = clock.borrow_and_update().clone();
                tracing::debug!("{} {}", shown.time, shown.date);
            }
            changed = status.changed() => {
                if changed.is_err() {
                    break;
                }
                let _ = status.borrow_and_update();
                tracing::info!("{}", controller.status_view().text());
            }
        }
    }

    tracing::info!("shutting down");

    Ok(())
}
