//! Data bridge — runs portal I/O off the event loop and reports back as
//! [`Action`]s through the TUI's action channel.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use dojo_core::{Portal, PortalConfig, Toast, ToastKind};

use crate::action::Action;

/// Connect to the learner portal and hand the session to the app.
///
/// Connect warnings (e.g. a missing learner profile) are surfaced as
/// toasts. Gives up quietly when cancelled.
pub async fn spawn_data_bridge(
    config: PortalConfig,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let url = config.url.clone();
    let result = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            debug!("connect cancelled");
            return;
        }
        result = Portal::connect(config) => result,
    };

    let portal = match result {
        Ok(portal) => portal,
        Err(e) => {
            warn!(%url, error = %e, "failed to connect to learner portal");
            let _ = action_tx.send(Action::ConnectFailed(e.to_string()));
            return;
        }
    };

    info!(%url, "learner portal session ready");
    let warnings = portal.take_warnings().await;
    let _ = action_tx.send(Action::Connected(portal));
    for warning in warnings {
        let _ = action_tx.send(Action::Notify(Toast::new(
            ToastKind::Info,
            "Heads up",
            warning,
        )));
    }
}

/// Reload both collections in the background.
pub fn spawn_refresh(portal: Portal, action_tx: mpsc::UnboundedSender<Action>) {
    tokio::spawn(async move {
        let action = match portal.refresh().await {
            Ok(()) => Action::Refreshed,
            Err(e) => {
                warn!(error = %e, "portal refresh failed");
                Action::RefreshFailed(e.to_string())
            }
        };
        let _ = action_tx.send(action);
    });
}
