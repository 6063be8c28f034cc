//! Best-effort goal-reached notification.
//!
//! When a submission makes the collection hit the target for the first time,
//! the rendered VCF body is POSTed to a pre-configured webhook. The dispatch
//! is fire-and-forget: it runs on a detached task after the response is
//! already decided, failures are logged and never retried, and nothing about
//! it is ever surfaced to the submitting caller.

use std::time::Duration;
use tracing::{error, info};

/// Dispatch timeout; a slow webhook must not pin a blocking thread forever.
const DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Spawn a detached task delivering the export body to the webhook.
///
/// `ureq` is a synchronous client, so the actual request runs under
/// `spawn_blocking` the way the rest of this codebase wraps sync I/O.
pub fn dispatch_target_reached(webhook_url: String, count: usize, vcf_body: String) {
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || {
            ureq::post(&webhook_url)
                .timeout(DISPATCH_TIMEOUT)
                .set("Content-Type", "text/vcard")
                .set("X-Contact-Count", &count.to_string())
                .send_string(&vcf_body)
        })
        .await;

        match result {
            Ok(Ok(_)) => info!("Target-reached notification delivered"),
            Ok(Err(e)) => error!("Target-reached notification failed: {}", e),
            Err(e) => error!("Target-reached notification task failed: {}", e),
        }
    });
}
