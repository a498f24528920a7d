use std::time::Duration;

use log::*;
use seva_engine::{db_types::CounterCorrection, AggregationApi, SqliteDatabase};
use tokio::task::JoinHandle;

/// Starts the raised-counter reconciliation worker. Do not await the returned JoinHandle, as it will run indefinitely.
///
/// A campaign's `raised` counter can fall behind the ledger if the counter update fails after a donation is stored.
/// This worker periodically rewrites any such counter from the ledger.
pub fn start_reconcile_worker(db: SqliteDatabase, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        let api = AggregationApi::new(db);
        info!("🕰️ Raised counter reconciliation worker started. Interval: {}s", interval.as_secs());
        loop {
            timer.tick().await;
            debug!("🕰️ Running raised counter reconciliation job");
            match api.reconcile_counters().await {
                Ok(corrections) if corrections.is_empty() => trace!("🕰️ All raised counters match the ledger"),
                Ok(corrections) => {
                    info!("🕰️ {} raised counters corrected", corrections.len());
                    debug!("🕰️ Corrections: {}", correction_list(&corrections));
                },
                Err(e) => {
                    error!("🕰️ Error running raised counter reconciliation job: {e}");
                },
            }
        }
    })
}

fn correction_list(corrections: &[CounterCorrection]) -> String {
    corrections
        .iter()
        .map(|c| format!("[{}] {} -> {}", c.campaign_id, c.previous, c.corrected))
        .collect::<Vec<String>>()
        .join(", ")
}
