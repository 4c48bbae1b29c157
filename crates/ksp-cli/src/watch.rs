//! Restock watcher: polls a product's branch stock and reports transitions.

use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;

use ksp_client::{Product, StockMap};

/// Branches whose availability flipped between two polls.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct AvailabilityChanges {
    pub resupplied: Vec<String>,
    pub ran_out: Vec<String>,
}

/// Names of the branches that currently have stock.
pub(crate) fn available_branches(stock: &StockMap) -> BTreeSet<String> {
    stock
        .iter()
        .filter(|(_, in_stock)| **in_stock)
        .map(|(branch, _)| branch.clone())
        .collect()
}

pub(crate) fn availability_changes(
    previous: &BTreeSet<String>,
    current: &BTreeSet<String>,
) -> AvailabilityChanges {
    AvailabilityChanges {
        resupplied: current.difference(previous).cloned().collect(),
        ran_out: previous.difference(current).cloned().collect(),
    }
}

/// Polls until ctrl-c.
pub(crate) async fn run(product: &Product, interval: Duration) {
    watch_until(product, interval, shutdown_signal()).await;
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c, watch runs until killed");
        std::future::pending::<()>().await;
    }
}

/// Polls until `shutdown` resolves. The one `shutdown` future is raced
/// against both the tick and the stock lookup, so a signal that lands
/// mid-request ends the watch without waiting out the request.
///
/// A failed lookup is logged and the previous state kept; an empty stock
/// table is treated as "no data" rather than "sold out".
pub(crate) async fn watch_until<F>(product: &Product, interval: Duration, shutdown: F)
where
    F: Future<Output = ()>,
{
    tracing::info!(
        uin = product.uin(),
        name = product.name(),
        interval_secs = interval.as_secs(),
        "watching branch stock"
    );

    tokio::pin!(shutdown);
    let mut available = BTreeSet::new();
    let mut ticker = tokio::time::interval(interval);

    loop {
        let poll = async {
            ticker.tick().await;
            product.stock().await
        };

        let result = tokio::select! {
            biased;
            () = &mut shutdown => {
                tracing::info!("received shutdown signal, stopping watch");
                return;
            }
            result = poll => result,
        };

        let stock = match result {
            Ok(stock) => stock,
            Err(e) => {
                tracing::warn!(error = %e, "stock lookup failed");
                continue;
            }
        };
        if stock.is_empty() {
            tracing::debug!("stock lookup returned no branches");
            continue;
        }

        let current = available_branches(&stock);
        let changes = availability_changes(&available, &current);
        for branch in &changes.resupplied {
            println!("Branch '{branch}' has been resupplied!");
        }
        for branch in &changes.ran_out {
            println!("Branch '{branch}' ran out of stock!");
        }
        available = current;
    }
}
