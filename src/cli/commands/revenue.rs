use anyhow::Result;
use chrono::Local;
use common::format_currency;
use compute::{load_counselor, load_revenue, RevenueSummary};
use model::TableStore;
use tracing::{debug, info};

pub async fn run(store: &dyn TableStore, user_id: &str) -> Result<String> {
    let counselor = load_counselor(store, user_id).await?;
    debug!("Loading revenue for counselor {}", counselor.id);

    let state = load_revenue(store, &counselor.id, &Local).await;
    if let Some(message) = state.error() {
        anyhow::bail!("{}", message);
    }

    let summary = state.data_or_default();
    info!("Revenue over {} months", summary.months.len());
    Ok(render(&summary))
}

/// Month table followed by the grand totals.
pub fn render(summary: &RevenueSummary) -> String {
    let mut out = format!("{:<10}{:>14}{:>10}\n", "Month", "Revenue", "Sessions");
    for month in &summary.months {
        out.push_str(&format!(
            "{:<10}{:>14}{:>10}\n",
            month.month,
            format_currency(month.total),
            month.count
        ));
    }
    out.push_str(&format!(
        "{:<10}{:>14}{:>10}",
        "Total",
        format_currency(summary.total),
        summary.count
    ));
    out
}
