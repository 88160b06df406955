use anyhow::Result;
use colored::Colorize;

use rasoi_core::trends::{RankedTrend, TrendsService, rank_trends};

use super::AppContext;

const BAR_WIDTH: usize = 20;

pub async fn run(ctx: &AppContext, limit: Option<usize>) -> Result<()> {
    let t = ctx.translator();
    let client = ctx.trends_client()?;

    let trends = client.fetch_trends().await?;
    let mut ranked = rank_trends(trends);
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }

    println!("{}", format!("📈 {}", t.t("chefguru.trends")).bright_magenta().bold());
    if ranked.is_empty() {
        println!("{}", "No trend data available.".bright_black());
        return Ok(());
    }

    for entry in &ranked {
        println!("{}", format_entry(entry));
    }
    Ok(())
}

fn format_entry(entry: &RankedTrend) -> String {
    let trend = &entry.trend;
    format!(
        "{:>2}. {:<24} {} {:.1}\n    👁 {}  ❤ {}  💬 {}",
        entry.rank,
        trend.dish_name,
        bar(entry.relative_percent).bright_green(),
        trend.popularity_score,
        trend.views,
        trend.likes,
        trend.comments_count
    )
}

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
