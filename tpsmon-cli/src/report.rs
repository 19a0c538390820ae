//! Reporting pipeline: load the stored series and render its chart

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;

use tpsmon_config::Config;
use tpsmon_graphs::{ChartConfig, ChartRenderer, TpsChart};
use tpsmon_series::{PeriodCatalog, SeriesStore};

pub async fn run(config: &Config, target_date: NaiveDate) -> Result<()> {
    let catalog = PeriodCatalog::from_config(config);
    let Some(period) = catalog.find_period(target_date) else {
        info!(date = %target_date, "date is outside every configured period, nothing to report");
        return Ok(());
    };

    let store = SeriesStore::from_config(config);
    let Some(series) = store.load(&period.season, target_date)? else {
        info!(
            date = %target_date,
            season = %period.season,
            "no series collected for this date, nothing to report"
        );
        return Ok(());
    };

    let chart_path = store.prepare_chart_path(&period.season, target_date)?;
    let chart = TpsChart::new(series, period.clone(), target_date);
    chart
        .render_to_file(&ChartConfig::from(&config.chart), &chart_path)
        .await?;

    info!(
        date = %target_date,
        phase = %period.phase,
        path = %chart_path.display(),
        "chart generated"
    );
    Ok(())
}
