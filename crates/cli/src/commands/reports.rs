use murti_admin::AdminApi;
use murti_admin::types::ReportRange;
use murti_core::format_inr;

use crate::error::CliError;
use crate::output::print_json;

pub async fn sales(api: &AdminApi, range: &ReportRange) -> Result<(), CliError> {
    let report = api.reports().sales(range).await?;
    tracing::info!(
        revenue = %format_inr(report.total_revenue),
        orders = report.total_orders,
        "Sales"
    );
    print_json(&report)
}

pub async fn show_settings(api: &AdminApi) -> Result<(), CliError> {
    print_json(&api.settings().get().await?)
}
