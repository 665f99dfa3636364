use crate::commands::render;
use crate::output::Output;
use animeta_core::Catalog;
use animeta_models::BrowseQuery;
use tokio_util::sync::CancellationToken;

pub async fn run(
    catalog: &Catalog,
    query: BrowseQuery,
    cancel: &CancellationToken,
    output: &Output,
) -> color_eyre::Result<()> {
    let page = catalog.browse(&query, cancel).await?;
    render::placeholder_banner(output, &page.records);
    if output.is_json() {
        output.json(&serde_json::to_value(&page).unwrap_or_default());
        return Ok(());
    }
    render::print_records(output, "Browse", &page.records);
    output.println(format!("  page {} of {}", page.current_page, page.last_page));
    Ok(())
}
