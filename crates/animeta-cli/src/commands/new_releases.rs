use crate::commands::render;
use crate::output::Output;
use animeta_core::Catalog;
use tokio_util::sync::CancellationToken;

pub async fn run(
    catalog: &Catalog,
    limit: u32,
    cancel: &CancellationToken,
    output: &Output,
) -> color_eyre::Result<()> {
    let records = catalog.new_releases(limit, cancel).await?;
    render::placeholder_banner(output, &records);
    render::print_records(output, "New Releases", &records);
    Ok(())
}
