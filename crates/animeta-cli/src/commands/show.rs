use crate::commands::render;
use crate::output::Output;
use animeta_core::Catalog;
use tokio_util::sync::CancellationToken;

pub async fn run(
    catalog: &Catalog,
    id: &str,
    cancel: &CancellationToken,
    output: &Output,
) -> color_eyre::Result<()> {
    match catalog.details(id, cancel).await? {
        Some(record) => {
            render::placeholder_banner(output, std::slice::from_ref(&record));
            render::print_detail(output, &record);
        }
        None => output.error(format!("No anime found for id '{}'", id)),
    }
    Ok(())
}
