use crate::commands::render;
use crate::output::Output;
use animeta_core::Catalog;
use tokio_util::sync::CancellationToken;

pub async fn run(
    catalog: &Catalog,
    cancel: &CancellationToken,
    output: &Output,
) -> color_eyre::Result<()> {
    let genres = catalog.genres(cancel).await?;
    render::print_genres(output, &genres);
    Ok(())
}
