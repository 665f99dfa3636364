use crate::commands::render;
use crate::output::Output;
use animeta_core::Catalog;
use serde_json::json;
use tokio_util::sync::CancellationToken;

const TRENDING_LIMIT: u32 = 10;
const NEW_RELEASES_LIMIT: u32 = 10;

/// The landing view. The four logical queries run concurrently; each one
/// still walks its provider chain sequentially.
pub async fn run(
    catalog: &Catalog,
    cancel: &CancellationToken,
    output: &Output,
) -> color_eyre::Result<()> {
    let (featured, trending, new_releases, genres) = futures::join!(
        catalog.featured(cancel),
        catalog.trending(TRENDING_LIMIT, cancel),
        catalog.new_releases(NEW_RELEASES_LIMIT, cancel),
        catalog.genres(cancel),
    );
    let featured = featured?;
    let trending = trending?;
    let new_releases = new_releases?;
    let genres = genres?;

    let mut rendered = vec![featured.clone()];
    rendered.extend(trending.iter().cloned());
    rendered.extend(new_releases.iter().cloned());
    render::placeholder_banner(output, &rendered);

    if output.is_json() {
        output.json(&json!({
            "featured": featured,
            "trending": trending,
            "newReleases": new_releases,
            "genres": genres,
        }));
        return Ok(());
    }

    output.heading("Featured");
    output.println(format!("  {}", render::record_line(&featured)));
    output.println(format!("  {}", featured.short_description));
    output.println("");
    render::print_records(output, "Trending", &trending);
    output.println("");
    render::print_records(output, "New Releases", &new_releases);
    output.println("");
    let names: Vec<&str> = genres.iter().map(|g| g.name.as_str()).collect();
    output.heading("Genres");
    output.println(format!("  {}", names.join(", ")));
    Ok(())
}
