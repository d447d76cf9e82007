use crate::core::query;
use crate::core::resolver::VariantResolver;
use crate::domain::model::{ListingRecord, VariantSpec};
use crate::domain::ports::ListingSource;
use crate::utils::error::Result;

/// Runs one query per seed, in the given order, and concatenates the seed-tagged results.
///
/// Fail-fast: the first failing seed aborts the whole run and everything
/// gathered so far is dropped. Callers must reject empty seed lists.
pub async fn aggregate_by_tier<S: ListingSource + ?Sized>(
    source: &S,
    resolver: &VariantResolver,
    variant: &VariantSpec,
    seeds: &[String],
) -> Result<Vec<ListingRecord>> {
    let mut all_listings = Vec::new();

    for seed in seeds {
        let encoding = resolver.resolve(&variant.item_family, variant.phase());
        let spec = query::build(
            &variant.item_family,
            &variant.sub_variant,
            variant.phase(),
            &encoding,
            Some(seed),
        );

        let listings = source.fetch(&spec).await.map_err(|e| {
            tracing::warn!(
                "Seed {} failed, abandoning {} listings gathered so far: {}",
                seed,
                all_listings.len(),
                e
            );
            e
        })?;

        tracing::debug!("Seed {} returned {} listings", seed, listings.len());
        all_listings.extend(listings.into_iter().map(|listing| listing.with_seed(seed)));
    }

    Ok(all_listings)
}
