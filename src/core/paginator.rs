use crate::domain::model::{DisplayDocument, EmbedField, ListingRecord, Page, ReplyMessage};
use crate::domain::ports::ReplyChannel;
use crate::utils::error::Result;
use std::time::Duration;

pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const EMBED_TITLE: &str = "Listings";
pub const EMBED_COLOR: u32 = 0x0099ff;

/// Pause inserted after every `batch_size`-th page (counting from the first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottlePolicy {
    pub batch_size: usize,
    pub delay: Duration,
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self {
            batch_size: 5,
            delay: Duration::from_millis(1000),
        }
    }
}

impl ThrottlePolicy {
    pub fn none() -> Self {
        Self {
            batch_size: 1,
            delay: Duration::ZERO,
        }
    }

    /// Pages 0, batch, 2*batch, ... are followed by a pause.
    pub fn pause_after(&self, page_index: usize) -> bool {
        !self.delay.is_zero() && page_index % self.batch_size.max(1) == 0
    }
}

pub fn paginate(records: &[ListingRecord], page_size: usize) -> Vec<Page> {
    records
        .chunks(page_size.max(1))
        .enumerate()
        .map(|(index, chunk)| Page {
            index,
            records: chunk.to_vec(),
        })
        .collect()
}

/// `129999` cents renders as `$1299.99`.
pub fn format_price(minor_units: u64) -> String {
    format!("${}.{:02}", minor_units / 100, minor_units % 100)
}

#[derive(Debug, Clone)]
pub struct Presenter {
    item_url_base: String,
}

impl Presenter {
    pub fn new(item_url_base: &str) -> Self {
        Self {
            item_url_base: item_url_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn listing_url(&self, listing: &ListingRecord) -> String {
        format!("{}/{}", self.item_url_base, listing.id)
    }

    fn field(&self, listing: &ListingRecord) -> EmbedField {
        let name = match &listing.searched_seed {
            Some(seed) => format!(
                "Listing for {} (Paint Seed: {})",
                listing.item.market_hash_name, seed
            ),
            None => format!("Listing for {}", listing.item.market_hash_name),
        };
        let value = format!(
            "**Price:** {}\n**Float:** {}\n**View Listing:** [Link]({})",
            format_price(listing.price),
            listing.item.float_value,
            self.listing_url(listing)
        );
        EmbedField { name, value }
    }

    pub fn present(&self, page: &Page) -> DisplayDocument {
        DisplayDocument {
            title: EMBED_TITLE.to_string(),
            fields: page.records.iter().map(|l| self.field(l)).collect(),
            color: EMBED_COLOR,
        }
    }
}

/// Sends pages strictly in order; the first failed send stops delivery.
pub async fn deliver<C: ReplyChannel + ?Sized>(
    pages: &[Page],
    channel: &C,
    presenter: &Presenter,
    throttle: &ThrottlePolicy,
) -> Result<usize> {
    for page in pages {
        let document = presenter.present(page);
        channel.follow_up(ReplyMessage::Embed(document)).await?;

        if throttle.pause_after(page.index) {
            tracing::debug!("Pausing {:?} after page {}", throttle.delay, page.index);
            tokio::time::sleep(throttle.delay).await;
        }
    }
    Ok(pages.len())
}
