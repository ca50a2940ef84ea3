//! "Jobs expiring soon", the home page carousel fed by the uncached
//! `/api/jobs/expiring-soon` endpoint.

use chrono::{Days, NaiveDate};
use tracing::error;

use crate::jobs::normalize::NormalizedJob;
use crate::jobs::sections::{SeeMoreLink, SliderSection, SliderSectionConfig, LISTING_PATH};
use crate::jobs::slider::SliderFetchOptions;
use crate::jobs_api::JobSource;

pub const EXPIRING_LIMIT: usize = 10;
pub const EXPIRING_SECTION_KEY: &str = "expiring-soon";
const EXPIRY_WINDOW_DAYS: u64 = 2;

/// First `EXPIRING_LIMIT` records that carry both a slug and a non-empty
/// `title`, normalized. Failures collapse to an empty list.
pub async fn fetch_expiring_jobs(source: &dyn JobSource) -> Vec<NormalizedJob> {
    let records = match source.expiring_soon(EXPIRING_LIMIT).await {
        Ok(records) => records,
        Err(e) => {
            error!("Failed to load expiring jobs slider: {e}");
            return Vec::new();
        }
    };

    records
        .iter()
        .take(EXPIRING_LIMIT)
        .filter(|job| job.title.as_deref().is_some_and(|t| !t.is_empty()))
        .filter_map(NormalizedJob::from_raw)
        .collect()
}

/// Listing search over expiry dates from two days ago through `today`.
pub fn expiring_see_more(today: NaiveDate) -> SeeMoreLink {
    let start = today
        .checked_sub_days(Days::new(EXPIRY_WINDOW_DAYS))
        .unwrap_or(today);
    SeeMoreLink::WithQuery {
        pathname: LISTING_PATH.to_string(),
        query: vec![
            ("expiry_start".to_string(), start.format("%Y-%m-%d").to_string()),
            ("expiry_end".to_string(), today.format("%Y-%m-%d").to_string()),
        ],
    }
}

pub fn expiring_section_config(today: NaiveDate) -> SliderSectionConfig {
    SliderSectionConfig::new(
        EXPIRING_SECTION_KEY,
        "Jobs expiring soon",
        SliderFetchOptions::with_limit(EXPIRING_LIMIT),
    )
    .described("Hand-picked opportunities that are closing in the next couple of days.")
    .see_more(expiring_see_more(today), "See all Expiring roles")
}

/// The expiring-soon section, or `None` when there is nothing to show.
pub async fn load_expiring_section(
    source: &dyn JobSource,
    today: NaiveDate,
) -> Option<SliderSection> {
    let jobs = fetch_expiring_jobs(source).await;
    if jobs.is_empty() {
        return None;
    }
    Some(SliderSection::from_config(&expiring_section_config(today), jobs))
}
