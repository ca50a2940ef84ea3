//! Slider sections: the declarative table of carousels shown across the
//! site, and the page-level composition that turns a list of section
//! configurations into rendered-ready sections.

use futures::future::join_all;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use url::form_urlencoded;

use crate::jobs::normalize::NormalizedJob;
use crate::jobs::slider::{fetch_jobs_for_slider, SliderFetchOptions, DEFAULT_SLIDER_LIMIT};
use crate::jobs_api::JobSource;

pub const DEFAULT_SEE_MORE_LABEL: &str = "See more jobs";
pub const LISTING_PATH: &str = "/classified-jobs";
pub const FRESHERS_EXPERIENCE: &str = "Fresh Required";

/// Everything except RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// `/classified-jobs/<slug>` with the slug encoded as a single path segment.
pub fn job_detail_path(slug: &str) -> String {
    format!("{LISTING_PATH}/{}", utf8_percent_encode(slug, PATH_SEGMENT))
}

/// Target of a section's "see more" button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeeMoreLink {
    /// A ready-made href, internal path or absolute URL.
    Href(String),
    /// An internal path plus query parameters.
    WithQuery {
        pathname: String,
        query: Vec<(String, String)>,
    },
}

impl SeeMoreLink {
    pub fn href(href: &str) -> Self {
        SeeMoreLink::Href(href.to_string())
    }

    /// `/classified-jobs?<key>=<value>`
    pub fn listing(key: &str, value: &str) -> Self {
        SeeMoreLink::WithQuery {
            pathname: LISTING_PATH.to_string(),
            query: vec![(key.to_string(), value.to_string())],
        }
    }

    pub fn to_href(&self) -> String {
        match self {
            SeeMoreLink::Href(href) => href.clone(),
            SeeMoreLink::WithQuery { pathname, query } if query.is_empty() => pathname.clone(),
            SeeMoreLink::WithQuery { pathname, query } => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(query)
                    .finish();
                format!("{pathname}?{encoded}")
            }
        }
    }

    /// Absolute or protocol-relative URLs open in a new tab.
    pub fn is_external(&self) -> bool {
        match self {
            SeeMoreLink::Href(href) => is_external_href(href),
            SeeMoreLink::WithQuery { .. } => false,
        }
    }
}

/// Matches `^(https?:)?//`, case-insensitively.
pub fn is_external_href(href: &str) -> bool {
    let lower = href.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https:")
        .or_else(|| lower.strip_prefix("http:"))
        .unwrap_or(&lower);
    rest.starts_with("//")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderSectionConfig {
    pub key: String,
    pub title: String,
    pub description: Option<String>,
    pub fetch: SliderFetchOptions,
    pub see_more: Option<SeeMoreLink>,
    pub see_more_label: Option<String>,
}

impl SliderSectionConfig {
    pub fn new(key: &str, title: &str, fetch: SliderFetchOptions) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            description: None,
            fetch,
            see_more: None,
            see_more_label: None,
        }
    }

    pub fn described(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn see_more(mut self, link: SeeMoreLink, label: &str) -> Self {
        self.see_more = Some(link);
        self.see_more_label = Some(label.to_string());
        self
    }
}

/// A section with its jobs loaded, ready for the slider partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderSection {
    pub key: String,
    pub title: String,
    pub description: Option<String>,
    pub see_more_href: Option<String>,
    pub see_more_external: bool,
    pub see_more_label: String,
    pub jobs: Vec<NormalizedJob>,
}

impl SliderSection {
    pub fn from_config(config: &SliderSectionConfig, jobs: Vec<NormalizedJob>) -> Self {
        Self {
            key: config.key.clone(),
            title: config.title.clone(),
            description: config.description.clone(),
            see_more_href: config.see_more.as_ref().map(SeeMoreLink::to_href),
            see_more_external: config
                .see_more
                .as_ref()
                .is_some_and(SeeMoreLink::is_external),
            see_more_label: config
                .see_more_label
                .clone()
                .unwrap_or_else(|| DEFAULT_SEE_MORE_LABEL.to_string()),
            jobs,
        }
    }
}

/// Runs every section's fetch concurrently, drops `exclude_slug` (the job a
/// detail page is showing), truncates to each section's limit and omits
/// sections left empty. Output order follows `configs`.
pub async fn load_sections(
    source: &dyn JobSource,
    configs: &[SliderSectionConfig],
    exclude_slug: Option<&str>,
) -> Vec<SliderSection> {
    let fetched = join_all(
        configs
            .iter()
            .map(|config| fetch_jobs_for_slider(source, &config.fetch)),
    )
    .await;

    configs
        .iter()
        .zip(fetched)
        .filter_map(|(config, jobs)| {
            let jobs: Vec<NormalizedJob> = jobs
                .into_iter()
                .filter(|job| Some(job.slug.as_str()) != exclude_slug)
                .take(config.fetch.limit)
                .collect();
            (!jobs.is_empty()).then(|| SliderSection::from_config(config, jobs))
        })
        .collect()
}

/// The city-and-audience carousels shown on the home page.
pub fn default_slider_sections() -> Vec<SliderSectionConfig> {
    vec![
        SliderSectionConfig::new(
            "latest-pakistan",
            "Latest jobs in Pakistan",
            SliderFetchOptions::with_limit(5),
        )
        .described("Fresh openings curated from every province.")
        .see_more(SeeMoreLink::href(LISTING_PATH), "See all roles"),
        city_section(
            "latest-karachi",
            "Karachi",
            "Hot roles hiring right now in Karachi.",
        ),
        city_section(
            "latest-lahore",
            "Lahore",
            "Opportunities across Lahore's top companies.",
        ),
        city_section(
            "latest-islamabad",
            "Islamabad",
            "Government and private roles in the capital.",
        ),
        city_section(
            "latest-rawalpindi",
            "Rawalpindi",
            "Fresh listings from the Pindi region.",
        ),
        city_section(
            "latest-faisalabad",
            "Faisalabad",
            "Manufacturing and tech roles in Faisalabad.",
        ),
        SliderSectionConfig::new(
            "latest-remote",
            "Latest Remote Jobs for Pakistan",
            SliderFetchOptions::with_limit(5).in_location("Remote", "remote"),
        )
        .described("Work-from-home roles curated for Pakistani talent.")
        .see_more(
            SeeMoreLink::href("/remote-jobs-for-pakistan"),
            "See all remote roles",
        ),
        SliderSectionConfig::new(
            "latest-freshers",
            "Latest Fresher's Jobs/Internships",
            SliderFetchOptions::with_limit(5).with_experience(FRESHERS_EXPERIENCE),
        )
        .described("Entry-level openings and internships across Pakistan.")
        .see_more(
            SeeMoreLink::href("/jobs-internships-for-non-experienced"),
            "See all Fresher roles",
        ),
    ]
}

/// Related carousels under a job detail page. Same table as the home page,
/// except the remote and fresher sections link straight into the listing
/// search on `site_url`.
pub fn detail_slider_sections(site_url: &str) -> Vec<SliderSectionConfig> {
    let site_url = site_url.trim_end_matches('/');
    default_slider_sections()
        .into_iter()
        .map(|section| match section.key.as_str() {
            "latest-remote" => section
                .described("Work-from-home and remote-friendly roles.")
                .see_more(
                    SeeMoreLink::Href(format!(
                        "{site_url}{LISTING_PATH}?start=&end=&locations=Remote&experience="
                    )),
                    "See all remote roles",
                ),
            "latest-freshers" => section
                .described("No-experience positions for students and grads.")
                .see_more(
                    SeeMoreLink::Href(format!(
                        "{site_url}{LISTING_PATH}?start=&end=&locations=&experience=Fresh+Required"
                    )),
                    "See all Fresher roles",
                ),
            _ => section,
        })
        .collect()
}

/// Section for one city: server-side filter on the city name, client-side
/// re-check on its lowercase form, "see more" into the listing search.
pub fn city_section(key: &str, city: &str, description: &str) -> SliderSectionConfig {
    city_section_with_limit(key, city, description, DEFAULT_SLIDER_LIMIT)
}

pub fn city_section_with_limit(
    key: &str,
    city: &str,
    description: &str,
    limit: usize,
) -> SliderSectionConfig {
    SliderSectionConfig::new(
        key,
        &format!("Latest jobs in {city}"),
        SliderFetchOptions::with_limit(limit).in_location(city, &city.to_lowercase()),
    )
    .described(description)
    .see_more(
        SeeMoreLink::listing("locations", city),
        &format!("See all {city} roles"),
    )
}
