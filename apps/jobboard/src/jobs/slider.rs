//! Slider fetch orchestrator: the one procedure every page-level slider
//! section goes through.
//!
//! Over-fetches a single listing page, re-checks location keywords on the
//! client, and normalizes. Any failure (transport, status, malformed JSON)
//! is logged and collapses to an empty list so the section simply does not
//! render.

use tracing::{debug, error};

use crate::jobs::filter::matches_location_keyword;
use crate::jobs::normalize::NormalizedJob;
use crate::jobs_api::{JobSource, ListQuery};

pub const DEFAULT_SLIDER_LIMIT: usize = 5;
const OVERFETCH_BUFFER: usize = 3;
const MIN_PER_PAGE: usize = 8;

/// Declarative description of what one slider section shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderFetchOptions {
    /// Number of cards ultimately shown; callers truncate to it.
    pub limit: usize,
    /// Server-side `locations` filter.
    pub locations: Option<String>,
    /// Server-side `experience` filter.
    pub experience: Option<String>,
    /// Client-side case-insensitive substring re-check on locations.
    pub required_location_keyword: Option<String>,
    /// Extra query parameters; pairs with an empty value are not sent.
    pub additional_query: Vec<(String, String)>,
}

impl Default for SliderFetchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SLIDER_LIMIT,
            locations: None,
            experience: None,
            required_location_keyword: None,
            additional_query: Vec::new(),
        }
    }
}

impl SliderFetchOptions {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Filters on `location` server-side and re-checks `keyword` client-side.
    pub fn in_location(mut self, location: &str, keyword: &str) -> Self {
        self.locations = Some(location.to_string());
        self.required_location_keyword = Some(keyword.to_string());
        self
    }

    pub fn with_experience(mut self, experience: &str) -> Self {
        self.experience = Some(experience.to_string());
        self
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.additional_query
            .push((key.to_string(), value.to_string()));
        self
    }
}

/// Page size requested upstream: leaves headroom for the keyword re-check
/// and for excluding the current job on detail pages.
pub fn per_page(limit: usize) -> usize {
    limit.saturating_add(OVERFETCH_BUFFER).max(MIN_PER_PAGE)
}

pub fn build_query(options: &SliderFetchOptions) -> ListQuery {
    let mut query = ListQuery::new();
    query
        .set("page", "1")
        .set("per_page", per_page(options.limit).to_string());

    if let Some(locations) = non_empty(&options.locations) {
        query.set("locations", locations);
    }
    if let Some(experience) = non_empty(&options.experience) {
        query.set("experience", experience);
    }
    for (key, value) in &options.additional_query {
        if !value.is_empty() {
            query.set(key.as_str(), value.as_str());
        }
    }

    query
}

/// Fetches, filters and normalizes jobs for one slider section.
///
/// The result is NOT truncated to `limit`: callers first drop the page's own
/// job (detail pages) and then truncate.
pub async fn fetch_jobs_for_slider(
    source: &dyn JobSource,
    options: &SliderFetchOptions,
) -> Vec<NormalizedJob> {
    let query = build_query(options);

    let records = match source.list_jobs(&query).await {
        Ok(records) => records,
        Err(e) => {
            error!("Failed to fetch jobs for slider: {e}");
            return Vec::new();
        }
    };

    let keyword = non_empty(&options.required_location_keyword);
    let jobs: Vec<NormalizedJob> = records
        .iter()
        .filter(|job| job.slug().is_some())
        .filter(|job| matches_location_keyword(job, keyword))
        .filter_map(NormalizedJob::from_raw)
        .collect();

    debug!(
        "Slider fetch kept {} of {} records (locations={:?}, experience={:?})",
        jobs.len(),
        records.len(),
        options.locations,
        options.experience
    );

    jobs
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::jobs_api::JobsApiClient;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use tracing_test::traced_test;

    fn client_for(server: &Server) -> JobsApiClient {
        JobsApiClient::new(&Config::for_upstream(&server.url())).unwrap()
    }

    /// 8 records: 4 in Karachi (case-varied, mixed shapes), 4 elsewhere.
    fn karachi_fixture() -> String {
        json!({
            "data": [
                {"id": 1, "slug": "khi-1", "title": "Accountant", "locations": ["Karachi, Sindh"]},
                {"id": 2, "slug": "lhr-1", "title": "Teacher", "locations": ["Lahore"]},
                {"id": 3, "slug": "khi-2", "title": "Driver", "locations": [{"name": "KARACHI"}]},
                {"id": 4, "slug": "isb-1", "title": "Analyst", "locations": [{"name": null, "text": "Islamabad"}]},
                {"id": 5, "slug": "khi-3", "job_title": "Nurse", "locations": ["Lahore", {"text": "karachi"}]},
                {"id": 6, "slug": "remote-1", "title": "Writer", "locations": []},
                {"id": 7, "slug": "khi-4", "title": "Chef", "locations": ["North Karachi"]},
                {"id": 8, "slug": "none-1", "title": "Guard"}
            ]
        })
        .to_string()
    }

    #[test]
    fn test_per_page_bounds() {
        for limit in [0, 1, 5, 6, 8, 20, 100] {
            let pp = per_page(limit);
            assert!(pp >= limit + 3, "limit {limit} gave {pp}");
            assert!(pp >= 8, "limit {limit} gave {pp}");
        }
        assert_eq!(per_page(5), 8);
        assert_eq!(per_page(8), 11);
        assert_eq!(per_page(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_build_query_defaults() {
        let query = build_query(&SliderFetchOptions::default());
        assert_eq!(
            query.pairs(),
            &[
                ("page".to_string(), "1".to_string()),
                ("per_page".to_string(), "8".to_string())
            ]
        );
    }

    #[test]
    fn test_build_query_filters_and_extras() {
        let options = SliderFetchOptions::with_limit(8)
            .in_location("Karachi", "karachi")
            .with_experience("Fresh Required")
            .with_query("sort", "latest")
            .with_query("category", "");
        let query = build_query(&options);
        assert_eq!(query.get("per_page"), Some("11"));
        assert_eq!(query.get("locations"), Some("Karachi"));
        assert_eq!(query.get("experience"), Some("Fresh Required"));
        assert_eq!(query.get("sort"), Some("latest"));
        assert_eq!(query.get("category"), None);
    }

    #[test]
    fn test_build_query_extra_overrides_earlier_key() {
        let options = SliderFetchOptions::default().with_query("page", "2");
        assert_eq!(build_query(&options).get("page"), Some("2"));
    }

    #[tokio::test]
    async fn test_karachi_keyword_filter_end_to_end() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/jobs")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("per_page".into(), "8".into()),
                Matcher::UrlEncoded("locations".into(), "Karachi".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(karachi_fixture())
            .create_async()
            .await;

        let client = client_for(&server);
        let options = SliderFetchOptions::with_limit(5).in_location("Karachi", "karachi");
        let jobs = fetch_jobs_for_slider(&client, &options).await;

        let slugs: Vec<_> = jobs.iter().map(|j| j.slug.as_str()).collect();
        assert_eq!(slugs, vec!["khi-1", "khi-2", "khi-3", "khi-4"]);
        assert_eq!(jobs[1].locations, vec!["KARACHI"]);
        assert_eq!(jobs[2].title, "Nurse");
        assert_eq!(jobs[2].locations, vec!["Lahore", "karachi"]);
    }

    #[tokio::test]
    async fn test_result_is_not_truncated_to_limit() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/jobs")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(karachi_fixture())
            .create_async()
            .await;

        let client = client_for(&server);
        let jobs = fetch_jobs_for_slider(&client, &SliderFetchOptions::with_limit(2)).await;
        assert_eq!(jobs.len(), 8);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_server_error_yields_empty() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/jobs")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("Internal Server Error")
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let jobs = fetch_jobs_for_slider(&client, &SliderFetchOptions::default()).await;
        assert!(jobs.is_empty());
        mock.assert_async().await;

        logs_assert(|lines: &[&str]| {
            let errors: Vec<_> = lines.iter().filter(|line| line.contains("ERROR")).collect();
            match errors.as_slice() {
                [line] if line.contains("Failed to fetch jobs for slider") => Ok(()),
                other => Err(format!("expected one slider fetch error, got {other:?}")),
            }
        });
    }

    #[tokio::test]
    async fn test_malformed_json_yields_empty() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/jobs")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{\"data\": [")
            .create_async()
            .await;

        let client = client_for(&server);
        assert!(fetch_jobs_for_slider(&client, &SliderFetchOptions::default())
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_upstream_yields_empty() {
        // Port 9 (discard) on localhost: nothing listens there in test environments.
        let client = JobsApiClient::new(&Config::for_upstream("http://127.0.0.1:9")).unwrap();
        assert!(fetch_jobs_for_slider(&client, &SliderFetchOptions::default())
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_missing_slug_dropped_even_when_matching() {
        let mut server = Server::new_async().await;
        let body = json!({
            "data": [
                {"id": 1, "title": "Orphan", "locations": ["Karachi"]},
                {"id": 2, "slug": "", "title": "Blank", "locations": ["Karachi"]},
                {"id": 3, "slug": "kept", "title": "Kept", "locations": ["Karachi"]}
            ]
        });
        let _mock = server
            .mock("GET", "/api/jobs")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let client = client_for(&server);
        let options = SliderFetchOptions::default().in_location("Karachi", "karachi");
        let jobs = fetch_jobs_for_slider(&client, &options).await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].slug, "kept");
    }

    #[tokio::test]
    async fn test_identical_calls_give_identical_output() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/jobs")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(karachi_fixture())
            .create_async()
            .await;

        let client = client_for(&server);
        let options = SliderFetchOptions::default().in_location("Karachi", "karachi");
        let first = fetch_jobs_for_slider(&client, &options).await;
        let second = fetch_jobs_for_slider(&client, &options).await;
        assert_eq!(first, second);
    }
}
