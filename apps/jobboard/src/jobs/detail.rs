//! Job detail view: everything the `/classified-jobs/{slug}` page shows
//! about a single posting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::json;

use crate::jobs::normalize::{first_non_empty, normalize_labels};
use crate::jobs::raw::{RawImage, RawJobRecord};

const NOT_AVAILABLE: &str = "N/A";
const UNTITLED: &str = "Job posting";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Active,
    Expired,
}

impl JobStatus {
    /// Active while the expiry instant has not passed. A missing or
    /// unparseable expiry date counts as expired.
    pub fn from_expiry(expiry_date: Option<&str>, now: DateTime<Utc>) -> Self {
        match expiry_date.and_then(parse_expiry) {
            Some(expiry) if expiry >= now => JobStatus::Active,
            _ => JobStatus::Expired,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Active => "Active",
            JobStatus::Expired => "Expired",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Active)
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD`
/// (midnight UTC). Naive timestamps are read as UTC.
pub fn parse_expiry(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Absolute and protocol-relative URLs pass through; anything else is a
/// storage path joined onto `storage_base`.
pub fn resolve_image_url(path: &str, storage_base: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    let lower = path.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || path.starts_with("//") {
        return Some(path.to_string());
    }
    Some(format!(
        "{}/{}",
        storage_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobDetail {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub short_description: Option<String>,
    /// Upstream HTML, rendered unescaped.
    pub description_html: String,
    pub locations: Vec<String>,
    pub roles: Vec<String>,
    pub experiences: Vec<String>,
    pub companies: Vec<String>,
    pub posted_at: Option<String>,
    pub expiry_date: Option<String>,
    pub status: JobStatus,
    pub image_urls: Vec<String>,
}

impl JobDetail {
    /// `slug` is the one from the request path; it backs `id` and `slug`
    /// when the record omits them.
    pub fn from_raw(slug: &str, raw: &RawJobRecord, storage_base: &str, now: DateTime<Utc>) -> Self {
        let slug = raw.slug().unwrap_or(slug).to_string();
        let title = first_non_empty([raw.job_title.as_deref(), raw.title.as_deref()])
            .unwrap_or(UNTITLED)
            .to_string();

        JobDetail {
            id: raw.id.clone().unwrap_or_else(|| slug.clone()),
            slug,
            title,
            short_description: raw.short_description.clone().filter(|s| !s.is_empty()),
            description_html: raw.description.clone().unwrap_or_default(),
            locations: normalize_labels(raw.locations.as_deref()),
            roles: normalize_labels(raw.roles.as_deref()),
            experiences: normalize_labels(raw.experiences.as_deref()),
            companies: normalize_labels(raw.companies.as_deref()),
            posted_at: raw.posted_at.clone(),
            expiry_date: raw.expiry_date.clone(),
            status: JobStatus::from_expiry(raw.expiry_date.as_deref(), now),
            image_urls: collect_image_urls(raw, storage_base),
        }
    }

    pub fn locations_display(&self) -> String {
        joined_or_na(&self.locations)
    }

    pub fn roles_display(&self) -> String {
        joined_or_na(&self.roles)
    }

    pub fn experiences_display(&self) -> String {
        joined_or_na(&self.experiences)
    }

    pub fn companies_display(&self) -> String {
        self.companies.join(", ")
    }

    pub fn meta_description(&self) -> String {
        self.short_description.clone().unwrap_or_default()
    }

    /// schema.org `JobPosting` JSON-LD, safe to embed in a `<script>` tag.
    pub fn schema_json(&self, site_url: &str) -> String {
        let site_url = site_url.trim_end_matches('/');
        let description = first_non_empty([
            self.short_description.as_deref(),
            Some(self.description_html.as_str()),
        ])
        .unwrap_or_default();

        let schema = json!({
            "@context": "https://schema.org",
            "@type": "JobPosting",
            "title": self.title,
            "description": description,
            "datePosted": self.posted_at,
            "validThrough": self.expiry_date.clone().unwrap_or_default(),
            "employmentType": "Full-time",
            "hiringOrganization": {
                "@type": "Organization",
                "name": "Confidential Employer"
            },
            "publisher": {
                "@type": "Organization",
                "name": "HR Posting Partner",
                "sameAs": site_url,
                "logo": format!("{site_url}/logo.png")
            },
            "jobLocation": {
                "@type": "Place",
                "address": {
                    "@type": "PostalAddress",
                    "addressLocality": self.locations_display(),
                    "addressCountry": "PK"
                }
            }
        });

        schema.to_string().replace("</", "<\\/")
    }
}

fn joined_or_na(values: &[String]) -> String {
    if values.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        values.join(", ")
    }
}

/// `image_path` first, then `images`, resolved and de-duplicated in order.
fn collect_image_urls(raw: &RawJobRecord, storage_base: &str) -> Vec<String> {
    let from_images = raw
        .images
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|image| match image {
            RawImage::Path(path) => Some(path.as_str()),
            RawImage::Object { image_path } => image_path.as_deref(),
            RawImage::Other(_) => None,
        });

    let mut urls: Vec<String> = Vec::new();
    for path in raw.image_path.as_deref().into_iter().chain(from_images) {
        if let Some(url) = resolve_image_url(path, storage_base) {
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
    }
    urls
}
