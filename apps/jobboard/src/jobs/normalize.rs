//! Collapses raw, shape-variable job records into the flat
//! `NormalizedJob` consumed by slider sections.

use serde::Serialize;

use crate::jobs::raw::{RawJobRecord, RawLabel};
use crate::jobs::sections::job_detail_path;

pub const FALLBACK_TITLE: &str = "View job";

/// Canonical job card. Lists hold non-empty strings in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedJob {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub roles: Vec<String>,
    pub experiences: Vec<String>,
    pub locations: Vec<String>,
    pub companies: Vec<String>,
    pub posted_at: Option<String>,
    pub expiry_date: Option<String>,
}

/// Reduces one list element to a string: bare strings pass through,
/// objects yield `name`, then `text`, then `""`. Anything else is `""`.
pub fn normalize_label(label: &RawLabel) -> &str {
    match label {
        RawLabel::Text(s) => s.as_str(),
        RawLabel::Named { name, text } => first_non_empty([name.as_deref(), text.as_deref()])
            .unwrap_or_default(),
        RawLabel::Other(_) => "",
    }
}

/// Normalizes every element and drops the empty results.
/// A missing list normalizes to an empty one.
pub fn normalize_labels(labels: Option<&[RawLabel]>) -> Vec<String> {
    labels
        .unwrap_or_default()
        .iter()
        .map(normalize_label)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

pub(crate) fn first_non_empty<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates.into_iter().flatten().find(|s| !s.is_empty())
}

impl NormalizedJob {
    /// `None` when the record has no usable slug; such records never reach a slider.
    pub fn from_raw(raw: &RawJobRecord) -> Option<Self> {
        let slug = raw.slug()?.to_string();
        let title = first_non_empty([raw.title.as_deref(), raw.job_title.as_deref()])
            .unwrap_or(FALLBACK_TITLE)
            .to_string();

        Some(NormalizedJob {
            id: raw.id.clone().unwrap_or_else(|| slug.clone()),
            slug,
            title,
            roles: normalize_labels(raw.roles.as_deref()),
            experiences: normalize_labels(raw.experiences.as_deref()),
            locations: normalize_labels(raw.locations.as_deref()),
            companies: normalize_labels(raw.companies.as_deref()),
            posted_at: raw.posted_at.clone(),
            expiry_date: raw.expiry_date.clone(),
        })
    }

    /// Link to this job's detail page, percent-encoded and safe to emit unescaped.
    pub fn detail_href(&self) -> String {
        job_detail_path(&self.slug)
    }
}
