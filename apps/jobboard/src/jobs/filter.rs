use crate::jobs::normalize::normalize_label;
use crate::jobs::raw::RawJobRecord;

/// Client-side location check layered on top of the API's `locations`
/// parameter, whose matching cannot be relied on.
///
/// No keyword admits everything. A job without a location list never
/// matches. Otherwise any normalized location containing the keyword
/// (case-insensitive substring) is a match, so "karachi" matches
/// "Karachi, Sindh".
pub fn matches_location_keyword(job: &RawJobRecord, keyword: Option<&str>) -> bool {
    let Some(keyword) = keyword.filter(|k| !k.is_empty()) else {
        return true;
    };
    let Some(locations) = job.locations.as_deref() else {
        return false;
    };

    let keyword = keyword.to_lowercase();
    locations
        .iter()
        .any(|location| normalize_label(location).to_lowercase().contains(&keyword))
}
