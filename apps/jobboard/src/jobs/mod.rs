// Job-listing pipeline: ingest raw API records, normalize them once at the
// boundary, and assemble slider sections for pages.
// All upstream calls go through jobs_api; no direct HTTP here.

pub mod detail;
pub mod expiring;
pub mod filter;
pub mod normalize;
pub mod raw;
pub mod sections;
pub mod slider;
