use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Utc;

use crate::errors::AppError;
use crate::jobs::detail::JobDetail;
use crate::jobs::expiring::{
    expiring_section_config, fetch_expiring_jobs, load_expiring_section, EXPIRING_SECTION_KEY,
};
use crate::jobs::sections::{
    default_slider_sections, detail_slider_sections, job_detail_path, load_sections,
    SliderSection,
};
use crate::jobs::slider::fetch_jobs_for_slider;
use crate::pages::landing::Landing;
use crate::pages::views::{
    ErrorPage, HomePage, JobDetailPage, LandingView, PageMeta, SITE_NAME,
};
use crate::state::AppState;

/// GET /
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let source = state.jobs.as_ref();
    let configs = default_slider_sections();
    let today = Utc::now().date_naive();

    let (expiring, sections) = tokio::join!(
        load_expiring_section(source, today),
        load_sections(source, &configs, None),
    );

    let page = HomePage {
        meta: PageMeta::home(&state.config.site_url),
        expiring,
        sections,
    };
    Ok(Html(page.render()?))
}

/// GET /jobs-in-karachi and the other landing routes
pub async fn landing_page(state: AppState, landing: Landing) -> Result<Html<String>, AppError> {
    let page = landing.page(&state.config.site_url);
    let sections = load_sections(state.jobs.as_ref(), &page.sections, None).await;

    let view = LandingView {
        meta: page.meta,
        heading: page.heading,
        intro: page.intro,
        sections,
    };
    Ok(Html(view.render()?))
}

/// GET /classified-jobs/:slug
pub async fn job_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    let source = state.jobs.as_ref();
    let configs = detail_slider_sections(&state.config.site_url);

    let (record, sections) = tokio::join!(
        source.job_by_slug(&slug),
        load_sections(source, &configs, Some(slug.as_str())),
    );
    let record = record?.ok_or_else(|| AppError::NotFound(format!("job {slug}")))?;

    let job = JobDetail::from_raw(&slug, &record, &state.config.storage_base_url, Utc::now());
    let canonical = format!(
        "{}{}",
        state.config.site_url.trim_end_matches('/'),
        job_detail_path(&job.slug)
    );
    let meta = PageMeta::new(&format!("{} | {SITE_NAME}", job.title), &job.meta_description())
        .with_canonical(canonical);

    let page = JobDetailPage {
        meta,
        schema_json: job.schema_json(&state.config.site_url),
        job,
        sections,
    };
    Ok(Html(page.render()?))
}

/// GET /api/sliders/:key
/// One home page section as JSON. Unknown keys are 404; a known key with no
/// jobs returns the section with an empty `jobs` list.
pub async fn slider_json(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<SliderSection>, AppError> {
    let source = state.jobs.as_ref();

    if key == EXPIRING_SECTION_KEY {
        let config = expiring_section_config(Utc::now().date_naive());
        let jobs = fetch_expiring_jobs(source).await;
        return Ok(Json(SliderSection::from_config(&config, jobs)));
    }

    let config = default_slider_sections()
        .into_iter()
        .find(|config| config.key == key)
        .ok_or_else(|| AppError::NotFound(format!("slider {key}")))?;

    let mut jobs = fetch_jobs_for_slider(source, &config.fetch).await;
    jobs.truncate(config.fetch.limit);
    Ok(Json(SliderSection::from_config(&config, jobs)))
}

/// Fallback for unmatched routes.
pub async fn not_found() -> (StatusCode, Html<String>) {
    let page = ErrorPage::new(
        "Page Not Found",
        "The page you are looking for does not exist or has been removed.",
    );
    let body = page.render().unwrap_or_else(|e| {
        tracing::error!("Failed to render not-found page: {e}");
        "Page not found".to_string()
    });
    (StatusCode::NOT_FOUND, Html(body))
}
