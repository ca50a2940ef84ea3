use askama::Template;

use crate::jobs::detail::JobDetail;
use crate::jobs::sections::SliderSection;

pub const SITE_NAME: &str = "HR Posting Partner";

/// Head metadata shared by every page. An empty `canonical` is omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
}

impl PageMeta {
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            canonical: String::new(),
        }
    }

    pub fn with_canonical(mut self, canonical: String) -> Self {
        self.canonical = canonical;
        self
    }

    pub fn home(site_url: &str) -> Self {
        Self::new(
            "HR Posting Partner | Job Portal Pakistan",
            "HR Posting Partner helps job seekers in Pakistan find the latest jobs and recruiters hire the best talent along with advertising opportunity for businesses and companies. Post jobs free and search hundreds of listings today.",
        )
        .with_canonical(site_url.trim_end_matches('/').to_string())
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub meta: PageMeta,
    pub expiring: Option<SliderSection>,
    pub sections: Vec<SliderSection>,
}

#[derive(Template)]
#[template(path = "landing.html")]
pub struct LandingView {
    pub meta: PageMeta,
    pub heading: String,
    pub intro: String,
    pub sections: Vec<SliderSection>,
}

#[derive(Template)]
#[template(path = "job_detail.html")]
pub struct JobDetailPage {
    pub meta: PageMeta,
    pub job: JobDetail,
    pub schema_json: String,
    pub sections: Vec<SliderSection>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub meta: PageMeta,
    pub heading: String,
    pub message: String,
}

impl ErrorPage {
    pub fn new(heading: &str, message: &str) -> Self {
        Self {
            meta: PageMeta::new(&format!("{heading} | {SITE_NAME}"), message),
            heading: heading.to_string(),
            message: message.to_string(),
        }
    }
}
