//! Location and audience landing pages. Each page is configuration only:
//! metadata plus the slider sections it shows.

use crate::jobs::sections::{
    city_section_with_limit, SeeMoreLink, SliderSectionConfig, FRESHERS_EXPERIENCE, LISTING_PATH,
};
use crate::jobs::slider::SliderFetchOptions;
use crate::pages::views::PageMeta;

/// Landing pages show more cards than the home page carousels.
const LANDING_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    Pakistan,
    Karachi,
    Lahore,
    Faisalabad,
    IslamabadRawalpindi,
    Remote,
    Freshers,
}

#[derive(Debug, Clone)]
pub struct LandingPage {
    pub meta: PageMeta,
    pub heading: String,
    pub intro: String,
    pub sections: Vec<SliderSectionConfig>,
}

impl Landing {
    pub const ALL: [Landing; 7] = [
        Landing::Pakistan,
        Landing::Karachi,
        Landing::Lahore,
        Landing::Faisalabad,
        Landing::IslamabadRawalpindi,
        Landing::Remote,
        Landing::Freshers,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Landing::Pakistan => "/jobs-in-pakistan",
            Landing::Karachi => "/jobs-in-karachi",
            Landing::Lahore => "/jobs-in-lahore",
            Landing::Faisalabad => "/jobs-in-faisalabad",
            Landing::IslamabadRawalpindi => "/jobs-in-islamabad-rawalpindi",
            Landing::Remote => "/remote-jobs-for-pakistan",
            Landing::Freshers => "/jobs-internships-for-non-experienced",
        }
    }

    pub fn page(self, site_url: &str) -> LandingPage {
        let canonical = format!("{}{}", site_url.trim_end_matches('/'), self.path());

        match self {
            Landing::Pakistan => LandingPage {
                meta: PageMeta::new(
                    "Jobs in Pakistan – Latest Government & Private Vacancies | HR Posting Partner",
                    "HR Posting Partner updates daily jobs in Pakistan across government and private sectors, including remote, part-time, full-time, and freelance roles. Explore opportunities in Karachi, Lahore, Islamabad, Rawalpindi, Faisalabad, and other major cities.",
                )
                .with_canonical(canonical),
                heading: "Jobs in Pakistan".to_string(),
                intro: "Daily updated jobs in Pakistan: government, private, remote, part-time, and full-time roles across major cities.".to_string(),
                sections: vec![SliderSectionConfig::new(
                    "pakistan",
                    "Latest Jobs in Pakistan",
                    SliderFetchOptions::with_limit(LANDING_LIMIT),
                )
                .described("Fresh openings curated from every province.")
                .see_more(SeeMoreLink::href(LISTING_PATH), "See all roles")],
            },
            Landing::Karachi => city_page(
                canonical,
                "Karachi",
                vec![city_section_with_limit(
                    "karachi",
                    "Karachi",
                    "Hot roles hiring right now in Karachi.",
                    LANDING_LIMIT,
                )],
            ),
            Landing::Lahore => city_page(
                canonical,
                "Lahore",
                vec![city_section_with_limit(
                    "lahore",
                    "Lahore",
                    "Opportunities across Lahore's top companies.",
                    LANDING_LIMIT,
                )],
            ),
            Landing::Faisalabad => city_page(
                canonical,
                "Faisalabad",
                vec![city_section_with_limit(
                    "faisalabad",
                    "Faisalabad",
                    "Manufacturing and tech roles in Faisalabad.",
                    LANDING_LIMIT,
                )],
            ),
            Landing::IslamabadRawalpindi => city_page(
                canonical,
                "Islamabad and Rawalpindi",
                vec![
                    city_section_with_limit(
                        "islamabad",
                        "Islamabad",
                        "Government and private roles in the capital.",
                        LANDING_LIMIT,
                    ),
                    city_section_with_limit(
                        "rawalpindi",
                        "Rawalpindi",
                        "Fresh listings from the Pindi region.",
                        LANDING_LIMIT,
                    ),
                ],
            ),
            Landing::Remote => LandingPage {
                meta: PageMeta::new(
                    "Remote Jobs for Pakistan – Work-from-Home Opportunities | HR Posting Partner",
                    "Discover daily updated remote and work-from-home jobs tailored for Pakistan. Filter by category, experience, and posting date.",
                )
                .with_canonical(canonical),
                heading: "Remote Jobs for Pakistan".to_string(),
                intro: "Work-from-home roles from local and international employers hiring Pakistani talent.".to_string(),
                sections: vec![SliderSectionConfig::new(
                    "remote",
                    "Latest Remote Jobs for Pakistan",
                    SliderFetchOptions::with_limit(LANDING_LIMIT).in_location("Remote", "remote"),
                )
                .described("Curated work-from-home roles hiring remote talent right now.")
                .see_more(
                    SeeMoreLink::listing("locations", "Remote"),
                    "Browse all remote jobs",
                )],
            },
            Landing::Freshers => LandingPage {
                meta: PageMeta::new(
                    "Jobs & Internships for Non-Experienced Talent in Pakistan | HR Posting Partner",
                    "Fresh graduate or entry-level in Pakistan? Find jobs and internships for non-experienced candidates across marketing, IT, admin, content, technical roles, and more.",
                )
                .with_canonical(canonical),
                heading: "Jobs & Internships for Non-Experienced Talent".to_string(),
                intro: "Find freshers jobs and internships in Pakistan across marketing, IT, admin, content and technical roles.".to_string(),
                sections: vec![SliderSectionConfig::new(
                    "freshers",
                    "Latest Fresher's Jobs/Internships",
                    SliderFetchOptions::with_limit(LANDING_LIMIT).with_experience(FRESHERS_EXPERIENCE),
                )
                .described("Entry-level openings for fresh graduates and students.")
                .see_more(
                    SeeMoreLink::listing("experience", FRESHERS_EXPERIENCE),
                    "Browse all fresher roles",
                )],
            },
        }
    }
}

fn city_page(canonical: String, place: &str, sections: Vec<SliderSectionConfig>) -> LandingPage {
    LandingPage {
        meta: PageMeta::new(
            &format!("Jobs in {place} – Latest Government & Private Vacancies | HR Posting Partner"),
            &format!(
                "Searching for the latest jobs in {place}? HR Posting Partner posts daily updates from government organizations, private companies, and freelance opportunities across IT, banking, education, healthcare, engineering, sales, and more."
            ),
        )
        .with_canonical(canonical),
        heading: format!("Jobs in {place}"),
        intro: format!(
            "Daily job updates in {place}: government, private, remote, part-time, and full-time roles across top industries."
        ),
        sections,
    }
}
