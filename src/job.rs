use std::collections::BTreeSet;

/// A single tailoring request: the job title and the keywords from its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub title: String,
    pub keywords: BTreeSet<String>,
}

impl JobRequest {
    /// Keywords are trimmed and lower-cased; blank ones are dropped.
    pub fn new<I, K>(title: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self {
            title: title.into(),
            keywords,
        }
    }

    pub fn category(&self) -> JobCategory {
        JobCategory::from_title(&self.title)
    }
}

/// Job families with their own summary, responsibilities and skill order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCategory {
    DataAnalyst,
    Developer,
    BusinessAnalyst,
    /// Anything unrecognised: the profile's own content is kept.
    Generic,
}

/// Fixed content for a job category. `None` keeps what the profile has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tailoring {
    pub summary: Option<&'static str>,
    pub responsibilities: Option<&'static [&'static str]>,
    pub skill_priority: Option<&'static [&'static str]>,
}

const TITLES: &[(&str, JobCategory)] = &[
    ("data analyst", JobCategory::DataAnalyst),
    ("data scientist", JobCategory::DataAnalyst),
    ("analytics", JobCategory::DataAnalyst),
    ("python developer", JobCategory::Developer),
    ("software developer", JobCategory::Developer),
    ("backend developer", JobCategory::Developer),
    ("business analyst", JobCategory::BusinessAnalyst),
    ("business intelligence", JobCategory::BusinessAnalyst),
];

const DATA_ANALYST: Tailoring = Tailoring {
    summary: Some(
        "Data Analyst with strong expertise in Python, SQL, and Power BI, passionate about \
         transforming data into actionable insights. Experienced in automating data workflows \
         and delivering business-focused analytics solutions.",
    ),
    responsibilities: Some(&[
        "Automated data flows by integrating CRM systems with reporting tools via APIs, reducing manual processing time by 70%",
        "Developed end-to-end data pipelines from extraction to visualization using Python, SQL, and Power BI",
        "Collaborated with stakeholders to define KPIs and delivered actionable business insights through custom dashboards",
        "Performed data analysis and visualization to support strategic decision-making processes",
    ]),
    skill_priority: Some(&[
        "Data Analysis",
        "Programming",
        "Databases",
        "Visualization",
        "Tools",
        "Other",
    ]),
};

const DEVELOPER: Tailoring = Tailoring {
    summary: Some(
        "Python Developer with experience in Django, APIs, and data processing. Skilled in \
         building scalable applications and automating complex workflows using modern Python \
         frameworks.",
    ),
    responsibilities: Some(&[
        "Developed Python applications for data processing and automation using Django and APIs",
        "Implemented web scraping solutions and data extraction tools using BeautifulSoup and Pandas",
        "Built and maintained automated workflows integrating multiple systems and databases",
        "Collaborated with technical teams to deliver scalable software solutions",
    ]),
    skill_priority: Some(&[
        "Programming",
        "Databases",
        "Tools",
        "Data Analysis",
        "Visualization",
        "Other",
    ]),
};

const BUSINESS_ANALYST: Tailoring = Tailoring {
    summary: Some(
        "Business Analyst with strong technical background in data analysis, process \
         automation, and stakeholder collaboration. Experienced in translating business \
         requirements into technical solutions.",
    ),
    responsibilities: None,
    skill_priority: None,
};

const GENERIC: Tailoring = Tailoring {
    summary: None,
    responsibilities: None,
    skill_priority: None,
};

impl JobCategory {
    /// Case-insensitive exact match on the trimmed title; never fails.
    pub fn from_title(title: &str) -> Self {
        let title = title.trim().to_lowercase();
        TITLES
            .iter()
            .find(|(name, _)| *name == title)
            .map(|&(_, category)| category)
            .unwrap_or(JobCategory::Generic)
    }

    pub fn tailoring(self) -> &'static Tailoring {
        match self {
            JobCategory::DataAnalyst => &DATA_ANALYST,
            JobCategory::Developer => &DEVELOPER,
            JobCategory::BusinessAnalyst => &BUSINESS_ANALYST,
            JobCategory::Generic => &GENERIC,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_normalized() {
        let job = JobRequest::new("Data Analyst", ["  Python ", "python", "SQL", " "]);
        assert_eq!(
            job.keywords.iter().map(String::as_str).collect::<Vec<_>>(),
            ["python", "sql"]
        );
    }

    #[test]
    fn titles_map_to_categories() {
        assert_eq!(JobCategory::from_title("Data Analyst"), JobCategory::DataAnalyst);
        assert_eq!(JobCategory::from_title("ANALYTICS"), JobCategory::DataAnalyst);
        assert_eq!(JobCategory::from_title(" Backend Developer "), JobCategory::Developer);
        assert_eq!(
            JobCategory::from_title("business intelligence"),
            JobCategory::BusinessAnalyst
        );
    }

    #[test]
    fn unknown_titles_are_generic() {
        assert_eq!(JobCategory::from_title("Astronaut"), JobCategory::Generic);
        assert_eq!(JobCategory::from_title(""), JobCategory::Generic);
        // Exact title match only
        assert_eq!(JobCategory::from_title("Senior Data Analyst"), JobCategory::Generic);
    }

    #[test]
    fn generic_keeps_everything() {
        let tailoring = JobCategory::Generic.tailoring();
        assert!(tailoring.summary.is_none());
        assert!(tailoring.responsibilities.is_none());
        assert!(tailoring.skill_priority.is_none());
    }

    #[test]
    fn business_analyst_only_rewrites_summary() {
        let tailoring = JobCategory::BusinessAnalyst.tailoring();
        assert!(tailoring.summary.is_some());
        assert!(tailoring.responsibilities.is_none());
        assert!(tailoring.skill_priority.is_none());
    }
}
