//! Job-specific tailoring of a profile.
//!
//! Nothing here mutates the source profile: every step reads from it and
//! builds fresh lists. Relevance scores only exist as locals while sorting.

use std::cmp::Reverse;
use std::ops::Deref;

use tracing::debug;

use crate::job::{JobCategory, JobRequest};
use crate::profile::{Profile, Project, SkillMap, WorkExperience};
use crate::scoring::Scorer;

/// A profile tailored to one job request. Same shape as [`Profile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomizedProfile(Profile);

impl CustomizedProfile {
    pub fn into_inner(self) -> Profile {
        self.0
    }
}

impl Deref for CustomizedProfile {
    type Target = Profile;

    fn deref(&self) -> &Profile {
        &self.0
    }
}

impl AsRef<Profile> for CustomizedProfile {
    fn as_ref(&self) -> &Profile {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Customizer {
    scorer: Scorer,
}

impl Customizer {
    pub fn new(scorer: Scorer) -> Self {
        Self { scorer }
    }

    pub fn customize(&self, profile: &Profile, job: &JobRequest) -> CustomizedProfile {
        let category = job.category();
        debug!(title = %job.title, ?category, keywords = job.keywords.len(), "customizing profile");

        CustomizedProfile(Profile {
            personal_info: profile.personal_info.clone(),
            summary: select_summary(profile, category),
            work_experience: substitute_responsibilities(&profile.work_experience, category),
            projects: self.rank_projects(&profile.projects, job),
            education: profile.education.clone(),
            skills: prioritize_skills(&profile.skills, category),
            courses: self.rank_courses(&profile.courses, job),
            languages: profile.languages.clone(),
            additional: profile.additional.clone(),
        })
    }

    /// Projects ordered by keyword score, highest first. Ties keep their order.
    pub fn rank_projects(&self, projects: &[Project], job: &JobRequest) -> Vec<Project> {
        let mut scored: Vec<(usize, &Project)> = projects
            .iter()
            .map(|project| (self.scorer.score(&project.relevance_text(), &job.keywords), project))
            .collect();
        // sort_by_key is stable
        scored.sort_by_key(|&(score, _)| Reverse(score));
        scored.into_iter().map(|(_, project)| project.clone()).collect()
    }

    /// Courses ordered by keyword score, highest first. Ties keep their order.
    pub fn rank_courses(&self, courses: &[String], job: &JobRequest) -> Vec<String> {
        let mut scored: Vec<(usize, &String)> = courses
            .iter()
            .map(|course| (self.scorer.score(course, &job.keywords), course))
            .collect();
        scored.sort_by_key(|&(score, _)| Reverse(score));
        scored.into_iter().map(|(_, course)| course.clone()).collect()
    }
}

/// Tailor `profile` to `job` using plain substring scoring.
pub fn customize(profile: &Profile, job: &JobRequest) -> CustomizedProfile {
    Customizer::default().customize(profile, job)
}

pub fn select_summary(profile: &Profile, category: JobCategory) -> String {
    category
        .tailoring()
        .summary
        .map(str::to_string)
        .unwrap_or_else(|| profile.summary.clone())
}

pub fn substitute_responsibilities(
    experiences: &[WorkExperience],
    category: JobCategory,
) -> Vec<WorkExperience> {
    let replacement = category.tailoring().responsibilities;
    experiences
        .iter()
        .map(|experience| WorkExperience {
            responsibilities: match replacement {
                Some(lines) => lines.iter().map(|line| line.to_string()).collect(),
                None => experience.responsibilities.clone(),
            },
            ..experience.clone()
        })
        .collect()
}

pub fn prioritize_skills(skills: &SkillMap, category: JobCategory) -> SkillMap {
    match category.tailoring().skill_priority {
        Some(priority) => skills.reordered(priority),
        None => skills.clone(),
    }
}
