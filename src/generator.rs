//! Load → customize → render pipeline for one or more job applications.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{info, warn};

use crate::customize::{CustomizedProfile, Customizer};
use crate::error::{Error, Result};
use crate::job::JobRequest;
use crate::profile::Profile;
use crate::render::DocumentRenderer;

/// Produces one tailored CV per job request into `output_dir`.
pub struct Generator<R> {
    profile: Profile,
    customizer: Customizer,
    renderer: R,
    output_dir: PathBuf,
}

impl<R: DocumentRenderer> Generator<R> {
    pub fn new(
        profile: Profile,
        customizer: Customizer,
        renderer: R,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            profile,
            customizer,
            renderer,
            output_dir: output_dir.into(),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn customize(&self, job: &JobRequest) -> CustomizedProfile {
        self.customizer.customize(&self.profile, job)
    }

    /// Render an already customized profile. Can be retried on failure
    /// without customizing again.
    pub fn render(
        &self,
        customized: &CustomizedProfile,
        title: &str,
        timestamp: NaiveDateTime,
    ) -> Result<PathBuf> {
        self.render_to(customized, &output_file_name(title, timestamp))
    }

    fn render_to(&self, customized: &CustomizedProfile, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(file_name);
        self.renderer.render(customized, &path)?;
        Ok(path)
    }

    pub fn generate(&self, job: &JobRequest) -> Result<PathBuf> {
        self.generate_at(job, chrono::Local::now().naive_local())
    }

    pub fn generate_at(&self, job: &JobRequest, timestamp: NaiveDateTime) -> Result<PathBuf> {
        self.generate_named(job, &output_file_name(&job.title, timestamp))
    }

    fn generate_named(&self, job: &JobRequest, file_name: &str) -> Result<PathBuf> {
        let customized = self.customize(job);
        let path = self.render_to(&customized, file_name)?;
        info!(title = %job.title, path = %path.display(), "generated CV");
        Ok(path)
    }

    /// Generate every job in order. Stops at the first failure.
    pub fn generate_all(&self, jobs: &[JobRequest]) -> Result<Vec<PathBuf>> {
        self.generate_all_at(jobs, chrono::Local::now().naive_local())
    }

    /// Like [`generate_all`](Self::generate_all) with a fixed timestamp. A title
    /// seen earlier in the batch gets its 1-based position appended to the file
    /// name, so every job ends up in its own file.
    pub fn generate_all_at(
        &self,
        jobs: &[JobRequest],
        timestamp: NaiveDateTime,
    ) -> Result<Vec<PathBuf>> {
        let mut taken = HashSet::new();
        let mut paths = Vec::with_capacity(jobs.len());
        for (index, job) in jobs.iter().enumerate() {
            let mut file_name = output_file_name(&job.title, timestamp);
            if !taken.insert(file_name.clone()) {
                file_name = numbered_file_name(&job.title, timestamp, index + 1);
                taken.insert(file_name.clone());
            }
            paths.push(self.generate_named(job, &file_name)?);
        }
        Ok(paths)
    }
}

/// `CV_{title}_{YYYYmmdd_HHMMSS}.pdf`, keeping only alphanumerics, spaces,
/// `-` and `_` from the title.
pub fn output_file_name(title: &str, timestamp: NaiveDateTime) -> String {
    format!("{}.pdf", file_stem(title, timestamp))
}

fn numbered_file_name(title: &str, timestamp: NaiveDateTime, position: usize) -> String {
    format!("{}_{}.pdf", file_stem(title, timestamp), position)
}

fn file_stem(title: &str, timestamp: NaiveDateTime) -> String {
    let safe_title: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    format!(
        "CV_{}_{}",
        safe_title.trim_end(),
        timestamp.format("%Y%m%d_%H%M%S")
    )
}

/// A batch of applications, read from a TOML file of `[[job]]` tables.
#[derive(Debug, Deserialize)]
pub struct JobFile {
    #[serde(rename = "job", default)]
    pub jobs: Vec<JobEntry>,
}

#[derive(Debug, Deserialize)]
pub struct JobEntry {
    pub title: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl JobFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let file: JobFile =
            toml::from_str(content).map_err(|e| Error::Config(format!("job file: {}", e)))?;
        if file.jobs.is_empty() {
            warn!("job file contains no [[job]] entries");
        }
        Ok(file)
    }

    pub fn requests(&self) -> Vec<JobRequest> {
        self.jobs
            .iter()
            .map(|job| JobRequest::new(job.title.clone(), &job.keywords))
            .collect()
    }
}
