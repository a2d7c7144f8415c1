mod block;
mod config;
mod customize;
mod document;
mod error;
mod generator;
mod job;
mod profile;
mod render;
mod scoring;
mod store;
mod typst;

pub use block::{Block, List, ListItem, Span};
pub use config::Config;
pub use customize::{CustomizedProfile, Customizer, customize};
pub use document::{Section, assemble, sections};
pub use error::{Error, Result};
pub use generator::{Generator, JobEntry, JobFile, output_file_name};
pub use job::{JobCategory, JobRequest, Tailoring};
pub use profile::{Education, PersonalInfo, Profile, Project, SkillMap, WorkExperience};
pub use render::{DocumentRenderer, TypstRenderer, profile_to_pdf, profile_to_typst};
pub use scoring::{MatchStrategy, Scorer, score};
pub use store::{ProfileFormat, ProfileStore};
