use std::fs;
use std::path::Path;

use tracing::{debug, info};
use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_library::layout::PagedDocument;
use typst_pdf::PdfOptions;

use crate::config::Config;
use crate::document;
use crate::error::{Error, Result};
use crate::profile::Profile;
use crate::typst;

/// Turns a finished profile into a file at `dest`.
///
/// Renderers only ever see the profile itself; no scoring data reaches them.
pub trait DocumentRenderer {
    fn render(&self, profile: &Profile, dest: &Path) -> Result<()>;
}

impl<T: DocumentRenderer + ?Sized> DocumentRenderer for &T {
    fn render(&self, profile: &Profile, dest: &Path) -> Result<()> {
        (**self).render(profile, dest)
    }
}

/// Renders through Typst into a PDF.
#[derive(Debug, Clone, Default)]
pub struct TypstRenderer {
    config: Config,
}

impl TypstRenderer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl DocumentRenderer for TypstRenderer {
    fn render(&self, profile: &Profile, dest: &Path) -> Result<()> {
        let pdf_bytes = profile_to_pdf(profile, &self.config)?;
        fs::write(dest, &pdf_bytes)?;
        info!(path = %dest.display(), bytes = pdf_bytes.len(), "wrote PDF");
        Ok(())
    }
}

/// Convert a profile to Typst markup.
pub fn profile_to_typst(profile: &Profile, config: &Config) -> String {
    let blocks = document::assemble(profile);
    typst::blocks_to_typst(&blocks, config)
}

/// Compile a profile to a Typst document.
fn compile_document(profile: &Profile, config: &Config) -> Result<PagedDocument> {
    let typst_content = profile_to_typst(profile, config);
    debug!(len = typst_content.len(), "compiling Typst markup");

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(config.font.system);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    engine
        .compile()
        .output
        .map_err(|e| Error::Render(format!("Typst compilation failed: {:?}", e)))
}

/// Convert a profile to PDF bytes.
pub fn profile_to_pdf(profile: &Profile, config: &Config) -> Result<Vec<u8>> {
    let doc = compile_document(profile, config)?;

    typst_pdf::pdf(&doc, &PdfOptions::default())
        .map_err(|e| Error::Render(format!("PDF generation failed: {:?}", e)))
}
