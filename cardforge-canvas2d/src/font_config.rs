//! Font discovery for canvas text.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Where fonts come from and which faces the generic CSS families map to.
///
/// Building the database is the expensive part, so resolve once with
/// [`FontConfig::resolve`] and hand the result to every surface.
#[derive(Clone, Debug)]
pub struct FontConfig {
    pub load_system_fonts: bool,
    /// Directories scanned recursively for TTF/OTF/TTC files.
    pub font_dirs: Vec<PathBuf>,
    /// In-memory font files, e.g. fonts bundled into a binary.
    pub font_data: Vec<Arc<[u8]>>,
    /// Candidates for `sans-serif`, first installed one wins.
    pub sans_serif: Vec<String>,
    /// Candidates for `serif`, first installed one wins.
    pub serif: Vec<String>,
    pub hinting_enabled: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
            font_dirs: Vec::new(),
            font_data: Vec::new(),
            // CJK faces come first so preset race names render with one face
            sans_serif: to_strings(&[
                "Noto Sans CJK SC",
                "Source Han Sans SC",
                "PingFang SC",
                "Microsoft YaHei",
                "Noto Sans",
                "DejaVu Sans",
                "Liberation Sans",
                "Arial",
            ]),
            serif: to_strings(&[
                "Noto Serif CJK SC",
                "Source Han Serif SC",
                "DejaVu Serif",
                "Liberation Serif",
                "Times New Roman",
            ]),
            hinting_enabled: false,
        }
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

impl FontConfig {
    pub fn resolve(&self) -> ResolvedFontConfig {
        let mut db = fontdb::Database::new();
        if self.load_system_fonts {
            db.load_system_fonts();
        }
        for dir in &self.font_dirs {
            log::debug!("loading fonts from {}", dir.display());
            db.load_fonts_dir(dir);
        }
        for data in &self.font_data {
            db.load_font_data(data.to_vec());
        }

        let installed: HashSet<String> = db
            .faces()
            .flat_map(|face| face.families.iter().map(|(family, _)| family.clone()))
            .collect();
        let first_installed = |candidates: &[String]| {
            candidates
                .iter()
                .find(|name| installed.contains(*name))
                .cloned()
        };
        if let Some(family) = first_installed(&self.sans_serif) {
            log::debug!("sans-serif resolves to {family}");
            db.set_sans_serif_family(family);
        }
        if let Some(family) = first_installed(&self.serif) {
            db.set_serif_family(family);
        }

        log::info!("font database ready with {} faces", db.len());
        ResolvedFontConfig {
            fontdb: db,
            hinting_enabled: self.hinting_enabled,
        }
    }
}

/// A loaded font database. Cloning copies the in-memory database without
/// touching the filesystem again.
#[derive(Clone)]
pub struct ResolvedFontConfig {
    pub(crate) fontdb: fontdb::Database,
    pub(crate) hinting_enabled: bool,
}

impl ResolvedFontConfig {
    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }
}

impl std::fmt::Debug for ResolvedFontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFontConfig")
            .field("faces", &self.face_count())
            .field("hinting_enabled", &self.hinting_enabled)
            .finish()
    }
}
