use std::fs;
use std::path::Path;

use crate::models::content::GalleryMap;

/// Image extensions recognised during gallery discovery.
const IMG_EXTS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Modal single-image viewer. Opening captures its own snapshot of the
/// image list, so a category switch while the viewer is open does not
/// change what is displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum Lightbox {
    Closed,
    Open { images: Vec<String>, index: usize },
}

impl Lightbox {
    /// Open on the image matching `src`; falls back to the first image
    /// when the source is not in the list. Empty lists stay closed.
    pub fn open_by_src(images: &[String], src: &str) -> Lightbox {
        if images.is_empty() {
            return Lightbox::Closed;
        }
        let index = images.iter().position(|i| i == src).unwrap_or(0);
        Lightbox::Open {
            images: images.to_vec(),
            index,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Lightbox::Open { .. })
    }

    pub fn current(&self) -> Option<&str> {
        match self {
            Lightbox::Open { images, index } => images.get(*index).map(|s| s.as_str()),
            Lightbox::Closed => None,
        }
    }

    /// Advance with wraparound; a no-op for single-image sets.
    pub fn next(&mut self) {
        if let Lightbox::Open { images, index } = self {
            if images.len() > 1 {
                *index = (*index + 1) % images.len();
            }
        }
    }

    /// Step back with wraparound; a no-op for single-image sets.
    pub fn prev(&mut self) {
        if let Lightbox::Open { images, index } = self {
            if images.len() > 1 {
                *index = (*index + images.len() - 1) % images.len();
            }
        }
    }

    /// Background click, close button, or cancellation key.
    pub fn close(&mut self) {
        *self = Lightbox::Closed;
    }
}

/// Rebuild the gallery mapping from the image tree: every subdirectory
/// of `base_dir` is a category, every image file inside it an entry,
/// both in sorted order. Paths are emitted relative to the web root
/// (`images/<category>/<file>`). Unreadable directories count as empty
/// — discovery is best-effort by design.
pub fn scan_dir(base_dir: &str) -> GalleryMap {
    let mut gallery = GalleryMap::new();

    let entries = match fs::read_dir(base_dir) {
        Ok(entries) => entries,
        Err(_) => return gallery,
    };

    let mut categories: Vec<String> = entries
        .flatten()
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    categories.sort();

    for category in categories {
        let cat_path = Path::new(base_dir).join(&category);
        let mut files: Vec<String> = fs::read_dir(&cat_path)
            .map(|entries| {
                entries
                    .flatten()
                    .filter(|e| e.path().is_file())
                    .map(|e| e.file_name().to_string_lossy().to_string())
                    .filter(|name| is_image(name))
                    .collect()
            })
            .unwrap_or_default();
        files.sort();

        gallery.insert(
            category.clone(),
            files
                .into_iter()
                .map(|f| format!("images/{}/{}", category, f))
                .collect(),
        );
    }

    gallery
}

fn is_image(name: &str) -> bool {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    IMG_EXTS.contains(&ext.as_str())
}
