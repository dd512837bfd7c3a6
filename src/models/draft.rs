use log::warn;
use serde::Serialize;
use serde_json::Value;
use std::fs;

use crate::models::content::GalleryMap;
use crate::models::page::ExtraPage;

/// Unpublished edit state that can override published content for
/// preview. Lives as one JSON blob at a fixed path; absence is the
/// all-empty overlay. Reads always normalize to this exact shape —
/// partial or malformed stored data degrades to empty fields, never to
/// nulls propagating through the render pipeline.
///
/// The overlay is loaded once per render cycle and passed into the
/// pipeline by value; the renderer never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DraftOverlay {
    pub home: DraftHome,
    pub contact: DraftContact,
    pub pages: Vec<ExtraPage>,
    pub gallery: GalleryMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DraftHome {
    pub title: String,
    pub subtitle: String,
    /// Inline-encoded (data URL) or repository path; empty = no override.
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DraftContact {
    pub email: String,
    pub phone: String,
}

impl DraftOverlay {
    /// Normalize an arbitrary JSON value into the fixed overlay shape.
    /// Every field is parsed tolerantly on its own so one malformed
    /// entry cannot discard the rest of the draft.
    pub fn from_value(value: &Value) -> DraftOverlay {
        let str_at = |obj: &Value, key: &str| -> String {
            obj.get(key)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        let home = value.get("home").cloned().unwrap_or(Value::Null);
        let contact = value.get("contact").cloned().unwrap_or(Value::Null);

        let pages = value
            .get("pages")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().map(ExtraPage::from_value).collect())
            .unwrap_or_default();

        let mut gallery = GalleryMap::new();
        if let Some(map) = value.get("gallery").and_then(|v| v.as_object()) {
            for (category, images) in map {
                let list: Vec<String> = images
                    .as_array()
                    .map(|arr| {
                        arr.iter()
                            .filter_map(|v| v.as_str())
                            .map(|s| s.to_string())
                            .collect()
                    })
                    .unwrap_or_default();
                gallery.insert(category.clone(), list);
            }
        }

        DraftOverlay {
            home: DraftHome {
                title: str_at(&home, "title"),
                subtitle: str_at(&home, "subtitle"),
                image: str_at(&home, "image"),
            },
            contact: DraftContact {
                email: str_at(&contact, "email"),
                phone: str_at(&contact, "phone"),
            },
            pages,
            gallery,
        }
    }

    pub fn from_json(raw: &str) -> DraftOverlay {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => DraftOverlay::from_value(&value),
            Err(_) => DraftOverlay::default(),
        }
    }

    /// Load the overlay blob. A missing file is the empty overlay.
    pub fn load(path: &str) -> DraftOverlay {
        match fs::read_to_string(path) {
            Ok(raw) => DraftOverlay::from_json(&raw),
            Err(_) => DraftOverlay::default(),
        }
    }

    /// Persist the normalized overlay.
    pub fn store(&self, path: &str) -> Result<(), String> {
        let raw = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, raw).map_err(|e| e.to_string())
    }

    /// Explicit user action only — nothing else ever clears the draft.
    pub fn clear(path: &str) {
        if std::path::Path::new(path).exists() {
            if let Err(e) = fs::remove_file(path) {
                warn!("Failed to clear draft overlay at {}: {}", path, e);
            }
        }
    }
}
