use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The five fixed content documents, one JSON file each under the
/// content directory. Saves always overwrite the whole document.
pub const HOME_FILE: &str = "home.json";
pub const SERVICES_FILE: &str = "services.json";
pub const PRICE_FILE: &str = "price.json";
pub const CONTACT_FILE: &str = "contact.json";
pub const GALLERY_FILE: &str = "gallery.json";

pub const CONTENT_FILES: &[&str] = &[
    HOME_FILE,
    SERVICES_FILE,
    PRICE_FILE,
    CONTACT_FILE,
    GALLERY_FILE,
];

/// Category name → ordered list of image paths (relative to the image
/// root). List order is display order.
pub type GalleryMap = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServicesContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactContent {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Everything the public renderer reads from the published checkout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteContent {
    pub home: HomeContent,
    pub services: ServicesContent,
    pub price: PriceContent,
    pub contact: ContactContent,
    pub gallery: GalleryMap,
}

impl SiteContent {
    /// Load all five documents from `dir`. A missing or malformed file
    /// falls back to the document's defaults — the renderer never fails
    /// because a file has not been seeded yet.
    pub fn load(dir: &str) -> SiteContent {
        SiteContent {
            home: load_file(dir, HOME_FILE),
            services: load_file(dir, SERVICES_FILE),
            price: load_file(dir, PRICE_FILE),
            contact: load_file(dir, CONTACT_FILE),
            gallery: load_file(dir, GALLERY_FILE),
        }
    }
}

fn load_file<T: Default + for<'de> Deserialize<'de>>(dir: &str, file: &str) -> T {
    let path = Path::new(dir).join(file);
    match fs::read_to_string(&path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Content file {} is malformed ({}) — using defaults", path.display(), e);
                T::default()
            }
        },
        Err(_) => T::default(),
    }
}
