use crate::models::content::{GalleryMap, SiteContent};
use crate::models::draft::DraftOverlay;
use crate::models::page::ExtraPage;

/// The merged view the renderer consumes: published content with the
/// draft overlay applied on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveSite {
    pub home: EffectiveHome,
    pub services_title: String,
    pub services_items: Vec<String>,
    pub price_title: String,
    pub price_text: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub gallery: GalleryMap,
    pub pages: Vec<ExtraPage>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectiveHome {
    pub title: String,
    pub subtitle: String,
    pub image: String,
}

/// Field resolution: the draft wins only when it is present and
/// non-blank after trimming; otherwise the published value stands.
/// Replacement, not deep-merge. This lets a preview reflect in-progress
/// edits without the draft restating every field.
///
/// Note the flip side: clearing a field to blank in the draft is
/// indistinguishable from never overriding it.
pub fn resolve<'a>(draft: Option<&'a str>, file: &'a str) -> &'a str {
    match draft {
        Some(d) if !d.trim().is_empty() => d,
        _ => file,
    }
}

/// Gallery resolution is all-or-nothing: a non-empty draft mapping
/// replaces the published mapping wholesale. Categories are never
/// merged one by one.
pub fn resolve_gallery<'a>(draft: &'a GalleryMap, file: &'a GalleryMap) -> &'a GalleryMap {
    if draft.is_empty() {
        file
    } else {
        draft
    }
}

/// Build the effective view. The overlay is handed in by the caller at
/// render time — there is no module-level draft state.
pub fn merge_site(files: &SiteContent, draft: &DraftOverlay) -> EffectiveSite {
    let file_image = files.home.image.as_deref().unwrap_or("");

    EffectiveSite {
        home: EffectiveHome {
            title: resolve(Some(&draft.home.title), &files.home.title).to_string(),
            subtitle: resolve(Some(&draft.home.subtitle), &files.home.subtitle).to_string(),
            image: resolve(Some(&draft.home.image), file_image).to_string(),
        },
        services_title: files.services.title.clone(),
        services_items: files.services.items.clone(),
        price_title: files.price.title.clone(),
        price_text: files.price.text.clone(),
        contact_email: resolve(Some(&draft.contact.email), &files.contact.email).to_string(),
        contact_phone: resolve(Some(&draft.contact.phone), &files.contact.phone).to_string(),
        gallery: resolve_gallery(&draft.gallery, &files.gallery).clone(),
        pages: draft.pages.clone(),
    }
}
