use crate::models::page::ExtraPage;

pub const DEFAULT_SECTION: &str = "home";

const BUILT_IN: [(&str, &str); 5] = [
    ("home", "Home"),
    ("services", "Services"),
    ("price", "Prices"),
    ("contact", "Contact"),
    ("gallery", "Gallery"),
];

/// One navigable section: a fixed built-in or a registered extra page.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub title: String,
}

/// Maps a navigation identifier to the displayed section. Exactly one
/// section is active at a time; navigating to an unknown id falls back
/// to the default. Each transition completes before the next input is
/// processed — there is no hidden reentrancy.
#[derive(Debug, Clone)]
pub struct Router {
    sections: Vec<Section>,
    active: String,
}

impl Router {
    /// The five built-in sections, in display order.
    pub fn new() -> Router {
        Router {
            sections: BUILT_IN
                .iter()
                .map(|(id, title)| Section {
                    id: id.to_string(),
                    title: title.to_string(),
                })
                .collect(),
            active: DEFAULT_SECTION.to_string(),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active == id
    }

    pub fn has_section(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s.id == id)
    }

    /// Navigate to `target`, falling back to the default section when
    /// the id is empty or names no registered section.
    pub fn navigate(&mut self, target: &str) {
        if !target.is_empty() && self.has_section(target) {
            self.active = target.to_string();
        } else {
            self.active = DEFAULT_SECTION.to_string();
        }
    }

    /// Ensure a navigation entry and section exist for every extra
    /// page: create when absent, update the title when present.
    /// Re-registration is idempotent. Built-in section ids are
    /// reserved; a page whose slug collides with one is skipped
    /// rather than retitling a built-in it can never replace.
    pub fn register_extra_pages(&mut self, pages: &[ExtraPage]) {
        for page in pages {
            if page.id.is_empty() || BUILT_IN.iter().any(|(id, _)| *id == page.id) {
                continue;
            }
            match self.sections.iter_mut().find(|s| s.id == page.id) {
                Some(existing) => existing.title = page.title.clone(),
                None => self.sections.push(Section {
                    id: page.id.clone(),
                    title: page.title.clone(),
                }),
            }
        }
    }
}

impl Default for Router {
    fn default() -> Router {
        Router::new()
    }
}
