use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One typed unit of renderable content. The set is closed; an unknown
/// or malformed tag maps to `Unknown`, which renders as nothing, so
/// future block types degrade gracefully instead of failing the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Heading {
        #[serde(default)]
        text: String,
    },
    Text {
        #[serde(default)]
        text: String,
    },
    List {
        #[serde(default)]
        items: Vec<String>,
    },
    Image {
        #[serde(default)]
        src: String,
        #[serde(default)]
        alt: String,
    },
    Button {
        #[serde(default)]
        label: String,
        #[serde(default)]
        href: String,
    },
    #[serde(other)]
    Unknown,
}

impl ContentBlock {
    /// Tolerant per-element parse: anything that is not a well-formed
    /// known block becomes `Unknown` rather than poisoning the page.
    pub fn from_value(value: &Value) -> ContentBlock {
        serde_json::from_value(value.clone()).unwrap_or(ContentBlock::Unknown)
    }
}

/// An admin-defined page rendered as a navigable section alongside the
/// five built-in ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
}

impl ExtraPage {
    pub fn from_value(value: &Value) -> ExtraPage {
        let title = value
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        let given_id = value.get("id").and_then(|v| v.as_str()).unwrap_or("");
        let blocks = value
            .get("blocks")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().map(ContentBlock::from_value).collect())
            .unwrap_or_default();

        ExtraPage {
            id: derive_id(given_id, &title),
            title,
            blocks,
        }
    }
}

/// Page ids are slugs of the title: lowercased, diacritics folded,
/// non-alphanumerics collapsed to single hyphens, no leading or
/// trailing hyphen. Idempotent by construction.
pub fn page_id(title: &str) -> String {
    slug::slugify(title)
}

fn derive_id(given: &str, title: &str) -> String {
    let from_given = page_id(given);
    if !from_given.is_empty() {
        from_given
    } else {
        page_id(title)
    }
}
