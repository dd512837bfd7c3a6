use url::form_urlencoded;

use crate::gallery::Lightbox;
use crate::merge::EffectiveSite;
use crate::models::page::ContentBlock;
use crate::router::Router;

/// Render one content block. The mapping is total: every variant
/// produces markup, and `Unknown` produces nothing at all.
pub fn render_block(block: &ContentBlock) -> String {
    match block {
        ContentBlock::Heading { text } => format!("<h2>{}</h2>", html_escape(text)),
        ContentBlock::Text { text } => format!("<p>{}</p>", html_escape(text)),
        ContentBlock::List { items } => {
            let mut html = String::from("<ul>");
            for item in items {
                html.push_str(&format!("<li>{}</li>", html_escape(item)));
            }
            html.push_str("</ul>");
            html
        }
        ContentBlock::Image { src, alt } => format!(
            r#"<img src="{}" alt="{}">"#,
            html_escape(src),
            html_escape(alt)
        ),
        ContentBlock::Button { label, href } => format!(
            r#"<a class="btn" href="{}">{}</a>"#,
            html_escape(href),
            html_escape(label)
        ),
        ContentBlock::Unknown => String::new(),
    }
}

/// Navigation bar: one link per registered section, the active one
/// marked by comparing each link's declared target against the active
/// id.
pub fn render_nav(router: &Router) -> String {
    let mut html = String::from(r#"<nav class="nav">"#);
    for section in router.sections() {
        let class = if router.is_active(&section.id) {
            "nav-link active"
        } else {
            "nav-link"
        };
        html.push_str(&format!(
            r##"<a class="{}" href="#{}">{}</a>"##,
            class,
            html_escape(&section.id),
            html_escape(&section.title)
        ));
    }
    html.push_str("</nav>");
    html
}

/// Tabbed image grid for one category. An empty category renders an
/// explanatory placeholder — never an empty container that looks like
/// a page still loading.
pub fn render_gallery(
    gallery: &crate::models::content::GalleryMap,
    active_category: Option<&str>,
) -> String {
    let active = active_category
        .filter(|c| gallery.contains_key(*c))
        .map(|c| c.to_string())
        .or_else(|| gallery.keys().next().cloned())
        .unwrap_or_default();

    let mut html = String::from(r#"<div class="gallery-tabs">"#);
    for category in gallery.keys() {
        let class = if *category == active {
            "gallery-tab active"
        } else {
            "gallery-tab"
        };
        html.push_str(&format!(
            r#"<button class="{}" data-category="{}">{}</button>"#,
            class,
            html_escape(category),
            html_escape(category)
        ));
    }
    html.push_str("</div>");

    let images = gallery.get(&active).map(|v| v.as_slice()).unwrap_or(&[]);
    html.push_str(&render_gallery_grid(&active, images));
    html
}

pub fn render_gallery_grid(category: &str, images: &[String]) -> String {
    if images.is_empty() {
        return format!(
            r#"<p class="gallery-empty">No images in "{}" yet.</p>"#,
            html_escape(category)
        );
    }

    let mut html = String::from(r#"<div class="gallery-grid">"#);
    for src in images {
        html.push_str(&format!(
            r#"<img src="{}" alt="{} reference" data-src="{}">"#,
            html_escape(&image_url(src)),
            html_escape(category),
            html_escape(src)
        ));
    }
    html.push_str("</div>");
    html
}

/// Gallery entries are either repository-relative paths
/// (`images/<category>/<file>`) or inline-encoded images. Only the
/// former need anchoring to the site root.
fn image_url(src: &str) -> String {
    if src.starts_with("data:") || src.starts_with('/') {
        src.to_string()
    } else {
        format!("/{}", src)
    }
}

/// Modal markup for an open lightbox; nothing when closed.
pub fn render_lightbox(lightbox: &Lightbox) -> String {
    match lightbox.current() {
        Some(src) => format!(
            r#"<div class="lightbox"><button class="lightbox-prev">&larr;</button><img class="lightbox-img" src="{}"><button class="lightbox-next">&rarr;</button></div>"#,
            html_escape(&image_url(src))
        ),
        None => String::new(),
    }
}

/// Compose the mailto link the contact form submits through.
pub fn contact_mailto(to: &str, full_name: &str, email: &str, message: &str) -> String {
    let name = if full_name.trim().is_empty() {
        "No name"
    } else {
        full_name.trim()
    };
    let subject = format!("Inquiry - {}", name);
    let body = format!(
        "Full name: {}\nEmail: {}\n\nMessage:\n{}\n",
        full_name.trim(),
        email.trim(),
        message.trim()
    );

    format!(
        "mailto:{}?subject={}&body={}",
        to,
        encode_component(&subject),
        encode_component(&body)
    )
}

// form_urlencoded writes spaces as '+', which mail clients do not
// decode; swap in %20.
fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Assemble the full public page: navigation plus every section, with
/// exactly one marked active. Extra-page bodies are rendered from
/// their blocks in list order; re-rendering fully replaces a section
/// body, it never patches.
pub fn render_page(site: &EffectiveSite, router: &Router, gallery_category: Option<&str>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>",
    );
    html.push_str(&html_escape(&site.home.title));
    html.push_str("</title><link rel=\"stylesheet\" href=\"/static/style.css\"></head><body>");

    html.push_str(&render_nav(router));

    for section in router.sections() {
        let class = if router.is_active(&section.id) {
            "section active"
        } else {
            "section"
        };
        html.push_str(&format!(
            r#"<section id="{}" class="{}">"#,
            html_escape(&section.id),
            class
        ));
        html.push_str(&render_section_body(&section.id, site, gallery_category));
        html.push_str("</section>");
    }

    html.push_str("</body></html>");
    html
}

fn render_section_body(id: &str, site: &EffectiveSite, gallery_category: Option<&str>) -> String {
    match id {
        "home" => {
            let mut html = format!(
                "<h1>{}</h1><p>{}</p>",
                html_escape(&site.home.title),
                html_escape(&site.home.subtitle)
            );
            if !site.home.image.is_empty() {
                html.push_str(&format!(
                    r#"<img class="hero" src="{}" alt="{}">"#,
                    html_escape(&site.home.image),
                    html_escape(&site.home.title)
                ));
            }
            html
        }
        "services" => {
            let mut html = format!("<h2>{}</h2><ul>", html_escape(&site.services_title));
            for item in &site.services_items {
                html.push_str(&format!("<li>{}</li>", html_escape(item)));
            }
            html.push_str("</ul>");
            html
        }
        "price" => format!(
            "<h2>{}</h2><p>{}</p>",
            html_escape(&site.price_title),
            html_escape(&site.price_text)
        ),
        "contact" => format!(
            r#"<h2>Contact</h2><p>{}</p><p>{}</p><a class="btn" href="{}">Send inquiry</a>"#,
            html_escape(&site.contact_email),
            html_escape(&site.contact_phone),
            html_escape(&contact_mailto(&site.contact_email, "", "", ""))
        ),
        "gallery" => render_gallery(&site.gallery, gallery_category),
        _ => {
            // extra page: body is its blocks, in order
            match site.pages.iter().find(|p| p.id == id) {
                Some(page) => page.blocks.iter().map(render_block).collect(),
                None => String::new(),
            }
        }
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
