use rocket::response::content::RawHtml;
use rocket::State;

use crate::config::AppConfig;
use crate::merge;
use crate::models::content::SiteContent;
use crate::models::draft::DraftOverlay;
use crate::render;
use crate::router::Router;

/// Public page. The published documents and the draft overlay are
/// loaded fresh on every request, merged, and handed to the renderer
/// as plain values. `section` is the server-side counterpart of the
/// URL fragment; unknown ids fall back to home.
#[get("/?<section>&<category>")]
pub fn index(
    config: &State<AppConfig>,
    section: Option<String>,
    category: Option<String>,
) -> RawHtml<String> {
    let files = SiteContent::load(&config.content_dir);
    let draft = DraftOverlay::load(&config.draft_path);
    let mut site = merge::merge_site(&files, &draft);
    if site.contact_email.is_empty() {
        site.contact_email = config.contact_email.clone();
    }

    let mut router = Router::new();
    router.register_extra_pages(&site.pages);
    router.navigate(section.as_deref().unwrap_or(""));

    RawHtml(render::render_page(&site, &router, category.as_deref()))
}

pub fn routes() -> Vec<rocket::Route> {
    routes![index]
}
