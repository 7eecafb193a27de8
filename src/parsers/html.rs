use scraper::{Html, Selector};
use url::Url;

/// Extracts the target of every `<a href>` in a rendered document.
///
/// Targets are resolved against the document base (the first `<base href>`,
/// falling back to `page_url`), the way a browser reports `anchor.href`.
/// Hrefs that cannot be resolved are returned verbatim so the caller can
/// discard them.
pub fn extract_links(html: &str, page_url: &Url) -> Vec<String> {
    let doc = Html::parse_document(html);
    let base = document_base(&doc, page_url);

    let link_selector = Selector::parse("a[href]").unwrap();
    let links = doc
        .select(&link_selector)
        .filter_map(|e| e.value().attr("href"))
        .map(|href| match base.join(href.trim()) {
            Ok(resolved) => resolved.to_string(),
            Err(_) => href.to_string(),
        })
        .collect::<Vec<String>>();

    ::log::debug!("HTML parser found {} links on {}", links.len(), page_url);
    if !links.is_empty() {
        ::log::trace!(
            "First few links: {:?}",
            links.iter().take(5).collect::<Vec<_>>()
        );
    }

    links
}

fn document_base(doc: &Html, page_url: &Url) -> Url {
    let base_selector = Selector::parse("base[href]").unwrap();
    doc.select(&base_selector)
        .filter_map(|e| e.value().attr("href"))
        .next()
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone())
}
