//! Text rendering of the list and detail views.

use catalog_core::{ResourceCard, ResourceDetail, ResourceKind};
use console::style;

fn heart(is_favorite: bool) -> String {
    if is_favorite {
        style("♥").red().to_string()
    } else {
        style("♡").dim().to_string()
    }
}

fn icon(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Video => "▶",
        ResourceKind::Article => "✎",
        ResourceKind::Other => "•",
    }
}

pub fn cards(cards: &[ResourceCard], search: Option<&str>) -> String {
    if cards.is_empty() {
        return match search {
            Some(term) if !term.is_empty() => {
                format!("No resources match \"{term}\".\n")
            }
            _ => "No resources available yet.\n".to_string(),
        };
    }

    let mut out = String::new();
    for card in cards {
        out.push_str(&format!(
            "{} {} {}\n",
            heart(card.is_favorite),
            style(format!("[{}]", card.id)).dim(),
            style(&card.title).bold()
        ));

        let mut meta = format!("{} {}", icon(card.kind), card.kind_label);
        if let Some(published) = &card.published {
            meta.push_str(&format!(" · {published}"));
        }
        out.push_str(&format!("    {meta}\n"));

        if !card.summary.is_empty() {
            out.push_str(&format!("    {}\n", card.summary));
        }
        out.push('\n');
    }
    out
}

pub fn detail(detail: &ResourceDetail) -> String {
    let mut out = format!(
        "{} {}\n",
        style(&detail.title).bold().underlined(),
        heart(detail.is_favorite)
    );

    let mut meta = format!("{} {}", icon(detail.kind), detail.kind_label);
    if let Some(published) = &detail.published {
        meta.push_str(&format!(" · {published}"));
    }
    out.push_str(&format!("{meta}\n\n"));

    if !detail.description.is_empty() {
        out.push_str(&format!("{}\n\n", detail.description));
    }
    if let Some(link) = &detail.link {
        out.push_str(&format!("Open: {link}\n"));
    }
    if let Some(image) = &detail.image_url {
        out.push_str(&format!("Image: {image}\n"));
    }
    out
}

pub fn connection_hint(catalog_url: &str, favorites_url: &str) -> String {
    format!(
        "could not connect to a server. Check that:\n  \
         - the CMS is running at {catalog_url}\n  \
         - the favorites service is running at {favorites_url}\n  \
         - your network connection is working"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u64, summary: &str, is_favorite: bool) -> ResourceCard {
        ResourceCard {
            id,
            title: format!("Resource {id}"),
            kind: ResourceKind::Video,
            kind_label: "Video".to_string(),
            summary: summary.to_string(),
            published: Some("5 Mar 2024".to_string()),
            image_url: None,
            is_favorite,
        }
    }

    fn plain(text: String) -> String {
        console::strip_ansi_codes(&text).to_string()
    }

    #[test]
    fn empty_listing_messages() {
        assert_eq!(cards(&[], None), "No resources available yet.\n");
        assert_eq!(cards(&[], Some("")), "No resources available yet.\n");
        assert_eq!(cards(&[], Some("go")), "No resources match \"go\".\n");
    }

    #[test]
    fn card_lines() {
        let out = plain(cards(&[card(3, "About async", true), card(4, "", false)], None));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "♥ [3] Resource 3");
        assert_eq!(lines[1], "    ▶ Video · 5 Mar 2024");
        assert_eq!(lines[2], "    About async");
        assert_eq!(lines[4], "♡ [4] Resource 4");
        assert_eq!(lines[5], "    ▶ Video · 5 Mar 2024");
        assert_eq!(lines[6], "");
    }

    #[test]
    fn detail_includes_link_and_image() {
        let view = ResourceDetail {
            id: 1,
            title: "Book".to_string(),
            kind: ResourceKind::Article,
            kind_label: "Artículo".to_string(),
            description: "Long text".to_string(),
            published: None,
            image_url: Some("http://cms/uploads/a.png".to_string()),
            link: Some("https://example.com".to_string()),
            is_favorite: false,
        };
        let out = plain(detail(&view));
        assert!(out.starts_with("Book ♡\n✎ Artículo\n\nLong text\n\n"));
        assert!(out.contains("Open: https://example.com\n"));
        assert!(out.contains("Image: http://cms/uploads/a.png\n"));
    }

    #[test]
    fn hint_names_both_services() {
        let hint = connection_hint("http://localhost:1337", "http://localhost:3001");
        assert!(hint.contains("CMS is running at http://localhost:1337"));
        assert!(hint.contains("favorites service is running at http://localhost:3001"));
    }
}
