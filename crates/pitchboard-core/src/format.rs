//! Presentation helpers shared by the page view models.

use jiff::Timestamp;
use jiff::tz::TimeZone;
use pulldown_cmark::{Event, Options, Parser, html};

/// Formats a timestamp as a long US date in UTC, e.g. `January 5, 2024`.
pub fn format_date(timestamp: Timestamp) -> String {
    timestamp
        .to_zoned(TimeZone::UTC)
        .strftime("%B %-d, %Y")
        .to_string()
}

/// Formats a view counter with a compact number and its label.
///
/// Absent counters read as zero: `None` gives `0 views`, `1` gives `1 view`
/// and `1500` gives `1.5K views`.
pub fn format_views(views: Option<u64>) -> String {
    let views = views.unwrap_or_default();
    let label = if views == 1 { "view" } else { "views" };
    format!("{} {label}", compact_number(views))
}

/// Abbreviates large numbers with one decimal: `K`, `M` or `B`.
pub fn compact_number(number: u64) -> String {
    const SCALES: [(u64, &str); 3] = [
        (1_000_000_000, "B"),
        (1_000_000, "M"),
        (1_000, "K"),
    ];

    for (scale, suffix) in SCALES {
        if number >= scale {
            let scaled = format!("{:.1}", number as f64 / scale as f64);
            let scaled = scaled.strip_suffix(".0").unwrap_or(&scaled);
            return format!("{scaled}{suffix}");
        }
    }

    number.to_string()
}

/// Renders a markdown pitch to HTML.
///
/// Raw HTML in the source is escaped rather than passed through. Returns
/// `None` when the pitch is absent or renders to nothing.
pub fn render_markdown(source: Option<&str>) -> Option<String> {
    let source = source.filter(|source| !source.trim().is_empty())?;

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        event => event,
    });

    let mut rendered = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut rendered, events);

    (!rendered.trim().is_empty()).then_some(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown() {
        assert_eq!(
            render_markdown(Some("# Fixing cars")).as_deref(),
            Some("<h1>Fixing cars</h1>\n")
        );
        assert_eq!(
            render_markdown(Some("Fast **and** cheap")).as_deref(),
            Some("<p>Fast <strong>and</strong> cheap</p>\n")
        );
    }

    #[test]
    fn test_render_markdown_escapes_html() {
        let rendered = render_markdown(Some("<script>alert(1)</script>")).unwrap();
        assert!(!rendered.contains("<script>"));
        assert!(rendered.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_markdown_empty() {
        assert_eq!(render_markdown(None), None);
        assert_eq!(render_markdown(Some("")), None);
        assert_eq!(render_markdown(Some("  \n ")), None);
    }

    #[test]
    fn test_format_date() {
        let timestamp: Timestamp = "2024-01-05T10:00:00Z".parse().unwrap();
        assert_eq!(format_date(timestamp), "January 5, 2024");

        let timestamp: Timestamp = "2023-12-31T23:59:59Z".parse().unwrap();
        assert_eq!(format_date(timestamp), "December 31, 2023");
    }

    #[test]
    fn test_format_views_labels() {
        assert_eq!(format_views(None), "0 views");
        assert_eq!(format_views(Some(0)), "0 views");
        assert_eq!(format_views(Some(1)), "1 view");
        assert_eq!(format_views(Some(950)), "950 views");
    }

    #[test]
    fn test_compact_number() {
        assert_eq!(compact_number(999), "999");
        assert_eq!(compact_number(1_000), "1K");
        assert_eq!(compact_number(1_500), "1.5K");
        assert_eq!(compact_number(2_000_000), "2M");
        assert_eq!(compact_number(3_200_000_000), "3.2B");
    }

    #[test]
    fn test_format_views_compact() {
        assert_eq!(format_views(Some(1_500)), "1.5K views");
        assert_eq!(format_views(Some(2_000_000)), "2M views");
    }
}
