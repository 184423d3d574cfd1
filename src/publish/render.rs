use chrono::{DateTime, Datelike, FixedOffset};

/// Built-in post template. A single fixed page: header with the site title
/// and a home link, the entry heading, a timestamp line, the summary, the
/// outbound link, and an empty ad-slot region reserved for monetization
/// tags. Pages are standalone and reference a sibling stylesheet.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en"><head><meta charset="UTF-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="../style.css"></head>
<body>
<header><h1>{site}</h1><nav><ul>
  <li><a href="../index.html">Home</a></li>
</ul></nav></header>
<main class="container">
  <article class="card">
    <h2>{title}</h2>
    <p class="meta">{date}</p>
    <p>{summary}</p>
    <p><a href="{link}" target="_blank" rel="noopener">Read the original</a></p>
    <hr>
    <div class="ad-slot"><!-- paste ad/affiliate tags here --></div>
  </article>
</main>
<footer><p>© {year} {site}</p></footer>
</body></html>"#;

/// Everything the template needs for one post. `title`, `summary`, and
/// `link` are raw extracted text; escaping happens inside [`render_post`].
pub struct PostContext<'a> {
    pub site: &'a str,
    pub title: &'a str,
    pub summary: &'a str,
    pub link: &'a str,
    pub now: DateTime<FixedOffset>,
}

/// Render one post by literal placeholder substitution.
///
/// Feed-controlled fields (`{title}`, `{summary}`, `{link}`) are
/// entity-escaped so source content can never break out of the document
/// structure; `{site}`, `{date}`, and `{year}` come from configuration and
/// the clock and are inserted verbatim. Substitution is a single pass over
/// the template, so substituted values are never re-scanned for
/// placeholders.
pub fn render_post(template: &str, ctx: &PostContext<'_>) -> String {
    let title = html_escape::encode_safe(ctx.title);
    let summary = html_escape::encode_safe(ctx.summary);
    let link = html_escape::encode_safe(ctx.link);
    let date = ctx.now.format("%Y-%m-%d %H:%M").to_string();
    let year = ctx.now.year().to_string();

    substitute(
        template,
        &[
            ("site", ctx.site),
            ("title", &*title),
            ("date", &date),
            ("summary", &*summary),
            ("link", &*link),
            ("year", &year),
        ],
    )
}

/// Replace `{key}` placeholders in one pass. Unknown placeholders and stray
/// braces are kept literally.
fn substitute(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        match after_open.find('}') {
            Some(close) => {
                let key = &after_open[..close];
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after_open[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed_now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2026-08-26T14:30:00+09:00").unwrap()
    }

    fn ctx<'a>(title: &'a str, summary: &'a str, link: &'a str) -> PostContext<'a> {
        PostContext {
            site: "Test Site",
            title,
            summary,
            link,
            now: fixed_now(),
        }
    }

    #[test]
    fn test_all_placeholders_filled() {
        let html = render_post(
            DEFAULT_TEMPLATE,
            &ctx("A Post", "A summary", "http://example.com/a"),
        );
        assert!(html.contains("<h2>A Post</h2>"));
        assert!(html.contains("<p>A summary</p>"));
        assert!(html.contains(r#"href="http://example.com/a""#));
        assert!(html.contains("2026-08-26 14:30"));
        assert!(html.contains("© 2026 Test Site"));
        assert!(!html.contains('{'));
    }

    #[test]
    fn test_script_title_is_escaped() {
        let html = render_post(
            DEFAULT_TEMPLATE,
            &ctx("<script>alert(1)</script>", "s", "http://x/1"),
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_link_quotes_are_escaped() {
        let html = render_post(
            DEFAULT_TEMPLATE,
            &ctx("t", "s", r#"http://x/1" onclick="evil()"#),
        );
        assert!(!html.contains(r#"onclick="evil()"#));
        assert!(html.contains("&quot;"));
    }

    #[test]
    fn test_placeholder_in_feed_text_not_substituted() {
        let html = render_post(DEFAULT_TEMPLATE, &ctx("uses {site} literally", "s", ""));
        assert!(html.contains("uses {site} literally"));
    }

    #[test]
    fn test_substitute_keeps_unknown_placeholders() {
        assert_eq!(substitute("a {nope} b", &[("site", "S")]), "a {nope} b");
        assert_eq!(substitute("tail {", &[]), "tail {");
        assert_eq!(substitute("{site}!", &[("site", "S")]), "S!");
    }

    #[test]
    fn test_custom_template() {
        let html = render_post("<b>{title}</b> on {site}", &ctx("Hi", "", ""));
        assert_eq!(html, "<b>Hi</b> on Test Site");
    }
}
