use atelier_common::{localized_text, translations, Locale};
use atelier_gate::routing::{self, Page, PageMatch};
use url::form_urlencoded;

/// Render a localized page from the static translation table.
///
/// The CMS-backed renderer lives outside this crate; this is the fallback
/// every page degrades to when no document is available.
pub fn render_page(page: &PageMatch, current_path: &str) -> String {
    let locale = page.locale;
    let key = page.page.key();
    let title = localized_text(None, locale, "title", &format!("{key}.title"));
    let tagline = localized_text(None, locale, "tagline", &format!("{key}.tagline"));

    let detail = match &page.slug {
        Some(slug) => format!(r#"<p class="slug">{}</p>"#, html_escape(slug)),
        None => String::new(),
    };

    let content = format!(
        r#"<main class="container">
    <h2>{title}</h2>
    <p class="tagline">{tagline}</p>
    {detail}
</main>"#,
        title = html_escape(&title),
        tagline = html_escape(&tagline),
    );

    build_page(locale, &title, &nav(locale, current_path), &content)
}

pub fn render_not_found(locale: Locale, current_path: &str) -> String {
    let title = text(locale, "not_found.title");
    let content = format!(
        r#"<main class="container"><h2>{title}</h2><p><a href="{home}">{site}</a></p></main>"#,
        title = html_escape(title),
        home = routing::href(Page::Home, locale, None),
        site = html_escape(text(locale, "site.name")),
    );
    build_page(locale, title, &nav(locale, current_path), &content)
}

/// Render the password form. The form posts JSON to `/api/password` and
/// follows the returned redirect.
pub fn render_password(locale: Locale, redirect: Option<&str>) -> String {
    let title = text(locale, "password.title");
    let redirect_json = serde_json::to_string(&redirect).unwrap_or_else(|_| "null".to_string());

    let content = format!(
        r#"<main class="container narrow">
    <h2>{title}</h2>
    <p>{prompt}</p>
    <form id="password-form">
        <input type="password" name="password" id="password" required autofocus autocomplete="current-password">
        <button type="submit">{submit}</button>
        <p id="password-error" class="error" hidden>{error}</p>
    </form>
</main>
<script>
const redirectTarget = {redirect_json};
document.getElementById('password-form').addEventListener('submit', async (e) => {{
    e.preventDefault();
    const res = await fetch('/api/password', {{
        method: 'POST',
        headers: {{ 'Content-Type': 'application/json' }},
        body: JSON.stringify({{ password: document.getElementById('password').value, redirect: redirectTarget }}),
    }});
    const data = await res.json();
    if (data.success) {{
        window.location.assign(data.redirect);
    }} else {{
        document.getElementById('password-error').hidden = false;
    }}
}});
</script>"#,
        title = html_escape(title),
        prompt = html_escape(text(locale, "password.prompt")),
        submit = html_escape(text(locale, "password.submit")),
        error = html_escape(text(locale, "password.error")),
        redirect_json = redirect_json.replace("</", "<\\/"),
    );

    build_page(locale, title, "", &content)
}

// --- Helpers ---

fn text(locale: Locale, key: &str) -> &'static str {
    translations::lookup(locale, key).unwrap_or("")
}

fn nav(locale: Locale, current_path: &str) -> String {
    let links: String = Page::ALL
        .iter()
        .filter(|page| **page != Page::Home)
        .map(|page| {
            format!(
                r#"<a href="{href}">{label}</a>"#,
                href = routing::href(*page, locale, None),
                label = html_escape(text(locale, &format!("{}.title", page.key()))),
            )
        })
        .collect();

    let other = locale.other();
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("to", other.as_str())
        .append_pair("from", current_path)
        .finish();
    let switch = format!(
        r#"<a class="lang" href="/api/locale?{query}">{label}</a>"#,
        query = html_escape(&query),
        label = other.as_str().to_uppercase(),
    );

    format!(
        r#"<nav><a href="{home}">{site}</a>{links}{switch}</nav>"#,
        home = routing::href(Page::Home, locale, None),
        site = html_escape(text(locale, "site.name")),
    )
}

fn build_page(locale: Locale, title: &str, nav: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{locale}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="robots" content="noindex">
<title>{title} — {site}</title>
<link rel="stylesheet" href="/static/site.css">
</head>
<body>
<div class="header">{nav}</div>
{content}
</body>
</html>"#,
        title = html_escape(title),
        site = html_escape(text(locale, "site.name")),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
