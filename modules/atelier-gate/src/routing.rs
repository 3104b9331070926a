//! Canonical localized page table, shared by the page renderer and the
//! language switcher.

use atelier_common::Locale;

use crate::locale::locale_prefix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    About,
    Services,
    Portfolio,
    News,
    Careers,
    Contact,
    Privacy,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Home,
        Page::About,
        Page::Services,
        Page::Portfolio,
        Page::News,
        Page::Careers,
        Page::Contact,
        Page::Privacy,
    ];

    /// Path segment after the locale prefix. Empty for the home page.
    pub fn segment(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Page::Home, _) => "",
            (Page::About, Locale::En) => "about",
            (Page::About, Locale::Fr) => "a-propos",
            (Page::Services, _) => "services",
            (Page::Portfolio, _) => "portfolio",
            (Page::News, Locale::En) => "news",
            (Page::News, Locale::Fr) => "nouvelles",
            (Page::Careers, Locale::En) => "careers",
            (Page::Careers, Locale::Fr) => "carrieres",
            (Page::Contact, _) => "contact",
            (Page::Privacy, Locale::En) => "privacy",
            (Page::Privacy, Locale::Fr) => "confidentialite",
        }
    }

    /// Prefix for this page's keys in the translation table.
    pub fn key(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Services => "services",
            Page::Portfolio => "portfolio",
            Page::News => "news",
            Page::Careers => "careers",
            Page::Contact => "contact",
            Page::Privacy => "privacy",
        }
    }

    /// Portfolio projects and news articles have detail pages.
    pub fn accepts_slug(&self) -> bool {
        matches!(self, Page::Portfolio | Page::News)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMatch {
    pub locale: Locale,
    pub page: Page,
    pub slug: Option<String>,
}

/// Localized URL for a page.
pub fn href(page: Page, locale: Locale, slug: Option<&str>) -> String {
    let mut path = format!("/{locale}");
    let segment = page.segment(locale);
    if !segment.is_empty() {
        path.push('/');
        path.push_str(segment);
    }
    if let Some(slug) = slug.filter(|_| page.accepts_slug()) {
        path.push('/');
        path.push_str(slug);
    }
    path
}

/// Map a locale-prefixed path back to a page.
pub fn match_path(path: &str) -> Option<PageMatch> {
    let locale = locale_prefix(path)?;
    let rest = path
        .trim_start_matches('/')
        .strip_prefix(locale.as_str())
        .unwrap_or("");
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

    let (page, slug) = match segments.as_slice() {
        [] => (Page::Home, None),
        [segment] => (find_page(locale, segment)?, None),
        [segment, slug] => {
            let page = find_page(locale, segment)?;
            if !page.accepts_slug() {
                return None;
            }
            (page, Some(slug.to_string()))
        }
        _ => return None,
    };

    Some(PageMatch { locale, page, slug })
}

/// The equivalent of `path` in another locale, or that locale's home page
/// when the path is not a known page.
pub fn switch_locale(path: &str, to: Locale) -> String {
    match match_path(path) {
        Some(m) => href(m.page, to, m.slug.as_deref()),
        None => format!("/{to}"),
    }
}

fn find_page(locale: Locale, segment: &str) -> Option<Page> {
    Page::ALL
        .into_iter()
        .find(|page| *page != Page::Home && page.segment(locale) == segment)
}
