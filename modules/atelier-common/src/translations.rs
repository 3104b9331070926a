//! Static strings used when the CMS has no content for a page.

use crate::locale::Locale;

pub fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    let text = match (key, locale) {
        ("site.name", _) => "Atelier",

        ("home.title", Locale::En) => "Architecture & Interiors",
        ("home.title", Locale::Fr) => "Architecture et design intérieur",
        ("home.tagline", Locale::En) => "Buildings shaped around the people who use them.",
        ("home.tagline", Locale::Fr) => "Des bâtiments pensés pour ceux qui les habitent.",

        ("about.title", Locale::En) => "About",
        ("about.title", Locale::Fr) => "À propos",
        ("about.tagline", Locale::En) => "A studio of architects, designers and builders.",
        ("about.tagline", Locale::Fr) => "Un studio d'architectes, de designers et de bâtisseurs.",

        ("services.title", Locale::En) => "Services",
        ("services.title", Locale::Fr) => "Services",
        ("services.tagline", Locale::En) => "From feasibility studies to site supervision.",
        ("services.tagline", Locale::Fr) => "De l'étude de faisabilité à la surveillance de chantier.",

        ("portfolio.title", Locale::En) => "Portfolio",
        ("portfolio.title", Locale::Fr) => "Réalisations",
        ("portfolio.tagline", Locale::En) => "Selected projects.",
        ("portfolio.tagline", Locale::Fr) => "Projets choisis.",

        ("news.title", Locale::En) => "News",
        ("news.title", Locale::Fr) => "Nouvelles",
        ("news.tagline", Locale::En) => "Studio news and press.",
        ("news.tagline", Locale::Fr) => "Actualités du studio et revue de presse.",

        ("careers.title", Locale::En) => "Careers",
        ("careers.title", Locale::Fr) => "Carrières",
        ("careers.tagline", Locale::En) => "Join the team.",
        ("careers.tagline", Locale::Fr) => "Joignez-vous à l'équipe.",

        ("contact.title", Locale::En) => "Contact",
        ("contact.title", Locale::Fr) => "Contact",
        ("contact.tagline", Locale::En) => "Tell us about your project.",
        ("contact.tagline", Locale::Fr) => "Parlez-nous de votre projet.",

        ("privacy.title", Locale::En) => "Privacy Policy",
        ("privacy.title", Locale::Fr) => "Politique de confidentialité",
        ("privacy.tagline", Locale::En) => "How we handle your information.",
        ("privacy.tagline", Locale::Fr) => "Comment nous traitons vos renseignements.",

        ("password.title", Locale::En) => "Private preview",
        ("password.title", Locale::Fr) => "Aperçu privé",
        ("password.prompt", Locale::En) => "Enter the password to view the site.",
        ("password.prompt", Locale::Fr) => "Entrez le mot de passe pour accéder au site.",
        ("password.submit", Locale::En) => "Enter",
        ("password.submit", Locale::Fr) => "Entrer",
        ("password.error", Locale::En) => "Incorrect password.",
        ("password.error", Locale::Fr) => "Mot de passe incorrect.",

        ("not_found.title", Locale::En) => "Page not found",
        ("not_found.title", Locale::Fr) => "Page introuvable",

        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_both_languages() {
        let keys = [
            "site.name",
            "home.title",
            "about.title",
            "services.title",
            "portfolio.title",
            "news.title",
            "careers.title",
            "contact.title",
            "privacy.title",
            "password.title",
            "password.prompt",
            "password.submit",
            "password.error",
            "not_found.title",
        ];
        for key in keys {
            for locale in Locale::ALL {
                assert!(lookup(locale, key).is_some(), "missing {key} for {locale}");
            }
        }
    }

    #[test]
    fn unknown_key_is_none() {
        assert_eq!(lookup(Locale::En, "nope"), None);
    }
}
