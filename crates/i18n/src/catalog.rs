//! Static translation catalogs.
//!
//! Catalogs are loaded once at process start and immutable thereafter.
//! The fallback language is always present; lookups degrade key-by-key to
//! the fallback catalog and finally to the raw key, never failing.

use std::collections::HashMap;

/// Fallback language, always present in every catalog.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Built-in shell strings (English).
const SHELL_EN: &[(&str, &str)] = &[
    (
        "auth.session_expired",
        "Your session has expired. Please log in again.",
    ),
    (
        "auth.forbidden",
        "You do not have permission to view this page.",
    ),
    (
        "admin.moved_notice",
        "The admin console has moved to the workspace. Redirecting...",
    ),
    ("nav.workspace", "Workspace"),
    ("nav.dashboard", "Dashboard"),
];

/// Built-in shell strings (Spanish).
const SHELL_ES: &[(&str, &str)] = &[
    (
        "auth.session_expired",
        "Tu sesión ha expirado. Inicia sesión de nuevo.",
    ),
    (
        "auth.forbidden",
        "No tienes permiso para ver esta página.",
    ),
    (
        "admin.moved_notice",
        "La consola de administración se ha movido al espacio de trabajo. Redirigiendo...",
    ),
    ("nav.workspace", "Espacio de trabajo"),
    ("nav.dashboard", "Panel"),
];

/// Built-in shell strings (Arabic).
const SHELL_AR: &[(&str, &str)] = &[
    (
        "auth.session_expired",
        "انتهت صلاحية جلستك. يرجى تسجيل الدخول مرة أخرى.",
    ),
    (
        "auth.forbidden",
        "ليس لديك إذن لعرض هذه الصفحة.",
    ),
    (
        "admin.moved_notice",
        "تم نقل وحدة الإدارة إلى مساحة العمل. جارٍ إعادة التوجيه...",
    ),
    ("nav.workspace", "مساحة العمل"),
    ("nav.dashboard", "لوحة التحكم"),
];

/// Immutable language → message-key → localized-string mapping.
#[derive(Debug, Clone)]
pub struct TranslationCatalog {
    bundles: HashMap<String, HashMap<String, String>>,
}

impl TranslationCatalog {
    /// Catalog of the built-in shell strings (`en`, `es`, `ar`).
    pub fn builtin() -> Self {
        Self::empty()
            .with_bundle("en", owned(SHELL_EN))
            .with_bundle("es", owned(SHELL_ES))
            .with_bundle("ar", owned(SHELL_AR))
    }

    /// Catalog with only an (empty) fallback bundle.
    pub fn empty() -> Self {
        let mut bundles = HashMap::new();
        bundles.insert(FALLBACK_LANGUAGE.to_string(), HashMap::new());
        Self { bundles }
    }

    /// Add or extend a language bundle (build-time extension point for
    /// hosts shipping their own strings).
    pub fn with_bundle(
        mut self,
        lang: &str,
        entries: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let bundle = self.bundles.entry(lang.to_ascii_lowercase()).or_default();
        bundle.extend(entries);
        self
    }

    pub fn has_language(&self, lang: &str) -> bool {
        self.bundles.contains_key(&lang.to_ascii_lowercase())
    }

    /// Supported language codes, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.bundles.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// `key` in `lang`, else in the fallback language, else the raw key.
    pub fn translate(&self, key: &str, lang: &str) -> String {
        self.lookup(lang, key)
            .or_else(|| self.lookup(FALLBACK_LANGUAGE, key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.bundles
            .get(&lang.to_ascii_lowercase())?
            .get(key)
            .map(String::as_str)
    }
}

impl Default for TranslationCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn owned<'a>(entries: &'a [(&'a str, &'a str)]) -> impl Iterator<Item = (String, String)> + 'a {
    entries
        .iter()
        .map(|(key, message)| (key.to_string(), message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_in_the_requested_language() {
        let catalog = TranslationCatalog::builtin();
        assert_eq!(
            catalog.translate("nav.workspace", "es"),
            "Espacio de trabajo"
        );
    }

    #[test]
    fn unknown_language_falls_back_to_english() {
        let catalog = TranslationCatalog::builtin();
        assert_eq!(catalog.translate("nav.workspace", "fr"), "Workspace");
    }

    #[test]
    fn key_missing_in_bundle_falls_back_to_english() {
        let catalog = TranslationCatalog::builtin()
            .with_bundle("de", [("nav.workspace".to_string(), "Arbeitsbereich".to_string())]);

        // Present in de.
        assert_eq!(catalog.translate("nav.workspace", "de"), "Arbeitsbereich");
        // Absent in de, present in en.
        assert_eq!(catalog.translate("nav.dashboard", "de"), "Dashboard");
    }

    #[test]
    fn key_missing_everywhere_returns_the_raw_key() {
        let catalog = TranslationCatalog::builtin();
        assert_eq!(catalog.translate("no.such.key", "es"), "no.such.key");
    }

    #[test]
    fn fallback_bundle_is_always_present() {
        let catalog = TranslationCatalog::empty();
        assert!(catalog.has_language(FALLBACK_LANGUAGE));
        assert_eq!(catalog.translate("anything", "zz"), "anything");
    }

    #[test]
    fn host_bundles_extend_builtin_ones() {
        let catalog = TranslationCatalog::builtin()
            .with_bundle("en", [("billing.title".to_string(), "Billing".to_string())]);

        assert_eq!(catalog.translate("billing.title", "en"), "Billing");
        assert_eq!(catalog.translate("nav.workspace", "en"), "Workspace");
    }
}
