//! Localized user-facing messages.
//!
//! Validation failures carry text the client shows verbatim, so the text is
//! resolved through a catalog keyed by message key + locale, with `{0}`-style
//! argument interpolation and an explicit caller-supplied fallback. The
//! resolver is a plain value with no global or static locale state; callers
//! pass the locale they answer in.

/// Supported message locales. The source bundle is Korean-first with an
/// English fallback catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ko,
    En,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Ko
    }
}

/// Well-known message keys.
pub mod keys {
    pub const BELOW_MIN_MY_PRICE: &str = "below.min.my.price";
    pub const NOT_FOUND_PRODUCT: &str = "not.found.product";
    pub const NOT_FOUND_FOLDER: &str = "not.found.folder";
    pub const NOT_YOUR_PRODUCT_OR_FOLDER: &str = "not.your.product.or.folder";
    pub const DUPLICATED_FOLDER: &str = "duplicated.folder";
    pub const DUPLICATED_FOLDER_NAME: &str = "duplicated.folder.name";
}

/// Catalog-backed message resolver.
#[derive(Debug, Clone, Default)]
pub struct MessageResolver;

impl MessageResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `key` for `locale`, interpolating `{0}`, `{1}`, ... with
    /// `args`. Falls back to `default_text` when the key has no entry.
    pub fn resolve(&self, key: &str, args: &[&str], default_text: &str, locale: Locale) -> String {
        let template = Self::lookup(key, locale).unwrap_or(default_text);
        interpolate(template, args)
    }

    fn lookup(key: &str, locale: Locale) -> Option<&'static str> {
        use keys::*;
        let entry = match (key, locale) {
            (BELOW_MIN_MY_PRICE, Locale::Ko) => "최소 {0}원 이상으로 설정해 주세요.",
            (BELOW_MIN_MY_PRICE, Locale::En) => "The target price must be at least {0}.",
            (NOT_FOUND_PRODUCT, Locale::Ko) => "해당 상품이 존재하지 않습니다.",
            (NOT_FOUND_PRODUCT, Locale::En) => "The requested product was not found.",
            (NOT_FOUND_FOLDER, Locale::Ko) => "해당 폴더가 존재하지 않습니다.",
            (NOT_FOUND_FOLDER, Locale::En) => "The requested folder was not found.",
            (NOT_YOUR_PRODUCT_OR_FOLDER, Locale::Ko) => {
                "회원님의 관심 상품이 아니거나, 회원님의 폴더가 아닙니다."
            }
            (NOT_YOUR_PRODUCT_OR_FOLDER, Locale::En) => {
                "The product or the folder does not belong to you."
            }
            (DUPLICATED_FOLDER, Locale::Ko) => "중복된 폴더입니다.",
            (DUPLICATED_FOLDER, Locale::En) => "The product is already in that folder.",
            (DUPLICATED_FOLDER_NAME, Locale::Ko) => "중복된 폴더명입니다.",
            (DUPLICATED_FOLDER_NAME, Locale::En) => "A folder with that name already exists.",
            _ => return None,
        };
        Some(entry)
    }
}

fn interpolate(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), arg);
    }
    out
}
