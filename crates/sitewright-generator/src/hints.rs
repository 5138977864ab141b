//! Keyword rules that derive style hints from a prompt

use regex::Regex;
use sitewright_domain::StyleHints;
use std::sync::LazyLock;

/// One tag and the keywords that select it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRule {
    /// Tag reported when the rule matches
    pub tag: &'static str,
    /// Substrings looked for in the lower-cased prompt
    pub keywords: &'static [&'static str],
}

impl KeywordRule {
    /// Whether any keyword occurs in `text` (already lower-cased)
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

/// Industry rules, highest priority first
pub const INDUSTRY_RULES: &[KeywordRule] = &[
    KeywordRule { tag: "coffee", keywords: &["coffee", "cafe", "barista", "espresso"] },
    KeywordRule {
        tag: "tech",
        keywords: &["tech", "software", "app", "digital", "technology", "ai", "artificial intelligence", "coding"],
    },
    KeywordRule {
        tag: "fitness",
        keywords: &["fitness", "gym", "workout", "health", "exercise", "wellness", "training"],
    },
    KeywordRule {
        tag: "food",
        keywords: &["restaurant", "food", "bakery", "catering", "cuisine", "dining", "eatery"],
    },
    KeywordRule {
        tag: "education",
        keywords: &["school", "education", "training", "course", "learning", "teaching", "academy"],
    },
    KeywordRule {
        tag: "realestate",
        keywords: &["real estate", "property", "home", "apartment", "housing", "realtor", "broker"],
    },
    KeywordRule {
        tag: "art",
        keywords: &["art", "gallery", "creative", "design", "artist", "exhibition", "studio"],
    },
    KeywordRule {
        tag: "fashion",
        keywords: &["fashion", "clothing", "style", "apparel", "boutique", "designer", "wear"],
    },
    KeywordRule {
        tag: "travel",
        keywords: &["travel", "tourism", "vacation", "hotel", "adventure", "destination", "tour"],
    },
    KeywordRule {
        tag: "beauty",
        keywords: &["beauty", "salon", "spa", "cosmetics", "makeup", "skincare", "hairstyling"],
    },
];

/// Style rules, highest priority first
pub const STYLE_RULES: &[KeywordRule] = &[
    KeywordRule { tag: "modern", keywords: &["modern", "sleek", "contemporary", "current", "trendy"] },
    KeywordRule {
        tag: "minimal",
        keywords: &["minimal", "clean", "simple", "minimalist", "uncluttered", "zen"],
    },
    KeywordRule {
        tag: "playful",
        keywords: &["fun", "playful", "creative", "colorful", "vibrant", "cheerful"],
    },
    KeywordRule {
        tag: "luxury",
        keywords: &["luxury", "premium", "high-end", "elegant", "sophisticated", "exclusive"],
    },
    KeywordRule {
        tag: "retro",
        keywords: &["retro", "vintage", "classic", "nostalgic", "old-school", "throwback"],
    },
    KeywordRule {
        tag: "bold",
        keywords: &["bold", "striking", "dramatic", "vibrant", "eye-catching", "dynamic"],
    },
    KeywordRule { tag: "dark", keywords: &["dark", "black", "night", "moody", "gothic"] },
    KeywordRule { tag: "light", keywords: &["light", "bright", "white", "airy", "clean"] },
];

/// Colour names recognised as preferences
pub const COLOR_PALETTE: &[&str] = &[
    "red", "blue", "green", "yellow", "purple", "pink", "orange", "black", "white", "gray", "grey",
    "brown", "teal", "navy", "gold", "silver",
];

static COLOR_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:color|colours?|theme)s?:?\s*([a-z\s,]+)")
        .unwrap_or_else(|err| panic!("colour phrase regex: {err}"))
});

static COLOR_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[,\s]+").unwrap_or_else(|err| panic!("colour separator regex: {err}"))
});

fn first_match(rules: &[KeywordRule], text: &str) -> Option<String> {
    rules
        .iter()
        .find(|rule| rule.matches(text))
        .map(|rule| rule.tag.to_string())
}

fn color_preferences(text: &str) -> Option<Vec<String>> {
    let phrase = COLOR_PHRASE.captures(text)?.get(1)?.as_str();

    let colors: Vec<String> = COLOR_SEPARATOR
        .split(phrase)
        .filter(|token| COLOR_PALETTE.contains(token))
        .map(str::to_string)
        .collect();

    (!colors.is_empty()).then_some(colors)
}

/// Derive style hints from a prompt
///
/// Matching is case-insensitive substring search. For each rule table the
/// first rule in declaration order wins; later matches are ignored.
///
/// # Examples
///
/// ```
/// use sitewright_generator::extract_hints;
///
/// let hints = extract_hints("A modern coffee shop, colors: brown and gold");
/// assert_eq!(hints.industry.as_deref(), Some("coffee"));
/// assert_eq!(hints.style.as_deref(), Some("modern"));
/// assert_eq!(hints.color_preferences, Some(vec!["brown".to_string(), "gold".to_string()]));
/// ```
pub fn extract_hints(prompt: &str) -> StyleHints {
    let text = prompt.to_lowercase();

    StyleHints {
        industry: first_match(INDUSTRY_RULES, &text),
        style: first_match(STYLE_RULES, &text),
        color_preferences: color_preferences(&text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_industry_keyword() {
        assert_eq!(extract_hints("We run a small BAKERY").industry.as_deref(), Some("food"));
        assert_eq!(extract_hints("Boutique for kids").industry.as_deref(), Some("fashion"));
        assert_eq!(extract_hints("Day spa and salon").industry.as_deref(), Some("beauty"));
    }

    #[test]
    fn test_earlier_rule_wins() {
        // "espresso" is coffee, "software" is tech; coffee is declared first
        let hints = extract_hints("Software for espresso machines");
        assert_eq!(hints.industry.as_deref(), Some("coffee"));

        // "gym" is fitness, "school" is education
        let hints = extract_hints("Gym classes at a school");
        assert_eq!(hints.industry.as_deref(), Some("fitness"));
    }

    #[test]
    fn test_style_detection() {
        assert_eq!(extract_hints("sleek landing page").style.as_deref(), Some("modern"));
        assert_eq!(extract_hints("a vintage record store").style.as_deref(), Some("retro"));
        // "vibrant" is listed under playful and bold; playful comes first
        assert_eq!(extract_hints("vibrant flower shop").style.as_deref(), Some("playful"));
    }

    #[test]
    fn test_no_match_is_empty() {
        let hints = extract_hints("zzz qqq");
        assert!(hints.is_empty());
        assert_eq!(hints, StyleHints::default());
    }

    #[test]
    fn test_color_preferences_filtered_to_palette() {
        let hints = extract_hints("Colours: Teal, mauve and NAVY please");
        assert_eq!(
            hints.color_preferences,
            Some(vec!["teal".to_string(), "navy".to_string()])
        );
    }

    #[test]
    fn test_theme_phrase_without_colon() {
        let hints = extract_hints("theme red white");
        assert_eq!(
            hints.color_preferences,
            Some(vec!["red".to_string(), "white".to_string()])
        );
    }

    #[test]
    fn test_unknown_colors_dropped() {
        assert!(extract_hints("color: chartreuse").color_preferences.is_none());
        assert!(extract_hints("red and blue, no phrase").color_preferences.is_none());
    }
}
