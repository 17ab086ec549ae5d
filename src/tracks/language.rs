//! Emoji flags for track language codes.

/// ISO 639-1 and 639-2 (B and T) codes mapped to an ISO 3166 alpha-2 country
#[rustfmt::skip]
const LANGUAGE_COUNTRIES: &[(&str, &str)] = &[
    ("en", "GB"), ("eng", "GB"),
    ("es", "ES"), ("spa", "ES"),
    ("de", "DE"), ("deu", "DE"), ("ger", "DE"),
    ("fr", "FR"), ("fra", "FR"), ("fre", "FR"),
    ("it", "IT"), ("ita", "IT"),
    ("pt", "PT"), ("por", "PT"),
    ("ru", "RU"), ("rus", "RU"),
    ("ja", "JP"), ("jpn", "JP"),
    ("zh", "CN"), ("zho", "CN"), ("chi", "CN"),
    ("fa", "IR"), ("fas", "IR"), ("per", "IR"),
    ("ar", "SA"), ("ara", "SA"),
    ("nl", "NL"), ("nld", "NL"), ("dut", "NL"),
    ("pl", "PL"), ("pol", "PL"),
    ("tr", "TR"), ("tur", "TR"),
    ("ko", "KR"), ("kor", "KR"),
    ("hi", "IN"), ("hin", "IN"),
    ("vi", "VN"), ("vie", "VN"),
    ("sv", "SE"), ("swe", "SE"),
    ("el", "GR"), ("ell", "GR"), ("gre", "GR"),
    ("he", "IL"), ("heb", "IL"),
    ("th", "TH"), ("tha", "TH"),
    ("da", "DK"), ("dan", "DK"),
    ("fi", "FI"), ("fin", "FI"),
    ("hu", "HU"), ("hun", "HU"),
    ("no", "NO"), ("nor", "NO"),
    ("ro", "RO"), ("ron", "RO"), ("rum", "RO"),
    ("bg", "BG"), ("bul", "BG"),
    ("cs", "CZ"), ("ces", "CZ"), ("cze", "CZ"),
    ("sk", "SK"), ("slk", "SK"), ("slo", "SK"),
    ("hr", "HR"), ("hrv", "HR"),
    ("uk", "UA"), ("ukr", "UA"),
    ("id", "ID"), ("ind", "ID"),
    ("ms", "MY"), ("msa", "MY"), ("may", "MY"),
    ("tl", "PH"), ("tgl", "PH"),
];

/// Emoji flag for a language code such as `eng`, `pt` or `pt-BR`.
/// Unknown codes give an empty string.
pub fn lang_to_flag(language: &str) -> String {
    let language = language.to_ascii_lowercase();
    if language.is_empty() {
        return String::new();
    }

    let country = LANGUAGE_COUNTRIES
        .iter()
        .find(|(code, _)| *code == language)
        .map(|(_, country)| country.to_string())
        .or_else(|| {
            let (_, region) = language.split_once(['-', '_'])?;
            (region.len() == 2).then(|| region.to_ascii_uppercase())
        });

    country.map(|c| country_flag(&c)).unwrap_or_default()
}

/// Regional indicator pair for a two-letter country code
fn country_flag(country: &str) -> String {
    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
        return String::new();
    }
    country
        .to_ascii_uppercase()
        .chars()
        .filter_map(|c| char::from_u32(0x1F1E6 + (c as u32 - 'A' as u32)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(lang_to_flag("eng"), "🇬🇧");
        assert_eq!(lang_to_flag("JPN"), "🇯🇵");
        assert_eq!(lang_to_flag("ger"), "🇩🇪");
    }

    #[test]
    fn test_region_suffix() {
        assert_eq!(lang_to_flag("pt-BR"), "🇧🇷");
        assert_eq!(lang_to_flag("en_US"), "🇺🇸");
    }

    #[test]
    fn test_unknown_codes_are_empty() {
        assert_eq!(lang_to_flag("und"), "");
        assert_eq!(lang_to_flag(""), "");
        assert_eq!(lang_to_flag("xx-1"), "");
    }
}
