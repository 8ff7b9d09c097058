/// Directional tokens, stripped in every pass.
const DIRECTIONALS: [&str; 16] = [
    "north", "south", "east", "west", "northeast", "northwest", "southeast", "southwest", "n",
    "s", "e", "w", "ne", "nw", "se", "sw",
];

/// Every street-type suffix recognized by the aggressive pass.
const ALL_SUFFIXES: [&str; 26] = [
    "street", "st", "avenue", "ave", "road", "rd", "drive", "dr", "lane", "ln", "boulevard",
    "blvd", "place", "pl", "court", "ct", "way", "square", "sq", "circle", "cir", "trail", "tr",
    "parkway", "pkwy", "bridge",
];

/// Only the most common generic suffixes, for the fallback pass.
const GENERIC_SUFFIXES: [&str; 10] = [
    "street", "st", "avenue", "ave", "road", "rd", "drive", "dr", "boulevard", "blvd",
];

/// Canonicalizes a street name into a matching key, so "N 45th St" and "45th Street" compare
/// equal.
///
/// The first pass strips directionals and every known street-type suffix. If that leaves nothing
/// (the name was only a directional and/or a suffix, like "North Street"), a second pass strips
/// only directionals and the generic suffixes. If that's still empty, the lower-cased original is
/// the key; names like "North" on its own stay matchable.
pub fn normalize_street_name(name: &str) -> String {
    let lower = name.to_lowercase();

    let aggressive = strip_tokens(&lower, &ALL_SUFFIXES);
    if !aggressive.is_empty() {
        return aggressive;
    }

    let gentle = strip_tokens(&lower, &GENERIC_SUFFIXES);
    if !gentle.is_empty() {
        return gentle;
    }

    lower.trim().to_string()
}

/// Splits on non-alphanumeric runs, drops directional and suffix tokens, rejoins with single
/// spaces.
fn strip_tokens(lower: &str, suffixes: &[&str]) -> String {
    lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .filter(|token| !DIRECTIONALS.contains(token) && !suffixes.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_directionals_and_suffixes() {
        assert_eq!(
            normalize_street_name("North Elm Street"),
            normalize_street_name("Elm St")
        );
        assert_eq!(normalize_street_name("E Broadway"), "broadway");
        assert_eq!(normalize_street_name("Martin Luther King Jr Way"), "martin luther king jr");
        assert_eq!(normalize_street_name("5th Avenue"), "5th");
    }

    #[test]
    fn punctuation_collapses() {
        assert_eq!(normalize_street_name("St.  Charles   Pl"), "charles");
        assert_eq!(normalize_street_name("A-B Road"), "a b");
    }

    #[test]
    fn fallback_tiers() {
        // The aggressive pass empties these; the gentle pass keeps the non-generic suffix.
        assert_eq!(normalize_street_name("West Square"), "square");
        assert_eq!(normalize_street_name("South Circle"), "circle");
        // Both passes empty; fall back to the lower-cased original.
        assert_eq!(normalize_street_name("North"), "north");
        assert_eq!(normalize_street_name("North Street"), "north street");
        assert_ne!(normalize_street_name("North"), "");
    }
}
