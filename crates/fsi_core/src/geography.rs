/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Fixed lookup tables for geography and speaker demographics.

/// Continent label used when no region maps.
pub const UNKNOWN_CONTINENT: &str = "Unknown";

/// Native-speaker share assumed for languages missing from [`native_ratio`].
pub const DEFAULT_NATIVE_RATIO: f64 = 0.8;

/// Continent for a country or region name (exact, case-insensitive).
pub fn continent_of(country: &str) -> Option<&'static str> {
    let country = country.trim();
    COUNTRY_CONTINENTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(country))
        .map(|(_, continent)| *continent)
}

/// Continents for an ordered list of regions, de-duplicated in first-seen
/// order. Unmapped regions are dropped; if nothing maps the result is
/// `["Unknown"]`.
pub fn infer_continents(regions: &[String]) -> Vec<String> {
    let mut continents: Vec<String> = Vec::new();
    for continent in regions.iter().filter_map(|r| continent_of(r)) {
        if !continents.iter().any(|c| c == continent) {
            continents.push(continent.to_string());
        }
    }
    if continents.is_empty() {
        continents.push(UNKNOWN_CONTINENT.to_string());
    }
    continents
}

/// Share of total speakers who speak the language natively.
pub fn native_ratio(language_id: &str) -> f64 {
    NATIVE_RATIOS
        .iter()
        .find(|(id, _)| *id == language_id)
        .map(|(_, ratio)| *ratio)
        .unwrap_or(DEFAULT_NATIVE_RATIO)
}

/// `total × native_ratio(id)`, rounded.
pub fn native_speakers(language_id: &str, total: u64) -> u64 {
    (total as f64 * native_ratio(language_id)).round() as u64
}

const NATIVE_RATIOS: &[(&str, f64)] = &[
    ("en", 0.25),
    ("es", 0.86),
    ("fr", 0.26),
    ("de", 0.71),
    ("it", 0.75),
    ("pt", 0.88),
    ("nl", 0.9),
    ("ru", 0.6),
    ("zh", 0.79),
    ("yue", 0.9),
    ("ja", 0.99),
    ("ko", 0.99),
    ("ar", 0.85),
    ("hi", 0.56),
    ("bn", 0.85),
    ("ur", 0.3),
    ("id", 0.22),
    ("ms", 0.25),
    ("sw", 0.2),
    ("tr", 0.9),
    ("vi", 0.95),
    ("fa", 0.7),
    ("pl", 0.95),
    ("uk", 0.9),
    ("th", 0.5),
    ("tl", 0.35),
];

const COUNTRY_CONTINENTS: &[(&str, &str)] = &[
    // Europe
    ("United Kingdom", "Europe"),
    ("Ireland", "Europe"),
    ("Spain", "Europe"),
    ("France", "Europe"),
    ("Belgium", "Europe"),
    ("Switzerland", "Europe"),
    ("Italy", "Europe"),
    ("San Marino", "Europe"),
    ("Portugal", "Europe"),
    ("Romania", "Europe"),
    ("Moldova", "Europe"),
    ("Netherlands", "Europe"),
    ("Sweden", "Europe"),
    ("Norway", "Europe"),
    ("Denmark", "Europe"),
    ("Finland", "Europe"),
    ("Estonia", "Europe"),
    ("Germany", "Europe"),
    ("Austria", "Europe"),
    ("Liechtenstein", "Europe"),
    ("Luxembourg", "Europe"),
    ("Russia", "Europe"),
    ("Belarus", "Europe"),
    ("Ukraine", "Europe"),
    ("Poland", "Europe"),
    ("Czech Republic", "Europe"),
    ("Slovakia", "Europe"),
    ("Hungary", "Europe"),
    ("Serbia", "Europe"),
    ("Greece", "Europe"),
    ("Cyprus", "Europe"),
    // Asia
    ("China", "Asia"),
    ("Taiwan", "Asia"),
    ("Hong Kong", "Asia"),
    ("Macau", "Asia"),
    ("Singapore", "Asia"),
    ("Japan", "Asia"),
    ("South Korea", "Asia"),
    ("North Korea", "Asia"),
    ("Mongolia", "Asia"),
    ("India", "Asia"),
    ("Nepal", "Asia"),
    ("Bangladesh", "Asia"),
    ("Pakistan", "Asia"),
    ("Afghanistan", "Asia"),
    ("Iran", "Asia"),
    ("Tajikistan", "Asia"),
    ("Kazakhstan", "Asia"),
    ("Kyrgyzstan", "Asia"),
    ("Turkey", "Asia"),
    ("Georgia", "Asia"),
    ("Israel", "Asia"),
    ("Saudi Arabia", "Asia"),
    ("Iraq", "Asia"),
    ("United Arab Emirates", "Asia"),
    ("Thailand", "Asia"),
    ("Vietnam", "Asia"),
    ("Indonesia", "Asia"),
    ("Malaysia", "Asia"),
    ("Brunei", "Asia"),
    ("Philippines", "Asia"),
    // Africa
    ("Egypt", "Africa"),
    ("Morocco", "Africa"),
    ("Algeria", "Africa"),
    ("Sudan", "Africa"),
    ("Senegal", "Africa"),
    ("Ivory Coast", "Africa"),
    ("Tanzania", "Africa"),
    ("Kenya", "Africa"),
    ("Uganda", "Africa"),
    ("Angola", "Africa"),
    ("Mozambique", "Africa"),
    ("South Africa", "Africa"),
    ("Namibia", "Africa"),
    // North America
    ("United States", "North America"),
    ("Canada", "North America"),
    ("Mexico", "North America"),
    ("Haiti", "North America"),
    ("Greenland", "North America"),
    // South America
    ("Colombia", "South America"),
    ("Argentina", "South America"),
    ("Peru", "South America"),
    ("Venezuela", "South America"),
    ("Chile", "South America"),
    ("Brazil", "South America"),
    ("Suriname", "South America"),
    // Oceania
    ("Australia", "Oceania"),
    ("New Zealand", "Oceania"),
    ("Fiji", "Oceania"),
];
