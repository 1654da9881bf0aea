// src/reference/mod.rs

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub mod groups;

pub use groups::GroupType;

/// Market code → output directory name.
static MARKET_NAMES: &[(&str, &str)] = &[
    ("AUT", "auto-loan"),     // Auto loans
    ("CRC", "credit-card"),   // Credit cards
    ("HCE", "hece"),          // Home equity, closed end
    ("HLC", "heloc"),         // Home equity line of credit
    ("MTG", "mortgage"),      // Mortgages
    ("PER", "personal-loan"), // Personal loans
    ("RET", "retail-loan"),   // Retail loans
    ("STU", "student-loan"),  // Student loans
];

/// Raw group labels rewritten to the agency's display text.
static TEXT_FIXES: &[(&str, &str)] = &[
    ("30 - 44", "Age 30-44"),
    ("45 - 64", "Age 45-64"),
    ("65 and older", "Age 65 and older"),
    ("Deep Subprime", "Deep subprime"),
    ("Near Prime", "Near-prime"),
    ("Superprime", "Super-prime"),
];

/// State FIPS codes (50 states + DC).
static FIPS_CODES: &[(u32, &str)] = &[
    (1, "AL"),
    (2, "AK"),
    (4, "AZ"),
    (5, "AR"),
    (6, "CA"),
    (8, "CO"),
    (9, "CT"),
    (10, "DE"),
    (11, "DC"),
    (12, "FL"),
    (13, "GA"),
    (15, "HI"),
    (16, "ID"),
    (17, "IL"),
    (18, "IN"),
    (19, "IA"),
    (20, "KS"),
    (21, "KY"),
    (22, "LA"),
    (23, "ME"),
    (24, "MD"),
    (25, "MA"),
    (26, "MI"),
    (27, "MN"),
    (28, "MS"),
    (29, "MO"),
    (30, "MT"),
    (31, "NE"),
    (32, "NV"),
    (33, "NH"),
    (34, "NJ"),
    (35, "NM"),
    (36, "NY"),
    (37, "NC"),
    (38, "ND"),
    (39, "OH"),
    (40, "OK"),
    (41, "OR"),
    (42, "PA"),
    (44, "RI"),
    (45, "SC"),
    (46, "SD"),
    (47, "TN"),
    (48, "TX"),
    (49, "UT"),
    (50, "VT"),
    (51, "VA"),
    (53, "WA"),
    (54, "WV"),
    (55, "WI"),
    (56, "WY"),
];

static FIPS_LOOKUP: Lazy<HashMap<u32, &'static str>> =
    Lazy::new(|| FIPS_CODES.iter().copied().collect());

static TEXT_FIX_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| TEXT_FIXES.iter().copied().collect());

/// Two-letter state abbreviation for a FIPS code.
pub fn state_abbr(fips: u32) -> Option<&'static str> {
    FIPS_LOOKUP.get(&fips).copied()
}

/// Directory name for a market code; codes are matched case-insensitively.
pub fn market_name(code: &str) -> Option<&'static str> {
    MARKET_NAMES
        .iter()
        .find(|(abbr, _)| abbr.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

/// All known market codes, in table order.
pub fn market_codes() -> impl Iterator<Item = &'static str> {
    MARKET_NAMES.iter().map(|(abbr, _)| *abbr)
}

/// Apply the display-text fixes to a group label.
///
/// Only exact matches are rewritten; anything else comes back unchanged.
pub fn display_label(label: &str) -> &str {
    TEXT_FIX_LOOKUP.get(label).copied().unwrap_or(label)
}
