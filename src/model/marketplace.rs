//! Marketplace catalog for the marketplace selector

/// A marketplace the account can report on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marketplace {
    /// Persisted key, e.g. "us"
    pub code: &'static str,
    pub label: &'static str,
}

/// Marketplaces currently supported by the platform
pub const MARKETPLACES: &[Marketplace] = &[
    Marketplace { code: "us", label: "United States" },
    Marketplace { code: "mx", label: "Mexico" },
    Marketplace { code: "uk", label: "United Kingdom" },
    Marketplace { code: "ca", label: "Canada" },
    Marketplace { code: "de", label: "Germany" },
];

pub fn find(code: &str) -> Option<Marketplace> {
    MARKETPLACES.iter().copied().find(|m| m.code == code)
}

/// Case-insensitive substring filter over code and label
pub fn search(query: &str) -> Vec<Marketplace> {
    let query = query.to_lowercase();
    MARKETPLACES
        .iter()
        .copied()
        .filter(|m| m.code.contains(&query) || m.label.to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_code() {
        assert_eq!(find("uk").unwrap().label, "United Kingdom");
        assert!(find("jp").is_none());
    }

    #[test]
    fn test_search_matches_label_case_insensitively() {
        let hits = search("united");
        assert_eq!(hits.len(), 2);

        let hits = search("MEX");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "mx");

        assert_eq!(search("").len(), MARKETPLACES.len());
    }
}
