//! Department Territory Reference
//! Total land area of each department, keyed by department name.

use log::warn;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use std::collections::BTreeMap;

/// Land area (ha) per department.
const PERU_DEPARTMENTS_HA: [(&str, f64); 25] = [
    ("AMAZONAS", 3_924_913.0),
    ("ANCASH", 3_591_481.0),
    ("APURIMAC", 2_089_579.0),
    ("AREQUIPA", 6_334_500.0),
    ("AYACUCHO", 4_381_480.0),
    ("CAJAMARCA", 3_331_754.0),
    ("CALLAO", 14_698.0),
    ("CUSCO", 7_198_650.0),
    ("HUANCAVELICA", 2_213_100.0),
    ("HUANUCO", 3_684_885.0),
    ("ICA", 2_132_783.0),
    ("JUNIN", 4_419_723.0),
    ("LA LIBERTAD", 2_549_990.0),
    ("LAMBAYEQUE", 1_423_130.0),
    ("LIMA", 3_480_159.0),
    ("LORETO", 36_885_195.0),
    ("MADRE DE DIOS", 8_530_054.0),
    ("MOQUEGUA", 1_570_000.0),
    ("PASCO", 2_531_959.0),
    ("PIURA", 3_589_249.0),
    ("PUNO", 7_199_900.0),
    ("SAN MARTIN", 5_125_331.0),
    ("TACNA", 1_607_600.0),
    ("TUMBES", 466_920.0),
    ("UCAYALI", 10_241_055.0),
];

/// Historical positional list for the territory-share view, meant to line
/// up with departments sorted ascending by protected surface.
pub const LEGACY_BY_PROTECTED_SURFACE: [f64; 22] = [
    1_570_000.0, 466_920.0, 4_381_480.0, 1_423_130.0, 7_199_900.0, 2_549_990.0,
    3_331_754.0, 3_589_249.0, 4_419_723.0, 466_920.0, 3_924_913.0, 3_480_159.0,
    2_531_959.0, 3_591_481.0, 2_132_783.0, 3_684_885.0, 2_089_579.0, 7_198_650.0,
    10_241_055.0, 5_125_331.0, 36_885_195.0, 8_530_054.0,
];

/// Historical positional list for the performance view, meant to line up
/// with departments sorted alphabetically.
pub const LEGACY_ALPHABETICAL: [f64; 23] = [
    1_570_000.0, 2_089_579.0, 466_920.0, 4_381_480.0, 1_423_130.0, 7_199_900.0,
    2_549_990.0, 3_331_754.0, 3_589_249.0, 4_419_723.0, 466_920.0, 3_924_913.0,
    3_480_159.0, 2_531_959.0, 3_591_481.0, 2_132_783.0, 3_684_885.0, 2_089_579.0,
    7_198_650.0, 10_241_055.0, 5_125_331.0, 36_885_195.0, 8_530_054.0,
];

/// Two areas closer than this are treated as the same value.
const AREA_TOLERANCE_HA: f64 = 0.5;

/// Disagreement between a positional list and the keyed reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceMismatch {
    pub position: usize,
    /// Department at this position, `None` when the list is longer.
    pub department: Option<String>,
    /// Keyed area for the department, `None` when unknown or absent.
    pub keyed_ha: Option<f64>,
    /// Positional area, `None` when the list is shorter.
    pub positional_ha: Option<f64>,
}

impl std::fmt::Display for ReferenceMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let show = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.0}", v));
        write!(
            f,
            "#{} {}: keyed {} ha, positional {} ha",
            self.position,
            self.department.as_deref().unwrap_or("(none)"),
            show(self.keyed_ha),
            show(self.positional_ha)
        )
    }
}

/// Normalize a department name for lookup: trimmed, uppercase, accents
/// removed and inner whitespace collapsed.
///
/// Accents are stripped after NFD decomposition, so precomposed (`Í`) and
/// decomposed (`I` + U+0301) spellings map to the same key.
pub fn normalize_department(name: &str) -> String {
    let folded: String = name.nfd().filter(|c| !is_combining_mark(*c)).collect();
    folded
        .split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Department name → total land area (ha).
#[derive(Debug, Clone)]
pub struct TerritoryReference {
    areas: BTreeMap<String, f64>,
}

impl Default for TerritoryReference {
    fn default() -> Self {
        Self::peru()
    }
}

impl TerritoryReference {
    /// Reference areas for Peru's departments.
    pub fn peru() -> Self {
        Self::from_pairs(PERU_DEPARTMENTS_HA.iter().map(|(name, ha)| (*name, *ha)))
    }

    /// Build a reference from arbitrary (department, area) pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let areas = pairs
            .into_iter()
            .map(|(name, ha)| (normalize_department(name), ha))
            .collect();
        Self { areas }
    }

    /// Land area of a department, matched case- and accent-insensitively.
    pub fn area_of(&self, department: &str) -> Option<f64> {
        self.areas.get(&normalize_department(department)).copied()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Compare a positional list against this reference.
    ///
    /// `departments` is the ordering the list was supposed to follow. Every
    /// position where the two disagree is returned; lengths that differ
    /// produce one entry per unmatched position.
    pub fn audit_positional(
        &self,
        departments: &[String],
        positional: &[f64],
    ) -> Vec<ReferenceMismatch> {
        let len = departments.len().max(positional.len());
        let mut mismatches = Vec::new();

        for position in 0..len {
            let department = departments.get(position).cloned();
            let keyed_ha = department.as_deref().and_then(|d| self.area_of(d));
            let positional_ha = positional.get(position).copied();

            let agrees = match (keyed_ha, positional_ha) {
                (Some(k), Some(p)) => (k - p).abs() < AREA_TOLERANCE_HA,
                _ => false,
            };

            if !agrees {
                mismatches.push(ReferenceMismatch {
                    position,
                    department,
                    keyed_ha,
                    positional_ha,
                });
            }
        }

        if !mismatches.is_empty() {
            warn!(
                "Positional territory list disagrees with keyed reference at {} of {} positions",
                mismatches.len(),
                len
            );
            for mismatch in &mismatches {
                warn!("  {}", mismatch);
            }
        }

        mismatches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents_and_case() {
        assert_eq!(normalize_department("  Junín "), "JUNIN");
        assert_eq!(normalize_department("madre  de   dios"), "MADRE DE DIOS");
        assert_eq!(normalize_department("Apurímac"), "APURIMAC");
        assert_eq!(normalize_department("San Martín"), "SAN MARTIN");
    }

    #[test]
    fn test_decomposed_accents_match_precomposed() {
        assert_eq!(normalize_department("JUNI\u{301}N"), "JUNIN");
        assert_eq!(normalize_department("Apuri\u{301}mac"), "APURIMAC");

        let reference = TerritoryReference::peru();
        assert_eq!(reference.area_of("JUNI\u{301}N"), reference.area_of("Junín"));
        assert_eq!(reference.area_of("Huánuco"), Some(3_684_885.0));
    }

    #[test]
    fn test_lookup_by_name_not_position() {
        let reference = TerritoryReference::peru();
        assert_eq!(reference.len(), 25);
        assert_eq!(reference.area_of("Loreto"), Some(36_885_195.0));
        assert_eq!(reference.area_of("HUÁNUCO"), Some(3_684_885.0));
        assert_eq!(reference.area_of("Atlantis"), None);
    }

    #[test]
    fn test_audit_reports_each_disagreeing_position() {
        let reference = TerritoryReference::from_pairs([("LIMA", 10.0), ("ICA", 20.0)]);
        let order = vec!["ICA".to_string(), "LIMA".to_string()];

        assert!(reference.audit_positional(&order, &[20.0, 10.0]).is_empty());

        let swapped = reference.audit_positional(&order, &[10.0, 20.0]);
        assert_eq!(swapped.len(), 2);
        assert_eq!(swapped[0].department.as_deref(), Some("ICA"));
        assert_eq!(swapped[0].keyed_ha, Some(20.0));
        assert_eq!(swapped[0].positional_ha, Some(10.0));
    }

    #[test]
    fn test_audit_flags_length_differences() {
        let reference = TerritoryReference::from_pairs([("LIMA", 10.0)]);
        let order = vec!["LIMA".to_string()];

        let longer = reference.audit_positional(&order, &[10.0, 99.0]);
        assert_eq!(longer.len(), 1);
        assert_eq!(longer[0].position, 1);
        assert_eq!(longer[0].department, None);

        let shorter = reference.audit_positional(&order, &[]);
        assert_eq!(shorter.len(), 1);
        assert_eq!(shorter[0].positional_ha, None);
    }
}
