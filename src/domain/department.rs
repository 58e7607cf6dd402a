//! The fixed catalog of department codes.
//!
//! Free text is matched against this vocabulary in two ways: an exact,
//! whitespace-normalised lookup ([`Registry::match_known`]) and a greedy
//! longest-first prefix match ([`Registry::longest_prefix_of`]).

use std::{fmt, sync::LazyLock};

use serde::Serialize;

const DEPARTMENT_CODES: &[&str] = &[
    "A&O SCI", "AERO ST", "AF AMER", "AF LANG", "AFRC ST", "AM IND", "AN N EA", "ANES", "ANTHRO",
    "APP CHEM", "APPLING", "ARABIC", "ARCH&UD", "ARCHEOL", "ARMENIA", "ART", "ART HIS", "ART&ARC",
    "ARTS ED", "ASIA AM", "ASIAN", "ASL", "ASTR", "BIOENGR", "BIOINFO", "BIOINFR", "BIOL CH",
    "BIOMATH", "BIOSTAT", "BMD RES", "BULGR", "C&EE", "C&EE ST", "C&S BIO", "CCAS", "CESC",
    "CH ENGR", "CHEM", "CHICANO", "CHIN", "CIVIC", "CLASSIC", "CLT HTG", "CLUSTER", "COM HLT",
    "COM LIT", "COM SCI", "COMM", "COMM ST", "COMPTNG", "CZCH", "DANCE", "DENT", "DESMA", "DGT HUM",
    "DIS STD", "DS BMED", "DUTCH", "EA STDS", "EC ENGR", "ECON", "EDUC", "EE BIOL", "EL ENGR",
    "ELTS", "ENGCOMP", "ENGL", "ENGR", "ENV HLT", "ENVIRON", "EPIDEM", "EPS SCI", "ESL", "ETHNMUS",
    "ETHNOMU", "FAM MED", "FIAT LX", "FILIPNO", "FILM TV", "FOOD ST", "FRNCH", "GE CLST", "GENDER",
    "GEOG", "GERMAN", "GJ STDS", "GLB HLT", "GLBL ST", "GRAD PD", "GREEK", "GRNTLGY", "HEBREW",
    "HIN-URD", "HIST", "HLT ADM", "HLT POL", "HNGAR", "HNRS", "HUM GEN", "I A STD", "I E STD",
    "I M STD", "IEP", "IL AMER", "INDO", "INF STD", "INTL DV", "IRANIAN", "ISLM ST", "ITALIAN",
    "JAPAN", "JEWISH", "KOREA", "LATIN", "LATN AM", "LAW", "LBR STD", "LBR&WS", "LGBTQS", "LGBTS",
    "LIFESCI", "LING", "LTHUAN", "M E STD", "M PHARM", "MAT SCI", "MATH", "MC&IP", "MCD BIO",
    "MECH&AE", "MED", "MED HIS", "MGMT", "MGMTEX", "MGMTFE", "MGMTFT", "MGMTGEX", "MGMTMFE",
    "MGMTMSA", "MGMTPHD", "MIA STD", "MIL SCI", "MIMG", "MOL BIO", "MOL TOX", "MSC HST", "MSC IND",
    "MUS HST", "MUS IND", "MUSC", "MUSCLG", "MUSCLGY", "MUSIC", "NAV SCI", "NEURBIO", "NEURLGY",
    "NEURO", "NEUROSC", "NEURSGY", "NONDEPT", "NR EAST", "NURSING", "OBGYN", "OPTH", "ORL BIO",
    "ORTHPDC", "PATH", "PBMED", "PEDS", "PHILOS", "PHYSCI", "PHYSICS", "PHYSIOL", "POL SCI",
    "POLSH", "PORTGSE", "PSYCH", "PSYCTRY", "PUB AFF", "PUB HLT", "PUB PLC", "QNT SCI", "RAD ONC",
    "RADIOL", "RE DEV", "RELIGN", "RES PRC", "ROMANIA", "RUSSN", "S ASIAN", "SCAND", "SCI EDU",
    "SEASIAN", "SEMITIC", "SLAVC", "SOC GEN", "SOC SC", "SOC THT", "SOC WLF", "SOCIOL", "SPAN",
    "SRB CRO", "STATS", "SUMMER", "SURGERY", "SWAHILI", "THAI", "THEATER", "TURKIC", "UG-LAW",
    "UKRN", "UNIV ST", "URBN PL", "UROLOGY", "VIETMSE", "WL ARTS", "YIDDSH",
];

static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::build);

/// A canonical department code drawn from the [`Registry`], e.g. `COM SCI`.
///
/// Values can only be obtained from the registry, so holding a
/// `DepartmentCode` proves membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DepartmentCode(&'static str);

impl DepartmentCode {
    /// Returns the code as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }

    /// The length of the code in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.len()
    }

    /// Always `false`; registry codes are never empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for DepartmentCode {
    fn as_ref(&self) -> &str {
        self.0
    }
}

impl fmt::Display for DepartmentCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The process-wide, read-only catalog of known department codes.
#[derive(Debug)]
pub struct Registry {
    /// Codes sorted by length, longest first. Ties keep catalog order.
    by_length: Vec<DepartmentCode>,
}

impl Registry {
    fn build() -> Self {
        let mut by_length: Vec<DepartmentCode> = Vec::with_capacity(DEPARTMENT_CODES.len());
        for &code in DEPARTMENT_CODES {
            let code = DepartmentCode(code);
            if !by_length.contains(&code) {
                by_length.push(code);
            }
        }
        by_length.sort_by_key(|code| std::cmp::Reverse(code.len()));
        Self { by_length }
    }

    /// The shared registry instance.
    #[must_use]
    pub fn global() -> &'static Self {
        &REGISTRY
    }

    /// All codes, longest first.
    #[must_use]
    pub fn by_length(&self) -> &[DepartmentCode] {
        &self.by_length
    }

    /// Exact lookup after upper-casing and collapsing whitespace.
    ///
    /// No prefix or substring heuristics are applied: `"COM  sci"` matches
    /// `COM SCI`, but `"COM"` and `"M"` match nothing.
    #[must_use]
    pub fn match_known(&self, candidate: &str) -> Option<DepartmentCode> {
        let normalized = candidate
            .split_whitespace()
            .map(str::to_uppercase)
            .collect::<Vec<_>>()
            .join(" ");
        if normalized.is_empty() {
            return None;
        }
        self.by_length
            .iter()
            .copied()
            .find(|code| code.as_str() == normalized)
    }

    /// The longest code that `text` starts with.
    #[must_use]
    pub fn longest_prefix_of(&self, text: &str) -> Option<DepartmentCode> {
        self.by_length
            .iter()
            .copied()
            .find(|code| text.starts_with(code.as_str()))
    }
}
