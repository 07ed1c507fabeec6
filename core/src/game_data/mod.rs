//! Static game data.

pub mod sweep;

pub use sweep::generate_sweep;

/// One playable class: display name, `/who` keyword, macro-button label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassInfo {
    pub display_name: &'static str,
    pub who_keyword: &'static str,
    pub button_label: &'static str,
}

/// The fourteen playable classes, keyed by `/who` keyword.
pub static CLASSES: phf::Map<&'static str, ClassInfo> = phf::phf_map! {
    "bard" => ClassInfo { display_name: "Bard", who_keyword: "bard", button_label: "BRD" },
    "cleric" => ClassInfo { display_name: "Cleric", who_keyword: "cleric", button_label: "CLR" },
    "druid" => ClassInfo { display_name: "Druid", who_keyword: "druid", button_label: "DRD" },
    "enchanter" => ClassInfo { display_name: "Enchanter", who_keyword: "enchanter", button_label: "ENC" },
    "magician" => ClassInfo { display_name: "Magician", who_keyword: "magician", button_label: "MAG" },
    "monk" => ClassInfo { display_name: "Monk", who_keyword: "monk", button_label: "MNK" },
    "necromancer" => ClassInfo { display_name: "Necromancer", who_keyword: "necromancer", button_label: "NEC" },
    "paladin" => ClassInfo { display_name: "Paladin", who_keyword: "paladin", button_label: "PAL" },
    "ranger" => ClassInfo { display_name: "Ranger", who_keyword: "ranger", button_label: "RNG" },
    "rogue" => ClassInfo { display_name: "Rogue", who_keyword: "rogue", button_label: "ROG" },
    "shadow" => ClassInfo { display_name: "Shadow Knight", who_keyword: "shadow", button_label: "SK" },
    "shaman" => ClassInfo { display_name: "Shaman", who_keyword: "shaman", button_label: "SHA" },
    "warrior" => ClassInfo { display_name: "Warrior", who_keyword: "warrior", button_label: "WAR" },
    "wizard" => ClassInfo { display_name: "Wizard", who_keyword: "wizard", button_label: "WIZ" },
};

/// Classes in the canonical order sweeps and listings iterate them.
pub static CLASS_ORDER: &[&str] = &[
    "bard",
    "cleric",
    "druid",
    "enchanter",
    "magician",
    "monk",
    "necromancer",
    "paladin",
    "ranger",
    "rogue",
    "shadow",
    "shaman",
    "warrior",
    "wizard",
];

pub fn class_by_keyword(keyword: &str) -> Option<&'static ClassInfo> {
    CLASSES.get(keyword)
}

/// Resolve a display name (case-insensitive) to class info.
pub fn class_by_name(name: &str) -> Option<&'static ClassInfo> {
    CLASS_ORDER
        .iter()
        .filter_map(|keyword| CLASSES.get(keyword))
        .find(|class| class.display_name.eq_ignore_ascii_case(name))
}
