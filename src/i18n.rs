//! UI strings for the three supported languages.

use crate::store::language::Language;

/// Every label the rendered fragments use.
#[derive(Debug)]
pub struct Strings {
    pub wheel: &'static str,
    pub spin: &'static str,
    pub winner: &'static str,
    pub no_entries: &'static str,
    pub settings: &'static str,
    pub profiles: &'static str,
    pub participants: &'static str,
    pub enter_name: &'static str,
    pub new_profile: &'static str,
    pub add: &'static str,
    pub chance: &'static str,
    pub reset: &'static str,
    pub statistics: &'static str,
    pub history: &'static str,
    pub wins: &'static str,
    pub clear_history: &'static str,
    pub no_history: &'static str,
}

const DE: Strings = Strings {
    wheel: "Glücksrad",
    spin: "Drehen",
    winner: "GEWONNEN",
    no_entries: "Keine Einträge",
    settings: "Einstellungen",
    profiles: "Profile",
    participants: "Teilnehmer",
    enter_name: "Name eingeben",
    new_profile: "Neues Profil",
    add: "Hinzufügen",
    chance: "Chance",
    reset: "Zurücksetzen",
    statistics: "Statistik",
    history: "Verlauf",
    wins: "Siege",
    clear_history: "Verlauf löschen",
    no_history: "Noch keine Gewinner",
};

const EN: Strings = Strings {
    wheel: "Wheel",
    spin: "Spin",
    winner: "WINNER",
    no_entries: "No entries",
    settings: "Settings",
    profiles: "Profiles",
    participants: "Participants",
    enter_name: "Enter name",
    new_profile: "New profile",
    add: "Add",
    chance: "Chance",
    reset: "Reset",
    statistics: "Statistics",
    history: "History",
    wins: "wins",
    clear_history: "Clear history",
    no_history: "No winners yet",
};

const TH: Strings = Strings {
    wheel: "วงล้อ",
    spin: "หมุน",
    winner: "ผู้ชนะ",
    no_entries: "ไม่มีรายการ",
    settings: "การตั้งค่า",
    profiles: "โปรไฟล์",
    participants: "ผู้เข้าร่วม",
    enter_name: "กรอกชื่อ",
    new_profile: "โปรไฟล์ใหม่",
    add: "เพิ่ม",
    chance: "โอกาส",
    reset: "รีเซ็ต",
    statistics: "สถิติ",
    history: "ประวัติ",
    wins: "ชนะ",
    clear_history: "ล้างประวัติ",
    no_history: "ยังไม่มีผู้ชนะ",
};

pub fn strings(language: Language) -> &'static Strings {
    match language {
        Language::De => &DE,
        Language::En => &EN,
        Language::Th => &TH,
    }
}
