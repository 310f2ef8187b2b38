//! Word lists and grammatical categories.
//!
//! Vocabulary mix targets middle school to high school 1st year (CEFR A2/B1).
//! Each entry carries the English text, its Japanese gloss, and the
//! grammatical category used to judge shots.

use serde::{Deserialize, Serialize};

/// Grammatical category - the judging key for every shot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordCategory {
    Noun,
    Verb,
    Adjective,
}

impl WordCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordCategory::Noun => "noun",
            WordCategory::Verb => "verb",
            WordCategory::Adjective => "adjective",
        }
    }
}

/// A vocabulary entry: display text, Japanese gloss, category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word {
    pub text: &'static str,
    pub gloss: &'static str,
    pub category: WordCategory,
}

const fn w(text: &'static str, gloss: &'static str, category: WordCategory) -> Word {
    Word {
        text,
        gloss,
        category,
    }
}

use WordCategory::{Adjective, Noun, Verb};

/// Standard vocabulary list
pub const WORD_LIST: &[Word] = &[
    // --- Nouns ---
    w("Solution", "解決策", Noun),
    w("Evidence", "証拠", Noun),
    w("Heritage", "遺産", Noun),
    w("Economy", "経済", Noun),
    w("Pollution", "汚染", Noun),
    w("Atmosphere", "雰囲気/大気", Noun),
    w("Audience", "聴衆", Noun),
    w("Purpose", "目的", Noun),
    w("Opinion", "意見", Noun),
    w("Advantage", "利点", Noun),
    w("Century", "世紀", Noun),
    w("Detail", "詳細", Noun),
    w("Flavor", "風味", Noun),
    w("Surface", "表面", Noun),
    w("Resource", "資源", Noun),
    w("Passenger", "乗客", Noun),
    w("Ability", "能力", Noun),
    w("Memory", "記憶", Noun),
    w("Quality", "質", Noun),
    w("Standard", "基準", Noun),
    w("Tradition", "伝統", Noun),
    w("Government", "政府", Noun),
    // Basic review nouns
    w("Friend", "友達", Noun),
    w("School", "学校", Noun),
    w("Library", "図書館", Noun),
    // --- Verbs ---
    w("Consider", "よく考える", Verb),
    w("Encourage", "励ます", Verb),
    w("Recognize", "認識する", Verb),
    w("Establish", "設立する", Verb),
    w("Improve", "改善する", Verb),
    w("Provide", "提供する", Verb),
    w("Suggest", "提案する", Verb),
    w("Describe", "描写する", Verb),
    w("Realize", "気づく", Verb),
    w("Produce", "生産する", Verb),
    w("Protect", "保護する", Verb),
    w("Develop", "開発する", Verb),
    w("Expect", "予期する", Verb),
    w("Prepare", "準備する", Verb),
    w("Decide", "決める", Verb),
    w("Accept", "受け入れる", Verb),
    w("Refuse", "断る", Verb),
    w("Survive", "生き残る", Verb),
    w("Mention", "言及する", Verb),
    w("Require", "必要とする", Verb),
    // Basic review verbs
    w("Become", "〜になる", Verb),
    w("Believe", "信じる", Verb),
    w("Travel", "旅行する", Verb),
    // --- Adjectives ---
    w("Efficient", "効率的な", Adjective),
    w("Essential", "不可欠な", Adjective),
    w("Various", "様々な", Adjective),
    w("Obvious", "明らかな", Adjective),
    w("Positive", "肯定的な", Adjective),
    w("Negative", "否定的な", Adjective),
    w("Familiar", "よく知られた", Adjective),
    w("Ordinary", "普通の", Adjective),
    w("Similar", "似ている", Adjective),
    w("Recent", "最近の", Adjective),
    w("Likely", "ありそうな", Adjective),
    w("Serious", "深刻な", Adjective),
    w("Mental", "精神の", Adjective),
    w("Physical", "身体の", Adjective),
    w("Correct", "正しい", Adjective),
    w("Complex", "複雑な", Adjective),
    w("Creative", "創造的な", Adjective),
    w("Private", "私的な", Adjective),
    w("Public", "公の", Adjective),
    w("Common", "共通の", Adjective),
    // Basic review adjectives
    w("Busy", "忙しい", Adjective),
    w("Hungry", "お腹が空いた", Adjective),
    w("Famous", "有名な", Adjective),
];

/// Imabari-themed vocabulary (geography, shipbuilding, towels)
pub const IMABARI_WORD_LIST: &[Word] = &[
    // --- Nouns ---
    w("Towel", "タオル", Noun),
    w("Bridge", "橋", Noun),
    w("Island", "島", Noun),
    w("Ship", "船", Noun),
    w("Castle", "城", Noun),
    w("Sea", "海", Noun),
    w("Port", "港", Noun),
    w("Cyclist", "サイクリスト", Noun),
    w("Pirate", "海賊", Noun),
    w("Strait", "海峡", Noun),
    w("Iron", "鉄", Noun),
    w("Industry", "産業", Noun),
    w("Shrine", "神社", Noun),
    w("Pilgrimage", "巡礼/遍路", Noun),
    w("Mandarin(Mikan)", "みかん", Noun),
    w("Route", "ルート/道", Noun),
    w("Ferry", "フェリー", Noun),
    w("Crane", "クレーン", Noun),
    w("Sunset", "夕日", Noun),
    // --- Verbs ---
    w("Build", "造る(船などを)", Verb),
    w("Ride", "乗る(自転車に)", Verb),
    w("Cross", "渡る", Verb),
    w("Connect", "つなぐ", Verb),
    w("Flow", "流れる", Verb),
    w("Visit", "訪れる", Verb),
    w("Navigate", "航行する", Verb),
    w("Manufacture", "製造する", Verb),
    w("Export", "輸出する", Verb),
    w("Dye", "染める", Verb),
    w("Pray", "祈る", Verb),
    w("Explore", "探検する", Verb),
    // --- Adjectives ---
    w("Local", "地元の", Adjective),
    w("Beautiful", "美しい", Adjective),
    w("Famous", "有名な", Adjective),
    w("Long", "長い", Adjective),
    w("Narrow", "狭い", Adjective),
    w("Delicious", "おいしい", Adjective),
    w("Blue", "青い", Adjective),
    w("Scenic", "景色の良い", Adjective),
    w("Historical", "歴史的な", Adjective),
    w("Marine", "海の", Adjective),
    w("Peaceful", "穏やかな", Adjective),
    w("Industrial", "工業の", Adjective),
    w("Magnificent", "壮大な", Adjective),
    w("Traditional", "伝統的な", Adjective),
];

/// Game mode - selects the active word list and the background variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Normal,
    Imabari,
}

impl GameMode {
    pub fn word_list(&self) -> &'static [Word] {
        match self {
            GameMode::Normal => WORD_LIST,
            GameMode::Imabari => IMABARI_WORD_LIST,
        }
    }
}
