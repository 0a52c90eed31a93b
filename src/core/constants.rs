// Scoring
pub const BASE_POINTS: u32 = 10;
pub const SPEED_BONUS_POINTS: u32 = 5;
pub const SPEED_BONUS_MAX_SECONDS: f64 = 5.0;
pub const PERFECT_ROUND_BONUS: u32 = 50;

// Combo multiplier steps up at each threshold: x1, x2 from 2, x3 from 5, x4 from 10
pub const COMBO_THRESHOLDS: [u32; 3] = [2, 5, 10];
pub const MAX_COMBO_MULTIPLIER: u32 = 4;

// Star rating
pub const FAST_ANSWER_SECONDS: f64 = 5.0;
pub const MAX_STARS_PER_WORD: u8 = 3;

// XP and leveling: experience_for_level(n) = XP_CURVE_BASE * (n - 1)^XP_CURVE_EXPONENT
pub const XP_CURVE_BASE: f64 = 100.0;
pub const XP_CURVE_EXPONENT: f64 = 1.5;

// Achievement thresholds
pub const SPEED_RUN_MAX_SECONDS: f64 = 120.0;
pub const STREAK_ACHIEVEMENT_DAYS: u32 = 7;
pub const WORD_COLLECTOR_TARGET: u64 = 50;

// Help coins
pub const DEFAULT_HELP_COINS: u32 = 3;

// Save format
pub const SAVE_VERSION_MAGIC: u64 = 0x5350_454C_4C51_0001; // "SPELLQ" v1
