//! Fixed word lists used by the record generator.

use std::ops::RangeInclusive;

/// Famous authors from various genres and time periods.
pub const AUTHORS: &[&str] = &[
    "Jane Austen", "Charles Dickens", "Mark Twain", "Ernest Hemingway",
    "Virginia Woolf", "George Orwell", "F. Scott Fitzgerald", "Leo Tolstoy",
    "Gabriel García Márquez", "Toni Morrison", "Haruki Murakami", "J.K. Rowling",
    "Stephen King", "Agatha Christie", "Oscar Wilde", "Franz Kafka",
    "Albert Camus", "Hermann Hesse", "Paulo Coelho", "Dan Brown",
];

pub const TITLES: &[&str] = &[
    "The Silent Echo", "Midnight Dreams", "Beyond the Horizon", "Whispers in Time",
    "The Last Chapter", "Shadows of Tomorrow", "The Hidden Path", "Echoes of War",
    "The Forgotten Kingdom", "Secrets of the Heart", "The Crystal Tower", "Dancing with Destiny",
    "The Iron Gate", "Waves of Change", "The Burning Sky", "Lost in Translation",
    "The Golden Compass", "River of Stars", "The Midnight Garden", "Winds of Fortune",
    "The Silent Witness", "Broken Promises", "The Dark Mirror", "Songs of Freedom",
    "The Empty Throne", "Chasing Shadows", "The Final Hour", "Dreams of Glory",
    "The Wandering Soul", "Bridges of Hope", "The Sacred Fire", "Tales of Wonder",
    "The Crimson Rose", "Voices from Beyond", "The Shattered Glass", "Journeys End",
    "The Hollow Crown", "Storms of Passion", "The Velvet Night", "Legends Reborn",
    "The Amber Stone", "Faces in the Crowd", "The Frozen Lake", "Whispers of Love",
    "The Rising Sun", "Depths of Despair", "The Silver Lining", "Masks of Deceit",
    "The Endless Road", "Colors of Autumn",
];

/// Volume suffixes; the empty entry means "no suffix".
pub const QUALIFIERS: &[&str] = &["I", "II", "III", ""];

pub const PUBLICATION_YEARS: RangeInclusive<i64> = 1850..=2025;

/// Word lists and numeric range a generator draws from.
///
/// Construction guarantees non-empty lists and non-empty primary/secondary entries,
/// so every generated candidate passes validation.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    primary: Vec<String>,
    qualifiers: Vec<String>,
    secondary: Vec<String>,
    numeric_range: RangeInclusive<i64>,
}

impl Vocabulary {
    /// Returns `None` if a list is empty, an entry is blank, or the range is empty.
    ///
    /// `qualifiers` may be empty (no suffix is ever added) and may contain `""`.
    pub fn new<S: AsRef<str>>(
        primary: &[S],
        qualifiers: &[S],
        secondary: &[S],
        numeric_range: RangeInclusive<i64>,
    ) -> Option<Self> {
        let owned = |items: &[S]| -> Vec<String> {
            items.iter().map(|s| s.as_ref().to_string()).collect()
        };
        let primary = owned(primary);
        let secondary = owned(secondary);
        let blank = |items: &[String]| items.is_empty() || items.iter().any(|s| s.trim().is_empty());
        if blank(&primary) || blank(&secondary) || numeric_range.is_empty() {
            return None;
        }
        Some(Self {
            primary,
            qualifiers: owned(qualifiers),
            secondary,
            numeric_range,
        })
    }

    /// 50 titles, 20 authors, roman-numeral volume suffixes, years 1850..=2025.
    pub fn books() -> Self {
        Self {
            primary: TITLES.iter().map(|s| s.to_string()).collect(),
            qualifiers: QUALIFIERS.iter().map(|s| s.to_string()).collect(),
            secondary: AUTHORS.iter().map(|s| s.to_string()).collect(),
            numeric_range: PUBLICATION_YEARS,
        }
    }

    pub fn primary(&self) -> &[String] {
        &self.primary
    }

    pub fn qualifiers(&self) -> &[String] {
        &self.qualifiers
    }

    pub fn secondary(&self) -> &[String] {
        &self.secondary
    }

    pub fn numeric_range(&self) -> RangeInclusive<i64> {
        self.numeric_range.clone()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::books()
    }
}
