//! Synthetic article generation used by the seeder.

use super::types::NewsFields;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "amet", "consectetur", "adipiscing", "elit", "sed", "tempor",
    "incididunt", "labore", "dolore", "magna", "aliqua", "enim", "minim", "veniam", "quis",
    "nostrud", "exercitation", "ullamco", "laboris", "nisi", "aliquip", "commodo", "consequat",
    "duis", "aute", "irure", "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat",
    "nulla", "pariatur", "excepteur", "sint", "occaecat", "cupidatat", "proident", "sunt",
    "culpa", "officia", "deserunt", "mollit", "anim", "laborum",
];

const FIRST_NAMES: &[&str] = &[
    "Alex", "Maria", "Chen", "Fatima", "Lukas", "Priya", "Omar", "Sofia", "Kenji", "Amara",
    "Mateo", "Ingrid", "Tariq", "Elena", "Noah", "Aiko",
];

const LAST_NAMES: &[&str] = &[
    "Nguyen", "Kowalski", "Garcia", "Okafor", "Schmidt", "Haddad", "Tanaka", "Rossi", "Novak",
    "Silva", "Larsen", "Mensah", "Moreau", "Ivanova",
];

const COMPANY_SUFFIXES: &[&str] = &["Group", "Media", "Press", "Inc", "LLC", "Daily", "Wire"];

const TLDS: &[&str] = &["com", "net", "org", "info", "biz", "news"];

/// Produces one synthetic record per call.
pub trait RecordGenerator: Send {
    fn generate(&mut self) -> NewsFields;
}

/// Random article generator. Seedable for reproducible runs.
pub struct FakeNewsGenerator {
    rng: StdRng,
}

impl FakeNewsGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Same seed, same sequence of records (and therefore the same urls).
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn word(&mut self) -> &'static str {
        WORDS.choose(&mut self.rng).copied().unwrap_or("lorem")
    }

    fn pick(&mut self, options: &[&'static str]) -> &'static str {
        options.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn sentence(&mut self) -> String {
        let len = self.rng.gen_range(4..10);
        let words: Vec<&str> = (0..len).map(|_| self.word()).collect();
        let mut sentence = words.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }

    fn sentences(&mut self, count: usize) -> String {
        (0..count)
            .map(|_| self.sentence())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn paragraphs(&mut self, count: usize) -> String {
        (0..count)
            .map(|_| {
                let n = self.rng.gen_range(3..6);
                self.sentences(n)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn full_name(&mut self) -> String {
        format!("{} {}", self.pick(FIRST_NAMES), self.pick(LAST_NAMES))
    }

    fn url(&mut self) -> String {
        let slug: u32 = self.rng.r#gen();
        format!(
            "https://{}-{}.{}/{:08x}",
            self.word(),
            self.word(),
            self.pick(TLDS),
            slug
        )
    }

    fn image_url(&mut self) -> String {
        let id: u32 = self.rng.gen_range(1..1000);
        format!("https://picsum.photos/seed/{}/640/480", id)
    }

    fn company(&mut self) -> String {
        format!("{} {}", self.pick(LAST_NAMES), self.pick(COMPANY_SUFFIXES))
    }

    fn uuid(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.r#gen();
        uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
    }
}

impl Default for FakeNewsGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordGenerator for FakeNewsGenerator {
    fn generate(&mut self) -> NewsFields {
        let days_ago = self.rng.gen_range(1..365);
        let secs = self.rng.gen_range(0..86_400);
        NewsFields {
            title: Some(self.sentence()),
            content: Some(self.paragraphs(3)),
            author: Some(self.full_name()),
            url: Some(self.url()),
            url_to_image: Some(self.image_url()),
            published_at: Some(Utc::now() - Duration::days(days_ago) - Duration::seconds(secs)),
            description: Some(self.sentences(2)),
            source_id: Some(self.uuid()),
            source_name: Some(self.company()),
        }
    }
}
