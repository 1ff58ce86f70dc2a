//! Writes a synthetic speech corpus to `data/corpus.csv` so the viewer
//! runs out of the box. Deterministic: the same file is produced on every
//! run.

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_usize(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

/// (first year, last year, speaker, party) eras of the synthetic corpus.
const ERAS: &[(i32, i32, &str, &str)] = &[
    (1947, 1963, "J. Sharma", "National Congress"),
    (1964, 1976, "L. Rao", "National Congress"),
    (1977, 1979, "M. Desai", "People's Front"),
    (1980, 1988, "I. Rao", "National Congress"),
    (1989, 1990, "V. Singh", "People's Front"),
    (1991, 1996, "N. Murthy", "National Congress"),
    (1997, 2003, "A. Verma", "National Alliance"),
    (2004, 2013, "S. Iyer", "National Congress"),
    (2014, 2023, "R. Patel", "National Alliance"),
];

/// Years with no surviving speech text.
const MISSING_YEARS: &[i32] = &[1962, 1995];

const COMMON: &[&str] = &[
    "the", "of", "and", "to", "in", "we", "our", "that", "is", "for", "have",
    "this", "a", "with", "will", "on", "are", "be", "it", "all",
];

const THEMES: &[&str] = &[
    "nation", "freedom", "people", "country", "independence", "development",
    "progress", "unity", "future", "government", "citizens", "farmers",
    "education", "industry", "villages", "democracy", "constitution",
    "poverty", "struggle", "peace", "prosperity", "hope", "justice",
    "strength", "youth", "women", "history", "sacrifice", "duty", "water",
    "energy", "science", "borders", "economy", "employment",
];

fn generate_speech(rng: &mut SimpleRng, year: i32, n_sentences: usize) -> String {
    let mut sentences = Vec::with_capacity(n_sentences);
    for _ in 0..n_sentences {
        let n_words = 8 + rng.next_usize(12);
        let mut words = Vec::with_capacity(n_words);
        for w in 0..n_words {
            // Roughly every other word is a content word.
            let pool = if w % 2 == 0 { COMMON } else { THEMES };
            words.push(pool[rng.next_usize(pool.len())]);
        }
        // An occasional year reference exercises the digit-separator rule.
        if rng.next_usize(6) == 0 {
            words.push("since");
            sentences.push(format!("{} {}.", capitalize(&words.join(" ")), year));
            continue;
        }
        sentences.push(format!("{}.", capitalize(&words.join(" "))));
    }
    sentences.join(" ")
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    std::fs::create_dir_all("data").context("creating data directory")?;
    let mut writer = csv::Writer::from_path("data/corpus.csv").context("creating corpus.csv")?;
    writer.write_record(["year", "speaker", "party", "text"])?;

    let mut n_rows = 0u32;
    for &(first, last, speaker, party) in ERAS {
        for year in first..=last {
            if MISSING_YEARS.contains(&year) {
                continue;
            }
            let n_sentences = 40 + rng.next_usize(60);
            let text = generate_speech(&mut rng, year, n_sentences);
            let year_field = year.to_string();
            writer.write_record([year_field.as_str(), speaker, party, text.as_str()])?;
            n_rows += 1;
        }
    }

    writer.flush().context("writing corpus.csv")?;
    log::info!("Wrote data/corpus.csv ({n_rows} speeches)");
    println!("Wrote data/corpus.csv ({n_rows} speeches)");
    Ok(())
}
