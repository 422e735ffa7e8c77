//! Synthetic transcript generator for benchmarks and stress testing.
//!
//! Usage: cargo run --features gen-test --bin gen_test -- [messages] [output] [seed]
//! Example: cargo run --features gen-test --bin gen_test -- 100000 heavy_chat.txt 7
//!
//! The output uses the bracketed 12-hour format with a realistic mix of
//! continuation lines, media placeholders, deleted messages, emoji, blank
//! lines, a preamble of orphan lines and occasional calendar-invalid dates.

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SENDERS: &[&str] = &["Alice", "Bob", "Мария", "村上", "🔥Fire🔥", "Jean-Luc Picard"];

const EMOJIS: &[&str] = &["😀", "😂", "😍", "🤔", "🔥", "👍", "🎉", "❤", "🚀", "🌈"];

const PHRASES: &[&str] = &[
    "are you coming tonight",
    "that was a great movie",
    "I hate waiting in traffic",
    "the pizza place is closed again",
    "not bad at all",
    "can you send me the photos",
    "happy birthday",
    "this is terrible news",
    "let's go hiking on saturday",
    "love this song",
    "work was boring today",
    "Привет, как дела",
    "ok",
];

const CONTINUATIONS: &[&str] = &[
    "also bring the charger",
    "- eggs\n- milk\n- bread",
    "sorry, typo above",
    "https://example.com/some/link",
];

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_chat.txt");
    let seed: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(42);

    println!("🧪 Transcript Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   Output:   {}", output);
    println!("   Seed:     {}", seed);
    println!();

    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    let mut rng = StdRng::seed_from_u64(seed);

    let start = Instant::now();
    let bytes_written = generate(&mut writer, &mut rng, count)?;
    writer.flush()?;

    let elapsed = start.elapsed();
    println!("\n\n✅ Done!");
    println!("   Size:  {:.2} MB", bytes_written as f64 / 1_000_000.0);
    println!("   Time:  {:.2}s", elapsed.as_secs_f64());
    println!(
        "   Speed: {:.0} msg/s",
        count as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}

fn generate(out: &mut impl Write, rng: &mut StdRng, count: usize) -> io::Result<usize> {
    let mut bytes = 0;
    let mut emit = |out: &mut dyn Write, text: &str| -> io::Result<()> {
        out.write_all(text.as_bytes())?;
        out.write_all(b"\n")?;
        bytes += text.len() + 1;
        Ok(())
    };

    // Orphan preamble, as left by some exporters
    emit(out, "Messages and calls are end-to-end encrypted.")?;
    emit(out, "")?;

    let mut now = NaiveDate::from_ymd_opt(2023, 1, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap_or_default();
    let mut sender = SENDERS[0];

    for i in 0..count {
        now = advance(rng, now);
        if rng.gen_bool(0.6) {
            sender = SENDERS.choose(rng).copied().unwrap_or(sender);
        }

        emit(out, &format!("{} {}: {}", header_stamp(rng, now, i), sender, content(rng)))?;

        if rng.gen_ratio(1, 12) {
            let extra = CONTINUATIONS.choose(rng).copied().unwrap_or_default();
            emit(out, extra)?;
        }
        if rng.gen_ratio(1, 40) {
            emit(out, "")?;
        }

        if (i + 1) % 10_000 == 0 {
            eprint!("\r   Generated {}/{}", i + 1, count);
        }
    }

    Ok(bytes)
}

/// Next timestamp: usually minutes later, sometimes a new day or a long gap.
fn advance(rng: &mut StdRng, now: NaiveDateTime) -> NaiveDateTime {
    let minutes = match rng.gen_range(0..100) {
        0..=79 => rng.gen_range(0..20),
        80..=94 => rng.gen_range(20..600),
        _ => rng.gen_range(600..4320),
    };
    now + Duration::minutes(minutes)
}

fn header_stamp(rng: &mut StdRng, ts: NaiveDateTime, index: usize) -> String {
    // A few calendar-invalid dates exercise the invalid-timestamp path
    let date = if index % 5000 == 4999 {
        format!("31/02/{}", ts.format("%y"))
    } else {
        ts.format("%d/%m/%y").to_string()
    };

    let time = if rng.gen_bool(0.5) {
        ts.format("%-I:%M:%S %p")
    } else {
        ts.format("%-I:%M %p")
    };
    format!("[{}, {}]", date, time)
}

fn content(rng: &mut StdRng) -> String {
    match rng.gen_range(0..100) {
        0..=4 => "<Media omitted>".to_string(),
        5..=6 => "This message was deleted".to_string(),
        7..=19 => {
            let phrase = PHRASES.choose(rng).copied().unwrap_or_default();
            let emoji = EMOJIS.choose(rng).copied().unwrap_or_default();
            format!("{} {}", phrase, emoji.repeat(rng.gen_range(1..4)))
        }
        _ => PHRASES.choose(rng).copied().unwrap_or_default().to_string(),
    }
}
