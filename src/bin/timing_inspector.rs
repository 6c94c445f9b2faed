use std::env;
use std::fs;

use wordtiming::{current_word_index, current_word_range, VerseIndex, VerseKey};

fn main() {
    println!("🔍 Timing Inspector - Word Timing File Analysis");
    println!("===============================================");

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        println!("Usage: timing_inspector <timing.json> [surah:ayah] [time_ms]");
        println!("Example: timing_inspector timing-data/Alafasy_128kbps.json 2:255 1500");
        return;
    }

    match inspect(&args[1], args.get(2), args.get(3)) {
        Ok(_) => println!("\n✅ Inspection completed successfully"),
        Err(e) => println!("\n❌ Inspection failed: {}", e),
    }
}

fn inspect(
    path: &str,
    verse: Option<&String>,
    time_ms: Option<&String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    let index = VerseIndex::from_slice(&bytes)?;

    println!("📄 File: {}", path);
    println!("📏 Size: {} bytes", bytes.len());
    println!("📖 Verses: {}", index.len());
    println!("🧩 Segments: {}", index.segment_count());

    let surahs = index.surahs();
    match (surahs.first(), surahs.last()) {
        (Some(first), Some(last)) => println!(
            "📚 Surahs covered: {} (from {} to {})",
            surahs.len(),
            first,
            last
        ),
        _ => println!("📚 Surahs covered: none"),
    }

    let Some(verse) = verse else {
        return Ok(());
    };
    let key: VerseKey = verse.parse()?;

    let Some(segments) = index.get(key) else {
        println!("\n⚠️  No timing for {}", key);
        return Ok(());
    };

    println!("\n🕌 Verse {} [{} segments]", key, segments.len());
    for segment in segments.iter() {
        let words = if segment.word_start == segment.word_end {
            format!("word {}", segment.word_start)
        } else {
            format!("words {}-{}", segment.word_start, segment.word_end)
        };
        println!(
            "  ⏱️  {:>7} - {:>7} ms  {}",
            segment.start_ms, segment.end_ms, words
        );
    }

    if let Some(time_ms) = time_ms {
        let time_ms: f64 = time_ms.parse()?;
        println!("\n🎯 At {} ms:", time_ms);
        match current_word_index(&segments, time_ms) {
            Some(word) => println!("  Highlighted word: {}", word),
            None => println!("  Highlighted word: none"),
        }
        match current_word_range(&segments, time_ms) {
            Some(range) => println!("  Spoken range: {}-{}", range.start, range.end),
            None => println!("  Spoken range: none"),
        }
    }

    Ok(())
}
