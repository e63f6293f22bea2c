//! English cardinal words for document amounts.
//!
//! # Responsibility
//! - Spell out integers up to `WORDS_UPPER_BOUND` the way printed contracts
//!   and invoices show them ("one hundred twenty-three thousand").
//!
//! # Invariants
//! - Values above `WORDS_UPPER_BOUND` fall back to `format_number`, never to
//!   partial words.
//! - Zero-valued base-1000 chunks contribute nothing to the output.

use crate::format::number::format_number;

/// Largest value rendered as words; anything above is returned as digits.
pub const WORDS_UPPER_BOUND: u64 = 500_000;

const ZERO: &str = "zero";
const ONES: [&str; 10] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];
const TEENS: [&str; 10] = [
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];
const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Ordered `(divisor, scale word)` pairs, least significant first.
///
/// Raising `WORDS_UPPER_BOUND` past the last entry needs a new row here.
const SCALES: &[(u64, &str)] = &[(1, ""), (1_000, "thousand"), (1_000_000, "million")];

/// Converts `value` into English words.
///
/// Returns `"zero"` for `0` and the plain digit string for values above
/// `WORDS_UPPER_BOUND`.
pub fn number_to_words(value: u64) -> String {
    if value == 0 {
        return ZERO.to_string();
    }
    if value > WORDS_UPPER_BOUND {
        return format_number(value);
    }

    let mut parts: Vec<String> = Vec::new();
    for &(divisor, scale_word) in SCALES.iter().rev() {
        let chunk = (value / divisor) % 1000;
        if chunk == 0 {
            continue;
        }

        let chunk_words = render_chunk(chunk as usize);
        if scale_word.is_empty() {
            parts.push(chunk_words);
        } else {
            parts.push(format!("{chunk_words} {scale_word}"));
        }
    }

    parts.join(" ")
}

/// Renders one base-1000 chunk; `0` renders as an empty string.
///
/// Returns `None` for values outside `0..=999`.
pub fn chunk_to_words(chunk: u16) -> Option<String> {
    if chunk >= 1000 {
        return None;
    }
    Some(render_chunk(usize::from(chunk)))
}

fn render_chunk(chunk: usize) -> String {
    let mut out = String::new();
    let mut rest = chunk;

    if rest > 99 {
        out.push_str(ONES[rest / 100]);
        out.push_str(" hundred");
        rest %= 100;
        if rest > 0 {
            out.push(' ');
        }
    }

    if rest > 19 {
        out.push_str(TENS[rest / 10]);
        rest %= 10;
        if rest > 0 {
            out.push('-');
            out.push_str(ONES[rest]);
        }
    } else if rest > 9 {
        out.push_str(TEENS[rest - 10]);
    } else if rest > 0 {
        out.push_str(ONES[rest]);
    }

    out
}
