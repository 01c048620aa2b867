//! The King Wen lookup table.
//!
//! Maps each of the 64 line patterns to its traditional number and back.
//! The table is fixed and hand-verified; the inverse map is built once on
//! first use.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{CastError, CastResult};
use crate::pattern::LinePattern;

/// Pattern of each hexagram in King Wen order: index `n - 1` holds the
/// bottom-first bit string of hexagram `n`.
pub const KING_WEN_PATTERNS: [&str; 64] = [
    "111111", // 1  Qian, the Creative
    "000000", // 2  Kun, the Receptive
    "100010", // 3  Zhun
    "010001", // 4  Meng
    "111010", // 5  Xu
    "010111", // 6  Song
    "010000", // 7  Shi
    "000010", // 8  Bi
    "111011", // 9  Xiao Chu
    "110111", // 10 Lü
    "111000", // 11 Tai
    "000111", // 12 Pi
    "101111", // 13 Tong Ren
    "111101", // 14 Da You
    "001000", // 15 Qian (Modesty)
    "000100", // 16 Yu
    "100110", // 17 Sui
    "011001", // 18 Gu
    "110000", // 19 Lin
    "000011", // 20 Guan
    "100101", // 21 Shi He
    "101001", // 22 Bi (Grace)
    "000001", // 23 Bo
    "100000", // 24 Fu
    "100111", // 25 Wu Wang
    "111001", // 26 Da Chu
    "100001", // 27 Yi
    "011110", // 28 Da Guo
    "010010", // 29 Kan
    "101101", // 30 Li
    "001110", // 31 Xian
    "011100", // 32 Heng
    "001111", // 33 Dun
    "111100", // 34 Da Zhuang
    "000101", // 35 Jin
    "101000", // 36 Ming Yi
    "101011", // 37 Jia Ren
    "110101", // 38 Kui
    "001010", // 39 Jian
    "010100", // 40 Jie (Deliverance)
    "110001", // 41 Sun
    "100011", // 42 Yi (Increase)
    "111110", // 43 Guai
    "011111", // 44 Gou
    "000110", // 45 Cui
    "011000", // 46 Sheng
    "010110", // 47 Kun (Oppression)
    "011010", // 48 Jing
    "101110", // 49 Ge
    "011101", // 50 Ding
    "100100", // 51 Zhen
    "001001", // 52 Gen
    "001011", // 53 Jian (Development)
    "110100", // 54 Gui Mei
    "101100", // 55 Feng
    "001101", // 56 Lü (the Wanderer)
    "011011", // 57 Xun
    "110110", // 58 Dui
    "010011", // 59 Huan
    "110010", // 60 Jie (Limitation)
    "110011", // 61 Zhong Fu
    "001100", // 62 Xiao Guo
    "101010", // 63 Ji Ji
    "010101", // 64 Wei Ji
];

fn inverse() -> &'static HashMap<&'static str, u32> {
    static INVERSE: OnceLock<HashMap<&'static str, u32>> = OnceLock::new();
    INVERSE.get_or_init(|| {
        KING_WEN_PATTERNS
            .iter()
            .enumerate()
            .map(|(i, bits)| (*bits, i as u32 + 1))
            .collect()
    })
}

/// King Wen number (1-64) of a line pattern.
///
/// Total over all well-typed patterns: every 6-bit pattern appears in the
/// table exactly once.
pub fn king_wen_number(pattern: &LinePattern) -> u32 {
    let bits = pattern.as_bits();
    match inverse().get(bits.as_str()) {
        Some(n) => *n,
        None => unreachable!("pattern {bits} missing from King Wen table"),
    }
}

/// Line pattern of a King Wen number.
///
/// Rejects numbers outside 1-64; those can only arrive from stored data.
pub fn pattern_of(number: u32) -> CastResult<LinePattern> {
    if !(1..=64).contains(&number) {
        return Err(CastError::InvalidNumber(number));
    }
    let bits = KING_WEN_PATTERNS[(number - 1) as usize];
    LinePattern::parse(bits)
}
