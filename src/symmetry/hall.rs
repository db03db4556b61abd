//! # 空间群号 → Hall 序号映射
//!
//! `SPG_TO_HALL[n]` 是空间群 n 的第一个 Hall 设置的序号，
//! 空间群 n 的全部设置为 `SPG_TO_HALL[n]..SPG_TO_HALL[n + 1]`。
//! 下标 0 不使用，下标 231 是结束哨兵 (531)。
//!
//! ## 依赖关系
//! - 被 `commands/settings.rs` 使用

use std::ops::Range;

/// 最大 Hall 序号
pub const MAX_HALL_NUMBER: i32 = 530;

#[rustfmt::skip]
pub static SPG_TO_HALL: [i32; 232] = [
    0,
    1,   2,   3,   6,   9,  18,  21,  30,  39,  57,
    60,  63,  72,  81,  90, 108, 109, 112, 115, 116,
    119, 122, 123, 124, 125, 128, 134, 137, 143, 149,
    155, 161, 164, 170, 173, 176, 182, 185, 191, 197,
    203, 209, 212, 215, 218, 221, 227, 228, 230, 233,
    239, 245, 251, 257, 263, 266, 269, 275, 278, 284,
    290, 292, 298, 304, 310, 313, 316, 322, 334, 335,
    337, 338, 341, 343, 349, 350, 351, 352, 353, 354,
    355, 356, 357, 358, 359, 361, 363, 364, 366, 367,
    368, 369, 370, 371, 372, 373, 374, 375, 376, 377,
    378, 379, 380, 381, 382, 383, 384, 385, 386, 387,
    388, 389, 390, 391, 392, 393, 394, 395, 396, 397,
    398, 399, 400, 401, 402, 404, 406, 407, 408, 410,
    412, 413, 414, 416, 418, 419, 420, 422, 424, 425,
    426, 428, 430, 431, 432, 433, 435, 436, 438, 439,
    440, 441, 442, 443, 444, 446, 447, 448, 449, 450,
    452, 454, 455, 456, 457, 458, 460, 462, 463, 464,
    465, 466, 467, 468, 469, 470, 471, 472, 473, 474,
    475, 476, 477, 478, 479, 480, 481, 482, 483, 484,
    485, 486, 487, 488, 489, 490, 491, 492, 493, 494,
    495, 497, 498, 500, 501, 502, 503, 504, 505, 506,
    507, 508, 509, 510, 511, 512, 513, 514, 515, 516,
    517, 518, 520, 521, 523, 524, 525, 527, 529, 530,
    531,
];

/// 空间群 `number` 的 Hall 序号范围；号码不在 1..=230 时返回 None
pub fn hall_range(number: i32) -> Option<Range<i32>> {
    if !(1..=230).contains(&number) {
        return None;
    }
    let n = number as usize;
    Some(SPG_TO_HALL[n]..SPG_TO_HALL[n + 1])
}

/// 空间群 `number` 的设置数量
pub fn num_settings(number: i32) -> usize {
    hall_range(number).map(|r| r.len()).unwrap_or(0)
}
