// Media timeline bar

pub const FILLED_GLYPH: char = '■';
pub const EMPTY_GLYPH: char = '□';
/// Used for every cell when nothing is playing.
pub const IDLE_GLYPH: char = '─';

/// `length` cells, filled in proportion to `position_ms / duration_ms` (rounded down).
pub fn progress_bar(position_ms: u64, duration_ms: u64, length: usize) -> String {
    if duration_ms == 0 {
        return IDLE_GLYPH.to_string().repeat(length);
    }
    let percent = (position_ms as f64 / duration_ms as f64).clamp(0.0, 1.0);
    let filled = ((length as f64) * percent).floor() as usize;
    let mut bar = String::with_capacity(length * FILLED_GLYPH.len_utf8());
    bar.extend(std::iter::repeat_n(FILLED_GLYPH, filled));
    bar.extend(std::iter::repeat_n(EMPTY_GLYPH, length - filled));
    bar
}
