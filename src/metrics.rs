use std::time::Duration;

/// Standard typing convention: five characters count as one word.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Accuracy as a rounded percentage of correct keystrokes.
/// An untouched session reads as 100%.
pub fn accuracy(correct_keystrokes: u64, total_keystrokes: u64) -> u32 {
    if total_keystrokes == 0 {
        return 100;
    }
    ((correct_keystrokes as f64 / total_keystrokes as f64) * 100.0).round() as u32
}

/// Words per minute from correct keystrokes over wall-clock time.
/// Zero before the session has started or when no time has elapsed.
pub fn words_per_minute(correct_keystrokes: u64, elapsed: Option<Duration>) -> u32 {
    let elapsed = match elapsed {
        Some(e) => e,
        None => return 0,
    };

    let minutes = elapsed.as_millis() as f64 / 60_000.0;
    if minutes == 0.0 {
        return 0;
    }

    ((correct_keystrokes as f64 / CHARS_PER_WORD) / minutes).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_is_100_with_no_keystrokes() {
        assert_eq!(accuracy(0, 0), 100);
    }

    #[test]
    fn accuracy_rounds_to_nearest_percent() {
        assert_eq!(accuracy(3, 4), 75);
        assert_eq!(accuracy(2, 3), 67);
        assert_eq!(accuracy(1, 3), 33);
    }

    #[test]
    fn accuracy_stays_within_bounds() {
        assert_eq!(accuracy(10, 10), 100);
        assert_eq!(accuracy(0, 10), 0);
    }

    #[test]
    fn wpm_is_zero_before_start() {
        assert_eq!(words_per_minute(25, None), 0);
    }

    #[test]
    fn wpm_is_zero_at_zero_elapsed() {
        assert_eq!(words_per_minute(25, Some(Duration::ZERO)), 0);
    }

    #[test]
    fn wpm_for_cat_typed_in_half_a_minute() {
        // "cat" with no errors in 30s: (3/5) words over 0.5 minutes -> 1.2 -> 1
        let wpm = words_per_minute(3, Some(Duration::from_secs(30)));
        assert_eq!(wpm, 1);
    }

    #[test]
    fn wpm_scales_with_correct_keystrokes() {
        // 300 correct chars in one minute is a steady 60 wpm
        let wpm = words_per_minute(300, Some(Duration::from_secs(60)));
        assert_eq!(wpm, 60);
    }

    #[test]
    fn wpm_uses_millisecond_resolution() {
        // 50 correct chars over 12.5s: 10 words over 0.2083 minutes -> 48
        let wpm = words_per_minute(50, Some(Duration::from_millis(12_500)));
        assert_eq!(wpm, 48);
    }
}
