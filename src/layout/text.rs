use crate::font::Font;
use crate::units::Pt;

/// Calculate the width of a given string of text given the font and font size.
/// Control characters (newlines, tabs, ...) take up no space.
pub fn width_of_text(text: &str, font: &Font, size: Pt) -> Pt {
    text.chars()
        .filter(|ch| !ch.is_control())
        .map(|ch| font.advance(ch, size))
        .sum()
}

/// Breaks text into lines no wider than `max_width`, in a word-aware manner.
///
/// Words are separated by whitespace and joined with single spaces. Explicit newlines
/// start a new line (blank lines are kept as empty strings). A word that is wider than
/// `max_width` by itself is split at the last character that still fits, so no line
/// ever overflows unless a single character is wider than the line.
///
/// Text which is empty or whitespace-only produces no lines at all.
pub fn wrap_text(text: &str, font: &Font, size: Pt, max_width: Pt) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    // normalize newlines
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let space_width = width_of_text(" ", font, size);

    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = Pt(0.0);

        for word in paragraph.split_whitespace() {
            let word_width = width_of_text(word, font, size);

            if !line.is_empty() {
                if line_width + space_width + word_width <= max_width {
                    line.push(' ');
                    line.push_str(word);
                    line_width += space_width + word_width;
                    continue;
                }
                lines.push(std::mem::take(&mut line));
            }

            if word_width <= max_width {
                line.push_str(word);
                line_width = word_width;
            } else {
                // no break point within the word - force character breaks
                line_width = Pt(0.0);
                for ch in word.chars() {
                    let advance = font.advance(ch, size);
                    if !line.is_empty() && line_width + advance > max_width {
                        lines.push(std::mem::take(&mut line));
                        line_width = Pt(0.0);
                    }
                    line.push(ch);
                    line_width += advance;
                }
            }
        }

        lines.push(line);
    }

    // trailing newlines don't make trailing blank lines
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines
}

/// Shortens `text` until it, followed by `suffix`, is no wider than `max_width`.
/// Text that already fits is returned with the suffix appended if it still fits.
pub fn truncate_to_width(text: &str, suffix: &str, font: &Font, size: Pt, max_width: Pt) -> String {
    let suffix_width = width_of_text(suffix, font, size);
    let mut kept = String::new();
    let mut width = Pt(0.0);
    for ch in text.chars() {
        let advance = font.advance(ch, size);
        if width + advance + suffix_width > max_width {
            break;
        }
        kept.push(ch);
        width += advance;
    }
    let mut kept = kept.trim_end().to_string();
    kept.push_str(suffix);
    kept
}

/// The bounds of a shrink-to-fit search: start at `max`, reduce by `step` per
/// iteration, never go below `min`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FitRange {
    pub max: Pt,
    pub min: Pt,
    pub step: Pt,
}

/// The outcome of [fit_font_size]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontFit {
    /// The chosen font size
    pub size: Pt,
    /// How many times the size was reduced
    pub iterations: u32,
    /// Whether the text fits at the chosen size. When it doesn't, the size is `min`
    /// and the text is expected to be drawn anyway.
    pub fits: bool,
}

/// Finds the largest size in `max, max - step, ...` (clamped to `min`) at which `text`
/// is no wider than `available`. At most `ceil((max - min) / step)` reductions are made.
pub fn fit_font_size(text: &str, font: &Font, available: Pt, range: FitRange) -> FontFit {
    let mut size = range.max;
    let mut iterations = 0;
    let mut width = width_of_text(text, font, size);

    while width > available && size > range.min {
        size = if range.step.0 > 0.0 && size - range.step > range.min {
            size - range.step
        } else {
            range.min
        };
        iterations += 1;
        width = width_of_text(text, font, size);
    }

    FontFit {
        size,
        iterations,
        fits: width <= available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BuiltinFont;

    const NAME_RANGE: FitRange = FitRange {
        max: Pt(49.0),
        min: Pt(20.0),
        step: Pt(2.0),
    };

    fn helvetica() -> Font {
        Font::builtin(BuiltinFont::Helvetica)
    }

    #[test]
    fn width_scales_with_size() {
        let font = helvetica();
        let small = width_of_text("Jane Doe", &font, Pt(10.0));
        let large = width_of_text("Jane Doe", &font, Pt(20.0));
        assert!((large.0 - small.0 * 2.0).abs() < 0.001);
    }

    #[test]
    fn wrap_keeps_words_whole() {
        let font = helvetica();
        let max = width_of_text("alpha beta", &font, Pt(10.0)) + Pt(0.01);
        let lines = wrap_text("alpha beta gamma delta", &font, Pt(10.0), max);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
    }

    #[test]
    fn wrap_honours_newlines_and_blank_lines() {
        let font = helvetica();
        let lines = wrap_text("one\r\n\ntwo\n", &font, Pt(10.0), Pt(500.0));
        assert_eq!(lines, vec!["one", "", "two"]);
    }

    #[test]
    fn wrap_breaks_overlong_words() {
        let font = helvetica();
        let max = width_of_text("aaaa", &font, Pt(10.0)) + Pt(0.01);
        let lines = wrap_text("aaaaaaaaaa", &font, Pt(10.0), max);
        assert_eq!(lines, vec!["aaaa", "aaaa", "aa"]);
    }

    #[test]
    fn wrap_of_nothing_is_nothing() {
        assert!(wrap_text("  \n ", &helvetica(), Pt(10.0), Pt(100.0)).is_empty());
    }

    #[test]
    fn wrapped_lines_never_exceed_width() {
        let font = helvetica();
        let text = "The quick brown fox jumps over the lazy dog and keeps on running through the field";
        let max = Pt(120.0);
        for line in wrap_text(text, &font, Pt(12.0), max) {
            assert!(width_of_text(&line, &font, Pt(12.0)) <= max, "{line} overflows");
        }
    }

    #[test]
    fn fitting_name_keeps_maximum_size() {
        let fit = fit_font_size("Jane Doe", &helvetica(), Pt(537.0), NAME_RANGE);
        assert_eq!(fit.size, Pt(49.0));
        assert_eq!(fit.iterations, 0);
        assert!(fit.fits);
    }

    #[test]
    fn long_name_shrinks_in_steps() {
        let font = helvetica();
        let name = "Maximiliana Bartholomew-Featherstonehaugh";
        let fit = fit_font_size(name, &font, Pt(537.0), NAME_RANGE);
        assert!(fit.size < Pt(49.0));
        assert!(fit.iterations <= 15);
        assert!(fit.fits);
        // one step larger would not have fit
        assert!(width_of_text(name, &font, fit.size + Pt(2.0)) > Pt(537.0));
        assert_eq!((49.0 - fit.size.0) % 2.0, 0.0);
    }

    #[test]
    fn hopeless_name_stops_at_floor() {
        let name = "W".repeat(200);
        let fit = fit_font_size(&name, &helvetica(), Pt(537.0), NAME_RANGE);
        assert_eq!(fit.size, Pt(20.0));
        assert_eq!(fit.iterations, 15);
        assert!(!fit.fits);
    }

    #[test]
    fn sizes_are_odd_steps_or_the_floor() {
        let font = helvetica();
        for len in 1..120 {
            let fit = fit_font_size(&"m".repeat(len), &font, Pt(537.0), NAME_RANGE);
            let size = fit.size.0;
            assert!(size == 20.0 || (size >= 21.0 && size <= 49.0 && size % 2.0 == 1.0));
            assert!(fit.iterations <= 15);
        }
    }

    #[test]
    fn truncation_appends_suffix_within_width() {
        let font = helvetica();
        let max = width_of_text("hello w...", &font, Pt(10.0)) + Pt(0.01);
        let truncated = truncate_to_width("hello world", "...", &font, Pt(10.0), max);
        assert_eq!(truncated, "hello w...");
    }
}
