//! Static font-metric tables for the standard PDF base fonts.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Adobe core-font AFM files. They drive both the greedy word-wrap used by the
//! PDF exporter and the content-height estimate used for preview pagination.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// The three standard PDF font families every viewer ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PdfFont {
    /// Sans-serif stand-in for every sans web font in the catalog.
    Helvetica,
    /// Serif stand-in.
    Times,
    /// Monospace stand-in.
    Courier,
}

impl PdfFont {
    /// Base font name for the `/BaseFont` entry.
    pub fn base_font(&self, bold: bool) -> &'static str {
        match (self, bold) {
            (PdfFont::Helvetica, false) => "Helvetica",
            (PdfFont::Helvetica, true) => "Helvetica-Bold",
            (PdfFont::Times, false) => "Times-Roman",
            (PdfFont::Times, true) => "Times-Bold",
            (PdfFont::Courier, false) => "Courier",
            (PdfFont::Courier, true) => "Courier-Bold",
        }
    }
}

/// Bold faces run roughly this much wider than the regular tables.
const BOLD_WIDTH_FACTOR: f32 = 1.06;

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub font: PdfFont,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Width of `s` in points at `size_pt`.
    pub fn width_pt(&self, s: &str, size_pt: f32, bold: bool) -> f32 {
        let factor = if bold { BOLD_WIDTH_FACTOR } else { 1.0 };
        self.measure_str(s) * size_pt * factor
    }

    /// Greedy word-wrap of `text` into lines no wider than `max_width_pt`.
    ///
    /// A single word wider than the line is kept whole on its own line.
    /// Explicit newlines always start a new line; blank input yields no lines.
    pub fn wrap(&self, text: &str, size_pt: f32, bold: bool, max_width_pt: f32) -> Vec<String> {
        let factor = if bold { BOLD_WIDTH_FACTOR } else { 1.0 };
        let space_w = self.space_width * size_pt * factor;
        let mut lines = Vec::new();

        for paragraph in text.lines() {
            let mut current = String::new();
            let mut current_width = 0.0_f32;

            for word in paragraph.split_whitespace() {
                let word_w = self.width_pt(word, size_pt, bold);
                if current.is_empty() {
                    current.push_str(word);
                    current_width = word_w;
                } else if current_width + space_w + word_w > max_width_pt {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                    current_width = word_w;
                } else {
                    current.push(' ');
                    current.push_str(word);
                    current_width += space_w + word_w;
                }
            }

            if !current.is_empty() {
                lines.push(current);
            }
        }
        lines
    }

    /// Number of printed lines `text` occupies when wrapped at `max_width_pt`.
    pub fn estimated_lines(&self, text: &str, size_pt: f32, bold: bool, max_width_pt: f32) -> usize {
        self.wrap(text, size_pt, bold, max_width_pt).len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    font: PdfFont::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.54,
    space_width: 0.278,
};

static TIMES_TABLE: FontMetricTable = FontMetricTable {
    font: PdfFont::Times,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    average_char_width: 0.48,
    space_width: 0.250,
};

static COURIER_TABLE: FontMetricTable = FontMetricTable {
    font: PdfFont::Courier,
    widths: [0.600; 95],
    average_char_width: 0.600,
    space_width: 0.600,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: &PdfFont) -> &'static FontMetricTable {
    match font {
        PdfFont::Helvetica => &HELVETICA_TABLE,
        PdfFont::Times => &TIMES_TABLE,
        PdfFont::Courier => &COURIER_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(get_metrics(&PdfFont::Helvetica).measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        let metrics = get_metrics(&PdfFont::Helvetica);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!((width - 2.056).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(&PdfFont::Times);
        let width = metrics.measure_str("é");
        assert!((width - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_courier_is_monospaced() {
        let metrics = get_metrics(&PdfFont::Courier);
        assert_eq!(metrics.measure_str("iiii"), metrics.measure_str("MMMM"));
    }

    #[test]
    fn test_bold_is_wider() {
        let metrics = get_metrics(&PdfFont::Helvetica);
        assert!(metrics.width_pt("Acme", 10.0, true) > metrics.width_pt("Acme", 10.0, false));
    }

    #[test]
    fn test_wrap_blank_is_empty() {
        let metrics = get_metrics(&PdfFont::Helvetica);
        assert!(metrics.wrap("   ", 10.0, false, 200.0).is_empty());
        assert_eq!(metrics.estimated_lines("", 10.0, false, 200.0), 0);
    }

    #[test]
    fn test_wrap_respects_width() {
        let metrics = get_metrics(&PdfFont::Helvetica);
        let text = "word ".repeat(60);
        let lines = metrics.wrap(&text, 10.0, false, 200.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(metrics.width_pt(line, 10.0, false) <= 200.0 + 1e-3, "{line}");
        }
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.trim());
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines() {
        let metrics = get_metrics(&PdfFont::Times);
        let lines = metrics.wrap("first\nsecond", 10.0, false, 500.0);
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_overlong_word_kept_whole() {
        let metrics = get_metrics(&PdfFont::Courier);
        let lines = metrics.wrap("supercalifragilistic ok", 10.0, false, 30.0);
        assert_eq!(lines[0], "supercalifragilistic");
        assert_eq!(lines[1], "ok");
    }

    #[test]
    fn test_base_font_names() {
        assert_eq!(PdfFont::Times.base_font(false), "Times-Roman");
        assert_eq!(PdfFont::Helvetica.base_font(true), "Helvetica-Bold");
    }
}
