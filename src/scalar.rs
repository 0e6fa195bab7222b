//! Scalar formatting: canonical text for numbers and strings.
//!
//! Everything here is a pure function of its inputs. The emitter in
//! [`crate::dumper`] decides *where* a scalar goes; this module decides how
//! it is spelled.
//!
//! ## Floats
//!
//! ```rust
//! use yaml_stringify::scalar::{format_float, FloatCase};
//!
//! assert_eq!(format_float(4.1, FloatCase::Lowercase), "4.1");
//! assert_eq!(format_float(6.82e-5, FloatCase::Lowercase), "0.0000682");
//! assert_eq!(format_float(6.82e-12, FloatCase::Lowercase), "6.82e-12");
//! assert_eq!(format_float(5e-12, FloatCase::Lowercase), "5.e-12");
//! assert_eq!(format_float(-0.0, FloatCase::Lowercase), "-0.0");
//! assert_eq!(format_float(f64::NAN, FloatCase::Camelcase), ".NaN");
//! ```

/// Letter case used for `.inf` and `.nan`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatCase {
    Lowercase,
    Uppercase,
    Camelcase,
}

/// Decimal exponents inside `(-7, 21]` print positionally; everything else is exponential.
const MIN_DECIMAL_EXPONENT: i32 = -6;
const MAX_DECIMAL_EXPONENT: i32 = 21;

/// Formats a float the way the `float` type represents it.
///
/// Finite values use the shortest digit string that round-trips, laid out
/// positionally when the decimal exponent is small and exponentially otherwise.
/// An exponential mantissa without fraction digits gets a trailing `.` so the
/// text still resolves as a float (`5.e-12`).
#[must_use]
pub fn format_float(value: f64, case: FloatCase) -> String {
    if value.is_nan() {
        return match case {
            FloatCase::Lowercase => ".nan",
            FloatCase::Uppercase => ".NAN",
            FloatCase::Camelcase => ".NaN",
        }
        .to_string();
    }
    if value.is_infinite() {
        let text = match case {
            FloatCase::Lowercase => ".inf",
            FloatCase::Uppercase => ".INF",
            FloatCase::Camelcase => ".Inf",
        };
        return if value > 0.0 {
            text.to_string()
        } else {
            format!("-{}", text)
        };
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0" }.to_string();
    }

    let text = shortest_decimal(value);
    match text.find('e') {
        Some(pos) if text[..pos].bytes().all(|b| b.is_ascii_digit() || b == b'-') => {
            format!("{}.{}", &text[..pos], &text[pos..])
        }
        _ => text,
    }
}

/// Shortest round-trip rendering of a finite, non-zero float.
fn shortest_decimal(value: f64) -> String {
    // `{:e}` yields the shortest round-trip digits as `d[.ddd]e<exp>`.
    let sci = format!("{:e}", value.abs());
    let (mantissa, exponent) = match sci.split_once('e') {
        Some(parts) => parts,
        None => (sci.as_str(), "0"),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let k = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let n = exponent + 1;

    let mut out = String::with_capacity(digits.len() + 8);
    if value < 0.0 {
        out.push('-');
    }
    if k <= n && n <= MAX_DECIMAL_EXPONENT {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((n - k) as usize));
    } else if 0 < n && n <= MAX_DECIMAL_EXPONENT {
        out.push_str(&digits[..n as usize]);
        out.push('.');
        out.push_str(&digits[n as usize..]);
    } else if MIN_DECIMAL_EXPONENT < n && n <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-n) as usize));
        out.push_str(&digits);
    } else {
        let e = n - 1;
        out.push_str(&digits[..1]);
        if k > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if e < 0 { '-' } else { '+' });
        out.push_str(&e.unsigned_abs().to_string());
    }
    out
}

/// Radix used by the `int` type's styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntRadix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

/// Formats an integer with the prefix YAML 1.1 expects for its radix.
///
/// ```rust
/// use yaml_stringify::scalar::{format_int, IntRadix};
///
/// assert_eq!(format_int(-10, IntRadix::Binary), "-0b1010");
/// assert_eq!(format_int(8, IntRadix::Octal), "010");
/// assert_eq!(format_int(255, IntRadix::Hexadecimal), "0xFF");
/// ```
#[must_use]
pub fn format_int(value: i64, radix: IntRadix) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    match radix {
        IntRadix::Binary => format!("{}0b{:b}", sign, magnitude),
        IntRadix::Octal => format!("{}0{:o}", sign, magnitude),
        IntRadix::Decimal => value.to_string(),
        IntRadix::Hexadecimal => format!("{}0x{:X}", sign, magnitude),
    }
}

/// Textual style chosen for a string scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    Literal,
    Folded,
    DoubleQuoted,
}

/// YAML 1.1 spellings of booleans that YAML 1.2 reads as plain strings.
const DEPRECATED_BOOLEANS: [&str; 16] = [
    "y", "Y", "yes", "Yes", "YES", "on", "On", "ON", "n", "N", "no", "No", "NO", "off", "Off",
    "OFF",
];

/// Where and how a string scalar is being written.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ScalarContext {
    /// Spaces per nesting level.
    pub indent_per_level: usize,
    /// Nesting level of the node.
    pub level: usize,
    /// Preferred maximum line width; `None` disables folding.
    pub line_width: Option<usize>,
    /// Block styles are unavailable (mapping keys, flow collections).
    pub single_line_only: bool,
    /// Skip quoting YAML 1.1 boolean spellings.
    pub no_compat_mode: bool,
}

/// Renders `text` as a scalar, quoting or switching to a block style as needed.
///
/// `ambiguous` reports whether plain text would resolve to a non-string type.
pub(crate) fn render_string<F>(text: &str, ctx: &ScalarContext, ambiguous: F) -> String
where
    F: Fn(&str) -> bool,
{
    if text.is_empty() {
        return "''".to_string();
    }
    if !ctx.no_compat_mode && DEPRECATED_BOOLEANS.contains(&text) {
        return format!("'{}'", text);
    }

    let indent = ctx.indent_per_level * ctx.level.max(1);
    // Width shrinks with depth, but never below min(line_width, 40).
    let line_width = ctx.line_width.map(|w| w.min(40).max(w.saturating_sub(indent)));

    match choose_scalar_style(
        text,
        ctx.single_line_only,
        ctx.indent_per_level,
        line_width,
        ambiguous,
    ) {
        ScalarStyle::Plain => text.to_string(),
        ScalarStyle::SingleQuoted => format!("'{}'", text.replace('\'', "''")),
        ScalarStyle::Literal => format!(
            "|{}{}",
            block_header(text, ctx.indent_per_level),
            drop_ending_newline(&indent_string(text, indent))
        ),
        ScalarStyle::Folded => format!(
            ">{}{}",
            block_header(text, ctx.indent_per_level),
            drop_ending_newline(&indent_string(
                &fold_string(text, line_width.unwrap_or(usize::MAX)),
                indent
            ))
        ),
        ScalarStyle::DoubleQuoted => format!("\"{}\"", escape_string(text)),
    }
}

/// Picks the most readable style that can carry `text` unchanged.
///
/// Plain and single-quoted results never contain line breaks; folded is only
/// chosen when some line exceeds `line_width` and can be broken.
pub fn choose_scalar_style<F>(
    text: &str,
    single_line_only: bool,
    indent_per_level: usize,
    line_width: Option<usize>,
    ambiguous: F,
) -> ScalarStyle
where
    F: Fn(&str) -> bool,
{
    let chars: Vec<char> = text.chars().collect();
    let (first, last) = match (chars.first(), chars.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return ScalarStyle::SingleQuoted,
    };

    let mut has_line_break = false;
    let mut has_foldable_line = false;
    let mut previous_line_break: isize = -1;
    let mut plain = is_plain_safe_first(first) && !is_whitespace(last);

    let foldable = |end: usize, previous: isize| -> bool {
        match line_width {
            Some(width) => {
                let start = (previous + 1) as usize;
                end - start > width && chars.get(start) != Some(&' ')
            }
            None => false,
        }
    };

    for (i, &c) in chars.iter().enumerate() {
        if c == '\n' && !single_line_only {
            has_line_break = true;
            if line_width.is_some() {
                has_foldable_line = has_foldable_line || foldable(i, previous_line_break);
                previous_line_break = i as isize;
            }
        } else if !is_printable(c) {
            return ScalarStyle::DoubleQuoted;
        }
        plain = plain && is_plain_safe(c);
    }
    if !single_line_only {
        has_foldable_line = has_foldable_line || foldable(chars.len(), previous_line_break);
    }

    if !has_line_break && !has_foldable_line {
        return if plain && !ambiguous(text) {
            ScalarStyle::Plain
        } else {
            ScalarStyle::SingleQuoted
        };
    }
    // Block indentation indicators are a single digit.
    if indent_per_level > 9 && need_indent_indicator(text) {
        return ScalarStyle::DoubleQuoted;
    }
    if has_foldable_line {
        ScalarStyle::Folded
    } else {
        ScalarStyle::Literal
    }
}

#[inline]
fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

#[inline]
fn is_printable(c: char) -> bool {
    matches!(c as u32,
        0x20..=0x7E
        | 0xE000..=0xFFFD
        | 0x10000..=0x10FFFF
        | 0xA1..=0xD7FF)
        && c != '\u{2028}'
        && c != '\u{2029}'
        && c != '\u{FEFF}'
}

/// Characters allowed after the first one in a plain scalar.
#[inline]
fn is_plain_safe(c: char) -> bool {
    is_printable(c) && !matches!(c, ',' | '[' | ']' | '{' | '}' | ':' | '#')
}

/// Characters allowed to start a plain scalar: no whitespace and no indicator.
#[inline]
fn is_plain_safe_first(c: char) -> bool {
    is_printable(c)
        && !is_whitespace(c)
        && !matches!(
            c,
            '-' | '?'
                | ':'
                | ','
                | '['
                | ']'
                | '{'
                | '}'
                | '#'
                | '&'
                | '*'
                | '!'
                | '|'
                | '>'
                | '\''
                | '"'
                | '%'
                | '@'
                | '`'
        )
}

/// A block scalar starting with spaces (after any blank lines) needs an explicit indentation indicator.
fn need_indent_indicator(text: &str) -> bool {
    text.trim_start_matches('\n').starts_with(' ')
}

fn block_header(text: &str, indent_per_level: usize) -> String {
    let indicator = if need_indent_indicator(text) {
        indent_per_level.to_string()
    } else {
        String::new()
    };
    // A lone "\n" counts as a trailing empty line.
    let clip = text.ends_with('\n');
    let keep = clip && (text.ends_with("\n\n") || text == "\n");
    let chomp = if keep {
        "+"
    } else if clip {
        ""
    } else {
        "-"
    };
    format!("{}{}\n", indicator, chomp)
}

/// Drops one trailing newline; the document writer adds its own.
fn drop_ending_newline(text: &str) -> &str {
    text.strip_suffix('\n').unwrap_or(text)
}

/// Indents every non-empty line by `spaces`.
fn indent_string(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    let mut out = String::with_capacity(text.len() + spaces * 4);
    for line in text.split_inclusive('\n') {
        if line != "\n" {
            out.push_str(&pad);
        }
        out.push_str(line);
    }
    out
}

/// Folds long lines for the `>` style.
///
/// In folded style k consecutive newlines read back as k-1, except around
/// more-indented lines and at the very start or end.
fn fold_string(text: &str, width: usize) -> String {
    let first_end = text.find('\n').unwrap_or(text.len());
    let mut result = fold_line(&text[..first_end], width);
    let mut prev_more_indented = text.starts_with('\n') || text.starts_with(' ');

    let mut rest = &text[first_end..];
    while !rest.is_empty() {
        let after = rest.trim_start_matches('\n');
        let prefix = &rest[..rest.len() - after.len()];
        let line_end = after.find('\n').unwrap_or(after.len());
        let line = &after[..line_end];
        let more_indented = line.starts_with(' ');

        result.push_str(prefix);
        if !prev_more_indented && !more_indented && !line.is_empty() {
            result.push('\n');
        }
        result.push_str(&fold_line(line, width));

        prev_more_indented = more_indented;
        rest = &after[line_end..];
    }
    result
}

/// Greedy line breaking at single spaces.
///
/// Takes the longest piece under `width` each time, or the shortest piece over
/// it when no break fits. More-indented lines are never folded.
fn fold_line(line: &str, width: usize) -> String {
    if line.is_empty() || line.starts_with(' ') {
        return line.to_string();
    }

    let chars: Vec<char> = line.chars().collect();
    // start is inclusive; curr and next are exclusive ends of candidate pieces.
    let mut start = 0usize;
    let mut curr = 0usize;
    let mut result = String::with_capacity(line.len() + 8);

    for next in 0..chars.len().saturating_sub(1) {
        if chars[next] != ' ' || chars[next + 1] == ' ' {
            continue;
        }
        if next - start > width {
            let end = if curr > start { curr } else { next };
            result.push('\n');
            result.extend(&chars[start..end]);
            // The space at `end` becomes the line break.
            start = end + 1;
        }
        curr = next;
    }

    result.push('\n');
    if chars.len() - start > width && curr > start {
        result.extend(&chars[start..curr]);
        result.push('\n');
        result.extend(&chars[curr + 1..]);
    } else {
        result.extend(&chars[start..]);
    }
    result.split_off(1)
}

fn escape_sequence(c: char) -> Option<&'static str> {
    Some(match c {
        '\0' => "\\0",
        '\u{07}' => "\\a",
        '\u{08}' => "\\b",
        '\t' => "\\t",
        '\n' => "\\n",
        '\u{0B}' => "\\v",
        '\u{0C}' => "\\f",
        '\r' => "\\r",
        '\u{1B}' => "\\e",
        '"' => "\\\"",
        '\\' => "\\\\",
        '\u{85}' => "\\N",
        '\u{A0}' => "\\_",
        '\u{2028}' => "\\L",
        '\u{2029}' => "\\P",
        _ => return None,
    })
}

fn encode_hex(c: char) -> String {
    let code = c as u32;
    if code <= 0xFF {
        format!("\\x{:02X}", code)
    } else if code <= 0xFFFF {
        format!("\\u{:04X}", code)
    } else {
        format!("\\U{:08X}", code)
    }
}

/// Escapes the body of a double-quoted scalar.
#[must_use]
pub fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match escape_sequence(c) {
            Some(seq) => out.push_str(seq),
            None if is_printable(c) => out.push(c),
            None => out.push_str(&encode_hex(c)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_: &str) -> bool {
        false
    }

    fn ctx(level: usize) -> ScalarContext {
        ScalarContext {
            indent_per_level: 2,
            level,
            line_width: Some(80),
            single_line_only: false,
            no_compat_mode: false,
        }
    }

    #[test]
    fn test_float_layouts() {
        let lower = FloatCase::Lowercase;
        assert_eq!(format_float(-1.473, lower), "-1.473");
        assert_eq!(format_float(1.01, lower), "1.01");
        assert_eq!(format_float(0.000001, lower), "0.000001");
        assert_eq!(format_float(0.0000001, lower), "1.e-7");
        assert_eq!(format_float(1.5e-7, lower), "1.5e-7");
        assert_eq!(format_float(123456789012345680000.0, lower), "123456789012345680000");
        assert_eq!(format_float(1e21, lower), "1.e+21");
        assert_eq!(format_float(-2.5e300, lower), "-2.5e+300");
        assert_eq!(format_float(0.0, lower), "0");
    }

    #[test]
    fn test_special_float_cases() {
        assert_eq!(format_float(f64::INFINITY, FloatCase::Uppercase), ".INF");
        assert_eq!(format_float(f64::NEG_INFINITY, FloatCase::Camelcase), "-.Inf");
        assert_eq!(format_float(f64::NAN, FloatCase::Lowercase), ".nan");
    }

    #[test]
    fn test_int_radixes() {
        assert_eq!(format_int(5, IntRadix::Binary), "0b101");
        assert_eq!(format_int(-8, IntRadix::Octal), "-010");
        assert_eq!(format_int(-255, IntRadix::Hexadecimal), "-0xFF");
        assert_eq!(format_int(i64::MIN, IntRadix::Decimal), i64::MIN.to_string());
    }

    #[test]
    fn test_quoting_rules() {
        assert_eq!(render_string("foobar", &ctx(0), never), "foobar");
        assert_eq!(render_string("", &ctx(0), never), "''");
        assert_eq!(render_string("yes", &ctx(0), never), "'yes'");
        assert_eq!(render_string("true", &ctx(0), |s| s == "true"), "'true'");
        assert_eq!(render_string("it's: here", &ctx(0), never), "'it''s: here'");
        assert_eq!(render_string("- item", &ctx(0), never), "'- item'");
        assert_eq!(render_string("trailing ", &ctx(0), never), "'trailing '");
        assert_eq!(render_string("tab\there", &ctx(0), never), "\"tab\\there\"");
        assert_eq!(render_string("bell\u{7}", &ctx(0), never), "\"bell\\a\"");
        assert_eq!(render_string("nul\u{1}", &ctx(0), never), "\"nul\\x01\"");
        assert_eq!(render_string("café", &ctx(0), never), "café");
    }

    #[test]
    fn test_compat_mode_can_be_disabled() {
        let mut c = ctx(0);
        c.no_compat_mode = true;
        assert_eq!(render_string("yes", &c, never), "yes");
    }

    #[test]
    fn test_literal_block_chomping() {
        assert_eq!(render_string("a\nb", &ctx(1), never), "|-\n  a\n  b");
        assert_eq!(render_string("a\nb\n", &ctx(1), never), "|\n  a\n  b");
        assert_eq!(render_string("a\nb\n\n", &ctx(1), never), "|+\n  a\n  b\n");
        assert_eq!(render_string("  a\nb", &ctx(1), never), "|2-\n    a\n  b");
    }

    #[test]
    fn test_multiline_keys_are_double_quoted() {
        let mut c = ctx(1);
        c.single_line_only = true;
        assert_eq!(render_string("a\nb", &c, never), "\"a\\nb\"");
    }

    #[test]
    fn test_long_lines_fold() {
        let text = "word ".repeat(20) + "end";
        let out = render_string(&text, &ctx(0), never);
        assert!(out.starts_with(">-\n  "));
        for line in out.lines().skip(1) {
            assert!(line.len() <= 80, "line too long: {:?}", line);
        }
        let unfolded: String = out
            .lines()
            .skip(1)
            .map(str::trim_start)
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(unfolded, text);
    }

    #[test]
    fn test_unlimited_width_never_folds() {
        let text = "word ".repeat(40) + "end";
        assert_eq!(
            choose_scalar_style(&text, false, 2, None, never),
            ScalarStyle::Plain
        );
    }

    #[test]
    fn test_fold_line_breaks_greedily() {
        assert_eq!(fold_line("aaa bbb ccc", 5), "aaa\nbbb\nccc");
        assert_eq!(fold_line("aaaaaaaa bb", 5), "aaaaaaaa\nbb");
        assert_eq!(fold_line(" indented line", 3), " indented line");
    }
}
