/*!
format.rs

Formatting primitives for human output.

Public API Summary:
  - Palette (clap value enum) / Style::new(palette, border, color)
  - Style::highlight / Style::error / Style::mark
  - Table::new(headers).align(..).row(..).render(&style)
  - snake_case_to_title_case, enabled_mark
  - value_to_string / settings_lines (settings maps as text)
  - parse_time_to_millis / format_millis

Nothing here prints; every helper returns a String. Colour is emitted only
when a palette is selected and no-colour mode is off.
*/

use std::borrow::Cow;

use crate::error::CliError;

/* -------------------------------------------------------------------------- */
/* Palettes                                                                   */
/* -------------------------------------------------------------------------- */

#[derive(clap::ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Palette {
    Red,
    Magenta,
    Purple,
    Blue,
    Cyan,
    Green,
    Yellow,
    Orange,
    White,
    Grey,
    Navy,
    Black,
}

type Rgb = (u8, u8, u8);

/// Border, odd rows, even rows, highlight.
struct Colours {
    border: Rgb,
    odd: Rgb,
    even: Rgb,
    highlight: Rgb,
}

impl Palette {
    fn colours(self) -> Colours {
        let c = |border, odd, even, highlight| Colours {
            border,
            odd,
            even,
            highlight,
        };
        match self {
            Palette::Red => c((0xD3, 0x2F, 0x2F), (0xFF, 0xCD, 0xD2), (0xEF, 0x9A, 0x9A), (0xEF, 0x9A, 0x9A)),
            Palette::Magenta => c((0xC2, 0x18, 0x5B), (0xF8, 0xBB, 0xD0), (0xF4, 0x8F, 0xB1), (0xF4, 0x8F, 0xB1)),
            Palette::Purple => c((0x7B, 0x1F, 0xA2), (0xE1, 0xBE, 0xE7), (0xCE, 0x93, 0xD8), (0xCE, 0x93, 0xD8)),
            Palette::Blue => c((0x19, 0x76, 0xD2), (0xE3, 0xF2, 0xFD), (0xBB, 0xDE, 0xFB), (0x19, 0x76, 0xD2)),
            Palette::Cyan => c((0x00, 0xBF, 0xCF), (0xE0, 0xF7, 0xFA), (0xB2, 0xEB, 0xF2), (0x00, 0xBF, 0xCF)),
            Palette::Green => c((0x43, 0xA0, 0x47), (0xE8, 0xF5, 0xE9), (0xC8, 0xE6, 0xC9), (0x43, 0xA0, 0x47)),
            Palette::Yellow => c((0xFB, 0xC0, 0x2D), (0xFF, 0xF9, 0xC4), (0xFF, 0xF5, 0x9D), (0xFB, 0xC0, 0x2D)),
            Palette::Orange => c((0xF5, 0x7C, 0x00), (0xFF, 0xF3, 0xE0), (0xFF, 0xE0, 0xB2), (0xF5, 0x7C, 0x00)),
            Palette::White => c((0xFF, 0xFF, 0xFF), (0xF0, 0xF0, 0xF0), (0xE0, 0xE0, 0xE0), (0xFF, 0xFF, 0xFF)),
            Palette::Grey => c((0x9E, 0x9E, 0x9E), (0xF5, 0xF5, 0xF5), (0xEE, 0xEE, 0xEE), (0x9E, 0x9E, 0x9E)),
            Palette::Navy => c((0x00, 0x1F, 0x3F), (0xCF, 0xE2, 0xF3), (0xA9, 0xCC, 0xE3), (0x00, 0x1F, 0x3F)),
            Palette::Black => c((0x00, 0x00, 0x00), (0x33, 0x33, 0x33), (0x44, 0x44, 0x44), (0x00, 0x00, 0x00)),
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Style                                                                      */
/* -------------------------------------------------------------------------- */

const RED: Rgb = (0xFF, 0x00, 0x00);
const GREEN: Rgb = (0x00, 0xC8, 0x53);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub palette: Option<Palette>,
    pub border: bool,
    pub color: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self::plain()
    }
}

impl Style {
    /// `color` is the caller's verdict on no-colour mode; it only takes
    /// effect when a palette is selected.
    pub fn new(palette: Option<Palette>, border: bool, color: bool) -> Self {
        Self {
            palette,
            border,
            color: color && palette.is_some(),
        }
    }

    /// No palette, bordered tables.
    pub fn plain() -> Self {
        Self::new(None, true, false)
    }

    fn colours(&self) -> Option<Colours> {
        if self.color {
            self.palette.map(Palette::colours)
        } else {
            None
        }
    }

    pub fn highlight(&self, text: impl AsRef<str>) -> String {
        match self.colours() {
            Some(c) => paint(c.highlight, text.as_ref()),
            None => text.as_ref().to_string(),
        }
    }

    pub fn error(&self, text: impl AsRef<str>) -> String {
        if self.color {
            paint(RED, text.as_ref())
        } else {
            text.as_ref().to_string()
        }
    }

    pub fn mark(&self, enabled: bool) -> String {
        enabled_mark(enabled, self.color)
    }
}

fn paint(rgb: Rgb, text: &str) -> String {
    let (r, g, b) = rgb;
    format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m")
}

fn bold(text: &str) -> String {
    format!("\x1b[1m{text}\x1b[0m")
}

/// Green `✓` / red `✗` in colour mode, `yes` / `no` otherwise.
pub fn enabled_mark(enabled: bool, color: bool) -> String {
    match (enabled, color) {
        (true, true) => paint(GREEN, "✓"),
        (false, true) => paint(RED, "✗"),
        (true, false) => "yes".to_string(),
        (false, false) => "no".to_string(),
    }
}

/* -------------------------------------------------------------------------- */
/* Table Rendering                                                            */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Rounded-border table. Cells may span several lines (`\n`).
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
}

const PAD: usize = 1;

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            aligns: vec![Align::Left; headers.len()],
            rows: Vec::new(),
        }
    }

    pub fn align(mut self, aligns: &[Align]) -> Self {
        for (slot, a) in self.aligns.iter_mut().zip(aligns) {
            *slot = *a;
        }
        self
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self, style: &Style) -> String {
        let cols = self.headers.len();
        if cols == 0 {
            return String::new();
        }

        let mut widths: Vec<usize> = self.headers.iter().map(|h| display_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                for line in cell.lines() {
                    widths[i] = widths[i].max(display_width(line));
                }
            }
        }

        let colours = style.colours();
        let border = |s: String| match &colours {
            Some(c) => paint(c.border, &s),
            None => s,
        };
        let rule = |left: char, mid: char, right: char| {
            let segs: Vec<String> = widths
                .iter()
                .map(|w| "─".repeat(w + PAD * 2))
                .collect();
            border(format!("{left}{}{right}", segs.join(&mid.to_string())))
        };

        let mut out: Vec<String> = Vec::new();

        let header_cells: Vec<String> = self
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let cell = pad(h, widths[i], Align::Center);
                if style.color { bold(&cell) } else { cell }
            })
            .collect();

        if style.border {
            out.push(rule('╭', '┬', '╮'));
            out.push(self.join_line(&header_cells, style, &border));
            out.push(rule('├', '┼', '┤'));
        } else {
            out.push(self.join_line(&header_cells, style, &border));
        }

        for (r, row) in self.rows.iter().enumerate() {
            let height = row.iter().map(|c| c.lines().count().max(1)).max().unwrap_or(1);
            let tint = colours.as_ref().map(|c| if r % 2 == 0 { c.even } else { c.odd });
            for line_idx in 0..height {
                let cells: Vec<String> = row
                    .iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        let line = cell.lines().nth(line_idx).unwrap_or("");
                        let padded = pad(line, widths[i], self.aligns[i]);
                        match tint {
                            Some(rgb) if !line.contains('\x1b') => paint(rgb, &padded),
                            _ => padded,
                        }
                    })
                    .collect();
                out.push(self.join_line(&cells, style, &border));
            }
        }

        if style.border {
            out.push(rule('╰', '┴', '╯'));
        }

        out.join("\n")
    }

    fn join_line(&self, cells: &[String], style: &Style, border: &dyn Fn(String) -> String) -> String {
        let space = " ".repeat(PAD);
        if style.border {
            let bar = border("│".to_string());
            let inner: Vec<String> = cells.iter().map(|c| format!("{space}{c}{space}")).collect();
            format!("{bar}{}{bar}", inner.join(&bar))
        } else {
            cells.join("  ").trim_end().to_string()
        }
    }
}

fn pad(s: &str, width: usize, align: Align) -> String {
    let len = display_width(s);
    if len >= width {
        return s.to_string();
    }
    let gap = width - len;
    match align {
        Align::Left => format!("{s}{}", " ".repeat(gap)),
        Align::Right => format!("{}{s}", " ".repeat(gap)),
        Align::Center => {
            let left = gap / 2;
            format!("{}{s}{}", " ".repeat(left), " ".repeat(gap - left))
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Text Helpers                                                               */
/* -------------------------------------------------------------------------- */

/// `hello_world` -> `Hello World`. Empty segments pass through.
pub fn snake_case_to_title_case(snake: &str) -> String {
    snake
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a settings value the way a user typed it: strings unquoted,
/// everything else as JSON.
pub fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `Title Key: value` lines sorted case-insensitively.
pub fn settings_lines(settings: &serde_json::Map<String, serde_json::Value>) -> String {
    let mut lines: Vec<String> = settings
        .iter()
        .map(|(k, v)| format!("{}: {}", snake_case_to_title_case(k), value_to_string(v)))
        .collect();
    lines.sort_by_key(|l| l.to_lowercase());
    lines.join("\n")
}

/// `SS`, `MM:SS` or `HH:MM:SS` to milliseconds.
pub fn parse_time_to_millis(input: &str) -> Result<u64, CliError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CliError::format(input, "empty time string"));
    }
    let parts: Vec<&str> = trimmed.split(':').collect();
    if parts.len() > 3 {
        return Err(CliError::format(input, "expected SS, MM:SS or HH:MM:SS"));
    }

    let mut seconds: u64 = 0;
    for part in parts {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CliError::format(
                input,
                format!("'{part}' is not a non-negative integer"),
            ));
        }
        let value: u64 = part
            .parse()
            .map_err(|_| CliError::format(input, format!("'{part}' is out of range")))?;
        seconds = seconds
            .checked_mul(60)
            .and_then(|s| s.checked_add(value))
            .ok_or_else(|| CliError::format(input, "time is out of range"))?;
    }
    seconds
        .checked_mul(1000)
        .ok_or_else(|| CliError::format(input, "time is out of range"))
}

/// Milliseconds to `MM:SS`, or `HH:MM:SS` once an hour is reached.
pub fn format_millis(millis: u64) -> String {
    let total = millis / 1000;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/* -------------------------------------------------------------------------- */
/* ANSI / Width Utilities                                                     */
/* -------------------------------------------------------------------------- */

pub(crate) fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        buf.push(ch);
    }
    Cow::Owned(buf)
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

/* -------------------------------------------------------------------------- */
/* Tests                                                                      */
/* -------------------------------------------------------------------------- */
