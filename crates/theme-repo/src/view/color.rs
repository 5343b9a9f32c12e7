//! Theme color strings to terminal colors.
//!
//! Theme palettes are truecolor hex values. Terminals that cannot show
//! them get the nearest entry of the palette they do support, converted
//! once per frame over the whole buffer.

use ratatui::buffer::Buffer;
use ratatui::style::Color;
use std::str::FromStr;

/// Parse a theme color: `#rgb`, `#rrggbb`, or a named terminal color.
/// Anything else is `None`, and callers fall back to the terminal default.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() == 3 && hex.is_ascii() {
            let mut channels = hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            let r = channels.next()??;
            let g = channels.next()??;
            let b = channels.next()??;
            return Some(Color::Rgb(r, g, b));
        }
        if hex.len() != 6 {
            return None;
        }
    }
    Color::from_str(value).ok()
}

/// [`parse_color`], or [`Color::Reset`] when unparsable.
pub fn color_or_default(value: &str) -> Color {
    parse_color(value).unwrap_or(Color::Reset)
}

/// Text color readable on top of `background`.
pub fn contrasting_text(background: Color) -> Color {
    match background {
        Color::Rgb(r, g, b) => {
            // Rec. 601 luma
            let luma = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
            if luma > 128_000 {
                Color::Black
            } else {
                Color::White
            }
        }
        _ => Color::Reset,
    }
}

/// Terminal color capability levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    /// 24-bit RGB
    TrueColor,
    /// xterm 256-color palette
    Color256,
    /// Basic 16 ANSI colors
    Color16,
}

impl ColorCapability {
    /// Detect the terminal's color capability.
    /// `THEME_REPO_COLOR_MODE` (`truecolor`, `256`, `16`) overrides detection.
    pub fn detect() -> Self {
        Self::from_env(|key| std::env::var(key).ok())
    }

    fn from_env(env: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(mode) = env("THEME_REPO_COLOR_MODE") {
            match mode.to_lowercase().as_str() {
                "truecolor" | "24bit" => return Self::TrueColor,
                "256" => return Self::Color256,
                "16" => return Self::Color16,
                _ => {}
            }
        }

        let term = env("TERM").unwrap_or_default().to_lowercase();
        // Screen passes COLORTERM through but can't render truecolor
        if term.starts_with("screen") {
            return Self::Color256;
        }

        let colorterm = env("COLORTERM").unwrap_or_default().to_lowercase();
        if colorterm == "truecolor" || colorterm == "24bit" || term.contains("direct") {
            return Self::TrueColor;
        }

        match term.as_str() {
            "linux" | "cons25" | "dumb" => Self::Color16,
            _ => Self::Color256,
        }
    }
}

/// The 16 ANSI colors with their usual xterm RGB values.
const ANSI_16: [(Color, (u8, u8, u8)); 16] = [
    (Color::Black, (0, 0, 0)),
    (Color::Red, (205, 0, 0)),
    (Color::Green, (0, 205, 0)),
    (Color::Yellow, (205, 205, 0)),
    (Color::Blue, (0, 0, 238)),
    (Color::Magenta, (205, 0, 205)),
    (Color::Cyan, (0, 205, 205)),
    (Color::Gray, (229, 229, 229)),
    (Color::DarkGray, (127, 127, 127)),
    (Color::LightRed, (255, 0, 0)),
    (Color::LightGreen, (0, 255, 0)),
    (Color::LightYellow, (255, 255, 0)),
    (Color::LightBlue, (92, 92, 255)),
    (Color::LightMagenta, (255, 0, 255)),
    (Color::LightCyan, (0, 255, 255)),
    (Color::White, (255, 255, 255)),
];

/// Levels of the 6x6x6 cube in the 256-color palette.
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn distance((r1, g1, b1): (u8, u8, u8), (r2, g2, b2): (u8, u8, u8)) -> u32 {
    let dr = r1 as i32 - r2 as i32;
    let dg = g1 as i32 - g2 as i32;
    let db = b1 as i32 - b2 as i32;
    (dr * dr + dg * dg + db * db) as u32
}

fn nearest_cube_level(channel: u8) -> usize {
    CUBE_LEVELS
        .iter()
        .enumerate()
        .min_by_key(|(_, level)| (channel as i32 - **level as i32).abs())
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Nearest index in the 256-color palette: either a cube cell or one of
/// the 24 grays, whichever is closer.
fn rgb_to_256(rgb: (u8, u8, u8)) -> u8 {
    let (r, g, b) = rgb;
    let (ri, gi, bi) = (
        nearest_cube_level(r),
        nearest_cube_level(g),
        nearest_cube_level(b),
    );
    let cube_rgb = (CUBE_LEVELS[ri], CUBE_LEVELS[gi], CUBE_LEVELS[bi]);
    let cube_index = 16 + 36 * ri + 6 * gi + bi;

    let average = (r as u32 + g as u32 + b as u32) / 3;
    let gray_step = (average.saturating_sub(3) / 10).min(23) as u8;
    let gray_level = 8 + 10 * gray_step;
    let gray_rgb = (gray_level, gray_level, gray_level);

    if distance(rgb, gray_rgb) < distance(rgb, cube_rgb) {
        232 + gray_step
    } else {
        cube_index as u8
    }
}

fn rgb_to_16(rgb: (u8, u8, u8)) -> Color {
    ANSI_16
        .iter()
        .min_by_key(|(_, ansi)| distance(rgb, *ansi))
        .map(|(color, _)| *color)
        .unwrap_or(Color::Reset)
}

fn indexed_to_rgb(index: u8) -> Option<(u8, u8, u8)> {
    match index {
        0..=15 => Some(ANSI_16[index as usize].1),
        16..=231 => {
            let i = (index - 16) as usize;
            Some((CUBE_LEVELS[i / 36], CUBE_LEVELS[(i / 6) % 6], CUBE_LEVELS[i % 6]))
        }
        232..=255 => {
            let level = 8 + 10 * (index - 232);
            Some((level, level, level))
        }
    }
}

/// Convert one color for `capability`.
pub fn convert_color(color: Color, capability: ColorCapability) -> Color {
    match (capability, color) {
        (ColorCapability::TrueColor, _) => color,
        (ColorCapability::Color256, Color::Rgb(r, g, b)) => Color::Indexed(rgb_to_256((r, g, b))),
        (ColorCapability::Color16, Color::Rgb(r, g, b)) => rgb_to_16((r, g, b)),
        (ColorCapability::Color16, Color::Indexed(i)) => {
            indexed_to_rgb(i).map(rgb_to_16).unwrap_or(color)
        }
        _ => color,
    }
}

/// Convert every cell of a rendered frame for `capability`.
pub fn convert_buffer_colors(buffer: &mut Buffer, capability: ColorCapability) {
    if capability == ColorCapability::TrueColor {
        return;
    }
    for cell in buffer.content.iter_mut() {
        cell.fg = convert_color(cell.fg, capability);
        cell.bg = convert_color(cell.bg, capability);
    }
}
