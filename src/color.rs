//! Color specifier resolution.
//!
//! A specifier is `fg[+attrs][:bg]` where a color is a basic name, `default`,
//! a 256-palette index or `#rrggbb`. Attributes: `h` high intensity, `b` bold,
//! `B` blink, `u` underline, `i` inverse. The bare token `reset` maps to the
//! reset sequence.
//!
//! SGR codes are written here from the crossterm [`Color`] value rather than
//! through crossterm's `Display`, which consults `NO_COLOR` on its own.

use crossterm::style::{Attribute, Color};

const RESET: &str = "\u{1b}[0m";

const NAMED: [&str; 8] = [
    "black", "red", "green", "yellow", "blue", "magenta", "cyan", "white",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{token}'")]
pub struct InvalidColorError {
    pub token: String,
}

impl InvalidColorError {
    fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

/// Where a color is used; each role carries its own fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Label,
    Separator,
    Value,
    ArtPrimary,
    ArtSecondary,
}

impl ColorRole {
    pub fn default_spec(self) -> &'static str {
        match self {
            ColorRole::Label => "111",
            ColorRole::Separator => "white",
            ColorRole::Value => "white+h",
            ColorRole::ArtPrimary => "111",
            ColorRole::ArtSecondary => "69",
        }
    }
}

/// Start and reset sequences for one colored span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paint {
    pub start: String,
    pub reset: String,
}

impl Paint {
    pub fn wrap(&self, text: &str) -> String {
        format!("{}{}{}", self.start, text, self.reset)
    }
}

/// Sequences substituted into the art template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtColors {
    pub primary: String,
    pub secondary: String,
    pub reset: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorResolver {
    enabled: bool,
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ColorResolver {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Resolves `spec` for `role`. An empty spec uses the role default.
    ///
    /// Specs are validated even when colors are disabled, so a bad config
    /// fails the same way with or without `--no-color`.
    pub fn resolve(&self, spec: &str, role: ColorRole) -> Result<Paint, InvalidColorError> {
        let spec = match spec.trim() {
            "" => role.default_spec(),
            s => s,
        };
        let style = Style::parse(spec)?;
        if !self.enabled {
            return Ok(Paint::default());
        }
        Ok(style.paint())
    }

    /// Resolves the art body spec: one token colors both regions, two
    /// comma-separated tokens color the upper and lower regions.
    pub fn resolve_body(&self, spec: &str) -> Result<ArtColors, InvalidColorError> {
        let tokens: Vec<&str> = if spec.trim().is_empty() {
            Vec::new()
        } else {
            spec.split(',').map(str::trim).collect()
        };

        // An empty side of a pair keeps that region's default.
        let (primary, secondary) = match tokens.as_slice() {
            [] => (
                self.resolve("", ColorRole::ArtPrimary)?,
                self.resolve("", ColorRole::ArtSecondary)?,
            ),
            [single] => {
                let paint = self.resolve(single, ColorRole::ArtPrimary)?;
                (paint.clone(), paint)
            }
            [upper, lower] => (
                self.resolve(upper, ColorRole::ArtPrimary)?,
                self.resolve(lower, ColorRole::ArtSecondary)?,
            ),
            _ => return Err(InvalidColorError::new(spec.trim())),
        };

        let reset = if self.enabled {
            RESET.to_string()
        } else {
            String::new()
        };
        Ok(ArtColors {
            primary: primary.start,
            secondary: secondary.start,
            reset,
        })
    }
}

enum Style {
    Reset,
    Styled {
        fg: Color,
        bg: Option<Color>,
        attributes: Vec<Attribute>,
    },
}

impl Style {
    fn parse(token: &str) -> Result<Self, InvalidColorError> {
        if token.eq_ignore_ascii_case("reset") {
            return Ok(Style::Reset);
        }
        let invalid = || InvalidColorError::new(token);

        let (fg_part, bg_part) = match token.split_once(':') {
            Some((fg, bg)) => (fg, Some(bg)),
            None => (token, None),
        };

        let (fg_name, modifiers) = fg_part.split_once('+').unwrap_or((fg_part, ""));
        let mut bright = false;
        let mut attributes = Vec::new();
        for m in modifiers.chars() {
            match m {
                'h' => bright = true,
                'b' => attributes.push(Attribute::Bold),
                'B' => attributes.push(Attribute::SlowBlink),
                'u' => attributes.push(Attribute::Underlined),
                'i' => attributes.push(Attribute::Reverse),
                _ => return Err(invalid()),
            }
        }
        let fg = parse_color(fg_name, bright).ok_or_else(invalid)?;

        let bg = match bg_part {
            Some(bg) => {
                let (bg_name, bg_bright) = match bg.split_once('+') {
                    Some((name, "h")) => (name, true),
                    Some(_) => return Err(invalid()),
                    None => (bg, false),
                };
                Some(parse_color(bg_name, bg_bright).ok_or_else(invalid)?)
            }
            None => None,
        };

        Ok(Style::Styled {
            fg,
            bg,
            attributes,
        })
    }

    fn paint(&self) -> Paint {
        match self {
            Style::Reset => Paint {
                start: RESET.to_string(),
                reset: RESET.to_string(),
            },
            Style::Styled {
                fg,
                bg,
                attributes,
            } => {
                let mut start = String::new();
                for attribute in attributes {
                    start.push_str(&format!("\u{1b}[{}m", attribute_code(*attribute)));
                }
                start.push_str(&format!("\u{1b}[{}m", color_code(*fg, Layer::Foreground)));
                if let Some(bg) = bg {
                    start.push_str(&format!("\u{1b}[{}m", color_code(*bg, Layer::Background)));
                }
                Paint {
                    start,
                    reset: RESET.to_string(),
                }
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Layer {
    Foreground,
    Background,
}

fn attribute_code(attribute: Attribute) -> u8 {
    match attribute {
        Attribute::Bold => 1,
        Attribute::Underlined => 4,
        Attribute::SlowBlink => 5,
        Attribute::Reverse => 7,
        _ => 0,
    }
}

/// SGR parameters for `color`, named colors as their 256-palette index.
fn color_code(color: Color, layer: Layer) -> String {
    let base = match layer {
        Layer::Foreground => 38,
        Layer::Background => 48,
    };
    let index = match color {
        Color::Reset => return (base + 1).to_string(),
        Color::Rgb { r, g, b } => return format!("{base};2;{r};{g};{b}"),
        Color::AnsiValue(n) => n,
        Color::Black => 0,
        Color::DarkRed => 1,
        Color::DarkGreen => 2,
        Color::DarkYellow => 3,
        Color::DarkBlue => 4,
        Color::DarkMagenta => 5,
        Color::DarkCyan => 6,
        Color::Grey => 7,
        Color::DarkGrey => 8,
        Color::Red => 9,
        Color::Green => 10,
        Color::Yellow => 11,
        Color::Blue => 12,
        Color::Magenta => 13,
        Color::Cyan => 14,
        Color::White => 15,
    };
    format!("{base};5;{index}")
}

fn parse_color(name: &str, bright: bool) -> Option<Color> {
    let pick = |normal: Color, high: Color| Some(if bright { high } else { normal });
    match name.to_ascii_lowercase().as_str() {
        "black" => pick(Color::Black, Color::DarkGrey),
        "red" => pick(Color::DarkRed, Color::Red),
        "green" => pick(Color::DarkGreen, Color::Green),
        "yellow" => pick(Color::DarkYellow, Color::Yellow),
        "blue" => pick(Color::DarkBlue, Color::Blue),
        "magenta" => pick(Color::DarkMagenta, Color::Magenta),
        "cyan" => pick(Color::DarkCyan, Color::Cyan),
        "white" => pick(Color::Grey, Color::White),
        "default" => Some(Color::Reset),
        hex if hex.starts_with('#') => parse_hex_color(hex),
        code => code.parse::<u8>().ok().map(Color::AnsiValue),
    }
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let rgb = u32::from_str_radix(hex, 16).ok()?;
    Some(Color::Rgb {
        r: ((rgb >> 16) & 0xFF) as u8,
        g: ((rgb >> 8) & 0xFF) as u8,
        b: (rgb & 0xFF) as u8,
    })
}

/// Samples of every named color and the 256-color palette, each in its own
/// color unless `resolver` is disabled.
pub fn palette_listing(resolver: &ColorResolver) -> String {
    let sample = |spec: &str, text: String| match resolver.resolve(spec, ColorRole::Value) {
        Ok(paint) => paint.wrap(&text),
        Err(_) => text,
    };

    let mut out = String::from("Named colors:\n");
    for name in NAMED {
        for spec in [name.to_string(), format!("{name}+h")] {
            out.push_str(&format!("  {}", sample(&spec, format!("{spec:<10}"))));
        }
        out.push('\n');
    }

    out.push_str(
        "\nAttributes: +h high intensity, +b bold, +B blink, +u underline, +i inverse\n",
    );
    out.push_str("Background: append :<color>, e.g. white+b:blue\n\nPalette:\n");
    for row in 0..16u16 {
        for col in 0..16u16 {
            let code = row * 16 + col;
            out.push_str(&format!("{} ", sample(&code.to_string(), format!("{code:>3}"))));
        }
        out.push('\n');
    }
    out
}
