use include_dir::{Dir, include_dir};
use unicode_width::UnicodeWidthStr;

use crate::color::ArtColors;

static LOGOS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/logos");

/// One piece of a template row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Primary,
    Secondary,
    Reset,
    Slot,
}

/// Parsed ASCII-art template.
///
/// Source markers: `$1` primary color, `$2` secondary color, `$0` reset,
/// `$i` an info slot and `$$` a literal dollar sign. Slots are numbered in
/// the order they appear, row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    rows: Vec<Vec<Segment>>,
    slots: usize,
    indent: usize,
}

impl Default for Template {
    fn default() -> Self {
        Self::bundled("arch").unwrap_or_else(|| Self::parse(""))
    }
}

impl Template {
    /// Looks up `logos/<name>.txt` among the embedded logos.
    pub fn bundled(name: &str) -> Option<Self> {
        let filename = format!("{}.txt", name);
        LOGOS_DIR
            .get_file(&filename)
            .and_then(|file| file.contents_utf8())
            .map(Self::parse)
    }

    pub fn parse(source: &str) -> Self {
        let source = source.strip_prefix('\n').unwrap_or(source);
        let source = source.strip_suffix('\n').unwrap_or(source);

        let rows: Vec<Vec<Segment>> = if source.is_empty() {
            Vec::new()
        } else {
            source.split('\n').map(parse_row).collect()
        };

        let slots = rows
            .iter()
            .flatten()
            .filter(|segment| **segment == Segment::Slot)
            .count();
        let indent = rows.iter().filter_map(|row| slot_column(row)).max().unwrap_or(0);

        Self {
            rows,
            slots,
            indent,
        }
    }

    pub fn rows(&self) -> &[Vec<Segment>] {
        &self.rows
    }

    /// Number of lines the art holds before overflow rows are needed.
    pub fn capacity(&self) -> usize {
        self.slots
    }

    /// Display column where slot text starts; overflow rows are indented to it.
    pub fn indent(&self) -> usize {
        self.indent
    }
}

fn parse_row(row: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut chars = row.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' {
            let marker = match chars.peek() {
                Some('0') => Some(Segment::Reset),
                Some('1') => Some(Segment::Primary),
                Some('2') => Some(Segment::Secondary),
                Some('i') => Some(Segment::Slot),
                Some('$') => {
                    chars.next();
                    text.push('$');
                    continue;
                }
                _ => None,
            };
            if let Some(marker) = marker {
                chars.next(); // consume marker
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(marker);
                continue;
            }
        }
        text.push(c);
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    segments
}

fn slot_column(row: &[Segment]) -> Option<usize> {
    let slot = row.iter().position(|segment| *segment == Segment::Slot)?;
    Some(
        row[..slot]
            .iter()
            .map(|segment| match segment {
                Segment::Text(text) => text.width(),
                _ => 0,
            })
            .sum(),
    )
}

/// Binds `lines` to the template slots and renders the block.
///
/// Lines beyond the template capacity become extra rows below the art,
/// indented to the slot column. The block always ends with one blank row.
pub fn render<S: AsRef<str>>(lines: &[S], template: &Template, colors: &ArtColors) -> String {
    let bound = lines.len().min(template.capacity());
    let (slotted, overflow) = lines.split_at(bound);
    let mut slotted = slotted.iter().map(|line| line.as_ref());

    let mut out = String::new();
    for row in template.rows() {
        for segment in row {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Primary => out.push_str(&colors.primary),
                Segment::Secondary => out.push_str(&colors.secondary),
                Segment::Reset => out.push_str(&colors.reset),
                Segment::Slot => out.push_str(slotted.next().unwrap_or("")),
            }
        }
        out.push('\n');
    }

    let indent = " ".repeat(template.indent());
    for line in overflow {
        out.push_str(&indent);
        out.push_str(line.as_ref());
        out.push('\n');
    }

    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn small() -> Template {
        Template::parse("\n$1/\\$0  $i\n$2||$0  $i\n$$$$  $i\n")
    }

    #[test]
    fn parse_counts_slots_and_indent() {
        let template = small();
        assert_eq!(template.rows().len(), 3);
        assert_eq!(template.capacity(), 3);
        assert_eq!(template.indent(), 4);
        assert_eq!(
            template.rows()[2],
            vec![Segment::Text("$$  ".to_string()), Segment::Slot]
        );
    }

    #[test]
    fn unknown_markers_stay_literal() {
        let template = Template::parse("$x $9 $");
        assert_eq!(
            template.rows()[0],
            vec![Segment::Text("$x $9 $".to_string())]
        );
        assert_eq!(template.capacity(), 0);
    }

    #[test]
    fn empty_source_has_no_rows() {
        let template = Template::parse("");
        assert!(template.rows().is_empty());
        assert_eq!(render::<&str>(&[], &template, &ArtColors::default()), "\n");
    }

    #[test]
    fn fills_slots_in_order_and_pads_the_rest() {
        let out = render(&["OS: Linux"], &small(), &ArtColors::default());
        assert_eq!(out, "/\\  OS: Linux\n||  \n$$  \n\n");
    }

    #[test]
    fn overflow_rows_follow_the_art() {
        let lines = ["OS: Linux", "Kernel: 6.1", "User: alex", "Shell: bash"];
        let out = render(&lines, &small(), &ArtColors::default());
        assert_eq!(
            out,
            "/\\  OS: Linux\n||  Kernel: 6.1\n$$  User: alex\n    Shell: bash\n\n"
        );
    }

    #[test]
    fn exactly_full_art_has_no_overflow_row() {
        let lines = ["OS: Linux", "Kernel: 6.1", "User: alex"];
        let out = render(&lines, &small(), &ArtColors::default());
        assert_eq!(out, "/\\  OS: Linux\n||  Kernel: 6.1\n$$  User: alex\n\n");
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn substitutes_art_colors() {
        let colors = ArtColors {
            primary: "<p>".to_string(),
            secondary: "<s>".to_string(),
            reset: "<r>".to_string(),
        };
        let out = render::<&str>(&[], &small(), &colors);
        assert_eq!(out, "<p>/\\<r>  \n<s>||<r>  \n$$  \n\n");
    }

    #[test]
    fn bundled_arch_logo() {
        let template = Template::default();
        assert_eq!(template.capacity(), 19);
        assert_eq!(template.rows().len(), 19);
        assert_eq!(template.indent(), 40);
        assert!(Template::bundled("missing").is_none());
    }
}
