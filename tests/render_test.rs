//! Rendering against the bundled Arch logo.

use archey::ascii::{self, Template};
use archey::color::ArtColors;
use archey::fact::{self, FactOptions};
use archey::system::SystemInfo;
use archey::ui::ColorScheme;
use archey::{Config, FactLine, RenderOptions, Renderer};
use pretty_assertions::assert_eq;

const ART_ROWS: usize = 19;

fn plain() -> RenderOptions {
    RenderOptions {
        color_enabled: false,
        ..RenderOptions::default()
    }
}

fn numbered(count: usize) -> Vec<FactLine> {
    (0..count)
        .map(|i| FactLine::new(format!("Fact{i}"), format!("value {i}")))
        .collect()
}

#[test]
fn empty_render_is_the_bare_logo() {
    let out = Renderer::default().render(&[], &plain()).unwrap();
    let rows: Vec<&str> = out.lines().collect();
    assert_eq!(rows.len(), ART_ROWS + 1);
    assert_eq!(rows[0], format!("{:>20}{:20}", "##", ""));
    assert_eq!(rows[ART_ROWS], "");
    assert!(out.ends_with("\n\n"));
}

#[test]
fn lines_within_capacity_land_on_their_rows() {
    let facts = numbered(5);
    let out = Renderer::default().render(&facts, &plain()).unwrap();
    let rows: Vec<&str> = out.lines().collect();
    assert_eq!(rows.len(), ART_ROWS + 1);
    for (i, row) in rows.iter().take(5).enumerate() {
        assert!(row.ends_with(&format!("Fact{i}: value {i}")), "row {i}: {row}");
        assert_eq!(out.matches(&format!("Fact{i}:")).count(), 1);
    }
    assert!(rows[5].trim_end().ends_with('#'));
}

#[test]
fn exactly_full_logo_ends_with_the_blank_row() {
    let facts = numbered(ART_ROWS);
    let out = Renderer::default().render(&facts, &plain()).unwrap();
    let rows: Vec<&str> = out.lines().collect();
    assert_eq!(rows.len(), ART_ROWS + 1);
    let last = ART_ROWS - 1;
    assert!(rows[last].ends_with(&format!("Fact{last}: value {last}")));
    assert_eq!(rows[ART_ROWS], "");
    let indent = " ".repeat(Template::default().indent());
    assert!(rows.iter().all(|row| !row.starts_with(&format!("{indent}Fact"))));
}

#[test]
fn overflow_rows_are_indented_below_the_logo() {
    let facts = numbered(ART_ROWS + 3);
    let out = Renderer::default().render(&facts, &plain()).unwrap();
    let rows: Vec<&str> = out.lines().collect();
    assert_eq!(rows.len(), ART_ROWS + 3 + 1);

    let indent = " ".repeat(Template::default().indent());
    for (offset, row) in rows[ART_ROWS..ART_ROWS + 3].iter().enumerate() {
        let i = ART_ROWS + offset;
        assert_eq!(*row, format!("{indent}Fact{i}: value {i}"));
    }
    assert_eq!(rows.last(), Some(&""));
}

#[test]
fn three_row_example() {
    let template = Template::parse("$1#$0 $i\n$1##$0 $i\n$2###$0 $i\n");
    let lines = ["OS: Linux", "Kernel: 6.1", "User: alex", "Shell: bash"];
    let out = ascii::render(&lines, &template, &ArtColors::default());
    assert_eq!(
        out,
        "# OS: Linux\n## Kernel: 6.1\n### User: alex\n    Shell: bash\n\n"
    );

    let empty = ascii::render::<&str>(&[], &template, &ArtColors::default());
    assert_eq!(empty, "# \n## \n### \n\n");
}

#[test]
fn colored_render_uses_both_body_tones() {
    let options = RenderOptions {
        colors: ColorScheme {
            body: "1,4".to_string(),
            ..ColorScheme::default()
        },
        ..RenderOptions::default()
    };
    let out = Renderer::default().render(&numbered(1), &options).unwrap();
    assert!(out.starts_with("                  \u{1b}[38;5;1m##\u{1b}[0m"));
    assert!(out.contains("\u{1b}[38;5;4m"));
}

#[test]
fn bad_color_produces_no_output() {
    let options = RenderOptions {
        colors: ColorScheme {
            separator: "ultraviolet".to_string(),
            ..ColorScheme::default()
        },
        ..RenderOptions::default()
    };
    let err = Renderer::default().render(&numbered(3), &options).unwrap_err();
    assert_eq!(err.to_string(), "invalid color 'ultraviolet'");
}

#[test]
fn collected_facts_overflow_the_logo() {
    let info = SystemInfo {
        os_name: "Arch Linux".to_string(),
        ..SystemInfo::default()
    };
    let options = FactOptions::from_config(&Config::default()).unwrap();
    let facts = fact::collect(&info, &options);
    assert!(facts.len() > ART_ROWS);

    let out = Renderer::default().render(&facts, &plain()).unwrap();
    assert_eq!(out.lines().count(), facts.len() + 1);
    assert!(out.lines().nth(ART_ROWS).unwrap().trim_start().starts_with("Packages: None"));
}
