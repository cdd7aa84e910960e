use crate::ascii::{self, Template};
use crate::color::{ColorResolver, ColorRole, InvalidColorError, Paint};
use crate::fact::FactLine;

pub const DEFAULT_SEPARATOR: &str = ":";

/// Colors for the three parts of an info line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinePaint {
    pub label: Paint,
    pub separator: Paint,
    pub value: Paint,
}

/// Formats `<label><sep> <value>`, each part wrapped in its own color.
pub fn format_line(label: &str, separator: &str, value: &str, paint: &LinePaint) -> String {
    let separator = if separator.is_empty() {
        DEFAULT_SEPARATOR
    } else {
        separator
    };
    format!(
        "{}{} {}",
        paint.label.wrap(label),
        paint.separator.wrap(separator),
        paint.value.wrap(value)
    )
}

/// Color specifiers as written by the user; empty means the role default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorScheme {
    pub label: String,
    pub separator: String,
    pub value: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub separator: String,
    pub colors: ColorScheme,
    pub color_enabled: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            colors: ColorScheme::default(),
            color_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    template: Template,
}

impl Renderer {
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Renders `facts` in order next to the art.
    ///
    /// Every color is resolved before any line is built, so an invalid
    /// specifier fails the whole call.
    pub fn render(
        &self,
        facts: &[FactLine],
        options: &RenderOptions,
    ) -> Result<String, InvalidColorError> {
        let resolver = ColorResolver::new(options.color_enabled);
        let colors = &options.colors;
        let paint = LinePaint {
            label: resolver.resolve(&colors.label, ColorRole::Label)?,
            separator: resolver.resolve(&colors.separator, ColorRole::Separator)?,
            value: resolver.resolve(&colors.value, ColorRole::Value)?,
        };
        let art = resolver.resolve_body(&colors.body)?;

        let lines: Vec<String> = facts
            .iter()
            .map(|fact| format_line(&fact.label, &options.separator, &fact.value, &paint))
            .collect();

        Ok(ascii::render(&lines, &self.template, &art))
    }
}
