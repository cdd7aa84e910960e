use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::fact::Fact;

#[derive(Parser, Debug, Default)]
#[command(
    name = "archey",
    version,
    about = "Display prettified system information next to an Arch Linux logo",
    after_help = "Example:\n  archey --body-color 111 --name-color 150 --sep ' ->' --sep-color 191 \\\n    --shell-full --memory-unit mb --hide swap --paths /tmp,/usr --path-full"
)]
pub struct Cli {
    /// Config file (TOML, or JSON with a .json extension)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Facts to leave out
    #[arg(long, value_enum, value_delimiter = ',', value_name = "FACT")]
    pub hide: Vec<Fact>,

    /// Don't append the architecture to the OS name
    #[arg(long)]
    pub no_arch: bool,

    /// Separator between label and value
    #[arg(long)]
    pub sep: Option<String>,

    /// Unit for memory usage (mb, gb)
    #[arg(long, value_name = "UNIT")]
    pub memory_unit: Option<String>,

    /// Unit for swap usage (mb, gb)
    #[arg(long, value_name = "UNIT")]
    pub swap_unit: Option<String>,

    /// Unit for disk usage (mb, gb)
    #[arg(long, value_name = "UNIT")]
    pub disk_unit: Option<String>,

    /// Additional paths to report disk usage for
    #[arg(long, value_delimiter = ',', value_name = "PATH")]
    pub paths: Vec<String>,

    /// Label paths with their full path
    #[arg(long)]
    pub path_full: bool,

    /// Print the shell's full path instead of its name
    #[arg(long)]
    pub shell_full: bool,

    /// strftime format for "Up since"
    #[arg(long, value_name = "FORMAT")]
    pub up_since_format: Option<String>,

    /// Color of the labels
    #[arg(long, value_name = "COLOR")]
    pub name_color: Option<String>,

    /// Color of the values
    #[arg(long, value_name = "COLOR")]
    pub text_color: Option<String>,

    /// Color of the separator
    #[arg(long, value_name = "COLOR")]
    pub sep_color: Option<String>,

    /// Color of the logo; two comma-separated colors for upper and lower parts
    #[arg(long, value_name = "COLOR[,COLOR]")]
    pub body_color: Option<String>,

    /// Don't use any colors
    #[arg(short, long)]
    pub no_color: bool,

    /// Print all colors and styles
    #[arg(short, long)]
    pub list_colors: bool,

    /// Log probe details to stderr
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Overrides `config` with every flag given on the command line.
    pub fn apply_to(&self, config: &mut Config) {
        for fact in &self.hide {
            config.show.set(*fact, false);
        }

        let options = &mut config.options;
        options.no_arch |= self.no_arch;
        options.path_full |= self.path_full;
        options.shell_full |= self.shell_full;
        options.no_color |= self.no_color;
        override_with(&mut options.sep, &self.sep);
        override_with(&mut options.memory_unit, &self.memory_unit);
        override_with(&mut options.swap_unit, &self.swap_unit);
        override_with(&mut options.disk_unit, &self.disk_unit);
        override_with(&mut options.up_since_format, &self.up_since_format);
        if !self.paths.is_empty() {
            options.paths = self.paths.clone();
        }

        let colors = &mut config.colors;
        override_with(&mut colors.name, &self.name_color);
        override_with(&mut colors.text, &self.text_color);
        override_with(&mut colors.sep, &self.sep_color);
        override_with(&mut colors.body, &self.body_color);
    }
}

fn override_with(target: &mut Option<String>, flag: &Option<String>) {
    if let Some(value) = flag.as_ref().filter(|value| !value.is_empty()) {
        *target = Some(value.clone());
    }
}
