use clap::Parser;
use css_visibility::VisibilityOptions;
use std::path::PathBuf;

/// Print the text a reader would see on an HTML page.
#[derive(Parser, Debug)]
#[command(name = "glimpse")]
#[command(version)]
pub struct Cli {
    /// HTML file to read. Reads stdin when omitted or `-`.
    pub path: Option<PathBuf>,

    /// Emit a JSON report instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Extract under the element with this id instead of <body>
    #[arg(long, value_name = "ID")]
    pub root_id: Option<String>,

    /// Keep text under `opacity: 0`
    #[arg(long)]
    pub no_opacity: bool,

    /// Keep text under `visibility: hidden`
    #[arg(long)]
    pub no_visibility: bool,

    /// Keep text under `content-visibility: auto`
    #[arg(long)]
    pub no_content_visibility_auto: bool,

    /// Enable debug logging
    #[arg(short, long, env = "GLIMPSE_DEBUG")]
    pub debug: bool,
}

impl Cli {
    pub fn visibility_options(&self) -> VisibilityOptions {
        VisibilityOptions {
            opacity_property: !self.no_opacity,
            visibility_property: !self.no_visibility,
            content_visibility_auto: !self.no_content_visibility_auto,
        }
    }

    /// Human-readable name of the input, as used in reports.
    pub fn source_name(&self) -> String {
        match &self.path {
            Some(path) if path.as_os_str() != "-" => path.display().to_string(),
            _ => String::from("<stdin>"),
        }
    }
}
