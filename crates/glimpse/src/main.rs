use crate::cli::Cli;
use crate::report::TextReport;
use anyhow::{Context as _, Error, anyhow};
use clap::Parser as _;
use css_visibility::StyleVisibility;
use html::{DomTree, NodeId, parse_html};
use log::{LevelFilter, debug, error};
use std::fs;
use std::io::{self, Read as _, Write as _};
use std::path::Path;
use std::process::ExitCode;
use visible_text::VisibleTextExtractor;

mod cli;
mod report;

pub fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(&cli).and_then(|output| write_output(&output)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn write_output(output: &str) -> Result<(), Error> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    stdout.flush()?;
    Ok(())
}

/// Load, parse and extract; returns what should be printed.
fn run(cli: &Cli) -> Result<String, Error> {
    let html = read_source(cli.path.as_deref())?;
    let tree = parse_html(&html)?;
    let (root, root_name) = resolve_root(&tree, cli.root_id.as_deref())?;

    let oracle = StyleVisibility::new(cli.visibility_options());
    let extractor = VisibleTextExtractor::new(&tree, oracle);
    let visible_text = extractor.extract(root)?;
    debug!("Extracted {} bytes of visible text", visible_text.len());

    if !cli.json {
        return Ok(visible_text);
    }
    let report = TextReport {
        source: cli.source_name(),
        root: root_name,
        fragments: extractor.visible_fragments(root)?.count(),
        visible_text,
    };
    Ok(serde_json::to_string(&report)?)
}

fn read_source(path: Option<&Path>) -> Result<String, Error> {
    let bytes = match path {
        Some(path) if path.as_os_str() != "-" => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        _ => {
            let mut buffer = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };
    // Pages in the wild are not always valid UTF-8.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn resolve_root(tree: &DomTree, root_id: Option<&str>) -> Result<(NodeId, String), Error> {
    match root_id {
        Some(id) => {
            let node = tree
                .element_by_id(id)
                .ok_or_else(|| anyhow!("no element with id {id:?}"))?;
            Ok((node, format!("#{id}")))
        }
        None => {
            let body = tree.body().ok_or_else(|| anyhow!("document has no body"))?;
            Ok((body, String::from("body")))
        }
    }
}
