//! bramble CLI
//!
//! Parses an HTML file or string and prints the tree, an html5lib-style
//! dump, or JSON. Set `RUST_LOG=bramble=trace` to follow the tokenizer and
//! tree builder.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use bramble_dom::{DomTree, NodeId, NodeType};
use bramble_html::{ParseOutput, Parser, ParserConfig, WarningReporter, print_tree};
use clap::{Parser as ClapParser, ValueEnum};
use owo_colors::OwoColorize;
use serde_json::{Value, json};

/// How the parsed document is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented, colored tree
    Tree,
    /// html5lib-tests "#document" format
    Dump,
    /// `{quirks_mode, errors, tree}` as JSON
    Json,
}

/// bramble: a WHATWG HTML parser
#[derive(ClapParser, Debug)]
#[command(name = "bramble")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tree of a file
    bramble index.html

    # Parse inline HTML and list parse errors
    bramble --html '<b>1<p>2</b>3</p>' --errors

    # html5lib-style dump with scripting disabled
    bramble --format dump --no-scripting page.html
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// JSON parser config; flags given here override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Parse as if scripting were disabled (`<noscript>` content is markup)
    #[arg(long)]
    no_scripting: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "tree")]
    format: Format,

    /// List parse errors after the tree
    #[arg(long)]
    errors: bool,

    /// Print each distinct parse error to stderr as it happens
    #[arg(long)]
    warn: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let input = load_input(&cli)?;
    let config = load_config(&cli)?;
    log::debug!("parsing {} bytes with {config:?}", input.len());

    let parser = Parser::new(&input, DomTree::new(), &config);
    let output = if cli.warn {
        let mut reporter = WarningReporter::new();
        let output = parser.run_with_reporter(&mut reporter);
        log::info!("{} parse errors reported", reporter.count());
        output
    } else {
        parser.run()
    };

    match cli.format {
        Format::Tree => print_tree(&output.document, output.document.root(), 0),
        Format::Dump => print!("{}", output.document.dump()),
        Format::Json => {
            let json = json!({
                "quirks_mode": output.quirks_mode,
                "errors": output.errors,
                "tree": node_to_json(&output.document, NodeId::ROOT),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    if cli.errors && cli.format != Format::Json {
        print_errors(&output);
    }
    Ok(())
}

fn load_input(cli: &Cli) -> Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    } else {
        anyhow::bail!("nothing to parse: pass a FILE or --html")
    }
}

fn load_config(cli: &Cli) -> Result<ParserConfig> {
    let mut config = match cli.config {
        Some(ref path) => ParserConfig::from_path(path)?,
        None => ParserConfig::default(),
    };
    if cli.no_scripting {
        config.scripting_enabled = false;
    }
    Ok(config)
}

fn print_errors(output: &ParseOutput<DomTree>) {
    println!();
    if output.errors.is_empty() {
        println!("{}", "no parse errors".green());
        return;
    }
    println!("{}", format!("{} parse errors", output.errors.len()).bold());
    for error in &output.errors {
        println!("  {} {}", error.position.dimmed(), error.code.yellow());
    }
}

fn node_to_json(tree: &DomTree, id: NodeId) -> Value {
    let Some(node) = tree.get(id) else {
        return Value::Null;
    };
    let children: Vec<Value> = tree
        .children(id)
        .iter()
        .map(|&child| node_to_json(tree, child))
        .collect();

    match &node.node_type {
        NodeType::Document => json!({ "type": "document", "children": children }),
        NodeType::DocumentFragment => json!({ "type": "fragment", "children": children }),
        NodeType::Doctype(doctype) => json!({
            "type": "doctype",
            "name": doctype.name,
            "publicId": doctype.public_id,
            "systemId": doctype.system_id,
        }),
        NodeType::Element(data) => {
            let attributes: serde_json::Map<String, Value> = data
                .attrs
                .iter()
                .map(|attr| (attr.name.clone(), Value::String(attr.value.clone())))
                .collect();
            let mut element = json!({
                "type": "element",
                "tagName": data.tag_name,
                "namespace": data.namespace,
                "attributes": attributes,
                "children": children,
            });
            if let Some(contents) = data.template_contents {
                element["content"] = node_to_json(tree, contents);
            }
            element
        }
        NodeType::Text(text) => json!({ "type": "text", "data": text }),
        NodeType::Comment(text) => json!({ "type": "comment", "data": text }),
    }
}
