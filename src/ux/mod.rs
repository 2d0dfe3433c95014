use colored::Colorize;
use serde_json::Value;
use std::path::Path;

use crate::parse::FileSet;

pub fn print_extension_dashboard(files: &FileSet, archive_bytes: usize, out_path: &Path) {
    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━ Generated Extension ━━━━━━━━━━━━━━━━┓".bold()
    );
    println!(
        "  {}: {}   {}: {}B   {}: {}",
        "Files".green().bold(),
        files.len(),
        "Archive".cyan().bold(),
        archive_bytes,
        "Output".bold(),
        out_path.display()
    );
    println!("{}", "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold());

    for (i, (name, content)) in files.iter().enumerate() {
        println!("{}. {}  ({}B)", i + 1, name.green(), content.len());
    }
    println!();
}

pub fn print_workflow_dashboard(doc: &Value) {
    let name = doc
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("(unnamed)");
    let nodes = doc
        .get("nodes")
        .and_then(Value::as_array)
        .map(|n| n.len())
        .unwrap_or(0);

    println!(
        "\n{}",
        "┏━━━━━━━━━━━━━━━━━━━━ Generated Workflow ━━━━━━━━━━━━━━━━━┓".bold()
    );
    println!(
        "  {}: {}   {}: {}",
        "Name".green().bold(),
        name,
        "Nodes".cyan().bold(),
        nodes
    );
    println!("{}", "┗━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━┛".bold());
}
