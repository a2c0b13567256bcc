pub mod demo;
pub mod find;
pub mod page;

use std::path::Path;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Write `content` to `output`, or to stdout when no path is given
pub fn emit(content: &str, output: Option<&Path>) -> CommandResult {
    if let Some(output_path) = output {
        std::fs::write(output_path, content)?;
        println!("✓ Rendered to {}", output_path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// Wrap the mount point's markup in its container element
pub fn document(mount: &str, markup: &str) -> String {
    format!("<main id=\"{}\">\n{}\n</main>", mount, markup)
}
