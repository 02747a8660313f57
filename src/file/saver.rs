//! Document file saving.
//!
//! Trees are written back as pretty JSON or YAML depending on the target
//! name, through a temp file that is renamed over the destination.

use crate::config::Config;
use crate::document::serializer::{to_pretty_json, to_yaml};
use crate::document::tree::{DocTree, SourceFormat};
use crate::file::loader::determine_format;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Saves a document tree to `path`.
///
/// The output format follows the file name (`.yaml`/`.yml` write YAML,
/// anything else pretty JSON with `config.indent_size`). A `.gz` suffix
/// compresses the output.
///
/// # Examples
///
/// ```no_run
/// use docquill::config::Config;
/// use docquill::document::tree::DocTree;
/// use docquill::file::saver::save_document_file;
///
/// let tree = DocTree::from_json("{ a: 1 }").unwrap();
/// save_document_file("output.json", &tree, &Config::default()).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - Backup creation fails (if requested)
/// - Serialization fails
/// - Writing the temp file or renaming it onto the target fails
pub fn save_document_file<P: AsRef<Path>>(path: P, tree: &DocTree, config: &Config) -> Result<()> {
    let path = path.as_ref();
    let should_compress = path.to_string_lossy().ends_with(".gz");

    if config.create_backup && path.exists() {
        create_backup(path)?;
    }

    let format = determine_format(path);
    let mut text = render(tree, format, config)?;

    if config.trailing_newline {
        if !text.ends_with('\n') {
            text.push('\n');
        }
    } else {
        while text.ends_with('\n') {
            text.pop();
        }
    }

    debug!(path = %path.display(), ?format, compress = should_compress, "saving document");
    write_file_atomic(path, text.as_bytes(), should_compress)
}

/// Renders a tree as text in `format`.
pub fn render(tree: &DocTree, format: SourceFormat, config: &Config) -> Result<String> {
    match format {
        SourceFormat::Yaml => to_yaml(tree.root()),
        SourceFormat::Json => {
            let json_str = to_pretty_json(tree.root(), config.indent_size);
            serde_json::from_str::<serde_json::Value>(&json_str)
                .context("Generated invalid JSON - this is a bug in docquill's serialization")?;
            Ok(json_str)
        }
    }
}

/// Creates a backup of a file by copying it with a .bak extension.
fn create_backup<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut backup_path = path.to_path_buf();
    let original_name = backup_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    backup_path.set_file_name(format!("{}.bak", original_name));
    fs::copy(path, &backup_path).context("Failed to create backup")?;
    debug!(backup = %backup_path.display(), "created backup");
    Ok(())
}

/// Writes data to a file atomically, optionally compressing with gzip.
fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    let path = path.as_ref();
    let temp_path = path.with_extension("tmp");

    if compress {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&temp_path, data).context("Failed to write temp file")?;
    }

    fs::rename(&temp_path, path).context("Failed to rename temp file to target")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_json_uses_indent() {
        let tree = DocTree::from_json("{ a: [1] }").unwrap();
        let config = Config {
            indent_size: 4,
            ..Config::default()
        };
        assert_eq!(
            render(&tree, SourceFormat::Json, &config).unwrap(),
            "{\n    \"a\": [\n        1\n    ]\n}\n"
        );
    }

    #[test]
    fn test_render_yaml() {
        let tree = DocTree::from_json("{ hello: 25 }").unwrap();
        let yaml = render(&tree, SourceFormat::Yaml, &Config::default()).unwrap();
        assert_eq!(yaml, "hello: 25\n");
    }
}
