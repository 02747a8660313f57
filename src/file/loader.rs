//! Document file loading.
//!
//! Files named `*.yaml` / `*.yml` are read as YAML, everything else as
//! JSON (relaxed unless the config disables it). A trailing `.gz` is
//! decompressed transparently and ignored when picking the format.

use crate::config::Config;
use crate::document::parser::{parse_json, parse_json_strict, parse_yaml};
use crate::document::tree::{DocTree, SourceFormat};
use anyhow::{Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Loads and parses a document file from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use docquill::config::Config;
/// use docquill::file::loader::load_document_file;
///
/// let tree = load_document_file("config.yaml", &Config::default()).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be read or decompressed
/// - The file contents do not parse in the detected format
pub fn load_document_file<P: AsRef<Path>>(path: P, config: &Config) -> Result<DocTree> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref).context("Failed to read file")?
    };

    let format = determine_format(path_ref);
    debug!(path = %path_ref.display(), ?format, gzipped = is_gzipped, "loading document");

    parse_content(&content, format, config)
        .with_context(|| format!("Failed to parse {}", path_ref.display()))
}

/// Parses text in the given format.
pub fn parse_content(content: &str, format: SourceFormat, config: &Config) -> Result<DocTree> {
    let root = match format {
        SourceFormat::Yaml => parse_yaml(content)?,
        SourceFormat::Json if config.lenient_json => parse_json(content)?,
        SourceFormat::Json => parse_json_strict(content)?,
    };
    Ok(DocTree::with_format(root, format))
}

/// Loads a document from any reader.
///
/// Gzip input is detected by its magic bytes. JSON is tried first and YAML
/// second, so the tree's format records which one matched.
pub fn load_document_from_reader<R: Read>(mut reader: R, config: &Config) -> Result<DocTree> {
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .context("Failed to read input")?;

    // Check for gzip magic bytes (0x1f 0x8b)
    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")?
    };

    if let Ok(tree) = parse_content(&content, SourceFormat::Json, config) {
        return Ok(tree);
    }

    parse_content(&content, SourceFormat::Yaml, config)
        .context("Failed to parse input: it is neither valid JSON nor valid YAML")
}

/// Loads a document from standard input.
pub fn load_document_from_stdin(config: &Config) -> Result<DocTree> {
    load_document_from_reader(std::io::stdin().lock(), config)
}

/// Determines the format from the file name, looking past a `.gz` suffix.
///
/// - `data.yaml` → YAML
/// - `data.yml.gz` → YAML
/// - `data.json` → JSON
pub fn determine_format<P: AsRef<Path>>(path: P) -> SourceFormat {
    let path_str = path.as_ref().to_string_lossy();
    let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

    if base.ends_with(".yaml") || base.ends_with(".yml") {
        SourceFormat::Yaml
    } else {
        SourceFormat::Json
    }
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}
