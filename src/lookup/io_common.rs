use std::path::{Path, PathBuf};

/// Paths in the configuration are relative to the configuration file.
pub fn resolve_path(root: &Path, file_path: &str) -> PathBuf {
    let p = Path::new(file_path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

/// The input type, from the extension of the file.
pub fn infer_provider(path: &str) -> Option<&'static str> {
    let ext = Path::new(path).extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "csv" | "txt" => Some("csv"),
        "json" => Some("json"),
        "xlsx" | "xlsm" => Some("excel"),
        _ => None,
    }
}
