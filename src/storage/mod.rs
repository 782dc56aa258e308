//! Case loading
//!
//! Cases are JSON documents. [`load_case`] parses one from memory and
//! [`CaseRepository`] abstracts where the documents live.

use crate::error::CaseError;
use crate::types::case::Case;
use async_trait::async_trait;
use std::path::PathBuf;

/// A parsed case together with the digest of the bytes it came from
#[derive(Debug, Clone, PartialEq)]
pub struct CaseFile {
    pub case: Case,
    /// md5 of the raw document, hex encoded
    pub digest: String,
}

/// Parse and validate a case document
pub fn load_case(bytes: &[u8]) -> Result<CaseFile, CaseError> {
    let digest = format!("{:x}", md5::compute(bytes));
    let case: Case = serde_json::from_slice(bytes)?;

    if case.initial_block.is_empty() {
        return Err(CaseError::invalid("no initial block"));
    }
    if case.block(&case.initial_block).is_none() {
        return Err(CaseError::invalid(format!(
            "initial block '{}' does not exist",
            case.initial_block
        )));
    }

    log::info!(
        "loaded case '{}' ({} blocks, digest {digest})",
        case.overview.name,
        case.buffers.len()
    );
    Ok(CaseFile { case, digest })
}

/// Somewhere cases can be read from
#[async_trait]
pub trait CaseRepository: Send + Sync {
    async fn load_case(&self, name: &str) -> Result<CaseFile, CaseError>;

    /// Names of every available case, sorted
    async fn list_cases(&self) -> Result<Vec<String>, CaseError>;
}

/// Cases stored as `<name>.json` in one directory
pub struct FileSystemCaseRepository {
    base_path: PathBuf,
}

impl FileSystemCaseRepository {
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn case_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{name}.json"))
    }
}

#[async_trait]
impl CaseRepository for FileSystemCaseRepository {
    async fn load_case(&self, name: &str) -> Result<CaseFile, CaseError> {
        let path = self.case_path(name);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CaseError::not_found(name));
            }
            Err(e) => return Err(CaseError::io(path.display().to_string(), e)),
        };
        load_case(&bytes)
    }

    async fn list_cases(&self) -> Result<Vec<String>, CaseError> {
        let dir = self.base_path.display().to_string();
        let mut entries = tokio::fs::read_dir(&self.base_path)
            .await
            .map_err(|e| CaseError::io(dir.clone(), e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CaseError::io(dir.clone(), e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
