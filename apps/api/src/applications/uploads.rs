//! Resume file intake.
//!
//! Files land under a single upload root with a name derived from the
//! submission time, the applicant and the original filename. Writes never
//! replace an existing file.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::applications::validation::ResumeUpload;
use crate::models::application::ApplicantDetails;
use crate::validation::ValidationError;

pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt", "rtf"];
const MAX_FILENAME_LEN: usize = 500;
/// Longest file name most filesystems accept (NAME_MAX).
const MAX_STORED_NAME_BYTES: usize = 255;
const MIB: usize = 1024 * 1024;

pub struct ResumeStorage {
    root: PathBuf,
    max_bytes: usize,
}

impl ResumeStorage {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Writes `bytes` to `<root>/<name>`, creating the root if needed.
    /// A partially written file is removed before the error is returned.
    pub async fn store(&self, name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        fs::create_dir_all(&self.root).await?;

        let path = self.root.join(name);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;

        let written = async {
            file.write_all(bytes).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            self.discard(&path).await;
            return Err(e);
        }

        Ok(path)
    }

    /// Best-effort removal; failures are logged, never returned.
    pub async fn discard(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove orphaned resume {}: {e}", path.display());
            }
        }
    }
}

/// `<YYYYMMDD_HHMMSS>_<first>_<last>_<original>` with everything outside
/// `[alphanumeric _ - .]` stripped. Names longer than 255 bytes lose the end
/// of their stem; the extension is kept.
pub fn storage_name(
    submitted_at: DateTime<Utc>,
    applicant: &ApplicantDetails,
    original_filename: &str,
) -> String {
    let candidate = format!(
        "{}_{}_{}_{}",
        submitted_at.format("%Y%m%d_%H%M%S"),
        applicant.first_name,
        applicant.last_name,
        original_filename
    );
    let sanitized: String = candidate
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    if sanitized.len() <= MAX_STORED_NAME_BYTES {
        return sanitized;
    }

    let (stem, extension) = match sanitized.rfind('.') {
        Some(dot) => sanitized.split_at(dot),
        None => (sanitized.as_str(), ""),
    };
    let mut cut = MAX_STORED_NAME_BYTES.saturating_sub(extension.len());
    while !stem.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}{}", &stem[..cut], extension)
}

pub fn check_filename(filename: Option<&str>) -> Result<&str, ValidationError> {
    let filename = filename
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ValidationError::new("resume", "Resume file is required"))?;

    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        let allowed: Vec<String> = ALLOWED_EXTENSIONS.iter().map(|e| format!(".{e}")).collect();
        return Err(ValidationError::new(
            "resume",
            format!("Invalid file type. Allowed: {}", allowed.join(", ")),
        ));
    }

    if filename.chars().count() > MAX_FILENAME_LEN {
        return Err(ValidationError::new(
            "resume",
            format!("Resume filename must be at most {MAX_FILENAME_LEN} characters"),
        ));
    }

    Ok(filename)
}

pub fn check_size(len: usize, max_bytes: usize) -> Result<(), ValidationError> {
    if len > max_bytes {
        return Err(ValidationError::new(
            "resume",
            format!("File size exceeds {} limit", describe_limit(max_bytes)),
        ));
    }
    Ok(())
}

/// Rejects a missing or unnamed file, a file type outside the allow-list, or
/// one larger than the limit. Returns the original filename and the content.
pub fn validate_resume(
    upload: Option<&ResumeUpload>,
    max_bytes: usize,
) -> Result<(&str, &Bytes), ValidationError> {
    let upload = upload.ok_or_else(|| ValidationError::new("resume", "Resume file is required"))?;
    let filename = check_filename(upload.filename.as_deref())?;
    check_size(upload.bytes.len(), max_bytes)?;
    Ok((filename, &upload.bytes))
}

fn describe_limit(max_bytes: usize) -> String {
    if max_bytes >= MIB && max_bytes % MIB == 0 {
        format!("{}MB", max_bytes / MIB)
    } else {
        format!("{max_bytes} byte")
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const LIMIT: usize = 5 * 1024 * 1024;

    fn applicant(first: &str, last: &str) -> ApplicantDetails {
        ApplicantDetails {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: "grace@example.com".to_string(),
            phone: "+14155550123".to_string(),
            linkedin_url: None,
            note: None,
        }
    }

    fn upload(name: &str, len: usize) -> ResumeUpload {
        ResumeUpload {
            filename: Some(name.to_string()),
            bytes: Bytes::from(vec![b'a'; len]),
        }
    }

    #[test]
    fn test_storage_name_format() {
        let at = Utc.with_ymd_and_hms(2025, 11, 15, 1, 33, 43).unwrap();
        assert_eq!(
            storage_name(at, &applicant("Grace", "Hopper"), "cv.pdf"),
            "20251115_013343_Grace_Hopper_cv.pdf"
        );
    }

    #[test]
    fn test_storage_name_strips_path_and_spaces() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let name = storage_name(at, &applicant("Mary Jane", "O'Neil"), "../../etc/my cv (1).pdf");
        assert_eq!(name, "20250102_030405_MaryJane_ONeil_....etcmycv1.pdf");
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_storage_name_keeps_unicode_letters() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let name = storage_name(at, &applicant("Zoë", "Ångström"), "résumé.docx");
        assert_eq!(name, "20250102_030405_Zoë_Ångström_résumé.docx");
    }

    #[test]
    fn test_storage_name_fits_name_max() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let original = format!("{}.pdf", "a".repeat(300));
        let name = storage_name(at, &applicant("Grace", "Hopper"), &original);
        assert_eq!(name.len(), 255);
        assert!(name.starts_with("20250102_030405_Grace_Hopper_aaa"));
        assert!(name.ends_with("a.pdf"));
    }

    #[test]
    fn test_storage_name_cut_respects_char_boundaries() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let first = "Å".repeat(100);
        let last = "ö".repeat(100);
        let original = format!("{}.docx", "é".repeat(400));
        let name = storage_name(at, &applicant(&first, &last), &original);
        assert!(name.len() <= 255);
        assert!(name.ends_with(".docx"));
        assert!(name.starts_with("20250102_030405_Å"));
    }

    #[tokio::test]
    async fn test_longest_accepted_filename_can_be_stored() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ResumeStorage::new(dir.path(), LIMIT);
        let original = format!("{}.pdf", "r".repeat(MAX_FILENAME_LEN - 4));
        let filename = check_filename(Some(&original)).unwrap();

        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let name = storage_name(at, &applicant(&"G".repeat(100), &"H".repeat(100)), filename);
        let path = storage.store(&name, b"%PDF").await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF");
    }

    #[test]
    fn test_allowed_extensions_case_insensitive() {
        for name in ["cv.pdf", "CV.PDF", "cv.doc", "cv.Docx", "cv.txt", "cv.rtf"] {
            assert_eq!(check_filename(Some(name)).unwrap(), name);
        }
    }

    #[test]
    fn test_rejected_extensions() {
        for name in ["cv.exe", "cv", ".pdf", "cv.pdf.exe", "cv.png"] {
            let err = check_filename(Some(name)).unwrap_err();
            assert_eq!(err.field, "resume");
            assert!(err.message.starts_with("Invalid file type"), "{name}");
        }
    }

    #[test]
    fn test_missing_filename() {
        assert_eq!(
            check_filename(None).unwrap_err().message,
            "Resume file is required"
        );
        assert!(check_filename(Some("  ")).is_err());
    }

    #[test]
    fn test_size_boundary() {
        assert!(validate_resume(Some(&upload("cv.pdf", LIMIT)), LIMIT).is_ok());
        let err = validate_resume(Some(&upload("cv.pdf", LIMIT + 1)), LIMIT).unwrap_err();
        assert_eq!(err.message, "File size exceeds 5MB limit");
    }

    #[test]
    fn test_missing_upload() {
        assert!(validate_resume(None, LIMIT).is_err());
    }

    #[test]
    fn test_describe_odd_limit() {
        assert_eq!(describe_limit(1000), "1000 byte");
    }

    #[tokio::test]
    async fn test_store_creates_root_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ResumeStorage::new(dir.path().join("nested/resumes"), LIMIT);

        let path = storage.store("a_cv.pdf", b"%PDF-1.7").await.unwrap();
        assert_eq!(path, dir.path().join("nested/resumes/a_cv.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7");
    }

    #[tokio::test]
    async fn test_store_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ResumeStorage::new(dir.path(), LIMIT);

        storage.store("same.pdf", b"first").await.unwrap();
        let err = storage.store("same.pdf", b"second").await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
        assert_eq!(std::fs::read(dir.path().join("same.pdf")).unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_discard_is_quiet_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ResumeStorage::new(dir.path(), LIMIT);

        let path = storage.store("gone.pdf", b"x").await.unwrap();
        storage.discard(&path).await;
        assert!(!path.exists());
        storage.discard(&path).await;
    }
}
