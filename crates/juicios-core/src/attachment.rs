//! Attachment naming: which uploads are accepted, how client filenames are
//! made safe, and the content-addressed names the file store writes under.

use sha2::{Digest, Sha256};

/// Fallback used when sanitizing leaves nothing behind.
pub const FALLBACK_NAME: &str = "attachment";

/// Whether an uploaded file is kept as an attachment.
///
/// Only the raw client filename is checked, and the suffix match is
/// case-sensitive: `scan.PDF` is ignored.
pub fn is_pdf(filename: &str) -> bool { filename.ends_with(".pdf") }

/// Reduce a client-supplied filename to a flat, portable name.
///
/// Path separators become word breaks, runs of whitespace become a single
/// `_`, anything outside `[A-Za-z0-9_.-]` is dropped, and leading or trailing
/// `.`/`_` are trimmed. The result never contains a directory component and
/// is never `.` or `..`.
///
/// ```
/// use juicios_core::attachment::sanitize_filename;
/// assert_eq!(sanitize_filename("../../evil.pdf"), "evil.pdf");
/// assert_eq!(sanitize_filename("My cool movie.pdf"), "My_cool_movie.pdf");
/// ```
pub fn sanitize_filename(filename: &str) -> String {
  let spaced: String = filename
    .chars()
    .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
    .collect();

  let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

  let kept: String = joined
    .chars()
    .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    .collect();

  let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
  if trimmed.is_empty() {
    FALLBACK_NAME.to_owned()
  } else {
    trimmed.to_owned()
  }
}

/// Whether `name` can be used as-is inside the flat upload directory.
pub fn is_safe_name(name: &str) -> bool { sanitize_filename(name) == name }

/// Content-addressed storage name: lowercase hex SHA-256 of `data` plus
/// `.pdf`. Identical uploads share a name; different uploads never collide.
pub fn storage_key(data: &[u8]) -> String {
  format!("{}.pdf", hex::encode(Sha256::digest(data)))
}
