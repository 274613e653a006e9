//! File attachments and multipart form assembly.
//!
//! Callers hand files over in whatever shape is convenient (a bare path,
//! or a path plus the filename the server should see); everything is
//! normalized into [`FilePart`] triples at the API boundary before any
//! encoding happens. The opened file handles ride inside the multipart
//! body as streams and close when the body is dropped, on success and on
//! transport failure alike.

use crate::error::Result;
use crate::params::ParamList;
use std::path::PathBuf;
use tokio_util::io::ReaderStream;

/// Multipart field group for pre-built MIME messages.
pub const MESSAGE_FIELD: &str = "message";

/// Multipart field group for regular attachments.
pub const ATTACHMENT_FIELD: &str = "attachment";

/// Multipart field group for inline images referenced from HTML bodies.
pub const INLINE_FIELD: &str = "inline";

/// A file to attach, as callers may supply it.
///
/// The two shapes are resolved once, at the API boundary; nothing
/// downstream sees the distinction. A leading `@` on a path is stripped
/// before the file is opened (legacy curl-style convenience accepted by
/// older clients).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Bare filesystem path; the part filename is the path basename.
    Path(PathBuf),

    /// Path plus the filename to present to the server.
    Named {
        /// Filename sent in the part's `Content-Disposition`.
        filename: String,
        /// Local file to read.
        path: PathBuf,
    },
}

impl FileSource {
    /// Attach a file under its own basename.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Attach a file under a different remote filename.
    pub fn named(filename: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Named {
            filename: filename.into(),
            path: path.into(),
        }
    }

    /// Open the file and normalize into a part for the given field group.
    pub(crate) async fn open(self, field: &'static str) -> Result<FilePart> {
        let (filename, path) = match self {
            Self::Path(path) => {
                let path = strip_at(path);
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned());
                (filename, path)
            }
            Self::Named { filename, path } => (Some(filename), strip_at(path)),
        };

        let file = tokio::fs::File::open(&path).await?;

        Ok(FilePart {
            field,
            filename,
            file,
        })
    }
}

impl From<&str> for FileSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<String> for FileSource {
    fn from(path: String) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl<N: Into<String>, P: Into<PathBuf>> From<(N, P)> for FileSource {
    fn from((filename, path): (N, P)) -> Self {
        Self::Named {
            filename: filename.into(),
            path: path.into(),
        }
    }
}

/// Strip the legacy `@` prefix from a path.
fn strip_at(path: PathBuf) -> PathBuf {
    match path.to_str().and_then(|s| s.strip_prefix('@')) {
        Some(stripped) => PathBuf::from(stripped),
        None => path,
    }
}

/// Normalized (field name, content stream, filename) triple, ready to
/// encode as one multipart part.
#[derive(Debug)]
pub struct FilePart {
    field: &'static str,
    filename: Option<String>,
    file: tokio::fs::File,
}

impl FilePart {
    /// Field name the part is posted under.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Filename sent in the part's `Content-Disposition`, if any.
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    fn into_part(self) -> (&'static str, reqwest::multipart::Part) {
        let body = reqwest::Body::wrap_stream(ReaderStream::new(self.file));
        let mut part = reqwest::multipart::Part::stream(body);
        if let Some(filename) = self.filename {
            part = part.file_name(filename);
        }
        (self.field, part)
    }
}

/// Files grouped by the three multipart field names the messages
/// endpoint understands.
///
/// # Example
///
/// ```rust
/// use turbomail::{AttachedFiles, FileSource};
///
/// let files = AttachedFiles::new()
///     .attachment("/tmp/report.pdf")
///     .attachment(FileSource::named("logo.png", "/tmp/assets/logo-v2.png"))
///     .inline("@/tmp/banner.jpg");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AttachedFiles {
    message: Vec<FileSource>,
    attachment: Vec<FileSource>,
    inline: Vec<FileSource>,
}

impl AttachedFiles {
    /// Create an empty set of attachments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a pre-built MIME message.
    pub fn message(mut self, source: impl Into<FileSource>) -> Self {
        self.message.push(source.into());
        self
    }

    /// Attach a regular file.
    pub fn attachment(mut self, source: impl Into<FileSource>) -> Self {
        self.attachment.push(source.into());
        self
    }

    /// Attach an ordered sequence of regular files.
    pub fn attachments<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FileSource>,
    {
        self.attachment.extend(sources.into_iter().map(Into::into));
        self
    }

    /// Attach an inline image.
    pub fn inline(mut self, source: impl Into<FileSource>) -> Self {
        self.inline.push(source.into());
        self
    }

    /// Attach an ordered sequence of inline images.
    pub fn inlines<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<FileSource>,
    {
        self.inline.extend(sources.into_iter().map(Into::into));
        self
    }

    /// Whether any group holds a file.
    pub fn is_empty(&self) -> bool {
        self.message.is_empty() && self.attachment.is_empty() && self.inline.is_empty()
    }

    /// Open every referenced file, in group order then insertion order.
    pub(crate) async fn open_all(self) -> Result<Vec<FilePart>> {
        let mut parts = Vec::new();
        for (field, sources) in [
            (MESSAGE_FIELD, self.message),
            (ATTACHMENT_FIELD, self.attachment),
            (INLINE_FIELD, self.inline),
        ] {
            for source in sources {
                parts.push(source.open(field).await?);
            }
        }
        Ok(parts)
    }
}

/// Encode data fields and file parts into one multipart form.
///
/// Each data pair becomes a text part named after its field; repeated
/// fields become repeated parts. File parts carry their filename when
/// one was resolved.
pub(crate) fn build_form(data: ParamList, files: Vec<FilePart>) -> reqwest::multipart::Form {
    let mut form = reqwest::multipart::Form::new();
    for (field, value) in data.into_pairs() {
        form = form.text(field, value);
    }
    for file in files {
        let (field, part) = file.into_part();
        form = form.part(field, part);
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_strip_at_prefix() {
        assert_eq!(
            strip_at(PathBuf::from("@/tmp/x.png")),
            PathBuf::from("/tmp/x.png")
        );
        assert_eq!(
            strip_at(PathBuf::from("/tmp/x.png")),
            PathBuf::from("/tmp/x.png")
        );
    }

    #[test]
    fn test_pair_becomes_named_source() {
        let source = FileSource::from(("a.png", "/tmp/x.png"));
        assert_eq!(
            source,
            FileSource::Named {
                filename: "a.png".to_string(),
                path: PathBuf::from("/tmp/x.png"),
            }
        );
    }

    #[tokio::test]
    async fn test_open_bare_path_uses_basename() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"contents").unwrap();

        let source = FileSource::path(tmp.path());
        let part = source.open(ATTACHMENT_FIELD).await.unwrap();

        assert_eq!(part.field(), "attachment");
        assert_eq!(
            part.filename(),
            tmp.path().file_name().and_then(|n| n.to_str())
        );
    }

    #[tokio::test]
    async fn test_open_named_source_keeps_remote_name() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"png bytes").unwrap();

        let source = FileSource::named("a.png", tmp.path());
        let part = source.open(INLINE_FIELD).await.unwrap();

        assert_eq!(part.field(), "inline");
        assert_eq!(part.filename(), Some("a.png"));
    }

    #[tokio::test]
    async fn test_open_strips_at_prefix_before_opening() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"x").unwrap();

        let at_path = format!("@{}", tmp.path().display());
        let part = FileSource::path(at_path).open(MESSAGE_FIELD).await.unwrap();

        assert_eq!(part.field(), "message");
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let result = tokio_test::block_on(
            FileSource::path("/nonexistent/definitely-not-here.bin").open(ATTACHMENT_FIELD),
        );

        assert_matches!(result, Err(Error::Io(_)));
    }

    #[tokio::test]
    async fn test_open_all_orders_groups() {
        let mut a = tempfile::NamedTempFile::new().unwrap();
        a.write_all(b"a").unwrap();
        let mut b = tempfile::NamedTempFile::new().unwrap();
        b.write_all(b"b").unwrap();

        let files = AttachedFiles::new()
            .inline(b.path().to_path_buf())
            .attachment(a.path().to_path_buf());

        let parts = files.open_all().await.unwrap();
        let fields: Vec<_> = parts.iter().map(|p| p.field()).collect();
        assert_eq!(fields, vec!["attachment", "inline"]);
    }
}
