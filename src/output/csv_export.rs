use crate::output::OutputResult;
use crate::state::EmailRecord;
use crate::url::netloc;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

/// Column headers of the export, in order
const HEADERS: [&str; 3] = ["Email", "Page URL", "Page Title"];

/// Writes records as CSV (header row first, UTF-8)
///
/// The header is written even when there are no records.
///
/// # Example
///
/// ```
/// use mailsift::output::write_csv;
/// use mailsift::EmailRecord;
///
/// let records = vec![EmailRecord {
///     email: "info@example.com".to_string(),
///     page_url: "https://example.com/".to_string(),
///     page_title: "Home, sweet home".to_string(),
/// }];
///
/// let mut out = Vec::new();
/// write_csv(&records, &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "Email,Page URL,Page Title\ninfo@example.com,https://example.com/,\"Home, sweet home\"\n"
/// );
/// ```
pub fn write_csv<W: Write>(records: &[EmailRecord], writer: W) -> OutputResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(HEADERS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Writes records to a CSV file, replacing any existing file
pub fn export_csv(records: &[EmailRecord], path: &Path) -> OutputResult<()> {
    let file = File::create(path)?;
    write_csv(records, file)?;
    tracing::info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}

/// Default export file name for a crawl of `seed`: `emails_<domain>.csv`
///
/// A port separator becomes `_` so the name is valid on every platform.
pub fn default_export_path(seed: &Url) -> PathBuf {
    let domain = netloc(seed).replace(':', "_");
    PathBuf::from(format!("emails_{}.csv", domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(email: &str, title: &str) -> EmailRecord {
        EmailRecord {
            email: email.to_string(),
            page_url: "https://example.com/contact".to_string(),
            page_title: title.to_string(),
        }
    }

    #[test]
    fn test_header_only_when_empty() {
        let mut out = Vec::new();
        write_csv(&[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Email,Page URL,Page Title\n");
    }

    #[test]
    fn test_rows_in_order() {
        let records = vec![record("a@example.com", "Contact"), record("b@example.com", "N/A")];
        let mut out = Vec::new();
        write_csv(&records, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "a@example.com,https://example.com/contact,Contact");
        assert_eq!(lines[2], "b@example.com,https://example.com/contact,N/A");
    }

    #[test]
    fn test_quotes_and_unicode() {
        let records = vec![record("c@example.com", "Über \"uns\"")];
        let mut out = Vec::new();
        write_csv(&records, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("c@example.com,https://example.com/contact,\"Über \"\"uns\"\"\"\n"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("emails.csv");

        export_csv(&[record("a@example.com", "Home")], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Email,Page URL,Page Title\n"));
        assert!(content.contains("a@example.com"));
    }

    #[test]
    fn test_default_export_path() {
        let seed = Url::parse("https://www.example.com/start").unwrap();
        assert_eq!(
            default_export_path(&seed),
            PathBuf::from("emails_www.example.com.csv")
        );

        let seed = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(
            default_export_path(&seed),
            PathBuf::from("emails_127.0.0.1_8080.csv")
        );
    }
}
