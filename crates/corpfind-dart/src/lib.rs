#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/corpfind/corpfind/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! DART registry provider.
//!
//! This crate provides access to Korea's DART disclosure registry:
//!
//! - Bulk company catalog download (`corpCode` ZIP archive) with XML
//!   extraction and parsing, implementing the [`CompanyFeed`] trait
//! - Single-company financial-statement relay for the surrounding API layer
//!
//! # Example
//!
//! ```no_run
//! use corpfind_dart::DartProvider;
//! use corpfind_core::{CompanyFeed, IndexConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = IndexConfig::new("my-dart-api-key");
//!     let provider = DartProvider::new(&config);
//!
//!     let records = provider.fetch_and_parse().await?;
//!     println!("Fetched {} companies", records.len());
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use corpfind_core::{CompanyFeed, CompanyRecord, CorpCode, CorpError, IndexConfig, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};
use std::path::PathBuf;
use tracing::{debug, warn};

/// DART API base URL.
const DART_BASE_URL: &str = "https://opendart.fss.or.kr/api";

/// Filename of the persisted feed archive.
const ARCHIVE_FILENAME: &str = "corpCode.zip";

/// Filename of the catalog document inside the archive.
const DOCUMENT_FILENAME: &str = "CORPCODE.xml";

/// Registry status code signalling a successful statement response.
const STATUS_OK: &str = "000";

/// DART report codes accepted by the statement endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReportCode {
    /// Annual business report (11011).
    #[default]
    Annual,
    /// Half-year report (11012).
    HalfYear,
    /// First-quarter report (11013).
    FirstQuarter,
    /// Third-quarter report (11014).
    ThirdQuarter,
}

impl ReportCode {
    /// Returns the registry's wire code for this report type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Annual => "11011",
            Self::HalfYear => "11012",
            Self::FirstQuarter => "11013",
            Self::ThirdQuarter => "11014",
        }
    }
}

impl std::fmt::Display for ReportCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// DART registry provider.
///
/// Downloads the bulk company catalog and relays financial statements.
/// Every request carries the caller-supplied API credential as a query
/// parameter and is bounded by the configured timeout.
#[derive(Debug)]
pub struct DartProvider {
    client: reqwest::Client,
    credential: String,
    artifact_dir: PathBuf,
}

impl DartProvider {
    /// Creates a new DART provider from the given configuration.
    ///
    /// # Example
    /// ```
    /// use corpfind_dart::DartProvider;
    /// use corpfind_core::IndexConfig;
    ///
    /// let provider = DartProvider::new(&IndexConfig::new("my-dart-api-key"));
    /// ```
    #[must_use]
    pub fn new(config: &IndexConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.refresh_timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            credential: config.registry_credential.clone(),
            artifact_dir: config.artifact_dir.clone(),
        }
    }

    /// Creates a new DART provider with a custom HTTP client.
    ///
    /// The client's own timeout applies; the configured refresh timeout is
    /// ignored.
    #[must_use]
    pub fn with_client(client: reqwest::Client, config: &IndexConfig) -> Self {
        Self {
            client,
            credential: config.registry_credential.clone(),
            artifact_dir: config.artifact_dir.clone(),
        }
    }

    /// Downloads the raw feed archive from the registry.
    async fn fetch_archive(&self) -> Result<Vec<u8>> {
        let url = format!("{DART_BASE_URL}/corpCode.xml");

        debug!("Fetching company catalog from {}", url);
        let response = self
            .client
            .get(&url)
            .query(&[("crtfc_key", self.credential.as_str())])
            .send()
            .await
            .map_err(|e| CorpError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CorpError::Fetch(format!(
                "Failed to fetch company catalog: HTTP {status}: {body}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CorpError::Fetch(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    /// Persists a feed artifact for caching/debugging.
    ///
    /// Persist failures are logged but never abort the refresh; the archive
    /// already in memory is what the pipeline consumes.
    async fn persist_artifact(&self, filename: &str, contents: &[u8]) {
        if let Err(e) = tokio::fs::create_dir_all(&self.artifact_dir).await {
            warn!(error = %e, "Failed to create artifact directory");
            return;
        }
        let path = self.artifact_dir.join(filename);
        if let Err(e) = tokio::fs::write(&path, contents).await {
            warn!(path = %path.display(), error = %e, "Failed to persist artifact");
        } else {
            debug!(path = %path.display(), "Persisted feed artifact");
        }
    }

    /// Fetches financial statements for a single company.
    ///
    /// Relays the registry's JSON response after checking its embedded
    /// `status` field; the surrounding API layer consumes the payload
    /// unmodified.
    ///
    /// # Arguments
    /// * `corp_code` - DART corporate code (8 digits)
    /// * `year` - Business year (e.g., 2023)
    /// * `report` - Which periodic report to fetch
    ///
    /// # Errors
    /// Returns [`CorpError::Fetch`] on transport failure or a non-OK
    /// registry status, [`CorpError::Parse`] when the response is not JSON.
    pub async fn fetch_statements(
        &self,
        corp_code: &CorpCode,
        year: i32,
        report: ReportCode,
    ) -> Result<serde_json::Value> {
        let url = format!("{DART_BASE_URL}/fnlttSinglAcnt.json");

        debug!(corp_code = %corp_code, year, report = %report, "Fetching financial statements");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("crtfc_key", self.credential.as_str()),
                ("corp_code", corp_code.as_str()),
                ("bsns_year", &year.to_string()),
                ("reprt_code", report.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CorpError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CorpError::Fetch(format!(
                "Failed to fetch statements for {corp_code}: HTTP {status}: {body}"
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| CorpError::Parse(format!("Failed to parse statement response: {e}")))?;

        let api_status = payload
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or_default();
        if api_status != STATUS_OK {
            let message = payload
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error");
            return Err(CorpError::Fetch(format!(
                "Registry rejected statement request ({api_status}): {message}"
            )));
        }

        Ok(payload)
    }
}

#[async_trait]
impl CompanyFeed for DartProvider {
    fn name(&self) -> &str {
        "DART"
    }

    async fn fetch_and_parse(&self) -> Result<Vec<CompanyRecord>> {
        let archive = self.fetch_archive().await?;
        self.persist_artifact(ARCHIVE_FILENAME, &archive).await;

        let document = extract_document(&archive)?;
        self.persist_artifact(DOCUMENT_FILENAME, document.as_bytes())
            .await;

        let records = parse_catalog(&document)?;
        debug!("Parsed {} company records", records.len());
        Ok(records)
    }
}

/// Extracts the single catalog document from the feed archive.
fn extract_document(archive: &[u8]) -> Result<String> {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive))
        .map_err(|e| CorpError::Parse(format!("Feed archive is not a valid ZIP: {e}")))?;

    // Fall back to the sole entry when a mirror renames the document.
    let index = zip
        .index_for_name(DOCUMENT_FILENAME)
        .or_else(|| (zip.len() == 1).then_some(0))
        .ok_or_else(|| {
            CorpError::Parse(format!("{DOCUMENT_FILENAME} not found in feed archive"))
        })?;
    let mut file = zip
        .by_index(index)
        .map_err(|e| CorpError::Parse(format!("Failed to read archive entry: {e}")))?;

    let mut document = String::new();
    file.read_to_string(&mut document)
        .map_err(|e| CorpError::Parse(format!("Failed to read catalog document: {e}")))?;

    Ok(document)
}

/// Parses the catalog document into company records.
///
/// The document is a sequence of `<list>` entries with child elements
/// `corp_code`, `corp_name`, `stock_code`, and `modify_date`; any missing
/// child defaults to an empty string.
fn parse_catalog(xml: &str) -> Result<Vec<CompanyRecord>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut buf = Vec::new();
    let mut entry: Option<CompanyRecord> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"list" => entry = Some(CompanyRecord::default()),
                b"corp_code" if entry.is_some() => field = Some(Field::CorpCode),
                b"corp_name" if entry.is_some() => field = Some(Field::CorpName),
                b"stock_code" if entry.is_some() => field = Some(Field::StockCode),
                b"modify_date" if entry.is_some() => field = Some(Field::ModifyDate),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if let (Some(record), Some(field)) = (entry.as_mut(), field) {
                    let text = t
                        .unescape()
                        .map_err(|e| CorpError::Parse(format!("Invalid text content: {e}")))?
                        .into_owned();
                    match field {
                        Field::CorpCode => record.corp_code = CorpCode::new(text),
                        Field::CorpName => record.corp_name = text,
                        Field::StockCode => record.stock_code = text,
                        Field::ModifyDate => record.modify_date = text,
                    }
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == b"list" {
                    if let Some(record) = entry.take() {
                        records.push(record);
                    }
                } else {
                    field = None;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(CorpError::Parse(format!("Malformed catalog document: {e}")));
            }
        }
        buf.clear();
    }

    Ok(records)
}

/// Field currently being read within a `<list>` entry.
#[derive(Clone, Copy, Debug)]
enum Field {
    CorpCode,
    CorpName,
    StockCode,
    ModifyDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<result>
    <list>
        <corp_code>00126380</corp_code>
        <corp_name>Samsung Electronics</corp_name>
        <stock_code>005930</stock_code>
        <modify_date>20240101</modify_date>
    </list>
    <list>
        <corp_code>00434003</corp_code>
        <corp_name>Unlisted Holding</corp_name>
        <stock_code> </stock_code>
        <modify_date>20230615</modify_date>
    </list>
</result>"#;

    fn make_archive(entry_name: &str, contents: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(entry_name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_parse_catalog() {
        let records = parse_catalog(SAMPLE_XML).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].corp_code.as_str(), "00126380");
        assert_eq!(records[0].corp_name, "Samsung Electronics");
        assert_eq!(records[0].stock_code, "005930");
        assert_eq!(records[0].modify_date, "20240101");
        assert!(records[0].is_listed());

        assert!(!records[1].is_listed());
    }

    #[test]
    fn test_parse_catalog_missing_fields_default_empty() {
        let xml = r#"<result>
            <list>
                <corp_code>00000001</corp_code>
                <corp_name>Bare Minimum</corp_name>
            </list>
        </result>"#;

        let records = parse_catalog(xml).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].stock_code, "");
        assert_eq!(records[0].modify_date, "");
    }

    #[test]
    fn test_parse_catalog_malformed() {
        let result = parse_catalog("<result><list><corp_code>123");
        assert!(matches!(result, Err(CorpError::Parse(_))));
    }

    #[test]
    fn test_parse_catalog_empty_document() {
        let records = parse_catalog("<result></result>").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_extract_document() {
        let archive = make_archive(DOCUMENT_FILENAME, SAMPLE_XML);
        let document = extract_document(&archive).unwrap();
        assert_eq!(document, SAMPLE_XML);
    }

    #[test]
    fn test_extract_document_single_entry_fallback() {
        let archive = make_archive("renamed.xml", SAMPLE_XML);
        let document = extract_document(&archive).unwrap();
        assert_eq!(document, SAMPLE_XML);
    }

    #[test]
    fn test_extract_document_not_a_zip() {
        let result = extract_document(b"definitely not a zip");
        assert!(matches!(result, Err(CorpError::Parse(_))));
    }

    #[test]
    fn test_report_codes() {
        assert_eq!(ReportCode::Annual.as_str(), "11011");
        assert_eq!(ReportCode::HalfYear.as_str(), "11012");
        assert_eq!(ReportCode::FirstQuarter.as_str(), "11013");
        assert_eq!(ReportCode::ThirdQuarter.as_str(), "11014");
        assert_eq!(ReportCode::default(), ReportCode::Annual);
    }

    #[tokio::test]
    async fn test_persist_artifact_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = IndexConfig::new("test-key").with_artifact_dir(dir.path());
        let provider = DartProvider::new(&config);

        provider.persist_artifact("sample.bin", b"payload").await;

        let written = tokio::fs::read(dir.path().join("sample.bin")).await.unwrap();
        assert_eq!(written, b"payload");
    }

    #[test]
    fn test_feed_name() {
        let provider = DartProvider::new(&IndexConfig::new("test-key"));
        assert_eq!(provider.name(), "DART");
    }
}
