//! Turn crawled web pages into a tabular dataset.
//!
//! The crawl itself happens elsewhere; this module only shapes its output
//! into one record per page so it can be analyzed like any upload.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DataQualityError, Result};
use crate::quality::DataQualityAnalyzer;
use crate::types::{DataSource, Dataset, Record, Value};

/// One page returned by a crawler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawledPage {
    pub source_url: Option<String>,
    pub title: Option<String>,
    pub markdown: Option<String>,
}

/// Build one record per page.
///
/// Columns: `id` (1-based), `url` (falls back to `fallback_url`), `title`
/// (`"N/A"` when absent), `content_length`, `word_count`, `crawled_at`.
pub fn records_from_pages(
    pages: &[CrawledPage],
    fallback_url: &str,
    crawled_at: DateTime<Utc>,
) -> Vec<Record> {
    let timestamp = crawled_at.to_rfc3339_opts(SecondsFormat::Millis, true);

    pages
        .iter()
        .enumerate()
        .map(|(index, page)| {
            let url = non_empty(&page.source_url).unwrap_or(fallback_url);
            let title = non_empty(&page.title).unwrap_or("N/A");
            let markdown = page.markdown.as_deref();

            let mut record = Record::with_capacity(6);
            record.insert("id".to_string(), Value::from(index + 1));
            record.insert("url".to_string(), Value::from(url));
            record.insert("title".to_string(), Value::from(title));
            record.insert(
                "content_length".to_string(),
                Value::from(markdown.map_or(0, |m| m.chars().count())),
            );
            record.insert(
                "word_count".to_string(),
                Value::from(markdown.map_or(0, |m| m.split(' ').count())),
            );
            record.insert("crawled_at".to_string(), Value::from(timestamp.clone()));
            record
        })
        .collect()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Display name for a crawl of `url`: `Web Crawl: <host>`.
pub fn dataset_name(url: &str) -> Result<String> {
    let parsed = Url::parse(url)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| DataQualityError::InvalidInput(format!("URL '{url}' has no host")))?;
    Ok(format!("Web Crawl: {host}"))
}

/// Shape `pages` into records and analyze them as a web dataset.
pub fn analyze_crawl(
    analyzer: &DataQualityAnalyzer,
    pages: &[CrawledPage],
    url: &str,
    crawled_at: DateTime<Utc>,
) -> Result<Dataset> {
    let name = dataset_name(url)?;
    let records = records_from_pages(pages, url, crawled_at);
    analyzer.analyze(records, name, DataSource::Web)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::cell;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn crawl_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_records_from_pages() {
        let pages = vec![
            CrawledPage {
                source_url: Some("https://example.com/a".to_string()),
                title: Some("Page A".to_string()),
                markdown: Some("hello big world".to_string()),
            },
            CrawledPage::default(),
        ];
        let records = records_from_pages(&pages, "https://example.com", crawl_time());

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].keys().collect::<Vec<_>>(),
            vec!["id", "url", "title", "content_length", "word_count", "crawled_at"]
        );
        assert_eq!(cell(&records[0], "id"), &Value::from(1));
        assert_eq!(cell(&records[0], "content_length"), &Value::from(15));
        assert_eq!(cell(&records[0], "word_count"), &Value::from(3));
        assert_eq!(
            cell(&records[0], "crawled_at"),
            &Value::from("2024-03-01T12:30:00.000Z")
        );

        assert_eq!(cell(&records[1], "id"), &Value::from(2));
        assert_eq!(cell(&records[1], "url"), &Value::from("https://example.com"));
        assert_eq!(cell(&records[1], "title"), &Value::from("N/A"));
        assert_eq!(cell(&records[1], "content_length"), &Value::from(0));
        assert_eq!(cell(&records[1], "word_count"), &Value::from(0));
    }

    #[test]
    fn test_word_count_splits_on_single_spaces() {
        let pages = vec![CrawledPage {
            markdown: Some("a  b".to_string()),
            ..CrawledPage::default()
        }];
        let records = records_from_pages(&pages, "https://example.com", crawl_time());

        assert_eq!(cell(&records[0], "word_count"), &Value::from(3));
    }

    #[test]
    fn test_dataset_name() {
        assert_eq!(
            dataset_name("https://docs.example.org/guide?x=1").unwrap(),
            "Web Crawl: docs.example.org"
        );
        assert_eq!(dataset_name("not a url").unwrap_err().error_code(), "URL_ERROR");
        assert_eq!(
            dataset_name("mailto:someone@example.com").unwrap_err().error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_analyze_crawl() {
        let pages = vec![CrawledPage::default(); 3];
        let dataset = analyze_crawl(
            &DataQualityAnalyzer::default(),
            &pages,
            "https://example.com",
            crawl_time(),
        )
        .unwrap();

        assert_eq!(dataset.name(), "Web Crawl: example.com");
        assert_eq!(dataset.source(), DataSource::Web);
        assert_eq!(dataset.row_count(), 3);
        assert!(!dataset.has_issues());
    }
}
