use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError, Table};

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// PDF text and table extraction backed by `pdf-extract`.
///
/// Parsing is CPU-bound, so it runs on the blocking pool under a bounded
/// timeout. Table detection is a best-effort heuristic over extracted page
/// text: consecutive lines whose cells are separated by runs of two or
/// more spaces (or tabs) and share a column count form a table.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(data: &[u8]) -> Result<Vec<String>, FileLoaderError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        Ok(pages
            .into_iter()
            .filter(|p| !p.trim().is_empty())
            .collect())
    }

    async fn with_pages<T, W>(&self, data: &[u8], work: W) -> Result<T, FileLoaderError>
    where
        T: Send + 'static,
        W: FnOnce(Vec<String>) -> T + Send + 'static,
    {
        let data = data.to_vec();
        tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&data).map(work)),
        )
        .await
        .map_err(|_| FileLoaderError::Timeout)?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))?
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(skip_all, fields(bytes = data.len()))]
    async fn extract_text(&self, data: &[u8]) -> Result<String, FileLoaderError> {
        let text = self
            .with_pages(data, |pages| pages.join("\n"))
            .await?;
        tracing::info!(chars = text.chars().count(), "PDF text extraction complete");
        Ok(text)
    }

    #[tracing::instrument(skip_all, fields(bytes = data.len()))]
    async fn extract_tables(&self, data: &[u8]) -> Result<Vec<Table>, FileLoaderError> {
        let tables = self
            .with_pages(data, |pages| {
                pages
                    .iter()
                    .flat_map(|page| detect_tables(page))
                    .collect::<Vec<Table>>()
            })
            .await?;
        tracing::info!(table_count = tables.len(), "PDF table extraction complete");
        Ok(tables)
    }
}

fn detect_tables(page_text: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut current: Table = Vec::new();

    for line in page_text.lines() {
        match split_row(line) {
            Some(cells) if current.is_empty() || cells.len() == current[0].len() => {
                current.push(cells);
            }
            Some(cells) => {
                flush_table(&mut current, &mut tables);
                current.push(cells);
            }
            None => flush_table(&mut current, &mut tables),
        }
    }
    flush_table(&mut current, &mut tables);

    tables
}

/// A line qualifies as a table row when it splits into at least two cells.
fn split_row(line: &str) -> Option<Vec<String>> {
    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut space_run = 0usize;

    for ch in line.trim().chars() {
        if ch == '\t' {
            if !cell.trim().is_empty() {
                cells.push(cell.trim().to_string());
            }
            cell.clear();
            space_run = 0;
        } else if ch == ' ' {
            space_run += 1;
            cell.push(ch);
        } else {
            if space_run >= 2 && !cell.trim().is_empty() {
                cells.push(cell.trim().to_string());
                cell.clear();
            }
            space_run = 0;
            cell.push(ch);
        }
    }
    if !cell.trim().is_empty() {
        cells.push(cell.trim().to_string());
    }

    if cells.len() >= 2 { Some(cells) } else { None }
}

fn flush_table(current: &mut Table, tables: &mut Vec<Table>) {
    // A single qualifying line on its own is not a table.
    if current.len() >= 2 {
        tables.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_rows_on_wide_space_runs() {
        let cells = split_row("Region    Q1    Q2").unwrap();
        assert_eq!(cells, vec!["Region", "Q1", "Q2"]);
    }

    #[test]
    fn single_column_lines_are_not_rows() {
        assert!(split_row("Just a sentence with single spaces.").is_none());
    }

    #[test]
    fn groups_aligned_rows_into_one_table() {
        let page = "Quarterly results\nRegion    Q1    Q2\nNorth    10    12\nSouth    8    9\nEnd of table";
        let tables = detect_tables(page);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].len(), 3);
        assert_eq!(tables[0][1], vec!["North", "10", "12"]);
    }

    #[test]
    fn lone_aligned_line_is_discarded() {
        let tables = detect_tables("header    value\nplain prose follows here");
        assert!(tables.is_empty());
    }
}
