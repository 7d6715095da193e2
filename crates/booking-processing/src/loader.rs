//! Loading booking files into a [`DataFrame`].
//!
//! A failed load is final for that call: the caller gets a
//! [`CleaningError::Load`] (or `None` from [`Loader::try_load`]) and decides
//! whether to try another path.

use crate::config::LoaderOptions;
use crate::error::{CleaningError, Result};
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Reads delimited booking files with the configured parse options.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    options: LoaderOptions,
}

impl Loader {
    pub fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Load a dataset from a file path.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        debug!("Loading dataset from: {}", path.display());

        let df = self
            .read_options()
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .map_err(|e| load_error(path, e))?;

        self.finish_load(df, path)
    }

    /// Load a dataset from in-memory CSV bytes.
    pub fn load_from_bytes(&self, bytes: impl Into<Vec<u8>>) -> Result<DataFrame> {
        let origin = Path::new("<memory>");
        let df = self
            .read_options()
            .into_reader_with_file_handle(Cursor::new(bytes.into()))
            .finish()
            .map_err(|e| load_error(origin, e))?;

        self.finish_load(df, origin)
    }

    /// Load a dataset, reporting failure as `None` instead of an error.
    ///
    /// Success and failure are both logged; the failure reason is only
    /// available through the log.
    pub fn try_load(&self, path: impl AsRef<Path>) -> Option<DataFrame> {
        let path = path.as_ref();
        match self.load(path) {
            Ok(df) => {
                info!("Data loaded successfully from {}", path.display());
                Some(df)
            }
            Err(e) => {
                error!("Error loading data: {}", e);
                None
            }
        }
    }

    fn read_options(&self) -> CsvReadOptions {
        let null_values: Vec<PlSmallStr> = self
            .options
            .null_markers
            .iter()
            .map(|marker| PlSmallStr::from(marker.as_str()))
            .collect();

        let parse_options = CsvParseOptions::default()
            .with_separator(self.options.delimiter)
            .with_quote_char(Some(b'"'))
            .with_null_values(Some(NullValues::AllColumns(null_values)));

        CsvReadOptions::default()
            .with_has_header(self.options.has_header)
            .with_infer_schema_length(self.options.infer_schema_length)
            .with_parse_options(parse_options)
    }

    fn finish_load(&self, mut df: DataFrame, path: &Path) -> Result<DataFrame> {
        if df.width() == 0 {
            return Err(CleaningError::Load {
                path: path.to_path_buf(),
                reason: "file contains no columns".to_string(),
            });
        }

        normalize_headers(&mut df).map_err(|e| load_error(path, e))?;
        debug!("Loaded {} rows x {} columns", df.height(), df.width());
        Ok(df)
    }
}

/// Trim whitespace and a leading byte-order mark from column names.
fn normalize_headers(df: &mut DataFrame) -> PolarsResult<()> {
    let renames: Vec<(String, String)> = df
        .get_column_names()
        .iter()
        .filter_map(|name| {
            let cleaned = name.trim().trim_start_matches('\u{feff}').trim();
            (cleaned != name.as_str()).then(|| (name.to_string(), cleaned.to_string()))
        })
        .collect();

    for (old, new) in renames {
        debug!("Renaming column '{}' to '{}'", old, new);
        df.rename(&old, new.into())?;
    }
    Ok(())
}

fn load_error(path: &Path, err: PolarsError) -> CleaningError {
    CleaningError::Load {
        path: PathBuf::from(path),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
adults,children,agent,country,adr
2,NA,NULL,PRT,100.5
1,0,9,,75.0
";

    #[test]
    fn test_load_from_bytes_reads_null_markers() {
        let df = Loader::default().load_from_bytes(SAMPLE).unwrap();
        assert_eq!(df.shape(), (2, 5));
        assert_eq!(df.column("children").unwrap().null_count(), 1);
        assert_eq!(df.column("agent").unwrap().null_count(), 1);
        assert_eq!(df.column("country").unwrap().null_count(), 1);
        assert!(crate::utils::is_numeric_dtype(
            df.column("agent").unwrap().dtype()
        ));
    }

    #[test]
    fn test_load_missing_file_is_load_error() {
        let err = Loader::default()
            .load("definitely/not/here/bookings.csv")
            .unwrap_err();
        assert_eq!(err.error_code(), "LOAD_ERROR");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_try_load_missing_file_is_none() {
        assert!(Loader::default().try_load("nope/bookings.csv").is_none());
    }

    #[test]
    fn test_load_from_empty_bytes_is_load_error() {
        let err = Loader::default().load_from_bytes("").unwrap_err();
        assert_eq!(err.error_code(), "LOAD_ERROR");
    }

    #[test]
    fn test_load_from_ragged_bytes_is_load_error() {
        let err = Loader::default()
            .load_from_bytes("adults,adr\n2,10.0,extra,fields\n")
            .unwrap_err();
        assert_eq!(err.error_code(), "LOAD_ERROR");
    }

    #[test]
    fn test_zero_column_frame_is_load_error() {
        let err = Loader::default()
            .finish_load(DataFrame::empty(), Path::new("empty.csv"))
            .unwrap_err();
        assert!(matches!(
            err,
            CleaningError::Load { ref reason, .. } if reason == "file contains no columns"
        ));
    }

    #[test]
    fn test_directory_path_fails_to_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src");
        let err = Loader::default().load(&dir).unwrap_err();
        assert_eq!(err.error_code(), "LOAD_ERROR");
        assert!(Loader::default().try_load(&dir).is_none());
    }

    #[test]
    fn test_headers_are_trimmed() {
        let csv = "\u{feff}adults , adr\n2,10.0\n";
        let df = Loader::default().load_from_bytes(csv).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["adults".to_string(), "adr".to_string()]);
    }

    #[test]
    fn test_custom_delimiter() {
        let options = LoaderOptions {
            delimiter: b';',
            ..LoaderOptions::default()
        };
        let df = Loader::new(options)
            .load_from_bytes("adults;adr\n2;10.0\n3;12.5\n")
            .unwrap();
        assert_eq!(df.shape(), (2, 2));
    }
}
