use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Corpus, SpeechRecord};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a speech corpus from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row `year,speaker,party,text` (primary format)
/// * `.json`    – `[{ "year": 1947, "speaker": "...", "party": "...", "text": "..." }, ...]`
/// * `.parquet` – flat columns `year` (int), `speaker`, `party`, `text` (strings)
pub fn load_file(path: &Path) -> Result<Corpus> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row `year,speaker,party,text`, one speech per row.
/// The `text` cell may be empty or contain embedded (quoted) newlines.
fn load_csv(path: &Path) -> Result<Corpus> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    load_csv_from_reader(file)
}

fn load_csv_from_reader<R: Read>(source: R) -> Result<Corpus> {
    let mut reader = csv::Reader::from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("CSV missing '{name}' column"))
    };
    let year_idx = column("year")?;
    let speaker_idx = column("speaker")?;
    let party_idx = column("party")?;
    let text_idx = column("text")?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let year: i32 = record
            .get(year_idx)
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("CSV row {row_no}: 'year' is not an integer"))?;

        records.push(SpeechRecord {
            year,
            speaker: record.get(speaker_idx).unwrap_or("").to_string(),
            party: record.get(party_idx).unwrap_or("").to_string(),
            text: record.get(text_idx).unwrap_or("").to_string(),
        });
    }

    Ok(Corpus::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "year": 1947, "speaker": "Nehru", "party": "INC", "text": "Long years ago..." },
///   ...
/// ]
/// ```
///
/// A `null` or absent `text` becomes the empty string; the record then
/// simply contributes zero tokens downstream.
fn load_json(path: &Path) -> Result<Corpus> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let year = obj
            .get("year")
            .and_then(|v| v.as_i64())
            .with_context(|| format!("Row {i}: missing or non-integer 'year'"))?;

        let string_field = |name: &str| -> Result<String> {
            obj.get(name)
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .with_context(|| format!("Row {i}: missing or non-string '{name}'"))
        };

        let text = match obj.get("text") {
            Some(JsonValue::String(s)) => s.clone(),
            Some(JsonValue::Null) | None => String::new(),
            Some(other) => bail!("Row {i}: 'text' is not a string: {other}"),
        };

        records.push(SpeechRecord {
            year: year as i32,
            speaker: string_field("speaker")?,
            party: string_field("party")?,
            text,
        });
    }

    Ok(Corpus::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet corpus.
///
/// Expected schema:
/// - `year`: Int32 or Int64
/// - `speaker`, `party`, `text`: Utf8 or LargeUtf8
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Corpus> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str| -> Result<Arc<dyn Array>> {
            let idx = schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
            Ok(batch.column(idx).clone())
        };

        let year_col = column("year")?;
        let speaker_col = column("speaker")?;
        let party_col = column("party")?;
        let text_col = column("text")?;

        for row in 0..batch.num_rows() {
            let year = extract_i32(&year_col, row)
                .with_context(|| format!("Row {row}: failed to read 'year'"))?;

            records.push(SpeechRecord {
                year,
                speaker: extract_string(&speaker_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'speaker'"))?,
                party: extract_string(&party_col, row)
                    .with_context(|| format!("Row {row}: failed to read 'party'"))?,
                // A null text cell is an empty speech, not an error.
                text: extract_string(&text_col, row).unwrap_or_default(),
            });
        }
    }

    Ok(Corpus::from_records(records))
}

// -- Parquet / Arrow helpers --

fn extract_i32(col: &Arc<dyn Array>, row: usize) -> Result<i32> {
    if col.is_null(row) {
        bail!("null value in integer column");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row))
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row) as i32)
        }
        other => bail!("Expected Int32 or Int64 column, got {other:?}"),
    }
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            Ok(arr.value(row).to_string())
        }
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_roundtrip() {
        let data = "\
year,speaker,party,text
1947,Nehru,INC,\"Long years ago, we made a tryst with destiny.\"
1948,Nehru,INC,
";
        let corpus = load_csv_from_reader(data.as_bytes()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.records[0].year, 1947);
        assert!(corpus.records[0].text.contains("tryst"));
        // Empty text cell is a valid, empty speech.
        assert!(corpus.records[1].text.is_empty());
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let data = "year,speaker,text\n1947,Nehru,hello\n";
        let err = load_csv_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("party"));
    }

    #[test]
    fn csv_non_integer_year_is_an_error() {
        let data = "year,speaker,party,text\nnineteen,Nehru,INC,hello\n";
        let err = load_csv_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("year"));
    }

    #[test]
    fn json_null_text_becomes_empty() {
        let dir = std::env::temp_dir().join("podium-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("corpus.json");
        std::fs::write(
            &path,
            r#"[
                { "year": 1947, "speaker": "Nehru", "party": "INC", "text": "freedom at midnight" },
                { "year": 1948, "speaker": "Nehru", "party": "INC", "text": null }
            ]"#,
        )
        .unwrap();

        let corpus = load_file(&path).unwrap();
        assert_eq!(corpus.len(), 2);
        assert!(corpus.records[1].text.is_empty());
        assert_eq!(corpus.year_max, 1948);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = load_file(Path::new("corpus.xlsx")).unwrap_err();
        assert!(err.to_string().contains("xlsx"));
    }
}
