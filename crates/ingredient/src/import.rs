use std::{io::Read, path::Path};

use crate::{Command, CreateInput};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: usize,
    pub skipped: usize,
}

impl Command {
    /// Loads a header-less `name,measurement_unit` CSV file into the catalog.
    pub async fn import_csv(
        &self,
        path: impl AsRef<Path>,
    ) -> foodgram_shared::Result<ImportReport> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;

        tracing::info!(path = %path.display(), "importing ingredients");

        self.import_reader(file).await
    }

    pub async fn import_reader(
        &self,
        reader: impl Read,
    ) -> foodgram_shared::Result<ImportReport> {
        let rows = parse_rows(reader)?;
        let mut report = ImportReport::default();

        for (line, row) in rows {
            let input = match row {
                Ok(input) => input,
                Err(reason) => {
                    tracing::warn!(line, reason = %reason, "ingredient row skipped");
                    report.skipped += 1;
                    continue;
                }
            };

            match self.create(input).await {
                Ok(_) => report.inserted += 1,
                Err(e) => {
                    tracing::warn!(line, error = %e, "ingredient row not stored");
                    report.skipped += 1;
                }
            }
        }

        tracing::info!(
            inserted = report.inserted,
            skipped = report.skipped,
            "ingredient import finished"
        );

        Ok(report)
    }
}

type ParsedRow = (u64, Result<CreateInput, String>);

fn parse_rows(reader: impl Read) -> foodgram_shared::Result<Vec<ParsedRow>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = vec![];
    let mut parsed = 0;

    for (index, record) in csv.records().enumerate() {
        let line = record
            .as_ref()
            .ok()
            .and_then(|r| r.position())
            .map(|p| p.line())
            .unwrap_or(index as u64 + 1);

        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(anyhow::Error::from(e).into()),
            Err(e) => {
                rows.push((line, Err(e.to_string())));
                continue;
            }
        };

        parsed += 1;

        let name = record.get(0).unwrap_or_default();
        if name.is_empty() {
            rows.push((line, Err("empty ingredient name".to_owned())));
            continue;
        }

        rows.push((
            line,
            Ok(CreateInput {
                name: name.to_owned(),
                measurement_unit: record.get(1).unwrap_or_default().to_owned(),
            }),
        ));
    }

    if rows.is_empty() {
        foodgram_shared::bail!("ingredient file is empty");
    }

    if parsed == 0 {
        foodgram_shared::bail!("malformed ingredient file");
    }

    Ok(rows)
}
