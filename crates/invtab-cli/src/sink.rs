//! Tabular sink: per-company CSV files.
//!
//! Each company with data gets one file carrying its fixed column schema
//! verbatim; companies with zero records are omitted. When nothing was
//! extracted at all a single placeholder file records that fact.

use std::path::{Path, PathBuf};

use tracing::debug;

use invtab_core::{Cell, Company, LineRecord};

/// Write one CSV per non-empty company group. Returns the written paths.
pub fn write_company_tables(
    output_dir: &Path,
    groups: &[(Company, Vec<LineRecord>)],
) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(groups.len());

    for (company, rows) in groups {
        let path = output_dir.join(format!("{}.csv", company.slug()));
        let mut wtr = csv::Writer::from_path(&path)?;

        wtr.write_record(company.columns())?;
        for row in rows {
            let cells: Vec<String> = row.to_cells().iter().map(Cell::display).collect();
            wtr.write_record(&cells)?;
        }
        wtr.flush()?;

        debug!(path = %path.display(), rows = rows.len(), "wrote company table");
        written.push(path);
    }

    Ok(written)
}

/// Write the placeholder file for a batch that extracted nothing.
pub fn write_placeholder(output_dir: &Path, file_name: &str) -> anyhow::Result<PathBuf> {
    let path = output_dir.join(file_name);
    let mut wtr = csv::Writer::from_path(&path)?;

    wtr.write_record(["status"])?;
    wtr.write_record(["no data extracted"])?;
    wtr.flush()?;

    Ok(path)
}
