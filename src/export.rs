//! Semicolon separated export of a solved problem.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use log::info;

use crate::error::Error;
use crate::report::FlowReport;

pub const TITLE: &str = "Transportation problem solution";

/// Write `report` to the file at `path`, stamped with the current local time
pub fn export_csv<P: AsRef<Path>>(report: &FlowReport, path: P) -> Result<(), Error> {
    let path = path.as_ref();
    let file = File::create(path).map_err(Error::Export)?;
    write_csv(report, file, Local::now())?;
    info!("Exported solution to {}", path.display());
    Ok(())
}

/// Write the title, the generation time, the result table and the summary to `writer`
pub fn write_csv<W: Write>(
    report: &FlowReport,
    writer: W,
    generated: DateTime<Local>,
) -> Result<(), Error> {
    write_sections(report, writer, generated).map_err(Error::Export)
}

fn write_sections<W: Write>(
    report: &FlowReport,
    mut writer: W,
    generated: DateTime<Local>,
) -> io::Result<()> {
    writeln!(writer, "{}", TITLE)?;
    writeln!(writer, "Generated at: {}", generated.format("%d/%m/%Y %H:%M:%S"))?;
    writeln!(writer)?;

    let mut cells = report.cells();
    if let Some(header) = cells.first_mut() {
        header[0] = "Source".to_string();
    }
    {
        let mut csv = csv::WriterBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_writer(&mut writer);
        for row in &cells {
            csv.write_record(row)?;
        }
        csv.flush()?;
    }

    writeln!(writer)?;
    writeln!(writer, "Additional information:")?;
    writeln!(writer, "{}", report.summary())?;
    writer.flush()?;
    Ok(())
}
