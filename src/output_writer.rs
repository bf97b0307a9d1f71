//! Writes the final merged run back out as the sorted ASCII output file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;

use crate::run_file::RunReader;

/// Read `merged_run_path` sequentially in `buf`-sized blocks and write each
/// value as a decimal line to `output_path`, truncating any existing
/// content.
pub(crate) fn write_output(output_path: &Path, merged_run_path: &Path, buf: &mut [i32]) -> anyhow::Result<()> {
    let mut reader = RunReader::open(merged_run_path)?;
    let file = File::create(output_path)
        .with_context(|| format!("creating output file {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);

    loop {
        let n = reader.read_block(buf)?;
        if n == 0 {
            break;
        }
        for &v in &buf[..n] {
            writeln!(writer, "{v}")?;
        }
    }

    writer.flush().context("flushing output file")
}
