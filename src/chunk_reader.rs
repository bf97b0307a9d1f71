//! Reads the input file line by line, strictly parsing each line as a
//! decimal `i32`, and flushes full buffers as sorted stage-0 run files.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context};

use crate::pmsort;
use crate::run_file;

/// Read `input_path` into `buf`-sized chunks, sort each chunk in place with
/// `threads` workers, and write it out as a stage-0 run file under
/// `tmp_dir`. Returns the number of stage-0 runs written.
pub(crate) fn read_chunks(
    input_path: &Path,
    tmp_dir: &Path,
    buf: &mut [i32],
    threads: usize,
) -> anyhow::Result<usize> {
    let file = File::open(input_path)
        .with_context(|| format!("opening input file {}", input_path.display()))?;
    let reader = BufReader::new(file);

    let mut filled = 0usize;
    let mut run_count = 0usize;

    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {} of input", lineno + 1))?;
        let value = parse_strict_i32(&line)
            .with_context(|| format!("malformed integer on line {}: {:?}", lineno + 1, line))?;
        buf[filled] = value;
        filled += 1;
        if filled == buf.len() {
            flush_chunk(tmp_dir, &mut buf[..filled], threads, run_count)?;
            run_count += 1;
            filled = 0;
        }
    }

    if filled != 0 {
        flush_chunk(tmp_dir, &mut buf[..filled], threads, run_count)?;
        run_count += 1;
    }

    Ok(run_count)
}

/// Strict decimal `i32` parse: no leading/trailing whitespace, no trailing
/// garbage, range-checked. `str::parse` already rejects trailing garbage and
/// out-of-range values; the explicit whitespace check matches the original
/// `str2int()` contract precisely (`" 5"` and `""` are both rejected).
fn parse_strict_i32(s: &str) -> anyhow::Result<i32> {
    if s.is_empty() || s.starts_with(char::is_whitespace) {
        bail!("empty or leading-whitespace line");
    }
    s.parse::<i32>().context("not a valid 32-bit decimal integer")
}

fn flush_chunk(
    tmp_dir: &Path,
    chunk: &mut [i32],
    threads: usize,
    run_index: usize,
) -> anyhow::Result<()> {
    pmsort::sort_parallel(chunk, threads);
    let path = run_file::path_for(tmp_dir, 0, run_index);
    run_file::write_run(&path, chunk)
}
