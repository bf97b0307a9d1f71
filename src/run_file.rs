//! On-disk run files: naming, and buffered binary i32 block I/O.
//!
//! Run files hold a flat sequence of little-endian `i32` values with no
//! header. The name `<stage>_<index>` is load-bearing: the K-way merger
//! enumerates a stage's inputs by reconstructing these names, it does not
//! read a directory listing.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

pub(crate) fn path_for(tmp_dir: &Path, stage: usize, index: usize) -> PathBuf {
    tmp_dir.join(format!("{stage}_{index}"))
}

/// Buffered reader over a run file, yielding fixed-size blocks of `i32`.
pub(crate) struct RunReader {
    reader: BufReader<File>,
    scratch: Vec<u8>,
}

impl RunReader {
    pub(crate) fn open(path: &Path) -> anyhow::Result<RunReader> {
        let file =
            File::open(path).with_context(|| format!("opening run file {}", path.display()))?;
        Ok(RunReader {
            reader: BufReader::new(file),
            scratch: Vec::new(),
        })
    }

    /// Read up to `out.len()` values into `out`, returning the number
    /// actually read (less than `out.len()` only at end of file).
    pub(crate) fn read_block(&mut self, out: &mut [i32]) -> anyhow::Result<usize> {
        let need = out.len() * 4;
        if self.scratch.len() < need {
            self.scratch.resize(need, 0);
        }
        let mut filled = 0usize;
        while filled < need {
            let n = self.reader.read(&mut self.scratch[filled..need])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        let n_elems = filled / 4;
        for (i, slot) in out.iter_mut().enumerate().take(n_elems) {
            let b = &self.scratch[i * 4..i * 4 + 4];
            *slot = i32::from_le_bytes([b[0], b[1], b[2], b[3]]);
        }
        Ok(n_elems)
    }
}

/// Buffered writer over a run file, accepting fixed-size blocks of `i32`.
pub(crate) struct RunWriter {
    writer: BufWriter<File>,
    scratch: Vec<u8>,
}

impl RunWriter {
    pub(crate) fn create(path: &Path) -> anyhow::Result<RunWriter> {
        let file =
            File::create(path).with_context(|| format!("creating run file {}", path.display()))?;
        Ok(RunWriter {
            writer: BufWriter::new(file),
            scratch: Vec::new(),
        })
    }

    pub(crate) fn write_block(&mut self, data: &[i32]) -> anyhow::Result<()> {
        let need = data.len() * 4;
        if self.scratch.len() < need {
            self.scratch.resize(need, 0);
        }
        for (i, &v) in data.iter().enumerate() {
            self.scratch[i * 4..i * 4 + 4].copy_from_slice(&v.to_le_bytes());
        }
        self.writer
            .write_all(&self.scratch[..need])
            .context("short write to run file")
    }

    pub(crate) fn finish(mut self) -> anyhow::Result<()> {
        self.writer.flush().context("flushing run file")
    }
}

/// Write the whole of `data` as a single run file.
pub(crate) fn write_run(path: &Path, data: &[i32]) -> anyhow::Result<()> {
    let mut writer = RunWriter::create(path)?;
    writer.write_block(data)?;
    writer.finish()
}

/// Copy `src` to `dst` sequentially in `buf`-sized blocks, used for the
/// single-file remainder in a merge stage (no merge work needed).
pub(crate) fn copy_run(src: &Path, dst: &Path, buf: &mut [i32]) -> anyhow::Result<()> {
    let mut reader = RunReader::open(src)?;
    let mut writer = RunWriter::create(dst)?;
    loop {
        let n = reader.read_block(buf)?;
        if n == 0 {
            break;
        }
        writer.write_block(&buf[..n])?;
    }
    writer.finish()
}
