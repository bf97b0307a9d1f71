use std::path::PathBuf;

use anyhow::Context;
use tempfile::TempDir;

use crate::chunk_reader;
use crate::config::Config;
use crate::kway_merge;
use crate::output_writer;

const DEFAULT_BUFFER_MIB: u64 = 128;

/// Sort a file of signed 32-bit decimal integers, one per line, in place,
/// under a bounded memory budget.
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use extsort::sort::Sort;
///
/// fn sort_integers(input: PathBuf) -> Result<(), anyhow::Error> {
///     let mut sort = Sort::new(input);
///
///     // set the RAM budget for the in-memory chunk buffer, in MiB. The
///     // default is 128 MiB.
///     sort.with_buffer_size_mib(64);
///
///     // set the number of worker threads used to sort each chunk. The
///     // default is to use all available cores.
///     sort.with_threads(4);
///
///     sort.sort()
/// }
/// ```
pub struct Sort {
    input: PathBuf,
    tmp_dir: Option<PathBuf>,
    buffer_size_mib: u64,
    threads: usize,
}

impl Sort {
    /// Create a default Sort definition for `input`.
    ///
    /// The default buffer size is 128 MiB and the default thread count is
    /// the number of available CPU cores. The default temp directory
    /// location is the system temp directory, falling back to the current
    /// working directory if that cannot be created.
    pub fn new(input: PathBuf) -> Sort {
        Sort {
            input,
            tmp_dir: None,
            buffer_size_mib: DEFAULT_BUFFER_MIB,
            threads: num_cpus::get(),
        }
    }

    /// Set the RAM budget, in MiB, for the in-memory chunk buffer.
    pub fn with_buffer_size_mib(&mut self, buffer_size_mib: u64) {
        self.buffer_size_mib = buffer_size_mib;
    }

    /// Set the number of worker threads used by the parallel in-memory
    /// sort. The default is the number of available CPU cores.
    pub fn with_threads(&mut self, threads: usize) {
        self.threads = threads;
    }

    /// Set the directory under which the temp directory for intermediate
    /// run files is created. The default is the system temp directory.
    pub fn with_tmp_dir(&mut self, tmp_dir: PathBuf) {
        self.tmp_dir = Some(tmp_dir);
    }

    /// Sort the input file in place.
    ///
    /// A zero-byte input file is a successful no-op: no temp directory is
    /// created. Otherwise a temp directory is always created and always
    /// torn down, on both the success and failure paths.
    pub fn sort(&self) -> Result<(), anyhow::Error> {
        let input_len = std::fs::metadata(&self.input)
            .with_context(|| format!("reading metadata of {}", self.input.display()))?
            .len();
        if input_len == 0 {
            log::info!("Input file {} is empty, nothing to do", self.input.display());
            return Ok(());
        }

        let config = self.create_config();
        let tmp_dir = Self::create_tmp_dir(&config)?;
        log::info!(
            "Sorting {} using temp directory {}",
            self.input.display(),
            tmp_dir.path().display()
        );

        let mut buf = vec![0i32; config.buf_size_elems()];

        log::info!("Reading and sorting chunks, buffer size: {} elements, threads: {}", buf.len(), config.threads());
        let run_count = chunk_reader::read_chunks(&self.input, tmp_dir.path(), &mut buf, config.threads())?;
        log::info!("Wrote {} stage-0 run(s)", run_count);

        log::info!("Merging {} run(s)", run_count);
        let merged_path = kway_merge::merge_runs(tmp_dir.path(), run_count, &mut buf)?;

        log::info!("Writing sorted output to {}", self.input.display());
        output_writer::write_output(&self.input, &merged_path, &mut buf)?;

        log::info!("Finished sorting {}", self.input.display());
        // tmp_dir is dropped here, recursively removing intermediate run
        // files regardless of the outcome above.
        Ok(())
    }

    fn create_config(&self) -> Config {
        let buf_size_elems = ((self.buffer_size_mib * 1024 * 1024) / 4).max(1) as usize;
        Config::new(self.tmp_dir.clone(), buf_size_elems, self.threads.max(1))
    }

    fn create_tmp_dir(config: &Config) -> Result<TempDir, anyhow::Error> {
        if let Some(dir) = config.tmp_dir() {
            return tempfile::Builder::new()
                .prefix("tmpdir.")
                .tempdir_in(dir)
                .with_context(|| format!("creating temp directory under {}", dir.display()));
        }

        tempfile::Builder::new()
            .prefix("tmpdir.")
            .tempdir()
            .or_else(|_| tempfile::Builder::new().prefix("tmpdir.").tempdir_in("."))
            .context("creating temp directory: both the system temp location and the current directory failed")
    }
}
