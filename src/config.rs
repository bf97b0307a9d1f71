use std::path::PathBuf;

#[derive(Clone)]
pub(crate) struct Config {
    tmp_dir: Option<PathBuf>,
    buf_size_elems: usize,
    threads: usize,
}

impl Config {
    pub(crate) fn new(tmp_dir: Option<PathBuf>, buf_size_elems: usize, threads: usize) -> Config {
        Config {
            tmp_dir,
            buf_size_elems,
            threads,
        }
    }

    pub(crate) fn tmp_dir(&self) -> Option<&PathBuf> {
        self.tmp_dir.as_ref()
    }

    pub(crate) fn buf_size_elems(&self) -> usize {
        self.buf_size_elems
    }

    pub(crate) fn threads(&self) -> usize {
        self.threads
    }
}
