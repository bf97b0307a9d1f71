use std::fs;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::str::FromStr;

use data_encoding::HEXLOWER;
use rand::Rng;

pub fn setup() {
    let results_dir_path = PathBuf::from_str("./target/sort-results/").unwrap();
    if !results_dir_path.exists() {
        fs::create_dir_all(&results_dir_path)
            .unwrap_or_else(|_| panic!("Failed to create results directory: {:?}", results_dir_path));
    }
}

#[allow(dead_code)]
pub fn temp_file_name(dir: &str) -> PathBuf {
    let mut result = PathBuf::from(dir);
    let name = HEXLOWER.encode(&rand::random::<[u8; 16]>());
    result.push(name);
    result
}

#[allow(dead_code)]
pub fn write_integers(path: &PathBuf, values: &[i32]) {
    let mut file = File::create(path).unwrap();
    for v in values {
        writeln!(file, "{v}").unwrap();
    }
}

#[allow(dead_code)]
pub fn read_integers(path: &PathBuf) -> Vec<i32> {
    let reader = BufReader::new(File::open(path).unwrap());
    reader
        .lines()
        .map(|line| line.unwrap().parse::<i32>().unwrap())
        .collect()
}

#[allow(dead_code)]
pub fn random_i32_vec(len: usize) -> Vec<i32> {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen::<i32>()).collect()
}
