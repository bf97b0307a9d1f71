//! Multi-pass external K-way merge over on-disk run files.
//!
//! Each stage merges groups of up to `K` input runs into one output run per
//! group, using a min-heap over the current head of each input block. The
//! chunk buffer is split into `K + 1` equal blocks: `K` input blocks and one
//! output block. Stages repeat until a single run remains.

use std::path::{Path, PathBuf};

use crate::heap::{HeapElement, MinHeap};
use crate::run_file::{self, RunReader, RunWriter};

/// Fan-in of a single merge group (fixed constant, matching the original C `NMERGE`).
pub(crate) const K: usize = 16;

/// Run the full multi-stage merge and return the path of the single
/// remaining run file.
pub(crate) fn merge_runs(tmp_dir: &Path, run_count: usize, buf: &mut [i32]) -> anyhow::Result<PathBuf> {
    assert!(run_count > 0, "merge requires at least one run");

    let stages = stage_count(run_count);
    if stages == 0 {
        // A single stage-0 run needs no merge work at all.
        return Ok(run_file::path_for(tmp_dir, 0, 0));
    }

    for stage in 0..stages {
        let file_count = stage_file_count(run_count, stage);
        merge_stage(tmp_dir, stage, file_count, buf)?;
    }

    Ok(run_file::path_for(tmp_dir, stages, 0))
}

/// Smallest `s` such that `K^s >= f`: the number of merge stages needed to
/// reduce `f` stage-0 runs down to one. Computed with integer arithmetic to
/// avoid floating-point rounding at exact powers of `K`.
fn stage_count(f: usize) -> usize {
    let mut s = 0;
    let mut cap = 1usize;
    while cap < f {
        cap *= K;
        s += 1;
    }
    s
}

/// Number of run files present at the start of `stage`, given `f` stage-0
/// runs: `ceil(f / K^stage)`.
fn stage_file_count(f: usize, stage: usize) -> usize {
    let denom = K.pow(stage as u32);
    f.div_ceil(denom)
}

/// Merge every group of up to `K` adjacent runs at `stage` into one run each
/// at `stage + 1`.
fn merge_stage(tmp_dir: &Path, stage: usize, file_count: usize, buf: &mut [i32]) -> anyhow::Result<()> {
    let indices: Vec<usize> = (0..file_count).collect();
    for (group_idx, group) in indices.chunks(K).enumerate() {
        if group.len() == 1 {
            let src = run_file::path_for(tmp_dir, stage, group[0]);
            let dst = run_file::path_for(tmp_dir, stage + 1, group_idx);
            run_file::copy_run(&src, &dst, buf)?;
        } else {
            merge_group(tmp_dir, stage, group, group_idx, buf)?;
        }
    }
    Ok(())
}

/// Heap-driven merge of one group of 2..=K runs into a single output run.
fn merge_group(
    tmp_dir: &Path,
    stage: usize,
    group: &[usize],
    out_index: usize,
    buf: &mut [i32],
) -> anyhow::Result<()> {
    let k = group.len();
    let bs = buf.len() / (K + 1);
    assert!(bs > 0, "chunk buffer too small to hold K+1 merge blocks");

    let mut blocks: Vec<&mut [i32]> = buf[..bs * (K + 1)].chunks_mut(bs).collect();
    let (input_blocks, output_blocks) = blocks.split_at_mut(K);
    let output = &mut output_blocks[0];

    let mut readers: Vec<RunReader> = group
        .iter()
        .map(|&idx| RunReader::open(&run_file::path_for(tmp_dir, stage, idx)))
        .collect::<anyhow::Result<_>>()?;
    let mut writer = RunWriter::create(&run_file::path_for(tmp_dir, stage + 1, out_index))?;

    let mut filled = vec![0usize; k];
    let mut pos = vec![0usize; k];
    let mut heap = MinHeap::new(K);

    for i in 0..k {
        filled[i] = readers[i].read_block(input_blocks[i])?;
        if filled[i] > 0 {
            heap.insert(HeapElement {
                key: input_blocks[i][0],
                idx: i,
            });
            pos[i] = 1;
        }
    }

    let mut out_pos = 0usize;
    while !heap.is_empty() {
        let el = heap.pop();
        output[out_pos] = el.key;
        out_pos += 1;
        if out_pos == bs {
            writer.write_block(&output[..out_pos])?;
            out_pos = 0;
        }

        let i = el.idx;
        if pos[i] < filled[i] {
            heap.insert(HeapElement {
                key: input_blocks[i][pos[i]],
                idx: i,
            });
            pos[i] += 1;
        } else {
            filled[i] = readers[i].read_block(input_blocks[i])?;
            if filled[i] > 0 {
                heap.insert(HeapElement {
                    key: input_blocks[i][0],
                    idx: i,
                });
                pos[i] = 1;
            } else {
                pos[i] = 0;
            }
        }
    }

    if out_pos != 0 {
        writer.write_block(&output[..out_pos])?;
    }
    writer.finish()
}
