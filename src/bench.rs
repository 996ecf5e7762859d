// Benchmark harness for chwire column codecs.
//
// Purpose:
// - Provide a simple, repeatable baseline for bulk column encode/decode throughput.
// - Emit machine-readable JSON to stdout and a human-readable table to stderr.
//
// Design notes:
// - Decodes from an in-memory source so numbers reflect codec cost, not I/O.
// - Keep benchmarks "good enough" for trend tracking, not lab-grade profiling.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use bytes::{Buf, Bytes};
use serde::Serialize;
use tracing::info;

use chwire::core::buffer::Buffer;
use chwire::core::column::{ColFloat32, ColInt64, ColStr, Column};
use chwire::core::error::{Error, ErrorKind};
use chwire::core::reader::Reader;

#[derive(Clone, Debug)]
pub struct BenchArgs {
    pub rows: Vec<usize>,
    pub iterations: u64,
    pub format: BenchFormat,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BenchFormat {
    Json,
    Table,
    Both,
}

impl BenchFormat {
    pub fn parse(input: &str) -> Result<Self, Error> {
        match input.trim() {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            "both" => Ok(Self::Both),
            _ => Err(Error::new(ErrorKind::Usage)
                .with_message("invalid --format")
                .with_hint("use json|table|both")),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
struct BenchResult {
    bench: &'static str,
    column: String,
    rows: usize,
    iterations: u64,
    bytes: usize,
    ns_per_row: f64,
    mib_per_sec: f64,
}

#[derive(Debug, Serialize)]
struct BenchReport<'a> {
    name: &'static str,
    version: &'a str,
    params: BenchParams<'a>,
    results: Vec<BenchResult>,
}

#[derive(Debug, Serialize)]
struct BenchParams<'a> {
    rows: &'a [usize],
    iterations: u64,
    debug_build: bool,
}

pub fn run_bench(args: BenchArgs, program_version: &str) -> Result<(), Error> {
    if args.iterations == 0 {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("--iterations must be at least 1"));
    }

    let mut results = Vec::new();
    for &rows in &args.rows {
        let int64: ColInt64 = (0..rows as i64).collect();
        results.extend(bench_column(&int64, ColInt64::new(), rows, args.iterations)?);

        let float32: ColFloat32 = (0..rows).map(|i| i as f32).collect();
        results.extend(bench_column(&float32, ColFloat32::new(), rows, args.iterations)?);

        let strings: ColStr = (0..rows).map(|i| format!("row-{i}")).collect();
        results.extend(bench_column(&strings, ColStr::new(), rows, args.iterations)?);
    }

    let report = BenchReport {
        name: "chwire",
        version: program_version,
        params: BenchParams {
            rows: &args.rows,
            iterations: args.iterations,
            debug_build: cfg!(debug_assertions),
        },
        results,
    };

    if matches!(args.format, BenchFormat::Json | BenchFormat::Both) {
        let json = serde_json::to_string_pretty(&report).map_err(|err| {
            Error::new(ErrorKind::Internal)
                .with_message("failed to serialize bench results")
                .with_source(err)
        })?;
        println!("{json}");
    }
    if matches!(args.format, BenchFormat::Table | BenchFormat::Both) {
        emit_table(&report.results).map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message("failed to write bench table")
                .with_source(err)
        })?;
    }
    Ok(())
}

fn bench_column<C: Column>(
    data: &C,
    mut dec: C,
    rows: usize,
    iterations: u64,
) -> Result<Vec<BenchResult>, Error> {
    let mut buf = Buffer::new();
    data.encode_column(&mut buf);
    let encoded_len = buf.len();

    let start = Instant::now();
    for _ in 0..iterations {
        buf.reset();
        data.encode_column(&mut buf);
    }
    let encode = result_entry("encode", data, rows, iterations, encoded_len, start.elapsed());

    let encoded = Bytes::from(buf);
    let start = Instant::now();
    for _ in 0..iterations {
        dec.reset();
        let mut r = Reader::new(encoded.clone().reader());
        dec.decode_column(&mut r, rows)?;
    }
    let decode = result_entry("decode", data, rows, iterations, encoded_len, start.elapsed());

    if dec.rows() != rows {
        return Err(Error::new(ErrorKind::Internal).with_message("decoded row count mismatch"));
    }
    info!(column = %data.column_type(), rows, "bench scenario complete");
    Ok(vec![encode, decode])
}

fn result_entry(
    bench: &'static str,
    col: &impl Column,
    rows: usize,
    iterations: u64,
    bytes: usize,
    dur: Duration,
) -> BenchResult {
    let total_rows = rows as f64 * iterations as f64;
    let total_bytes = bytes as f64 * iterations as f64;
    let secs = dur.as_secs_f64();
    BenchResult {
        bench,
        column: col.column_type().to_string(),
        rows,
        iterations,
        bytes,
        ns_per_row: if total_rows == 0.0 {
            0.0
        } else {
            dur.as_nanos() as f64 / total_rows
        },
        mib_per_sec: if secs == 0.0 {
            0.0
        } else {
            total_bytes / (1024.0 * 1024.0) / secs
        },
    }
}

fn emit_table(results: &[BenchResult]) -> io::Result<()> {
    let mut stderr = io::stderr().lock();
    writeln!(stderr, "chwire bench (table)")?;
    writeln!(
        stderr,
        "{:>8}  {:>8}  {:>9}  {:>10}  {:>10}  {:>10}",
        "bench", "column", "rows", "bytes", "ns/row", "MiB/s"
    )?;
    for r in results {
        writeln!(
            stderr,
            "{:>8}  {:>8}  {:>9}  {:>10}  {:>10.3}  {:>10.1}",
            r.bench, r.column, r.rows, r.bytes, r.ns_per_row, r.mib_per_sec
        )?;
    }
    Ok(())
}
