// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 x3b contributors

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use x3b::{DocumentEncoder, EncoderConfig, EncodingMethod};

#[derive(Parser)]
#[command(name = "x3b-encode")]
#[command(about = "Encode an X3D/VRML XML scene document into compact binary form")]
#[command(version)]
struct Cli {
    /// Input XML scene document
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output binary file (defaults to INPUT with an .x3b extension)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Raw primitive arrays, cheapest to parse back
    #[arg(long, group = "method")]
    fastest: bool,

    /// Smallest output without losing information (default)
    #[arg(long, group = "method")]
    smallest: bool,

    /// Smallest output, floats quantized within the error bound
    #[arg(long, group = "method")]
    lossy: bool,

    /// Keep every value textual; no binary packing
    #[arg(long, group = "method")]
    strings: bool,

    /// Keep fields equal to their schema default
    #[arg(long)]
    savedefaults: bool,

    /// Maximum quantization error for --lossy
    #[arg(long, value_name = "ERROR", default_value_t = 0.001)]
    quantize_param: f32,

    /// Skip the end-of-run statistics report
    #[arg(long)]
    no_stats: bool,
}

impl Cli {
    fn method(&self) -> EncodingMethod {
        if self.fastest {
            EncodingMethod::FastestParsing
        } else if self.lossy {
            EncodingMethod::SmallestLossy
        } else if self.strings {
            EncodingMethod::Strings
        } else {
            EncodingMethod::SmallestNonlossy
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("x3b"));

    let config = EncoderConfig {
        method: cli.method(),
        remove_defaults: !cli.savedefaults,
        quantization_error: cli.quantize_param,
        collect_stats: !cli.no_stats,
    };
    anyhow::ensure!(
        config.quantization_error.is_finite() && config.quantization_error > 0.0,
        "--quantize-param must be a positive number"
    );

    let mut encoder = DocumentEncoder::with_builtin_schemas(config);
    encoder
        .encode_file(&cli.input, &output)
        .with_context(|| format!("encoding {} -> {}", cli.input.display(), output.display()))?;

    let in_len = std::fs::metadata(&cli.input)?.len();
    let out_len = std::fs::metadata(&output)?.len();
    println!(
        "{} ({} bytes) -> {} ({} bytes)",
        cli.input.display(),
        in_len,
        output.display(),
        out_len
    );

    if config.collect_stats {
        print!("{}", encoder.stats().report());
    }
    Ok(())
}
