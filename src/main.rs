use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::Context;
use hcc_grouper::{PipelineConfig, pipeline};
use log::info;

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [config_path, output_path] = args.as_slice() else {
        eprintln!("usage: hcc-grouper <config.json> <output.tsv>");
        std::process::exit(2);
    };

    let config = PipelineConfig::from_json_file(&PathBuf::from(config_path))?;
    let matrix = pipeline::run(&config)?;

    // Output is only created once the whole pipeline has succeeded
    let file = File::create(output_path)
        .with_context(|| format!("cannot create output file {output_path}"))?;
    let mut writer = BufWriter::new(file);
    matrix.write_tsv(&mut writer)?;
    info!(
        "wrote {} patients x {} categories to {}",
        matrix.num_patients(),
        matrix.num_categories(),
        output_path
    );

    Ok(())
}
