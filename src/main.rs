use anyhow::{Context, Result};
use png2emap::io::{convert_file, emap_path};
use png2emap::logging::log_init;
use std::path::PathBuf;
use structopt::StructOpt;

/// Convert a square RGB(A) PNG heightmap into an elevation map, sampling the
/// red channel. The result is written to <input>.emap
#[derive(Debug, StructOpt)]
#[structopt(name = "png2emap")]
struct Opt {
    /// Heightmap PNG
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Log more (-v info, -vv debug)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    log_init(opt.verbose);

    let out_path = emap_path(&opt.input);
    convert_file(&opt.input, &out_path).with_context(|| {
        format!(
            "Converting {} to {}",
            opt.input.display(),
            out_path.display()
        )
    })?;

    Ok(())
}
