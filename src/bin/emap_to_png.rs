use anyhow::{Context, Result};
use png2emap::io::{append_suffix, load_emap, write_heightmap_png};
use png2emap::logging::log_init;
use std::path::PathBuf;
use structopt::StructOpt;

/// Render an elevation map as a greyscale-looking RGB heightmap at <input>.png
#[derive(Debug, StructOpt)]
#[structopt(name = "emap_to_png")]
struct Opt {
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    log_init(opt.verbose);

    let map = load_emap(&opt.input)
        .with_context(|| format!("Loading {}", opt.input.display()))?;

    let out_path = append_suffix(&opt.input, ".png");
    write_heightmap_png(&out_path, &map)
        .with_context(|| format!("Writing {}", out_path.display()))?;
    log::info!("{} -> {}", opt.input.display(), out_path.display());

    Ok(())
}
