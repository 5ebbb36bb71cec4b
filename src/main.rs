#[macro_use]
extern crate anyhow;
extern crate clap;

#[macro_use]
extern crate serde_derive;

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};

use anyhow::{Context as _, Result};
use camino::{Utf8Path, Utf8PathBuf};

mod cli;
mod error;
mod model;
mod order;
mod render;

use model::ModuleRecord;
use order::{CounterOrder, ToolOrder};
use render::Renderer;

fn read_input(input: &Utf8Path) -> Result<String> {
    let mut buf = String::new();
    if input.as_str() == "-" {
        io::stdin()
            .read_to_string(&mut buf)
            .context("reading benchmark data from stdin")?;
    } else {
        File::open(input)
            .and_then(|mut f| f.read_to_string(&mut buf))
            .with_context(|| format!("reading benchmark data from \"{input}\""))?;
    }
    Ok(buf)
}

fn open_output(output: Option<&Utf8PathBuf>, append: bool) -> Result<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .append(append)
                .truncate(!append)
                .open(path)
                .with_context(|| format!("opening output file \"{path}\""))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn print_completions(matches: &clap::ArgMatches) -> Result<i32> {
    let Some(shell) = matches.get_one::<clap_complete::Shell>("generator").copied() else {
        bail!("no shell given (try \"--generate bash\")");
    };

    let mut cmd = cli::clap();
    let name = cmd.get_name().to_string();
    eprintln!("bench-summary: generating {shell} completions");
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout().lock());
    Ok(0)
}

fn write_manpage(matches: &clap::ArgMatches) -> Result<i32> {
    let outfile = matches
        .get_one::<Utf8PathBuf>("outdir")
        .ok_or_else(|| anyhow!("missing manpage output directory"))?
        .join("bench-summary.1");

    let mut file = BufWriter::new(
        File::create(&outfile).with_context(|| format!("creating manpage \"{outfile}\""))?,
    );
    clap_mangen::Man::new(cli::clap())
        .render(&mut file)
        .and_then(|_| file.flush())
        .with_context(|| format!("writing manpage \"{outfile}\""))?;
    Ok(0)
}

fn main() {
    let result = try_main();
    match result {
        Err(e) => {
            eprintln!("bench-summary: error: {e:#}");
            std::process::exit(1);
        }
        Ok(code) => std::process::exit(code),
    };
}

fn try_main() -> Result<i32> {
    let matches = cli::clap().get_matches();

    match matches.subcommand() {
        Some(("completion", matches)) => return print_completions(matches),
        Some(("manpages", matches)) => return write_manpage(matches),
        _ => (),
    }

    let verbose = matches.get_count("verbose");

    let mut order = CounterOrder::default();
    if let Some(overrides) = matches.get_many::<ToolOrder>("order") {
        order.extend(overrides.cloned());
    }

    let input = matches
        .get_one::<Utf8PathBuf>("input")
        .ok_or_else(|| anyhow!("no input given"))?;
    let data = read_input(input)?;
    let benches: Vec<ModuleRecord> = serde_json::from_str(&data)
        .with_context(|| format!("parsing benchmark data from \"{input}\""))?;

    if verbose > 0 {
        eprintln!("bench-summary: {} benchmark module(s) read", benches.len());
    }

    let out = open_output(matches.get_one::<Utf8PathBuf>("output"), matches.get_flag("append"))?;
    let mut renderer = Renderer::new(out, &order).verbose(verbose);

    // whatever was rendered before a failure still gets written out
    let result = renderer.render(&benches);
    let mut out = renderer.into_inner();
    out.flush().context("flushing report")?;
    result.context("rendering benchmark report")?;

    Ok(0)
}
