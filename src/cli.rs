use std::str::FromStr;

use camino::Utf8PathBuf;

use clap::{crate_version, value_parser, Arg, ArgAction, Command, ValueHint};

use crate::order::ToolOrder;

pub fn clap() -> clap::Command {
    fn input() -> Arg {
        Arg::new("input")
            .help("benchmark comparison JSON (\"-\" reads stdin)")
            .env("BENCH_SUMMARY_INPUT")
            .value_name("INPUT")
            .default_value("-")
            .value_parser(clap::value_parser!(Utf8PathBuf))
            .value_hint(ValueHint::FilePath)
    }

    fn output() -> Arg {
        Arg::new("output")
            .help("write the report to FILE instead of stdout")
            .short('o')
            .long("output")
            .env("BENCH_SUMMARY_OUTPUT")
            .num_args(1)
            .value_name("FILE")
            .value_parser(clap::value_parser!(Utf8PathBuf))
            .value_hint(ValueHint::FilePath)
    }

    fn order() -> Arg {
        Arg::new("order")
            .help("counter order for a tool (e.g., \"DHAT=TotalBytes,TotalBlocks\")")
            .short('O')
            .long("order")
            .env("BENCH_SUMMARY_ORDER")
            .value_name("TOOL=COUNTERS")
            .action(ArgAction::Append)
            .value_delimiter(';')
            .value_parser(ToolOrder::from_str)
    }

    fn verbose() -> Arg {
        Arg::new("verbose")
            .help("be verbose (progress on stderr)")
            .short('v')
            .long("verbose")
            .action(ArgAction::Count)
    }

    Command::new("bench-summary")
        .version(crate_version!())
        .author("Kaspar Schleiser <kaspar@schleiser.de>")
        .about("Render benchmark comparisons as Markdown")
        .args_conflicts_with_subcommands(true)
        .arg(input())
        .arg(output())
        .arg(
            Arg::new("append")
                .short('a')
                .long("append")
                .help("append to the output file instead of overwriting it")
                .env("BENCH_SUMMARY_APPEND")
                .requires("output")
                .action(ArgAction::SetTrue),
        )
        .arg(order())
        .arg(verbose())
        .subcommand(
            Command::new("completion")
                .about("Generate bench-summary shell completions.")
                .arg(
                    Arg::new("generator")
                        .help("shell to generate completions for")
                        .long("generate")
                        .value_parser(value_parser!(clap_complete::Shell)),
                )
                .hide(true),
        )
        .subcommand(
            Command::new("manpages")
                .about("Generate bench-summary manpages.")
                .arg(
                    Arg::new("outdir")
                        .help("directory in which to create manpage files")
                        .value_parser(value_parser!(Utf8PathBuf))
                        .value_hint(ValueHint::DirPath)
                        .required(true),
                )
                .hide(true),
        )
}
