use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

pub fn build_app<'a, 'b>() -> App<'a, 'b> {
    App::new("tally")
        .version(crate_version!())
        .author("Tally Authors")
        .about("Run text analytics jobs on the local MapReduce engine")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .long("config")
                .short("c")
                .help("JSON file holding the engine configuration")
                .takes_value(true)
                .required(false),
        )
        .subcommand(SubCommand::with_name("jobs").about("List the available jobs"))
        .subcommand(
            SubCommand::with_name("run")
                .about("Run a job over files, directories or standard input")
                .arg(
                    Arg::with_name("job")
                        .long("job")
                        .short("j")
                        .help("Name of the job to run, see `tally jobs`")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("input")
                        .long("input")
                        .short("i")
                        .help("Input file or directory, standard input is read when omitted")
                        .takes_value(true)
                        .multiple(true)
                        .number_of_values(1)
                        .required(false),
                )
                .arg(
                    Arg::with_name("output")
                        .long("output")
                        .short("o")
                        .help("Output file, standard output is used when omitted")
                        .takes_value(true)
                        .required(false),
                )
                .arg(
                    Arg::with_name("partitions")
                        .long("partitions")
                        .short("p")
                        .help("Number of input partitions, overrides the configuration file")
                        .takes_value(true)
                        .required(false),
                )
                .arg(
                    Arg::with_name("no-combine")
                        .long("no-combine")
                        .help("Skip the combiners of every stage"),
                )
                .arg(
                    Arg::with_name("stats")
                        .long("stats")
                        .help("Print the statistics of every stage as JSON to standard error"),
                ),
        )
}

pub fn parse_command_line<'a>() -> ArgMatches<'a> {
    build_app().get_matches()
}
