use std::{
    fs,
    io::{stdin, Read},
    process,
};

use clap::{value_parser, Arg, ArgAction, Command};

use thistle::{parse, Options};

fn cli() -> Command {
    Command::new("thistle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse an SCSS-dialect stylesheet and dump its syntax tree")
        .arg(
            Arg::new("STDIN")
                .action(ArgAction::SetTrue)
                .long("stdin")
                .help("Read the stylesheet from stdin"),
        )
        .arg(
            Arg::new("SOURCE_INDEX")
                .long("source-index")
                .help("Index used to tag statements in the dumped tree")
                .default_value("0")
                .num_args(1)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("INPUT")
                .value_parser(value_parser!(String))
                .required_unless_present("STDIN")
                .help("Stylesheet file"),
        )
}

fn main() -> std::io::Result<()> {
    let matches = cli().get_matches();

    let source_index = *matches
        .get_one::<u32>("SOURCE_INDEX")
        .expect("has a default");

    let (name, contents) = if let Some(path) = matches.get_one::<String>("INPUT") {
        (path.clone(), fs::read_to_string(path)?)
    } else {
        let mut buffer = String::new();
        stdin().read_to_string(&mut buffer)?;
        (String::new(), buffer)
    };

    let options = Options::default()
        .source_name(name)
        .source_index(source_index);

    match parse(&contents, &options) {
        Ok(root) => println!("{:#?}", root),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use crate::cli;

    #[test]
    fn verify() {
        cli().debug_assert();
    }
}
