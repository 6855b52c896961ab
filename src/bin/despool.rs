use clap::{clap_app, ArgMatches};
use despool::Document;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn load(matches: &ArgMatches) -> Document {
    let path = matches.value_of("INPUT").unwrap();
    let (document, errors) = Document::from_file(path);

    for error in errors {
        eprintln!("{}\n", error);
    }

    match document {
        Some(document) => document,
        None => std::process::exit(1),
    }
}

fn summary(matches: &ArgMatches) {
    let document = load(matches);
    println!(
        "{} pages, {} statements",
        document.total_pages(),
        document.total_statements()
    );
    for (id, statement) in document.statements() {
        let first_line = statement
            .address()
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("");
        println!(
            "statement {}: {} page(s) {:?} {}",
            id,
            statement.page_count(),
            statement.page_numbers(),
            first_line
        );
    }
}

fn addresses(matches: &ArgMatches) {
    let document = load(matches);
    for entry in document.addresses() {
        println!("{}", entry.trim_end());
        println!("--");
    }
}

fn main() {
    let matches = clap_app!(despool =>
        (version: VERSION)
        (@subcommand summary =>
            (@arg INPUT: +required "Input dump file")
        )
        (@subcommand addresses =>
            (@arg INPUT: +required "Input dump file")
        )
    )
    .get_matches();
    if let Some(matches) = matches.subcommand_matches("summary") {
        summary(matches);
    } else if let Some(matches) = matches.subcommand_matches("addresses") {
        addresses(matches);
    }
}
