use anyhow::Result;
use colored::Colorize;

use crate::goodreads::{parse_title, ParsedTitle};

pub fn run(title: &str, json: bool, quiet: bool) -> Result<()> {
    let parsed = parse_title(title);

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
    } else {
        print_pretty(&parsed, quiet);
    }

    Ok(())
}

fn print_pretty(parsed: &ParsedTitle, quiet: bool) {
    if !quiet {
        println!("{}", parsed.full_title.bold());
        println!("{}", "─".repeat(40));
    }

    print_field("Title", Some(parsed.title.as_str()));
    print_field("Subtitle", parsed.subtitle.as_deref());
    print_field("Series", parsed.series_name.as_deref());
    print_field("Number", parsed.series_number.as_deref());
}

fn print_field(label: &str, value: Option<&str>) {
    if let Some(v) = value {
        println!("{:>12}: {}", label.cyan(), v);
    }
}
