// SPDX-License-Identifier: GPL-2.0-or-later
use clippings_core::{ClippingsParser, ExportFormat, ParseConfig, ParseOutcome};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

const FLATLAND: &str = "\u{feff}Flatland (Edwin A. Abbott)\n\
                        - Highlight Loc. 120-121 | Added on Monday\n\
                        \n\
                        A square is a four-sided figure.\n\
                        ==========\n";

fn parse(input: &str) -> ParseOutcome {
    ClippingsParser::new()
        .parse(input, &ParseConfig::default())
        .unwrap()
}

#[test]
fn text_export_end_to_end() {
    let dir = TempDir::new().unwrap();
    let outcome = parse(FLATLAND);

    let written = ExportFormat::Text
        .exporter()
        .export(&outcome.log, dir.path())
        .unwrap();

    let path = dir.path().join("Flatland (Edwin A_ Abbott).txt");
    assert_eq!(written, vec![path.clone()]);
    assert_eq!(
        fs::read_to_string(path).unwrap(),
        format!(
            "Flatland (Edwin A. Abbott)\n\n{}#120\nA square is a four-sided figure.\n\n",
            " ".repeat(60)
        )
    );
}

#[test]
fn bookmark_only_title_is_kindle_only() {
    let dir = TempDir::new().unwrap();
    let input = "\u{feff}Marks (Someone)\n- Bookmark Loc. 8 | Added on Friday\n\n==========\n";
    let outcome = parse(input);

    for format in [ExportFormat::Text, ExportFormat::Viki, ExportFormat::Yaml] {
        let written = format.exporter().export(&outcome.log, dir.path()).unwrap();
        assert!(written.is_empty(), "{format} wrote {written:?}");
    }

    let written = ExportFormat::Kindle
        .exporter()
        .export(&outcome.log, dir.path())
        .unwrap();
    assert_eq!(written, vec![dir.path().join("Marks (Someone).kindle")]);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn every_format_writes_its_extension() {
    let dir = TempDir::new().unwrap();
    let outcome = parse(FLATLAND);

    for format in [ExportFormat::Viki, ExportFormat::Kindle, ExportFormat::Yaml] {
        format.exporter().export(&outcome.log, dir.path()).unwrap();
    }

    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "Flatland (Edwin A_ Abbott).kindle",
            "Flatland (Edwin A_ Abbott).txt",
            "Flatland (Edwin A_ Abbott).yml",
        ]
    );
}

#[test]
fn colliding_titles_last_writer_wins() {
    let dir = TempDir::new().unwrap();
    let input = "\u{feff}A.B\n- Highlight Loc. 1 | x\n\nfirst\n==========\n\
                 A:B\n- Highlight Loc. 1 | x\n\nsecond\n==========\n";
    let outcome = parse(input);

    let written = ExportFormat::Text
        .exporter()
        .export(&outcome.log, dir.path())
        .unwrap();

    assert_eq!(written.len(), 2);
    assert_eq!(written[0], written[1]);
    let content = fs::read_to_string(&written[1]).unwrap();
    assert!(content.starts_with("A:B\n"));
}

#[test]
fn missing_output_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let outcome = parse(FLATLAND);

    let result = ExportFormat::Text
        .exporter()
        .export(&outcome.log, &dir.path().join("missing"));
    assert!(result.is_err());
}

fn block(kind: &str, location: u32, text: &str) -> String {
    format!("Book\n- {kind} Loc. {location} | Added on Monday\n\n{text}\n==========\n")
}

proptest! {
    #[test]
    fn rendered_locations_ascend(locations in proptest::collection::vec(0u32..100_000, 1..20)) {
        let mut input = String::from("\u{feff}");
        for location in &locations {
            input.push_str(&block("Highlight", *location, "text"));
        }
        let outcome = parse(&input);
        let record = outcome.log.get("Book").unwrap();
        let output = ExportFormat::Text.exporter().render("Book", record).unwrap().unwrap();

        let rendered: Vec<u32> = output
            .lines()
            .filter_map(|line| line.trim_start().strip_prefix('#'))
            .map(|n| n.parse().unwrap())
            .collect();
        let mut expected = locations.clone();
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(rendered, expected);
    }

    #[test]
    fn same_location_keeps_every_fragment(count in 1usize..8) {
        let mut input = String::from("\u{feff}");
        for i in 0..count {
            let kind = if i % 2 == 0 { "Highlight" } else { "Note" };
            input.push_str(&block(kind, 42, &format!("fragment {i}")));
        }
        let outcome = parse(&input);
        let fragments = &outcome.log.get("Book").unwrap().entries[&42];

        prop_assert_eq!(fragments.len(), count);
        for (i, fragment) in fragments.iter().enumerate() {
            let expected = if i % 2 == 0 {
                format!("fragment {i}")
            } else {
                format!("NOTE: fragment {i}")
            };
            prop_assert_eq!(fragment, &expected);
        }
    }
}
