use std::io::Cursor;

use proptest::prelude::*;

use grid_ingest::{discover_dictionary, locate_lookup_start};
use grid_map::{compose_mapping, parse_mapping_spec};
use grid_model::RemapOptions;
use grid_transform::{LookupCursor, RewriteOutcome, StreamingRewriter};

fn remap(grid: &str, map: &str, options: &RemapOptions) -> (String, RewriteOutcome) {
    let parsed = parse_mapping_spec(map);
    let discovery = discover_dictionary(grid.as_bytes(), &options.block_name).expect("discover");
    let composition = compose_mapping(&parsed.spec, &discovery.dictionary);
    let start = locate_lookup_start(grid.as_bytes(), &options.block_name).expect("locate");
    let lookup = LookupCursor::new(Cursor::new(grid.as_bytes()), start.offset).expect("cursor");
    let rewriter = StreamingRewriter::new(
        &composition.mapping,
        &composition.reverse,
        options,
        lookup,
    );
    let mut output = Vec::new();
    let outcome = rewriter
        .rewrite(grid.as_bytes(), &mut output)
        .expect("rewrite");
    (String::from_utf8(output).expect("utf8"), outcome)
}

#[test]
fn satnum_row_is_rewritten() {
    let grid = "-- header\nGRID\n-- 1 = Sand --\nSATNUM\n1 1\n/\n";
    let (output, outcome) = remap(grid, "[Sand]\nSATNUM=7\n", &RemapOptions::default());
    assert_eq!(output, "-- header\nGRID\n-- 1 = Sand --\nSATNUM\n 7 7\n/\n");
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn preamble_maps_left_identifier_to_right_category() {
    // Closing marker directly after the category, as written by grid exporters.
    let grid = "-- header\nGRID\n-- 1 = Sand--\n-- 2 = Shale--\nSATNUM\n1 2\n/\n";
    let map = "[Sand]\nSATNUM=7\n[Shale]\nSATNUM=8\n";
    let parsed = parse_mapping_spec(map);
    let discovery = discover_dictionary(grid.as_bytes(), "SATNUM").expect("discover");
    assert_eq!(discovery.dictionary.identifier("Sand"), Some("1"));
    assert_eq!(discovery.dictionary.identifier("Shale"), Some("2"));
    let composition = compose_mapping(&parsed.spec, &discovery.dictionary);
    assert!(composition.dropped_categories.is_empty());

    let (output, outcome) = remap(grid, map, &RemapOptions::default());
    assert_eq!(
        output,
        "-- header\nGRID\n-- 1 = Sand--\n-- 2 = Shale--\nSATNUM\n 7 8\n/\n"
    );
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn unmapped_identifier_is_zeroed_and_reported() {
    let grid = "-- header\nGRID\n-- 1 = Sand --\n-- 2 = Shale --\nSATNUM\n1 2\n/\n";
    let (output, mut outcome) = remap(grid, "[Sand]\nSATNUM=7\n", &RemapOptions::default());
    assert_eq!(
        output,
        "-- header\nGRID\n-- 1 = Sand --\n-- 2 = Shale --\nSATNUM\n 7 0\n/\n"
    );
    assert_eq!(
        outcome.diagnostics.drain_sorted(),
        vec!["Mapping Shale - SATNUM missing".to_string()]
    );
}

#[test]
fn diagnostics_are_sorted_and_distinct() {
    let grid = "\
-- header
GRID
-- 1 = Sand --
-- 2 = Shale --
-- 3 = Coal --
SATNUM
3 2 3
2 3 2
/
PERMX
1 1 1
1 1 1
/
";
    let (_, mut outcome) = remap(grid, "[Sand]\nSATNUM=7\nPERMX=1\n", &RemapOptions::default());
    assert_eq!(
        outcome.diagnostics.drain_sorted(),
        vec![
            "Mapping Coal - PERMX missing".to_string(),
            "Mapping Coal - SATNUM missing".to_string(),
            "Mapping Shale - PERMX missing".to_string(),
            "Mapping Shale - SATNUM missing".to_string(),
        ]
    );
}

#[test]
fn mismatch_does_not_abort() {
    let grid = "-- header\nGRID\n-- 1 = Sand --\nSATNUM\n1 1\n1\n/\n";
    let (output, outcome) = remap(grid, "[Sand]\nSATNUM=7\n", &RemapOptions::default());
    // The dictionary block is looked up against itself and always lines up.
    assert_eq!(outcome.stats.rows_mismatched, 0);
    assert_eq!(output, "-- header\nGRID\n-- 1 = Sand --\nSATNUM\n 7 7\n 7\n/\n");

    let grid = "-- header\nGRID\n-- 1 = Sand --\nSATNUM\n1 1\n/\nPERMX\n1\n2 2\n/\n";
    let (output, outcome) = remap(grid, "[Sand]\nPERMX=4\n", &RemapOptions::default());
    assert_eq!(outcome.stats.rows_mismatched, 2);
    assert_eq!(output, grid);
}

fn plain_line() -> impl Strategy<Value = String> {
    prop_oneof![
        "-- [a-z ]{0,10}".prop_map(|text| format!("{text}\n")),
        "[A-OQ-RT-Z]{2,6}".prop_map(|name| format!("{name}\n")),
        "[0-9 .]{0,10}".prop_map(|row| format!("{row}\n")),
        Just("/\n".to_string()),
        Just("\n".to_string()),
    ]
}

proptest! {
    #[test]
    fn lines_outside_mapped_blocks_are_copied(lines in prop::collection::vec(plain_line(), 0..40)) {
        let grid = format!("-- header\nGRID\n-- 1 = Sand --\nSATNUM\n1 1\n/\n{}", lines.concat());
        // Only PERMX is mapped and the generated lines never name it.
        let (output, outcome) = remap(&grid, "[Sand]\nPERMX=5\n", &RemapOptions::default());
        prop_assert_eq!(output, grid);
        prop_assert_eq!(outcome.stats.blocks_remapped, 0);
    }
}
