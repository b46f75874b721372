#![cfg(feature = "listing")]

use c64asm::{assemble, assemble6502, ListingFormat};

const SRC: &str = "\
* = $c000
start
    lda #$01 ; border
    sta $d020
    jmp start
";

#[test]
fn matched_listing_lines() {
    let image = assemble(SRC).unwrap();
    let text = image.listing(&ListingFormat::default());
    let expected = [
        format!("{:19}* = $c000", ""),
        format!("{:19}start", ""),
        format!("{:<19}    lda #$01 ; border", "C000: A9 01"),
        format!("{:<19}    sta $d020", "C002: 8D 20 D0"),
        format!("{:<19}    jmp start", "C005: 4C FF BF"),
    ];
    assert_eq!(text.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn raw_listing_rows() {
    let image = assemble(SRC).unwrap();
    let format = ListingFormat {
        match_source_code: false,
        max_bytes_per_row: 3,
        ..ListingFormat::default()
    };
    assert_eq!(image.listing(&format), "C000: A9 01 8D\nC003: 20 D0 4C\nC006: FF BF");
}

#[test]
fn write_listing_to_buffer() {
    let image = assemble(SRC).unwrap();
    let mut out = Vec::new();
    image.write_listing(&ListingFormat::default(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), image.listing(&ListingFormat::default()));
}

#[test]
fn flat_result_record() {
    let ok = assemble6502(SRC);
    assert!(!ok.error);
    assert_eq!(ok.machine_code_address, 0xC000);
    assert_eq!(ok.machine_code.as_deref().map(<[u8]>::len), Some(8));
    assert_eq!(ok.stringified_code, assemble(SRC).unwrap().listing(&ListingFormat::default()));

    let failed = assemble6502("* = $c000\n    lda nowhere");
    assert!(failed.error);
    assert_eq!(failed.error_string, "2:unresolved label 'nowhere'\n");
    assert!(failed.machine_code.is_none());
}
