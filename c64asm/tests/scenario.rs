use c64asm::{assemble, Assembler, AssemblerOptions, ErrorClass, InstructionTable, LabelPolicy};

const HELLO: &str = "\
* = $4000
start
    ldx #$00
next
    lda msg,x
    sta $0400,x
    inx
    cpx #$13
    bne next
    jmp *
msg
    .text \"HI\"
";

#[test]
fn hello_world_image() {
    let image = assemble(HELLO).unwrap();
    assert_eq!(image.start_address, 0x4000);
    assert_eq!(
        image.bytes,
        vec![
            0xA2, 0x00, // ldx #$00
            0xBD, 0x10, 0x40, // lda msg,x
            0x9D, 0x00, 0x04, // sta $0400,x
            0xE8, // inx
            0xE0, 0x13, // cpx #$13
            0xD0, 0xF5, // bne next
            0x4C, 0x0D, 0x40, // jmp *
            0x48, 0x49, // "HI"
        ]
    );
    assert_eq!(image.byte_rows.len(), image.bytes.len());
    assert_eq!(
        image.labels,
        vec![
            ("start".to_string(), 0x4000),
            ("next".to_string(), 0x4002),
            ("msg".to_string(), 0x4010),
        ]
    );
    assert_eq!(image.source_lines.len(), 12);
    assert_eq!(image.bytes_for_row(9), vec![0xD0, 0xF5]);
    assert_eq!(image.end_address(), 0x4012);
}

#[test]
fn empty_source() {
    for src in ["", "   \n\n\t\n"] {
        let image = assemble(src).unwrap();
        assert!(image.is_empty());
        assert_eq!(image.start_address, 0);
    }
}

#[test]
fn unknown_instruction() {
    let diags = assemble("    foo").unwrap_err();
    let err = diags.first().unwrap();
    assert_eq!(err.class(), ErrorClass::Semantic);
    assert_eq!(err.row(), Some(1));
    assert_eq!(diags.render(), "1:5:unknown instruction 'FOO'\n");
}

#[test]
fn malformed_start_address() {
    let diags = assemble("* = $400\n    nop").unwrap_err();
    assert_eq!(diags.render(), "1:5:start address must be 2 bytes long\n");
    let diags = assemble("* = $04000\n    nop").unwrap_err();
    assert_eq!(diags.first().unwrap().class(), ErrorClass::Semantic);
}

#[test]
fn unresolved_label() {
    let diags = assemble("* = $1000\n    nop\n    jmp nowhere").unwrap_err();
    let err = diags.first().unwrap();
    assert_eq!(err.class(), ErrorClass::UnresolvedSymbol);
    assert_eq!(diags.render(), "3:unresolved label 'nowhere'\n");
}

#[test]
fn first_error_stops_the_run() {
    let diags = assemble("    foo\n    bar\n    jmp nowhere").unwrap_err();
    assert_eq!(diags.errors().len(), 1);
    assert_eq!(diags.first().unwrap().row(), Some(1));
}

#[test]
fn lexical_and_syntax_classes() {
    let diags = assemble("    .text \"HI").unwrap_err();
    assert_eq!(diags.first().unwrap().class(), ErrorClass::Lexical);
    let diags = assemble("* $4000").unwrap_err();
    assert_eq!(diags.first().unwrap().class(), ErrorClass::Syntax);
    let diags = assemble("    .text \"hi\"").unwrap_err();
    assert_eq!(diags.render(), "1:12:unknown character 'h'\n");
}

#[test]
fn label_redefinition_overwrites_by_default() {
    let src = "* = $2000\ndata\n    nop\ndata\n    lda data";
    let image = assemble(src).unwrap();
    assert_eq!(image.bytes, vec![0xEA, 0xAD, 0x01, 0x20]);
}

#[test]
fn label_redefinition_rejected_when_strict() {
    let src = "* = $2000\ndata\n    nop\ndata\n    lda data";
    let assembler = Assembler::with_options(
        InstructionTable::shared(),
        AssemblerOptions { label_policy: LabelPolicy::Reject },
    );
    let diags = assembler.assemble(src).unwrap_err();
    assert_eq!(diags.first().unwrap().class(), ErrorClass::Semantic);
    assert_eq!(diags.render(), "4:1:label 'data' already defined in row 2\n");
}

// The -1 on label-addressed jumps matches historical output but has not been
// checked against another assembler yet.
#[test]
fn jump_to_label_is_branch_adjusted() {
    let image = assemble("* = $c000\n    jsr sub\n    rts\nsub\n    rts").unwrap();
    assert_eq!(image.bytes, vec![0x20, 0x03, 0xC0, 0x60, 0x60]);
    let image = assemble("* = $c000\nloop\n    jmp loop").unwrap();
    assert_eq!(image.bytes, vec![0x4C, 0xFF, 0xBF]);
}

#[test]
fn crlf_source() {
    let unix = assemble(HELLO).unwrap();
    let dos = assemble(&HELLO.replace('\n', "\r\n")).unwrap();
    assert_eq!(unix.bytes, dos.bytes);
    assert_eq!(unix.byte_rows, dos.byte_rows);
}

#[test]
fn screen_codes() {
    let image = assemble("    .screen \"HELLO @\"").unwrap();
    assert_eq!(image.bytes, vec![0x08, 0x05, 0x0C, 0x0C, 0x0F, 0x20, 0x00]);
}
