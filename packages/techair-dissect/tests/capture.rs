use techair_dissect::{
    protocol::{tokenize::TokenMode, DissectOptions, Dissector},
    run, Summary,
};

fn dissect_with(dissector: &Dissector, capture: &str) -> (String, Summary) {
    let mut output = Vec::new();
    let summary = run(dissector, capture.as_bytes(), &mut output).unwrap();
    (String::from_utf8(output).unwrap(), summary)
}

fn dissect(capture: &str) -> (String, Summary) {
    dissect_with(&Dissector::default(), capture)
}

#[test]
fn non_protocol_lines_produce_no_output() {
    let (output, summary) = dissect("# capture of a GET_SOFTWARE_VERSION exchange\n\nr: 00 02\n");
    assert!(output.is_empty());
    assert_eq!(summary, Summary::default());
}

#[test]
fn one_byte_frame_is_skipped() {
    let (output, summary) = dissect("R: 00\n");
    assert_eq!(output, "R: skipping empty frame (n=1)\n");
    assert_eq!(output.lines().count(), 1);
    assert_eq!(
        summary,
        Summary {
            records: 1,
            decoded: 0,
            failed: 1,
        }
    );
}

#[test]
fn software_version_exchange() {
    let (output, summary) = dissect("W: 00 02 80 71\nR: 00 02 00 64 a0 0f\n");
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(
        lines,
        [
            "W: Found 'general' [0x00] with <n=4> subtype: 'GET_SOFTWARE_VERSION' [0x02] with word len=0",
            "R: Found 'general' [0x00] with <n=6> subtype: 'GET_SOFTWARE_VERSION' [0x02] with word len=2",
            "SW Version: '1.00'.",
        ]
    );
    assert_eq!(summary.decoded, 2);
}

#[test]
fn checksum_failure_reports_both_values_and_continues() {
    let (output, summary) = dissect("R: 00 02 00 64 0f a0\nR: 03 09 01 46 50\n");
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "R: crc16 invalid! found: 0x0FA0, expected: 0xA00F");
    assert!(lines[1].starts_with("R: Found 'measure' [0x03]"));
    assert_eq!(lines[2], "GET_ZIP_SWITCH_STATE: 'CLOSED'.");
    assert_eq!(
        summary,
        Summary {
            records: 2,
            decoded: 1,
            failed: 1,
        }
    );
}

#[test]
fn field_length_failure_is_local_to_its_frame() {
    let capture = "R: 00 0a 01 02 a0 77\nR: 00 0a 0f 06 15 d5 b4\n";
    let (output, summary) = dissect(capture);

    assert!(output.contains("decode failed: Bad service date length. Expected 3 byte(s), found 2."));
    assert!(output.contains("SERVICEDATE: '15/06/2021'."));
    assert_eq!(summary.decoded, 1);
    assert_eq!(summary.failed, 1);
}

#[test]
fn crlf_captures() {
    let (output, _) = dissect("R: 06 0a 44 97 52\r\nW: 04 be 83\r\n");
    assert!(output.contains("Inflation Type: 'Single'."));
    assert!(output.ends_with("W: Found 'sensor' [0x04] with <n=3>\n"));
}

#[test]
fn strict_mode_rejects_bad_tokens() {
    let strict = Dissector::new(DissectOptions {
        tokens: TokenMode::Strict,
        ..Default::default()
    });

    let (output, summary) = dissect_with(&strict, "W: 00 02 80 zz\n");
    assert_eq!(output, "W: skipping record: Token 3 is not a hex byte.\n");
    assert_eq!(summary.failed, 1);
}

#[test]
fn mixed_capture_is_idempotent() {
    let capture = "\
W: 04 02 82 b1
R: 04 02 00 00 7f ff 80 00 2a 1c
R: 42 01 de ad dd 81
R: 01 00 00 0c 1e 2d 08 74
garbage
R: 00
";
    let (first, first_summary) = dissect(capture);
    let (second, second_summary) = dissect(capture);

    assert_eq!(first, second);
    assert_eq!(first_summary, second_summary);
    assert_eq!(first_summary.records, 5);
    assert!(first.contains("(X=0.000, Y=15.974, Z=-15.974)"));
    assert!(first.contains(" ---- unknown -----"));
    assert!(first.contains("GET_OP_HOURS '12:30:45'"));
}
