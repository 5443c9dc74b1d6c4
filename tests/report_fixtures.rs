//! Parses reports captured from real dig runs.

mod helpers;

use std::net::Ipv4Addr;

use dig_report::dig::{parse_report, NoResponseReason, ParsedReport, QueryOutcome, Section};
use helpers::read_fixture;

fn answered(name: &str) -> ParsedReport {
    match parse_report(&read_fixture(name)).expect("Should parse") {
        QueryOutcome::Answered(report) => report,
        QueryOutcome::NoResponse(reason) => panic!("{name}: unexpected no response ({reason:?})"),
    }
}

#[test]
fn test_parse_empty() {
    assert_eq!(
        parse_report("").expect("Should parse"),
        QueryOutcome::NoResponse(NoResponseReason::EmptyOutput)
    );
}

#[test]
fn test_parse_no_server() {
    assert_eq!(
        parse_report(&read_fixture("sample_dig_no_server.txt")).expect("Should parse"),
        QueryOutcome::NoResponse(NoResponseReason::TimedOut)
    );
}

#[test]
fn test_parse_full_answer_only() {
    let report = answered("sample_dig1.txt");
    assert_eq!(report.status, "NOERROR");
    assert_eq!(report.query_time_ms, 24);
    assert_eq!(report.message_size_bytes, 143);
    assert_eq!(report.responding_server, Ipv4Addr::new(8, 8, 8, 8));
    assert_eq!(report.answer_count, 5);
    assert_eq!(report.authority_count, 0);
    assert_eq!(report.additional_count, 1);
    assert!(!report.recursion_not_available);
    assert_eq!(report.answer_section.len(), 5);
    assert!(report.authority_section.is_empty());
    assert!(report.additional_section.is_empty());

    assert_eq!(
        report.to_string(),
        "status: NOERROR, query time: 24, message size: 143, responding server: 8.8.8.8, \
         ANSWER: 5, AUTHORITY: 0, ADDITIONAL: 1\
         \n\tANSWER SECTION: [\
         [name: www.cnn.com., ttl: 261, class=IN, type=CNAME, value=turner-tls.map.fastly.net.], \
         [name: turner-tls.map.fastly.net., ttl: 29, class=IN, type=A, value=151.101.1.67], \
         [name: turner-tls.map.fastly.net., ttl: 29, class=IN, type=A, value=151.101.65.67], \
         [name: turner-tls.map.fastly.net., ttl: 29, class=IN, type=A, value=151.101.129.67], \
         [name: turner-tls.map.fastly.net., ttl: 29, class=IN, type=A, value=151.101.193.67]]\
         \n\tAUTHORITY SECTION: []\
         \n\tADDITIONAL SECTION: []"
    );
}

#[test]
fn test_parse_full_with_authority() {
    let report = answered("sample_dig2.txt");
    assert_eq!(report.status, "NOERROR");
    assert_eq!(report.query_time_ms, 39);
    assert_eq!(report.message_size_bytes, 236);
    assert_eq!(report.responding_server, Ipv4Addr::new(205, 251, 192, 47));
    assert_eq!(report.answer_count, 4);
    assert_eq!(report.authority_count, 4);
    assert_eq!(report.additional_count, 1);
    assert!(report.recursion_not_available);
    assert_eq!(report.answer_section.len(), 4);
    assert_eq!(report.authority_section.len(), 4);
    assert!(report.additional_section.is_empty());

    let nameservers: Vec<&str> = report
        .section(Section::Authority)
        .iter()
        .map(|r| r.value.as_str())
        .collect();
    assert_eq!(
        nameservers,
        vec![
            "ns1.p31.dynect.net.",
            "ns2.p31.dynect.net.",
            "pdns1.ultradns.net.",
            "pdns6.ultradns.co.uk."
        ]
    );
}

#[test]
fn test_parse_full_with_additional() {
    let report = answered("sample_dig3.txt");
    assert_eq!(report.status, "NOERROR");
    assert_eq!(report.query_time_ms, 68);
    assert_eq!(report.message_size_bytes, 287);
    assert_eq!(report.responding_server, Ipv4Addr::new(192, 5, 6, 30));
    assert_eq!(report.answer_count, 1);
    assert_eq!(report.authority_count, 4);
    // The OPT pseudo-record is counted but never printed as a record line
    assert_eq!(report.additional_count, 9);
    assert!(!report.recursion_not_available);
    assert_eq!(report.answer_section.len(), 1);
    assert_eq!(report.authority_section.len(), 4);
    assert_eq!(report.additional_section.len(), 8);

    let ds = &report.answer_section[0];
    assert_eq!(ds.record_type, "DS");
    assert_eq!(
        ds.value,
        "2371 13 2 C988EC423E3880EB8DD8A46E2A9FB1E1DE6E8CBE2E9C6B51B5D1DB7F E1A1E54D"
    );

    let aaaa = &report.additional_section[1];
    assert_eq!(aaaa.name, "ns-47.awsdns-05.com.");
    assert_eq!(aaaa.ttl, 172800);
    assert_eq!(aaaa.record_type, "AAAA");
    assert_eq!(aaaa.value, "2600:9000:5300:2f00::1");
}

#[test]
fn test_parse_nxdomain() {
    let report = answered("sample_dig_nxdomain.txt");
    assert_eq!(report.status, "NXDOMAIN");
    assert_eq!(report.answer_count, 0);
    assert!(report.answer_section.is_empty());
    assert_eq!(report.authority_section.len(), 1);
    assert_eq!(report.authority_section[0].record_type, "SOA");
}

#[test]
fn test_timeout_phrase_anywhere_wins() {
    let mut text = read_fixture("sample_dig1.txt");
    text.push_str(";; connection timed out; no servers could be reached\n");
    assert_eq!(
        parse_report(&text).expect("Should parse"),
        QueryOutcome::NoResponse(NoResponseReason::TimedOut)
    );
}

#[test]
fn test_parse_twice_is_equal() {
    let text = read_fixture("sample_dig3.txt");
    assert_eq!(parse_report(&text), parse_report(&text));
}

#[test]
fn test_report_serializes_to_json() {
    let report = answered("sample_dig1.txt");
    let json = serde_json::to_value(&report).expect("Should serialize");
    assert_eq!(json["status"], "NOERROR");
    assert_eq!(json["responding_server"], "8.8.8.8");
    assert_eq!(json["answer_section"][0]["record_type"], "CNAME");
    assert_eq!(json["answer_section"].as_array().map(Vec::len), Some(5));
}
