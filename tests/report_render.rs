// tests/report_render.rs
use chrono::{TimeZone, Utc};
use serde_json::Value as Json;

use sound_scout::{
    render, FetchError, LabeledMetric, MediaRecord, RankedRecord, Record, RunReport, SourceKind,
    SourceResult,
};

fn grouped(mut r: SourceResult, group: &str) -> SourceResult {
    r.group = group.to_string();
    r
}

fn sample_report() -> RunReport {
    let chart = SourceResult::ok(
        "Kworb (Spotify Charts)",
        SourceKind::RankedList,
        vec![Record::Ranked(RankedRecord {
            rank: 1,
            name: "Artist A".into(),
            metric_primary: "1,234,567".into(),
            metric_secondary: "+1,000".into(),
        })],
    );
    let video = grouped(
        SourceResult::ok(
            "YouTube Search: Artist A",
            SourceKind::IdentifierList,
            vec![Record::Media(MediaRecord {
                identifier: "abc123".into(),
                url: "https://www.youtube.com/watch?v=abc123".into(),
                thumbnail_url: "https://img.youtube.com/vi/abc123/mqdefault.jpg".into(),
            })],
        ),
        "YouTube Search",
    );
    let ig_ok = grouped(
        SourceResult::ok(
            "Instagram: @taylorswift",
            SourceKind::LabeledMetric,
            vec![Record::Metric(LabeledMetric {
                subject: "taylorswift".into(),
                value: "283,412,077".into(),
                unit_label: "Followers".into(),
            })],
        ),
        "Instagram",
    );
    let ig_dyn = grouped(
        SourceResult::ok("Instagram: @drake", SourceKind::LabeledMetric, vec![]),
        "Instagram",
    );
    let ig_err = grouped(
        SourceResult::failed(
            "Instagram: @billieeilish",
            SourceKind::LabeledMetric,
            FetchError::HttpStatus(429).into(),
        ),
        "Instagram",
    );

    RunReport {
        started_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        results: vec![chart, video, ig_ok, ig_dyn, ig_err],
    }
}

fn rendered(report: &RunReport) -> String {
    let mut buf = Vec::new();
    render(report, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn report_lists_records_and_health_per_source() {
    let text = rendered(&sample_report());

    assert!(text.contains("Timestamp: 2026-01-02T03:04:05+00:00"));
    assert!(text.contains("KWORB (SPOTIFY CHARTS)"));
    assert!(text.contains("Daily: +1,000"));
    assert!(text.contains("  - Video: https://www.youtube.com/watch?v=abc123"));
    assert!(text.contains("  283,412,077 Followers"));
    assert!(text.contains("  Page loaded (value in dynamic content)"));
    assert!(text.contains("  Error: HTTP 429"));

    assert!(text.contains("  Kworb (Spotify Charts) - working (1 records)"));
    assert!(text.contains("  Instagram: @drake - requires dynamic rendering"));
    assert!(text.contains("  Instagram: @billieeilish - error: HTTP 429"));
    assert!(text
        .trim_end()
        .ends_with("Sources: 3 working, 0 empty, 1 requires dynamic rendering, 1 failed"));
}

#[test]
fn each_group_gets_one_banner() {
    let text = rendered(&sample_report());
    assert_eq!(text.matches("\nINSTAGRAM\n").count(), 1);
    assert_eq!(text.matches("\nYOUTUBE SEARCH\n").count(), 1);
}

#[test]
fn json_result_set_is_machine_readable() {
    let json = sample_report().to_json().unwrap();
    let v: Json = serde_json::from_str(&json).unwrap();

    let results = v["results"].as_array().unwrap();
    assert_eq!(results.len(), 5);
    assert_eq!(results[0]["records"][0]["type"], "ranked");
    assert_eq!(results[0]["records"][0]["metric_primary"], "1,234,567");
    assert_eq!(results[3]["records"].as_array().unwrap().len(), 0);
    assert!(results[3]["error"].is_null());
    assert_eq!(results[4]["error"]["reason"]["detail"], 429);
}
