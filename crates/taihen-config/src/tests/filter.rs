use alloc::{format, string::String, vec, vec::Vec};
use core::ops::ControlFlow;

use rstest::rstest;

use super::utils::paths;
use crate::{
    FilterOptions, PathFilter, TokenizeError, collect_paths, filter::selects, try_for_each_path,
};

#[test]
fn all_section_contributes_to_named_query() {
    assert_eq!(
        paths("*ALL\n/a/b.so\n*GAME1\n/c/d.so\n", "GAME1"),
        ["/a/b.so", "/c/d.so"]
    );
}

#[test]
fn halt_stops_at_next_section_header() {
    assert_eq!(paths("*!ALL\n/a.so\n*GAME1\n/b.so\n", "GAME1"), ["/a.so"]);
}

#[test]
fn kernel_query_excludes_all() {
    assert_eq!(paths("*ALL\n/a.so\n*KERNEL\n/k.so\n", "KERNEL"), ["/k.so"]);
}

#[test]
fn no_matching_section() {
    assert!(paths("*OTHER\n/x.so\n", "GAME1").is_empty());
}

#[rstest]
#[case::exact("GAME1", "GAME1", true)]
#[case::other("OTHER", "GAME1", false)]
#[case::case_sensitive("game1", "GAME1", false)]
#[case::all_for_app("ALL", "GAME1", true)]
#[case::all_for_all("ALL", "ALL", true)]
#[case::all_for_kernel("ALL", "KERNEL", false)]
#[case::kernel_for_kernel("KERNEL", "KERNEL", true)]
#[case::kernel_for_app("KERNEL", "GAME1", false)]
#[case::kernel_for_all("KERNEL", "ALL", false)]
#[case::empty_query("ALL", "", true)]
#[case::no_trimming("GAME1", "GAME1 ", false)]
fn section_selection(#[case] name: &str, #[case] query: &str, #[case] expected: bool) {
    assert_eq!(selects(name.as_bytes(), query.as_bytes()), expected);
}

#[rstest]
#[case::unselected_halt_is_ignored("*!OTHER\n/x\n*GAME1\n/g\n", "GAME1", vec!["/g"])]
#[case::halt_at_end_of_document("*!GAME1\n/g\n", "GAME1", vec!["/g"])]
#[case::halt_on_all_ignored_for_kernel("*!ALL\n/a\n*KERNEL\n/k\n", "KERNEL", vec!["/k"])]
#[case::halt_flag_resets("*!OTHER\n/x\n*GAME1\n/g\n*ALL\n/a\n", "GAME1", vec!["/g", "/a"])]
#[case::halt_before_halted_all("*!GAME1\n/g\n*!ALL\n/a\n", "GAME1", vec!["/g"])]
#[case::halt_on_own_section("*ALL\n/a\n*!GAME1\n/g\n*ALL\n/b\n", "GAME1", vec!["/a", "/g"])]
#[case::repeated_sections("*GAME1\n/1\n*OTHER\n/x\n*GAME1\n/2\n", "GAME1", vec!["/1", "/2"])]
#[case::comments_between("*GAME1\n# skip\n\n  /1  \n#/x\n/2", "GAME1", vec!["/1", "/2"])]
#[case::orphan_paths_never_emitted("/orphan\n*ALL\n/a\n", "GAME1", vec!["/a"])]
#[case::query_for_all("*ALL\n/a\n*KERNEL\n/k\n", "ALL", vec!["/a"])]
#[case::crlf("*ALL\r\n/a\r\n*GAME1\r\n/g\r\n", "GAME1", vec!["/a", "/g"])]
fn scan_semantics(#[case] input: &str, #[case] section: &str, #[case] expected: Vec<&str>) {
    assert_eq!(paths(input, section), expected);
}

#[test]
fn tokenizer_error_truncates_silently() {
    let input = format!("*ALL\n/a\n{}\n/b\n", "x".repeat(400));
    assert_eq!(paths(&input, "GAME1"), ["/a"]);
}

#[test]
fn tokenizer_error_can_be_surfaced() {
    let input = format!("*ALL\n/a\n{}\n/b\n", "x".repeat(400));
    let options = FilterOptions {
        surface_errors: true,
        ..Default::default()
    };
    let items: Vec<_> = PathFilter::with_options(&input, "GAME1", options).collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().map(|p| p.as_bytes()), Ok(&b"/a"[..]));
    assert_eq!(
        items[1],
        Err(TokenizeError::LineTooLong { line: 3, len: 400 })
    );
}

#[test]
#[should_panic(expected = "path stream failed")]
fn panic_on_error_for_backtraces() {
    let input = "x".repeat(400);
    let options = FilterOptions {
        panic_on_error: true,
        ..Default::default()
    };
    for _ in PathFilter::with_options(&input, "GAME1", options) {}
}

#[test]
fn filter_is_lazy_and_fused() {
    let mut filter = PathFilter::new("*ALL\n/a\n/b\n", "GAME1");
    assert_eq!(filter.next().unwrap().unwrap(), "/a");
    assert_eq!(filter.next().unwrap().unwrap(), "/b");
    assert!(filter.next().is_none());
    assert!(filter.next().is_none());
}

#[test]
fn sink_can_stop_the_scan() {
    let mut seen = Vec::new();
    let result = try_for_each_path("*ALL\n/a\n/b\n/c\n", "GAME1", |path| {
        seen.push(String::from_utf8_lossy(path).into_owned());
        if seen.len() == 2 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(result, Ok(()));
    assert_eq!(seen, ["/a", "/b"]);
}

#[test]
fn fallible_sink_reports_tokenizer_errors() {
    let input = format!("*ALL\n/a\n{}\n", "x".repeat(300));
    let mut count = 0;
    let result = try_for_each_path(&input, "GAME1", |_| {
        count += 1;
        ControlFlow::Continue(())
    });
    assert_eq!(result, Err(TokenizeError::LineTooLong { line: 3, len: 300 }));
    assert_eq!(count, 1);
}

#[test]
fn collect_matches_for_each() {
    let input = "*KERNEL\n/k\n*ALL\n/a\n*!GAME1\n/g\n*ALL\n/late\n";
    for section in ["KERNEL", "GAME1", "OTHER", "ALL"] {
        let collected: Vec<String> = collect_paths(input, section)
            .into_iter()
            .map(|p| String::from_utf8_lossy(&p).into_owned())
            .collect();
        assert_eq!(collected, paths(input, section), "section {section}");
    }
}
