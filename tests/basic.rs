use cookiebridge::config::Config;
use cookiebridge::cookies::netscape::convert;

#[test]
fn test_version() {
    assert!(!cookiebridge::VERSION.is_empty());
}

#[test]
fn test_default_backend_is_local() {
    assert_eq!(Config::default().backend_url, "http://localhost:8000");
}

#[test]
fn test_line_count_matches_well_formed_pairs() {
    let header = "n1=v1; n2=v2; bad; n3=v3=x; =nameless";
    let file = convert(header);
    assert_eq!(file.lines().len(), 1 + 3);
    let names: Vec<&str> = file.pairs().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["n1", "n2", "n3"]);
}
