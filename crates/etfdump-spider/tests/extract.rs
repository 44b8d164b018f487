use etfdump_spider::etf::extract;

const DETAIL_PAGE: &str = r#"
<html>
<head><title>iShares Core S&P 500 | Cbonds</title></head>
<body>
<script>
    var chart = { "tab": 2 };
    var structure = [
        {"asset_name": "Apple Inc", "weight.numeric": 0.071234, "asset_isin": "US0378331005"},
        {"asset_name": "Microsoft", "weight.rounded": 5.0}
    ];
    var footer = true;
</script>
</body>
</html>
"#;

#[test]
fn finds_var_assignment_form() {
    let records = extract::structure(DETAIL_PAGE).unwrap().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["asset_name"], "Apple Inc");
    assert_eq!(records[1]["asset_name"], "Microsoft");
}

#[test]
fn finds_object_key_form() {
    let page = r#"window.init({ structure: [{"asset_name": "Nvidia"}], tab: 2 });"#;
    let records = extract::structure(page).unwrap().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["asset_name"], "Nvidia");
}

#[test]
fn capture_stops_at_the_first_array() {
    let page = r#"var structure = [{"asset_name": "A"}]; var other = [{"asset_name": "B"}];"#;
    let records = extract::structure(page).unwrap().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["asset_name"], "A");
}

#[test]
fn missing_structure_is_a_soft_outcome() {
    let page = "<html><body>no holdings published</body></html>";
    assert!(extract::structure(page).unwrap().is_none());
}

#[test]
fn empty_structure_parses_to_no_records() {
    let page = "var structure = [];";
    let records = extract::structure(page).unwrap().unwrap();
    assert!(records.is_empty());
}

#[test]
fn malformed_structure_is_a_hard_error() {
    let page = "var structure = [{bad json}];";
    let result = extract::structure(page);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("failed to parse structure JSON"));
}

#[test]
fn non_object_elements_are_a_hard_error() {
    let page = "var structure = [1, 2, 3];";
    assert!(extract::structure(page).is_err());
}
