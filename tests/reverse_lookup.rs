use numtrie_store::Registry;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn numbers(registry_result: numtrie_store::PhoneNumbers) -> Vec<String> {
    registry_result.iter().cloned().collect()
}

#[test]
fn reverse_on_an_empty_registry_returns_only_the_query() {
    init();
    let registry = Registry::new();
    assert_eq!(numbers(registry.reverse("123").unwrap()), vec!["123"]);
}

#[test]
fn reverse_returns_empty_for_invalid_input() {
    init();
    let registry = Registry::new();
    assert_eq!(registry.reverse("bad-input").unwrap().size(), 0);
}

#[test]
fn reverse_includes_every_rule_whose_image_is_a_prefix_of_the_query() {
    init();
    let mut registry = Registry::new();
    assert!(registry.add("12", "34"));

    // Reverse("34567"): the rule's image "34" is a prefix, so the
    // candidate is "12" + "34567"[2..] = "12567". The query itself is
    // always included too.
    let mut result = numbers(registry.reverse("34567").unwrap());
    result.sort();
    let mut expected = vec!["12567".to_owned(), "34567".to_owned()];
    expected.sort();
    assert_eq!(result, expected);
}

#[test]
fn reverse_result_is_sorted_and_deduplicated() {
    init();
    let mut registry = Registry::new();
    assert!(registry.add("9", "1"));
    assert!(registry.add("*", "1"));
    assert!(registry.add("0", "1"));

    let result = numbers(registry.reverse("1").unwrap());
    // digits sort before '*' under the alphabet order (spec's custom
    // order, not ASCII), and the query "1" itself is included once.
    assert_eq!(result, vec!["0", "1", "9", "*"]);
}

#[test]
fn get_reverse_filters_to_candidates_that_round_trip_to_the_query() {
    init();
    let mut registry = Registry::new();
    assert!(registry.add("12", "34"));
    assert!(registry.add("9", "34567"));

    // Both "12" and "9" produce a reverse candidate for "34567", but only
    // one of them actually redirects back to "34567" under Get.
    let reverse_candidates = numbers(registry.reverse("34567").unwrap());
    assert!(reverse_candidates.len() >= 2);

    let filtered = numbers(registry.get_reverse("34567").unwrap());
    for candidate in &filtered {
        assert_eq!(registry.get(candidate).unwrap().get(0), Some("34567"));
    }
}

#[test]
fn get_reverse_always_keeps_the_query_itself_when_unmapped() {
    init();
    let registry = Registry::new();
    assert_eq!(numbers(registry.get_reverse("555").unwrap()), vec!["555"]);
}
