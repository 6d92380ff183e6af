use country_facts::{Country, CountryFacts, FactsError};

fn with_gini(name: &str, gini: Option<f64>) -> Country {
    Country {
        name: name.into(),
        gini,
        ..Default::default()
    }
}

fn scenario_a() -> CountryFacts {
    CountryFacts::new(vec![
        with_gini("Lesotho", Some(63.2)),
        with_gini("Iceland", Some(26.8)),
        with_gini("Namibia", Some(59.7)),
    ])
}

#[test]
fn lowest_gini_and_rank_on_small_dataset() {
    let facts = scenario_a();
    assert_eq!(facts.lowest_gini_country().unwrap(), "Iceland");
    assert_eq!(facts.gini_rank("Namibia").unwrap(), Some(2));
    assert_eq!(facts.gini_rank("Lesotho").unwrap(), Some(1));
    assert_eq!(facts.gini_rank("Iceland").unwrap(), Some(3));
}

#[test]
fn rank_matches_names_case_insensitively() {
    let facts = scenario_a();
    assert_eq!(facts.gini_rank("nAmIbIa").unwrap(), Some(2));
}

#[test]
fn rank_is_none_for_unknown_or_unranked_country() {
    let facts = CountryFacts::new(vec![
        with_gini("Lesotho", Some(63.2)),
        with_gini("Monaco", None),
    ]);
    assert_eq!(facts.gini_rank("Atlantis").unwrap(), None);
    // present in the dataset but without a GINI value
    assert_eq!(facts.gini_rank("Monaco").unwrap(), None);
}

#[test]
fn equal_gini_values_take_distinct_ranks_in_dataset_order() {
    let facts = CountryFacts::new(vec![
        with_gini("First", Some(40.0)),
        with_gini("Top", Some(50.0)),
        with_gini("Second", Some(40.0)),
        with_gini("Third", Some(40.0)),
    ]);
    assert_eq!(facts.gini_rank("Top").unwrap(), Some(1));
    assert_eq!(facts.gini_rank("First").unwrap(), Some(2));
    assert_eq!(facts.gini_rank("Second").unwrap(), Some(3));
    assert_eq!(facts.gini_rank("Third").unwrap(), Some(4));
}

#[test]
fn rank_stays_within_ranked_range() {
    let facts = CountryFacts::new(vec![
        with_gini("A", Some(30.0)),
        with_gini("B", None),
        with_gini("C", Some(45.5)),
        with_gini("D", Some(12.25)),
        with_gini("E", None),
    ]);
    let ranked = facts.countries().iter().filter(|c| c.gini.is_some()).count();
    for c in facts.countries() {
        match facts.gini_rank(&c.name).unwrap() {
            Some(r) => assert!((1..=ranked).contains(&r), "{} ranked {}", c.name, r),
            None => assert!(c.gini.is_none()),
        }
    }
}

#[test]
fn blank_country_name_is_invalid_argument() {
    let facts = scenario_a();
    assert!(matches!(facts.gini_rank(""), Err(FactsError::InvalidArgument(_))));
    assert!(matches!(facts.gini_rank("   "), Err(FactsError::InvalidArgument(_))));
}

#[test]
fn empty_dataset_is_invalid_state() {
    let facts = CountryFacts::new(Vec::new());
    assert!(matches!(facts.gini_rank("X"), Err(FactsError::InvalidState(_))));
    assert!(matches!(facts.lowest_gini_country(), Err(FactsError::InvalidState(_))));
    // the empty-dataset check runs before argument validation
    assert!(matches!(facts.gini_rank(""), Err(FactsError::InvalidState(_))));
}

#[test]
fn lowest_gini_sentinel_when_nobody_has_gini() {
    let facts = CountryFacts::new(vec![with_gini("Monaco", None), with_gini("Vatican", None)]);
    assert_eq!(facts.lowest_gini_country().unwrap(), "No country found");
}

#[test]
fn lowest_gini_tie_goes_to_first_record() {
    let facts = CountryFacts::new(vec![
        with_gini("High", Some(50.0)),
        with_gini("EarlyLow", Some(25.0)),
        with_gini("LateLow", Some(25.0)),
    ]);
    assert_eq!(facts.lowest_gini_country().unwrap(), "EarlyLow");
}

#[test]
fn lowest_gini_is_not_above_any_other() {
    let facts = CountryFacts::new(vec![
        with_gini("A", Some(33.3)),
        with_gini("B", Some(31.9)),
        with_gini("C", None),
        with_gini("D", Some(47.0)),
    ]);
    let name = facts.lowest_gini_country().unwrap();
    let lowest = facts
        .countries()
        .iter()
        .find(|c| c.name == name)
        .and_then(|c| c.gini)
        .unwrap();
    assert!(facts.countries().iter().filter_map(|c| c.gini).all(|g| lowest <= g));
}
