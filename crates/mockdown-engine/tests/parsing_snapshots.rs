use mockdown_engine::parsing::{parse, snapshot};

#[test]
fn fixture_basic_records() {
    assert_fixture("basic_records");
}

#[test]
fn fixture_nested_tabs_buttons() {
    assert_fixture("nested_tabs_buttons");
}

#[test]
fn fixture_notes() {
    assert_fixture("notes");
}

fn assert_fixture(name: &str) {
    let markup = std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap();

    let structure = parse(&markup).unwrap();
    snapshot::invariants(&structure);

    let snap = snapshot::normalize(&structure);
    insta::assert_yaml_snapshot!(name, snap);
}

/// Invariants hold for permissively-tolerated inputs too, not just the
/// well-formed fixtures.
#[test]
fn invariants_hold_for_irregular_markup() {
    let inputs = [
        "# Win\n### Orphan depth\n- ID: 1",
        "# Win\n## T\n- : empty name\n- ID: 1",
        "# Win\n## A\n## A\n- ID: 2",
        "# Win\n## T\n[Save] [Delete]\n- Name only: x",
        "# Win\n## A\n### B\n#### C\n- ID: 9\n- F: v",
    ];
    for markup in inputs {
        let structure = parse(markup).unwrap();
        snapshot::invariants(&structure);
    }
}
