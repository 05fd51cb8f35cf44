//! Three-window barricade scenario: gather resources once, then find,
//! approach, and board each window in turn.

use goap_core::{Catalog, Mask, MaskValue, Value, WorldState};
use goap_search::{Heuristic, PlanStatus, Planner, RelaxedPlanGraph};

fn mask(pairs: &[(&str, MaskValue)]) -> Mask {
    pairs
        .iter()
        .map(|(k, mv)| (k.to_string(), mv.clone()))
        .collect()
}

const KEYS: [&str; 8] = [
    "hasHammer",
    "hasPlank",
    "hasNails",
    "atBuilding",
    "windowsRemaining",
    "hasTarget",
    "nearWindow",
    "equipped",
];

fn barricade_catalog() -> Catalog {
    let mut catalog = Catalog::new();

    catalog.add_condition(
        "ensureResources",
        mask(&[
            ("atBuilding", MaskValue::from(true)),
            ("hasHammer", MaskValue::from(false)),
            ("hasPlank", MaskValue::from(false)),
            ("hasNails", MaskValue::from(false)),
        ]),
    );
    catalog
        .add_effect(
            "ensureResources",
            mask(&[
                ("hasHammer", MaskValue::from(true)),
                ("hasPlank", MaskValue::from(true)),
                ("hasNails", MaskValue::from(true)),
            ]),
        )
        .unwrap();
    catalog.set_cost("ensureResources", 1.0).unwrap();

    for window in [1i64, 2, 3] {
        let find = format!("findWindow{window}");
        catalog.add_condition(
            &find,
            mask(&[
                ("hasHammer", MaskValue::from(true)),
                ("hasPlank", MaskValue::from(true)),
                ("hasNails", MaskValue::from(true)),
                ("windowsRemaining", MaskValue::from(window)),
                ("hasTarget", MaskValue::from(false)),
            ]),
        );
        catalog
            .add_effect(&find, mask(&[("hasTarget", MaskValue::from(true))]))
            .unwrap();
        catalog.set_cost(&find, 2.0).unwrap();

        let barricade = format!("barricadeWindow{window}");
        catalog.add_condition(
            &barricade,
            mask(&[
                ("windowsRemaining", MaskValue::from(window)),
                ("hasTarget", MaskValue::from(true)),
                ("nearWindow", MaskValue::from(true)),
                ("equipped", MaskValue::from(true)),
            ]),
        );
        catalog
            .add_effect(
                &barricade,
                mask(&[
                    ("windowsRemaining", MaskValue::from(window - 1)),
                    ("hasTarget", MaskValue::from(false)),
                    ("nearWindow", MaskValue::from(false)),
                ]),
            )
            .unwrap();
        catalog.set_cost(&barricade, 5.0).unwrap();
    }

    catalog.add_condition(
        "walkToWindow",
        mask(&[
            ("hasTarget", MaskValue::from(true)),
            ("nearWindow", MaskValue::from(false)),
        ]),
    );
    catalog
        .add_effect("walkToWindow", mask(&[("nearWindow", MaskValue::from(true))]))
        .unwrap();
    catalog.set_cost("walkToWindow", 2.0).unwrap();

    catalog.add_condition(
        "equipTools",
        mask(&[
            ("nearWindow", MaskValue::from(true)),
            ("equipped", MaskValue::from(false)),
        ]),
    );
    catalog
        .add_effect("equipTools", mask(&[("equipped", MaskValue::from(true))]))
        .unwrap();
    catalog.set_cost("equipTools", 1.0).unwrap();

    catalog
}

fn barricade_start() -> WorldState {
    let mut start = WorldState::new();
    start.set("hasHammer", false);
    start.set("hasPlank", false);
    start.set("hasNails", false);
    start.set("atBuilding", true);
    start.set("windowsRemaining", 3);
    start.set("hasTarget", false);
    start.set("nearWindow", false);
    start.set("equipped", false);
    start
}

fn barricade_planner(heuristic: Heuristic) -> Planner {
    let mut planner = Planner::new(KEYS);
    planner.set_start_state(barricade_start()).unwrap();
    planner
        .set_goal_state(mask(&[("windowsRemaining", MaskValue::from(0))]))
        .unwrap();
    planner.set_action_list(&barricade_catalog());
    planner.set_heuristic(heuristic);
    planner
}

const EXPECTED: [&str; 11] = [
    "ensureResources",
    "findWindow3",
    "walkToWindow",
    "equipTools",
    "barricadeWindow3",
    "findWindow2",
    "walkToWindow",
    "barricadeWindow2",
    "findWindow1",
    "walkToWindow",
    "barricadeWindow1",
];

#[test]
fn boards_all_three_windows() {
    let outcome = barricade_planner(Heuristic::Zero).calculate().unwrap();
    assert_eq!(outcome.status, PlanStatus::Found);
    assert_eq!(outcome.action_names(), EXPECTED);
    assert_eq!(outcome.total_cost(), 29.0);

    let last = outcome.steps.last().unwrap();
    assert_eq!(last.state.get("windowsRemaining"), Some(&Value::Int(0)));
    assert_eq!(last.state.get("equipped"), Some(&Value::Bool(true)));
}

#[test]
fn every_heuristic_agrees_on_the_unique_plan() {
    let baseline = barricade_planner(Heuristic::Zero).calculate().unwrap();
    for heuristic in [
        Heuristic::Mismatch,
        Heuristic::DomainAware {
            scale_by_min_cost: false,
        },
        Heuristic::DomainAware {
            scale_by_min_cost: true,
        },
        Heuristic::RpgAdd,
    ] {
        let outcome = barricade_planner(heuristic).calculate().unwrap();
        assert_eq!(outcome.status, PlanStatus::Found);
        assert_eq!(outcome.action_names(), baseline.action_names());
        assert_eq!(outcome.total_cost(), baseline.total_cost());
    }
}

#[test]
fn relaxed_graph_reaches_every_goal_value() {
    let actions = barricade_catalog().validate().unwrap();
    let rpg = RelaxedPlanGraph::build(&barricade_start(), &actions);

    // Start facts sit at level 0; the final window count appears only
    // after the full find/walk/equip/barricade cascade.
    assert_eq!(rpg.first_level("windowsRemaining", &Value::Int(3)), Some(0));
    assert_eq!(rpg.first_level("hasHammer", &Value::Bool(true)), Some(1));
    assert_eq!(rpg.first_level("windowsRemaining", &Value::Int(0)), Some(11));
    assert_eq!(rpg.first_level("windowsRemaining", &Value::Int(-1)), None);
}
