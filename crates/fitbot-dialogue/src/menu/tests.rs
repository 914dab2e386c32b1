use super::*;

#[test]
fn test_builtin_trees_validate() {
    for variant in [MenuVariant::Standard, MenuVariant::Extended] {
        let tree = MenuTree::builtin(variant, "DEV FIT ACADEMY");
        tree.validate()
            .unwrap_or_else(|e| panic!("{} tree: {e}", variant.as_str()));
    }
}

#[test]
fn test_builtin_stage_sets() {
    let standard = MenuTree::builtin(MenuVariant::Standard, "X");
    assert!(standard.node(Stage::ScheduleName).is_err());
    assert!(standard.node(Stage::ConfirmSchedule).is_err());
    assert!(standard.node(Stage::PaymentOptions).is_err());

    let extended = MenuTree::builtin(MenuVariant::Extended, "X");
    assert_eq!(extended.nodes.len(), Stage::ALL.len());
    for stage in Stage::ALL {
        assert!(extended.node(stage).is_ok(), "missing {stage}");
    }
}

#[test]
fn test_business_name_is_baked_in() {
    let tree = MenuTree::builtin(MenuVariant::Standard, "ACME GYM");
    let menu = tree.node(Stage::Menu).unwrap();
    assert!(menu.prompt.contains("*ACME GYM*"));
}

#[test]
fn test_business_name_braces_are_escaped() {
    for variant in [MenuVariant::Standard, MenuVariant::Extended] {
        let tree = MenuTree::builtin(variant, "Academia {Centro}");
        tree.validate()
            .unwrap_or_else(|e| panic!("{} tree: {e}", variant.as_str()));
        let menu = tree.node(Stage::Menu).unwrap();
        assert!(menu.prompt.contains("*Academia {{Centro}}*"));
    }
}

#[test]
fn test_slot_options_bind_time() {
    let tree = MenuTree::builtin(MenuVariant::Standard, "X");
    let node = tree.node(Stage::ScheduleTime).unwrap();
    assert_eq!(node.options.len(), 6);
    match node.choice(1) {
        Some(Action::Bind { key, value, .. }) => {
            assert_eq!(key, "time");
            assert_eq!(
                value,
                &BindValue::Literal {
                    value: "SEGUNDA - 9:00 às 10:00".into()
                }
            );
        }
        other => panic!("unexpected action: {other:?}"),
    }
    assert!(node.choice(7).is_none());
}

const SMALL: &str = r#"
main_menu = "Menu for {contact}"
apology = "Sorry!"

[[nodes]]
stage = "START"
any = { do = "goto", stage = "MENU" }

[[nodes]]
stage = "MENU"
prompt = "Hi {CONTACT}. 1) hours"
zero = { do = "home" }
bad_digit = { mode = "reject", text = "pick 1" }
free_text = { mode = "reject", text = "numbers only" }

[[nodes.options]]
digit = 1
action = { do = "say", text = "We open at 6." }
"#;

#[test]
fn test_from_toml() {
    let tree = MenuTree::from_toml(SMALL).unwrap();
    assert_eq!(tree.nodes.len(), 2);

    let menu = tree.node(Stage::Menu).unwrap();
    assert_eq!(menu.zero, Some(Action::Home));
    assert_eq!(
        menu.choice(1),
        Some(&Action::Say {
            text: "We open at 6.".into()
        })
    );
    assert_eq!(
        menu.free_text,
        Some(Fallback::Reject {
            text: "numbers only".into()
        })
    );
}

#[test]
fn test_toml_bind_and_accept() {
    let content = r#"
main_menu = "m"
apology = "a"

[[nodes]]
stage = "START"
any = { do = "goto", stage = "SCHEDULE_NAME" }

[[nodes]]
stage = "SCHEDULE_NAME"
any = { do = "bind", key = "name", value = { from = "input" }, then = { do = "goto", stage = "START" } }
"#;
    let tree = MenuTree::from_toml(content).unwrap();
    let node = tree.node(Stage::ScheduleName).unwrap();
    assert!(matches!(
        &node.any,
        Some(Action::Bind { value: BindValue::Input, .. })
    ));
}

#[test]
fn test_builtin_json_round_trips() {
    let tree = MenuTree::builtin(MenuVariant::Extended, "X");
    let json = serde_json::to_string(&tree).unwrap();
    let back: MenuTree = serde_json::from_str(&json).unwrap();
    assert_eq!(tree, back);
}

#[test]
fn test_bad_toml_is_a_parse_error() {
    let err = MenuTree::from_toml("nodes = 3").unwrap_err();
    assert!(matches!(err, DialogueError::Parse(_)));

    let err = MenuTree::from_toml(&SMALL.replace("\"MENU\"", "\"LOBBY\"")).unwrap_err();
    assert!(matches!(err, DialogueError::Parse(_)));
}

fn minimal() -> MenuTree {
    MenuTree {
        main_menu: "menu".into(),
        apology: "sorry".into(),
        nodes: vec![MenuNode::new(Stage::Start, "").on_any(build::goto(Stage::Start))],
    }
}

fn assert_invalid(tree: MenuTree, needle: &str) {
    match tree.validate() {
        Err(DialogueError::InvalidTree(msg)) => {
            assert!(msg.contains(needle), "{msg:?} does not mention {needle:?}")
        }
        other => panic!("expected InvalidTree, got {other:?}"),
    }
}

#[test]
fn test_validate_minimal_ok() {
    assert!(minimal().validate().is_ok());
}

#[test]
fn test_validate_missing_start() {
    let mut tree = minimal();
    tree.nodes[0].stage = Stage::Menu;
    assert_invalid(tree, "missing START");
}

#[test]
fn test_validate_duplicate_stage() {
    let mut tree = minimal();
    tree.nodes.push(tree.nodes[0].clone());
    assert_invalid(tree, "duplicate");
}

#[test]
fn test_validate_requires_fallbacks() {
    let mut tree = minimal();
    tree.nodes.push(
        MenuNode::new(Stage::Menu, "m").on_bad_digit(build::reject("no")),
    );
    assert_invalid(tree, "stage MENU needs");
}

#[test]
fn test_validate_digits() {
    let mut tree = minimal();
    tree.nodes[0] = tree.nodes[0].clone().option(10, Action::Home);
    assert_invalid(tree, "not a single digit");

    let mut tree = minimal();
    tree.nodes[0] = tree.nodes[0]
        .clone()
        .option(1, Action::Home)
        .option(1, Action::Home);
    assert_invalid(tree, "used twice");
}

#[test]
fn test_validate_dangling_goto() {
    let mut tree = minimal();
    tree.nodes[0] = tree.nodes[0].clone().option(1, build::goto(Stage::Plans));
    assert_invalid(tree, "goto PLANS");

    // Also found inside a bind chain behind an accepting fallback.
    let mut tree = minimal();
    tree.nodes.push(
        MenuNode::new(Stage::Menu, "m")
            .on_bad_digit(build::reject("no"))
            .on_free_text(build::accept(build::bind(
                "name",
                BindValue::Input,
                build::goto(Stage::Human),
            ))),
    );
    assert_invalid(tree, "goto HUMAN");
}

#[test]
fn test_validate_empty_bind_key() {
    let mut tree = minimal();
    tree.nodes[0].any = Some(build::bind(" ", BindValue::Input, Action::Home));
    assert_invalid(tree, "empty key");
}

#[test]
fn test_validate_main_menu_placeholders() {
    let mut tree = minimal();
    tree.main_menu = "Hi {CONTACT}, {contact}".into();
    assert!(tree.validate().is_ok());

    tree.apology = "Sorry, {time} failed".into();
    assert_invalid(tree, "apology uses form field {time}");
}

#[test]
fn test_sample_menu_file_loads() {
    let tree = MenuTree::from_toml(include_str!("../../../../menus/minimal.toml")).unwrap();
    assert_eq!(tree.nodes.len(), 3);
    assert!(tree.node(Stage::Human).unwrap().any.is_some());
}

#[test]
fn test_validate_unbound_placeholders() {
    let mut tree = minimal();
    tree.nodes[0].prompt = "Welcome to Academia {Centro}".into();
    assert_invalid(tree, "stage START: {Centro} is never bound");

    let mut tree = minimal();
    tree.nodes[0] = tree.nodes[0].clone().option(1, build::say("at {time}"));
    assert_invalid(tree, "{time} is never bound");

    let mut tree = minimal();
    tree.nodes[0] = tree.nodes[0]
        .clone()
        .option(1, build::bind("time", BindValue::Input, build::complete("ok {time}", "done")));
    assert!(tree.validate().is_ok());

    // A bind on another node is enough; a missing value at run time is
    // reported by the engine.
    let mut tree = minimal();
    tree.nodes[0] = tree.nodes[0].clone().option(1, build::say("at {time}"));
    tree.nodes.push(
        MenuNode::new(Stage::Menu, "{{literal}} for {contact}")
            .on_bad_digit(build::reject("no {name}"))
            .on_free_text(build::accept(build::bind("time", BindValue::Input, Action::Home))),
    );
    assert_invalid(tree.clone(), "stage MENU: {name} is never bound");

    tree.nodes[1].bad_digit = Some(build::reject("no"));
    assert!(tree.validate().is_ok());
}
