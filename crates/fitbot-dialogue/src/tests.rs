use super::*;
use chrono::Utc;
use fitbot_core::{config::MenuVariant, stage::Stage, value::Scalar};
use fitbot_sessions::Session;

const BUSINESS: &str = "DEV FIT ACADEMY";

fn engine(variant: MenuVariant) -> Engine {
    Engine::new(MenuTree::builtin(variant, BUSINESS)).unwrap()
}

fn session() -> Session {
    Session::new("5511999887766@c.us", "Ana", Utc::now())
}

/// Run one transition and apply it, like the gateway does.
fn send(engine: &Engine, session: &mut Session, input: &str) -> Outcome {
    let outcome = engine.process(session, input).unwrap();
    outcome.apply(session);
    outcome
}

fn only_message(outcome: &Outcome) -> &str {
    assert_eq!(outcome.messages.len(), 1, "messages: {:?}", outcome.messages);
    &outcome.messages[0]
}

#[test]
fn test_start_greets_on_any_input() {
    let engine = engine(MenuVariant::Standard);
    for input in ["oi", "7", "0", "", "quero saber dos planos"] {
        let mut s = session();
        let out = send(&engine, &mut s, input);
        assert_eq!(s.stage, Stage::Menu, "input {input:?}");
        let text = only_message(&out);
        assert!(text.contains("OLÁ ANA!"));
        assert!(text.contains(BUSINESS));
    }
}

#[test]
fn test_menu_rejects_non_digits() {
    let engine = engine(MenuVariant::Standard);
    let mut s = session();
    send(&engine, &mut s, "oi");

    for input in ["planos", "12", "1.", "01", "um"] {
        let out = send(&engine, &mut s, input);
        assert_eq!(s.stage, Stage::Menu, "input {input:?}");
        assert!(only_message(&out).contains("OPÇÃO INVÁLIDA"));
    }
}

#[test]
fn test_menu_rejects_out_of_range_digits() {
    let engine = engine(MenuVariant::Standard);
    let mut s = session();
    send(&engine, &mut s, "oi");

    for input in ["6", "9"] {
        let out = send(&engine, &mut s, input);
        assert_eq!(s.stage, Stage::Menu);
        assert!(only_message(&out).contains("de 1 a 5"));
    }
}

#[test]
fn test_zero_is_idempotent() {
    let engine = engine(MenuVariant::Standard);
    let mut s = session();
    send(&engine, &mut s, "oi");

    let first = send(&engine, &mut s, "0");
    assert_eq!(s.stage, Stage::Start);
    assert!(only_message(&first).starts_with("📋 *MENU PRINCIPAL*"));

    s.stage = Stage::Menu;
    let second = send(&engine, &mut s, "0");
    assert_eq!(first, second);
}

#[test]
fn test_plans_walkthrough() {
    let engine = engine(MenuVariant::Standard);
    let mut s = session();

    send(&engine, &mut s, "oi");
    let out = send(&engine, &mut s, "1");
    assert_eq!(s.stage, Stage::Plans);
    assert!(only_message(&out).contains("NOSSOS PLANOS"));

    let out = send(&engine, &mut s, "4");
    assert_eq!(s.stage, Stage::Plans);
    assert!(only_message(&out).starts_with("📋 *PLANO ANUAL*"));

    let out = send(&engine, &mut s, "7");
    assert_eq!(s.stage, Stage::Plans);
    assert!(only_message(&out).contains("de 1 a 4"));

    let out = send(&engine, &mut s, "quanto custa?");
    assert_eq!(s.stage, Stage::Plans);
    assert!(only_message(&out).contains("apenas números"));

    let out = send(&engine, &mut s, "0");
    assert_eq!(s.stage, Stage::Start);
    assert!(only_message(&out).starts_with("📋 *MENU PRINCIPAL*"));
}

#[test]
fn test_info_stays_on_menu() {
    let engine = engine(MenuVariant::Standard);
    let mut s = session();
    send(&engine, &mut s, "oi");

    let out = send(&engine, &mut s, "4");
    assert_eq!(s.stage, Stage::Menu);
    assert!(only_message(&out).contains("INFORMAÇÕES DA ACADEMIA"));
}

#[test]
fn test_promo_choices() {
    let engine = engine(MenuVariant::Standard);
    let mut s = session();
    send(&engine, &mut s, "oi");
    send(&engine, &mut s, "2");
    assert_eq!(s.stage, Stage::Promo);

    let out = send(&engine, &mut s, "2");
    assert!(only_message(&out).contains("INDICAÇÃO PREMIADA"));
    let out = send(&engine, &mut s, "4");
    assert_eq!(only_message(&out), "❌ Digite 1, 2, 3 ou 0.");
    assert_eq!(s.stage, Stage::Promo);
}

#[test]
fn test_standard_booking_completes() {
    let engine = engine(MenuVariant::Standard);
    let mut s = session();
    send(&engine, &mut s, "oi");
    send(&engine, &mut s, "3");
    assert_eq!(s.stage, Stage::Schedule);

    let out = send(&engine, &mut s, "1");
    assert_eq!(s.stage, Stage::ScheduleTime);
    assert!(only_message(&out).contains("SEGUNDA - 9:00 às 10:00"));

    let out = send(&engine, &mut s, "3");
    assert_eq!(s.stage, Stage::Start);
    assert!(s.data.is_empty());

    let text = only_message(&out);
    assert!(text.contains("AULA EXPERIMENTAL AGENDADA"));
    assert!(text.contains("*Nome:* Ana"));
    assert!(text.contains("QUARTA - 18:00 às 19:00"));

    match &out.effects[..] {
        [Effect::Notify { event, details }] => {
            assert_eq!(event, "class_booked");
            assert_eq!(
                details.get("time"),
                Some(&Scalar::from("QUARTA - 18:00 às 19:00"))
            );
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn test_schedule_availability_and_bad_slot() {
    let engine = engine(MenuVariant::Standard);
    let mut s = session();
    send(&engine, &mut s, "oi");
    send(&engine, &mut s, "3");

    let out = send(&engine, &mut s, "2");
    assert_eq!(s.stage, Stage::Schedule);
    assert!(only_message(&out).contains("HORÁRIOS DISPONÍVEIS"));

    send(&engine, &mut s, "1");
    let out = send(&engine, &mut s, "7");
    assert_eq!(s.stage, Stage::ScheduleTime);
    assert!(only_message(&out).contains("de 1 a 6"));
    assert!(out.effects.is_empty());
}

#[test]
fn test_human_handoff_resets_to_start() {
    let engine = engine(MenuVariant::Standard);
    let mut s = session();
    send(&engine, &mut s, "oi");
    let out = send(&engine, &mut s, "5");
    assert_eq!(s.stage, Stage::Human);
    assert!(only_message(&out).contains("ATENDIMENTO HUMANO"));

    let out = send(&engine, &mut s, "preciso de ajuda com a matrícula");
    assert_eq!(s.stage, Stage::Start);
    assert!(only_message(&out).contains("SOLICITAÇÃO REGISTRADA"));
    assert!(matches!(
        &out.effects[..],
        [Effect::Notify { event, .. }] if event == "human_requested"
    ));
}

#[test]
fn test_human_zero_goes_home() {
    let engine = engine(MenuVariant::Standard);
    let mut s = session();
    s.stage = Stage::Human;

    let out = send(&engine, &mut s, "0");
    assert_eq!(s.stage, Stage::Start);
    assert!(out.effects.is_empty());
}

#[test]
fn test_extended_exit_ends_session() {
    let engine = engine(MenuVariant::Extended);
    let mut s = session();
    send(&engine, &mut s, "oi");

    let out = send(&engine, &mut s, "6");
    assert!(out.ends_session());
    assert_eq!(s.stage, Stage::Start);
    assert!(only_message(&out).contains("Atendimento encerrado"));
}

#[test]
fn test_standard_has_no_exit() {
    let engine = engine(MenuVariant::Standard);
    let mut s = session();
    send(&engine, &mut s, "oi");

    let out = send(&engine, &mut s, "6");
    assert!(!out.ends_session());
    assert_eq!(s.stage, Stage::Menu);
}

#[test]
fn test_extended_payment_options() {
    let engine = engine(MenuVariant::Extended);
    let mut s = session();
    send(&engine, &mut s, "oi");
    send(&engine, &mut s, "1");

    let out = send(&engine, &mut s, "5");
    assert_eq!(s.stage, Stage::PaymentOptions);
    assert!(only_message(&out).contains("FORMAS DE PAGAMENTO"));

    let out = send(&engine, &mut s, "2");
    assert_eq!(s.stage, Stage::PaymentOptions);
    assert!(only_message(&out).starts_with("⚡ *PIX*"));
}

#[test]
fn test_schedule_name_one_uses_contact_name() {
    let engine = engine(MenuVariant::Extended);
    let mut s = session();
    send(&engine, &mut s, "oi");
    send(&engine, &mut s, "3");

    let out = send(&engine, &mut s, "1");
    assert_eq!(s.stage, Stage::ScheduleName);
    assert!(only_message(&out).contains("USAR MEU NOME (Ana)"));

    send(&engine, &mut s, "1");
    assert_eq!(s.stage, Stage::ScheduleTime);
    assert_eq!(s.data.get("name"), Some(&Scalar::from("Ana")));
}

#[test]
fn test_schedule_name_free_text_is_the_name() {
    let engine = engine(MenuVariant::Extended);
    let mut s = session();
    s.stage = Stage::ScheduleName;

    send(&engine, &mut s, "  Maria Souza ");
    assert_eq!(s.stage, Stage::ScheduleTime);
    assert_eq!(s.data.get("name"), Some(&Scalar::from("Maria Souza")));
}

#[test]
fn test_schedule_name_other_digits_rejected() {
    let engine = engine(MenuVariant::Extended);
    let mut s = session();
    s.stage = Stage::ScheduleName;

    let out = send(&engine, &mut s, "2");
    assert_eq!(s.stage, Stage::ScheduleName);
    assert!(s.data.is_empty());
    assert!(only_message(&out).contains("nome do aluno"));
}

#[test]
fn test_extended_booking_with_confirmation() {
    let engine = engine(MenuVariant::Extended);
    let mut s = session();
    s.stage = Stage::ScheduleName;

    send(&engine, &mut s, "Maria Souza");
    let out = send(&engine, &mut s, "2");
    assert_eq!(s.stage, Stage::ConfirmSchedule);
    let text = only_message(&out);
    assert!(text.contains("*Nome:* Maria Souza"));
    assert!(text.contains("TERÇA - 14:00 às 15:00"));

    // Pick another slot; the name is kept.
    send(&engine, &mut s, "2");
    assert_eq!(s.stage, Stage::ScheduleTime);
    send(&engine, &mut s, "6");
    assert_eq!(
        s.data.get("time"),
        Some(&Scalar::from("SÁBADO - 11:00 às 12:00"))
    );

    let out = send(&engine, &mut s, "1");
    assert_eq!(s.stage, Stage::Start);
    assert!(s.data.is_empty());
    let text = only_message(&out);
    assert!(text.contains("*Nome:* Maria Souza"));
    assert!(text.contains("SÁBADO - 11:00 às 12:00"));
    match &out.effects[..] {
        [Effect::Notify { event, details }] => {
            assert_eq!(event, "class_booked");
            assert_eq!(details.len(), 2);
        }
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn test_confirm_cancel_drops_form() {
    let engine = engine(MenuVariant::Extended);
    let mut s = session();
    s.stage = Stage::ScheduleName;
    send(&engine, &mut s, "1");
    send(&engine, &mut s, "1");
    assert_eq!(s.stage, Stage::ConfirmSchedule);

    let out = send(&engine, &mut s, "sim");
    assert_eq!(s.stage, Stage::ConfirmSchedule);
    assert!(only_message(&out).contains("1 para confirmar"));

    send(&engine, &mut s, "0");
    assert_eq!(s.stage, Stage::Start);
    assert!(s.data.is_empty());
}

fn tiny_tree() -> MenuTree {
    MenuTree {
        main_menu: "menu".into(),
        apology: "sorry {contact}".into(),
        nodes: vec![
            MenuNode::new(Stage::Start, "").on_any(Action::Goto { stage: Stage::Menu }),
            MenuNode::new(Stage::Menu, "pick")
                .option(
                    1,
                    Action::Say {
                        text: "at {time}".into(),
                    },
                )
                .option(
                    3,
                    Action::Bind {
                        key: "time".into(),
                        value: BindValue::Literal {
                            value: "10:00".into(),
                        },
                        then: Box::new(Action::Goto { stage: Stage::Menu }),
                    },
                )
                .on_zero(Action::Home)
                .on_bad_digit(Fallback::Reject { text: "no".into() })
                .on_free_text(Fallback::Reject { text: "no".into() }),
        ],
    }
}

#[test]
fn test_missing_field_is_an_error_and_leaves_session_alone() {
    let engine = Engine::new(tiny_tree()).unwrap();
    let mut s = session();
    s.stage = Stage::Menu;

    let err = engine.process(&s, "1").unwrap_err();
    assert!(matches!(err, DialogueError::MissingField(ref k) if k == "time"));
    assert_eq!(s.stage, Stage::Menu);

    s.data.insert("time".into(), Scalar::from("10:00"));
    let out = send(&engine, &mut s, "1");
    assert_eq!(only_message(&out), "at 10:00");
}

#[test]
fn test_stage_without_node_is_an_error() {
    let engine = engine(MenuVariant::Standard);
    let mut s = session();
    s.stage = Stage::PaymentOptions;

    let err = engine.process(&s, "1").unwrap_err();
    assert!(matches!(err, DialogueError::UnknownStage(Stage::PaymentOptions)));
}

#[test]
fn test_empty_prompt_sends_nothing() {
    let mut tree = tiny_tree();
    tree.nodes[1] = tree.nodes[1].clone().option(2, Action::Goto { stage: Stage::Start });
    let engine = Engine::new(tree).unwrap();
    let mut s = session();
    s.stage = Stage::Menu;

    let out = send(&engine, &mut s, "2");
    assert!(out.messages.is_empty());
    assert_eq!(s.stage, Stage::Start);
}

#[test]
fn test_braces_in_business_name_are_plain_text() {
    for variant in [MenuVariant::Standard, MenuVariant::Extended] {
        let engine = Engine::new(MenuTree::builtin(variant, "Academia {Centro}")).unwrap();
        let mut s = session();

        let out = send(&engine, &mut s, "oi");
        assert_eq!(s.stage, Stage::Menu);
        assert!(only_message(&out).contains("*Academia {Centro}*"));
    }

    let engine = Engine::new(MenuTree::builtin(MenuVariant::Extended, "Academia {Centro}")).unwrap();
    let mut s = session();
    s.stage = Stage::Menu;
    let out = send(&engine, &mut s, "6");
    assert!(out.ends_session());
    assert!(only_message(&out).contains("*Academia {Centro}*"));
}

#[test]
fn test_apology_is_personalized() {
    let tiny = Engine::new(tiny_tree()).unwrap();
    assert_eq!(tiny.apology("Ana"), "sorry Ana");

    let builtin = engine(MenuVariant::Extended);
    assert!(builtin.apology("Ana").contains("Desculpe"));
}

#[test]
fn test_invalid_tree_is_refused() {
    let mut tree = tiny_tree();
    tree.nodes.remove(0);
    assert!(matches!(
        Engine::new(tree),
        Err(DialogueError::InvalidTree(_))
    ));
}
