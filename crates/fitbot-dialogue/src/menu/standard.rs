//! The standard tree: main menu 1-5, slot booking in one step.

use super::build::*;
use super::catalog as text;
use super::{Action, MenuNode, MenuTree};
use fitbot_core::stage::Stage;

pub(super) fn tree(business: &str) -> MenuTree {
    let items = text::MAIN_MENU_ITEMS;

    let start = MenuNode::new(Stage::Start, "").on_any(goto(Stage::Menu));

    let menu = MenuNode::new(Stage::Menu, text::greeting(business, items))
        .option(1, goto(Stage::Plans))
        .option(2, goto(Stage::Promo))
        .option(3, goto(Stage::Schedule))
        .option(4, say(&text::academy_info()))
        .option(5, goto(Stage::Human))
        .on_zero(Action::Home)
        .on_bad_digit(reject(&text::menu_invalid(5)))
        .on_free_text(reject(&text::menu_invalid(5)));

    let plans = MenuNode::new(Stage::Plans, text::plans_list(""))
        .option(1, say(&text::plan_monthly()))
        .option(2, say(&text::plan_quarterly()))
        .option(3, say(&text::plan_semiannual()))
        .option(4, say(&text::plan_annual()))
        .on_zero(Action::Home)
        .on_bad_digit(reject(&text::plans_invalid(4)))
        .on_free_text(reject(text::PLANS_ONLY_NUMBERS));

    let promo = promo_node();

    let schedule = MenuNode::new(Stage::Schedule, text::schedule_intro())
        .option(1, goto(Stage::ScheduleTime))
        .option(2, say(text::AVAILABILITY))
        .on_zero(Action::Home)
        .on_bad_digit(reject(text::SCHEDULE_INVALID))
        .on_free_text(reject(text::ONLY_NUMBERS));

    let booked = text::booked("contact");
    let schedule_time = slot_node(|slot| {
        bind("time", literal(slot), complete(&booked, "class_booked"))
    });

    let human = human_node();

    MenuTree {
        main_menu: text::main_menu(items),
        apology: text::APOLOGY.to_string(),
        nodes: vec![start, menu, plans, promo, schedule, schedule_time, human],
    }
}

/// PROMO is identical across variants.
pub(super) fn promo_node() -> MenuNode {
    MenuNode::new(Stage::Promo, text::promo_list())
        .option(1, say(text::PROMO_SUMMER))
        .option(2, say(text::PROMO_REFERRAL))
        .option(3, say(text::PROMO_DUO))
        .on_zero(Action::Home)
        .on_bad_digit(reject(text::PROMO_INVALID))
        .on_free_text(reject(text::ONLY_NUMBERS))
}

/// HUMAN: anything but `0` is a handoff request.
pub(super) fn human_node() -> MenuNode {
    MenuNode::new(Stage::Human, text::human_intro())
        .on_zero(Action::Home)
        .on_any(complete(text::HUMAN_ACK, "human_requested"))
}

/// SCHEDULE_TIME: one option per slot, each built by `on_pick`.
pub(super) fn slot_node(on_pick: impl Fn(&str) -> Action) -> MenuNode {
    let mut node = MenuNode::new(Stage::ScheduleTime, text::slot_list())
        .on_zero(Action::Home)
        .on_bad_digit(reject(&text::slot_invalid()))
        .on_free_text(reject(text::ONLY_NUMBERS));
    for (i, slot) in text::SLOTS.into_iter().enumerate() {
        node = node.option(i as u8 + 1, on_pick(slot));
    }
    node
}
