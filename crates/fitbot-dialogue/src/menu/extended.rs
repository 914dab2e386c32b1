//! The extended tree: exit option, named bookings with a confirmation
//! step, and payment options under PLANS.

use super::build::*;
use super::catalog as text;
use super::standard::{human_node, promo_node, slot_node};
use super::{Action, BindValue, MenuNode, MenuTree};
use fitbot_core::stage::Stage;

pub(super) fn tree(business: &str) -> MenuTree {
    let items = format!("{}\n{}", text::MAIN_MENU_ITEMS, text::EXIT_ITEM);

    let start = MenuNode::new(Stage::Start, "").on_any(goto(Stage::Menu));

    let menu = MenuNode::new(Stage::Menu, text::greeting(business, &items))
        .option(1, goto(Stage::Plans))
        .option(2, goto(Stage::Promo))
        .option(3, goto(Stage::Schedule))
        .option(4, say(&text::academy_info()))
        .option(5, goto(Stage::Human))
        .option(6, exit(&text::farewell(business)))
        .on_zero(Action::Home)
        .on_bad_digit(reject(&text::menu_invalid(6)))
        .on_free_text(reject(&text::menu_invalid(6)));

    let plans = MenuNode::new(
        Stage::Plans,
        text::plans_list(&format!("{}\n", text::PAYMENT_ITEM)),
    )
    .option(1, say(&text::plan_monthly()))
    .option(2, say(&text::plan_quarterly()))
    .option(3, say(&text::plan_semiannual()))
    .option(4, say(&text::plan_annual()))
    .option(5, goto(Stage::PaymentOptions))
    .on_zero(Action::Home)
    .on_bad_digit(reject(&text::plans_invalid(5)))
    .on_free_text(reject(text::PLANS_ONLY_NUMBERS));

    let payment = MenuNode::new(Stage::PaymentOptions, text::payment_list())
        .option(1, say(text::PAYMENT_CARD))
        .option(2, say(text::PAYMENT_PIX))
        .option(3, say(text::PAYMENT_SLIP))
        .on_zero(Action::Home)
        .on_bad_digit(reject(text::PROMO_INVALID))
        .on_free_text(reject(text::ONLY_NUMBERS));

    let schedule = MenuNode::new(Stage::Schedule, text::schedule_intro())
        .option(1, goto(Stage::ScheduleName))
        .option(2, say(text::AVAILABILITY))
        .on_zero(Action::Home)
        .on_bad_digit(reject(text::SCHEDULE_INVALID))
        .on_free_text(reject(text::ONLY_NUMBERS));

    // "1" means "book it for me"; any other text is taken as the attendee's name.
    let schedule_name = MenuNode::new(Stage::ScheduleName, text::schedule_name_prompt())
        .option(
            1,
            bind("name", BindValue::DisplayName, goto(Stage::ScheduleTime)),
        )
        .on_zero(Action::Home)
        .on_bad_digit(reject(text::SCHEDULE_NAME_INVALID))
        .on_free_text(accept(bind(
            "name",
            BindValue::Input,
            goto(Stage::ScheduleTime),
        )));

    let schedule_time =
        slot_node(|slot| bind("time", literal(slot), goto(Stage::ConfirmSchedule)));

    let confirm = MenuNode::new(Stage::ConfirmSchedule, text::CONFIRM_PROMPT)
        .option(1, complete(&text::booked("name"), "class_booked"))
        .option(2, goto(Stage::ScheduleTime))
        .on_zero(Action::Home)
        .on_bad_digit(reject(text::CONFIRM_INVALID))
        .on_free_text(reject(text::CONFIRM_INVALID));

    MenuTree {
        main_menu: text::main_menu(&items),
        apology: text::APOLOGY.to_string(),
        nodes: vec![
            start,
            menu,
            plans,
            payment,
            promo_node(),
            schedule,
            schedule_name,
            schedule_time,
            confirm,
            human_node(),
        ],
    }
}
