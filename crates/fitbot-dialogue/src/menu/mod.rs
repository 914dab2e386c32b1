//! Menu tree definition.
//!
//! A tree is plain data: one [`MenuNode`] per [`Stage`], each mapping
//! digits to [`Action`]s. Bot variants are different trees, built in
//! code ([`MenuTree::builtin`]) or loaded from a TOML file
//! ([`MenuTree::from_toml`]).

mod catalog;
mod extended;
mod standard;

#[cfg(test)]
mod tests;

use crate::error::DialogueError;
use crate::template::placeholders;
use fitbot_core::{config::MenuVariant, stage::Stage};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// What to do in response to an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "do", rename_all = "snake_case")]
pub enum Action {
    /// Show the target node's prompt and move there.
    Goto { stage: Stage },
    /// Reply with a text and stay on the current node.
    Say { text: String },
    /// Show the main menu, drop any half-filled form, and go back to START.
    Home,
    /// Store a form value, then continue with `then`.
    Bind {
        key: String,
        value: BindValue,
        then: Box<Action>,
    },
    /// Finish a flow: reply with the rendered template, report `event`,
    /// clear the form, and go back to START.
    Complete { template: String, event: String },
    /// Reply and end the session.
    Exit { text: String },
}

/// Where a bound form value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum BindValue {
    /// A fixed value, e.g. the slot behind a digit.
    Literal { value: String },
    /// The user's input text.
    Input,
    /// The session's display name.
    DisplayName,
}

/// How a node treats input that no option matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Fallback {
    /// Reply with an error and stay.
    Reject { text: String },
    /// Treat the input as data.
    Accept { action: Action },
}

/// A digit-indexed option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub digit: u8,
    pub action: Action,
}

/// One node of the dialogue tree.
///
/// Input is matched in this order: `zero` (for `"0"`), then `any`,
/// then `options`, then `bad_digit` or `free_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    pub stage: Stage,
    /// Shown when the node is entered through [`Action::Goto`].
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero: Option<Action>,
    /// Catch-all, checked after `zero` and before `options`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any: Option<Action>,
    /// A digit with no matching option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bad_digit: Option<Fallback>,
    /// Anything that is not a single digit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text: Option<Fallback>,
}

impl MenuNode {
    /// Start a node with a prompt and no rules.
    pub fn new(stage: Stage, prompt: impl Into<String>) -> Self {
        Self {
            stage,
            prompt: prompt.into(),
            options: Vec::new(),
            zero: None,
            any: None,
            bad_digit: None,
            free_text: None,
        }
    }

    pub fn option(mut self, digit: u8, action: Action) -> Self {
        self.options.push(Choice { digit, action });
        self
    }

    pub fn on_zero(mut self, action: Action) -> Self {
        self.zero = Some(action);
        self
    }

    pub fn on_any(mut self, action: Action) -> Self {
        self.any = Some(action);
        self
    }

    pub fn on_bad_digit(mut self, fallback: Fallback) -> Self {
        self.bad_digit = Some(fallback);
        self
    }

    pub fn on_free_text(mut self, fallback: Fallback) -> Self {
        self.free_text = Some(fallback);
        self
    }

    /// The action bound to `digit`, if any.
    pub fn choice(&self, digit: u8) -> Option<&Action> {
        self.options
            .iter()
            .find(|c| c.digit == digit)
            .map(|c| &c.action)
    }

    /// Every top-level action reachable from this node.
    fn actions(&self) -> impl Iterator<Item = &Action> {
        let fallbacks = [&self.bad_digit, &self.free_text];
        self.options
            .iter()
            .map(|c| &c.action)
            .chain(self.zero.iter())
            .chain(self.any.iter())
            .chain(fallbacks.into_iter().flatten().filter_map(|f| match f {
                Fallback::Accept { action } => Some(action),
                Fallback::Reject { .. } => None,
            }))
    }
}

/// A complete dialogue tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuTree {
    /// Shown by [`Action::Home`].
    pub main_menu: String,
    /// Sent when a transition fails.
    pub apology: String,
    pub nodes: Vec<MenuNode>,
}

impl MenuTree {
    /// One of the built-in trees, branded with the business name.
    pub fn builtin(variant: MenuVariant, business: &str) -> Self {
        match variant {
            MenuVariant::Standard => standard::tree(business),
            MenuVariant::Extended => extended::tree(business),
        }
    }

    /// Parse and validate a tree from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, DialogueError> {
        let tree: MenuTree = toml::from_str(content)?;
        tree.validate()?;
        Ok(tree)
    }

    /// Read, parse and validate a tree from a TOML file.
    pub fn load(path: &Path) -> Result<Self, DialogueError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// The node for `stage`.
    pub fn node(&self, stage: Stage) -> Result<&MenuNode, DialogueError> {
        self.nodes
            .iter()
            .find(|n| n.stage == stage)
            .ok_or(DialogueError::UnknownStage(stage))
    }

    /// Check that every input at every node leads somewhere.
    ///
    /// - a START node exists and no stage has two nodes;
    /// - every node answers both digits and free text (through `any`, or
    ///   through both fallbacks);
    /// - option digits are 0-9 and unique per node;
    /// - every `Goto` points at an existing node;
    /// - bound keys are non-empty;
    /// - the main menu and apology only use `{contact}`/`{CONTACT}`, since
    ///   they are shown with no form data guaranteed;
    /// - every other placeholder names a key that some bind in the tree
    ///   sets.
    pub fn validate(&self) -> Result<(), DialogueError> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.stage) {
                return Err(invalid(format!("duplicate node for stage {}", node.stage)));
            }
        }
        if !seen.contains(&Stage::Start) {
            return Err(invalid("missing START node".into()));
        }

        for node in &self.nodes {
            if node.any.is_none() && (node.bad_digit.is_none() || node.free_text.is_none()) {
                return Err(invalid(format!(
                    "stage {} needs `any` or both `bad_digit` and `free_text`",
                    node.stage
                )));
            }

            let mut digits = HashSet::new();
            for choice in &node.options {
                if choice.digit > 9 {
                    return Err(invalid(format!(
                        "stage {}: option digit {} is not a single digit",
                        node.stage, choice.digit
                    )));
                }
                if !digits.insert(choice.digit) {
                    return Err(invalid(format!(
                        "stage {}: digit {} used twice",
                        node.stage, choice.digit
                    )));
                }
            }

            for action in node.actions() {
                self.check_action(node.stage, action, &seen)?;
            }
        }

        for (label, text) in [("main_menu", &self.main_menu), ("apology", &self.apology)] {
            if let Some(key) = placeholders(text).into_iter().find(|k| !is_contact(k)) {
                return Err(invalid(format!("{label} uses form field {{{key}}}")));
            }
        }

        let mut bound = HashSet::new();
        for node in &self.nodes {
            for action in node.actions() {
                collect_binds(action, &mut bound);
            }
        }
        for node in &self.nodes {
            let mut texts = vec![node.prompt.as_str()];
            for fallback in [&node.bad_digit, &node.free_text].into_iter().flatten() {
                if let Fallback::Reject { text } = fallback {
                    texts.push(text);
                }
            }
            for action in node.actions() {
                collect_texts(action, &mut texts);
            }
            for text in texts {
                if let Some(key) = placeholders(text)
                    .into_iter()
                    .find(|k| !is_contact(k) && !bound.contains(k))
                {
                    return Err(invalid(format!(
                        "stage {}: {{{key}}} is never bound",
                        node.stage
                    )));
                }
            }
        }

        Ok(())
    }

    fn check_action(
        &self,
        at: Stage,
        action: &Action,
        stages: &HashSet<Stage>,
    ) -> Result<(), DialogueError> {
        match action {
            Action::Goto { stage } if !stages.contains(stage) => Err(invalid(format!(
                "stage {at}: goto {stage} has no node"
            ))),
            Action::Bind { key, then, .. } => {
                if key.trim().is_empty() {
                    return Err(invalid(format!("stage {at}: bind with empty key")));
                }
                self.check_action(at, then, stages)
            }
            _ => Ok(()),
        }
    }
}

fn invalid(msg: String) -> DialogueError {
    DialogueError::InvalidTree(msg)
}

fn is_contact(key: &str) -> bool {
    key == "contact" || key == "CONTACT"
}

fn collect_binds<'a>(action: &'a Action, keys: &mut HashSet<&'a str>) {
    if let Action::Bind { key, then, .. } = action {
        keys.insert(key);
        collect_binds(then, keys);
    }
}

fn collect_texts<'a>(action: &'a Action, texts: &mut Vec<&'a str>) {
    match action {
        Action::Say { text } | Action::Exit { text } => texts.push(text),
        Action::Complete { template, .. } => texts.push(template),
        Action::Bind { then, .. } => collect_texts(then, texts),
        Action::Goto { .. } | Action::Home => {}
    }
}

/// Shorthand constructors used by the built-in trees.
pub(crate) mod build {
    use super::{Action, BindValue, Fallback};
    use fitbot_core::stage::Stage;

    pub fn goto(stage: Stage) -> Action {
        Action::Goto { stage }
    }

    pub fn say(text: &str) -> Action {
        Action::Say {
            text: text.to_string(),
        }
    }

    pub fn complete(template: &str, event: &str) -> Action {
        Action::Complete {
            template: template.to_string(),
            event: event.to_string(),
        }
    }

    pub fn exit(text: &str) -> Action {
        Action::Exit {
            text: text.to_string(),
        }
    }

    pub fn bind(key: &str, value: BindValue, then: Action) -> Action {
        Action::Bind {
            key: key.to_string(),
            value,
            then: Box::new(then),
        }
    }

    pub fn literal(value: &str) -> BindValue {
        BindValue::Literal {
            value: value.to_string(),
        }
    }

    pub fn reject(text: &str) -> Fallback {
        Fallback::Reject {
            text: text.to_string(),
        }
    }

    pub fn accept(action: Action) -> Fallback {
        Fallback::Accept { action }
    }
}
